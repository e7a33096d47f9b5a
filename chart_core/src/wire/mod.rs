pub mod envelope;
pub mod kline;
pub mod serde_util;

pub use envelope::ApiResponse;
pub use kline::KlinePayload;
