pub mod chart_error;
pub mod enums;
pub mod time;
pub mod utils;
