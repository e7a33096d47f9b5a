use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Error codes for the chart core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[repr(i32)]
pub enum ErrCode {
    // Common errors (0-99)
    #[strum(serialize = "_COMMON_ERR_BEGIN")]
    CommonErrBegin = 0,
    #[strum(serialize = "COMMON_ERROR")]
    CommonError = 1,
    #[strum(serialize = "PARA_ERROR")]
    ParaError = 5,
    #[strum(serialize = "CONFIG_ERROR")]
    ConfigError = 17,
    #[strum(serialize = "SRC_DATA_FORMAT_ERROR")]
    SrcDataFormatError = 18,
    #[strum(serialize = "_COMMON_ERR_END")]
    CommonErrEnd = 99,

    // API errors (100-199)
    #[strum(serialize = "_API_ERR_BEGIN")]
    ApiErrBegin = 100,
    #[strum(serialize = "API_FAILURE")]
    ApiFailure = 101,
    #[strum(serialize = "API_EMPTY_DATA")]
    ApiEmptyData = 102,
    #[strum(serialize = "_API_ERR_END")]
    ApiErrEnd = 199,

    // Series data errors (200-299)
    #[strum(serialize = "_DATA_ERR_BEGIN")]
    DataErrBegin = 200,
    #[strum(serialize = "PRICE_BELOW_ZERO")]
    PriceBelowZero = 201,
    #[strum(serialize = "KL_DATA_NOT_ALIGN")]
    KlDataNotAlign = 202,
    #[strum(serialize = "KL_DATA_INVALID")]
    KlDataInvalid = 203,
    #[strum(serialize = "NOT_ENOUGH_DATA")]
    NotEnoughData = 209,
    #[strum(serialize = "NO_DATA")]
    NoData = 210,
    #[strum(serialize = "_DATA_ERR_END")]
    DataErrEnd = 299,
}

impl ErrCode {
    pub fn is_data_err(&self) -> bool {
        let code = *self as i32;
        code > Self::DataErrBegin as i32 && code < Self::DataErrEnd as i32
    }

    pub fn is_api_err(&self) -> bool {
        let code = *self as i32;
        code > Self::ApiErrBegin as i32 && code < Self::ApiErrEnd as i32
    }
}

#[derive(Debug, Error)]
#[error("{errcode}: {msg}")]
pub struct ChartError {
    pub errcode: ErrCode,
    pub msg: String,
}

impl ChartError {
    pub fn new(message: impl Into<String>, code: ErrCode) -> Self {
        Self {
            errcode: code,
            msg: message.into(),
        }
    }

    pub fn is_data_err(&self) -> bool {
        self.errcode.is_data_err()
    }

    pub fn is_api_err(&self) -> bool {
        self.errcode.is_api_err()
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string(), ErrCode::SrcDataFormatError)
    }
}

impl From<chrono::ParseError> for ChartError {
    fn from(err: chrono::ParseError) -> Self {
        Self::new(err.to_string(), ErrCode::SrcDataFormatError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_code_ranges() {
        assert!(ErrCode::KlDataInvalid.is_data_err());
        assert!(ErrCode::NotEnoughData.is_data_err());
        assert!(!ErrCode::ApiFailure.is_data_err());
        assert!(ErrCode::ApiFailure.is_api_err());
        assert!(!ErrCode::DataErrBegin.is_data_err());
    }

    #[test]
    fn test_display() {
        let err = ChartError::new("bad bar", ErrCode::KlDataInvalid);
        assert_eq!(err.to_string(), "KL_DATA_INVALID: bad bar");
        assert_eq!(ErrCode::from_str("PARA_ERROR").unwrap(), ErrCode::ParaError);
    }

    #[test]
    fn test_from_serde() {
        let err: ChartError = serde_json::from_str::<f64>("nope").unwrap_err().into();
        assert_eq!(err.errcode, ErrCode::SrcDataFormatError);
    }
}
