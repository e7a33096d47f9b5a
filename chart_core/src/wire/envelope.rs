use serde::{Deserialize, Serialize};

use crate::common::chart_error::{ChartError, ErrCode};

/// `{ "success": bool, "data": T, "error": string }`, the shape of every
/// endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn into_result(self) -> Result<T, ChartError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(ChartError::new("response carries no data", ErrCode::ApiEmptyData)),
            (false, _) => Err(ChartError::new(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
                ErrCode::ApiFailure,
            )),
        }
    }
}

impl<T: serde::de::DeserializeOwned> ApiResponse<T> {
    /// Parse a response body and unwrap the envelope
    pub fn parse(body: &str) -> Result<T, ChartError> {
        let response: ApiResponse<T> = serde_json::from_str(body)?;
        response.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success() {
        let data: Vec<i32> = ApiResponse::parse(r#"{"success": true, "data": [1, 2]}"#).unwrap();
        assert_eq!(data, vec![1, 2]);
    }

    #[test]
    fn test_failure_carries_server_error() {
        let err = ApiResponse::<Vec<i32>>::parse(r#"{"success": false, "error": "db down"}"#)
            .unwrap_err();
        assert_eq!(err.errcode, ErrCode::ApiFailure);
        assert_eq!(err.msg, "db down");

        let err = ApiResponse::<Vec<i32>>::parse(r#"{"success": false}"#).unwrap_err();
        assert_eq!(err.msg, "unknown error");
    }

    #[test]
    fn test_missing_data() {
        let err = ApiResponse::<Vec<i32>>::parse(r#"{"success": true, "data": null}"#).unwrap_err();
        assert_eq!(err.errcode, ErrCode::ApiEmptyData);
        assert!(err.is_api_err());
    }

    #[test]
    fn test_malformed_body() {
        let err = ApiResponse::<Vec<i32>>::parse("<html>").unwrap_err();
        assert_eq!(err.errcode, ErrCode::SrcDataFormatError);
    }
}
