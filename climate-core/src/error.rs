//! Error types shared by the dashboards and the CLI.

use thiserror::Error;

/// Rejection of a filter form before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Start year ({start}) cannot be greater than end year ({end})")]
    InvalidYearRange { start: i32, end: i32 },
}

/// Failure of a single API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (network, CORS, timeout).
    #[error("request to {path} failed: {reason}")]
    Transport { path: String, reason: String },
    /// The backend answered with a non-2xx status.
    #[error("{path} returned {status}: {message}")]
    Status {
        path: String,
        status: u16,
        message: String,
    },
    /// The body was not the JSON shape we expected.
    #[error("could not decode response from {path}: {reason}")]
    Decode { path: String, reason: String },
}

impl ApiError {
    pub fn path(&self) -> &str {
        match self {
            ApiError::Transport { path, .. }
            | ApiError::Status { path, .. }
            | ApiError::Decode { path, .. } => path,
        }
    }

    /// True when the backend reported that it has nothing to show yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_range_message() {
        let err = FilterError::InvalidYearRange {
            start: 2010,
            end: 2000,
        };
        assert_eq!(
            err.to_string(),
            "Start year (2010) cannot be greater than end year (2000)"
        );
    }

    #[test]
    fn test_api_error_path_and_not_found() {
        let err = ApiError::Status {
            path: "/api/kpi".to_string(),
            status: 404,
            message: "No data available".to_string(),
        };
        assert_eq!(err.path(), "/api/kpi");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "/api/kpi returned 404: No data available");

        let err = ApiError::Decode {
            path: "/api/kpi".to_string(),
            reason: "expected value".to_string(),
        };
        assert!(!err.is_not_found());
    }
}
