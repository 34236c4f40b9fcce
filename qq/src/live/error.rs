//! Live gateway error types

use thiserror::Error;

/// Errors that can occur while fetching live queue data
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Venue {0} has no live feed")]
    NoFeed(String),

    #[error("Live feed returned HTTP {status}")]
    Status { status: u16 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid live payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Live feed is disabled")]
    Disabled,
}

impl GatewayError {
    /// Check if another attempt might succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Status { status } => matches!(status, 408 | 429) || *status >= 500,
            GatewayError::Network(_) => true,
            GatewayError::NoFeed(_) => false,
            GatewayError::Json(_) => false,
            GatewayError::Disabled => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_retryable() {
        assert!(GatewayError::Status { status: 503 }.is_retryable());
        assert!(GatewayError::Status { status: 429 }.is_retryable());
        assert!(!GatewayError::Status { status: 404 }.is_retryable());
        assert!(!GatewayError::NoFeed("EFTELING".to_string()).is_retryable());
        assert!(!GatewayError::Disabled.is_retryable());

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(!GatewayError::Json(json_err).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = GatewayError::Status { status: 502 };
        assert_eq!(err.to_string(), "Live feed returned HTTP 502");
        assert!(GatewayError::NoFeed("X".to_string()).to_string().contains("X"));
    }
}
