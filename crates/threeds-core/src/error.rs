//! # 3-D Secure Error Types
//!
//! Typed error handling around liability-shift evaluation.
//! The evaluator itself is total; these errors come from the code around it
//! (configuration, order parsing, audit sinks, order approval).

use thiserror::Error;

/// Error type for everything surrounding a 3-D Secure decision
#[derive(Debug, Error)]
pub enum ThreeDsError {
    /// Configuration errors (invalid policy, unknown contingency)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Order is structurally unusable (missing id, etc.)
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    /// Order payload could not be parsed
    #[error("Order parse error: {0}")]
    OrderParse(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Audit sink failed to record an outcome
    #[error("Audit sink error: {0}")]
    AuditSink(String),

    /// Issuer rejected or failed the authentication
    #[error("Card declined: {reason}")]
    CardDeclined { reason: String },

    /// Authentication did not complete; buyer should authenticate again
    #[error("Authentication incomplete: {reason}")]
    AuthenticationIncomplete { reason: String },
}

impl ThreeDsError {
    /// Returns true if the buyer can try again with the same card
    pub fn is_retryable(&self) -> bool {
        matches!(self, ThreeDsError::AuthenticationIncomplete { .. })
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ThreeDsError::Configuration(_) => 500,
            ThreeDsError::InvalidOrder(_) => 400,
            ThreeDsError::OrderParse(_) => 400,
            ThreeDsError::Serialization(_) => 500,
            ThreeDsError::AuditSink(_) => 500,
            ThreeDsError::CardDeclined { .. } => 402,
            ThreeDsError::AuthenticationIncomplete { .. } => 422,
        }
    }
}

impl From<serde_json::Error> for ThreeDsError {
    fn from(err: serde_json::Error) -> Self {
        ThreeDsError::Serialization(err.to_string())
    }
}

/// Result type alias for 3-D Secure operations
pub type ThreeDsResult<T> = Result<T, ThreeDsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(ThreeDsError::AuthenticationIncomplete {
            reason: "try again".into()
        }
        .is_retryable());
        assert!(!ThreeDsError::CardDeclined {
            reason: "rejected".into()
        }
        .is_retryable());
        assert!(!ThreeDsError::OrderParse("bad json".into()).is_retryable());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ThreeDsError::InvalidOrder("no id".into()).status_code(), 400);
        assert_eq!(
            ThreeDsError::CardDeclined {
                reason: "x".into()
            }
            .status_code(),
            402
        );
        assert_eq!(
            ThreeDsError::AuthenticationIncomplete {
                reason: "x".into()
            }
            .status_code(),
            422
        );
        assert_eq!(ThreeDsError::Configuration("x".into()).status_code(), 500);
    }

    #[test]
    fn test_from_serde_json_error() {
        let err: ThreeDsError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, ThreeDsError::Serialization(_)));
    }
}
