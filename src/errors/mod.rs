//! Error taxonomy for the request layer
//!
//! - `TransportError`: network failure, timeout, non-2xx HTTP status, undecodable body
//! - `RequestError::Envelope`: the server answered with a non-200 `code`
//! - `ValidationError`: rejected on the client before any request is made
//!
//! Every error maps onto one of the shared numeric codes in `codes`.

pub mod codes;

pub use codes::{ErrorCode, SUCCESS_CODE};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Network error calling {endpoint}: {message}")]
    Network { endpoint: String, message: String },

    #[error("Request to {endpoint} timed out after {timeout_ms}ms")]
    Timeout { endpoint: String, timeout_ms: u64 },

    #[error("HTTP {status} from {endpoint}")]
    HttpStatus {
        endpoint: String,
        status: u16,
        body: Option<String>,
    },

    #[error("Malformed response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl TransportError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            TransportError::Network { .. } => ErrorCode::NetworkError,
            TransportError::Timeout { .. } => ErrorCode::TimeoutError,
            TransportError::HttpStatus { status, .. } => match status {
                401 => ErrorCode::Unauthorized,
                403 => ErrorCode::Forbidden,
                404 => ErrorCode::ResourceNotFound,
                _ => ErrorCode::NetworkError,
            },
            TransportError::Decode { .. } => ErrorCode::SystemError,
        }
    }

    /// Failures worth one more attempt for idempotent reads
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Network { .. } | TransportError::Timeout { .. } => true,
            TransportError::HttpStatus { status, .. } => *status >= 500,
            TransportError::Decode { .. } => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field '{field}'")]
    MissingField { field: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Request failed with code {code}: {message}")]
    Envelope { code: i64, message: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl RequestError {
    /// Numeric code surfaced to the user
    pub fn code(&self) -> i64 {
        match self {
            RequestError::Transport(e) => e.error_code().code(),
            RequestError::Envelope { code, .. } => *code,
            RequestError::Validation(ValidationError::MissingField { .. }) => {
                ErrorCode::MissingParams.code()
            }
            RequestError::Validation(ValidationError::InvalidField { .. }) => {
                ErrorCode::InvalidParams.code()
            }
        }
    }

    /// Message for inline display: the server message for envelope errors,
    /// a generic transport message otherwise
    pub fn user_message(&self) -> String {
        match self {
            RequestError::Transport(e) => e.error_code().default_message().to_string(),
            RequestError::Envelope { code, message } => {
                if message.trim().is_empty() {
                    ErrorCode::from_code(*code)
                        .map(|c| c.default_message().to_string())
                        .unwrap_or_else(|| format!("Request failed with code {}", code))
                } else {
                    message.clone()
                }
            }
            RequestError::Validation(e) => e.to_string(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RequestError::Transport(TransportError::Timeout { .. }))
    }
}

pub type RequestResult<T> = Result<T, RequestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_codes() {
        let timeout = RequestError::from(TransportError::Timeout {
            endpoint: "/api/enterprises".to_string(),
            timeout_ms: 10,
        });
        assert_eq!(timeout.code(), ErrorCode::TimeoutError.code());
        assert!(timeout.is_timeout());
        assert_eq!(timeout.user_message(), "Request timed out, please try again");

        let forbidden = TransportError::HttpStatus {
            endpoint: "/api/lab/tests".to_string(),
            status: 403,
            body: None,
        };
        assert_eq!(forbidden.error_code(), ErrorCode::Forbidden);
        assert!(!forbidden.is_retryable());
    }

    #[test]
    fn test_envelope_message_falls_back_to_code_default() {
        let with_message = RequestError::Envelope {
            code: 40004,
            message: "Enterprise E-17 not found".to_string(),
        };
        assert_eq!(with_message.user_message(), "Enterprise E-17 not found");

        let empty = RequestError::Envelope {
            code: 40004,
            message: String::new(),
        };
        assert_eq!(empty.user_message(), "Resource not found");
    }

    #[test]
    fn test_validation_codes() {
        let missing = RequestError::from(ValidationError::MissingField {
            field: "keyword".to_string(),
        });
        assert_eq!(missing.code(), 30002);

        let invalid = RequestError::from(ValidationError::InvalidField {
            field: "status".to_string(),
            reason: "unknown value".to_string(),
        });
        assert_eq!(invalid.code(), 30001);
    }
}
