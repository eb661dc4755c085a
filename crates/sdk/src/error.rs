//! SDK error types
//!
//! Every failure a call to the evaluation service can end in. Requests are
//! sent exactly once, so each variant describes one final outcome.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for SDK operations
pub type SdkResult<T> = Result<T, SdkError>;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Username or API key was rejected (401)
    #[error("Authentication failed ({status_code}): {message}")]
    Unauthorized {
        /// HTTP status code
        status_code: u16,
        /// Message returned by the service
        message: String,
    },

    /// The account may not access the requested system (403)
    #[error("Access denied: {message}")]
    Forbidden {
        /// Message returned by the service
        message: String,
    },

    /// The requested record does not exist (404)
    #[error("{resource_type} not found: {resource_id}")]
    NotFound {
        /// Kind of record, for example "system"
        resource_type: String,
        /// Identifier or service message
        resource_id: String,
    },

    /// The service refused the submission as sent (400, 409, 422)
    #[error("Submission rejected ({status_code}): {message}")]
    Rejected {
        /// HTTP status code
        status_code: u16,
        /// Message returned by the service
        message: String,
        /// Per-field problems, when the service lists them
        field_errors: Vec<FieldError>,
    },

    /// Too many requests (429)
    #[error("Rate limited by the service{}", retry_hint(*retry_after))]
    RateLimited {
        /// Seconds the service asked to wait, from `Retry-After`
        retry_after: Option<u64>,
    },

    /// The service failed while handling the request (5xx)
    #[error("Server error ({status_code}): {message}")]
    ServerError {
        /// HTTP status code
        status_code: u16,
        /// Message or body returned by the service
        message: String,
    },

    /// No response arrived within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// The service could not be reached
    #[error("Could not reach the service: {source}")]
    Network {
        /// Transport error
        #[source]
        source: reqwest::Error,
    },

    /// The response had an unexpected status or shape
    #[error("Unexpected response: {message}")]
    InvalidResponse {
        /// What was wrong with the response
        message: String,
    },

    /// The client configuration cannot be used
    #[error("Invalid configuration: {message}")]
    ConfigError {
        /// What is wrong
        message: String,
    },

    /// A local file referenced by a submission could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

fn retry_hint(retry_after: Option<u64>) -> String {
    match retry_after {
        Some(secs) => format!(", retry after {}s", secs),
        None => String::new(),
    }
}

impl SdkError {
    /// HTTP status code the service answered with, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status_code, .. }
            | Self::Rejected { status_code, .. }
            | Self::ServerError { status_code, .. } => Some(*status_code),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// Create a not found error
    pub fn not_found(resource_type: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
        }
    }
}

/// Problem with one field of a rejected submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field path, for example "metadata.metric_names"
    pub field: String,
    /// What is wrong with it
    pub message: String,
}

impl FieldError {
    /// Create a new field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network { source: err }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code() {
        let err = SdkError::Unauthorized {
            status_code: 401,
            message: "bad key".to_string(),
        };
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(SdkError::not_found("system", "abc").status_code(), Some(404));
        assert_eq!(
            SdkError::RateLimited { retry_after: None }.status_code(),
            Some(429)
        );
        assert_eq!(SdkError::Timeout.status_code(), None);
    }

    #[test]
    fn test_rate_limit_message() {
        assert_eq!(
            SdkError::RateLimited { retry_after: Some(7) }.to_string(),
            "Rate limited by the service, retry after 7s"
        );
        assert_eq!(
            SdkError::RateLimited { retry_after: None }.to_string(),
            "Rate limited by the service"
        );
    }

    #[test]
    fn test_io_error_names_path() {
        let err = SdkError::Io {
            path: PathBuf::from("outputs/3.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        };
        assert_eq!(err.to_string(), "Failed to read outputs/3.json: No such file");
    }

    #[test]
    fn test_field_error() {
        let err = FieldError::new("metadata.task", "Unknown task");
        assert_eq!(err.to_string(), "metadata.task: Unknown task");
    }
}
