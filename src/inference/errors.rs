//! Inference error types.
//!
//! All errors implement `std::error::Error` via `thiserror`. Structured logging
//! is the caller's responsibility — these types carry the context needed to build
//! meaningful log entries.
//!
//! These errors stay inside the pipeline: the client folds transport failures
//! into [`GenerationOutcome`](super::types::GenerationOutcome) variants, and the
//! orchestrator converts those into substitute text. Only configuration and
//! client-construction failures reach library callers as `Err`.

use thiserror::Error;

/// Errors that can occur during inference operations.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// TCP/HTTP connection to the inference server failed.
    #[error("connection failed to {endpoint}: {reason}")]
    ConnectionFailed {
        endpoint: String,
        reason: String,
    },

    /// The inference server did not respond within the configured timeout.
    #[error("inference timeout after {duration_secs}s")]
    Timeout {
        duration_secs: u64,
    },

    /// Non-2xx HTTP response from the inference server.
    #[error("HTTP {status}: {body}")]
    HttpError {
        status: u16,
        body: String,
    },

    /// A 2xx response whose body could not be decoded.
    #[error("malformed server response: {reason}")]
    MalformedResponse {
        reason: String,
    },

    /// Configuration loading or validation error.
    #[error("config error: {reason}")]
    ConfigError {
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_http_error() {
        let err = InferenceError::HttpError {
            status: 500,
            body: "internal server error".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: internal server error");
    }

    #[test]
    fn test_display_timeout() {
        let err = InferenceError::Timeout { duration_secs: 60 };
        assert_eq!(err.to_string(), "inference timeout after 60s");
    }

    #[test]
    fn test_display_connection_failed() {
        let err = InferenceError::ConnectionFailed {
            endpoint: "http://localhost:11434/api/generate".to_string(),
            reason: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("localhost:11434"));
        assert!(err.to_string().contains("connection refused"));
    }
}
