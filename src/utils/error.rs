//! Error Handling
//!
//! Unified error types for the audit pipeline.
//! Uses thiserror for ergonomic error definitions.

use site_reporter_llm::LlmError;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// Required input missing or empty, rejected before any outbound call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors (missing API key)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Upstream service returned non-success or was unreachable.
    /// Display is the bare upstream message so failure states carry it
    /// unchanged.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// Telemetry call succeeded but the audit payload was unusable
    #[error("Malformed telemetry: {0}")]
    MalformedTelemetry(String),

    /// Analysis payload parsed as JSON but broke the response contract
    #[error("Schema violation at {path}: {message}")]
    SchemaViolation { path: String, message: String },

    /// Analysis payload was not valid JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Operation not allowed in the current audit state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an upstream error
    pub fn upstream(status: u16, msg: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: msg.into(),
        }
    }

    /// Create a malformed telemetry error
    pub fn malformed_telemetry(msg: impl Into<String>) -> Self {
        Self::MalformedTelemetry(msg.into())
    }

    /// Create a schema violation error
    pub fn schema_violation(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::SchemaViolation {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }
}

/// Convert AppError to the plain string recorded in failure states
impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}

/// Map provider-layer errors into the audit error taxonomy.
///
/// Status-bearing failures surface as `Upstream` carrying the provider's
/// message; local misconfiguration and payload decode failures keep their
/// own kinds. Transport failures get a gateway status since no HTTP
/// exchange completed.
impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::AuthenticationFailed { message } => AppError::Upstream {
                status: 401,
                message,
            },
            LlmError::RateLimited { message } => AppError::Upstream {
                status: 429,
                message,
            },
            LlmError::InvalidRequest { message } => AppError::Upstream {
                status: 400,
                message,
            },
            LlmError::ServerError { message, status } => AppError::Upstream {
                status: status.unwrap_or(500),
                message,
            },
            LlmError::NetworkError { message } => AppError::Upstream {
                status: 502,
                message,
            },
            LlmError::ParseError { message } => AppError::Parse(message),
            LlmError::Misconfiguration { message } => AppError::Config(message),
            LlmError::Other { message } => AppError::Upstream {
                status: 500,
                message,
            },
        }
    }
}
