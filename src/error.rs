//! Error types for the flight lookup service
//!
//! Maps internal errors to JSON-RPC error payloads for the MCP transport.
//! A semantically unknown city is NOT an error anywhere in this crate; the
//! tool answers it with a sentinel string. Only plumbing failures
//! (configuration, validation, tool execution) surface here.

use once_cell::sync::Lazy;
use regex::Regex;
use rmcp::model::ErrorData;
use thiserror::Error;

/// Main error type for service operations
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Tool execution failed: {message}")]
    ToolExecutionFailed { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },

    #[error("Transport error: {0}")]
    TransportError(#[from] Box<dyn std::error::Error + Send + Sync>),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),

    #[error("Tool error: {0}")]
    ToolError(#[from] crate::tools::ToolError),
}

impl ServiceError {
    /// Convert to a JSON-RPC error for the MCP transport layer
    pub fn to_rpc_error(&self) -> ErrorData {
        use crate::tools::ToolError;

        let message = sanitize_error_message(&self.to_string());
        match self {
            ServiceError::InvalidInput { .. }
            | ServiceError::ToolError(ToolError::ValidationError(_))
            | ServiceError::ToolError(ToolError::UnknownTool(_)) => {
                ErrorData::invalid_params(message, None)
            }
            _ => ErrorData::internal_error(message, None),
        }
    }

    /// Create tool execution error
    pub fn tool_execution_failed<S: Into<String>>(message: S) -> Self {
        Self::ToolExecutionFailed {
            message: message.into(),
        }
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create internal error
    pub fn internal_error<S: Into<String>>(message: S) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

static SECRET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(password|token|key|secret)[=:]\s*\S+").expect("secret pattern compiles")
});

static SENSITIVE_PATH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/[a-zA-Z0-9._/-]+/(secrets?|\.ssh|\.aws|\.config)/[a-zA-Z0-9._/-]+")
        .expect("path pattern compiles")
});

/// Sanitize error messages before they cross the wire
fn sanitize_error_message(message: &str) -> String {
    let mut sanitized = SECRET_PATTERN.replace_all(message, "${1}=***").to_string();

    sanitized = SENSITIVE_PATH_PATTERN
        .replace_all(&sanitized, "/***REDACTED***/")
        .to_string();

    // Truncate very long messages - ensure total length is <= 500
    if sanitized.len() > 500 {
        let truncate_suffix = "...[truncated]";
        let max_content_len = 500 - truncate_suffix.len();
        sanitized = format!("{}{}", &sanitized[..max_content_len], truncate_suffix);
    }

    sanitized
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
