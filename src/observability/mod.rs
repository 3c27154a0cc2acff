//! Observability for the flight lookup service
//!
//! Structured logging only. The service speaks its protocol on stdout, so
//! every log line goes to stderr.

pub mod logging;

// Re-export for convenience
pub use logging::{init_default_logging, init_logging, LogFormat};

// Span macros for structured logging
pub use logging::{lifecycle_span, rpc_span, tool_span};
