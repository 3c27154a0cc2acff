//! Transport layer for serving tools to callers
//!
//! Request framing, protocol negotiation, and wire-level schema declaration
//! are delegated to the external MCP SDK (`rmcp`); this module provides the
//! handler that bridges the SDK to the local tool registry. The only served
//! channel is standard input/output.

pub mod stdio;

pub use stdio::LookupService;
