//! Flight lookup tool service
//!
//! A small service that exposes one named, schema-validated lookup tool to a
//! calling agent over a standard-input/output MCP channel.
//!
//! # Overview
//!
//! This crate provides:
//! - A tool system with JSON schema validation
//! - The `FlightInfoBot` builtin tool backed by an immutable answer table
//! - A stdio transport bridge built on the `rmcp` MCP SDK
//! - TOML configuration and structured logging
//!
//! # Quick Start
//!
//! ```rust
//! use flightbot::config::ToolConfig;
//! use flightbot::tools::ToolRegistry;
//! use serde_json::json;
//! use std::collections::HashMap;
//!
//! # tokio_test::block_on(async {
//! let mut registry = ToolRegistry::new();
//! let mut tools = HashMap::new();
//! tools.insert(
//!     "FlightInfoBot".to_string(),
//!     ToolConfig::Simple("builtin".to_string()),
//! );
//! registry.initialize(&tools).await?;
//!
//! let answer = registry
//!     .execute_tool("FlightInfoBot", &json!({"city": "Seattle"}))
//!     .await?;
//! assert_eq!(answer, json!("DL2478 Departing at 10:00 AM"));
//!
//! let fallback = registry
//!     .execute_tool("FlightInfoBot", &json!({"city": "Boston"}))
//!     .await?;
//! assert_eq!(fallback, json!("Please provide a valid city."));
//! # Ok::<(), flightbot::tools::ToolError>(())
//! # });
//! ```

pub mod config;
pub mod error;
pub mod observability;
pub mod testing;
pub mod tools;
pub mod transport;

pub use config::*;
pub use error::{ServiceError, ServiceResult};
pub use tools::{Tool, ToolDescription, ToolError, ToolRegistry};
pub use transport::LookupService;
