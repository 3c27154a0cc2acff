//! Tool system for the flight lookup service
//!
//! One named operation per tool, described by a JSON schema. Parameters are
//! validated against the declared schema before a handler ever runs; handlers
//! therefore only see shape-valid input.

use crate::config::ToolConfig;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

pub mod builtin;

/// Interface every served tool implements
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool's name, description, and JSON schema for its input
    fn describe(&self) -> ToolDescription;

    /// Receives the tool's configuration table from the service config.
    /// Called once at service startup.
    async fn initialize(&mut self, config: Option<&Value>) -> Result<(), ToolError>;

    /// Receives parameters matching the schema from describe().
    /// Parameters are validated against the schema before this is invoked.
    async fn execute(&self, parameters: &Value) -> Result<Value, ToolError>;

    /// Performs cleanup (release resources). Optional.
    async fn shutdown(&mut self) -> Result<(), ToolError> {
        Ok(())
    }
}

/// Declared surface of a tool: the (name, schema, description) tuple the
/// transport advertises to callers
#[derive(Debug, Clone)]
pub struct ToolDescription {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Registry of served tools
///
/// Constructed once at startup from the `[tools]` config table and never
/// mutated while serving; tools themselves hold no mutable state after
/// initialization, so concurrent execution needs no locking here.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Initialize the registry with the tool table from the service config
    pub async fn initialize(
        &mut self,
        tool_configs: &HashMap<String, ToolConfig>,
    ) -> Result<(), ToolError> {
        for (tool_name, tool_config) in tool_configs {
            let mut tool = self.create_tool(tool_name, tool_config)?;

            // Extract config for the initialize() method
            let config = match tool_config {
                ToolConfig::Simple(_) => None,
                ToolConfig::Complex { config, .. } => Some(serde_json::to_value(config).unwrap()),
            };

            tool.initialize(config.as_ref()).await?;

            self.tools.insert(tool_name.clone(), tool);
        }

        Ok(())
    }

    /// Register a tool instance directly, bypassing configuration.
    /// Used by tests and embedders.
    pub fn register(&mut self, name: impl Into<String>, tool: Box<dyn Tool>) {
        self.tools.insert(name.into(), tool);
    }

    /// Create tool instance based on configuration
    fn create_tool(
        &self,
        tool_name: &str,
        config: &ToolConfig,
    ) -> Result<Box<dyn Tool>, ToolError> {
        let impl_name = match config {
            ToolConfig::Simple(impl_name) => impl_name,
            ToolConfig::Complex { implementation, .. } => implementation,
        };

        match impl_name.as_str() {
            "builtin" => Ok(self.create_builtin_tool(tool_name)?),
            _ => Err(ToolError::UnknownImplementation(impl_name.clone())),
        }
    }

    /// Create builtin tool instances
    fn create_builtin_tool(&self, tool_name: &str) -> Result<Box<dyn Tool>, ToolError> {
        match tool_name {
            "FlightInfoBot" => Ok(Box::new(builtin::FlightInfoTool::new())),
            _ => Err(ToolError::UnknownTool(tool_name.to_string())),
        }
    }

    /// Get tool description
    pub fn describe_tool(&self, tool_name: &str) -> Option<ToolDescription> {
        self.tools.get(tool_name).map(|tool| tool.describe())
    }

    /// Get descriptions of all registered tools, sorted by name
    pub fn descriptions(&self) -> Vec<ToolDescription> {
        let mut descriptions: Vec<ToolDescription> =
            self.tools.values().map(|tool| tool.describe()).collect();
        descriptions.sort_by(|a, b| a.name.cmp(&b.name));
        descriptions
    }

    /// Execute tool with validated parameters
    pub async fn execute_tool(
        &self,
        tool_name: &str,
        parameters: &Value,
    ) -> Result<Value, ToolError> {
        let tool = self
            .tools
            .get(tool_name)
            .ok_or_else(|| ToolError::UnknownTool(tool_name.to_string()))?;

        // Parameters are validated against the declared schema before execution
        self.validate_parameters(tool_name, parameters)?;

        tool.execute(parameters).await
    }

    /// Validate parameters against the tool's declared schema
    fn validate_parameters(&self, tool_name: &str, parameters: &Value) -> Result<(), ToolError> {
        let tool = self
            .tools
            .get(tool_name)
            .ok_or_else(|| ToolError::UnknownTool(tool_name.to_string()))?;

        let description = tool.describe();
        let validator = jsonschema::validator_for(&description.parameters)
            .map_err(|e| ToolError::SchemaError(format!("Schema compilation error: {e}")))?;

        validator.validate(parameters).map_err(|mut errors| {
            let error = errors
                .next()
                .expect("validate returns a non-empty iterator on error");
            ToolError::ValidationError(format!("At '{}': {}", error.instance_path, error))
        })
    }

    /// Get list of available tool names
    pub fn list_tools(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Shutdown all tools
    pub async fn shutdown(&mut self) -> Result<(), ToolError> {
        for tool in self.tools.values_mut() {
            tool.shutdown().await?;
        }
        Ok(())
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Tool system errors
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Unknown tool implementation: {0}")]
    UnknownImplementation(String),
    #[error("Tool initialization failed: {0}")]
    InitializationError(String),
    #[error("Parameter validation failed: {0}")]
    ValidationError(String),
    #[error("Schema error: {0}")]
    SchemaError(String),
    #[error("Tool execution failed: {0}")]
    ExecutionError(String),
    #[error("Tool shutdown failed: {0}")]
    ShutdownError(String),
}
