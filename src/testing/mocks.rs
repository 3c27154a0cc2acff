//! Mock implementations for testing
//!
//! Provides a mock Tool implementation to enable testing of the registry and
//! the transport handler without touching the builtin tools.

use crate::tools::{Tool, ToolDescription, ToolError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Mock tool for testing
///
/// Answers every execution with a fixed response and records the parameters
/// it was called with. `with_failure()` makes every execution fail instead.
pub struct MockTool {
    pub name: String,
    pub response: Value,
    pub executed_params: Arc<Mutex<Vec<Value>>>,
    pub should_fail: bool,
    pub initialized: Arc<Mutex<bool>>,
}

impl MockTool {
    pub fn new(name: impl Into<String>, response: Value) -> Self {
        Self {
            name: name.into(),
            response,
            executed_params: Arc::new(Mutex::new(Vec::new())),
            should_fail: false,
            initialized: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_failure(name: impl Into<String>) -> Self {
        Self {
            should_fail: true,
            ..Self::new(name, Value::Null)
        }
    }

    pub async fn get_executed_params(&self) -> Vec<Value> {
        self.executed_params.lock().await.clone()
    }
}

#[async_trait]
impl Tool for MockTool {
    fn describe(&self) -> ToolDescription {
        ToolDescription {
            name: self.name.clone(),
            description: "Mock tool for testing".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "input": {
                        "type": "string"
                    }
                },
                "required": ["input"],
                "additionalProperties": false
            }),
        }
    }

    async fn initialize(&mut self, _config: Option<&Value>) -> Result<(), ToolError> {
        *self.initialized.lock().await = true;
        Ok(())
    }

    async fn execute(&self, parameters: &Value) -> Result<Value, ToolError> {
        if self.should_fail {
            return Err(ToolError::ExecutionError(
                "Mock execution failure".to_string(),
            ));
        }

        let mut params = self.executed_params.lock().await;
        params.push(parameters.clone());
        Ok(self.response.clone())
    }
}
