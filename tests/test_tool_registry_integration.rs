//! Tool registry integration tests
//!
//! Exercises registry construction from configuration, schema validation in
//! front of execution, and error propagation through the registry seam.

use flightbot::config::ToolConfig;
use flightbot::testing::MockTool;
use flightbot::tools::{ToolError, ToolRegistry};
use serde_json::{json, Value};
use std::collections::HashMap;

#[tokio::test]
async fn test_registry_initialization_with_valid_config() {
    let mut registry = ToolRegistry::new();
    let mut tool_configs = HashMap::new();

    tool_configs.insert(
        "FlightInfoBot".to_string(),
        ToolConfig::Simple("builtin".to_string()),
    );

    let result = registry.initialize(&tool_configs).await;

    assert!(result.is_ok());
    assert_eq!(registry.list_tools(), vec!["FlightInfoBot".to_string()]);
}

#[tokio::test]
async fn test_registry_initialization_with_unknown_implementation() {
    let mut registry = ToolRegistry::new();
    let mut tool_configs = HashMap::new();

    tool_configs.insert(
        "FlightInfoBot".to_string(),
        ToolConfig::Simple("nonexistent_impl".to_string()),
    );

    let result = registry.initialize(&tool_configs).await;

    assert!(matches!(result, Err(ToolError::UnknownImplementation(_))));
}

#[tokio::test]
async fn test_registry_initialization_with_missing_builtin() {
    let mut registry = ToolRegistry::new();
    let mut tool_configs = HashMap::new();

    tool_configs.insert(
        "nonexistent_builtin".to_string(),
        ToolConfig::Simple("builtin".to_string()),
    );

    let result = registry.initialize(&tool_configs).await;

    assert!(matches!(result, Err(ToolError::UnknownTool(_))));
}

#[tokio::test]
async fn test_registry_initialization_with_complex_config() {
    let mut registry = ToolRegistry::new();
    let mut tool_configs = HashMap::new();

    let mut config_map = HashMap::new();
    config_map.insert(
        "routes".to_string(),
        json!({"Boston": "DL0099 Departing at 08:15 AM"}),
    );

    tool_configs.insert(
        "FlightInfoBot".to_string(),
        ToolConfig::Complex {
            implementation: "builtin".to_string(),
            config: config_map,
        },
    );

    registry.initialize(&tool_configs).await.unwrap();

    let result = registry
        .execute_tool("FlightInfoBot", &json!({"city": "Boston"}))
        .await
        .unwrap();
    assert_eq!(result, json!("DL0099 Departing at 08:15 AM"));
}

#[tokio::test]
async fn test_schema_validation_rejects_missing_required_param() {
    let mut registry = ToolRegistry::new();
    let mut tool_configs = HashMap::new();
    tool_configs.insert(
        "FlightInfoBot".to_string(),
        ToolConfig::Simple("builtin".to_string()),
    );
    registry.initialize(&tool_configs).await.unwrap();

    let result = registry.execute_tool("FlightInfoBot", &json!({})).await;

    assert!(matches!(result, Err(ToolError::ValidationError(_))));
}

#[tokio::test]
async fn test_schema_validation_rejects_wrong_type() {
    let mut registry = ToolRegistry::new();
    let mut tool_configs = HashMap::new();
    tool_configs.insert(
        "FlightInfoBot".to_string(),
        ToolConfig::Simple("builtin".to_string()),
    );
    registry.initialize(&tool_configs).await.unwrap();

    let result = registry
        .execute_tool("FlightInfoBot", &json!({"city": 42}))
        .await;

    assert!(matches!(result, Err(ToolError::ValidationError(_))));
}

#[tokio::test]
async fn test_schema_validation_rejects_unknown_fields() {
    let mut registry = ToolRegistry::new();
    let mut tool_configs = HashMap::new();
    tool_configs.insert(
        "FlightInfoBot".to_string(),
        ToolConfig::Simple("builtin".to_string()),
    );
    registry.initialize(&tool_configs).await.unwrap();

    let result = registry
        .execute_tool("FlightInfoBot", &json!({"city": "Seattle", "airline": "DL"}))
        .await;

    assert!(matches!(result, Err(ToolError::ValidationError(_))));
}

#[tokio::test]
async fn test_registered_mock_tool_executes_with_valid_params() {
    let mut registry = ToolRegistry::new();
    registry.register("mock", Box::new(MockTool::new("mock", json!("pong"))));

    let result = registry
        .execute_tool("mock", &json!({"input": "ping"}))
        .await
        .unwrap();

    assert_eq!(result, json!("pong"));
}

#[tokio::test]
async fn test_registered_mock_tool_failure_propagates() {
    let mut registry = ToolRegistry::new();
    registry.register("mock", Box::new(MockTool::with_failure("mock")));

    let result = registry.execute_tool("mock", &json!({"input": "ping"})).await;

    assert!(matches!(result, Err(ToolError::ExecutionError(_))));
}

#[tokio::test]
async fn test_registry_shutdown_succeeds() {
    let mut registry = ToolRegistry::new();
    let mut tool_configs = HashMap::new();
    tool_configs.insert(
        "FlightInfoBot".to_string(),
        ToolConfig::Simple("builtin".to_string()),
    );
    registry.initialize(&tool_configs).await.unwrap();

    let result = registry.shutdown().await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_describe_tool_returns_declared_schema() {
    let mut registry = ToolRegistry::new();
    let mut tool_configs = HashMap::new();
    tool_configs.insert(
        "FlightInfoBot".to_string(),
        ToolConfig::Simple("builtin".to_string()),
    );
    registry.initialize(&tool_configs).await.unwrap();

    let description = registry.describe_tool("FlightInfoBot").unwrap();
    assert_eq!(description.name, "FlightInfoBot");
    assert_eq!(description.parameters["properties"]["city"]["type"], "string");

    assert!(registry.describe_tool("unknown").is_none());
}

#[tokio::test]
async fn test_execute_records_parameters_on_mock() {
    let mut registry = ToolRegistry::new();
    let mock = MockTool::new("mock", Value::Null);
    let recorded = mock.executed_params.clone();
    registry.register("mock", Box::new(mock));

    registry
        .execute_tool("mock", &json!({"input": "first"}))
        .await
        .unwrap();
    registry
        .execute_tool("mock", &json!({"input": "second"}))
        .await
        .unwrap();

    let params = recorded.lock().await.clone();
    assert_eq!(params.len(), 2);
    assert_eq!(params[0], json!({"input": "first"}));
    assert_eq!(params[1], json!({"input": "second"}));
}
