//! Stdio service handler
//!
//! `LookupService` implements the MCP SDK's `ServerHandler`, translating
//! between the SDK's model types and the local tool registry: tool listing
//! from registry descriptions, tool calls into validated execution, tool
//! errors into JSON-RPC errors. The service declares no root resources; the
//! enumeration hook answers with an explicitly empty collection.

use crate::config::ServiceSection;
use crate::error::ServiceError;
use crate::tools::{ToolError, ToolRegistry};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject,
    ListResourcesResult, ListToolsResult, PaginatedRequestParam, Resource, ServerCapabilities,
    ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::Instrument;

/// Handler bridging the MCP transport to the tool registry
///
/// Stateless per call: the registry is read-locked for dispatch, and no tool
/// mutates after initialization, so concurrent invocations are safe.
pub struct LookupService {
    service: ServiceSection,
    registry: Arc<RwLock<ToolRegistry>>,
}

impl LookupService {
    pub fn new(service: ServiceSection, registry: Arc<RwLock<ToolRegistry>>) -> Self {
        Self { service, registry }
    }

    /// Declared tools as the SDK's model type
    pub async fn tool_listing(&self) -> Vec<Tool> {
        let registry = self.registry.read().await;
        registry
            .descriptions()
            .into_iter()
            .map(|description| {
                Tool::new(
                    description.name,
                    description.description,
                    Arc::new(schema_object(description.parameters)),
                )
            })
            .collect()
    }

    /// Execute one tool call through the registry
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<Value, ToolError> {
        let parameters = Value::Object(arguments.unwrap_or_default());
        let span = crate::tool_span!(tool = %name);
        async {
            let registry = self.registry.read().await;
            registry.execute_tool(name, &parameters).await
        }
        .instrument(span)
        .await
    }

    /// Root resources exposed by this service: none, always present, always empty
    pub fn roots(&self) -> Vec<Resource> {
        Vec::new()
    }
}

/// Render a tool result value as the single text payload of the response
fn render_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// A describe() schema is always a JSON object; anything else becomes an
/// empty (accept-all) object schema rather than a panic at listing time.
fn schema_object(schema: Value) -> JsonObject {
    match schema {
        Value::Object(map) => map,
        _ => JsonObject::new(),
    }
}

impl ServerHandler for LookupService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(self.service.description.clone()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.service.id.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::default()
            },
            ..ServerInfo::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: self.tool_listing().await,
            ..ListToolsResult::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let span = crate::rpc_span!(tool = %request.name);
        async {
            let value = self
                .dispatch(&request.name, request.arguments)
                .await
                .map_err(|e| ServiceError::from(e).to_rpc_error())?;

            Ok(CallToolResult::success(vec![Content::text(render_text(
                value,
            ))]))
        }
        .instrument(span)
        .await
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        Ok(ListResourcesResult {
            resources: self.roots(),
            ..ListResourcesResult::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ServiceConfig, ToolConfig};
    use serde_json::json;
    use std::collections::HashMap;

    async fn service_with_flight_tool() -> LookupService {
        let mut registry = ToolRegistry::new();
        let mut tools = HashMap::new();
        tools.insert(
            "FlightInfoBot".to_string(),
            ToolConfig::Simple("builtin".to_string()),
        );
        registry.initialize(&tools).await.unwrap();

        LookupService::new(
            ServiceConfig::default().service,
            Arc::new(RwLock::new(registry)),
        )
    }

    #[tokio::test]
    async fn test_tool_listing_contains_flight_info_bot() {
        let service = service_with_flight_tool().await;
        let tools = service.tool_listing().await;

        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "FlightInfoBot");
        assert!(tools[0].input_schema.contains_key("properties"));
    }

    #[tokio::test]
    async fn test_dispatch_known_city() {
        let service = service_with_flight_tool().await;

        let mut arguments = JsonObject::new();
        arguments.insert("city".to_string(), json!("Seattle"));

        let value = service
            .dispatch("FlightInfoBot", Some(arguments))
            .await
            .unwrap();
        assert_eq!(value, json!("DL2478 Departing at 10:00 AM"));
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let service = service_with_flight_tool().await;

        let result = service.dispatch("WeatherBot", None).await;
        assert!(matches!(result, Err(ToolError::UnknownTool(_))));
    }

    #[tokio::test]
    async fn test_dispatch_missing_city_fails_validation() {
        let service = service_with_flight_tool().await;

        let result = service.dispatch("FlightInfoBot", None).await;
        assert!(matches!(result, Err(ToolError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_roots_is_empty_collection() {
        let service = service_with_flight_tool().await;
        assert!(service.roots().is_empty());
    }

    #[tokio::test]
    async fn test_get_info_declares_tools_capability() {
        let service = service_with_flight_tool().await;
        let info = service.get_info();

        assert_eq!(info.server_info.name, "flight-info-bot");
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
    }

    #[test]
    fn test_render_text_passes_strings_through() {
        assert_eq!(render_text(json!("plain answer")), "plain answer");
    }

    #[test]
    fn test_render_text_serializes_non_strings() {
        assert_eq!(render_text(json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_schema_object_tolerates_non_object() {
        assert!(schema_object(json!("not a schema")).is_empty());
    }
}
