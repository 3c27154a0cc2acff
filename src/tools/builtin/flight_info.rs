//! Flight info lookup tool
//!
//! The one operation this service exposes: given a city name, answer with the
//! scheduled departure for that city, or with a fixed sentinel string when the
//! city is not in the table. The lookup is an exact, case-sensitive string
//! match; no normalization is performed. Absence is an expected outcome, not
//! an error, so the handler is total.

use crate::tools::{Tool, ToolDescription, ToolError};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Answer returned when no table entry matches the input
pub const FALLBACK_ANSWER: &str = "Please provide a valid city.";

/// Departures shipped with the service
const DEFAULT_ROUTES: &[(&str, &str)] = &[
    ("Seattle", "DL2478 Departing at 10:00 AM"),
    ("New York", "DL1001 Departing at 12:45 PM"),
];

/// Input shape of the FlightInfoBot operation
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FlightQuery {
    /// City to look up departures for
    pub city: String,
}

impl FlightQuery {
    /// JSON schema declared to callers
    pub fn schema() -> Value {
        serde_json::to_value(schemars::schema_for!(FlightQuery))
            .expect("FlightQuery schema serializes")
    }
}

/// Immutable mapping from city name to flight string
///
/// Populated once when the tool is initialized and never mutated afterwards;
/// owned exclusively by the tool handler.
#[derive(Debug, Clone)]
pub struct AnswerTable {
    routes: HashMap<String, String>,
}

impl AnswerTable {
    /// Table containing only the built-in departures
    pub fn builtin() -> Self {
        let routes = DEFAULT_ROUTES
            .iter()
            .map(|(city, flight)| (city.to_string(), flight.to_string()))
            .collect();
        Self { routes }
    }

    fn insert(&mut self, city: String, flight: String) {
        self.routes.insert(city, flight);
    }

    /// Exact-key lookup. Case-sensitive; absence is a valid outcome.
    pub fn lookup(&self, city: &str) -> Option<&str> {
        self.routes.get(city).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for AnswerTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Flight info lookup tool - builtin implementation
pub struct FlightInfoTool {
    table: AnswerTable,
}

impl Default for FlightInfoTool {
    fn default() -> Self {
        Self {
            table: AnswerTable::builtin(),
        }
    }
}

impl FlightInfoTool {
    /// Create new flight info tool with the built-in answer table
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer a validated query against a table (pure function)
    fn answer(table: &AnswerTable, query: &FlightQuery) -> String {
        match table.lookup(&query.city) {
            Some(flight) => flight.to_string(),
            None => {
                tracing::debug!(city = %query.city, "No scheduled departure for city");
                FALLBACK_ANSWER.to_string()
            }
        }
    }

    /// Build the answer table from the tool config (pure function)
    ///
    /// A `routes` table in the config extends the built-in departures at
    /// startup. The result never changes after initialization.
    fn build_table(config: Option<&Value>) -> Result<AnswerTable, ToolError> {
        let mut table = AnswerTable::builtin();

        if let Some(routes) = config
            .and_then(|c| c.get("routes"))
            .and_then(|r| r.as_object())
        {
            for (city, flight) in routes {
                let flight = flight.as_str().ok_or_else(|| {
                    ToolError::InitializationError(format!(
                        "Route for '{city}' must be a string"
                    ))
                })?;
                table.insert(city.clone(), flight.to_string());
            }
        }

        Ok(table)
    }
}

#[async_trait]
impl Tool for FlightInfoTool {
    fn describe(&self) -> ToolDescription {
        ToolDescription {
            name: "FlightInfoBot".to_string(),
            description: "Returns flight information based on city.".to_string(),
            parameters: FlightQuery::schema(),
        }
    }

    async fn initialize(&mut self, config: Option<&Value>) -> Result<(), ToolError> {
        self.table = Self::build_table(config)?;
        Ok(())
    }

    async fn execute(&self, parameters: &Value) -> Result<Value, ToolError> {
        // Schema validation already ran in the registry; the typed parse is
        // the explicit pre-call step that keeps the handler total.
        let query: FlightQuery = serde_json::from_value(parameters.clone())
            .map_err(|e| ToolError::ExecutionError(format!("Invalid parameters: {e}")))?;

        Ok(Value::String(Self::answer(&self.table, &query)))
    }
}
