//! Builtin tools for the flight lookup service
//!
//! One builtin exists: the flight info lookup. Pure functions are separated
//! from the trait plumbing inside each tool module.

pub mod flight_info;

// Re-export public types for convenience
pub use flight_info::{AnswerTable, FlightInfoTool, FlightQuery, FALLBACK_ANSWER};
