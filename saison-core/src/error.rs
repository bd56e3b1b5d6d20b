use thiserror::Error;

use crate::llm::LlmError;

/// The model's text could not be read as JSON, even after bracket extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No JSON array found in model response")]
pub struct ParseError {
    /// The unparseable model text, kept for diagnostics.
    pub raw: String,
}

/// Parsed JSON that cannot be a recipe plan.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Expected a JSON array of recipes")]
    NotAnArray,

    #[error("Model returned an empty recipe list")]
    Empty,
}

#[derive(Error, Debug)]
pub enum PlanError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Failed to parse recipe data: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid recipe format: {0}")]
    Shape(#[from] ShapeError),
}
