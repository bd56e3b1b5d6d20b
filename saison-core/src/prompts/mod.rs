//! Prompt templates.

pub mod extract;
pub mod generate;

pub use extract::{build_extraction_prompt, EXTRACTION_PROMPT_NAME};
pub use generate::{build_generation_prompt, GENERATION_PROMPT_NAME};
