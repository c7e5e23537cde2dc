//! npsqa-pipeline
//!
//! The question-answering orchestrator and the two text builders it relies
//! on: the bounded retrieval context and the generation prompt.
pub mod context;
pub mod orchestrator;
pub mod prompt;

pub use context::{build_context, NO_CONTEXT};
pub use orchestrator::{RagPipeline, GENERATION_APOLOGY, MAX_SOURCES, NO_VALID_QUESTION, PIPELINE_APOLOGY};
pub use prompt::{build_prompt, system_prompt};
