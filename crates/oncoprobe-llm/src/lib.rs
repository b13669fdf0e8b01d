//! oncoprobe-llm — Generative backend abstraction and the drug-repurposing
//! report built on top of it.

pub mod backend;
pub mod report;

pub use backend::{Completion, GeminiBackend, LlmBackend, LlmError, OpenAiCompatibleBackend};
pub use report::{ParsedReport, RepurposingReporter};
