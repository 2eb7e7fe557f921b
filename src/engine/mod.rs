// src/engine/mod.rs
// Humanization engine: pattern injection plus provider orchestration.

pub mod orchestrator;
pub mod patterns;
pub mod prompts;
pub mod provider;

pub use orchestrator::{local_cleanup, EngineConfig, HumanizationEngine};
pub use provider::{GenerativeProvider, OpenAiProvider};

/// Input to the engine. Constructed by the caller; the engine never
/// mutates it and never rejects it (over-long text is truncated).
#[derive(Debug, Clone)]
pub struct TransformRequest {
    pub text: String,
    pub deep_humanization: bool,
}
