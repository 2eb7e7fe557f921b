// src/api/types.rs
// Request/response payloads and request validation for the transform API.

use serde::{Deserialize, Serialize};

use crate::store::Transformation;

pub const TRANSFORMATION_MODES: [&str; 4] = ["paraphrase", "style", "tone", "vocabulary"];
pub const TARGET_AUDIENCES: [&str; 5] =
    ["general", "academic", "professional", "casual", "technical"];
pub const VERBOSITY_LEVELS: [&str; 3] = ["concise", "balanced", "detailed"];

pub const MIN_TEXT_LENGTH: usize = 1;
pub const MAX_TEXT_LENGTH: usize = 10_000;

fn default_formality() -> i64 {
    50
}

fn default_audience() -> String {
    "general".to_string()
}

fn default_verbosity() -> String {
    "balanced".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformPayload {
    pub original_text: String,
    pub mode: String,
    #[serde(default = "default_formality")]
    pub formality: i64,
    #[serde(default = "default_audience")]
    pub target_audience: String,
    #[serde(default = "default_verbosity")]
    pub verbosity: String,
    #[serde(default = "default_true")]
    pub deep_humanization: bool,
}

impl TransformPayload {
    /// All validation failures, in field order. Empty means valid.
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let trimmed = self.original_text.trim();
        if trimmed.chars().count() < MIN_TEXT_LENGTH {
            errors.push(format!("Text must be at least {MIN_TEXT_LENGTH} character"));
        } else if self.original_text.chars().count() > MAX_TEXT_LENGTH {
            errors.push(format!("Text must be less than {MAX_TEXT_LENGTH} characters"));
        }

        if !TRANSFORMATION_MODES.contains(&self.mode.as_str()) {
            errors.push(format!(
                "Mode must be one of: {}",
                TRANSFORMATION_MODES.join(", ")
            ));
        }

        if !(0..=100).contains(&self.formality) {
            errors.push("Formality must be a number between 0 and 100".to_string());
        }

        if !TARGET_AUDIENCES.contains(&self.target_audience.as_str()) {
            errors.push(format!(
                "Target audience must be one of: {}",
                TARGET_AUDIENCES.join(", ")
            ));
        }

        if !VERBOSITY_LEVELS.contains(&self.verbosity.as_str()) {
            errors.push(format!(
                "Verbosity must be one of: {}",
                VERBOSITY_LEVELS.join(", ")
            ));
        }

        errors
    }
}

#[derive(Debug, Serialize)]
pub struct TransformResponse {
    pub success: bool,
    pub data: Transformation,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub data: Vec<Transformation>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}
