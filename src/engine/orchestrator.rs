// src/engine/orchestrator.rs
// Drives the provider passes, retry/backoff, and local-only degradation.
// Every path resolves to a string; nothing here surfaces an error to callers.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::SeedableRng;
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::patterns;
use super::prompts;
use super::provider::GenerativeProvider;
use super::TransformRequest;

/// On retry exhaustion, the degraded substitute is built from this many
/// leading characters of the prompt. Intentional, if odd-looking: the
/// caller gets prompt-derived filler instead of a hard failure.
const DEGRADED_PROMPT_CHARS: usize = 300;

static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"));
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").expect("valid regex"));

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum input length in characters; longer text is truncated,
    /// never rejected.
    pub max_text_length: usize,
    /// Provider attempts per pass before degrading.
    pub max_retries: u32,
    /// Base backoff; attempt n waits `backoff_base * 2^n`.
    pub backoff_base: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_text_length: 10_000,
            max_retries: 3,
            backoff_base: Duration::from_secs(1),
        }
    }
}

/// Per-call retry state. Terminal states are never re-entered.
enum CallState {
    Attempting(u32),
    Success(String),
    Degraded,
}

pub struct HumanizationEngine {
    provider: Option<Arc<dyn GenerativeProvider>>,
    config: EngineConfig,
}

impl HumanizationEngine {
    pub fn new(provider: Option<Arc<dyn GenerativeProvider>>, config: EngineConfig) -> Self {
        Self { provider, config }
    }

    /// Rewrite `request.text` to read less machine-generated.
    ///
    /// Infallible: with no provider configured (or a provider that keeps
    /// failing) the result degrades to locally cleaned text rather than
    /// an error.
    pub async fn humanize(&self, request: &TransformRequest) -> String {
        let Some(provider) = &self.provider else {
            debug!("no provider credential configured, local cleanup only");
            return local_cleanup(&request.text, self.config.max_text_length);
        };

        let input = truncate_chars(&request.text, self.config.max_text_length);
        let mut rng = StdRng::from_os_rng();

        if !request.deep_humanization {
            let raw = self
                .generate_with_retry(provider.as_ref(), &prompts::shallow_pass(&input), 0.5, 0.75)
                .await;
            return patterns::inject(&raw, &mut rng);
        }

        info!("starting deep humanization");

        let p1 = self
            .generate_with_retry(provider.as_ref(), &prompts::deep_pass_one(&input), 0.5, 0.75)
            .await;
        let p1 = patterns::inject(&p1, &mut rng);

        let p2 = self
            .generate_with_retry(provider.as_ref(), &prompts::deep_pass_two(&p1), 0.55, 0.78)
            .await;
        let p2 = patterns::inject(&p2, &mut rng);

        let p3 = self
            .generate_with_retry(provider.as_ref(), &prompts::deep_pass_three(&p2), 0.5, 0.72)
            .await;
        patterns::inject(&p3, &mut rng)
    }

    /// One provider call under the retry state machine:
    /// `Attempting(n) -> Success | Attempting(n+1) | Degraded`.
    async fn generate_with_retry(
        &self,
        provider: &dyn GenerativeProvider,
        prompt: &str,
        temperature: f32,
        top_p: f32,
    ) -> String {
        let mut state = CallState::Attempting(0);
        loop {
            state = match state {
                CallState::Attempting(attempt) => {
                    match provider.generate(prompt, temperature, top_p).await {
                        Ok(text) => CallState::Success(strip_emphasis(&text)),
                        Err(e) if attempt + 1 < self.config.max_retries => {
                            let delay = self.config.backoff_base * 2u32.pow(attempt);
                            warn!(
                                provider = provider.name(),
                                attempt,
                                error = %e,
                                "generation attempt failed, retrying in {delay:?}"
                            );
                            sleep(delay).await;
                            CallState::Attempting(attempt + 1)
                        }
                        Err(e) => {
                            warn!(
                                provider = provider.name(),
                                attempt,
                                error = %e,
                                "generation attempts exhausted, degrading"
                            );
                            CallState::Degraded
                        }
                    }
                }
                CallState::Success(text) => return text,
                CallState::Degraded => {
                    let prefix = truncate_chars(prompt, DEGRADED_PROMPT_CHARS);
                    return local_cleanup(&prefix, self.config.max_text_length);
                }
            };
        }
    }
}

/// Collapse whitespace runs, trim, and cap at `max_len` characters.
pub fn local_cleanup(text: &str, max_len: usize) -> String {
    let cleaned = patterns::collapse_whitespace(text);
    if cleaned.chars().count() > max_len {
        truncate_chars(&cleaned, max_len).trim().to_string()
    } else {
        cleaned
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Drop markdown bold/italic markers from provider output.
fn strip_emphasis(text: &str) -> String {
    let text = BOLD_RE.replace_all(text, "$1");
    ITALIC_RE.replace_all(&text, "$1").into_owned()
}
