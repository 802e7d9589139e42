//! The text-completion boundary.
//!
//! Everything that talks to a model goes through [`GenerationClient`]: a
//! prompt and sampling parameters in, a completion string out. The rest of
//! the crate never sees `edgequake_llm` types, so tests can script answers
//! with a ten-line mock instead of implementing a full provider.
//!
//! ## Failure Strategy
//!
//! A single attempt per call. Every call is bounded by
//! [`complete_with_timeout`]; a timeout, backend error or empty answer is a
//! [`ClientError`] and the caller switches to deterministic fallback output.
//! There is no retry loop: a slow backend costs one timeout per stage, not
//! several.

use crate::error::ClientError;
use async_trait::async_trait;
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::{timeout, Duration};
use tracing::debug;

/// Sampling parameters for one completion call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub max_tokens: usize,
    pub temperature: f32,
    pub top_p: f32,
    pub repetition_penalty: Option<f32>,
}

impl SamplingParams {
    /// Defaults for slide prose: short and fairly creative.
    pub const CONTENT: SamplingParams = SamplingParams {
        max_tokens: 512,
        temperature: 0.7,
        top_p: 0.9,
        repetition_penalty: None,
    };

    /// Defaults for component code: longer and close to greedy.
    pub const CODE: SamplingParams = SamplingParams {
        max_tokens: 1024,
        temperature: 0.2,
        top_p: 0.95,
        repetition_penalty: None,
    };
}

/// A text-completion capability.
///
/// Implementations must be callable concurrently: the orchestrator runs
/// several slides at once against the same client.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Complete `prompt`. The returned text may echo the prompt; callers
    /// strip it with [`strip_echoed_prompt`].
    async fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String, ClientError>;

    /// Short label for logs and error messages.
    fn name(&self) -> &str;
}

// ── Provider-backed client ───────────────────────────────────────────────────

/// Adapts an `edgequake_llm` chat provider.
///
/// The prompt is sent as a single user message. Only temperature and max
/// tokens map onto [`CompletionOptions`]; `top_p` and the repetition
/// penalty are accepted for backends that take them but not forwarded.
pub struct ProviderClient {
    provider: Arc<dyn LLMProvider>,
    label: String,
}

impl ProviderClient {
    pub fn new(provider: Arc<dyn LLMProvider>, label: impl Into<String>) -> Self {
        Self {
            provider,
            label: label.into(),
        }
    }
}

fn build_options(params: &SamplingParams) -> CompletionOptions {
    CompletionOptions {
        temperature: Some(params.temperature),
        max_tokens: Some(params.max_tokens),
        ..Default::default()
    }
}

#[async_trait]
impl GenerationClient for ProviderClient {
    async fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String, ClientError> {
        let start = Instant::now();
        let messages = vec![ChatMessage::user(prompt)];
        let options = build_options(params);

        let response = self
            .provider
            .chat(&messages, Some(&options))
            .await
            .map_err(|e| ClientError::Backend {
                provider: self.label.clone(),
                message: e.to_string(),
            })?;

        debug!(
            "{}: {} input tokens, {} output tokens, {:?}",
            self.label,
            response.prompt_tokens,
            response.completion_tokens,
            start.elapsed()
        );
        Ok(response.content)
    }

    fn name(&self) -> &str {
        &self.label
    }
}

// ── Offline client ───────────────────────────────────────────────────────────

/// A client that never answers. Every slide gets fallback content and
/// template code, which makes whole runs deterministic and free.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineClient;

#[async_trait]
impl GenerationClient for OfflineClient {
    async fn complete(&self, _prompt: &str, _params: &SamplingParams) -> Result<String, ClientError> {
        Err(ClientError::Unavailable)
    }

    fn name(&self) -> &str {
        "offline"
    }
}

// ── Call helpers ─────────────────────────────────────────────────────────────

/// Run one completion bounded by `timeout_secs`.
///
/// Blank answers are reported as [`ClientError::EmptyCompletion`] so callers
/// need only one failure path.
pub async fn complete_with_timeout(
    client: &dyn GenerationClient,
    prompt: &str,
    params: &SamplingParams,
    timeout_secs: u64,
) -> Result<String, ClientError> {
    let text = timeout(
        Duration::from_secs(timeout_secs),
        client.complete(prompt, params),
    )
    .await
    .map_err(|_| ClientError::Timeout { secs: timeout_secs })??;

    if text.trim().is_empty() {
        return Err(ClientError::EmptyCompletion);
    }
    Ok(text)
}

/// Remove the prompt when the model echoed it back.
///
/// Local text-generation backends commonly return `prompt + continuation`.
/// A verbatim prefix is cut; otherwise everything up to and including the
/// last verbatim occurrence is cut.
pub fn strip_echoed_prompt<'a>(completion: &'a str, prompt: &str) -> &'a str {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return completion;
    }
    if let Some(rest) = completion.trim_start().strip_prefix(prompt) {
        return rest;
    }
    match completion.rfind(prompt) {
        Some(idx) => &completion[idx + prompt.len()..],
        None => completion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Slow;

    #[async_trait]
    impl GenerationClient for Slow {
        async fn complete(&self, _: &str, _: &SamplingParams) -> Result<String, ClientError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("late".into())
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    struct Fixed(&'static str);

    #[async_trait]
    impl GenerationClient for Fixed {
        async fn complete(&self, _: &str, _: &SamplingParams) -> Result<String, ClientError> {
            Ok(self.0.to_string())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn build_options_forwards_temperature_and_tokens() {
        let opts = build_options(&SamplingParams::CODE);
        assert_eq!(opts.temperature, Some(0.2));
        assert_eq!(opts.max_tokens, Some(1024));
    }

    #[tokio::test]
    async fn timeout_is_reported() {
        let err = complete_with_timeout(&Slow, "p", &SamplingParams::CONTENT, 1)
            .await
            .unwrap_err();
        assert_eq!(err, ClientError::Timeout { secs: 1 });
    }

    #[tokio::test]
    async fn blank_answer_is_empty_completion() {
        let err = complete_with_timeout(&Fixed("  \n "), "p", &SamplingParams::CONTENT, 5)
            .await
            .unwrap_err();
        assert_eq!(err, ClientError::EmptyCompletion);
    }

    #[tokio::test]
    async fn offline_is_unavailable() {
        let err = complete_with_timeout(&OfflineClient, "p", &SamplingParams::CONTENT, 5)
            .await
            .unwrap_err();
        assert_eq!(err, ClientError::Unavailable);
    }

    #[test]
    fn strip_prefix_echo() {
        assert_eq!(strip_echoed_prompt("PROMPT\n# Title", "PROMPT"), "\n# Title");
    }

    #[test]
    fn strip_embedded_echo() {
        assert_eq!(
            strip_echoed_prompt("<s>[INST] PROMPT [/INST]# Title", "PROMPT"),
            " [/INST]# Title"
        );
    }

    #[test]
    fn no_echo_is_untouched() {
        assert_eq!(strip_echoed_prompt("# Title", "PROMPT"), "# Title");
        assert_eq!(strip_echoed_prompt("# Title", "  "), "# Title");
    }
}
