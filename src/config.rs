//! Configuration types for deck generation.
//!
//! All generation behaviour is controlled through [`GenerationConfig`], built
//! via its [`GenerationConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share a config between the CLI, the HTTP server and tests,
//! and to diff two runs to understand why their decks differ.

use crate::archetype::{LayoutChoice, ThemeChoice};
use crate::error::DeckError;
use crate::pipeline::llm::{GenerationClient, SamplingParams};
use crate::progress::ProgressCallback;
use crate::prompts::OutputLanguage;
use std::fmt;
use std::sync::Arc;

/// Configuration for a generation run.
///
/// Built via [`GenerationConfig::builder()`] or using
/// [`GenerationConfig::default()`].
///
/// # Example
/// ```rust
/// use edgequake_deck::{GenerationConfig, OutputLanguage};
///
/// let config = GenerationConfig::builder()
///     .concurrency(2)
///     .language(OutputLanguage::English)
///     .seed(7)
///     .offline(true)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct GenerationConfig {
    /// Number of slides generated at once. Default: 4.
    ///
    /// Each slide makes two sequential model calls (content, then code), so
    /// up to `2 × concurrency` requests may be queued against the backend over
    /// a run. Lower this if the provider answers with `429`.
    pub concurrency: usize,

    /// LLM provider name (e.g. "openai", "anthropic", "ollama").
    /// If None along with the clients, the provider is auto-detected.
    pub provider_name: Option<String>,

    /// Model used for slide prose. If None, uses the provider default.
    pub content_model: Option<String>,

    /// Model used for component code. Falls back to `content_model`.
    pub code_model: Option<String>,

    /// Pre-built client for content. Takes precedence over `provider_name`.
    pub content_client: Option<Arc<dyn GenerationClient>>,

    /// Pre-built client for code. Takes precedence over `provider_name`.
    pub code_client: Option<Arc<dyn GenerationClient>>,

    /// Sampling for content calls. Default: 512 tokens, temperature 0.7, top-p 0.9.
    pub content_params: SamplingParams,

    /// Sampling for code calls. Default: 1024 tokens, temperature 0.2, top-p 0.95.
    pub code_params: SamplingParams,

    /// Language of the generated slide text. Default: Russian.
    pub language: OutputLanguage,

    /// Layout for every slide, or `Auto` to derive it from the content. Default: Auto.
    pub layout: LayoutChoice,

    /// Theme for every slide, or `Auto` to derive it from the content. Default: Auto.
    pub theme: ThemeChoice,

    /// Per-call timeout in seconds. Default: 120.
    ///
    /// A call that exceeds it counts as a failure and the slide takes its
    /// fallback path.
    pub api_timeout_secs: u64,

    /// Seed for theme selection. `None` seeds from the OS.
    ///
    /// With a seed, two runs over the same completions produce identical
    /// decks regardless of the order slides finish in.
    pub seed: Option<u64>,

    /// Skip the model entirely and use fallback content and template code.
    /// Default: false.
    pub offline: bool,

    /// Receives per-slide events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            provider_name: None,
            content_model: None,
            code_model: None,
            content_client: None,
            code_client: None,
            content_params: SamplingParams::CONTENT,
            code_params: SamplingParams::CODE,
            language: OutputLanguage::default(),
            layout: LayoutChoice::Auto,
            theme: ThemeChoice::Auto,
            api_timeout_secs: 120,
            seed: None,
            offline: false,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("concurrency", &self.concurrency)
            .field("provider_name", &self.provider_name)
            .field("content_model", &self.content_model)
            .field("code_model", &self.code_model)
            .field("content_client", &self.content_client.as_ref().map(|c| c.name().to_string()))
            .field("code_client", &self.code_client.as_ref().map(|c| c.name().to_string()))
            .field("content_params", &self.content_params)
            .field("code_params", &self.code_params)
            .field("language", &self.language)
            .field("layout", &self.layout)
            .field("theme", &self.theme)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("seed", &self.seed)
            .field("offline", &self.offline)
            .finish()
    }
}

impl GenerationConfig {
    /// Create a new builder for `GenerationConfig`.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`GenerationConfig`].
#[derive(Debug)]
pub struct GenerationConfigBuilder {
    config: GenerationConfig,
}

impl GenerationConfigBuilder {
    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn content_model(mut self, model: impl Into<String>) -> Self {
        self.config.content_model = Some(model.into());
        self
    }

    pub fn code_model(mut self, model: impl Into<String>) -> Self {
        self.config.code_model = Some(model.into());
        self
    }

    /// Use the same client for content and code.
    pub fn client(mut self, client: Arc<dyn GenerationClient>) -> Self {
        self.config.code_client = Some(Arc::clone(&client));
        self.config.content_client = Some(client);
        self
    }

    pub fn content_client(mut self, client: Arc<dyn GenerationClient>) -> Self {
        self.config.content_client = Some(client);
        self
    }

    pub fn code_client(mut self, client: Arc<dyn GenerationClient>) -> Self {
        self.config.code_client = Some(client);
        self
    }

    pub fn content_params(mut self, params: SamplingParams) -> Self {
        self.config.content_params = params;
        self
    }

    pub fn code_params(mut self, params: SamplingParams) -> Self {
        self.config.code_params = params;
        self
    }

    pub fn language(mut self, language: OutputLanguage) -> Self {
        self.config.language = language;
        self
    }

    pub fn layout(mut self, layout: LayoutChoice) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn theme(mut self, theme: ThemeChoice) -> Self {
        self.config.theme = theme;
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn offline(mut self, v: bool) -> Self {
        self.config.offline = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<GenerationConfig, DeckError> {
        let c = &self.config;
        if c.concurrency == 0 {
            return Err(DeckError::InvalidConfig("Concurrency must be ≥ 1".into()));
        }
        if c.api_timeout_secs == 0 {
            return Err(DeckError::InvalidConfig("API timeout must be ≥ 1 second".into()));
        }
        for (stage, p) in [("content", &c.content_params), ("code", &c.code_params)] {
            validate_params(stage, p)?;
        }
        Ok(self.config)
    }
}

fn validate_params(stage: &str, p: &SamplingParams) -> Result<(), DeckError> {
    if p.max_tokens == 0 {
        return Err(DeckError::InvalidConfig(format!(
            "{stage} max_tokens must be ≥ 1"
        )));
    }
    if !(0.0..=2.0).contains(&p.temperature) {
        return Err(DeckError::InvalidConfig(format!(
            "{stage} temperature must be 0–2, got {}",
            p.temperature
        )));
    }
    if !(0.0..=1.0).contains(&p.top_p) || p.top_p == 0.0 {
        return Err(DeckError::InvalidConfig(format!(
            "{stage} top_p must be in (0, 1], got {}",
            p.top_p
        )));
    }
    Ok(())
}
