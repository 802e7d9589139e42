//! Deck generation entry points.
//!
//! [`generate`] drives the per-slide pipeline for a whole deck;
//! [`generate_slide_code`] runs only the code half for one piece of content.
//! Both always return complete output for valid input: every client failure
//! degrades to fallback content or template code and is recorded on the
//! slide, never returned as an `Err`.
//!
//! ## Why concurrent slides?
//!
//! Slides share no state: each one needs only the topic, its position and
//! the deck size. Generating several at once cuts wall-clock time roughly by
//! the concurrency factor. Results are sorted by position afterwards, so
//! completion order never shows in the output.

use crate::archetype::{
    archetype_for_content, archetype_for_position, resolve_style, LayoutChoice, SlideArchetype,
    ThemeChoice,
};
use crate::config::GenerationConfig;
use crate::error::{ClientError, DeckError, SlideError, Stage};
use crate::output::{CodeSource, ContentSource, GenerationStats, Presentation, Slide, SlideCode};
use crate::pipeline::extract::{extract_code, rejection_reason};
use crate::pipeline::llm::{
    complete_with_timeout, strip_echoed_prompt, GenerationClient, OfflineClient, ProviderClient,
};
use crate::pipeline::postprocess::{is_blank_after_echo, normalize_content};
use crate::prompts::{build_code_prompt, build_content_prompt, OutputLanguage};
use crate::templates;
use chrono::Utc;
use edgequake_llm::{LLMProvider, ProviderFactory};
use futures::stream::{self, StreamExt};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Model used when a provider is named without one.
pub const DEFAULT_MODEL: &str = "gpt-4.1-nano";

/// Largest deck [`generate`] accepts.
pub const MAX_SLIDES: usize = 100;

/// Generate a complete deck for `topic`.
///
/// # Errors
/// Returns `Err(DeckError)` only for fatal errors:
/// - blank topic, or `slide_count` outside `1..=MAX_SLIDES`
/// - no provider could be resolved (and not offline)
pub async fn generate(
    topic: impl AsRef<str>,
    slide_count: usize,
    config: &GenerationConfig,
) -> Result<Presentation, DeckError> {
    let start = Instant::now();
    let topic = topic.as_ref().trim();
    if topic.is_empty() {
        return Err(DeckError::InvalidInput { field: "topic" });
    }
    if slide_count == 0 || slide_count > MAX_SLIDES {
        return Err(DeckError::InvalidSlideCount {
            count: i64::try_from(slide_count).unwrap_or(i64::MAX),
        });
    }

    let clients = resolve_clients(config)?;
    info!(
        "Generating {} slides on '{}' (content: {}, code: {})",
        slide_count,
        topic,
        clients.content.name(),
        clients.code.name()
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_generation_start(topic, slide_count);
    }

    // Theme picks depend only on the master seed and the position, never on
    // which slide finishes first.
    let master = master_seed(config);

    let mut slides: Vec<Slide> = stream::iter((1..=slide_count).map(|position| {
        let clients = clients.clone();
        let seed = slide_seed(master, position);
        async move {
            if let Some(ref cb) = config.progress_callback {
                cb.on_slide_start(position, slide_count);
            }
            let slide = generate_one(topic, position, slide_count, seed, &clients, config).await;
            if let Some(ref cb) = config.progress_callback {
                cb.on_slide_complete(position, slide_count, slide.content_source, slide.code_source);
            }
            slide
        }
    }))
    .buffer_unordered(config.concurrency)
    .collect()
    .await;

    slides.sort_by_key(|s| s.position);

    let mut stats = GenerationStats::from_slides(&slides);
    stats.total_duration_ms = start.elapsed().as_millis() as u64;

    let presentation = Presentation {
        topic: topic.to_string(),
        slide_count,
        created_at: Utc::now(),
        slides,
        stats,
    };

    let degraded = presentation.degraded_slides();
    info!(
        "Generation complete: {} slides, {} degraded, {}ms",
        slide_count, degraded, presentation.stats.total_duration_ms
    );
    if let Some(ref cb) = config.progress_callback {
        cb.on_generation_complete(slide_count, degraded);
    }

    Ok(presentation)
}

/// Synchronous wrapper around [`generate`].
///
/// Creates a temporary tokio runtime internally.
pub fn generate_sync(
    topic: impl AsRef<str>,
    slide_count: usize,
    config: &GenerationConfig,
) -> Result<Presentation, DeckError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| DeckError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(generate(topic, slide_count, config))
}

/// Generate the component for one piece of slide Markdown.
///
/// `layout`/`theme` override the config's choices for this call.
pub async fn generate_slide_code(
    content: &str,
    layout: LayoutChoice,
    theme: ThemeChoice,
    config: &GenerationConfig,
) -> Result<SlideCode, DeckError> {
    if content.trim().is_empty() {
        return Err(DeckError::InvalidInput {
            field: "slide_content",
        });
    }
    let clients = resolve_clients(config)?;
    let mut rng = StdRng::seed_from_u64(master_seed(config));
    Ok(code_for_content(content, 0, layout, theme, clients.code.as_ref(), config, &mut rng).await)
}

// ── Per-slide pipeline ───────────────────────────────────────────────────────

async fn generate_one(
    topic: &str,
    position: usize,
    total: usize,
    seed: u64,
    clients: &Clients,
    config: &GenerationConfig,
) -> Slide {
    let archetype = archetype_for_position(position, total);
    let mut errors = Vec::new();

    let prompt = build_content_prompt(topic, position, total, archetype, config.language);
    let completion = complete_with_timeout(
        clients.content.as_ref(),
        &prompt,
        &config.content_params,
        config.api_timeout_secs,
    )
    .await
    .and_then(|raw| {
        if is_blank_after_echo(&raw, &prompt) {
            Err(ClientError::EmptyCompletion)
        } else {
            Ok(raw)
        }
    });

    let (content, content_source) = match completion {
        Ok(raw) => {
            let text = normalize_content(&raw, &prompt, archetype, position, config.language);
            debug!("Slide {}: content generated ({} bytes)", position, text.len());
            (text, ContentSource::Generated)
        }
        Err(e) => {
            warn!("Slide {}: content fallback: {}", position, e);
            errors.push(SlideError::from_client(position, Stage::Content, e));
            (
                fallback_content(topic, archetype, config.language),
                ContentSource::Fallback,
            )
        }
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let code = code_for_content(
        &content,
        position,
        config.layout,
        config.theme,
        clients.code.as_ref(),
        config,
        &mut rng,
    )
    .await;
    errors.extend(code.error);

    Slide {
        position,
        archetype,
        content_archetype: code.content_archetype,
        style: code.style,
        content,
        code: code.code,
        content_source,
        code_source: code.source,
        errors,
    }
}

/// Classify, style, ask the code model, and fall back to a template when the
/// answer is missing or malformed. `position` is only used for logs and
/// errors (0 for standalone calls).
async fn code_for_content<R: Rng + ?Sized>(
    content: &str,
    position: usize,
    layout: LayoutChoice,
    theme: ThemeChoice,
    client: &dyn GenerationClient,
    config: &GenerationConfig,
    rng: &mut R,
) -> SlideCode {
    let content_archetype = archetype_for_content(content);
    let style = resolve_style(content_archetype, layout, theme, rng);
    let prompt = build_code_prompt(content, content_archetype, style.layout, style.theme);

    let error = match complete_with_timeout(
        client,
        &prompt,
        &config.code_params,
        config.api_timeout_secs,
    )
    .await
    {
        Ok(raw) => {
            let code = extract_code(strip_echoed_prompt(&raw, &prompt));
            match rejection_reason(&code) {
                None => {
                    debug!("Slide {}: code generated ({} bytes)", position, code.len());
                    return SlideCode {
                        code,
                        source: CodeSource::Generated,
                        content_archetype,
                        style,
                        error: None,
                    };
                }
                Some(reason) => SlideError::CodeRejected {
                    slide: position,
                    reason: reason.to_string(),
                },
            }
        }
        Err(e) => SlideError::from_client(position, Stage::Code, e),
    };

    warn!("Slide {}: template code: {}", position, error);
    SlideCode {
        code: templates::render(content, style, content_archetype),
        source: CodeSource::Template,
        content_archetype,
        style,
        error: Some(error),
    }
}

/// Fixed text for a slide whose content call failed.
pub fn fallback_content(topic: &str, archetype: SlideArchetype, language: OutputLanguage) -> String {
    match (archetype, language) {
        (SlideArchetype::Title, OutputLanguage::Russian) => format!(
            "# {topic}\n\n## Обзор темы\n\nВ этой презентации рассматриваются ключевые аспекты темы «{topic}»."
        ),
        (SlideArchetype::Title, OutputLanguage::English) => format!(
            "# {topic}\n\n## Overview\n\nThis presentation covers the key aspects of {topic}."
        ),
        (SlideArchetype::Conclusion, OutputLanguage::Russian) => format!(
            "# Заключение\n\n* Мы рассмотрели основные аспекты темы «{topic}»\n\
* Тема продолжает активно развиваться\n\
* Спасибо за внимание!"
        ),
        (SlideArchetype::Conclusion, OutputLanguage::English) => format!(
            "# Conclusion\n\n* We covered the main aspects of {topic}\n\
* The field keeps evolving\n\
* Thank you for your attention!"
        ),
        (_, OutputLanguage::Russian) => format!(
            "# {topic}\n\n* Ключевой аспект темы\n* Практическое значение\n* Направления развития"
        ),
        (_, OutputLanguage::English) => format!(
            "# {topic}\n\n* A key aspect of the topic\n* Practical relevance\n* Directions of development"
        ),
    }
}

fn master_seed(config: &GenerationConfig) -> u64 {
    config.seed.unwrap_or_else(|| rand::rng().random())
}

/// Seed for the slide at `position`, mixed so that neighbouring positions
/// get unrelated streams.
fn slide_seed(master: u64, position: usize) -> u64 {
    let mut z = master ^ (position as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

// ── Client resolution ────────────────────────────────────────────────────────

/// The content and code clients for one run.
#[derive(Clone)]
pub struct Clients {
    pub content: Arc<dyn GenerationClient>,
    pub code: Arc<dyn GenerationClient>,
}

/// Resolve both clients from the config.
///
/// Offline mode short-circuits to [`OfflineClient`]. Otherwise a pre-built
/// client wins; the code stage reuses the content client unless a distinct
/// code model is named.
pub fn resolve_clients(config: &GenerationConfig) -> Result<Clients, DeckError> {
    if config.offline {
        let offline: Arc<dyn GenerationClient> = Arc::new(OfflineClient);
        return Ok(Clients {
            content: Arc::clone(&offline),
            code: offline,
        });
    }

    let content = match &config.content_client {
        Some(c) => Arc::clone(c),
        None => provider_client(config, config.content_model.as_deref())?,
    };

    let code = match &config.code_client {
        Some(c) => Arc::clone(c),
        None if config.code_model.is_none() || config.code_model == config.content_model => {
            Arc::clone(&content)
        }
        None => provider_client(config, config.code_model.as_deref())?,
    };

    Ok(Clients { content, code })
}

fn provider_client(
    config: &GenerationConfig,
    model: Option<&str>,
) -> Result<Arc<dyn GenerationClient>, DeckError> {
    let (provider, label) = resolve_provider(config, model)?;
    Ok(Arc::new(ProviderClient::new(provider, label)))
}

fn create_provider(
    provider_name: &str,
    model: &str,
) -> Result<(Arc<dyn LLMProvider>, String), DeckError> {
    ProviderFactory::create_llm_provider(provider_name, model)
        .map(|p| (p, format!("{provider_name}/{model}")))
        .map_err(|e| DeckError::ProviderNotConfigured {
            provider: provider_name.to_string(),
            hint: format!("{e}"),
        })
}

/// Resolve the LLM provider, from most-specific to least-specific.
///
/// 1. **Named provider + model** (`config.provider_name`)
/// 2. **Environment pair** (`EDGEQUAKE_LLM_PROVIDER` + `EDGEQUAKE_MODEL`);
///    an explicit `model` still wins over `EDGEQUAKE_MODEL`
/// 3. **OpenAI** when `OPENAI_API_KEY` is set
/// 4. **Full auto-detection** (`ProviderFactory::from_env`)
fn resolve_provider(
    config: &GenerationConfig,
    model: Option<&str>,
) -> Result<(Arc<dyn LLMProvider>, String), DeckError> {
    if let Some(ref name) = config.provider_name {
        return create_provider(name, model.unwrap_or(DEFAULT_MODEL));
    }

    if let (Ok(prov), Ok(env_model)) = (
        std::env::var("EDGEQUAKE_LLM_PROVIDER"),
        std::env::var("EDGEQUAKE_MODEL"),
    ) {
        if !prov.is_empty() && !env_model.is_empty() {
            return create_provider(&prov, model.unwrap_or(&env_model));
        }
    }

    if let Ok(openai_key) = std::env::var("OPENAI_API_KEY") {
        if !openai_key.is_empty() {
            return create_provider("openai", model.unwrap_or(DEFAULT_MODEL));
        }
    }

    let (llm_provider, _embedding) =
        ProviderFactory::from_env().map_err(|e| DeckError::ProviderNotConfigured {
            provider: "auto".to_string(),
            hint: format!(
                "No LLM provider could be auto-detected from environment.\n\
                Set OPENAI_API_KEY, ANTHROPIC_API_KEY, configure a provider, or run offline.\n\
                Error: {}",
                e
            ),
        })?;

    Ok((llm_provider, "auto".to_string()))
}
