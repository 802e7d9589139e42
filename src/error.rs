//! Error types for the edgequake-deck library.
//!
//! Three error types reflect three distinct failure modes:
//!
//! * [`DeckError`]: **Fatal**: the request cannot proceed at all (blank
//!   topic, zero slides, provider not configured, database down). Returned
//!   as `Err(DeckError)` from the top-level `generate*` functions and the
//!   stores.
//!
//! * [`SlideError`]: **Non-fatal**: one stage of one slide failed (model
//!   timed out, generated code was malformed). The slide still carries
//!   deterministic fallback content or template code; the error is stored in
//!   [`crate::output::Slide::errors`] so callers can see which slides were
//!   degraded.
//!
//! * [`ClientError`]: a single [`crate::pipeline::llm::GenerationClient`]
//!   call failed. Never escapes the orchestrator; it is converted into a
//!   [`SlideError`] and the fallback path is taken.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// All fatal errors returned by the edgequake-deck library.
#[derive(Debug, Error)]
pub enum DeckError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// A required text input (topic, slide content) was missing or blank.
    #[error("Invalid input: {field} must not be empty")]
    InvalidInput { field: &'static str },

    /// The requested slide count is outside `1..=MAX_SLIDES`.
    #[error(
        "Invalid slide count {count}: a presentation needs between 1 and {max} slides",
        max = crate::generate::MAX_SLIDES
    )]
    InvalidSlideCount { count: i64 },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configured provider is not initialised (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    // ── Persistence errors ────────────────────────────────────────────────
    /// The store failed to read or write; partial writes were rolled back.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// No presentation exists with the given id.
    #[error("Presentation {id} not found")]
    PresentationNotFound { id: i64 },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for DeckError {
    fn from(e: sqlx::Error) -> Self {
        DeckError::Persistence(e.to_string())
    }
}

/// Which half of the per-slide pipeline an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Content,
    Code,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Content => f.write_str("content"),
            Stage::Code => f.write_str("code"),
        }
    }
}

/// A non-fatal error for a single slide.
///
/// Stored alongside [`crate::output::Slide`]; the slide itself is always
/// complete because every failure has a deterministic fallback.
#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
pub enum SlideError {
    /// The generation client failed; fallback output was used.
    #[error("Slide {slide}: {stage} generation failed: {detail}")]
    GenerationFailed {
        slide: usize,
        stage: Stage,
        detail: String,
    },

    /// The generation client did not answer in time.
    #[error("Slide {slide}: {stage} generation timed out after {secs}s")]
    Timeout { slide: usize, stage: Stage, secs: u64 },

    /// The model answered, but the extracted code failed the well-formedness
    /// check and was replaced with template output.
    #[error("Slide {slide}: generated code rejected ({reason})")]
    CodeRejected { slide: usize, reason: String },
}

impl SlideError {
    /// Wrap a client failure for the given slide and stage.
    pub fn from_client(slide: usize, stage: Stage, err: ClientError) -> Self {
        match err {
            ClientError::Timeout { secs } => SlideError::Timeout { slide, stage, secs },
            other => SlideError::GenerationFailed {
                slide,
                stage,
                detail: other.to_string(),
            },
        }
    }
}

/// Failure of a single text-completion call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    /// The backend returned an error (HTTP failure, rate limit, bad key…).
    #[error("backend '{provider}' failed: {message}")]
    Backend { provider: String, message: String },

    /// The call exceeded the configured timeout.
    #[error("timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The backend answered with nothing but whitespace.
    #[error("empty completion")]
    EmptyCompletion,

    /// No backend is available (offline mode).
    #[error("no generation backend available")]
    Unavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_slide_count_display() {
        let e = DeckError::InvalidSlideCount { count: 0 };
        assert!(e.to_string().contains("slide count 0"), "got: {e}");
        assert!(e.to_string().contains("between 1 and 100"), "got: {e}");
    }

    #[test]
    fn invalid_input_names_field() {
        let e = DeckError::InvalidInput { field: "topic" };
        assert!(e.to_string().contains("topic"));
    }

    #[test]
    fn timeout_maps_to_slide_timeout() {
        let e = SlideError::from_client(3, Stage::Code, ClientError::Timeout { secs: 30 });
        assert_eq!(
            e,
            SlideError::Timeout {
                slide: 3,
                stage: Stage::Code,
                secs: 30
            }
        );
        assert!(e.to_string().contains("code generation timed out after 30s"));
    }

    #[test]
    fn backend_error_keeps_detail() {
        let e = SlideError::from_client(
            1,
            Stage::Content,
            ClientError::Backend {
                provider: "openai".into(),
                message: "429".into(),
            },
        );
        let msg = e.to_string();
        assert!(msg.contains("Slide 1"));
        assert!(msg.contains("openai"));
        assert!(msg.contains("429"));
    }

    #[test]
    fn slide_error_serialises() {
        let e = SlideError::CodeRejected {
            slide: 2,
            reason: "missing export default".into(),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("CodeRejected"));
        let back: SlideError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }
}
