//! Result types returned by the generation entry points.
//!
//! Everything here is plain data and serialises with serde, so the CLI's
//! `--json` output, `presentation.json` and the store all share one shape.

use crate::archetype::{ContentArchetype, SlideArchetype, SlideStyle};
use crate::error::{DeckError, SlideError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where a slide's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    /// Model completion after post-processing.
    Generated,
    /// Fixed fallback text (client failed, timed out or answered nothing).
    Fallback,
}

/// Where a slide's component came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeSource {
    /// Model completion that passed the well-formedness check.
    Generated,
    /// Deterministic template output.
    Template,
}

/// One finished slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slide {
    /// 1-indexed position in the deck.
    pub position: usize,
    /// Archetype assigned by position; drives the content prompt.
    pub archetype: SlideArchetype,
    /// Archetype read back from the content; drives the component design.
    pub content_archetype: ContentArchetype,
    /// Resolved layout and theme.
    pub style: SlideStyle,
    /// Slide Markdown. Never empty.
    pub content: String,
    /// Component source. Never empty.
    pub code: String,
    pub content_source: ContentSource,
    pub code_source: CodeSource,
    /// Non-fatal problems; empty when both stages used the model.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<SlideError>,
}

impl Slide {
    /// True when either stage fell back.
    pub fn is_degraded(&self) -> bool {
        self.content_source == ContentSource::Fallback || self.code_source == CodeSource::Template
    }
}

/// Result of generating the component for one piece of slide content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideCode {
    pub code: String,
    pub source: CodeSource,
    pub content_archetype: ContentArchetype,
    pub style: SlideStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<SlideError>,
}

/// Counters for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub total_slides: usize,
    pub generated_content: usize,
    pub fallback_content: usize,
    pub generated_code: usize,
    pub template_code: usize,
    pub total_duration_ms: u64,
}

impl GenerationStats {
    /// Count sources over `slides`; the duration is filled in by the caller.
    pub fn from_slides(slides: &[Slide]) -> Self {
        let generated_content = slides
            .iter()
            .filter(|s| s.content_source == ContentSource::Generated)
            .count();
        let generated_code = slides
            .iter()
            .filter(|s| s.code_source == CodeSource::Generated)
            .count();
        Self {
            total_slides: slides.len(),
            generated_content,
            fallback_content: slides.len() - generated_content,
            generated_code,
            template_code: slides.len() - generated_code,
            total_duration_ms: 0,
        }
    }
}

/// A complete deck, ordered by position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Presentation {
    pub topic: String,
    pub slide_count: usize,
    pub created_at: DateTime<Utc>,
    pub slides: Vec<Slide>,
    pub stats: GenerationStats,
}

impl Presentation {
    /// Number of slides where at least one stage fell back.
    pub fn degraded_slides(&self) -> usize {
        self.slides.iter().filter(|s| s.is_degraded()).count()
    }
}

// ── Directory output ─────────────────────────────────────────────────────────

/// Write `slide_NN.md`, `slide_NN.tsx` and `presentation.json` into `dir`.
///
/// Each file is written to a temp name and renamed into place, so a crash
/// never leaves a truncated slide behind. Returns the written paths.
pub async fn write_presentation_dir(
    presentation: &Presentation,
    dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, DeckError> {
    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| DeckError::OutputWriteFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;

    let mut written = Vec::with_capacity(presentation.slides.len() * 2 + 1);
    for slide in &presentation.slides {
        let stem = format!("slide_{:02}", slide.position);
        written.push(write_atomic(&dir.join(format!("{stem}.md")), &slide.content).await?);
        written.push(write_atomic(&dir.join(format!("{stem}.tsx")), &slide.code).await?);
    }

    let json = serde_json::to_string_pretty(presentation)
        .map_err(|e| DeckError::Internal(format!("serialise presentation: {e}")))?;
    written.push(write_atomic(&dir.join("presentation.json"), &json).await?);
    Ok(written)
}

async fn write_atomic(path: &Path, contents: &str) -> Result<PathBuf, DeckError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let result = match tokio::fs::write(&tmp, contents).await {
        Ok(()) => tokio::fs::rename(&tmp, path).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        // drop the temp file; the target keeps its previous state
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(DeckError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        });
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Stage;

    fn slide(position: usize, content: ContentSource, code: CodeSource) -> Slide {
        Slide {
            position,
            archetype: SlideArchetype::Generalized,
            content_archetype: ContentArchetype::General,
            style: SlideStyle::default(),
            content: format!("# Slide {position}"),
            code: "import React from 'react';".into(),
            content_source: content,
            code_source: code,
            errors: Vec::new(),
        }
    }

    fn deck() -> Presentation {
        let slides = vec![
            slide(1, ContentSource::Generated, CodeSource::Generated),
            slide(2, ContentSource::Fallback, CodeSource::Template),
            slide(3, ContentSource::Generated, CodeSource::Template),
        ];
        Presentation {
            topic: "Topic".into(),
            slide_count: 3,
            created_at: Utc::now(),
            stats: GenerationStats::from_slides(&slides),
            slides,
        }
    }

    #[test]
    fn stats_count_sources() {
        let stats = deck().stats;
        assert_eq!(stats.total_slides, 3);
        assert_eq!(stats.generated_content, 2);
        assert_eq!(stats.fallback_content, 1);
        assert_eq!(stats.generated_code, 1);
        assert_eq!(stats.template_code, 2);
    }

    #[test]
    fn degraded_slides_counted() {
        assert_eq!(deck().degraded_slides(), 2);
    }

    #[test]
    fn empty_errors_are_not_serialised() {
        let mut s = slide(1, ContentSource::Generated, CodeSource::Generated);
        let json = serde_json::to_string(&s).unwrap();
        assert!(!json.contains("errors"));
        assert!(json.contains(r#""content_source":"generated""#));

        s.errors.push(SlideError::GenerationFailed {
            slide: 1,
            stage: Stage::Content,
            detail: "x".into(),
        });
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("errors"));
    }

    #[tokio::test]
    async fn writes_every_slide_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("deck");
        let paths = write_presentation_dir(&deck(), &out).await.unwrap();

        assert_eq!(paths.len(), 7);
        assert_eq!(
            std::fs::read_to_string(out.join("slide_02.md")).unwrap(),
            "# Slide 2"
        );
        assert!(out.join("slide_03.tsx").exists());
        let manifest = std::fs::read_to_string(out.join("presentation.json")).unwrap();
        let back: Presentation = serde_json::from_str(&manifest).unwrap();
        assert_eq!(back.slides.len(), 3);
        assert!(!out.join("presentation.json.tmp").exists());
    }

    #[tokio::test]
    async fn failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // a non-empty directory where the slide file should go
        let blocked = dir.path().join("slide_01.md");
        std::fs::create_dir(&blocked).unwrap();
        std::fs::write(blocked.join("keep"), "x").unwrap();

        let err = write_atomic(&blocked, "# Slide 1").await.unwrap_err();
        assert!(matches!(err, DeckError::OutputWriteFailed { .. }));
        assert!(!dir.path().join("slide_01.md.tmp").exists());
        assert!(blocked.join("keep").exists());

        let err = write_presentation_dir(&deck(), dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("slide_01.md"));
        assert!(!dir.path().join("slide_01.md.tmp").exists());
    }
}
