//! Persistence for generated decks.
//!
//! A deck is stored as one parent record (topic, slide count, creation
//! time) and one child record per slide (number, content, code). Only the
//! text survives storage; styles and per-slide errors live in the
//! [`Presentation`] returned by [`crate::generate`].
//!
//! Two implementations:
//!
//! * [`MemoryStore`]: in-process, for tests and database-less servers.
//! * [`PgStore`] (feature `postgres`): sqlx over PostgreSQL; each save is one
//!   transaction, so a failed insert leaves no partial deck behind.

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::PgStore;

use crate::error::DeckError;
use crate::output::Presentation;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A deck as read back from a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPresentation {
    pub id: i64,
    pub topic: String,
    pub slide_count: i64,
    pub created_at: DateTime<Utc>,
    /// Ascending by `slide_number`.
    pub slides: Vec<StoredSlide>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSlide {
    pub id: i64,
    pub slide_number: i64,
    pub content: String,
    pub code: String,
}

/// Storage backend for decks.
#[async_trait]
pub trait PresentationStore: Send + Sync {
    /// Persist a deck and return its id. All-or-nothing.
    async fn save(&self, presentation: &Presentation) -> Result<i64, DeckError>;

    /// Load a deck by id; `Ok(None)` when it does not exist.
    async fn load(&self, id: i64) -> Result<Option<StoredPresentation>, DeckError>;
}

// ── In-memory store ──────────────────────────────────────────────────────────

#[derive(Default)]
struct MemoryInner {
    next_presentation_id: i64,
    next_slide_id: i64,
    decks: HashMap<i64, StoredPresentation>,
}

/// Process-local store. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored decks.
    pub async fn len(&self) -> usize {
        self.inner.read().await.decks.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl PresentationStore for MemoryStore {
    async fn save(&self, presentation: &Presentation) -> Result<i64, DeckError> {
        let mut inner = self.inner.write().await;
        inner.next_presentation_id += 1;
        let id = inner.next_presentation_id;

        let mut slides = Vec::with_capacity(presentation.slides.len());
        for slide in &presentation.slides {
            inner.next_slide_id += 1;
            slides.push(StoredSlide {
                id: inner.next_slide_id,
                slide_number: slide.position as i64,
                content: slide.content.clone(),
                code: slide.code.clone(),
            });
        }
        slides.sort_by_key(|s| s.slide_number);

        inner.decks.insert(
            id,
            StoredPresentation {
                id,
                topic: presentation.topic.clone(),
                slide_count: presentation.slide_count as i64,
                created_at: presentation.created_at,
                slides,
            },
        );
        Ok(id)
    }

    async fn load(&self, id: i64) -> Result<Option<StoredPresentation>, DeckError> {
        Ok(self.inner.read().await.decks.get(&id).cloned())
    }
}
