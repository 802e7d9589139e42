//! PostgreSQL store over a sqlx pool.

use super::{PresentationStore, StoredPresentation, StoredSlide};
use crate::error::DeckError;
use crate::output::Presentation;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info, warn};

/// Tables and indexes; every statement is idempotent.
pub const SCHEMA: &str = include_str!("schema.sql");

/// Decks in `presentations` + `slides`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` with a small pool.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DeckError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Create the tables if they do not exist.
    pub async fn migrate(&self) -> Result<(), DeckError> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        info!("Database schema ready");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PresentationStore for PgStore {
    async fn save(&self, presentation: &Presentation) -> Result<i64, DeckError> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO presentations (topic, slides_count, created_at) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&presentation.topic)
        .bind(presentation.slide_count as i64)
        .bind(presentation.created_at)
        .fetch_one(&mut *tx)
        .await?;

        for slide in &presentation.slides {
            let inserted = sqlx::query(
                "INSERT INTO slides (presentation_id, slide_number, content, code) VALUES ($1, $2, $3, $4)",
            )
            .bind(id)
            .bind(slide.position as i64)
            .bind(&slide.content)
            .bind(&slide.code)
            .execute(&mut *tx)
            .await;

            if let Err(e) = inserted {
                // dropping `tx` rolls back the parent row too
                warn!("Presentation insert rolled back at slide {}: {}", slide.position, e);
                return Err(e.into());
            }
        }

        tx.commit().await?;
        debug!("Stored presentation {} ({} slides)", id, presentation.slides.len());
        Ok(id)
    }

    async fn load(&self, id: i64) -> Result<Option<StoredPresentation>, DeckError> {
        let row: Option<(i64, String, i64, DateTime<Utc>)> = sqlx::query_as(
            "SELECT id, topic, slides_count, created_at FROM presentations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some((id, topic, slide_count, created_at)) = row else {
            return Ok(None);
        };

        let slides: Vec<(i64, i64, String, String)> = sqlx::query_as(
            "SELECT id, slide_number, content, code FROM slides WHERE presentation_id = $1 ORDER BY slide_number ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(StoredPresentation {
            id,
            topic,
            slide_count,
            created_at,
            slides: slides
                .into_iter()
                .map(|(id, slide_number, content, code)| StoredSlide {
                    id,
                    slide_number,
                    content,
                    code,
                })
                .collect(),
        }))
    }
}
