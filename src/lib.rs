//! # edgequake-deck
//!
//! Generate slide decks from a topic: Markdown content per slide from one
//! language model, a React/TypeScript component per slide from a second.
//!
//! ## Why this crate?
//!
//! A model asked for a whole deck at once drifts: slides repeat each other,
//! the structure varies from run to run, and one malformed answer spoils the
//! result. This crate asks for one slide at a time with a fixed structure per
//! position (title, definition, history, … conclusion), cleans every answer
//! deterministically, and replaces any failed or malformed answer with
//! fallback text or a template component. A deck is always complete.
//!
//! ## Pipeline Overview
//!
//! ```text
//! topic, N
//!  │
//!  ├─ 1. Classify  position → archetype (title / 8-step middle cycle / conclusion)
//!  ├─ 2. Content   prompt + skeleton → model → cleanup        (or fallback text)
//!  ├─ 3. Style     content → archetype → layout + theme (seeded RNG)
//!  ├─ 4. Code      prompt → model → extract → well-formed?    (or template)
//!  └─ 5. Output    ordered slides + stats; optional store / directory
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_deck::{generate, GenerationConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Provider auto-detected from OPENAI_API_KEY / ANTHROPIC_API_KEY / …
//!     let config = GenerationConfig::default();
//!     let deck = generate("Black holes", 5, &config).await?;
//!     for slide in &deck.slides {
//!         println!("{}\n", slide.content);
//!     }
//!     eprintln!("{} of {} slides degraded", deck.degraded_slides(), deck.slide_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature    | Default | Description |
//! |------------|---------|-------------|
//! | `cli`      | on      | The `deckgen` binary (clap + indicatif + tracing-subscriber) |
//! | `postgres` | via `server` | [`store::PgStore`] over sqlx |
//! | `server`   | on      | The `deckgen-server` binary and [`server`] routes (actix-web) |
//!
//! Disable defaults when using only the library:
//! ```toml
//! edgequake-deck = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod archetype;
pub mod config;
pub mod error;
pub mod generate;
pub mod markdown;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod store;
pub mod templates;

#[cfg(feature = "server")]
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use archetype::{
    archetype_for_content, archetype_for_position, ContentArchetype, Layout, LayoutChoice,
    SlideArchetype, SlideStyle, Theme, ThemeChoice,
};
pub use config::{GenerationConfig, GenerationConfigBuilder};
pub use error::{ClientError, DeckError, SlideError, Stage};
pub use generate::{generate, generate_slide_code, generate_sync, resolve_clients, MAX_SLIDES};
pub use output::{
    write_presentation_dir, CodeSource, ContentSource, GenerationStats, Presentation, Slide,
    SlideCode,
};
pub use pipeline::llm::{GenerationClient, OfflineClient, ProviderClient, SamplingParams};
pub use progress::{GenerationProgressCallback, NoopProgressCallback, ProgressCallback};
pub use prompts::OutputLanguage;
pub use store::{MemoryStore, PresentationStore, StoredPresentation, StoredSlide};

#[cfg(feature = "postgres")]
pub use store::PgStore;
