//! HTTP server for edgequake-deck.
//!
//! Serves the routes in `edgequake_deck::server` over actix-web. Decks go to
//! PostgreSQL when `DATABASE_URL` is set, otherwise to an in-memory store
//! that is lost on restart.

use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use clap::Parser;
use edgequake_deck::server::{self, AppState};
use edgequake_deck::{
    GenerationConfig, LayoutChoice, MemoryStore, OutputLanguage, PgStore, PresentationStore,
    ThemeChoice,
};
use std::io;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Serve the deck generator over HTTP.
#[derive(Parser, Debug)]
#[command(
    name = "deckgen-server",
    version,
    about = "Serve the slide deck generator over HTTP"
)]
struct Cli {
    /// Address to listen on.
    #[arg(long, env = "DECK_BIND", default_value = "127.0.0.1:8000")]
    bind: String,

    /// PostgreSQL connection string. Without it decks are kept in memory.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Maximum pooled database connections.
    #[arg(long, env = "DECK_DB_MAX_CONNECTIONS", default_value_t = 5)]
    db_max_connections: u32,

    /// Origins allowed to call the API, comma-separated. Empty allows any.
    #[arg(long, env = "DECK_CORS_ORIGINS", value_delimiter = ',')]
    cors_origins: Vec<String>,

    /// HTTP worker threads (0 = one per core).
    #[arg(long, env = "DECK_WORKERS", default_value_t = 0)]
    workers: usize,

    /// LLM provider: openai, anthropic, gemini, ollama, azure.
    #[arg(long, env = "EDGEQUAKE_PROVIDER")]
    provider: Option<String>,

    /// Model for slide text.
    #[arg(long, env = "DECK_CONTENT_MODEL")]
    content_model: Option<String>,

    /// Model for slide components. Defaults to the content model.
    #[arg(long, env = "DECK_CODE_MODEL")]
    code_model: Option<String>,

    /// Slide text language: ru, en.
    #[arg(long, env = "DECK_LANGUAGE", default_value = "ru")]
    language: String,

    /// Default layout for generated decks.
    #[arg(long, env = "DECK_LAYOUT", default_value = "auto")]
    layout: String,

    /// Default theme for generated decks.
    #[arg(long, env = "DECK_THEME", default_value = "auto")]
    theme: String,

    /// Slides generated at once per request.
    #[arg(short, long, env = "DECK_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,

    /// Per-call LLM timeout in seconds.
    #[arg(long, env = "DECK_API_TIMEOUT", default_value_t = 120)]
    api_timeout: u64,

    /// Skip the model: fallback text and template components only.
    #[arg(long, env = "DECK_OFFLINE")]
    offline: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "DECK_VERBOSE")]
    verbose: bool,
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else {
        "info,actix_web=info,sqlx=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;

    let store: Arc<dyn PresentationStore> = match cli.database_url.as_deref() {
        Some(url) if !url.is_empty() => {
            let pg = PgStore::connect(url, cli.db_max_connections)
                .await
                .context("Failed to connect to PostgreSQL")?;
            pg.migrate().await.context("Failed to create schema")?;
            info!("Storing presentations in PostgreSQL");
            Arc::new(pg)
        }
        _ => {
            warn!("DATABASE_URL not set: presentations are kept in memory and lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let state = web::Data::new(AppState::new(store, config));
    if cli.cors_origins.iter().all(|o| o.trim().is_empty()) {
        warn!("No CORS origins configured: accepting requests from any origin");
    }
    info!("Starting server at http://{}", cli.bind);

    let cors_origins = cli.cors_origins.clone();
    let mut http = HttpServer::new(move || {
        App::new()
            .wrap(server::cors(&cors_origins))
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(server::configure)
    });
    if cli.workers > 0 {
        http = http.workers(cli.workers);
    }

    http.bind(&cli.bind)
        .with_context(|| format!("Failed to bind {}", cli.bind))?
        .run()
        .await
        .context("Server error")
}

/// Map CLI args to `GenerationConfig`.
fn build_config(cli: &Cli) -> Result<GenerationConfig> {
    let mut builder = GenerationConfig::builder()
        .concurrency(cli.concurrency)
        .language(OutputLanguage::from_name(&cli.language))
        .layout(LayoutChoice::parse(&cli.layout))
        .theme(ThemeChoice::parse(&cli.theme))
        .api_timeout_secs(cli.api_timeout)
        .offline(cli.offline);

    if let Some(ref p) = cli.provider {
        builder = builder.provider_name(p);
    }
    if let Some(ref m) = cli.content_model {
        builder = builder.content_model(m);
    }
    if let Some(ref m) = cli.code_model {
        builder = builder.code_model(m);
    }

    builder.build().context("Invalid configuration")
}
