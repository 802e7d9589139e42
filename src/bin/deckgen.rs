//! CLI binary for edgequake-deck.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `GenerationConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use edgequake_deck::{
    generate, generate_slide_code, write_presentation_dir, CodeSource, ContentSource,
    GenerationConfig, GenerationProgressCallback, LayoutChoice, OutputLanguage, ProgressCallback,
    ThemeChoice, MAX_SLIDES,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a live bar plus one log line per slide.
/// Slides finish out of order when concurrency > 1.
struct CliProgressCallback {
    bar: ProgressBar,
    /// Per-slide wall-clock start times for elapsed reporting.
    start_times: Mutex<HashMap<usize, Instant>>,
    degraded: AtomicUsize,
}

impl CliProgressCallback {
    /// Spinner until `on_generation_start` tells us the slide count.
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Resolving provider…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            start_times: Mutex::new(HashMap::new()),
            degraded: AtomicUsize::new(0),
        })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} slides  \
             ⏱ {elapsed_precise}  ETA {eta_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(TICKS);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Generating");
        self.bar.reset_eta();
    }

    fn elapsed_secs(&self, position: usize) -> f64 {
        self.start_times
            .lock()
            .ok()
            .and_then(|mut m| m.remove(&position))
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }
}

impl GenerationProgressCallback for CliProgressCallback {
    fn on_generation_start(&self, topic: &str, total_slides: usize) {
        self.activate_bar(total_slides);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Generating {total_slides} slides on \"{topic}\"…"))
        ));
    }

    fn on_slide_start(&self, position: usize, _total: usize) {
        if let Ok(mut m) = self.start_times.lock() {
            m.insert(position, Instant::now());
        }
        self.bar.set_message(format!("slide {position}"));
    }

    fn on_slide_complete(
        &self,
        position: usize,
        total: usize,
        content: ContentSource,
        code: CodeSource,
    ) {
        let elapsed = self.elapsed_secs(position);
        let fell_back = content == ContentSource::Fallback || code == CodeSource::Template;
        if fell_back {
            self.degraded.fetch_add(1, Ordering::SeqCst);
        }
        let mark = if fell_back { yellow("◐") } else { green("✓") };
        self.bar.println(format!(
            "  {} Slide {:>3}/{:<3}  content: {:<9} code: {:<9} {}",
            mark,
            position,
            total,
            format!("{content:?}").to_lowercase(),
            format!("{code:?}").to_lowercase(),
            dim(&format!("{elapsed:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_generation_complete(&self, total_slides: usize, degraded_slides: usize) {
        self.bar.finish_and_clear();
        if degraded_slides == 0 {
            eprintln!(
                "{} {} slides generated",
                green("✔"),
                bold(&total_slides.to_string())
            );
        } else {
            eprintln!(
                "{} {} slides generated  ({} used fallback output)",
                yellow("⚠"),
                bold(&total_slides.to_string()),
                yellow(&degraded_slides.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Five slides, Markdown to stdout
  deckgen "Black holes" --slides 5

  # Write slide_NN.md / slide_NN.tsx / presentation.json into a directory
  deckgen "Black holes" --slides 10 -o deck/

  # English text, dark theme everywhere, reproducible theme picks
  deckgen "Quantum computing" --language en --theme dark --seed 42

  # Separate models for prose and code
  deckgen "Rust" --provider openai --content-model gpt-4.1-mini --code-model gpt-4.1

  # No model at all: fallback text and template components
  deckgen "Rust" --offline -o deck/

  # Component for an existing slide
  deckgen --render slide.md --layout grid

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY          OpenAI API key
  ANTHROPIC_API_KEY       Anthropic API key
  GEMINI_API_KEY          Google Gemini API key
  EDGEQUAKE_LLM_PROVIDER  Override provider (openai, anthropic, gemini, ollama)
  EDGEQUAKE_MODEL         Override model ID
"#;

/// Generate slide decks (Markdown + React components) with LLMs.
#[derive(Parser, Debug)]
#[command(
    name = "deckgen",
    version,
    about = "Generate slide decks (Markdown + React components) with LLMs",
    long_about = "Generate a slide deck for a topic: one Markdown slide per position from a \
content model, and one React/TypeScript component per slide from a code model. Failed or \
malformed answers are replaced by fallback text and template components, so the deck is \
always complete.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Presentation topic.
    #[arg(required_unless_present = "render")]
    topic: Option<String>,

    /// Number of slides.
    #[arg(short = 'n', long, env = "DECK_SLIDES", default_value_t = 14,
          value_parser = clap::value_parser!(u64).range(1..=MAX_SLIDES as u64))]
    slides: u64,

    /// Write slide files and presentation.json into this directory.
    #[arg(short, long, env = "DECK_OUTPUT")]
    output: Option<PathBuf>,

    /// Print the whole Presentation as JSON instead of Markdown.
    #[arg(long, env = "DECK_JSON")]
    json: bool,

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

    /// Layout: auto, centered, two-column, grid, featured, timeline.
    #[arg(long, env = "DECK_LAYOUT", default_value = "auto")]
    layout: String,

    /// Theme: auto, light, dark, colorful, minimal, corporate.
    #[arg(long, env = "DECK_THEME", default_value = "auto")]
    theme: String,

    /// Number of slides generated at once.
    #[arg(short, long, env = "DECK_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,

    /// Per-call LLM timeout in seconds.
    #[arg(long, env = "DECK_API_TIMEOUT", default_value_t = 120)]
    api_timeout: u64,

    /// Seed for theme selection.
    #[arg(long, env = "DECK_SEED")]
    seed: Option<u64>,

    /// Skip the model: fallback text and template components only.
    #[arg(long, env = "DECK_OFFLINE")]
    offline: bool,

    /// Generate the component for an existing Markdown slide and print it.
    #[arg(long, value_name = "FILE", conflicts_with = "topic")]
    render: Option<PathBuf>,

    /// Disable progress bar.
    #[arg(long, env = "DECK_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "DECK_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "DECK_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO logs; verbose mode always wins.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && cli.render.is_none();
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new_dynamic();
        Some(cb as Arc<dyn GenerationProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    // ── Single-slide mode ────────────────────────────────────────────────
    if let Some(ref path) = cli.render {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read slide from {:?}", path))?;
        let slide = generate_slide_code(&content, config.layout, config.theme, &config)
            .await
            .context("Component generation failed")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&slide).context("Failed to serialise output")?
            );
        } else {
            println!("{}", slide.code.trim_end());
            if !cli.quiet {
                eprintln!(
                    "{}",
                    dim(&format!(
                        "{} · {} · {} · {}",
                        slide.content_archetype,
                        slide.style.layout,
                        slide.style.theme,
                        format!("{:?}", slide.source).to_lowercase()
                    ))
                );
            }
        }
        return Ok(());
    }

    // ── Deck mode ────────────────────────────────────────────────────────
    let topic = cli.topic.as_deref().unwrap_or_default();
    let deck = generate(topic, cli.slides as usize, &config)
        .await
        .context("Generation failed")?;

    if let Some(ref dir) = cli.output {
        let written = write_presentation_dir(&deck, dir)
            .await
            .context("Failed to write presentation")?;
        if !cli.quiet {
            eprintln!(
                "{}  {} slides  {}ms  →  {}  {}",
                if deck.degraded_slides() == 0 {
                    green("✔")
                } else {
                    yellow("⚠")
                },
                deck.slide_count,
                deck.stats.total_duration_ms,
                bold(&dir.display().to_string()),
                dim(&format!("({} files)", written.len())),
            );
        }
    } else if cli.json {
        let json = serde_json::to_string_pretty(&deck).context("Failed to serialise output")?;
        println!("{json}");
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        for (i, slide) in deck.slides.iter().enumerate() {
            if i > 0 {
                handle
                    .write_all(b"\n---\n\n")
                    .context("Failed to write to stdout")?;
            }
            handle
                .write_all(slide.content.trim_end().as_bytes())
                .context("Failed to write to stdout")?;
            handle.write_all(b"\n").context("Failed to write to stdout")?;
        }
    }

    if !cli.quiet && !show_progress {
        let s = &deck.stats;
        eprintln!(
            "Generated {} slides in {}ms  (content: {} generated / {} fallback, code: {} generated / {} template)",
            s.total_slides,
            s.total_duration_ms,
            s.generated_content,
            s.fallback_content,
            s.generated_code,
            s.template_code,
        );
    }

    Ok(())
}

/// Map CLI args to `GenerationConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<GenerationConfig> {
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
    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
