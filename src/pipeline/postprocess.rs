//! Post-processing: deterministic cleanup of generated slide Markdown.
//!
//! ## Why is post-processing necessary?
//!
//! Content models fill the skeleton from the prompt, but rarely cleanly:
//!
//! - Local backends echo the whole prompt before the answer
//! - Some placeholders (`[Ключевой термин]`) are left unfilled
//! - Output is wrapped in ` ```markdown ` fences despite the instructions
//! - Fake image links (`![diagram](image.png)`) appear with no file behind
//!
//! The rules below fix these without touching the prose. Each is a pure
//! `&str → String` pass and independently testable.
//!
//! ## Rule Order
//!
//! The echo is cut before anything else because later rules would change
//! the prompt text and defeat the verbatim match. Placeholders are removed
//! before the heading check, so a skeleton whose title was never filled gets
//! a proper heading instead of `# `.

use crate::archetype::SlideArchetype;
use crate::pipeline::llm::strip_echoed_prompt;
use crate::prompts::{template_placeholders, OutputLanguage};
use once_cell::sync::Lazy;
use regex::Regex;

/// Turn a raw content completion into slide Markdown.
///
/// Never fails and never returns an empty string: a completion that cleans
/// down to nothing still gets a heading.
///
/// Rules (applied in order):
/// 1. Cut the echoed prompt
/// 2. Strip outer markdown fences
/// 3. Normalise line endings (CRLF → LF)
/// 4. Strip invisible Unicode
/// 5. Remove unfilled skeleton placeholders and the lines they leave empty
/// 6. Remove hallucinated image links
/// 7. Trim, then ensure the text opens with a `#` heading
/// 8. Collapse 3+ newlines to a single blank line
pub fn normalize_content(
    raw: &str,
    prompt: &str,
    archetype: SlideArchetype,
    position: usize,
    language: OutputLanguage,
) -> String {
    let s = strip_echoed_prompt(raw, prompt);
    let s = strip_markdown_fences(s);
    let s = normalise_line_endings(&s);
    let s = remove_invisible_chars(&s);
    let s = remove_placeholders(&s);
    let s = remove_hallucinated_images(&s);
    let s = ensure_heading(s.trim(), archetype, position, language);
    collapse_blank_lines(&s)
}

/// True when nothing but whitespace survives the echo cut.
pub fn is_blank_after_echo(raw: &str, prompt: &str) -> bool {
    strip_echoed_prompt(raw, prompt).trim().is_empty()
}

// ── Rule 2: Strip outer markdown fences ──────────────────────────────────────

static RE_OUTER_FENCES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```(?:markdown|md)?\n(.*)\n```\s*$").unwrap());

fn strip_markdown_fences(input: &str) -> String {
    if let Some(caps) = RE_OUTER_FENCES.captures(input.trim()) {
        caps[1].to_string()
    } else {
        input.to_string()
    }
}

// ── Rule 3: Normalise line endings ───────────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 4: Remove invisible Unicode characters ─────────────────────────────

fn remove_invisible_chars(input: &str) -> String {
    input.replace(
        [
            '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
        ],
        "",
    )
}

// ── Rule 5: Remove unfilled placeholders ─────────────────────────────────────

/// A line that held only a placeholder and now has just its marker.
fn is_bare_marker(line: &str) -> bool {
    let t = line.trim();
    !t.is_empty()
        && (t.chars().all(|c| c == '#')
            || matches!(t, "*" | "-" | "1." | "2." | "3." | ":" | "* :" | "- :"))
}

fn remove_placeholders(input: &str) -> String {
    let mut s = input.to_string();
    for placeholder in template_placeholders() {
        if s.contains(placeholder.as_str()) {
            s = s.replace(placeholder.as_str(), "");
        }
    }
    s.lines()
        .filter(|line| !is_bare_marker(line))
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Rule 6: Remove hallucinated image links ───────────────────────────────────
//
// Slides have no asset directory, so any image the model references is
// invented unless it is an absolute URL on a non-placeholder host. Fake
// links become an italic caption so the description is not lost.

static RE_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").unwrap());

fn is_placeholder_url(url: &str) -> bool {
    let u = url.trim();
    if !u.starts_with("http://") && !u.starts_with("https://") {
        return true;
    }
    [
        "example.com",
        "placeholder.com",
        "dummyimage.com",
        "lorempixel.com",
        "picsum.photos",
        "placehold.it",
    ]
    .iter()
    .any(|d| u.contains(d))
}

fn remove_hallucinated_images(input: &str) -> String {
    RE_IMAGE
        .replace_all(input, |caps: &regex::Captures<'_>| {
            let alt = caps[1].trim();
            if !is_placeholder_url(&caps[2]) {
                caps[0].to_string()
            } else if alt.is_empty() {
                String::new()
            } else {
                format!("*{}*", alt)
            }
        })
        .to_string()
}

// ── Rule 7: Ensure a leading heading ─────────────────────────────────────────

fn ensure_heading(
    input: &str,
    archetype: SlideArchetype,
    position: usize,
    language: OutputLanguage,
) -> String {
    if input.starts_with('#') {
        return input.to_string();
    }
    let heading = if position == 1 {
        language.intro_heading().to_string()
    } else if archetype == SlideArchetype::Conclusion {
        language.conclusion_heading().to_string()
    } else {
        format!("# {}", archetype.as_str())
    };
    if input.is_empty() {
        heading
    } else {
        format!("{heading}\n\n{input}")
    }
}

// ── Rule 8: Collapse blank lines ─────────────────────────────────────────────

static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").unwrap());

fn collapse_blank_lines(input: &str) -> String {
    RE_BLANK_LINES.replace_all(input, "\n\n").to_string()
}

// ── Tests ────────────────────────────────────────────────────────────────────
