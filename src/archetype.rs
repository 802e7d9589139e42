//! Slide classification: which kind of slide sits at a position, which kind
//! of slide a piece of text looks like, and which layout/theme suits it.
//!
//! Two independent classifiers live here:
//!
//! * [`archetype_for_position`] decides what the *content* prompt asks for.
//!   Position 1 is the title, the last position is the conclusion, and the
//!   middle cycles through [`MIDDLE_CYCLE`].
//! * [`archetype_for_content`] looks at the text that came back and picks a
//!   [`ContentArchetype`], which drives layout, theme and the fallback
//!   template. It does not consult the position at all.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

// ── Position-based archetypes ────────────────────────────────────────────

/// The structural role a slide plays in the deck, chosen by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideArchetype {
    Title,
    Definition,
    History,
    Statistics,
    Comparison,
    Example,
    Application,
    Challenges,
    Trends,
    Conclusion,
    Generalized,
}

/// Archetypes assigned to slides 2..N-1, indexed by `(position - 2) mod 8`.
pub const MIDDLE_CYCLE: [SlideArchetype; 8] = [
    SlideArchetype::Definition,
    SlideArchetype::History,
    SlideArchetype::Statistics,
    SlideArchetype::Comparison,
    SlideArchetype::Example,
    SlideArchetype::Application,
    SlideArchetype::Challenges,
    SlideArchetype::Trends,
];

impl SlideArchetype {
    pub const ALL: [SlideArchetype; 11] = [
        SlideArchetype::Title,
        SlideArchetype::Definition,
        SlideArchetype::History,
        SlideArchetype::Statistics,
        SlideArchetype::Comparison,
        SlideArchetype::Example,
        SlideArchetype::Application,
        SlideArchetype::Challenges,
        SlideArchetype::Trends,
        SlideArchetype::Conclusion,
        SlideArchetype::Generalized,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SlideArchetype::Title => "title",
            SlideArchetype::Definition => "definition",
            SlideArchetype::History => "history",
            SlideArchetype::Statistics => "statistics",
            SlideArchetype::Comparison => "comparison",
            SlideArchetype::Example => "example",
            SlideArchetype::Application => "application",
            SlideArchetype::Challenges => "challenges",
            SlideArchetype::Trends => "trends",
            SlideArchetype::Conclusion => "conclusion",
            SlideArchetype::Generalized => "generalized",
        }
    }

    /// Parse a tag; anything unrecognised is [`SlideArchetype::Generalized`].
    pub fn from_name(name: &str) -> Self {
        let name = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == name)
            .unwrap_or(SlideArchetype::Generalized)
    }
}

impl fmt::Display for SlideArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Archetype for a 1-indexed `position` in a deck of `total` slides.
///
/// Total function: position 1 always wins (a one-slide deck is a title
/// slide), then the last position, then the middle cycle.
pub fn archetype_for_position(position: usize, total: usize) -> SlideArchetype {
    if position <= 1 {
        SlideArchetype::Title
    } else if position == total {
        SlideArchetype::Conclusion
    } else {
        MIDDLE_CYCLE[(position - 2) % MIDDLE_CYCLE.len()]
    }
}

// ── Content-based archetypes ─────────────────────────────────────────────

/// Visual category inferred from slide text; picks layout, theme and
/// fallback template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentArchetype {
    Title,
    Conclusion,
    List,
    Section,
    Comparison,
    Example,
    Data,
    Timeline,
    Definition,
    Problem,
    Solution,
    Future,
    General,
}

impl ContentArchetype {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentArchetype::Title => "title",
            ContentArchetype::Conclusion => "conclusion",
            ContentArchetype::List => "list",
            ContentArchetype::Section => "section",
            ContentArchetype::Comparison => "comparison",
            ContentArchetype::Example => "example",
            ContentArchetype::Data => "data",
            ContentArchetype::Timeline => "timeline",
            ContentArchetype::Definition => "definition",
            ContentArchetype::Problem => "problem",
            ContentArchetype::Solution => "solution",
            ContentArchetype::Future => "future",
            ContentArchetype::General => "general",
        }
    }
}

impl fmt::Display for ContentArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const TITLE_CUES: &[&str] = &[
    "введение",
    "добро пожаловать",
    "приветств",
    "introduction",
    "welcome",
];
const CONCLUSION_CUES: &[&str] = &[
    "заключение",
    "итог",
    "выводы",
    "спасибо за внимание",
    "conclusion",
    "summary",
    "thank you",
];
const COMPARISON_CUES: &[&str] = &[
    "сравнени",
    "отличи",
    "против",
    " vs ",
    "vs.",
    "versus",
    "comparison",
    "compare",
];
const EXAMPLE_CUES: &[&str] = &["пример", "например", "кейс", "example", "case study"];
const STATISTIC_CUES: &[&str] = &["статистик", "процент", "%", "цифр", "statistic", "percent"];
const TIMELINE_CUES: &[&str] = &[
    "истори",
    "хронолог",
    "этап",
    "history",
    "timeline",
    "milestone",
];
const DEFINITION_CUES: &[&str] = &[
    "определени",
    "что такое",
    "понятие",
    "термин",
    "definition",
    "what is",
];
const PROBLEM_CUES: &[&str] = &["проблем", "трудност", "вызов", "problem", "challenge", "risk"];
const SOLUTION_CUES: &[&str] = &[
    "решени",
    "применени",
    "использовани",
    "solution",
    "application",
    "approach",
];
const FUTURE_CUES: &[&str] = &[
    "будущ",
    "тренд",
    "перспектив",
    "тенденци",
    "future",
    "trend",
    "outlook",
];

/// Bullet lines above this count make a slide a list.
const LIST_THRESHOLD: usize = 3;
/// `#` characters above this count make a slide a section overview.
const HEADING_THRESHOLD: usize = 3;

fn contains_any(haystack: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| haystack.contains(cue))
}

fn bullet_lines(text: &str) -> usize {
    text.lines()
        .map(str::trim_start)
        .filter(|l| l.starts_with("* ") || l.starts_with("- ") || l.starts_with("• "))
        .count()
}

/// Classify slide text for layout/theme/template selection.
///
/// Rules are evaluated in a fixed order and the first match wins. The cue
/// sets overlap ("history of the problem" matches both timeline and problem),
/// so the order is part of the behaviour.
pub fn archetype_for_content(text: &str) -> ContentArchetype {
    let lower = text.to_lowercase();

    let rules: [(bool, ContentArchetype); 12] = [
        (contains_any(&lower, TITLE_CUES), ContentArchetype::Title),
        (contains_any(&lower, CONCLUSION_CUES), ContentArchetype::Conclusion),
        (bullet_lines(text) > LIST_THRESHOLD, ContentArchetype::List),
        (
            text.matches('#').count() > HEADING_THRESHOLD,
            ContentArchetype::Section,
        ),
        (contains_any(&lower, COMPARISON_CUES), ContentArchetype::Comparison),
        (contains_any(&lower, EXAMPLE_CUES), ContentArchetype::Example),
        (contains_any(&lower, STATISTIC_CUES), ContentArchetype::Data),
        (contains_any(&lower, TIMELINE_CUES), ContentArchetype::Timeline),
        (contains_any(&lower, DEFINITION_CUES), ContentArchetype::Definition),
        (contains_any(&lower, PROBLEM_CUES), ContentArchetype::Problem),
        (contains_any(&lower, SOLUTION_CUES), ContentArchetype::Solution),
        (contains_any(&lower, FUTURE_CUES), ContentArchetype::Future),
    ];

    rules
        .into_iter()
        .find_map(|(hit, archetype)| hit.then_some(archetype))
        .unwrap_or(ContentArchetype::General)
}

// ── Layout & theme ───────────────────────────────────────────────────────

/// Component layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    Centered,
    #[default]
    TwoColumn,
    Grid,
    Featured,
    Timeline,
}

impl Layout {
    pub const ALL: [Layout; 5] = [
        Layout::Centered,
        Layout::TwoColumn,
        Layout::Grid,
        Layout::Featured,
        Layout::Timeline,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Centered => "centered",
            Layout::TwoColumn => "two-column",
            Layout::Grid => "grid",
            Layout::Featured => "featured",
            Layout::Timeline => "timeline",
        }
    }

    /// Parse a layout name; unknown names fall back to `two-column`.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == name)
            .unwrap_or_default()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colour theme; each maps to a fixed [`crate::templates::Palette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Colorful,
    Minimal,
    Corporate,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Light,
        Theme::Dark,
        Theme::Colorful,
        Theme::Minimal,
        Theme::Corporate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Colorful => "colorful",
            Theme::Minimal => "minimal",
            Theme::Corporate => "corporate",
        }
    }

    /// Parse a theme name; unknown names fall back to `light`.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == name)
            .unwrap_or_default()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested layout: a fixed one, or `auto` (derived from the archetype).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutChoice {
    #[default]
    Auto,
    Fixed(Layout),
}

impl LayoutChoice {
    /// `"auto"` (or blank) → `Auto`; anything else goes through
    /// [`Layout::from_name`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "" | "auto" => LayoutChoice::Auto,
            other => LayoutChoice::Fixed(Layout::from_name(other)),
        }
    }
}

/// Requested theme: a fixed one, or `auto` (derived from the archetype).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemeChoice {
    #[default]
    Auto,
    Fixed(Theme),
}

impl ThemeChoice {
    /// `"auto"` (or blank) → `Auto`; anything else goes through
    /// [`Theme::from_name`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "" | "auto" => ThemeChoice::Auto,
            other => ThemeChoice::Fixed(Theme::from_name(other)),
        }
    }
}

/// Layout chosen when the caller asked for `auto`.
pub fn layout_for(archetype: ContentArchetype) -> Layout {
    match archetype {
        ContentArchetype::Title | ContentArchetype::Conclusion => Layout::Centered,
        ContentArchetype::List
        | ContentArchetype::Comparison
        | ContentArchetype::Definition
        | ContentArchetype::General => Layout::TwoColumn,
        ContentArchetype::Section
        | ContentArchetype::Example
        | ContentArchetype::Problem
        | ContentArchetype::Future => Layout::Featured,
        ContentArchetype::Data | ContentArchetype::Solution => Layout::Grid,
        ContentArchetype::Timeline => Layout::Timeline,
    }
}

const OPENING_THEMES: &[Theme] = &[Theme::Light, Theme::Dark, Theme::Colorful];

/// Themes acceptable for an archetype when the caller asked for `auto`.
/// A single entry means the theme is fixed.
pub fn theme_candidates(archetype: ContentArchetype) -> &'static [Theme] {
    match archetype {
        ContentArchetype::Title | ContentArchetype::Conclusion => OPENING_THEMES,
        ContentArchetype::Comparison => &[Theme::Minimal],
        ContentArchetype::Data => &[Theme::Corporate],
        ContentArchetype::Timeline => &[Theme::Colorful],
        ContentArchetype::Problem | ContentArchetype::Future => &[Theme::Dark],
        ContentArchetype::List
        | ContentArchetype::Section
        | ContentArchetype::Example
        | ContentArchetype::Definition
        | ContentArchetype::Solution
        | ContentArchetype::General => &Theme::ALL,
    }
}

/// Resolved layout + theme for one slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlideStyle {
    pub layout: Layout,
    pub theme: Theme,
}

/// Resolve `auto` choices for `archetype`, drawing from `rng` when the
/// archetype accepts several themes.
pub fn resolve_style<R: Rng + ?Sized>(
    archetype: ContentArchetype,
    layout: LayoutChoice,
    theme: ThemeChoice,
    rng: &mut R,
) -> SlideStyle {
    let layout = match layout {
        LayoutChoice::Fixed(l) => l,
        LayoutChoice::Auto => layout_for(archetype),
    };
    let theme = match theme {
        ThemeChoice::Fixed(t) => t,
        ThemeChoice::Auto => {
            let candidates = theme_candidates(archetype);
            match candidates {
                [only] => *only,
                many => many[rng.random_range(0..many.len())],
            }
        }
    };
    SlideStyle { layout, theme }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn first_and_last_positions() {
        assert_eq!(archetype_for_position(1, 10), SlideArchetype::Title);
        assert_eq!(archetype_for_position(10, 10), SlideArchetype::Conclusion);
        // A one-slide deck is a title slide.
        assert_eq!(archetype_for_position(1, 1), SlideArchetype::Title);
    }

    #[test]
    fn middle_positions_cycle() {
        let total = 20;
        for position in 2..total {
            assert_eq!(
                archetype_for_position(position, total),
                MIDDLE_CYCLE[(position - 2) % 8],
                "position {position}"
            );
        }
        assert_eq!(archetype_for_position(10, 20), SlideArchetype::Definition);
    }

    #[test]
    fn exactly_one_title_and_conclusion() {
        for total in 2..=15 {
            let all: Vec<_> = (1..=total).map(|p| archetype_for_position(p, total)).collect();
            assert_eq!(all.iter().filter(|a| **a == SlideArchetype::Title).count(), 1);
            assert_eq!(
                all.iter().filter(|a| **a == SlideArchetype::Conclusion).count(),
                1
            );
        }
    }

    #[test]
    fn archetype_names_round_trip_and_default() {
        for a in SlideArchetype::ALL {
            assert_eq!(SlideArchetype::from_name(a.as_str()), a);
        }
        assert_eq!(SlideArchetype::from_name("mystery"), SlideArchetype::Generalized);
    }

    #[test]
    fn content_title_wins_over_list() {
        let text = "# Введение\n* a\n* b\n* c\n* d\n* e";
        assert_eq!(archetype_for_content(text), ContentArchetype::Title);
    }

    #[test]
    fn content_conclusion() {
        assert_eq!(
            archetype_for_content("# Заключение\nГлавные выводы"),
            ContentArchetype::Conclusion
        );
    }

    #[test]
    fn content_list_needs_more_than_three_bullets() {
        assert_eq!(
            archetype_for_content("# Факты\n* a\n* b\n* c\n* d"),
            ContentArchetype::List
        );
        assert_ne!(
            archetype_for_content("# Факты\n* a\n* b\n* c"),
            ContentArchetype::List
        );
    }

    #[test]
    fn content_section_from_heading_density() {
        let text = "# A\n## B\n## C\nтекст";
        assert_eq!(archetype_for_content(text), ContentArchetype::Section);
    }

    #[test]
    fn content_comparison_before_example() {
        let text = "# Обзор\nСравнение подходов, например A и B";
        assert_eq!(archetype_for_content(text), ContentArchetype::Comparison);
    }

    #[test]
    fn content_statistics_and_timeline() {
        assert_eq!(archetype_for_content("# Рост\n75% компаний"), ContentArchetype::Data);
        assert_eq!(
            archetype_for_content("# Обзор\nИстория развития"),
            ContentArchetype::Timeline
        );
    }

    #[test]
    fn content_tail_rules() {
        assert_eq!(archetype_for_content("# Что такое ИИ"), ContentArchetype::Definition);
        assert_eq!(archetype_for_content("# Основные проблемы"), ContentArchetype::Problem);
        assert_eq!(archetype_for_content("# Решения"), ContentArchetype::Solution);
        assert_eq!(archetype_for_content("# Будущее отрасли"), ContentArchetype::Future);
        assert_eq!(archetype_for_content("# Черные дыры"), ContentArchetype::General);
    }

    #[test]
    fn layout_and_theme_parsing_defaults() {
        assert_eq!(Layout::from_name("GRID"), Layout::Grid);
        assert_eq!(Layout::from_name("single-column"), Layout::TwoColumn);
        assert_eq!(Theme::from_name("neon"), Theme::Light);
        assert_eq!(LayoutChoice::parse("auto"), LayoutChoice::Auto);
        assert_eq!(ThemeChoice::parse(""), ThemeChoice::Auto);
        assert_eq!(ThemeChoice::parse("dark"), ThemeChoice::Fixed(Theme::Dark));
    }

    #[test]
    fn fixed_themes_ignore_rng() {
        let mut rng = StdRng::seed_from_u64(1);
        let style = resolve_style(
            ContentArchetype::Data,
            LayoutChoice::Auto,
            ThemeChoice::Auto,
            &mut rng,
        );
        assert_eq!(style, SlideStyle { layout: Layout::Grid, theme: Theme::Corporate });

        let style = resolve_style(
            ContentArchetype::Timeline,
            LayoutChoice::Auto,
            ThemeChoice::Auto,
            &mut rng,
        );
        assert_eq!(style.layout, Layout::Timeline);
        assert_eq!(style.theme, Theme::Colorful);
    }

    #[test]
    fn random_themes_stay_in_candidate_set_and_are_seedable() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let sa = resolve_style(
                ContentArchetype::Title,
                LayoutChoice::Auto,
                ThemeChoice::Auto,
                &mut a,
            );
            let sb = resolve_style(
                ContentArchetype::Title,
                LayoutChoice::Auto,
                ThemeChoice::Auto,
                &mut b,
            );
            assert_eq!(sa, sb);
            assert!(OPENING_THEMES.contains(&sa.theme));
            assert_eq!(sa.layout, Layout::Centered);
        }
    }

    #[test]
    fn explicit_choices_win() {
        let mut rng = StdRng::seed_from_u64(7);
        let style = resolve_style(
            ContentArchetype::Data,
            LayoutChoice::Fixed(Layout::Featured),
            ThemeChoice::Fixed(Theme::Dark),
            &mut rng,
        );
        assert_eq!(style, SlideStyle { layout: Layout::Featured, theme: Theme::Dark });
    }
}
