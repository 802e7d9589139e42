//! Heuristic structure extraction from loosely formatted slide Markdown.
//!
//! Model output is rarely well-formed, so these are line scans and a couple
//! of regexes rather than a Markdown parser. Every function is total: when
//! nothing matches, the caller receives fixed placeholder data so the
//! templates in [`crate::templates`] always have something to render.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Title used when the text has no `# ` heading.
pub const DEFAULT_TITLE: &str = "Слайд";

/// A named group of points on a comparison slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonSection {
    pub title: String,
    pub points: Vec<String>,
}

/// One entry on a timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineItem {
    pub title: String,
    pub description: String,
}

/// A `value: label` pair such as `75%: Conversion`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataItem {
    pub value: String,
    pub label: String,
}

impl DataItem {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

fn bullet_text(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    trimmed
        .strip_prefix("* ")
        .or_else(|| trimmed.strip_prefix("- "))
        .map(str::trim)
}

fn is_bullet(line: &str) -> bool {
    bullet_text(line).is_some()
}

/// Text of the first non-blank `# ` heading, or [`DEFAULT_TITLE`].
pub fn extract_title(text: &str) -> String {
    text.lines()
        .filter_map(|line| line.strip_prefix("# "))
        .map(str::trim)
        .find(|t| !t.is_empty())
        .map_or_else(|| DEFAULT_TITLE.to_string(), str::to_string)
}

/// Every `* ` / `- ` line, marker removed, in document order.
pub fn extract_bullet_points(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(bullet_text)
        .map(str::to_string)
        .collect()
}

/// Plain prose lines: not headings, bullets, numbered items or fences.
pub fn extract_paragraphs(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| {
            !l.is_empty()
                && !l.starts_with('#')
                && !l.starts_with("```")
                && !is_bullet(l)
                && numbered_text(l).is_none()
        })
        .map(str::to_string)
        .collect()
}

fn placeholder_sections() -> Vec<ComparisonSection> {
    vec![
        ComparisonSection {
            title: "Вариант A".to_string(),
            points: vec![
                "Первое преимущество".to_string(),
                "Второе преимущество".to_string(),
                "Третье преимущество".to_string(),
            ],
        },
        ComparisonSection {
            title: "Вариант B".to_string(),
            points: vec![
                "Первое отличие".to_string(),
                "Второе отличие".to_string(),
                "Третье отличие".to_string(),
            ],
        },
    ]
}

/// `## ` headings open sections; `* ` lines below them are its points.
///
/// Fewer than two sections yields two placeholder sections.
pub fn extract_comparison_sections(text: &str) -> Vec<ComparisonSection> {
    let mut sections: Vec<ComparisonSection> = Vec::new();

    for line in text.lines() {
        if let Some(title) = line.strip_prefix("## ") {
            sections.push(ComparisonSection {
                title: title.trim().to_string(),
                points: Vec::new(),
            });
        } else if let Some(point) = line.trim().strip_prefix("* ") {
            if let Some(current) = sections.last_mut() {
                current.points.push(point.trim().to_string());
            }
        }
    }

    if sections.len() < 2 {
        return placeholder_sections();
    }
    sections
}

fn placeholder_timeline() -> Vec<TimelineItem> {
    [
        ("Начало", "Зарождение идеи"),
        ("Развитие", "Первые результаты"),
        ("Рост", "Широкое распространение"),
        ("Сегодня", "Текущее состояние"),
    ]
    .into_iter()
    .map(|(title, description)| TimelineItem {
        title: title.to_string(),
        description: description.to_string(),
    })
    .collect()
}

/// Each bullet becomes an item; a directly following non-bullet line is its
/// description. No bullets yields four placeholder items.
pub fn extract_timeline_items(text: &str) -> Vec<TimelineItem> {
    let lines: Vec<&str> = text.lines().collect();
    let mut items = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let Some(title) = bullet_text(line) else {
            continue;
        };
        let description = lines
            .get(i + 1)
            .filter(|next| !is_bullet(next))
            .map(|next| next.trim())
            .filter(|next| !next.is_empty() && !next.starts_with('#'))
            .unwrap_or("");
        items.push(TimelineItem {
            title: title.to_string(),
            description: description.to_string(),
        });
    }

    if items.is_empty() {
        return placeholder_timeline();
    }
    items
}

static RE_NUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[+\-−]?\d+(?:[.,]\d+)?\s*(?:%|×|(?:x|k|K|M|B|млн|млрд|тыс)\b\.?)?").unwrap()
});

fn parse_data_item(text: &str) -> DataItem {
    if let Some((value, label)) = text.split_once(':') {
        return DataItem::new(value.trim(), label.trim());
    }
    if let Some(m) = RE_NUMERIC.find(text) {
        let value = m.as_str().trim();
        let label = format!("{}{}", &text[..m.start()], &text[m.end()..]);
        let label = label.trim().trim_matches(|c: char| c == '-' || c == '—' || c == '–');
        return DataItem::new(value, label.trim());
    }
    DataItem::new("", text.trim())
}

fn placeholder_data() -> Vec<DataItem> {
    vec![
        DataItem::new("75%", "Рост эффективности"),
        DataItem::new("2.5x", "Увеличение производительности"),
        DataItem::new("10K+", "Активных пользователей"),
        DataItem::new("24/7", "Доступность"),
    ]
}

/// Parse bullets as `value: label`, or split a numeric token from the text.
///
/// Fewer than three items yields four placeholder pairs.
pub fn extract_data_items(text: &str) -> Vec<DataItem> {
    let items: Vec<DataItem> = text.lines().filter_map(bullet_text).map(parse_data_item).collect();
    if items.len() < 3 {
        return placeholder_data();
    }
    items
}

fn numbered_text(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    ["1. ", "2. ", "3. "]
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .map(str::trim)
}

/// Bullet lines plus `1. `–`3. ` numbered lines; four placeholders if none.
pub fn extract_list_items(text: &str) -> Vec<String> {
    let items: Vec<String> = text
        .lines()
        .filter_map(|line| bullet_text(line).or_else(|| numbered_text(line)))
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        return vec![
            "Первый ключевой пункт".to_string(),
            "Второй ключевой пункт".to_string(),
            "Третий ключевой пункт".to_string(),
            "Четвёртый ключевой пункт".to_string(),
        ];
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_from_first_heading() {
        assert_eq!(extract_title("# Foo\nbar"), "Foo");
        assert_eq!(extract_title("intro\n# Second\n# Third"), "Second");
    }

    #[test]
    fn title_default_when_missing() {
        assert_eq!(extract_title("## Sub only\ntext"), DEFAULT_TITLE);
        assert_eq!(extract_title(""), "Слайд");
    }

    #[test]
    fn blank_heading_is_skipped() {
        assert_eq!(extract_title("# \nintro\n# Real"), "Real");
        assert_eq!(extract_title("#   \ntext"), DEFAULT_TITLE);
    }

    #[test]
    fn bullets_in_order() {
        let text = "# T\n* one\ntext\n  - two\n*not a bullet\n* three";
        assert_eq!(extract_bullet_points(text), vec!["one", "two", "three"]);
    }

    #[test]
    fn paragraphs_skip_structure() {
        let text = "# T\nProse line\n* bullet\n1. numbered\n\nMore prose";
        assert_eq!(extract_paragraphs(text), vec!["Prose line", "More prose"]);
    }

    #[test]
    fn comparison_sections_collect_points() {
        let text = "# Cmp\n## Rust\n* fast\n* safe\n## Go\n* simple";
        let sections = extract_comparison_sections(text);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Rust");
        assert_eq!(sections[0].points, vec!["fast", "safe"]);
        assert_eq!(sections[1].points, vec!["simple"]);
    }

    #[test]
    fn comparison_placeholders_when_one_section() {
        let sections = extract_comparison_sections("## Only\n* x");
        assert_eq!(sections, placeholder_sections());
        assert!(sections.iter().all(|s| s.points.len() == 3));
    }

    #[test]
    fn timeline_descriptions_from_following_line() {
        let text = "* 1905: Relativity\n  Special theory published\n* 1915: General relativity\n* 1919: Eclipse";
        let items = extract_timeline_items(text);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "1905: Relativity");
        assert_eq!(items[0].description, "Special theory published");
        assert_eq!(items[1].description, "");
        assert_eq!(items[2].description, "");
    }

    #[test]
    fn timeline_placeholders() {
        let items = extract_timeline_items("no bullets here");
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].title, "Начало");
    }

    #[test]
    fn data_items_value_label_pairs() {
        let items = extract_data_items("* 75%: Conversion\n* 2.5x: Growth\n* 100: Count");
        assert_eq!(
            items,
            vec![
                DataItem::new("75%", "Conversion"),
                DataItem::new("2.5x", "Growth"),
                DataItem::new("100", "Count"),
            ]
        );
    }

    #[test]
    fn data_items_numeric_fallback() {
        let items = extract_data_items("* Рост на 40%\n* 3 млн пользователей\n* Без чисел");
        assert_eq!(items[0], DataItem::new("40%", "Рост на"));
        assert_eq!(items[1], DataItem::new("3 млн", "пользователей"));
        assert_eq!(items[2], DataItem::new("", "Без чисел"));
    }

    #[test]
    fn data_items_units_stop_at_word_boundary() {
        let items =
            extract_data_items("* 100 Best companies\n* 5 тысяч клиентов\n* 3 Million users");
        assert_eq!(
            items,
            vec![
                DataItem::new("100", "Best companies"),
                DataItem::new("5", "тысяч клиентов"),
                DataItem::new("3", "Million users"),
            ]
        );
        let items = extract_data_items("* 10K+ downloads\n* 2.5x faster\n* 12 тыс. студентов");
        assert_eq!(items[0].value, "10K");
        assert_eq!(items[1], DataItem::new("2.5x", "faster"));
        assert_eq!(items[2], DataItem::new("12 тыс.", "студентов"));
    }

    #[test]
    fn data_items_placeholders_below_three() {
        assert_eq!(extract_data_items("* 1: one\n* 2: two"), placeholder_data());
        assert_eq!(extract_data_items(""), placeholder_data());
    }

    #[test]
    fn list_items_bullets_and_numbers() {
        let text = "1. first\n2. second\n3. third\n4. fourth\n- dash";
        assert_eq!(
            extract_list_items(text),
            vec!["first", "second", "third", "dash"]
        );
    }

    #[test]
    fn list_items_placeholders() {
        assert_eq!(extract_list_items("plain").len(), 4);
    }
}
