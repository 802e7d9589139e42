//! Pull one component out of a code completion and sanity-check it.
//!
//! Code models wrap their answer in prose, fences, or both. [`extract_code`]
//! finds the component; [`is_well_formed`] rejects answers that clearly are
//! not one. The check is a cheap necessary condition, not a TypeScript
//! parser: anything that fails it is replaced with template output.

use once_cell::sync::Lazy;
use regex::Regex;

const IMPORT_MARKER: &str = "import ";
const EXPORT_MARKER: &str = "export default";
const LANGUAGE_TAGS: [&str; 5] = ["tsx", "jsx", "typescript", "javascript", "react"];

static RE_FENCED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```(.*?)```").unwrap());

static RE_COMPONENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"function\s+\w+\s*\(|const\s+\w+\s*(?::[^=]+)?=\s*(?:\([^)]*\)|\w+)(?:\s*:\s*[^=]+?)?\s*=>",
    )
    .unwrap()
});

static RE_MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[A-Za-z/][^<>]*>").unwrap());

/// Extract the component source from a raw completion.
///
/// 1. Fenced blocks: the longest non-empty body, language tag removed
///    (first block wins a tie).
/// 2. Otherwise the span from the first `import ` to the end of the
///    following `export default` statement.
/// 3. Otherwise the trimmed text.
pub fn extract_code(raw: &str) -> String {
    if let Some(block) = longest_fenced_block(raw) {
        return block;
    }
    if let Some(span) = import_export_span(raw) {
        return span.to_string();
    }
    raw.trim().to_string()
}

/// Necessary structure for a usable component: an import, a component
/// declaration, a default export and some markup.
pub fn is_well_formed(code: &str) -> bool {
    code.contains(IMPORT_MARKER)
        && RE_COMPONENT.is_match(code)
        && code.contains(EXPORT_MARKER)
        && RE_MARKUP.is_match(code)
}

/// Human-readable reason a component fails [`is_well_formed`].
pub fn rejection_reason(code: &str) -> Option<&'static str> {
    if !code.contains(IMPORT_MARKER) {
        Some("missing import")
    } else if !RE_COMPONENT.is_match(code) {
        Some("missing component declaration")
    } else if !code.contains(EXPORT_MARKER) {
        Some("missing export default")
    } else if !RE_MARKUP.is_match(code) {
        Some("missing markup")
    } else {
        None
    }
}

fn strip_language_tag(body: &str) -> &str {
    let (first, rest) = body.split_once('\n').unwrap_or((body, ""));
    let tag = first.trim();
    if tag.is_empty() || LANGUAGE_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
        rest
    } else {
        body
    }
}

fn longest_fenced_block(raw: &str) -> Option<String> {
    let mut best: Option<&str> = None;
    for caps in RE_FENCED.captures_iter(raw) {
        let body = strip_language_tag(caps.get(1).map_or("", |m| m.as_str())).trim();
        if body.is_empty() {
            continue;
        }
        if best.is_none_or(|b| body.len() > b.len()) {
            best = Some(body);
        }
    }
    best.map(str::to_string)
}

fn import_export_span(raw: &str) -> Option<&str> {
    let start = raw.find(IMPORT_MARKER)?;
    let export = start + raw[start..].find(EXPORT_MARKER)?;
    let end = statement_end(raw, export);
    Some(raw[start..end].trim_end())
}

/// End of the `export default` statement starting at `from`: the end of its
/// line, or the matching close brace when the line opens a block.
fn statement_end(raw: &str, from: usize) -> usize {
    let line_end = raw[from..].find('\n').map_or(raw.len(), |i| from + i);
    let line = &raw[from..line_end];
    let Some(open) = line.find('{') else {
        return line_end;
    };

    let mut depth = 0usize;
    for (i, c) in raw[from + open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let close = from + open + i + 1;
                    // take a trailing `;` or `)` on the same line
                    let tail = raw[close..].find('\n').map_or(raw.len(), |j| close + j);
                    return tail;
                }
            }
            _ => {}
        }
    }
    raw.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "import React from 'react';\n\
const Slide = () => <div>Hi</div>;\n\
export default Slide;";

    #[test]
    fn fenced_tsx_block_without_tag() {
        let raw = format!("Here you go:\n```tsx\n{MINIMAL}\n```\nEnjoy!");
        assert_eq!(extract_code(&raw), MINIMAL);
    }

    #[test]
    fn longest_block_wins() {
        let raw = format!("```bash\nnpm i framer-motion\n```\n\n```jsx\n{MINIMAL}\n```");
        assert_eq!(extract_code(&raw), MINIMAL);
    }

    #[test]
    fn tie_keeps_first_block() {
        let raw = "```\naaa\n```\n```\nbbb\n```";
        assert_eq!(extract_code(raw), "aaa");
    }

    #[test]
    fn untagged_first_line_is_kept() {
        let raw = "```\nimport x from 'y';\n```";
        assert_eq!(extract_code(raw), "import x from 'y';");
    }

    #[test]
    fn import_export_span_single_line() {
        let raw = format!("Sure! {MINIMAL}\nThis component renders a greeting.");
        assert_eq!(extract_code(&raw), MINIMAL);
    }

    #[test]
    fn import_export_span_with_block() {
        let raw = "text import A from 'a';\nexport default function Slide() {\n  return <div/>;\n}\nafter";
        assert_eq!(
            extract_code(raw),
            "import A from 'a';\nexport default function Slide() {\n  return <div/>;\n}"
        );
    }

    #[test]
    fn raw_text_fallback() {
        assert_eq!(extract_code("  no code here  "), "no code here");
    }

    #[test]
    fn well_formed_minimal_component() {
        assert!(is_well_formed(MINIMAL));
        assert!(is_well_formed(
            "import React from 'react';\nfunction Slide() { return <h1>x</h1>; }\nexport default Slide;"
        ));
        assert!(is_well_formed(
            "import React from 'react';\nconst Slide: React.FC = () => (<p>x</p>);\nexport default Slide;"
        ));
        assert_eq!(rejection_reason(MINIMAL), None);
    }

    #[test]
    fn arrow_with_return_type_is_well_formed() {
        let code = "import React from 'react';\nconst Slide = (): JSX.Element => {\n return <div>Hi</div>;\n};\nexport default Slide;";
        assert!(is_well_formed(code));
        assert_eq!(rejection_reason(code), None);

        let with_props = "import React from 'react';\n\
const Slide = ({ title }: Props): React.ReactElement => (<h1>{title}</h1>);\n\
export default Slide;";
        assert!(is_well_formed(with_props));
    }

    #[test]
    fn longest_block_between_prose() {
        let raw = format!("```ts\nshort\n```\ntext\n```tsx\n{MINIMAL}\n```");
        assert_eq!(extract_code(&raw), MINIMAL);
    }

    #[test]
    fn missing_export_is_rejected() {
        let code = "import React from 'react';\nconst Slide = () => <div>Hi</div>;";
        assert!(!is_well_formed(code));
        assert_eq!(rejection_reason(code), Some("missing export default"));
    }

    #[test]
    fn missing_markup_is_rejected() {
        let code = "import x from 'y';\nconst f = () => 1;\nexport default f;";
        assert!(!is_well_formed(code));
        assert_eq!(rejection_reason(code), Some("missing markup"));
    }

    #[test]
    fn prose_is_rejected() {
        assert!(!is_well_formed("I cannot help with that."));
        assert_eq!(rejection_reason("nope"), Some("missing import"));
    }
}
