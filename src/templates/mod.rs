//! Deterministic, model-free slide component generator.
//!
//! Used whenever the code model is unavailable or its output fails
//! [`crate::pipeline::extract::is_well_formed`]. Rendering never fails: the
//! extractors in [`crate::markdown`] always return data (real or
//! placeholder), and every theme has a palette.
//!
//! ## How a component is assembled
//!
//! Each renderer builds a small serialisable data struct from the slide
//! Markdown and hands it to [`component`] together with its own fixed styles
//! and markup. Slide text reaches the output only through `serde_json`, so
//! quotes, backslashes and `</script>`-like sequences in model output cannot
//! break the generated TypeScript.
//!
//! ```text
//! import …                      (shared)
//! const palette = {…};          (Palette, serialised)
//! const slide = {…};            (renderer data, serialised)
//! const styles / variants       (renderer-specific)
//! const XxxSlide: React.FC = () => { return ( …markup… ); };
//! export default XxxSlide;
//! ```

mod layouts;
mod palette;
mod slides;

pub use palette::Palette;

use crate::archetype::{ContentArchetype, Layout, SlideStyle};
use crate::markdown;
use serde::Serialize;

const IMPORTS: &str = "import React from 'react';\nimport { motion } from 'framer-motion';\n";

/// Render a complete slide component for `content`.
///
/// The archetype picks the renderer; `style.layout` only matters for
/// archetypes without a dedicated renderer.
pub fn render(content: &str, style: SlideStyle, archetype: ContentArchetype) -> String {
    let palette = Palette::for_theme(style.theme);
    match archetype {
        ContentArchetype::Title => slides::title(content, palette),
        ContentArchetype::Conclusion => slides::conclusion(content, palette),
        ContentArchetype::Comparison => slides::comparison(content, palette),
        ContentArchetype::Timeline => slides::timeline(content, palette),
        ContentArchetype::Data => slides::statistics(content, palette),
        ContentArchetype::List => slides::list(content, palette),
        _ => match style.layout {
            Layout::Centered => layouts::centered(content, palette),
            Layout::TwoColumn => layouts::two_column(content, palette),
            Layout::Grid => layouts::grid(content, palette),
            Layout::Featured => layouts::featured(content, palette),
            Layout::Timeline => slides::timeline(content, palette),
        },
    }
}

/// Serialise a value as a JavaScript literal.
fn js<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

/// Wrap renderer-specific styles and markup into a full module.
fn component<T: Serialize>(
    name: &str,
    palette: &Palette,
    slide: &T,
    styles: &str,
    markup: &str,
) -> String {
    format!(
        "{IMPORTS}\n\
const palette = {palette};\n\n\
const slide = {slide};\n\n\
{styles}\n\n\
const {name}: React.FC = () => {{\n  return (\n{markup}\n  );\n}};\n\n\
export default {name};\n",
        palette = js(palette),
        slide = js(slide),
        styles = styles.trim(),
        markup = markup.trim_end(),
    )
}

/// Bullet points, falling back to numbered items or placeholders.
fn points_of(content: &str) -> Vec<String> {
    let bullets = markdown::extract_bullet_points(content);
    if bullets.is_empty() {
        markdown::extract_list_items(content)
    } else {
        bullets
    }
}

/// First `## ` subheading, if any.
fn subheading_of(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|l| l.strip_prefix("## "))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
