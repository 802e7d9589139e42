//! Fixed colour palettes, one per [`Theme`].

use crate::archetype::Theme;
use serde::Serialize;

/// Semantic colour roles used by every template.
///
/// Serialises with camelCase keys so it can be emitted verbatim as the
/// component's `palette` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub background: &'static str,
    pub card_background: &'static str,
    pub text: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub gradient: &'static str,
}

pub const LIGHT: Palette = Palette {
    background: "#ffffff",
    card_background: "#f8fafc",
    text: "#1e293b",
    primary: "#3b82f6",
    secondary: "#64748b",
    accent: "#f59e0b",
    gradient: "linear-gradient(135deg, #ffffff 0%, #e2e8f0 100%)",
};

pub const DARK: Palette = Palette {
    background: "#0f172a",
    card_background: "#1e293b",
    text: "#f1f5f9",
    primary: "#60a5fa",
    secondary: "#94a3b8",
    accent: "#fbbf24",
    gradient: "linear-gradient(135deg, #0f172a 0%, #1e293b 100%)",
};

pub const COLORFUL: Palette = Palette {
    background: "#fdf4ff",
    card_background: "#ffffff",
    text: "#3b0764",
    primary: "#a855f7",
    secondary: "#ec4899",
    accent: "#f97316",
    gradient: "linear-gradient(135deg, #fdf4ff 0%, #fce7f3 50%, #ffedd5 100%)",
};

pub const MINIMAL: Palette = Palette {
    background: "#fafafa",
    card_background: "#ffffff",
    text: "#171717",
    primary: "#404040",
    secondary: "#737373",
    accent: "#171717",
    gradient: "linear-gradient(180deg, #fafafa 0%, #f5f5f5 100%)",
};

pub const CORPORATE: Palette = Palette {
    background: "#f1f5f9",
    card_background: "#ffffff",
    text: "#0f172a",
    primary: "#1e40af",
    secondary: "#475569",
    accent: "#0891b2",
    gradient: "linear-gradient(135deg, #f1f5f9 0%, #dbeafe 100%)",
};

impl Palette {
    pub fn for_theme(theme: Theme) -> &'static Palette {
        match theme {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
            Theme::Colorful => &COLORFUL,
            Theme::Minimal => &MINIMAL,
            Theme::Corporate => &CORPORATE,
        }
    }

    /// Look up by theme name; unknown names get the light palette.
    pub fn by_name(name: &str) -> &'static Palette {
        Self::for_theme(Theme::from_name(name))
    }
}
