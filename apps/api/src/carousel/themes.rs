//! Closed set of carousel color presets.

use serde::Serialize;

/// Named color roles used by the slide templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    /// Headings, numbers, borders and button text on light slides.
    pub primary: &'static str,
    /// Gradient start on the cover and call-to-action slides.
    pub background: &'static str,
    /// Gradient end on the cover and call-to-action slides.
    pub background_alt: &'static str,
    /// Metric values on the dark slide.
    pub accent: &'static str,
    /// Light slide background.
    pub surface: &'static str,
    /// Strength cards.
    pub card: &'static str,
    /// Skill pill fill.
    pub tint: &'static str,
    /// Body text on light slides.
    pub text: &'static str,
    pub dark: &'static str,
    pub dark_alt: &'static str,
}

pub const DEFAULT_THEME_ID: &str = "linkedin";

pub static THEMES: [Theme; 5] = [
    Theme {
        id: "linkedin",
        name: "LinkedIn Blue",
        primary: "#0077b5",
        background: "#0077b5",
        background_alt: "#005582",
        accent: "#0077b5",
        surface: "#ffffff",
        card: "#f8fafc",
        tint: "#f0f7fb",
        text: "#1a202c",
        dark: "#1a202c",
        dark_alt: "#2d3748",
    },
    Theme {
        id: "midnight",
        name: "Midnight Indigo",
        primary: "#4f46e5",
        background: "#312e81",
        background_alt: "#1e1b4b",
        accent: "#a5b4fc",
        surface: "#ffffff",
        card: "#f5f3ff",
        tint: "#eef2ff",
        text: "#1e1b4b",
        dark: "#0f172a",
        dark_alt: "#1e293b",
    },
    Theme {
        id: "emerald",
        name: "Emerald",
        primary: "#047857",
        background: "#059669",
        background_alt: "#065f46",
        accent: "#34d399",
        surface: "#ffffff",
        card: "#f0fdf4",
        tint: "#ecfdf5",
        text: "#064e3b",
        dark: "#022c22",
        dark_alt: "#064e3b",
    },
    Theme {
        id: "sunset",
        name: "Sunset",
        primary: "#c2410c",
        background: "#f97316",
        background_alt: "#c2410c",
        accent: "#fb923c",
        surface: "#ffffff",
        card: "#fff7ed",
        tint: "#ffedd5",
        text: "#431407",
        dark: "#1c1917",
        dark_alt: "#292524",
    },
    Theme {
        id: "charcoal",
        name: "Charcoal & Gold",
        primary: "#111827",
        background: "#374151",
        background_alt: "#111827",
        accent: "#f59e0b",
        surface: "#fafafa",
        card: "#f3f4f6",
        tint: "#fef3c7",
        text: "#111827",
        dark: "#111827",
        dark_alt: "#1f2937",
    },
];

/// Public summary returned by `GET /api/carousel`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub primary: &'static str,
    pub background: &'static str,
    pub background_alt: &'static str,
}

impl From<&Theme> for ThemeDescriptor {
    fn from(theme: &Theme) -> Self {
        ThemeDescriptor {
            id: theme.id,
            name: theme.name,
            primary: theme.primary,
            background: theme.background,
            background_alt: theme.background_alt,
        }
    }
}

pub fn default_theme() -> &'static Theme {
    THEMES
        .iter()
        .find(|t| t.id == DEFAULT_THEME_ID)
        .unwrap_or(&THEMES[0])
}

/// Looks up a preset by id. Unknown or missing ids fall back to the default.
pub fn resolve_theme(id: Option<&str>) -> &'static Theme {
    id.map(str::trim)
        .and_then(|id| THEMES.iter().find(|t| t.id.eq_ignore_ascii_case(id)))
        .unwrap_or_else(default_theme)
}

pub fn theme_descriptors() -> Vec<ThemeDescriptor> {
    THEMES.iter().map(ThemeDescriptor::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_linkedin() {
        assert_eq!(default_theme().id, DEFAULT_THEME_ID);
        assert_eq!(default_theme().primary, "#0077b5");
    }

    #[test]
    fn test_resolve_known_theme() {
        assert_eq!(resolve_theme(Some("sunset")).name, "Sunset");
        assert_eq!(resolve_theme(Some(" Emerald ")).id, "emerald");
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        assert_eq!(resolve_theme(Some("neon-pink")).id, DEFAULT_THEME_ID);
        assert_eq!(resolve_theme(None).id, DEFAULT_THEME_ID);
    }

    #[test]
    fn test_ids_unique() {
        let mut ids: Vec<_> = THEMES.iter().map(|t| t.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), THEMES.len());
    }

    #[test]
    fn test_descriptor_json_shape() {
        let value = serde_json::to_value(theme_descriptors()).unwrap();
        let first = &value[0];
        assert_eq!(first["id"], "linkedin");
        assert_eq!(first["backgroundAlt"], "#005582");
        assert_eq!(first.as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_colors_are_hex() {
        for t in &THEMES {
            for color in [
                t.primary, t.background, t.background_alt, t.accent, t.surface, t.card, t.tint,
                t.text, t.dark, t.dark_alt,
            ] {
                assert!(
                    color.len() == 7 && color.starts_with('#'),
                    "{} has bad color {color}",
                    t.id
                );
            }
        }
    }
}
