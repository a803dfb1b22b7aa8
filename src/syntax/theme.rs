//! Themes for built-in presets
//!
//! A theme holds the fonts and colors presets style with, so rule sets do
//! not depend on any global appearance settings.

use tracing::warn;

use super::style::{Color, Font, FontTraits};

/// Fonts and colors used by preset rule sets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Font for ordinary text; trait directives compose with it
    pub body_font: Font,
    /// Font for inline code and code blocks
    pub code_font: Font,
    /// Traits added to headings
    pub heading_traits: FontTraits,
    /// Letter spacing for headings
    pub heading_kern: f32,
    /// Background behind blockquotes
    pub secondary_background: Color,
    /// Foreground for list markers, rules and other low-emphasis text
    pub lighter: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            body_font: Font::default(),
            code_font: Font::monospace(),
            heading_traits: FontTraits::bold().with_expanded(),
            heading_kern: 0.5,
            secondary_background: Color::BrightBlack,
            lighter: Color::White,
        }
    }
}

impl Theme {
    /// Build a theme from a `[theme]` TOML table, keeping defaults for
    /// missing or malformed keys
    pub fn from_table(table: &toml::Table) -> Self {
        let mut theme = Self::default();

        if let Some(color) = color_setting(table, "secondary-background") {
            theme.secondary_background = color;
        }

        if let Some(color) = color_setting(table, "lighter") {
            theme.lighter = color;
        }

        match table.get("kern") {
            Some(toml::Value::Float(kern)) => theme.heading_kern = *kern as f32,
            Some(toml::Value::Integer(kern)) => theme.heading_kern = *kern as f32,
            Some(other) => warn!(value = %other, "ignoring non-numeric theme kern"),
            None => {}
        }

        if let Some(toml::Value::Boolean(expanded)) = table.get("expanded-headings") {
            theme.heading_traits.expanded = *expanded;
        }

        theme
    }
}

fn color_setting(table: &toml::Table, key: &str) -> Option<Color> {
    let value = table.get(key)?;
    let parsed = value.as_str().and_then(Color::from_name);
    if parsed.is_none() {
        warn!(key, value = %value, "ignoring unknown theme color");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = Theme::default();
        assert!(theme.heading_traits.bold);
        assert!(theme.heading_traits.expanded);
        assert_eq!(theme.heading_kern, 0.5);
        assert_ne!(theme.code_font, theme.body_font);
    }

    #[test]
    fn test_from_table() {
        let table: toml::Table = r##"
secondary-background = "#202020"
lighter = "bright-black"
kern = 1
expanded-headings = false
        "##
        .parse()
        .unwrap();

        let theme = Theme::from_table(&table);
        assert_eq!(theme.secondary_background, Color::Rgb(0x20, 0x20, 0x20));
        assert_eq!(theme.lighter, Color::BrightBlack);
        assert_eq!(theme.heading_kern, 1.0);
        assert!(!theme.heading_traits.expanded);
        assert!(theme.heading_traits.bold);
    }

    #[test]
    fn test_from_table_ignores_bad_values() {
        let table: toml::Table = r#"
lighter = "chartreuse-ish"
kern = "wide"
        "#
        .parse()
        .unwrap();

        assert_eq!(Theme::from_table(&table), Theme::default());
    }
}
