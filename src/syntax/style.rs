//! Style types for highlighted text
//!
//! This module provides the attribute model that highlight rules write
//! into styled text: colors, fonts, font traits, underline and kerning.

/// Text colors
///
/// The named variants follow the ANSI 16-color palette so terminal hosts
/// can render them directly; `Rgb` covers everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a color from a config name (`"bright-black"`, `"light_gray"`, `"#1e1e2e"`)
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase().replace('_', "-");
        if let Some(hex) = name.strip_prefix('#') {
            return parse_hex(hex);
        }
        let color = match name.as_str() {
            "default" => Color::Default,
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" | "light-gray" | "light-grey" => Color::White,
            "bright-black" | "gray" | "grey" => Color::BrightBlack,
            "bright-red" => Color::BrightRed,
            "bright-green" => Color::BrightGreen,
            "bright-yellow" => Color::BrightYellow,
            "bright-blue" => Color::BrightBlue,
            "bright-magenta" => Color::BrightMagenta,
            "bright-cyan" => Color::BrightCyan,
            "bright-white" => Color::BrightWhite,
            _ => return None,
        };
        Some(color)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Font family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFamily {
    /// Proportional body text
    #[default]
    Body,
    /// Fixed-width code text
    Monospace,
}

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    Thin,
    #[default]
    Regular,
}

/// Symbolic font traits
///
/// Traits compose: applying traits to a font adds them to the traits the
/// font already has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FontTraits {
    pub bold: bool,
    pub italic: bool,
    /// Wider letterforms (used for headings)
    pub expanded: bool,
}

impl FontTraits {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Default::default()
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Default::default()
        }
    }

    /// Builder: add bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: add italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: add expanded
    pub fn with_expanded(mut self) -> Self {
        self.expanded = true;
        self
    }

    /// Traits present in either set
    pub fn union(self, other: Self) -> Self {
        Self {
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            expanded: self.expanded || other.expanded,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A font description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Font {
    pub family: FontFamily,
    pub weight: FontWeight,
    pub traits: FontTraits,
}

impl Font {
    /// Thin monospace font used for code
    pub fn monospace() -> Self {
        Self {
            family: FontFamily::Monospace,
            weight: FontWeight::Thin,
            traits: FontTraits::default(),
        }
    }

    /// This font with `traits` added to its own
    pub fn with_traits(mut self, traits: FontTraits) -> Self {
        self.traits = self.traits.union(traits);
        self
    }
}

/// Underline style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Underline {
    Single,
    Double,
}

/// The dimension of style an attribute sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    Font,
    Foreground,
    Background,
    Underline,
    /// Letter spacing
    Kern,
}

/// A single style key with its value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attribute {
    Font(Font),
    Foreground(Color),
    Background(Color),
    Underline(Underline),
    Kern(f32),
}

impl Attribute {
    pub fn key(&self) -> AttributeKey {
        match self {
            Attribute::Font(_) => AttributeKey::Font,
            Attribute::Foreground(_) => AttributeKey::Foreground,
            Attribute::Background(_) => AttributeKey::Background,
            Attribute::Underline(_) => AttributeKey::Underline,
            Attribute::Kern(_) => AttributeKey::Kern,
        }
    }
}

/// One instruction of a highlight rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleDirective {
    /// Set a key to a value, replacing any previous value for that key
    Set(Attribute),
    /// Add traits to the font already in place
    Traits(FontTraits),
}

impl StyleDirective {
    pub fn font(font: Font) -> Self {
        StyleDirective::Set(Attribute::Font(font))
    }

    pub fn foreground(color: Color) -> Self {
        StyleDirective::Set(Attribute::Foreground(color))
    }

    pub fn background(color: Color) -> Self {
        StyleDirective::Set(Attribute::Background(color))
    }

    pub fn underline(style: Underline) -> Self {
        StyleDirective::Set(Attribute::Underline(style))
    }

    pub fn kern(kern: f32) -> Self {
        StyleDirective::Set(Attribute::Kern(kern))
    }

    pub fn traits(traits: FontTraits) -> Self {
        StyleDirective::Traits(traits)
    }

    /// The key this directive writes
    pub fn key(&self) -> AttributeKey {
        match self {
            StyleDirective::Set(attr) => attr.key(),
            StyleDirective::Traits(_) => AttributeKey::Font,
        }
    }
}

/// The attributes in effect over a run of text, at most one value per key
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Attributes {
    pub font: Option<Font>,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub underline: Option<Underline>,
    pub kern: Option<f32>,
}

impl Attributes {
    /// Set one attribute, replacing the previous value for its key
    pub fn set(&mut self, attr: Attribute) {
        match attr {
            Attribute::Font(font) => self.font = Some(font),
            Attribute::Foreground(color) => self.foreground = Some(color),
            Attribute::Background(color) => self.background = Some(color),
            Attribute::Underline(style) => self.underline = Some(style),
            Attribute::Kern(kern) => self.kern = Some(kern),
        }
    }

    /// Look up the value for a key
    pub fn get(&self, key: AttributeKey) -> Option<Attribute> {
        match key {
            AttributeKey::Font => self.font.map(Attribute::Font),
            AttributeKey::Foreground => self.foreground.map(Attribute::Foreground),
            AttributeKey::Background => self.background.map(Attribute::Background),
            AttributeKey::Underline => self.underline.map(Attribute::Underline),
            AttributeKey::Kern => self.kern.map(Attribute::Kern),
        }
    }

    /// Apply a directive; trait directives compose with the current font,
    /// or with `base_font` when no font is set yet
    pub fn apply(&mut self, directive: &StyleDirective, base_font: Font) {
        match directive {
            StyleDirective::Set(attr) => self.set(*attr),
            StyleDirective::Traits(traits) => {
                let font = self.font.unwrap_or(base_font);
                self.font = Some(font.with_traits(*traits));
            }
        }
    }

    /// Check if no attribute is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_default() {
        let attrs = Attributes::default();
        assert!(attrs.is_empty());
        assert_eq!(attrs.get(AttributeKey::Font), None);
    }

    #[test]
    fn test_set_replaces_same_key() {
        let mut attrs = Attributes::default();
        attrs.set(Attribute::Foreground(Color::Red));
        attrs.set(Attribute::Foreground(Color::Blue));
        attrs.set(Attribute::Background(Color::Black));
        assert_eq!(attrs.foreground, Some(Color::Blue));
        assert_eq!(attrs.background, Some(Color::Black));
    }

    #[test]
    fn test_traits_compose_with_font() {
        let mut attrs = Attributes::default();
        attrs.apply(&StyleDirective::font(Font::monospace()), Font::default());
        attrs.apply(&StyleDirective::traits(FontTraits::bold()), Font::default());
        attrs.apply(&StyleDirective::traits(FontTraits::italic()), Font::default());

        let font = attrs.font.unwrap();
        assert_eq!(font.family, FontFamily::Monospace);
        assert!(font.traits.bold);
        assert!(font.traits.italic);
        assert!(!font.traits.expanded);
    }

    #[test]
    fn test_traits_use_base_font_when_unset() {
        let mut attrs = Attributes::default();
        let base = Font {
            weight: FontWeight::Thin,
            ..Default::default()
        };
        attrs.apply(&StyleDirective::traits(FontTraits::italic()), base);
        assert_eq!(attrs.font.unwrap().weight, FontWeight::Thin);
        assert!(attrs.font.unwrap().traits.italic);
    }

    #[test]
    fn test_font_directive_replaces_traits() {
        let mut attrs = Attributes::default();
        attrs.apply(&StyleDirective::traits(FontTraits::bold()), Font::default());
        attrs.apply(&StyleDirective::font(Font::monospace()), Font::default());
        assert!(attrs.font.unwrap().traits.is_empty());
    }

    #[test]
    fn test_color_from_name() {
        assert_eq!(Color::from_name("bright-black"), Some(Color::BrightBlack));
        assert_eq!(Color::from_name("Light_Gray"), Some(Color::White));
        assert_eq!(Color::from_name("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(Color::from_name("#ff80"), None);
        assert_eq!(Color::from_name("mauve"), None);
    }
}
