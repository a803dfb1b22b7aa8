//! Syntax highlighting
//!
//! This module provides the highlighting engine and everything it works
//! with:
//! - Style attributes and directives
//! - Highlight rules
//! - Styled text
//! - Themes and built-in presets

mod style;
mod styled;
mod rules;
mod highlight;
mod theme;
pub mod builtin;

pub use style::{
    Attribute, AttributeKey, Attributes, Color, Font, FontFamily, FontTraits, FontWeight,
    StyleDirective, Underline,
};
pub use styled::{StyleRun, StyledText};
pub use rules::{HighlightRule, RuleBuilder};
pub use highlight::{highlight, Highlighter};
pub use theme::Theme;
pub use builtin::Preset;
