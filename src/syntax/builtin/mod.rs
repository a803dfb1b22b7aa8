//! Built-in rule presets
//!
//! This module provides named, ordered rule sets for common markup
//! dialects.

mod markdown;

pub use markdown::markdown;

use super::rules::HighlightRule;
use super::theme::Theme;
use crate::error::{Error, Result};

/// A named preset rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Markdown,
}

impl Preset {
    /// Every built-in preset
    pub const ALL: [Preset; 1] = [Preset::Markdown];

    /// Get the preset's name (as used in config files)
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Markdown => "markdown",
        }
    }

    /// Look up a preset by name, case-insensitively
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| Error::UnknownPreset(name.to_string()))
    }

    /// Build the preset's rules for a theme
    pub fn rules(&self, theme: &Theme) -> Result<Vec<HighlightRule>> {
        match self {
            Preset::Markdown => markdown(theme),
        }
    }
}
