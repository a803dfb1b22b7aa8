//! Configuration file support
//!
//! Loads settings from ~/.hledit.toml (or %USERPROFILE%\.hledit.toml on Windows)
//!
//! Example:
//! ```toml
//! preset = "markdown"
//! tab-width = 4
//!
//! [theme]
//! secondary-background = "#303030"
//! lighter = "bright-black"
//! kern = 0.5
//! expanded-headings = true
//! ```
//!
//! Rules themselves are not configurable; the file only picks a preset and
//! tunes its theme.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::syntax::{Preset, Theme};

/// Configuration settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Rule preset to highlight with
    pub preset: Preset,
    /// Tab width for display
    pub tab_width: usize,
    /// Fonts and colors for the preset
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preset: Preset::Markdown,
            tab_width: 4,
            theme: Theme::default(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".hledit.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".hledit.toml"))
        }
    }

    /// Load configuration from the default path
    ///
    /// A missing file gives the defaults; a malformed one is logged and
    /// also gives the defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring config file");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let settings = Self::parse(&contents)?;
        let mut config = Config::default();
        config.apply(&settings)?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Parse config file contents into a TOML table
    fn parse(contents: &str) -> Result<toml::Table> {
        contents
            .parse::<toml::Table>()
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Apply settings from a parsed config
    fn apply(&mut self, settings: &toml::Table) -> Result<()> {
        if let Some(value) = settings.get("preset") {
            let name = value
                .as_str()
                .ok_or_else(|| Error::Config(format!("preset must be a string, got {value}")))?;
            self.preset = Preset::from_name(name)?;
        }

        if let Some(value) = settings.get("tab-width") {
            if let Some(n) = value.as_integer() {
                self.tab_width = n.clamp(1, 16) as usize; // Between 1 and 16
            }
        }

        if let Some(toml::Value::Table(theme)) = settings.get("theme") {
            self.theme = Theme::from_table(theme);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Color;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
preset = "markdown"
tab-width = 2

[theme]
lighter = "bright-black"
        "#;

        let settings = Config::parse(contents).unwrap();
        let mut config = Config::default();
        config.apply(&settings).unwrap();

        assert_eq!(config.preset, Preset::Markdown);
        assert_eq!(config.tab_width, 2);
        assert_eq!(config.theme.lighter, Color::BrightBlack);
    }

    #[test]
    fn test_tab_width_clamped() {
        let settings = Config::parse("tab-width = 99").unwrap();
        let mut config = Config::default();
        config.apply(&settings).unwrap();
        assert_eq!(config.tab_width, 16);
    }

    #[test]
    fn test_unknown_preset() {
        let settings = Config::parse(r#"preset = "asciidoc""#).unwrap();
        let mut config = Config::default();
        assert!(matches!(config.apply(&settings), Err(Error::UnknownPreset(_))));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(Config::parse("preset = "), Err(Error::Config(_))));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let settings = Config::parse("auto-save = true").unwrap();
        let mut config = Config::default();
        config.apply(&settings).unwrap();
        assert_eq!(config, Config::default());
    }
}
