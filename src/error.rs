//! Error types for the highlighted editor

use thiserror::Error;

/// Result type alias for editor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Editor error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule {0:?} has no style directives")]
    NoDirectives(String),

    #[error("rule {name:?} targets group {group} but its pattern has {groups} groups")]
    InvalidGroup {
        name: String,
        group: usize,
        groups: usize,
    },

    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
