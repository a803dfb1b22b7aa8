//! highlighted-editor - a text editor component that highlights as you type
//!
//! The editor keeps a document's text in a [`TextBinding`], re-runs an
//! ordered list of [`HighlightRule`]s over the whole text after every
//! change, and hands the resulting [`StyledText`] to a [`TextHost`], the
//! platform widget the user actually types into.
//!
//! ```no_run
//! use highlighted_editor::syntax::{builtin, Theme};
//! use highlighted_editor::{EditorBuilder, TextBinding};
//! # fn demo<H: highlighted_editor::TextHost>(host: H) -> highlighted_editor::Result<()> {
//! let rules = builtin::markdown(&Theme::default())?;
//! let mut editor = EditorBuilder::new(TextBinding::new("# Notes"), rules)
//!     .on_link_click(|target, _, _| !target.starts_with("app://"))
//!     .build(host)?;
//! editor.set_text("# Notes\n\nSome *emphasis*.")?;
//! # Ok(())
//! # }
//! ```

pub mod binding;
pub mod buffer;
pub mod config;
pub mod display;
pub mod editor;
pub mod error;
pub mod host;
pub mod input;
pub mod links;
pub mod syntax;
pub mod terminal;

pub use binding::TextBinding;
pub use editor::{Editor, EditorBuilder, Phase};
pub use error::{Error, Result};
pub use host::{HostEvent, TextHost};
pub use links::Link;
pub use syntax::{highlight, HighlightRule, StyleDirective, StyledText, Theme};
