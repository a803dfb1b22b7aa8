//! The text host contract
//!
//! A host is the platform's editable text widget. It owns the raw text the
//! user types into, the caret, and the surface styled text is drawn on. The
//! editor drives it through `TextHost`; the host reports user activity back
//! as `HostEvent`s.

use std::ops::Range;

use crate::error::Result;
use crate::links::Link;
use crate::syntax::StyledText;

/// An editable text widget
pub trait TextHost {
    /// The widget's current raw text
    fn text(&self) -> &str;

    /// Replace the widget's raw text without reporting an edit
    fn replace_text(&mut self, text: &str);

    /// Current selection as a byte range (empty for a plain caret)
    fn selection(&self) -> Range<usize>;

    fn set_selection(&mut self, selection: Range<usize>);

    /// Display `styled`, replacing whatever was shown before
    fn render(&mut self, styled: &StyledText) -> Result<()>;

    /// Default handling for an activated link
    fn follow_link(&mut self, _link: &Link) -> Result<()> {
        Ok(())
    }
}

/// User activity reported by a host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The user edited the text; carries the widget's new raw text
    TextChanged(String),
    /// Interactive editing started (focus gained)
    EditingBegan,
    /// Interactive editing stopped (focus lost)
    EditingEnded,
    /// The user activated whatever link covers this byte offset
    LinkActivated { offset: usize },
}
