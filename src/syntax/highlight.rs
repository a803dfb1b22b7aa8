//! The highlighting engine
//!
//! Every pass starts from plain text and applies each rule in order. Rules
//! always match against the original text, so earlier rules never change
//! what later rules see; their styles only meet in the output, where the
//! later rule wins for any key both set.

use tracing::{debug, trace};

use super::rules::HighlightRule;
use super::style::Font;
use super::styled::StyledText;

/// Highlights text with a fixed base font
///
/// The base font is what font-trait directives compose with when no rule
/// has set a font on a span yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Highlighter {
    base_font: Font,
}

impl Highlighter {
    pub fn new(base_font: Font) -> Self {
        Self { base_font }
    }

    pub fn base_font(&self) -> Font {
        self.base_font
    }

    /// Style `text` with `rules`
    ///
    /// Pure and total: identical inputs give identical output, and empty
    /// text or an empty rule list gives plain text.
    pub fn highlight(&self, text: &str, rules: &[HighlightRule]) -> StyledText {
        let mut styled = StyledText::plain(text);

        for rule in rules {
            let mut matches = 0usize;
            for span in rule.spans(text) {
                styled.apply(span, rule.directives(), self.base_font);
                matches += 1;
            }
            trace!(rule = rule.name(), matches, "applied rule");
        }

        styled.normalize();
        debug!(
            len = text.len(),
            rules = rules.len(),
            runs = styled.runs().len(),
            "highlighted text"
        );
        styled
    }
}

/// Style `text` with `rules` using the default body font as base
pub fn highlight(text: &str, rules: &[HighlightRule]) -> StyledText {
    Highlighter::default().highlight(text, rules)
}
