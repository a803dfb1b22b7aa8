//! Markdown preset

use crate::error::Result;
use crate::syntax::rules::HighlightRule;
use crate::syntax::style::{FontTraits, StyleDirective, Underline};
use crate::syntax::theme::Theme;

/// Create the Markdown rule set
///
/// The `regex` crate has no look-around, so emphasis markers are matched
/// together with the character before them, the marker span is styled
/// through capture group 1 and a trailing `*` drops the span.
pub fn markdown(theme: &Theme) -> Result<Vec<HighlightRule>> {
    let code = StyleDirective::font(theme.code_font);
    let lighter = StyleDirective::foreground(theme.lighter);

    Ok(vec![
        HighlightRule::builder("inline_code", r"`[^`]*`")
            .directive(code)
            .build()?,
        // [^`] spans newlines, so blocks cover several lines
        HighlightRule::builder("code_block", r"```[^`]+```")
            .directive(code)
            .build()?,
        HighlightRule::builder("heading", r"^#{1,6}\s.*$")
            .multi_line()
            .directive(StyleDirective::traits(theme.heading_traits))
            .directive(StyleDirective::kern(theme.heading_kern))
            .build()?,
        HighlightRule::builder("link_or_image", r"!?\[([^\[\]]*)\]\((.*?)\)")
            .directive(StyleDirective::underline(Underline::Single))
            .build()?,
        HighlightRule::builder("bold", r"\*\*(?:[^*\n]|\*[^*\n])+\*\*|__(?:[^_\n]|_[^_\n])+__")
            .directive(StyleDirective::traits(FontTraits::bold()))
            .build()?,
        HighlightRule::builder("asterisk_emphasis", r"(?:^|[^*])(\*[^*\n]+\*)")
            .multi_line()
            .group(1)
            .not_followed_by('*')
            .directive(StyleDirective::traits(FontTraits::italic()))
            .build()?,
        HighlightRule::builder("underscore_emphasis", r"(?:^|[^_])(_[^_]+_)")
            .multi_line()
            .group(1)
            .not_followed_by('*')
            .directive(StyleDirective::traits(FontTraits::italic()))
            .build()?,
        HighlightRule::builder("bold_emphasis", r"\*\*\*[^*\n]+\*\*\*")
            .directive(StyleDirective::traits(FontTraits::bold().with_italic()))
            .build()?,
        HighlightRule::builder("blockquote", r"^>.*")
            .multi_line()
            .directive(StyleDirective::background(theme.secondary_background))
            .build()?,
        HighlightRule::builder("horizontal_rule", r"\n\n(-{3}|\*{3})\n")
            .directive(lighter)
            .build()?,
        HighlightRule::builder("unordered_list", r"^(\-|\*)\s")
            .multi_line()
            .directive(lighter)
            .build()?,
        HighlightRule::builder("ordered_list", r"^\d*\.\s")
            .multi_line()
            .directive(lighter)
            .build()?,
        HighlightRule::builder("button", r"<\s*button[^>]*>(.*?)<\s*/\s*button>")
            .directive(lighter)
            .build()?,
    ])
}
