//! Link detection
//!
//! Finds the link-like spans a user can activate: Markdown links and
//! images (`[label](target)`) and bare URLs.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

/// A detected link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Where the link points
    pub target: String,
    /// Byte range of the whole link in the text
    pub range: Range<usize>,
}

impl Link {
    /// The text the link covers
    pub fn display_text<'t>(&self, text: &'t str) -> &'t str {
        text.get(self.range.clone()).unwrap_or("")
    }
}

fn markdown_link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"!?\[[^\[\]]*\]\(([^()\s]*)\)").expect("markdown link pattern is valid")
    })
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)\b(?:https?://|mailto:)[^\s<>()\[\]"'`]+"#).expect("url pattern is valid")
    })
}

/// Find every link in `text`, ordered by position
///
/// URLs inside a Markdown link belong to that link and are not reported
/// separately.
pub fn detect(text: &str) -> Vec<Link> {
    let mut links: Vec<Link> = markdown_link_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let target = caps.get(1)?;
            Some(Link {
                target: target.as_str().to_string(),
                range: whole.range(),
            })
        })
        .collect();

    let bare: Vec<Link> = url_regex()
        .find_iter(text)
        .filter(|m| {
            !links
                .iter()
                .any(|link| link.range.start <= m.start() && m.end() <= link.range.end)
        })
        .map(|m| {
            let url = m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?']);
            Link {
                target: url.to_string(),
                range: m.start()..m.start() + url.len(),
            }
        })
        .collect();

    links.extend(bare);
    links.sort_by_key(|link| link.range.start);
    links
}

/// The link covering a byte offset, if any
pub fn link_at(text: &str, offset: usize) -> Option<Link> {
    detect(text)
        .into_iter()
        .find(|link| link.range.contains(&offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_link() {
        let text = "see [docs](https://example.com/docs) now";
        let links = detect(text);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "https://example.com/docs");
        assert_eq!(links[0].display_text(text), "[docs](https://example.com/docs)");
    }

    #[test]
    fn test_custom_scheme() {
        let links = detect("[note](note:42)");
        assert_eq!(links[0].target, "note:42");
        assert_eq!(links[0].range, 0..15);
    }

    #[test]
    fn test_bare_url() {
        let text = "visit http://x.org/a, then leave.";
        let links = detect(text);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "http://x.org/a");
        assert_eq!(links[0].display_text(text), "http://x.org/a");
    }

    #[test]
    fn test_ordering() {
        let text = "https://a.io and [b](https://b.io)";
        let targets: Vec<_> = detect(text).into_iter().map(|l| l.target).collect();
        assert_eq!(targets, vec!["https://a.io", "https://b.io"]);
    }

    #[test]
    fn test_link_at() {
        let text = "x [y](z) w";
        assert_eq!(link_at(text, 3).map(|l| l.target), Some("z".to_string()));
        assert_eq!(link_at(text, 0), None);
        assert_eq!(link_at(text, 8), None);
    }
}
