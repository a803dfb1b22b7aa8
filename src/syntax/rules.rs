//! Highlight rules
//!
//! A rule pairs a compiled pattern with the style directives applied to
//! every span it matches. Patterns are compiled when the rule is built, so
//! a broken rule set fails before any text is highlighted.

use std::fmt;
use std::ops::Range;

use regex::{Regex, RegexBuilder};

use super::style::StyleDirective;
use crate::error::{Error, Result};

/// A pattern and the directives applied to its matches
#[derive(Clone)]
pub struct HighlightRule {
    /// Name for debugging
    name: String,
    /// Compiled regex pattern
    pattern: Regex,
    /// Directives applied, in order, to every match
    directives: Vec<StyleDirective>,
    /// Capture group to style instead of the whole match
    group: Option<usize>,
    /// Spans directly followed by this character are dropped
    not_followed_by: Option<char>,
}

impl HighlightRule {
    /// Create a rule with a single directive
    pub fn new(pattern: &str, directive: StyleDirective) -> Result<Self> {
        Self::builder(pattern, pattern).directive(directive).build()
    }

    /// Create a rule with several directives
    pub fn with_directives(pattern: &str, directives: Vec<StyleDirective>) -> Result<Self> {
        Self::builder(pattern, pattern).directives(directives).build()
    }

    /// Start building a named rule
    pub fn builder(name: &str, pattern: &str) -> RuleBuilder {
        RuleBuilder::new(name, pattern)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn directives(&self) -> &[StyleDirective] {
        &self.directives
    }

    pub fn group(&self) -> Option<usize> {
        self.group
    }

    pub fn not_followed_by(&self) -> Option<char> {
        self.not_followed_by
    }

    /// Byte spans this rule styles in `text`, in match order
    ///
    /// Matches are leftmost-first and never overlap. Empty spans, matches
    /// where the target group did not participate and spans followed by
    /// the guard character are skipped.
    pub fn spans<'t>(&'t self, text: &'t str) -> impl Iterator<Item = Range<usize>> + 't {
        let spans: Box<dyn Iterator<Item = Range<usize>> + 't> = match self.group {
            None => Box::new(self.pattern.find_iter(text).map(|m| m.range())),
            Some(group) => Box::new(
                self.pattern
                    .captures_iter(text)
                    .filter_map(move |caps| caps.get(group).map(|m| m.range())),
            ),
        };
        let guard = self.not_followed_by;
        spans.filter(move |span| {
            !span.is_empty() && guard.map_or(true, |ch| !text[span.end..].starts_with(ch))
        })
    }
}

impl fmt::Debug for HighlightRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HighlightRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("directives", &self.directives)
            .field("group", &self.group)
            .field("not_followed_by", &self.not_followed_by)
            .finish()
    }
}

/// Builder for `HighlightRule`
pub struct RuleBuilder {
    name: String,
    pattern: String,
    multi_line: bool,
    dot_matches_new_line: bool,
    case_insensitive: bool,
    group: Option<usize>,
    not_followed_by: Option<char>,
    directives: Vec<StyleDirective>,
}

impl RuleBuilder {
    fn new(name: &str, pattern: &str) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
            multi_line: false,
            dot_matches_new_line: false,
            case_insensitive: false,
            group: None,
            not_followed_by: None,
            directives: Vec::new(),
        }
    }

    /// `^` and `$` match at line boundaries
    pub fn multi_line(mut self) -> Self {
        self.multi_line = true;
        self
    }

    /// `.` also matches `\n`
    pub fn dot_matches_new_line(mut self) -> Self {
        self.dot_matches_new_line = true;
        self
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    /// Style capture group `group` instead of the whole match
    pub fn group(mut self, group: usize) -> Self {
        self.group = Some(group);
        self
    }

    /// Skip spans that are immediately followed by `ch`
    ///
    /// Stands in for a trailing negative look-ahead, which `regex` lacks.
    pub fn not_followed_by(mut self, ch: char) -> Self {
        self.not_followed_by = Some(ch);
        self
    }

    pub fn directive(mut self, directive: StyleDirective) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn directives(mut self, directives: impl IntoIterator<Item = StyleDirective>) -> Self {
        self.directives.extend(directives);
        self
    }

    /// Compile the pattern and validate the rule
    pub fn build(self) -> Result<HighlightRule> {
        let pattern = RegexBuilder::new(&self.pattern)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .case_insensitive(self.case_insensitive)
            .build()
            .map_err(|source| Error::InvalidPattern {
                pattern: self.pattern.clone(),
                source,
            })?;

        if self.directives.is_empty() {
            return Err(Error::NoDirectives(self.name));
        }

        if let Some(group) = self.group {
            // captures_len counts the implicit whole-match group
            let groups = pattern.captures_len() - 1;
            if group > groups {
                return Err(Error::InvalidGroup {
                    name: self.name,
                    group,
                    groups,
                });
            }
        }

        Ok(HighlightRule {
            name: self.name,
            pattern,
            directives: self.directives,
            group: self.group,
            not_followed_by: self.not_followed_by,
        })
    }
}
