//! Styled text
//!
//! A `StyledText` pairs a document's text with attribute runs. Runs are
//! contiguous, never overlap, and cover the whole text, so every byte
//! carries at most one value per attribute key.

use std::ops::Range;

use super::style::{Attribute, AttributeKey, Attributes, Font, StyleDirective};

/// A run of text sharing one set of attributes
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRun {
    /// Byte range of the run
    pub range: Range<usize>,
    pub attributes: Attributes,
}

/// Text plus its style runs
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledText {
    text: String,
    runs: Vec<StyleRun>,
}

impl StyledText {
    /// Unstyled text: a single empty-attribute run, or none for empty text
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        let runs = if text.is_empty() {
            Vec::new()
        } else {
            vec![StyleRun {
                range: 0..text.len(),
                attributes: Attributes::default(),
            }]
        };
        Self { text, runs }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn runs(&self) -> &[StyleRun] {
        &self.runs
    }

    /// Check whether no run carries any attribute
    pub fn is_plain(&self) -> bool {
        self.runs.iter().all(|run| run.attributes.is_empty())
    }

    /// Attributes in effect at a byte offset
    pub fn attributes_at(&self, offset: usize) -> Option<&Attributes> {
        self.run_index(offset).map(|idx| &self.runs[idx].attributes)
    }

    /// The value of `key` if it is the same across the whole `range`
    ///
    /// Returns `None` when the key is unset anywhere in the range or
    /// varies inside it.
    pub fn uniform(&self, range: Range<usize>, key: AttributeKey) -> Option<Attribute> {
        if range.start >= range.end || range.end > self.text.len() {
            return None;
        }
        let mut value = None;
        for run in &self.runs {
            if run.range.end <= range.start || run.range.start >= range.end {
                continue;
            }
            let current = run.attributes.get(key)?;
            match value {
                None => value = Some(current),
                Some(previous) if previous == current => {}
                Some(_) => return None,
            }
        }
        value
    }

    /// Convert a byte range into a character range
    ///
    /// Offsets past the end or inside a character snap back to the nearest
    /// preceding boundary.
    pub fn char_range(&self, range: Range<usize>) -> Range<usize> {
        let to_chars = |offset: usize| {
            let mut offset = offset.min(self.text.len());
            while !self.text.is_char_boundary(offset) {
                offset -= 1;
            }
            self.text[..offset].chars().count()
        };
        to_chars(range.start)..to_chars(range.end)
    }

    /// Apply directives, in order, to every run inside `range`
    pub(crate) fn apply(&mut self, range: Range<usize>, directives: &[StyleDirective], base_font: Font) {
        let start = range.start.min(self.text.len());
        let end = range.end.min(self.text.len());
        if start >= end {
            return;
        }
        self.split_at(start);
        self.split_at(end);
        for run in self
            .runs
            .iter_mut()
            .skip_while(|run| run.range.start < start)
            .take_while(|run| run.range.end <= end)
        {
            for directive in directives {
                run.attributes.apply(directive, base_font);
            }
        }
    }

    /// Merge neighbouring runs whose attributes are equal
    pub(crate) fn normalize(&mut self) {
        let mut merged: Vec<StyleRun> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            match merged.last_mut() {
                Some(last) if last.attributes == run.attributes => last.range.end = run.range.end,
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }

    /// Index of the run containing a byte offset
    fn run_index(&self, offset: usize) -> Option<usize> {
        if offset >= self.text.len() {
            return None;
        }
        let idx = self.runs.partition_point(|run| run.range.end <= offset);
        (idx < self.runs.len()).then_some(idx)
    }

    /// Ensure a run boundary exists at `offset`
    fn split_at(&mut self, offset: usize) {
        let Some(idx) = self.run_index(offset) else {
            return;
        };
        let run = &mut self.runs[idx];
        if run.range.start == offset {
            return;
        }
        let tail = StyleRun {
            range: offset..run.range.end,
            attributes: run.attributes,
        };
        run.range.end = offset;
        self.runs.insert(idx + 1, tail);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::style::Color;

    #[test]
    fn test_plain_text() {
        let styled = StyledText::plain("hello");
        assert!(styled.is_plain());
        assert_eq!(styled.runs().len(), 1);
        assert_eq!(styled.runs()[0].range, 0..5);

        let empty = StyledText::plain("");
        assert!(empty.runs().is_empty());
        assert!(empty.is_plain());
    }

    #[test]
    fn test_apply_splits_runs() {
        let mut styled = StyledText::plain("hello world");
        styled.apply(6..11, &[StyleDirective::foreground(Color::Red)], Font::default());

        assert_eq!(styled.runs().len(), 2);
        assert_eq!(styled.runs()[0].range, 0..6);
        assert!(styled.runs()[0].attributes.is_empty());
        assert_eq!(styled.runs()[1].range, 6..11);
        assert_eq!(styled.runs()[1].attributes.foreground, Some(Color::Red));
    }

    #[test]
    fn test_runs_cover_text() {
        let mut styled = StyledText::plain("abcdefghij");
        styled.apply(2..5, &[StyleDirective::foreground(Color::Red)], Font::default());
        styled.apply(4..8, &[StyleDirective::background(Color::Blue)], Font::default());

        let mut expected_start = 0;
        for run in styled.runs() {
            assert_eq!(run.range.start, expected_start);
            assert!(run.range.start < run.range.end);
            expected_start = run.range.end;
        }
        assert_eq!(expected_start, 10);

        let overlap = styled.attributes_at(4).unwrap();
        assert_eq!(overlap.foreground, Some(Color::Red));
        assert_eq!(overlap.background, Some(Color::Blue));
    }

    #[test]
    fn test_normalize_merges_equal_runs() {
        let mut styled = StyledText::plain("abcdef");
        styled.apply(0..3, &[StyleDirective::foreground(Color::Red)], Font::default());
        styled.apply(3..6, &[StyleDirective::foreground(Color::Red)], Font::default());
        assert_eq!(styled.runs().len(), 2);
        styled.normalize();
        assert_eq!(styled.runs().len(), 1);
        assert_eq!(styled.runs()[0].range, 0..6);
    }

    #[test]
    fn test_uniform() {
        let mut styled = StyledText::plain("abcdef");
        styled.apply(1..4, &[StyleDirective::foreground(Color::Red)], Font::default());

        assert_eq!(
            styled.uniform(1..4, AttributeKey::Foreground),
            Some(Attribute::Foreground(Color::Red))
        );
        assert_eq!(styled.uniform(0..4, AttributeKey::Foreground), None);
        assert_eq!(styled.uniform(1..4, AttributeKey::Background), None);
    }

    #[test]
    fn test_char_range() {
        let styled = StyledText::plain("héllo");
        assert_eq!(styled.char_range(0..3), 0..2);
        assert_eq!(styled.char_range(3..6), 2..5);
    }

    #[test]
    fn test_char_range_inside_char() {
        let styled = StyledText::plain("é");
        assert_eq!(styled.char_range(1..2), 0..1);
        assert_eq!(styled.char_range(0..9), 0..1);
    }
}
