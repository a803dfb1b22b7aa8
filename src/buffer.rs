//! Raw text storage for the terminal host
//!
//! The buffer is the host-side copy of the document: the text exactly as
//! the user typed it, the caret, and the file it came from.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use unicode_width::UnicodeWidthChar;

/// Display width of a char, expanding tabs to the next stop
fn char_width(ch: char, col: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        tab_width - col % tab_width
    } else {
        UnicodeWidthChar::width(ch).unwrap_or(1)
    }
}

/// Display column of `offset` within the line that starts at `line_start`
pub fn display_col(text: &str, line_start: usize, offset: usize, tab_width: usize) -> usize {
    text[line_start..offset]
        .chars()
        .fold(0, |col, ch| col + char_width(ch, col, tab_width))
}

/// Byte offset in `text[line]` closest to display column `col` without passing it
pub fn offset_for_col(text: &str, line: std::ops::Range<usize>, col: usize, tab_width: usize) -> usize {
    let mut current = 0;
    for (idx, ch) in text[line.clone()].char_indices() {
        let width = char_width(ch, current, tab_width);
        if current + width > col {
            return line.start + idx;
        }
        current += width;
    }
    line.end
}

/// A document being edited in the terminal
#[derive(Debug, Default)]
pub struct Buffer {
    /// Raw text
    text: String,
    /// Caret as a byte offset, always on a char boundary
    caret: usize,
    /// Associated file path (None for unnamed buffers)
    filename: Option<PathBuf>,
    /// Whether buffer has unsaved changes
    modified: bool,
}

impl Buffer {
    /// Create a buffer holding `text`, caret at the start
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Create a buffer from file contents; a missing file gives an empty
    /// buffer that will be created on save
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e),
        };
        Ok(Self {
            text,
            caret: 0,
            filename: Some(path.to_path_buf()),
            modified: false,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Move the caret, clamped onto a char boundary
    pub fn set_caret(&mut self, offset: usize) {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        self.caret = offset;
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Get buffer name for the status line
    pub fn name(&self) -> String {
        self.filename
            .as_ref()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "*scratch*".to_string())
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Replace the text without marking the buffer modified
    pub fn replace(&mut self, text: &str) {
        self.text = text.to_string();
        self.set_caret(self.caret);
    }

    /// Insert a character at the caret
    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.caret, ch);
        self.caret += ch.len_utf8();
        self.modified = true;
    }

    /// Delete the char before the caret (backspace)
    pub fn delete_backward(&mut self) -> Option<char> {
        let ch = self.text[..self.caret].chars().next_back()?;
        self.caret -= ch.len_utf8();
        self.text.remove(self.caret);
        self.modified = true;
        Some(ch)
    }

    /// Delete the char under the caret
    pub fn delete_forward(&mut self) -> Option<char> {
        if self.caret >= self.text.len() {
            return None;
        }
        let ch = self.text.remove(self.caret);
        self.modified = true;
        Some(ch)
    }

    pub fn move_left(&mut self) {
        if let Some(ch) = self.text[..self.caret].chars().next_back() {
            self.caret -= ch.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(ch) = self.text[self.caret..].chars().next() {
            self.caret += ch.len_utf8();
        }
    }

    /// Byte range of the line containing `offset`, without its newline
    pub fn line_range(&self, offset: usize) -> std::ops::Range<usize> {
        let start = self.text[..offset].rfind('\n').map_or(0, |i| i + 1);
        let end = self.text[offset..].find('\n').map_or(self.text.len(), |i| offset + i);
        start..end
    }

    pub fn move_to_bol(&mut self) {
        self.caret = self.line_range(self.caret).start;
    }

    pub fn move_to_eol(&mut self) {
        self.caret = self.line_range(self.caret).end;
    }

    /// Move to the previous line, keeping the display column where possible
    pub fn move_up(&mut self, tab_width: usize) {
        let line = self.line_range(self.caret);
        if line.start == 0 {
            return;
        }
        let col = display_col(&self.text, line.start, self.caret, tab_width);
        let prev = self.line_range(line.start - 1);
        self.caret = offset_for_col(&self.text, prev, col, tab_width);
    }

    /// Move to the next line, keeping the display column where possible
    pub fn move_down(&mut self, tab_width: usize) {
        let line = self.line_range(self.caret);
        if line.end >= self.text.len() {
            return;
        }
        let col = display_col(&self.text, line.start, self.caret, tab_width);
        let next = self.line_range(line.end + 1);
        self.caret = offset_for_col(&self.text, next, col, tab_width);
    }

    /// Write buffer to its file
    pub fn save(&mut self) -> io::Result<&Path> {
        let path = self
            .filename
            .as_deref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "No filename set"))?;
        fs::write(path, &self.text)?;
        self.modified = false;
        Ok(path)
    }
}
