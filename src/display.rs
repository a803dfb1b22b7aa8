//! Display rendering and the terminal host
//!
//! `TerminalHost` is the crossterm adapter for `TextHost`: it keeps the raw
//! text in a `Buffer`, turns key and focus events into host events, and
//! draws whatever styled text the editor hands it.

use std::ops::Range;

use tracing::debug;

use crate::buffer::{display_col, Buffer};
use crate::error::Result;
use crate::host::{HostEvent, TextHost};
use crate::input::{translate_key, Action};
use crate::links::Link;
use crate::syntax::{Attributes, StyledText};
use crate::terminal::{Terminal, TerminalEvent};

/// Byte ranges of each line in `text`, without newlines
///
/// Always yields at least one (possibly empty) line.
pub fn line_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;
    for (idx, _) in text.match_indices('\n') {
        ranges.push(start..idx);
        start = idx + 1;
    }
    ranges.push(start..text.len());
    ranges
}

/// The styled pieces of one line, in order
pub fn line_segments(styled: &StyledText, line: Range<usize>) -> Vec<(Range<usize>, Attributes)> {
    styled
        .runs()
        .iter()
        .filter(|run| run.range.start < line.end && run.range.end > line.start)
        .map(|run| {
            let start = run.range.start.max(line.start);
            let end = run.range.end.min(line.end);
            (start..end, run.attributes)
        })
        .collect()
}

/// First visible line after scrolling just enough to show `line`
pub fn scroll_to(top: usize, line: usize, height: usize) -> usize {
    if height == 0 || line < top {
        line
    } else if line >= top + height {
        line + 1 - height
    } else {
        top
    }
}

/// Display state
pub struct Display {
    /// First line shown
    top_line: usize,
    /// Tab width for display
    tab_width: usize,
    /// Message to show in the status line
    message: Option<String>,
}

impl Display {
    pub fn new(tab_width: usize) -> Self {
        Self {
            top_line: 0,
            tab_width: tab_width.max(1),
            message: None,
        }
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Set a message to display
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    /// Clear the message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Draw `styled` with the caret from `buffer`
    pub fn render(&mut self, terminal: &mut Terminal, buffer: &Buffer, styled: &StyledText) -> Result<()> {
        let cols = terminal.cols() as usize;
        let height = terminal.rows().saturating_sub(1) as usize;
        let text = styled.text();
        let lines = line_ranges(text);

        let caret = buffer.caret().min(text.len());
        let caret_line = text[..caret].matches('\n').count();
        self.top_line = scroll_to(self.top_line, caret_line, height);

        terminal.set_cursor_visible(false)?;
        for row in 0..height {
            terminal.move_cursor(row as u16, 0)?;
            if let Some(line) = lines.get(self.top_line + row) {
                self.render_line(terminal, styled, line.clone(), cols)?;
            }
            terminal.reset_attributes()?;
            terminal.clear_to_eol()?;
        }

        self.render_status(terminal, buffer, height as u16, cols)?;

        if let Some(line) = lines.get(caret_line) {
            let col = display_col(text, line.start, caret, self.tab_width);
            let row = caret_line - self.top_line;
            terminal.move_cursor(row as u16, col.min(cols.saturating_sub(1)) as u16)?;
        }
        terminal.set_cursor_visible(true)?;
        terminal.flush()
    }

    /// Draw one line's segments, expanding tabs and clipping at `cols`
    fn render_line(&self, terminal: &mut Terminal, styled: &StyledText, line: Range<usize>, cols: usize) -> Result<()> {
        let text = styled.text();
        let mut col = 0;
        for (range, attrs) in line_segments(styled, line) {
            terminal.set_attributes(&attrs)?;
            let mut out = String::new();
            for ch in text[range].chars() {
                let width = if ch == '\t' {
                    self.tab_width - col % self.tab_width
                } else {
                    unicode_width::UnicodeWidthChar::width(ch).unwrap_or(1)
                };
                if col + width > cols {
                    terminal.write_str(&out)?;
                    return Ok(());
                }
                if ch == '\t' {
                    out.extend(std::iter::repeat(' ').take(width));
                } else {
                    out.push(ch);
                }
                col += width;
            }
            terminal.write_str(&out)?;
        }
        Ok(())
    }

    /// Draw the status line in reverse video
    fn render_status(&self, terminal: &mut Terminal, buffer: &Buffer, row: u16, cols: usize) -> Result<()> {
        terminal.move_cursor(row, 0)?;
        terminal.reset_attributes()?;
        terminal.set_reverse(true)?;

        let modified = if buffer.is_modified() { "**" } else { "--" };
        let mut status = format!("{} {}", modified, buffer.name());
        if let Some(msg) = &self.message {
            status.push_str(" -- ");
            status.push_str(msg);
        }
        let status: String = status.chars().take(cols).collect();
        terminal.write_str(&format!("{:<width$}", status, width = cols))?;

        terminal.set_reverse(false)?;
        Ok(())
    }
}

/// A `TextHost` drawing into the terminal
pub struct TerminalHost {
    terminal: Terminal,
    display: Display,
    buffer: Buffer,
    /// What the editor last asked us to show
    styled: StyledText,
    running: bool,
}

impl TerminalHost {
    pub fn new(terminal: Terminal, buffer: Buffer, tab_width: usize) -> Self {
        Self {
            terminal,
            display: Display::new(tab_width),
            styled: StyledText::plain(buffer.text()),
            buffer,
            running: true,
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Show a status message and redraw
    pub fn show_message(&mut self, msg: impl Into<String>) -> Result<()> {
        self.display.set_message(msg);
        self.redraw()
    }

    /// Redraw the last styled text
    pub fn redraw(&mut self) -> Result<()> {
        self.display.render(&mut self.terminal, &self.buffer, &self.styled)
    }

    /// Wait for the next thing the editor must hear about
    ///
    /// Caret motion, saving and resizing are handled here and do not
    /// produce events. Returns `None` once the user quits.
    pub fn next_event(&mut self) -> Result<Option<HostEvent>> {
        while self.running {
            let event = match self.terminal.read_event()? {
                TerminalEvent::Key(key) => match translate_key(key) {
                    Some(action) => self.apply(action)?,
                    None => None,
                },
                TerminalEvent::FocusGained => Some(HostEvent::EditingBegan),
                TerminalEvent::FocusLost => Some(HostEvent::EditingEnded),
                TerminalEvent::Resize => {
                    self.redraw()?;
                    None
                }
            };
            if event.is_some() {
                return Ok(event);
            }
        }
        Ok(None)
    }

    /// Perform an action on the buffer
    fn apply(&mut self, action: Action) -> Result<Option<HostEvent>> {
        self.display.clear_message();
        let tab_width = self.display.tab_width();

        match action {
            Action::Insert(ch) => self.buffer.insert_char(ch),
            Action::Newline => self.buffer.insert_char('\n'),
            Action::Backspace => {
                self.buffer.delete_backward();
            }
            Action::Delete => {
                self.buffer.delete_forward();
            }
            Action::Left => self.buffer.move_left(),
            Action::Right => self.buffer.move_right(),
            Action::Up => self.buffer.move_up(tab_width),
            Action::Down => self.buffer.move_down(tab_width),
            Action::LineStart => self.buffer.move_to_bol(),
            Action::LineEnd => self.buffer.move_to_eol(),
            Action::OpenLink => {
                return Ok(Some(HostEvent::LinkActivated {
                    offset: self.buffer.caret(),
                }))
            }
            Action::Save => {
                let msg = match self.buffer.save() {
                    Ok(path) => format!("Wrote {}", path.display()),
                    Err(e) => format!("Save failed: {e}"),
                };
                self.display.set_message(msg);
            }
            Action::Quit => {
                self.running = false;
                return Ok(None);
            }
        }

        if action.is_edit() {
            debug!(?action, caret = self.buffer.caret(), "buffer edited");
            return Ok(Some(HostEvent::TextChanged(self.buffer.text().to_string())));
        }
        self.redraw()?;
        Ok(None)
    }
}

impl TextHost for TerminalHost {
    fn text(&self) -> &str {
        self.buffer.text()
    }

    fn replace_text(&mut self, text: &str) {
        self.buffer.replace(text);
    }

    fn selection(&self) -> Range<usize> {
        let caret = self.buffer.caret();
        caret..caret
    }

    fn set_selection(&mut self, selection: Range<usize>) {
        self.buffer.set_caret(selection.end);
    }

    fn render(&mut self, styled: &StyledText) -> Result<()> {
        self.styled = styled.clone();
        self.redraw()
    }

    fn follow_link(&mut self, link: &Link) -> Result<()> {
        self.show_message(format!("Link: {}", link.target))
    }
}
