//! Terminal abstraction using crossterm

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, DisableFocusChange, EnableFocusChange, Event, KeyEvent},
    execute, queue,
    style::{self, Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use crate::error::Result;
use crate::syntax::{Attributes, Color, FontWeight, Underline};

/// Terminal input the host cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    Key(KeyEvent),
    FocusGained,
    FocusLost,
    Resize,
}

/// Terminal wrapper for cross-platform terminal I/O
pub struct Terminal {
    /// Terminal width in columns
    cols: u16,
    /// Terminal height in rows
    rows: u16,
}

impl Terminal {
    /// Create a new terminal instance and enter raw mode
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let (cols, rows) = terminal::size()?;

        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            EnableFocusChange,
            cursor::Hide
        )?;

        Ok(Self { cols, rows })
    }

    /// Get terminal width
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Get terminal height
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Clear from cursor to end of line
    pub fn clear_to_eol(&mut self) -> Result<()> {
        queue!(io::stdout(), terminal::Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    /// Move cursor to position (0-indexed)
    pub fn move_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        queue!(io::stdout(), cursor::MoveTo(col, row))?;
        Ok(())
    }

    /// Write a string at current cursor position
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(io::stdout(), Print(s))?;
        Ok(())
    }

    /// Flush output buffer to terminal
    pub fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    /// Set cursor visibility
    pub fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            queue!(io::stdout(), cursor::Show)?;
        } else {
            queue!(io::stdout(), cursor::Hide)?;
        }
        Ok(())
    }

    /// Read the next event the host handles (blocking)
    pub fn read_event(&mut self) -> Result<TerminalEvent> {
        loop {
            match event::read()? {
                Event::Key(key_event) => return Ok(TerminalEvent::Key(key_event)),
                Event::FocusGained => return Ok(TerminalEvent::FocusGained),
                Event::FocusLost => return Ok(TerminalEvent::FocusLost),
                Event::Resize(cols, rows) => {
                    self.cols = cols;
                    self.rows = rows;
                    return Ok(TerminalEvent::Resize);
                }
                _ => {
                    // Ignore other events (mouse, paste)
                }
            }
        }
    }

    /// Switch the output style to `attrs`
    ///
    /// Fonts only map to bold, italic and dim (thin weight); family and
    /// kerning have no terminal equivalent.
    pub fn set_attributes(&mut self, attrs: &Attributes) -> Result<()> {
        let mut out = io::stdout();
        queue!(out, SetAttribute(Attribute::Reset))?;

        if let Some(font) = attrs.font {
            if font.traits.bold {
                queue!(out, SetAttribute(Attribute::Bold))?;
            } else if font.weight == FontWeight::Thin {
                queue!(out, SetAttribute(Attribute::Dim))?;
            }
            if font.traits.italic {
                queue!(out, SetAttribute(Attribute::Italic))?;
            }
        }

        match attrs.underline {
            Some(Underline::Single) => queue!(out, SetAttribute(Attribute::Underlined))?,
            Some(Underline::Double) => queue!(out, SetAttribute(Attribute::DoubleUnderlined))?,
            None => {}
        }

        if let Some(color) = attrs.foreground {
            queue!(out, SetForegroundColor(to_terminal_color(color)))?;
        }
        if let Some(color) = attrs.background {
            queue!(out, SetBackgroundColor(to_terminal_color(color)))?;
        }
        Ok(())
    }

    /// Set reverse video mode
    pub fn set_reverse(&mut self, enabled: bool) -> Result<()> {
        if enabled {
            queue!(io::stdout(), SetAttribute(Attribute::Reverse))?;
        } else {
            queue!(io::stdout(), SetAttribute(Attribute::NoReverse))?;
        }
        Ok(())
    }

    /// Reset all attributes
    pub fn reset_attributes(&mut self) -> Result<()> {
        queue!(io::stdout(), SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = execute!(
            io::stdout(),
            SetAttribute(Attribute::Reset),
            cursor::Show,
            DisableFocusChange,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Map a style color onto the crossterm palette
pub fn to_terminal_color(color: Color) -> style::Color {
    match color {
        Color::Default => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
        Color::BrightBlack => style::Color::DarkGrey,
        Color::BrightRed => style::Color::Red,
        Color::BrightGreen => style::Color::Green,
        Color::BrightYellow => style::Color::Yellow,
        Color::BrightBlue => style::Color::Blue,
        Color::BrightMagenta => style::Color::Magenta,
        Color::BrightCyan => style::Color::Cyan,
        Color::BrightWhite => style::Color::White,
        Color::Rgb(r, g, b) => style::Color::Rgb { r, g, b },
    }
}
