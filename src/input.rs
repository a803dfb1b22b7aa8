//! Input handling - key translation for the terminal host

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the terminal host to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Insert(char),
    Newline,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    /// Activate the link under the caret
    OpenLink,
    Save,
    Quit,
}

impl Action {
    /// Whether the action changes the text
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Action::Insert(_) | Action::Newline | Action::Backspace | Action::Delete
        )
    }
}

/// Translate a crossterm key event
///
/// Key releases and repeats reported by some terminals are ignored, as are
/// unbound keys.
pub fn translate_key(event: KeyEvent) -> Option<Action> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let action = match event.code {
        KeyCode::Char(ch) if ctrl => match ch.to_ascii_lowercase() {
            's' => Action::Save,
            'q' => Action::Quit,
            'o' => Action::OpenLink,
            'a' => Action::LineStart,
            'e' => Action::LineEnd,
            'f' => Action::Right,
            'b' => Action::Left,
            'n' => Action::Down,
            'p' => Action::Up,
            'd' => Action::Delete,
            _ => return None,
        },
        KeyCode::Char(ch) => Action::Insert(ch),
        KeyCode::Tab => Action::Insert('\t'),
        KeyCode::Enter => Action::Newline,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Delete => Action::Delete,
        KeyCode::Left => Action::Left,
        KeyCode::Right => Action::Right,
        KeyCode::Up => Action::Up,
        KeyCode::Down => Action::Down,
        KeyCode::Home => Action::LineStart,
        KeyCode::End => Action::LineEnd,
        _ => return None,
    };
    Some(action)
}
