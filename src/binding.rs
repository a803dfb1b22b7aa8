//! Shared text storage
//!
//! A `TextBinding` is the document text shared between the editor and its
//! owner. Edits made through the editor show up in every clone, and edits
//! the owner makes are picked up by `Editor::sync`.

use std::cell::RefCell;
use std::rc::Rc;

/// A cloneable handle to shared text
#[derive(Debug, Clone, Default)]
pub struct TextBinding {
    text: Rc<RefCell<String>>,
}

impl TextBinding {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Rc::new(RefCell::new(text.into())),
        }
    }

    /// Copy of the current text
    pub fn get(&self) -> String {
        self.text.borrow().clone()
    }

    /// Replace the text
    pub fn set(&self, text: impl Into<String>) {
        *self.text.borrow_mut() = text.into();
    }

    /// Borrow the text for the duration of `f`
    pub fn with<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(&self.text.borrow())
    }

    /// Replace the text unless it already equals `text`
    ///
    /// Returns whether the text changed.
    pub fn replace_if_changed(&self, text: &str) -> bool {
        let mut current = self.text.borrow_mut();
        if *current == text {
            return false;
        }
        current.clear();
        current.push_str(text);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_text() {
        let binding = TextBinding::new("one");
        let other = binding.clone();
        other.set("two");
        assert_eq!(binding.get(), "two");
        assert_eq!(binding.with(str::len), 3);
    }

    #[test]
    fn test_replace_if_changed() {
        let binding = TextBinding::new("same");
        assert!(!binding.replace_if_changed("same"));
        assert!(binding.replace_if_changed("different"));
        assert_eq!(binding.get(), "different");
    }
}
