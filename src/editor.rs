//! The editor surface
//!
//! `Editor` ties a text binding, a rule list and a host together. Every
//! change to the text, whether typed into the host or set by the program,
//! re-highlights the whole document and hands the result to the host.

use std::fmt;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::binding::TextBinding;
use crate::error::Result;
use crate::host::{HostEvent, TextHost};
use crate::links::{self, Link};
use crate::syntax::{Font, HighlightRule, Highlighter, StyledText};

type EventCallback = Box<dyn FnMut()>;
type TextCallback = Box<dyn FnMut(&str)>;
/// Receives the link target, the link's display text and its byte range;
/// returns whether the host should follow the link
type LinkCallback = Box<dyn FnMut(&str, &str, Range<usize>) -> bool>;

/// What the editor is doing
///
/// Highlighting runs synchronously inside a single call, so callers only
/// ever see `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Highlighting,
}

#[derive(Default)]
struct Callbacks {
    editing_began: Option<EventCallback>,
    commit: Option<EventCallback>,
    text_change: Option<TextCallback>,
    link_click: Option<LinkCallback>,
}

/// Builder for `Editor`
pub struct EditorBuilder {
    binding: TextBinding,
    rules: Vec<HighlightRule>,
    highlighter: Highlighter,
    callbacks: Callbacks,
}

impl EditorBuilder {
    /// Start configuring an editor over `binding` with `rules`
    pub fn new(binding: TextBinding, rules: Vec<HighlightRule>) -> Self {
        Self {
            binding,
            rules,
            highlighter: Highlighter::default(),
            callbacks: Callbacks::default(),
        }
    }

    /// Called when interactive editing starts
    pub fn on_editing_began(mut self, f: impl FnMut() + 'static) -> Self {
        self.callbacks.editing_began = Some(Box::new(f));
        self
    }

    /// Called when interactive editing ends
    pub fn on_commit(mut self, f: impl FnMut() + 'static) -> Self {
        self.callbacks.commit = Some(Box::new(f));
        self
    }

    /// Called with the new text after every change
    pub fn on_text_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.callbacks.text_change = Some(Box::new(f));
        self
    }

    /// Decides whether an activated link gets the host's default handling
    ///
    /// Without one, every link is followed.
    pub fn on_link_click(mut self, f: impl FnMut(&str, &str, Range<usize>) -> bool + 'static) -> Self {
        self.callbacks.link_click = Some(Box::new(f));
        self
    }

    /// Font that trait directives compose with
    pub fn base_font(mut self, font: Font) -> Self {
        self.highlighter = Highlighter::new(font);
        self
    }

    /// Attach the host and draw the initial text
    pub fn build<H: TextHost>(self, host: H) -> Result<Editor<H>> {
        let mut editor = Editor {
            binding: self.binding,
            rules: self.rules,
            highlighter: self.highlighter,
            callbacks: self.callbacks,
            host,
            styled: StyledText::default(),
            phase: Phase::Idle,
        };
        editor.refresh()?;
        Ok(editor)
    }
}

/// A highlighting text editor driving a `TextHost`
pub struct Editor<H: TextHost> {
    binding: TextBinding,
    rules: Vec<HighlightRule>,
    highlighter: Highlighter,
    callbacks: Callbacks,
    host: H,
    /// What the host currently displays
    styled: StyledText,
    phase: Phase,
}

impl<H: TextHost> Editor<H> {
    /// The current document text
    pub fn text(&self) -> String {
        self.binding.get()
    }

    /// The styled text last handed to the host
    pub fn styled(&self) -> &StyledText {
        &self.styled
    }

    pub fn rules(&self) -> &[HighlightRule] {
        &self.rules
    }

    pub fn binding(&self) -> &TextBinding {
        &self.binding
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Replace the document text from code
    ///
    /// Behaves like a user edit: the change callback fires and the host
    /// shows the new text highlighted.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        debug!(len = text.len(), "set text");
        self.binding.set(text.as_str());
        self.notify_text_change(&text);
        self.refresh()
    }

    /// Handle activity reported by the host
    pub fn handle_event(&mut self, event: HostEvent) -> Result<()> {
        match event {
            HostEvent::TextChanged(text) => {
                debug!(len = text.len(), "host text changed");
                self.binding.set(text.as_str());
                self.notify_text_change(&text);
                self.refresh()?;
            }
            HostEvent::EditingBegan => {
                debug!("editing began");
                if let Some(f) = self.callbacks.editing_began.as_mut() {
                    f();
                }
            }
            HostEvent::EditingEnded => {
                debug!("editing ended");
                if let Some(f) = self.callbacks.commit.as_mut() {
                    f();
                }
            }
            HostEvent::LinkActivated { offset } => {
                if let Some(link) = self.link_at(offset) {
                    self.activate_link(&link)?;
                }
            }
        }
        Ok(())
    }

    /// The link covering a byte offset of the current text
    pub fn link_at(&self, offset: usize) -> Option<Link> {
        self.binding.with(|text| links::link_at(text, offset))
    }

    /// Run link gating for `link`
    ///
    /// Asks the link callback whether to proceed and, if so, lets the host
    /// follow the link. A callback that panics counts as a refusal.
    /// Returns whether the link was followed.
    pub fn activate_link(&mut self, link: &Link) -> Result<bool> {
        let display = self.binding.with(|text| link.display_text(text).to_string());

        let follow = match self.callbacks.link_click.as_mut() {
            None => true,
            Some(f) => {
                let range = link.range.clone();
                // The default hook writes to stderr, which would land on the
                // terminal host's screen; report through tracing instead.
                let hook = panic::take_hook();
                panic::set_hook(Box::new(|info| warn!(%info, "link handler panicked")));
                let result = panic::catch_unwind(AssertUnwindSafe(|| f(&link.target, &display, range)));
                panic::set_hook(hook);
                match result {
                    Ok(follow) => follow,
                    Err(_) => {
                        warn!(link = %link.target, "suppressing link");
                        false
                    }
                }
            }
        };

        debug!(link = %link.target, follow, "link activated");
        if follow {
            self.host.follow_link(link)?;
        }
        Ok(follow)
    }

    /// Pick up edits made to the binding outside the editor
    ///
    /// Returns whether anything changed. External edits are not reported
    /// through the change callback.
    pub fn sync(&mut self) -> Result<bool> {
        let text = self.binding.get();
        if text == self.styled.text() {
            return Ok(false);
        }
        debug!(len = text.len(), "binding changed externally");
        self.refresh()?;
        Ok(true)
    }

    /// Re-highlight the current text and render it, keeping the selection
    ///
    /// The binding is the source of truth: a host holding different text,
    /// for example after a change callback rewrote the binding, is updated
    /// first.
    pub fn refresh(&mut self) -> Result<()> {
        self.phase = Phase::Highlighting;
        let text = self.binding.get();
        let selection = self.host.selection();
        if self.host.text() != text {
            self.host.replace_text(&text);
        }

        let styled = self.highlighter.highlight(&text, &self.rules);
        let rendered = self.host.render(&styled);
        self.host.set_selection(clamp_selection(&text, selection));
        self.styled = styled;

        self.phase = Phase::Idle;
        rendered
    }

    fn notify_text_change(&mut self, text: &str) {
        if let Some(f) = self.callbacks.text_change.as_mut() {
            f(text);
        }
    }
}

impl<H: TextHost + fmt::Debug> fmt::Debug for Editor<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("rules", &self.rules)
            .field("host", &self.host)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

/// Clamp a selection into `text`, on char boundaries
fn clamp_selection(text: &str, selection: Range<usize>) -> Range<usize> {
    let clamp = |mut offset: usize| {
        offset = offset.min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    };
    let start = clamp(selection.start);
    let end = clamp(selection.end).max(start);
    start..end
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::syntax::{builtin, AttributeKey, Theme};

    /// In-memory host that records what it was asked to do
    ///
    /// Rendering moves the caret to the end of the text, the way native
    /// text views do when their content is replaced.
    #[derive(Debug, Default)]
    struct RecordingHost {
        text: String,
        selection: Range<usize>,
        renders: Vec<StyledText>,
        followed: Vec<Link>,
    }

    impl TextHost for RecordingHost {
        fn text(&self) -> &str {
            &self.text
        }

        fn replace_text(&mut self, text: &str) {
            self.text = text.to_string();
        }

        fn selection(&self) -> Range<usize> {
            self.selection.clone()
        }

        fn set_selection(&mut self, selection: Range<usize>) {
            self.selection = selection;
        }

        fn render(&mut self, styled: &StyledText) -> Result<()> {
            self.selection = styled.text().len()..styled.text().len();
            self.renders.push(styled.clone());
            Ok(())
        }

        fn follow_link(&mut self, link: &Link) -> Result<()> {
            self.followed.push(link.clone());
            Ok(())
        }
    }

    fn markdown_rules() -> Vec<HighlightRule> {
        builtin::markdown(&Theme::default()).unwrap()
    }

    fn editor(text: &str) -> Editor<RecordingHost> {
        EditorBuilder::new(TextBinding::new(text), markdown_rules())
            .build(RecordingHost::default())
            .unwrap()
    }

    #[test]
    fn test_build_renders_initial_text() {
        let editor = editor("# Hello");
        assert_eq!(editor.host().text, "# Hello");
        assert_eq!(editor.host().renders.len(), 1);
        assert!(!editor.styled().is_plain());
        assert_eq!(editor.phase(), Phase::Idle);
    }

    #[test]
    fn test_user_edit_rehighlights() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let log = changes.clone();
        let binding = TextBinding::new("plain");
        let mut editor = EditorBuilder::new(binding.clone(), markdown_rules())
            .on_text_change(move |text| log.borrow_mut().push(text.to_string()))
            .build(RecordingHost::default())
            .unwrap();
        assert!(editor.styled().is_plain());

        editor.handle_event(HostEvent::TextChanged("plain `code`".into())).unwrap();

        assert_eq!(binding.get(), "plain `code`");
        assert_eq!(*changes.borrow(), vec!["plain `code`".to_string()]);
        let last = editor.host().renders.last().unwrap();
        assert_eq!(last.text(), "plain `code`");
        assert!(last.uniform(6..12, AttributeKey::Font).is_some());
        assert_eq!(editor.phase(), Phase::Idle);
    }

    #[test]
    fn test_set_text_mid_edit() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let log = changes.clone();
        let mut editor = EditorBuilder::new(TextBinding::new(""), markdown_rules())
            .on_text_change(move |text| log.borrow_mut().push(text.to_string()))
            .build(RecordingHost::default())
            .unwrap();

        editor.handle_event(HostEvent::EditingBegan).unwrap();
        editor.handle_event(HostEvent::TextChanged("draft".into())).unwrap();
        editor.set_text("*new*").unwrap();

        assert_eq!(changes.borrow().last().map(String::as_str), Some("*new*"));
        assert_eq!(editor.host().text, "*new*");
        let last = editor.host().renders.last().unwrap();
        assert_eq!(last.text(), "*new*");
        assert!(last.attributes_at(1).unwrap().font.unwrap().traits.italic);
        assert_eq!(editor.text(), "*new*");
    }

    #[test]
    fn test_focus_callbacks() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let began = events.clone();
        let ended = events.clone();
        let mut editor = EditorBuilder::new(TextBinding::default(), Vec::new())
            .on_editing_began(move || began.borrow_mut().push("began"))
            .on_commit(move || ended.borrow_mut().push("commit"))
            .build(RecordingHost::default())
            .unwrap();

        editor.handle_event(HostEvent::EditingBegan).unwrap();
        editor.handle_event(HostEvent::EditingEnded).unwrap();
        assert_eq!(*events.borrow(), vec!["began", "commit"]);
    }

    #[test]
    fn test_selection_preserved() {
        let mut editor = editor("hello world");
        editor.host_mut().set_selection(5..5);

        editor.handle_event(HostEvent::TextChanged("hello, world".into())).unwrap();
        assert_eq!(editor.host().selection(), 5..5);
    }

    #[test]
    fn test_selection_clamped_on_shorter_text() {
        let mut editor = editor("a long line of text");
        editor.host_mut().set_selection(10..15);

        editor.set_text("short").unwrap();
        assert_eq!(editor.host().selection(), 5..5);
    }

    #[test]
    fn test_clamp_selection_char_boundary() {
        assert_eq!(clamp_selection("héllo", 2..2), 1..1);
        assert_eq!(clamp_selection("abc", 1..9), 1..3);
    }

    #[test]
    fn test_link_followed_by_default() {
        let mut editor = editor("see [x](http://x)");
        editor.handle_event(HostEvent::LinkActivated { offset: 6 }).unwrap();
        assert_eq!(editor.host().followed.len(), 1);
        assert_eq!(editor.host().followed[0].target, "http://x");
    }

    #[test]
    fn test_link_predicate_gates_following() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let text = "go [home](app://home) or [web](https://example.com)";
        let mut editor = EditorBuilder::new(TextBinding::new(text), markdown_rules())
            .on_link_click(move |target, display, range| {
                log.borrow_mut().push((target.to_string(), display.to_string(), range));
                !target.starts_with("app://")
            })
            .build(RecordingHost::default())
            .unwrap();

        let custom = editor.link_at(4).unwrap();
        assert!(!editor.activate_link(&custom).unwrap());
        assert!(editor.host().followed.is_empty());

        let web = text.find("[web]").unwrap();
        editor.handle_event(HostEvent::LinkActivated { offset: web }).unwrap();
        assert_eq!(editor.host().followed.len(), 1);
        assert_eq!(editor.host().followed[0].target, "https://example.com");

        let seen = seen.borrow();
        assert_eq!(seen[0].0, "app://home");
        assert_eq!(seen[0].1, "[home](app://home)");
        assert_eq!(seen[0].2, 3..21);
    }

    #[test]
    fn test_panicking_link_predicate_is_contained() {
        let mut editor = EditorBuilder::new(TextBinding::new("[x](y)"), markdown_rules())
            .on_link_click(|_, _, _| panic!("handler bug"))
            .build(RecordingHost::default())
            .unwrap();

        let link = editor.link_at(0).unwrap();
        assert!(!editor.activate_link(&link).unwrap());
        assert!(editor.host().followed.is_empty());
        assert_eq!(editor.phase(), Phase::Idle);
    }

    #[test]
    fn test_panic_hook_restored_after_link_predicate() {
        let mut editor = EditorBuilder::new(TextBinding::new("[x](y)"), markdown_rules())
            .on_link_click(|_, _, _| panic!("handler bug"))
            .build(RecordingHost::default())
            .unwrap();
        let link = editor.link_at(0).unwrap();

        assert!(!editor.activate_link(&link).unwrap());
        assert!(!editor.activate_link(&link).unwrap());
        let caught = panic::catch_unwind(|| panic!("outside the editor"));
        assert!(caught.is_err());
    }

    #[test]
    fn test_no_link_at_offset() {
        let mut editor = editor("no links here");
        editor.handle_event(HostEvent::LinkActivated { offset: 3 }).unwrap();
        assert!(editor.host().followed.is_empty());
    }

    #[test]
    fn test_sync_external_edit() {
        let changes = Rc::new(RefCell::new(0));
        let count = changes.clone();
        let binding = TextBinding::new("before");
        let mut editor = EditorBuilder::new(binding.clone(), markdown_rules())
            .on_text_change(move |_| *count.borrow_mut() += 1)
            .build(RecordingHost::default())
            .unwrap();

        assert!(!editor.sync().unwrap());
        binding.set("# after");
        assert!(editor.sync().unwrap());

        assert_eq!(editor.host().text, "# after");
        assert_eq!(editor.styled().text(), "# after");
        assert!(editor.styled().attributes_at(0).unwrap().font.unwrap().traits.bold);
        assert_eq!(*changes.borrow(), 0);
    }

    #[test]
    fn test_change_callback_rewriting_binding_reaches_host() {
        let binding = TextBinding::new("");
        let shared = binding.clone();
        let mut editor = EditorBuilder::new(binding.clone(), markdown_rules())
            .on_text_change(move |text| shared.set(text.trim_end()))
            .build(RecordingHost::default())
            .unwrap();

        editor.handle_event(HostEvent::TextChanged("*abc* ".into())).unwrap();

        assert_eq!(binding.get(), "*abc*");
        assert_eq!(editor.host().text, "*abc*");
        assert_eq!(editor.styled().text(), editor.host().text);
    }

    #[test]
    fn test_broken_rule_prevents_construction() {
        let rules: Result<Vec<HighlightRule>> = ["ok", "(broken"]
            .iter()
            .map(|p| HighlightRule::new(p, crate::syntax::StyleDirective::kern(1.0)))
            .collect();
        assert!(rules.is_err());
    }
}
