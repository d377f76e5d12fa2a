//! In-memory presenter
//!
//! Holds the demo shell as plain element state (classes, attributes, text,
//! visibility) plus a command log, so tests and the CLI can drive the full
//! sequencer without a real presentation layer.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use crate::domain::{HandleName, HandleResolver, ViewHandle};
use crate::view::{Layout, Presenter};

/// Observable state of one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementState {
    pub classes: BTreeSet<String>,
    pub attrs: BTreeMap<String, String>,
    pub text: String,
    pub visible: bool,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            classes: BTreeSet::new(),
            attrs: BTreeMap::new(),
            text: String::new(),
            visible: true,
        }
    }
}

/// One recorded mutation command, by logical name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Command {
    AddClass { target: HandleName, class: String },
    RemoveClass { target: HandleName, class: String },
    SetAttr { target: HandleName, name: String, value: String },
    SetText { target: HandleName, text: String },
    SetVisible { target: HandleName, visible: bool },
    Scroll { offset_px: f64, duration_ms: u64 },
    MoveIndicator { over: HandleName },
    ClearIndicator,
}

/// Full observable state, for before/after comparisons.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub elements: BTreeMap<HandleName, ElementState>,
    pub scroll_offset: f64,
    pub indicator_over: Option<HandleName>,
}

#[derive(Debug)]
struct Inner {
    elements: BTreeMap<HandleName, ElementState>,
    tops: HashMap<HandleName, f64>,
    layout: Layout,
    scroll_offset: f64,
    indicator_over: Option<HandleName>,
    log: Vec<Command>,
}

/// Presenter and resolver over in-memory element state.
#[derive(Debug)]
pub struct MemoryPresenter {
    inner: Mutex<Inner>,
}

impl Default for MemoryPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPresenter {
    /// A full demo shell with a feed tall enough to scroll.
    pub fn new() -> Self {
        let elements = HandleName::ALL
            .iter()
            .map(|name| (*name, ElementState::default()))
            .collect();

        let mut tops = HashMap::new();
        tops.insert(HandleName::TargetPost, 560.0);
        tops.insert(HandleName::TargetComment, 700.0);

        Self {
            inner: Mutex::new(Inner {
                elements,
                tops,
                layout: Layout {
                    viewport_height: 420.0,
                    content_height: 1600.0,
                },
                scroll_offset: 0.0,
                indicator_over: None,
                log: Vec::new(),
            }),
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("presenter state lock poisoned")
    }

    fn name_of(handle: ViewHandle) -> Option<HandleName> {
        let raw = handle.raw();
        if raw == 0 {
            return None;
        }
        HandleName::ALL.get(raw as usize - 1).copied()
    }

    fn handle_of(name: HandleName) -> ViewHandle {
        ViewHandle::new(name as u64 + 1)
    }

    pub fn set_layout(&self, layout: Layout) {
        self.inner().layout = layout;
    }

    pub fn set_element_top(&self, name: HandleName, top: f64) {
        self.inner().tops.insert(name, top);
    }

    pub fn element(&self, name: HandleName) -> ElementState {
        self.inner().elements.get(&name).cloned().unwrap_or_default()
    }

    pub fn has_class(&self, name: HandleName, class: &str) -> bool {
        self.element(name).classes.contains(class)
    }

    pub fn text(&self, name: HandleName) -> String {
        self.element(name).text
    }

    pub fn attr(&self, name: HandleName, attr: &str) -> Option<String> {
        self.element(name).attrs.get(attr).cloned()
    }

    pub fn scroll_offset(&self) -> f64 {
        self.inner().scroll_offset
    }

    pub fn indicator_over(&self) -> Option<HandleName> {
        self.inner().indicator_over
    }

    /// All commands recorded so far.
    pub fn commands(&self) -> Vec<Command> {
        self.inner().log.clone()
    }

    /// Drain the command log.
    pub fn take_commands(&self) -> Vec<Command> {
        std::mem::take(&mut self.inner().log)
    }

    pub fn snapshot(&self) -> Snapshot {
        let inner = self.inner();
        Snapshot {
            elements: inner.elements.clone(),
            scroll_offset: inner.scroll_offset,
            indicator_over: inner.indicator_over,
        }
    }

    fn with_element(&self, handle: ViewHandle, f: impl FnOnce(&mut ElementState)) {
        if let Some(name) = Self::name_of(handle) {
            let mut inner = self.inner();
            if let Some(state) = inner.elements.get_mut(&name) {
                f(state);
            }
        }
    }
}

impl HandleResolver for MemoryPresenter {
    fn resolve(&self, name: HandleName) -> Option<ViewHandle> {
        let inner = self.inner();
        inner.elements.contains_key(&name).then(|| Self::handle_of(name))
    }
}

impl Presenter for MemoryPresenter {
    fn add_class(&self, el: ViewHandle, class: &str) {
        self.with_element(el, |state| {
            state.classes.insert(class.to_string());
        });
        if let Some(target) = Self::name_of(el) {
            self.inner().log.push(Command::AddClass {
                target,
                class: class.to_string(),
            });
        }
    }

    fn remove_class(&self, el: ViewHandle, class: &str) {
        self.with_element(el, |state| {
            state.classes.remove(class);
        });
        if let Some(target) = Self::name_of(el) {
            self.inner().log.push(Command::RemoveClass {
                target,
                class: class.to_string(),
            });
        }
    }

    fn set_attr(&self, el: ViewHandle, name: &str, value: &str) {
        self.with_element(el, |state| {
            state.attrs.insert(name.to_string(), value.to_string());
        });
        if let Some(target) = Self::name_of(el) {
            self.inner().log.push(Command::SetAttr {
                target,
                name: name.to_string(),
                value: value.to_string(),
            });
        }
    }

    fn set_text(&self, el: ViewHandle, text: &str) {
        self.with_element(el, |state| {
            state.text = text.to_string();
        });
        if let Some(target) = Self::name_of(el) {
            self.inner().log.push(Command::SetText {
                target,
                text: text.to_string(),
            });
        }
    }

    fn set_visible(&self, el: ViewHandle, visible: bool) {
        self.with_element(el, |state| {
            state.visible = visible;
        });
        if let Some(target) = Self::name_of(el) {
            self.inner().log.push(Command::SetVisible { target, visible });
        }
    }

    fn set_scroll_offset(&self, offset_px: f64, duration_ms: u64) {
        let mut inner = self.inner();
        inner.scroll_offset = offset_px;
        inner.log.push(Command::Scroll {
            offset_px,
            duration_ms,
        });
    }

    fn move_indicator(&self, over: ViewHandle) {
        if let Some(name) = Self::name_of(over) {
            let mut inner = self.inner();
            inner.indicator_over = Some(name);
            inner.log.push(Command::MoveIndicator { over: name });
        }
    }

    fn clear_indicator(&self) {
        let mut inner = self.inner();
        inner.indicator_over = None;
        inner.log.push(Command::ClearIndicator);
    }

    fn layout(&self) -> Layout {
        self.inner().layout
    }

    fn element_top(&self, el: ViewHandle) -> f64 {
        let inner = self.inner();
        Self::name_of(el)
            .and_then(|name| inner.tops.get(&name).copied())
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ViewHandles;

    #[test]
    fn test_resolves_full_demo_shell() {
        let presenter = MemoryPresenter::new();
        let handles = ViewHandles::resolve(&presenter).unwrap();
        assert_ne!(
            handles.get(HandleName::Shell),
            handles.get(HandleName::InsertedReply)
        );
    }

    #[test]
    fn test_class_mutations_and_log() {
        let presenter = MemoryPresenter::new();
        let handles = ViewHandles::resolve(&presenter).unwrap();
        let popup = handles.get(HandleName::Popup);

        presenter.add_class(popup, "is-open");
        assert!(presenter.has_class(HandleName::Popup, "is-open"));

        presenter.remove_class(popup, "is-open");
        assert!(!presenter.has_class(HandleName::Popup, "is-open"));

        let log = presenter.commands();
        assert_eq!(log.len(), 2);
        assert_eq!(
            log[0],
            Command::AddClass {
                target: HandleName::Popup,
                class: "is-open".to_string()
            }
        );
    }

    #[test]
    fn test_text_and_attrs() {
        let presenter = MemoryPresenter::new();
        let handles = ViewHandles::resolve(&presenter).unwrap();
        let card = handles.get(HandleName::SuggestionText);

        presenter.set_text(card, "hello");
        assert_eq!(presenter.text(HandleName::SuggestionText), "hello");

        presenter.set_attr(card, "aria-hidden", "true");
        assert_eq!(
            presenter.attr(HandleName::SuggestionText, "aria-hidden"),
            Some("true".to_string())
        );
    }

    #[test]
    fn test_scroll_and_indicator() {
        let presenter = MemoryPresenter::new();
        let handles = ViewHandles::resolve(&presenter).unwrap();

        presenter.set_scroll_offset(168.0, 650);
        assert_eq!(presenter.scroll_offset(), 168.0);

        presenter.move_indicator(handles.get(HandleName::ReplyButton));
        assert_eq!(
            presenter.indicator_over(),
            Some(HandleName::ReplyButton)
        );

        presenter.clear_indicator();
        assert_eq!(presenter.indicator_over(), None);
    }

    #[test]
    fn test_snapshot_equality() {
        let a = MemoryPresenter::new();
        let b = MemoryPresenter::new();
        assert_eq!(a.snapshot(), b.snapshot());

        let handles = ViewHandles::resolve(&a).unwrap();
        a.add_class(handles.get(HandleName::Cursor), "is-visible");
        assert_ne!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_element_top_defaults_to_zero() {
        let presenter = MemoryPresenter::new();
        let handles = ViewHandles::resolve(&presenter).unwrap();
        assert_eq!(presenter.element_top(handles.get(HandleName::Popup)), 0.0);
        assert_eq!(
            presenter.element_top(handles.get(HandleName::TargetComment)),
            700.0
        );
    }

    #[test]
    fn test_take_commands_drains_log() {
        let presenter = MemoryPresenter::new();
        let handles = ViewHandles::resolve(&presenter).unwrap();
        presenter.set_text(handles.get(HandleName::StepLabel), "1.");
        assert_eq!(presenter.take_commands().len(), 1);
        assert!(presenter.commands().is_empty());
    }
}
