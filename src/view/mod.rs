//! Presentation seam
//!
//! The core emits state-mutation commands against named view handles and
//! asks the presentation layer pure layout queries. Everything visual
//! (rendering, styling, markup) lives behind the `Presenter` trait.

pub mod memory;

pub use memory::{Command, ElementState, MemoryPresenter};

use crate::domain::{classes, ViewHandle, ViewHandles};

/// Live layout measurements, queried per cycle (never cached across
/// cycles).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub viewport_height: f64,
    pub content_height: f64,
}

impl Layout {
    /// Largest meaningful scroll offset; zero when the content fits.
    pub fn max_scrollable_offset(&self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }
}

/// The presentation layer, as seen by the core.
///
/// Mutation methods are synchronous and atomic with respect to the
/// cooperative scheduler; layout methods are pure queries.
pub trait Presenter: Send + Sync {
    fn add_class(&self, el: ViewHandle, class: &str);
    fn remove_class(&self, el: ViewHandle, class: &str);
    fn set_attr(&self, el: ViewHandle, name: &str, value: &str);
    fn set_text(&self, el: ViewHandle, text: &str);
    fn set_visible(&self, el: ViewHandle, visible: bool);
    /// Scroll the feed track to an absolute offset, animated over
    /// `duration_ms` (zero means instant).
    fn set_scroll_offset(&self, offset_px: f64, duration_ms: u64);
    /// Position the pointer indicator over an element.
    fn move_indicator(&self, over: ViewHandle);
    /// Clear the pointer indicator position and hover decoration.
    fn clear_indicator(&self);

    fn layout(&self) -> Layout;
    /// An element's top edge within the scroll track, scroll-independent.
    fn element_top(&self, el: ViewHandle) -> f64;
}

/// Open an overlay: visible class plus accessibility state.
pub fn open_overlay(view: &dyn Presenter, el: ViewHandle) {
    view.add_class(el, classes::OPEN);
    view.set_attr(el, "aria-hidden", "false");
}

/// Close an overlay.
pub fn close_overlay(view: &dyn Presenter, el: ViewHandle) {
    view.remove_class(el, classes::OPEN);
    view.set_attr(el, "aria-hidden", "true");
}

/// Select exactly one option of a radio group, deselecting the rest.
pub fn select_radio(
    view: &dyn Presenter,
    handles: &ViewHandles,
    group: crate::domain::HandleName,
    selected: crate::domain::HandleName,
) {
    for option in group.radio_options() {
        let el = handles.get(*option);
        let is_selected = *option == selected;
        if is_selected {
            view.add_class(el, classes::SELECTED);
        } else {
            view.remove_class(el, classes::SELECTED);
        }
        view.set_attr(el, "aria-checked", if is_selected { "true" } else { "false" });
    }
}
