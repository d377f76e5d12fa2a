//! Baseline reset
//!
//! The canonical "freshly loaded" visual state, as a pure function of the
//! handle set. Applied at the start of every cycle and whenever a cycle is
//! cancelled; idempotent and order-independent, so resets can stack.

use crate::config::DemoConfig;
use crate::domain::{classes, HandleName, ViewHandles};
use crate::runner::cycle::resolve_scroll;
use crate::domain::ScrollTarget;
use crate::view::{self, Presenter};

/// Put the plugin tool (popup contents) back to fresh-load defaults.
pub fn reset_tool_panel(view: &dyn Presenter, handles: &ViewHandles, config: &DemoConfig) {
    view::close_overlay(view, handles.get(HandleName::Popup));

    view::select_radio(
        view,
        handles,
        HandleName::IntentGroup,
        config.selection.default_intent,
    );
    view::select_radio(
        view,
        handles,
        HandleName::ToneGroup,
        config.selection.default_tone,
    );

    view.remove_class(handles.get(HandleName::GenerateButton), classes::LOADING);
    view.set_text(
        handles.get(HandleName::GenerateLabel),
        &config.copy.generate_idle_label,
    );
    view.set_visible(handles.get(HandleName::GenerateSpinner), false);

    let card = handles.get(HandleName::SuggestionCard);
    view.remove_class(card, classes::LOADING);
    view.remove_class(card, classes::READY);
    view.remove_class(card, classes::PRESSED);
    view.set_visible(handles.get(HandleName::SuggestionLoading), false);
    view.set_text(handles.get(HandleName::SuggestionText), "");
    view.set_visible(handles.get(HandleName::SuggestionsSection), false);
}

/// Apply the full baseline reset.
///
/// Synchronous and not cancellable: a fast sequence of state writes. Ends
/// with the transition-suppressing class on the shell; the caller decides
/// when to lift it (the standard script does so after its settle wait).
pub fn apply(view: &dyn Presenter, handles: &ViewHandles, config: &DemoConfig) {
    reset_tool_panel(view, handles, config);

    // Pointer indicator hidden and cleared.
    let cursor = handles.get(HandleName::Cursor);
    view.remove_class(cursor, classes::VISIBLE);
    view.remove_class(cursor, classes::CLICKING);
    view.clear_indicator();

    view.set_text(
        handles.get(HandleName::StepLabel),
        config.copy.step_label(0),
    );
    view.remove_class(handles.get(HandleName::TargetComment), classes::RESPONDING);

    // Pressed artifacts left by an aborted mid-click cycle.
    view.remove_class(handles.get(HandleName::ReplyButton), classes::PRESSED);
    view.remove_class(handles.get(HandleName::GenerateButton), classes::PRESSED);
    for group in [HandleName::IntentGroup, HandleName::ToneGroup] {
        for option in group.radio_options() {
            view.remove_class(handles.get(*option), classes::PRESSED);
        }
    }

    let inserted = handles.get(HandleName::InsertedReply);
    view.remove_class(inserted, classes::SHOWN);
    view.set_visible(inserted, false);
    view.set_text(inserted, "");

    view.add_class(handles.get(HandleName::Shell), classes::RESETTING);
    view.set_scroll_offset(0.0, 0);
}

/// Render the motionless "after" frame for the reduced-motion preference:
/// baseline plus every end-of-cycle mutation, applied once and permanently.
pub fn render_static_final(view: &dyn Presenter, handles: &ViewHandles, config: &DemoConfig) {
    apply(view, handles, config);
    view.remove_class(handles.get(HandleName::Shell), classes::RESETTING);
    view.add_class(handles.get(HandleName::Shell), classes::STATIC_FINAL);

    view.set_text(
        handles.get(HandleName::StepLabel),
        config.copy.step_label(3),
    );
    view.add_class(handles.get(HandleName::TargetComment), classes::RESPONDING);
    view::select_radio(view, handles, HandleName::IntentGroup, config.selection.intent);
    view::select_radio(view, handles, HandleName::ToneGroup, config.selection.tone);

    // Target comment visible in the top quarter, without motion.
    let offset = resolve_scroll(
        &ScrollTarget::AlignElement {
            target: HandleName::TargetComment,
            viewport_fraction: 0.25,
        },
        view,
        handles,
    );
    view.set_scroll_offset(offset, 0);

    view.set_visible(handles.get(HandleName::SuggestionsSection), true);
    view.set_visible(handles.get(HandleName::SuggestionLoading), false);
    let card = handles.get(HandleName::SuggestionCard);
    view.remove_class(card, classes::LOADING);
    view.set_text(
        handles.get(HandleName::SuggestionText),
        &config.copy.suggestion,
    );
    view.add_class(card, classes::READY);

    view::close_overlay(view, handles.get(HandleName::Popup));
    let inserted = handles.get(HandleName::InsertedReply);
    view.set_text(inserted, &config.copy.suggestion);
    view.add_class(inserted, classes::SHOWN);
    view.set_visible(inserted, true);
}
