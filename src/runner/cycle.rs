//! Timeline cycle execution
//!
//! Runs one script strictly in order. Step 0 is always the baseline reset
//! (synchronous, not cancellable); after that, `Wait` and `RevealText` are
//! the only suspension points. Mutations always execute fully — a token
//! cancelled mid-step is observed at the next suspension point, never
//! mid-mutation, so no half-applied visual state is ever left behind.

use log::debug;
use tokio_util::sync::CancellationToken;

use crate::config::DemoConfig;
use crate::domain::{classes, Effect, HandleName, Script, ScrollTarget, Step, ViewHandles};
use crate::error::Result;
use crate::runner::baseline;
use crate::timing::{delay_ms, reveal};
use crate::view::{self, Layout, Presenter};

/// Resolve a symbolic scroll target against live layout, clamped to
/// `[0, max_scrollable_offset]`.
pub fn resolve_scroll(
    target: &ScrollTarget,
    view: &dyn Presenter,
    handles: &ViewHandles,
) -> f64 {
    let layout = view.layout();
    resolve_clamped(target, view, handles, &layout)
}

fn resolve_clamped(
    target: &ScrollTarget,
    view: &dyn Presenter,
    handles: &ViewHandles,
    layout: &Layout,
) -> f64 {
    let raw = match target {
        ScrollTarget::Top => 0.0,
        ScrollTarget::ViewportFraction(fraction) => layout.viewport_height * fraction,
        ScrollTarget::AlignElement {
            target,
            viewport_fraction,
        } => {
            view.element_top(handles.get(*target)) - layout.viewport_height * viewport_fraction
        }
        ScrollTarget::Between { from, to, bias } => {
            let from = resolve_clamped(from, view, handles, layout);
            let to = resolve_clamped(to, view, handles, layout);
            from + (to - from) * bias
        }
    };
    raw.clamp(0.0, layout.max_scrollable_offset())
}

fn apply_effect(
    view: &dyn Presenter,
    handles: &ViewHandles,
    config: &DemoConfig,
    target: HandleName,
    effect: &Effect,
) {
    let el = handles.get(target);
    match effect {
        Effect::AddClass(class) | Effect::PulseClass(class) => view.add_class(el, class),
        Effect::RemoveClass(class) => view.remove_class(el, class),
        Effect::SetAttr { name, value } => view.set_attr(el, name, value),
        Effect::SetText(text) => view.set_text(el, text),
        Effect::SetVisible(visible) => view.set_visible(el, *visible),
        Effect::OpenOverlay => view::open_overlay(view, el),
        Effect::CloseOverlay => view::close_overlay(view, el),
        Effect::ShowIndicator => view.add_class(el, classes::VISIBLE),
        Effect::HideIndicator => {
            view.remove_class(el, classes::VISIBLE);
            view.remove_class(el, classes::CLICKING);
        }
        Effect::Select { option } => view::select_radio(view, handles, target, *option),
        Effect::ResetTool => baseline::reset_tool_panel(view, handles, config),
        Effect::ScrollTo {
            target: scroll_target,
            duration_ms,
        } => {
            let offset = resolve_scroll(scroll_target, view, handles);
            view.set_scroll_offset(offset, *duration_ms);
        }
    }
}

/// Run one full cycle of `script`.
///
/// Resolves after the last step, or fails with `Cancelled` at the first
/// suspension point after the token fires. A completed cycle performs no
/// trailing reset: the final frame stays visible until the next cycle's
/// Step 0.
pub async fn run_cycle(
    view: &dyn Presenter,
    handles: &ViewHandles,
    script: &Script,
    config: &DemoConfig,
    token: &CancellationToken,
) -> Result<()> {
    baseline::apply(view, handles, config);
    debug!("cycle started ({} steps)", script.len());

    for step in script.steps() {
        match step {
            Step::Mutate { target, effect } => {
                apply_effect(view, handles, config, *target, effect);
            }
            Step::Wait { duration_ms } => delay_ms(*duration_ms, token).await?,
            Step::MoveIndicator { target } => view.move_indicator(handles.get(*target)),
            Step::RevealText {
                target,
                text,
                duration_ms,
            } => {
                reveal(
                    view,
                    handles.get(*target),
                    text,
                    *duration_ms,
                    config.timing.reveal_poll_ms,
                    token,
                )
                .await?;
            }
        }
    }

    debug!("cycle complete");
    Ok(())
}
