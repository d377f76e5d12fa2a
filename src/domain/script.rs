//! Script and step descriptors
//!
//! A Script is an ordered, immutable sequence of steps, fixed at
//! construction time. Steps either mutate named view state synchronously
//! or suspend (`Wait`, `RevealText`); suspension points are the only
//! places a cycle observes cancellation.

use serde::{Deserialize, Serialize};

use crate::config::DemoConfig;
use crate::domain::handle::HandleName;

/// Presentation class vocabulary shared by scripts and resets.
pub mod classes {
    pub const RESETTING: &str = "is-resetting";
    pub const RESPONDING: &str = "is-responding";
    pub const PRESSED: &str = "is-pressed";
    pub const CLICKING: &str = "is-clicking";
    pub const VISIBLE: &str = "is-visible";
    pub const OPEN: &str = "is-open";
    pub const SELECTED: &str = "is-selected";
    pub const LOADING: &str = "is-loading";
    pub const READY: &str = "is-ready";
    pub const SHOWN: &str = "is-shown";
    /// Marks the whole shell as the motionless "after" rendering.
    pub const STATIC_FINAL: &str = "demo--static";
}

/// A scroll offset described symbolically.
///
/// Offsets depend on live layout, so scripts carry targets rather than
/// pixel values; the runner resolves them per cycle and clamps the result
/// to `[0, max_scrollable_offset]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScrollTarget {
    /// Scroll back to the top.
    Top,
    /// A fraction of the viewport height.
    ViewportFraction(f64),
    /// Put an element's top at the given fraction of the viewport.
    AlignElement {
        target: HandleName,
        viewport_fraction: f64,
    },
    /// An intermediate stop between two targets, biased toward `to`.
    Between {
        from: Box<ScrollTarget>,
        to: Box<ScrollTarget>,
        bias: f64,
    },
}

/// A synchronous state mutation against one named element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    AddClass(String),
    RemoveClass(String),
    /// Transient click/press artifact. Applied like a class add; the
    /// baseline reset is responsible for clearing leftovers.
    PulseClass(String),
    SetAttr { name: String, value: String },
    SetText(String),
    SetVisible(bool),
    OpenOverlay,
    CloseOverlay,
    ShowIndicator,
    HideIndicator,
    /// Select one option of a radio group; the target is the group.
    Select { option: HandleName },
    /// Put the plugin tool back to its fresh-load defaults.
    ResetTool,
    ScrollTo {
        target: ScrollTarget,
        duration_ms: u64,
    },
}

/// One step of a timeline cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Step {
    /// Synchronous mutation; always executes fully once started.
    Mutate { target: HandleName, effect: Effect },
    /// Suspension point with a bounded duration.
    Wait { duration_ms: u64 },
    /// Move the pointer indicator over an element.
    MoveIndicator { target: HandleName },
    /// Progressive text reveal; a suspension point at each internal poll.
    RevealText {
        target: HandleName,
        text: String,
        duration_ms: u64,
    },
}

/// An ordered, immutable script of steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    steps: Vec<Step>,
}

impl Script {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Build the standard walkthrough choreography from configuration.
    ///
    /// Step order and literal timings follow the product demo: stop-and-go
    /// scroll to the target comment, reply click, popup with defaults,
    /// intent and tone selection, generation with a loading phase, typed
    /// suggestion reveal, insert click, posted reply.
    pub fn standard(config: &DemoConfig) -> Self {
        use Effect::*;
        use HandleName::*;

        let timing = &config.timing;
        let copy = &config.copy;
        let type_ms = timing.type_duration_ms(copy.suggestion.chars().count());

        let mut steps: Vec<Step> = Vec::new();

        let mutate = |steps: &mut Vec<Step>, target: HandleName, effect: Effect| {
            steps.push(Step::Mutate { target, effect });
        };
        let wait = |steps: &mut Vec<Step>, duration_ms: u64| {
            steps.push(Step::Wait { duration_ms });
        };
        let point = |steps: &mut Vec<Step>, target: HandleName| {
            steps.push(Step::MoveIndicator { target });
        };

        // Let the baseline reset settle under the transition-suppressing
        // class before any motion starts.
        wait(&mut steps, timing.reset_settle_ms);
        mutate(&mut steps, Shell, RemoveClass(classes::RESETTING.into()));
        wait(&mut steps, 0);

        // Stage 1: scroll down once.
        mutate(
            &mut steps,
            FeedTrack,
            ScrollTo {
                target: ScrollTarget::ViewportFraction(0.4),
                duration_ms: 650,
            },
        );
        wait(&mut steps, 670);
        wait(&mut steps, timing.wait_after_scroll_ms);

        // Stage 2: two more stops so the target comment sits in the top
        // quarter. The headline stays on "scroll your feed".
        mutate(&mut steps, StepLabel, SetText(copy.step_label(0).into()));
        let aligned = ScrollTarget::AlignElement {
            target: TargetComment,
            viewport_fraction: 0.25,
        };
        mutate(
            &mut steps,
            FeedTrack,
            ScrollTo {
                target: ScrollTarget::Between {
                    from: Box::new(ScrollTarget::ViewportFraction(0.4)),
                    to: Box::new(aligned.clone()),
                    bias: 0.55,
                },
                duration_ms: 520,
            },
        );
        wait(&mut steps, 540);
        mutate(
            &mut steps,
            FeedTrack,
            ScrollTo {
                target: aligned,
                duration_ms: 520,
            },
        );
        wait(&mut steps, 540);
        wait(&mut steps, timing.wait_after_scroll_ms);

        // Cursor moves to Reply and clicks.
        mutate(&mut steps, StepLabel, SetText(copy.step_label(1).into()));
        mutate(&mut steps, TargetComment, AddClass(classes::RESPONDING.into()));
        mutate(&mut steps, Cursor, ShowIndicator);
        point(&mut steps, ReplyButton);
        wait(&mut steps, 260);
        mutate(&mut steps, Cursor, PulseClass(classes::CLICKING.into()));
        mutate(&mut steps, ReplyButton, PulseClass(classes::PRESSED.into()));
        wait(&mut steps, 120);

        // Popup opens with the default selections already visible.
        mutate(&mut steps, IntentGroup, Select { option: config.selection.default_intent });
        mutate(&mut steps, ToneGroup, Select { option: config.selection.default_tone });
        mutate(&mut steps, Popup, OpenOverlay);
        wait(&mut steps, timing.wait_after_popup_open_ms);

        // Select the scripted intent.
        let intent = config.selection.intent;
        point(&mut steps, intent);
        wait(&mut steps, 220);
        mutate(&mut steps, Cursor, PulseClass(classes::CLICKING.into()));
        mutate(&mut steps, intent, PulseClass(classes::PRESSED.into()));
        mutate(&mut steps, IntentGroup, Select { option: intent });
        wait(&mut steps, timing.wait_after_intent_select_ms);

        // Select the scripted tone.
        let tone = config.selection.tone;
        point(&mut steps, tone);
        wait(&mut steps, 220);
        mutate(&mut steps, Cursor, PulseClass(classes::CLICKING.into()));
        mutate(&mut steps, tone, PulseClass(classes::PRESSED.into()));
        mutate(&mut steps, ToneGroup, Select { option: tone });
        wait(&mut steps, timing.wait_after_tone_select_ms);

        // Generate click, loading phase, then the typed suggestion.
        mutate(&mut steps, StepLabel, SetText(copy.step_label(2).into()));
        point(&mut steps, GenerateButton);
        wait(&mut steps, 240);
        mutate(&mut steps, Cursor, PulseClass(classes::CLICKING.into()));
        mutate(&mut steps, GenerateButton, PulseClass(classes::PRESSED.into()));

        mutate(&mut steps, SuggestionsSection, SetVisible(false));
        mutate(&mut steps, GenerateButton, AddClass(classes::LOADING.into()));
        mutate(&mut steps, GenerateLabel, SetText(copy.generate_busy_label.clone()));
        mutate(&mut steps, GenerateSpinner, SetVisible(true));
        mutate(&mut steps, SuggestionText, SetText(String::new()));
        mutate(&mut steps, SuggestionCard, AddClass(classes::LOADING.into()));
        mutate(&mut steps, SuggestionCard, RemoveClass(classes::READY.into()));
        mutate(&mut steps, SuggestionLoading, SetVisible(false));
        wait(&mut steps, timing.generation_loading_ms);

        mutate(&mut steps, GenerateButton, RemoveClass(classes::LOADING.into()));
        mutate(&mut steps, GenerateLabel, SetText(copy.generate_idle_label.clone()));
        mutate(&mut steps, GenerateSpinner, SetVisible(false));
        mutate(&mut steps, SuggestionCard, RemoveClass(classes::LOADING.into()));
        mutate(&mut steps, SuggestionsSection, SetVisible(true));
        steps.push(Step::RevealText {
            target: SuggestionText,
            text: copy.suggestion.clone(),
            duration_ms: type_ms,
        });
        mutate(&mut steps, SuggestionCard, AddClass(classes::READY.into()));
        wait(&mut steps, timing.wait_after_reply_ms.saturating_sub(type_ms));

        // Cursor moves to the suggestion card.
        point(&mut steps, SuggestionCard);
        wait(&mut steps, timing.wait_after_move_to_insert_ms);

        // Insert click: close the popup and show the posted reply, leaving
        // the plugin tool back at its fresh defaults.
        mutate(&mut steps, StepLabel, SetText(copy.step_label(3).into()));
        mutate(&mut steps, Cursor, PulseClass(classes::CLICKING.into()));
        mutate(&mut steps, SuggestionCard, PulseClass(classes::PRESSED.into()));
        wait(&mut steps, 160);

        mutate(&mut steps, Popup, CloseOverlay);
        mutate(&mut steps, Cursor, HideIndicator);
        mutate(&mut steps, InsertedReply, SetText(copy.suggestion.clone()));
        mutate(&mut steps, InsertedReply, AddClass(classes::SHOWN.into()));
        mutate(&mut steps, InsertedReply, SetVisible(true));
        mutate(&mut steps, Popup, ResetTool);
        wait(&mut steps, timing.wait_after_post_ms);

        Self::new(steps)
    }
}
