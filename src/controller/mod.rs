//! Loop controller
//!
//! Owns the process-wide run/pause state and guarantees the two core
//! invariants: at most one timeline cycle executing at a time, and at most
//! one loop task active at a time. External liveness events (visibility,
//! teardown) are dispatched into this state machine; their handlers mutate
//! the run state synchronously so no cycle ever observes a torn state.
//!
//! `Cancelled` is caught exactly once, here: a cancelled cycle means
//! "aborted, reset and move on". Any other error ends the loop task and is
//! surfaced through `join` — masking a real defect as a cancellation would
//! hide bugs.

use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::DemoConfig;
use crate::domain::{classes, HandleName, Script, ViewHandles};
use crate::error::Result;
use crate::runner::{baseline, run_cycle};
use crate::view::Presenter;

/// External notifications the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LivenessEvent {
    /// The host page became visible; resume the loop.
    BecameVisible,
    /// The host page was hidden; pause and reset.
    BecameHidden,
    /// One-shot teardown (page unloading); pause and reset.
    Teardown,
}

/// Process-wide run state. Invariant: `active_cycle` is Some iff a cycle
/// is currently executing.
#[derive(Debug, Default)]
struct RunState {
    should_run: bool,
    active_cycle: Option<CancellationToken>,
    loop_active: bool,
    loop_task: Option<JoinHandle<Result<()>>>,
}

/// Drives the endless autoplay loop over one script.
pub struct DemoController {
    view: Arc<dyn Presenter>,
    handles: Arc<ViewHandles>,
    script: Arc<Script>,
    config: Arc<DemoConfig>,
    state: Arc<Mutex<RunState>>,
}

impl DemoController {
    pub fn new(
        view: Arc<dyn Presenter>,
        handles: ViewHandles,
        script: Script,
        config: DemoConfig,
    ) -> Self {
        Self {
            view,
            handles: Arc::new(handles),
            script: Arc::new(script),
            config: Arc::new(config),
            state: Arc::new(Mutex::new(RunState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RunState> {
        self.state.lock().expect("run state lock poisoned")
    }

    /// Start the loop, unless the liveness signal already says hidden (in
    /// which case the first `BecameVisible` starts it).
    pub fn start(&self, initially_visible: bool) {
        if initially_visible {
            self.resume();
        }
    }

    /// Dispatch one liveness event into the state machine.
    pub fn handle_event(&self, event: LivenessEvent) {
        match event {
            LivenessEvent::BecameVisible => self.resume(),
            LivenessEvent::BecameHidden | LivenessEvent::Teardown => self.pause(),
        }
    }

    /// Pause: stop scheduling cycles, cancel the active one, and leave the
    /// view at baseline rather than frozen mid-animation.
    pub fn pause(&self) {
        {
            let mut state = self.lock();
            state.should_run = false;
            if let Some(token) = &state.active_cycle {
                token.cancel();
            }
        }
        baseline::apply(&*self.view, &self.handles, &self.config);
        self.view
            .remove_class(self.handles.get(HandleName::Shell), classes::RESETTING);
        info!("paused");
    }

    /// Resume: start a new loop task unless one is already active. The
    /// guard makes a pause/resume pair arriving faster than the scheduler
    /// drains reuse the existing loop instead of spawning a second one.
    pub fn resume(&self) {
        let mut state = self.lock();
        state.should_run = true;
        if state.loop_active {
            return;
        }
        state.loop_active = true;

        let view = Arc::clone(&self.view);
        let handles = Arc::clone(&self.handles);
        let script = Arc::clone(&self.script);
        let config = Arc::clone(&self.config);
        let shared = Arc::clone(&self.state);
        state.loop_task = Some(tokio::spawn(drive(view, handles, script, config, shared)));
        info!("loop started");
    }

    /// True while a loop task is active.
    pub fn is_loop_active(&self) -> bool {
        self.lock().loop_active
    }

    /// True while a cycle is executing (its token may already be
    /// cancelled but not yet observed).
    pub fn has_active_cycle(&self) -> bool {
        self.lock().active_cycle.is_some()
    }

    /// Wait for the current loop task to finish and surface its result.
    /// Cycles aborted by cancellation are not errors; anything else is.
    pub async fn join(&self) -> Result<()> {
        let task = self.lock().loop_task.take();
        match task {
            Some(task) => match task.await {
                Ok(result) => result,
                Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                Err(_) => Ok(()),
            },
            None => Ok(()),
        }
    }
}

/// The loop task: one cycle at a time, fresh token per cycle, one
/// scheduler yield between cycles so other pending work is never starved.
fn lock_state(state: &Mutex<RunState>) -> MutexGuard<'_, RunState> {
    state.lock().expect("run state lock poisoned")
}

async fn drive(
    view: Arc<dyn Presenter>,
    handles: Arc<ViewHandles>,
    script: Arc<Script>,
    config: Arc<DemoConfig>,
    state: Arc<Mutex<RunState>>,
) -> Result<()> {
    loop {
        // Checking should_run and claiming the cycle token happen under
        // one lock, so a pause/resume pair can never observe a torn state.
        let token = {
            let mut guard = lock_state(&state);
            if !guard.should_run {
                guard.loop_active = false;
                return Ok(());
            }
            let token = CancellationToken::new();
            guard.active_cycle = Some(token.clone());
            token
        };

        let outcome = run_cycle(&*view, &handles, &script, &config, &token).await;
        lock_state(&state).active_cycle = None;

        match outcome {
            Ok(()) => {}
            Err(err) if err.is_cancelled() => debug!("cycle aborted"),
            Err(err) => {
                lock_state(&state).loop_active = false;
                return Err(err);
            }
        }

        {
            let mut guard = lock_state(&state);
            if !guard.should_run {
                guard.loop_active = false;
                return Ok(());
            }
        }
        tokio::task::yield_now().await;
    }
}
