//! autodemo - a scripted, cancellable autoplay demo sequencer
//!
//! autodemo drives a fixed choreography of visual-state changes against a
//! resolved set of named view handles, simulating a human walking through
//! a product demo on an endless loop. The core is a cancellable timeline
//! scheduler: strictly-ordered timed mutations, cooperative cancellation
//! at every suspension point, and a deterministic baseline reset so an
//! interrupted cycle never leaves half-applied state behind.

pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod runner;
pub mod timing;
pub mod view;

pub use config::DemoConfig;
pub use controller::{DemoController, LivenessEvent};
pub use error::{DemoError, Result};
