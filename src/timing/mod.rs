//! Timing primitives
//!
//! The two suspension-point building blocks of the sequencer:
//! - delay: a single-shot, cancellable timer
//! - reveal: progressive text reveal over a fixed total duration

pub mod delay;
pub mod reveal;

pub use delay::{delay, delay_ms};
pub use reveal::reveal;
