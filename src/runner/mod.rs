//! Cycle execution
//!
//! - baseline: the canonical reset and the reduced-motion static frame
//! - cycle: one strictly-sequential run of a script

pub mod baseline;
pub mod cycle;

pub use cycle::{resolve_scroll, run_cycle};
