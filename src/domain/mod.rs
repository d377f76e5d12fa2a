//! Domain types for autodemo
//!
//! This module contains the core domain types:
//! - HandleName / ViewHandles: the fixed, fully-resolved element set
//! - Script / Step / Effect: the immutable choreography
//! - ScrollTarget: symbolic scroll offsets resolved against live layout

pub mod handle;
pub mod script;

pub use handle::{HandleName, HandleResolver, ViewHandle, ViewHandles};
pub use script::{classes, Effect, Script, ScrollTarget, Step};
