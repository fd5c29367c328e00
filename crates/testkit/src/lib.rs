#![warn(missing_docs)]
//! Deterministic testing surfaces: tick traces and golden JSON snapshots.

mod snapshot;
mod tick_trace;

pub use snapshot::*;
pub use tick_trace::*;
