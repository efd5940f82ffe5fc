//! Tick layout: value selection, positioning, labeling and keyed diffing.

mod reconcile;
mod ticks;

pub use reconcile::{TickDiff, TickUpdate, diff_ticks};
pub use ticks::{Tick, TickLayoutOptions, compute_ticks, compute_ticks_with};

/// Reconciliation identity of a tick.
pub type TickKey = crate::core::ValueKey;
