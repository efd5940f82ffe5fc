//! chart-primitives: declarative SVG chart building blocks.
//!
//! Scales map data to pixels, the tick layout engine turns a scale into
//! reconciled tick sets, and the transition scheduler animates the visual
//! attributes that change between layout passes. Hover coordination is a
//! pure function of the anchor geometry and the pointer event, so axis and
//! tooltip components mounted independently always agree on the active index.

pub mod animation;
pub mod components;
pub mod core;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod shape;
pub mod telemetry;

pub use components::{AreaShape, Axis, GridLine, LineShape, OverlaySurface, Tooltip};
pub use error::{ChartError, ChartResult};
