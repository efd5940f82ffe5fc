//! Chart primitives built on the layout, animation and interaction cores.
//!
//! Every component owns its transitions and highlight state. Components
//! coordinate only through shared scales and the overlay's anchor.

mod area;
mod axis;
pub mod config;
mod grid_line;
mod line;
mod overlay;
mod tick_track;
mod tooltip;

pub use area::AreaShape;
pub use axis::Axis;
pub use config::{
    AreaConfig, AxisConfig, AxisPlacement, GridLineConfig, GridOrientation, JsonConfig,
    LineAnimation, LineConfig, TooltipConfig, TransitionConfig,
};
pub use grid_line::GridLine;
pub use line::LineShape;
pub use overlay::OverlaySurface;
pub use tooltip::Tooltip;
