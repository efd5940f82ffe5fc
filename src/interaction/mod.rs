//! Pointer resolution, per-component highlight state and the shared anchor.

mod anchor;
mod highlight;
mod resolver;

pub use anchor::{AnchorHandle, PointerListener, mount_listener};
pub use highlight::{
    ACTIVE_OPACITY, Emphasis, FontWeight, HighlightChange, HighlightCoordinator, HighlightState,
    RESTING_OPACITY,
};
pub use resolver::{nearest_item_index, pointer_offset, resolve_index};
