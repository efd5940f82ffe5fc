//! Transition scheduling for numeric visual attributes.

mod easing;
mod scheduler;

pub use easing::Easing;
pub use scheduler::{
    FrameClock, FrameRequestId, ManualFrameClock, TransitionScheduler, TransitionSink,
    TransitionSpec,
};
