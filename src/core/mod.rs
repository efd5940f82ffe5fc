pub mod format;
pub mod ordinal_scale;
pub mod primitives;
pub mod scale;
pub mod time_scale;
pub mod types;

pub use format::{TickFormatFn, default_tick_label, tick_format, time_format, tooltip_title};
pub use ordinal_scale::{BandScale, PointScale, subsample_indices};
pub use scale::{LinearScale, Scale, ScaleDomain, ScaleKind, SharedScale};
pub use time_scale::TimeScale;
pub use types::{
    AnchorRect, PointerInput, PointerOffset, ScaleValue, Series, SeriesItem, ValueKey,
};
