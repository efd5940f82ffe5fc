use std::time::Duration;

use tracing::debug;

use crate::animation::{FrameClock, ManualFrameClock};
use crate::components::config::{GridLineConfig, GridOrientation};
use crate::components::tick_track::TickTrack;
use crate::core::SharedScale;
use crate::core::format::format_number;
use crate::layout::{Tick, compute_ticks};
use crate::render::SvgNode;

/// Unlabeled guide lines at tick positions.
pub struct GridLine<C: FrameClock = ManualFrameClock> {
    config: GridLineConfig,
    scale: SharedScale,
    track: TickTrack<C>,
    mounted: bool,
}

impl<C: FrameClock> GridLine<C> {
    #[must_use]
    pub fn new(config: GridLineConfig, scale: SharedScale, clock: C) -> Self {
        let track = TickTrack::new(clock, config.transition.spec(), config.disable_animation);
        let mut grid = Self {
            config,
            scale,
            track,
            mounted: true,
        };
        grid.relayout();
        grid
    }

    #[must_use]
    pub fn config(&self) -> &GridLineConfig {
        &self.config
    }

    pub fn set_scale(&mut self, scale: SharedScale) {
        self.scale = scale;
        self.relayout();
    }

    pub fn set_ticks(&mut self, ticks: usize) {
        self.config.ticks = ticks;
        self.relayout();
    }

    pub fn set_size(&mut self, size: f64) {
        self.config.size = size;
    }

    #[must_use]
    pub fn ticks(&self) -> Vec<Tick> {
        self.track.live_ticks().cloned().collect()
    }

    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.track.needs_frame()
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        self.track.clock()
    }

    pub fn on_frame(&mut self, now: Duration) {
        if self.mounted {
            self.track.advance(now);
        }
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.track.cancel_all();
        debug!(orientation = ?self.config.orientation, "grid line unmounted");
    }

    #[must_use]
    pub fn render(&self) -> SvgNode {
        let mut root = SvgNode::group().with_attrs(&self.config.attributes);
        if let Some(transform) = &self.config.transform {
            root.set_attr("transform", transform);
        }

        let size = self.config.size;
        for visual in self.track.visuals() {
            let position = format_number(visual.position);
            let (translate, line) = match self.config.orientation {
                GridOrientation::Vertical => (
                    format!("translate({position},0)"),
                    SvgNode::new("line").with_number("y2", -size),
                ),
                GridOrientation::Horizontal => (
                    format!("translate(0,{position})"),
                    SvgNode::new("line").with_number("x2", size),
                ),
            };
            root.push_child(
                SvgNode::group()
                    .with_class("tick")
                    .with_number("opacity", visual.opacity)
                    .with_attr("transform", translate)
                    .with_child(line.with_attr("stroke", "currentColor")),
            );
        }
        root
    }

    fn relayout(&mut self) {
        let ticks = compute_ticks(self.scale.as_ref(), self.config.ticks);
        self.track.update(ticks);
    }
}
