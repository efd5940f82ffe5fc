use std::time::Duration;

use tracing::{debug, warn};

use crate::animation::{FrameClock, ManualFrameClock, TransitionScheduler, TransitionSink};
use crate::components::config::AreaConfig;
use crate::core::{SeriesItem, SharedScale};
use crate::render::SvgNode;
use crate::shape::{Curve, area_path, project_points};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct AreaOpacity;

#[derive(Debug, Default)]
struct AreaVisual {
    opacity: f64,
}

impl TransitionSink<AreaOpacity> for AreaVisual {
    fn on_frame(&mut self, _attr: &AreaOpacity, value: f64) {
        self.opacity = value;
    }

    fn on_complete(&mut self, attr: &AreaOpacity, value: f64) {
        self.on_frame(attr, value);
    }
}

/// Filled series path that fades in.
pub struct AreaShape<C: FrameClock = ManualFrameClock> {
    config: AreaConfig,
    x_scale: SharedScale,
    y_scale: SharedScale,
    path: String,
    visual: AreaVisual,
    scheduler: TransitionScheduler<AreaOpacity, C>,
    mounted: bool,
}

impl<C: FrameClock> AreaShape<C> {
    #[must_use]
    pub fn new(config: AreaConfig, x_scale: SharedScale, y_scale: SharedScale, clock: C) -> Self {
        let scheduler = TransitionScheduler::new(clock, config.transition.spec())
            .with_disabled(config.disable_animation);
        Self {
            config,
            x_scale,
            y_scale,
            path: String::new(),
            visual: AreaVisual::default(),
            scheduler,
            mounted: true,
        }
    }

    #[must_use]
    pub fn with_data(mut self, items: &[SeriesItem]) -> Self {
        self.set_data(items);
        self
    }

    pub fn set_data(&mut self, items: &[SeriesItem]) {
        let curve = if self.config.smooth {
            Curve::CatmullRom
        } else {
            Curve::Linear
        };
        let (range_start, range_end) = self.y_scale.range();
        let baseline = range_start.max(range_end);
        self.path = match project_points(items, self.x_scale.as_ref(), self.y_scale.as_ref()) {
            Ok(points) => area_path(&points, baseline, curve),
            Err(error) => {
                warn!(%error, "area data cannot be drawn; rendering an empty path");
                String::new()
            }
        };
        if self.mounted {
            self.visual.opacity = 0.0;
            self.scheduler
                .animate(AreaOpacity, 0.0, 1.0, &mut self.visual);
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Id of the gradient the fill references.
    #[must_use]
    pub fn gradient_id(&self) -> String {
        format!("gradient-{}", self.config.color)
    }

    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.scheduler.needs_frame()
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        self.scheduler.clock()
    }

    pub fn on_frame(&mut self, now: Duration) {
        if self.mounted {
            self.scheduler.advance(now, &mut self.visual);
        }
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.scheduler.cancel_all();
        debug!("area unmounted");
    }

    #[must_use]
    pub fn render(&self) -> SvgNode {
        let gradient_id = self.gradient_id();
        let mut root = SvgNode::group();
        if self.config.gradient {
            let stop = |offset: &str, opacity: f64| {
                SvgNode::new("stop")
                    .with_attr("offset", offset)
                    .with_attr("stop-color", &self.config.color)
                    .with_number("stop-opacity", opacity)
            };
            root.push_child(
                SvgNode::new("defs").with_child(
                    SvgNode::new("linearGradient")
                        .with_attr("id", &gradient_id)
                        .with_attr("x1", "0")
                        .with_attr("y1", "0")
                        .with_attr("x2", "0")
                        .with_attr("y2", "1")
                        .with_child(stop("0%", 0.5))
                        .with_child(stop("100%", 0.0)),
                ),
            );
        }
        root.with_child(
            SvgNode::new("path")
                .with_attrs(&self.config.attributes)
                .with_attr("d", &self.path)
                .with_attr("fill", format!("url(#{gradient_id})"))
                .with_number("opacity", self.visual.opacity),
        )
    }
}
