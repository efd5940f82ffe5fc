use std::time::Duration;

use tracing::{debug, warn};

use crate::animation::{FrameClock, ManualFrameClock, TransitionScheduler, TransitionSink};
use crate::components::config::{LineAnimation, LineConfig};
use crate::core::format::format_number;
use crate::core::{SeriesItem, SharedScale};
use crate::render::SvgNode;
use crate::shape::{Curve, line_path, path_length, project_points};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum LineAttr {
    Opacity,
    DashOffset,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct LineVisual {
    opacity: f64,
    dash_offset: f64,
}

impl TransitionSink<LineAttr> for LineVisual {
    fn on_frame(&mut self, attr: &LineAttr, value: f64) {
        match attr {
            LineAttr::Opacity => self.opacity = value,
            LineAttr::DashOffset => self.dash_offset = value,
        }
    }

    fn on_complete(&mut self, attr: &LineAttr, value: f64) {
        self.on_frame(attr, value);
    }
}

/// Stroked series path with an entrance animation.
pub struct LineShape<C: FrameClock = ManualFrameClock> {
    config: LineConfig,
    x_scale: SharedScale,
    y_scale: SharedScale,
    path: String,
    length: f64,
    visual: LineVisual,
    scheduler: TransitionScheduler<LineAttr, C>,
    mounted: bool,
}

impl<C: FrameClock> LineShape<C> {
    #[must_use]
    pub fn new(config: LineConfig, x_scale: SharedScale, y_scale: SharedScale, clock: C) -> Self {
        let scheduler = TransitionScheduler::new(clock, config.transition.spec())
            .with_disabled(config.disable_animation);
        Self {
            config,
            x_scale,
            y_scale,
            path: String::new(),
            length: 0.0,
            visual: LineVisual {
                opacity: 1.0,
                dash_offset: 0.0,
            },
            scheduler,
            mounted: true,
        }
    }

    #[must_use]
    pub fn with_data(mut self, items: &[SeriesItem]) -> Self {
        self.set_data(items);
        self
    }

    /// Regenerates the path and replays the entrance animation.
    pub fn set_data(&mut self, items: &[SeriesItem]) {
        let curve = if self.config.smooth {
            Curve::CatmullRom
        } else {
            Curve::Linear
        };
        match project_points(items, self.x_scale.as_ref(), self.y_scale.as_ref()) {
            Ok(points) => {
                self.path = line_path(&points, curve);
                self.length = path_length(&points, curve);
            }
            Err(error) => {
                warn!(%error, "line data cannot be drawn; rendering an empty path");
                self.path.clear();
                self.length = 0.0;
            }
        }
        if self.mounted {
            self.start_entrance();
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Drawn length used as the dash period.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
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
        debug!("line unmounted");
    }

    #[must_use]
    pub fn render(&self) -> SvgNode {
        let mut path = SvgNode::new("path")
            .with_attrs(&self.config.attributes)
            .with_attr("d", &self.path)
            .with_attr("fill", "none")
            .with_attr("stroke", &self.config.color)
            .with_number("opacity", self.visual.opacity);
        if self.config.animation == LineAnimation::Left {
            let length = format_number(self.length);
            path.set_attr("stroke-dasharray", format!("{length},{length}"));
            path.set_number("stroke-dashoffset", self.visual.dash_offset);
        }
        path
    }

    fn start_entrance(&mut self) {
        match self.config.animation {
            LineAnimation::Left => {
                self.visual.opacity = 1.0;
                self.visual.dash_offset = self.length;
                self.scheduler
                    .animate(LineAttr::DashOffset, self.length, 0.0, &mut self.visual);
            }
            LineAnimation::FadeIn => {
                self.visual.opacity = 0.0;
                self.scheduler
                    .animate(LineAttr::Opacity, 0.0, 1.0, &mut self.visual);
            }
            LineAnimation::None => {
                self.scheduler.cancel_all();
                self.visual.opacity = 1.0;
                self.visual.dash_offset = 0.0;
            }
        }
    }
}
