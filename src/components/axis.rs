use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, trace};

use crate::animation::{FrameClock, ManualFrameClock};
use crate::components::config::{AxisConfig, AxisPlacement};
use crate::components::tick_track::TickTrack;
use crate::core::format::format_number;
use crate::core::{AnchorRect, PointerInput, SharedScale, TickFormatFn};
use crate::interaction::{
    AnchorHandle, Emphasis, HighlightCoordinator, HighlightState, PointerListener, mount_listener,
    pointer_offset, resolve_index,
};
use crate::layout::{Tick, TickLayoutOptions, compute_ticks_with};
use crate::render::SvgNode;

const LABEL_OFFSET: f64 = 9.0;

/// Labeled axis whose tick labels follow pointer hover over the anchor.
pub struct Axis<C: FrameClock = ManualFrameClock> {
    config: AxisConfig,
    scale: SharedScale,
    tick_format: Option<TickFormatFn>,
    anchor: Option<AnchorHandle>,
    track: TickTrack<C>,
    highlight: HighlightCoordinator,
    mounted: bool,
}

impl<C: FrameClock> Axis<C> {
    #[must_use]
    pub fn new(config: AxisConfig, scale: SharedScale, clock: C) -> Self {
        let track = TickTrack::new(clock, config.transition.spec(), config.disable_animation);
        let mut axis = Self {
            config,
            scale,
            tick_format: None,
            anchor: None,
            track,
            highlight: HighlightCoordinator::new(),
            mounted: true,
        };
        axis.relayout();
        axis
    }

    #[must_use]
    pub fn with_tick_format(mut self, tick_format: TickFormatFn) -> Self {
        self.set_tick_format(Some(tick_format));
        self
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: AnchorHandle) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Wraps the axis for sharing and registers it on its anchor, if any.
    pub fn into_shared(self) -> Rc<RefCell<Self>>
    where
        C: 'static,
    {
        let anchor = self.anchor.clone();
        let shared = Rc::new(RefCell::new(self));
        mount_listener(anchor.as_ref(), &shared);
        shared
    }

    #[must_use]
    pub fn config(&self) -> &AxisConfig {
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

    pub fn set_tick_format(&mut self, tick_format: Option<TickFormatFn>) {
        self.tick_format = tick_format;
        self.relayout();
    }

    /// Ticks of the current layout, reserved tick included.
    #[must_use]
    pub fn ticks(&self) -> Vec<Tick> {
        self.track.live_ticks().cloned().collect()
    }

    #[must_use]
    pub fn highlight_state(&self) -> HighlightState {
        self.highlight.state()
    }

    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.track.needs_frame()
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        self.track.clock()
    }

    /// Host frame callback.
    pub fn on_frame(&mut self, now: Duration) {
        if self.mounted {
            self.track.advance(now);
        }
    }

    /// Highlights the tick nearest to `offset_x` across an anchor `width` wide.
    pub fn hover_at(&mut self, offset_x: f64, width: f64) {
        if !self.mounted {
            return;
        }
        let resolved = resolve_index(offset_x, width, self.track.live_len())
            .filter(|index| !(self.config.reserve_first_tick && *index == 0));
        self.highlight.apply(resolved);
    }

    pub fn clear_hover(&mut self) {
        self.highlight.clear();
    }

    /// Cancels in-flight transitions; later events and frames are ignored.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.track.cancel_all();
        self.highlight.clear();
        debug!(placement = ?self.config.placement, "axis unmounted");
    }

    #[must_use]
    pub fn render(&self) -> SvgNode {
        let mut root = SvgNode::group().with_attrs(&self.config.attributes);
        if let Some(transform) = &self.config.transform {
            root.set_attr("transform", transform);
        }

        let mut live_index = 0;
        for visual in self.track.visuals() {
            let emphasis = if visual.exiting {
                Emphasis::RESTING
            } else {
                let emphasis = self.highlight.emphasis_for(live_index);
                live_index += 1;
                emphasis
            };

            let translate = match self.config.placement {
                AxisPlacement::Bottom => format!("translate({},0)", format_number(visual.position)),
                AxisPlacement::Left => format!("translate(0,{})", format_number(visual.position)),
            };
            let mut tick = SvgNode::group()
                .with_class("tick")
                .with_number("opacity", visual.opacity)
                .with_attr("transform", translate);

            if !visual.tick.reserved {
                let text = SvgNode::new("text")
                    .with_attr("fill", "currentColor")
                    .with_attr("font-size", &self.config.font_size)
                    .with_number("opacity", emphasis.opacity)
                    .with_attr("font-weight", emphasis.font_weight.as_str());
                let text = match self.config.placement {
                    AxisPlacement::Bottom => text
                        .with_number("y", LABEL_OFFSET)
                        .with_attr("dy", "0.71em")
                        .with_attr("text-anchor", "middle"),
                    AxisPlacement::Left => text
                        .with_number("x", -LABEL_OFFSET)
                        .with_attr("dy", "0.32em")
                        .with_attr("text-anchor", "end"),
                };
                tick.push_child(text.with_text(visual.tick.label.clone()));
            }
            root.push_child(tick);
        }
        root
    }

    fn relayout(&mut self) {
        let options = TickLayoutOptions::new(self.config.ticks)
            .with_tick_format(self.tick_format.clone())
            .with_reserve_first_tick(self.config.reserve_first_tick);
        let ticks = compute_ticks_with(self.scale.as_ref(), &options);
        self.track.update(ticks);
        if self
            .highlight
            .active_index()
            .is_some_and(|index| index >= self.track.live_len())
        {
            self.highlight.clear();
        }
    }
}

impl<C: FrameClock> PointerListener for Axis<C> {
    fn pointer_move(&mut self, input: PointerInput, bounds: AnchorRect) {
        let offset = pointer_offset(input, bounds);
        trace!(x = offset.x, "axis pointer move");
        self.hover_at(offset.x, bounds.width);
    }

    fn pointer_leave(&mut self) {
        self.clear_hover();
    }
}
