use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::animation::{FrameClock, ManualFrameClock, TransitionScheduler, TransitionSink};
use crate::components::config::TooltipConfig;
use crate::core::format::format_number;
use crate::core::{
    AnchorRect, PointerInput, ScaleValue, Series, SharedScale, TickFormatFn, tooltip_title,
};
use crate::interaction::{
    AnchorHandle, HighlightChange, HighlightCoordinator, HighlightState, PointerListener,
    mount_listener, nearest_item_index, pointer_offset, resolve_index,
};
use crate::render::SvgNode;

const CONTENT_GAP: f64 = 8.0;
const CONTENT_PADDING: f64 = 8.0;
const LINE_HEIGHT: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TooltipAttr {
    Opacity,
}

#[derive(Debug, Default)]
struct Visibility {
    opacity: f64,
}

impl TransitionSink<TooltipAttr> for Visibility {
    fn on_frame(&mut self, _attr: &TooltipAttr, value: f64) {
        self.opacity = value;
    }

    fn on_complete(&mut self, attr: &TooltipAttr, value: f64) {
        self.on_frame(attr, value);
    }
}

/// Indicator line plus per-series readout for the hovered item.
pub struct Tooltip<C: FrameClock = ManualFrameClock> {
    config: TooltipConfig,
    x_scale: SharedScale,
    y_scale: SharedScale,
    series: Vec<Series>,
    title_format: Option<TickFormatFn>,
    anchor: Option<AnchorHandle>,
    highlight: HighlightCoordinator,
    visibility: Visibility,
    scheduler: TransitionScheduler<TooltipAttr, C>,
    mounted: bool,
}

impl<C: FrameClock> Tooltip<C> {
    #[must_use]
    pub fn new(config: TooltipConfig, x_scale: SharedScale, y_scale: SharedScale, clock: C) -> Self {
        let scheduler = TransitionScheduler::new(clock, config.transition.spec())
            .with_disabled(config.disable_animation);
        Self {
            config,
            x_scale,
            y_scale,
            series: Vec::new(),
            title_format: None,
            anchor: None,
            highlight: HighlightCoordinator::new(),
            visibility: Visibility::default(),
            scheduler,
            mounted: true,
        }
    }

    #[must_use]
    pub fn with_data(mut self, series: Vec<Series>) -> Self {
        self.set_data(series);
        self
    }

    /// Formatter for the content title; defaults to `%b %d, %Y` for times.
    #[must_use]
    pub fn with_title_format(mut self, title_format: TickFormatFn) -> Self {
        self.title_format = Some(title_format);
        self
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: AnchorHandle) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn into_shared(self) -> Rc<RefCell<Self>>
    where
        C: 'static,
    {
        let anchor = self.anchor.clone();
        let shared = Rc::new(RefCell::new(self));
        mount_listener(anchor.as_ref(), &shared);
        shared
    }

    /// Replaces the series; invalid series are logged and skipped.
    pub fn set_data(&mut self, series: Vec<Series>) {
        self.series = series
            .into_iter()
            .filter(|series| match series.validate() {
                Ok(()) => true,
                Err(error) => {
                    warn!(name = %series.name, %error, "skipping tooltip series");
                    false
                }
            })
            .collect();
        if self
            .highlight
            .active_index()
            .is_some_and(|index| index >= self.item_count())
        {
            self.highlight.clear();
        }
    }

    pub fn set_scales(&mut self, x_scale: SharedScale, y_scale: SharedScale) {
        self.x_scale = x_scale;
        self.y_scale = y_scale;
    }

    #[must_use]
    pub fn has_data(&self) -> bool {
        self.item_count() > 0
    }

    #[must_use]
    pub fn highlight_state(&self) -> HighlightState {
        self.highlight.state()
    }

    /// Current group opacity.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.visibility.opacity
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
            self.scheduler.advance(now, &mut self.visibility);
        }
    }

    /// Fades the tooltip in unless it is already shown or on its way there.
    pub fn show(&mut self) {
        if !self.mounted || !self.has_data() {
            return;
        }
        let heading_to_visible = match self.scheduler.target(&TooltipAttr::Opacity) {
            Some(target) => target == 1.0,
            None => self.visibility.opacity == 1.0,
        };
        if heading_to_visible {
            return;
        }
        let from = self.visibility.opacity;
        self.scheduler
            .animate(TooltipAttr::Opacity, from, 1.0, &mut self.visibility);
    }

    /// Hides at once and clears the active item.
    pub fn hide(&mut self) {
        self.conceal();
        self.highlight.clear();
    }

    fn conceal(&mut self) {
        self.scheduler.cancel(&TooltipAttr::Opacity);
        self.visibility.opacity = 0.0;
    }

    /// Resolves the hovered item from a pointer offset across an anchor `width` wide.
    ///
    /// Shows the tooltip once an item resolves and hides it while none does.
    pub fn hover_at(&mut self, offset_x: f64, width: f64) -> HighlightChange {
        if !self.mounted {
            return HighlightChange::Unchanged;
        }
        let resolved = self.series.first().and_then(|series| {
            if self.x_scale.kind().is_continuous() {
                nearest_item_index(self.x_scale.as_ref(), offset_x, &series.items)
            } else {
                resolve_index(offset_x, width, series.items.len())
            }
        });
        let change = self.highlight.apply(resolved);
        if self.highlight.active_index().is_some() {
            self.show();
        } else {
            self.conceal();
        }
        change
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.scheduler.cancel_all();
        self.highlight.clear();
        debug!("tooltip unmounted");
    }

    /// Pixel x of item `index` on the shared x-domain.
    #[must_use]
    pub fn item_x(&self, index: usize) -> Option<f64> {
        let item = self.series.first()?.items.get(index)?;
        let x = self.x_scale.to_position(&item.key)?;
        Some(x + self.x_scale.tick_offset())
    }

    /// `None` when there is no data to show.
    #[must_use]
    pub fn render(&self) -> Option<SvgNode> {
        if !self.has_data() {
            return None;
        }

        let hovering = self.highlight.active_index();
        let index = hovering.unwrap_or(0);
        let x = self.item_x(index).unwrap_or_else(|| {
            trace!(index, "active item has no x position");
            0.0
        });

        let mut root = SvgNode::group()
            .with_attrs(&self.config.attributes)
            .with_number("opacity", self.visibility.opacity);

        root.push_child(
            SvgNode::new("line")
                .with_class("tooltipLine")
                .with_number("x1", x)
                .with_number("x2", x)
                .with_number("y1", 0.0)
                .with_number("y2", self.config.height)
                .with_attr("stroke", "currentColor"),
        );
        root.push_child(self.render_content(index, x));

        let point_opacity = if hovering.is_some() { 1.0 } else { 0.0 };
        let points: SmallVec<[SvgNode; 4]> = self
            .series
            .iter()
            .map(|series| {
                let y = series
                    .items
                    .get(index)
                    .and_then(|item| self.y_scale.to_position(&ScaleValue::Number(item.value)))
                    .unwrap_or(0.0);
                SvgNode::new("circle")
                    .with_class("tooltipLinePoint")
                    .with_number("cx", x)
                    .with_number("cy", y)
                    .with_number("r", self.config.point_radius)
                    .with_attr("fill", &series.color)
                    .with_number("opacity", point_opacity)
            })
            .collect();
        Some(root.with_children(points))
    }

    fn render_content(&self, index: usize, x: f64) -> SvgNode {
        let content_width = self.config.content_width;
        let right = x + CONTENT_GAP;
        let left = x - CONTENT_GAP - content_width;
        let content_x = if right + content_width > self.config.width && left >= 0.0 {
            left
        } else {
            right
        };

        let title = self
            .series
            .first()
            .and_then(|series| series.items.get(index))
            .map(|item| match &self.title_format {
                Some(format) => format(&item.key),
                None => tooltip_title(&item.key),
            })
            .unwrap_or_default();

        let mut content = SvgNode::group().with_class("content");
        for (row, series) in self.series.iter().enumerate() {
            let value = series
                .items
                .get(index)
                .map(|item| format_number(item.value))
                .unwrap_or_default();
            content.push_child(
                SvgNode::new("text")
                    .with_number("x", CONTENT_PADDING)
                    .with_number("y", LINE_HEIGHT * (row as f64 + 2.0))
                    .with_attr("fill", &series.color)
                    .with_text(format!("{}: {value}", series.name)),
            );
        }

        let rows = self.series.len() as f64 + 1.0;
        SvgNode::group()
            .with_class("tooltipContent")
            .with_attr("transform", format!("translate({},0)", format_number(content_x)))
            .with_child(
                SvgNode::new("rect")
                    .with_class("contentBackground")
                    .with_number("width", content_width)
                    .with_number("height", rows * LINE_HEIGHT + CONTENT_PADDING)
                    .with_number("rx", 4.0)
                    .with_attr("fill", "currentColor")
                    .with_number("fill-opacity", 0.1),
            )
            .with_child(
                SvgNode::new("text")
                    .with_class("contentTitle")
                    .with_number("x", CONTENT_PADDING)
                    .with_number("y", LINE_HEIGHT)
                    .with_attr("font-weight", "bold")
                    .with_text(title),
            )
            .with_child(content)
    }

    fn item_count(&self) -> usize {
        self.series.first().map_or(0, |series| series.items.len())
    }
}

impl<C: FrameClock> PointerListener for Tooltip<C> {
    fn pointer_enter(&mut self, input: PointerInput, bounds: AnchorRect) {
        self.pointer_move(input, bounds);
    }

    fn pointer_move(&mut self, input: PointerInput, bounds: AnchorRect) {
        let offset = pointer_offset(input, bounds);
        let change = self.hover_at(offset.x, bounds.width);
        trace!(x = offset.x, ?change, "tooltip pointer move");
    }

    fn pointer_leave(&mut self) {
        self.hide();
    }
}
