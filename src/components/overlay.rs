use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::core::{AnchorRect, PointerInput};
use crate::error::{ChartError, ChartResult};
use crate::interaction::AnchorHandle;
use crate::render::SvgNode;

/// Transparent, hit-testable rectangle that owns the shared anchor.
///
/// Children paint beneath the rectangle so it always receives pointer events.
#[derive(Debug)]
pub struct OverlaySurface {
    anchor: AnchorHandle,
    attributes: IndexMap<String, String>,
    children: Vec<SvgNode>,
    pointer_inside: bool,
}

impl OverlaySurface {
    /// Mounts the surface over `bounds`, given in viewport coordinates.
    pub fn new(bounds: AnchorRect) -> ChartResult<Self> {
        validate_bounds(bounds)?;
        debug!(width = bounds.width, height = bounds.height, "overlay mounted");
        Ok(Self {
            anchor: AnchorHandle::new(bounds),
            attributes: IndexMap::new(),
            children: Vec::new(),
            pointer_inside: false,
        })
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: SvgNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn set_children(&mut self, children: Vec<SvgNode>) {
        self.children = children;
    }

    /// Handle for sibling components to attach listeners to.
    #[must_use]
    pub fn anchor(&self) -> AnchorHandle {
        self.anchor.clone()
    }

    #[must_use]
    pub fn bounds(&self) -> AnchorRect {
        self.anchor.bounds()
    }

    /// Recomputes the anchor after a resize or layout change.
    pub fn set_bounds(&mut self, bounds: AnchorRect) -> ChartResult<()> {
        validate_bounds(bounds)?;
        self.anchor.set_bounds(bounds);
        trace!(?bounds, "overlay bounds updated");
        Ok(())
    }

    /// Routes a host pointer-move; the first one after leaving acts as enter.
    pub fn pointer_move(&mut self, input: PointerInput) {
        if !self.anchor.is_mounted() {
            return;
        }
        if !input.client_x.is_finite() || !input.client_y.is_finite() {
            warn!(?input, "ignoring non-finite pointer position");
            return;
        }
        if self.pointer_inside {
            self.anchor.dispatch_move(input);
        } else {
            self.pointer_inside = true;
            self.anchor.dispatch_enter(input);
        }
    }

    pub fn pointer_leave(&mut self) {
        if !self.anchor.is_mounted() {
            return;
        }
        self.pointer_inside = false;
        self.anchor.dispatch_leave();
    }

    /// Drops every listener; the anchor handle stays readable but inert.
    pub fn unmount(&mut self) {
        if self.anchor.is_mounted() {
            self.anchor.unmount();
            debug!("overlay unmounted");
        }
    }

    #[must_use]
    pub fn render(&self) -> SvgNode {
        let bounds = self.bounds();
        let rect = SvgNode::new("rect")
            .with_attrs(&self.attributes)
            .with_number("width", bounds.width)
            .with_number("height", bounds.height)
            .with_number("opacity", 0.0)
            .with_attr("pointer-events", "all");
        SvgNode::group()
            .with_children(self.children.iter().cloned())
            .with_child(rect)
    }
}

impl Drop for OverlaySurface {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn validate_bounds(bounds: AnchorRect) -> ChartResult<()> {
    if bounds.is_valid() {
        Ok(())
    } else {
        Err(ChartError::InvalidViewport {
            width: bounds.width,
            height: bounds.height,
        })
    }
}
