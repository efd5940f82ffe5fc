use crate::error::ChartResult;
use crate::render::{Renderer, SvgNode};

/// No-op renderer used by tests and headless usage.
///
/// It still validates the scene so tests catch malformed output before a real
/// backend sees it.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames: usize,
    pub last_node_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, scene: &SvgNode) -> ChartResult<()> {
        scene.validate()?;
        self.frames += 1;
        self.last_node_count = scene.node_count();
        Ok(())
    }
}
