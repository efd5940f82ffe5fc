mod node;
mod null_renderer;
mod svg_writer;

pub use node::SvgNode;
pub use null_renderer::NullRenderer;
pub use svg_writer::to_svg_string;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized scene so painting stays isolated
/// from scale, animation and interaction logic.
pub trait Renderer {
    fn render(&mut self, scene: &SvgNode) -> ChartResult<()>;
}

/// Renderer producing SVG markup.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SvgRenderer {
    output: String,
}

impl SvgRenderer {
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, scene: &SvgNode) -> ChartResult<()> {
        scene.validate()?;
        self.output = to_svg_string(scene);
        Ok(())
    }
}
