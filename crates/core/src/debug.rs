use crate::driver::DrawTarget;
use crate::projection::Projection;
use crate::surface::Scene;

/// Text draw target: records one line per draw instead of touching a GPU.
///
/// Useful for CLI output, logging, and exercising the frame loop headless.
#[derive(Debug, Default)]
pub struct DebugTextTarget {
    lines: Vec<String>,
}

impl DebugTextTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn draw_count(&self) -> usize {
        self.lines.len()
    }

    pub fn into_text(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

/// Human-readable summary of a scene seen through a projection.
pub fn describe(scene: &Scene, projection: &Projection) -> String {
    let surface = scene.surface();
    let uniforms = surface.material.uniforms();
    let wrap = uniforms.map_texture().wrap();
    format!(
        "shader={} time={:.5} map={} wrap=({:?}, {:?}) plane={:.3}x{:.3} ortho=[{:.1}, {:.1}, {:.4}, {:.4}]",
        surface.material.shader_set(),
        uniforms.time,
        uniforms.map_texture().path().display(),
        wrap.u,
        wrap.v,
        surface.geometry().width,
        surface.geometry().height,
        projection.left,
        projection.right,
        projection.top,
        projection.bottom,
    )
}

impl DrawTarget for DebugTextTarget {
    fn draw(&mut self, scene: &Scene, projection: &Projection) {
        self.lines.push(describe(scene, projection));
    }
}
