//! Animated map logo core: one textured plane, an orthographic camera and a
//! frame loop that feeds elapsed time into the shader.
//!
//! # Invariants
//! - Projection x range is fixed at [-1, 1]; only y scales with the viewport.
//! - The surface rotation is set once at construction.
//! - `time` is the only uniform written per frame; `map_texture` never changes.
//! - The frame driver owns the clock and the render context. No globals.

mod clock;
mod debug;
mod driver;
mod material;
mod projection;
mod surface;

pub use clock::{AnimationClock, ClockTick, ManualTimeSource, SystemTimeSource, TimeSource};
pub use debug::{DebugTextTarget, describe};
pub use driver::{
    DEFAULT_TIME_SCALE, DrawTarget, FrameDriver, FrameReport, FrameScheduler, RenderContext,
};
pub use material::{
    DEFAULT_MAP_TEXTURE, Material, ShaderSetId, TextureBinding, TextureWrap, Uniforms, WrapMode,
};
pub use projection::{CAMERA_DISTANCE, Projection, ViewportState, compute_projection};
pub use surface::{
    PlaneGeometry, PlaneVertex, SURFACE_HEIGHT, SURFACE_WIDTH, Scene, Surface, create_surface,
};

/// Errors from core configuration.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("unknown shader set: {0} (expected one of: nodd, noddy)")]
    UnknownShaderSet(String),
}

pub fn crate_info() -> &'static str {
    "noddy-core v0.1.0"
}
