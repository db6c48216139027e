//! wgpu render backend for the animated map logo.
//!
//! Draws one textured plane through the core projection with the shader set
//! named by the material.
//!
//! # Invariants
//! - The renderer never mutates the scene; it only reads uniforms.
//! - The map sampler's address modes follow the texture binding's wrap.

mod gpu;
mod shaders;
mod texture;

pub use gpu::{LogoRenderer, SurfaceFrame};
pub use shaders::{ShaderSources, UNIFORM_INTERFACE, shader_sources};
pub use texture::{MapTexture, address_mode, sampler_descriptor};

/// Errors from the render backend.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("image load error: {0}")]
    Image(#[from] image::ImageError),
    #[error("texture dimensions must be non-zero, got {width}x{height}")]
    ZeroDimensions { width: u32, height: u32 },
}
