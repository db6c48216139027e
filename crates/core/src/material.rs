use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::CoreError;

/// Default world map asset, relative to the working directory.
pub const DEFAULT_MAP_TEXTURE: &str = "tex/world-map-1.jpg";

/// Identifies which vertex/fragment program pair drives the logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderSetId {
    Nodd,
    Noddy,
}

impl ShaderSetId {
    pub const ALL: [ShaderSetId; 2] = [ShaderSetId::Nodd, ShaderSetId::Noddy];

    pub fn identifier(&self) -> &'static str {
        match self {
            ShaderSetId::Nodd => "nodd",
            ShaderSetId::Noddy => "noddy",
        }
    }
}

impl fmt::Display for ShaderSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for ShaderSetId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.identifier() == s)
            .ok_or_else(|| CoreError::UnknownShaderSet(s.to_string()))
    }
}

/// Texture sampling policy outside [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    #[default]
    ClampToEdge,
    Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureWrap {
    pub u: WrapMode,
    pub v: WrapMode,
}

impl TextureWrap {
    /// Tiles horizontally only; the map wraps around the globe but not pole to pole.
    pub const HORIZONTAL_REPEAT: TextureWrap = TextureWrap {
        u: WrapMode::Repeat,
        v: WrapMode::ClampToEdge,
    };
}

/// Reference to the external image bound to the `map_texture` slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureBinding {
    path: PathBuf,
    wrap: TextureWrap,
}

impl TextureBinding {
    pub fn new(path: impl Into<PathBuf>, wrap: TextureWrap) -> Self {
        Self {
            path: path.into(),
            wrap,
        }
    }

    /// The world map binding: horizontal repeat, vertical clamp.
    pub fn world_map(path: impl Into<PathBuf>) -> Self {
        Self::new(path, TextureWrap::HORIZONTAL_REPEAT)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn wrap(&self) -> TextureWrap {
        self.wrap
    }
}

/// The two uniform slots every shader set declares.
#[derive(Debug, Clone, PartialEq)]
pub struct Uniforms {
    /// Scaled elapsed time. Written once per frame by the frame driver.
    pub time: f32,
    map_texture: TextureBinding,
}

impl Uniforms {
    pub fn map_texture(&self) -> &TextureBinding {
        &self.map_texture
    }
}

/// Shader-driven material: a shader set plus its uniforms.
///
/// `map_texture` is fixed at construction; only `time` can change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    shader_set: ShaderSetId,
    uniforms: Uniforms,
}

impl Material {
    pub fn new(shader_set: ShaderSetId, map_texture: TextureBinding) -> Self {
        Self {
            shader_set,
            uniforms: Uniforms {
                time: 0.0,
                map_texture,
            },
        }
    }

    pub fn shader_set(&self) -> ShaderSetId {
        self.shader_set
    }

    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    pub fn time(&self) -> f32 {
        self.uniforms.time
    }

    pub fn set_time(&mut self, time: f32) {
        self.uniforms.time = time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_set_parses_both_identifiers() {
        assert_eq!("nodd".parse::<ShaderSetId>().ok(), Some(ShaderSetId::Nodd));
        assert_eq!("noddy".parse::<ShaderSetId>().ok(), Some(ShaderSetId::Noddy));
        for id in ShaderSetId::ALL {
            assert_eq!(id.to_string().parse::<ShaderSetId>().ok(), Some(id));
        }
    }

    #[test]
    fn unknown_shader_set_is_rejected() {
        let err = "noddies".parse::<ShaderSetId>().unwrap_err();
        assert!(err.to_string().contains("noddies"));
    }

    #[test]
    fn world_map_wraps_horizontally() {
        let binding = TextureBinding::world_map(DEFAULT_MAP_TEXTURE);
        assert_eq!(binding.wrap().u, WrapMode::Repeat);
        assert_eq!(binding.wrap().v, WrapMode::ClampToEdge);
        assert_eq!(binding.path(), Path::new("tex/world-map-1.jpg"));
    }

    #[test]
    fn material_starts_at_time_zero() {
        let mut material = Material::new(
            ShaderSetId::Noddy,
            TextureBinding::world_map(DEFAULT_MAP_TEXTURE),
        );
        assert_eq!(material.time(), 0.0);
        material.set_time(0.5);
        assert_eq!(material.uniforms().time, 0.5);
        assert_eq!(material.shader_set(), ShaderSetId::Noddy);
    }
}
