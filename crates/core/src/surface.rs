use std::f32::consts::PI;

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::material::Material;

/// World-space width of the logo plane; spans the projection's x range.
pub const SURFACE_WIDTH: f32 = 2.0;
/// World-space height of the logo plane; fixes the logo at 3:1.
pub const SURFACE_HEIGHT: f32 = 2.0 / 3.0;

/// A plane vertex: position plus texture coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Single-segment plane in the XY plane facing +Z.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneGeometry {
    pub width: f32,
    pub height: f32,
}

impl PlaneGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Top row first. v runs down the image: the top row samples texel row 0,
    /// the first row of the decoded image.
    pub fn vertices(&self) -> [PlaneVertex; 4] {
        let hw = self.width * 0.5;
        let hh = self.height * 0.5;
        #[rustfmt::skip]
        let vertices = [
            PlaneVertex { position: [-hw,  hh, 0.0], uv: [0.0, 0.0] },
            PlaneVertex { position: [ hw,  hh, 0.0], uv: [1.0, 0.0] },
            PlaneVertex { position: [-hw, -hh, 0.0], uv: [0.0, 1.0] },
            PlaneVertex { position: [ hw, -hh, 0.0], uv: [1.0, 1.0] },
        ];
        vertices
    }

    pub fn indices(&self) -> [u16; 6] {
        [0, 2, 1, 2, 3, 1]
    }
}

/// The one renderable plane: geometry, material and a static orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    geometry: PlaneGeometry,
    rotation: Quat,
    pub material: Material,
}

impl Surface {
    pub fn geometry(&self) -> &PlaneGeometry {
        &self.geometry
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.rotation)
    }

    /// Outward normal of the textured face after rotation.
    pub fn facing(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

/// Build the logo plane. The half turns about Y and Z show the face whose UV
/// layout matches the shaders to the camera.
pub fn create_surface(material: Material) -> Surface {
    Surface {
        geometry: PlaneGeometry::new(SURFACE_WIDTH, SURFACE_HEIGHT),
        rotation: Quat::from_euler(EulerRot::XYZ, 0.0, PI, PI),
        material,
    }
}

/// Drawable collection. Holds exactly one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    surface: Surface,
}

impl Scene {
    pub fn with_surface(surface: Surface) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{DEFAULT_MAP_TEXTURE, ShaderSetId, TextureBinding};
    use crate::projection::compute_projection;
    use glam::Vec4;

    fn surface() -> Surface {
        create_surface(Material::new(
            ShaderSetId::Nodd,
            TextureBinding::world_map(DEFAULT_MAP_TEXTURE),
        ))
    }

    #[test]
    fn plane_size() {
        let s = surface();
        assert_eq!(s.geometry().width, 2.0);
        assert_eq!(s.geometry().height, 2.0 / 3.0);
    }

    #[test]
    fn rotation_turns_face_around() {
        let s = surface();
        // Y and Z half turns combine into a half turn about X.
        assert!(s.facing().abs_diff_eq(Vec3::NEG_Z, 1e-6));
        let up = s.rotation() * Vec3::Y;
        assert!(up.abs_diff_eq(Vec3::NEG_Y, 1e-6));
        let right = s.rotation() * Vec3::X;
        assert!(right.abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn plane_spans_full_width() {
        let verts = surface().geometry().vertices();
        let min_x = verts.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        let max_x = verts.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert_eq!(min_x, -1.0);
        assert_eq!(max_x, 1.0);
    }

    #[test]
    fn map_is_upright_on_screen() {
        let s = surface();
        let mvp = compute_projection(1920, 1080).view_projection() * s.model_matrix();
        for v in s.geometry().vertices() {
            let [x, y, z] = v.position;
            let clip = mvp * Vec4::new(x, y, z, 1.0);
            // Screen-top samples the first image row; screen-left samples u = 0.
            if clip.y > 0.0 {
                assert_eq!(v.uv[1], 0.0, "top vertex {v:?} clip {clip:?}");
            } else {
                assert_eq!(v.uv[1], 1.0, "bottom vertex {v:?} clip {clip:?}");
            }
            if clip.x < 0.0 {
                assert_eq!(v.uv[0], 0.0);
            } else {
                assert_eq!(v.uv[0], 1.0);
            }
        }
    }

    #[test]
    fn indices_reference_all_vertices() {
        let geom = PlaneGeometry::new(2.0, 1.0);
        let mut seen = [false; 4];
        for i in geom.indices() {
            seen[i as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn scene_holds_one_surface() {
        let scene = Scene::with_surface(surface());
        assert_eq!(scene.surface().material.shader_set(), ShaderSetId::Nodd);
    }
}
