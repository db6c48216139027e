use glam::{Mat4, Vec3};

/// Distance of the camera from the logo plane along +Z.
pub const CAMERA_DISTANCE: f32 = 10.0;

/// Pixel size of the render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportState {
    pub width: u32,
    pub height: u32,
}

impl ViewportState {
    /// Zero dimensions are clamped to 1 so the aspect ratio stays finite.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Height over width.
    pub fn aspect_ratio(&self) -> f32 {
        self.height as f32 / self.width as f32
    }
}

/// Orthographic viewing volume spanning x in [-1, 1] with y scaled by the
/// viewport aspect ratio. `top` is negative: +Y points screen-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn from_viewport(viewport: ViewportState) -> Self {
        let aspect = viewport.aspect_ratio();
        Self {
            left: -1.0,
            right: 1.0,
            top: -aspect,
            bottom: aspect,
            near: 1.0,
            far: 100.0,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(Vec3::new(0.0, 0.0, CAMERA_DISTANCE), Vec3::ZERO, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Compute the projection for a viewport of the given pixel size.
pub fn compute_projection(viewport_width: u32, viewport_height: u32) -> Projection {
    Projection::from_viewport(ViewportState::new(viewport_width, viewport_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_hd_projection() {
        let p = compute_projection(1920, 1080);
        assert_eq!(p.left, -1.0);
        assert_eq!(p.right, 1.0);
        assert_eq!(p.top, -0.5625);
        assert_eq!(p.bottom, 0.5625);
        assert_eq!(p.near, 1.0);
        assert_eq!(p.far, 100.0);
    }

    #[test]
    fn horizontal_extent_ignores_viewport() {
        for (w, h) in [(1, 1), (640, 480), (480, 640), (3440, 1440), (7, 1000)] {
            let p = compute_projection(w, h);
            assert_eq!(p.left, -1.0);
            assert_eq!(p.right, 1.0);
            assert_eq!(p.top, -p.bottom);
            assert_eq!(p.top, -(h as f32 / w as f32));
        }
    }

    #[test]
    fn zero_viewport_is_clamped() {
        let p = compute_projection(0, 0);
        assert_eq!(p.bottom, 1.0);
        assert!(p.view_projection().is_finite());
    }

    #[test]
    fn plane_center_lands_in_depth_range() {
        let p = compute_projection(1280, 720);
        let clip = p.view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(clip.z > 0.0 && clip.z < 1.0);
        assert!(clip.x.abs() < 1e-6);
    }

    #[test]
    fn positive_world_y_maps_screen_down() {
        let p = compute_projection(1000, 500);
        let clip = p.view_projection() * glam::Vec4::new(0.0, 0.25, 0.0, 1.0);
        // wgpu clip space has +Y up, so screen-down is negative.
        assert!((clip.y + 0.5).abs() < 1e-6);
    }
}
