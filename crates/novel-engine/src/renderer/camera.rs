use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Pixel-space orthographic camera for the UI layer.
/// One world unit is one canvas pixel; the origin is the canvas centre, Y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoCamera {
    /// Visible width in pixels.
    pub width: f32,
    /// Visible height in pixels.
    pub height: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub projection: [[f32; 4]; 4],
}

impl OrthoCamera {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Origin at center, Y-up, Z in [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        let half = self.half_extents();
        Mat4::orthographic_rh(-half.x, half.x, -half.y, half.y, 0.0, 1.0)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            projection: self.projection_matrix().to_cols_array_2d(),
        }
    }

    /// Follow the canvas size after a relayout.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }

    /// Map normalized device coordinates onto the pixel plane.
    pub fn ndc_to_world(&self, ndc: Vec2) -> Vec2 {
        ndc * self.half_extents()
    }

    pub fn world_to_ndc(&self, point: Vec2) -> Vec2 {
        let half = self.half_extents();
        if half.x <= 0.0 || half.y <= 0.0 {
            return Vec2::ZERO;
        }
        point / half
    }

    /// Whether a pixel-space point lies on the canvas.
    pub fn is_visible(&self, point: Vec2) -> bool {
        let half = self.half_extents();
        point.x.abs() <= half.x && point.y.abs() <= half.y
    }
}
