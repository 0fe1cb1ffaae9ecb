//! Design-resolution scaling.
//!
//! Every layout constant in the UI is authored against a 1024×576 canvas.
//! The canvas is fitted inside its container at that aspect ratio, and every
//! constant is multiplied by one uniform factor.

use glam::Vec2;
use crate::renderer::camera::OrthoCamera;

pub const BASE_WIDTH: f32 = 1024.0;
pub const BASE_HEIGHT: f32 = 576.0;
pub const BASE_ASPECT: f32 = BASE_WIDTH / BASE_HEIGHT;

/// Anchor points in normalized canvas space (0,0 = bottom-left, 1,1 = top-right).
pub mod anchor {
    use glam::Vec2;

    pub const CENTER: Vec2 = Vec2::new(0.5, 0.5);
    pub const TOP_RIGHT: Vec2 = Vec2::new(1.0, 1.0);
    pub const BOTTOM_CENTER: Vec2 = Vec2::new(0.5, 0.0);
    pub const BOTTOM_RIGHT: Vec2 = Vec2::new(1.0, 0.0);
}

/// `min(width / 1024, height / 576)`; zero for a collapsed canvas.
pub fn scale_factor(width: f32, height: f32) -> f32 {
    if width <= 0.0 || height <= 0.0 {
        return 0.0;
    }
    (width / BASE_WIDTH).min(height / BASE_HEIGHT)
}

pub fn scale_value(base: f32, width: f32, height: f32) -> f32 {
    base * scale_factor(width, height)
}

pub fn scaled_size(base: Vec2, width: f32, height: f32) -> Vec2 {
    base * scale_factor(width, height)
}

/// Largest canvas with the base aspect ratio that fits the container, rounded to pixels.
pub fn fitted_canvas_size(container_width: f32, container_height: f32) -> Vec2 {
    if container_width <= 0.0 || container_height <= 0.0 {
        return Vec2::ZERO;
    }
    if container_width / container_height > BASE_ASPECT {
        Vec2::new((container_height * BASE_ASPECT).round(), container_height.round())
    } else {
        Vec2::new(container_width.round(), (container_width / BASE_ASPECT).round())
    }
}

/// Canvas size plus the uniform factor derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenLayout {
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

impl ScreenLayout {
    pub fn from_canvas(width: f32, height: f32) -> Self {
        Self { width, height, scale: scale_factor(width, height) }
    }

    /// Fit a canvas into the container first.
    pub fn from_container(container_width: f32, container_height: f32) -> Self {
        let size = fitted_canvas_size(container_width, container_height);
        Self::from_canvas(size.x, size.y)
    }

    pub fn base() -> Self {
        Self::from_canvas(BASE_WIDTH, BASE_HEIGHT)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn half(&self) -> Vec2 {
        self.size() * 0.5
    }

    pub fn aspect(&self) -> f32 {
        if self.height <= 0.0 {
            BASE_ASPECT
        } else {
            self.width / self.height
        }
    }

    /// Scale one base-resolution length.
    pub fn px(&self, base: f32) -> f32 {
        base * self.scale
    }

    /// Scale a base-resolution size.
    pub fn scaled(&self, base: Vec2) -> Vec2 {
        base * self.scale
    }

    pub fn camera(&self) -> OrthoCamera {
        OrthoCamera::new(self.width, self.height)
    }

    /// NDC pointer position to canvas pixels.
    pub fn ndc_to_world(&self, ndc: Vec2) -> Vec2 {
        self.camera().ndc_to_world(ndc)
    }

    /// Centre of an element of `size` placed by anchor and pivot.
    /// `margin` (already scaled) pushes the element inwards from whichever
    /// edge the anchor sits on; a centred anchor ignores it on that axis.
    pub fn anchored(&self, anchor: Vec2, pivot: Vec2, size: Vec2, margin: Vec2) -> Vec2 {
        let half = self.half();
        let point = Vec2::new(-half.x + self.width * anchor.x, -half.y + self.height * anchor.y);
        let inset = Vec2::new(inward(anchor.x) * margin.x, inward(anchor.y) * margin.y);
        let pivot_offset = (pivot - Vec2::splat(0.5)) * size;
        point + inset - pivot_offset
    }
}

impl Default for ScreenLayout {
    fn default() -> Self {
        Self::base()
    }
}

fn inward(anchor: f32) -> f32 {
    if anchor < 0.5 {
        1.0
    } else if anchor > 0.5 {
        -1.0
    } else {
        0.0
    }
}
