use glam::Vec2;

/// Canvas bounding rectangle in client (CSS pixel) coordinates,
/// as returned by `getBoundingClientRect()`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Follow a canvas resize. A measured rect keeps its centre; an unmeasured
    /// one is taken as centred in a container anchored at the page origin.
    /// The page should still report the exact rect after layout settles.
    pub fn follow_resize(&self, container: Vec2, canvas: Vec2) -> Self {
        let centre = if self.is_measured() {
            Vec2::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
        } else {
            container * 0.5
        };
        Self::new(centre.x - canvas.x * 0.5, centre.y - canvas.y * 0.5, canvas.x, canvas.y)
    }

    /// Convert a client position to normalized device coordinates (Y up).
    /// A collapsed rect maps everything to the origin.
    pub fn to_ndc(&self, client_x: f32, client_y: f32) -> Vec2 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Vec2::ZERO;
        }
        let x = ((client_x - self.left) / self.width) * 2.0 - 1.0;
        let y = -(((client_y - self.top) / self.height) * 2.0 - 1.0);
        Vec2::new(x, y)
    }
}
