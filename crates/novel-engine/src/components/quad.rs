use glam::Vec2;
use crate::api::types::{QuadId, TextureId};
use crate::components::layer::RenderLayer;
use crate::components::texture::BlendMode;

/// A textured, axis-aligned rectangle in the pixel-space UI layer.
/// Origin at the canvas centre, Y up; `pos` is the quad's centre.
#[derive(Debug, Clone)]
pub struct Quad {
    pub id: QuadId,
    /// String tag for finding quads by name.
    pub tag: String,
    /// Hidden quads are neither drawn nor hit-tested.
    pub visible: bool,
    pub pos: Vec2,
    /// Rendered size in pixels.
    pub size: Vec2,
    pub layer: RenderLayer,
    /// Draw order inside the layer (higher draws later).
    pub order: i32,
    /// None draws nothing but keeps the quad hit-testable.
    pub texture: Option<TextureId>,
    pub alpha: f32,
    /// Brightness multiplier (1.0 = untinted).
    pub tint: f32,
    pub blend: BlendMode,
}

impl Quad {
    pub fn new(id: QuadId) -> Self {
        Self {
            id,
            tag: String::new(),
            visible: true,
            pos: Vec2::ZERO,
            size: Vec2::ONE,
            layer: RenderLayer::Content,
            order: 0,
            texture: None,
            alpha: 1.0,
            tint: 1.0,
            blend: BlendMode::Alpha,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn with_texture(mut self, texture: TextureId) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Whether a pixel-space point falls inside the quad (edges inclusive).
    pub fn contains(&self, point: Vec2) -> bool {
        let half = self.size * 0.5;
        let d = (point - self.pos).abs();
        self.size.x > 0.0 && self.size.y > 0.0 && d.x <= half.x && d.y <= half.y
    }

    /// Texture-space coordinates of a point: u grows rightwards, v grows downwards,
    /// both 0..1 across the quad.
    pub fn local_uv(&self, point: Vec2) -> Vec2 {
        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            return Vec2::ZERO;
        }
        let local = (point - self.pos) / self.size;
        Vec2::new(local.x + 0.5, 0.5 - local.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_checks_half_extents() {
        let quad = Quad::new(QuadId(1))
            .with_pos(Vec2::new(100.0, 50.0))
            .with_size(Vec2::new(40.0, 20.0));
        assert!(quad.contains(Vec2::new(100.0, 50.0)));
        assert!(quad.contains(Vec2::new(120.0, 60.0)));
        assert!(!quad.contains(Vec2::new(121.0, 50.0)));
        assert!(!quad.contains(Vec2::new(100.0, 39.0)));
    }

    #[test]
    fn local_uv_has_top_left_origin() {
        let quad = Quad::new(QuadId(1)).with_size(Vec2::new(200.0, 100.0));
        assert_eq!(quad.local_uv(Vec2::new(-100.0, 50.0)), Vec2::new(0.0, 0.0));
        assert_eq!(quad.local_uv(Vec2::new(100.0, -50.0)), Vec2::new(1.0, 1.0));
        assert_eq!(quad.local_uv(Vec2::ZERO), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn zero_sized_quad_is_never_hit() {
        let quad = Quad::new(QuadId(1)).with_size(Vec2::ZERO);
        assert!(!quad.contains(Vec2::ZERO));
    }
}
