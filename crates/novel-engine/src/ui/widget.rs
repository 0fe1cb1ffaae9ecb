//! Shared pieces of the canvas-drawn panels: base-coordinate hit rectangles
//! and the modal panel contract the interactive layer dispatches through.

use glam::Vec2;
use crate::api::types::{QuadId, SceneToken, TextureId};
use crate::components::layer::RenderLayer;
use crate::components::texture::TextureContent;
use crate::core::host::Host;
use crate::core::stage::Stage;
use crate::ui::screen::ScreenLayout;

/// A clickable rectangle in a panel's base coordinates (top-left origin, Y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRect<A> {
    pub action: A,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl<A: Copy> HitRect<A> {
    pub const fn new(action: A, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { action, x, y, w, h }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    /// Horizontal position inside the rect as a rounded, clamped percent.
    pub fn percent_at(&self, x: f32) -> u8 {
        if self.w <= 0.0 {
            return 0;
        }
        let t = (x - self.x) / self.w;
        (t * 100.0).clamp(0.0, 100.0).round() as u8
    }
}

/// First rect containing `p`.
pub fn hit_test<A: Copy>(rects: &[HitRect<A>], p: Vec2) -> Option<HitRect<A>> {
    rects.iter().copied().find(|r| r.contains(p))
}

/// A canvas-textured quad that shows one panel, sized from base constants.
/// Owns its quad and texture; panels wrap it with their own state.
#[derive(Debug)]
pub struct PanelSurface {
    pub quad: QuadId,
    pub texture: TextureId,
    base_size: Vec2,
    size: Vec2,
}

impl PanelSurface {
    /// Spawn a hidden, centred panel quad and its texture.
    pub fn spawn(
        stage: &mut Stage,
        host: &mut Host,
        owner: SceneToken,
        screen: &ScreenLayout,
        base_size: Vec2,
        tag: &str,
        content: TextureContent,
    ) -> Self {
        let size = screen.scaled(base_size);
        let texture = host.create_texture(owner, size, content);
        let quad = stage.spawn_with(|q| {
            q.with_tag(tag)
                .with_size(size)
                .with_layer(RenderLayer::Modal)
                .with_texture(texture)
                .hidden()
        });
        Self { quad, texture, base_size, size }
    }

    pub fn is_visible(&self, stage: &Stage) -> bool {
        stage.is_visible(self.quad)
    }

    pub fn set_visible(&self, stage: &mut Stage, visible: bool) {
        stage.set_visible(self.quad, visible);
    }

    /// Pointer position in base panel coordinates, if it lands on the visible panel.
    pub fn local_point(&self, stage: &Stage, point: Vec2) -> Option<Vec2> {
        let quad = stage.get(self.quad)?;
        if !quad.visible || !quad.contains(point) {
            return None;
        }
        Some(quad.local_uv(point) * self.base_size)
    }

    /// Re-centre and rescale; returns the new pixel size for the repaint.
    pub fn layout(&mut self, stage: &mut Stage, screen: &ScreenLayout) -> Vec2 {
        self.size = screen.scaled(self.base_size);
        if let Some(q) = stage.get_mut(self.quad) {
            q.size = self.size;
            q.pos = Vec2::ZERO;
        }
        self.size
    }

    pub fn paint(&self, host: &mut Host, content: TextureContent) {
        host.paint_texture(self.texture, self.size, content);
    }

    pub fn release(&self, stage: &mut Stage, host: &mut Host) {
        stage.despawn(self.quad);
        host.release_texture(self.texture);
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }
}
