use glam::Vec2;
use crate::api::types::{QuadId, SceneToken, TextureId};
use crate::components::layer::RenderLayer;
use crate::components::texture::TextureContent;
use crate::core::host::Host;
use crate::core::stage::Stage;
use crate::ui::screen::{anchor, ScreenLayout};

pub const GEAR_SIZE: f32 = 40.0;
pub const GEAR_MARGIN: f32 = 12.0;
/// Material Icons ligature.
pub const GEAR_GLYPH: &str = "settings";

/// The settings cog pinned to the top-right corner.
#[derive(Debug)]
pub struct GearButton {
    pub quad: QuadId,
    pub texture: TextureId,
}

impl GearButton {
    pub fn spawn(stage: &mut Stage, host: &mut Host, owner: SceneToken, screen: &ScreenLayout) -> Self {
        let size = Vec2::splat(GEAR_SIZE);
        let texture = host.create_texture(owner, size, TextureContent::GearIcon { glyph: GEAR_GLYPH.to_string() });
        let quad = stage.spawn_with(|q| q.with_tag("gear").with_layer(RenderLayer::Overlay).with_texture(texture));
        let gear = Self { quad, texture };
        gear.layout(stage, screen);
        gear
    }

    pub fn layout(&self, stage: &mut Stage, screen: &ScreenLayout) {
        let size = Vec2::splat(screen.px(GEAR_SIZE));
        let margin = Vec2::splat(screen.px(GEAR_MARGIN));
        let pos = screen.anchored(anchor::TOP_RIGHT, anchor::TOP_RIGHT, size, margin);
        if let Some(q) = stage.get_mut(self.quad) {
            q.size = size;
            q.pos = pos;
        }
    }

    pub fn contains(&self, stage: &Stage, point: Vec2) -> bool {
        stage.hits(self.quad, point)
    }

    pub fn release(&self, stage: &mut Stage, host: &mut Host) {
        stage.despawn(self.quad);
        host.release_texture(self.texture);
    }
}
