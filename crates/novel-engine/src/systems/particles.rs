//! Rising glow particles for the closing screen.
//!
//! Particles live in a normalized plane: Y spans [-1, 1] and X spans
//! [-aspect, aspect]. They drift upwards, wrap horizontally and respawn just
//! below the bottom edge once they leave the top.

use glam::Vec2;
use crate::api::types::TextureId;
use crate::components::layer::RenderLayer;
use crate::components::texture::BlendMode;
use crate::core::stage::Stage;
use crate::systems::rng::Rng;
use crate::ui::screen::ScreenLayout;

/// Tag carried by every particle quad.
pub const GLOW_TAG: &str = "glow_particle";

#[derive(Debug, Clone)]
pub struct GlowSettings {
    pub count: usize,
    /// On-screen size at the base resolution, in pixels.
    pub size_px: f32,
    pub base_speed_y: f32,
    pub random_speed_y: f32,
    pub random_speed_x: f32,
    /// Fraction of the width used when seeding.
    pub distribution_ratio_x: f32,
    pub alpha: f32,
}

impl Default for GlowSettings {
    fn default() -> Self {
        Self {
            count: 140,
            size_px: 3.0,
            base_speed_y: 0.06,
            random_speed_y: 0.08,
            random_speed_x: 0.04,
            distribution_ratio_x: 0.75,
            alpha: 0.9,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Glow {
    pos: Vec2,
    vel: Vec2,
}

pub struct GlowParticles {
    settings: GlowSettings,
    particles: Vec<Glow>,
    half_width: f32,
    rng: Rng,
}

impl GlowParticles {
    pub fn new(settings: GlowSettings, seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(settings.count),
            settings,
            half_width: 1.0,
            rng: Rng::new(seed),
        }
    }

    /// Reseed every particle for a canvas of the given aspect ratio.
    pub fn seed_for_aspect(&mut self, aspect: f32) {
        self.half_width = aspect.max(0.01);
        let spread = self.half_width * self.settings.distribution_ratio_x;
        self.particles.clear();
        for _ in 0..self.settings.count {
            let pos = Vec2::new(self.rng.range(-spread, spread), self.rng.range(-1.0, 1.0));
            let vel = Vec2::new(
                self.rng.centered() * self.settings.random_speed_x,
                self.settings.base_speed_y + self.rng.next_f32() * self.settings.random_speed_y,
            );
            self.particles.push(Glow { pos, vel });
        }
    }

    pub fn update(&mut self, dt: f32) {
        let width = self.half_width * 2.0;
        for p in &mut self.particles {
            p.pos += p.vel * dt;
            if p.pos.x < -self.half_width {
                p.pos.x += width;
            }
            if p.pos.x > self.half_width {
                p.pos.x -= width;
            }
            if p.pos.y > 1.05 {
                p.pos.y = -1.0 - self.rng.next_f32() * 0.2;
                p.pos.x = self.rng.range(-self.half_width, self.half_width);
            }
        }
    }

    /// Add one additive quad per particle to the stage.
    pub fn spawn_quads(&self, stage: &mut Stage, texture: TextureId, layer: RenderLayer, order: i32) {
        for _ in 0..self.particles.len() {
            stage.spawn_with(|q| {
                q.with_tag(GLOW_TAG)
                    .with_texture(texture)
                    .with_layer(layer)
                    .with_order(order)
                    .with_alpha(self.settings.alpha)
                    .with_blend(BlendMode::Additive)
            });
        }
    }

    /// Copy particle positions onto their quads.
    pub fn sync_quads(&self, stage: &mut Stage, screen: &ScreenLayout) {
        let unit = screen.height * 0.5;
        let size = Vec2::splat(screen.px(self.settings.size_px).max(1.0));
        let quads = stage.iter_mut().filter(|q| q.tag == GLOW_TAG);
        for (quad, p) in quads.zip(self.particles.iter()) {
            quad.pos = p.pos * unit;
            quad.size = size;
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.particles.iter().map(|p| p.pos)
    }
}
