use glam::Vec2;
use novel_engine::*;

use crate::factory::SceneKind;
use super::common::{navigate, Ctx, Label, SceneCore, Theme};

const THANKS: &str = "Thank you for playing!";
const THANKS_FONT_PX: f32 = 72.0;
const THANKS_SIZE: Vec2 = Vec2::new(1024.0, 320.0);

const GLOW_TEXTURE_SIZE: Vec2 = Vec2::new(32.0, 32.0);

fn glow_settings() -> GlowSettings {
    GlowSettings {
        count: 220,
        size_px: 3.0,
        base_speed_y: 0.05,
        random_speed_y: 0.08,
        random_speed_x: 0.05,
        distribution_ratio_x: 0.85,
        alpha: 0.9,
    }
}

/// Closing screen. Any click outside the UI returns to the title.
pub struct FinScene {
    core: SceneCore<()>,
    theme: Theme,
    thanks: Label,
    glow: GlowParticles,
}

impl FinScene {
    pub fn new(init: &SceneInit, ctx: &mut Ctx<'_>, manifest: &AssetManifest) -> Result<Self, SceneError> {
        let theme = Theme::from_manifest(manifest, Theme::SANCTUARY)?;
        let mut core = SceneCore::new(init, ctx.host);

        let mut glow = GlowParticles::new(glow_settings(), init.token.0);
        glow.seed_for_aspect(init.screen.aspect());
        let dot = core.textures.create(ctx.host, GLOW_TEXTURE_SIZE, TextureContent::Glow);
        glow.spawn_quads(&mut core.stage, dot, RenderLayer::Content, 0);
        glow.sync_quads(&mut core.stage, &init.screen);

        let thanks = Label::spawn(
            &mut core.stage,
            &mut core.textures,
            ctx.host,
            &init.screen,
            THANKS,
            THANKS_FONT_PX,
            THANKS_SIZE,
            Vec2::ZERO,
        );
        Ok(Self { core, theme, thanks, glow })
    }
}

impl Scene<SceneKind> for FinScene {
    fn is_ready(&self, host: &Host) -> bool {
        self.core.is_ready(host)
    }

    fn start(&mut self, ctx: &mut Ctx<'_>) {
        self.core.start();
        self.theme.play(ctx);
    }

    fn stop(&mut self) {
        self.core.stop();
    }

    fn dispose(&mut self, ctx: &mut Ctx<'_>) {
        if self.core.dispose(ctx) {
            Theme::stop(ctx);
        }
    }

    fn is_running(&self) -> bool {
        self.core.is_running()
    }

    fn listeners(&self) -> ListenerMask {
        self.core.listeners(ListenerMask::ALL)
    }

    fn update(&mut self, ctx: &mut Ctx<'_>, dt: f32) {
        if self.core.is_disposed() {
            return;
        }
        self.glow.update(dt);
        self.glow.sync_quads(&mut self.core.stage, &ctx.screen);
    }

    fn handle_input(&mut self, ctx: &mut Ctx<'_>, event: &InputEvent) {
        self.theme.retry(ctx, event);
        match self.core.handle(ctx, event) {
            UiEvent::Backdrop => {
                ctx.audio.play_click();
                ctx.change_scene(SceneKind::Title);
            }
            other => {
                navigate(ctx, &other);
            }
        }
    }

    fn resize(&mut self, ctx: &mut Ctx<'_>) {
        self.core.relayout(ctx);
        self.thanks.layout(&mut self.core.stage, &ctx.screen);
        self.glow.seed_for_aspect(ctx.screen.aspect());
        self.glow.sync_quads(&mut self.core.stage, &ctx.screen);
    }

    fn stage(&self) -> &Stage {
        &self.core.stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::testing::World;
    use novel_engine::systems::particles::GLOW_TAG;

    fn manifest() -> AssetManifest {
        AssetManifest::from_json(r#"{ "bgm": { "sanctuary": { "path": "loop.ogg" } } }"#).unwrap()
    }

    #[test]
    fn thanks_sits_above_the_glow() {
        let mut world = World::new();
        let scene = FinScene::new(&World::init(9), &mut world.ctx(), &manifest()).unwrap();
        let stage = scene.stage();
        assert_eq!(stage.iter().filter(|q| q.tag == GLOW_TAG).count(), 220);
        let label = stage.get(scene.thanks.quad).unwrap();
        assert_eq!(label.layer, RenderLayer::Content);
        assert!(stage.iter().filter(|q| q.tag == GLOW_TAG).all(|q| q.order < label.order && q.blend == BlendMode::Additive));
        assert_eq!(label.size, THANKS_SIZE);
    }

    #[test]
    fn backdrop_click_returns_to_title() {
        let mut world = World::new();
        let mut scene = FinScene::new(&World::init(9), &mut world.ctx(), &manifest()).unwrap();
        scene.start(&mut world.ctx());
        assert!(world.audio.is_bgm_playing());
        world.audio.drain();

        scene.handle_input(&mut world.ctx(), &InputEvent::Click { x: -0.5, y: 0.5, button: PointerButton::Primary });
        assert_eq!(world.transition, Some(SceneKind::Title));
        assert!(world.audio.commands().iter().any(|c| matches!(c, AudioCommand::PlayEffect { effect: SoundEffect::Click, .. })));
    }

    #[test]
    fn particles_rise_and_follow_resizes() {
        let mut world = World::new();
        let mut scene = FinScene::new(&World::init(9), &mut world.ctx(), &manifest()).unwrap();
        scene.start(&mut world.ctx());
        let before: Vec<Vec2> = scene.glow.positions().collect();
        scene.update(&mut world.ctx(), 0.1);
        let risen = scene.glow.positions().zip(before.iter()).filter(|(now, then)| now.y > then.y).count();
        assert!(risen > 200);

        world.screen = ScreenLayout::from_canvas(512.0, 288.0);
        scene.resize(&mut world.ctx());
        let label = scene.stage().get(scene.thanks.quad).unwrap();
        assert_eq!(label.size, THANKS_SIZE * 0.5);
        assert_eq!(scene.glow.len(), 220);
        assert!(scene.stage().iter().filter(|q| q.tag == GLOW_TAG).all(|q| q.pos.y.abs() <= 144.0));
    }

    #[test]
    fn dispose_stops_the_theme() {
        let mut world = World::new();
        let mut scene = FinScene::new(&World::init(9), &mut world.ctx(), &manifest()).unwrap();
        scene.start(&mut world.ctx());
        scene.dispose(&mut world.ctx());
        assert!(!world.audio.is_bgm_playing());
        assert_eq!(world.host.owned_by(SceneToken(9)), 0);
        scene.update(&mut world.ctx(), 0.1);
        assert!(scene.stage().is_empty());
    }
}
