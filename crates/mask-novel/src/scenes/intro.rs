use glam::Vec2;
use novel_engine::*;

use crate::factory::SceneKind;
use super::common::{Ctx, Label, SceneCore};

const TEXT_SIZE: Vec2 = Vec2::new(1024.0, 256.0);

/// Shown one per click; the click after the last one starts the story.
const CARDS: [(&str, f32); 3] = [
    ("Global Game Jam 2026", 48.0),
    ("お題は Mask", 56.0),
    ("始まるよ～", 64.0),
];

pub struct IntroScene {
    core: SceneCore<()>,
    text: Label,
    card: usize,
}

impl IntroScene {
    pub fn new(init: &SceneInit, ctx: &mut Ctx<'_>) -> Self {
        let mut core = SceneCore::with_layer(init, Stage::new(), InteractiveLayer::bare());
        let (text, font_px) = CARDS[0];
        let text = Label::spawn(&mut core.stage, &mut core.textures, ctx.host, &init.screen, text, font_px, TEXT_SIZE, Vec2::ZERO);
        Self { core, text, card: 0 }
    }

    fn advance(&mut self, ctx: &mut Ctx<'_>) {
        self.card += 1;
        match CARDS.get(self.card) {
            Some((text, font_px)) => self.text.set_text(ctx.host, text, *font_px),
            None => ctx.change_scene(SceneKind::Game),
        }
    }
}

impl Scene<SceneKind> for IntroScene {
    fn start(&mut self, _ctx: &mut Ctx<'_>) {
        self.core.start();
    }

    fn stop(&mut self) {
        self.core.stop();
    }

    fn dispose(&mut self, ctx: &mut Ctx<'_>) {
        self.core.dispose(ctx);
    }

    fn is_running(&self) -> bool {
        self.core.is_running()
    }

    fn listeners(&self) -> ListenerMask {
        self.core.listeners(ListenerMask::of(&[InputKind::Click, InputKind::Resize]))
    }

    fn update(&mut self, _ctx: &mut Ctx<'_>, _dt: f32) {}

    fn handle_input(&mut self, ctx: &mut Ctx<'_>, event: &InputEvent) {
        if let UiEvent::Backdrop = self.core.handle(ctx, event) {
            self.advance(ctx);
        }
    }

    fn resize(&mut self, ctx: &mut Ctx<'_>) {
        self.core.relayout(ctx);
        self.text.layout(&mut self.core.stage, &ctx.screen);
    }

    fn stage(&self) -> &Stage {
        &self.core.stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::testing::World;

    #[test]
    fn third_click_moves_on() {
        let mut world = World::new();
        let click = InputEvent::Click { x: 0.1, y: 0.1, button: PointerButton::Primary };
        let mut scene = IntroScene::new(&World::init(4), &mut world.ctx());
        assert!(scene.is_ready(&world.host));
        scene.start(&mut world.ctx());
        assert!(!scene.listeners().contains(InputKind::PointerMove));

        world.host.drain();
        scene.handle_input(&mut world.ctx(), &click);
        let painted = world.host.drain().into_iter().any(|c| match c {
            HostCommand::PaintTexture { content: TextureContent::Label { text, .. }, .. } => text == "お題は Mask",
            _ => false,
        });
        assert!(painted);
        scene.handle_input(&mut world.ctx(), &click);
        assert_eq!(world.transition, None);
        scene.handle_input(&mut world.ctx(), &click);
        assert_eq!(world.transition, Some(SceneKind::Game));
    }

    #[test]
    fn only_the_card_is_allocated() {
        let mut world = World::new();
        let scene = IntroScene::new(&World::init(4), &mut world.ctx());
        assert_eq!(world.host.owned_by(SceneToken(4)), 1);
        assert_eq!(scene.stage().len(), 1);
        assert!(scene.core.layer.config_panel().is_none());
    }

    #[test]
    fn dispose_leaves_nothing_behind() {
        let mut world = World::new();
        let mut scene = IntroScene::new(&World::init(4), &mut world.ctx());
        scene.start(&mut world.ctx());
        scene.stop();
        scene.dispose(&mut world.ctx());
        assert_eq!(world.host.owned_by(SceneToken(4)), 0);
        assert!(scene.listeners().is_empty());
        scene.handle_input(&mut world.ctx(), &InputEvent::Click { x: 0.0, y: 0.0, button: PointerButton::Primary });
        assert_eq!(world.transition, None);
    }
}
