use glam::Vec2;
use novel_engine::*;

use crate::factory::SceneKind;
use super::common::{navigate, Ctx, DialogueBox, SceneCore, TextButton, Theme};

const CHOICE_SIZE: Vec2 = Vec2::new(120.0, 36.0);
const CHOICE_GAP: f32 = 10.0;
/// The third ending only shows up after the player hesitates this long.
const HIDDEN_CHOICE_DELAY: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    End1,
    End2,
    End3,
}

impl Ending {
    const ALL: [Ending; 3] = [Ending::End1, Ending::End2, Ending::End3];

    fn label(self) -> &'static str {
        match self {
            Self::End1 => "END1",
            Self::End2 => "END2",
            Self::End3 => "END3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryAction {
    Advance,
    Choose(Ending),
}

/// The main conversation, closing on a choice of endings.
pub struct StoryScene {
    core: SceneCore<StoryAction>,
    theme: Theme,
    dialogue: DialogueBox,
    choices: Vec<(Ending, TextButton)>,
    shown: usize,
    timers: Timers,
    hidden_choice: Option<TimerId>,
}

impl StoryScene {
    pub fn new(
        init: &SceneInit,
        ctx: &mut Ctx<'_>,
        manifest: &AssetManifest,
        lines: &[DialogueLine],
    ) -> Result<Self, SceneError> {
        DialogueBox::check_script(SceneKind::Game, lines)?;
        let theme = Theme::from_manifest(manifest, Theme::SANCTUARY)?;
        let mut core = SceneCore::new(init, ctx.host);
        let dialogue = DialogueBox::spawn(
            &mut core.stage,
            &mut core.textures,
            ctx.host,
            &init.screen,
            lines.to_vec(),
            init.config.message_speed,
        );
        core.layer.add_hotspot(dialogue.quad, StoryAction::Advance);

        let mut choices = Vec::with_capacity(Ending::ALL.len());
        for ending in Ending::ALL {
            let button = TextButton::spawn(&mut core.stage, &mut core.textures, ctx.host, ending.label(), CHOICE_SIZE, RenderLayer::Choices);
            button.set_visible(&mut core.stage, false);
            core.layer.add_hotspot(button.quad, StoryAction::Choose(ending));
            core.layer.set_hotspot_enabled(StoryAction::Choose(ending), false);
            choices.push((ending, button));
        }

        Ok(Self { core, theme, dialogue, choices, shown: 0, timers: Timers::new(), hidden_choice: None })
    }

    /// Offer the first two endings and start the clock on the third.
    fn show_choices(&mut self, ctx: &mut Ctx<'_>) {
        self.core.layer.set_hotspot_enabled(StoryAction::Advance, false);
        self.reveal_choices(2, &ctx.screen);
        if let Some(timer) = self.hidden_choice.take() {
            self.timers.cancel(timer);
        }
        self.hidden_choice = Some(self.timers.after(HIDDEN_CHOICE_DELAY));
    }

    fn reveal_choices(&mut self, count: usize, screen: &ScreenLayout) {
        self.shown = count.min(self.choices.len());
        for (i, (ending, button)) in self.choices.iter().enumerate() {
            let visible = i < self.shown;
            button.set_visible(&mut self.core.stage, visible);
            self.core.layer.set_hotspot_enabled(StoryAction::Choose(*ending), visible);
        }
        self.layout_choices(screen);
    }

    /// Centred column around the middle of the canvas.
    fn layout_choices(&mut self, screen: &ScreenLayout) {
        if self.shown == 0 {
            return;
        }
        let size = screen.scaled(CHOICE_SIZE);
        let step = size.y + screen.px(CHOICE_GAP);
        let total = self.shown as f32 * size.y + (self.shown - 1) as f32 * screen.px(CHOICE_GAP);
        let top = total / 2.0 - size.y / 2.0;
        for (i, (_, button)) in self.choices.iter().take(self.shown).enumerate() {
            button.place(&mut self.core.stage, Vec2::new(0.0, top - step * i as f32), size);
        }
    }

    fn choose(&mut self, ctx: &mut Ctx<'_>, ending: Ending) {
        ctx.audio.play_click();
        log::info!("selected {}", ending.label());
        match ending {
            Ending::End1 => ctx.host.alert(ending.label()),
            Ending::End2 => ctx.change_scene(SceneKind::End2),
            Ending::End3 => ctx.change_scene(SceneKind::End3),
        }
    }

    fn highlight(&mut self, host: &mut Host, hovered: Option<StoryAction>) {
        for (ending, button) in &mut self.choices {
            button.set_hovered(host, hovered == Some(StoryAction::Choose(*ending)));
        }
    }
}

impl Scene<SceneKind> for StoryScene {
    fn is_ready(&self, host: &Host) -> bool {
        self.core.is_ready(host)
    }

    fn start(&mut self, ctx: &mut Ctx<'_>) {
        self.core.start();
        self.theme.play(ctx);
        self.dialogue.begin(ctx);
    }

    fn stop(&mut self) {
        self.core.stop();
    }

    fn dispose(&mut self, ctx: &mut Ctx<'_>) {
        self.timers.clear();
        self.hidden_choice = None;
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
        self.dialogue.update(ctx, dt);
        for fired in self.timers.tick(dt) {
            if Some(fired) == self.hidden_choice {
                self.hidden_choice = None;
                self.reveal_choices(Ending::ALL.len(), &ctx.screen);
            }
        }
    }

    fn handle_input(&mut self, ctx: &mut Ctx<'_>, event: &InputEvent) {
        self.theme.retry(ctx, event);
        match self.core.handle(ctx, event) {
            UiEvent::Activate(StoryAction::Advance) => {
                if self.dialogue.click(ctx) == DialogueStep::Finished {
                    self.show_choices(ctx);
                }
            }
            UiEvent::Activate(StoryAction::Choose(ending)) => self.choose(ctx, ending),
            UiEvent::Hover(hovered) => self.highlight(ctx.host, hovered),
            UiEvent::ConfigChanged(state) => self.dialogue.set_speed(state.message_speed),
            other => {
                navigate(ctx, &other);
            }
        }
    }

    fn resize(&mut self, ctx: &mut Ctx<'_>) {
        self.core.relayout(ctx);
        self.dialogue.layout(&mut self.core.stage, &ctx.screen);
        self.layout_choices(&ctx.screen);
    }

    fn stage(&self) -> &Stage {
        &self.core.stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::testing::World;

    fn manifest() -> AssetManifest {
        AssetManifest::from_json(r#"{ "bgm": { "sanctuary": { "path": "loop.ogg" } } }"#).unwrap()
    }

    fn scene(world: &mut World, lines: Vec<DialogueLine>) -> StoryScene {
        let init = SceneInit { token: SceneToken(2), config: world.config, screen: ScreenLayout::base(), fullscreen: false };
        let mut scene = StoryScene::new(&init, &mut world.ctx(), &manifest(), &lines).unwrap();
        let gear = scene.core.layer.gear_texture().unwrap();
        world.host.settle(gear, &AssetOutcome::Loaded { width: 40.0, height: 40.0 });
        assert!(scene.is_ready(&world.host));
        scene.start(&mut world.ctx());
        scene
    }

    fn click_box(world: &mut World, scene: &mut StoryScene) {
        let pos = scene.core.stage.get(scene.dialogue.quad).unwrap().pos;
        let event = InputEvent::Click { x: pos.x / 512.0, y: pos.y / 288.0, button: PointerButton::Primary };
        scene.handle_input(&mut world.ctx(), &event);
    }

    fn click_choice(world: &mut World, scene: &mut StoryScene, ending: Ending) {
        let quad = scene.choices.iter().find(|(e, _)| *e == ending).unwrap().1.quad;
        let pos = scene.core.stage.get(quad).unwrap().pos;
        let event = InputEvent::Click { x: pos.x / 512.0, y: pos.y / 288.0, button: PointerButton::Primary };
        scene.handle_input(&mut world.ctx(), &event);
    }

    fn finish_script(world: &mut World, scene: &mut StoryScene) {
        // skip, then step past the last line
        click_box(world, scene);
        click_box(world, scene);
    }

    #[test]
    fn gear_glyph_gates_the_start() {
        let mut world = World::new();
        let init = SceneInit { token: SceneToken(2), config: world.config, screen: ScreenLayout::base(), fullscreen: false };
        let lines = vec![DialogueLine::new("神父", "「…」")];
        let scene = StoryScene::new(&init, &mut world.ctx(), &manifest(), &lines).unwrap();
        assert!(!scene.is_ready(&world.host));
    }

    #[test]
    fn start_plays_theme_and_first_line() {
        let mut world = World::new();
        let _scene = scene(&mut world, vec![DialogueLine::new("神父", "「シスター」")]);
        let commands = world.audio.drain();
        assert!(commands.iter().any(|c| matches!(c, AudioCommand::PlayBgm { track, looped: true, .. } if track == "loop.ogg")));
        assert!(world.audio.is_message_loop_playing());
    }

    #[test]
    fn choices_appear_after_last_line_and_third_after_delay() {
        let mut world = World::new();
        let mut scene = scene(&mut world, vec![DialogueLine::new("シスター", "「...」")]);
        assert_eq!(scene.shown, 0);
        finish_script(&mut world, &mut scene);
        assert_eq!(scene.shown, 2);
        assert!(!scene.core.stage.is_visible(scene.choices[2].1.quad));

        // Further box clicks no longer reach the dialogue.
        click_box(&mut world, &mut scene);
        assert_eq!(scene.shown, 2);

        scene.update(&mut world.ctx(), 4.9);
        assert_eq!(scene.shown, 2);
        scene.update(&mut world.ctx(), 0.2);
        assert_eq!(scene.shown, 3);
        assert!(scene.core.stage.is_visible(scene.choices[2].1.quad));
    }

    #[test]
    fn choices_stack_around_centre() {
        let mut world = World::new();
        let mut scene = scene(&mut world, vec![DialogueLine::new("シスター", "「...」")]);
        finish_script(&mut world, &mut scene);
        let y: Vec<f32> = scene.choices[..2].iter().map(|(_, b)| scene.core.stage.get(b.quad).unwrap().pos.y).collect();
        assert_eq!(y, vec![23.0, -23.0]);
    }

    #[test]
    fn endings_route_as_expected() {
        let mut world = World::new();
        let mut scene = scene(&mut world, vec![DialogueLine::new("シスター", "「...」")]);
        finish_script(&mut world, &mut scene);
        world.host.drain();

        click_choice(&mut world, &mut scene, Ending::End1);
        assert_eq!(world.transition, None);
        assert!(world.host.drain().contains(&HostCommand::Alert { message: "END1".into() }));

        click_choice(&mut world, &mut scene, Ending::End2);
        assert_eq!(world.transition, Some(SceneKind::End2));
    }

    #[test]
    fn dispose_cancels_the_hidden_choice() {
        let mut world = World::new();
        let mut scene = scene(&mut world, vec![DialogueLine::new("シスター", "「...」")]);
        finish_script(&mut world, &mut scene);
        scene.stop();
        scene.dispose(&mut world.ctx());
        assert!(scene.timers.is_empty());
        assert!(!world.audio.is_bgm_playing());
        assert!(!world.audio.is_message_loop_playing());
        assert_eq!(world.host.owned_by(SceneToken(2)), 0);
    }

    #[test]
    fn message_speed_slider_reaches_the_dialogue() {
        let mut world = World::new();
        let mut scene = scene(&mut world, vec![DialogueLine::new("シスター", "「...」")]);
        let gear = InputEvent::Click { x: 480.0 / 512.0, y: 256.0 / 288.0, button: PointerButton::Primary };
        scene.handle_input(&mut world.ctx(), &gear);
        assert!(scene.core.layer.is_config_open(&scene.core.stage));

        // Left end of the message speed track.
        let press = InputEvent::PointerDown { x: -72.0 / 512.0, y: -70.0 / 288.0, button: PointerButton::Primary };
        scene.handle_input(&mut world.ctx(), &press);
        assert_eq!(world.config.message_speed, 0);
        assert_eq!(scene.dialogue.runner().reveal().speed(), 0.0);
    }
}
