//! Pieces every scene of the game is built from.

use std::fmt;
use glam::Vec2;
use novel_engine::assets::manifest::BgmDescriptor;
use novel_engine::ui::screen::anchor;
use novel_engine::*;

use crate::factory::SceneKind;

pub type Ctx<'a> = SceneContext<'a, SceneKind>;

/// Lifecycle bookkeeping shared by all scenes: the stage, the textures the
/// scene owns and the interactive layer on top.
pub struct SceneCore<A> {
    pub stage: Stage,
    pub layer: InteractiveLayer<A>,
    pub textures: TextureRegistry,
    running: bool,
    disposed: bool,
}

impl<A: Copy + PartialEq + fmt::Debug> SceneCore<A> {
    /// Config panel and gear, nothing else.
    pub fn new(init: &SceneInit, host: &mut Host) -> Self {
        let mut stage = Stage::new();
        let layer = InteractiveLayer::new(&mut stage, host, init);
        Self::with_layer(init, stage, layer)
    }

    /// Wrap a layer the scene assembled itself. The gear glyph, if any,
    /// has to load before the scene starts.
    pub fn with_layer(init: &SceneInit, stage: Stage, layer: InteractiveLayer<A>) -> Self {
        let mut textures = TextureRegistry::new(init.token);
        if let Some(gear) = layer.gear_texture() {
            textures.block_on(gear);
        }
        Self { stage, layer, textures, running: false, disposed: false }
    }

    pub fn is_ready(&self, host: &Host) -> bool {
        self.textures.is_settled(host)
    }

    pub fn start(&mut self) {
        if !self.disposed {
            self.running = true;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn listeners(&self, mask: ListenerMask) -> ListenerMask {
        if self.disposed {
            ListenerMask::NONE
        } else {
            mask
        }
    }

    pub fn handle(&mut self, ctx: &mut Ctx<'_>, event: &InputEvent) -> UiEvent<A> {
        if self.disposed {
            return UiEvent::Idle;
        }
        self.layer.handle(ctx, &mut self.stage, event)
    }

    pub fn relayout(&mut self, ctx: &mut Ctx<'_>) {
        self.layer.layout(&mut self.stage, ctx.host, &ctx.screen);
    }

    /// Free every quad and texture. Returns false if already disposed.
    pub fn dispose(&mut self, ctx: &mut Ctx<'_>) -> bool {
        if self.disposed {
            return false;
        }
        self.disposed = true;
        self.running = false;
        self.layer.release(&mut self.stage, ctx.host);
        self.textures.release_all(ctx.host);
        self.stage.clear();
        ctx.audio.stop_message_loop();
        true
    }
}

/// Follow the panel navigation every scene shares. Returns true if the event
/// asked for another scene.
pub fn navigate<A>(ctx: &mut Ctx<'_>, event: &UiEvent<A>) -> bool {
    match event {
        UiEvent::BackToTitle => ctx.change_scene(SceneKind::Title),
        UiEvent::GalleryJump(entry) => ctx.change_scene(SceneKind::from(*entry)),
        _ => return false,
    }
    true
}

/// The looping background track.
#[derive(Debug, Clone)]
pub struct Theme(BgmDescriptor);

impl Theme {
    pub const SANCTUARY: &'static str = "sanctuary";

    pub fn from_manifest(manifest: &AssetManifest, name: &str) -> Result<Self, SceneError> {
        manifest.bgm(name).cloned().map(Self)
    }

    pub fn play(&self, ctx: &mut Ctx<'_>) {
        ctx.audio.play_bgm(&self.0.path, self.0.looped);
    }

    /// A pointer press is a user gesture; try again if autoplay was refused.
    pub fn retry(&self, ctx: &mut Ctx<'_>, event: &InputEvent) {
        if let InputEvent::PointerDown { button: PointerButton::Primary, .. } = event {
            ctx.audio.ensure_bgm(&self.0.path, self.0.looped);
        }
    }

    pub fn stop(ctx: &mut Ctx<'_>) {
        ctx.audio.stop_bgm();
    }
}

/// A canvas-drawn line of text placed relative to the canvas centre.
pub struct Label {
    pub quad: QuadId,
    texture: TextureId,
    base_size: Vec2,
    offset: Vec2,
}

impl Label {
    #[allow(clippy::too_many_arguments)]
    pub fn spawn(
        stage: &mut Stage,
        textures: &mut TextureRegistry,
        host: &mut Host,
        screen: &ScreenLayout,
        text: &str,
        font_px: f32,
        base_size: Vec2,
        offset: Vec2,
    ) -> Self {
        let texture = textures.create(host, base_size, TextureContent::Label { text: text.to_string(), font_px });
        let quad = stage.spawn_with(|q| q.with_tag("label").with_texture(texture).with_order(1));
        let label = Self { quad, texture, base_size, offset };
        label.layout(stage, screen);
        label
    }

    pub fn set_text(&self, host: &mut Host, text: &str, font_px: f32) {
        host.paint_texture(self.texture, self.base_size, TextureContent::Label { text: text.to_string(), font_px });
    }

    pub fn layout(&self, stage: &mut Stage, screen: &ScreenLayout) {
        if let Some(q) = stage.get_mut(self.quad) {
            q.size = screen.scaled(self.base_size);
            q.pos = screen.scaled(self.offset);
        }
    }
}

/// A labelled button that repaints highlighted while hovered.
pub struct TextButton {
    pub quad: QuadId,
    texture: TextureId,
    label: String,
    base_size: Vec2,
    hovered: bool,
}

impl TextButton {
    pub fn spawn(
        stage: &mut Stage,
        textures: &mut TextureRegistry,
        host: &mut Host,
        label: &str,
        base_size: Vec2,
        layer: RenderLayer,
    ) -> Self {
        let texture = textures.create(host, base_size, TextureContent::Button { label: label.to_string(), hovered: false });
        let quad = stage.spawn_with(|q| q.with_tag(label).with_texture(texture).with_layer(layer));
        Self { quad, texture, label: label.to_string(), base_size, hovered: false }
    }

    pub fn set_hovered(&mut self, host: &mut Host, hovered: bool) {
        if self.hovered == hovered {
            return;
        }
        self.hovered = hovered;
        host.paint_texture(
            self.texture,
            self.base_size,
            TextureContent::Button { label: self.label.clone(), hovered },
        );
    }

    #[cfg(test)]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn place(&self, stage: &mut Stage, pos: Vec2, size: Vec2) {
        if let Some(q) = stage.get_mut(self.quad) {
            q.pos = pos;
            q.size = size;
        }
    }

    pub fn set_visible(&self, stage: &mut Stage, visible: bool) {
        stage.set_visible(self.quad, visible);
    }
}

pub const BOX_SIZE: Vec2 = Vec2::new(920.0, 160.0);
pub const BOX_MARGIN_BOTTOM: f32 = 16.0;

/// The novel text box: speaker name plus the revealed part of the line.
/// Plays the typing loop while a line reveals.
pub struct DialogueBox {
    pub quad: QuadId,
    texture: TextureId,
    runner: DialogueRunner,
}

impl DialogueBox {
    pub fn spawn(
        stage: &mut Stage,
        textures: &mut TextureRegistry,
        host: &mut Host,
        screen: &ScreenLayout,
        lines: Vec<DialogueLine>,
        speed: u8,
    ) -> Self {
        let texture = textures.create(
            host,
            BOX_SIZE,
            TextureContent::DialogueBox { speaker: String::new(), body: String::new() },
        );
        let quad = stage.spawn_with(|q| q.with_tag("dialogue").with_texture(texture).with_layer(RenderLayer::Dialogue));
        let dialogue = Self { quad, texture, runner: DialogueRunner::new(lines, speed as f32) };
        dialogue.layout(stage, screen);
        dialogue
    }

    /// Reject empty scripts before anything is spawned.
    pub fn check_script(scene: SceneKind, lines: &[DialogueLine]) -> Result<(), SceneError> {
        if lines.is_empty() {
            return Err(SceneError::Construction { scene: scene.to_string(), reason: "script has no lines".into() });
        }
        Ok(())
    }

    pub fn layout(&self, stage: &mut Stage, screen: &ScreenLayout) {
        let size = screen.scaled(BOX_SIZE);
        let margin = Vec2::new(0.0, screen.px(BOX_MARGIN_BOTTOM));
        if let Some(q) = stage.get_mut(self.quad) {
            q.size = size;
            q.pos = screen.anchored(anchor::BOTTOM_CENTER, anchor::BOTTOM_CENTER, size, margin);
        }
    }

    /// Show the first line.
    pub fn begin(&mut self, ctx: &mut Ctx<'_>) {
        if self.runner.start().is_some() {
            ctx.audio.start_message_loop();
        }
        self.paint(ctx.host);
    }

    pub fn update(&mut self, ctx: &mut Ctx<'_>, dt: f32) {
        match self.runner.update(dt) {
            Some(RevealEvent::Advanced) => self.paint(ctx.host),
            Some(RevealEvent::Completed) => ctx.audio.stop_message_loop(),
            None => {}
        }
    }

    /// Skip or advance, with the click effect.
    pub fn click(&mut self, ctx: &mut Ctx<'_>) -> DialogueStep {
        ctx.audio.play_click();
        let step = self.runner.click();
        match step {
            DialogueStep::Skipped => {
                ctx.audio.stop_message_loop();
                self.paint(ctx.host);
            }
            DialogueStep::Advanced(_) => {
                ctx.audio.start_message_loop();
                self.paint(ctx.host);
            }
            DialogueStep::Ignored | DialogueStep::Finished => {}
        }
        step
    }

    pub fn set_speed(&mut self, speed: u8) {
        self.runner.set_speed(speed as f32);
    }

    pub fn speaker(&self) -> &str {
        self.runner.speaker()
    }

    #[cfg(test)]
    pub fn runner(&self) -> &DialogueRunner {
        &self.runner
    }

    fn paint(&self, host: &mut Host) {
        host.paint_texture(
            self.texture,
            BOX_SIZE,
            TextureContent::DialogueBox {
                speaker: self.runner.speaker().to_string(),
                body: self.runner.visible_text().to_string(),
            },
        );
    }
}

const PARALLAX_OVERSIZE: f32 = 1.08;
const PARALLAX_SMOOTHING: f32 = 8.0;

/// Background image that drifts against the pointer.
pub struct Parallax {
    pub quad: QuadId,
    texture: TextureId,
    max_shift: Vec2,
    amplitude: Vec2,
    target: Vec2,
    current: Vec2,
}

impl Parallax {
    /// `max_shift` is in base pixels per axis.
    pub fn spawn(
        stage: &mut Stage,
        textures: &mut TextureRegistry,
        host: &mut Host,
        manifest: &AssetManifest,
        name: &str,
        max_shift: Vec2,
    ) -> Result<Self, SceneError> {
        let texture = textures.load_blocking(host, manifest, name)?;
        let quad = stage.spawn_with(|q| {
            q.with_tag("parallax")
                .with_texture(texture)
                .with_layer(RenderLayer::Backdrop)
                .hidden()
        });
        Ok(Self { quad, texture, max_shift, amplitude: Vec2::ZERO, target: Vec2::ZERO, current: Vec2::ZERO })
    }

    pub fn on_asset(&mut self, stage: &mut Stage, host: &Host, screen: &ScreenLayout, id: TextureId, outcome: &AssetOutcome) {
        if id != self.texture {
            return;
        }
        match outcome {
            AssetOutcome::Loaded { .. } => {
                stage.set_visible(self.quad, true);
                self.layout(stage, host, screen);
            }
            AssetOutcome::Failed { reason } => log::warn!("background unavailable, drawing without it: {}", reason),
        }
    }

    /// Cover the canvas with some slack so the drift never shows an edge.
    pub fn layout(&mut self, stage: &mut Stage, host: &Host, screen: &ScreenLayout) {
        self.amplitude = Vec2::new(screen.px(self.max_shift.x), screen.px(self.max_shift.y));
        if host.status(self.texture) != Some(LoadStatus::Ready) {
            return;
        }
        let Some(image) = host.texture_size(self.texture).filter(|s| s.x > 0.0 && s.y > 0.0) else {
            return;
        };
        let target = screen.size() * PARALLAX_OVERSIZE;
        let ratio = image.x / image.y;
        let size = if screen.aspect() > ratio {
            Vec2::new(target.x, target.x / ratio)
        } else {
            Vec2::new(target.y * ratio, target.y)
        };
        if let Some(q) = stage.get_mut(self.quad) {
            q.size = size;
        }
    }

    /// Pointer position in NDC.
    pub fn point_at(&mut self, ndc: Vec2) {
        self.target = ndc;
    }

    pub fn center(&mut self) {
        self.target = Vec2::ZERO;
    }

    pub fn update(&mut self, stage: &mut Stage, dt: f32) {
        self.current = smooth_toward(self.current, self.target, dt, PARALLAX_SMOOTHING);
        if let Some(q) = stage.get_mut(self.quad) {
            q.pos = -self.current * self.amplitude;
        }
    }

    #[cfg(test)]
    pub fn offset(&self) -> Vec2 {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn harness() -> (Host, AudioService, ConfigState, Option<SceneKind>) {
        (Host::new(), AudioService::new(), ConfigState::default(), None)
    }

    fn manifest() -> AssetManifest {
        AssetManifest::from_json(
            r#"{ "textures": { "bg": "bg.png" }, "bgm": { "sanctuary": { "path": "loop.ogg" } } }"#,
        )
        .unwrap()
    }

    #[test]
    fn dialogue_box_sits_above_bottom_margin() {
        let mut host = Host::new();
        let mut stage = Stage::new();
        let mut textures = TextureRegistry::new(SceneToken(1));
        let screen = ScreenLayout::base();
        let lines = vec![DialogueLine::new("神父", "「…」")];
        let dialogue = DialogueBox::spawn(&mut stage, &mut textures, &mut host, &screen, lines, 80);
        let quad = stage.get(dialogue.quad).unwrap();
        assert_eq!(quad.size, BOX_SIZE);
        assert_eq!(quad.pos, Vec2::new(0.0, -288.0 + 16.0 + 80.0));
    }

    #[test]
    fn dialogue_box_drives_the_message_loop() {
        let (mut host, mut audio, mut config, mut transition) = harness();
        let mut stage = Stage::new();
        let mut textures = TextureRegistry::new(SceneToken(1));
        let screen = ScreenLayout::base();
        let lines = vec![DialogueLine::new("神父", "あい"), DialogueLine::new("シスター", "う")];
        let mut dialogue = DialogueBox::spawn(&mut stage, &mut textures, &mut host, &screen, lines, 100);
        let mut ctx = SceneContext::new(&mut host, &mut audio, &mut config, &mut transition, screen, false);

        dialogue.begin(&mut ctx);
        assert!(ctx.audio.is_message_loop_playing());
        assert_eq!(dialogue.click(&mut ctx), DialogueStep::Skipped);
        assert!(!ctx.audio.is_message_loop_playing());
        assert_eq!(dialogue.click(&mut ctx), DialogueStep::Advanced(1));
        assert_eq!(dialogue.speaker(), "シスター");
        for _ in 0..4 {
            dialogue.update(&mut ctx, 0.05);
        }
        assert!(dialogue.runner().is_line_complete());
        assert!(!ctx.audio.is_message_loop_playing());
        assert_eq!(dialogue.click(&mut ctx), DialogueStep::Finished);
    }

    #[test]
    fn empty_script_is_rejected() {
        assert!(DialogueBox::check_script(SceneKind::End2, &[]).is_err());
    }

    #[test]
    fn parallax_covers_canvas_and_drifts_against_pointer() {
        let mut host = Host::new();
        let mut stage = Stage::new();
        let mut textures = TextureRegistry::new(SceneToken(1));
        let screen = ScreenLayout::base();
        let mut bg = Parallax::spawn(&mut stage, &mut textures, &mut host, &manifest(), "bg", Vec2::new(24.0, 0.0)).unwrap();
        assert!(!textures.is_settled(&host));
        assert!(!stage.is_visible(bg.quad));

        let id = textures.get("bg").unwrap();
        let outcome = AssetOutcome::Loaded { width: 1920.0, height: 1080.0 };
        host.settle(id, &outcome);
        bg.on_asset(&mut stage, &host, &screen, id, &outcome);
        assert!(stage.is_visible(bg.quad));
        let size = stage.get(bg.quad).unwrap().size;
        assert!(size.x >= 1024.0 * 1.08 - 0.01 && size.y >= 576.0 * 1.08 - 0.01);

        bg.point_at(Vec2::new(1.0, 1.0));
        bg.update(&mut stage, 1.0);
        assert_eq!(stage.get(bg.quad).unwrap().pos, Vec2::new(-24.0, 0.0));
        bg.center();
        bg.update(&mut stage, 0.0625);
        assert!((bg.offset().x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn failed_background_stays_hidden() {
        let mut host = Host::new();
        let mut stage = Stage::new();
        let mut textures = TextureRegistry::new(SceneToken(1));
        let mut bg = Parallax::spawn(&mut stage, &mut textures, &mut host, &manifest(), "bg", Vec2::splat(24.0)).unwrap();
        let id = textures.get("bg").unwrap();
        let outcome = AssetOutcome::Failed { reason: "404".into() };
        host.settle(id, &outcome);
        bg.on_asset(&mut stage, &host, &ScreenLayout::base(), id, &outcome);
        assert!(!stage.is_visible(bg.quad));
        assert!(textures.is_settled(&host));
    }

    #[test]
    fn theme_retries_only_on_primary_press() {
        let (mut host, mut audio, mut config, mut transition) = harness();
        let theme = Theme::from_manifest(&manifest(), Theme::SANCTUARY).unwrap();
        let mut ctx = SceneContext::new(&mut host, &mut audio, &mut config, &mut transition, ScreenLayout::base(), false);
        theme.play(&mut ctx);
        ctx.audio.mark_bgm_blocked();
        ctx.audio.drain();

        theme.retry(&mut ctx, &InputEvent::PointerDown { x: 0.0, y: 0.0, button: PointerButton::Secondary });
        assert!(ctx.audio.commands().is_empty());
        theme.retry(&mut ctx, &InputEvent::PointerDown { x: 0.0, y: 0.0, button: PointerButton::Primary });
        assert!(ctx.audio.is_bgm_playing());
        theme.retry(&mut ctx, &InputEvent::PointerDown { x: 0.0, y: 0.0, button: PointerButton::Primary });
        let plays = ctx
            .audio
            .drain()
            .into_iter()
            .filter(|c| matches!(c, AudioCommand::PlayBgm { .. }))
            .count();
        assert_eq!(plays, 1);
    }

    #[test]
    fn unknown_theme_is_reported() {
        assert!(matches!(Theme::from_manifest(&manifest(), "missing"), Err(SceneError::MissingAsset(_))));
    }
}
