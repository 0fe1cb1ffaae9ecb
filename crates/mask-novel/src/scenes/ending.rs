use glam::Vec2;
use novel_engine::*;

use crate::factory::SceneKind;
use super::common::{navigate, Ctx, DialogueBox, Parallax, SceneCore, Theme};

const BACKDROP: &str = "title_bg";
/// Horizontal drift only.
const BACKDROP_SHIFT: Vec2 = Vec2::new(24.0, 0.0);

const PORTRAIT_SIDE_MARGIN: f32 = 24.0;
/// Portrait height as a share of the canvas height.
const PORTRAIT_HEIGHT_RATE: f32 = 0.9;
const ACTIVE_SCALE: f32 = 1.0;
const INACTIVE_SCALE: f32 = 0.92;
const INACTIVE_TINT: f32 = 0x88 as f32 / 255.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Standing art for one speaker.
struct Portrait {
    quad: QuadId,
    texture: TextureId,
    speaker: &'static str,
    side: Side,
    active: bool,
}

impl Portrait {
    fn spawn(
        stage: &mut Stage,
        textures: &mut TextureRegistry,
        host: &mut Host,
        manifest: &AssetManifest,
        image: &str,
        speaker: &'static str,
        side: Side,
    ) -> Result<Self, SceneError> {
        let texture = textures.load_blocking(host, manifest, image)?;
        let quad = stage.spawn_with(|q| {
            q.with_tag(speaker)
                .with_texture(texture)
                .with_layer(RenderLayer::Characters)
                .hidden()
        });
        Ok(Self { quad, texture, speaker, side, active: false })
    }

    fn layout(&self, stage: &mut Stage, host: &Host, screen: &ScreenLayout) {
        if host.status(self.texture) != Some(LoadStatus::Ready) {
            return;
        }
        let Some(image) = host.texture_size(self.texture).filter(|s| s.x > 0.0 && s.y > 0.0) else {
            return;
        };
        let scale = if self.active { ACTIVE_SCALE } else { INACTIVE_SCALE };
        let h = screen.height * PORTRAIT_HEIGHT_RATE * scale;
        let w = h * image.x / image.y;
        let half = screen.half();
        let margin = screen.px(PORTRAIT_SIDE_MARGIN);
        let x = match self.side {
            Side::Left => -half.x + margin + w / 2.0,
            Side::Right => half.x - margin - w / 2.0,
        };
        if let Some(q) = stage.get_mut(self.quad) {
            q.size = Vec2::new(w, h);
            q.pos = Vec2::new(x, -half.y + h / 2.0);
            q.tint = if self.active { 1.0 } else { INACTIVE_TINT };
        }
    }
}

/// Priest on the left, sister on the right. Whoever speaks is drawn
/// full size and brightness.
pub struct Cast {
    portraits: [Portrait; 2],
}

impl Cast {
    pub fn spawn(
        stage: &mut Stage,
        textures: &mut TextureRegistry,
        host: &mut Host,
        manifest: &AssetManifest,
    ) -> Result<Self, SceneError> {
        let priest = Portrait::spawn(stage, textures, host, manifest, "priest", "神父", Side::Left)?;
        let sister = Portrait::spawn(stage, textures, host, manifest, "sister", "シスター", Side::Right)?;
        Ok(Self { portraits: [priest, sister] })
    }

    pub fn on_asset(&mut self, stage: &mut Stage, host: &Host, screen: &ScreenLayout, id: TextureId, outcome: &AssetOutcome) {
        let Some(portrait) = self.portraits.iter().find(|p| p.texture == id) else {
            return;
        };
        match outcome {
            AssetOutcome::Loaded { .. } => {
                stage.set_visible(portrait.quad, true);
                portrait.layout(stage, host, screen);
            }
            AssetOutcome::Failed { reason } => {
                log::warn!("no portrait for {}: {}", portrait.speaker, reason);
            }
        }
    }

    pub fn emphasize(&mut self, stage: &mut Stage, host: &Host, screen: &ScreenLayout, speaker: &str) {
        for portrait in &mut self.portraits {
            portrait.active = portrait.speaker == speaker;
        }
        self.layout(stage, host, screen);
    }

    pub fn layout(&self, stage: &mut Stage, host: &Host, screen: &ScreenLayout) {
        for portrait in &self.portraits {
            portrait.layout(stage, host, screen);
        }
    }
}

/// A closing conversation over the drifting title artwork. The click after
/// the last line leads to the fin screen.
pub struct EndingScene {
    kind: SceneKind,
    core: SceneCore<()>,
    theme: Theme,
    backdrop: Parallax,
    dialogue: DialogueBox,
    cast: Option<Cast>,
}

impl EndingScene {
    pub fn new(
        kind: SceneKind,
        init: &SceneInit,
        ctx: &mut Ctx<'_>,
        manifest: &AssetManifest,
        lines: &[DialogueLine],
        with_cast: bool,
    ) -> Result<Self, SceneError> {
        DialogueBox::check_script(kind, lines)?;
        let theme = Theme::from_manifest(manifest, Theme::SANCTUARY)?;
        let mut core = SceneCore::new(init, ctx.host);
        let backdrop = Parallax::spawn(&mut core.stage, &mut core.textures, ctx.host, manifest, BACKDROP, BACKDROP_SHIFT)?;
        let cast = if with_cast {
            Some(Cast::spawn(&mut core.stage, &mut core.textures, ctx.host, manifest)?)
        } else {
            None
        };
        let dialogue = DialogueBox::spawn(
            &mut core.stage,
            &mut core.textures,
            ctx.host,
            &init.screen,
            lines.to_vec(),
            init.config.message_speed,
        );
        core.layer.add_hotspot(dialogue.quad, ());
        Ok(Self { kind, core, theme, backdrop, dialogue, cast })
    }

    fn emphasize_speaker(&mut self, ctx: &mut Ctx<'_>) {
        if let Some(cast) = self.cast.as_mut() {
            cast.emphasize(&mut self.core.stage, ctx.host, &ctx.screen, self.dialogue.speaker());
        }
    }
}

impl Scene<SceneKind> for EndingScene {
    fn is_ready(&self, host: &Host) -> bool {
        self.core.is_ready(host)
    }

    fn on_asset(&mut self, ctx: &mut Ctx<'_>, texture: TextureId, outcome: &AssetOutcome) {
        self.backdrop.on_asset(&mut self.core.stage, ctx.host, &ctx.screen, texture, outcome);
        if let Some(cast) = self.cast.as_mut() {
            cast.on_asset(&mut self.core.stage, ctx.host, &ctx.screen, texture, outcome);
        }
    }

    fn start(&mut self, ctx: &mut Ctx<'_>) {
        self.core.start();
        self.theme.play(ctx);
        self.dialogue.begin(ctx);
        self.emphasize_speaker(ctx);
    }

    fn stop(&mut self) {
        self.core.stop();
    }

    fn dispose(&mut self, ctx: &mut Ctx<'_>) {
        if self.core.dispose(ctx) {
            Theme::stop(ctx);
            self.cast = None;
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
        self.backdrop.update(&mut self.core.stage, dt);
    }

    fn handle_input(&mut self, ctx: &mut Ctx<'_>, event: &InputEvent) {
        self.theme.retry(ctx, event);
        match event {
            InputEvent::PointerMove { x, y } => self.backdrop.point_at(Vec2::new(*x, *y)),
            InputEvent::PointerLeave => self.backdrop.center(),
            _ => {}
        }
        match self.core.handle(ctx, event) {
            UiEvent::Activate(()) => match self.dialogue.click(ctx) {
                DialogueStep::Advanced(_) => self.emphasize_speaker(ctx),
                DialogueStep::Finished => ctx.change_scene(SceneKind::Fin),
                DialogueStep::Skipped | DialogueStep::Ignored => {}
            },
            UiEvent::ConfigChanged(state) => self.dialogue.set_speed(state.message_speed),
            other => {
                navigate(ctx, &other);
            }
        }
    }

    fn resize(&mut self, ctx: &mut Ctx<'_>) {
        self.core.relayout(ctx);
        self.dialogue.layout(&mut self.core.stage, &ctx.screen);
        self.backdrop.layout(&mut self.core.stage, ctx.host, &ctx.screen);
        if let Some(cast) = self.cast.as_ref() {
            cast.layout(&mut self.core.stage, ctx.host, &ctx.screen);
        }
        log::debug!("{} laid out for {}x{}", self.kind, ctx.screen.width, ctx.screen.height);
    }

    fn stage(&self) -> &Stage {
        &self.core.stage
    }
}
