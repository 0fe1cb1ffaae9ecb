use glam::Vec2;
use novel_engine::ui::credit::CreditRow;
use novel_engine::ui::screen::anchor;
use novel_engine::*;

use crate::factory::SceneKind;
use super::common::{navigate, Ctx, Label, SceneCore, TextButton};

const TITLE_TEXT: &str = "GGJ 2026";
const TITLE_FONT_PX: f32 = 64.0;
const TITLE_SIZE: Vec2 = Vec2::new(512.0, 128.0);
const TITLE_OFFSET: Vec2 = Vec2::new(0.0, 86.0);

const BUTTON_SIZE: Vec2 = Vec2::new(200.0, 50.0);
const BUTTON_GAP: f32 = 12.0;
const BUTTON_MARGIN: Vec2 = Vec2::new(20.0, 20.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleAction {
    Start,
    StageSelect,
    Credit,
}

/// Top to bottom.
const MENU: [(TitleAction, &str); 3] = [
    (TitleAction::Start, "スタート"),
    (TitleAction::StageSelect, "ステージセレクト"),
    (TitleAction::Credit, "クレジット"),
];

pub struct TitleScene {
    core: SceneCore<TitleAction>,
    title: Label,
    buttons: Vec<(TitleAction, TextButton)>,
}

impl TitleScene {
    pub fn new(init: &SceneInit, ctx: &mut Ctx<'_>, credits: &[CreditRow]) -> Self {
        let mut stage = Stage::new();
        let layer = InteractiveLayer::new(&mut stage, ctx.host, init)
            .with_gallery(&mut stage, ctx.host, init)
            .with_credit(&mut stage, ctx.host, init, credits.to_vec());
        let mut core = SceneCore::with_layer(init, stage, layer);

        let title = Label::spawn(
            &mut core.stage,
            &mut core.textures,
            ctx.host,
            &init.screen,
            TITLE_TEXT,
            TITLE_FONT_PX,
            TITLE_SIZE,
            TITLE_OFFSET,
        );
        let mut buttons = Vec::with_capacity(MENU.len());
        for (action, label) in MENU {
            let button = TextButton::spawn(&mut core.stage, &mut core.textures, ctx.host, label, BUTTON_SIZE, RenderLayer::Content);
            core.layer.add_hotspot(button.quad, action);
            buttons.push((action, button));
        }

        let mut scene = Self { core, title, buttons };
        scene.layout_buttons(&init.screen);
        scene
    }

    /// Stacked upwards from the bottom-right corner, first entry on top.
    fn layout_buttons(&mut self, screen: &ScreenLayout) {
        let size = screen.scaled(BUTTON_SIZE);
        let margin = screen.scaled(BUTTON_MARGIN);
        let bottom = screen.anchored(anchor::BOTTOM_RIGHT, anchor::BOTTOM_RIGHT, size, margin);
        let step = size.y + screen.px(BUTTON_GAP);
        let n = self.buttons.len();
        for (i, (_, button)) in self.buttons.iter().enumerate() {
            let pos = bottom + Vec2::new(0.0, step * (n - 1 - i) as f32);
            button.place(&mut self.core.stage, pos, size);
        }
    }

    fn highlight(&mut self, host: &mut Host, hovered: Option<TitleAction>) {
        for (action, button) in &mut self.buttons {
            button.set_hovered(host, hovered == Some(*action));
        }
    }
}

impl Scene<SceneKind> for TitleScene {
    fn is_ready(&self, host: &Host) -> bool {
        self.core.is_ready(host)
    }

    fn start(&mut self, _ctx: &mut Ctx<'_>) {
        self.core.start();
    }

    fn stop(&mut self) {
        self.core.stop();
    }

    fn dispose(&mut self, ctx: &mut Ctx<'_>) {
        self.buttons.clear();
        self.core.dispose(ctx);
    }

    fn is_running(&self) -> bool {
        self.core.is_running()
    }

    fn listeners(&self) -> ListenerMask {
        self.core.listeners(ListenerMask::ALL)
    }

    fn update(&mut self, _ctx: &mut Ctx<'_>, _dt: f32) {}

    fn handle_input(&mut self, ctx: &mut Ctx<'_>, event: &InputEvent) {
        match self.core.handle(ctx, event) {
            UiEvent::Hover(hovered) => self.highlight(ctx.host, hovered),
            UiEvent::Activate(TitleAction::Start) => ctx.change_scene(SceneKind::Intro),
            UiEvent::Activate(TitleAction::StageSelect) => {
                self.highlight(ctx.host, None);
                self.core.layer.open_gallery(&mut self.core.stage, ctx.host);
            }
            UiEvent::Activate(TitleAction::Credit) => {
                self.highlight(ctx.host, None);
                self.core.layer.open_credit(&mut self.core.stage, ctx.host);
            }
            other => {
                navigate(ctx, &other);
            }
        }
    }

    fn resize(&mut self, ctx: &mut Ctx<'_>) {
        self.core.relayout(ctx);
        self.title.layout(&mut self.core.stage, &ctx.screen);
        self.layout_buttons(&ctx.screen);
    }

    fn stage(&self) -> &Stage {
        &self.core.stage
    }
}
