use glam::Vec2;
use serde::{Deserialize, Serialize};
use crate::api::types::SceneToken;
use crate::components::texture::TextureContent;
use crate::core::host::Host;
use crate::core::stage::Stage;
use crate::ui::screen::ScreenLayout;
use crate::ui::widget::{HitRect, PanelSurface};

pub const BASE_PANEL_SIZE: Vec2 = Vec2::new(520.0, 360.0);

const CLOSE_W: f32 = 96.0;
const CLOSE_H: f32 = 28.0;

const CLOSE_RECT: HitRect<CreditAction> = HitRect::new(
    CreditAction::Close,
    BASE_PANEL_SIZE.x - CLOSE_W - 16.0,
    BASE_PANEL_SIZE.y - CLOSE_H - 16.0,
    CLOSE_W,
    CLOSE_H,
);

/// One line of the credits. An empty role continues the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditRow {
    pub role: String,
    pub name: String,
}

impl CreditRow {
    pub fn new(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self { role: role.into(), name: name.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditAction {
    Close,
}

pub struct CreditPanel {
    surface: PanelSurface,
    rows: Vec<CreditRow>,
}

impl CreditPanel {
    pub fn new(stage: &mut Stage, host: &mut Host, owner: SceneToken, screen: &ScreenLayout, rows: Vec<CreditRow>) -> Self {
        let surface = PanelSurface::spawn(
            stage,
            host,
            owner,
            screen,
            BASE_PANEL_SIZE,
            "credit_panel",
            TextureContent::CreditPanel { rows: rows.clone() },
        );
        Self { surface, rows }
    }

    pub fn rows(&self) -> &[CreditRow] {
        &self.rows
    }

    pub fn is_visible(&self, stage: &Stage) -> bool {
        self.surface.is_visible(stage)
    }

    pub fn show(&self, stage: &mut Stage) {
        self.surface.set_visible(stage, true);
    }

    pub fn hide(&self, stage: &mut Stage) {
        self.surface.set_visible(stage, false);
    }

    pub fn contains(&self, stage: &Stage, point: Vec2) -> bool {
        self.surface.local_point(stage, point).is_some()
    }

    pub fn action_at(&self, stage: &Stage, point: Vec2) -> Option<CreditAction> {
        let local = self.surface.local_point(stage, point)?;
        CLOSE_RECT.contains(local).then_some(CreditAction::Close)
    }

    pub fn layout(&mut self, stage: &mut Stage, host: &mut Host, screen: &ScreenLayout) {
        self.surface.layout(stage, screen);
        self.surface.paint(host, TextureContent::CreditPanel { rows: self.rows.clone() });
    }

    pub fn release(&self, stage: &mut Stage, host: &mut Host) {
        self.surface.release(stage, host);
    }
}
