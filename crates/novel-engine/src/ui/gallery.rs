//! Stage-select panel: story tab with jump rows, an unfinished images tab.

use glam::Vec2;
use serde::Serialize;
use crate::api::types::SceneToken;
use crate::components::texture::TextureContent;
use crate::core::host::Host;
use crate::core::stage::Stage;
use crate::ui::screen::ScreenLayout;
use crate::ui::widget::{HitRect, PanelSurface};

pub const BASE_PANEL_SIZE: Vec2 = Vec2::new(560.0, 380.0);

const TABS_Y: f32 = 56.0;
const TAB_W: f32 = 120.0;
const TAB_H: f32 = 28.0;
const TAB_GAP: f32 = 10.0;
const TABS_X: f32 = (BASE_PANEL_SIZE.x - (TAB_W * 2.0 + TAB_GAP)) / 2.0;

const ROW_START_Y: f32 = 116.0;
const ROW_SPACING: f32 = 36.0;
const BUTTON_W: f32 = 96.0;
const BUTTON_H: f32 = 28.0;
const BUTTON_X: f32 = BASE_PANEL_SIZE.x - BUTTON_W - 16.0;
const CLOSE_Y: f32 = BASE_PANEL_SIZE.y - BUTTON_H - 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GalleryTab {
    #[default]
    Story,
    Images,
}

/// A replayable story section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GalleryEntry {
    Intro,
    Main,
    End1,
    End2,
    End3,
}

impl GalleryEntry {
    pub const ALL: [GalleryEntry; 5] = [Self::Intro, Self::Main, Self::End1, Self::End2, Self::End3];

    pub fn label(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Main => "main",
            Self::End1 => "END1",
            Self::End2 => "END2",
            Self::End3 => "END3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryAction {
    Tab(GalleryTab),
    Jump(GalleryEntry),
    Close,
}

const TAB_RECTS: [HitRect<GalleryAction>; 2] = [
    HitRect::new(GalleryAction::Tab(GalleryTab::Story), TABS_X, TABS_Y, TAB_W, TAB_H),
    HitRect::new(GalleryAction::Tab(GalleryTab::Images), TABS_X + TAB_W + TAB_GAP, TABS_Y, TAB_W, TAB_H),
];

const CLOSE_RECT: HitRect<GalleryAction> = HitRect::new(GalleryAction::Close, BUTTON_X, CLOSE_Y, BUTTON_W, BUTTON_H);

fn row_rect(index: usize, entry: GalleryEntry) -> HitRect<GalleryAction> {
    let center_y = ROW_START_Y + index as f32 * ROW_SPACING;
    HitRect::new(GalleryAction::Jump(entry), BUTTON_X, center_y - BUTTON_H / 2.0, BUTTON_W, BUTTON_H)
}

pub struct GalleryPanel {
    surface: PanelSurface,
    tab: GalleryTab,
}

impl GalleryPanel {
    pub fn new(stage: &mut Stage, host: &mut Host, owner: SceneToken, screen: &ScreenLayout) -> Self {
        let tab = GalleryTab::default();
        let surface = PanelSurface::spawn(
            stage,
            host,
            owner,
            screen,
            BASE_PANEL_SIZE,
            "gallery_panel",
            TextureContent::GalleryPanel { tab },
        );
        Self { surface, tab }
    }

    pub fn tab(&self) -> GalleryTab {
        self.tab
    }

    pub fn set_tab(&mut self, host: &mut Host, tab: GalleryTab) {
        self.tab = tab;
        self.surface.paint(host, TextureContent::GalleryPanel { tab });
    }

    pub fn is_visible(&self, stage: &Stage) -> bool {
        self.surface.is_visible(stage)
    }

    /// Opens on the story tab.
    pub fn show(&mut self, stage: &mut Stage, host: &mut Host) {
        if self.tab != GalleryTab::Story {
            self.set_tab(host, GalleryTab::Story);
        }
        self.surface.set_visible(stage, true);
    }

    pub fn hide(&self, stage: &mut Stage) {
        self.surface.set_visible(stage, false);
    }

    pub fn contains(&self, stage: &Stage, point: Vec2) -> bool {
        self.surface.local_point(stage, point).is_some()
    }

    /// Jump rows only respond on the story tab.
    pub fn action_at(&self, stage: &Stage, point: Vec2) -> Option<GalleryAction> {
        let local = self.surface.local_point(stage, point)?;
        if let Some(r) = TAB_RECTS.iter().find(|r| r.contains(local)) {
            return Some(r.action);
        }
        if CLOSE_RECT.contains(local) {
            return Some(GalleryAction::Close);
        }
        if self.tab != GalleryTab::Story {
            return None;
        }
        GalleryEntry::ALL
            .iter()
            .enumerate()
            .map(|(i, e)| row_rect(i, *e))
            .find(|r| r.contains(local))
            .map(|r| r.action)
    }

    pub fn layout(&mut self, stage: &mut Stage, host: &mut Host, screen: &ScreenLayout) {
        self.surface.layout(stage, screen);
        self.surface.paint(host, TextureContent::GalleryPanel { tab: self.tab });
    }

    pub fn release(&self, stage: &mut Stage, host: &mut Host) {
        self.surface.release(stage, host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32) -> Vec2 {
        Vec2::new(x - 280.0, 190.0 - y)
    }

    fn open() -> (Stage, Host, GalleryPanel) {
        let mut stage = Stage::new();
        let mut host = Host::new();
        let mut panel = GalleryPanel::new(&mut stage, &mut host, SceneToken(1), &ScreenLayout::base());
        panel.show(&mut stage, &mut host);
        (stage, host, panel)
    }

    #[test]
    fn layout_constants() {
        assert_eq!(TABS_X, 155.0);
        assert_eq!(BUTTON_X, 448.0);
        assert_eq!(CLOSE_Y, 336.0);
        assert_eq!(row_rect(2, GalleryEntry::End1).y, 174.0);
    }

    #[test]
    fn rows_jump_on_story_tab() {
        let (stage, _, panel) = open();
        assert_eq!(panel.action_at(&stage, at(490.0, 116.0)), Some(GalleryAction::Jump(GalleryEntry::Intro)));
        assert_eq!(panel.action_at(&stage, at(490.0, 260.0)), Some(GalleryAction::Jump(GalleryEntry::End3)));
        assert_eq!(panel.action_at(&stage, at(490.0, 350.0)), Some(GalleryAction::Close));
    }

    #[test]
    fn images_tab_has_no_rows() {
        let (stage, mut host, mut panel) = open();
        assert_eq!(panel.action_at(&stage, at(300.0, 70.0)), Some(GalleryAction::Tab(GalleryTab::Images)));
        panel.set_tab(&mut host, GalleryTab::Images);
        assert_eq!(panel.action_at(&stage, at(490.0, 116.0)), None);
        assert_eq!(panel.action_at(&stage, at(200.0, 70.0)), Some(GalleryAction::Tab(GalleryTab::Story)));
    }

    #[test]
    fn reopening_resets_tab() {
        let (mut stage, mut host, mut panel) = open();
        panel.set_tab(&mut host, GalleryTab::Images);
        panel.hide(&mut stage);
        panel.show(&mut stage, &mut host);
        assert_eq!(panel.tab(), GalleryTab::Story);
    }

    #[test]
    fn entry_labels() {
        let labels: Vec<_> = GalleryEntry::ALL.iter().map(|e| e.label()).collect();
        assert_eq!(labels, ["intro", "main", "END1", "END2", "END3"]);
    }
}
