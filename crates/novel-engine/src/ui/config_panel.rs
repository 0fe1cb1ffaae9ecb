//! Settings panel: display mode, volumes, message speed, back to title.

use glam::Vec2;
use serde::Serialize;
use crate::api::config::{ConfigPatch, ConfigState, DisplayMode};
use crate::api::types::SceneToken;
use crate::components::texture::TextureContent;
use crate::core::host::Host;
use crate::core::stage::Stage;
use crate::ui::screen::ScreenLayout;
use crate::ui::widget::{hit_test, HitRect, PanelSurface};

pub const BASE_PANEL_SIZE: Vec2 = Vec2::new(480.0, 280.0);

const CONTENT_START_X: f32 = 168.0;
const CONTENT_WIDTH: f32 = 240.0;
const BUTTON_GAP: f32 = 8.0;
const DISPLAY_MODE_BUTTON_W: f32 = 116.0;
const DISPLAY_MODE_BUTTON_H: f32 = 32.0;
const SLIDER_H: f32 = 20.0;
const BACK_BUTTON_W: f32 = 140.0;
const BACK_BUTTON_H: f32 = 28.0;

const DISPLAY_MODE_Y: f32 = 56.0;
const BGM_SLIDER_Y: f32 = 112.0;
const SE_SLIDER_Y: f32 = 156.0;
const MESSAGE_SLIDER_Y: f32 = 200.0;
const BACK_BUTTON_Y: f32 = 240.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigAction {
    Fullscreen,
    Window,
    BgmSlider,
    SeSlider,
    MessageSpeedSlider,
    BackToTitle,
}

impl ConfigAction {
    pub fn slider(self) -> Option<Slider> {
        match self {
            Self::BgmSlider => Some(Slider::Bgm),
            Self::SeSlider => Some(Slider::Se),
            Self::MessageSpeedSlider => Some(Slider::MessageSpeed),
            _ => None,
        }
    }

    /// Buttons get hover feedback; sliders don't.
    pub fn is_button(self) -> bool {
        self.slider().is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slider {
    Bgm,
    Se,
    MessageSpeed,
}

impl Slider {
    pub fn patch(self, value: u8) -> ConfigPatch {
        match self {
            Self::Bgm => ConfigPatch::bgm_volume(value),
            Self::Se => ConfigPatch::se_volume(value),
            Self::MessageSpeed => ConfigPatch::message_speed(value),
        }
    }

    pub fn value(self, state: &ConfigState) -> u8 {
        match self {
            Self::Bgm => state.bgm_volume,
            Self::Se => state.se_volume,
            Self::MessageSpeed => state.message_speed,
        }
    }

    fn rect(self) -> HitRect<ConfigAction> {
        match self {
            Self::Bgm => HIT_RECTS[2],
            Self::Se => HIT_RECTS[3],
            Self::MessageSpeed => HIT_RECTS[4],
        }
    }
}

pub const HIT_RECTS: [HitRect<ConfigAction>; 6] = [
    HitRect::new(ConfigAction::Fullscreen, CONTENT_START_X, DISPLAY_MODE_Y, DISPLAY_MODE_BUTTON_W, DISPLAY_MODE_BUTTON_H),
    HitRect::new(
        ConfigAction::Window,
        CONTENT_START_X + DISPLAY_MODE_BUTTON_W + BUTTON_GAP,
        DISPLAY_MODE_Y,
        DISPLAY_MODE_BUTTON_W,
        DISPLAY_MODE_BUTTON_H,
    ),
    HitRect::new(ConfigAction::BgmSlider, CONTENT_START_X, BGM_SLIDER_Y, CONTENT_WIDTH, SLIDER_H),
    HitRect::new(ConfigAction::SeSlider, CONTENT_START_X, SE_SLIDER_Y, CONTENT_WIDTH, SLIDER_H),
    HitRect::new(ConfigAction::MessageSpeedSlider, CONTENT_START_X, MESSAGE_SLIDER_Y, CONTENT_WIDTH, SLIDER_H),
    HitRect::new(
        ConfigAction::BackToTitle,
        BASE_PANEL_SIZE.x - BACK_BUTTON_W - 16.0,
        BACK_BUTTON_Y,
        BACK_BUTTON_W,
        BACK_BUTTON_H,
    ),
];

/// What the pointer landed on. Sliders carry the value under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigHit {
    pub action: ConfigAction,
    pub value: Option<u8>,
}

pub struct ConfigPanel {
    surface: PanelSurface,
    state: ConfigState,
    hovered: Option<ConfigAction>,
    repaints: u32,
}

impl ConfigPanel {
    pub fn new(stage: &mut Stage, host: &mut Host, owner: SceneToken, screen: &ScreenLayout, state: ConfigState) -> Self {
        let surface = PanelSurface::spawn(
            stage,
            host,
            owner,
            screen,
            BASE_PANEL_SIZE,
            "config_panel",
            TextureContent::ConfigPanel { state, hovered: None },
        );
        Self { surface, state, hovered: None, repaints: 0 }
    }

    pub fn state(&self) -> ConfigState {
        self.state
    }

    /// Merge and redraw. Always repaints, even when nothing changed.
    pub fn set_state(&mut self, host: &mut Host, patch: &ConfigPatch) {
        self.state.apply(patch);
        self.repaint(host);
    }

    /// Mirror the document's fullscreen state.
    pub fn sync_display_mode(&mut self, host: &mut Host, fullscreen: bool) {
        let mode = if fullscreen { DisplayMode::Fullscreen } else { DisplayMode::Window };
        self.set_state(host, &ConfigPatch::display_mode(mode));
    }

    /// Returns true when the hovered button changed.
    pub fn set_hovered(&mut self, host: &mut Host, hovered: Option<ConfigAction>) -> bool {
        if self.hovered == hovered {
            return false;
        }
        self.hovered = hovered;
        self.repaint(host);
        true
    }

    pub fn hovered(&self) -> Option<ConfigAction> {
        self.hovered
    }

    pub fn is_visible(&self, stage: &Stage) -> bool {
        self.surface.is_visible(stage)
    }

    pub fn show(&self, stage: &mut Stage) {
        self.surface.set_visible(stage, true);
    }

    pub fn hide(&mut self, stage: &mut Stage, host: &mut Host) {
        self.surface.set_visible(stage, false);
        self.set_hovered(host, None);
    }

    pub fn toggle(&mut self, stage: &mut Stage, host: &mut Host) {
        if self.is_visible(stage) {
            self.hide(stage, host);
        } else {
            self.show(stage);
        }
    }

    pub fn contains(&self, stage: &Stage, point: Vec2) -> bool {
        self.surface.local_point(stage, point).is_some()
    }

    pub fn action_at(&self, stage: &Stage, point: Vec2) -> Option<ConfigHit> {
        let local = self.surface.local_point(stage, point)?;
        let rect = hit_test(&HIT_RECTS, local)?;
        let value = rect.action.slider().map(|_| rect.percent_at(local.x));
        Some(ConfigHit { action: rect.action, value })
    }

    /// Value a slider would take for a pointer on the panel, even outside its track.
    pub fn slider_value_at(&self, stage: &Stage, point: Vec2, slider: Slider) -> Option<u8> {
        let local = self.surface.local_point(stage, point)?;
        Some(slider.rect().percent_at(local.x))
    }

    pub fn layout(&mut self, stage: &mut Stage, host: &mut Host, screen: &ScreenLayout) {
        self.surface.layout(stage, screen);
        self.repaint(host);
    }

    pub fn release(&self, stage: &mut Stage, host: &mut Host) {
        self.surface.release(stage, host);
    }

    pub fn repaint_count(&self) -> u32 {
        self.repaints
    }

    fn repaint(&mut self, host: &mut Host) {
        self.repaints += 1;
        self.surface.paint(host, TextureContent::ConfigPanel { state: self.state, hovered: self.hovered });
    }
}
