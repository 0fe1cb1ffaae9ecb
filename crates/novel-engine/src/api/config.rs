use serde::{Deserialize, Serialize};
use crate::api::error::ConfigError;

/// Largest value any percent setting can hold.
pub const PERCENT_MAX: u8 = 100;

/// Whether the page runs in a window or fullscreen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Window,
    Fullscreen,
}

/// Cross-scene settings owned by the scene manager.
/// Every value except the display mode is a percent in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    pub display_mode: DisplayMode,
    pub bgm_volume: u8,
    pub se_volume: u8,
    pub message_speed: u8,
}

impl Default for ConfigState {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::Window,
            bgm_volume: 80,
            se_volume: 80,
            message_speed: 80,
        }
    }
}

impl ConfigState {
    /// Merge the fields present in `patch`, clamping percents.
    pub fn apply(&mut self, patch: &ConfigPatch) {
        if let Some(mode) = patch.display_mode {
            self.display_mode = mode;
        }
        if let Some(v) = patch.bgm_volume {
            self.bgm_volume = clamp_percent(v);
        }
        if let Some(v) = patch.se_volume {
            self.se_volume = clamp_percent(v);
        }
        if let Some(v) = patch.message_speed {
            self.message_speed = clamp_percent(v);
        }
    }

    pub fn merged(mut self, patch: &ConfigPatch) -> Self {
        self.apply(patch);
        self
    }
}

/// Partial update of [`ConfigState`]. Percents arrive as floats from the page
/// and are rounded and clamped on merge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigPatch {
    pub display_mode: Option<DisplayMode>,
    pub bgm_volume: Option<f32>,
    pub se_volume: Option<f32>,
    pub message_speed: Option<f32>,
}

impl ConfigPatch {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn display_mode(mode: DisplayMode) -> Self {
        Self { display_mode: Some(mode), ..Default::default() }
    }

    pub fn bgm_volume(value: u8) -> Self {
        Self { bgm_volume: Some(value as f32), ..Default::default() }
    }

    pub fn se_volume(value: u8) -> Self {
        Self { se_volume: Some(value as f32), ..Default::default() }
    }

    pub fn message_speed(value: u8) -> Self {
        Self { message_speed: Some(value as f32), ..Default::default() }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Round to the nearest integer percent and clamp into 0..=100. NaN maps to 0.
pub fn clamp_percent(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, PERCENT_MAX as f32) as u8
}

/// Engine configuration, provided by the scene factory.
#[derive(Debug, Clone)]
pub struct NovelConfig {
    /// Design resolution width in pixels (default: 1024).
    pub base_width: f32,
    /// Design resolution height in pixels (default: 576).
    pub base_height: f32,
    /// Maximum number of quad instances per frame (default: 512).
    pub max_instances: usize,
    /// Frame deltas above this are clamped, in seconds (default: 0.1).
    pub max_frame_dt: f32,
    /// Chained scene-requested transitions allowed in one dispatch (default: 8).
    pub max_chained_transitions: usize,
}

impl Default for NovelConfig {
    fn default() -> Self {
        Self {
            base_width: 1024.0,
            base_height: 576.0,
            max_instances: 512,
            max_frame_dt: 0.1,
            max_chained_transitions: 8,
        }
    }
}
