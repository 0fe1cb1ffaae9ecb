use serde::Serialize;
use crate::api::config::ConfigState;
use crate::ui::config_panel::ConfigAction;
use crate::ui::credit::CreditRow;
use crate::ui::gallery::GalleryTab;

/// Blend mode for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard alpha blending.
    #[default]
    Alpha,
    /// Additive blending (glow particles).
    Additive,
}

/// Everything the page needs to (re)draw one texture.
///
/// Canvas-backed variants are always described in full: a paint replaces the
/// previous contents, there are no incremental updates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextureContent {
    /// Bitmap loaded by URL. Resolves asynchronously.
    Image { path: String },
    /// Centered single-line text.
    Label { text: String, font_px: f32 },
    Button { label: String, hovered: bool },
    DialogueBox { speaker: String, body: String },
    ConfigPanel { state: ConfigState, hovered: Option<ConfigAction> },
    GalleryPanel { tab: GalleryTab },
    CreditPanel { rows: Vec<CreditRow> },
    /// Icon-font glyph. Resolves asynchronously once the font is ready.
    GearIcon { glyph: String },
    /// Soft radial dot for additive particles.
    Glow,
}

impl TextureContent {
    /// Whether the page must report back before the texture is usable.
    pub fn is_async(&self) -> bool {
        matches!(self, Self::Image { .. } | Self::GearIcon { .. })
    }
}
