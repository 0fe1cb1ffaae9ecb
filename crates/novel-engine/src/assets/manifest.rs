use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::api::error::SceneError;
use crate::api::types::SoundEffect;

/// Every asset path a game uses, by name. Loaded from JSON embedded in the game crate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Image textures: name → path.
    #[serde(default)]
    pub textures: HashMap<String, String>,
    /// Background tracks.
    #[serde(default)]
    pub bgm: HashMap<String, BgmDescriptor>,
    /// One-shot effects and the typing loop.
    #[serde(default)]
    pub sounds: SoundSet,
}

/// Describes a background track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BgmDescriptor {
    /// Relative path to the audio file.
    pub path: String,
    #[serde(default = "default_looped")]
    pub looped: bool,
}

/// Paths the page preloads once at boot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoundSet {
    #[serde(default)]
    pub hover: Option<String>,
    #[serde(default)]
    pub click: Option<String>,
    /// Loop played while a line is being revealed.
    #[serde(default)]
    pub message: Option<String>,
}

fn default_looped() -> bool {
    true
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        serde_json::from_str(json).map_err(SceneError::Manifest)
    }

    pub fn texture_path(&self, name: &str) -> Result<&str, SceneError> {
        self.textures
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| SceneError::MissingAsset(name.to_string()))
    }

    pub fn bgm(&self, name: &str) -> Result<&BgmDescriptor, SceneError> {
        self.bgm.get(name).ok_or_else(|| SceneError::MissingAsset(name.to_string()))
    }

    pub fn effect_path(&self, effect: SoundEffect) -> Option<&str> {
        match effect {
            SoundEffect::Hover => self.sounds.hover.as_deref(),
            SoundEffect::Click => self.sounds.click.as_deref(),
        }
    }
}
