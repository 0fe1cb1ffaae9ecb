use serde::Deserialize;
use novel_engine::ui::credit::CreditRow;
use novel_engine::{DialogueLine, SceneError};

const STORY_JSON: &str = include_str!("../assets/story.json");
const MANIFEST_JSON: &str = include_str!("../assets/manifest.json");

/// Every scripted line of the game plus the credit roll.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Story {
    pub main: Vec<DialogueLine>,
    pub end1: Vec<DialogueLine>,
    pub end2: Vec<DialogueLine>,
    pub end3: Vec<DialogueLine>,
    #[serde(default)]
    pub credits: Vec<CreditRow>,
}

impl Story {
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        serde_json::from_str(json).map_err(|source| SceneError::Script { name: "story", source })
    }

    pub fn embedded() -> Result<Self, SceneError> {
        Self::from_json(STORY_JSON)
    }
}

pub fn embedded_manifest() -> &'static str {
    MANIFEST_JSON
}
