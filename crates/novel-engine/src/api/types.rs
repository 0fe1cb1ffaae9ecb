use serde::{Deserialize, Serialize};

/// Unique identifier for a quad on a scene's stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuadId(pub u32);

/// Host-side texture handle. Allocated by the engine, realized by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextureId(pub u32);

/// Identifies one constructed scene instance.
/// Every host resource records the token of the scene that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneToken(pub u64);

/// One-shot sound effects. The page keeps one preloaded element per effect
/// and clones it on every play so overlapping triggers don't cut each other off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundEffect {
    Hover,
    Click,
}

/// Pointer cursor shown over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
    Grabbing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_id_serializes_as_number() {
        let json = serde_json::to_string(&TextureId(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn cursor_names_match_css() {
        assert_eq!(serde_json::to_string(&Cursor::Grabbing).unwrap(), "\"grabbing\"");
        assert_eq!(serde_json::to_string(&Cursor::Default).unwrap(), "\"default\"");
    }
}
