use thiserror::Error;

/// Failures surfaced at the scene-manager boundary.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("unknown scene: {0}")]
    UnknownScene(String),
    #[error("failed to parse dialogue script `{name}`: {source}")]
    Script {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse asset manifest: {0}")]
    Manifest(#[source] serde_json::Error),
    #[error("asset `{0}` is not in the manifest")]
    MissingAsset(String),
    #[error("scene `{scene}` could not be built: {reason}")]
    Construction { scene: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config patch: {0}")]
    Patch(#[from] serde_json::Error),
}
