use std::collections::HashMap;
use glam::Vec2;
use crate::api::error::SceneError;
use crate::api::scene::all_settled;
use crate::api::types::{SceneToken, TextureId};
use crate::assets::manifest::AssetManifest;
use crate::components::texture::TextureContent;
use crate::core::host::Host;

/// Textures one scene owns: manifest images by name plus the canvas
/// textures it draws itself. Tracks which of them the scene waits on before
/// it starts.
pub struct TextureRegistry {
    owner: SceneToken,
    textures: HashMap<String, TextureId>,
    drawn: Vec<TextureId>,
    blocking: Vec<TextureId>,
}

impl TextureRegistry {
    pub fn new(owner: SceneToken) -> Self {
        Self {
            owner,
            textures: HashMap::new(),
            drawn: Vec::new(),
            blocking: Vec::new(),
        }
    }

    pub fn owner(&self) -> SceneToken {
        self.owner
    }

    /// Create a texture the scene paints itself. Asynchronous content
    /// (icon glyphs) also blocks the start.
    pub fn create(&mut self, host: &mut Host, size: Vec2, content: TextureContent) -> TextureId {
        let blocking = content.is_async();
        let id = host.create_texture(self.owner, size, content);
        self.drawn.push(id);
        if blocking {
            self.block_on(id);
        }
        id
    }

    /// Request a named image. Loading it twice returns the same texture.
    pub fn load(&mut self, host: &mut Host, manifest: &AssetManifest, name: &str) -> Result<TextureId, SceneError> {
        if let Some(id) = self.textures.get(name) {
            return Ok(*id);
        }
        let path = manifest.texture_path(name)?;
        let id = host.create_texture(self.owner, Vec2::ZERO, TextureContent::Image { path: path.to_string() });
        self.textures.insert(name.to_string(), id);
        Ok(id)
    }

    /// Like [`load`](Self::load), but the scene stays loading until it settles.
    pub fn load_blocking(&mut self, host: &mut Host, manifest: &AssetManifest, name: &str) -> Result<TextureId, SceneError> {
        let id = self.load(host, manifest, name)?;
        if !self.blocking.contains(&id) {
            self.blocking.push(id);
        }
        Ok(id)
    }

    /// Track a texture created outside the manifest (e.g. an icon glyph) as blocking.
    pub fn block_on(&mut self, id: TextureId) {
        if !self.blocking.contains(&id) {
            self.blocking.push(id);
        }
    }

    pub fn get(&self, name: &str) -> Option<TextureId> {
        self.textures.get(name).copied()
    }

    pub fn is_settled(&self, host: &Host) -> bool {
        all_settled(host, &self.blocking)
    }

    pub fn release_all(&mut self, host: &mut Host) {
        for id in self.textures.values().chain(self.drawn.iter()) {
            host.release_texture(*id);
        }
        self.textures.clear();
        self.drawn.clear();
        self.blocking.clear();
    }

    pub fn len(&self) -> usize {
        self.textures.len() + self.drawn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
