use std::collections::HashMap;
use glam::Vec2;
use serde::Serialize;
use crate::api::types::{Cursor, SceneToken, TextureId};
use crate::components::texture::TextureContent;

/// Requests from the engine to the page, drained once per frame as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostCommand {
    CreateTexture { id: TextureId, width: u32, height: u32, content: TextureContent },
    /// Full repaint of an existing texture.
    PaintTexture { id: TextureId, width: u32, height: u32, content: TextureContent },
    ReleaseTexture { id: TextureId },
    ResizeCanvas { width: f32, height: f32 },
    SetCursor { cursor: Cursor },
    RequestFullscreen,
    ExitFullscreen,
    Alert { message: String },
    SceneChanged { scene: String },
    SceneFailed { scene: String, reason: String },
}

/// Load state of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Ready,
    Failed,
}

/// Result of an asynchronous texture load, as reported by the page.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetOutcome {
    Loaded { width: f32, height: f32 },
    Failed { reason: String },
}

#[derive(Debug)]
struct TextureEntry {
    owner: SceneToken,
    status: LoadStatus,
    /// Intrinsic size for images, requested canvas size otherwise.
    size: Vec2,
}

/// The engine's side of the page: outgoing commands plus the ledger of
/// every live host texture and the scene that owns it.
pub struct Host {
    textures: HashMap<TextureId, TextureEntry>,
    next_texture: u32,
    commands: Vec<HostCommand>,
    cursor: Cursor,
}

impl Host {
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            next_texture: 1,
            commands: Vec::with_capacity(32),
            cursor: Cursor::Default,
        }
    }

    /// Allocate a texture owned by `owner`. `size` is the canvas size in pixels
    /// (ignored by the page for images).
    pub fn create_texture(&mut self, owner: SceneToken, size: Vec2, content: TextureContent) -> TextureId {
        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        let status = if content.is_async() { LoadStatus::Pending } else { LoadStatus::Ready };
        self.textures.insert(id, TextureEntry { owner, status, size });
        let (width, height) = pixel_size(size);
        self.commands.push(HostCommand::CreateTexture { id, width, height, content });
        id
    }

    /// Replace a texture's contents.
    pub fn paint_texture(&mut self, id: TextureId, size: Vec2, content: TextureContent) {
        let Some(entry) = self.textures.get_mut(&id) else {
            log::warn!("paint on released texture {:?}", id);
            return;
        };
        entry.size = size;
        let (width, height) = pixel_size(size);
        self.commands.push(HostCommand::PaintTexture { id, width, height, content });
    }

    /// Release a texture. Returns false if it was already gone.
    pub fn release_texture(&mut self, id: TextureId) -> bool {
        if self.textures.remove(&id).is_none() {
            return false;
        }
        self.commands.push(HostCommand::ReleaseTexture { id });
        true
    }

    /// Release everything `owner` still holds. Returns how many were released.
    pub fn release_owned_by(&mut self, owner: SceneToken) -> usize {
        let mut ids: Vec<TextureId> = self
            .textures
            .iter()
            .filter(|(_, e)| e.owner == owner)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        for id in &ids {
            self.release_texture(*id);
        }
        ids.len()
    }

    pub fn owned_by(&self, owner: SceneToken) -> usize {
        self.textures.values().filter(|e| e.owner == owner).count()
    }

    /// Asynchronous textures of `owner` that haven't settled yet.
    pub fn pending_for(&self, owner: SceneToken) -> usize {
        self.textures
            .values()
            .filter(|e| e.owner == owner && e.status == LoadStatus::Pending)
            .count()
    }

    pub fn status(&self, id: TextureId) -> Option<LoadStatus> {
        self.textures.get(&id).map(|e| e.status)
    }

    pub fn texture_size(&self, id: TextureId) -> Option<Vec2> {
        self.textures.get(&id).map(|e| e.size)
    }

    /// Record the page's answer for a pending texture.
    /// Returns the owner, or None when the texture was already released or settled.
    pub fn settle(&mut self, id: TextureId, outcome: &AssetOutcome) -> Option<SceneToken> {
        let entry = self.textures.get_mut(&id)?;
        if entry.status != LoadStatus::Pending {
            return None;
        }
        match outcome {
            AssetOutcome::Loaded { width, height } => {
                entry.status = LoadStatus::Ready;
                entry.size = Vec2::new(*width, *height);
            }
            AssetOutcome::Failed { .. } => entry.status = LoadStatus::Failed,
        }
        Some(entry.owner)
    }

    /// Emits a command only when the cursor actually changes.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        if self.cursor != cursor {
            self.cursor = cursor;
            self.commands.push(HostCommand::SetCursor { cursor });
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn request_fullscreen(&mut self) {
        self.commands.push(HostCommand::RequestFullscreen);
    }

    pub fn exit_fullscreen(&mut self) {
        self.commands.push(HostCommand::ExitFullscreen);
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.commands.push(HostCommand::Alert { message: message.into() });
    }

    pub fn resize_canvas(&mut self, size: Vec2) {
        self.commands.push(HostCommand::ResizeCanvas { width: size.x, height: size.y });
    }

    pub fn push(&mut self, command: HostCommand) {
        self.commands.push(command);
    }

    /// Pending commands, oldest first.
    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }

    pub fn drain(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of live textures across all owners.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

fn pixel_size(size: Vec2) -> (u32, u32) {
    (size.x.round().max(0.0) as u32, size.y.round().max(0.0) as u32)
}
