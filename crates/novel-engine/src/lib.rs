pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod extensions;
pub mod input;
pub mod renderer;
pub mod systems;
pub mod ui;

// Re-export key types at crate root for convenience
pub use api::config::{ConfigPatch, ConfigState, DisplayMode, NovelConfig};
pub use api::error::{ConfigError, SceneError};
pub use api::scene::{all_settled, Scene, SceneContext, SceneFactory, SceneInit};
pub use api::types::{Cursor, QuadId, SceneToken, SoundEffect, TextureId};
pub use assets::manifest::AssetManifest;
pub use assets::registry::TextureRegistry;
pub use components::layer::RenderLayer;
pub use components::quad::Quad;
pub use components::texture::{BlendMode, TextureContent};
pub use core::host::{AssetOutcome, Host, HostCommand, LoadStatus};
pub use core::manager::SceneManager;
pub use core::stage::Stage;
pub use core::time::FrameClock;
pub use core::timer::{TimerId, Timers};
pub use input::pointer::CanvasRect;
pub use input::queue::{InputEvent, InputKind, InputQueue, Key, ListenerMask, PointerButton};
pub use renderer::camera::OrthoCamera;
pub use renderer::instance::{QuadInstance, RenderBuffer};
pub use systems::audio::{AudioCommand, AudioService};
pub use systems::dialogue::{DialogueLine, DialogueRunner, DialogueStep};
pub use systems::particles::{GlowParticles, GlowSettings};
pub use systems::text::{RevealEvent, RevealState, TextReveal};
pub use ui::layer::{InteractiveLayer, UiEvent};
pub use ui::screen::ScreenLayout;

pub use extensions::{lerp, lerp_vec2, smooth_toward};
