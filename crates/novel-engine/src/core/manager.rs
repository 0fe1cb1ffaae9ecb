//! Scene sequencing.
//!
//! The manager owns everything that outlives a scene: the shared
//! configuration, the audio service, the host outbox and the screen layout.
//! At most one scene exists at a time. A transition always disposes the
//! current scene (and sweeps whatever it left behind) before the next one is
//! built.

use std::fmt;
use crate::api::config::{ConfigPatch, ConfigState, NovelConfig};
use crate::api::error::{ConfigError, SceneError};
use crate::api::scene::{Scene, SceneContext, SceneFactory, SceneInit};
use crate::api::types::{SceneToken, TextureId};
use crate::core::host::{AssetOutcome, Host, HostCommand};
use crate::core::stage::Stage;
use crate::input::queue::{InputEvent, InputKind};
use crate::renderer::instance::RenderBuffer;
use crate::systems::audio::{AudioCommand, AudioService};
use crate::systems::render::build_render_buffer;
use crate::ui::screen::ScreenLayout;

/// Lend the manager's services to a scene, collecting its transition request.
macro_rules! scene_ctx {
    ($mgr:ident, $transition:ident) => {
        SceneContext::new(
            &mut $mgr.host,
            &mut $mgr.audio,
            &mut $mgr.config,
            &mut $transition,
            $mgr.screen,
            $mgr.fullscreen,
        )
    };
}

struct ActiveScene<K> {
    kind: K,
    token: SceneToken,
    scene: Box<dyn Scene<K>>,
    /// Layout the scene was last laid out for.
    screen: ScreenLayout,
    started: bool,
}

pub struct SceneManager<F: SceneFactory> {
    factory: F,
    settings: NovelConfig,
    config: ConfigState,
    audio: AudioService,
    host: Host,
    screen: ScreenLayout,
    fullscreen: bool,
    active: Option<ActiveScene<F::Kind>>,
    pending: Option<F::Kind>,
    next_token: u64,
}

impl<F: SceneFactory> SceneManager<F> {
    pub fn new(factory: F) -> Self {
        let settings = factory.config();
        let config = ConfigState::default();
        Self {
            screen: ScreenLayout::from_canvas(settings.base_width, settings.base_height),
            audio: AudioService::from_config(&config),
            host: Host::new(),
            fullscreen: false,
            active: None,
            pending: None,
            next_token: 1,
            config,
            settings,
            factory,
        }
    }

    /// Build and start the factory's initial scene.
    pub fn boot(&mut self) {
        let initial = self.factory.initial();
        self.change_scene(initial);
    }

    /// Dispose the current scene (even one still loading) and build `kind`.
    pub fn change_scene(&mut self, kind: F::Kind) {
        if let Some(dropped) = self.pending.take() {
            log::warn!("transition to {} superseded by {}", dropped, kind);
        }
        self.transition_to(kind);
        self.flush_transitions();
    }

    /// Like [`change_scene`](Self::change_scene) for a name coming from the page.
    /// An unknown name tears the current scene down and falls back.
    pub fn change_scene_by_name(&mut self, name: &str) -> Result<(), SceneError> {
        match name.parse::<F::Kind>() {
            Ok(kind) => {
                self.change_scene(kind);
                Ok(())
            }
            Err(_) => {
                let err = SceneError::UnknownScene(name.to_string());
                log::error!("{}", err);
                self.host.push(HostCommand::SceneFailed { scene: name.to_string(), reason: err.to_string() });
                self.teardown();
                self.pending = self.factory.fallback();
                self.flush_transitions();
                Err(err)
            }
        }
    }

    /// Merge into the shared configuration and apply volumes. The running
    /// scene is not told; it keeps the snapshot it was built with.
    pub fn update_config_state(&mut self, patch: &ConfigPatch) {
        self.config.apply(patch);
        self.audio.apply_config(&self.config);
    }

    pub fn update_config_json(&mut self, json: &str) -> Result<ConfigState, ConfigError> {
        let patch = ConfigPatch::from_json(json)?;
        self.update_config_state(&patch);
        Ok(self.config)
    }

    /// Route one input event to the live scene, if it listens for that kind.
    pub fn dispatch(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Resize { width, height } => {
                self.screen = ScreenLayout::from_container(*width, *height);
                self.host.resize_canvas(self.screen.size());
            }
            InputEvent::FullscreenChanged { active } => self.fullscreen = *active,
            _ => {}
        }

        let mut transition = None;
        if let Some(active) = self.active.as_mut() {
            let kind = event.kind();
            if active.started && active.scene.listeners().contains(kind) {
                let mut ctx = scene_ctx!(self, transition);
                if kind == InputKind::Resize {
                    active.screen = ctx.screen;
                    active.scene.resize(&mut ctx);
                } else {
                    active.scene.handle_input(&mut ctx, event);
                }
            }
        }
        self.queue(transition);
        self.flush_transitions();
    }

    /// The page finished (or gave up) loading a texture.
    pub fn asset_settled(&mut self, id: TextureId, outcome: AssetOutcome) {
        if let AssetOutcome::Failed { reason } = &outcome {
            log::warn!("texture {:?} failed to load: {}", id, reason);
        }
        let Some(owner) = self.host.settle(id, &outcome) else {
            log::debug!("ignoring stale asset callback for {:?}", id);
            return;
        };

        let mut transition = None;
        match self.active.as_mut() {
            Some(active) if active.token == owner => {
                let mut ctx = scene_ctx!(self, transition);
                active.scene.on_asset(&mut ctx, id, &outcome);
            }
            _ => log::debug!("asset {:?} belongs to a scene that is gone", id),
        }
        self.queue(transition);
        self.try_start();
        self.flush_transitions();
    }

    /// The page refused to start background music (autoplay policy).
    pub fn audio_blocked(&mut self) {
        log::warn!("background music blocked; will retry on the next pointer press");
        self.audio.mark_bgm_blocked();
    }

    /// Advance the live scene by an already clamped delta.
    pub fn tick(&mut self, dt: f32) {
        let mut transition = None;
        if let Some(active) = self.active.as_mut() {
            if active.started && active.scene.is_running() {
                let mut ctx = scene_ctx!(self, transition);
                active.scene.update(&mut ctx, dt);
            }
        }
        self.queue(transition);
        self.flush_transitions();
    }

    /// Fill `buffer` from the live scene. A loading scene draws nothing.
    pub fn render(&self, buffer: &mut RenderBuffer) {
        match self.active.as_ref().filter(|a| a.started) {
            Some(active) => build_render_buffer(active.scene.stage().iter(), buffer),
            None => buffer.clear(),
        }
    }

    /// Dispose the current scene and stay empty.
    pub fn shutdown(&mut self) {
        self.pending = None;
        self.teardown();
    }

    pub fn drain_host_commands(&mut self) -> Vec<HostCommand> {
        self.host.drain()
    }

    pub fn drain_audio_commands(&mut self) -> Vec<AudioCommand> {
        self.audio.drain()
    }

    pub fn current_kind(&self) -> Option<F::Kind> {
        self.active.as_ref().map(|a| a.kind)
    }

    /// Built but waiting on asynchronous textures.
    pub fn is_loading(&self) -> bool {
        self.active.as_ref().is_some_and(|a| !a.started)
    }

    pub fn stage(&self) -> Option<&Stage> {
        self.active.as_ref().map(|a| a.scene.stage())
    }

    pub fn config_state(&self) -> ConfigState {
        self.config
    }

    pub fn settings(&self) -> &NovelConfig {
        &self.settings
    }

    pub fn screen(&self) -> ScreenLayout {
        self.screen
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn audio(&self) -> &AudioService {
        &self.audio
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    fn transition_to(&mut self, kind: F::Kind) {
        self.teardown();

        let token = SceneToken(self.next_token);
        self.next_token += 1;
        let init = SceneInit {
            token,
            config: self.config,
            screen: self.screen,
            fullscreen: self.fullscreen,
        };

        let mut transition = None;
        let built = {
            let mut ctx = scene_ctx!(self, transition);
            self.factory.create(kind, init, &mut ctx)
        };
        match built {
            Ok(scene) => {
                log::info!("scene {} built", kind);
                self.active = Some(ActiveScene { kind, token, scene, screen: init.screen, started: false });
                self.queue(transition);
                self.try_start();
            }
            Err(err) => {
                log::error!("failed to build scene {}: {}", kind, err);
                let partial = self.host.release_owned_by(token);
                if partial > 0 {
                    log::warn!("released {} texture(s) from the failed {} scene", partial, kind);
                }
                self.host.push(HostCommand::SceneFailed { scene: kind.to_string(), reason: err.to_string() });
                self.pending = self.factory.fallback().filter(|fallback| *fallback != kind);
            }
        }
    }

    /// Start the current scene once its textures have settled.
    fn try_start(&mut self) {
        let mut transition = None;
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if active.started || !active.scene.is_ready(&self.host) {
            return;
        }
        active.started = true;
        let kind = active.kind;
        {
            let mut ctx = scene_ctx!(self, transition);
            if active.screen != ctx.screen {
                active.screen = ctx.screen;
                active.scene.resize(&mut ctx);
            }
            active.scene.start(&mut ctx);
        }
        log::info!("scene {} started", kind);
        self.host.push(HostCommand::SceneChanged { scene: kind.to_string() });
        self.queue(transition);
    }

    fn teardown(&mut self) {
        let Some(mut active) = self.active.take() else {
            return;
        };
        let mut transition = None;
        {
            let mut ctx = scene_ctx!(self, transition);
            active.scene.stop();
            active.scene.dispose(&mut ctx);
        }
        if let Some(kind) = transition {
            log::warn!("ignoring transition to {} requested while disposing {}", kind, active.kind);
        }
        let leaked = self.host.release_owned_by(active.token);
        if leaked > 0 {
            log::warn!("scene {} leaked {} texture(s); released", active.kind, leaked);
        }
        if self.audio.is_message_loop_playing() {
            log::warn!("scene {} left the message loop playing", active.kind);
            self.audio.stop_message_loop();
        }
        log::info!("scene {} disposed", active.kind);
    }

    fn queue(&mut self, transition: Option<F::Kind>) {
        let Some(kind) = transition else {
            return;
        };
        match self.pending {
            Some(first) => log::warn!("dropping transition to {}, {} already pending", kind, first),
            None => self.pending = Some(kind),
        }
    }

    fn flush_transitions(&mut self) {
        let mut hops = 0;
        while let Some(kind) = self.pending.take() {
            if hops >= self.settings.max_chained_transitions {
                log::error!("more than {} chained transitions; not entering {}", hops, kind);
                break;
            }
            hops += 1;
            self.transition_to(kind);
        }
    }
}

impl<F: SceneFactory> fmt::Debug for SceneManager<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneManager")
            .field("current", &self.current_kind().map(|k| k.to_string()))
            .field("loading", &self.is_loading())
            .field("config", &self.config)
            .field("screen", &self.screen)
            .finish()
    }
}
