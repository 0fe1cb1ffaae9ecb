use std::fmt;
use std::str::FromStr;
use crate::api::config::{ConfigPatch, ConfigState, NovelConfig};
use crate::api::error::SceneError;
use crate::api::types::{SceneToken, TextureId};
use crate::core::host::{AssetOutcome, Host, LoadStatus};
use crate::core::stage::Stage;
use crate::input::queue::{InputEvent, ListenerMask};
use crate::systems::audio::AudioService;
use crate::ui::screen::ScreenLayout;

/// Everything a scene receives when it is built.
/// `config` is a copy: later manager-side changes are not pushed into it.
#[derive(Debug, Clone, Copy)]
pub struct SceneInit {
    pub token: SceneToken,
    pub config: ConfigState,
    pub screen: ScreenLayout,
    pub fullscreen: bool,
}

/// One screen of the game with its own input and render lifecycle.
///
/// A scene is built by its factory, then stays Loading until
/// [`Scene::is_ready`] holds. The manager calls `start` once it is ready and
/// `dispose` exactly before the next scene is built. `dispose` must release
/// everything the scene created and may be called more than once.
pub trait Scene<K> {
    /// Whether every blocking asynchronous texture has settled.
    fn is_ready(&self, _host: &Host) -> bool {
        true
    }

    /// The page answered for one of this scene's textures.
    fn on_asset(&mut self, _ctx: &mut SceneContext<'_, K>, _texture: TextureId, _outcome: &AssetOutcome) {}

    /// Begin receiving frames. Typically also starts background music.
    fn start(&mut self, ctx: &mut SceneContext<'_, K>);

    /// Stop receiving frames without releasing anything.
    fn stop(&mut self);

    fn dispose(&mut self, ctx: &mut SceneContext<'_, K>);

    fn is_running(&self) -> bool;

    /// Input kinds this scene listens to. Empty once disposed.
    fn listeners(&self) -> ListenerMask;

    fn update(&mut self, ctx: &mut SceneContext<'_, K>, dt: f32);

    fn handle_input(&mut self, ctx: &mut SceneContext<'_, K>, event: &InputEvent);

    /// Lay everything out again for `ctx.screen`.
    fn resize(&mut self, ctx: &mut SceneContext<'_, K>);

    fn stage(&self) -> &Stage;
}

/// Builds scenes by kind. The game's half of the contract.
pub trait SceneFactory {
    type Kind: Copy + Eq + fmt::Debug + fmt::Display + FromStr + 'static;

    /// Return engine configuration. Called once before the first scene.
    fn config(&self) -> NovelConfig {
        NovelConfig::default()
    }

    /// Scene shown at boot.
    fn initial(&self) -> Self::Kind;

    /// Scene to fall back to when building another one fails.
    fn fallback(&self) -> Option<Self::Kind> {
        None
    }

    fn create(
        &mut self,
        kind: Self::Kind,
        init: SceneInit,
        ctx: &mut SceneContext<'_, Self::Kind>,
    ) -> Result<Box<dyn Scene<Self::Kind>>, SceneError>;
}

/// Manager-owned services lent to a scene for one call.
pub struct SceneContext<'a, K> {
    pub host: &'a mut Host,
    pub audio: &'a mut AudioService,
    pub screen: ScreenLayout,
    fullscreen: bool,
    config: &'a mut ConfigState,
    transition: &'a mut Option<K>,
}

impl<'a, K: Copy + fmt::Debug> SceneContext<'a, K> {
    pub fn new(
        host: &'a mut Host,
        audio: &'a mut AudioService,
        config: &'a mut ConfigState,
        transition: &'a mut Option<K>,
        screen: ScreenLayout,
        fullscreen: bool,
    ) -> Self {
        Self { host, audio, screen, fullscreen, config, transition }
    }

    /// Ask for a transition once the current call returns.
    /// The first request wins; later ones are dropped.
    pub fn change_scene(&mut self, kind: K) {
        match *self.transition {
            Some(pending) => log::warn!("dropping transition to {:?}, {:?} already requested", kind, pending),
            None => *self.transition = Some(kind),
        }
    }

    pub fn requested_scene(&self) -> Option<K> {
        *self.transition
    }

    /// Merge into the shared configuration and apply volumes right away.
    pub fn update_config(&mut self, patch: &ConfigPatch) -> ConfigState {
        self.config.apply(patch);
        self.audio.apply_config(&*self.config);
        *self.config
    }

    pub fn config(&self) -> ConfigState {
        *self.config
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}

/// Whether none of `textures` is still loading.
pub fn all_settled(host: &Host, textures: &[TextureId]) -> bool {
    textures.iter().all(|id| host.status(*id) != Some(LoadStatus::Pending))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::texture::TextureContent;
    use glam::Vec2;

    #[test]
    fn first_transition_request_wins() {
        let mut host = Host::new();
        let mut audio = AudioService::new();
        let mut config = ConfigState::default();
        let mut transition = None;
        let mut ctx = SceneContext::new(&mut host, &mut audio, &mut config, &mut transition, ScreenLayout::base(), false);
        ctx.change_scene(1u8);
        ctx.change_scene(2u8);
        assert_eq!(ctx.requested_scene(), Some(1));
    }

    #[test]
    fn config_update_reaches_audio() {
        let mut host = Host::new();
        let mut audio = AudioService::new();
        let mut config = ConfigState::default();
        let mut transition: Option<u8> = None;
        let mut ctx = SceneContext::new(&mut host, &mut audio, &mut config, &mut transition, ScreenLayout::base(), false);
        let state = ctx.update_config(&ConfigPatch::bgm_volume(30));
        assert_eq!(state.bgm_volume, 30);
        assert!((ctx.audio.bgm_gain() - 0.3).abs() < 1e-6);
        assert_eq!(config.bgm_volume, 30);
    }

    #[test]
    fn settled_once_no_texture_is_pending() {
        let mut host = Host::new();
        let art = host.create_texture(SceneToken(1), Vec2::ONE, TextureContent::Image { path: "a.png".into() });
        let label = host.create_texture(SceneToken(1), Vec2::ONE, TextureContent::Glow);
        assert!(!all_settled(&host, &[art, label]));
        host.settle(art, &AssetOutcome::Failed { reason: "404".into() });
        assert!(all_settled(&host, &[art, label]));
    }
}
