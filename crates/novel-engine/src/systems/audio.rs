//! Injected audio service.
//!
//! Holds the music/effect volumes and the current background track, and queues
//! [`AudioCommand`]s for the page. Playback itself happens in the page; a
//! rejected `play()` (autoplay policy) is reported back through
//! [`AudioService::mark_bgm_blocked`] and retried on the next pointer-down.

use serde::Serialize;
use crate::api::config::ConfigState;
use crate::api::types::SoundEffect;

/// Convert a percent to a 0..1 gain, clamping out-of-range input.
pub fn percent_to_gain(percent: f32) -> f32 {
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0) / 100.0
}

/// Requests from the engine to the page's audio elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AudioCommand {
    /// Stop whatever is playing and start `track`.
    PlayBgm { track: String, looped: bool, volume: f32 },
    StopBgm,
    SetBgmVolume { volume: f32 },
    /// Fire-and-forget: the page clones a preloaded element per request.
    PlayEffect { effect: SoundEffect, volume: f32 },
    StartMessageLoop { volume: f32 },
    StopMessageLoop,
}

#[derive(Debug, Clone)]
struct BgmTrack {
    path: String,
    looped: bool,
    playing: bool,
}

pub struct AudioService {
    bgm: Option<BgmTrack>,
    bgm_gain: f32,
    se_gain: f32,
    message_loop: bool,
    commands: Vec<AudioCommand>,
}

impl AudioService {
    pub fn new() -> Self {
        Self::from_config(&ConfigState::default())
    }

    pub fn from_config(config: &ConfigState) -> Self {
        Self {
            bgm: None,
            bgm_gain: percent_to_gain(config.bgm_volume as f32),
            se_gain: percent_to_gain(config.se_volume as f32),
            message_loop: false,
            commands: Vec::new(),
        }
    }

    /// Push both volumes from a config record.
    pub fn apply_config(&mut self, config: &ConfigState) {
        self.set_bgm_volume_percent(config.bgm_volume as f32);
        self.set_se_volume_percent(config.se_volume as f32);
    }

    pub fn set_bgm_volume_percent(&mut self, percent: f32) {
        let gain = percent_to_gain(percent);
        if gain == self.bgm_gain {
            return;
        }
        self.bgm_gain = gain;
        if self.bgm.is_some() {
            self.commands.push(AudioCommand::SetBgmVolume { volume: gain });
        }
    }

    pub fn set_se_volume_percent(&mut self, percent: f32) {
        self.se_gain = percent_to_gain(percent);
    }

    pub fn bgm_gain(&self) -> f32 {
        self.bgm_gain
    }

    pub fn se_gain(&self) -> f32 {
        self.se_gain
    }

    /// Start a background track, replacing any current one.
    pub fn play_bgm(&mut self, path: &str, looped: bool) {
        if self.bgm.take().is_some() {
            self.commands.push(AudioCommand::StopBgm);
        }
        self.bgm = Some(BgmTrack { path: path.to_string(), looped, playing: true });
        self.commands.push(AudioCommand::PlayBgm {
            track: path.to_string(),
            looped,
            volume: self.bgm_gain,
        });
    }

    /// Start `path` unless it is already playing. Used for the pointer-down retry.
    pub fn ensure_bgm(&mut self, path: &str, looped: bool) {
        let already = self
            .bgm
            .as_ref()
            .is_some_and(|t| t.playing && t.path == path);
        if !already {
            self.play_bgm(path, looped);
        }
    }

    pub fn stop_bgm(&mut self) {
        if self.bgm.take().is_some() {
            self.commands.push(AudioCommand::StopBgm);
        }
    }

    /// The page could not start the current track. It stays selected so the
    /// next user gesture can retry.
    pub fn mark_bgm_blocked(&mut self) {
        if let Some(track) = self.bgm.as_mut() {
            track.playing = false;
        }
    }

    pub fn is_bgm_playing(&self) -> bool {
        self.bgm.as_ref().is_some_and(|t| t.playing)
    }

    pub fn current_bgm(&self) -> Option<(&str, bool)> {
        self.bgm.as_ref().map(|t| (t.path.as_str(), t.looped))
    }

    pub fn play_effect(&mut self, effect: SoundEffect) {
        self.commands.push(AudioCommand::PlayEffect { effect, volume: self.se_gain });
    }

    pub fn play_hover(&mut self) {
        self.play_effect(SoundEffect::Hover);
    }

    pub fn play_click(&mut self) {
        self.play_effect(SoundEffect::Click);
    }

    /// Typing loop under a revealing line. Idempotent.
    pub fn start_message_loop(&mut self) {
        if !self.message_loop {
            self.message_loop = true;
            self.commands.push(AudioCommand::StartMessageLoop { volume: self.se_gain });
        }
    }

    pub fn stop_message_loop(&mut self) {
        if self.message_loop {
            self.message_loop = false;
            self.commands.push(AudioCommand::StopMessageLoop);
        }
    }

    pub fn is_message_loop_playing(&self) -> bool {
        self.message_loop
    }

    pub fn commands(&self) -> &[AudioCommand] {
        &self.commands
    }

    pub fn drain(&mut self) -> Vec<AudioCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Default for AudioService {
    fn default() -> Self {
        Self::new()
    }
}
