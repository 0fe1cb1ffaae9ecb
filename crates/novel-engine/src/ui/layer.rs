//! The interactive layer every scene shares.
//!
//! One dispatch routine covers the modal panels, the scene's foreground
//! hotspots and the gear button, in that priority order. It keeps the slider
//! drag, the hover edge and the click that follows a drag release, so scenes
//! only react to the [`UiEvent`] it returns.

use std::fmt;
use glam::Vec2;
use crate::api::config::{ConfigPatch, ConfigState, DisplayMode};
use crate::api::scene::{SceneContext, SceneInit};
use crate::api::types::{Cursor, QuadId, TextureId};
use crate::core::host::Host;
use crate::core::stage::Stage;
use crate::input::queue::{InputEvent, Key, PointerButton};
use crate::ui::config_panel::{ConfigAction, ConfigPanel, Slider};
use crate::ui::credit::{CreditAction, CreditPanel, CreditRow};
use crate::ui::gallery::{GalleryAction, GalleryEntry, GalleryPanel};
use crate::ui::gear::GearButton;
use crate::ui::screen::ScreenLayout;

/// What the layer made of one input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent<A> {
    /// Nothing interactive was involved.
    Idle,
    /// The layer swallowed the event.
    Consumed,
    /// A foreground hotspot was clicked.
    Activate(A),
    /// The pointer moved onto another hotspot, or off all of them.
    Hover(Option<A>),
    /// A click that landed on no UI at all.
    Backdrop,
    ConfigChanged(ConfigState),
    BackToTitle,
    GalleryJump(GalleryEntry),
}

#[derive(Debug)]
struct Hotspot<A> {
    quad: QuadId,
    action: A,
    enabled: bool,
}

pub struct InteractiveLayer<A> {
    config: Option<ConfigPanel>,
    gear: Option<GearButton>,
    gallery: Option<GalleryPanel>,
    credit: Option<CreditPanel>,
    hotspots: Vec<Hotspot<A>>,
    dragging: Option<Slider>,
    released_after_drag: bool,
    hovered: Option<A>,
    gear_hovered: bool,
    released: bool,
}

impl<A: Copy + PartialEq + fmt::Debug> InteractiveLayer<A> {
    /// Config panel plus the gear that opens it.
    pub fn new(stage: &mut Stage, host: &mut Host, init: &SceneInit) -> Self {
        let mut layer = Self::bare();
        layer.config = Some(ConfigPanel::new(stage, host, init.token, &init.screen, init.config));
        layer.gear = Some(GearButton::spawn(stage, host, init.token, &init.screen));
        layer
    }

    /// Hotspots and the backdrop only. Allocates nothing on the host.
    pub fn bare() -> Self {
        Self {
            config: None,
            gear: None,
            gallery: None,
            credit: None,
            hotspots: Vec::new(),
            dragging: None,
            released_after_drag: false,
            hovered: None,
            gear_hovered: false,
            released: false,
        }
    }

    pub fn with_gallery(mut self, stage: &mut Stage, host: &mut Host, init: &SceneInit) -> Self {
        self.gallery = Some(GalleryPanel::new(stage, host, init.token, &init.screen));
        self
    }

    pub fn with_credit(mut self, stage: &mut Stage, host: &mut Host, init: &SceneInit, rows: Vec<CreditRow>) -> Self {
        self.credit = Some(CreditPanel::new(stage, host, init.token, &init.screen, rows));
        self
    }

    /// Register a clickable quad. Earlier registrations win on overlap.
    pub fn add_hotspot(&mut self, quad: QuadId, action: A) {
        self.hotspots.push(Hotspot { quad, action, enabled: true });
    }

    pub fn set_hotspot_enabled(&mut self, action: A, enabled: bool) {
        for h in self.hotspots.iter_mut().filter(|h| h.action == action) {
            h.enabled = enabled;
        }
    }

    pub fn gear_texture(&self) -> Option<TextureId> {
        self.gear.as_ref().map(|g| g.texture)
    }

    pub fn config_state(&self) -> Option<ConfigState> {
        self.config.as_ref().map(|c| c.state())
    }

    pub fn config_panel(&self) -> Option<&ConfigPanel> {
        self.config.as_ref()
    }

    pub fn hovered(&self) -> Option<A> {
        self.hovered
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    pub fn is_config_open(&self, stage: &Stage) -> bool {
        self.config.as_ref().is_some_and(|c| c.is_visible(stage))
    }

    pub fn is_gallery_open(&self, stage: &Stage) -> bool {
        self.gallery.as_ref().is_some_and(|g| g.is_visible(stage))
    }

    pub fn is_credit_open(&self, stage: &Stage) -> bool {
        self.credit.as_ref().is_some_and(|c| c.is_visible(stage))
    }

    pub fn is_modal_open(&self, stage: &Stage) -> bool {
        self.is_config_open(stage) || self.is_gallery_open(stage) || self.is_credit_open(stage)
    }

    pub fn open_gallery(&mut self, stage: &mut Stage, host: &mut Host) {
        if let Some(gallery) = self.gallery.as_mut() {
            if let Some(config) = self.config.as_mut() {
                config.hide(stage, host);
            }
            gallery.show(stage, host);
        }
    }

    pub fn open_credit(&mut self, stage: &mut Stage, host: &mut Host) {
        if let Some(credit) = self.credit.as_ref() {
            if let Some(config) = self.config.as_mut() {
                config.hide(stage, host);
            }
            credit.show(stage);
        }
    }

    pub fn handle<K: Copy + fmt::Debug>(
        &mut self,
        ctx: &mut SceneContext<'_, K>,
        stage: &mut Stage,
        event: &InputEvent,
    ) -> UiEvent<A> {
        if self.released {
            return UiEvent::Idle;
        }
        match event {
            InputEvent::PointerDown { x, y, button } => {
                let p = ctx.screen.ndc_to_world(Vec2::new(*x, *y));
                self.pointer_down(ctx, stage, p, *button)
            }
            InputEvent::PointerMove { x, y } => {
                let p = ctx.screen.ndc_to_world(Vec2::new(*x, *y));
                self.pointer_move(ctx, stage, p)
            }
            InputEvent::PointerUp { .. } => self.end_drag(ctx, true),
            InputEvent::PointerLeave => self.pointer_leave(ctx),
            InputEvent::Click { x, y, button } => {
                let p = ctx.screen.ndc_to_world(Vec2::new(*x, *y));
                self.click(ctx, stage, p, *button)
            }
            InputEvent::KeyDown { key: Key::Escape } if ctx.is_fullscreen() => {
                ctx.host.exit_fullscreen();
                UiEvent::Consumed
            }
            InputEvent::KeyDown { .. } => UiEvent::Idle,
            InputEvent::Resize { .. } => {
                self.layout(stage, ctx.host, &ctx.screen);
                UiEvent::Idle
            }
            InputEvent::FullscreenChanged { active } => {
                let mode = if *active { DisplayMode::Fullscreen } else { DisplayMode::Window };
                self.apply_patch(ctx, &ConfigPatch::display_mode(mode))
            }
        }
    }

    pub fn layout(&mut self, stage: &mut Stage, host: &mut Host, screen: &ScreenLayout) {
        if let Some(config) = self.config.as_mut() {
            config.layout(stage, host, screen);
        }
        if let Some(gear) = &self.gear {
            gear.layout(stage, screen);
        }
        if let Some(gallery) = self.gallery.as_mut() {
            gallery.layout(stage, host, screen);
        }
        if let Some(credit) = self.credit.as_mut() {
            credit.layout(stage, host, screen);
        }
    }

    /// Free every panel quad and texture. Hotspot quads belong to the scene.
    pub fn release(&mut self, stage: &mut Stage, host: &mut Host) {
        if self.released {
            return;
        }
        self.released = true;
        if let Some(config) = self.config.take() {
            config.release(stage, host);
        }
        if let Some(gear) = self.gear.take() {
            gear.release(stage, host);
        }
        if let Some(gallery) = self.gallery.take() {
            gallery.release(stage, host);
        }
        if let Some(credit) = self.credit.take() {
            credit.release(stage, host);
        }
        self.hotspots.clear();
        self.dragging = None;
        self.hovered = None;
    }

    fn apply_patch<K: Copy + fmt::Debug>(&mut self, ctx: &mut SceneContext<'_, K>, patch: &ConfigPatch) -> UiEvent<A> {
        if let Some(config) = self.config.as_mut() {
            config.set_state(ctx.host, patch);
        }
        UiEvent::ConfigChanged(ctx.update_config(patch))
    }

    fn pointer_down<K: Copy + fmt::Debug>(
        &mut self,
        ctx: &mut SceneContext<'_, K>,
        stage: &Stage,
        p: Vec2,
        button: PointerButton,
    ) -> UiEvent<A> {
        if !button.is_primary() {
            return UiEvent::Idle;
        }
        let Some(hit) = self.open_config(stage).and_then(|c| c.action_at(stage, p)) else {
            return UiEvent::Idle;
        };
        let (Some(slider), Some(value)) = (hit.action.slider(), hit.value) else {
            return UiEvent::Idle;
        };
        self.dragging = Some(slider);
        ctx.host.set_cursor(Cursor::Grabbing);
        self.apply_patch(ctx, &slider.patch(value))
    }

    fn pointer_move<K: Copy + fmt::Debug>(&mut self, ctx: &mut SceneContext<'_, K>, stage: &Stage, p: Vec2) -> UiEvent<A> {
        if let Some(slider) = self.dragging {
            let value = self
                .config
                .as_ref()
                .and_then(|c| c.slider_value_at(stage, p, slider).filter(|v| *v != slider.value(&c.state())));
            return match value {
                Some(value) => self.apply_patch(ctx, &slider.patch(value)),
                None => UiEvent::Consumed,
            };
        }

        let panel_hit = self.open_config(stage).and_then(|c| c.action_at(stage, p)).map(|h| h.action);
        let button = panel_hit.filter(|a| a.is_button());
        if let Some(config) = self.config.as_mut() {
            if config.set_hovered(ctx.host, button) && button.is_some() {
                ctx.audio.play_hover();
            }
        }

        let over_gear = self.gear.as_ref().is_some_and(|g| g.contains(stage, p));
        if over_gear && !self.gear_hovered {
            ctx.audio.play_hover();
        }
        self.gear_hovered = over_gear;

        let hotspot = if self.is_modal_open(stage) { None } else { self.hotspot_at(stage, p) };
        let over_ui = panel_hit.is_some()
            || hotspot.is_some()
            || over_gear
            || self.gallery.as_ref().is_some_and(|g| g.action_at(stage, p).is_some())
            || self.credit.as_ref().is_some_and(|c| c.action_at(stage, p).is_some());
        ctx.host.set_cursor(if over_ui { Cursor::Pointer } else { Cursor::Default });

        if hotspot == self.hovered {
            return UiEvent::Idle;
        }
        self.hovered = hotspot;
        if hotspot.is_some() {
            ctx.audio.play_hover();
        }
        UiEvent::Hover(hotspot)
    }

    /// A release after a drag arms the click guard; leaving the canvas does not,
    /// since no click follows.
    fn end_drag<K: Copy + fmt::Debug>(&mut self, ctx: &mut SceneContext<'_, K>, released: bool) -> UiEvent<A> {
        let Some(slider) = self.dragging.take() else {
            return UiEvent::Idle;
        };
        self.released_after_drag = released;
        if slider == Slider::Se {
            ctx.audio.play_hover();
        }
        ctx.host.set_cursor(if released { Cursor::Pointer } else { Cursor::Default });
        UiEvent::Consumed
    }

    fn pointer_leave<K: Copy + fmt::Debug>(&mut self, ctx: &mut SceneContext<'_, K>) -> UiEvent<A> {
        if self.dragging.is_some() {
            return self.end_drag(ctx, false);
        }
        ctx.host.set_cursor(Cursor::Default);
        if self.hovered.take().is_some() {
            return UiEvent::Hover(None);
        }
        UiEvent::Idle
    }

    fn click<K: Copy + fmt::Debug>(
        &mut self,
        ctx: &mut SceneContext<'_, K>,
        stage: &mut Stage,
        p: Vec2,
        button: PointerButton,
    ) -> UiEvent<A> {
        if std::mem::take(&mut self.released_after_drag) {
            return UiEvent::Consumed;
        }
        if !button.is_primary() {
            return UiEvent::Idle;
        }
        if self.is_config_open(stage) {
            return self.click_config(ctx, stage, p);
        }
        if let Some(gallery) = self.gallery.as_mut() {
            if gallery.is_visible(stage) {
                return click_gallery(gallery, ctx, stage, p);
            }
        }
        if let Some(credit) = self.credit.as_ref() {
            if credit.is_visible(stage) {
                let inside = credit.contains(stage, p);
                if credit.action_at(stage, p) == Some(CreditAction::Close) || !inside {
                    credit.hide(stage);
                    ctx.audio.play_click();
                }
                return UiEvent::Consumed;
            }
        }
        if let Some(action) = self.hotspot_at(stage, p) {
            return UiEvent::Activate(action);
        }
        let on_gear = self.gear.as_ref().is_some_and(|g| g.contains(stage, p));
        if let Some(config) = self.config.as_mut().filter(|_| on_gear) {
            let fullscreen = ctx.is_fullscreen();
            if (config.state().display_mode == DisplayMode::Fullscreen) != fullscreen {
                config.sync_display_mode(ctx.host, fullscreen);
            }
            config.toggle(stage, ctx.host);
            ctx.audio.play_click();
            return UiEvent::Consumed;
        }
        UiEvent::Backdrop
    }

    fn click_config<K: Copy + fmt::Debug>(
        &mut self,
        ctx: &mut SceneContext<'_, K>,
        stage: &mut Stage,
        p: Vec2,
    ) -> UiEvent<A> {
        let Some(config) = self.config.as_mut() else {
            return UiEvent::Idle;
        };
        let Some(hit) = config.action_at(stage, p) else {
            if !config.contains(stage, p) {
                config.hide(stage, ctx.host);
                ctx.audio.play_click();
            }
            return UiEvent::Consumed;
        };
        // Volume sliders already applied on press.
        if matches!(hit.action, ConfigAction::BgmSlider | ConfigAction::SeSlider) {
            return UiEvent::Consumed;
        }
        ctx.audio.play_click();
        match (hit.action, hit.action.slider(), hit.value) {
            (_, Some(slider), Some(value)) => self.apply_patch(ctx, &slider.patch(value)),
            (ConfigAction::Fullscreen, ..) => {
                if !ctx.is_fullscreen() {
                    ctx.host.request_fullscreen();
                }
                self.apply_patch(ctx, &ConfigPatch::display_mode(DisplayMode::Fullscreen))
            }
            (ConfigAction::Window, ..) => {
                if ctx.is_fullscreen() {
                    ctx.host.exit_fullscreen();
                }
                self.apply_patch(ctx, &ConfigPatch::display_mode(DisplayMode::Window))
            }
            (ConfigAction::BackToTitle, ..) => {
                config.hide(stage, ctx.host);
                UiEvent::BackToTitle
            }
            _ => UiEvent::Consumed,
        }
    }

    fn open_config(&self, stage: &Stage) -> Option<&ConfigPanel> {
        self.config.as_ref().filter(|c| c.is_visible(stage))
    }

    fn hotspot_at(&self, stage: &Stage, p: Vec2) -> Option<A> {
        self.hotspots
            .iter()
            .find(|h| h.enabled && stage.hits(h.quad, p))
            .map(|h| h.action)
    }
}

fn click_gallery<A, K: Copy + fmt::Debug>(
    gallery: &mut GalleryPanel,
    ctx: &mut SceneContext<'_, K>,
    stage: &mut Stage,
    p: Vec2,
) -> UiEvent<A> {
    let Some(action) = gallery.action_at(stage, p) else {
        if !gallery.contains(stage, p) {
            gallery.hide(stage);
            ctx.audio.play_click();
        }
        return UiEvent::Consumed;
    };
    ctx.audio.play_click();
    match action {
        GalleryAction::Tab(tab) => {
            gallery.set_tab(ctx.host, tab);
            UiEvent::Consumed
        }
        GalleryAction::Jump(entry) => {
            gallery.hide(stage);
            UiEvent::GalleryJump(entry)
        }
        GalleryAction::Close => {
            gallery.hide(stage);
            UiEvent::Consumed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{SceneToken, SoundEffect};
    use crate::components::layer::RenderLayer;
    use crate::core::host::HostCommand;
    use crate::systems::audio::{AudioCommand, AudioService};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Act {
        Choice,
        Box,
    }

    struct Harness {
        host: Host,
        audio: AudioService,
        config: ConfigState,
        transition: Option<u8>,
        fullscreen: bool,
        stage: Stage,
    }

    impl Harness {
        fn new() -> (Self, InteractiveLayer<Act>) {
            let mut h = Self {
                host: Host::new(),
                audio: AudioService::new(),
                config: ConfigState::default(),
                transition: None,
                fullscreen: false,
                stage: Stage::new(),
            };
            let init = SceneInit {
                token: SceneToken(1),
                config: h.config,
                screen: ScreenLayout::base(),
                fullscreen: false,
            };
            let mut layer = InteractiveLayer::new(&mut h.stage, &mut h.host, &init)
                .with_gallery(&mut h.stage, &mut h.host, &init);
            let choice = h.stage.spawn_with(|q| {
                q.with_pos(Vec2::new(-300.0, -200.0))
                    .with_size(Vec2::new(100.0, 50.0))
                    .with_layer(RenderLayer::Choices)
            });
            let dialogue = h.stage.spawn_with(|q| {
                q.with_pos(Vec2::new(-300.0, -200.0))
                    .with_size(Vec2::new(400.0, 100.0))
                    .with_layer(RenderLayer::Dialogue)
            });
            layer.add_hotspot(choice, Act::Choice);
            layer.add_hotspot(dialogue, Act::Box);
            h.audio.drain();
            (h, layer)
        }

        fn send(&mut self, layer: &mut InteractiveLayer<Act>, event: InputEvent) -> UiEvent<Act> {
            let mut ctx = SceneContext::new(
                &mut self.host,
                &mut self.audio,
                &mut self.config,
                &mut self.transition,
                ScreenLayout::base(),
                self.fullscreen,
            );
            layer.handle(&mut ctx, &mut self.stage, &event)
        }

        fn effects(&mut self) -> Vec<SoundEffect> {
            self.audio
                .drain()
                .into_iter()
                .filter_map(|c| match c {
                    AudioCommand::PlayEffect { effect, .. } => Some(effect),
                    _ => None,
                })
                .collect()
        }
    }

    fn ndc(px: f32, py: f32) -> (f32, f32) {
        (px / 512.0, py / 288.0)
    }

    fn click(px: f32, py: f32) -> InputEvent {
        let (x, y) = ndc(px, py);
        InputEvent::Click { x, y, button: PointerButton::Primary }
    }

    fn down(px: f32, py: f32) -> InputEvent {
        let (x, y) = ndc(px, py);
        InputEvent::PointerDown { x, y, button: PointerButton::Primary }
    }

    fn moved(px: f32, py: f32) -> InputEvent {
        let (x, y) = ndc(px, py);
        InputEvent::PointerMove { x, y }
    }

    /// Canvas pixel for a config-panel base coordinate.
    fn panel(bx: f32, by: f32) -> (f32, f32) {
        (bx - 240.0, 140.0 - by)
    }

    const GEAR: (f32, f32) = (480.0, 256.0);

    #[test]
    fn gear_toggles_config_and_swallows_click() {
        let (mut h, mut layer) = Harness::new();
        assert_eq!(h.send(&mut layer, click(GEAR.0, GEAR.1)), UiEvent::Consumed);
        assert!(layer.is_config_open(&h.stage));
        assert_eq!(h.effects(), vec![SoundEffect::Click]);
        h.send(&mut layer, click(GEAR.0, GEAR.1));
        assert!(!layer.is_config_open(&h.stage));
    }

    #[test]
    fn foreground_beats_gear_and_first_hotspot_wins() {
        let (mut h, mut layer) = Harness::new();
        assert_eq!(h.send(&mut layer, click(-300.0, -200.0)), UiEvent::Activate(Act::Choice));
        assert_eq!(h.send(&mut layer, click(-450.0, -200.0)), UiEvent::Activate(Act::Box));
        layer.set_hotspot_enabled(Act::Choice, false);
        assert_eq!(h.send(&mut layer, click(-300.0, -200.0)), UiEvent::Activate(Act::Box));
        assert_eq!(h.send(&mut layer, click(300.0, 0.0)), UiEvent::Backdrop);
    }

    #[test]
    fn open_panel_blocks_hotspots() {
        let (mut h, mut layer) = Harness::new();
        h.send(&mut layer, click(GEAR.0, GEAR.1));
        h.effects();
        // Outside the panel: closes it instead of activating the choice underneath.
        assert_eq!(h.send(&mut layer, click(-300.0, -200.0)), UiEvent::Consumed);
        assert!(!layer.is_config_open(&h.stage));
        assert_eq!(h.effects(), vec![SoundEffect::Click]);
    }

    #[test]
    fn slider_drag_updates_config_and_guards_following_click() {
        let (mut h, mut layer) = Harness::new();
        h.send(&mut layer, click(GEAR.0, GEAR.1));

        let (x, y) = panel(168.0 + 120.0, 122.0);
        let event = h.send(&mut layer, down(x, y));
        assert!(matches!(event, UiEvent::ConfigChanged(s) if s.bgm_volume == 50));
        assert!(layer.is_dragging());
        assert_eq!(h.host.cursor(), Cursor::Grabbing);

        // Off the track but still on the panel: value clamps.
        let (x, y) = panel(470.0, 200.0);
        let event = h.send(&mut layer, moved(x, y));
        assert!(matches!(event, UiEvent::ConfigChanged(s) if s.bgm_volume == 100));
        assert_eq!(h.config.bgm_volume, 100);
        assert!((h.audio.bgm_gain() - 1.0).abs() < 1e-6);

        assert_eq!(h.send(&mut layer, InputEvent::PointerUp { x: 0.0, y: 0.0 }), UiEvent::Consumed);
        assert!(!layer.is_dragging());
        // The click the browser fires after the release is swallowed, the next one is not.
        assert_eq!(h.send(&mut layer, click(GEAR.0, GEAR.1)), UiEvent::Consumed);
        assert!(layer.is_config_open(&h.stage));
        h.send(&mut layer, click(GEAR.0, GEAR.1));
        assert!(!layer.is_config_open(&h.stage));
    }

    #[test]
    fn se_slider_release_previews_volume() {
        let (mut h, mut layer) = Harness::new();
        h.send(&mut layer, click(GEAR.0, GEAR.1));
        let (x, y) = panel(200.0, 166.0);
        h.send(&mut layer, down(x, y));
        h.effects();
        h.send(&mut layer, InputEvent::PointerUp { x: 0.0, y: 0.0 });
        assert_eq!(h.effects(), vec![SoundEffect::Hover]);
    }

    #[test]
    fn hover_sound_fires_on_enter_edge_only() {
        let (mut h, mut layer) = Harness::new();
        assert_eq!(h.send(&mut layer, moved(-300.0, -200.0)), UiEvent::Hover(Some(Act::Choice)));
        assert_eq!(h.send(&mut layer, moved(-290.0, -195.0)), UiEvent::Idle);
        assert_eq!(h.effects(), vec![SoundEffect::Hover]);
        assert_eq!(h.host.cursor(), Cursor::Pointer);
        assert_eq!(h.send(&mut layer, moved(300.0, 0.0)), UiEvent::Hover(None));
        assert!(h.effects().is_empty());
        assert_eq!(h.host.cursor(), Cursor::Default);
    }

    #[test]
    fn panel_button_hover_repaints_and_plays() {
        let (mut h, mut layer) = Harness::new();
        h.send(&mut layer, click(GEAR.0, GEAR.1));
        h.effects();
        let (x, y) = panel(350.0, 70.0);
        h.send(&mut layer, moved(x, y));
        h.send(&mut layer, moved(x + 2.0, y));
        assert_eq!(layer.config_panel().unwrap().hovered(), Some(ConfigAction::Window));
        assert_eq!(h.effects(), vec![SoundEffect::Hover]);
    }

    #[test]
    fn display_mode_buttons_drive_fullscreen_api() {
        let (mut h, mut layer) = Harness::new();
        h.send(&mut layer, click(GEAR.0, GEAR.1));
        h.host.drain();
        let (x, y) = panel(200.0, 70.0);
        let event = h.send(&mut layer, click(x, y));
        assert!(matches!(event, UiEvent::ConfigChanged(s) if s.display_mode == DisplayMode::Fullscreen));
        assert!(h.host.commands().contains(&HostCommand::RequestFullscreen));
        assert_eq!(h.config.display_mode, DisplayMode::Fullscreen);

        // The page refused: the fullscreenchange that follows carries the truth.
        let event = h.send(&mut layer, InputEvent::FullscreenChanged { active: false });
        assert!(matches!(event, UiEvent::ConfigChanged(s) if s.display_mode == DisplayMode::Window));
        assert_eq!(layer.config_state().unwrap().display_mode, DisplayMode::Window);

        h.fullscreen = true;
        h.host.drain();
        let (x, y) = panel(350.0, 70.0);
        h.send(&mut layer, click(x, y));
        assert!(h.host.drain().contains(&HostCommand::ExitFullscreen));
        assert_eq!(h.config.display_mode, DisplayMode::Window);
    }

    #[test]
    fn gear_hover_plays_once_per_enter() {
        let (mut h, mut layer) = Harness::new();
        h.send(&mut layer, moved(GEAR.0, GEAR.1));
        h.send(&mut layer, moved(GEAR.0 + 1.0, GEAR.1));
        h.send(&mut layer, moved(0.0, 0.0));
        h.send(&mut layer, moved(GEAR.0, GEAR.1));
        assert_eq!(h.effects(), vec![SoundEffect::Hover, SoundEffect::Hover]);
    }

    #[test]
    fn opening_panel_syncs_display_mode() {
        let (mut h, mut layer) = Harness::new();
        h.fullscreen = true;
        h.send(&mut layer, click(GEAR.0, GEAR.1));
        assert_eq!(layer.config_state().unwrap().display_mode, DisplayMode::Fullscreen);
    }

    #[test]
    fn escape_exits_fullscreen_only_when_active() {
        let (mut h, mut layer) = Harness::new();
        h.host.drain();
        assert_eq!(h.send(&mut layer, InputEvent::KeyDown { key: Key::Escape }), UiEvent::Idle);
        h.fullscreen = true;
        assert_eq!(h.send(&mut layer, InputEvent::KeyDown { key: Key::Escape }), UiEvent::Consumed);
        assert_eq!(h.host.drain(), vec![HostCommand::ExitFullscreen]);
    }

    #[test]
    fn back_to_title_closes_panel() {
        let (mut h, mut layer) = Harness::new();
        h.send(&mut layer, click(GEAR.0, GEAR.1));
        let (x, y) = panel(400.0, 250.0);
        assert_eq!(h.send(&mut layer, click(x, y)), UiEvent::BackToTitle);
        assert!(!layer.is_config_open(&h.stage));
    }

    #[test]
    fn gallery_jump_reports_entry() {
        let (mut h, mut layer) = Harness::new();
        layer.open_gallery(&mut h.stage, &mut h.host);
        // Row 3 (END2) centre in gallery base coordinates is (496, 224).
        let event = h.send(&mut layer, click(496.0 - 280.0, 190.0 - 224.0));
        assert_eq!(event, UiEvent::GalleryJump(GalleryEntry::End2));
        assert!(!layer.is_gallery_open(&h.stage));
    }

    #[test]
    fn bare_layer_has_no_panel_but_tracks_display_mode() {
        let (mut h, _) = Harness::new();
        let before = h.host.texture_count();
        let mut layer = InteractiveLayer::<Act>::bare();
        assert_eq!(h.host.texture_count(), before);
        assert!(layer.config_state().is_none());
        assert_eq!(h.send(&mut layer, click(GEAR.0, GEAR.1)), UiEvent::Backdrop);
        assert!(!layer.is_config_open(&h.stage));
        let event = h.send(&mut layer, InputEvent::FullscreenChanged { active: true });
        assert!(matches!(event, UiEvent::ConfigChanged(s) if s.display_mode == DisplayMode::Fullscreen));
        assert_eq!(h.config.display_mode, DisplayMode::Fullscreen);
    }

    #[test]
    fn release_is_idempotent_and_silences_layer() {
        let (mut h, mut layer) = Harness::new();
        layer.release(&mut h.stage, &mut h.host);
        layer.release(&mut h.stage, &mut h.host);
        assert_eq!(h.host.owned_by(SceneToken(1)), 0);
        assert_eq!(h.send(&mut layer, click(GEAR.0, GEAR.1)), UiEvent::Idle);
        // Hotspot quads are the scene's and stay on stage.
        assert_eq!(h.stage.len(), 2);
    }
}
