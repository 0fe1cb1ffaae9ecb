use novel_engine::{
    AssetOutcome, CanvasRect, FrameClock, InputEvent, InputQueue, Key,
    OrthoCamera, PointerButton, RenderBuffer, SceneFactory, SceneManager, ScreenLayout, TextureId,
};
use glam::Vec2;
use novel_engine::renderer::camera::CameraUniform;
use serde::Serialize;

/// Generic runner that wires the scene manager to the page.
///
/// Each concrete game creates a `thread_local!` NovelRunner and exports free
/// functions via `#[wasm_bindgen]` (see [`export_novel!`](crate::export_novel)),
/// because wasm-bindgen cannot export generic structs directly.
pub struct NovelRunner<F: SceneFactory> {
    manager: SceneManager<F>,
    input: InputQueue,
    render_buffer: RenderBuffer,
    clock: FrameClock,
    canvas: CanvasRect,
    camera: OrthoCamera,
    uniform: CameraUniform,
    initialized: bool,
}

impl<F: SceneFactory> NovelRunner<F> {
    pub fn new(factory: F) -> Self {
        let config = factory.config();
        let camera = OrthoCamera::new(config.base_width, config.base_height);
        Self {
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            clock: FrameClock::new(config.max_frame_dt),
            manager: SceneManager::new(factory),
            input: InputQueue::new(),
            canvas: CanvasRect::default(),
            uniform: camera.uniform(),
            camera,
            initialized: false,
        }
    }

    /// Build the initial scene. Call once after construction.
    pub fn init(&mut self) {
        self.manager.boot();
        self.initialized = true;
        self.sync_camera();
    }

    /// Push an input event into the queue; it is dispatched on the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Canvas bounding rect, needed to map client coordinates. Resizes keep an
    /// estimate current; the page corrects it with the measured rect.
    pub fn set_canvas_rect(&mut self, left: f32, top: f32, width: f32, height: f32) {
        self.canvas = CanvasRect::new(left, top, width, height);
    }

    pub fn pointer_down(&mut self, client_x: f32, client_y: f32, button: u16) {
        let p = self.canvas.to_ndc(client_x, client_y);
        self.push_input(InputEvent::PointerDown { x: p.x, y: p.y, button: PointerButton::from_dom(button) });
    }

    pub fn pointer_move(&mut self, client_x: f32, client_y: f32) {
        let p = self.canvas.to_ndc(client_x, client_y);
        self.push_input(InputEvent::PointerMove { x: p.x, y: p.y });
    }

    pub fn pointer_up(&mut self, client_x: f32, client_y: f32) {
        let p = self.canvas.to_ndc(client_x, client_y);
        self.push_input(InputEvent::PointerUp { x: p.x, y: p.y });
    }

    pub fn pointer_leave(&mut self) {
        self.push_input(InputEvent::PointerLeave);
    }

    pub fn click(&mut self, client_x: f32, client_y: f32, button: u16) {
        let p = self.canvas.to_ndc(client_x, client_y);
        self.push_input(InputEvent::Click { x: p.x, y: p.y, button: PointerButton::from_dom(button) });
    }

    pub fn key_down(&mut self, key: &str) {
        self.push_input(InputEvent::KeyDown { key: Key::from_dom(key) });
    }

    /// Container size changed (CSS pixels).
    pub fn resize(&mut self, width: f32, height: f32) {
        let canvas = ScreenLayout::from_container(width, height).size();
        self.canvas = self.canvas.follow_resize(Vec2::new(width, height), canvas);
        self.push_input(InputEvent::Resize { width, height });
    }

    pub fn fullscreen_changed(&mut self, active: bool) {
        self.push_input(InputEvent::FullscreenChanged { active });
    }

    /// Run one frame: dispatch queued input, update the live scene, rebuild the instance buffer.
    pub fn tick(&mut self, frame_dt: f32) {
        if !self.initialized {
            return;
        }
        let dt = self.clock.advance(frame_dt);

        for event in self.input.drain() {
            self.manager.dispatch(&event);
        }

        self.manager.tick(dt);
        self.manager.render(&mut self.render_buffer);
        self.sync_camera();
    }

    pub fn asset_loaded(&mut self, texture: u32, width: f32, height: f32) {
        self.manager.asset_settled(TextureId(texture), AssetOutcome::Loaded { width, height });
    }

    pub fn asset_failed(&mut self, texture: u32, reason: String) {
        self.manager.asset_settled(TextureId(texture), AssetOutcome::Failed { reason });
    }

    pub fn audio_blocked(&mut self) {
        self.manager.audio_blocked();
    }

    /// Returns false for an unknown scene name (the manager has already fallen back).
    pub fn change_scene(&mut self, name: &str) -> bool {
        self.manager.change_scene_by_name(name).is_ok()
    }

    pub fn update_config_json(&mut self, json: &str) -> bool {
        match self.manager.update_config_json(json) {
            Ok(_) => true,
            Err(err) => {
                log::error!("{}", err);
                false
            }
        }
    }

    pub fn config_json(&self) -> String {
        to_json(&self.manager.config_state(), "{}")
    }

    /// Host commands since the last call, as a JSON array.
    pub fn drain_commands_json(&mut self) -> String {
        to_json(&self.manager.drain_host_commands(), "[]")
    }

    /// Audio commands since the last call, as a JSON array.
    pub fn drain_audio_json(&mut self) -> String {
        to_json(&self.manager.drain_audio_commands(), "[]")
    }

    pub fn current_scene(&self) -> String {
        self.manager.current_kind().map(|k| k.to_string()).unwrap_or_default()
    }

    pub fn manager(&self) -> &SceneManager<F> {
        &self.manager
    }

    // ---- Pointer accessors for direct memory reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn max_instances(&self) -> u32 {
        self.render_buffer.capacity() as u32
    }

    pub fn projection_ptr(&self) -> *const f32 {
        self.uniform.projection.as_ptr() as *const f32
    }

    pub fn canvas_width(&self) -> f32 {
        self.camera.width
    }

    pub fn canvas_height(&self) -> f32 {
        self.camera.height
    }

    fn sync_camera(&mut self) {
        let screen = self.manager.screen();
        if screen.width != self.camera.width || screen.height != self.camera.height {
            self.camera.resize(screen.width, screen.height);
            self.uniform = self.camera.uniform();
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        log::error!("failed to serialize for the page: {}", err);
        fallback.to_string()
    })
}
