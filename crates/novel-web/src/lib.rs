pub mod runner;

pub use novel_engine;
pub use runner::NovelRunner;

/// Generate all `#[wasm_bindgen]` exports for a visual novel.
///
/// This macro generates:
/// - `thread_local!` storage for the NovelRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (novel_init, novel_tick, input handlers, host callbacks, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod factory;
/// use factory::MyNovel;
///
/// novel_web::export_novel!(MyNovel, "my-novel");
/// ```
///
/// # Arguments
///
/// - `$factory_type`: The factory type that implements `novel_engine::SceneFactory` and has `new()`
/// - `$novel_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_novel {
    ($factory_type:ty, $novel_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::NovelRunner<$factory_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::NovelRunner<$factory_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Novel not initialized. Call novel_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn novel_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let factory = <$factory_type>::new();
            let runner = $crate::NovelRunner::new(factory);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $novel_name);
        }

        #[wasm_bindgen]
        pub fn novel_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        // ---- Input ----

        #[wasm_bindgen]
        pub fn novel_set_canvas_rect(left: f32, top: f32, width: f32, height: f32) {
            with_runner(|r| r.set_canvas_rect(left, top, width, height));
        }

        #[wasm_bindgen]
        pub fn novel_pointer_down(client_x: f32, client_y: f32, button: u16) {
            with_runner(|r| r.pointer_down(client_x, client_y, button));
        }

        #[wasm_bindgen]
        pub fn novel_pointer_move(client_x: f32, client_y: f32) {
            with_runner(|r| r.pointer_move(client_x, client_y));
        }

        #[wasm_bindgen]
        pub fn novel_pointer_up(client_x: f32, client_y: f32) {
            with_runner(|r| r.pointer_up(client_x, client_y));
        }

        #[wasm_bindgen]
        pub fn novel_pointer_leave() {
            with_runner(|r| r.pointer_leave());
        }

        #[wasm_bindgen]
        pub fn novel_click(client_x: f32, client_y: f32, button: u16) {
            with_runner(|r| r.click(client_x, client_y, button));
        }

        #[wasm_bindgen]
        pub fn novel_key_down(key: &str) {
            with_runner(|r| r.key_down(key));
        }

        #[wasm_bindgen]
        pub fn novel_resize(width: f32, height: f32) {
            with_runner(|r| r.resize(width, height));
        }

        #[wasm_bindgen]
        pub fn novel_fullscreen_changed(active: bool) {
            with_runner(|r| r.fullscreen_changed(active));
        }

        // ---- Host callbacks ----

        #[wasm_bindgen]
        pub fn novel_asset_loaded(texture: u32, width: f32, height: f32) {
            with_runner(|r| r.asset_loaded(texture, width, height));
        }

        #[wasm_bindgen]
        pub fn novel_asset_failed(texture: u32, reason: String) {
            with_runner(|r| r.asset_failed(texture, reason));
        }

        #[wasm_bindgen]
        pub fn novel_audio_blocked() {
            with_runner(|r| r.audio_blocked());
        }

        #[wasm_bindgen]
        pub fn novel_change_scene(name: &str) -> bool {
            with_runner(|r| r.change_scene(name))
        }

        #[wasm_bindgen]
        pub fn novel_update_config(json: &str) -> bool {
            with_runner(|r| r.update_config_json(json))
        }

        // ---- Outboxes ----

        #[wasm_bindgen]
        pub fn novel_drain_commands() -> String {
            with_runner(|r| r.drain_commands_json())
        }

        #[wasm_bindgen]
        pub fn novel_drain_audio() -> String {
            with_runner(|r| r.drain_audio_json())
        }

        #[wasm_bindgen]
        pub fn novel_config() -> String {
            with_runner(|r| r.config_json())
        }

        #[wasm_bindgen]
        pub fn novel_current_scene() -> String {
            with_runner(|r| r.current_scene())
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_projection_ptr() -> *const f32 {
            with_runner(|r| r.projection_ptr())
        }

        #[wasm_bindgen]
        pub fn get_canvas_width() -> f32 {
            with_runner(|r| r.canvas_width())
        }

        #[wasm_bindgen]
        pub fn get_canvas_height() -> f32 {
            with_runner(|r| r.canvas_height())
        }
    };
}
