//! Void Drift entry point
//!
//! Wires the browser to the engine: canvas 2D render sink, DOM HUD sink,
//! Web Audio, LocalStorage, and input events. The native build is a stub;
//! run the game with `trunk serve`.

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use void_drift::audio::music::{MusicDirector, MusicMode};
    use void_drift::audio::web::{WebIntervalTimer, WebSynth};
    use void_drift::audio::{AudioManager, AudioSink, SoundCue};
    use void_drift::consts::*;
    use void_drift::engine::{Collaborators, Engine};
    use void_drift::input::InputSnapshot;
    use void_drift::persistence::LocalScoreStore;
    use void_drift::render::{HudFrame, HudSink, RenderSink, Snapshot};
    use void_drift::settings::Settings;

    /// Cue playback and music direction on the Web Audio backend
    struct WebAudio {
        manager: AudioManager<WebSynth>,
        director: MusicDirector<WebIntervalTimer>,
        synth: WebSynth,
        music_gain: f32,
    }

    impl WebAudio {
        fn new(settings: &Settings) -> Self {
            let synth = WebSynth::new();
            let mut manager = AudioManager::new(synth.clone());
            manager.apply_settings(settings);
            Self {
                manager,
                director: MusicDirector::new(WebIntervalTimer::new()),
                synth,
                music_gain: settings.music_gain(),
            }
        }
    }

    impl AudioSink for WebAudio {
        fn cue(&mut self, cue: SoundCue) {
            self.manager.play(cue);
        }

        fn music(&mut self, mode: MusicMode) {
            self.director.play(mode, &self.synth, self.music_gain);
        }
    }

    /// Canvas 2D render sink
    struct CanvasRenderer {
        ctx: CanvasRenderingContext2d,
    }

    impl CanvasRenderer {
        fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
            let window = web_sys::window()?;
            let dpr = window.device_pixel_ratio();
            let size = ARENA_SIZE as f64;
            canvas.set_width((size * dpr) as u32);
            canvas.set_height((size * dpr) as u32);
            let style = canvas.style();
            let _ = style.set_property("width", &format!("{size}px"));
            let _ = style.set_property("height", &format!("{size}px"));

            let ctx: CanvasRenderingContext2d =
                canvas.get_context("2d").ok()??.dyn_into().ok()?;
            ctx.scale(dpr, dpr).ok()?;
            Some(Self { ctx })
        }

        fn circle(&self, pos: Vec2, radius: f32) {
            self.ctx.begin_path();
            let _ = self
                .ctx
                .arc(pos.x as f64, pos.y as f64, radius as f64, 0.0, TAU);
        }
    }

    impl RenderSink for CanvasRenderer {
        fn draw(&mut self, snapshot: &Snapshot) {
            let ctx = &self.ctx;
            let size = snapshot.arena_size as f64;

            ctx.clear_rect(0.0, 0.0, size, size);
            ctx.set_fill_style_str("rgba(12, 14, 24, 0.95)");
            ctx.fill_rect(0.0, 0.0, size, size);

            ctx.set_stroke_style_str("rgba(94, 247, 255, 0.4)");
            ctx.set_line_width(2.0);
            ctx.stroke_rect(8.0, 8.0, size - 16.0, size - 16.0);

            for pickup in snapshot.pickups {
                ctx.set_fill_style_str(match pickup.kind {
                    void_drift::sim::PickupKind::Shield => "#7dffcb",
                    void_drift::sim::PickupKind::Boost => "rgba(255, 199, 87, 0.9)",
                });
                self.circle(pickup.pos, pickup.radius + 2.0);
                ctx.fill();
            }

            ctx.set_fill_style_str("rgba(255, 90, 122, 0.9)");
            for hazard in snapshot.hazards {
                self.circle(hazard.pos, hazard.radius);
                ctx.fill();
            }

            ctx.set_line_width(3.0);
            for pulse in snapshot.pulses {
                ctx.set_stroke_style_str(&format!("rgba(125, 255, 203, {})", pulse.life));
                self.circle(pulse.pos, pulse.radius);
                ctx.stroke();
            }

            if snapshot.shield_active {
                ctx.set_stroke_style_str("rgba(125, 255, 203, 0.6)");
                ctx.set_line_width(4.0);
                self.circle(snapshot.player.pos, 20.0);
                ctx.stroke();
            }

            ctx.set_fill_style_str("rgba(94, 247, 255, 0.95)");
            self.circle(snapshot.player.pos, snapshot.player.radius);
            ctx.fill();

            if snapshot.flash > 0.0 {
                ctx.set_fill_style_str(&format!("rgba(255, 90, 122, {})", snapshot.flash));
                ctx.fill_rect(0.0, 0.0, size, size);
            }
        }
    }

    /// Writes the stats panel elements
    struct DomHud;

    impl DomHud {
        fn set(&self, id: &str, value: &str) {
            if let Some(el) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(id))
            {
                el.set_text_content(Some(value));
            }
        }
    }

    impl HudSink for DomHud {
        fn update(&mut self, hud: &HudFrame) {
            self.set("hud-score", &hud.score.to_string());
            self.set("hud-time", &format!("{}s", hud.time));
            self.set("hud-best", &hud.best.to_string());
            self.set("hud-danger", &format!("{:.1}x", hud.danger));
            self.set("hud-status", hud.status);
        }
    }

    /// Input accumulated from DOM events between frames
    #[derive(Default)]
    struct InputState {
        up: bool,
        down: bool,
        left: bool,
        right: bool,
        /// Pointer target updated since the last frame
        pending_pointer: Option<Vec2>,
    }

    impl InputState {
        fn snapshot(&mut self) -> InputSnapshot {
            InputSnapshot {
                up: self.up,
                down: self.down,
                left: self.left,
                right: self.right,
                pointer: self.pending_pointer.take(),
            }
        }

        fn set_key(&mut self, key: &str, pressed: bool) {
            match key {
                "w" | "arrowup" => self.up = pressed,
                "s" | "arrowdown" => self.down = pressed,
                "a" | "arrowleft" => self.left = pressed,
                "d" | "arrowright" => self.right = pressed,
                _ => {}
            }
        }
    }

    /// Browser application holding the engine and its collaborators
    struct App {
        engine: Engine,
        renderer: CanvasRenderer,
        hud: DomHud,
        audio: WebAudio,
        store: LocalScoreStore,
        input: InputState,
        raf: Option<i32>,
    }

    macro_rules! collaborators {
        ($app:expr) => {
            &mut Collaborators {
                render: &mut $app.renderer,
                hud: &mut $app.hud,
                audio: &mut $app.audio,
                store: &mut $app.store,
            }
        };
    }

    impl App {
        fn start(&mut self) {
            self.engine.start(collaborators!(self));
        }

        fn reset(&mut self) {
            self.engine.reset(collaborators!(self));
        }

        fn unlock_audio(&mut self) {
            self.engine.unlock_audio(collaborators!(self));
        }

        fn frame(&mut self, time: f64) {
            let input = self.input.snapshot();
            self.engine.frame(time, &input, collaborators!(self));
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Void Drift starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let Some(renderer) = CanvasRenderer::new(&canvas) else {
            log::error!("Failed to acquire a 2D canvas context");
            return;
        };

        let settings = Settings::load();
        let store = LocalScoreStore;
        let seed = js_sys::Date::now() as u64;
        let engine = Engine::new(seed, &store);

        let app = Rc::new(RefCell::new(App {
            engine,
            renderer,
            hud: DomHud,
            audio: WebAudio::new(&settings),
            store,
            input: InputState::default(),
            raf: None,
        }));

        // Zeroed HUD (with the stored best) before the first run
        app.borrow_mut().reset();

        setup_input_handlers(&canvas, app.clone());
        setup_buttons(app);

        log::info!("Void Drift ready");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        // Keyboard: WASD and arrows
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut()
                    .input
                    .set_key(&event.key().to_lowercase(), true);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut()
                    .input
                    .set_key(&event.key().to_lowercase(), false);
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer: absolute target in arena coordinates. The first gesture
        // also unlocks audio.
        for event_name in ["pointermove", "pointerdown"] {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let x = (event.client_x() as f64 - rect.left()) / rect.width()
                    * ARENA_SIZE as f64;
                let y = (event.client_y() as f64 - rect.top()) / rect.height()
                    * ARENA_SIZE as f64;
                let mut a = app.borrow_mut();
                a.unlock_audio();
                a.input.pending_pointer = Some(Vec2::new(x as f32, y as f32));
            });
            let _ = canvas
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let needs_frame = {
                    let mut a = app.borrow_mut();
                    a.start();
                    // A callback may still be pending from the previous run;
                    // it picks the new run up by itself
                    a.raf.is_none()
                };
                if needs_frame {
                    request_frame(app.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                // Cancel the pending frame before clearing the run
                if let Some(handle) = a.raf.take() {
                    if let Some(window) = web_sys::window() {
                        let _ = window.cancel_animation_frame(handle);
                    }
                }
                a.reset();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let app_clone = app.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(app_clone, time);
        });
        let handle = window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok();
        app.borrow_mut().raf = handle;
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            if !a.engine.running() {
                a.raf = None;
                return;
            }
            a.frame(time);
        }
        request_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Void Drift (native) starting...");
    log::info!("The game targets the browser - run with `trunk serve`");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
