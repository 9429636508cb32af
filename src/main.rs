//! Sunsplash entry point
//!
//! In the browser this wires the canvas, pointer strokes and DOM overlay to
//! the session controller. Natively it plays one headless demo session and
//! prints a JSON summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use sunsplash::assets::LoadProgress;
    use sunsplash::audio::AudioManager;
    use sunsplash::renderer::RenderState;
    use sunsplash::sim::{Arena, GameState};
    use sunsplash::{Game, Settings, Tuning};

    /// Everything the browser callbacks share
    struct Host {
        game: Game<AudioManager>,
        renderer: Option<RenderState>,
        loop_running: bool,
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_class(document: &Document, id: &str, class: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", class);
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialised".into());
        }

        log::info!("Sunsplash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Backing store at device resolution; the simulation works in CSS pixels
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let audio = AudioManager::new(&settings);

        // Two things gate the start button: the renderer and the audio context
        let mut assets = LoadProgress::new(2);
        if audio.is_available() {
            assets.mark_loaded("audio");
        } else {
            assets.mark_failed("audio");
        }

        let seed = js_sys::Date::now() as u64;
        let arena = Arena::new(client_w as f32, client_h as f32);
        let state = GameState::new(seed, arena, Tuning::default());
        let host = Rc::new(RefCell::new(Host {
            game: Game::new(state, assets, settings, audio),
            renderer: None,
            loop_running: false,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, host.clone());
        setup_keyboard(host.clone());
        setup_start_buttons(host.clone());
        update_loading_ui(&host.borrow());

        match init_renderer(canvas, width, height).await {
            Ok(renderer) => {
                let mut h = host.borrow_mut();
                h.renderer = Some(renderer);
                h.game.assets_mut().mark_loaded("renderer");
            }
            Err(e) => {
                log::warn!("Renderer unavailable, continuing without drawing: {}", e);
                host.borrow_mut().game.assets_mut().mark_failed("renderer");
            }
        }
        update_loading_ui(&host.borrow());

        log::info!("Sunsplash ready!");
        Ok(())
    }

    async fn init_renderer(
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, String> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| e.to_string())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| e.to_string())?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| e.to_string())
    }

    fn update_loading_ui(host: &Host) {
        let Some(document) = document() else { return };
        let assets = host.game.assets();

        set_text(
            &document,
            "#loading .progress",
            &format!("{:.0}%", assets.fraction() * 100.0),
        );
        if assets.is_complete() {
            set_class(&document, "loading", "hidden");
            set_class(&document, "start-screen", "");
        }
    }

    fn update_hud(game: &Game<AudioManager>) {
        let Some(document) = document() else { return };
        let state = &game.state;

        set_text(&document, "#hud-score .hud-value", &state.score.to_string());
        set_text(
            &document,
            "#hud-time .hud-value",
            &format!("{:.0}", state.time_left.ceil()),
        );
        set_text(
            &document,
            "#hud-sun .hud-value",
            &format!("{:.0}%", state.sunlight),
        );

        let super_class = if state.super_ready {
            "hud-item ready"
        } else {
            "hud-item hidden"
        };
        set_class(&document, "hud-super", super_class);
    }

    fn show_end_screen(game: &Game<AudioManager>) {
        let Some(document) = document() else { return };

        set_text(&document, "#final-score", &game.state.score.to_string());
        set_text(
            &document,
            "#final-plants",
            &format!("{}/{}", game.state.alive_plants(), game.state.plants.len()),
        );
        set_class(&document, "hud", "hidden");
        set_class(&document, "end-screen", "");
    }

    fn pointer_pos(event: &PointerEvent) -> Vec2 {
        Vec2::new(event.offset_x() as f32, event.offset_y() as f32)
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, host: Rc<RefCell<Host>>) {
        // Swipes belong to the game, not to browser panning or zooming
        if canvas.style().set_property("touch-action", "none").is_err() {
            log::warn!("Could not disable touch panning on the canvas");
        }

        // Stroke begins
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                host.borrow_mut().game.pointer_down(pointer_pos(&event));
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Track the stroke so a cancelled one still has an end point
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                host.borrow_mut().game.pointer_move(pointer_pos(&event));
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Stroke ends: classify it
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                host.borrow_mut().game.pointer_up(pointer_pos(&event));
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Browser took the stroke over anyway: use what was drawn
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                host.borrow_mut().game.pointer_cancel();
            });
            let _ = canvas.add_event_listener_with_callback(
                "pointercancel",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }
    }

    fn setup_keyboard(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else { return };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut h = host.borrow_mut();
            match event.key().as_str() {
                // Attract / demo mode
                "d" | "D" => {
                    let on = !h.game.demo_mode();
                    h.game.set_demo_mode(on);
                }
                "m" | "M" => {
                    let Host { game, .. } = &mut *h;
                    game.settings.muted = !game.settings.muted;
                    game.settings.save();
                    let settings = game.settings.clone();
                    game.feedback_mut().apply_settings(&settings);
                    log::info!("Muted: {}", settings.muted);
                }
                "Escape" => h.game.stop(),
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_start_buttons(host: Rc<RefCell<Host>>) {
        let Some(document) = document() else { return };

        for id in ["start-btn", "restart-btn"] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                start_session(&host);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn start_session(host: &Rc<RefCell<Host>>) {
        let needs_loop = {
            let mut h = host.borrow_mut();
            // Browsers only let audio start from a user gesture
            h.game.feedback_mut().resume();

            if let Err(e) = h.game.start() {
                log::warn!("Cannot start yet: {}", e);
                return;
            }

            if let Some(document) = document() {
                set_class(&document, "start-screen", "hidden");
                set_class(&document, "end-screen", "hidden");
                set_class(&document, "hud", "");
            }
            update_hud(&h.game);

            let needs_loop = !h.loop_running;
            h.loop_running = true;
            needs_loop
        };

        if needs_loop {
            request_animation_frame(host.clone());
        }
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(host, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(host: Rc<RefCell<Host>>, time: f64) {
        let keep_going = {
            let mut h = host.borrow_mut();
            let Host { game, renderer, .. } = &mut *h;
            let keep_going = game.frame(time, renderer);
            update_hud(game);
            if !keep_going {
                show_end_screen(game);
                h.loop_running = false;
            }
            keep_going
        };

        if keep_going {
            request_animation_frame(host);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use serde::Serialize;

    use sunsplash::assets::LoadProgress;
    use sunsplash::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH, FRAME_MS};
    use sunsplash::renderer::RenderState;
    use sunsplash::sim::{Arena, GameEvent, GameState};
    use sunsplash::{FeedbackSink, Game, GameError, Settings, Tuning};

    /// Cues go to the log instead of a speaker
    struct LogFeedback {
        cues: usize,
    }

    impl FeedbackSink for LogFeedback {
        fn cue(&mut self, event: &GameEvent) {
            self.cues += 1;
            log::debug!("cue: {:?}", event);
        }
    }

    #[derive(Debug, Serialize)]
    struct Summary {
        seed: u64,
        frames: u32,
        score: u64,
        plants_alive: usize,
        plants_total: usize,
        sunlight: f32,
        cues: usize,
    }

    /// `sunsplash [tuning.json] [seed]`
    pub fn run() -> Result<(), GameError> {
        let mut args = std::env::args().skip(1);

        let tuning = match args.next() {
            Some(path) => {
                log::info!("Loading tuning from {}", path);
                Tuning::from_json(&std::fs::read_to_string(path)?)?
            }
            None => Tuning::default(),
        };
        let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);

        let arena = Arena::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        let state = GameState::new(seed, arena, tuning);
        let mut game = Game::new(
            state,
            LoadProgress::new(0),
            Settings::default(),
            LogFeedback { cues: 0 },
        );
        game.set_demo_mode(true);
        game.start()?;

        // Nothing to draw on without a window
        let mut surface: Option<RenderState> = None;
        let mut now = 0.0_f64;
        let mut frames = 0;
        while game.frame(now, &mut surface) {
            now += FRAME_MS as f64;
            frames += 1;
        }

        let summary = Summary {
            seed: game.state.seed,
            frames,
            score: game.state.score,
            plants_alive: game.state.alive_plants(),
            plants_total: game.state.plants.len(),
            sunlight: game.state.sunlight,
            cues: game.feedback_mut().cues,
        };
        log::info!("Session over: score {}", summary.score);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sunsplash (native) starting a headless demo session...");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
