//! Lily Hop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, MouseEvent, TouchEvent};

    use lily_hop::Tuning;
    use lily_hop::renderer::SceneSnapshot;
    use lily_hop::sim::{GameEvent, GamePhase, GameState, Intent, TickInput, tick};

    // Hand-off to the page's renderer (three.js or similar), if one is installed
    #[wasm_bindgen(inline_js = "
        export function present_frame(header, pads) {
            const renderer = window.lilyHopRenderer;
            if (renderer && typeof renderer.frame === 'function') {
                renderer.frame(JSON.parse(header), pads);
            }
        }
    ")]
    extern "C" {
        fn present_frame(header: &str, pads: &[f32]);
    }

    /// Per-frame message for the renderer
    #[derive(serde::Serialize)]
    struct FrameHeader<'a> {
        events: &'a [GameEvent],
        scene: &'a SceneSnapshot,
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning) -> Self {
            Self {
                state: GameState::with_tuning(seed, tuning),
                input: TickInput::default(),
                last_time: 0.0,
            }
        }

        /// Run one simulation tick and publish the frame
        fn update(&mut self, dt: f32) {
            let input = std::mem::take(&mut self.input);
            tick(&mut self.state, &input, dt);

            let events = self.state.drain_events();
            self.update_hud(&events);

            let scene = SceneSnapshot::capture(&self.state, viewport_aspect());
            let header = FrameHeader {
                events: &events,
                scene: &scene,
            };
            match serde_json::to_string(&header) {
                Ok(json) => present_frame(&json, scene.pad_floats()),
                Err(e) => log::warn!("Frame serialization failed: {}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, events: &[GameEvent]) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            for event in events {
                match event {
                    GameEvent::ScoreChanged(score) => {
                        if let Some(el) = document.get_element_by_id("score-container") {
                            el.set_text_content(Some(&score.to_string()));
                        }
                    }
                    GameEvent::PhaseChanged { to, .. } => match to {
                        GamePhase::Playing => {
                            set_screen(&document, "start-screen", false);
                            set_screen(&document, "game-over-screen", false);
                            set_visible(&document, "score-container", true);
                        }
                        GamePhase::NotStarted => {
                            set_screen(&document, "start-screen", true);
                            set_screen(&document, "game-over-screen", false);
                            set_visible(&document, "score-container", false);
                        }
                        GamePhase::Dead => {}
                    },
                    GameEvent::GameOverReady { score } => {
                        if let Some(el) = document.get_element_by_id("final-score") {
                            el.set_text_content(Some(&format!("Score: {}", score)));
                        }
                        set_screen(&document, "game-over-screen", true);
                        set_visible(&document, "score-container", false);
                    }
                    _ => {}
                }
            }
        }

        /// Start a fresh run
        fn restart(&mut self, seed: u64) {
            self.state.reset(seed, true);
            self.input = TickInput::default();
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn set_screen(document: &Document, id: &str, active: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if active { "screen active" } else { "screen hidden" });
        }
    }

    fn viewport_aspect() -> f32 {
        let Some(window) = web_sys::window() else {
            return 1.0;
        };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
        if h > 0.0 { (w / h) as f32 } else { 1.0 }
    }

    fn viewport_width() -> f32 {
        web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64())
            .unwrap_or(1.0) as f32
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Lily Hop starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, Tuning::load())));
        log::info!("Game initialized with seed: {}", seed);

        set_screen(&document, "start-screen", true);
        set_visible(&document, "score-container", false);

        setup_input_handlers(game.clone())?;
        setup_buttons(&document, game.clone())?;

        request_animation_frame(game);

        log::info!("Lily Hop running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(intent) = Intent::from_key(&event.key()) {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    if g.state.accepts_input() {
                        g.input.intent = Some(intent);
                    }
                }
            });
            document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse: left/middle/right third of the screen
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.accepts_input() {
                    g.input.intent = Some(Intent::from_tap(event.client_x() as f32, viewport_width()));
                }
            });
            document.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                if !g.state.accepts_input() {
                    return;
                }
                if let Some(touch) = event.touches().get(0) {
                    g.input.intent = Some(Intent::from_tap(touch.client_x() as f32, viewport_width()));
                }
            });
            document.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.start = true;
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
                log::info!("Game restarted with seed: {}", seed);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lily_hop::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Lily Hop (native) starting...");
    log::info!("Native mode runs a headless autopilot - serve the web build for the real game");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(42);
    let jumps = 200;

    let mut state = GameState::new(seed);
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
        0.0,
    );

    let frame = 1.0 / 60.0;
    for _ in 0..jumps {
        let input = TickInput {
            intent: state.safe_intent(),
            ..Default::default()
        };
        tick(&mut state, &input, frame);
        while state.actor.is_jumping() {
            tick(&mut state, &TickInput::default(), frame);
        }
        if state.phase != GamePhase::Playing {
            break;
        }
        state.drain_events();
    }

    println!(
        "seed {}: score {}, phase {:?}, {} live pads up to row {}",
        seed,
        state.score,
        state.phase,
        state.world.len(),
        state.world.furthest_row().unwrap_or_default()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
