//! Arena Survivor entry point
//!
//! Browser: creates the canvas, wires keyboard and resize listeners and runs
//! the animation-frame loop. Native: runs a headless match and reports how it
//! went.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use arena_survivor::platform::KeyState;
    use arena_survivor::renderer::{build_scene, canvas::draw_scene};
    use arena_survivor::session::FrameOutcome;
    use arena_survivor::sim::TickInput;
    use arena_survivor::{Session, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session,
        settings: Settings,
        keys: KeyState,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        /// Match the canvas backing size to the arena
        fn sync_canvas_size(&self) {
            let arena = self.session.arena();
            self.canvas.set_width(arena.width as u32);
            self.canvas.set_height(arena.height as u32);
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// One tick plus one draw
        fn frame(&mut self) {
            let now = js_sys::Date::now();
            self.track_fps(now);

            let input = TickInput {
                keys: self.keys.snapshot(),
                now_ms: now,
            };
            let outcome = self.session.frame(&input);

            if outcome == FrameOutcome::Restarted {
                self.keys.clear();
                self.sync_canvas_size();
            }

            let scene = build_scene(self.session.state(), &self.settings, Some(self.fps));
            if let Err(e) = draw_scene(&self.ctx, &scene) {
                log::warn!("Render error: {:?}", e);
            }

            if let FrameOutcome::Ended(message) = outcome {
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(message);
                }
                // Key-up events are lost while the alert is open
                self.keys.clear();
            }
        }
    }

    fn viewport() -> (f32, f32) {
        let Some(window) = web_sys::window() else {
            return (800.0, 800.0);
        };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        (w as f32, h as f32)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Arena Survivor starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        document
            .body()
            .ok_or("no body")?
            .append_child(&canvas)?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let (w, h) = viewport();
        let now = js_sys::Date::now();
        let seed = now as u64;
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(w, h, now, seed),
            settings: Settings::load(),
            keys: KeyState::new(),
            canvas,
            ctx,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }));
        game.borrow().sync_canvas_size();

        setup_input_handlers(game.clone());
        setup_resize_handler(game.clone());

        request_animation_frame(game);

        log::info!("Arena Survivor running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for (event_name, held) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().keys.set(&event.code(), held) {
                    // Keep arrow keys from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = document
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur (click outside) drops held keys
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().keys.clear();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (w, h) = viewport();
            let mut g = game.borrow_mut();
            g.session.resize(w, h);
            g.sync_canvas_size();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use clap::Parser;

    use arena_survivor::renderer::build_scene;
    use arena_survivor::session::FrameOutcome;
    use arena_survivor::sim::{GameEvent, TickInput};
    use arena_survivor::{Session, Settings, SettingsError};

    /// Run a match without a window, holding no keys
    #[derive(Parser, Debug)]
    #[command(author, version, about = "Headless Arena Survivor match", long_about = None)]
    pub struct Args {
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,
        /// Simulated wall-clock seconds to run for
        #[arg(long, default_value_t = 300)]
        seconds: u64,
        /// Viewport side in pixels
        #[arg(long, default_value_t = 800.0)]
        size: f32,
        /// Simulated frames per second
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
        /// Settings JSON file
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Print the final game state as JSON
        #[arg(long)]
        dump: bool,
    }

    pub fn run(args: Args) -> Result<(), SettingsError> {
        let settings = match &args.settings {
            Some(path) => Settings::from_path(path)?,
            None => Settings::load(),
        };

        let seed = args.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });

        let frame_ms = 1000.0 / args.fps.max(1.0);
        let end_ms = args.seconds as f64 * 1000.0;
        let mut session = Session::new(args.size, args.size, 0.0, seed);
        let mut now = 0.0;
        let mut kills = 0u32;
        let mut result = None;

        while now <= end_ms {
            now += frame_ms;
            let input = TickInput {
                now_ms: now,
                ..Default::default()
            };
            let outcome = session.frame(&input);
            kills += session
                .state()
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
                .count() as u32;
            if let FrameOutcome::Ended(message) = outcome {
                result = Some(message);
                break;
            }
        }

        let state = session.state();
        let scene = build_scene(state, &settings, Some(args.fps.round() as u32));
        log::debug!("Final frame: {} draw commands", scene.commands.len());

        println!("Result:  {}", result.unwrap_or("Still playing"));
        println!("Time:    {:.1}s over {} ticks", now / 1000.0, state.time_ticks);
        println!(
            "Level:   {} ({} / {} exp)",
            state.player.level, state.player.experience, state.player.experience_to_next
        );
        println!("Health:  {}", state.player.display_health());
        println!("Kills:   {}", kills);
        println!("Enemies: {} alive, {} orbs on field", state.enemies.len(), state.orbs.len());

        if args.dump {
            match serde_json::to_string_pretty(state) {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("Could not serialize state: {}", e),
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Arena Survivor (native, headless) starting...");

    let args = headless::Args::parse();
    if let Err(e) = headless::run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
