//! Avoid Boxes entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlSelectElement, KeyboardEvent};

    use avoid_boxes::renderer::{RenderState, scene};
    use avoid_boxes::sim::{GameEvent, GamePhase, Simulation, tick};
    use avoid_boxes::{Settings, Theme, Tuning};

    /// Main game struct
    struct Game {
        sim: Simulation,
        settings: Settings,
        render_state: Option<RenderState>,
        /// An animation frame is currently scheduled
        loop_active: bool,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                sim: Simulation::new(Tuning::default(), seed),
                settings,
                render_state: None,
                loop_active: false,
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let snapshot = self.sim.snapshot();
            let vertices = scene::build(&snapshot, &self.settings);
            let clear = self.settings.theme.background();
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices, clear) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Push queued simulation events into the DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            for event in self.sim.drain_events() {
                match event {
                    GameEvent::TimeUpdated(elapsed) => {
                        set_text(&document, "time-display", &format!("Time: {:.1}s", elapsed));
                    }
                    GameEvent::BombCountChanged(count) => {
                        set_text(&document, "bomb-count", &format!("Bombs: {}", count));
                    }
                    GameEvent::GameOver {
                        elapsed,
                        boxes_avoided,
                    } => {
                        set_text(
                            &document,
                            "survival-time",
                            &format!("Survival Time: {:.1}s", elapsed),
                        );
                        set_text(
                            &document,
                            "boxes-avoided",
                            &format!("Boxes Avoided: {}", boxes_avoided),
                        );
                        set_active(&document, "game-over-modal", true);
                    }
                }
            }
        }

        fn start(&mut self) {
            self.sim.start(now_seconds());
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                set_active(&document, "start-screen", false);
                set_active(&document, "game-screen", true);
                set_active(&document, "game-over-modal", false);
            }
        }

        fn go_home(&mut self) {
            self.sim.return_to_idle();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                set_active(&document, "start-screen", true);
                set_active(&document, "game-screen", false);
                set_active(&document, "game-over-modal", false);
            }
        }
    }

    /// Page-relative timestamp in seconds
    fn now_seconds() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now() / 1000.0)
            .unwrap_or_else(|| js_sys::Date::now() / 1000.0)
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_active(document: &Document, id: &str, active: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if active {
                classes.add_1("active")
            } else {
                classes.remove_1("active")
            };
        }
    }

    fn apply_theme(theme: Theme) {
        let body = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body());
        if let Some(body) = body {
            let classes = body.class_list();
            let _ = match theme {
                Theme::Dark => classes.add_1("dark-mode"),
                Theme::Light => classes.remove_1("dark-mode"),
            };
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Avoid Boxes starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        apply_theme(settings.theme);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        log::info!("Game initialized with seed: {}", seed);

        // Canvas resolution follows the playfield, scaled for the display
        let (viewport_w, viewport_h) = {
            let g = game.borrow();
            (g.sim.tuning.viewport_width, g.sim.tuning.viewport_height)
        };
        let dpr = window.device_pixel_ratio();
        let width = (viewport_w as f64 * dpr) as u32;
        let height = (viewport_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, width, height, (viewport_w, viewport_h)).await;
        {
            let mut g = game.borrow_mut();
            g.render_state = Some(render_state);
            g.render();
        }

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());
        setup_theme_select(game);

        log::info!("Avoid Boxes ready!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                "ArrowLeft" => g.sim.move_left(),
                "ArrowRight" => g.sim.move_right(),
                " " => {
                    event.prevent_default();
                    g.sim.trigger_bomb();
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Kick off the frame loop unless one is already scheduled
    fn ensure_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.loop_active {
                return;
            }
            g.loop_active = true;
        }
        request_animation_frame(game);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let keep_running = {
            let mut g = game.borrow_mut();
            tick(&mut g.sim, now_seconds());
            g.render();
            g.update_hud();

            let running = g.sim.phase == GamePhase::Running;
            if !running {
                g.loop_active = false;
            }
            running
        };

        // No work is scheduled while idle or after game over
        if keep_running {
            request_animation_frame(game);
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().start();
                    ensure_loop(game.clone());
                });
                let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("home-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.go_home();
                g.render();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_theme_select(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        let Some(select) = document
            .get_element_by_id("theme-select")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        else {
            return;
        };

        select.set_value(game.borrow().settings.theme.as_str());

        let select_clone = select.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(theme) = Theme::from_str(&select_clone.value()) else {
                log::warn!("Unknown theme: {}", select_clone.value());
                return;
            };
            let mut g = game.borrow_mut();
            g.settings.theme = theme;
            g.settings.save();
            apply_theme(theme);
            g.render();
        });
        let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Avoid Boxes (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);

    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match avoid_boxes::Tuning::from_json(&json) {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::error!("Rejected tuning {}: {}", path, e);
                    std::process::exit(1);
                }
            },
            Err(e) => {
                log::error!("Cannot read {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => avoid_boxes::Tuning::default(),
    };

    if let Err(e) = headless::run(tuning, seed) {
        log::error!("Rejected tuning: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use avoid_boxes::sim::{GameEvent, GamePhase, Simulation, tick};
    use avoid_boxes::{Tuning, TuningError};

    /// Give up after ten simulated minutes
    const MAX_FRAMES: u64 = 36_000;
    /// Boxes closer than this above the player count as a threat
    const LOOKAHEAD: f32 = 120.0;

    pub fn run(tuning: Tuning, seed: u64) -> Result<(), TuningError> {
        let dt = tuning.frame_dt as f64;
        let mut sim = Simulation::try_new(tuning, seed)?;
        sim.start(0.0);

        for frame in 1..=MAX_FRAMES {
            autopilot(&mut sim);
            tick(&mut sim, frame as f64 * dt);

            for event in sim.drain_events() {
                if let GameEvent::GameOver {
                    elapsed,
                    boxes_avoided,
                } = event
                {
                    println!(
                        "Game over: survived {:.1}s, avoided {} boxes",
                        elapsed, boxes_avoided
                    );
                }
            }
            if sim.phase != GamePhase::Running {
                return Ok(());
            }
        }

        println!(
            "Still alive after {:.1}s, avoided {} boxes",
            sim.elapsed, sim.boxes_avoided
        );
        Ok(())
    }

    /// Step toward the nearest lane with no box about to land on it
    fn autopilot(sim: &mut Simulation) {
        let lane_count = sim.tuning.lane_count;
        let player_y = sim.player.y;
        let lane_width = sim.tuning.lane_width();

        let threatened = |lane: usize| {
            sim.entities.obstacles().iter().any(|ob| {
                let ob_lane = ((ob.rect.x + ob.rect.width / 2.0) / lane_width) as usize;
                ob_lane == lane && ob.rect.bottom() > player_y - LOOKAHEAD && ob.rect.y < player_y
            })
        };

        let current = sim.player.lane;
        if !threatened(current) {
            return;
        }

        let target = (1..lane_count)
            .flat_map(|d| [current.checked_sub(d), Some(current + d)])
            .flatten()
            .filter(|&lane| lane < lane_count)
            .find(|&lane| !threatened(lane));

        match target {
            Some(lane) if lane < current => sim.move_left(),
            Some(_) => sim.move_right(),
            None => {
                sim.trigger_bomb();
            }
        }
    }
}
