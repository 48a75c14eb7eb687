//! Prize Wheel entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use prize_wheel::audio::AudioManager;
    use prize_wheel::consts::*;
    use prize_wheel::renderer::{RenderState, shapes};
    use prize_wheel::sim::{
        AudioSource, EventBus, SpinSettled, SpinStarted, TickInput, Wheel, WheelPhase, tick,
    };
    use prize_wheel::{SpinHistory, WheelConfig, WheelError};

    /// Game instance holding all state
    struct Game {
        wheel: Wheel,
        /// Persisted copy of the settings; mute changes are written back here
        config: WheelConfig,
        audio: Rc<AudioManager>,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        history: Rc<RefCell<SpinHistory>>,
    }

    impl Game {
        fn new(config: WheelConfig, seed: u64) -> Result<Self, WheelError> {
            let audio = Rc::new(AudioManager::from_config(&config));
            let bus = Rc::new(EventBus::new());
            let source: Rc<dyn AudioSource> = audio.clone();
            let wheel = Wheel::new(config.clone(), seed, Some(source), bus.clone())?;

            let history = Rc::new(RefCell::new(SpinHistory::load()));

            // Remember each result once the wheel stops
            let last_torque = Rc::new(Cell::new(0.0f32));
            {
                let last_torque = last_torque.clone();
                bus.subscribe(move |e: &SpinStarted| last_torque.set(e.torque), 0, false);
            }
            {
                let history = history.clone();
                bus.subscribe(
                    move |e: &SpinSettled| {
                        let mut history = history.borrow_mut();
                        history.record(e.slice, last_torque.get(), js_sys::Date::now());
                        history.save();
                    },
                    0,
                    false,
                );
            }

            Ok(Self {
                wheel,
                config,
                audio,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                history,
            })
        }

        fn toggle_mute(&mut self) {
            let muted = self.config.toggle_muted();
            self.audio.set_muted(muted);
            self.config.save();
            log::info!("Mute toggled: {}", muted);
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.wheel, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.spin = false;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = shapes::wheel(&self.wheel);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
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

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            // Slice under the pin
            if let Some(el) = document.query_selector("#hud-slice .hud-value").ok().flatten() {
                let name = self
                    .wheel
                    .highlighted()
                    .and_then(|i| self.wheel.slices().get(i))
                    .map(|s| s.name.as_str())
                    .unwrap_or("-");
                el.set_text_content(Some(name));
            }

            // Last result
            if let Some(el) = document.query_selector("#hud-result .hud-value").ok().flatten() {
                let text = self
                    .history
                    .borrow()
                    .last()
                    .map(|r| format!("Slice {}", r.slice))
                    .unwrap_or_else(|| "-".to_string());
                el.set_text_content(Some(&text));
            }

            // Spin count
            if let Some(el) = document.query_selector("#hud-spins .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.history.borrow().len().to_string()));
            }

            // Show/hide spin prompt
            if let Some(el) = document.get_element_by_id("spin-prompt") {
                if self.wheel.phase() == WheelPhase::Spinning {
                    let _ = el.set_attribute("class", "hidden");
                } else {
                    let _ = el.set_attribute("class", "");
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Prize Wheel starting...");

        if let Err(e) = start().await {
            log::error!("Prize Wheel failed to start: {}", e);
        }
    }

    async fn start() -> Result<(), WheelError> {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let config = WheelConfig::load();
        let view_radius = config.radius * 1.25;
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(config, seed)?));

        log::info!("Wheel initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, view_radius).await?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());

        // Show HUD
        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Prize Wheel running!");
        Ok(())
    }

    fn request_spin(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        g.audio.resume();
        g.input.spin = true;
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click - spin
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                request_spin(&game);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - spin
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                request_spin(&game);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                match event.key().as_str() {
                    " " | "Enter" => request_spin(&game),
                    "m" | "M" => game.borrow_mut().toggle_mute(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
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
    log::info!("Prize Wheel (native) starting...");
    log::info!("Native mode runs a headless spin - run with `trunk serve` for the web version");

    if let Err(e) = native::run(std::env::args().skip(1).collect()) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::rc::Rc;
    use std::time::{SystemTime, UNIX_EPOCH};

    use prize_wheel::consts::SIM_DT;
    use prize_wheel::sim::{EventBus, LogAudio, SliceChanged, TickInput, Wheel, WheelPhase, tick};
    use prize_wheel::{WheelConfig, WheelError};

    /// Give up if the wheel is still turning after this long (simulated seconds)
    const MAX_SPIN_SECONDS: f32 = 600.0;

    /// Seed from the command line, or the wall clock when none is given
    fn parse_seed(arg: Option<&str>) -> Result<u64, WheelError> {
        match arg {
            Some(s) => s
                .parse()
                .map_err(|_| WheelError::InvalidConfig {
                    field: "seed",
                    reason: "must be an unsigned integer",
                }),
            None => Ok(SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)),
        }
    }

    /// `prize-wheel [config.json] [seed]`
    pub fn run(args: Vec<String>) -> Result<(), WheelError> {
        let config = match args.first() {
            Some(path) => WheelConfig::load_from_path(path)?,
            None => WheelConfig::default(),
        };
        let seed = parse_seed(args.get(1).map(String::as_str))?;

        let bus = Rc::new(EventBus::new());
        bus.set_debug_logging(log::log_enabled!(log::Level::Trace));
        bus.subscribe(
            |e: &SliceChanged| log::debug!("pin: {:?} -> {}", e.previous, e.current),
            0,
            false,
        );

        let mut wheel = Wheel::new(config, seed, Some(Rc::new(LogAudio)), bus)?;
        log::info!("Spinning with seed {}", seed);

        let torque = wheel.spin();
        let idle = TickInput::default();
        let max_ticks = (MAX_SPIN_SECONDS / SIM_DT) as u32;
        let mut ticks = 0;
        while wheel.phase() != WheelPhase::Settled && ticks < max_ticks {
            tick(&mut wheel, &idle, SIM_DT);
            ticks += 1;
        }

        if wheel.phase() != WheelPhase::Settled {
            log::warn!("Wheel still turning after {}s, reading the pin anyway", MAX_SPIN_SECONDS);
        }

        let winner = wheel.winning_slice();
        println!(
            "{} wins (torque {:.2}, rotation {:.1} deg, {:.2}s)",
            wheel.slices()[winner].name,
            torque,
            wheel.rotation(),
            ticks as f32 * SIM_DT
        );
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_seed() {
            assert_eq!(parse_seed(Some("42")).unwrap(), 42);
            assert!(parse_seed(None).is_ok());
        }

        #[test]
        fn test_bad_seed_is_an_error() {
            assert!(matches!(
                parse_seed(Some("abc")),
                Err(WheelError::InvalidConfig { field: "seed", .. })
            ));
            assert!(parse_seed(Some("-1")).is_err());
        }
    }
}
