//! Don't Move entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::KeyboardEvent;

    use dont_move::audio::{AudioManager, Cue};
    use dont_move::clock::HostClock;
    use dont_move::platform::{HeldKeys, is_move_key, map_key};
    use dont_move::sim::FrameInput;
    use dont_move::ui::{self, Tone};
    use dont_move::{InputEvent, Session, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session,
        settings: Settings,
        audio: AudioManager,
        clock: HostClock,
        /// Key presses since the last frame, drained in order
        pending: Vec<InputEvent>,
        held: HeldKeys,
        /// Cosmetic randomness (shake offsets)
        fx_rng: Pcg32,
    }

    impl Game {
        fn new(settings: Settings, seed: u64) -> Self {
            Self {
                session: Session::seeded(seed),
                audio: AudioManager::new(&settings),
                settings,
                clock: HostClock::new(),
                pending: Vec::new(),
                held: HeldKeys::default(),
                fx_rng: Pcg32::seed_from_u64(seed ^ 0x5eed),
            }
        }

        /// One animation frame: drain input, advance once, play cues
        fn update(&mut self, host_ms: f64) {
            let time = self.clock.frame(host_ms);
            let inputs = std::mem::take(&mut self.pending);
            let held = FrameInput {
                moving: self.held.moving(),
            };
            let events = self.session.frame(inputs, held, time);
            for event in &events {
                if let Some(cue) = Cue::for_event(event) {
                    self.audio.play(cue);
                }
            }
        }

        /// Write the current screen into the DOM
        fn render(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let view = ui::view(&self.session, &self.settings);

            if let Some(root) = document.get_element_by_id("game") {
                let tint = match view.tint {
                    Some(Tone::Safe) => " safe",
                    Some(Tone::Danger) => " danger",
                    _ => "",
                };
                let glitch = if view.glitch { " glitch" } else { "" };
                let _ = root.set_attribute("class", &format!("screen-{}{}{}", view.screen, tint, glitch));

                let offset = if view.shake {
                    self.session.effects().shake_offset(&mut self.fx_rng)
                } else {
                    glam::Vec2::ZERO
                };
                let _ = root.set_attribute(
                    "style",
                    &format!("transform: translate({}px, {}px)", offset.x, offset.y),
                );
            }

            if let Some(el) = document.get_element_by_id("title") {
                el.set_text_content(Some(&view.title));
                let _ = el.set_attribute("style", &format!("transform: rotate({}deg)", -view.title_tilt));
            }

            if let Some(el) = document.get_element_by_id("lines") {
                let html: String = view
                    .lines
                    .iter()
                    .map(|l| {
                        let class = match l.tone {
                            Tone::Normal => "normal",
                            Tone::Dim => "dim",
                            Tone::Safe => "safe",
                            Tone::Danger => "danger",
                        };
                        format!("<div class=\"{}\">{}</div>", class, escape(&l.text))
                    })
                    .collect();
                el.set_inner_html(&html);
            }

            if let Some(el) = document.get_element_by_id("player") {
                let style = match view.player_x {
                    Some(x) => format!("display: block; left: {}px", x),
                    None => "display: none".to_string(),
                };
                let _ = el.set_attribute("style", &style);
            }

            if let Some(el) = document.get_element_by_id("stopwatch-hand") {
                let style = match view.stopwatch {
                    Some(f) => format!("display: block; transform: rotate({}turn)", f),
                    None => "display: none".to_string(),
                };
                let _ = el.set_attribute("style", &style);
            }

            if let Some(el) = document.get_element_by_id("fade") {
                let _ = el.set_attribute("style", &format!("opacity: {}", view.fade_alpha as f32 / 255.0));
            }
        }
    }

    fn escape(text: &str) -> String {
        text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Don't Move starting...");

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(settings, seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Don't Move running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        // Key down: queue discrete presses, track the movement key
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if key == "Tab" || is_move_key(&key) {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.held.key_down(&key);
                if !event.repeat() {
                    if let Some(input) = map_key(&key) {
                        g.pending.push(input);
                    }
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().held.key_up(&event.key());
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: a held key would otherwise stay down
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().held.release_all();
                log::info!("Released held keys (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dont_move::Settings;

    env_logger::init();
    log::info!("Don't Move (native) starting...");
    log::info!("Native mode runs a headless autopilot - serve the wasm build to play");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_file(&path).unwrap_or_else(|e| {
            log::warn!("{e}; using default settings");
            Settings::default()
        }),
        None => Settings::default(),
    };

    run_headless(&settings);
}

/// Play a full run with the autopilot, logging each screen change
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(settings: &dont_move::Settings) {
    use dont_move::audio::Cue;
    use dont_move::autopilot::Autopilot;
    use dont_move::clock::FrameClock;
    use dont_move::sim::GameEvent;
    use dont_move::{Screen, Session, ui};

    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("Seed: {}", seed);

    let mut session = Session::seeded(seed);
    let mut pilot = Autopilot::new("Autopilot", "Localhost");
    let mut clock = FrameClock::new();
    let mut last_screen = "";

    // Ten minutes of frames is far more than a clean run needs
    for _ in 0..(60 * 60 * 10) {
        let upcoming = clock.tick();
        let (inputs, held) = pilot.plan(&session, upcoming);
        let events = session.frame(inputs, held, upcoming);

        for event in &events {
            if let Some(cue) = Cue::for_event(event) {
                log::trace!("cue {:?}", cue);
            }
            if let GameEvent::LevelAdvanced { level } = event {
                log::info!("t={:.1}s level {}", upcoming.now_ms as f64 / 1000.0, level);
            }
        }

        let view = ui::view(&session, settings);
        if view.screen != last_screen {
            last_screen = view.screen;
            log::info!("[{}] {}", view.screen, view.title);
            for line in &view.lines {
                log::info!("    {}", line.text);
            }
        }

        if matches!(session.screen(), Screen::Ending) {
            println!(
                "Run complete in {:.1}s ({} frames)",
                clock.now_ms() as f64 / 1000.0,
                clock.frame_count()
            );
            return;
        }
    }

    println!("Run did not finish");
}
