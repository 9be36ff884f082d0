//! Sky Flyer entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::MouseEvent;

    use sky_flyer::Session;
    use sky_flyer::Tuning;
    use sky_flyer::persistence::LocalStorageStore;
    use sky_flyer::platform::dom::DomPresenter;

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorageStore>,
        presenter: DomPresenter,
        /// A frame request is outstanding
        looping: bool,
    }

    impl Game {
        /// Run one frame and draw it. Returns whether to keep looping.
        fn frame(&mut self, time: f64) -> bool {
            let result = self.session.frame(time);
            self.presenter.render(self.session.state());
            if let Some(summary) = result.game_over() {
                self.presenter.show_game_over(summary);
            }
            result.running
        }

        fn restart(&mut self, seed: u64) {
            self.session.restart(seed);
            self.presenter.reset();
            self.presenter.render(self.session.state());
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Sky Flyer starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let Some(presenter) = DomPresenter::attach(document.clone()) else {
            log::error!("No .game-container element - nothing to play in");
            return;
        };

        let tuning = presenter.measure(Tuning::load());
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(seed, tuning, LocalStorageStore::open());

        let game = Rc::new(RefCell::new(Game {
            session,
            presenter,
            looping: true,
        }));
        game.borrow_mut().presenter.reset();

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Sky Flyer running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let container = game.borrow().presenter.container().clone();
        let container_clone = container.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = container_clone.get_bounding_client_rect();
            let x = event.client_x() as f32 - rect.left() as f32;
            let y = event.client_y() as f32 - rect.top() as f32;
            game.borrow_mut()
                .session
                .pointer_moved(glam::Vec2::new(x, y));
        });
        let _ = container
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                let resume = {
                    let mut g = game.borrow_mut();
                    g.restart(seed);
                    // The loop stops itself at game over; kick it again
                    let resume = !g.looping;
                    g.looping = true;
                    resume
                };
                if resume {
                    request_animation_frame(game.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let running = {
            let mut g = game.borrow_mut();
            let running = g.frame(time);
            g.looping = running;
            running
        };

        if running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sky_flyer::Tuning;

    env_logger::init();
    log::info!("Sky Flyer (native) starting...");
    log::info!("Native mode runs a headless demo - use `trunk serve` for the web version");

    // Optional tuning file as the first argument
    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load_file(std::path::Path::new(&path)),
        None => Tuning::default(),
    };
    let seed = std::env::var("SKY_FLYER_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5EED);

    demo::run(seed, tuning);
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;
    use sky_flyer::Session;
    use sky_flyer::Tuning;
    use sky_flyer::consts::FRAME_MS;
    use sky_flyer::persistence::MemoryStore;
    use sky_flyer::sim::GameState;

    /// Safety cap on demo length (10 minutes at 60 fps)
    const MAX_FRAMES: u32 = 36_000;

    /// Pointer target for a simple autopilot: chase the lowest coin,
    /// sidestep obstacles that are about to reach the parachute.
    fn autopilot(state: &GameState) -> Vec2 {
        let player = &state.player;
        let hitbox = player.hitbox();
        let centre = player.pos + player.size / 2.0;

        let mut target_x = state
            .coins()
            .iter()
            .filter(|c| c.pos.y < hitbox.top())
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|c| c.pos.x + c.size.x / 2.0)
            .unwrap_or(centre.x);

        // Nearest threat above the parachute in the same column
        let threat = state
            .obstacles()
            .iter()
            .filter(|o| o.pos.y + o.size.y <= hitbox.top() && o.pos.y + o.size.y > hitbox.top() - 80.0)
            .find(|o| o.pos.x < hitbox.right() + 20.0 && o.pos.x + o.size.x > hitbox.left() - 20.0);
        if let Some(o) = threat {
            let left_gap = o.pos.x;
            let right_gap = state.tuning.arena_width - (o.pos.x + o.size.x);
            target_x = if left_gap > right_gap {
                o.pos.x - player.size.x
            } else {
                o.pos.x + o.size.x + player.size.x
            };
        }

        Vec2::new(target_x, state.tuning.arena_height * 0.75)
    }

    pub fn run(seed: u64, tuning: Tuning) {
        let mut session = Session::new(seed, tuning, MemoryStore::new());
        let mut now = 0.0;

        for _ in 0..MAX_FRAMES {
            now += FRAME_MS;
            let target = autopilot(session.state());
            session.pointer_moved(target);

            let result = session.frame(now);
            if let Some(summary) = result.game_over() {
                println!(
                    "Game over after {:.1}s: score {} | coins {} | band {}",
                    now / 1000.0,
                    summary.final_score,
                    summary.coin_count,
                    summary.band.as_str()
                );
                return;
            }
        }

        let hud = session.state().hud();
        let badges: Vec<&str> = hud.badges.iter().map(|b| b.label()).collect();
        println!(
            "Demo cap reached: score {} | coins {} | badges [{}]",
            hud.score,
            hud.coins,
            badges.join(", ")
        );
    }
}
