//! Bearly Making It entry point
//!
//! Handles platform-specific initialization and runs the game loop. The 3D
//! scene lives in the page; this host feeds it frames and keeps the HUD text
//! in sync with the simulation.

use bearly_making_it::MovementKeys;
use bearly_making_it::sim::Simulation;
use glam::Vec3;

/// Walk the player one frame using the current key snapshot
fn move_player(player: &mut Vec3, keys: &MovementKeys, sim: &Simulation, dt: f32) {
    let step = bearly_making_it::controls::movement_step(keys, sim.world().stats().speed, dt);
    *player += step;
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use bearly_making_it::consts::FRAME_DT;
    use bearly_making_it::sim::{GameEvent, Simulation, TickInput, get_upgrade_cost};
    use bearly_making_it::{MovementKeys, SimConfig};
    use glam::Vec3;

    /// Game instance holding all state
    struct Game {
        sim: Simulation,
        keys: MovementKeys,
        player: Vec3,
        last_time: f64,
    }

    impl Game {
        fn new(config: SimConfig) -> Self {
            Self {
                sim: Simulation::new(config),
                keys: MovementKeys::default(),
                player: Vec3::new(0.0, 0.5, 0.0),
                last_time: 0.0,
            }
        }

        fn update(&mut self, dt: f32) {
            super::move_player(&mut self.player, &self.keys, &self.sim, dt);
            self.sim.tick(&TickInput::at(self.player), dt);

            for event in self.sim.drain_events() {
                match event {
                    GameEvent::ShoppingChanged { shopping } => set_hidden("upgrade-menu", !shopping),
                    GameEvent::UpgradePurchased { kind, level, .. } => {
                        log::info!("{} now level {}", kind.display_name(), level)
                    }
                    _ => {}
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let hud = self.sim.world().hud();
            set_text("hud-cash", &format!("${}", hud.cash));
            set_text("hud-gems", &hud.gems.to_string());
            set_text(
                "hud-inventory",
                &format!("{}/{}", hud.raw_meat + hud.cooked_meat, hud.inventory_cap),
            );
            set_text("hud-raw", &hud.raw_meat.to_string());
            set_text("hud-cooked", &hud.cooked_meat.to_string());
            set_text("grill-raw", &hud.grill_raw.to_string());
            set_text("grill-cooked", &hud.grill_cooked.to_string());
            set_text("grill-progress", &format!("{:.0}%", hud.cook_progress * 100.0));

            if self.sim.is_shopping() {
                let levels = self.sim.world().upgrade_levels();
                for (i, (kind, level)) in levels.iter().enumerate() {
                    let cost = get_upgrade_cost(kind, level);
                    set_text(
                        &format!("upgrade-{}", i + 1),
                        &format!("{} (Lvl {}) ${}", kind.display_name(), level, cost),
                    );
                }
            }
        }
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    /// Optional JSON override embedded in the page as `<script id="sim-config">`
    fn load_config(seed: u64) -> SimConfig {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("sim-config"))
            .and_then(|el| el.text_content());

        let mut config = match json {
            Some(json) => SimConfig::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring sim config: {}", e);
                SimConfig::default()
            }),
            None => SimConfig::default(),
        };
        config.seed = seed;
        config
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bearly Making It starting...");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(load_config(seed))));

        setup_input_handlers(game.clone());
        set_hidden("upgrade-menu", true);

        request_animation_frame(game);

        log::info!("Bearly Making It running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Key down: movement + upgrade hotkeys
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                let code = event.code();
                if g.keys.key_down(&code) {
                    event.prevent_default();
                } else if let Some(kind) = bearly_making_it::controls::upgrade_hotkey(&code) {
                    if g.sim.is_shopping() && !g.sim.buy_upgrade(kind) {
                        log::info!("Can't afford {}", kind.display_name());
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().keys.key_up(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
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
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                FRAME_DT
            };
            g.last_time = time;

            g.update(dt);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bearly Making It (native) starting...");
    log::info!("Native mode runs a headless bot - serve the web build to play");

    autopilot::run(180.0);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless session: a simple bot steers with the same key snapshot a player would
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use bearly_making_it::consts::FRAME_DT;
    use bearly_making_it::sim::{
        GameEvent, Simulation, TickInput, UpgradeType, distance_squared, get_upgrade_cost,
    };
    use bearly_making_it::{MovementKeys, SimConfig};
    use glam::Vec3;

    /// Close enough to a target to stop walking
    const ARRIVE_RADIUS: f32 = 1.0;

    pub fn run(seconds: f32) {
        let mut sim = Simulation::new(SimConfig::with_seed(2024));
        let mut player = Vec3::new(0.0, 0.5, 0.0);
        let frames = (seconds / FRAME_DT) as u32;

        for _ in 0..frames {
            let target = choose_target(&sim, player);
            let keys = keys_toward(player, target);
            super::move_player(&mut player, &keys, &sim, FRAME_DT);
            sim.tick(&TickInput::at(player), FRAME_DT);

            if sim.is_shopping() {
                if let Some(kind) = cheapest_affordable(&sim) {
                    sim.buy_upgrade(kind);
                }
            }

            for event in sim.drain_events() {
                match event {
                    GameEvent::EnemyKilled { id } => log::info!("Bear {} down", id),
                    GameEvent::UpgradePurchased { kind, level, cost } => {
                        log::info!("{} -> level {} (${})", kind.display_name(), level, cost)
                    }
                    _ => {}
                }
            }
        }

        match serde_json::to_string_pretty(&sim.world().hud()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not serialize HUD: {}", e),
        }
    }

    fn cheapest_affordable(sim: &Simulation) -> Option<UpgradeType> {
        let world = sim.world();
        UpgradeType::ALL
            .into_iter()
            .map(|kind| (kind, get_upgrade_cost(kind, world.upgrade_levels().get(kind))))
            .filter(|(_, cost)| *cost <= world.cash())
            .min_by_key(|(_, cost)| *cost)
            .map(|(kind, _)| kind)
    }

    fn choose_target(sim: &Simulation, player: Vec3) -> Vec3 {
        let world = sim.world();
        let config = sim.config();
        let inv = world.inventory();

        if inv.raw_meat > 0 || (world.grill().cooked_meat > 0 && world.inventory_space() > 0) {
            return config.grill_pos;
        }
        if inv.cooked_meat > 0 {
            return config.register_pos;
        }
        if cheapest_affordable(sim).is_some() {
            return config.upgrade_pos;
        }

        world
            .enemies()
            .iter()
            .map(|e| e.pos())
            .min_by(|a, b| {
                distance_squared(*a, player)
                    .partial_cmp(&distance_squared(*b, player))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(config.grill_pos)
    }

    /// Hold whichever arrow keys point at the target
    fn keys_toward(player: Vec3, target: Vec3) -> MovementKeys {
        let dx = target.x - player.x;
        let dz = target.z - player.z;
        let mut keys = MovementKeys::default();
        if dx * dx + dz * dz <= ARRIVE_RADIUS * ARRIVE_RADIUS {
            return keys;
        }
        let dead_zone = ARRIVE_RADIUS * 0.5;
        keys.right = dx > dead_zone;
        keys.left = dx < -dead_zone;
        keys.backward = dz > dead_zone;
        keys.forward = dz < -dead_zone;
        keys
    }
}
