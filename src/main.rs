//! Critter Forge: build a creature out of shapes, then walk it around
//!
//! Tab opens the edit overlay:
//! - Shape buttons change the body (torso tab) or arm a limb
//! - Yellow/magenta buttons place or remove attachment nodes
//! - Left-drag moves a limb, right-drag rotates it, `1` removes a node
//!
//! Outside the overlay A/D walk, Space jumps and holding the left mouse
//! button reaches for the ball with any hands.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod creature;
mod input;
mod renderer;
mod ui;

use macroquad::prelude::*;
use app::AppState;
use creature::Settings;

fn window_conf() -> Conf {
    let world = Settings::default().world;
    Conf {
        window_title: format!("Critter Forge v{}", VERSION),
        window_width: world.width as i32,
        window_height: world.height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load_or_default();
    if settings.world != Settings::default().world {
        request_new_screen_size(settings.world.width, settings.world.height);
    }
    let target_frame_time = settings.tick_seconds() as f64;

    let mut app = AppState::new(settings);
    log::info!("=== Critter Forge v{} ===", VERSION);

    loop {
        // Track frame start time for FPS limiting
        let frame_start = get_time();

        let commands = app.frame();
        renderer::draw(&commands);

        // Sleep out the rest of the interval; a slow frame is not caught up
        let remaining = target_frame_time - (get_time() - frame_start);
        if remaining > 0.0 {
            // Native: use sleep for bulk, then spin-wait for precision
            #[cfg(not(target_arch = "wasm32"))]
            {
                let spin_margin = 0.002; // 2ms
                while get_time() - frame_start + spin_margin < target_frame_time {
                    std::thread::sleep(std::time::Duration::from_millis(1));
                }
                while get_time() - frame_start < target_frame_time {
                    std::hint::spin_loop();
                }
            }
            // WASM: the browser paces frames
        }

        next_frame().await;
    }
}
