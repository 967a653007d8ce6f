//! Shape Platformer entry point
//!
//! Headless host: owns the frame loop, feeds scripted input into the
//! simulation and logs what happens. Drawing is left to a real frontend.

use shape_platformer::Settings;
use shape_platformer::sim::{Camera, GameEvent, GamePhase, GameState, Level, ShapeField, TickInput, tick};

/// Fixed frame time for the headless loop (60 Hz)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Frames to simulate per run
const MAX_FRAMES: u32 = 60 * 30;

fn main() {
    env_logger::init();
    log::info!("Shape Platformer (headless) starting...");

    let settings = Settings::load_or_default("settings.json");
    let camera = Camera::centered(settings.screen());

    let level = match std::env::args().nth(1) {
        Some(path) => match shape_platformer::load_level(&path, camera, &settings) {
            Ok(level) => level,
            Err(err) => {
                log::error!("{err}");
                std::process::exit(1);
            }
        },
        None => Level::demo(camera, settings.gravity),
    };

    run_platformer(level, settings.clone());
    run_shape_field(&settings);
}

/// Run right, hopping whenever the cooldown allows, until the run ends
fn run_platformer(level: Level, settings: Settings) {
    let mut state = GameState::new(level, settings);
    state.start_game();

    let input = TickInput {
        right: true,
        jump: true,
        ..Default::default()
    };

    for frame in 0..MAX_FRAMES {
        tick(&mut state, &input, FRAME_DT);

        for event in &state.events {
            match event {
                GameEvent::Landed | GameEvent::Jumped => log::debug!("frame {frame}: {event:?}"),
                _ => log::info!("frame {frame}: {event:?}"),
            }
        }

        if state.phase != GamePhase::Playing {
            break;
        }
    }

    let pos = state.player.shape.pos;
    println!(
        "Platformer finished: {:?} at ({:.1}, {:.1}) after {:.2}s",
        state.phase, pos.x, pos.y, state.time
    );
}

/// Let the bouncing shapes run for a few seconds
fn run_shape_field(settings: &Settings) {
    let mut field = ShapeField::random(0x5EED, shape_platformer::consts::DEMO_SHAPES_PER_KIND, settings.screen());
    for _ in 0..60 * 5 {
        field.step(FRAME_DT);
    }
    println!("Shape field: {} shapes after 5s", field.shapes.len());
}
