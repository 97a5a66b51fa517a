//! Star Skirmish headless runner
//!
//! Plays a scripted pilot against the simulation for a fixed number of frames
//! and logs the outcome. Useful as a smoke test and for eyeballing balance.
//!
//! Usage: `star-skirmish [settings.json]`

use star_skirmish::sim::{Action, GameEvent, GamePhase};
use star_skirmish::{Game, ManualClock, Settings};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Star Skirmish (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&path).unwrap_or_else(|e| {
            log::warn!("{}; using default settings", e);
            Settings::default()
        }),
        None => Settings::default(),
    };

    let clock = ManualClock::new();
    let mut game = match Game::new(&settings, clock.clone()) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Invalid settings: {}", e);
            std::process::exit(1);
        }
    };
    game.perform(Action::Start);

    let frame_secs = 1.0 / settings.frame_rate as f64;
    let mut kills = 0u32;
    let mut hits = 0u32;

    for frame_no in 0..settings.demo_frames {
        drive_pilot(&mut game, frame_no);

        clock.advance(frame_secs);
        let Some(frame) = game.pump() else {
            continue;
        };

        for event in &frame.events {
            match event {
                GameEvent::EnemyDestroyed { .. } => kills += 1,
                GameEvent::PlayerHit { .. } => hits += 1,
                GameEvent::GameOver { score } => {
                    log::info!("Pilot went down at frame {} with score {}", frame_no, score);
                }
                _ => {}
            }
        }

        if frame.snapshot.phase == GamePhase::GameOver {
            break;
        }
    }

    let snapshot = game.snapshot();
    log::info!(
        "Finished: phase={:?} score={} health={} kills={} hits_taken={}",
        snapshot.phase,
        snapshot.player.score,
        snapshot.player.display_health(),
        kills,
        hits
    );
    match snapshot.to_json() {
        Ok(json) => log::debug!("Final snapshot: {}", json),
        Err(e) => log::error!("Could not serialize snapshot: {}", e),
    }
}

/// Circle slowly and tap fire a few times a second
fn drive_pilot(game: &mut Game<ManualClock>, frame_no: u32) {
    match frame_no % 240 {
        0 => game.key_down("KeyD"),
        60 => game.key_up("KeyD"),
        90 => game.key_down("KeyW"),
        120 => game.key_up("KeyW"),
        _ => {}
    }
    if frame_no % 12 == 0 {
        game.key_down("Space");
    } else if frame_no % 12 == 1 {
        game.key_up("Space");
    }
}
