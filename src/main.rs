//! Lazer Swarm entry point
//!
//! Headless driver: runs the simulation at a fixed timestep with a scripted
//! pilot that strafes and holds fire, then prints the result.
//!
//! Usage: `lazer-swarm [config.json] [seconds]`

use std::time::Duration;

use lazer_swarm::consts::SIM_DT_MS;
use lazer_swarm::sim::{GamePhase, SpawnTimer};
use lazer_swarm::{EventSink, GameEvent, GameState, SimConfig, TickInput};

/// Tallies events and logs them as they arrive
#[derive(Default)]
struct LogSink {
    shots: u32,
    kills: u32,
}

impl EventSink for LogSink {
    fn emit(&mut self, event: GameEvent) {
        match event {
            GameEvent::ShotFired => self.shots += 1,
            GameEvent::EnemyExploded { x, y } => {
                self.kills += 1;
                log::info!("Enemy exploded at ({:.0}, {:.0})", x, y);
            }
            GameEvent::ScoreChanged { score } => log::debug!("Score: {}", score),
            GameEvent::PlayerDestroyed => log::warn!("Player destroyed"),
        }
    }
}

/// Strafe back and forth every two seconds, always firing
fn scripted_input(clock: Duration) -> TickInput {
    let leg = clock.as_millis() / 2000;
    TickInput {
        left: leg % 2 == 0,
        right: leg % 2 == 1,
        fire: true,
        ..Default::default()
    }
}

fn load_config(path: Option<&str>) -> Result<SimConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            Ok(SimConfig::from_json(&json)?)
        }
        None => Ok(SimConfig::default()),
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first().map(String::as_str))?;
    let seconds: u64 = match args.get(1) {
        Some(s) => s.parse()?,
        None => 60,
    };

    let mut state = GameState::new(config)?;
    let mut spawn_timer = SpawnTimer::new(state.config().spawn_interval());
    let mut sink = LogSink::default();
    let dt = Duration::from_millis(SIM_DT_MS);
    let end = Duration::from_secs(seconds);

    while state.clock() < end && state.phase() == GamePhase::Playing {
        let input = scripted_input(state.clock());
        state.on_tick(&input, dt, &mut sink);
        for _ in 0..spawn_timer.advance(dt) {
            state.on_spawn_timer();
        }
    }

    println!(
        "Survived {:.1}s: {} shots, {} kills, score {}, {} enemies on screen",
        state.clock().as_secs_f32(),
        sink.shots,
        sink.kills,
        state.score(),
        state.enemies().alive_count()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Lazer Swarm (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
