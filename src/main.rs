//! Wrap Drift headless host
//!
//! Drives one session with a scripted driver and logs the HUD events.
//! Usage: `wrap-drift [seed] [settings.json]` (set RUST_LOG=info to see output)

use glam::Vec3;
use wrap_drift::consts::SIM_DT;
use wrap_drift::sim::{
    Action, CameraMode, FixedStep, GameState, RapierPhysics, TickInput, UiSink, advance_timer,
    tick,
};
use wrap_drift::{HighScoreStore, JsonFileHighScore, Settings, SimError};

const HIGH_SCORE_FILE: &str = "wrap_drift_highscore.json";
/// Display refresh the host pretends to render at
const DISPLAY_DT: f32 = 1.0 / 144.0;
/// Seconds to keep simulating after the session ends (coast-down)
const COAST_SECS: f32 = 3.0;

/// Steps in one lap of the weaving pattern
const LAP_STEPS: u64 = 360;
/// Repeating driver inputs: (step within lap, action, pressed)
const LAP: &[(u64, &str, bool)] = &[
    (0, "accelerate", true),
    (90, "left", true),
    (135, "handbrake", true),
    (180, "handbrake", false),
    (180, "left", false),
    (270, "right", true),
    (359, "right", false),
];
/// One-off presses: (absolute step, action)
const CUES: &[(u64, &str)] = &[
    (600, "switch-camera"),
    (1200, "switch-vehicle"),
    (1500, "reset"),
    (2400, "switch-vehicle"),
];

/// Keyboard stand-in: replays `LAP` and `CUES` by step number
struct ScriptedDriver {
    lap: Vec<(u64, Action, bool)>,
    cues: Vec<(u64, Action)>,
}

impl ScriptedDriver {
    fn parse() -> wrap_drift::Result<Self> {
        let action = |name: &str| {
            Action::from_str(name)
                .ok_or_else(|| SimError::InvalidSettings(format!("unknown action '{}'", name)))
        };
        let lap = LAP
            .iter()
            .map(|&(at, name, pressed)| Ok((at, action(name)?, pressed)))
            .collect::<wrap_drift::Result<_>>()?;
        let cues = CUES
            .iter()
            .map(|&(at, name)| Ok((at, action(name)?)))
            .collect::<wrap_drift::Result<_>>()?;
        Ok(Self { lap, cues })
    }

    fn apply(&self, step: u64, input: &mut TickInput) {
        let lap_step = step % LAP_STEPS;
        for &(at, action, pressed) in &self.lap {
            if at == lap_step {
                let edge = if pressed { "down" } else { "up" };
                log::debug!("Step {}: {} {}", step, action.as_str(), edge);
                input.set(action, pressed);
            }
        }
        for &(at, action) in &self.cues {
            if at == step {
                log::debug!("Step {}: {}", step, action.as_str());
                input.set(action, true);
            }
        }
    }
}

/// HUD stand-in that writes to the log
#[derive(Default)]
struct LogSink {
    last_speed: f32,
}

impl UiSink for LogSink {
    fn score_changed(&mut self, score: u32) {
        log::info!("Score: {}", score);
    }

    fn time_changed(&mut self, secs_left: u32) {
        log::info!("Time: {}s (speed {:.0} km/h)", secs_left, self.last_speed);
    }

    fn speed_changed(&mut self, readout: f32) {
        self.last_speed = readout;
    }

    fn session_ended(&mut self, final_score: u32, high_score: u32) {
        log::info!("GAME OVER - score {}, best {}", final_score, high_score);
    }

    fn vehicle_switched(&mut self, index: usize, name: &str) {
        log::info!("Vehicle #{}: {}", index, name);
    }

    fn camera_changed(&mut self, mode: CameraMode) {
        log::info!("Camera: {:?}", mode);
    }
}

fn run() -> wrap_drift::Result<()> {
    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(rand::random);
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let driver = ScriptedDriver::parse()?;

    let mut store = JsonFileHighScore::new(HIGH_SCORE_FILE);
    log::info!("High score file: {}", store.path().display());
    let mut physics = RapierPhysics::new();
    let mut state = GameState::new(seed, settings, &mut physics, store.load())?;
    for (i, p) in state.registry.iter().enumerate() {
        log::info!(
            "Fleet #{}: {} (top speed {} m/s, grip {}, {} kg)",
            i,
            p.name,
            p.max_speed,
            p.grip,
            p.mass
        );
    }

    let mut sink = LogSink::default();
    let mut clock = FixedStep::default();
    let mut input = TickInput::default();
    let mut step: u64 = 0;
    let mut prev_position = state.vehicle.visual.position;
    let mut camera_target = prev_position;
    let mut coast_left = COAST_SECS;

    while coast_left > 0.0 {
        for _ in 0..clock.advance(DISPLAY_DT) {
            driver.apply(step, &mut input);
            prev_position = state.vehicle.visual.position;
            tick(&mut state, &mut physics, &input, SIM_DT);
            input.clear_one_shots();
            step += 1;
        }
        advance_timer(&mut state, &mut store, DISPLAY_DT);

        // Render between the last two steps; a wrap teleport snaps instead
        let current = state.vehicle.visual.position;
        camera_target = if prev_position.distance(current) < state.bounds.limit {
            prev_position.lerp(current, clock.alpha())
        } else {
            current
        };

        for event in state.drain_events() {
            event.dispatch(&mut sink);
        }
        if !state.session.is_active() {
            coast_left -= DISPLAY_DT;
        }
    }

    let Vec3 { x, z, .. } = camera_target;
    log::info!(
        "Finished after {} steps, camera on ({:.1}, {:.1}), {} collectibles left",
        state.time_ticks,
        x,
        z,
        state.collectibles.len()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Wrap Drift (headless) starting...");
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_names_parse() {
        let driver = ScriptedDriver::parse().unwrap();
        assert_eq!(driver.lap.len(), LAP.len());
        assert_eq!(driver.cues.len(), CUES.len());
    }

    #[test]
    fn test_driver_holds_and_releases_over_a_lap() {
        let driver = ScriptedDriver::parse().unwrap();
        let mut input = TickInput::default();
        for step in 0..=140 {
            driver.apply(step, &mut input);
        }
        assert!(input.accelerate && input.steer_left && input.drift);
        for step in 141..=180 {
            driver.apply(step, &mut input);
        }
        assert!(input.accelerate);
        assert!(!input.steer_left && !input.drift);
    }

    #[test]
    fn test_cue_fires_for_one_tick() {
        let driver = ScriptedDriver::parse().unwrap();
        let mut input = TickInput::default();
        driver.apply(1200, &mut input);
        assert!(input.switch_vehicle);
        input.clear_one_shots();
        driver.apply(1201, &mut input);
        assert!(!input.switch_vehicle);
    }
}
