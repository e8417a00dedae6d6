//! Host frame driver
//!
//! Wraps a `GameState` for a host loop: turns wall-clock timestamps into
//! clamped deltas, polls input, ticks, and keeps a small tally of finished runs.

use crate::config::GameConfig;
use crate::consts::MAX_FRAME_DT;
use crate::present::{Canvas, InputSource, draw_frame};
use crate::sim::{GameEvent, GameState, TickInput, TickOutcome, tick};

/// One play session (many runs, separated by restarts)
pub struct Session {
    state: GameState,
    last_time: Option<f64>,
    runs_finished: u32,
    best_score: u64,
}

impl Session {
    /// Seed from the config, or from the clock when it has none
    pub fn new(config: GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(clock_seed);
        Self::with_seed(config, seed)
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        log::info!(
            "Session started: {}x{} seed={}",
            config.screen_width,
            config.screen_height,
            seed
        );
        Self {
            state: GameState::new(config, seed),
            last_time: None,
            runs_finished: 0,
            best_score: 0,
        }
    }

    /// Advance one frame. `now` is a monotonic timestamp in seconds.
    pub fn frame(&mut self, now: f64, source: &impl InputSource) -> TickOutcome {
        let dt = match self.last_time {
            Some(last) => ((now - last) as f32).clamp(0.0, MAX_FRAME_DT),
            None => 0.0,
        };
        self.last_time = Some(now);

        let input = TickInput::sample(source);
        let outcome = tick(&mut self.state, &input, dt);

        for event in &self.state.events {
            match event {
                GameEvent::GameOver { score } => {
                    self.runs_finished += 1;
                    self.best_score = self.best_score.max(*score);
                }
                GameEvent::SquareEaten { size, score } => {
                    log::trace!("Ate square of size {:.1} (score {})", size, score);
                }
                GameEvent::BoostConsumed | GameEvent::DashStarted | GameEvent::Restarted => {}
            }
        }

        outcome
    }

    pub fn render(&self, canvas: &mut impl Canvas) {
        draw_frame(&self.state, canvas);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn runs_finished(&self) -> u32 {
        self.runs_finished
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }
}

fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::Key;
    use crate::sim::{Entity, EntityKind};
    use glam::Vec2;

    #[derive(Default)]
    struct Scripted {
        pointer: Vec2,
        pause: bool,
        quit: bool,
        restart: bool,
    }

    impl InputSource for Scripted {
        fn pointer_position(&self) -> Vec2 {
            self.pointer
        }
        fn is_button_down(&self) -> bool {
            false
        }
        fn is_key_down(&self, key: Key) -> bool {
            match key {
                Key::Quit => self.quit,
                Key::Restart => self.restart,
                Key::Pause => self.pause,
            }
        }
    }

    fn session() -> Session {
        Session::with_seed(GameConfig::default(), 11)
    }

    #[test]
    fn test_first_frame_has_zero_dt() {
        let mut s = session();
        s.frame(100.0, &Scripted::default());
        assert_eq!(s.state().elapsed, 0.0);

        s.frame(100.02, &Scripted::default());
        assert!((s.state().elapsed - 0.02).abs() < 1e-4);
    }

    #[test]
    fn test_frame_hitch_is_clamped() {
        let mut s = session();
        s.frame(0.0, &Scripted::default());
        s.frame(3.0, &Scripted::default());
        assert!((s.state().elapsed - MAX_FRAME_DT).abs() < 1e-6);

        // Clock going backwards never rewinds the game
        s.frame(1.0, &Scripted::default());
        assert!((s.state().elapsed - MAX_FRAME_DT).abs() < 1e-6);
    }

    #[test]
    fn test_resume_after_long_pause_has_no_dt_spike() {
        let mut s = session();
        let idle = Scripted::default();
        let pause = Scripted {
            pause: true,
            ..Default::default()
        };

        s.frame(0.0, &idle);
        s.frame(0.02, &idle);
        let before = s.state().elapsed;

        s.frame(0.04, &pause);
        assert!(s.state().is_paused());
        s.frame(5.0, &idle);
        s.frame(10.0, &idle);
        assert_eq!(s.state().elapsed, before);

        // Resume press, then one ordinary frame
        s.frame(10.01, &pause);
        assert!(!s.state().is_paused());
        assert_eq!(s.state().elapsed, before);
        s.frame(10.02, &idle);
        assert!((s.state().elapsed - before - 0.01).abs() < 1e-4);
    }

    #[test]
    fn test_quit_outcome() {
        let mut s = session();
        let quit = Scripted {
            quit: true,
            ..Default::default()
        };
        assert_eq!(s.frame(0.0, &quit), TickOutcome::Quit);
    }

    #[test]
    fn test_config_seed_is_used() {
        let config = GameConfig {
            seed: Some(1234),
            ..GameConfig::default()
        };
        let s = Session::new(config);
        assert_eq!(s.state().seed, 1234);
    }

    #[test]
    fn test_runs_and_best_score() {
        let mut s = session();
        let input = Scripted {
            pointer: Vec2::new(400.0, 300.0),
            ..Default::default()
        };
        s.frame(0.0, &input);

        s.state.score = 7;
        let center = s.state().screen_center();
        s.state
            .entities
            .push(Entity::new(EntityKind::HazardCircle, center, 40.0));
        s.frame(0.016, &input);
        assert!(s.state().is_game_over());
        assert_eq!(s.runs_finished(), 1);
        assert_eq!(s.best_score(), 7);

        let restart = Scripted {
            restart: true,
            ..input
        };
        s.frame(0.032, &restart);
        assert_eq!(s.state().score, 0);
        assert_eq!(s.best_score(), 7);
    }
}
