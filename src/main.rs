//! Squares native entry point
//!
//! There is no windowing back end in this crate, so the native binary runs a
//! headless session: a scripted pointer plays at a simulated 60 Hz while a
//! counting canvas stands in for the renderer.
//!
//! Usage: `squares [config.json | compact | wide]`

use std::error::Error;

use glam::Vec2;

use squares::present::{Canvas, InputSource, Key, Rect};
use squares::sim::{Color, TickOutcome};
use squares::{GameConfig, Session};

const FRAME_SECS: f64 = 1.0 / 60.0;
const RUN_SECS: f64 = 120.0;

/// Pointer sweeps a Lissajous path; clicks once a second; restarts after a
/// short beat on game over; presses quit when time is up.
struct Autopilot {
    t: f64,
    screen: Vec2,
    game_over_since: Option<f64>,
}

impl Autopilot {
    fn new(screen: Vec2) -> Self {
        Self {
            t: 0.0,
            screen,
            game_over_since: None,
        }
    }

    fn advance(&mut self, t: f64, game_over: bool) {
        self.t = t;
        self.game_over_since = match (game_over, self.game_over_since) {
            (true, None) => Some(t),
            (true, since) => since,
            (false, _) => None,
        };
    }
}

impl InputSource for Autopilot {
    fn pointer_position(&self) -> Vec2 {
        let t = self.t as f32;
        let half = self.screen / 2.0;
        half + Vec2::new((t * 0.7).sin(), (t * 1.1).cos()) * half * 0.8
    }

    fn is_button_down(&self) -> bool {
        self.t.fract() < 0.05
    }

    fn is_key_down(&self, key: Key) -> bool {
        match key {
            Key::Pause => false,
            Key::Quit => self.t >= RUN_SECS,
            Key::Restart => self.game_over_since.is_some_and(|since| self.t - since > 1.0),
        }
    }
}

/// Counts draw requests instead of rasterizing them
#[derive(Default)]
struct TraceCanvas {
    shapes: u64,
    texts: u64,
    panels: u64,
}

impl Canvas for TraceCanvas {
    fn draw_square(&mut self, _pos: Vec2, _size: f32, _angle: f32, _color: Color) {
        self.shapes += 1;
    }

    fn draw_circle(&mut self, _pos: Vec2, _radius: f32, _color: Color) {
        self.shapes += 1;
    }

    fn draw_ring(&mut self, _pos: Vec2, _radius: f32, _thickness: f32, _color: Color) {
        self.shapes += 1;
    }

    fn draw_text(&mut self, _pos: Vec2, _text: &str, _color: Color) {
        self.texts += 1;
    }

    fn draw_panel(&mut self, _rect: Rect, _color: Color) {
        self.panels += 1;
    }
}

fn load_config(arg: Option<String>) -> Result<GameConfig, Box<dyn Error>> {
    let Some(arg) = arg else {
        return Ok(GameConfig::default());
    };
    if let Some(preset) = GameConfig::preset(&arg) {
        log::info!("Using preset `{}`", arg);
        return Ok(preset);
    }
    Ok(GameConfig::load(&arg)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    log::info!("Squares (headless) starting...");

    let config = load_config(std::env::args().nth(1))?;
    let screen = Vec2::new(config.screen_width, config.screen_height);

    let mut session = Session::new(config);
    let mut pilot = Autopilot::new(screen);
    let mut canvas = TraceCanvas::default();

    let mut frame = 0u64;
    loop {
        let now = frame as f64 * FRAME_SECS;
        pilot.advance(now, session.state().is_game_over());

        if session.frame(now, &pilot) == TickOutcome::Quit {
            break;
        }
        session.render(&mut canvas);
        frame += 1;
    }

    let state = session.state();
    log::info!(
        "Stopped after {} frames: {} runs finished, best score {}, current score {} ({} live entities)",
        frame,
        session.runs_finished(),
        session.best_score().max(state.score),
        state.score,
        state.entities.len()
    );
    log::info!(
        "Draw requests: {} shapes, {} texts, {} panels",
        canvas.shapes,
        canvas.texts,
        canvas.panels
    );
    Ok(())
}
