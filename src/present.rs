//! Presentation boundary
//!
//! The game never touches a window, GPU or font. A host back end implements
//! `InputSource` (polled once per frame) and `Canvas` (fire-and-forget draw
//! requests); `draw_frame` turns a `GameState` into those requests.

use glam::Vec2;

use crate::sim::{Color, GameState, TickInput};

/// Keys the game reacts to. Hosts map physical keys onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Pause,
    Quit,
    Restart,
}

/// Pull-based input, sampled once per frame
pub trait InputSource {
    fn pointer_position(&self) -> Vec2;
    /// Primary button level
    fn is_button_down(&self) -> bool;
    fn is_key_down(&self, key: Key) -> bool;
}

/// Axis-aligned rectangle, top-left anchored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }
}

/// Draw back end. Positions are centers unless noted.
pub trait Canvas {
    /// Square centered at `pos`, rotated by `angle` radians
    fn draw_square(&mut self, pos: Vec2, size: f32, angle: f32, color: Color);
    fn draw_circle(&mut self, pos: Vec2, radius: f32, color: Color);
    fn draw_ring(&mut self, pos: Vec2, radius: f32, thickness: f32, color: Color);
    /// `pos` is the baseline origin of the first line; `\n` starts a new line
    fn draw_text(&mut self, pos: Vec2, text: &str, color: Color);
    fn draw_panel(&mut self, rect: Rect, color: Color);
}

impl TickInput {
    /// Poll an input source into a tick input
    pub fn sample(source: &impl InputSource) -> Self {
        Self {
            pointer: source.pointer_position(),
            button_down: source.is_button_down(),
            pause_down: source.is_key_down(Key::Pause),
            quit_down: source.is_key_down(Key::Quit),
            restart_down: source.is_key_down(Key::Restart),
        }
    }
}

// HUD layout in fixed character cells
const CHAR_WIDTH: f32 = 7.0;
const LINE_HEIGHT: f32 = 13.0;
const HUD_PAD: f32 = 10.0;
const HUD_ORIGIN: Vec2 = Vec2::new(12.0, 12.0);

const HUD_TEXT: Color = Color::rgb(20, 20, 20);
const HUD_SHADOW: Color = Color::rgba(0, 0, 0, 90);
const HUD_PANEL: Color = Color::rgba(255, 255, 255, 220);
const HUD_BORDER: Color = Color::rgba(0, 0, 0, 70);
const BOOST_RING: Color = Color::rgba(40, 180, 80, 220);
const DASH_RING: Color = Color::rgba(120, 120, 120, 200);
const PAUSE_SHADE: Color = Color::rgba(0, 0, 0, 70);

/// HUD body: score, invincibility readout and the circle legend
pub fn hud_text(state: &GameState) -> String {
    let palette = &state.config.palette;
    format!(
        "Squares eaten: {}\nInvincible: {:.1}s\n\n{} circle: invincibility\n{} circle: instant death",
        state.score,
        state.invincible_left(),
        palette.boost_label,
        palette.hazard_label,
    )
}

/// Panel size for `text` laid out in fixed character cells
pub fn text_block_size(text: &str) -> Vec2 {
    let lines = text.split('\n');
    let (count, widest) = lines.fold((0usize, 0usize), |(n, w), line| {
        (n + 1, w.max(line.chars().count()))
    });
    Vec2::new(
        HUD_PAD * 2.0 + widest as f32 * CHAR_WIDTH,
        HUD_PAD * 2.0 + count as f32 * LINE_HEIGHT,
    )
}

/// Issue every draw request for one frame
pub fn draw_frame(state: &GameState, canvas: &mut impl Canvas) {
    for e in &state.entities {
        if e.kind.is_circle() {
            canvas.draw_circle(e.pos, e.size / 2.0, e.color);
        } else {
            canvas.draw_square(e.pos, e.size, 0.0, e.color);
        }
    }

    let player = &state.player;
    if state.boost_invincible > 0.0 {
        canvas.draw_ring(player.pos, player.size * 0.80, 4.0, BOOST_RING);
    } else if state.dash_invincible > 0.0 {
        canvas.draw_ring(player.pos, player.size * 0.75, 3.0, DASH_RING);
    }
    canvas.draw_square(player.pos, player.size, state.angle, player.color);

    draw_hud(state, canvas);

    let center = state.screen_center();
    if state.is_game_over() {
        canvas.draw_text(
            center + Vec2::new(-90.0, 0.0),
            "GAME OVER\nPress R to restart",
            HUD_TEXT,
        );
    } else if state.is_paused() {
        canvas.draw_panel(
            Rect {
                min: Vec2::ZERO,
                size: state.screen_size(),
            },
            PAUSE_SHADE,
        );
        canvas.draw_text(
            center + Vec2::new(-21.0, -8.0),
            "PAUSED",
            Color::rgba(255, 255, 255, 230),
        );
        canvas.draw_text(
            center + Vec2::new(-77.0, 12.0),
            "Press P or Esc to resume",
            Color::rgba(255, 255, 255, 220),
        );
    }
}

fn draw_hud(state: &GameState, canvas: &mut impl Canvas) {
    let text = hud_text(state);
    let size = text_block_size(&text);
    canvas.draw_panel(
        Rect {
            min: HUD_ORIGIN,
            size,
        },
        HUD_PANEL,
    );
    draw_outline(canvas, HUD_ORIGIN, size, HUD_BORDER);

    let baseline = HUD_ORIGIN + Vec2::new(HUD_PAD, HUD_PAD + LINE_HEIGHT);
    canvas.draw_text(baseline + Vec2::ONE, &text, HUD_SHADOW);
    canvas.draw_text(baseline, &text, HUD_TEXT);
}

/// 1-px frame drawn as four strips inside the rectangle
fn draw_outline(canvas: &mut impl Canvas, min: Vec2, size: Vec2, color: Color) {
    canvas.draw_panel(Rect::new(min.x, min.y, size.x, 1.0), color);
    canvas.draw_panel(Rect::new(min.x, min.y + size.y - 1.0, size.x, 1.0), color);
    canvas.draw_panel(Rect::new(min.x, min.y, 1.0, size.y), color);
    canvas.draw_panel(Rect::new(min.x + size.x - 1.0, min.y, 1.0, size.y), color);
}
