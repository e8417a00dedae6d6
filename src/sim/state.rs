//! Game state and core simulation types
//!
//! One `GameState` per session. It owns the player, every live entity and the
//! seeded RNG the spawner draws from.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::*;

/// RGBA color, presentation only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }
}

/// Entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Eaten when smaller than the player, fatal when larger
    Square,
    /// Touching one ends the run
    HazardCircle,
    /// Grants temporary invincibility when touched
    BoostCircle,
}

impl EntityKind {
    pub fn is_circle(self) -> bool {
        matches!(self, EntityKind::HazardCircle | EntityKind::BoostCircle)
    }
}

/// A moving entity. `size` is the side length for squares, the diameter for circles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: f32,
    pub vel: Vec2,
    pub color: Color,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: Vec2, size: f32) -> Self {
        Self {
            kind,
            pos,
            size,
            vel: Vec2::ZERO,
            color: Color::BLACK,
        }
    }

    /// Integrate position by velocity
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}

/// The cursor-locked player square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Side length. Only grows within a run.
    pub size: f32,
    pub color: Color,
}

impl Player {
    fn at(pos: Vec2) -> Self {
        Self {
            pos,
            size: PLAYER_START_SIZE,
            color: Color::BLACK,
        }
    }

    /// Collision footprint: same center, shrunk side
    pub fn hitbox_size(&self) -> f32 {
        self.size * HITBOX_SCALE
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Paused,
    /// Run ended; only restart is processed
    GameOver,
}

/// Things that happened during the last tick (for host feedback only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SquareEaten { size: f32, score: u64 },
    BoostConsumed,
    DashStarted,
    GameOver { score: u64 },
    Restarted,
}

/// Previous-tick input levels, used to derive rising edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeTracker {
    pub button: bool,
    pub pause: bool,
    pub quit: bool,
}

impl EdgeTracker {
    /// Store `down` in `prev` and report a rising edge
    #[inline]
    pub fn rising(prev: &mut bool, down: bool) -> bool {
        let edge = down && !*prev;
        *prev = down;
        edge
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,

    pub player: Player,
    /// Cosmetic rotation of the player square, wrapped to [0, 2π)
    pub angle: f32,
    pub score: u64,
    pub phase: GamePhase,
    /// Live entities in spawn order
    pub entities: Vec<Entity>,

    pub spawn_timer: f32,
    /// Seconds of unpaused play since the last reset
    pub elapsed: f32,
    /// Spawns since the last edible square appeared or was eaten
    pub spawns_since_edible: u32,

    pub dash_cooldown: f32,
    pub dash_invincible: f32,
    pub boost_invincible: f32,

    pub prev_input: EdgeTracker,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh session with the given seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let center = Vec2::new(config.screen_width / 2.0, config.screen_height / 2.0);
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::at(center),
            angle: 0.0,
            score: 0,
            phase: GamePhase::Playing,
            entities: Vec::new(),
            spawn_timer: 0.0,
            elapsed: 0.0,
            spawns_since_edible: 0,
            dash_cooldown: 0.0,
            dash_invincible: 0.0,
            boost_invincible: 0.0,
            prev_input: EdgeTracker::default(),
            events: Vec::new(),
        }
    }

    /// Reinitialize every gameplay field. Config and the RNG stream carry over.
    pub fn reset(&mut self) {
        let center = self.screen_center();
        self.player = Player::at(center);
        self.angle = 0.0;
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.entities.clear();
        self.spawn_timer = 0.0;
        self.elapsed = 0.0;
        self.spawns_since_edible = 0;
        self.dash_cooldown = 0.0;
        self.dash_invincible = 0.0;
        self.boost_invincible = 0.0;
        self.prev_input = EdgeTracker::default();
        self.events.clear();
    }

    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.config.screen_width, self.config.screen_height)
    }

    pub fn screen_center(&self) -> Vec2 {
        self.screen_size() / 2.0
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Either invincibility window is open
    pub fn is_invincible(&self) -> bool {
        self.boost_invincible > 0.0 || self.dash_invincible > 0.0
    }

    /// Longest remaining invincibility (HUD readout)
    pub fn invincible_left(&self) -> f32 {
        self.boost_invincible.max(self.dash_invincible).max(0.0)
    }

    /// True once the entity has drifted outside the screen plus the cull margin
    pub fn is_outside_active_region(&self, pos: Vec2) -> bool {
        let max = self.screen_size() + Vec2::splat(CULL_MARGIN);
        pos.x < -CULL_MARGIN || pos.x > max.x || pos.y < -CULL_MARGIN || pos.y > max.y
    }
}
