//! Squares - a cursor-driven arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, spawning, collisions, game state)
//! - `config`: Screen bounds, variant rules and hardening caps
//! - `present`: Abstract draw/input boundary and HUD composition
//! - `session`: Host frame driver (wall-clock delta, event logging)

pub mod config;
pub mod present;
pub mod session;
pub mod sim;

pub use config::{ConfigError, GameConfig, Palette};
pub use session::Session;

/// Game tuning constants
pub mod consts {
    /// Largest physics advance allowed in one tick (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Player starting side length
    pub const PLAYER_START_SIZE: f32 = 22.0;
    /// Player hitbox is shrunk by this factor (forgiving collisions)
    pub const HITBOX_SCALE: f32 = 0.90;
    /// Cosmetic rotation speed of the player square (radians/s)
    pub const PLAYER_ROTATION_RATE: f32 = 6.0;

    /// Click dash: cooldown between dashes and the invincibility burst it grants
    pub const DASH_COOLDOWN: f32 = 0.90;
    pub const DASH_INVINCIBLE_DURATION: f32 = 0.25;

    /// Growth per eaten square: `GROWTH_SCALE * eaten.size + GROWTH_FLAT`
    pub const GROWTH_SCALE: f32 = 0.05;
    pub const GROWTH_FLAT: f32 = 0.8;

    /// Spawns allowed without an edible square before one is forced
    pub const MAX_SPAWNS_WITHOUT_EDIBLE: u32 = 6;
    /// Distance outside the screen at which entities appear
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Entities further than this outside the screen are culled
    pub const CULL_MARGIN: f32 = 160.0;
    /// Smallest edible square
    pub const MIN_EDIBLE_SIZE: f32 = 10.0;

    /// Spawn speed clamp before per-kind multipliers
    pub const SPAWN_SPEED_MIN: f32 = 75.0;
    pub const SPAWN_SPEED_MAX: f32 = 340.0;
    pub const HAZARD_SPEED_MULT: f32 = 1.10;
    pub const BOOST_SPEED_MULT: f32 = 0.92;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}
