//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - Randomness comes only from the seeded RNG in `GameState`
//! - Entities are processed in spawn order
//! - Time enters only through the `dt` passed to `tick`

pub mod geom;
pub mod spawn;
pub mod state;
pub mod tick;

pub use geom::{circle_square_overlap, clamp, square_overlap};
pub use spawn::{difficulty, spawn_entity, spawn_interval};
pub use state::{Color, EdgeTracker, Entity, EntityKind, GameEvent, GamePhase, GameState, Player};
pub use tick::{TickInput, TickOutcome, tick};
