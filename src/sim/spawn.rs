//! Difficulty-driven entity spawning
//!
//! Entities appear just outside a random screen edge, aimed at the player.
//! Difficulty grows with time and score and shifts the odds toward hazards,
//! bigger threats and faster spawns.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::geom::clamp;
use super::state::{Color, Entity, EntityKind, GameState};
use crate::consts::*;

/// Difficulty scalar from elapsed seconds and score
#[inline]
pub fn difficulty(elapsed: f32, score: u64) -> f32 {
    0.12 * elapsed + 0.8 * score as f32
}

/// Seconds between spawns
pub fn spawn_interval(d: f32) -> f32 {
    clamp(0.85 - 0.0035 * d, 0.25, 0.85)
}

pub fn hazard_chance(d: f32) -> f32 {
    clamp(0.06 + 0.0009 * d, 0.06, 0.22)
}

pub fn boost_chance(d: f32) -> f32 {
    clamp(0.06 - 0.00025 * d, 0.02, 0.06)
}

/// Chance that a drawn square is smaller than the player
pub fn edible_chance(d: f32) -> f32 {
    clamp(0.78 - 0.0007 * d, 0.45, 0.78)
}

/// Upper bound of the threat-square size multiplier
pub fn threat_max_scale(d: f32) -> f32 {
    clamp(1.35 + 0.0006 * d, 1.35, 2.10)
}

/// Per-axis heading noise
pub fn jitter_amount(d: f32) -> f32 {
    clamp(0.35 - 0.0002 * d, 0.18, 0.35)
}

#[inline]
fn uniform(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}

/// Point on a random edge, `SPAWN_MARGIN` outside the screen
fn edge_position(rng: &mut Pcg32, screen: Vec2) -> Vec2 {
    match rng.random_range(0..4u32) {
        0 => Vec2::new(rng.random::<f32>() * screen.x, -SPAWN_MARGIN),
        1 => Vec2::new(rng.random::<f32>() * screen.x, screen.y + SPAWN_MARGIN),
        2 => Vec2::new(-SPAWN_MARGIN, rng.random::<f32>() * screen.y),
        _ => Vec2::new(screen.x + SPAWN_MARGIN, rng.random::<f32>() * screen.y),
    }
}

/// Spawn one entity at difficulty `d` and append it to the live set
pub fn spawn_entity(state: &mut GameState, d: f32) -> EntityKind {
    let screen = state.screen_size();
    let pos = edge_position(&mut state.rng, screen);

    let hazard_p = hazard_chance(d);
    let boost_p = boost_chance(d);

    let force_edible = state.spawns_since_edible >= MAX_SPAWNS_WITHOUT_EDIBLE;

    let kind = if force_edible {
        EntityKind::Square
    } else {
        let r: f32 = state.rng.random();
        if r < hazard_p {
            EntityKind::HazardCircle
        } else if r < hazard_p + boost_p {
            EntityKind::BoostCircle
        } else {
            EntityKind::Square
        }
    };

    let p = state.player.size;
    let size = match kind {
        EntityKind::Square => {
            let edible = force_edible || state.rng.random::<f32>() < edible_chance(d);
            if edible {
                state.spawns_since_edible = 0;
                (p * uniform(&mut state.rng, 0.45, 0.90)).max(MIN_EDIBLE_SIZE)
            } else {
                state.spawns_since_edible += 1;
                p * uniform(&mut state.rng, 1.02, threat_max_scale(d)) + 8.0
            }
        }
        EntityKind::HazardCircle | EntityKind::BoostCircle => {
            state.spawns_since_edible += 1;
            let min = (p * 0.60).max(18.0);
            let max = p * 1.10 + 34.0;
            uniform(&mut state.rng, min, max)
        }
    };

    let to_player = state.player.pos - pos;
    let mut dir = to_player / to_player.length().max(1.0);

    let base = 950.0 + 0.9 * d;
    let mut speed = clamp(
        base / size.sqrt() + uniform(&mut state.rng, -30.0, 30.0),
        SPAWN_SPEED_MIN,
        SPAWN_SPEED_MAX,
    );
    match kind {
        EntityKind::HazardCircle => speed *= HAZARD_SPEED_MULT,
        EntityKind::BoostCircle => speed *= BOOST_SPEED_MULT,
        EntityKind::Square => {}
    }

    let jitter = jitter_amount(d);
    dir.x += uniform(&mut state.rng, -1.0, 1.0) * jitter;
    dir.y += uniform(&mut state.rng, -1.0, 1.0) * jitter;
    dir /= dir.length().max(1.0);

    let color = match kind {
        EntityKind::Square => Color::gray(60 + state.rng.random_range(0..150u8)),
        EntityKind::HazardCircle => state.config.palette.hazard,
        EntityKind::BoostCircle => state.config.palette.boost,
    };

    log::debug!(
        "spawn {:?} size={:.1} speed={:.0} at ({:.0}, {:.0}) d={:.1}",
        kind,
        size,
        speed,
        pos.x,
        pos.y,
        d
    );

    state.entities.push(Entity {
        vel: dir * speed,
        color,
        ..Entity::new(kind, pos, size)
    });

    kind
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use proptest::prelude::*;

    fn state_with_player(seed: u64, size: f32) -> GameState {
        let mut state = GameState::new(GameConfig::default(), seed);
        state.player.size = size;
        state
    }

    /// Smallest possible post-jitter heading magnitude (renormalization only shrinks)
    fn min_heading(jitter: f32) -> f32 {
        1.0 - jitter * std::f32::consts::SQRT_2
    }

    #[test]
    fn test_difficulty_curves() {
        assert_eq!(difficulty(0.0, 0), 0.0);
        assert!((difficulty(10.0, 5) - 5.2).abs() < 1e-5);

        assert_eq!(spawn_interval(0.0), 0.85);
        assert_eq!(spawn_interval(1000.0), 0.25);
        assert_eq!(hazard_chance(0.0), 0.06);
        assert_eq!(hazard_chance(1000.0), 0.22);
        assert_eq!(boost_chance(0.0), 0.06);
        assert_eq!(boost_chance(1000.0), 0.02);
        assert_eq!(edible_chance(0.0), 0.78);
        assert_eq!(edible_chance(1000.0), 0.45);
        assert_eq!(threat_max_scale(2000.0), 2.10);
        assert_eq!(jitter_amount(2000.0), 0.18);
    }

    #[test]
    fn test_forced_edible_is_small_square() {
        let mut state = state_with_player(1, 30.0);
        state.spawns_since_edible = MAX_SPAWNS_WITHOUT_EDIBLE;

        let kind = spawn_entity(&mut state, 0.0);
        assert_eq!(kind, EntityKind::Square);
        assert_eq!(state.entities.len(), 1);
        assert_eq!(state.spawns_since_edible, 0);

        let e = &state.entities[0];
        assert_eq!(e.kind, EntityKind::Square);
        assert!(e.size >= MIN_EDIBLE_SIZE);
        assert!(e.size < state.player.size);

        // Grayscale shade
        assert_eq!(e.color.a, 255);
        assert!(e.color.r == e.color.g && e.color.g == e.color.b);
        assert!((60..=209).contains(&e.color.r));
    }

    #[test]
    fn test_forced_edible_repeatedly_at_zero_difficulty() {
        let mut state = state_with_player(5, 30.0);
        for _ in 0..200 {
            state.spawns_since_edible = MAX_SPAWNS_WITHOUT_EDIBLE;
            spawn_entity(&mut state, 0.0);
            let e = state.entities.last().unwrap();
            assert_eq!(e.kind, EntityKind::Square);
            assert!(e.size < 30.0 && e.size >= MIN_EDIBLE_SIZE);
            assert_eq!(state.spawns_since_edible, 0);
        }
    }

    #[test]
    fn test_edible_floor_for_tiny_player() {
        let mut state = state_with_player(9, 10.0);
        state.spawns_since_edible = MAX_SPAWNS_WITHOUT_EDIBLE;
        spawn_entity(&mut state, 0.0);
        assert_eq!(state.entities[0].size, MIN_EDIBLE_SIZE);
    }

    #[test]
    fn test_circle_kinds_appear_with_palette_colors() {
        let mut state = state_with_player(2, 30.0);
        let palette = state.config.palette.clone();
        let mut seen_hazard = false;
        let mut seen_boost = false;

        for _ in 0..800 {
            state.spawns_since_edible = 0;
            match spawn_entity(&mut state, 0.0) {
                EntityKind::HazardCircle => {
                    seen_hazard = true;
                    assert_eq!(state.entities.last().unwrap().color, palette.hazard);
                }
                EntityKind::BoostCircle => {
                    seen_boost = true;
                    assert_eq!(state.entities.last().unwrap().color, palette.boost);
                }
                EntityKind::Square => {}
            }
        }

        assert!(seen_hazard, "expected at least one hazard circle");
        assert!(seen_boost, "expected at least one boost circle");
    }

    #[test]
    fn test_fairness_counter_forces_edible_within_window() {
        let mut state = state_with_player(3, 30.0);
        let mut run = 0;
        for _ in 0..2000 {
            spawn_entity(&mut state, 500.0);
            let e = state.entities.last().unwrap();
            let edible = e.kind == EntityKind::Square && e.size < state.player.size;
            if edible {
                run = 0;
            } else {
                run += 1;
            }
            assert!(run <= MAX_SPAWNS_WITHOUT_EDIBLE);
            assert_eq!(state.spawns_since_edible, run);
        }
    }

    #[test]
    fn test_threat_square_is_bigger_than_player() {
        const EPS: f32 = 1e-3;
        let mut state = state_with_player(4, 40.0);
        for _ in 0..500 {
            state.spawns_since_edible = 0;
            spawn_entity(&mut state, 0.0);
        }
        for e in state.entities.iter().filter(|e| e.kind == EntityKind::Square) {
            let edible = e.size >= 40.0 * 0.45 - EPS && e.size <= 40.0 * 0.90 + EPS;
            let threat = e.size >= 40.0 * 1.02 + 8.0 - EPS && e.size <= 40.0 * 1.35 + 8.0 + EPS;
            assert!(edible || threat, "unexpected square size {}", e.size);
        }
        for e in state.entities.iter().filter(|e| e.kind.is_circle()) {
            assert!(e.size >= 24.0 - EPS && e.size <= 40.0 * 1.10 + 34.0 + EPS);
        }
    }

    #[test]
    fn test_spawns_outside_screen_heading_inward() {
        let mut state = state_with_player(6, 30.0);
        for _ in 0..100 {
            spawn_entity(&mut state, 0.0);
        }
        for e in &state.entities {
            let on_vertical_edge = e.pos.x == -SPAWN_MARGIN || e.pos.x == 800.0 + SPAWN_MARGIN;
            let on_horizontal_edge = e.pos.y == -SPAWN_MARGIN || e.pos.y == 600.0 + SPAWN_MARGIN;
            assert!(on_vertical_edge || on_horizontal_edge);
            // Jitter never outweighs the aim
            assert!(e.vel.dot(state.player.pos - e.pos) > 0.0);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = state_with_player(77, 30.0);
        let mut b = state_with_player(77, 30.0);
        for i in 0..50 {
            spawn_entity(&mut a, i as f32 * 10.0);
            spawn_entity(&mut b, i as f32 * 10.0);
        }
        assert_eq!(a.entities, b.entities);
        assert_eq!(a.spawns_since_edible, b.spawns_since_edible);
    }

    proptest! {
        #[test]
        fn spawn_speed_is_bounded(seed in any::<u64>(), d in 0.0f32..3000.0, size in 10.0f32..400.0) {
            let mut state = state_with_player(seed, size);
            let kind = spawn_entity(&mut state, d);
            let speed = state.entities[0].vel.length();

            let mult = match kind {
                EntityKind::HazardCircle => HAZARD_SPEED_MULT,
                EntityKind::BoostCircle => BOOST_SPEED_MULT,
                EntityKind::Square => 1.0,
            };
            let lo = SPAWN_SPEED_MIN * mult * min_heading(jitter_amount(d));
            let hi = SPAWN_SPEED_MAX * mult;
            prop_assert!(speed > 0.0);
            prop_assert!(speed >= lo - 1e-3, "speed {} below {}", speed, lo);
            prop_assert!(speed <= hi + 1e-3, "speed {} above {}", speed, hi);
        }
    }
}
