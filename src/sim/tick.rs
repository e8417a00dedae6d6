//! Per-frame simulation tick
//!
//! Advances the game by a wall-clock delta: input edges, timers, player
//! follow, spawning, entity motion and collision resolution, in that order.

use glam::Vec2;

use super::geom::{circle_square_overlap, clamp, square_overlap};
use super::spawn::{difficulty, spawn_entity, spawn_interval};
use super::state::{EdgeTracker, EntityKind, GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::wrap_angle;

/// Input levels sampled once per frame. Edges are derived inside `tick`.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in screen coordinates (clamped by the tick)
    pub pointer: Vec2,
    /// Primary button held
    pub button_down: bool,
    pub pause_down: bool,
    pub quit_down: bool,
    /// Only looked at while the game is over
    pub restart_down: bool,
}

/// What the host should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Quit was pressed; stop calling `tick`
    Quit,
}

/// Advance the game state by `dt` seconds (clamped to `MAX_FRAME_DT`).
/// A non-finite `dt` counts as zero.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> TickOutcome {
    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    };
    state.events.clear();

    if EdgeTracker::rising(&mut state.prev_input.quit, input.quit_down) {
        log::info!("Quit requested (score {})", state.score);
        return TickOutcome::Quit;
    }

    if state.is_game_over() {
        if input.restart_down {
            log::info!("Restarting after score {}", state.score);
            state.reset();
            state.events.push(GameEvent::Restarted);
        }
        return TickOutcome::Continue;
    }

    let pointer = clamp_pointer(state, input.pointer);
    let clicked = EdgeTracker::rising(&mut state.prev_input.button, input.button_down);

    if EdgeTracker::rising(&mut state.prev_input.pause, input.pause_down) {
        state.phase = match state.phase {
            GamePhase::Paused => GamePhase::Playing,
            _ => GamePhase::Paused,
        };
        log::debug!("Phase -> {:?}", state.phase);
        return TickOutcome::Continue;
    }

    if state.is_paused() {
        return TickOutcome::Continue;
    }

    state.elapsed += dt;
    state.dash_cooldown = (state.dash_cooldown - dt).max(0.0);
    state.dash_invincible = (state.dash_invincible - dt).max(0.0);
    state.boost_invincible = (state.boost_invincible - dt).max(0.0);

    // Player is cursor-locked, not integrated
    state.player.pos = pointer;

    if clicked && state.dash_cooldown <= 0.0 {
        state.dash_cooldown = DASH_COOLDOWN;
        state.dash_invincible = DASH_INVINCIBLE_DURATION;
        state.events.push(GameEvent::DashStarted);
        log::debug!("Dash");
    }

    state.angle = wrap_angle(state.angle + PLAYER_ROTATION_RATE * dt);

    run_spawner(state, dt);
    resolve_entities(state, dt);

    TickOutcome::Continue
}

/// Clamp the pointer to the last pixel row/column of the screen
fn clamp_pointer(state: &GameState, pointer: Vec2) -> Vec2 {
    let max = state.screen_size() - Vec2::ONE;
    Vec2::new(
        clamp(pointer.x, 0.0, max.x.max(0.0)),
        clamp(pointer.y, 0.0, max.y.max(0.0)),
    )
}

/// Consume whole spawn intervals from the timer, honoring the config caps
fn run_spawner(state: &mut GameState, dt: f32) {
    let d = difficulty(state.elapsed, state.score);
    let interval = spawn_interval(d);

    state.spawn_timer += dt;
    let mut spawned = 0;
    while state.spawn_timer >= interval {
        if spawned >= state.config.max_spawns_per_tick {
            log::warn!(
                "Spawn backlog of {:.2}s dropped after {} spawns this tick",
                state.spawn_timer,
                spawned
            );
            state.spawn_timer %= interval;
            break;
        }
        state.spawn_timer -= interval;

        if state.entities.len() >= state.config.max_entities {
            log::warn!(
                "Entity cap ({}) reached, skipping spawn",
                state.config.max_entities
            );
            continue;
        }
        spawn_entity(state, d);
        spawned += 1;
    }
}

/// Move every entity, cull the ones that left the active region and resolve
/// contact with the player's hitbox.
fn resolve_entities(state: &mut GameState, dt: f32) {
    let hit_pos = state.player.pos;
    let hit_size = state.player.hitbox_size();
    let invincible = state.is_invincible();
    let hazard_ignores_invincibility = state.config.hazard_ignores_invincibility;

    let entities = std::mem::take(&mut state.entities);
    let mut alive = Vec::with_capacity(entities.len());

    for mut e in entities {
        e.advance(dt);

        if state.is_outside_active_region(e.pos) {
            continue;
        }

        match e.kind {
            EntityKind::Square => {
                if square_overlap(hit_pos, hit_size, e.pos, e.size) {
                    if invincible || state.player.size > e.size {
                        state.score += 1;
                        state.player.size += GROWTH_SCALE * e.size + GROWTH_FLAT;
                        state.spawns_since_edible = 0;
                        state.events.push(GameEvent::SquareEaten {
                            size: e.size,
                            score: state.score,
                        });
                        continue;
                    }
                    end_run(state);
                }
            }
            EntityKind::HazardCircle => {
                if circle_square_overlap(e.pos, e.size, hit_pos, hit_size)
                    && (hazard_ignores_invincibility || !invincible)
                {
                    end_run(state);
                }
            }
            EntityKind::BoostCircle => {
                if circle_square_overlap(e.pos, e.size, hit_pos, hit_size) {
                    state.boost_invincible = state.config.boost_duration;
                    state.dash_invincible = 0.0;
                    state.events.push(GameEvent::BoostConsumed);
                    log::debug!("Boost: invincible for {:.1}s", state.boost_invincible);
                    continue;
                }
            }
        }

        alive.push(e);
    }

    state.entities = alive;
}

fn end_run(state: &mut GameState) {
    if state.phase != GamePhase::GameOver {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!(
            "Game over: score {} after {:.1}s",
            state.score,
            state.elapsed
        );
    }
}
