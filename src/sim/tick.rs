//! Per-frame simulation tick
//!
//! One tick advances the game by exactly one display frame. The in-tick
//! order is fixed: player, spawner, item physics, particle advance, then
//! collision/scoring, so scoring always sees this tick's positions.

use glam::Vec2;
use rand::Rng;

use super::collision::resolve_collisions;
use super::state::{FallingItem, GamePhase, GameState, ItemKind, Particle};
use crate::consts::*;

/// Input commands for a single tick (last value wins, no queueing)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Latest pointer/touch x relative to the field, if any arrived
    pub pointer_x: Option<f32>,
    /// Start command (start panel)
    pub start: bool,
    /// Replay command (win panel)
    pub replay: bool,
}

/// Observable signals produced by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The score mutated; carries the new value
    ScoreChanged(u32),
    /// The target score was reached. Fires once per run.
    Won,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::Idle => {
            if input.start {
                state.begin_run();
                log::info!("run started (seed {})", state.seed);
            }
        }

        GamePhase::Running => {
            state.time_ticks += 1;

            state.player.update(input.pointer_x, &state.field);
            maybe_spawn_item(state);
            for item in &mut state.items {
                item.pos.y += item.speed;
            }
            advance_particles(&mut state.particles);
            resolve_collisions(state, &mut events);
        }

        GamePhase::Won => {
            // Confetti sub-loop: nothing else in the field moves here.
            state.won_ticks += 1;
            advance_particles(&mut state.particles);

            if input.replay {
                state.begin_run();
                log::info!("replay (seed {})", state.seed);
            }
        }
    }

    events
}

/// One independent spawn trial. All randomized attributes are drawn from
/// the state's seeded RNG; the size is an integer so every spawnable item
/// maps onto a bounded set of sprite cache keys.
fn maybe_spawn_item(state: &mut GameState) {
    if state.rng().random::<f32>() >= SPAWN_CHANCE {
        return;
    }

    let width = state.field.width;
    let item = {
        let rng = state.rng();
        let x = rng.random_range(SPAWN_INSET..width - SPAWN_INSET);
        let kind = if rng.random::<f32>() < GOOD_SPAWN_CHANCE {
            ItemKind::Good
        } else {
            ItemKind::Bad
        };
        let glyph = match kind {
            ItemKind::Good => GOOD_GLYPHS[rng.random_range(0..GOOD_GLYPHS.len())],
            ItemKind::Bad => BAD_GLYPH,
        };
        FallingItem {
            pos: Vec2::new(x, SPAWN_Y),
            speed: rng.random_range(ITEM_MIN_SPEED..ITEM_MAX_SPEED),
            kind,
            glyph,
            size: rng.random_range(ITEM_MIN_SIZE..=ITEM_MAX_SIZE),
        }
    };
    state.items.push(item);
}

/// Move, accelerate, and age every particle, dropping the expired ones.
/// `retain` keeps the removal safe while the collection shrinks.
pub(crate) fn advance_particles(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.vel.y += PARTICLE_GRAVITY;
        p.life -= PARTICLE_DECAY;
    }
    particles.retain(|p| p.life > 0.0);
}
