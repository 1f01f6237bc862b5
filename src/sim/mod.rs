//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display frame, no wall-clock reads
//! - Seeded RNG only
//! - Fixed in-tick update order (player, spawn, items, particles, scoring)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{item_hits_basket, resolve_collisions};
pub use state::{
    FallingItem, FieldSize, GamePhase, GameState, ItemKind, Particle, Player,
};
pub use tick::{GameEvent, TickInput, tick};
