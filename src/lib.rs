//! Heartfall - catch falling hearts in a basket
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, collisions, game state)
//! - `sprite`: Pre-rasterized glyph bitmap cache
//! - `render`: Drawing-surface abstraction and per-frame draw pass
//! - `settings`: Player preferences (quality, effects, accessibility)

pub mod render;
pub mod settings;
pub mod sim;
pub mod sprite;

pub use settings::{QualityPreset, Settings};
pub use sprite::SpriteCache;

/// Game configuration constants
pub mod consts {
    /// Score that ends the run with a win
    pub const TARGET_SCORE: u32 = 14;

    /// Field dimensions before the shell reports the real container size
    pub const DEFAULT_FIELD_WIDTH: f32 = 800.0;
    pub const DEFAULT_FIELD_HEIGHT: f32 = 600.0;

    /// Spawner - one independent Bernoulli trial per tick
    pub const SPAWN_CHANCE: f32 = 0.03;
    /// Fraction of spawns that are catchable hearts (the rest are broken)
    pub const GOOD_SPAWN_CHANCE: f32 = 0.9;
    /// Horizontal inset from the field edges for spawn positions
    pub const SPAWN_INSET: f32 = 30.0;
    /// Items enter above the visible field
    pub const SPAWN_Y: f32 = -50.0;

    /// Item fall speed range (pixels per tick, drawn once at spawn)
    pub const ITEM_MIN_SPEED: f32 = 2.0;
    pub const ITEM_MAX_SPEED: f32 = 5.0;
    /// Item glyph size range - integer sizes keep the sprite cache key
    /// space bounded
    pub const ITEM_MIN_SIZE: u32 = 30;
    pub const ITEM_MAX_SIZE: u32 = 50;

    /// Basket defaults
    pub const PLAYER_WIDTH: f32 = 80.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    /// Basket anchor sits this far above the field bottom
    pub const PLAYER_BOTTOM_OFFSET: f32 = 80.0;
    /// Fraction of the remaining distance covered per tick
    pub const PLAYER_SMOOTHING: f32 = 0.2;

    /// Hit when basket anchor and item center are closer than this
    pub const COLLISION_RADIUS: f32 = 45.0;
    /// Glyphs render around their baseline, not their bounding box center
    pub const COLLISION_Y_OFFSET: f32 = 20.0;

    /// Impact burst defaults
    pub const BURST_COUNT: usize = 8;
    /// Burst velocities are uniform in +/- BURST_SPREAD / 2 per axis
    pub const BURST_SPREAD: f32 = 10.0;
    /// Downward acceleration per tick applied to every particle
    pub const PARTICLE_GRAVITY: f32 = 0.5;
    /// Life lost per tick
    pub const PARTICLE_DECAY: f32 = 0.05;
    /// All particle glyphs are cached at one small size
    pub const PARTICLE_SIZE: u32 = 20;
    /// Default live-particle cap (settings can lower or raise it)
    pub const MAX_PARTICLES: usize = 256;

    /// Confetti burst on win
    pub const CONFETTI_COUNT: usize = 100;
    pub const CONFETTI_SPREAD: f32 = 30.0;
    pub const CONFETTI_LIFE: f32 = 3.0;

    /// Ticks between the win transition and the win panel becoming due
    /// (about 500 ms at display rate, so the confetti burst reads first)
    pub const WIN_PANEL_DELAY_TICKS: u32 = 30;

    /// Catchable heart glyphs, chosen uniformly at spawn
    pub const GOOD_GLYPHS: [&str; 5] = ["❤️", "💖", "💘", "💝", "💓"];
    /// The one obstacle glyph
    pub const BAD_GLYPH: &str = "💔";
    /// Burst glyph for a caught heart
    pub const BURST_GOOD_GLYPH: &str = "❤️";
    /// Confetti glyphs, chosen uniformly per particle
    pub const CONFETTI_GLYPHS: [&str; 4] = ["🎉", "🎊", "✨", "💖"];

    /// Drawn in place of the basket image until it loads
    pub const BASKET_FALLBACK_GLYPH: &str = "🧺";
    pub const BASKET_FALLBACK_SIZE: u32 = 50;
}
