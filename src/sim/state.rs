//! Game state and core simulation types
//!
//! Everything a run mutates lives on [`GameState`] so a replay is a plain
//! field reset, never a hunt for stray globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Nothing updates; the start panel is shown
    Idle,
    /// Main loop active: spawner, physics, collisions, particles
    Running,
    /// Run complete; only the confetti particles keep advancing
    Won,
}

/// Falling item category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Good,
    Bad,
}

/// A falling heart (or broken heart)
#[derive(Debug, Clone)]
pub struct FallingItem {
    pub pos: Vec2,
    /// Vertical speed in pixels per tick, drawn once at spawn
    pub speed: f32,
    pub kind: ItemKind,
    pub glyph: &'static str,
    /// Integer glyph size - doubles as the sprite cache key
    pub size: u32,
}

/// A short-lived visual particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life; rendered alpha is `life.clamp(0, 1)`
    pub life: f32,
    pub glyph: &'static str,
    pub size: u32,
}

/// Visible play area; positions are relative to the current dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSize {
    pub width: f32,
    pub height: f32,
}

/// The player's basket
#[derive(Debug, Clone, Copy)]
pub struct Player {
    /// Horizontal anchor, smoothed toward the latest pointer position
    pub x: f32,
    /// Vertical anchor, re-derived from the field height every tick
    pub y: f32,
}

impl Player {
    pub fn new(field: &FieldSize) -> Self {
        Self {
            x: field.width / 2.0,
            y: field.height - PLAYER_BOTTOM_OFFSET,
        }
    }

    /// Move toward the target by a fixed fraction of the remaining
    /// distance, then clamp to the field. Re-anchors `y` so the basket
    /// tracks field resizes without a dedicated resize path.
    pub fn update(&mut self, target_x: Option<f32>, field: &FieldSize) {
        if let Some(target) = target_x {
            self.x += (target - self.x) * PLAYER_SMOOTHING;
        }
        let half = PLAYER_WIDTH / 2.0;
        if self.x < half {
            self.x = half;
        }
        if self.x > field.width - half {
            self.x = field.width - half;
        }
        self.y = field.height - PLAYER_BOTTOM_OFFSET;
    }
}

/// Complete game state (deterministic for a given seed + input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    pub field: FieldSize,
    pub player: Player,
    /// Live falling items, oldest first
    pub items: Vec<FallingItem>,
    /// Live particles (bursts during a run, confetti after a win)
    pub particles: Vec<Particle>,
    /// Ticks since the current run started
    pub time_ticks: u64,
    /// Ticks spent in `Won`, drives the win panel delay
    pub won_ticks: u32,
    /// Live-particle cap, pushed in from settings at startup
    pub max_particles: usize,
    /// Cleared by the reduced-motion setting
    pub confetti_enabled: bool,
}

impl GameState {
    /// Create a new idle state with the given seed
    pub fn new(seed: u64) -> Self {
        let field = FieldSize {
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
        };
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            field,
            player: Player::new(&field),
            items: Vec::new(),
            particles: Vec::new(),
            time_ticks: 0,
            won_ticks: 0,
            max_particles: MAX_PARTICLES,
            confetti_enabled: true,
        }
    }

    /// Update the field dimensions (container resize)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.field = FieldSize { width, height };
    }

    /// Reset run-scoped state and enter `Running`. Used for both the
    /// initial start and replay-after-win; the basket keeps its position.
    pub fn begin_run(&mut self) {
        self.score = 0;
        self.items.clear();
        self.particles.clear();
        self.time_ticks = 0;
        self.won_ticks = 0;
        self.phase = GamePhase::Running;
    }

    /// The win panel is due once the confetti burst has had time to read
    pub fn win_panel_due(&self) -> bool {
        self.phase == GamePhase::Won && self.won_ticks >= WIN_PANEL_DELAY_TICKS
    }

    pub(crate) fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Create `count` particles at one impact point with randomized
    /// velocities, subject to the live-particle cap.
    pub fn spawn_burst(&mut self, x: f32, y: f32, glyph: &'static str, count: usize) {
        let budget = count.min(self.max_particles.saturating_sub(self.particles.len()));
        for _ in 0..budget {
            let vx = (self.rng.random::<f32>() - 0.5) * BURST_SPREAD;
            let vy = (self.rng.random::<f32>() - 0.5) * BURST_SPREAD;
            self.particles.push(Particle {
                pos: Vec2::new(x, y),
                vel: Vec2::new(vx, vy),
                life: 1.0,
                glyph,
                size: PARTICLE_SIZE,
            });
        }
    }

    /// Fill the field with celebration particles from its center. Mostly
    /// upward and much wider than an impact burst.
    pub fn spawn_confetti(&mut self) {
        if !self.confetti_enabled {
            return;
        }
        let origin = Vec2::new(self.field.width / 2.0, self.field.height / 2.0);
        let budget = CONFETTI_COUNT.min(self.max_particles.saturating_sub(self.particles.len()));
        for _ in 0..budget {
            let vx = (self.rng.random::<f32>() - 0.5) * CONFETTI_SPREAD;
            let vy = (self.rng.random::<f32>() - 1.0) * CONFETTI_SPREAD;
            let glyph = CONFETTI_GLYPHS[self.rng.random_range(0..CONFETTI_GLYPHS.len())];
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(vx, vy),
                life: CONFETTI_LIFE,
                glyph,
                size: PARTICLE_SIZE,
            });
        }
    }
}
