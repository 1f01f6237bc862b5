//! Drawing-surface abstraction and the per-frame draw pass
//!
//! The simulation never draws; this module walks a [`GameState`] and
//! issues the three operations the game needs from a 2D surface. The
//! wasm shell backs it with a canvas context, tests with a recording
//! fake.

use std::rc::Rc;

use crate::consts::*;
use crate::sim::GameState;
use crate::sprite::{Rasterize, SpriteCache};

/// The capabilities required of a drawing surface
pub trait Surface {
    type Bitmap;

    /// Clear the whole field
    fn clear(&mut self);
    /// Set the alpha applied to subsequent draws (0..=1)
    fn set_alpha(&mut self, alpha: f32);
    /// Draw a bitmap centered on (x, y)
    fn draw_bitmap(&mut self, bitmap: &Self::Bitmap, x: f32, y: f32);
}

/// Lifecycle of an externally loaded image asset. `Pending` and `Failed`
/// both render the glyph fallback; neither is an error.
#[derive(Debug, Clone)]
pub enum AssetSlot<B> {
    Pending,
    Ready(B),
    Failed,
}

impl<B> AssetSlot<B> {
    pub fn ready(&self) -> Option<&B> {
        match self {
            AssetSlot::Ready(bitmap) => Some(bitmap),
            AssetSlot::Pending | AssetSlot::Failed => None,
        }
    }
}

/// Draw one frame: basket, falling items, then particles faded by their
/// remaining life.
pub fn draw_frame<R, S>(
    state: &GameState,
    cache: &mut SpriteCache<R>,
    basket: &AssetSlot<Rc<R::Bitmap>>,
    surface: &mut S,
) where
    R: Rasterize,
    S: Surface<Bitmap = R::Bitmap>,
{
    surface.clear();

    let basket_x = state.player.x;
    let basket_y = state.player.y + PLAYER_HEIGHT / 2.0;
    match basket.ready() {
        Some(image) => surface.draw_bitmap(image, basket_x, basket_y),
        None => {
            let glyph = cache.get(BASKET_FALLBACK_GLYPH, BASKET_FALLBACK_SIZE);
            surface.draw_bitmap(&glyph, basket_x, basket_y);
        }
    }

    for item in &state.items {
        let bitmap = cache.get(item.glyph, item.size);
        surface.draw_bitmap(&bitmap, item.pos.x, item.pos.y - COLLISION_Y_OFFSET);
    }

    for particle in &state.particles {
        surface.set_alpha(particle.life.clamp(0.0, 1.0));
        let bitmap = cache.get(particle.glyph, particle.size);
        surface.draw_bitmap(&bitmap, particle.pos.x, particle.pos.y);
    }
    surface.set_alpha(1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FallingItem, ItemKind, Particle};
    use glam::Vec2;

    struct TestRasterizer;

    impl Rasterize for TestRasterizer {
        type Bitmap = String;

        fn rasterize(&mut self, glyph: &str, size: u32) -> String {
            format!("{glyph}@{size}")
        }
    }

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear,
        Alpha(f32),
        Draw(String, f32, f32),
    }

    #[derive(Default)]
    struct RecordingSurface {
        ops: Vec<Op>,
    }

    impl Surface for RecordingSurface {
        type Bitmap = String;

        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }

        fn set_alpha(&mut self, alpha: f32) {
            self.ops.push(Op::Alpha(alpha));
        }

        fn draw_bitmap(&mut self, bitmap: &String, x: f32, y: f32) {
            self.ops.push(Op::Draw(bitmap.clone(), x, y));
        }
    }

    fn state_with_player_at(x: f32, y: f32) -> GameState {
        let mut state = GameState::new(1);
        state.player.x = x;
        state.player.y = y;
        state
    }

    #[test]
    fn test_basket_falls_back_to_glyph_while_pending() {
        let mut cache = SpriteCache::new(TestRasterizer);
        let mut surface = RecordingSurface::default();
        let state = state_with_player_at(200.0, 320.0);

        draw_frame(&state, &mut cache, &AssetSlot::Pending, &mut surface);

        let expected = format!("{BASKET_FALLBACK_GLYPH}@{BASKET_FALLBACK_SIZE}");
        assert!(surface.ops.contains(&Op::Draw(expected, 200.0, 360.0)));
    }

    #[test]
    fn test_basket_falls_back_to_glyph_on_load_error() {
        let mut cache = SpriteCache::new(TestRasterizer);
        let mut surface = RecordingSurface::default();
        let state = state_with_player_at(200.0, 320.0);

        draw_frame(
            &state,
            &mut cache,
            &AssetSlot::<Rc<String>>::Failed,
            &mut surface,
        );

        let expected = format!("{BASKET_FALLBACK_GLYPH}@{BASKET_FALLBACK_SIZE}");
        assert!(surface.ops.contains(&Op::Draw(expected, 200.0, 360.0)));
    }

    #[test]
    fn test_basket_uses_image_when_ready() {
        let mut cache = SpriteCache::new(TestRasterizer);
        let mut surface = RecordingSurface::default();
        let state = state_with_player_at(200.0, 320.0);
        let image = Rc::new("basket-image".to_string());

        draw_frame(&state, &mut cache, &AssetSlot::Ready(image), &mut surface);

        assert!(surface
            .ops
            .contains(&Op::Draw("basket-image".to_string(), 200.0, 360.0)));
        // The fallback glyph was never cached
        assert!(cache.is_empty());
    }

    #[test]
    fn test_items_draw_at_their_visual_center() {
        let mut cache = SpriteCache::new(TestRasterizer);
        let mut surface = RecordingSurface::default();
        let mut state = state_with_player_at(200.0, 320.0);
        state.items.push(FallingItem {
            pos: Vec2::new(120.0, 80.0),
            speed: 3.0,
            kind: ItemKind::Good,
            glyph: GOOD_GLYPHS[1],
            size: 42,
        });

        draw_frame(&state, &mut cache, &AssetSlot::Pending, &mut surface);

        let expected = format!("{}@42", GOOD_GLYPHS[1]);
        assert!(surface.ops.contains(&Op::Draw(expected, 120.0, 60.0)));
    }

    #[test]
    fn test_particle_alpha_tracks_life_and_never_goes_negative() {
        let mut cache = SpriteCache::new(TestRasterizer);
        let mut surface = RecordingSurface::default();
        let mut state = state_with_player_at(200.0, 320.0);
        state.particles.push(Particle {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::ZERO,
            life: 0.4,
            glyph: BURST_GOOD_GLYPH,
            size: PARTICLE_SIZE,
        });
        // Confetti starts above 1.0; must clamp down
        state.particles.push(Particle {
            pos: Vec2::new(20.0, 20.0),
            vel: Vec2::ZERO,
            life: 3.0,
            glyph: CONFETTI_GLYPHS[0],
            size: PARTICLE_SIZE,
        });
        // Can't occur through the tick path, but the clamp still holds
        state.particles.push(Particle {
            pos: Vec2::new(30.0, 30.0),
            vel: Vec2::ZERO,
            life: -0.2,
            glyph: CONFETTI_GLYPHS[1],
            size: PARTICLE_SIZE,
        });

        draw_frame(&state, &mut cache, &AssetSlot::Pending, &mut surface);

        let alphas: Vec<f32> = surface
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Alpha(a) => Some(*a),
                _ => None,
            })
            .collect();
        assert_eq!(alphas, vec![0.4, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_frame_starts_with_clear_and_ends_opaque() {
        let mut cache = SpriteCache::new(TestRasterizer);
        let mut surface = RecordingSurface::default();
        let state = state_with_player_at(200.0, 320.0);

        draw_frame(&state, &mut cache, &AssetSlot::Pending, &mut surface);

        assert_eq!(surface.ops.first(), Some(&Op::Clear));
        assert_eq!(surface.ops.last(), Some(&Op::Alpha(1.0)));
    }
}
