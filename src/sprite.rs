//! Pre-rasterized glyph bitmaps
//!
//! Drawing an emoji glyph through the text pipeline every frame is the
//! slow path; each (glyph, size) pair is rendered once into a reusable
//! bitmap instead. The key space is bounded because spawnable sizes are
//! integers from a fixed range, so the cache only ever grows and nothing
//! is evicted.

use std::collections::HashMap;
use std::rc::Rc;

/// Square padding added around a glyph when it is rasterized, so wide
/// emoji don't clip at the bitmap edge
pub const GLYPH_PADDING: u32 = 10;

/// Cache key: the glyph and its integer pixel size
pub type SpriteKey = (&'static str, u32);

/// Renders one glyph at one size into a backend bitmap. Rasterization
/// has no failure path; a blank bitmap is an acceptable worst case.
pub trait Rasterize {
    type Bitmap;

    fn rasterize(&mut self, glyph: &str, size: u32) -> Self::Bitmap;
}

/// Append-only map from [`SpriteKey`] to a shared bitmap
pub struct SpriteCache<R: Rasterize> {
    rasterizer: R,
    entries: HashMap<SpriteKey, Rc<R::Bitmap>>,
}

impl<R: Rasterize> SpriteCache<R> {
    pub fn new(rasterizer: R) -> Self {
        Self {
            rasterizer,
            entries: HashMap::new(),
        }
    }

    /// Fetch the bitmap for a (glyph, size) pair, rasterizing on first
    /// use. Repeat calls return the same shared bitmap, never a fresh
    /// render.
    pub fn get(&mut self, glyph: &'static str, size: u32) -> Rc<R::Bitmap> {
        let Self {
            rasterizer,
            entries,
        } = self;
        entries
            .entry((glyph, size))
            .or_insert_with(|| Rc::new(rasterizer.rasterize(glyph, size)))
            .clone()
    }

    /// Render a glyph set across a size range up front so the first
    /// gameplay frame doesn't stall on rasterization.
    pub fn warm(&mut self, glyphs: &[&'static str], sizes: std::ops::RangeInclusive<u32>) {
        for &glyph in glyphs {
            for size in sizes.clone() {
                self.get(glyph, size);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
