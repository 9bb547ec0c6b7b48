use rayon::prelude::*;
use tilegen_chunk::{Chunk, generate_chunk_at};
use tilegen_world::{ChunkCoord, Generator};

/// Inclusive rectangle of chunk coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkRect {
    pub min: ChunkCoord,
    pub max: ChunkCoord,
}

impl ChunkRect {
    /// Builds a rectangle from any two opposite corners.
    pub fn new(a: ChunkCoord, b: ChunkCoord) -> Self {
        Self {
            min: ChunkCoord::new(a.cx.min(b.cx), a.cy.min(b.cy)),
            max: ChunkCoord::new(a.cx.max(b.cx), a.cy.max(b.cy)),
        }
    }

    #[inline]
    pub fn width(&self) -> u64 {
        (i64::from(self.max.cx) - i64::from(self.min.cx) + 1) as u64
    }

    #[inline]
    pub fn height(&self) -> u64 {
        (i64::from(self.max.cy) - i64::from(self.min.cy) + 1) as u64
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.width() * self.height()
    }

    #[inline]
    pub fn contains(&self, c: ChunkCoord) -> bool {
        (self.min.cx..=self.max.cx).contains(&c.cx) && (self.min.cy..=self.max.cy).contains(&c.cy)
    }

    /// Coordinates ordered by row (`cy`), then column (`cx`).
    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        (self.min.cy..=self.max.cy)
            .flat_map(move |cy| (self.min.cx..=self.max.cx).map(move |cx| ChunkCoord::new(cx, cy)))
    }
}

/// Generates every chunk in `rect` across the rayon pool. The output follows
/// [`ChunkRect::coords`] order however the work was scheduled.
pub fn generate_region(generator: &Generator, rect: ChunkRect) -> Vec<Chunk> {
    let coords: Vec<ChunkCoord> = rect.coords().collect();
    log::debug!(
        "generating region {:?}..={:?} ({} chunks)",
        rect.min,
        rect.max,
        coords.len()
    );
    coords
        .into_par_iter()
        .map(|coord| generate_chunk_at(generator, coord))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilegen_chunk::generate_chunk;

    #[test]
    fn rect_normalizes_corners() {
        let r = ChunkRect::new(ChunkCoord::new(3, -1), ChunkCoord::new(-2, 4));
        assert_eq!(r.min, ChunkCoord::new(-2, -1));
        assert_eq!(r.max, ChunkCoord::new(3, 4));
        assert_eq!(r.len(), 36);
        assert_eq!(r.coords().count(), 36);
        assert!(r.contains(ChunkCoord::new(0, 0)));
        assert!(!r.contains(ChunkCoord::new(4, 0)));
    }

    #[test]
    fn extreme_rect_sizes_do_not_overflow() {
        let r = ChunkRect::new(ChunkCoord::new(i32::MIN, 0), ChunkCoord::new(i32::MAX, 0));
        assert_eq!(r.width(), 1 << 32);
    }

    #[test]
    fn region_matches_sequential_generation() {
        let g = Generator::new(11);
        let rect = ChunkRect::new(ChunkCoord::new(-2, -2), ChunkCoord::new(2, 1));
        let par = generate_region(&g, rect);
        let seq: Vec<_> = rect.coords().map(|c| generate_chunk(&g, c.cx, c.cy)).collect();
        assert_eq!(par, seq);
    }
}
