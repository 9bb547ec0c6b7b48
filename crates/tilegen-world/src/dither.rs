use std::sync::OnceLock;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// Edge length of the dither map. Must stay a power of two.
pub const DITHER_SIZE: usize = 64;
pub const DITHER_CELLS: usize = DITHER_SIZE * DITHER_SIZE;

/// Seed of the process-wide map. Changing it moves every structure.
pub const DITHER_SEED: u64 = 0x7469_6C65_6765_6E00;

/// Shuffled threshold field used to place structures without grid artifacts.
///
/// Holds each of `0/N², 1/N², …, (N²-1)/N²` exactly once. Lookups use world
/// tile coordinates so the pattern is continuous across chunk borders.
#[derive(Clone, Debug, PartialEq)]
pub struct DitherMap {
    cells: Box<[[f64; DITHER_SIZE]; DITHER_SIZE]>,
}

impl DitherMap {
    pub fn build(seed: u64) -> Self {
        let mut values: Vec<f64> = (0..DITHER_CELLS)
            .map(|i| i as f64 / DITHER_CELLS as f64)
            .collect();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        values.shuffle(&mut rng);

        let mut cells = Box::new([[0.0; DITHER_SIZE]; DITHER_SIZE]);
        for (i, v) in values.into_iter().enumerate() {
            cells[i / DITHER_SIZE][i % DITHER_SIZE] = v;
        }
        log::debug!("dither map built: {DITHER_SIZE}x{DITHER_SIZE} seed={seed:#x}");
        Self { cells }
    }

    /// Shared map built from [`DITHER_SEED`] on first use.
    pub fn global() -> &'static DitherMap {
        static MAP: OnceLock<DitherMap> = OnceLock::new();
        MAP.get_or_init(|| DitherMap::build(DITHER_SEED))
    }

    #[inline]
    pub fn value(&self, wx: i64, wy: i64) -> f64 {
        let n = DITHER_SIZE as i64;
        self.cells[wx.rem_euclid(n) as usize][wy.rem_euclid(n) as usize]
    }

    /// Row-major iteration over every cell.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().flat_map(|row| row.iter().copied())
    }
}
