use fastnoise_lite::{FastNoiseLite, NoiseType};
use tilegen_tiles::{Biome, Tile};

use crate::biome;
use crate::dither::DitherMap;
use crate::passes::{GenPass, HEIGHT_PASSES, HUMIDITY_PASSES, total_weight};
use crate::structures;

/// Height and humidity at one world position, both nominally in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Climate {
    pub height: f64,
    pub humidity: f64,
}

impl Climate {
    #[inline]
    pub fn biome(self) -> Biome {
        biome::biome_for(self.height, self.humidity)
    }
}

/// Seeded terrain sampler. Holds no per-call state, so one instance can be
/// shared by reference across worker threads.
pub struct Generator {
    seed: i32,
    noise: FastNoiseLite,
    dither: &'static DitherMap,
}

impl Generator {
    pub fn new(seed: i32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        // Pass scales carry the frequency.
        noise.set_frequency(Some(1.0));
        Self {
            seed,
            noise,
            dither: DitherMap::global(),
        }
    }

    #[inline]
    pub fn seed(&self) -> i32 {
        self.seed
    }

    fn layered(&self, passes: &[GenPass], x: f64, y: f64) -> f64 {
        let mut sum = 0.0;
        for pass in passes {
            let (sx, sy) = pass.sample_point(x, y);
            let v = f64::from(self.noise.get_noise_2d(sx, sy));
            sum += (v / 2.0 + 0.5) * pass.weight;
        }
        sum / total_weight(passes)
    }

    #[inline]
    pub fn height(&self, x: f64, y: f64) -> f64 {
        self.layered(HEIGHT_PASSES, x, y)
    }

    #[inline]
    pub fn humidity(&self, x: f64, y: f64) -> f64 {
        self.layered(HUMIDITY_PASSES, x, y)
    }

    #[inline]
    pub fn climate(&self, x: f64, y: f64) -> Climate {
        Climate {
            height: self.height(x, y),
            humidity: self.humidity(x, y),
        }
    }

    /// Classified tile for world tile `(wx, wy)`, structures included.
    pub fn tile_at(&self, wx: i64, wy: i64) -> Tile {
        let biome = self.climate(wx as f64, wy as f64).biome();
        structures::place(Tile::from_biome(biome), wx, wy, self.dither)
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
