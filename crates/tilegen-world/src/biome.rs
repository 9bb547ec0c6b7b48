//! Whittaker-style classification of (height, humidity) samples.
//!
//! | Height\Humidity | 0 (dry)          | 1                | 2               | 3                | 4                    | 5                     | 6 (wet)      |
//! |-----------------|------------------|------------------|-----------------|------------------|----------------------|-----------------------|--------------|
//! | 4 (high)        | Scorched         | Bare             | Tundra          | Snow             | Snow                 | Snow                  | Frozen Water |
//! | 3               | Temperate Desert | Temperate Desert | Shrubland       | Shrubland        | Taiga                | Taiga                 | Frozen Water |
//! | 2               | Temperate Desert | Grassland        | Grassland       | Temperate Forest | Temperate Forest     | Temperate Rain Forest | Water        |
//! | 1               | Desert           | Grassland        | Tropical Forest | Tropical Forest  | Tropical Rain Forest | Tropical Rain Forest  | Water        |
//! | 0 (low)         | Water            | Water            | Water           | Water            | Water                | Water                 | Water        |

use tilegen_tiles::Biome;

pub const HEIGHT_BINS: usize = 5;
pub const HUMIDITY_BINS: usize = 7;

pub const HEIGHT_THRESHOLDS: [f64; HEIGHT_BINS - 1] = [1. / 5., 2. / 5., 3. / 5., 4. / 5.];
pub const HUMIDITY_THRESHOLDS: [f64; HUMIDITY_BINS - 1] =
    [1. / 7., 2. / 7., 3. / 7., 4. / 7., 5. / 7., 6. / 7.];

use Biome::*;

pub static BIOME_LOOKUP: [[Biome; HUMIDITY_BINS]; HEIGHT_BINS] = [
    [Water, Water, Water, Water, Water, Water, Water],
    [
        Desert,
        Grassland,
        TropicalForest,
        TropicalForest,
        TropicalRainForest,
        TropicalRainForest,
        Water,
    ],
    [
        TemperateDesert,
        Grassland,
        Grassland,
        TemperateForest,
        TemperateForest,
        TemperateRainForest,
        Water,
    ],
    [
        TemperateDesert,
        TemperateDesert,
        Shrubland,
        Shrubland,
        Taiga,
        Taiga,
        FrozenWater,
    ],
    [Scorched, Bare, Tundra, Snow, Snow, Snow, FrozenWater],
];

// Index of the first threshold strictly above `value`; saturates at the last bin.
#[inline]
fn bin(thresholds: &[f64], value: f64) -> usize {
    thresholds
        .iter()
        .position(|&t| value < t)
        .unwrap_or(thresholds.len())
}

/// Maps samples to `(height_bin, humidity_bin)`. Values below 0 land in bin 0
/// and values above 1 in the last bin; NaN also lands in the last bin.
#[inline]
pub fn classify(height: f64, humidity: f64) -> (usize, usize) {
    (
        bin(&HEIGHT_THRESHOLDS, height),
        bin(&HUMIDITY_THRESHOLDS, humidity),
    )
}

#[inline]
pub fn biome_for(height: f64, humidity: f64) -> Biome {
    let (h, u) = classify(height, humidity);
    BIOME_LOOKUP[h][u]
}
