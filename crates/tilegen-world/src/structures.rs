use tilegen_tiles::{Biome, Structure, Tile};

use crate::dither::DitherMap;

/// Ordered `(threshold, structure)` candidates per biome. Candidates are
/// checked in listed order and the first threshold strictly above the dither
/// value wins, so each entry's probability is its threshold minus the previous
/// one.
pub static STRUCTURE_TABLE: &[(Biome, &[(f64, Structure)])] = &[
    (
        Biome::TropicalRainForest,
        &[(0.1875, Structure::Tree), (0.3125, Structure::Plant)],
    ),
    (
        Biome::TropicalForest,
        &[(0.125, Structure::Tree), (0.25, Structure::Plant)],
    ),
    (
        Biome::TemperateRainForest,
        &[(0.1875, Structure::Tree), (0.25, Structure::Plant)],
    ),
    (
        Biome::TemperateForest,
        &[(0.125, Structure::Tree), (0.1875, Structure::Plant)],
    ),
    (Biome::Taiga, &[(0.125, Structure::Tree)]),
    (
        Biome::Grassland,
        &[(0.03125, Structure::Tree), (0.125, Structure::Plant)],
    ),
    (Biome::Shrubland, &[(0.09375, Structure::Plant)]),
    (Biome::Desert, &[(0.015625, Structure::Cactus)]),
    (Biome::TemperateDesert, &[(0.03125, Structure::Plant)]),
];

#[inline]
pub fn candidates(biome: Biome) -> &'static [(f64, Structure)] {
    STRUCTURE_TABLE
        .iter()
        .find(|(b, _)| *b == biome)
        .map(|(_, c)| *c)
        .unwrap_or(&[])
}

pub fn structure_for(biome: Biome, dither: f64) -> Structure {
    candidates(biome)
        .iter()
        .find(|(threshold, _)| dither < *threshold)
        .map(|(_, s)| *s)
        .unwrap_or(Structure::None)
}

/// Overlays the structure chosen for world tile `(wx, wy)` onto `tile`.
#[inline]
pub fn place(tile: Tile, wx: i64, wy: i64, dither: &DitherMap) -> Tile {
    match structure_for(tile.biome(), dither.value(wx, wy)) {
        Structure::None => tile,
        s => tile.with_structure(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_wins() {
        assert_eq!(structure_for(Biome::TropicalRainForest, 0.0), Structure::Tree);
        assert_eq!(structure_for(Biome::TropicalRainForest, 0.1875), Structure::Plant);
        assert_eq!(structure_for(Biome::TropicalRainForest, 0.3), Structure::Plant);
        assert_eq!(structure_for(Biome::TropicalRainForest, 0.3125), Structure::None);
    }

    #[test]
    fn biomes_without_candidates_stay_bare() {
        for b in [Biome::Water, Biome::FrozenWater, Biome::Snow, Biome::Scorched] {
            assert!(candidates(b).is_empty());
            assert_eq!(structure_for(b, 0.0), Structure::None);
        }
    }

    #[test]
    fn table_thresholds_ascend_within_one() {
        for (biome, list) in STRUCTURE_TABLE {
            let mut prev = 0.0;
            for (t, s) in *list {
                assert!(*t > prev && *t <= 1.0, "{biome}: {t}");
                assert!(!s.is_none());
                prev = *t;
            }
        }
    }

    #[test]
    fn each_biome_listed_once() {
        for b in Biome::ALL {
            assert!(STRUCTURE_TABLE.iter().filter(|(x, _)| *x == b).count() <= 1);
        }
    }

    #[test]
    fn place_preserves_biome() {
        let map = DitherMap::global();
        for wx in -70..70 {
            let t = place(Tile::from_biome(Biome::TropicalRainForest), wx, 3, map);
            assert_eq!(t.biome(), Biome::TropicalRainForest);
        }
    }
}
