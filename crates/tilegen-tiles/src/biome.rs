use serde::{Deserialize, Serialize};

/// Climate classification stored in the low nibble of a tile.
///
/// Codes follow a Whittaker diagram with a few game-specific additions
/// (frozen water at the wet end of the two highest height bands).
/// Nibble `0xF` is reserved and never maps to a biome.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Biome {
    Water = 0x0,
    FrozenWater = 0x1,
    TropicalRainForest = 0x2,
    TropicalForest = 0x3,
    Grassland = 0x4,
    Desert = 0x5,
    TemperateRainForest = 0x6,
    TemperateForest = 0x7,
    TemperateDesert = 0x8,
    Taiga = 0x9,
    Shrubland = 0xA,
    Snow = 0xB,
    Tundra = 0xC,
    Bare = 0xD,
    Scorched = 0xE,
}

impl Biome {
    pub const COUNT: usize = 15;

    /// Every biome, ordered by nibble value.
    pub const ALL: [Biome; Biome::COUNT] = [
        Biome::Water,
        Biome::FrozenWater,
        Biome::TropicalRainForest,
        Biome::TropicalForest,
        Biome::Grassland,
        Biome::Desert,
        Biome::TemperateRainForest,
        Biome::TemperateForest,
        Biome::TemperateDesert,
        Biome::Taiga,
        Biome::Shrubland,
        Biome::Snow,
        Biome::Tundra,
        Biome::Bare,
        Biome::Scorched,
    ];

    #[inline]
    pub const fn nibble(self) -> u8 {
        self as u8
    }

    /// Decodes a low-nibble value. Returns `None` for the reserved `0xF` and
    /// for anything that does not fit in four bits.
    #[inline]
    pub const fn from_nibble(nibble: u8) -> Option<Biome> {
        if (nibble as usize) < Biome::COUNT {
            Some(Biome::ALL[nibble as usize])
        } else {
            None
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Biome::Water => "water",
            Biome::FrozenWater => "frozen_water",
            Biome::TropicalRainForest => "tropical_rain_forest",
            Biome::TropicalForest => "tropical_forest",
            Biome::Grassland => "grassland",
            Biome::Desert => "desert",
            Biome::TemperateRainForest => "temperate_rain_forest",
            Biome::TemperateForest => "temperate_forest",
            Biome::TemperateDesert => "temperate_desert",
            Biome::Taiga => "taiga",
            Biome::Shrubland => "shrubland",
            Biome::Snow => "snow",
            Biome::Tundra => "tundra",
            Biome::Bare => "bare",
            Biome::Scorched => "scorched",
        }
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_ordered_by_nibble() {
        for (i, b) in Biome::ALL.iter().enumerate() {
            assert_eq!(b.nibble() as usize, i);
            assert_eq!(Biome::from_nibble(i as u8), Some(*b));
        }
    }

    #[test]
    fn reserved_nibble_rejected() {
        assert_eq!(Biome::from_nibble(0xF), None);
        assert_eq!(Biome::from_nibble(0x10), None);
    }
}
