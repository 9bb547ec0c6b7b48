use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Biome, Structure};

const BIOME_MASK: u8 = 0x0F;
const STRUCTURE_SHIFT: u32 = 4;

// Compact per-cell value: low nibble biome, high nibble structure.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(transparent)]
pub struct Tile(u8);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum TileError {
    #[error("reserved biome nibble {0:#x}")]
    InvalidBiome(u8),
    #[error("reserved structure nibble {0:#x}")]
    InvalidStructure(u8),
}

impl Tile {
    pub const WATER: Tile = Tile::new(Biome::Water, Structure::None);

    #[inline]
    pub const fn new(biome: Biome, structure: Structure) -> Self {
        Tile(biome.nibble() | structure.bits())
    }

    #[inline]
    pub const fn from_biome(biome: Biome) -> Self {
        Tile(biome.nibble())
    }

    /// Replaces the structure nibble, keeping the biome.
    #[inline]
    pub const fn with_structure(self, structure: Structure) -> Self {
        Tile((self.0 & BIOME_MASK) | structure.bits())
    }

    #[inline]
    pub const fn biome(self) -> Biome {
        match Biome::from_nibble(self.0 & BIOME_MASK) {
            Some(b) => b,
            // Unreachable: every constructor validates the low nibble.
            None => Biome::Water,
        }
    }

    #[inline]
    pub const fn structure(self) -> Structure {
        match Structure::from_nibble(self.0 >> STRUCTURE_SHIFT) {
            Some(s) => s,
            None => Structure::None,
        }
    }

    #[inline]
    pub const fn has_structure(self) -> bool {
        self.0 >> STRUCTURE_SHIFT != 0
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Validates both nibbles of a stored byte.
    pub const fn from_bits(bits: u8) -> Result<Self, TileError> {
        let low = bits & BIOME_MASK;
        let high = bits >> STRUCTURE_SHIFT;
        if Biome::from_nibble(low).is_none() {
            return Err(TileError::InvalidBiome(low));
        }
        if Structure::from_nibble(high).is_none() {
            return Err(TileError::InvalidStructure(high));
        }
        Ok(Tile(bits))
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::WATER
    }
}

impl From<Biome> for Tile {
    fn from(biome: Biome) -> Self {
        Tile::from_biome(biome)
    }
}

impl From<Tile> for u8 {
    fn from(tile: Tile) -> Self {
        tile.0
    }
}

impl TryFrom<u8> for Tile {
    type Error = TileError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Tile::from_bits(bits)
    }
}

impl std::fmt::Debug for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.has_structure() {
            write!(f, "Tile({}+{})", self.biome(), self.structure())
        } else {
            write!(f, "Tile({})", self.biome())
        }
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:x}", self.0)
    }
}
