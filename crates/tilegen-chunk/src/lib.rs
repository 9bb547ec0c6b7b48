//! Chunk value type and the generator-driven chunk assembler.
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tilegen_tiles::{Biome, Tile, TileError};
use tilegen_world::{ChunkCoord, Generator, pack};

pub use tilegen_world::CHUNK_SIZE;

/// Length of [`Chunk::raw_bytes`].
pub const RAW_LEN: usize = CHUNK_SIZE * CHUNK_SIZE;

pub type ChunkData = [[Tile; CHUNK_SIZE]; CHUNK_SIZE];

/// 32x32 block of world tiles. `data[xi][yi]` is the tile at local `(xi, yi)`.
///
/// `modified` is advisory for persistence: it records whether `data` diverges
/// from what the generator would produce and is never derived from `data`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub x: i32,
    pub y: i32,
    pub data: ChunkData,
    pub modified: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    #[error("raw chunk is {actual} bytes, expected {expected}")]
    RawLength { expected: usize, actual: usize },
    #[error("invalid tile at raw index {index}: {source}")]
    InvalidTile {
        index: usize,
        #[source]
        source: TileError,
    },
}

impl Chunk {
    /// Wraps data that did not come from the generator (storage, player edits).
    pub fn from_data(x: i32, y: i32, data: ChunkData, modified: bool) -> Self {
        Self {
            x,
            y,
            data,
            modified,
        }
    }

    /// Rebuilds a chunk from the layout produced by [`Chunk::raw_bytes`].
    pub fn from_raw_bytes(x: i32, y: i32, bytes: &[u8], modified: bool) -> Result<Self, ChunkError> {
        if bytes.len() != RAW_LEN {
            return Err(ChunkError::RawLength {
                expected: RAW_LEN,
                actual: bytes.len(),
            });
        }
        let mut data: ChunkData = [[Tile::WATER; CHUNK_SIZE]; CHUNK_SIZE];
        for (index, &b) in bytes.iter().enumerate() {
            let tile = Tile::from_bits(b).map_err(|source| ChunkError::InvalidTile { index, source })?;
            data[index / CHUNK_SIZE][index % CHUNK_SIZE] = tile;
        }
        Ok(Self::from_data(x, y, data, modified))
    }

    /// Compact transport form: one byte per tile, `raw[xi * 32 + yi]`.
    pub fn raw_bytes(&self) -> [u8; RAW_LEN] {
        let mut raw = [0u8; RAW_LEN];
        for (xi, column) in self.data.iter().enumerate() {
            for (yi, tile) in column.iter().enumerate() {
                raw[xi * CHUNK_SIZE + yi] = tile.bits();
            }
        }
        raw
    }

    /// Storage key; see [`tilegen_world::pack`].
    #[inline]
    pub fn id(&self) -> u64 {
        pack(self.x, self.y)
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        ChunkCoord::new(self.x, self.y)
    }

    #[inline]
    pub fn tile(&self, xi: usize, yi: usize) -> Option<Tile> {
        self.data.get(xi).and_then(|col| col.get(yi)).copied()
    }

    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.data.iter().flat_map(|col| col.iter().copied())
    }

    /// Tile counts indexed by biome nibble.
    pub fn biome_histogram(&self) -> [u32; Biome::COUNT] {
        let mut counts = [0u32; Biome::COUNT];
        for t in self.tiles() {
            counts[t.biome().nibble() as usize] += 1;
        }
        counts
    }

    pub fn structure_count(&self) -> usize {
        self.tiles().filter(|t| t.has_structure()).count()
    }
}

/// Samples every tile of chunk `(x, y)`. The result is unmodified.
pub fn generate_chunk(generator: &Generator, x: i32, y: i32) -> Chunk {
    let (base_x, base_y) = ChunkCoord::new(x, y).world_origin();
    let mut data: ChunkData = [[Tile::WATER; CHUNK_SIZE]; CHUNK_SIZE];
    for (xi, column) in data.iter_mut().enumerate() {
        let wx = base_x + xi as i64;
        for (yi, tile) in column.iter_mut().enumerate() {
            *tile = generator.tile_at(wx, base_y + yi as i64);
        }
    }
    log::trace!("generated chunk ({x}, {y}) id={:#018x}", pack(x, y));
    Chunk::from_data(x, y, data, false)
}

#[inline]
pub fn generate_chunk_at(generator: &Generator, coord: ChunkCoord) -> Chunk {
    generate_chunk(generator, coord.cx, coord.cy)
}
