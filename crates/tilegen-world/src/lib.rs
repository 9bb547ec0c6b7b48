//! Chunk addressing, climate sampling, and tile classification.
#![forbid(unsafe_code)]

pub mod biome;
pub mod coord;
pub mod dither;
pub mod generator;
pub mod passes;
pub mod structures;
pub mod worldgen;

pub use coord::{ChunkCoord, pack, unpack};
pub use dither::DitherMap;
pub use generator::{Climate, Generator};
pub use passes::GenPass;

/// Tiles along one edge of a chunk.
pub const CHUNK_SIZE: usize = 32;
