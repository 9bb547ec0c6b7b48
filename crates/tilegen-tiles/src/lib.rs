//! Tile encoding crate: biome and structure nibbles packed into one byte.
#![forbid(unsafe_code)]

pub mod biome;
pub mod structure;
pub mod types;

// Re-exports for convenience
pub use biome::Biome;
pub use structure::Structure;
pub use types::{Tile, TileError};
