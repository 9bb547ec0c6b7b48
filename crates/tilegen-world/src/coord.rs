use serde::{Deserialize, Serialize};

/// Packs a chunk position into its 64-bit storage key.
///
/// Both halves keep their two's-complement bit patterns: `y` lands in the 32
/// most significant bits and `x` in the 32 least significant ones, so
/// `(0, -1)` maps to `0xFFFF_FFFF_0000_0000`.
#[inline]
pub const fn pack(x: i32, y: i32) -> u64 {
    ((y as u32 as u64) << 32) | (x as u32 as u64)
}

/// Inverse of [`pack`].
#[inline]
pub const fn unpack(id: u64) -> (i32, i32) {
    (id as u32 as i32, (id >> 32) as u32 as i32)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32) -> Self {
        Self { cx, cy }
    }

    #[inline]
    pub const fn id(self) -> u64 {
        pack(self.cx, self.cy)
    }

    #[inline]
    pub const fn from_id(id: u64) -> Self {
        let (cx, cy) = unpack(id);
        Self { cx, cy }
    }

    /// World-tile position of the chunk's (0, 0) corner.
    #[inline]
    pub fn world_origin(self) -> (i64, i64) {
        let size = crate::CHUNK_SIZE as i64;
        (i64::from(self.cx) * size, i64::from(self.cy) * size)
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cy)
    }
}

impl From<u64> for ChunkCoord {
    fn from(id: u64) -> Self {
        Self::from_id(id)
    }
}

impl From<ChunkCoord> for u64 {
    fn from(value: ChunkCoord) -> Self {
        value.id()
    }
}
