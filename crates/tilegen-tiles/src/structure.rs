use serde::{Deserialize, Serialize};

/// Secondary feature stored in the high nibble of a tile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Structure {
    #[default]
    None = 0x0,
    Tree = 0x1,
    Plant = 0x2,
    Cactus = 0x3,
}

impl Structure {
    pub const COUNT: usize = 4;

    pub const ALL: [Structure; Structure::COUNT] = [
        Structure::None,
        Structure::Tree,
        Structure::Plant,
        Structure::Cactus,
    ];

    #[inline]
    pub const fn nibble(self) -> u8 {
        self as u8
    }

    /// Value as it sits inside a tile byte (nibble shifted into bits 4..8).
    #[inline]
    pub const fn bits(self) -> u8 {
        (self as u8) << 4
    }

    #[inline]
    pub const fn from_nibble(nibble: u8) -> Option<Structure> {
        if (nibble as usize) < Structure::COUNT {
            Some(Structure::ALL[nibble as usize])
        } else {
            None
        }
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        matches!(self, Structure::None)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Structure::None => "none",
            Structure::Tree => "tree",
            Structure::Plant => "plant",
            Structure::Cactus => "cactus",
        }
    }
}

impl std::fmt::Display for Structure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
