use proptest::prelude::*;
use tilegen_tiles::{Biome, Structure, Tile, TileError};

fn arb_biome() -> impl Strategy<Value = Biome> {
    (0usize..Biome::COUNT).prop_map(|i| Biome::ALL[i])
}

fn arb_structure() -> impl Strategy<Value = Structure> {
    (0usize..Structure::COUNT).prop_map(|i| Structure::ALL[i])
}

proptest! {
    // Composed tiles decompose into exactly the parts they were built from
    #[test]
    fn new_decomposes(b in arb_biome(), s in arb_structure()) {
        let t = Tile::new(b, s);
        prop_assert_eq!(t.biome(), b);
        prop_assert_eq!(t.structure(), s);
        prop_assert_eq!(t.bits() & 0x0F, b.nibble());
        prop_assert_eq!(t.bits() >> 4, s.nibble());
    }

    // Every byte either validates into a tile with the same bits or is rejected
    #[test]
    fn from_bits_accepts_exactly_valid_nibbles(bits in any::<u8>()) {
        let low = bits & 0x0F;
        let high = bits >> 4;
        match Tile::from_bits(bits) {
            Ok(t) => {
                prop_assert_eq!(t.bits(), bits);
                prop_assert!(Biome::from_nibble(low).is_some());
                prop_assert!(Structure::from_nibble(high).is_some());
            }
            Err(TileError::InvalidBiome(n)) => {
                prop_assert_eq!(n, low);
                prop_assert!(Biome::from_nibble(low).is_none());
            }
            Err(TileError::InvalidStructure(n)) => {
                prop_assert_eq!(n, high);
                prop_assert!(Structure::from_nibble(high).is_none());
            }
        }
    }

    // Overlaying a structure never touches the biome nibble
    #[test]
    fn with_structure_keeps_biome(b in arb_biome(), s0 in arb_structure(), s1 in arb_structure()) {
        let t = Tile::new(b, s0).with_structure(s1);
        prop_assert_eq!(t.biome(), b);
        prop_assert_eq!(t.structure(), s1);
    }
}

#[test]
fn all_tile_bytes_valid_count() {
    let valid = (0u8..=255).filter(|b| Tile::from_bits(*b).is_ok()).count();
    assert_eq!(valid, Biome::COUNT * Structure::COUNT);
}
