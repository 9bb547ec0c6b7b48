use proptest::prelude::*;
use tilegen_tiles::{Biome, Structure};
use tilegen_world::biome::{HEIGHT_BINS, HUMIDITY_BINS, classify};
use tilegen_world::dither::DITHER_SIZE;
use tilegen_world::structures::candidates;
use tilegen_world::{ChunkCoord, DitherMap, Generator, pack, unpack};

fn edge_i32() -> impl Strategy<Value = i32> {
    prop_oneof![
        Just(0),
        Just(1),
        Just(-1),
        Just(i32::MIN),
        Just(i32::MAX),
        any::<i32>(),
    ]
}

proptest! {
    // unpack(pack(x, y)) == (x, y) over the whole i32 plane
    #[test]
    fn pack_unpack_roundtrip(x in edge_i32(), y in edge_i32()) {
        prop_assert_eq!(unpack(pack(x, y)), (x, y));
        prop_assert_eq!(ChunkCoord::from_id(ChunkCoord::new(x, y).id()), ChunkCoord::new(x, y));
    }

    // pack(unpack(id)) == id, so the mapping is onto
    #[test]
    fn unpack_pack_roundtrip(id in any::<u64>()) {
        let (x, y) = unpack(id);
        prop_assert_eq!(pack(x, y), id);
    }

    // Bins never decrease as a sample grows
    #[test]
    fn classify_is_monotonic(a in -0.5f64..1.5, b in -0.5f64..1.5, u in -0.5f64..1.5) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(classify(lo, u).0 <= classify(hi, u).0);
        prop_assert!(classify(u, lo).1 <= classify(u, hi).1);
    }

    // Bins stay in range for every finite input
    #[test]
    fn classify_in_range(h in any::<f64>(), u in any::<f64>()) {
        let (hb, ub) = classify(h, u);
        prop_assert!(hb < HEIGHT_BINS);
        prop_assert!(ub < HUMIDITY_BINS);
    }

    // Dither lookups repeat with the map period in both axes
    #[test]
    fn dither_is_periodic(wx in -1_000_000i64..1_000_000, wy in -1_000_000i64..1_000_000, k in -50i64..50) {
        let map = DitherMap::global();
        let n = DITHER_SIZE as i64;
        let v = map.value(wx, wy);
        prop_assert!((0.0..1.0).contains(&v));
        prop_assert_eq!(v, map.value(wx + k * n, wy));
        prop_assert_eq!(v, map.value(wx, wy - k * n));
    }

    // Generated tiles carry one valid biome and a structure only where the biome allows one
    #[test]
    fn tile_at_structures_are_exclusive(seed in any::<i32>(), wx in -100_000i64..100_000, wy in -100_000i64..100_000) {
        let g = Generator::new(seed);
        let t = g.tile_at(wx, wy);
        prop_assert!(Biome::from_nibble(t.bits() & 0x0F).is_some());
        prop_assert!(Structure::from_nibble(t.bits() >> 4).is_some());
        if t.has_structure() {
            prop_assert!(candidates(t.biome()).iter().any(|(_, s)| *s == t.structure()));
        }
    }
}
