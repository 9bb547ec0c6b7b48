//! Fixed octave tables for the height and humidity fields.

/// One octave of noise sampling. The primitive is evaluated at
/// `(x / scale + offset_x, y / scale + offset_y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenPass {
    pub scale: f64,
    pub weight: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl GenPass {
    pub const fn new(scale: f64, weight: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            scale,
            weight,
            offset_x,
            offset_y,
        }
    }

    #[inline]
    pub fn sample_point(&self, x: f64, y: f64) -> (f64, f64) {
        (x / self.scale + self.offset_x, y / self.scale + self.offset_y)
    }
}

/// Bumped whenever either table changes; worlds generated under different
/// versions do not match tile for tile.
pub const PASS_TABLE_VERSION: u32 = 2;

pub const HEIGHT_PASSES: &[GenPass] = &[
    GenPass::new(256.0, 1.0, 0.0, 0.0),
    GenPass::new(64.0, 0.5, 17.3, -41.9),
    GenPass::new(16.0, 0.25, -93.1, 58.7),
    GenPass::new(4.0, 0.125, 211.4, 7.6),
];

pub const HUMIDITY_PASSES: &[GenPass] = &[
    GenPass::new(512.0, 1.0, 1024.5, -768.25),
    GenPass::new(128.0, 0.5, -311.7, 402.1),
    GenPass::new(32.0, 0.25, 57.9, 133.3),
];

#[inline]
pub fn total_weight(passes: &[GenPass]) -> f64 {
    passes.iter().map(|p| p.weight).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_have_positive_weights_and_scales() {
        for p in HEIGHT_PASSES.iter().chain(HUMIDITY_PASSES) {
            assert!(p.weight > 0.0);
            assert!(p.scale > 0.0);
        }
        assert!(total_weight(HEIGHT_PASSES) > 0.0);
        assert!(total_weight(HUMIDITY_PASSES) > 0.0);
    }
}
