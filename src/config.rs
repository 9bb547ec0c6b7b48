use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use tilegen_runtime::ChunkRect;
use tilegen_world::ChunkCoord;
use tilegen_world::worldgen::WorldGenConfig;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub world: WorldGenConfig,
    #[serde(default)]
    pub region: Region,
    #[serde(default)]
    pub runtime: RuntimeSection,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Region {
    #[serde(default = "default_region_min")]
    pub min_x: i32,
    #[serde(default = "default_region_min")]
    pub min_y: i32,
    #[serde(default = "default_region_max")]
    pub max_x: i32,
    #[serde(default = "default_region_max")]
    pub max_y: i32,
}
fn default_region_min() -> i32 {
    -2
}
fn default_region_max() -> i32 {
    1
}
impl Default for Region {
    fn default() -> Self {
        Self {
            min_x: default_region_min(),
            min_y: default_region_min(),
            max_x: default_region_max(),
            max_y: default_region_max(),
        }
    }
}

impl Region {
    pub fn rect(&self) -> ChunkRect {
        ChunkRect::new(
            ChunkCoord::new(self.min_x, self.min_y),
            ChunkCoord::new(self.max_x, self.max_y),
        )
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeSection {
    /// Route work through the job runtime instead of a plain parallel map.
    #[serde(default)]
    pub enable: bool,
    /// 0 = one per core.
    #[serde(default)]
    pub workers: usize,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}
fn default_cache_capacity() -> usize {
    256
}
impl Default for RuntimeSection {
    fn default() -> Self {
        Self {
            enable: false,
            workers: 0,
            cache_capacity: default_cache_capacity(),
        }
    }
}

pub fn load_run_config(path: &Path) -> Result<RunConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: RunConfig = toml::from_str(&s)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_default_independently() {
        let cfg: RunConfig = toml::from_str(
            r#"
            [world]
            seed = 99

            [region]
            max_x = 5
        "#,
        )
        .unwrap();
        assert_eq!(cfg.world.seed, 99);
        assert_eq!(cfg.region.min_x, -2);
        assert_eq!(cfg.region.max_x, 5);
        assert!(!cfg.runtime.enable);
        assert_eq!(cfg.runtime.cache_capacity, 256);
    }

    #[test]
    fn sample_config_parses() {
        let cfg: RunConfig = toml::from_str(include_str!("../tilegen.toml")).unwrap();
        assert_eq!(cfg.region.rect().len(), 64);
        assert_eq!(cfg.world.pass_version, tilegen_world::passes::PASS_TABLE_VERSION);
    }

    #[test]
    fn region_rect_is_inclusive() {
        assert_eq!(Region::default().rect().len(), 16);
    }
}
