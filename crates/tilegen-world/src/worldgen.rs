use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::generator::Generator;
use crate::passes::PASS_TABLE_VERSION;

#[derive(Clone, Debug, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default = "default_seed")]
    pub seed: i32,
    /// Pass table version the config was written against. A mismatch is
    /// logged but not fatal.
    #[serde(default = "default_pass_version")]
    pub pass_version: u32,
}

fn default_seed() -> i32 {
    0
}
fn default_pass_version() -> u32 {
    PASS_TABLE_VERSION
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            pass_version: default_pass_version(),
        }
    }
}

impl WorldGenConfig {
    pub fn build_generator(&self) -> Generator {
        if self.pass_version != PASS_TABLE_VERSION {
            log::warn!(
                "worldgen config targets pass table v{}, running v{}; tiles will differ",
                self.pass_version,
                PASS_TABLE_VERSION
            );
        }
        Generator::new(self.seed)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing worldgen config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub fn parse_config(s: &str) -> Result<WorldGenConfig, ConfigError> {
    Ok(toml::from_str(s)?)
}

pub fn load_config_from_path(path: &Path) -> Result<WorldGenConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.seed, 0);
        assert_eq!(cfg.pass_version, PASS_TABLE_VERSION);
    }

    #[test]
    fn seed_is_read() {
        let cfg = parse_config("seed = -42\n").unwrap();
        assert_eq!(cfg.seed, -42);
        assert_eq!(cfg.build_generator().seed(), -42);
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        assert!(matches!(parse_config("seed = \"x\""), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_config_from_path(Path::new("/nonexistent/tilegen.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
