//! Range list configuration for the command line tool.
//!
//! The matching core takes no configuration; this only feeds the binary.
//! Sources, first hit wins:
//! 1. `IP_RANGES_FILE` - JSON file `{"ranges": ["10.0.0.0/8", ...]}`
//! 2. `IP_RANGES` - comma separated specs
//! 3. nothing - empty list, every address is denied

use crate::matcher::RangeList;
use serde::Deserialize;
use std::error::Error;
use std::path::Path;

/// Environment variable naming a JSON range file.
pub const RANGES_FILE_VAR: &str = "IP_RANGES_FILE";
/// Environment variable holding comma separated range specs.
pub const RANGES_VAR: &str = "IP_RANGES";

/// Resolved configuration.
#[derive(Deserialize, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub ranges: RangeList,
}

impl Config {
    /// Load from the environment. Call `dotenv` first to pick up `.env`.
    pub fn from_env() -> Result<Config, Box<dyn Error>> {
        if let Ok(path) = std::env::var(RANGES_FILE_VAR) {
            return Config::from_file(&path);
        }
        if let Ok(csv) = std::env::var(RANGES_VAR) {
            log::info!("Using range specs from {RANGES_VAR}");
            return Ok(Config::from_list(&csv));
        }
        log::warn!("Neither {RANGES_FILE_VAR} nor {RANGES_VAR} set, every address will be denied");
        Ok(Config::default())
    }

    /// Read a JSON range file.
    pub fn from_file(path: &str) -> Result<Config, Box<dyn Error>> {
        if !Path::new(path).exists() {
            return Err(format!("Range file does not exist: {path}").into());
        }
        log::info!("Reading range specs from file: {path}");
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Error reading range file {path}: {e}"))?;
        Config::from_json(&json)
    }

    /// Parse JSON text. Errors name the offending JSON path.
    pub fn from_json(json: &str) -> Result<Config, Box<dyn Error>> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let config: Config = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
            format!(
                "Error parsing range config: path={} error={}",
                e.path(),
                e.inner()
            )
        })?;
        Ok(config)
    }

    /// Comma separated specs, blanks dropped.
    pub fn from_list(csv: &str) -> Config {
        let specs: Vec<&str> = csv
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        Config {
            ranges: RangeList::parse(specs),
        }
    }
}
