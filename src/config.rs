use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

const CONFIG_PATH: &str = "config.toml";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATA_PATH: &str = "data/data.json";

/// Runtime configuration for the service.
///
/// Values come from `config.toml` when the file exists, with the `PORT` and
/// `POKEMON_DATA` environment variables taking precedence.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server listens on
    pub port: u16,
    /// Path of the JSON document holding the owner collection
    pub data_path: PathBuf,
}

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    server: ServerSection,
    #[serde(default)]
    storage: StorageSection,
}

#[derive(Deserialize, Default)]
struct ServerSection {
    port: Option<u16>,
}

#[derive(Deserialize, Default)]
struct StorageSection {
    path: Option<PathBuf>,
}

impl Config {
    /// Loads the configuration from `config.toml` and the environment.
    pub fn load() -> Result<Self> {
        let file = match std::fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => {
                toml::from_str::<ConfigFile>(&contents).context("Invalid config.toml")?
            }
            Err(_) => ConfigFile::default(),
        };

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().context("Invalid PORT variable")?,
            Err(_) => file.server.port.unwrap_or(DEFAULT_PORT),
        };

        let data_path = env::var("POKEMON_DATA")
            .map(PathBuf::from)
            .ok()
            .or(file.storage.path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        Ok(Config { port, data_path })
    }
}
