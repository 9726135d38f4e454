use crate::port::SERIAL_BAUD_RATE;
use core::time::Duration;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub baud_rate: u32,
    pub write_timeout_ms: u64,
    /// Overrides the log file next to the executable.
    pub log_file: Option<PathBuf>,
    #[serde(deserialize_with = "level_text")]
    pub log_level: String,
}

/// Accepts `LOGLEVEL=10` as text so it reaches the unknown-level fallback.
fn level_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LevelText {
        Name(String),
        Integer(i64),
        Float(f64),
        Flag(bool),
    }

    Ok(match LevelText::deserialize(deserializer)? {
        LevelText::Name(name) => name,
        LevelText::Integer(n) => n.to_string(),
        LevelText::Float(n) => n.to_string(),
        LevelText::Flag(b) => b.to_string(),
    })
}

impl Default for Config {
    fn default() -> Config {
        Config {
            baud_rate: SERIAL_BAUD_RATE,
            write_timeout_ms: 60_000,
            log_file: None,
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Loads the user's config file, if any, and the environment.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the config file exists but cannot be parsed.
    pub fn load() -> Result<Config, figment::Error> {
        Config::figment(Config::file_path().as_deref()).extract()
    }

    /// # Errors
    ///
    /// Will return `Err` if `path` exists but cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Config, figment::Error> {
        Config::figment(Some(path)).extract()
    }

    fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(
            Env::raw()
                .only(&["LOGLEVEL"])
                .map(|_| "log_level".into()),
        )
    }

    #[must_use]
    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    #[must_use]
    pub fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("write-serial").join("config.toml"))
    }
}
