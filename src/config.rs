use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

#[inline]
fn default_timeout_secs() -> u64 {
    30
}
#[inline]
fn default_slots() -> usize {
    4
}
#[inline]
fn default_start_page() -> String {
    "/".to_string()
}

#[derive(Deserialize)]
pub struct Backend {
    pub base_url: String,
    pub token: String,
    // host:port of the newline delimited status document stream
    // optional, without it no telemetry is received
    pub feed_address: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Deserialize)]
pub struct Charger {
    #[serde(default = "default_slots")]
    pub slots: usize,
}

impl Default for Charger {
    fn default() -> Self {
        Self { slots: default_slots() }
    }
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
    #[serde(default = "default_start_page")]
    pub start_page: String,
}

#[derive(Deserialize)]
pub struct Config {
    pub backend: Backend,
    #[serde(default)]
    pub charger: Charger,
    pub general: General,
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {

    let toml = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&toml)?;

    if config.charger.slots == 0 {
        return Err(ConfigError::from("charger must have at least one slot"));
    }
    if !config.general.start_page.starts_with('/') {
        return Err(ConfigError::from("start page must be an absolute path"));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config_with_defaults() {
        let toml = r#"
            [backend]
            base_url = "http://127.0.0.1:5000"
            token = "secret"

            [general]
            log_path = "/tmp/mc3000.log"
            log_level = "debug"
            log_to_stdout = false
        "#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.backend.timeout_secs, 30);
        assert!(config.backend.feed_address.is_none());
        assert_eq!(config.charger.slots, 4);
        assert_eq!(config.general.start_page, "/");
        assert_eq!(config.general.log_level, LevelFilter::Debug);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config("/nonexistent/mc3000/config.toml").is_err());
    }
}
