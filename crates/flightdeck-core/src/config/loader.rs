//! Configuration loading and management

use crate::config::model::FlightdeckConfig;
use crate::error::{FlightdeckError, FlightdeckResult};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable names recognised by the loader
pub mod env_keys {
    pub const DATASET: &str = "FLIGHTDECK_DATASET";
    pub const SERVICE_URL: &str = "FLIGHTDECK_SERVICE_URL";
    pub const SCALE: &str = "FLIGHTDECK_SCALE";
    pub const INTERVAL: &str = "FLIGHTDECK_INTERVAL";
    pub const LOG_LEVEL: &str = "FLIGHTDECK_LOG_LEVEL";
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub dataset: Option<PathBuf>,
    pub service_url: Option<String>,
    /// Applies to both the release scheduler and the HUD players
    pub scale: Option<f64>,
    pub interval: Option<f64>,
    pub log_level: Option<String>,
    pub offline: bool,
}

/// Source of configuration data
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Configuration from a file
    File(PathBuf),
    /// Configuration from environment variables
    Environment,
    /// Configuration from command line arguments
    Overrides(ConfigOverrides),
    /// Default configuration
    Default,
}

/// Configuration loader with support for multiple sources
///
/// Sources are applied in the order they were added; a file replaces the
/// configuration built so far, environment and overrides patch it.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a configuration source
    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Add a file source
    pub fn with_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_source(ConfigSource::File(path.as_ref().to_path_buf()))
    }

    /// Add environment variables source
    pub fn with_env(self) -> Self {
        self.add_source(ConfigSource::Environment)
    }

    /// Add command line overrides
    pub fn with_overrides(self, overrides: ConfigOverrides) -> Self {
        self.add_source(ConfigSource::Overrides(overrides))
    }

    /// Add default configuration source
    pub fn with_defaults(self) -> Self {
        self.add_source(ConfigSource::Default)
    }

    /// Load configuration from all sources
    pub fn load(self) -> FlightdeckResult<FlightdeckConfig> {
        let mut config = FlightdeckConfig::default();

        for source in &self.sources {
            match source {
                ConfigSource::File(path) => {
                    tracing::debug!("Loading config from file: {}", path.display());
                    config = load_from_file(path)?;
                }
                ConfigSource::Environment => {
                    tracing::debug!("Loading config from environment");
                    apply_env(&mut config, |key| env::var(key).ok())?;
                }
                ConfigSource::Overrides(overrides) => {
                    tracing::debug!("Applying command line overrides");
                    apply_overrides(&mut config, overrides);
                }
                ConfigSource::Default => {
                    config = FlightdeckConfig::default();
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}

/// Load configuration from a file; a missing file yields defaults
pub fn load_from_file(path: &Path) -> FlightdeckResult<FlightdeckConfig> {
    if !path.exists() {
        return Ok(FlightdeckConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        FlightdeckError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading configuration from '{}'", path.display()),
        )
    })?;

    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|e| {
            FlightdeckError::config_with_context(
                format!("Failed to parse JSON config: {}", e),
                format!("Deserializing JSON configuration from '{}'", path.display()),
            )
        }),
        _ => toml::from_str(&content).map_err(|e| {
            FlightdeckError::config_with_context(
                format!("Failed to parse TOML config: {}", e),
                format!("Deserializing TOML configuration from '{}'", path.display()),
            )
        }),
    }
}

fn parse_number(key: &str, raw: &str) -> FlightdeckResult<f64> {
    raw.trim().parse().map_err(|_| {
        FlightdeckError::config_with_context(
            format!("Invalid {} value", key),
            format!("Parsing '{}' as a number", raw),
        )
    })
}

/// Patch configuration from environment variables read through `lookup`
pub fn apply_env<F>(config: &mut FlightdeckConfig, lookup: F) -> FlightdeckResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup(env_keys::DATASET) {
        config.dataset.path = PathBuf::from(path);
    }

    if let Some(url) = lookup(env_keys::SERVICE_URL) {
        config.service.base_url = url;
    }

    if let Some(raw) = lookup(env_keys::SCALE) {
        let scale = parse_number(env_keys::SCALE, &raw)?;
        config.release.scale = scale;
        config.hud.scale = scale;
    }

    if let Some(raw) = lookup(env_keys::INTERVAL) {
        config.release.interval = parse_number(env_keys::INTERVAL, &raw)?;
    }

    if let Some(level) = lookup(env_keys::LOG_LEVEL) {
        config.logging.level = level;
    }

    Ok(())
}

/// Patch configuration from command line values
pub fn apply_overrides(config: &mut FlightdeckConfig, overrides: &ConfigOverrides) {
    if let Some(path) = &overrides.dataset {
        config.dataset.path = path.clone();
    }
    if let Some(url) = &overrides.service_url {
        config.service.base_url = url.clone();
    }
    if let Some(scale) = overrides.scale {
        config.release.scale = scale;
        config.hud.scale = scale;
    }
    if let Some(interval) = overrides.interval {
        config.release.interval = interval;
    }
    if let Some(level) = &overrides.log_level {
        config.logging.level = level.clone();
    }
    if overrides.offline {
        config.service.enabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = ConfigLoader::new()
            .with_file("/nonexistent/flightdeck.toml")
            .load()
            .unwrap();
        assert_eq!(config, FlightdeckConfig::default());
    }

    #[test]
    fn test_toml_file_partial_sections() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("flightdeck.toml");
        fs::write(
            &path,
            r#"
            [release]
            interval = 2.0

            [service]
            base_url = "http://analysis.local:9000"
            "#,
        )
        .unwrap();

        let config = ConfigLoader::new().with_file(&path).load().unwrap();
        assert_eq!(config.release.interval, 2.0);
        assert_eq!(config.release.scale, 1.0);
        assert_eq!(config.service.base_url, "http://analysis.local:9000");
    }

    #[test]
    fn test_json_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("flightdeck.json");
        fs::write(&path, r#"{"hud": {"window": 40.0}}"#).unwrap();

        let config = ConfigLoader::new().with_file(&path).load().unwrap();
        assert_eq!(config.hud.window, 40.0);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("flightdeck.toml");
        fs::write(&path, "[release\ninterval = ").unwrap();

        let err = ConfigLoader::new().with_file(&path).load().unwrap_err();
        assert!(matches!(err, FlightdeckError::Config { .. }));
    }

    #[test]
    fn test_apply_env() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (env_keys::DATASET, "flight.csv"),
            (env_keys::SCALE, "4"),
            (env_keys::INTERVAL, "2.5"),
        ]);
        let mut config = FlightdeckConfig::default();
        apply_env(&mut config, |key| vars.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.dataset.path, PathBuf::from("flight.csv"));
        assert_eq!(config.release.scale, 4.0);
        assert_eq!(config.hud.scale, 4.0);
        assert_eq!(config.release.interval, 2.5);
    }

    #[test]
    fn test_apply_env_rejects_garbage() {
        let mut config = FlightdeckConfig::default();
        let result = apply_env(&mut config, |key| {
            (key == env_keys::SCALE).then(|| "fast".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_win_and_validate() {
        let overrides = ConfigOverrides {
            interval: Some(-1.0),
            ..Default::default()
        };
        let result = ConfigLoader::new()
            .with_defaults()
            .with_overrides(overrides)
            .load();
        assert!(result.is_err());

        let overrides = ConfigOverrides {
            service_url: Some("http://10.0.0.2:8000".to_string()),
            offline: true,
            ..Default::default()
        };
        let config = ConfigLoader::new()
            .with_defaults()
            .with_overrides(overrides)
            .load()
            .unwrap();
        assert_eq!(config.service.base_url, "http://10.0.0.2:8000");
        assert!(!config.service.enabled);
    }
}
