//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::api::ClientConfig;
use crate::geo::BorderType;
use crate::scale::{BoundaryMode, ScaleError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub map: MapConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dashboard API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub csrf_token: Option<String>,
}

fn default_endpoint() -> String {
    "http://localhost:8000/va_analytics/api/dashboard".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_secs: default_request_timeout(),
            csrf_token: None,
        }
    }
}

impl ApiConfig {
    /// Client settings derived from this section
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            endpoint: self.endpoint.clone(),
            request_timeout_ms: self.request_timeout_secs * 1000,
            csrf_token: self.csrf_token.clone(),
        }
    }
}

/// Choropleth map configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    /// GeoJSON boundary file, local path or http(s) URL
    #[serde(default = "default_geojson")]
    pub geojson: String,

    #[serde(default)]
    pub border: BorderType,

    #[serde(default)]
    pub boundary_mode: BoundaryMode,
}

fn default_geojson() -> String {
    "http://localhost:8000/static/data/zambia_geojson.json".to_string()
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            geojson: default_geojson(),
            border: BorderType::default(),
            boundary_mode: BoundaryMode::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load from default locations or environment.
    ///
    /// The first existing file wins. A file that exists but cannot be read
    /// or parsed is an error, never skipped.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("va-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/va-dashboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        Self::load_first(config_paths.iter().flatten())
    }

    /// Load the first existing file among `paths`, or the defaults if none exist
    pub fn load_first<'a>(
        paths: impl IntoIterator<Item = &'a PathBuf>,
    ) -> Result<Self, ConfigError> {
        for path in paths {
            if path.exists() {
                let config = Self::load_with_env(path)?;
                tracing::info!("Loaded config from {:?}", path);
                return Ok(config);
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(endpoint) = lookup("VA_DASHBOARD_ENDPOINT") {
            self.api.endpoint = endpoint;
        }
        if let Some(token) = lookup("VA_DASHBOARD_CSRF_TOKEN") {
            self.api.csrf_token = Some(token);
        }

        if let Some(geojson) = lookup("VA_DASHBOARD_GEOJSON") {
            self.map.geojson = geojson;
        }
        if let Some(mode) = lookup("VA_DASHBOARD_BOUNDARY_MODE") {
            self.map.boundary_mode = mode.parse().map_err(|e: ScaleError| ConfigError::Env {
                var: "VA_DASHBOARD_BOUNDARY_MODE",
                error: e.to_string(),
            })?;
        }

        if let Some(level) = lookup("VA_DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("VA_DASHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid {var}: {error}")]
    Env { var: &'static str, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# VA Dashboard Configuration
#
# Environment variables override these settings:
# - VA_DASHBOARD_ENDPOINT
# - VA_DASHBOARD_CSRF_TOKEN
# - VA_DASHBOARD_GEOJSON
# - VA_DASHBOARD_BOUNDARY_MODE
# - VA_DASHBOARD_LOG_LEVEL
# - VA_DASHBOARD_LOG_FORMAT

[api]
# Dashboard analytics endpoint
endpoint = "http://localhost:8000/va_analytics/api/dashboard"

# Request timeout in seconds
request_timeout_secs = 30

# CSRF token sent as X-CSRFToken
# csrf_token = ""

[map]
# GeoJSON boundary file (path or URL)
geojson = "http://localhost:8000/static/data/zambia_geojson.json"

# Border level: Province or District
border = "Province"

# How counts exactly on a breakpoint are colored:
#   exclusive       - no bucket, drawn with the no-data color
#   inclusive-lower - counted in the bucket starting at that breakpoint
boundary_mode = "exclusive"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(
            config.api.endpoint,
            "http://localhost:8000/va_analytics/api/dashboard"
        );
        assert_eq!(config.map.border, BorderType::Province);
        assert_eq!(config.map.boundary_mode, BoundaryMode::Exclusive);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.api.client_config().request_timeout_ms, 30_000);
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.map.boundary_mode, BoundaryMode::Exclusive);
        assert!(config.api.csrf_token.is_none());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[map]\nborder = \"District\"\nboundary_mode = \"inclusive-lower\"\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.map.border, BorderType::District);
        assert_eq!(config.map.boundary_mode, BoundaryMode::InclusiveLower);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.api.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[map]\nboundary_mode = \"closed\"").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/va-dashboard.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_malformed_file_in_search_path_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let broken = dir.path().join("config.toml");
        std::fs::write(
            &broken,
            "[map]\nborder = \"Distrct\"\nboundary_mode = \"inclusive-lower\"\n",
        )
        .unwrap();

        let err = Config::load_first([&missing, &broken]).unwrap_err();
        match err {
            ConfigError::Parse { path, .. } => assert_eq!(path, broken),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_first_existing_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.toml");
        let second = dir.path().join("second.toml");
        std::fs::write(&first, "[map]\nboundary_mode = \"inclusive-lower\"\n").unwrap();
        std::fs::write(&second, "this is not toml").unwrap();

        let config = Config::load_first([&first, &second]).unwrap();
        assert_eq!(config.map.boundary_mode, BoundaryMode::InclusiveLower);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("VA_DASHBOARD_ENDPOINT", "https://va.example.org/api/dashboard"),
            ("VA_DASHBOARD_CSRF_TOKEN", "secret"),
            ("VA_DASHBOARD_GEOJSON", "/srv/zambia.json"),
            ("VA_DASHBOARD_BOUNDARY_MODE", "inclusive-lower"),
            ("VA_DASHBOARD_LOG_LEVEL", "debug"),
            ("VA_DASHBOARD_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|var| vars.get(var).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.api.endpoint, "https://va.example.org/api/dashboard");
        assert_eq!(config.api.csrf_token.as_deref(), Some("secret"));
        assert_eq!(config.map.geojson, "/srv/zambia.json");
        assert_eq!(config.map.boundary_mode, BoundaryMode::InclusiveLower);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_invalid_boundary_mode_override() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|var| {
                (var == "VA_DASHBOARD_BOUNDARY_MODE").then(|| "closed".to_string())
            })
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Env {
                var: "VA_DASHBOARD_BOUNDARY_MODE",
                ..
            }
        ));
        assert_eq!(config.map.boundary_mode, BoundaryMode::Exclusive);
    }
}
