use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::PlannerOptions;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub geocoding: GeocodingSettings,
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingSettings {
    #[serde(default = "default_geocoding_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    pub timeout_secs: Option<u64>,
    pub language: Option<String>,
}

fn default_geocoding_endpoint() -> String { "https://maps.googleapis.com/maps/api".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    #[serde(default = "default_snap_max_radius_km")]
    pub snap_max_radius_km: f64,
    #[serde(default = "default_fuzz_radius_km")]
    pub fuzz_radius_km: f64,
    #[serde(default = "default_max_radius_multiplier")]
    pub max_radius_multiplier: f64,
    #[serde(default = "default_adjust_epsilon_deg")]
    pub adjust_epsilon_deg: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            snap_max_radius_km: default_snap_max_radius_km(),
            fuzz_radius_km: default_fuzz_radius_km(),
            max_radius_multiplier: default_max_radius_multiplier(),
            adjust_epsilon_deg: default_adjust_epsilon_deg(),
        }
    }
}

impl From<&EngineSettings> for PlannerOptions {
    fn from(engine: &EngineSettings) -> Self {
        PlannerOptions {
            snap_max_radius_km: engine.snap_max_radius_km,
            max_radius_multiplier: engine.max_radius_multiplier,
            adjust_epsilon_deg: engine.adjust_epsilon_deg,
        }
    }
}

fn default_snap_max_radius_km() -> f64 { 5.0 }
fn default_fuzz_radius_km() -> f64 { 0.5 }
fn default_max_radius_multiplier() -> f64 { 2.0 }
fn default_adjust_epsilon_deg() -> f64 { 1e-4 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MEETPOINT_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MEETPOINT__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("MEETPOINT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("MEETPOINT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn planner_options(&self) -> PlannerOptions {
        PlannerOptions::from(&self.engine)
    }
}

/// Apply well-known environment variables that don't follow the prefix scheme
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    // The key is shared with the rest of the deployment under its vendor name
    if let Ok(api_key) = env::var("GOOGLE_MAPS_API_KEY") {
        builder = builder.set_override("geocoding.api_key", api_key)?;
    }

    builder.build()
}
