use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "waypost.toml",
    "config/waypost.toml",
    "crates/config/waypost.toml",
    "../waypost.toml",
    "../config/waypost.toml",
    "../crates/config/waypost.toml",
];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub opaque_id: OpaqueIdSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 7080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://waypost.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Settings for the opaque identifier codec.
///
/// The salt must be overridden in production: every opaque identifier ever
/// issued changes (and stops decoding) when the salt changes.
///
/// ```
/// use waypost_config::OpaqueIdSettings;
///
/// let settings = OpaqueIdSettings::default();
/// assert_eq!(settings.min_length, 8);
/// assert!(settings.alphabet.len() >= 16);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpaqueIdSettings {
    #[serde(default = "OpaqueIdSettings::default_salt")]
    pub salt: String,
    #[serde(default = "OpaqueIdSettings::default_min_length")]
    pub min_length: usize,
    #[serde(default = "OpaqueIdSettings::default_alphabet")]
    pub alphabet: String,
}

impl OpaqueIdSettings {
    fn default_salt() -> String {
        "default_salt_change_in_production".to_string()
    }

    const fn default_min_length() -> usize {
        8
    }

    fn default_alphabet() -> String {
        "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890".to_string()
    }
}

impl Default for OpaqueIdSettings {
    fn default() -> Self {
        Self {
            salt: Self::default_salt(),
            min_length: Self::default_min_length(),
            alphabet: Self::default_alphabet(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use waypost_config::load;
///
/// std::env::remove_var("WAYPOST_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder();
    builder = builder
        .set_default("http.address", defaults.http.address.clone())
        .unwrap()
        .set_default("http.port", i64::from(defaults.http.port))
        .unwrap()
        .set_default("database.url", defaults.database.url.clone())
        .unwrap()
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )
        .unwrap()
        .set_default("opaque_id.salt", defaults.opaque_id.salt.clone())
        .unwrap()
        .set_default(
            "opaque_id.min_length",
            i64::try_from(defaults.opaque_id.min_length).unwrap_or(i64::MAX),
        )
        .unwrap()
        .set_default("opaque_id.alphabet", defaults.opaque_id.alphabet.clone())
        .unwrap();

    let environment_overrides = config::Environment::with_prefix("WAYPOST").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("WAYPOST_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via WAYPOST_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    debug!(?config, "loaded backend configuration");
    Ok(config)
}
