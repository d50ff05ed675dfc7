use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::storage::constants::DEFAULT_FS_ROOT;
use crate::storage::{StorageConfig, StorageProvider};

/// Environment variable that overrides the default configuration file location.
pub const CONFIG_PATH_ENV: &str = "CLOUDKEEP_CONFIG";

/// Raw on-disk configuration shape. Required keys are modeled as `Option` so
/// a missing key surfaces as `MissingConfigKey` rather than a serde parse error.
#[derive(Debug, Deserialize)]
struct RawConfig {
    bucket: Option<String>,
    profile: Option<String>,
    prefix: Option<String>,
    #[serde(default)]
    profiles: HashMap<String, RawProfile>,
}

/// A named credential profile for the storage backend.
#[derive(Debug, Deserialize)]
struct RawProfile {
    #[serde(default = "default_provider")]
    provider: String,
    access_key_id: Option<String>,
    access_key_secret: Option<String>,
    region: Option<String>,
    endpoint: Option<String>,
    root_path: Option<String>,
}

fn default_provider() -> String {
    "s3".to_string()
}

/// Resolved configuration, loaded once at process start and immutable afterward.
#[derive(Debug, Clone)]
pub struct Config {
    pub bucket: String,
    pub profile: String,
    pub prefix: String,
    pub storage: StorageConfig,
}

/// Configuration file location: `$CLOUDKEEP_CONFIG` if set, otherwise
/// `<config dir>/cloudkeep/config.toml`.
pub fn config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cloudkeep")
        .join("config.toml")
}

/// Load configuration from the default location.
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path())
}

/// Load and validate configuration from a specific file.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(Error::ConfigFileNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|source| Error::ConfigFileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: RawConfig = toml::from_str(&contents).map_err(|source| Error::ConfigFileInvalid {
        path: path.to_path_buf(),
        source,
    })?;

    let bucket = require_key(raw.bucket, "bucket")?;
    let profile = require_key(raw.profile, "profile")?;
    let prefix = require_key(raw.prefix, "prefix")?;

    let raw_profile = raw
        .profiles
        .get(&profile)
        .ok_or_else(|| Error::UnknownProfile {
            profile: profile.clone(),
        })?;
    let storage = build_storage_config(&bucket, raw_profile)?;

    Ok(Config {
        bucket,
        profile,
        prefix,
        storage,
    })
}

fn require_key(value: Option<String>, key: &str) -> Result<String> {
    value.filter(|v| !v.is_empty()).ok_or_else(|| Error::MissingConfigKey {
        key: key.to_string(),
    })
}

fn build_storage_config(bucket: &str, profile: &RawProfile) -> Result<StorageConfig> {
    let provider: StorageProvider = profile.provider.parse()?;
    let mut config = match provider {
        StorageProvider::Oss => StorageConfig::oss(
            bucket.to_string(),
            profile.access_key_id.clone().unwrap_or_default(),
            profile.access_key_secret.clone().unwrap_or_default(),
            profile.region.clone(),
        ),
        StorageProvider::S3 => StorageConfig::s3(
            bucket.to_string(),
            profile.access_key_id.clone().unwrap_or_default(),
            profile.access_key_secret.clone().unwrap_or_default(),
            profile.region.clone(),
        ),
        StorageProvider::Fs => StorageConfig::fs(
            profile
                .root_path
                .clone()
                .unwrap_or_else(|| DEFAULT_FS_ROOT.to_string()),
        ),
    };
    config.endpoint = profile.endpoint.clone();
    Ok(config)
}
