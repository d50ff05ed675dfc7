use snafu::Snafu;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Configuration file not found: {}", path.display()))]
    ConfigFileNotFound { path: PathBuf },

    #[snafu(display("Failed to read configuration file '{}': {source}", path.display()))]
    ConfigFileUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Invalid configuration file '{}': {source}", path.display()))]
    ConfigFileInvalid {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[snafu(display("Configuration key '{key}' is required but not set"))]
    MissingConfigKey { key: String },

    #[snafu(display("Profile '{profile}' is not defined in the configuration file"))]
    UnknownProfile { profile: String },

    #[snafu(display("Profile '{profile}' failed validation: {source}"))]
    ProfileUnusable { profile: String, source: Box<Error> },

    #[snafu(display("Unsupported storage provider: {provider}"))]
    UnsupportedProvider { provider: String },

    #[snafu(display("Not a valid path: {}", path.display()))]
    InvalidPath { path: PathBuf },

    #[snafu(display("Remote scope not found: {remote_key}"))]
    RemoteScopeNotFound { remote_key: String },

    #[snafu(display("Failed to back up '{local_path}' to '{remote_key}': {source}"))]
    BackupFailed {
        local_path: String,
        remote_key: String,
        source: Box<Error>,
    },

    #[snafu(display("Failed to sync '{local_path}' to '{remote_key}': {source}"))]
    SyncFailed {
        local_path: String,
        remote_key: String,
        source: Box<Error>,
    },

    #[snafu(display("Failed to restore '{remote_key}' to '{local_path}': {source}"))]
    RestoreFailed {
        remote_key: String,
        local_path: String,
        source: Box<Error>,
    },

    #[snafu(display("Failed to list '{remote_key}': {source}"))]
    ListFailed {
        remote_key: String,
        source: Box<Error>,
    },

    #[snafu(display("OpenDAL error: {source}"))]
    OpenDal { source: opendal::Error },

    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },
}

impl From<opendal::Error> for Error {
    fn from(error: opendal::Error) -> Self {
        Error::OpenDal { source: error }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io { source: error }
    }
}
