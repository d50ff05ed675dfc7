use crate::error::{Error, Result};
use opendal::Operator;
use std::str::FromStr;

pub mod constants;
mod operations;
mod utils;

use self::operations::backup::OpenDalCopier;
use self::operations::list::OpenDalLister;
use self::operations::restore::OpenDalRestorer;
use self::operations::sync::OpenDalSyncer;
use self::operations::{Copier, Lister, Restorer, Syncer};
use crate::wrap_err;

pub use self::utils::path::{bucket_key, ensure_trailing_slash, map_path, resolve_local_path};

/// Storage provider types
#[derive(Debug, Clone, Copy)]
pub enum StorageProvider {
    Oss,
    S3,
    Fs,
}

impl StorageProvider {
    /// URL scheme used when rendering remote keys for this provider.
    pub fn scheme(self) -> &'static str {
        match self {
            Self::Oss => "oss",
            Self::S3 => "s3",
            Self::Fs => "fs",
        }
    }
}

impl FromStr for StorageProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "oss" => Ok(Self::Oss),
            "s3" | "minio" => Ok(Self::S3),
            "fs" => Ok(Self::Fs),
            _ => Err(Error::UnsupportedProvider {
                provider: s.to_string(),
            }),
        }
    }
}

/// Unified storage configuration for different providers
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub provider: StorageProvider,
    pub bucket: String,
    pub access_key_id: Option<String>,
    pub access_key_secret: Option<String>,
    pub endpoint: Option<String>,
    pub region: Option<String>,
    pub root_path: Option<String>,
}

impl StorageConfig {
    pub fn oss(
        bucket: String,
        access_key_id: String,
        access_key_secret: String,
        region: Option<String>,
    ) -> Self {
        Self {
            provider: StorageProvider::Oss,
            bucket,
            access_key_id: Some(access_key_id),
            access_key_secret: Some(access_key_secret),
            endpoint: None,
            region,
            root_path: None,
        }
    }

    pub fn s3(
        bucket: String,
        access_key_id: String,
        secret_access_key: String,
        region: Option<String>,
    ) -> Self {
        Self {
            provider: StorageProvider::S3,
            bucket,
            access_key_id: Some(access_key_id),
            access_key_secret: Some(secret_access_key),
            endpoint: None,
            region,
            root_path: None,
        }
    }

    pub fn fs(root_path: String) -> Self {
        Self {
            provider: StorageProvider::Fs,
            bucket: "local".to_string(),
            access_key_id: None,
            access_key_secret: None,
            endpoint: None,
            region: None,
            root_path: Some(root_path),
        }
    }
}

/// Unified storage client using OpenDAL
#[derive(Clone)]
pub struct StorageClient {
    operator: Operator,
    provider: StorageProvider,
}

impl StorageClient {
    pub async fn new(config: StorageConfig) -> Result<Self> {
        let operator = Self::build_operator(&config)?;
        Ok(Self {
            operator,
            provider: config.provider,
        })
    }

    pub fn provider(&self) -> StorageProvider {
        self.provider
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    fn build_operator(config: &StorageConfig) -> Result<Operator> {
        match &config.provider {
            StorageProvider::Oss => {
                let mut builder = opendal::services::Oss::default().bucket(&config.bucket);
                if let Some(access_key_id) = &config.access_key_id {
                    builder = builder.access_key_id(access_key_id);
                }
                if let Some(access_key_secret) = &config.access_key_secret {
                    builder = builder.access_key_secret(access_key_secret);
                }
                if let Some(endpoint) = &config.endpoint {
                    builder = builder.endpoint(endpoint);
                }
                Ok(Operator::new(builder)?.finish())
            }
            StorageProvider::S3 => {
                let mut builder = opendal::services::S3::default().bucket(&config.bucket);
                if let Some(access_key_id) = &config.access_key_id {
                    builder = builder.access_key_id(access_key_id);
                }
                if let Some(secret_access_key) = &config.access_key_secret {
                    builder = builder.secret_access_key(secret_access_key);
                }
                if let Some(region) = &config.region {
                    builder = builder.region(region);
                }
                if let Some(endpoint) = &config.endpoint {
                    builder = builder.endpoint(endpoint);
                }
                Ok(Operator::new(builder)?.finish())
            }
            StorageProvider::Fs => {
                let root = config.root_path.as_deref().unwrap_or("./");
                let builder = opendal::services::Fs::default().root(root);
                Ok(Operator::new(builder)?.finish())
            }
        }
    }

    /// Pre-flight check that the configured credentials can reach the backend.
    /// Runs before any path is touched.
    pub async fn verify(&self) -> Result<()> {
        log::debug!("verify provider={:?}", self.provider);
        self.operator.check().await?;
        Ok(())
    }

    /// Recursive copy of a local file or directory to the mapped remote key.
    pub async fn backup(&self, local_path: &str, remote_key: &str) -> Result<()> {
        log::debug!(
            "backup provider={:?} local_path={} remote_key={}",
            self.provider,
            local_path,
            remote_key
        );
        let copier = OpenDalCopier::new(self.operator.clone());
        wrap_err!(
            copier.copy(local_path, remote_key).await,
            BackupFailed {
                local_path: local_path.to_string(),
                remote_key: remote_key.to_string()
            }
        )
    }

    /// Directory sync of a local path to the mapped remote key; single files
    /// degrade to a plain copy.
    pub async fn sync(&self, local_path: &str, remote_key: &str) -> Result<()> {
        log::debug!(
            "sync provider={:?} local_path={} remote_key={}",
            self.provider,
            local_path,
            remote_key
        );
        let syncer = OpenDalSyncer::new(self.operator.clone());
        wrap_err!(
            syncer.sync(local_path, remote_key).await,
            SyncFailed {
                local_path: local_path.to_string(),
                remote_key: remote_key.to_string()
            }
        )
    }

    /// Inverse copy of a remote key back to the local path.
    pub async fn restore(&self, remote_key: &str, local_path: &str) -> Result<()> {
        log::debug!(
            "restore provider={:?} remote_key={} local_path={}",
            self.provider,
            remote_key,
            local_path
        );
        let restorer = OpenDalRestorer::new(self.operator.clone());
        wrap_err!(
            restorer.restore(remote_key, local_path).await,
            RestoreFailed {
                remote_key: remote_key.to_string(),
                local_path: local_path.to_string()
            }
        )
    }

    /// List entries under the mapped remote key with human-readable sizing.
    pub async fn list(&self, remote_key: &str) -> Result<()> {
        log::debug!(
            "list provider={:?} remote_key={}",
            self.provider,
            remote_key
        );
        let lister = OpenDalLister::new(self.operator.clone());
        wrap_err!(
            lister.list(remote_key).await,
            ListFailed {
                remote_key: remote_key.to_string()
            }
        )
    }
}
