use crate::error::{InvalidPathSnafu, Result};
use crate::storage::operations::backup::OpenDalCopier;
use crate::storage::utils::path::build_remote_path;
use async_recursion::async_recursion;
use opendal::Operator;
use std::path::Path;
use tokio::fs;

/// Trait for synchronizing a local directory with remote storage.
pub trait Syncer {
    /// Synchronize a local path with the given remote key, uploading only
    /// files that are missing remotely or whose size differs.
    ///
    /// # Arguments
    /// * `local_path` - Source path on local filesystem (file or directory)
    /// * `remote_key` - Destination key in the bucket
    ///
    /// # Returns
    /// * `Result<()>` - Success or detailed error information
    async fn sync(&self, local_path: &str, remote_key: &str) -> Result<()>;
}

/// Implementation of Syncer for OpenDAL Operator.
pub struct OpenDalSyncer {
    operator: Operator,
    copier: OpenDalCopier,
}

impl OpenDalSyncer {
    /// Create a new syncer with the given OpenDAL operator.
    pub fn new(operator: Operator) -> Self {
        let copier = OpenDalCopier::new(operator.clone());
        Self { operator, copier }
    }

    /// Whether a local file needs uploading: missing remotely or size mismatch.
    async fn needs_upload(&self, local_path: &Path, remote_key: &str) -> Result<bool> {
        let local_size = fs::metadata(local_path).await?.len();
        match self.operator.stat(remote_key).await {
            Ok(meta) => Ok(meta.content_length() != local_size),
            Err(e) if e.kind() == opendal::ErrorKind::NotFound => Ok(true),
            Err(e) => Err(e.into()),
        }
    }

    #[async_recursion]
    async fn sync_recursive(&self, local_path: &str, remote_key: &str) -> Result<()> {
        let mut entries = fs::read_dir(local_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let local_file_path = entry.path();
            let file_name = local_file_path.file_name().unwrap_or_default();
            let file_name_str = file_name.to_string_lossy();
            let child_key = build_remote_path(remote_key, &file_name_str);

            if local_file_path.is_dir() {
                self.sync_recursive(&local_file_path.to_string_lossy(), &child_key)
                    .await?;
            } else if self.needs_upload(&local_file_path, &child_key).await? {
                self.copier
                    .copy_file_streaming(&local_file_path, &child_key, "Synced")
                    .await?;
            } else {
                println!("Up to date: {child_key}");
            }
        }
        Ok(())
    }
}

impl Syncer for OpenDalSyncer {
    async fn sync(&self, local_path: &str, remote_key: &str) -> Result<()> {
        let path = Path::new(local_path);
        if path.is_file() {
            // Directory-sync semantics do not apply to a single object
            self.copier
                .copy_file_streaming(path, remote_key, "Synced")
                .await
        } else if path.is_dir() {
            self.sync_recursive(local_path, remote_key).await
        } else {
            InvalidPathSnafu {
                path: path.to_path_buf(),
            }
            .fail()
        }
    }
}
