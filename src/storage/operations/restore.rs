use crate::error::Result;
use crate::storage::utils::path::{ensure_trailing_slash, get_root_relative_path};
use futures::stream::TryStreamExt;
use opendal::{EntryMode, Operator};
use std::path::Path;
use tokio::fs;

/// Trait for restoring remote keys back to the local filesystem.
pub trait Restorer {
    /// Restore a remote key (single object or subtree) to the given local path.
    ///
    /// # Arguments
    /// * `remote_key` - Source key in the bucket (file or directory)
    /// * `local_path` - Destination path on local filesystem
    ///
    /// # Returns
    /// * `Result<()>` - Success or detailed error information
    async fn restore(&self, remote_key: &str, local_path: &str) -> Result<()>;
}

/// Implementation of Restorer for OpenDAL Operator.
pub struct OpenDalRestorer {
    operator: Operator,
}

impl OpenDalRestorer {
    /// Create a new restorer with the given OpenDAL operator.
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }

    async fn restore_file(&self, remote_key: &str, local_file_path: &Path) -> Result<()> {
        if let Some(parent) = local_file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let data = self.operator.read(remote_key).await?;
        fs::write(local_file_path, data.to_vec()).await?;
        println!("Restored: {remote_key} -> {}", local_file_path.display());
        Ok(())
    }
}

impl Restorer for OpenDalRestorer {
    async fn restore(&self, remote_key: &str, local_path: &str) -> Result<()> {
        // A mapped key derived from a file path names a single object
        if !remote_key.ends_with('/') {
            if let Ok(meta) = self.operator.stat(remote_key).await {
                if meta.mode() == EntryMode::FILE {
                    return self.restore_file(remote_key, Path::new(local_path)).await;
                }
            }
        }

        let dir_key = ensure_trailing_slash(remote_key);
        let mut stream = self.operator.lister_with(&dir_key).recursive(true).await?;

        while let Some(entry) = stream.try_next().await? {
            let meta = entry.metadata();
            let remote_file_path = entry.path();
            if meta.mode() == EntryMode::DIR
                && remote_file_path.trim_end_matches('/') == remote_key.trim_end_matches('/')
            {
                // The listed root itself needs no local counterpart beyond local_path
                fs::create_dir_all(local_path).await?;
                continue;
            }
            let mut relative_path = get_root_relative_path(remote_file_path, remote_key);
            if relative_path.is_empty() {
                // Fallback: use base name
                relative_path = Path::new(remote_file_path)
                    .file_name()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default();
            }
            let local_file_path = Path::new(local_path).join(relative_path);

            if meta.mode() == EntryMode::DIR {
                fs::create_dir_all(&local_file_path).await?;
            } else {
                self.restore_file(remote_file_path, &local_file_path).await?;
            }
        }

        Ok(())
    }
}
