use crate::error::{InvalidPathSnafu, Result};
use crate::storage::constants::{DEFAULT_BUFFER_SIZE, PROGRESS_UPDATE_INTERVAL};
use crate::storage::utils::path::build_remote_path;
use crate::storage::utils::progress::ConsoleProgressReporter;
use async_recursion::async_recursion;
use opendal::Operator;
use std::path::Path;
use tokio::fs;
use tokio::io::{AsyncReadExt, BufReader};

/// Trait for copying local files and directories to remote storage.
pub trait Copier {
    /// Copy a local file or directory to the given remote key.
    ///
    /// # Arguments
    /// * `local_path` - Source path on local filesystem (file or directory)
    /// * `remote_key` - Destination key in the bucket
    ///
    /// # Returns
    /// * `Result<()>` - Success or detailed error information
    async fn copy(&self, local_path: &str, remote_key: &str) -> Result<()>;
}

/// Implementation of Copier for OpenDAL Operator.
pub struct OpenDalCopier {
    operator: Operator,
}

impl OpenDalCopier {
    /// Create a new copier with the given OpenDAL operator.
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }

    /// Copy a single file with streaming progress. The remote key already
    /// carries the file name, since it is derived from the full local path.
    /// `action` labels the success line for the invoking operation.
    pub(crate) async fn copy_file_streaming(
        &self,
        local_path: &Path,
        remote_key: &str,
        action: &str,
    ) -> Result<()> {
        let file = fs::File::open(local_path).await?;
        let file_size = file.metadata().await?.len();
        let mut reader = BufReader::new(file);
        let mut buffer = vec![0u8; DEFAULT_BUFFER_SIZE];
        let mut total_bytes = 0u64;
        let mut writer = self.operator.writer(remote_key).await?;

        let step_bytes = DEFAULT_BUFFER_SIZE as u64 * PROGRESS_UPDATE_INTERVAL;
        let reporter = ConsoleProgressReporter::new(
            format!("Copying {}", local_path.display()),
            Some(file_size),
            step_bytes,
        );

        loop {
            let bytes_read = reader.read(&mut buffer).await?;
            if bytes_read == 0 {
                break;
            }
            writer.write(buffer[..bytes_read].to_vec()).await?;
            total_bytes += bytes_read as u64;
            reporter.maybe_report(total_bytes);
        }
        writer.close().await?;
        println!(
            "{action}: {} -> {remote_key} ({total_bytes} bytes)",
            local_path.display(),
        );
        Ok(())
    }

    /// Copy a directory recursively, preserving structure under the key.
    #[async_recursion]
    async fn copy_recursive(&self, local_path: &str, remote_key: &str) -> Result<()> {
        let mut entries = fs::read_dir(local_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let local_file_path = entry.path();
            let file_name = local_file_path.file_name().unwrap_or_default();
            let file_name_str = file_name.to_string_lossy();
            let child_key = build_remote_path(remote_key, &file_name_str);

            if local_file_path.is_dir() {
                self.copy_recursive(&local_file_path.to_string_lossy(), &child_key)
                    .await?;
            } else {
                self.copy_file_streaming(&local_file_path, &child_key, "Backed up")
                    .await?;
            }
        }
        Ok(())
    }
}

impl Copier for OpenDalCopier {
    async fn copy(&self, local_path: &str, remote_key: &str) -> Result<()> {
        let path = Path::new(local_path);
        if path.is_file() {
            self.copy_file_streaming(path, remote_key, "Backed up").await
        } else if path.is_dir() {
            self.copy_recursive(local_path, remote_key).await
        } else {
            // Nonexistent paths and dangling symlinks land here
            InvalidPathSnafu {
                path: path.to_path_buf(),
            }
            .fail()
        }
    }
}
