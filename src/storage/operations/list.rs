use crate::error::{RemoteScopeNotFoundSnafu, Result};
use futures::stream::TryStreamExt;
use opendal::Operator;
use snafu::ensure;
use std::fmt;

/// Trait for listing keys under a prefix in object storage.
pub trait Lister {
    /// List entries directly under the given key with human-readable sizing.
    ///
    /// # Arguments
    /// * `remote_key` - Key prefix to list, with trailing separator
    ///
    /// # Returns
    /// * `Result<()>` - Success or detailed error information
    async fn list(&self, remote_key: &str) -> Result<()>;
}

/// Implementation of Lister for OpenDAL Operator.
pub struct OpenDalLister {
    operator: Operator,
}

impl OpenDalLister {
    /// Create a new lister with the given OpenDAL operator.
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }
}

impl Lister for OpenDalLister {
    async fn list(&self, remote_key: &str) -> Result<()> {
        let mut lister = self.operator.lister_with(remote_key).await?;

        // The backend reports a missing scope as an empty stream, so an empty
        // listing is the nonexistent-scope failure and must surface as one
        let mut seen = false;
        while let Some(entry) = lister.try_next().await? {
            seen = true;
            println!("{}", FileInfo::from_entry(&entry));
        }
        ensure!(seen, RemoteScopeNotFoundSnafu { remote_key });

        Ok(())
    }
}

/// File information for listing output.
struct FileInfo {
    path: String,
    size: u64,
    modified: Option<String>,
    is_dir: bool,
}

impl FileInfo {
    fn from_entry(entry: &opendal::Entry) -> Self {
        let meta = entry.metadata();
        Self {
            path: entry.path().to_string(),
            size: meta.content_length(),
            modified: meta.last_modified().map(|t| t.to_rfc3339()),
            is_dir: meta.mode().is_dir(),
        }
    }
}

impl fmt::Display for FileInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file_type = if self.is_dir { "DIR" } else { "FILE" };
        let size_str = if self.is_dir {
            "-".to_string()
        } else {
            crate::storage::utils::size::format_size(self.size)
        };
        let modified = self.modified.as_deref().unwrap_or("Unknown");
        write!(f, "{file_type:<6} {size_str:>10} {modified} {}", self.path)
    }
}
