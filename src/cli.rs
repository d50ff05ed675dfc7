use clap::{Parser, Subcommand};
use snafu::ensure;
use std::env;
use std::path::Path;

use crate::config::Config;
use crate::error::{Error, InvalidPathSnafu, Result};
use crate::storage::{StorageClient, bucket_key, ensure_trailing_slash, map_path, resolve_local_path};

#[derive(Debug, Parser)]
#[command(
    name = "cloudkeep",
    version,
    about = "Back up and synchronize local paths to object storage"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Back up a local file or directory to the bucket
    #[command(visible_alias = "backup")]
    Bu {
        /// Local path; defaults to the current directory
        path: Option<String>,
    },
    /// Synchronize a local path with its remote counterpart
    Sync {
        /// Local path; defaults to the current directory
        path: Option<String>,
    },
    /// Restore a remote key back to the local path
    #[command(visible_alias = "restore")]
    Rs {
        /// Local path; defaults to the current directory
        path: Option<String>,
    },
    /// List remote keys under the mapped path
    #[command(visible_alias = "list")]
    Ls {
        /// Local path; defaults to the current directory
        path: Option<String>,
    },
}

/// Dispatch a parsed command, running the profile pre-flight check first.
pub async fn run(command: Command, client: StorageClient, config: &Config) -> Result<()> {
    client
        .verify()
        .await
        .map_err(|e| Error::ProfileUnusable {
            profile: config.profile.clone(),
            source: Box::new(e),
        })?;

    let cwd = env::current_dir()?.to_string_lossy().into_owned();
    let home = dirs::home_dir()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    let scheme = client.provider().scheme();

    let arg = match &command {
        Command::Bu { path } | Command::Sync { path } | Command::Rs { path } | Command::Ls { path } => {
            path.clone().unwrap_or_default()
        }
    };
    let local = resolve_local_path(&arg, &cwd, &home);
    let url = map_path(&arg, &cwd, &home, &config.prefix, scheme, &config.bucket);
    let key = bucket_key(&local, &config.prefix);

    // Existence check before any action output or remote invocation; a
    // dangling symlink is neither file nor directory and lands here too
    if matches!(command, Command::Bu { .. } | Command::Sync { .. }) {
        let path = Path::new(&local);
        ensure!(
            path.is_file() || path.is_dir(),
            InvalidPathSnafu {
                path: path.to_path_buf()
            }
        );
    }

    match command {
        Command::Bu { .. } => {
            println!("Backing up {local} -> {url}");
            client.backup(&local, &key).await
        }
        Command::Sync { .. } => {
            println!("Syncing {local} -> {url}");
            client.sync(&local, &key).await
        }
        Command::Rs { .. } => {
            println!("Restoring {url} -> {local}");
            client.restore(&key, &local).await
        }
        Command::Ls { .. } => {
            // Listing always scopes to the mapped key with a trailing separator
            let key = if key.is_empty() {
                key
            } else {
                ensure_trailing_slash(&key)
            };
            client.list(&key).await
        }
    }
}
