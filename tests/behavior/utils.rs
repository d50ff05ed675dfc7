use assert_cmd::prelude::*;
use cloudkeep::config::CONFIG_PATH_ENV;
use cloudkeep::error::Result;
use cloudkeep::storage::{StorageClient, StorageConfig};
use libtest_mimic::{Failed, Trial};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;
use uuid::Uuid;

pub static TEST_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
});

/// Hermetic test environment: the fs provider plays the remote bucket, the
/// prefix strips the local side, and a generated config file wires both up.
pub struct TestEnv {
    pub local_root: PathBuf,
    pub remote_root: PathBuf,
    pub config_path: PathBuf,
    // Held so the directory survives for the whole test process
    _tempdir: tempfile::TempDir,
}

pub static TEST_ENV: LazyLock<TestEnv> =
    LazyLock::new(|| TestEnv::create().expect("failed to set up test environment"));

impl TestEnv {
    fn create() -> std::io::Result<Self> {
        let tempdir = tempfile::tempdir()?;
        let local_root = tempdir.path().join("local");
        let remote_root = tempdir.path().join("remote");
        std::fs::create_dir_all(&local_root)?;
        std::fs::create_dir_all(&remote_root)?;

        let config_path = tempdir.path().join("config.toml");
        let contents = format!(
            r#"bucket = "local"
profile = "behavior"
prefix = "{}/"

[profiles.behavior]
provider = "fs"
root_path = "{}"
"#,
            local_root.display(),
            remote_root.display()
        );
        std::fs::write(&config_path, contents)?;

        Ok(Self {
            local_root,
            remote_root,
            config_path,
            _tempdir: tempdir,
        })
    }

    /// Create a unique local working directory for one test.
    pub fn new_local_dir(&self, name: &str) -> PathBuf {
        let dir = self.local_root.join(format!("{name}-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// The in-bucket key a local path under `local_root` maps to.
    pub fn key_for(&self, local: &Path) -> String {
        let prefix = format!("{}/", self.local_root.display());
        local.display().to_string().replacen(&prefix, "", 1)
    }
}

pub async fn init_test_service() -> Result<StorageClient> {
    let config = StorageConfig::fs(TEST_ENV.remote_root.display().to_string());
    StorageClient::new(config).await
}

/// A cloudkeep Command with clean environment pointed at the test config.
pub fn cloudkeep_cmd() -> Command {
    let mut cmd = Command::cargo_bin("cloudkeep").unwrap();
    cmd.env_clear()
        .env("RUST_LOG", "info")
        .env(CONFIG_PATH_ENV, &TEST_ENV.config_path);
    cmd
}

pub fn build_async_trial<F, Fut>(name: &str, client: &StorageClient, f: F) -> Trial
where
    F: FnOnce(StorageClient) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = Result<()>> + Send,
{
    let handle = TEST_RUNTIME.handle().clone();
    let client = client.clone();

    Trial::test(format!("behavior::{name}"), move || {
        handle
            .block_on(f(client))
            .map_err(|err| Failed::from(err.to_string()))
    })
}

#[macro_export]
macro_rules! async_trials {
    ($client:ident, $($test:ident),*) => {
        vec![$(build_async_trial(stringify!($test), $client, $test),)*]
    };
}
