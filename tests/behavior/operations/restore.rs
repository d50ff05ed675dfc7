use crate::*;
use assert_cmd::prelude::*;
use cloudkeep::error::Result;
use cloudkeep::storage::StorageClient;
use libtest_mimic::Trial;
use predicates::prelude::*;

pub fn tests(client: &StorageClient, tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        client,
        restore_directory_round_trip,
        restore_single_file
    ));
}

async fn restore_directory_round_trip(_client: StorageClient) -> Result<()> {
    let dir = TEST_ENV.new_local_dir("rs-dir");
    tokio::fs::write(dir.join("a.txt"), b"alpha").await?;
    tokio::fs::create_dir_all(dir.join("nested")).await?;
    tokio::fs::write(dir.join("nested/b.txt"), b"beta").await?;

    cloudkeep_cmd().arg("bu").arg(&dir).assert().success();

    tokio::fs::remove_dir_all(&dir).await?;
    cloudkeep_cmd()
        .arg("rs")
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored"));

    assert_eq!(tokio::fs::read(dir.join("a.txt")).await?, b"alpha");
    assert_eq!(tokio::fs::read(dir.join("nested/b.txt")).await?, b"beta");
    Ok(())
}

async fn restore_single_file(_client: StorageClient) -> Result<()> {
    let dir = TEST_ENV.new_local_dir("rs-file");
    let file = dir.join("solo.txt");
    tokio::fs::write(&file, b"come back").await?;

    cloudkeep_cmd().arg("bu").arg(&file).assert().success();

    tokio::fs::remove_file(&file).await?;
    cloudkeep_cmd()
        .arg("rs")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored"));

    assert_eq!(tokio::fs::read(&file).await?, b"come back");
    Ok(())
}
