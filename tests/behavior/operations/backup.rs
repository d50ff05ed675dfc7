use crate::*;
use assert_cmd::prelude::*;
use cloudkeep::error::Result;
use cloudkeep::storage::StorageClient;
use libtest_mimic::Trial;
use predicates::prelude::*;

pub fn tests(client: &StorageClient, tests: &mut Vec<Trial>) {
    tests.extend(async_trials!(
        client,
        backup_single_file,
        backup_directory_recursively,
        backup_prints_mapped_remote_key,
        backup_rejects_invalid_path
    ));

    #[cfg(unix)]
    tests.extend(async_trials!(client, backup_rejects_dangling_symlink));
}

async fn backup_single_file(client: StorageClient) -> Result<()> {
    let dir = TEST_ENV.new_local_dir("bu-file");
    let file = dir.join("a.txt");
    tokio::fs::write(&file, b"hello cloudkeep").await?;

    cloudkeep_cmd()
        .arg("bu")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Backed up"));

    let key = TEST_ENV.key_for(&file);
    let uploaded = client.operator().read(&key).await?;
    assert_eq!(uploaded.to_vec(), b"hello cloudkeep");
    Ok(())
}

async fn backup_directory_recursively(client: StorageClient) -> Result<()> {
    let dir = TEST_ENV.new_local_dir("bu-dir");
    tokio::fs::write(dir.join("a.txt"), b"top").await?;
    tokio::fs::create_dir_all(dir.join("nested")).await?;
    tokio::fs::write(dir.join("nested/b.txt"), b"deep").await?;

    cloudkeep_cmd().arg("bu").arg(&dir).assert().success();

    let key = TEST_ENV.key_for(&dir);
    let top = client.operator().read(&format!("{key}/a.txt")).await?;
    let deep = client.operator().read(&format!("{key}/nested/b.txt")).await?;
    assert_eq!(top.to_vec(), b"top");
    assert_eq!(deep.to_vec(), b"deep");
    Ok(())
}

async fn backup_prints_mapped_remote_key(_client: StorageClient) -> Result<()> {
    let dir = TEST_ENV.new_local_dir("bu-url");
    tokio::fs::write(dir.join("a.txt"), b"x").await?;

    let key = TEST_ENV.key_for(&dir);
    cloudkeep_cmd()
        .arg("bu")
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("fs://local/{key}")));
    Ok(())
}

async fn backup_rejects_invalid_path(_client: StorageClient) -> Result<()> {
    let absent = TEST_ENV.local_root.join("definitely-absent");

    // Validation happens before any action output or remote invocation
    cloudkeep_cmd()
        .arg("bu")
        .arg(&absent)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Backing up").not())
        .stderr(predicate::str::contains("Not a valid path"));
    Ok(())
}

#[cfg(unix)]
async fn backup_rejects_dangling_symlink(_client: StorageClient) -> Result<()> {
    let dir = TEST_ENV.new_local_dir("bu-dangling");
    let target = dir.join("target.txt");
    let link = dir.join("link.txt");
    tokio::fs::write(&target, b"soon gone").await?;
    std::os::unix::fs::symlink(&target, &link)?;
    tokio::fs::remove_file(&target).await?;

    // The link itself exists but resolves to nothing, so it is neither a
    // file nor a directory
    cloudkeep_cmd()
        .arg("bu")
        .arg(&link)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Not a valid path"));
    Ok(())
}
