//! `metasync` binary: argument handling, config layering and dry runs.
//! None of these reach the network.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn metasync(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("metasync").expect("metasync binary");
    cmd.current_dir(cwd)
        .env("HOME", cwd)
        .env("XDG_CONFIG_HOME", cwd.join(".config"))
        .env_remove("ONESKY_PUBLIC_KEY")
        .env_remove("ONESKY_SECRET_KEY")
        .env_remove("ONESKY_ITUNES_PROJECT_ID")
        .env_remove("ONESKY_SKIP_IF_IN_TRANSLATION")
        .env_remove("RUST_LOG");
    cmd
}

fn with_keys(cmd: &mut Command) -> &mut Command {
    cmd.env("ONESKY_PUBLIC_KEY", "pk")
        .env("ONESKY_SECRET_KEY", "sk")
        .env("ONESKY_ITUNES_PROJECT_ID", "42")
}

fn seed_locale(root: &Path, locale: &str, keywords: &str) {
    let dir = root.join("metadata").join(locale);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("name.txt"), "Lumen\n").unwrap();
    fs::write(dir.join("description.txt"), "A photo editor.\n").unwrap();
    fs::write(dir.join("release_notes.txt"), "Bug fixes\n").unwrap();
    fs::write(dir.join("keywords.txt"), keywords).unwrap();
}

#[test]
fn upload_dry_run_prints_document() {
    let cwd = TempDir::new().unwrap();
    seed_locale(cwd.path(), "en-US", "photo,editor\n");

    with_keys(&mut metasync(cwd.path()))
        .args(["upload", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loading metadata from en-US"))
        .stdout(predicate::str::contains("Found 2 keywords"))
        .stdout(predicate::str::contains("\"APP_NAME\": \"Lumen\""))
        .stdout(predicate::str::contains("\"photo\": \"photo\""));
}

#[test]
fn upload_warns_when_keywords_lack_commas() {
    let cwd = TempDir::new().unwrap();
    seed_locale(cwd.path(), "fr-FR", "photo editor\n");

    with_keys(&mut metasync(cwd.path()))
        .args(["upload", "--dry-run", "--itunes-locale", "fr-FR", "--onesky-locale", "fr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 keyword\n"))
        .stdout(predicate::str::contains("would upload for fr:"))
        .stderr(predicate::str::contains("use commas (,) to separate keywords"));
}

#[test]
fn upload_without_public_key_fails() {
    let cwd = TempDir::new().unwrap();
    seed_locale(cwd.path(), "en-US", "a,b");

    metasync(cwd.path())
        .args(["upload", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no public key for OneSky given"));
}

#[test]
fn upload_missing_field_file_names_field_and_path() {
    let cwd = TempDir::new().unwrap();
    seed_locale(cwd.path(), "en-US", "a,b");
    fs::remove_file(cwd.path().join("metadata/en-US/keywords.txt")).unwrap();

    with_keys(&mut metasync(cwd.path()))
        .args(["upload", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("problem reading app keywords"))
        .stderr(predicate::str::contains("keywords.txt"));
}

#[test]
fn config_file_supplies_credentials_and_path() {
    let cwd = TempDir::new().unwrap();
    let store = cwd.path().join("store");
    fs::create_dir_all(&store).unwrap();
    seed_locale(&store, "de-DE", "a,b,c");
    fs::write(
        cwd.path().join("metasync.yaml"),
        "public_key: pk\nsecret_key: sk\nproject_id: 7\nmetadata_path: store/metadata\n",
    )
    .unwrap();

    metasync(cwd.path())
        .args(["upload", "--dry-run", "--itunes-locale", "de-DE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 keywords"));
}

#[test]
fn download_requires_itunes_locale() {
    let cwd = TempDir::new().unwrap();
    with_keys(&mut metasync(cwd.path()))
        .arg("download")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--itunes-locale"));
}

#[test]
fn download_rejects_missing_metadata_path() {
    let cwd = TempDir::new().unwrap();
    with_keys(&mut metasync(cwd.path()))
        .args(["download", "--itunes-locale", "de-DE", "--metadata-path", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("couldn't find metadata directory"));
}
