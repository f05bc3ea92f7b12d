//! Config file discovery, parsing and error-message tests.

use assert_fs::prelude::*;
use metasync_core::{config, ConfigError};
use predicates::prelude::*;

#[test]
fn discovers_local_file_before_user_file() {
    let cwd = assert_fs::TempDir::new().expect("tempdir");
    let user = assert_fs::TempDir::new().expect("tempdir");
    user.child("metasync/config.yaml").write_str("project_id: \"1\"\n").unwrap();

    let found = config::discover_at(cwd.path(), Some(user.path())).expect("user config");
    assert!(found.ends_with("metasync/config.yaml"));

    cwd.child("metasync.yaml").write_str("project_id: \"2\"\n").unwrap();
    let found = config::discover_at(cwd.path(), Some(user.path())).expect("local config");
    assert_eq!(found, cwd.path().join("metasync.yaml"));
}

#[test]
fn no_config_anywhere_is_none() {
    let cwd = assert_fs::TempDir::new().expect("tempdir");
    assert!(config::discover_at(cwd.path(), None).is_none());
}

#[test]
fn loads_numeric_project_id_and_flags() {
    let cwd = assert_fs::TempDir::new().expect("tempdir");
    let file = cwd.child("metasync.yaml");
    file.write_str(
        "public_key: pk\nsecret_key: sk\nproject_id: 31337\nskip_if_in_translation: false\n",
    )
    .unwrap();

    let layer = config::load_at(file.path()).expect("load");
    assert_eq!(layer.project_id.as_deref(), Some("31337"));

    let validated = layer.validate_at(cwd.path()).expect("validate");
    assert_eq!(validated.project_id.as_str(), "31337");
    assert!(!validated.skip_if_in_translation);
}

#[test]
fn empty_file_is_an_empty_layer() {
    let cwd = assert_fs::TempDir::new().expect("tempdir");
    let file = cwd.child("metasync.yaml");
    file.write_str("\n").unwrap();
    let layer = config::load_at(file.path()).expect("load");
    assert_eq!(layer, config::ConfigFile::default());
}

#[test]
fn unknown_key_is_a_parse_error_with_path() {
    let cwd = assert_fs::TempDir::new().expect("tempdir");
    let file = cwd.child("metasync.yaml");
    file.write_str("public_kye: typo\n").unwrap();

    let err = config::load_at(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
    assert!(predicate::str::contains("metasync.yaml").eval(&err.to_string()));
}

#[test]
fn relative_metadata_path_resolves_against_cwd() {
    let cwd = assert_fs::TempDir::new().expect("tempdir");
    cwd.child("store/metadata").create_dir_all().unwrap();

    let layer = config::ConfigFile {
        public_key: Some("pk".into()),
        secret_key: Some("sk".into()),
        project_id: Some("1".into()),
        metadata_path: Some("store/metadata".into()),
        ..Default::default()
    };
    let validated = layer.validate_at(cwd.path()).expect("validate");
    assert_eq!(validated.metadata_root, cwd.path().join("store/metadata"));
}
