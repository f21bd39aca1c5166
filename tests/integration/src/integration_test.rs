//! Cross-crate scenarios against a real home directory

use pretty_assertions::assert_eq;
use rstest::rstest;
use runmode_core::{
    Home, InstanceId, MapProperties, RUN_MODE_INSTALL_OPTIONS, RUN_MODES, Settings, SettingsFile,
    SettingsReport,
};
use runmode_fs::{BlobStore, HomePath, NormalizedPath};
use std::fs;
use tempfile::TempDir;

fn modes(settings: &Settings) -> Vec<String> {
    settings.run_modes().iter().map(String::from).collect()
}

#[rstest]
#[case("settings.toml", "[instance]\nname = \"author-1\"\n\n[run-modes]\nmodes = \"author,dev\"\n")]
#[case(
    "settings.json",
    r#"{"instance": {"name": "author-1"}, "run-modes": {"modes": "author,dev"}}"#
)]
#[case("settings.yaml", "instance:\n  name: author-1\nrun-modes:\n  modes: author,dev\n")]
fn settings_file_formats(#[case] file_name: &str, #[case] content: &str) {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(file_name), content).unwrap();

    let settings = Home::new(temp.path())
        .load_settings(&MapProperties::new())
        .unwrap();

    assert_eq!(settings.name(), "author-1");
    assert_eq!(modes(&settings), vec!["author", "dev"]);
}

#[test]
fn overrides_beat_settings_file() {
    let temp = TempDir::new().unwrap();
    let file = SettingsFile {
        run_modes: runmode_core::settings::RunModeSection {
            modes: Some("author".into()),
            install_options: Some("crx3,crx3mongo".into()),
            ..Default::default()
        },
        ..Default::default()
    };
    file.save(&NormalizedPath::new(temp.path().join("settings.toml")))
        .unwrap();

    let overrides = MapProperties::new().with(RUN_MODES, "publish");
    let settings = Home::new(temp.path()).load_settings(&overrides).unwrap();

    // install options still come from the file
    assert_eq!(modes(&settings), vec!["crx3", "publish"]);
}

#[test]
fn full_restart_cycle_through_home() {
    let temp = TempDir::new().unwrap();
    let home = Home::new(temp.path());
    let install = "oak_tar,oak_mongo|crx3,crx3mongo";

    let first = home
        .load_settings(
            &MapProperties::new()
                .with(RUN_MODES, "author,oak_mongo")
                .with(RUN_MODE_INSTALL_OPTIONS, install),
        )
        .unwrap();
    assert_eq!(modes(&first), vec!["author", "crx3", "oak_mongo"]);

    // operator changes the raw modes; install choices stay put
    let second = home
        .load_settings(
            &MapProperties::new()
                .with(RUN_MODES, "author,oak_tar,crx3mongo,local")
                .with(RUN_MODE_INSTALL_OPTIONS, install),
        )
        .unwrap();
    assert_eq!(modes(&second), vec!["author", "crx3", "local", "oak_mongo"]);
    assert_eq!(first.id(), second.id());

    let report = serde_json::to_value(SettingsReport::from(&second)).unwrap();
    assert_eq!(report["install_options"][0]["selected"], "oak_mongo");
    assert_eq!(report["install_options"][1]["selected"], "crx3");
}

#[test]
fn corrupt_identity_is_replaced_not_fatal() {
    let temp = TempDir::new().unwrap();
    let home = Home::new(temp.path());
    let store = home.data_store();
    store
        .write(HomePath::InstanceIdRecord.as_str(), b"garbage")
        .unwrap();

    let settings = home.load_settings(&MapProperties::new()).unwrap();

    let stored = store.read(HomePath::InstanceIdRecord.as_str()).unwrap().unwrap();
    let stored: InstanceId = String::from_utf8(stored).unwrap().parse().unwrap();
    assert_eq!(stored, settings.id());
}

#[test]
fn unreadable_identity_record_is_not_fatal() {
    let temp = TempDir::new().unwrap();
    let home = Home::new(temp.path());
    // a directory where the record file should be cannot be read or replaced
    fs::create_dir_all(
        home.data_dir()
            .join(HomePath::InstanceIdRecord.as_str())
            .to_native(),
    )
    .unwrap();

    let first = home.load_settings(&MapProperties::new()).unwrap();
    let second = home.load_settings(&MapProperties::new()).unwrap();

    assert_ne!(first.id(), second.id());
}

#[test]
fn paths_resolve_within_home() {
    let temp = TempDir::new().unwrap();
    let home = Home::new(temp.path());
    let settings = home.load_settings(&MapProperties::new()).unwrap();

    let logs = settings.absolute_path_within_home("logs").unwrap();
    assert_eq!(logs, home.root().canonicalize().unwrap().join("logs"));
}

#[test]
fn launch_properties_come_from_every_layer() {
    let temp = TempDir::new().unwrap();
    let mut file = SettingsFile::default();
    file.instance.name = Some("author-1".into());
    file.properties.insert("http.port".into(), "4502".into());
    file.save(&NormalizedPath::new(temp.path().join("settings.toml")))
        .unwrap();

    let overrides = MapProperties::new().with(RUN_MODES, "publish");
    let settings = Home::new(temp.path()).load_settings(&overrides).unwrap();

    let properties: Vec<(&str, &str)> = settings
        .properties()
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(
        properties,
        vec![
            ("http.port", "4502"),
            ("instance.name", "author-1"),
            ("run.modes", "publish"),
        ]
    );
    let url = settings.home_url().unwrap();
    assert_eq!(url.scheme(), "file");
    assert!(url.path().ends_with('/'));
}
