//! Integration tests for the SettingsStore:
//! - only changed fields land in the delta file
//! - existing deltas are applied on register
//! - reload picks up external edits

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use settings::{Settings, SettingsError, SettingsStore};

fn unique_temp_path(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("settings_store_test_{name}_{nanos}.ron"))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Timing {
    settle_delay_ms: u64,
    easing: Easing,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Easing {
    enabled: bool,
    steps: u8,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            settle_delay_ms: 300,
            easing: Easing {
                enabled: false,
                steps: 4,
            },
        }
    }
}

impl Settings for Timing {
    const SECTION: &'static str = "timing";
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
struct Desk {
    start: String,
}

impl Settings for Desk {
    const SECTION: &'static str = "desk";
}

fn section_keys(path: &PathBuf, section: &str) -> Vec<String> {
    let content = fs::read_to_string(path).expect("read delta file");
    let root: BTreeMap<String, ron::Value> = ron::from_str(&content).expect("parse delta");
    let Some(ron::Value::Map(map)) = root.get(section) else {
        return Vec::new();
    };
    map.iter()
        .filter_map(|(k, _)| match k {
            ron::Value::String(s) => Some(s.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn defaults_without_file() {
    let path = unique_temp_path("defaults");
    let store = SettingsStore::builder()
        .with_settings_file(path.clone())
        .build()
        .expect("build store");
    store.register::<Timing>().expect("register");

    assert_eq!(store.get::<Timing>().expect("get"), Timing::default());
    assert!(!path.exists(), "nothing persisted before the first update");
}

#[test]
fn update_persists_only_changed_fields() {
    let path = unique_temp_path("delta");
    let store = SettingsStore::builder()
        .with_settings_file(path.clone())
        .build()
        .expect("build store");
    store.register::<Timing>().expect("register");

    store
        .update::<Timing, _>(|t| t.easing.enabled = true)
        .expect("update easing");
    assert_eq!(section_keys(&path, "timing"), vec!["easing".to_string()]);

    store
        .update::<Timing, _>(|t| t.settle_delay_ms = 450)
        .expect("update delay");
    let mut keys = section_keys(&path, "timing");
    keys.sort();
    assert_eq!(keys, vec!["easing".to_string(), "settle_delay_ms".to_string()]);

    let timing = store.get::<Timing>().expect("get");
    assert_eq!(timing.settle_delay_ms, 450);
    assert!(timing.easing.enabled);
    assert_eq!(timing.easing.steps, 4);

    let _ = fs::remove_file(&path);
}

#[test]
fn reverting_to_default_drops_section() {
    let path = unique_temp_path("revert");
    let store = SettingsStore::builder()
        .with_settings_file(path.clone())
        .build()
        .expect("build store");
    store.register::<Timing>().expect("register");

    store
        .update::<Timing, _>(|t| t.settle_delay_ms = 10)
        .expect("change");
    store
        .update::<Timing, _>(|t| t.settle_delay_ms = 300)
        .expect("revert");
    assert!(section_keys(&path, "timing").is_empty());

    let _ = fs::remove_file(&path);
}

#[test]
fn register_applies_existing_file() {
    let path = unique_temp_path("existing");
    fs::write(
        &path,
        r#"{ "timing": { "settle_delay_ms": 120 }, "desk": { "start": "clinic" } }"#,
    )
    .expect("seed file");

    let store = SettingsStore::builder()
        .with_settings_file(path.clone())
        .build()
        .expect("build store");
    store.register::<Timing>().expect("register timing");
    store.register::<Desk>().expect("register desk");

    assert_eq!(store.get::<Timing>().expect("get").settle_delay_ms, 120);
    assert_eq!(store.get::<Desk>().expect("get").start, "clinic");

    let _ = fs::remove_file(&path);
}

#[test]
fn reload_applies_external_changes() {
    let path = unique_temp_path("reload");
    let store = SettingsStore::builder()
        .with_settings_file(path.clone())
        .build()
        .expect("build");
    store.register::<Timing>().expect("register");
    store
        .update::<Timing, _>(|t| t.settle_delay_ms = 1500)
        .expect("initial update");

    fs::write(&path, r#"{ "timing": { "easing": { "enabled": true } } }"#)
        .expect("write external delta");
    store.reload().expect("reload");

    let timing = store.get::<Timing>().expect("get after reload");
    assert_eq!(timing.settle_delay_ms, 300);
    assert!(timing.easing.enabled);
    assert_eq!(timing.easing.steps, 4);

    let _ = fs::remove_file(&path);
}

#[test]
fn unregistered_and_duplicate_sections_are_errors() {
    let store = SettingsStore::in_memory();
    assert!(matches!(
        store.get::<Desk>(),
        Err(SettingsError::NotRegistered("desk"))
    ));
    store.register::<Desk>().expect("register");
    assert!(matches!(
        store.register::<Desk>(),
        Err(SettingsError::AlreadyRegistered("desk"))
    ));
}

#[test]
fn in_memory_store_updates_without_disk() {
    let store = SettingsStore::in_memory();
    store.register::<Desk>().expect("register");
    store
        .update::<Desk, _>(|d| d.start = "billing".into())
        .expect("update");
    assert_eq!(store.get::<Desk>().expect("get").start, "billing");
    assert!(store.file_path().is_none());
}
