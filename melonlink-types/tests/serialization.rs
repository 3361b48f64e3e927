use melonlink_types::{AndroidConfig, Platform, ProjectConfig, QueuedMod};
use pretty_assertions::assert_eq;

#[test]
fn platform_serializes_snake_case() {
    let ios = serde_json::to_value(Platform::Ios).expect("serialize");
    let android = serde_json::to_value(Platform::Android).expect("serialize");

    assert_eq!(ios, serde_json::json!("ios"));
    assert_eq!(android, serde_json::json!("android"));
}

#[test]
fn project_config_preserves_unknown_keys() {
    let input = serde_json::json!({
        "name": "demo",
        "version": "1.0.0",
        "plugins": ["@morrowdigital/watermelondb-expo-plugin"],
        "android": { "package": "com.example.demo", "versionCode": 7 },
        "ios": { "bundleIdentifier": "com.example.demo", "supportsTablet": true }
    });

    let cfg: ProjectConfig = serde_json::from_value(input.clone()).expect("deserialize");
    assert_eq!(cfg.android_package(), Some("com.example.demo"));
    assert_eq!(cfg.ios_bundle_identifier(), Some("com.example.demo"));
    assert_eq!(cfg.extra.get("version"), Some(&serde_json::json!("1.0.0")));

    let back = serde_json::to_value(&cfg).expect("serialize");
    assert_eq!(back, input);
}

#[test]
fn queued_mods_are_not_serialized() {
    let mut cfg = ProjectConfig {
        android: Some(AndroidConfig {
            package: Some("com.example".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };
    cfg.queue_mod(QueuedMod::new(Platform::Android, "watermelondb"));

    let value = serde_json::to_value(&cfg).expect("serialize");
    assert!(value.get("mods").is_none());
    assert_eq!(
        value,
        serde_json::json!({ "android": { "package": "com.example" } })
    );
}

#[test]
fn empty_object_deserializes_to_default() {
    let cfg: ProjectConfig = serde_json::from_str("{}").expect("deserialize");
    assert_eq!(cfg, ProjectConfig::default());
}
