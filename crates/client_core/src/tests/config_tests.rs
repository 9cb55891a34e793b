use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_hide_messages_after_five_seconds() {
    let settings = Settings::default();
    assert_eq!(settings.message_hide_after(), Duration::from_secs(5));
    assert_eq!(settings.api_base_url, "http://127.0.0.1:8000");
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file_overrides(
        &mut settings,
        r#"
api_base_url = "http://activities.local:9000/"
message_hide_after_ms = 1500
"#,
    );
    assert_eq!(settings.api_base_url, "http://activities.local:9000/");
    assert_eq!(settings.message_hide_after_ms, 1500);
    assert_eq!(settings.request_timeout_secs, 10);
}

#[test]
fn unreadable_file_is_ignored() {
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, "api_base_url = [not toml");
    assert_eq!(settings, Settings::default());
}

#[test]
fn prefixed_env_wins_over_plain_env() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        lookup_from(&[
            ("ACTIVITIES_API_URL", "http://plain:1"),
            ("APP__API_BASE_URL", "http://prefixed:2"),
            ("APP__REQUEST_TIMEOUT_SECS", "3"),
        ]),
    );
    assert_eq!(settings.api_base_url, "http://prefixed:2");
    assert_eq!(settings.request_timeout_secs, 3);
}

#[test]
fn unparseable_numeric_env_is_ignored() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        lookup_from(&[("APP__MESSAGE_HIDE_AFTER_MS", "soon")]),
    );
    assert_eq!(settings.message_hide_after_ms, 5000);
}

#[test]
fn normalizes_trailing_slashes_and_whitespace() {
    assert_eq!(
        normalize_base_url("  http://localhost:8000//  ").expect("normalize"),
        "http://localhost:8000"
    );
    assert_eq!(
        normalize_base_url("").expect("normalize"),
        "http://127.0.0.1:8000"
    );
}

#[test]
fn rejects_unparseable_and_non_http_urls() {
    assert!(matches!(
        normalize_base_url("not a url"),
        Err(SettingsError::InvalidBaseUrl { .. })
    ));
    assert!(matches!(
        normalize_base_url("ftp://files.local"),
        Err(SettingsError::UnsupportedScheme(_))
    ));
}

#[test]
fn loads_settings_file_from_path() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("activities_settings_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join(DEFAULT_SETTINGS_FILE);
    fs::write(&path, "request_timeout_secs = 42\n").expect("write settings");

    let settings = load_settings_from(&path).expect("load");
    assert_eq!(settings.request_timeout_secs, 42);

    fs::remove_dir_all(temp_root).expect("cleanup");
}
