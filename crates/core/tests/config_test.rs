use roster_core::config::*;
use std::fs;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let file = NamedTempFile::new().unwrap();
    fs::write(file.path(), content).unwrap();
    file
}

#[test]
fn test_default_config() {
    let config = AppConfig::default();
    assert!(config.validate().is_ok());

    // 验证默认值
    assert_eq!(config.dispatcher.tie_break, TieBreak::FirstRegistered);
    assert_eq!(config.dispatcher.load_lifecycle, LoadLifecycle::Preserve);
    assert_eq!(config.observability.log_level, "info");
    assert!(config.staff.is_empty());
}

#[test]
fn test_config_from_toml() {
    let file = write_config(
        r#"
[dispatcher]
tie_break = "fewest_specialities"
load_lifecycle = "reset_on_rejoin"

[observability]
log_level = "debug"
log_format = "json"
metrics_enabled = false

[[staff]]
id = "alice"
speciality = ["grill", "fryer"]
prep_millis = 50

[[staff]]
id = "bob"
speciality = ["salad"]
"#,
    );

    let config = AppConfig::load(file.path().to_str()).unwrap();
    assert_eq!(config.dispatcher.tie_break, TieBreak::FewestSpecialities);
    assert_eq!(config.dispatcher.load_lifecycle, LoadLifecycle::ResetOnRejoin);
    assert_eq!(config.observability.log_format, "json");
    assert!(!config.observability.metrics_enabled);
    assert_eq!(config.staff.len(), 2);
    assert_eq!(config.staff[0].speciality, vec!["grill", "fryer"]);
    assert_eq!(config.staff[0].prep_millis, 50);
    assert_eq!(config.staff[1].prep_millis, 200);
}

#[test]
fn test_partial_config_uses_defaults() {
    let file = write_config(
        r#"
[observability]
log_level = "warn"
"#,
    );

    let config = AppConfig::load(file.path().to_str()).unwrap();
    assert_eq!(config.observability.log_level, "warn");
    assert_eq!(config.observability.log_format, "pretty");
    assert_eq!(config.dispatcher.tie_break, TieBreak::FirstRegistered);
}

#[test]
fn test_missing_config_file() {
    let result = AppConfig::load(Some("/nonexistent/roster.toml"));
    assert!(result.is_err());
}

#[test]
fn test_invalid_log_level_rejected() {
    let file = write_config(
        r#"
[observability]
log_level = "verbose"
"#,
    );

    assert!(AppConfig::load(file.path().to_str()).is_err());
}

#[test]
fn test_invalid_tie_break_rejected() {
    let file = write_config(
        r#"
[dispatcher]
tie_break = "random"
"#,
    );
    assert!(AppConfig::load(file.path().to_str()).is_err());

    let file = write_config(
        r#"
[dispatcher]
load_lifecycle = "forget"
"#,
    );
    assert!(AppConfig::load(file.path().to_str()).is_err());
}

#[test]
fn test_staff_validation() {
    let mut config = AppConfig::default();
    config.staff.push(StaffConfig {
        id: "alice".to_string(),
        speciality: vec![],
        prep_millis: 10,
    });
    assert!(config.validate().is_err());

    config.staff[0].speciality = vec!["grill".to_string()];
    assert!(config.validate().is_ok());

    config.staff.push(config.staff[0].clone());
    assert!(config.validate().is_err());
}
