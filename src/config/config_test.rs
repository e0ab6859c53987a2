use std::io::Write;

use serial_test::serial;

use super::*;

/// # Case 1: defaults load without any file or environment
#[test]
#[serial]
fn test_defaults() {
    let config = StreamConfig::load(None).expect("defaults should load");
    assert_eq!(config.dispatch.warn_queue_depth, 512);
    assert!(!config.metrics.enabled);
    assert_eq!(config.metrics.port, 9600);
}

/// # Case 2: a config file overrides the defaults
#[test]
#[serial]
fn test_file_overrides_defaults() {
    let mut file = tempfile::NamedTempFile::with_suffix(".toml").expect("temp file should open");
    writeln!(
        file,
        r#"
[dispatch]
warn_queue_depth = 64

[metrics]
enabled = true
port = 9700
"#
    )
    .expect("write should succeed");

    let path = file.path().to_str().expect("path should be utf-8");
    let config = StreamConfig::load(Some(path)).expect("file config should load");
    assert_eq!(config.dispatch.warn_queue_depth, 64);
    assert!(config.metrics.enabled);
    assert_eq!(config.metrics.port, 9700);
}

/// # Case 3: environment variables override the file
#[test]
#[serial]
fn test_env_overrides_file() {
    let mut file = tempfile::NamedTempFile::with_suffix(".toml").expect("temp file should open");
    writeln!(
        file,
        r#"
[dispatch]
warn_queue_depth = 64
"#
    )
    .expect("write should succeed");
    let path = file.path().to_str().expect("path should be utf-8").to_owned();

    temp_env::with_var("CHIRP__DISPATCH__WARN_QUEUE_DEPTH", Some("128"), || {
        let config = StreamConfig::load(Some(&path)).expect("config should load");
        assert_eq!(config.dispatch.warn_queue_depth, 128);
    });
}

/// # Case 4: a missing file is an error
#[test]
#[serial]
fn test_missing_file() {
    let result = StreamConfig::load(Some("/nonexistent/chirpstream.toml"));
    assert!(matches!(result, Err(Error::Config(_))));
}

/// # Case 5: validation rejects a zero warning threshold
#[test]
fn test_validate_rejects_zero_warn_depth() {
    let mut config = StreamConfig::default();
    config.dispatch.warn_queue_depth = 0;

    let result = config.validate();
    assert!(matches!(result, Err(Error::Config(_))));
}

/// # Case 6: validation rejects enabled metrics on port 0
#[test]
fn test_validate_rejects_port_zero_metrics() {
    let mut config = StreamConfig::default();
    config.metrics.enabled = true;
    config.metrics.port = 0;

    let result = config.validate();
    assert!(matches!(result, Err(Error::Config(_))));

    // Port 0 is fine while the endpoint stays disabled.
    config.metrics.enabled = false;
    config.validate().expect("disabled metrics should validate");
}
