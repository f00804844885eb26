//! Credential loading integration tests

use std::io::Write;

use switchbot_power::config::{
    DEVICE_ID_KEY, EnvFileSource, LayeredSource, SECRET_KEY, TOKEN_KEY,
};
use switchbot_power::{Config, Credential, CredentialSource};

mod common;
use common::FixtureSource;

fn env_file(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}

#[test]
fn test_override_file_beats_environment() {
    let file = env_file(&["SWITCHBOT_API_TOKEN=FILEVAL"]);
    let source = LayeredSource::new(
        EnvFileSource::new(file.path()),
        FixtureSource::new(&[(TOKEN_KEY, "ENVVAL")]),
    );

    let config = Config::from_source(&source).unwrap();

    assert_eq!(
        config.credentials.api_token,
        Credential::Value("FILEVAL".to_string())
    );
}

#[test]
fn test_environment_fills_keys_absent_from_file() {
    let file = env_file(&["SWITCHBOT_API_TOKEN=FILEVAL"]);
    let source = LayeredSource::new(
        EnvFileSource::new(file.path()),
        FixtureSource::new(&[(SECRET_KEY, "ENVSECRET"), (DEVICE_ID_KEY, "ENVDEV")]),
    );

    let config = Config::from_source(&source).unwrap();

    assert_eq!(config.credentials.api_token.as_str(), "FILEVAL");
    assert!(!config.credentials.api_secret.is_missing());
    assert_eq!(config.credentials.device_id.as_str(), "ENVDEV");
}

#[test]
fn test_missing_file_falls_back_to_environment() {
    let dir = tempfile::tempdir().unwrap();
    let source = LayeredSource::new(
        EnvFileSource::new(dir.path().join(".env")),
        FixtureSource::new(&[(TOKEN_KEY, "ENVVAL")]),
    );

    assert_eq!(source.lookup(TOKEN_KEY).unwrap().as_deref(), Some("ENVVAL"));
}

#[test]
fn test_empty_file_value_is_not_missing() {
    let file = env_file(&["SWITCHBOT_DEVICE_ID="]);
    let source = LayeredSource::new(
        EnvFileSource::new(file.path()),
        FixtureSource::new(&[(DEVICE_ID_KEY, "ENVDEV")]),
    );

    let config = Config::from_source(&source).unwrap();

    assert_eq!(config.credentials.device_id, Credential::Value(String::new()));
    assert!(config.credentials.api_token.is_missing());
}

#[test]
fn test_unreadable_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be read as a file
    let source = EnvFileSource::new(dir.path());

    assert!(source.lookup(TOKEN_KEY).is_err());
}
