//! Integration tests for Configuration System

use super::test_utils::{service_reply, stdout_of, write_cf_session, TestEnv};
use std::sync::Arc;
use tempfile::TempDir;
use willitconnect::config::{ConfigLoader, ValidationError, WillItConnectConfig};
use willitconnect::service::Discovery;
use wiremock::matchers::{body_json_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_config_file_sections() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_file,
        r#"
[service]
timeout_secs = 5
connect_timeout_secs = 2
discovery = "api-endpoint"

[platform]
cf_home = "/opt/cf"

[logging]
level = "debug"
format = "json"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.service.timeout_secs, 5);
    assert_eq!(config.service.connect_timeout_secs, 2);
    assert_eq!(config.service.discovery, Some(Discovery::ApiEndpoint));
    assert_eq!(
        config.platform.cf_home,
        Some(std::path::PathBuf::from("/opt/cf"))
    );
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");
    // untouched keys keep their defaults
    assert_eq!(config.logging.output, "stderr");
}

#[test]
fn test_unknown_discovery_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("config.toml");
    std::fs::write(&config_file, "[service]\ndiscovery = \"dns\"\n").unwrap();
    assert!(ConfigLoader::load_from_file(&config_file).is_err());
}

#[test]
fn test_config_validation_errors() {
    let mut config = WillItConnectConfig::default();
    config.service.timeout_secs = 0;
    config.logging.output = "syslog".to_string();

    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::Service(_))));
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::Logging(_))));
}

#[test]
fn test_invalid_explicit_config_fails_binary() {
    let env = TestEnv::new();
    let config_file = env.home.join("bad.toml");
    std::fs::write(&config_file, "[logging]\nformat = \"xml\"\n").unwrap();

    let output = env
        .command()
        .env("WILLITCONNECT_CONFIG", &config_file)
        .args(["-host=foo.com", "-port=80"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Configuration validation failed"), "{stdout}");
    assert!(stdout.contains("Invalid log format: xml"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_user_config_pins_api_endpoint_discovery() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/willitconnect"))
        .and(body_json_string(r#"{"target":"foo.com:80"}"#))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(service_reply("foo.com", true), "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new();
    env.write_cf_session(&server.uri(), "my-org");
    env.write_user_config("[service]\ndiscovery = \"api-endpoint\"\n");

    let env = Arc::new(env);
    let output = tokio::task::spawn_blocking(move || env.run(&["-host=foo.com", "-port=80"]))
        .await
        .unwrap();

    let stdout = stdout_of(&output);
    assert_eq!(output.status.code(), Some(0), "stdout: {stdout}");
    assert!(stdout.contains(&format!("WillItConnect: {}/v2/willitconnect", server.uri())));
    assert!(stdout.contains("I am able to connect"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_user_config_cf_home() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/willitconnect"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(service_reply("foo.com", false), "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new();
    let other_cf_home = env.home.join("other-cf");
    write_cf_session(&other_cf_home, &server.uri(), "my-org");
    env.write_user_config(&format!(
        "[platform]\ncf_home = \"{}\"\n",
        other_cf_home.display()
    ));

    let env = Arc::new(env);
    let output = tokio::task::spawn_blocking(move || env.run(&["foo.com", "80"]))
        .await
        .unwrap();

    let stdout = stdout_of(&output);
    assert_eq!(output.status.code(), Some(0), "stdout: {stdout}");
    assert!(stdout.contains("I am unable to connect"));
}
