//! Tests that run the compiled binary against isolated CF and config directories.

use super::test_utils::{service_reply, stdout_of, TestEnv};
use std::process::Output;
use std::sync::Arc;
use wiremock::matchers::{body_json_string, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run_blocking(env: Arc<TestEnv>, args: Vec<String>) -> Output {
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        env.run(&args)
    })
    .await
    .unwrap()
}

async fn mount_check(server: &MockServer, expected_body: &str, reply: String) {
    Mock::given(method("POST"))
        .and(path("/v2/willitconnect"))
        .and(body_json_string(expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_raw(reply, "application/json"))
        .expect(1)
        .mount(server)
        .await;
}

#[test]
fn test_bare_word_prints_usage() {
    let env = TestEnv::new();
    let output = env.run(&["blah"]);
    let stdout = stdout_of(&output);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("willitconnect <host> <port>"));
}

#[test]
fn test_no_arguments_prints_usage() {
    let env = TestEnv::new();
    let output = env.run(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).contains("Usage:"));
}

#[test]
fn test_flags_without_login() {
    let env = TestEnv::new();
    let output = env.run(&["-host=foo.com", "-port=80"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_of(&output).trim(),
        "Unable to connect to CF, use cf login first"
    );
}

#[test]
fn test_positional_without_login() {
    let env = TestEnv::new();
    let output = env.run(&["foo.com", "80"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_of(&output).trim(), "Unable to determine CF ApiEndpoint");
}

#[test]
fn test_route_must_be_fqdn() {
    let env = TestEnv::new();
    let output = env.run(&["-host=foo.com", "-port=80", "-route=isbad"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_of(&output).trim(), "-route must be a fqdn");
}

#[test]
fn test_help_exits_cleanly() {
    let env = TestEnv::new();
    let output = env.run(&["-help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).contains("-proxyHost=<proxyHost>"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_positional_check_through_api_endpoint() {
    let server = MockServer::start().await;
    mount_check(&server, r#"{"target":"foo.com:80"}"#, service_reply("foo.com", true)).await;

    let env = TestEnv::new();
    env.write_cf_session(&server.uri(), "my-org");
    let output = run_blocking(Arc::new(env), vec!["foo.com".into(), "80".into()]).await;

    let stdout = stdout_of(&output);
    assert_eq!(output.status.code(), Some(0), "stdout: {stdout}");
    let header = format!(
        "Host: foo.com - Port: 80 - WillItConnect: {}/v2/willitconnect",
        server.uri()
    );
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec![header.as_str(), "I am able to connect"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_route_override_unable_to_connect_with_proxy() {
    let server = MockServer::start().await;
    mount_check(
        &server,
        r#"{"target":"bar.com:80","http_proxy":"proxy.com:8080"}"#,
        service_reply("bar.com", false),
    )
    .await;

    let env = TestEnv::new();
    let args = vec![
        "-host=bar.com".to_string(),
        "-port=80".to_string(),
        "-proxyHost=proxy.com".to_string(),
        "-proxyPort=8080".to_string(),
        format!("-route={}", server.uri()),
    ];
    let output = run_blocking(Arc::new(env), args).await;

    let stdout = stdout_of(&output);
    assert_eq!(output.status.code(), Some(0), "stdout: {stdout}");
    assert!(stdout.contains("Proxy: proxy.com:8080"));
    assert!(stdout.trim_end().ends_with("I am unable to connect"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_org_without_domains() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/organizations"))
        .and(query_param("names", "my-org"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"resources":[{"guid":"org-guid","name":"my-org"}]}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/organizations/org-guid/domains"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"resources":[]}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let env = TestEnv::new();
    env.write_cf_session(&server.uri(), "my-org");
    let output = run_blocking(
        Arc::new(env),
        vec!["-host=foo.com".into(), "-port=80".into()],
    )
    .await;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_of(&output).trim(),
        "Unable to find valid domain, please view cf domains"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_garbage_reply_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let env = TestEnv::new();
    let output = run_blocking(
        Arc::new(env),
        vec![
            "-host=foo.com".into(),
            "-port=80".into(),
            format!("-route={}", server.uri()),
        ],
    )
    .await;

    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout_of(&output);
    assert!(stdout.starts_with("Host: foo.com - Port: 80"));
    assert!(stdout.contains("Invalid response from willitconnect: "));
}
