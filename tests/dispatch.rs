//! End-to-end dispatch tests against a fake orchestrator
//!
//! Drives the real registry through the dispatcher: command resolution,
//! arity-based overload selection, file-backed argument coercion and the
//! HTTP round trip are all exercised together.

use std::io::Write;
use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nfvctl::command::{self, CallResult, DispatchError, Outcome};
use nfvctl::config::Config;
use nfvctl::nfvo::NfvoClient;

fn config_for(server: &MockServer) -> Config {
    let uri = url::Url::parse(&server.uri()).expect("mock server uri");
    Config {
        username: "admin".to_string(),
        password: "openbaton".to_string(),
        project_id: "default".to_string(),
        ssl_enabled: false,
        host: uri.host_str().expect("mock host").to_string(),
        port: uri.port().expect("mock port"),
        api_version: "1".to_string(),
    }
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": "test-token" })))
        .mount(server)
        .await;
}

async fn run(server: &MockServer, argv: &[&str]) -> Result<Outcome, DispatchError> {
    let registry = command::build_registry();
    let client = Arc::new(NfvoClient::new(&config_for(server)).expect("client"));
    let argv: Vec<String> = argv.iter().map(|s| s.to_string()).collect();
    command::dispatch(&registry, client, &argv).await
}

fn temp_json(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write");
    file
}

#[tokio::test]
async fn find_by_id_returns_the_deserialized_item() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/datacenters/abc-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "abc-123",
            "name": "test-vim",
            "type": "openstack"
        })))
        .mount(&server)
        .await;

    let outcome = run(&server, &["VimInstance-findById", "abc-123"])
        .await
        .expect("dispatch");
    match outcome {
        Outcome::Call(CallResult::Item(value)) => {
            assert_eq!(value["id"], "abc-123");
            assert_eq!(value["type"], "openstack");
        }
        other => panic!("expected an item, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_returns_no_content() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/datacenters/abc-123"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run(&server, &["VimInstance-delete", "abc-123"])
        .await
        .expect("dispatch");
    assert!(matches!(outcome, Outcome::Call(CallResult::NoContent)));
}

#[tokio::test]
async fn unknown_command_reports_not_found() {
    let server = MockServer::start().await;
    let outcome = run(&server, &["unknown-cmd"]).await.expect("dispatch");
    match outcome {
        Outcome::Unknown(text) => assert_eq!(text, "unknown-cmd: command not found"),
        other => panic!("expected unknown, got {other:?}"),
    }
}

#[tokio::test]
async fn prefix_matches_are_suggested() {
    let server = MockServer::start().await;
    let outcome = run(&server, &["VimInstance"]).await.expect("dispatch");
    match outcome {
        Outcome::Unknown(text) => {
            assert!(text.contains("VimInstance-findAll:"));
            assert!(text.contains("VimInstance-delete:"));
        }
        other => panic!("expected suggestions, got {other:?}"),
    }
}

#[tokio::test]
async fn create_from_file_posts_the_object() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/datacenters"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "new-id",
            "name": "test-vim"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let file = temp_json(r#"{"name":"test-vim","type":"openstack"}"#);
    let file_path = file.path().to_string_lossy().into_owned();

    let outcome = run(&server, &["VimInstance-create", &file_path])
        .await
        .expect("dispatch");
    match outcome {
        Outcome::Call(CallResult::Item(value)) => assert_eq!(value["id"], "new-id"),
        other => panic!("expected an item, got {other:?}"),
    }
}

#[tokio::test]
async fn find_all_returns_a_list() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/ns-records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "nsr-1", "status": "ACTIVE" },
            { "id": "nsr-2", "status": "ERROR" }
        ])))
        .mount(&server)
        .await;

    let outcome = run(&server, &["NetworkServiceRecord-findAll"])
        .await
        .expect("dispatch");
    match outcome {
        Outcome::Call(CallResult::List(values)) => {
            assert_eq!(values.len(), 2);
            assert_eq!(values[0]["id"], "nsr-1");
        }
        other => panic!("expected a list, got {other:?}"),
    }
}

mod overload_resolution {
    use super::*;

    /// Same command name, three arities, each reaching its own path.
    #[tokio::test]
    async fn delete_vnfc_instance_resolves_by_arity() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("DELETE"))
            .and(path("/api/v1/ns-records/nsr/vnfrecords/vnf/vdunits/vnfcinstances"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path(
                "/api/v1/ns-records/nsr/vnfrecords/vnf/vdunits/vdu/vnfcinstances",
            ))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path(
                "/api/v1/ns-records/nsr/vnfrecords/vnf/vdunits/vdu/vnfcinstances/vnfc",
            ))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        for argv in [
            vec!["NetworkServiceRecord-deleteVNFCInstance", "nsr", "vnf"],
            vec!["NetworkServiceRecord-deleteVNFCInstance", "nsr", "vnf", "vdu"],
            vec![
                "NetworkServiceRecord-deleteVNFCInstance",
                "nsr",
                "vnf",
                "vdu",
                "vnfc",
            ],
        ] {
            let outcome = run(&server, &argv).await.expect("dispatch");
            assert!(matches!(outcome, Outcome::Call(CallResult::NoContent)));
        }
    }

    /// A token count no variant declares is a missing/invalid parameter.
    #[tokio::test]
    async fn unmatched_arity_is_missing_or_invalid_parameter() {
        let server = MockServer::start().await;
        let err = run(&server, &["NetworkServiceRecord-deleteVNFCInstance", "nsr"])
            .await
            .expect_err("must fail");
        assert!(matches!(err, DispatchError::MissingOrInvalidParameter(_)));
    }

    /// An arity match whose file parameter names no existing file is
    /// skipped, and with no candidate left the resolution fails the same
    /// way.
    #[tokio::test]
    async fn missing_file_disqualifies_the_candidate() {
        let server = MockServer::start().await;
        let err = run(&server, &["VimInstance-create", "/no/such/file.json"])
            .await
            .expect_err("must fail");
        assert!(matches!(err, DispatchError::MissingOrInvalidParameter(_)));
    }
}

mod nested_operations {
    use super::*;

    /// The createVNFR remap: the file is validated as a
    /// VirtualNetworkFunctionRecord and posted under the record's sub-path.
    #[tokio::test]
    async fn create_vnfr_posts_under_the_record() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("POST"))
            .and(path("/api/v1/ns-records/nsr-1/vnfrecords"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "vnfr-1",
                "name": "server",
                "status": "INITIALIZED"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let file = temp_json(r#"{"name":"server"}"#);
        let file_path = file.path().to_string_lossy().into_owned();

        let outcome = run(
            &server,
            &["NetworkServiceRecord-createVNFR", "nsr-1", &file_path],
        )
        .await
        .expect("dispatch");
        match outcome {
            Outcome::Call(CallResult::Item(value)) => assert_eq!(value["id"], "vnfr-1"),
            other => panic!("expected an item, got {other:?}"),
        }
    }

    /// The composite record create: id plus three JSON inputs become one
    /// POST body.
    #[tokio::test]
    async fn composite_record_create_builds_the_body() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("POST"))
            .and(path("/api/v1/ns-records/nsd-1"))
            .and(wiremock::matchers::body_partial_json(json!({
                "vduVimInstances": { "vdu1": ["vim-1"] },
                "keys": ["key-1"],
                "configurations": {}
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "nsr-1",
                "status": "NULL"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let vims = temp_json(r#"{"vdu1":["vim-1"]}"#);
        let keys = temp_json(r#"["key-1"]"#);
        let configs = temp_json("{}");

        let outcome = run(
            &server,
            &[
                "NetworkServiceRecord-create",
                "nsd-1",
                &vims.path().to_string_lossy(),
                &keys.path().to_string_lossy(),
                &configs.path().to_string_lossy(),
            ],
        )
        .await
        .expect("dispatch");
        match outcome {
            Outcome::Call(CallResult::Item(value)) => assert_eq!(value["id"], "nsr-1"),
            other => panic!("expected an item, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_vnf_dependency_puts_with_accepted() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("PUT"))
            .and(path("/api/v1/ns-records/nsr-1/vnfdependencies/dep-1"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({ "id": "dep-1" })))
            .expect(1)
            .mount(&server)
            .await;

        let file = temp_json(r#"{"id":"dep-1"}"#);
        let file_path = file.path().to_string_lossy().into_owned();

        let outcome = run(
            &server,
            &[
                "NetworkServiceRecord-updateVNFDependency",
                "nsr-1",
                "dep-1",
                &file_path,
            ],
        )
        .await
        .expect("dispatch");
        assert!(matches!(outcome, Outcome::Call(CallResult::Item(_))));
    }
}

mod help_surface {
    use super::*;

    #[tokio::test]
    async fn bare_help_prints_the_catalogue() {
        let server = MockServer::start().await;
        let outcome = run(&server, &["help"]).await.expect("dispatch");
        match outcome {
            Outcome::Help(text) => {
                assert!(text.contains("Available commands are"));
                assert!(text.contains("VimInstance-findById:"));
            }
            other => panic!("expected help, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn trailing_help_prints_the_command_usage() {
        let server = MockServer::start().await;
        let outcome = run(&server, &["VimInstance-update", "help"])
            .await
            .expect("dispatch");
        match outcome {
            Outcome::Help(text) => {
                assert!(text.contains("Usage: VimInstance-update"));
                assert!(text.contains("<VimInstance-file>"));
            }
            other => panic!("expected help, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn help_with_command_prints_the_command_usage() {
        let server = MockServer::start().await;
        let outcome = run(&server, &["help", "VimInstance-delete"])
            .await
            .expect("dispatch");
        match outcome {
            Outcome::Help(text) => assert!(text.contains("Usage: VimInstance-delete <id>")),
            other => panic!("expected help, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn no_arguments_prints_the_catalogue() {
        let server = MockServer::start().await;
        let outcome = run(&server, &[]).await.expect("dispatch");
        assert!(matches!(outcome, Outcome::Help(_)));
    }
}

#[tokio::test]
async fn malformed_object_file_is_bad_json() {
    let server = MockServer::start().await;
    let file = temp_json("{ definitely not json");
    let file_path = file.path().to_string_lossy().into_owned();

    let err = run(&server, &["VimInstance-create", &file_path])
        .await
        .expect_err("must fail");
    assert!(matches!(
        err,
        DispatchError::Argument(command::ArgumentError::BadJson { ref kind, .. })
            if kind == "VimInstance"
    ));
}
