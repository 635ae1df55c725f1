use std::sync::atomic::Ordering;

use axum::http::StatusCode;
use serde_json::json;
use shared::protocol::{AttributeValue, DatasetInfoReply};

use super::*;
use crate::test_support::{config_for, spawn_backend, unreachable_base_url, MockBackend};

#[tokio::test]
async fn ask_posts_question_as_json() {
    let backend = MockBackend::new(json!({ "answer": "2.3 psu" }).to_string(), "{}");
    let questions = backend.questions.clone();
    let content_types = backend.query_content_types.clone();
    let base_url = spawn_backend(backend).await.expect("spawn backend");

    let client = OceanHttpClient::new(config_for(&base_url));
    let response = client.ask("average salinity?").await.expect("ask");

    assert_eq!(response.answer.as_deref(), Some("2.3 psu"));
    assert_eq!(*questions.lock().await, vec!["average salinity?".to_string()]);
    assert_eq!(
        *content_types.lock().await,
        vec!["application/json".to_string()]
    );
}

#[tokio::test]
async fn non_success_status_is_reported_as_status_error() {
    let backend = MockBackend::new(json!({ "answer": "ignored" }).to_string(), "{}")
        .with_query_status(StatusCode::INTERNAL_SERVER_ERROR);
    let base_url = spawn_backend(backend).await.expect("spawn backend");

    let client = OceanHttpClient::new(config_for(&base_url));
    let err = client.ask("anything").await.expect_err("must fail");

    match err {
        ClientError::Status { status, endpoint } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(endpoint.ends_with("/query"), "unexpected endpoint: {endpoint}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let backend = MockBackend::new("<html>upstream down</html>", "{}");
    let base_url = spawn_backend(backend).await.expect("spawn backend");

    let client = OceanHttpClient::new(config_for(&base_url));
    let err = client.ask("anything").await.expect_err("must fail");
    assert!(matches!(err, ClientError::Decode { .. }), "unexpected error: {err}");
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let base_url = unreachable_base_url().await.expect("free port");

    let client = OceanHttpClient::new(config_for(&base_url));
    let err = client.dataset_info().await.expect_err("must fail");
    assert!(matches!(err, ClientError::Transport { .. }), "unexpected error: {err}");
}

#[tokio::test]
async fn dataset_info_decodes_metadata() {
    let body = json!({
        "variables": ["TEMP", "PSAL"],
        "dimensions": { "N_PROF": 120, "N_LEVELS": 80 },
        "coords": { "LATITUDE": { "min": 8.0, "max": 12.5 } },
        "attributes": { "platform": "Argo", "qc_applied": false }
    });
    let backend = MockBackend::new("{}", body.to_string());
    let hits = backend.info_hits.clone();
    let base_url = spawn_backend(backend).await.expect("spawn backend");

    let client = OceanHttpClient::new(config_for(&base_url));
    let reply = client.dataset_info().await.expect("dataset info");

    let DatasetInfoReply::Snapshot(info) = reply else {
        panic!("expected snapshot");
    };
    assert_eq!(info.variables, vec!["TEMP", "PSAL"]);
    assert_eq!(info.dimensions.get("N_PROF"), Some(&120));
    assert_eq!(info.coords["LATITUDE"].max, AttributeValue::from(12.5));
    assert_eq!(
        info.attributes.get("qc_applied"),
        Some(&AttributeValue::Boolean(false))
    );
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn dataset_info_error_body_is_not_a_transport_error() {
    let backend = MockBackend::new("{}", json!({ "error": "bad file" }).to_string());
    let base_url = spawn_backend(backend).await.expect("spawn backend");

    let client = OceanHttpClient::new(config_for(&base_url));
    let reply = client.dataset_info().await.expect("logical failure still decodes");
    assert_eq!(reply, DatasetInfoReply::Failed("bad file".to_string()));
}
