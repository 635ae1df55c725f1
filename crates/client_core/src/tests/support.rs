use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use shared::protocol::{DatasetInfoReply, QueryRequest, QueryResponse};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    clipboard::ClipboardSink,
    config::{ClientConfig, Deployment},
    error::ClientError,
    http::{DatasetInfoApi, QueryApi},
};

#[derive(Clone)]
pub struct MockBackend {
    pub query_status: StatusCode,
    pub query_body: String,
    pub info_status: StatusCode,
    pub info_body: String,
    pub questions: Arc<Mutex<Vec<String>>>,
    pub query_content_types: Arc<Mutex<Vec<String>>>,
    pub info_hits: Arc<AtomicUsize>,
}

impl MockBackend {
    pub fn new(query_body: impl Into<String>, info_body: impl Into<String>) -> Self {
        Self {
            query_status: StatusCode::OK,
            query_body: query_body.into(),
            info_status: StatusCode::OK,
            info_body: info_body.into(),
            questions: Arc::new(Mutex::new(Vec::new())),
            query_content_types: Arc::new(Mutex::new(Vec::new())),
            info_hits: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_query_status(mut self, status: StatusCode) -> Self {
        self.query_status = status;
        self
    }

    pub fn with_info_status(mut self, status: StatusCode) -> Self {
        self.info_status = status;
        self
    }
}

async fn handle_query(
    State(backend): State<MockBackend>,
    headers: HeaderMap,
    Json(payload): Json<QueryRequest>,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    if let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    {
        backend
            .query_content_types
            .lock()
            .await
            .push(content_type.to_string());
    }
    backend.questions.lock().await.push(payload.question);
    (
        backend.query_status,
        [(header::CONTENT_TYPE, "application/json")],
        backend.query_body.clone(),
    )
}

async fn handle_dataset_info(
    State(backend): State<MockBackend>,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    backend.info_hits.fetch_add(1, Ordering::SeqCst);
    (
        backend.info_status,
        [(header::CONTENT_TYPE, "application/json")],
        backend.info_body.clone(),
    )
}

/// Serves `backend` on an ephemeral port and returns its base url.
pub async fn spawn_backend(backend: MockBackend) -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/query", post(handle_query))
        .route("/dataset/info", get(handle_dataset_info))
        .with_state(backend);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

/// A base url nothing is listening on.
pub async fn unreachable_base_url() -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}

pub fn config_for(base_url: &str) -> ClientConfig {
    ClientConfig::new(base_url, Deployment::Development).expect("test config")
}

pub fn decode_error() -> ClientError {
    let source = serde_json::from_str::<serde_json::Value>("<html>")
        .expect_err("html is not json");
    ClientError::Decode {
        endpoint: "http://127.0.0.1:8000/test".to_string(),
        source,
    }
}

/// In-memory API double counting its calls.
#[derive(Default)]
pub struct ScriptedApi {
    pub answer: Option<String>,
    pub info: Option<DatasetInfoReply>,
    pub calls: AtomicUsize,
}

impl ScriptedApi {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryApi for ScriptedApi {
    async fn ask(&self, _question: &str) -> Result<QueryResponse, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(QueryResponse {
            answer: self.answer.clone(),
        })
    }
}

#[async_trait]
impl DatasetInfoApi for ScriptedApi {
    async fn dataset_info(&self) -> Result<DatasetInfoReply, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.info.clone().ok_or_else(decode_error)
    }
}

#[derive(Default)]
pub struct RecordingClipboard {
    pub contents: Option<String>,
    pub fail: bool,
}

impl ClipboardSink for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("clipboard unavailable");
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
