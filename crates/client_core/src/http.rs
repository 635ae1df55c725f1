use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::protocol::{DatasetInfoReply, QueryRequest, QueryResponse};
use tracing::debug;

use crate::{config::ClientConfig, error::ClientError};

pub const QUERY_PATH: &str = "query";
pub const DATASET_INFO_PATH: &str = "dataset/info";

#[async_trait]
pub trait QueryApi: Send + Sync {
    async fn ask(&self, question: &str) -> Result<QueryResponse, ClientError>;
}

#[async_trait]
pub trait DatasetInfoApi: Send + Sync {
    async fn dataset_info(&self) -> Result<DatasetInfoReply, ClientError>;
}

/// Thin `reqwest` wrapper for the two backend endpoints.
#[derive(Debug, Clone)]
pub struct OceanHttpClient {
    http: Client,
    config: ClientConfig,
}

impl OceanHttpClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: ClientConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn decode<T: DeserializeOwned>(
        endpoint: String,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status { endpoint, status });
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(source) => return Err(ClientError::Transport { endpoint, source }),
        };
        serde_json::from_str(&body).map_err(|source| ClientError::Decode { endpoint, source })
    }
}

#[async_trait]
impl QueryApi for OceanHttpClient {
    async fn ask(&self, question: &str) -> Result<QueryResponse, ClientError> {
        let endpoint = self.config.endpoint(QUERY_PATH);
        debug!(%endpoint, "posting question");
        // `.json()` also sets `Content-Type: application/json`.
        let response = match self
            .http
            .post(&endpoint)
            .json(&QueryRequest {
                question: question.to_string(),
            })
            .send()
            .await
        {
            Ok(response) => response,
            Err(source) => return Err(ClientError::Transport { endpoint, source }),
        };
        Self::decode(endpoint, response).await
    }
}

#[async_trait]
impl DatasetInfoApi for OceanHttpClient {
    async fn dataset_info(&self) -> Result<DatasetInfoReply, ClientError> {
        let endpoint = self.config.endpoint(DATASET_INFO_PATH);
        debug!(%endpoint, "fetching dataset info");
        let response = match self.http.get(&endpoint).send().await {
            Ok(response) => response,
            Err(source) => return Err(ClientError::Transport { endpoint, source }),
        };
        Self::decode(endpoint, response).await
    }
}

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod tests;
