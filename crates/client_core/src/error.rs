use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong between issuing a request and holding a
/// decoded body. All variants count as transport failures for the controllers.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: String,
        status: StatusCode,
    },
    #[error("malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("backend worker unavailable: {0}")]
    Dispatch(String),
}
