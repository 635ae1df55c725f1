//! Backend-to-UI events drained by the app shell once per frame.

use client_core::ClientError;
use shared::{
    domain::RequestId,
    protocol::{DatasetInfoReply, QueryResponse},
};

pub enum UiEvent {
    Info(String),
    WorkerFailed(String),
    QueryResolved {
        request_id: RequestId,
        outcome: Result<QueryResponse, ClientError>,
    },
    DatasetInfoResolved {
        request_id: RequestId,
        outcome: Result<DatasetInfoReply, ClientError>,
    },
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Info(_) => "info",
            Self::WorkerFailed(_) => "worker_failed",
            Self::QueryResolved { .. } => "query_resolved",
            Self::DatasetInfoResolved { .. } => "dataset_info_resolved",
        }
    }
}
