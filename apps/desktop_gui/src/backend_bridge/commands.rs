//! Backend commands queued from UI to backend worker.

use shared::domain::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    AskQuestion {
        request_id: RequestId,
        question: String,
    },
    FetchDatasetInfo {
        request_id: RequestId,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AskQuestion { .. } => "ask_question",
            Self::FetchDatasetInfo { .. } => "fetch_dataset_info",
        }
    }
}
