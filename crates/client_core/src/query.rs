//! Question/answer session state and its request lifecycle.

use shared::{
    domain::{RequestId, NO_ANSWER_PLACEHOLDER, SAMPLE_QUERIES},
    protocol::QueryResponse,
};
use tracing::{debug, info, warn};

use crate::{
    clipboard::ClipboardSink, config::ClientConfig, error::ClientError, http::QueryApi,
    request::RequestTracker,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Loading,
    Answered,
    Errored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum QueryPhase {
    Idle,
    Loading,
    Answered(String),
    Errored(String),
}

/// A submitted question waiting to be sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    pub request_id: RequestId,
    pub question: String,
}

#[derive(Debug, Clone)]
pub struct QueryController {
    question: String,
    phase: QueryPhase,
    tracker: RequestTracker,
    unreachable_message: String,
    revision: u64,
}

impl QueryController {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            question: String::new(),
            phase: QueryPhase::Idle,
            tracker: RequestTracker::new(),
            unreachable_message: config.backend_unreachable_message(),
            revision: 0,
        }
    }

    pub fn status(&self) -> QueryStatus {
        match self.phase {
            QueryPhase::Idle => QueryStatus::Idle,
            QueryPhase::Loading => QueryStatus::Loading,
            QueryPhase::Answered(_) => QueryStatus::Answered,
            QueryPhase::Errored(_) => QueryStatus::Errored,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == QueryPhase::Loading
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    /// Input buffer for text widgets.
    pub fn question_mut(&mut self) -> &mut String {
        &mut self.question
    }

    pub fn set_question(&mut self, text: impl Into<String>) {
        self.question = text.into();
        self.touch();
    }

    pub fn answer_text(&self) -> &str {
        match &self.phase {
            QueryPhase::Answered(answer) => answer,
            _ => "",
        }
    }

    pub fn error_message(&self) -> &str {
        match &self.phase {
            QueryPhase::Errored(message) => message,
            _ => "",
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn sample_queries() -> &'static [&'static str] {
        SAMPLE_QUERIES
    }

    /// Accepts the current question buffer for sending.
    ///
    /// Blank questions are ignored without touching any state.
    pub fn submit_query(&mut self) -> Option<PendingQuery> {
        let question = self.question.trim();
        if question.is_empty() {
            return None;
        }
        let question = question.to_string();

        let request_id = self.tracker.issue();
        self.phase = QueryPhase::Loading;
        self.touch();
        debug!(%request_id, "query submitted");
        Some(PendingQuery {
            request_id,
            question,
        })
    }

    /// Applies the outcome of a request issued by [`Self::submit_query`].
    ///
    /// Returns `false` when the request was superseded and nothing changed.
    pub fn apply_answer(
        &mut self,
        request_id: RequestId,
        outcome: Result<QueryResponse, ClientError>,
    ) -> bool {
        if !self.tracker.accept(request_id) {
            debug!(%request_id, "ignoring stale query response");
            return false;
        }

        self.phase = match outcome {
            Ok(response) => {
                let answer = response
                    .answer_text()
                    .unwrap_or(NO_ANSWER_PLACEHOLDER)
                    .to_string();
                info!(%request_id, "query answered");
                QueryPhase::Answered(answer)
            }
            Err(err) => {
                warn!(%request_id, error = %err, "query request failed");
                QueryPhase::Errored(self.unreachable_message.clone())
            }
        };
        self.touch();
        true
    }

    /// Submits the current question and waits for the backend.
    pub async fn submit_with<A: QueryApi + ?Sized>(&mut self, api: &A) -> QueryStatus {
        if let Some(pending) = self.submit_query() {
            let outcome = api.ask(&pending.question).await;
            self.apply_answer(pending.request_id, outcome);
        }
        self.status()
    }

    /// Replaces the question with the sample at `index`.
    pub fn select_sample_query(&mut self, index: usize) -> bool {
        let Some(sample) = SAMPLE_QUERIES.get(index) else {
            return false;
        };
        self.set_question(*sample);
        true
    }

    pub fn can_clear(&self) -> bool {
        !self.is_loading() && !(self.answer_text().is_empty() && self.question.is_empty())
    }

    pub fn clear_session(&mut self) -> bool {
        if !self.can_clear() {
            return false;
        }
        self.question.clear();
        self.phase = QueryPhase::Idle;
        self.touch();
        true
    }

    /// Copies the answer to `clipboard`; failures are logged and dropped.
    pub fn copy_answer(&self, clipboard: &mut dyn ClipboardSink) -> bool {
        let answer = self.answer_text();
        if answer.is_empty() {
            return false;
        }
        match clipboard.set_text(answer) {
            Ok(()) => true,
            Err(err) => {
                debug!("clipboard copy failed: {err:#}");
                false
            }
        }
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
#[path = "tests/query_tests.rs"]
mod tests;
