//! Fetch-on-mount lifecycle for the dataset metadata view.

use shared::{
    domain::{RequestId, EMPTY_PANEL_TEXT},
    protocol::{DatasetInfo, DatasetInfoReply},
};
use tracing::{debug, info, warn};

use crate::{config::ClientConfig, error::ClientError, http::DatasetInfoApi, request::RequestTracker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Loaded,
    Errored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingFetch {
    pub request_id: RequestId,
}

#[derive(Debug, Clone)]
pub struct DatasetInfoController {
    snapshot: Option<DatasetInfo>,
    status: LoadStatus,
    error_message: String,
    tracker: RequestTracker,
    failure_message: String,
    revision: u64,
}

impl DatasetInfoController {
    pub fn new(config: &ClientConfig) -> Self {
        let mut tracker = RequestTracker::new();
        // Not mounted until `on_mount`.
        tracker.retire();
        Self {
            snapshot: None,
            status: LoadStatus::Loading,
            error_message: String::new(),
            tracker,
            failure_message: config.dataset_info_failure_message(),
            revision: 0,
        }
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn is_mounted(&self) -> bool {
        self.tracker.is_live()
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Last successfully fetched metadata. Kept while a refresh is in flight.
    pub fn snapshot(&self) -> Option<&DatasetInfo> {
        self.snapshot.as_ref()
    }

    /// Bumped on every state mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Starts the mount fetch. Any snapshot from an earlier mount is dropped.
    pub fn on_mount(&mut self) -> PendingFetch {
        self.tracker.revive();
        self.snapshot = None;
        self.begin_fetch()
    }

    /// Starts a full reload; ignored while loading or unmounted.
    pub fn refresh(&mut self) -> Option<PendingFetch> {
        if self.is_loading() || !self.is_mounted() {
            return None;
        }
        Some(self.begin_fetch())
    }

    pub fn can_refresh(&self) -> bool {
        self.is_mounted() && !self.is_loading()
    }

    pub fn unmount(&mut self) {
        self.tracker.retire();
    }

    fn begin_fetch(&mut self) -> PendingFetch {
        let request_id = self.tracker.issue();
        self.status = LoadStatus::Loading;
        self.error_message.clear();
        self.touch();
        debug!(%request_id, "dataset info fetch issued");
        PendingFetch { request_id }
    }

    /// Applies a fetch outcome. Returns `false` when the controller was
    /// unmounted or the request superseded, in which case nothing changes.
    pub fn apply_fetch(
        &mut self,
        request_id: RequestId,
        outcome: Result<DatasetInfoReply, ClientError>,
    ) -> bool {
        if !self.tracker.accept(request_id) {
            debug!(%request_id, "ignoring dataset info response for retired request");
            return false;
        }

        match outcome {
            Ok(DatasetInfoReply::Snapshot(info)) => {
                info!(
                    %request_id,
                    variables = info.variables.len(),
                    dimensions = info.dimensions.len(),
                    "dataset info loaded"
                );
                self.snapshot = Some(info);
                self.status = LoadStatus::Loaded;
            }
            Ok(DatasetInfoReply::Failed(message)) => {
                warn!(%request_id, %message, "backend reported dataset info error");
                self.error_message = message;
                self.status = LoadStatus::Errored;
            }
            Err(err) => {
                warn!(%request_id, error = %err, "dataset info request failed");
                self.error_message = self.failure_message.clone();
                self.status = LoadStatus::Errored;
            }
        }
        self.touch();
        true
    }

    pub async fn load_with<A: DatasetInfoApi + ?Sized>(&mut self, api: &A) -> LoadStatus {
        let pending = self.on_mount();
        self.resolve_with(pending, api).await
    }

    pub async fn refresh_with<A: DatasetInfoApi + ?Sized>(&mut self, api: &A) -> LoadStatus {
        if let Some(pending) = self.refresh() {
            self.resolve_with(pending, api).await;
        }
        self.status
    }

    async fn resolve_with<A: DatasetInfoApi + ?Sized>(
        &mut self,
        pending: PendingFetch,
        api: &A,
    ) -> LoadStatus {
        let outcome = api.dataset_info().await;
        self.apply_fetch(pending.request_id, outcome);
        self.status
    }

    /// The four metadata panels, available once loaded.
    pub fn panels(&self) -> Option<[InfoPanel; 4]> {
        match (&self.status, &self.snapshot) {
            (LoadStatus::Loaded, Some(info)) => Some(project_panels(info)),
            _ => None,
        }
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Variables,
    Dimensions,
    Coordinates,
    Attributes,
}

impl PanelKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Variables => "Variables",
            Self::Dimensions => "Dimensions",
            Self::Coordinates => "Coordinates",
            Self::Attributes => "Attributes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelEntry {
    pub label: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelBody {
    /// Rendered as [`EMPTY_PANEL_TEXT`].
    None,
    Entries(Vec<PanelEntry>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoPanel {
    pub kind: PanelKind,
    pub body: PanelBody,
}

impl InfoPanel {
    fn new(kind: PanelKind, entries: Vec<PanelEntry>) -> Self {
        let body = if entries.is_empty() {
            PanelBody::None
        } else {
            PanelBody::Entries(entries)
        };
        Self { kind, body }
    }

    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    /// Plain-text rendering, one line per entry.
    pub fn lines(&self) -> Vec<String> {
        match &self.body {
            PanelBody::None => vec![EMPTY_PANEL_TEXT.to_string()],
            PanelBody::Entries(entries) => entries
                .iter()
                .map(|entry| match &entry.value {
                    Some(value) => format!("{}: {value}", entry.label),
                    None => entry.label.clone(),
                })
                .collect(),
        }
    }
}

pub fn project_panels(info: &DatasetInfo) -> [InfoPanel; 4] {
    let entry = |label: &str, value: Option<String>| PanelEntry {
        label: label.to_string(),
        value,
    };

    [
        InfoPanel::new(
            PanelKind::Variables,
            info.variables.iter().map(|name| entry(name, None)).collect(),
        ),
        InfoPanel::new(
            PanelKind::Dimensions,
            info.dimensions
                .iter()
                .map(|(name, size)| entry(name, Some(size.to_string())))
                .collect(),
        ),
        InfoPanel::new(
            PanelKind::Coordinates,
            info.coords
                .iter()
                .map(|(name, range)| {
                    entry(name, Some(format!("min: {}, max: {}", range.min, range.max)))
                })
                .collect(),
        ),
        InfoPanel::new(
            PanelKind::Attributes,
            info.attributes
                .iter()
                .map(|(name, value)| entry(name, Some(value.to_string())))
                .collect(),
        ),
    ]
}

#[cfg(test)]
#[path = "tests/dataset_info_tests.rs"]
mod tests;
