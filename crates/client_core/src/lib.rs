//! Client-side orchestration for the ocean data chat: backend configuration,
//! the HTTP helper, and the two view controllers.

pub mod clipboard;
pub mod config;
pub mod dataset_info;
pub mod error;
pub mod http;
pub mod query;
pub mod request;

pub use clipboard::ClipboardSink;
pub use config::{load_client_config, ClientConfig, ConfigError, ConfigOverrides, Deployment};
pub use dataset_info::{
    project_panels, DatasetInfoController, InfoPanel, LoadStatus, PanelBody, PanelEntry,
    PanelKind, PendingFetch,
};
pub use error::ClientError;
pub use http::{DatasetInfoApi, OceanHttpClient, QueryApi};
pub use query::{PendingQuery, QueryController, QueryStatus};
pub use request::RequestTracker;

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
