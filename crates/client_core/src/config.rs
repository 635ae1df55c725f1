use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "ocean_chat.toml";

const DEVELOPMENT_BASE_URL: &str = "http://127.0.0.1:8000";
const HOSTED_BASE_URL: &str = "https://ocean-llm-xu4c.onrender.com";
const DATASET_INFO_FAILURE_MESSAGE: &str = "Failed to load dataset info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid backend base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported scheme '{scheme}' in backend base url '{url}' (expected http or https)")]
    UnsupportedScheme { url: String, scheme: String },
    #[error("unknown deployment '{0}' (expected development or hosted)")]
    UnknownDeployment(String),
    #[error("failed to parse config file '{path}': {source}")]
    InvalidFile {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to read config file '{path}': {source}")]
    UnreadableFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Deployment {
    #[default]
    Development,
    Hosted,
}

impl Deployment {
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::Development => DEVELOPMENT_BASE_URL,
            Self::Hosted => HOSTED_BASE_URL,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Development => "Development",
            Self::Hosted => "Hosted",
        }
    }
}

impl std::str::FromStr for Deployment {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Self::Development),
            "hosted" | "deployed" | "production" | "prod" => Ok(Self::Hosted),
            other => Err(ConfigError::UnknownDeployment(other.to_string())),
        }
    }
}

/// Backend location shared by both controllers and the HTTP helper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    deployment: Deployment,
}

impl ClientConfig {
    pub fn new(base_url: &str, deployment: Deployment) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            deployment,
        })
    }

    pub fn for_deployment(deployment: Deployment) -> Self {
        Self {
            base_url: deployment.default_base_url().to_string(),
            deployment,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn deployment(&self) -> Deployment {
        self.deployment
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn backend_unreachable_message(&self) -> String {
        format!(
            "Failed to reach backend. Ensure API is running at {}.",
            self.base_url
        )
    }

    pub fn dataset_info_failure_message(&self) -> String {
        DATASET_INFO_FAILURE_MESSAGE.to_string()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_deployment(Deployment::default())
    }
}

/// Values recognised in `ocean_chat.toml`.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    base_url: Option<String>,
    deployment: Option<Deployment>,
}

/// Explicit overrides, usually from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub deployment: Option<Deployment>,
}

/// Resolves the config as defaults, then the TOML file, then the process
/// environment, then `overrides`.
pub fn load_client_config(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<ClientConfig, ConfigError> {
    let (path, required) = match config_path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };

    let file_contents = match fs::read_to_string(path) {
        Ok(raw) => Some(raw),
        Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => None,
        Err(source) => {
            return Err(ConfigError::UnreadableFile {
                path: path.display().to_string(),
                source,
            })
        }
    };

    resolve_client_config(
        file_contents.as_deref().map(|raw| (path, raw)),
        |name| std::env::var(name).ok(),
        overrides,
    )
}

fn resolve_client_config(
    file: Option<(&Path, &str)>,
    env: impl Fn(&str) -> Option<String>,
    overrides: &ConfigOverrides,
) -> Result<ClientConfig, ConfigError> {
    let file_cfg = match file {
        Some((path, raw)) => {
            toml::from_str::<FileConfig>(raw).map_err(|source| ConfigError::InvalidFile {
                path: path.display().to_string(),
                source,
            })?
        }
        None => FileConfig::default(),
    };

    let non_empty = |name: &str| env(name).filter(|value| !value.trim().is_empty());

    let mut deployment = file_cfg.deployment.unwrap_or_default();
    if let Some(v) = non_empty("OCEAN_CHAT_DEPLOYMENT") {
        deployment = v.parse()?;
    }
    if let Some(v) = overrides.deployment {
        deployment = v;
    }

    let mut base_url = file_cfg.base_url;
    if let Some(v) = non_empty("OCEAN_CHAT_BASE_URL") {
        base_url = Some(v);
    }
    if let Some(v) = non_empty("APP__BASE_URL") {
        base_url = Some(v);
    }
    if let Some(v) = &overrides.base_url {
        base_url = Some(v.clone());
    }

    match base_url {
        Some(url) => ClientConfig::new(&url, deployment),
        None => Ok(ClientConfig::for_deployment(deployment)),
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl {
        url: trimmed.to_string(),
        source,
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme {
            url: trimmed.to_string(),
            scheme: parsed.scheme().to_string(),
        });
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
