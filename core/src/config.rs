//! Client configuration: base URL, credentials, org and timeout.
//!
//! A `ClientConfig` is built once and handed to the client, which keeps it
//! for its whole lifetime. Nothing here is global or mutable after
//! construction.

use std::time::Duration;

use base64::Engine;
use url::Url;

use crate::error::{ApiError, Result};

/// Credentials attached to every request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Credentials {
    #[default]
    None,
    /// API key or service account token.
    Bearer(String),
    Basic { username: String, password: String },
}

impl Credentials {
    /// Parse the `GRAFANA_AUTH` format: `user:password` selects basic auth,
    /// anything else is treated as a bearer token.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((username, password)) => Credentials::Basic {
                username: username.to_string(),
                password: password.to_string(),
            },
            None if raw.is_empty() => Credentials::None,
            None => Credentials::Bearer(raw.to_string()),
        }
    }

    /// Value for the `authorization` header, if any.
    pub fn header_value(&self) -> Option<String> {
        match self {
            Credentials::None => None,
            Credentials::Bearer(token) => Some(format!("Bearer {token}")),
            Credentials::Basic { username, password } => {
                let encoded = base64::engine::general_purpose::STANDARD
                    .encode(format!("{username}:{password}"));
                Some(format!("Basic {encoded}"))
            }
        }
    }
}

/// Immutable settings shared by every call a client makes.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    credentials: Credentials,
    org_id: Option<i64>,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Validate `base_url` and create a config without credentials.
    ///
    /// A sub-path (e.g. `https://host/grafana/`) is kept; query and fragment
    /// are dropped.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut url = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidConfig(format!("invalid base url {base_url:?}: {e}")))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ApiError::InvalidConfig(format!(
                "base url must use http or https, got {}",
                url.scheme()
            )));
        }
        url.set_query(None);
        url.set_fragment(None);
        Ok(Self {
            base_url: url,
            credentials: Credentials::None,
            org_id: None,
            timeout: None,
        })
    }

    /// Build a config from `GRAFANA_URL`, `GRAFANA_AUTH` and `GRAFANA_ORG_ID`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = lookup("GRAFANA_URL")
            .ok_or_else(|| ApiError::InvalidConfig("GRAFANA_URL is not set".to_string()))?;
        let mut config = Self::new(&url)?;
        if let Some(auth) = lookup("GRAFANA_AUTH") {
            config.credentials = Credentials::parse(&auth);
        }
        if let Some(org) = lookup("GRAFANA_ORG_ID") {
            let org_id = org
                .trim()
                .parse::<i64>()
                .map_err(|e| ApiError::InvalidConfig(format!("GRAFANA_ORG_ID {org:?}: {e}")))?;
            config.org_id = Some(org_id);
        }
        Ok(config)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.credentials = Credentials::Bearer(token.into());
        self
    }

    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Credentials::Basic {
            username: username.into(),
            password: password.into(),
        };
        self
    }

    /// Scope requests to an organisation via the `x-grafana-org-id` header.
    pub fn with_org_id(mut self, org_id: i64) -> Self {
        self.org_id = Some(org_id);
        self
    }

    /// Per-call timeout forwarded to the transport. Unset means the
    /// transport's own behaviour applies.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn org_id(&self) -> Option<i64> {
        self.org_id
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
