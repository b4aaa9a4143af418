// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Client configuration.
//!
//! A [`ClientConfig`] is a plain value: build it in code, deserialize it from
//! whatever configuration format the application uses, or read it from the
//! environment with [`ClientConfig::from_env`]. A [`crate::Client`] takes its
//! own copy at construction and never changes it afterwards.

use std::fmt;
use std::time::Duration;

use orchestrate_mapping::LinkFormat;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ClientError, Result};

/// Root of the hosted Orchestrate API.
pub const DEFAULT_BASE_URL: &str = "https://api.orchestrate.io/v0/";

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "ORCHESTRATE_API_KEY";
/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const ENV_BASE_URL: &str = "ORCHESTRATE_BASE_URL";
/// Environment variable overriding the request timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "ORCHESTRATE_TIMEOUT_SECS";

/// Connection parameters for one client.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API root, e.g. `https://api.orchestrate.io/v0/`.
    pub base_url: String,
    /// Application API key, sent as the HTTP Basic user name.
    pub api_key: String,
    /// Per-request timeout enforced by the transport.
    pub timeout_secs: u64,
    pub user_agent: String,
    /// API-root prefix of continuation links. Derived from `base_url` when
    /// unset.
    pub link_prefix: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: String::new(),
            timeout_secs: 30,
            user_agent: concat!("orchestrate-rs/", env!("CARGO_PKG_VERSION")).to_owned(),
            link_prefix: None,
        }
    }
}

// The key stays out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("link_prefix", &self.link_prefix)
            .finish()
    }
}

impl ClientConfig {
    /// Defaults with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_link_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.link_prefix = Some(prefix.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Read `ORCHESTRATE_API_KEY` (required), `ORCHESTRATE_BASE_URL` and
    /// `ORCHESTRATE_TIMEOUT_SECS` (optional).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(ENV_API_KEY)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ClientError::Configuration(format!("{ENV_API_KEY} is not set")))?;
        let mut config = Self::new(api_key);
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = raw.trim().parse().map_err(|e| {
                ClientError::Configuration(format!("{ENV_TIMEOUT_SECS}={raw:?}: {e}"))
            })?;
        }
        Ok(config)
    }

    /// The base URL, validated and normalised to end with `/` so that request
    /// targets can be appended.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ClientError::Configuration(format!("invalid base URL {:?}: {e}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Configuration(format!(
                "base URL {:?} must be http or https",
                self.base_url
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }

    /// How continuation links are written by the service.
    pub fn link_format(&self) -> Result<LinkFormat> {
        Ok(match &self.link_prefix {
            Some(prefix) => LinkFormat::with_prefix(prefix),
            None => LinkFormat::from_base_url(&self.parsed_base_url()?),
        })
    }
}
