// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Orchestrate client: configuration, authentication, and the exchange loop.
//!
//! [`Client`] is the entry point for every SDK operation. It owns the parsed
//! base URL, the precomputed credential header, the continuation-link format
//! and a [`Transport`]. Domain methods (key/value, graph, events) live in
//! `impl Client` blocks in their own modules and all funnel through
//! [`Client::exchange`].

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use http::header::{HeaderValue, AUTHORIZATION};
use http::{Method, StatusCode};
use orchestrate_mapping::{LinkFormat, RequestSpec};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// The main Orchestrate client.
///
/// Holds only immutable state, so one instance can serve any number of
/// concurrent calls; share it behind an `Arc` if needed. Each call performs
/// exactly one HTTP exchange and never retries.
///
/// # Examples
///
/// ```rust,no_run
/// use orchestrate_client::Client;
///
/// # async fn demo() -> orchestrate_client::Result<()> {
/// let client = Client::with_api_key("my-api-key")?;
/// let alice = client.get("users", "alice").await?;
/// println!("read alice at ref {:?}", alice.reference());
/// # Ok(())
/// # }
/// ```
pub struct Client<T = ReqwestTransport> {
    /// API root, always ending in `/`.
    base_url: Url,
    /// `Basic base64(<api key>:)`, marked sensitive.
    auth: HeaderValue,
    link_format: LinkFormat,
    transport: T,
}

impl Client<ReqwestTransport> {
    /// Client for `config` over the default reqwest transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, transport)
    }

    /// Client for the hosted service with default settings.
    pub fn with_api_key(api_key: &str) -> Result<Self> {
        Self::new(ClientConfig::new(api_key))
    }
}

impl<T: Transport> Client<T> {
    /// Client for `config` over a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// [`ClientError::Configuration`] if the base URL is invalid or the API
    /// key is empty or cannot be carried in a header.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        let base_url = config.parsed_base_url()?;
        let link_format = config.link_format()?;
        let auth = basic_auth(&config.api_key)?;
        Ok(Self {
            base_url,
            auth,
            link_format,
            transport,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn link_format(&self) -> &LinkFormat {
        &self.link_format
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // -- Health check -------------------------------------------------------

    /// `HEAD` the API root. Returns `true` if the service accepts the
    /// credential.
    pub async fn ping(&self) -> Result<bool> {
        let spec = RequestSpec {
            method: Method::HEAD,
            target: String::new(),
            headers: Default::default(),
            body: None,
            success: StatusCode::OK,
        };
        match self.exchange(spec).await {
            Ok(_) => Ok(true),
            Err(ClientError::Service(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    // -- Internal HTTP helpers ----------------------------------------------

    /// Absolute URL for a request target. The target is appended verbatim.
    pub(crate) fn url(&self, target: &str) -> Result<Url> {
        Url::parse(&format!("{}{target}", self.base_url))
            .map_err(|e| ClientError::InvalidAddress(format!("{target:?} is not a valid path: {e}")))
    }

    /// Send `spec` and return the response if it carries the expected success
    /// status; any other status becomes [`ClientError::Service`].
    pub(crate) async fn exchange(&self, spec: RequestSpec) -> Result<HttpResponse> {
        let url = self.url(&spec.target)?;
        let mut headers = spec.headers.clone();
        headers.insert(AUTHORIZATION, self.auth.clone());

        let request = HttpRequest {
            method: spec.method.clone(),
            url,
            headers,
            body: spec.body.clone(),
        };
        debug!(method = %request.method, target = %spec.target, "sending request");

        let response = self.transport.execute(request).await?;
        debug!(status = response.status.as_u16(), target = %spec.target, "received response");

        spec.check_status(response.status, &response.body)?;
        Ok(response)
    }
}

fn basic_auth(api_key: &str) -> Result<HeaderValue> {
    if api_key.is_empty() {
        return Err(ClientError::Configuration("api key must not be empty".into()));
    }
    let encoded = BASE64.encode(format!("{api_key}:"));
    let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
        .map_err(|e| ClientError::Configuration(format!("api key not usable in a header: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}

/// JSON-encode a caller value for a request body.
pub(crate) fn encode<V: Serialize + ?Sized>(value: &V) -> Result<bytes::Bytes> {
    serde_json::to_vec(value)
        .map(bytes::Bytes::from)
        .map_err(ClientError::Serialization)
}
