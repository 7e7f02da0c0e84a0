//! Client for the dnsleaktest.com probe API.
//!
//! The service exposes two calls used in strict order around the lookup phase:
//! - `POST /api/v1/identifiers` registers the probe identifiers to watch for
//! - `POST /api/v1/servers-for-result` returns the resolvers seen for those identifiers
//!
//! Both calls go through the one `reqwest::Client` owned by [`LeakTestClient`].
//!
//! # Examples
//! ```rust,no_run
//! use dnsleak::api::{LeakTestClient, DEFAULT_API_URL};
//! use dnsleak::probe;
//!
//! #[tokio::main]
//! async fn main() -> dnsleak::Result<()> {
//!     let client = LeakTestClient::new(DEFAULT_API_URL)?;
//!     let batch = probe::generate(6)?;
//!     client.register(&batch).await?;
//!     // ... resolve every probe here ...
//!     let body = client.servers_for_result(&batch).await?;
//!     println!("{}", String::from_utf8_lossy(&body));
//!     Ok(())
//! }
//! ```

use crate::probe::ProbeId;
use crate::utils::{LeakTestError, Result};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::Serialize;

pub const DEFAULT_API_URL: &str = "https://www.dnsleaktest.com";

pub const IDENTIFIERS_PATH: &str = "/api/v1/identifiers";
pub const SERVERS_FOR_RESULT_PATH: &str = "/api/v1/servers-for-result";

/// Sent with both calls so the service operators can tell this tool apart.
pub const USER_AGENT_VALUE: &str = concat!("dnsleak/", env!("CARGO_PKG_VERSION"));

#[derive(Serialize)]
struct RegisterRequest<'a> {
    identifiers: &'a [ProbeId],
}

#[derive(Serialize)]
struct ResultsRequest<'a> {
    queries: &'a [ProbeId],
}

#[derive(Debug, Clone)]
pub struct LeakTestClient {
    http: Client,
    base_url: String,
}

impl LeakTestClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT_VALUE)
            .build()
            .map_err(|e| LeakTestError::Other(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Registers `probes` so the service starts recording resolvers that ask for them.
    ///
    /// Only the transport round trip matters; the response body is discarded.
    pub async fn register(&self, probes: &[ProbeId]) -> Result<()> {
        log::info!("Registering {} probe identifiers", probes.len());
        self.post(
            "identifiers",
            IDENTIFIERS_PATH,
            &RegisterRequest {
                identifiers: probes,
            },
        )
        .await?;
        Ok(())
    }

    /// Fetches the raw resolver records observed for `probes`, byte for byte.
    pub async fn servers_for_result(&self, probes: &[ProbeId]) -> Result<Vec<u8>> {
        log::info!("Requesting results for {} probe identifiers", probes.len());
        let response = self
            .post(
                "servers-for-result",
                SERVERS_FOR_RESULT_PATH,
                &ResultsRequest { queries: probes },
            )
            .await?;

        let body = response.bytes().await.map_err(|e| LeakTestError::Transport {
            endpoint: "servers-for-result",
            message: format!("failed to read response body: {}", e),
        })?;
        Ok(body.to_vec())
    }

    async fn post<B: Serialize>(
        &self,
        endpoint: &'static str,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .json(body)
            .send()
            .await
            .map_err(|e| LeakTestError::Transport {
                endpoint,
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            log::warn!("{} returned status: {}", url, response.status());
        }

        Ok(response)
    }
}
