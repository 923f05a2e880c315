//! Connectivity Client
//!
//! Submits a [`TargetDescriptor`] to the connectivity-check service and decodes its verdict.
//! The service does the actual reachability test; this side only speaks its JSON contract.

use crate::error::CheckError;
use crate::target::TargetDescriptor;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Bounded timeouts applied to every outbound HTTP call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub connect: Duration,
    pub request: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect: DEFAULT_CONNECT_TIMEOUT,
            request: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

pub(crate) fn build_http_client(
    timeouts: HttpTimeouts,
    accept_invalid_certs: bool,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(timeouts.connect)
        .timeout(timeouts.request)
        .danger_accept_invalid_certs(accept_invalid_certs)
        .build()
}

/// Request body sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRequest {
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_proxy: Option<String>,
}

impl From<&TargetDescriptor> for CheckRequest {
    fn from(descriptor: &TargetDescriptor) -> Self {
        Self {
            target: descriptor.target(),
            http_proxy: descriptor
                .proxy
                .as_ref()
                .map(|proxy| format!("{}:{}", proxy.host, proxy.port)),
        }
    }
}

/// Verdict and diagnostics returned by the service. Absent fields decode to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectivityResult {
    pub last_checked: i64,
    pub entry: String,
    pub can_connect: bool,
    pub http_status: i64,
    pub valid_hostname: bool,
    pub valid_url: bool,
}

impl ConnectivityResult {
    pub fn verdict(&self) -> &'static str {
        if self.can_connect {
            "I am able to connect"
        } else {
            "I am unable to connect"
        }
    }
}

#[async_trait]
pub trait ConnectivityClient: Send + Sync {
    /// Ask the service whether the descriptor's target is reachable.
    async fn check(&self, descriptor: &TargetDescriptor) -> Result<ConnectivityResult, CheckError>;
}

/// [`ConnectivityClient`] that POSTs JSON to the descriptor's service URL.
pub struct HttpConnectivityClient {
    client: Client,
}

impl HttpConnectivityClient {
    pub fn new(timeouts: HttpTimeouts) -> Result<Self, CheckError> {
        let client = build_http_client(timeouts, false)
            .map_err(|e| CheckError::ConnectivityUnreachable(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ConnectivityClient for HttpConnectivityClient {
    async fn check(&self, descriptor: &TargetDescriptor) -> Result<ConnectivityResult, CheckError> {
        let request = CheckRequest::from(descriptor);
        debug!(url = %descriptor.service_url, check_target = %request.target, "Submitting connectivity check");

        let response = self
            .client
            .post(&descriptor.service_url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| CheckError::ConnectivityUnreachable(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| CheckError::ConnectivityUnreachable(e.to_string()))?;

        // The status code is informational; the body decides.
        let result: ConnectivityResult = serde_json::from_slice(&body)
            .map_err(|e| CheckError::InvalidResponse(e.to_string()))?;

        info!(
            status = %status,
            can_connect = result.can_connect,
            http_status = result.http_status,
            valid_hostname = result.valid_hostname,
            valid_url = result.valid_url,
            "Connectivity check completed"
        );
        Ok(result)
    }
}
