//! Base-URL Resolver
//!
//! Works out where the connectivity-check service lives: an explicit route override, the
//! `willitconnect.` route on the current organization's first domain, or a location derived
//! from the platform API endpoint.

use crate::error::CheckError;
use crate::platform::PlatformContext;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Host label the service is deployed under.
pub const SERVICE_ROUTE_NAME: &str = "willitconnect";

/// Fixed path of the check endpoint.
pub const SERVICE_PATH: &str = "/v2/willitconnect";

/// How the service base is discovered when no route override is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Discovery {
    /// `https://willitconnect.<first domain of the current org>`
    #[default]
    OrgDomain,
    /// Derived from the platform API endpoint.
    ApiEndpoint,
}

/// Resolved base location of the connectivity-check service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRoute {
    base_url: String,
}

impl ServiceRoute {
    /// Resolve the service route. A non-empty `route_override` bypasses the platform entirely.
    pub async fn resolve(
        platform: &dyn PlatformContext,
        route_override: Option<&str>,
        discovery: Discovery,
    ) -> Result<Self, CheckError> {
        if let Some(route) = route_override.filter(|r| !r.is_empty()) {
            return Self::from_override(route);
        }

        let route = match discovery {
            Discovery::OrgDomain => {
                let domain = discover_org_domain(platform).await?;
                Self {
                    base_url: format!("https://{}.{}", SERVICE_ROUTE_NAME, domain),
                }
            }
            Discovery::ApiEndpoint => {
                let endpoint = platform.api_endpoint().await?;
                if endpoint.trim().is_empty() {
                    return Err(CheckError::NoApiEndpoint);
                }
                Self {
                    base_url: base_from_api_endpoint(endpoint.trim()),
                }
            }
        };
        debug!(base_url = %route.base_url, ?discovery, "Resolved service route");
        Ok(route)
    }

    /// Route from a user-supplied override. Requires at least two dots (FQDN heuristic).
    pub fn from_override(route: &str) -> Result<Self, CheckError> {
        if route.matches('.').count() < 2 {
            return Err(CheckError::InvalidRoute);
        }
        let base_url = if has_http_scheme(route) {
            route.to_string()
        } else {
            format!("https://{}", route)
        };
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the check endpoint: the base with [`SERVICE_PATH`] appended once.
    pub fn url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with(SERVICE_PATH) {
            base.to_string()
        } else {
            format!("{}{}", base, SERVICE_PATH)
        }
    }
}

async fn discover_org_domain(platform: &dyn PlatformContext) -> Result<String, CheckError> {
    let org = platform.current_organization().await?;
    if org.name.is_empty() {
        return Err(CheckError::NoSession);
    }
    let details = platform
        .organization_details(&org.name)
        .await
        .map_err(|e| match e {
            CheckError::NoSession => CheckError::NoSession,
            _ => CheckError::NoOrg,
        })?;
    match details.domains.first() {
        Some(domain) if !domain.name.is_empty() => Ok(domain.name.clone()),
        _ => Err(CheckError::NoDomain),
    }
}

fn has_http_scheme(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// The API endpoint itself, trailing `/` trimmed, `https://` added when it has no scheme.
fn base_from_api_endpoint(endpoint: &str) -> String {
    let endpoint = endpoint.trim_end_matches('/');
    if has_http_scheme(endpoint) {
        endpoint.to_string()
    } else {
        format!("https://{}", endpoint)
    }
}
