//! Platform context backed by the Cloud Foundry CLI session.
//!
//! Reads `$CF_HOME/.cf/config.json` (written by `cf login` / `cf target`) and talks to the
//! Cloud Foundry v3 API with the stored access token.

use crate::client::{build_http_client, HttpTimeouts};
use crate::error::CheckError;
use crate::platform::{Domain, Organization, OrganizationDetails, PlatformContext};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Subset of the CF CLI `config.json` used here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfSession {
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default, rename = "SSLDisabled")]
    pub ssl_disabled: bool,
    #[serde(default)]
    pub organization_fields: CfOrganizationFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfOrganizationFields {
    #[serde(default, rename = "GUID")]
    pub guid: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    resources: Vec<T>,
}

#[derive(Deserialize)]
struct OrganizationResource {
    guid: String,
    name: String,
}

#[derive(Deserialize)]
struct DomainResource {
    name: String,
}

/// Path of the CF CLI session file under `cf_home` (defaults to `$CF_HOME`, then `$HOME`).
pub fn session_file_path(cf_home: Option<&Path>) -> Option<PathBuf> {
    let home = match cf_home {
        Some(home) => home.to_path_buf(),
        None => match std::env::var_os("CF_HOME") {
            Some(home) if !home.is_empty() => PathBuf::from(home),
            _ => directories::BaseDirs::new()?.home_dir().to_path_buf(),
        },
    };
    Some(home.join(".cf").join("config.json"))
}

fn load_session(path: &Path) -> Option<CfSession> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "CF CLI session file not readable");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "CF CLI session file is not valid JSON");
            None
        }
    }
}

/// [`PlatformContext`] over the CF CLI session file and the CF v3 API.
pub struct CfCliContext {
    session: Option<CfSession>,
    client: Client,
}

impl CfCliContext {
    /// Load the session from `cf_home` (or the default CF CLI location).
    ///
    /// A missing or unreadable session is not an error here; it surfaces as
    /// [`CheckError::NoSession`] once the platform is actually consulted.
    pub fn load(cf_home: Option<&Path>, timeouts: HttpTimeouts) -> Result<Self, CheckError> {
        let session = session_file_path(cf_home).and_then(|path| load_session(&path));
        Self::from_session(session, timeouts)
    }

    pub fn from_session(
        session: Option<CfSession>,
        timeouts: HttpTimeouts,
    ) -> Result<Self, CheckError> {
        let accept_invalid_certs = session.as_ref().map(|s| s.ssl_disabled).unwrap_or(false);
        let client = build_http_client(timeouts, accept_invalid_certs).map_err(|e| {
            CheckError::Config(format!("Failed to create platform HTTP client: {}", e))
        })?;
        Ok(Self { session, client })
    }

    fn logged_in_session(&self) -> Result<&CfSession, CheckError> {
        match &self.session {
            Some(session) if !session.access_token.is_empty() && !session.target.is_empty() => {
                Ok(session)
            }
            _ => Err(CheckError::NoSession),
        }
    }

    async fn get_page<T: for<'de> Deserialize<'de>>(
        &self,
        session: &CfSession,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Page<T>, CheckError> {
        let url = format!("{}{}", session.target.trim_end_matches('/'), path);
        debug!(url = %url, "Querying CF API");
        let response = self
            .client
            .get(&url)
            .header("Authorization", &session.access_token)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "CF API request failed");
                CheckError::NoOrg
            })?;

        if !response.status().is_success() {
            warn!(url = %url, status = %response.status(), "CF API returned an error status");
            return Err(CheckError::NoOrg);
        }

        response.json().await.map_err(|e| {
            warn!(url = %url, error = %e, "CF API returned an unexpected body");
            CheckError::NoOrg
        })
    }
}

#[async_trait]
impl PlatformContext for CfCliContext {
    async fn current_organization(&self) -> Result<Organization, CheckError> {
        let session = self.logged_in_session()?;
        let org = &session.organization_fields;
        if org.name.is_empty() {
            return Err(CheckError::NoSession);
        }
        Ok(Organization {
            guid: org.guid.clone(),
            name: org.name.clone(),
        })
    }

    async fn organization_details(&self, name: &str) -> Result<OrganizationDetails, CheckError> {
        let session = self.logged_in_session()?;

        let orgs: Page<OrganizationResource> = self
            .get_page(session, "/v3/organizations", &[("names", name)])
            .await?;
        let org = orgs
            .resources
            .into_iter()
            .find(|org| org.name == name)
            .ok_or(CheckError::NoOrg)?;

        let domains: Page<DomainResource> = self
            .get_page(
                session,
                &format!("/v3/organizations/{}/domains", org.guid),
                &[],
            )
            .await?;

        Ok(OrganizationDetails {
            name: org.name,
            domains: domains
                .resources
                .into_iter()
                .map(|d| Domain { name: d.name })
                .collect(),
        })
    }

    async fn api_endpoint(&self) -> Result<String, CheckError> {
        match &self.session {
            Some(session) if !session.target.is_empty() => Ok(session.target.clone()),
            _ => Err(CheckError::NoApiEndpoint),
        }
    }
}
