//! Platform Context
//!
//! The platform the command runs against (a Cloud Foundry installation) is reached through
//! the [`PlatformContext`] trait. The resolver only reads the current organization's name,
//! the name of its first domain, or the raw API endpoint.

use crate::error::CheckError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod cf_cli;

pub use cf_cli::CfCliContext;

/// Organization currently targeted by the platform session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub guid: String,
    pub name: String,
}

/// Domain shared with or owned by an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub name: String,
}

/// Organization details as far as route discovery needs them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationDetails {
    pub name: String,
    pub domains: Vec<Domain>,
}

#[async_trait]
pub trait PlatformContext: Send + Sync {
    /// Organization targeted by the current session.
    async fn current_organization(&self) -> Result<Organization, CheckError>;

    /// Look up an organization by name, including its domains.
    async fn organization_details(&self, name: &str) -> Result<OrganizationDetails, CheckError>;

    /// Raw API endpoint of the platform (e.g. `https://api.sys.example.com`).
    async fn api_endpoint(&self) -> Result<String, CheckError>;
}
