//! CLI route: run context that drives one check from arguments to verdict.

use crate::cli::presentation::{format_check_header, format_proxy_line};
use crate::client::{ConnectivityClient, HttpConnectivityClient};
use crate::config::WillItConnectConfig;
use crate::error::CheckError;
use crate::platform::{CfCliContext, PlatformContext};
use crate::service::{Discovery, ServiceRoute};
use crate::target::{CheckArgs, PendingTarget};
use std::io::Write;
use tracing::{debug, info};

/// Runtime context for CLI execution: the platform and connectivity collaborators.
pub struct RunContext {
    platform: Box<dyn PlatformContext>,
    client: Box<dyn ConnectivityClient>,
    discovery: Option<Discovery>,
}

impl RunContext {
    /// Create run context from configuration, backed by the CF CLI session and HTTPS.
    pub fn new(config: &WillItConnectConfig) -> Result<Self, CheckError> {
        let timeouts = config.service.timeouts();
        let platform = CfCliContext::load(config.platform.cf_home.as_deref(), timeouts)?;
        let client = HttpConnectivityClient::new(timeouts)?;
        Ok(Self::with_collaborators(
            Box::new(platform),
            Box::new(client),
            config.service.discovery,
        ))
    }

    /// Create run context from explicit collaborators. `discovery` pins the discovery mode;
    /// `None` lets the argument syntax decide.
    pub fn with_collaborators(
        platform: Box<dyn PlatformContext>,
        client: Box<dyn ConnectivityClient>,
        discovery: Option<Discovery>,
    ) -> Self {
        Self {
            platform,
            client,
            discovery,
        }
    }

    /// Run one check on a fresh single-threaded runtime, writing output to `out`.
    pub fn execute<W: Write>(&self, args: &CheckArgs, out: &mut W) -> Result<(), CheckError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CheckError::Config(format!("Failed to create async runtime: {}", e)))?;
        rt.block_on(self.execute_async(args, out))
    }

    pub async fn execute_async<W: Write>(
        &self,
        args: &CheckArgs,
        out: &mut W,
    ) -> Result<(), CheckError> {
        let mode = args.mode();
        let discovery = self.discovery.unwrap_or_else(|| mode.default_discovery());
        debug!(?mode, ?discovery, "Resolving service route");

        let pending = PendingTarget::from_args(args)?;
        let route =
            ServiceRoute::resolve(self.platform.as_ref(), args.route_override(), discovery).await?;
        let descriptor = pending.at(&route);

        writeln!(out, "{}", format_check_header(&descriptor))?;
        if let Some(proxy_line) = format_proxy_line(&descriptor) {
            writeln!(out, "{}", proxy_line)?;
        }

        let result = self.client.check(&descriptor).await?;
        info!(check_target = %descriptor.target(), can_connect = result.can_connect, "Check finished");
        writeln!(out, "{}", result.verdict())?;
        Ok(())
    }
}
