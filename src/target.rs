//! Request Builder
//!
//! Normalizes the command's arguments (explicit flags, a single scheme-prefixed URL, or a
//! bare `host port` pair) into one validated [`TargetDescriptor`].

use crate::error::CheckError;
use crate::service::{Discovery, ServiceRoute};
use tracing::debug;

/// Raw command arguments, before validation. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckArgs {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub proxy_host: Option<String>,
    pub proxy_port: Option<u16>,
    pub route: Option<String>,
    pub positional: Vec<String>,
}

/// Which of the two argument syntaxes an invocation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// `-host`, `-port`, proxy and route options, optionally one trailing URL.
    Flag,
    /// Exactly two bare arguments: `<host> <port>`.
    Positional,
}

impl InputMode {
    /// Discovery used by each command generation unless configuration pins one.
    pub fn default_discovery(self) -> Discovery {
        match self {
            InputMode::Flag => Discovery::OrgDomain,
            InputMode::Positional => Discovery::ApiEndpoint,
        }
    }
}

impl CheckArgs {
    fn has_flags(&self) -> bool {
        self.host.is_some()
            || self.port.is_some()
            || self.proxy_host.is_some()
            || self.proxy_port.is_some()
            || self.route.is_some()
    }

    pub fn mode(&self) -> InputMode {
        if !self.has_flags() && self.positional.len() == 2 {
            InputMode::Positional
        } else {
            InputMode::Flag
        }
    }

    /// Non-empty route override, if one was given.
    pub fn route_override(&self) -> Option<&str> {
        self.route.as_deref().filter(|r| !r.is_empty())
    }
}

/// Proxy the service should tunnel through when testing the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyEndpoint {
    pub host: String,
    pub port: u16,
}

/// Validated description of what to test and where to ask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) proxy: Option<ProxyEndpoint>,
    pub(crate) service_url: String,
}

/// Port implied by a URL scheme.
pub fn implied_port(host: &str) -> Option<u16> {
    if host.starts_with("http://") {
        Some(80)
    } else if host.starts_with("https://") {
        Some(443)
    } else {
        None
    }
}

/// Host, port and proxy resolved from the arguments, not yet bound to a service route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTarget {
    host: String,
    port: u16,
    proxy: Option<ProxyEndpoint>,
}

impl PendingTarget {
    /// Validate the arguments. Needs no platform access, so usage errors surface first.
    pub fn from_args(args: &CheckArgs) -> Result<Self, CheckError> {
        match args.mode() {
            InputMode::Positional => Self::from_positional(args),
            InputMode::Flag => Self::from_flags(args),
        }
    }

    fn from_positional(args: &CheckArgs) -> Result<Self, CheckError> {
        let [host, port] = args.positional.as_slice() else {
            return Err(CheckError::Usage);
        };
        let port: u16 = port.parse().map_err(|_| CheckError::Usage)?;
        if host.is_empty() {
            return Err(CheckError::Usage);
        }
        Ok(Self {
            host: host.clone(),
            port,
            proxy: None,
        })
    }

    fn from_flags(args: &CheckArgs) -> Result<Self, CheckError> {
        let mut host = args.host.clone().unwrap_or_default();
        // An explicit port flag wins over the scheme default.
        let mut port = args.port.or_else(|| implied_port(&host));

        if port.is_none() || host.is_empty() {
            let [url] = args.positional.as_slice() else {
                return Err(CheckError::Usage);
            };
            let url_port = implied_port(url).ok_or(CheckError::Usage)?;
            port = Some(args.port.unwrap_or(url_port));
            host = url.clone();
        } else if !args.positional.is_empty() {
            debug!(ignored = ?args.positional, "Ignoring positional arguments in flag mode");
        }

        let port = port.ok_or(CheckError::Usage)?;

        let proxy = match (args.proxy_host.as_deref(), args.proxy_port) {
            (Some(proxy_host), Some(proxy_port)) if !proxy_host.is_empty() => {
                Some(ProxyEndpoint {
                    host: proxy_host.to_string(),
                    port: proxy_port,
                })
            }
            (None, None) => None,
            _ => {
                debug!("Incomplete proxy settings; checking without a proxy");
                None
            }
        };

        Ok(Self { host, port, proxy })
    }

    /// Bind to the service route, producing the final descriptor.
    pub fn at(self, route: &ServiceRoute) -> TargetDescriptor {
        TargetDescriptor {
            host: self.host,
            port: self.port,
            proxy: self.proxy,
            service_url: route.url(),
        }
    }
}

impl TargetDescriptor {
    pub fn build(args: &CheckArgs, route: &ServiceRoute) -> Result<Self, CheckError> {
        Ok(PendingTarget::from_args(args)?.at(route))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn proxy(&self) -> Option<&ProxyEndpoint> {
        self.proxy.as_ref()
    }

    pub fn has_proxy(&self) -> bool {
        self.proxy.is_some()
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    /// `host:port` as sent to the service.
    pub fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
