//! CLI parse: clap types for willitconnect. No behavior beyond argument shaping.

use crate::error::USAGE_LINES;
use crate::target::CheckArgs;
use clap::Parser;
use std::ffi::OsString;

/// Long flags that may also be written Go-style with a single dash (`-host=foo.com`).
const LONG_FLAGS: &[&str] = &[
    "host",
    "port",
    "proxyHost",
    "proxyPort",
    "route",
    "help",
    "version",
];

/// willitconnect - checks whether a target is reachable from inside Cloud Foundry
#[derive(Parser, Debug)]
#[command(name = "willitconnect", version)]
#[command(about = "Validates connectivity between Cloud Foundry and a target")]
#[command(override_usage = USAGE_LINES)]
pub struct Cli {
    /// Host (or http/https URL) to test
    #[arg(long = "host", value_name = "HOST")]
    pub host: Option<String>,

    /// Port to test (implied by an http:// or https:// host)
    #[arg(long = "port", value_name = "PORT")]
    pub port: Option<u16>,

    /// Proxy host the check should go through
    #[arg(long = "proxyHost", value_name = "PROXY_HOST")]
    pub proxy_host: Option<String>,

    /// Proxy port the check should go through
    #[arg(long = "proxyPort", value_name = "PROXY_PORT")]
    pub proxy_port: Option<u16>,

    /// Fully-qualified route of the willitconnect service
    #[arg(long = "route", value_name = "ROUTE")]
    pub route: Option<String>,

    /// `<url>` or `<host> <port>`
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}

impl Cli {
    /// Parse process-style arguments (program name first), accepting Go-style flags.
    pub fn parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_flag_syntax(args))
    }

    pub fn check_args(&self) -> CheckArgs {
        CheckArgs {
            host: self.host.clone(),
            port: self.port,
            proxy_host: self.proxy_host.clone(),
            proxy_port: self.proxy_port,
            route: self.route.clone(),
            positional: self.args.clone(),
        }
    }
}

/// Rewrite `-name` / `-name=value` to `--name` / `--name=value` for the known long flags.
/// The program name and everything after a bare `--` are left alone.
pub fn normalize_flag_syntax<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;
    for (i, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if i == 0 || passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        let rewritten = arg.to_str().and_then(|s| {
            let rest = s.strip_prefix('-').filter(|r| !r.starts_with('-'))?;
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            LONG_FLAGS
                .contains(&name)
                .then(|| OsString::from(format!("--{}", rest)))
        });
        out.push(rewritten.unwrap_or(arg));
    }
    out
}
