//! WillItConnect: asks a remote connectivity-check service running inside a Cloud Foundry
//! network whether a `host:port` (optionally through an HTTP proxy) is reachable from there.
//!
//! The crate resolves where the service lives, turns command arguments into a validated
//! [`target::TargetDescriptor`], and reports the service's verdict.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod service;
pub mod target;
