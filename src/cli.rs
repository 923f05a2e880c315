//! CLI domain: parse, route and presentation only.
//! The route module is the single place that wires platform, resolver, builder and client.

mod parse;
mod presentation;
mod route;

pub use parse::{normalize_flag_syntax, Cli};
pub use presentation::{format_check_header, format_proxy_line};
pub use route::RunContext;
