//! Text presentation of a check.

use crate::target::TargetDescriptor;

/// `Host: <host> - Port: <port> - WillItConnect: <service url>`
pub fn format_check_header(descriptor: &TargetDescriptor) -> String {
    format!(
        "Host: {} - Port: {} - WillItConnect: {}",
        descriptor.host(),
        descriptor.port(),
        descriptor.service_url()
    )
}

/// `Proxy: <host>:<port>`, only when the check goes through a proxy.
pub fn format_proxy_line(descriptor: &TargetDescriptor) -> Option<String> {
    descriptor
        .proxy()
        .map(|proxy| format!("Proxy: {}:{}", proxy.host, proxy.port))
}
