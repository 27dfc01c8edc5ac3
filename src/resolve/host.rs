//! Best-effort host IPv4 address detection.
//!
//! The resolver treats address acquisition as an external collaborator: it
//! receives one IPv4 address per call. This module supplies the default
//! provider for process startup; tests inject fixed addresses instead.

use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use tracing::debug;

/// Sentinel returned when no externally-routable address can be found.
/// Matches no configured range, so resolution falls back to development.
pub const UNROUTABLE: Ipv4Addr = Ipv4Addr::UNSPECIFIED;

/// Detect the host's externally-routable IPv4 address.
///
/// Uses a connected UDP socket to let the kernel pick the outbound
/// interface; no packet is sent. Loopback and detection failures both yield
/// [`UNROUTABLE`].
pub fn detect_ipv4() -> Ipv4Addr {
    match routable_ipv4() {
        Some(addr) if !addr.is_loopback() => {
            debug!("Detected host address {}", addr);
            addr
        }
        _ => {
            debug!("No routable IPv4 address found, using sentinel {}", UNROUTABLE);
            UNROUTABLE
        }
    }
}

fn routable_ipv4() -> Option<Ipv4Addr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    // Any public address works; connect() only selects a route.
    socket.connect("203.0.113.1:53").ok()?;
    match socket.local_addr().ok()? {
        SocketAddr::V4(v4) => Some(*v4.ip()),
        SocketAddr::V6(_) => None,
    }
}
