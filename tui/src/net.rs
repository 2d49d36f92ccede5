//! Address discovery
//!
//! Suggests likely server addresses on the local network for the
//! connection screen. The local IP is found with a route probe:
//! connecting a UDP socket picks the outbound interface without sending
//! any packets.

use std::net::{IpAddr, Ipv4Addr, UdpSocket};

/// Port the suggestions are built with
const DEFAULT_PORT: u16 = 8080;

/// Best-effort local IPv4 address of this machine
#[must_use]
pub fn local_ip() -> Option<Ipv4Addr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    match socket.local_addr().ok()?.ip() {
        IpAddr::V4(ip) if !ip.is_loopback() && !ip.is_link_local() => Some(ip),
        _ => None,
    }
}

/// The /24 subnet prefix of an address, e.g. "192.168.1"
#[must_use]
pub fn subnet_prefix(ip: Ipv4Addr) -> String {
    let [a, b, c, _] = ip.octets();
    format!("{a}.{b}.{c}")
}

/// Common `host:port` guesses for the local network, likeliest first.
///
/// Always ends with loopback so there is something to cycle to even
/// without a network.
#[must_use]
pub fn address_suggestions() -> Vec<String> {
    let mut suggestions = Vec::new();

    if let Some(ip) = local_ip() {
        let subnet = subnet_prefix(ip);
        suggestions.push(format!("{ip}:{DEFAULT_PORT}"));
        for host in [1u8, 2, 100, 101, 254] {
            let addr = format!("{subnet}.{host}:{DEFAULT_PORT}");
            if !suggestions.contains(&addr) {
                suggestions.push(addr);
            }
        }
    }

    suggestions.push(format!("127.0.0.1:{DEFAULT_PORT}"));
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_subnet_prefix() {
        assert_eq!(
            subnet_prefix(Ipv4Addr::new(192, 168, 1, 42)),
            "192.168.1"
        );
        assert_eq!(subnet_prefix(Ipv4Addr::new(10, 0, 0, 7)), "10.0.0");
    }

    #[test]
    fn test_suggestions_never_empty() {
        let suggestions = address_suggestions();
        assert!(!suggestions.is_empty());
        assert_eq!(suggestions.last().unwrap(), "127.0.0.1:8080");
    }

    #[test]
    fn test_suggestions_carry_a_port() {
        for addr in address_suggestions() {
            assert!(addr.ends_with(":8080"), "bad suggestion: {addr}");
        }
    }
}
