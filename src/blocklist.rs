//! Blocklists for hosts and schemes.
//!
//! The textual rules are applied to every URL. They are prefix and substring
//! matches on the host text, not IP arithmetic: `127.0.0.2` or `0177.0.0.1`
//! slip through them. The IP-aware rules further down only run under
//! [`Policy::Extended`](crate::Policy::Extended).

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use regex::Regex;

/// Schemes rejected outright, compared case-insensitively.
const BLOCKED_SCHEMES: &[&str] = &["javascript", "vbscript", "data", "file", "gopher", "ldap"];

/// The only schemes a valid URL may carry.
const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Loopback and private-network host prefixes.
static PRIVATE_HOST_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(127\.0\.0\.1|::1|0x[0-9a-f]+|0177[0-9]+|192\.168\.|10\.|172\.(1[6-9]|2[0-9]|3[0-1])\.)",
    )
    .expect("private host pattern is a valid regex")
});

/// Hostnames blocked under the extended policy.
const BLOCKED_HOSTNAMES: &[&str] = &[
    "metadata.google.internal",
    "metadata.goog",
    "metadata.azure.internal",
    "instance-data",
];

/// Check a host against the textual loopback/private rules.
///
/// Returns the reason when the host is blocked. Brackets around an IPv6
/// literal are ignored so `[::1]` is caught by the `::1` rule.
pub fn textual_block_reason(host: &str) -> Option<&'static str> {
    if host.to_ascii_lowercase().contains("localhost") {
        return Some("host name contains 'localhost'");
    }

    if PRIVATE_HOST_PREFIX.is_match(unbracket(host)) {
        return Some("loopback or private address pattern");
    }

    None
}

/// Check if a scheme is on the dangerous-scheme list.
pub fn is_scheme_blocked(scheme: &str) -> bool {
    BLOCKED_SCHEMES
        .iter()
        .any(|blocked| scheme.eq_ignore_ascii_case(blocked))
}

/// Check if a scheme is present and one of http/https.
pub fn is_scheme_allowed(scheme: Option<&str>) -> bool {
    scheme.is_some_and(|scheme| {
        ALLOWED_SCHEMES
            .iter()
            .any(|allowed| scheme.eq_ignore_ascii_case(allowed))
    })
}

/// Parse a host as a literal IP address, with or without IPv6 brackets.
pub fn literal_ip(host: &str) -> Option<IpAddr> {
    unbracket(host).parse().ok()
}

/// Check an ASCII host against the IP-aware rules of the extended policy.
pub fn extended_block_reason(host: &str) -> Option<&'static str> {
    let host = host.trim_end_matches('.');

    if is_hostname_blocked(host).is_some() {
        return Some("cloud metadata hostname");
    }

    if let Some(reason) = non_standard_ip_reason(host) {
        return Some(reason);
    }

    literal_ip(host).and_then(is_ip_blocked)
}

fn unbracket(host: &str) -> &str {
    host.strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(host)
}

/// Check if a hostname is a well-known metadata name or a subdomain of one.
fn is_hostname_blocked(host: &str) -> Option<&'static str> {
    let host_lower = host.to_ascii_lowercase();
    BLOCKED_HOSTNAMES.iter().copied().find(|blocked| {
        host_lower == *blocked || host_lower.ends_with(&format!(".{blocked}"))
    })
}

/// Detect numeric host spellings that resolvers expand to an IPv4 address.
fn non_standard_ip_reason(host: &str) -> Option<&'static str> {
    if host.starts_with('[') {
        return None;
    }

    let parts: Vec<&str> = host.split('.').collect();

    if parts
        .iter()
        .any(|part| part.starts_with("0x") || part.starts_with("0X"))
    {
        return Some("hexadecimal IP encoding");
    }

    // Single number (e.g., 2130706433 = 127.0.0.1)
    if parts.len() == 1 && !host.is_empty() {
        if host.bytes().all(|b| b.is_ascii_digit()) {
            return Some("decimal IP encoding");
        }
        if host.bytes().all(|b| b.is_ascii_hexdigit())
            && host.bytes().any(|b| b.is_ascii_alphabetic())
        {
            return Some("hexadecimal IP encoding");
        }
    }

    // Short-form: 127.1 → 127.0.0.1, 127.0.1 → 127.0.0.1
    if (parts.len() == 2 || parts.len() == 3)
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
    {
        return Some("short-form IP encoding");
    }

    if parts.len() == 4 && parts.iter().all(|p| p.bytes().all(|b| b.is_ascii_digit())) {
        // Leading zero with more digits = octal (e.g., 0177 = 127)
        if parts.iter().any(|p| p.len() > 1 && p.starts_with('0')) {
            return Some("octal IP encoding");
        }
    }

    None
}

/// Check if a literal IP falls in a range that must never be a webhook target.
fn is_ip_blocked(ip: IpAddr) -> Option<&'static str> {
    match ip {
        IpAddr::V4(ipv4) => is_ipv4_blocked(ipv4),
        IpAddr::V6(ipv6) => is_ipv6_blocked(ipv6),
    }
}

fn is_ipv4_blocked(ip: Ipv4Addr) -> Option<&'static str> {
    if ip.is_unspecified() {
        return Some("unspecified address (0.0.0.0)");
    }

    if ip.is_loopback() {
        return Some("loopback address (127.0.0.0/8)");
    }

    if ip.is_link_local() {
        return Some("link-local address (169.254.0.0/16)");
    }

    if is_metadata_ipv4(ip) {
        return Some("cloud metadata endpoint");
    }

    if ip.is_private() {
        return Some("private address");
    }

    None
}

fn is_ipv6_blocked(ip: Ipv6Addr) -> Option<&'static str> {
    if ip.is_unspecified() {
        return Some("unspecified address (::)");
    }

    // Loopback before the IPv4 embedding checks, ::1 would otherwise read as 0.0.0.1
    if ip.is_loopback() {
        return Some("loopback address (::1)");
    }

    if let Some(ipv4) = ip.to_ipv4_mapped() {
        return is_ipv4_blocked(ipv4);
    }

    // IPv4-compatible (::a.b.c.d), deprecated but still routed by some stacks
    let segments = ip.segments();
    if segments[0..6] == [0, 0, 0, 0, 0, 0] && (segments[6] != 0 || segments[7] > 1) {
        let ipv4 = Ipv4Addr::new(
            (segments[6] >> 8) as u8,
            segments[6] as u8,
            (segments[7] >> 8) as u8,
            segments[7] as u8,
        );
        if !ipv4.is_unspecified() {
            return is_ipv4_blocked(ipv4);
        }
    }

    // is_unicast_link_local is unstable
    if (segments[0] & 0xffc0) == 0xfe80 {
        return Some("link-local address (fe80::/10)");
    }

    if ip == AWS_METADATA_IPV6 {
        return Some("cloud metadata endpoint");
    }

    if (segments[0] & 0xfe00) == 0xfc00 {
        return Some("unique local address (fc00::/7)");
    }

    None
}

/// AWS: fd00:ec2::254
const AWS_METADATA_IPV6: Ipv6Addr = Ipv6Addr::new(0xfd00, 0x0ec2, 0, 0, 0, 0, 0, 0x0254);

fn is_metadata_ipv4(ip: Ipv4Addr) -> bool {
    // AWS/GCP/Azure and Alibaba Cloud
    ip == Ipv4Addr::new(169, 254, 169, 254) || ip == Ipv4Addr::new(100, 100, 100, 200)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Textual Host Rules ====================

    #[test]
    fn test_localhost_substring() {
        assert!(textual_block_reason("localhost").is_some());
        assert!(textual_block_reason("LOCALHOST").is_some());
        assert!(textual_block_reason("sub.localhost.example").is_some());
        assert!(textual_block_reason("mylocalhostname.com").is_some());
        assert!(textual_block_reason("local-host.com").is_none());
    }

    #[test]
    fn test_loopback_literals() {
        assert!(textual_block_reason("127.0.0.1").is_some());
        assert!(textual_block_reason("::1").is_some());
        assert!(textual_block_reason("[::1]").is_some());
    }

    #[test]
    fn test_rules_are_prefix_matches() {
        // Anchored at the start only
        assert!(textual_block_reason("127.0.0.1.nip.io").is_some());
        assert!(textual_block_reason("10.example.com").is_some());
        assert!(textual_block_reason("example.10.com").is_none());
    }

    #[test]
    fn test_private_prefixes() {
        assert!(textual_block_reason("192.168.1.1").is_some());
        assert!(textual_block_reason("10.0.0.1").is_some());
        assert!(textual_block_reason("172.16.0.1").is_some());
        assert!(textual_block_reason("172.20.5.5").is_some());
        assert!(textual_block_reason("172.31.255.255").is_some());
    }

    #[test]
    fn test_172_range_boundaries() {
        assert!(textual_block_reason("172.15.0.1").is_none());
        assert!(textual_block_reason("172.32.0.1").is_none());
        // Second octet must be followed by a dot
        assert!(textual_block_reason("172.160.0.1").is_none());
    }

    #[test]
    fn test_hex_and_octal_prefixes() {
        assert!(textual_block_reason("0x7f000001").is_some());
        assert!(textual_block_reason("0X7F000001").is_some());
        assert!(textual_block_reason("01770000001").is_some());
        // Bare prefixes without the following digits do not match
        assert!(textual_block_reason("0x").is_none());
        assert!(textual_block_reason("0177.0.0.1").is_none());
    }

    #[test]
    fn test_known_gaps_are_kept() {
        // Only the listed spellings are caught by the textual rules
        assert!(textual_block_reason("127.0.0.2").is_none());
        assert!(textual_block_reason("169.254.169.254").is_none());
        assert!(textual_block_reason("[::ffff:127.0.0.1]").is_none());
        assert!(textual_block_reason("2130706433").is_none());
    }

    #[test]
    fn test_public_hosts_pass() {
        assert!(textual_block_reason("example.com").is_none());
        assert!(textual_block_reason("93.184.216.34").is_none());
        assert!(textual_block_reason("bücher.com").is_none());
    }

    // ==================== Scheme Rules ====================

    #[test]
    fn test_blocked_schemes() {
        for scheme in ["javascript", "VBScript", "DATA", "file", "gopher", "ldap"] {
            assert!(is_scheme_blocked(scheme), "{scheme} should be blocked");
        }
        assert!(!is_scheme_blocked("javascripts"));
        assert!(!is_scheme_blocked("ftp"));
        assert!(!is_scheme_blocked("https"));
    }

    #[test]
    fn test_allowed_schemes() {
        assert!(is_scheme_allowed(Some("http")));
        assert!(is_scheme_allowed(Some("HTTPS")));
        assert!(!is_scheme_allowed(Some("htp")));
        assert!(!is_scheme_allowed(Some("ftp")));
        assert!(!is_scheme_allowed(None));
    }

    // ==================== Extended Rules ====================

    #[test]
    fn test_extended_metadata_hostnames() {
        assert!(extended_block_reason("metadata.google.internal").is_some());
        assert!(extended_block_reason("METADATA.GOOGLE.INTERNAL").is_some());
        assert!(extended_block_reason("sub.metadata.azure.internal").is_some());
        assert!(extended_block_reason("instance-data.").is_some());
        assert!(extended_block_reason("example.com").is_none());
    }

    #[test]
    fn test_extended_loopback_range() {
        assert!(extended_block_reason("127.0.0.2").is_some());
        assert!(extended_block_reason("127.255.255.255").is_some());
        assert!(extended_block_reason("[::1]").is_some());
        assert!(extended_block_reason("[0:0:0:0:0:0:0:1]").is_some());
    }

    #[test]
    fn test_extended_link_local_and_metadata() {
        assert!(extended_block_reason("169.254.169.254").is_some());
        assert!(extended_block_reason("169.254.1.1").is_some());
        assert!(extended_block_reason("100.100.100.200").is_some());
        assert!(extended_block_reason("[fe80::1]").is_some());
        assert!(extended_block_reason("[fd00:ec2::254]").is_some());
    }

    #[test]
    fn test_extended_private_ranges() {
        assert!(extended_block_reason("10.255.255.255").is_some());
        assert!(extended_block_reason("172.16.0.0").is_some());
        assert!(extended_block_reason("192.168.0.1").is_some());
        assert!(extended_block_reason("[fd12:3456:789a::1]").is_some());
        assert!(extended_block_reason("172.32.0.0").is_none());
    }

    #[test]
    fn test_extended_unspecified() {
        assert!(extended_block_reason("0.0.0.0").is_some());
        assert!(extended_block_reason("[::]").is_some());
    }

    #[test]
    fn test_extended_ipv4_embedded_in_ipv6() {
        assert!(extended_block_reason("[::ffff:127.0.0.1]").is_some());
        assert!(extended_block_reason("[::ffff:7f00:1]").is_some());
        assert!(extended_block_reason("[::ffff:192.168.0.1]").is_some());
        assert!(extended_block_reason("[::127.0.0.1]").is_some());
        assert!(extended_block_reason("[::169.254.169.254]").is_some());
    }

    #[test]
    fn test_extended_non_standard_encodings() {
        assert_eq!(extended_block_reason("2130706433"), Some("decimal IP encoding"));
        assert_eq!(extended_block_reason("0x7f.0.0.1"), Some("hexadecimal IP encoding"));
        assert_eq!(extended_block_reason("7f000001"), Some("hexadecimal IP encoding"));
        assert_eq!(extended_block_reason("127.1"), Some("short-form IP encoding"));
        assert_eq!(extended_block_reason("192.168.1"), Some("short-form IP encoding"));
        assert_eq!(extended_block_reason("0177.0.0.1"), Some("octal IP encoding"));
        assert_eq!(extended_block_reason("127.0.0.01"), Some("octal IP encoding"));
    }

    #[test]
    fn test_extended_public_addresses_pass() {
        assert!(extended_block_reason("93.184.216.34").is_none());
        assert!(extended_block_reason("[2001:4860:4860::8888]").is_none());
        assert!(extended_block_reason("0177.example.com").is_none());
        assert!(extended_block_reason("123host.example.com").is_none());
    }

    #[test]
    fn test_literal_ip() {
        assert_eq!(literal_ip("[::1]"), Some("::1".parse().unwrap()));
        assert_eq!(literal_ip("10.0.0.1"), Some("10.0.0.1".parse().unwrap()));
        assert_eq!(literal_ip("example.com"), None);
    }
}
