//! Custom policy builder for extra host blocks.
//!
//! A [`CustomPolicy`] layers caller-supplied host patterns and CIDR ranges on
//! top of a built-in [`Policy`]. Rules only ever add rejections; the base
//! policy always applies.
//!
//! ```rust
//! use url_guard::{Policy, PolicyBuilder, UrlValidator};
//!
//! let policy = PolicyBuilder::new(Policy::Compatible)
//!     .block_host("*.internal.example.com")
//!     .block_cidr("203.0.113.0/24")
//!     .build();
//! let validator = UrlValidator::with_custom_policy(policy);
//!
//! assert!(!validator.is_valid("https://api.internal.example.com/hook"));
//! assert!(!validator.is_valid("http://203.0.113.7/hook"));
//! assert!(validator.is_valid("https://example.com/hook"));
//! ```

use ipnet::IpNet;

use crate::blocklist::{extended_block_reason, literal_ip, textual_block_reason};
use crate::error::Rejection;
use crate::policy::Policy;

/// A base policy plus extra blocked hosts and IP ranges.
///
/// Created via [`PolicyBuilder`]. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct CustomPolicy {
    base: Policy,
    blocked_cidrs: Vec<IpNet>,
    blocked_hosts: Vec<String>,
}

impl CustomPolicy {
    /// The built-in policy this one extends.
    pub fn base(&self) -> Policy {
        self.base
    }

    /// Run every host rule of this policy against `host`.
    ///
    /// `host` should already be in ASCII form for the custom patterns to
    /// match IDN hosts.
    pub fn is_hostname_allowed(&self, host: &str) -> Result<(), Rejection> {
        self.check_raw_host(host)?;
        self.check_ascii_host(host)
    }

    /// Textual rules, applied to the host exactly as parsed.
    pub(crate) fn check_raw_host(&self, host: &str) -> Result<(), Rejection> {
        match textual_block_reason(host) {
            Some(reason) => Err(Rejection::blocked_host(host, reason)),
            None => Ok(()),
        }
    }

    /// Extended and custom rules, applied to the host after IDN conversion.
    pub(crate) fn check_ascii_host(&self, host: &str) -> Result<(), Rejection> {
        if self.base == Policy::Extended {
            let reason = textual_block_reason(host).or_else(|| extended_block_reason(host));
            if let Some(reason) = reason {
                return Err(Rejection::blocked_host(host, reason));
            }
        }

        let host_lower = host.to_ascii_lowercase();
        let host_lower = host_lower.trim_end_matches('.');
        for pattern in &self.blocked_hosts {
            if matches_hostname_pattern(host_lower, pattern) {
                return Err(Rejection::blocked_host(
                    host,
                    format!("blocked by custom policy hostname rule: {pattern}"),
                ));
            }
        }

        if let Some(ip) = literal_ip(host) {
            if let Some(cidr) = self.blocked_cidrs.iter().find(|cidr| cidr.contains(&ip)) {
                return Err(Rejection::blocked_host(
                    host,
                    format!("blocked by custom policy CIDR rule: {cidr}"),
                ));
            }
        }

        Ok(())
    }
}

/// Builder for creating custom policies.
#[derive(Debug, Clone, Default)]
pub struct PolicyBuilder {
    base: Policy,
    blocked_cidrs: Vec<IpNet>,
    blocked_hosts: Vec<String>,
}

impl PolicyBuilder {
    /// Create a new builder with the given base policy.
    pub fn new(base: Policy) -> Self {
        Self {
            base,
            ..Default::default()
        }
    }

    /// Block an IP range (CIDR notation) for literal IP hosts.
    ///
    /// Strings that are not valid CIDR notation are ignored.
    pub fn block_cidr(mut self, cidr: &str) -> Self {
        if let Ok(net) = cidr.parse() {
            self.blocked_cidrs.push(net);
        }
        self
    }

    /// Block a hostname or pattern.
    ///
    /// Supports wildcards: `*.internal.example.com` blocks the domain and all
    /// of its subdomains. Unicode names are stored in their ASCII form.
    pub fn block_host(mut self, pattern: &str) -> Self {
        let (wildcard, name) = match pattern.strip_prefix("*.") {
            Some(name) => ("*.", name),
            None => ("", pattern),
        };
        let name = idna::domain_to_ascii(name).unwrap_or_else(|_| name.to_lowercase());
        let name = name.trim_end_matches('.');
        self.blocked_hosts.push(format!("{wildcard}{name}"));
        self
    }

    /// Build the custom policy.
    pub fn build(self) -> CustomPolicy {
        CustomPolicy {
            base: self.base,
            blocked_cidrs: self.blocked_cidrs,
            blocked_hosts: self.blocked_hosts,
        }
    }
}

impl From<Policy> for CustomPolicy {
    fn from(base: Policy) -> Self {
        PolicyBuilder::new(base).build()
    }
}

/// Match a lowercase hostname against a pattern (supports * wildcard).
fn matches_hostname_pattern(host: &str, pattern: &str) -> bool {
    match pattern.strip_prefix("*.") {
        Some(domain) => host == domain || host.ends_with(&pattern[1..]),
        None => host == pattern,
    }
}
