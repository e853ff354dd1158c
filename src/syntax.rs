//! The three parsing primitives the validator is built on.

use idna::uts46::{AsciiDenyList, DnsLength, Hyphens, Uts46};

use crate::components::UrlComponents;
use crate::error::Rejection;
use crate::strict;

/// URL syntax capabilities used by [`UrlValidator`](crate::UrlValidator).
///
/// The host and scheme policy never touches a parsing library directly; it
/// goes through this trait. Swap the implementation to change how URLs are
/// split, how hosts are converted to ASCII, or what counts as well formed.
pub trait UrlSyntax {
    /// Split a string into components, tolerating URL-ish input.
    fn parse(&self, input: &str) -> Result<UrlComponents, Rejection>;

    /// Convert a host to its ASCII-compatible form, or `None` if it cannot be.
    fn to_ascii(&self, host: &str) -> Option<String>;

    /// Strict check of a complete URL string.
    fn is_well_formed(&self, url: &str) -> bool;
}

/// The built-in syntax: lenient component parser, UTS-46 host conversion
/// and the strict filter in [`strict`].
///
/// Host conversion is non-transitional UTS-46 without STD3 ASCII rules but
/// with hyphen checks: a label with `--` in positions 3-4 that is not a valid
/// `xn--` label, or a leading/trailing hyphen, fails. ASCII characters such
/// as spaces pass through and are rejected by the strict filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSyntax;

impl UrlSyntax for DefaultSyntax {
    fn parse(&self, input: &str) -> Result<UrlComponents, Rejection> {
        UrlComponents::parse(input)
    }

    fn to_ascii(&self, host: &str) -> Option<String> {
        // IPv6 literals are not domain names
        if host.starts_with('[') {
            return Some(host.to_string());
        }
        Uts46::new()
            .to_ascii(
                host.as_bytes(),
                AsciiDenyList::EMPTY,
                Hyphens::Check,
                DnsLength::Ignore,
            )
            .ok()
            .map(|ascii| ascii.into_owned())
    }

    fn is_well_formed(&self, url: &str) -> bool {
        strict::is_well_formed(url)
    }
}
