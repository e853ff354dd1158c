//! # url-guard
//!
//! Offline validation of outbound http/https URLs (webhook and redirect
//! targets).
//!
//! `url-guard` rejects malformed URLs, dangerous or non-web schemes, and hosts
//! that point at loopback or private networks. Hosts with internationalized
//! names are converted to their ASCII form before the final syntax check. It
//! never resolves DNS or opens connections.
//!
//! ## Quick Start
//!
//! ```rust
//! assert!(url_guard::is_valid("https://example.com/webhook"));
//! assert!(url_guard::is_valid("https://bücher.com"));
//!
//! assert!(!url_guard::is_valid("http://localhost:8080"));
//! assert!(!url_guard::is_valid("javascript:alert(1)"));
//! assert!(!url_guard::is_valid("https://example .com"));
//! ```
//!
//! Use [`UrlValidator::check`] to learn why a URL was rejected, and
//! [`Policy::Extended`] or [`PolicyBuilder`] for stricter host rules.
//!
//! ## Limitations
//!
//! Under the default [`Policy::Compatible`] the loopback/private checks are
//! textual prefix matches, not IP-aware. Equivalent spellings such as
//! `127.0.0.2` or `[::ffff:127.0.0.1]` are accepted. DNS rebinding is out of
//! reach of any offline check.

mod blocklist;
mod components;
mod error;
mod policy;
mod policy_builder;
mod strict;
mod syntax;
mod validate;

pub use components::UrlComponents;
pub use error::Rejection;
pub use policy::Policy;
pub use policy_builder::{CustomPolicy, PolicyBuilder};
pub use syntax::{DefaultSyntax, UrlSyntax};
pub use validate::UrlValidator;

/// Validate a URL with the default policy.
///
/// Shorthand for `UrlValidator::new().is_valid(url)`.
pub fn is_valid(url: &str) -> bool {
    UrlValidator::new().is_valid(url)
}
