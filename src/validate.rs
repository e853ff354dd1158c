//! URL validation.

use crate::blocklist::{is_scheme_allowed, is_scheme_blocked};
use crate::error::Rejection;
use crate::policy::Policy;
use crate::policy_builder::CustomPolicy;
use crate::syntax::{DefaultSyntax, UrlSyntax};

/// Decides whether a string is a safe outbound http/https URL.
///
/// Validation is offline: no DNS lookups, no connections. A validator holds
/// no mutable state and can be shared freely between threads.
///
/// # Example
///
/// ```rust
/// use url_guard::{Policy, UrlValidator};
///
/// let validator = UrlValidator::new();
/// assert!(validator.is_valid("https://bücher.com/hook"));
/// assert!(!validator.is_valid("http://localhost:8080"));
///
/// // 127.0.0.2 is only caught by the IP-aware policy
/// assert!(validator.is_valid("http://127.0.0.2/"));
/// assert!(!UrlValidator::with_policy(Policy::Extended).is_valid("http://127.0.0.2/"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct UrlValidator<S = DefaultSyntax> {
    policy: CustomPolicy,
    syntax: S,
}

impl UrlValidator {
    /// Validator with the default [`Policy::Compatible`] host rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator with one of the built-in policies.
    pub fn with_policy(policy: Policy) -> Self {
        Self::with_custom_policy(policy.into())
    }

    /// Validator with a policy built by [`PolicyBuilder`](crate::PolicyBuilder).
    pub fn with_custom_policy(policy: CustomPolicy) -> Self {
        Self::with_syntax(DefaultSyntax, policy)
    }
}

impl<S: UrlSyntax> UrlValidator<S> {
    /// Validator using a custom set of syntax primitives.
    pub fn with_syntax(syntax: S, policy: CustomPolicy) -> Self {
        Self { policy, syntax }
    }

    /// The host policy in effect.
    pub fn policy(&self) -> &CustomPolicy {
        &self.policy
    }

    /// Return `true` if `url` is a well-formed http/https URL whose host is
    /// not blocked.
    ///
    /// Never panics and never errors; every failure is `false`.
    pub fn is_valid(&self, url: &str) -> bool {
        match self.check(url) {
            Ok(()) => {
                tracing::trace!("url accepted");
                true
            }
            Err(rejection) => {
                tracing::debug!(reason = %rejection, "url rejected");
                false
            }
        }
    }

    /// Validate `url` and report why it was rejected.
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// 1. empty input
    /// 2. component parse and host presence
    /// 3. host rules on the host as written
    /// 4. dangerous schemes
    /// 5. http/https allow-list
    /// 6. host conversion to ASCII, then policy rules on the ASCII host
    /// 7. strict syntax check of the URL rebuilt around the ASCII host
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] for the first check that fails.
    pub fn check(&self, url: &str) -> Result<(), Rejection> {
        if url.is_empty() {
            return Err(Rejection::Empty);
        }

        let parts = self.syntax.parse(url)?;

        let Some(host) = parts.host() else {
            return Err(Rejection::MissingHost);
        };

        self.policy.check_raw_host(host)?;

        let scheme = parts.scheme();
        if let Some(scheme) = scheme.filter(|s| is_scheme_blocked(s)) {
            return Err(Rejection::blocked_scheme(scheme));
        }
        if !is_scheme_allowed(scheme) {
            return Err(Rejection::unsupported_scheme(scheme));
        }

        let ascii_host = self
            .syntax
            .to_ascii(host)
            .ok_or_else(|| Rejection::invalid_idn(host))?;

        self.policy.check_ascii_host(&ascii_host)?;

        let reconstructed = parts.with_host(ascii_host).to_string();
        if !self.syntax.is_well_formed(&reconstructed) {
            return Err(Rejection::NotWellFormed);
        }

        Ok(())
    }
}
