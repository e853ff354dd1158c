//! Rejection reasons for url-guard.

use thiserror::Error;

/// Why a URL was rejected.
///
/// [`UrlValidator::is_valid`](crate::UrlValidator::is_valid) collapses all of
/// these into `false`; [`UrlValidator::check`](crate::UrlValidator::check)
/// hands them back for callers that want to report a reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The input was the empty string.
    #[error("empty URL")]
    Empty,

    /// The input could not be split into URL components.
    #[error("malformed URL: {reason}")]
    Malformed { reason: String },

    /// The input parsed but carries no host.
    #[error("URL has no host")]
    MissingHost,

    /// The host points at loopback, a private network or a blocked name.
    #[error("host blocked: {host} - {reason}")]
    BlockedHost { host: String, reason: String },

    /// The scheme is on the dangerous-scheme list.
    #[error("scheme '{scheme}' is not allowed")]
    BlockedScheme { scheme: String },

    /// No scheme, or a scheme other than http/https.
    #[error("unsupported scheme: {}", .scheme.as_deref().unwrap_or("<none>"))]
    UnsupportedScheme { scheme: Option<String> },

    /// The host could not be converted to its ASCII form.
    #[error("invalid internationalized host: {host}")]
    InvalidIdn { host: String },

    /// The reconstructed URL failed strict syntax validation.
    #[error("URL is not well formed")]
    NotWellFormed,
}

impl Rejection {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    pub(crate) fn blocked_host(host: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BlockedHost {
            host: host.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn blocked_scheme(scheme: impl Into<String>) -> Self {
        Self::BlockedScheme {
            scheme: scheme.into(),
        }
    }

    pub(crate) fn unsupported_scheme(scheme: Option<&str>) -> Self {
        Self::UnsupportedScheme {
            scheme: scheme.map(str::to_string),
        }
    }

    pub(crate) fn invalid_idn(host: impl Into<String>) -> Self {
        Self::InvalidIdn { host: host.into() }
    }
}
