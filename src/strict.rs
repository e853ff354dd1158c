//! Strict, all-or-nothing URL syntax check.
//!
//! Runs on the reconstructed URL after the host has been converted to ASCII,
//! so anything outside the URL-safe ASCII set is an error here. Hosts are
//! checked as host names only: all-digit labels are not read as IPv4 numbers.

use std::net::Ipv6Addr;

use crate::components::UrlComponents;

/// Punctuation allowed anywhere in a URL, next to ASCII letters and digits.
const URL_SAFE_PUNCT: &[u8] = b"$-_.+!*'(),{}|\\^~[]`<>#%\";/?:@&=";

/// Punctuation allowed in the user and password parts.
const USERINFO_PUNCT: &[u8] = b"-._~!$&'()*+,;=:%";

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Check that `url` is a complete, well-formed URL.
///
/// Rejects embedded whitespace, control and non-ASCII characters, broken
/// percent escapes, a missing scheme, and for http/https a missing or
/// syntactically invalid host.
pub fn is_well_formed(url: &str) -> bool {
    if !url.bytes().all(is_url_safe) {
        return false;
    }

    if !has_valid_escapes(url) {
        return false;
    }

    let Ok(parts) = UrlComponents::parse(url) else {
        return false;
    };

    let Some(scheme) = parts.scheme() else {
        return false;
    };

    if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") {
        match parts.host() {
            Some(host) if is_valid_host(host) => {}
            _ => return false,
        }
    }

    let userinfo_ok = [parts.user(), parts.pass()]
        .into_iter()
        .flatten()
        .all(is_valid_userinfo);
    userinfo_ok
}

fn is_url_safe(b: u8) -> bool {
    b.is_ascii_alphanumeric() || URL_SAFE_PUNCT.contains(&b)
}

/// Every `%` must start a two-hex-digit escape.
fn has_valid_escapes(url: &str) -> bool {
    let mut rest = url;
    while let Some(pos) = rest.find('%') {
        let escape_ok = rest
            .get(pos + 1..pos + 3)
            .is_some_and(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()));
        if !escape_ok {
            return false;
        }
        rest = &rest[pos + 3..];
    }
    true
}

fn is_valid_host(host: &str) -> bool {
    match host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        Some(inner) => inner.parse::<Ipv6Addr>().is_ok(),
        None => is_valid_hostname(host),
    }
}

/// Letters, digits and inner hyphens per label, with an optional trailing dot.
fn is_valid_hostname(host: &str) -> bool {
    let host = host.strip_suffix('.').unwrap_or(host);
    if host.is_empty() || host.len() > MAX_HOSTNAME_LEN {
        return false;
    }

    host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    })
}

fn is_valid_userinfo(part: &str) -> bool {
    part.bytes()
        .all(|b| b.is_ascii_alphanumeric() || USERINFO_PUNCT.contains(&b))
}
