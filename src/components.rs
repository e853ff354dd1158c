//! URL components and the permissive parser that produces them.

use std::fmt;

use crate::error::Rejection;

/// One parse of a URL string split into its parts.
///
/// The parser is deliberately lenient: it never rewrites characters, so
/// spaces, control characters and non-ASCII text survive into the fields and
/// are left for the strict validator to judge. Rendering with [`Display`]
/// rebuilds `scheme://[user[:pass]@]host[:port][path][?query][#fragment]`
/// from whichever parts are present.
///
/// [`Display`]: fmt::Display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlComponents {
    scheme: Option<String>,
    user: Option<String>,
    pass: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    path: Option<String>,
    query: Option<String>,
    fragment: Option<String>,
}

impl UrlComponents {
    /// Split `input` into components.
    ///
    /// Accepts absolute and relative forms. A host is only recognised after
    /// `//`; bracketed IPv6 hosts keep their brackets.
    ///
    /// # Errors
    ///
    /// Returns [`Rejection::Malformed`] when the authority carries a port
    /// that is not a number in `0..=65535`, or an unterminated IPv6 literal.
    pub fn parse(input: &str) -> Result<Self, Rejection> {
        let mut parts = Self::default();

        let (rest, fragment) = split_off(input, '#');
        parts.fragment = fragment.map(str::to_string);

        let (rest, query) = split_off(rest, '?');
        parts.query = query.map(str::to_string);

        let rest = match split_scheme(rest) {
            Some((scheme, after)) => {
                parts.scheme = Some(scheme.to_string());
                after
            }
            None => rest,
        };

        let path = match rest.strip_prefix("//") {
            Some(after_slashes) => {
                let authority_end = after_slashes.find('/').unwrap_or(after_slashes.len());
                let (authority, path) = after_slashes.split_at(authority_end);
                parts.parse_authority(authority)?;
                path
            }
            None => rest,
        };

        if !path.is_empty() {
            parts.path = Some(path.to_string());
        }

        Ok(parts)
    }

    fn parse_authority(&mut self, authority: &str) -> Result<(), Rejection> {
        let host_port = match authority.rfind('@') {
            Some(at) => {
                let userinfo = &authority[..at];
                match userinfo.split_once(':') {
                    Some((user, pass)) => {
                        self.user = Some(user.to_string());
                        self.pass = Some(pass.to_string());
                    }
                    None => self.user = Some(userinfo.to_string()),
                }
                &authority[at + 1..]
            }
            None => authority,
        };

        // Be careful with IPv6 brackets when removing port
        let (host, port) = if host_port.starts_with('[') {
            let close = host_port
                .find(']')
                .ok_or_else(|| Rejection::malformed("unterminated IPv6 literal"))?;
            let (host, after) = host_port.split_at(close + 1);
            match after.strip_prefix(':') {
                Some(port) => (host, Some(port)),
                None if after.is_empty() => (host, None),
                None => {
                    return Err(Rejection::malformed(
                        "unexpected characters after IPv6 literal",
                    ))
                }
            }
        } else {
            match host_port.rsplit_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (host_port, None),
            }
        };

        self.port = match port {
            None | Some("") => None,
            Some(port) => Some(parse_port(port)?),
        };

        if !host.is_empty() {
            self.host = Some(host.to_string());
        }

        Ok(())
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn pass(&self) -> Option<&str> {
        self.pass.as_deref()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Replace the host, keeping every other component.
    ///
    /// This is the only way to change a parsed value.
    pub fn with_host(self, host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            ..self
        }
    }
}

impl fmt::Display for UrlComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}://")?;
        }
        if let Some(user) = &self.user {
            f.write_str(user)?;
            if let Some(pass) = &self.pass {
                write!(f, ":{pass}")?;
            }
            f.write_str("@")?;
        }
        if let Some(host) = &self.host {
            f.write_str(host)?;
        }
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        if let Some(path) = &self.path {
            f.write_str(path)?;
        }
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

/// Split at the first `delim`, returning the text before it and the text after.
fn split_off(input: &str, delim: char) -> (&str, Option<&str>) {
    match input.split_once(delim) {
        Some((before, after)) => (before, Some(after)),
        None => (input, None),
    }
}

/// A scheme is `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )` followed by `:`.
fn split_scheme(input: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = input.split_once(':')?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return None;
    }
    Some((scheme, rest))
}

fn parse_port(port: &str) -> Result<u16, Rejection> {
    if !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Rejection::malformed(format!("invalid port '{port}'")));
    }
    port.parse()
        .map_err(|_| Rejection::malformed(format!("port {port} out of range")))
}
