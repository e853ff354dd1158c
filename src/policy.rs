//! Built-in host policies.

/// How hard the validator looks at the host.
///
/// Both policies reject `localhost` names and the textual loopback/private
/// prefixes (`127.0.0.1`, `::1`, `0x…`, `0177…`, `192.168.`, `10.`,
/// `172.16.`–`172.31.`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Policy {
    /// Only the textual host rules. The default.
    ///
    /// Equivalent spellings outside those patterns pass, e.g. `127.0.0.2`,
    /// `169.254.169.254`, `[::ffff:127.0.0.1]` or `2130706433`.
    ///
    /// Bracketed IPv6 hosts are matched with the brackets removed, so
    /// `http://[::1]/` is rejected by the `::1` rule. Validators that match
    /// the bracketed text directly let that URL through.
    #[default]
    Compatible,

    /// Textual rules plus IP-aware checks on the ASCII host.
    ///
    /// Additionally rejects:
    /// - literal IPs in loopback, unspecified, link-local, private and unique
    ///   local ranges, including IPv4-mapped and IPv4-compatible IPv6 forms
    /// - cloud metadata endpoints and host names
    /// - octal, hexadecimal, decimal and short-form IPv4 spellings
    /// - hosts that only become `localhost` after IDN mapping
    Extended,
}
