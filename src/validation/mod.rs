//! IPv4 input classification.
//!
//! Free text from a chat message is sorted into three buckets:
//! - not an IPv4 address at all
//! - an IPv4 address in a private range (no public geolocation exists)
//! - anything else that looks like an IPv4 address
//!
//! The syntax check is loose: four dot-separated groups of one to
//! three ASCII digits, with no per-octet bound, so `999.999.999.999` passes.
//! The private ranges are 10/8, 172.16/12, 192.168/16 and the single loopback
//! address `127.0.0.1`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Four dot-separated groups of 1-3 ASCII digits
#[allow(clippy::expect_used)] // Hardcoded pattern
static IPV4_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9]{1,3}\.){3}[0-9]{1,3}$").expect("IPv4 pattern is valid")
});

/// An IPv4 address that passed [`classify`] as public.
///
/// Only [`classify`] creates values of this type, so a lookup can never be
/// issued for unvalidated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicIp(String);

impl PublicIp {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of [`classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpClassification {
    /// Not four dot-separated groups of 1-3 digits.
    Invalid,
    /// Syntactically valid, but in a private range.
    Private,
    /// Syntactically valid and not private.
    Public(PublicIp),
}

/// Classifies free text as an IPv4 address.
///
/// Surrounding whitespace is ignored. Pure function.
///
/// # Examples
///
/// ```
/// use ip_geo_bot::{classify, IpClassification};
///
/// assert!(matches!(classify(" 8.8.8.8 "), IpClassification::Public(ip) if ip.as_str() == "8.8.8.8"));
/// assert_eq!(classify("192.168.0.1"), IpClassification::Private);
/// assert_eq!(classify("hello"), IpClassification::Invalid);
/// ```
pub fn classify(text: &str) -> IpClassification {
    let candidate = text.trim();

    if !IPV4_PATTERN.is_match(candidate) {
        return IpClassification::Invalid;
    }

    if is_private(candidate) {
        IpClassification::Private
    } else {
        IpClassification::Public(PublicIp(candidate.to_string()))
    }
}

/// Private-range check on text already known to match the IPv4 pattern.
fn is_private(candidate: &str) -> bool {
    if candidate.starts_with("192.168.") || candidate.starts_with("10.") || candidate == "127.0.0.1"
    {
        return true;
    }

    if candidate.starts_with("172.") {
        return candidate
            .split('.')
            .nth(1)
            .and_then(|octet| octet.parse::<u16>().ok())
            .is_some_and(|octet| (16..=31).contains(&octet));
    }

    false
}
