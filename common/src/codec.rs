//! # Identifier Codec
//!
//! Pure transformations on the two identifiers the inventory cares about:
//!
//! * **MAC addresses** are stored lower-case and colon separated, whatever
//!   separator the caller used.
//! * **Dotted addresses** (host IPv4 values and network ids such as `192.168.10`)
//!   are turned into a fixed-width key so a byte-wise sort matches numeric order.

use std::net::IpAddr;

/// Width of a single padded address component.
const COMPONENT_WIDTH: usize = 3;

/// Normalizes a MAC address into lower-case `aa:bb:cc:dd:ee:ff` form.
///
/// Colons and hyphens are stripped before the digits are regrouped in pairs, so
/// `DE-AD-BE-EF-CA-FE`, `deadbeefcafe` and `de:ad:be:ef:ca:fe` all normalize to
/// the same value. No length or hex-digit check is made: malformed input comes
/// back grouped but otherwise untouched. Applying it twice is a no-op.
pub fn normalize_mac(raw: &str) -> String {
    let digits: Vec<char> = raw
        .to_lowercase()
        .chars()
        .filter(|c| *c != ':' && *c != '-')
        .collect();

    digits
        .chunks(2)
        .map(|pair| pair.iter().collect::<String>())
        .collect::<Vec<String>>()
        .join(":")
}

/// Returns `true` if `addr` is a syntactically valid IP literal.
///
/// Both IPv4 and IPv6 literals are accepted, matching the generic parser the
/// inventory has always used for its `ipv4` column.
pub fn is_valid_ip(addr: &str) -> bool {
    addr.parse::<IpAddr>().is_ok()
}

/// Builds the sort key of a dotted address.
///
/// Every non-empty component is left-padded with zeros to three characters and
/// the groups are concatenated: `192.168.1.1` becomes `192168001001`. A component
/// longer than three characters keeps only its rightmost three.
///
/// Any number of components is accepted, so a network id like `10.0.0` yields a
/// nine character key. Comparing two keys built from the same number of
/// components byte by byte gives numeric dotted-quad order, which comparing the
/// dotted strings does not (`"9" > "10"`).
pub fn padded_key(dotted: &str) -> String {
    dotted
        .split('.')
        .filter(|component| !component.is_empty())
        .map(pad_component)
        .collect()
}

fn pad_component(component: &str) -> String {
    let padded: Vec<char> = format!("00{component}").chars().collect();
    padded[padded.len() - COMPONENT_WIDTH..].iter().collect()
}
