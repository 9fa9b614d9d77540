use once_cell::sync::Lazy;
use regex::Regex;

// Dot-atom addr-spec: atext runs separated by single dots, then "@", then
// letter-digit-hyphen labels separated by single dots.
static ADDR_SPEC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*$",
    )
    .unwrap()
});

pub fn parse_address(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // "Display Name <user@host>" canonicalizes to the bracketed addr-spec
    let addr = if let Some(open) = trimmed.find('<') {
        let rest = &trimmed[open + 1..];
        let close = rest.find('>')?;
        if !rest[close + 1..].trim().is_empty() {
            return None;
        }
        rest[..close].trim()
    } else {
        trimmed
    };

    if ADDR_SPEC.is_match(addr) {
        Some(addr.to_string())
    } else {
        None
    }
}

// Precondition: `address` already passed parse_address. Splits on the first
// "@" and returns everything after it.
pub fn extract_domain(address: &str) -> &str {
    address.split_once('@').map_or(address, |(_, domain)| domain)
}
