//! Recipient header parsing
//!
//! Accepts `Display Name <user@example.com>`, `"Quoted, Name" <user@example.com>`,
//! `<user@example.com>` and a bare `user@example.com`.

use regex::Regex;
use std::sync::OnceLock;

/// Name and address pulled out of a recipient header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress {
    pub name: Option<String>,
    /// Trimmed and lowercased
    pub email: String,
}

impl ParsedAddress {
    /// First whitespace-delimited token of the display name
    pub fn first_name(&self) -> Option<&str> {
        self.name.as_deref().and_then(|n| n.split_whitespace().next())
    }
}

fn named_address_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^\s*(?:"([^"]*)"|([^<"]*?))\s*<\s*([^<>\s]+@[^<>\s]+)\s*>\s*$"#)
            .expect("valid named address regex")
    })
}

fn bare_address_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([^<>\s@]+@[^<>\s@]+)\s*$").expect("valid bare address regex")
    })
}

/// Parse a single recipient header
///
/// Returns `None` when no address can be found.
pub fn parse_email_header(raw: &str) -> Option<ParsedAddress> {
    if let Some(caps) = named_address_re().captures(raw) {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .map(String::from);

        return Some(ParsedAddress {
            name,
            email: caps[3].trim().to_lowercase(),
        });
    }

    bare_address_re().captures(raw).map(|caps| ParsedAddress {
        name: None,
        email: caps[1].trim().to_lowercase(),
    })
}
