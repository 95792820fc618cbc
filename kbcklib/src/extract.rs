//! Lenient extraction of PEM certificates from keybox text.
//!
//! Keybox files are not guaranteed to be well-formed XML, so certificates are located with a
//! three-stage text filter rather than an XML parser:
//!
//! 1. everything after the first [CHAIN_TERMINATOR] is dropped,
//! 2. `<!-- ... -->` comment regions are removed,
//! 3. each `-----BEGIN CERTIFICATE ... -----END CERTIFICATE-----` block is collected.

use lazy_static::lazy_static;
use regex::Regex;

/// Closing tag that ends the certificate chain section of a keybox
pub const CHAIN_TERMINATOR: &str = "</CertificateChain>";

lazy_static! {
    static ref COMMENT_REGEX: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();
    static ref CERTIFICATE_REGEX: Regex =
        Regex::new(r"(?s)-----BEGIN CERTIFICATE.*?-----END CERTIFICATE.*?-----").unwrap();
}

/// Returns the portion of `text` preceding the first [CHAIN_TERMINATOR], or all of `text` when
/// the marker is absent.
pub fn truncate_at_chain_end(text: &str) -> &str {
    match text.find(CHAIN_TERMINATOR) {
        Some(end) => &text[..end],
        None => text,
    }
}

/// Removes all comment regions from `text`
pub fn strip_comments(text: &str) -> String {
    COMMENT_REGEX.replace_all(text, "").into_owned()
}

/// Returns every PEM certificate block in `text`, markers included and surrounding whitespace
/// trimmed, in order of appearance.
pub fn find_pem_blocks(text: &str) -> Vec<String> {
    CERTIFICATE_REGEX
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// Runs all three extraction stages over the raw contents of a keybox
pub fn extract_certificates(raw: &str) -> Vec<String> {
    find_pem_blocks(&strip_comments(truncate_at_chain_end(raw)))
}
