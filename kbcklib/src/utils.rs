//! Hex and PEM helpers shared by the evaluation code

use base64ct::{Base64, Encoding};
use lazy_static::lazy_static;
use regex::Regex;
use subtle_encoding::hex;

use crate::{log_error, Error, Result};

lazy_static! {
    static ref PEM_BODY_REGEX: Regex =
        Regex::new(r"(?s)-----BEGIN CERTIFICATE.*?-----(.*?)-----END CERTIFICATE").unwrap();
}

/// Takes a buffer and returns a String containing a lowercase ASCII hex representation of the
/// buffer's contents
pub(crate) fn buffer_to_hex(buffer: &[u8]) -> String {
    let hex = hex::encode(buffer);
    match std::str::from_utf8(hex.as_slice()) {
        Ok(s) => s.to_string(),
        Err(_) => "".to_string(),
    }
}

/// Removes leading `0` digits from `hex`, leaving a single `0` when nothing else remains
pub(crate) fn strip_leading_zeros(hex: &str) -> String {
    let stripped = hex.trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

/// Returns the DER bytes carried by a PEM certificate block.
///
/// Whitespace anywhere in the base64 body is ignored, which tolerates indentation introduced by
/// the surrounding XML.
pub(crate) fn pem_to_der(pem: &str) -> Result<Vec<u8>> {
    let body = match PEM_BODY_REGEX.captures(pem).and_then(|c| c.get(1)) {
        Some(body) => body.as_str(),
        None => {
            log_error("No certificate body found between PEM markers");
            return Err(Error::ParseError);
        }
    };

    let b64: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    match Base64::decode_vec(&b64) {
        Ok(der) => Ok(der),
        Err(e) => {
            log_error(&format!("Failed to base64 decode certificate: {e}"));
            Err(Error::ParseError)
        }
    }
}
