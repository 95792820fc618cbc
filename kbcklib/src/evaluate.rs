//! Derivation of lookup keys from a certificate and classification against the status list

use const_oid::ObjectIdentifier;
use der::{Decode, Tag, Tagged};
use x509_cert::Certificate;

use crate::status_list::{RevocationEntry, RevocationTable};
use crate::utils::{buffer_to_hex, pem_to_der, strip_leading_zeros};
use crate::{log_error, Error, Result};

/// id-at-serialNumber (2.5.4.5)
pub const ID_AT_SERIAL_NUMBER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.5");

/// Identifies which lookup key produced a status list hit
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MatchedBy {
    SubjectSerial,
    IssuerSerial,
}

/// Outcome of evaluating one certificate found in a keybox
#[derive(Clone, Debug)]
pub struct CertificateRecord {
    /// Name of the file the certificate was read from
    pub source_file: String,
    /// One-based position of the certificate within its file
    pub index: usize,
    pub subject_serial: Option<String>,
    pub issuer_serial: Option<String>,
    pub matched: Option<RevocationEntry>,
    pub matched_by: Option<MatchedBy>,
    /// Set when the PEM block could not be parsed; no lookup is attempted in that case
    pub parse_error: Option<Error>,
}

impl CertificateRecord {
    /// True when a status list entry was found and its status is exactly `REVOKED`
    pub fn is_revoked(&self) -> bool {
        self.matched
            .as_ref()
            .map(RevocationEntry::is_revoked)
            .unwrap_or(false)
    }
}

/// Decodes a PEM certificate block
pub fn parse_pem_certificate(pem: &str) -> Result<Certificate> {
    let der = pem_to_der(pem)?;
    Certificate::from_der(&der).map_err(|e| {
        log_error(&format!("Failed to parse certificate: {e}"));
        Error::Asn1(e)
    })
}

/// Renders the big-endian bytes of a serial number as lowercase hex without leading zeros. A
/// serial of zero yields `"0"`.
pub fn subject_serial_hex(serial: &[u8]) -> String {
    strip_leading_zeros(&buffer_to_hex(serial))
}

/// Lowercases `value` and drops every character outside `[a-f0-9]`. Returns `None` when nothing
/// remains.
pub fn normalize_issuer_serial(value: &str) -> Option<String> {
    let normalized: String = value
        .to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a'..='f' | '0'..='9'))
        .collect();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Returns the normalized value of the first serialNumber attribute in the issuer name
pub fn issuer_serial_hex(cert: &Certificate) -> Option<String> {
    for rdn in cert.tbs_certificate.issuer.0.iter() {
        for atv in rdn.0.iter() {
            if atv.oid != ID_AT_SERIAL_NUMBER {
                continue;
            }
            return match atv.value.tag() {
                Tag::PrintableString | Tag::Utf8String | Tag::Ia5String | Tag::TeletexString => {
                    match std::str::from_utf8(atv.value.value()) {
                        Ok(s) => normalize_issuer_serial(s),
                        Err(e) => {
                            log_error(&format!("Failed to read issuer serialNumber: {e}"));
                            None
                        }
                    }
                }
                other => {
                    log_error(&format!(
                        "Unsupported string type for issuer serialNumber: {other:?}"
                    ));
                    None
                }
            };
        }
    }
    None
}

/// Looks up `subject_serial` and then `issuer_serial`; the first hit wins.
pub fn lookup<'a>(
    table: &'a RevocationTable,
    subject_serial: &str,
    issuer_serial: Option<&str>,
) -> Option<(&'a RevocationEntry, MatchedBy)> {
    if let Some(entry) = table.get(subject_serial) {
        return Some((entry, MatchedBy::SubjectSerial));
    }
    issuer_serial
        .and_then(|serial| table.get(serial))
        .map(|entry| (entry, MatchedBy::IssuerSerial))
}

/// Parses `pem`, derives its lookup keys and checks them against `table`.
///
/// Parse failures are logged and produce a record with no serials and no match.
pub fn evaluate(
    pem: &str,
    table: &RevocationTable,
    source_file: &str,
    index: usize,
) -> CertificateRecord {
    let mut record = CertificateRecord {
        source_file: source_file.to_string(),
        index,
        subject_serial: None,
        issuer_serial: None,
        matched: None,
        matched_by: None,
        parse_error: None,
    };

    let cert = match parse_pem_certificate(pem) {
        Ok(cert) => cert,
        Err(e) => {
            log_error(&format!(
                "Skipping certificate {index} in {source_file}: {e}"
            ));
            record.parse_error = Some(e);
            return record;
        }
    };

    let subject_serial = subject_serial_hex(cert.tbs_certificate.serial_number.as_bytes());
    let issuer_serial = issuer_serial_hex(&cert);

    if let Some((entry, matched_by)) = lookup(table, &subject_serial, issuer_serial.as_deref()) {
        record.matched = Some(entry.clone());
        record.matched_by = Some(matched_by);
    }
    record.subject_serial = Some(subject_serial);
    record.issuer_serial = issuer_serial;
    record
}
