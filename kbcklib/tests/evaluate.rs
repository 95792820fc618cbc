mod common;

use common::*;
use kbcklib::evaluate::{evaluate, issuer_serial_hex, parse_pem_certificate, MatchedBy};
use kbcklib::status_list::{EntryStatus, RevocationTable};
use kbcklib::Error;

#[test]
fn subject_serial_is_lowercase_hex() {
    let record = evaluate(SERIAL_1A2B, &RevocationTable::unavailable(), "kb.xml", 1);
    assert_eq!(record.subject_serial.as_deref(), Some("1a2b"));
    assert_eq!(record.issuer_serial.as_deref(), Some("abc00f1"));
    assert!(record.matched.is_none());
    assert!(record.parse_error.is_none());
}

#[test]
fn subject_serial_leading_zeros_are_stripped() {
    let t = RevocationTable::unavailable();
    assert_eq!(
        evaluate(SERIAL_LEADING_ZERO, &t, "kb.xml", 1).subject_serial.as_deref(),
        Some("abc")
    );
    // DER adds a 0x00 sign byte ahead of 0x8f
    assert_eq!(
        evaluate(SERIAL_HIGH_BIT, &t, "kb.xml", 1).subject_serial.as_deref(),
        Some("8f00aa11")
    );
}

#[test]
fn zero_serial_is_not_empty() {
    let record = evaluate(SERIAL_ZERO, &RevocationTable::unavailable(), "kb.xml", 1);
    assert_eq!(record.subject_serial.as_deref(), Some("0"));
}

#[test]
fn issuer_serial_absent() {
    let cert = parse_pem_certificate(SERIAL_NO_ISSUER_SERIAL).unwrap();
    assert_eq!(issuer_serial_hex(&cert), None);
}

#[test]
fn issuer_serial_strips_non_hex() {
    let cert = parse_pem_certificate(SERIAL_HIGH_BIT).unwrap();
    assert_eq!(issuer_serial_hex(&cert).as_deref(), Some("f00d"));
}

#[test]
fn serial_derivation_is_deterministic() {
    let t = RevocationTable::unavailable();
    let a = evaluate(SERIAL_1A2B, &t, "kb.xml", 1);
    let b = evaluate(SERIAL_1A2B, &t, "kb.xml", 1);
    assert_eq!(a.subject_serial, b.subject_serial);
    assert_eq!(a.issuer_serial, b.issuer_serial);
}

#[test]
fn subject_serial_takes_precedence() {
    let t = table(&[
        ("1a2b", "REVOKED", "KEY_COMPROMISE"),
        ("abc00f1", "VALID", "UNSPECIFIED"),
    ]);
    let record = evaluate(SERIAL_1A2B, &t, "kb.xml", 1);
    assert_eq!(record.matched_by, Some(MatchedBy::SubjectSerial));
    assert_eq!(record.matched, Some(entry("REVOKED", "KEY_COMPROMISE")));
    assert!(record.is_revoked());
}

#[test]
fn issuer_serial_is_fallback() {
    let t = table(&[("abc00f1", "REVOKED", "SOFTWARE_FLAW")]);
    let record = evaluate(SERIAL_1A2B, &t, "kb.xml", 1);
    assert_eq!(record.matched_by, Some(MatchedBy::IssuerSerial));
    assert!(record.is_revoked());
}

#[test]
fn uppercase_table_keys_are_normalized() {
    let t = table(&[("1A2B", "REVOKED", "KEY_COMPROMISE")]);
    assert!(evaluate(SERIAL_1A2B, &t, "kb.xml", 1).is_revoked());
}

#[test]
fn lowercase_revoked_is_not_revoked() {
    let t = table(&[("1a2b", "revoked", "KEY_COMPROMISE")]);
    let record = evaluate(SERIAL_1A2B, &t, "kb.xml", 1);
    assert_eq!(
        record.matched.as_ref().map(|e| e.status.clone()),
        Some(EntryStatus::Other("revoked".to_string()))
    );
    assert!(!record.is_revoked());
}

#[test]
fn other_statuses_are_not_revoked() {
    for status in ["VALID", "UNKNOWN", "SUSPENDED"] {
        let t = table(&[("1a2b", status, "UNSPECIFIED")]);
        let record = evaluate(SERIAL_1A2B, &t, "kb.xml", 1);
        assert!(record.matched.is_some());
        assert!(!record.is_revoked(), "{status}");
    }
}

#[test]
fn not_found_is_not_valid() {
    let t = table(&[("ffff", "VALID", "UNSPECIFIED")]);
    let record = evaluate(SERIAL_1A2B, &t, "kb.xml", 1);
    assert!(record.matched.is_none());
    assert!(record.matched_by.is_none());
    assert!(!record.is_revoked());
}

#[test]
fn malformed_certificate_is_skipped() {
    let pem = "-----BEGIN CERTIFICATE-----\nQUJDREVG\n-----END CERTIFICATE-----";
    let t = table(&[("0", "REVOKED", "KEY_COMPROMISE")]);
    let record = evaluate(pem, &t, "kb.xml", 3);
    assert!(record.subject_serial.is_none());
    assert!(record.issuer_serial.is_none());
    assert!(record.matched.is_none());
    assert!(matches!(record.parse_error, Some(Error::Asn1(_))));
    assert_eq!(record.index, 3);
    assert_eq!(record.source_file, "kb.xml");
}

#[test]
fn bad_base64_is_a_parse_error() {
    let pem = "-----BEGIN CERTIFICATE-----\n!!!!\n-----END CERTIFICATE-----";
    let record = evaluate(pem, &RevocationTable::unavailable(), "kb.xml", 1);
    assert_eq!(record.parse_error, Some(Error::ParseError));
}
