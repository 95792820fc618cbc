//! Console rendering of scan results

use colored::Colorize;

use kbcklib::delete::DeletionReport;
use kbcklib::evaluate::{CertificateRecord, MatchedBy};
use kbcklib::scan::{FileResult, ScanSummary};

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}

fn print_certificate(cert: &CertificateRecord, status_list_available: bool) {
    println!("\n  Certificate {}:", cert.index);
    if let Some(e) = &cert.parse_error {
        println!("    {}: failed to parse certificate: {e}", "ERROR".bold());
        return;
    }
    println!("    Hex Serial: {}", or_na(&cert.subject_serial));
    println!("    Issuer Serial: {}", or_na(&cert.issuer_serial));

    match (&cert.matched, cert.matched_by) {
        (Some(entry), matched_by) => {
            let status = format!("STATUS: {}", entry.status);
            if entry.is_revoked() {
                println!("    {}", status.red().bold());
            } else {
                println!("    {}", status.yellow());
            }
            println!("    REASON: {}", entry.reason);
            if matched_by == Some(MatchedBy::IssuerSerial) {
                println!("    (matched by issuer serial)");
            }
        }
        (None, _) if status_list_available => {
            println!("    STATUS: {}", "not found in status list".green());
        }
        (None, _) => {
            println!(
                "    STATUS: {}",
                "not checked (status list unavailable)".yellow()
            );
        }
    }
}

/// Prints the per-certificate detail for one scanned keybox
pub(crate) fn print_file_result(result: &FileResult, status_list_available: bool) {
    if let Some(e) = &result.read_error {
        println!("  {}: failed to read {}: {e}", "ERROR".bold(), result.file_name);
        return;
    }
    if result.certificates.is_empty() {
        println!("  No certificates found");
        return;
    }
    for cert in &result.certificates {
        print_certificate(cert, status_list_available);
    }
    let revoked = result.revoked_count();
    if revoked > 0 {
        println!("\n  Found {revoked} matches in {}", result.file_name);
    }
}

/// Prints run totals
pub(crate) fn print_summary(summary: &ScanSummary) {
    println!("\n\n=== FINAL RESULTS ===");
    if !summary.status_list_available {
        println!(
            "{}",
            "WARNING: the attestation status list could not be retrieved. No certificate was checked for revocation."
                .yellow()
                .bold()
        );
    }
    println!("Total number of keyboxes: {}", summary.files_scanned);
    println!(
        "Total number of valid keyboxes: {}",
        summary.valid_files.to_string().green()
    );
    println!(
        "Total number of revoked keyboxes: {}",
        summary.revoked_files.to_string().red()
    );
    if summary.unreadable_files > 0 {
        println!("Keyboxes that could not be read: {}", summary.unreadable_files);
    }
    println!(
        "Certificates checked: {} ({} revoked)",
        summary.certificates_scanned, summary.certificates_revoked
    );
}

/// Lists each keybox slated for deletion along with its revoked certificates
pub(crate) fn print_candidates(candidates: &[&FileResult]) {
    println!("\nKeyboxes containing matching serials:");
    for result in candidates {
        println!("\n{}:", result.file_name);
        for cert in result.revoked() {
            println!("  Certificate {}:", cert.index);
            println!("    Hex Serial: {}", or_na(&cert.subject_serial));
            println!("    Issuer Serial: {}", or_na(&cert.issuer_serial));
            if let Some(entry) = &cert.matched {
                println!("    Status: {}", entry.status.to_string().red());
                println!("    Reason: {}", entry.reason);
            }
        }
    }
}

/// Prints the outcome of a deletion pass
pub(crate) fn print_deletion_report(report: &DeletionReport) {
    for path in &report.deleted {
        println!("{}", format!("Deleted: {}", path.display()).red());
    }
    for (path, e) in &report.failed {
        println!("{}: failed to delete {}: {e}", "ERROR".bold(), path.display());
    }
    println!("\nTotal files deleted: {}", report.deleted.len());
}
