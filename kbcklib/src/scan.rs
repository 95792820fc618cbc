//! Per-file scanning and run-level tallies

use std::path::{Path, PathBuf};

use crate::enumerate::read_text_lossy;
use crate::evaluate::{evaluate, CertificateRecord};
use crate::extract::extract_certificates;
use crate::status_list::RevocationTable;
use crate::{log_info, Error};

/// Certificates found in one keybox and their evaluation results
#[derive(Clone, Debug)]
pub struct FileResult {
    pub file_name: String,
    pub path: PathBuf,
    /// Every certificate extracted from the file, in order of appearance
    pub certificates: Vec<CertificateRecord>,
    /// Set when the file could not be read. Such files have no certificates.
    pub read_error: Option<Error>,
}

impl FileResult {
    /// Certificates whose status list entry is `REVOKED`
    pub fn revoked(&self) -> Vec<&CertificateRecord> {
        self.certificates.iter().filter(|c| c.is_revoked()).collect()
    }

    pub fn revoked_count(&self) -> usize {
        self.certificates.iter().filter(|c| c.is_revoked()).count()
    }

    /// A file is slated for deletion iff it holds at least one revoked certificate
    pub fn is_deletion_candidate(&self) -> bool {
        self.revoked_count() > 0
    }
}

/// Evaluates every certificate in `text` against `table`
pub fn scan_text(path: &Path, text: &str, table: &RevocationTable) -> FileResult {
    let file_name = display_name(path);
    let certificates = extract_certificates(text)
        .iter()
        .enumerate()
        .map(|(i, pem)| evaluate(pem, table, &file_name, i + 1))
        .collect();
    FileResult {
        file_name,
        path: path.to_path_buf(),
        certificates,
        read_error: None,
    }
}

/// Reads the file at `path` and evaluates its certificates.
///
/// A read failure does not abort the run; it yields a result with no certificates and
/// `read_error` set.
pub fn scan_file(path: &Path, table: &RevocationTable) -> FileResult {
    match read_text_lossy(path) {
        Ok(text) => {
            let result = scan_text(path, &text, table);
            log_info(&format!(
                "{}: {} certificate(s), {} revoked",
                result.file_name,
                result.certificates.len(),
                result.revoked_count()
            ));
            result
        }
        Err(e) => FileResult {
            file_name: display_name(path),
            path: path.to_path_buf(),
            certificates: vec![],
            read_error: Some(e),
        },
    }
}

/// Returns the results holding at least one revoked certificate
pub fn deletion_candidates(results: &[FileResult]) -> Vec<&FileResult> {
    results
        .iter()
        .filter(|r| r.is_deletion_candidate())
        .collect()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Totals reported at the end of a run
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ScanSummary {
    pub files_scanned: usize,
    /// Files without any revoked certificate
    pub valid_files: usize,
    /// Files with one or more revoked certificates
    pub revoked_files: usize,
    /// Files that could not be read (also counted in `valid_files`)
    pub unreadable_files: usize,
    pub certificates_scanned: usize,
    pub certificates_revoked: usize,
    /// False when the status list could not be retrieved, in which case nothing was checked
    pub status_list_available: bool,
}

impl ScanSummary {
    pub fn new(results: &[FileResult], table: &RevocationTable) -> Self {
        let revoked_files = results.iter().filter(|r| r.is_deletion_candidate()).count();
        Self {
            files_scanned: results.len(),
            valid_files: results.len() - revoked_files,
            revoked_files,
            unreadable_files: results.iter().filter(|r| r.read_error.is_some()).count(),
            certificates_scanned: results.iter().map(|r| r.certificates.len()).sum(),
            certificates_revoked: results.iter().map(FileResult::revoked_count).sum(),
            status_list_available: table.is_available(),
        }
    }
}
