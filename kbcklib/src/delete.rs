//! Confirmation and removal of keyboxes holding revoked certificates

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::{log_error, log_info};

/// Returns true for the inputs that approve deletion: empty, `y` or `yes` in any case
pub fn is_affirmative(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "" | "y" | "yes")
}

/// Writes `prompt` to `output` and reads a single line of response from `input`.
///
/// End of input and read failures decline.
pub fn confirm_deletion<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> bool {
    if let Err(e) = write!(output, "{prompt}").and_then(|_| output.flush()) {
        log_error(&format!("Failed to write confirmation prompt: {e}"));
    }

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => {
            log_info("No response to confirmation prompt. Treating as no.");
            false
        }
        Ok(_) => is_affirmative(&line),
        Err(e) => {
            log_error(&format!("Failed to read confirmation response: {e}"));
            false
        }
    }
}

/// Outcome of a deletion pass
#[derive(Debug, Default)]
pub struct DeletionReport {
    pub deleted: Vec<PathBuf>,
    /// Files that could not be removed, with the error text
    pub failed: Vec<(PathBuf, String)>,
}

/// Removes each file in `paths`. A failure is recorded and the remaining files are still attempted.
pub fn delete_files<'a, I>(paths: I) -> DeletionReport
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut report = DeletionReport::default();
    for path in paths {
        match fs::remove_file(path) {
            Ok(_) => {
                log_info(&format!("Deleted {}", path.display()));
                report.deleted.push(path.to_path_buf());
            }
            Err(e) => {
                log_error(&format!("Failed to delete {}: {e}", path.display()));
                report.failed.push((path.to_path_buf(), e.to_string()));
            }
        }
    }
    report
}
