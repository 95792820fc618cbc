//! Discovery and reading of keybox files

use std::fs;
use std::path::{Path, PathBuf};

use crate::{log_error, Error, Result};

/// Extension, compared case-insensitively, of files that are scanned
pub const CANDIDATE_EXTENSION: &str = ".xml";

fn is_candidate_name(name: &str) -> bool {
    name.to_lowercase().ends_with(CANDIDATE_EXTENSION)
}

/// Returns the regular files directly inside `dir` whose names end with `.xml` in any case,
/// ordered by file name. Subdirectories are not searched.
pub fn list_candidate_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) => {
            log_error(&format!("Failed to read directory {}: {e}", dir.display()));
            return Err(Error::Io);
        }
    };

    let mut files = vec![];
    for entry in read_dir {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log_error(&format!(
                    "Failed to read entry in {}: {e}. Continuing...",
                    dir.display()
                ));
                continue;
            }
        };
        let path = entry.path();
        let is_candidate = entry
            .file_name()
            .to_str()
            .map(is_candidate_name)
            .unwrap_or(false);
        if is_candidate && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Decodes `bytes` as UTF-8, dropping invalid sequences instead of replacing them
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Reads the file at `path` as text using [decode_lossy]
pub fn read_text_lossy(path: &Path) -> Result<String> {
    match fs::read(path) {
        Ok(bytes) => Ok(decode_lossy(&bytes)),
        Err(e) => {
            log_error(&format!("Failed to read {}: {e}", path.display()));
            Err(Error::Io)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_ignores_case() {
        assert!(is_candidate_name("keybox.xml"));
        assert!(is_candidate_name("KEYBOX.XML"));
        assert!(is_candidate_name("a.Xml"));
        assert!(!is_candidate_name("keybox.xml.bak"));
        assert!(!is_candidate_name("xml"));
    }

    #[test]
    fn invalid_bytes_are_dropped() {
        assert_eq!(decode_lossy(b"ab\xffc\xc3"), "abc");
        assert_eq!(decode_lossy("é".as_bytes()), "é");
    }
}
