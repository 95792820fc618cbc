//! Retrieval and normalization of the published attestation status (revocation) list

use std::collections::HashMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::network::get_uncached;
use crate::{log_error, log_info, Error, Result};

/// Status value assigned to entries that carry no `status` field
pub const DEFAULT_STATUS: &str = "UNKNOWN";
/// Reason value assigned to entries that carry no `reason` field
pub const DEFAULT_REASON: &str = "UNSPECIFIED";

/// Lifecycle status of a status list entry.
///
/// Only the exact string `REVOKED` maps to [EntryStatus::Revoked]. Values that differ in case or
/// spelling are preserved verbatim in [EntryStatus::Other] so they can be reported without ever
/// being treated as revocations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EntryStatus {
    Revoked,
    Valid,
    Unknown,
    Other(String),
}

impl From<&str> for EntryStatus {
    fn from(s: &str) -> Self {
        match s {
            "REVOKED" => EntryStatus::Revoked,
            "VALID" => EntryStatus::Valid,
            "UNKNOWN" => EntryStatus::Unknown,
            other => EntryStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::Revoked => write!(f, "REVOKED"),
            EntryStatus::Valid => write!(f, "VALID"),
            EntryStatus::Unknown => write!(f, "UNKNOWN"),
            EntryStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Status and reason published for one serial number
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RevocationEntry {
    pub status: EntryStatus,
    pub reason: String,
}

impl RevocationEntry {
    /// Returns true when the entry is grounds for deleting the file that carries the certificate
    pub fn is_revoked(&self) -> bool {
        self.status == EntryStatus::Revoked
    }
}

/// Lookup table from lowercase hex serial number to [RevocationEntry].
///
/// A table built after a failed download is empty and reports `false` from
/// [is_available](RevocationTable::is_available), which lets callers tell "nothing matched" apart
/// from "nothing could be checked".
#[derive(Clone, Debug, Default)]
pub struct RevocationTable {
    entries: HashMap<String, RevocationEntry>,
    available: bool,
}

impl RevocationTable {
    /// Creates an empty table standing in for a status list that could not be obtained
    pub fn unavailable() -> Self {
        Self {
            entries: HashMap::new(),
            available: false,
        }
    }

    /// Creates a table from entries whose keys are normalized to lowercase
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, RevocationEntry)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(serial, entry)| (serial.to_lowercase(), entry))
                .collect(),
            available: true,
        }
    }

    pub fn get(&self, serial: &str) -> Option<&RevocationEntry> {
        self.entries.get(serial)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_available(&self) -> bool {
        self.available
    }
}

#[derive(Deserialize)]
struct StatusListDocument {
    #[serde(default)]
    entries: HashMap<String, StatusListEntry>,
}

#[derive(Deserialize)]
struct StatusListEntry {
    status: Option<String>,
    reason: Option<String>,
}

/// Appends the cache-busting `unix_time` query to `base`
pub fn status_list_url(base: &str, unix_time: u64) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{unix_time}")
}

/// Parses a status list document into a [RevocationTable].
///
/// Entries lacking `status` or `reason` receive [DEFAULT_STATUS] and [DEFAULT_REASON]. A document
/// without an `entries` member yields an empty table.
pub fn parse_status_list(json: &[u8]) -> Result<RevocationTable> {
    let doc: StatusListDocument = match serde_json::from_slice(json) {
        Ok(doc) => doc,
        Err(e) => {
            log_error(&format!("Failed to parse status list: {e}"));
            return Err(Error::Json);
        }
    };

    Ok(RevocationTable::from_entries(doc.entries.into_iter().map(
        |(serial, entry)| {
            let status = entry.status.as_deref().unwrap_or(DEFAULT_STATUS);
            (
                serial,
                RevocationEntry {
                    status: EntryStatus::from(status),
                    reason: entry.reason.unwrap_or_else(|| DEFAULT_REASON.to_string()),
                },
            )
        },
    )))
}

fn unix_time_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Downloads and parses the status list published at `base_url`.
///
/// Never fails. Any network, HTTP or parsing failure is logged and an
/// [unavailable](RevocationTable::unavailable) table is returned so the run can proceed.
pub fn fetch_status_list(client: &Client, base_url: &str) -> RevocationTable {
    let url = status_list_url(base_url, unix_time_now());
    let table = get_uncached(client, &url).and_then(|body| parse_status_list(&body));
    match table {
        Ok(table) => {
            log_info(&format!(
                "Retrieved {} status list entries from {url}",
                table.len()
            ));
            table
        }
        Err(e) => {
            log_error(&format!(
                "Failed to retrieve status list from {url}: {e}. Continuing without it."
            ));
            RevocationTable::unavailable()
        }
    }
}
