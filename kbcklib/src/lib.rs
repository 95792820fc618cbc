#![doc = include_str!("../README.md")]

pub mod delete;
pub mod enumerate;
pub mod evaluate;
pub mod extract;
pub mod scan;
pub mod status_list;

mod network;
mod utils;

pub use network::{get_client, TIMEOUT};

use lazy_static::lazy_static;
use log::{debug, error, info, warn};

/// Result type for kbcklib
pub type Result<T> = core::result::Result<T, Error>;

/// Error values for kbcklib
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    BadInput,
    Network,
    Io,
    Json,
    ParseError,
    /// Asn1Error is used to propagate error information from the x509 crate.
    Asn1(der::Error),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::BadInput => write!(f, "bad input"),
            Error::Network => write!(f, "network error"),
            Error::Io => write!(f, "I/O error"),
            Error::Json => write!(f, "malformed JSON"),
            Error::ParseError => write!(f, "parse error"),
            Error::Asn1(e) => write!(f, "ASN.1 error: {e}"),
        }
    }
}

/// Enum that describes level associated with a log message
#[derive(Debug, Eq, PartialEq)]
enum KbckLogLevels {
    /// Common error logging level
    Error,
    /// Common info logging level
    Info,
    /// Common warn logging level
    Warn,
    /// Common debug logging level
    Debug,
}

/// Generates logging output per the configuration established by the calling application
fn log_message(level: &KbckLogLevels, message: &str) {
    match level {
        KbckLogLevels::Error => error!("{}", message),
        KbckLogLevels::Warn => warn!("{}", message),
        KbckLogLevels::Info => info!("{}", message),
        KbckLogLevels::Debug => debug!("{}", message),
    }
}

/// Generates error level logging output per calling application configured logging
pub fn log_error(message: &str) {
    log_message(&KbckLogLevels::Error, message)
}

/// Generates warn level logging output per calling application configured logging
pub fn log_warn(message: &str) {
    log_message(&KbckLogLevels::Warn, message)
}

/// Generates info level logging output per calling application configured logging
pub fn log_info(message: &str) {
    log_message(&KbckLogLevels::Info, message)
}

/// Generates debug level logging output per calling application configured logging
pub fn log_debug(message: &str) {
    log_message(&KbckLogLevels::Debug, message)
}

lazy_static! {
    /// Base URL of the published attestation status list. A cache-busting query is appended
    /// before each request (see [status_list::status_list_url]).
    pub static ref DEFAULT_STATUS_URL: String =
        "https://android.googleapis.com/attestation/status".to_string();
}
