//! Networking-related utility functions

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CACHE_CONTROL;

use crate::{log_error, Error, Result};

/// Timeout, in seconds, applied to the status list request
pub static TIMEOUT: u64 = 10;

/// Creates a blocking Reqwest Client using indicated timeout value
pub fn get_client(timeout_secs: u64) -> Result<Client> {
    match Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .use_rustls_tls()
        .build()
    {
        Ok(client) => Ok(client),
        Err(e) => {
            log_error(&format!("Failed to create HTTP Client: {:?}", e));
            Err(Error::Network)
        }
    }
}

/// Retrieves the body of the indicated URL, asking intermediate caches not to serve a stored copy
pub(crate) fn get_uncached(client: &Client, url: &str) -> Result<Vec<u8>> {
    let response = match client.get(url).header(CACHE_CONTROL, "no-cache").send() {
        Ok(response) => response,
        Err(e) => {
            log_error(&format!("Failed to get response from {url}: {e}"));
            return Err(Error::Network);
        }
    };

    if !response.status().is_success() {
        log_error(&format!(
            "Request to {url} failed with {:?}",
            response.status()
        ));
        return Err(Error::Network);
    }

    match response.bytes() {
        Ok(bytes) => Ok(bytes.to_vec()),
        Err(e) => {
            log_error(&format!("Failed to read response from {url}: {e}"));
            Err(Error::Network)
        }
    }
}
