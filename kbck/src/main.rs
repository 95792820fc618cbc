#![doc = include_str!("../README.md")]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

use std::io;

use clap::Parser;
use colored::Colorize;
use log::{debug, info};

use kbcklib::{
    delete::{confirm_deletion, delete_files},
    enumerate::list_candidate_files,
    get_client,
    scan::{deletion_candidates, scan_file, FileResult, ScanSummary},
    status_list::fetch_status_list,
    DEFAULT_STATUS_URL, TIMEOUT,
};

mod args;
mod report;
mod utils;

use args::KbckArgs;
use report::{print_candidates, print_deletion_report, print_file_result, print_summary};
use utils::{configure_logging, scan_directory};

/// Point of entry for `kbck` application.
///
/// See [KbckArgs] for usage details.
fn main() {
    let args = KbckArgs::parse();
    configure_logging(&args);

    // must succeed before any network or file activity
    let client = match get_client(TIMEOUT) {
        Ok(client) => client,
        Err(e) => {
            println!(
                "{}: failed to initialize the HTTPS client: {e}. Rebuild kbck with reqwest's rustls-tls feature enabled.",
                "ERROR".bold()
            );
            std::process::exit(1);
        }
    };

    let dir = match scan_directory(&args) {
        Some(dir) => dir,
        None => {
            println!(
                "{}: failed to determine the directory to scan. Use --dir to provide one.",
                "ERROR".bold()
            );
            std::process::exit(1);
        }
    };

    let files = match list_candidate_files(&dir) {
        Ok(files) => files,
        Err(e) => {
            println!("{}: failed to list {}: {e}", "ERROR".bold(), dir.display());
            std::process::exit(1);
        }
    };
    if files.is_empty() {
        println!("\nNo XML files found in {}", dir.display());
        return;
    }
    debug!("Found {} candidate files in {}", files.len(), dir.display());

    let url = args.url.clone().unwrap_or_else(|| DEFAULT_STATUS_URL.clone());
    println!("\nDownloading online Attestation list...");
    let table = fetch_status_list(&client, &url);
    if table.is_available() {
        info!("Status list contains {} entries", table.len());
    } else {
        println!(
            "{}",
            "WARNING: failed to download the attestation status list. Certificates will not be checked."
                .yellow()
                .bold()
        );
    }

    let results: Vec<FileResult> = files
        .iter()
        .map(|path| {
            println!("\nProcessing {}...", path.file_name().unwrap_or_default().to_string_lossy());
            let result = scan_file(path, &table);
            print_file_result(&result, table.is_available());
            result
        })
        .collect();

    print_summary(&ScanSummary::new(&results, &table));

    let candidates = deletion_candidates(&results);
    if candidates.is_empty() {
        return;
    }
    print_candidates(&candidates);

    if args.dry_run {
        println!("\nDry run. No files were deleted.");
        return;
    }

    let prompt = format!("\n{}", "Do you want to delete these files? [Y/n]: ".yellow());
    if !confirm_deletion(&mut io::stdin().lock(), &mut io::stdout(), &prompt) {
        println!("\n{}", "Deletion cancelled. No files were deleted.".yellow());
        return;
    }

    println!("\n=== DELETING REVOKED KEYBOXES ===");
    let report = delete_files(candidates.iter().map(|r| r.path.as_path()));
    print_deletion_report(&report);
}
