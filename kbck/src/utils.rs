//! Utility functions used by the kbck utility

use std::path::PathBuf;

use colored::Colorize;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};

use crate::args::KbckArgs;

/// Configures logging per the logging-related elements of the provided [KbckArgs] instance.
///
/// [logging_config](KbckArgs::logging_config) names a log4rs YAML file and takes precedence.
/// Otherwise [log_to_console](KbckArgs::log_to_console) emits Info level messages to stdout.
/// Failure to configure logging is reported and the run continues without it.
pub(crate) fn configure_logging(args: &KbckArgs) {
    if let Some(logging_config) = &args.logging_config {
        if let Err(e) = log4rs::init_file(logging_config, Default::default()) {
            println!(
                "{}: failed to configure logging using {} with {:?}. Continuing without logging.",
                "ERROR".bold(),
                logging_config,
                e
            );
        }
        return;
    }

    if !args.log_to_console {
        return;
    }

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{m}{n}")))
        .build();
    match Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))
    {
        Ok(config) => {
            if let Err(e) = log4rs::init_config(config) {
                println!(
                    "{}: failed to configure logging for stdout with {:?}. Continuing without logging.",
                    "ERROR".bold(),
                    e
                );
            }
        }
        Err(e) => {
            println!(
                "{}: failed to prepare default logging configuration with {:?}. Continuing without logging",
                "ERROR".bold(),
                e
            );
        }
    }
}

/// Returns the directory to scan: the --dir argument if given, else the folder holding the
/// running executable.
pub(crate) fn scan_directory(args: &KbckArgs) -> Option<PathBuf> {
    if let Some(dir) = &args.dir {
        return Some(dir.clone());
    }
    match std::env::current_exe() {
        Ok(exe) => exe.parent().map(|p| p.to_path_buf()),
        Err(e) => {
            log::error!("Failed to determine location of the executable: {e}");
            None
        }
    }
}
