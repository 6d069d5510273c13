//! Logging initialization for shelf_app.
//!
//! The terminal belongs to the scanner UI, so logs go to `./shelf.log` unless
//! the settings ask for terminal output as well.

use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, SharedLogger, TermLogger, TerminalMode, WriteLogger};

const LOG_FILENAME: &str = "./shelf.log";

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to ./shelf.log in current directory.
    File,
    /// Write to both file and stderr.
    Both,
}

impl LogDestination {
    pub fn from_terminal_flag(log_to_terminal: bool) -> Self {
        if log_to_terminal {
            Self::Both
        } else {
            Self::File
        }
    }
}

/// Initialize the logger with the specified destination.
pub fn initialize(destination: LogDestination) {
    let level = LevelFilter::Info;
    let config = shelf_logging::default_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if destination == LogDestination::Both {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if let Some(file_logger) = create_file_logger(level, config) {
        loggers.push(file_logger);
    }
    if loggers.is_empty() {
        return;
    }

    let _ = CombinedLogger::init(loggers);
}

fn create_file_logger(
    level: LevelFilter,
    config: simplelog::Config,
) -> Option<Box<WriteLogger<File>>> {
    let log_path = PathBuf::from(LOG_FILENAME);
    match File::create(&log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
            None
        }
    }
}
