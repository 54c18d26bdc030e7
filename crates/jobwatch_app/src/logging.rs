//! Logger setup for the runner.
//!
//! Destination, file path and verbosity come from the watch config; the
//! poll-cycle stamping itself lives in the `watch_logging` macros.

use std::fs::File;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

use crate::config::LogSettings;

pub fn initialize(settings: &LogSettings) {
    let level = if settings.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if settings.destination.to_terminal() {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if settings.destination.to_file() {
        match File::create(&settings.file) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(err) => {
                eprintln!(
                    "Warning: could not create log file {:?}: {}",
                    settings.file, err
                );
            }
        }
    }

    let _ = CombinedLogger::init(loggers);
}
