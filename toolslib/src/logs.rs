//! Logging bootstrap for the command line tools.
//!
//! Everything logs through the `log` facade. This module wires `log4rs` up with a console
//! appender that writes to `stderr` (so it never mixes with report output on `stdout`) and an
//! optional file appender.
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::runtime::{ConfigErrors, Logger};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;

use std::{fmt, io, path::PathBuf};

/// An error that can be returned when initializing `log4rs`.
#[derive(Debug)]
pub struct LogError(String);

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Consolidate the `log4rs` configuration error to a log error.
impl From<ConfigErrors> for LogError {
    fn from(error: ConfigErrors) -> Self {
        LogError(format!("{error}"))
    }
}

/// Consolidate the `log4rs` error when adding a logger to a log error.
impl From<log::SetLoggerError> for LogError {
    fn from(error: log::SetLoggerError) -> Self {
        LogError(format!("{error}"))
    }
}

/// Consolidate the standard IO Error to a log error.
impl From<io::Error> for LogError {
    fn from(error: io::Error) -> Self {
        LogError(format!("{error}"))
    }
}

/// The default appender pattern used by the console logger.
const DEFAULT_CONSOLE_PATTERN: &str = "{l:<5} {M} {m}{n}";

/// The default appender pattern used by the file logger.
const DEFAULT_FILE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {M} {l:<5} {m}{n}";

/// Map the command line logging flags to a level filter.
///
/// The debug flag is the historical switch and always wins over a lower verbosity count.
///
/// # Arguments
///
/// * `debug` is `true` when debug output was requested.
/// * `verbosity` is the number of times the verbose flag was repeated.
pub fn level_filter(debug: bool, verbosity: u8) -> log::LevelFilter {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    match debug && level < log::LevelFilter::Debug {
        true => log::LevelFilter::Debug,
        false => level,
    }
}

/// The structure used to initialize `log4rs`.
#[derive(Debug)]
pub struct LogProperties {
    /// The log level that will be used.
    pub level: log::LevelFilter,
    /// The console logging pattern, if `None` the `DEFAULT_CONSOLE_PATTERN` will be used.
    pub console_pattern: Option<String>,
    /// The file logging pattern, if `None` the `DEFAULT_FILE_PATTERN` will be used.
    pub logfile_pattern: Option<String>,
    /// The path of the log file, if `None` logging to a file will not occur.
    pub logfile_path: Option<PathBuf>,
    /// Determines if logging output should be appended to the log file or not.
    pub logfile_append: bool,
    /// The loggers (module paths) that will write only to the log file.
    pub file_loggers: Vec<String>,
}
impl Default for LogProperties {
    fn default() -> Self {
        Self {
            level: log::LevelFilter::Warn,
            console_pattern: None,
            logfile_pattern: None,
            logfile_path: None,
            logfile_append: false,
            file_loggers: vec![],
        }
    }
}

/// Builds the `log4rs` configuration described by the log properties.
///
/// When a log file is configured the file loggers are not additive, their output lands only in
/// the file and the console stays quiet for those modules.
fn build_config(log_properties: LogProperties) -> Result<Config, LogError> {
    let console_pattern = log_properties.console_pattern.unwrap_or_else(|| String::from(DEFAULT_CONSOLE_PATTERN));
    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(&console_pattern)))
        .build();
    let mut config_builder =
        Config::builder().appender(Appender::builder().build("console", Box::new(console_appender)));
    let mut root_builder = Root::builder().appender("console");

    // the log pathname is the trigger to use a log file
    if let Some(log_pathname) = log_properties.logfile_path {
        let file_pattern = log_properties.logfile_pattern.unwrap_or_else(|| String::from(DEFAULT_FILE_PATTERN));
        let file_appender = FileAppender::builder()
            .append(log_properties.logfile_append)
            .encoder(Box::new(PatternEncoder::new(&file_pattern)))
            .build(log_pathname)?;
        config_builder = config_builder.appender(Appender::builder().build("file", Box::new(file_appender)));
        root_builder = root_builder.appender("file");
        let level = log_properties.level;
        let loggers: Vec<Logger> = log_properties
            .file_loggers
            .iter()
            .map(|logger| Logger::builder().appender("file").additive(false).build(logger, level))
            .collect();
        config_builder = config_builder.loggers(loggers);
    }
    Ok(config_builder.build(root_builder.build(log_properties.level))?)
}

/// Initializes `log4rs` with a console logger (`stderr`) and an optional file logger.
///
/// A `log4rs` handle to the active logger is returned allowing the logging configuration to be
/// changed at runtime.
pub fn initialize(log_properties: LogProperties) -> Result<Handle, LogError> {
    let config = build_config(log_properties)?;
    let handle = log4rs::init_config(config)?;
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    #[test]
    fn levels() {
        assert_eq!(level_filter(false, 0), LevelFilter::Warn);
        assert_eq!(level_filter(false, 1), LevelFilter::Info);
        assert_eq!(level_filter(false, 2), LevelFilter::Debug);
        assert_eq!(level_filter(false, 9), LevelFilter::Trace);
        assert_eq!(level_filter(true, 0), LevelFilter::Debug);
        assert_eq!(level_filter(true, 1), LevelFilter::Debug);
        assert_eq!(level_filter(true, 3), LevelFilter::Trace);
    }

    #[test]
    fn file_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = build_config(LogProperties {
            level: LevelFilter::Info,
            logfile_path: Some(dir.path().join("test.log")),
            file_loggers: vec![String::from("rbkfind")],
            ..Default::default()
        })
        .unwrap();
        assert_eq!(config.appenders().len(), 2);
        assert_eq!(config.loggers().len(), 1);
        assert_eq!(config.root().level(), LevelFilter::Info);
    }

    #[test]
    fn console_config() {
        let config = build_config(LogProperties::default()).unwrap();
        assert_eq!(config.appenders().len(), 1);
        assert!(config.loggers().is_empty());
        assert_eq!(config.root().level(), LevelFilter::Warn);
    }
}
