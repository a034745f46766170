//! Find files inside the backups held by a backup appliance.
//!
//! The appliance keeps point in time snapshots of filesets (a tracked set of files on a
//! physical host or a network share). This library talks to the appliance REST `API` to
//! locate a fileset, search it for file names, and report on the versions of each file that
//! were captured.
//!
//! # Architecture Overview
//!
//! * [client] is the `API` used to issue requests to the appliance. The [ApplianceApi] trait is
//!   the seam between the library and the network.
//! * [resolve] turns a host or host share into a fileset id.
//! * [search] runs the cursor paginated file search.
//! * [report] formats file versions, using [snapshots] to memoize backup dates.
//! * [finder] is the assembler that runs everything in order.
//!
//! Nothing is cached between invocations, every run fetches what it needs.
//!
pub mod client;
pub mod config;
pub mod entities;
pub mod fields;
pub mod finder;
pub mod prompt;
pub mod report;
pub mod resolve;
pub mod search;
pub mod snapshots;
pub mod timestamp;

#[cfg(test)]
mod testing;

use std::{fmt, io, result};

/// The library result.
pub type Result<T> = result::Result<T, Error>;

/// The errors that can be returned by the library.
#[derive(Debug)]
pub enum Error {
    /// A host, share, or fileset could not be located on the appliance.
    NotFound(String),
    /// Everything else, network, `JSON`, or configuration failures.
    Failed(String),
}
impl Error {
    /// Create a not found error.
    pub fn not_found(what: &str) -> Self {
        Error::NotFound(what.to_string())
    }
    /// Returns `true` if the error indicates something could not be found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(error) => write!(f, "{error}"),
            Error::Failed(error) => write!(f, "{error}"),
        }
    }
}
impl std::error::Error for Error {}
impl From<String> for Error {
    fn from(error: String) -> Self {
        Error::Failed(error)
    }
}
impl From<&str> for Error {
    fn from(error: &str) -> Self {
        Error::Failed(error.to_string())
    }
}
impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Error::Failed(format!("http: {error}"))
    }
}
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Failed(format!("json: {error}"))
    }
}
impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Error::Failed(format!("config: {error}"))
    }
}
impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Error::Failed(format!("timestamp: {error}"))
    }
}
impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Failed(format!("io: {error}"))
    }
}
impl From<toolslib::text::Error> for Error {
    fn from(error: toolslib::text::Error) -> Self {
        Error::Failed(error.to_string())
    }
}

pub use client::{ApiRequest, ApiVersion, ApplianceApi, RestClient};

/// The commonly used library items.
pub mod prelude {
    pub use crate::{
        client::{fetch, ApiRequest, ApiVersion, ApplianceApi, ClientSettings, RestClient},
        config::Config,
        entities::{FileVersion, Fileset, SearchFile, SearchPage},
        fields::{validate_fields, Field, FieldSelection, DEFAULT_FIELDS},
        finder::{find_files, FindCriteria},
        prompt::Prompter,
        report::{FileReport, VersionSelector},
        resolve::{BackupTarget, Credentials},
        Error, Result,
    };
}
