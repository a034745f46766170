//! The appliance data consumed by the library.
//!
//! Only the fields that are used are modeled, everything else in a response is ignored.

use serde::Deserialize;

/// The list envelope used by most of the `API` endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing<T> {
    /// The items in the listing.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// The number of items the appliance says it has.
    #[serde(default)]
    pub total: Option<usize>,
}
impl<T> Listing<T> {
    /// The item count, the reported total is preferred when available.
    pub fn count(&self) -> usize {
        self.total.unwrap_or(self.data.len())
    }
}

/// The cluster configuration (`/cluster/me`).
#[derive(Debug, Deserialize)]
pub struct Cluster {
    /// The cluster identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// The cluster timezone settings.
    pub timezone: ClusterTimezone,
}

/// The cluster timezone settings.
#[derive(Debug, Deserialize)]
pub struct ClusterTimezone {
    /// The `IANA` timezone name.
    pub timezone: String,
}

/// A network share known to the appliance.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostShare {
    /// The share identifier.
    pub id: String,
    /// The host exporting the share.
    pub hostname: String,
    /// The share export point.
    pub export_point: String,
}

/// A physical host known to the appliance.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    /// The host identifier.
    pub id: String,
    /// The host name.
    #[serde(default)]
    pub name: Option<String>,
    /// The operating system family.
    #[serde(default)]
    pub operating_system_type: Option<String>,
}

/// A fileset protecting a host or share.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Fileset {
    /// The fileset identifier.
    pub id: String,
    /// The fileset name.
    pub name: String,
}

/// A page of search results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    /// `true` if there are more pages.
    #[serde(default)]
    pub has_more: bool,
    /// The cursor used to get the next page.
    #[serde(default)]
    pub next_cursor: Option<String>,
    /// The files found.
    #[serde(default = "Vec::new")]
    pub data: Vec<SearchFile>,
}

/// A file that matched the search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFile {
    /// The full file path.
    pub path: String,
    /// The file versions captured by snapshots.
    #[serde(default = "Vec::new")]
    pub file_versions: Vec<FileVersion>,
}

/// A single captured state of a file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileVersion {
    /// The file size in bytes.
    pub size: u64,
    /// When the file was last modified (`UTC`).
    pub last_modified: String,
    /// The snapshot that captured this version.
    pub snapshot_id: String,
    /// Where the snapshot lives, `cloud` is the archive tier.
    #[serde(default)]
    pub source: String,
    /// The file mode (type) string.
    #[serde(default)]
    pub file_mode: String,
}
impl FileVersion {
    /// The storage tier holding the version.
    pub fn location(&self) -> &'static str {
        match self.source == "cloud" {
            true => "Archive",
            false => "Local",
        }
    }
}

/// A fileset snapshot.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// When the snapshot was taken (`UTC`).
    pub date: String,
}
