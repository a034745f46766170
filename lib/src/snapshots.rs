//! Snapshot backup dates.

use super::*;
use crate::{
    client::{fetch, ApiRequest},
    entities::Snapshot,
    timestamp::to_local,
};
use chrono_tz::Tz;
use std::{collections::HashMap, time::Duration};

/// Memoizes the localized backup date of snapshots.
///
/// Many file versions share a snapshot so each snapshot is fetched once. Entries are never
/// evicted, the cache lives as long as the report that owns it.
#[derive(Debug)]
pub struct SnapshotDates {
    /// The snapshot dates by snapshot id.
    dates: HashMap<String, String>,
    /// The timeout used to get a snapshot.
    timeout: Duration,
}
impl SnapshotDates {
    /// Create the cache.
    ///
    /// # Arguments
    ///
    /// * `timeout` bounds each snapshot request.
    pub fn new(timeout: Duration) -> Self {
        Self { dates: HashMap::new(), timeout }
    }
    /// Get the backup date of a snapshot in the cluster timezone.
    ///
    /// # Arguments
    ///
    /// * `api` is used when the snapshot is not cached.
    /// * `snapshot_id` identifies the snapshot.
    /// * `tz` is the cluster timezone.
    pub fn backup_date(&mut self, api: &dyn ApplianceApi, snapshot_id: &str, tz: &Tz) -> Result<&str> {
        if !self.dates.contains_key(snapshot_id) {
            let request = ApiRequest::v1(&format!("/fileset/snapshot/{snapshot_id}")).timeout(self.timeout);
            let snapshot: Snapshot = fetch(api, &request)?;
            log::debug!("SNAP_DATE = {}", snapshot.date);
            let date = to_local(&snapshot.date, tz)?;
            self.dates.insert(snapshot_id.to_string(), date);
        }
        Ok(self.dates[snapshot_id].as_str())
    }
    /// The number of snapshots that have been looked up.
    pub fn len(&self) -> usize {
        self.dates.len()
    }
    /// Returns `true` if nothing has been looked up.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
