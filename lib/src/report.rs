//! Formatting file versions.

use super::*;
use crate::{
    entities::{FileVersion, SearchFile, SearchPage},
    fields::Field,
    snapshots::SnapshotDates,
    timestamp::to_local,
};
use chrono_tz::Tz;
use std::{io::Write, time::Duration};

/// Which version of a file is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VersionSelector {
    /// The version captured by the newest snapshot.
    #[default]
    Latest,
    /// The version captured by the oldest snapshot.
    Earliest,
}
impl VersionSelector {
    /// Pick a version of the file.
    ///
    /// The appliance lists versions oldest snapshot first. The modification time plays no part,
    /// a restored file can carry an older time in a newer snapshot. `None` is returned if the
    /// file has no versions.
    ///
    /// # Arguments
    ///
    /// * `versions` are the file versions.
    pub fn select<'v>(&self, versions: &'v [FileVersion]) -> Option<&'v FileVersion> {
        match self {
            VersionSelector::Latest => versions.last(),
            VersionSelector::Earliest => versions.first(),
        }
    }
}

/// Formats search results one line per file.
///
/// The report owns the snapshot date cache so it lasts for the whole run.
pub struct FileReport<'a> {
    /// The appliance `API`, used to get snapshot dates.
    api: &'a dyn ApplianceApi,
    /// The cluster timezone.
    tz: Tz,
    /// The snapshot backup dates that have been looked up.
    snapshot_dates: SnapshotDates,
    /// The fields that are reported.
    fields: Vec<Field>,
    /// The field separator.
    delimiter: String,
    /// The file version that is reported.
    selector: VersionSelector,
}
impl<'a> FileReport<'a> {
    /// Create the report.
    ///
    /// # Arguments
    ///
    /// * `api` is the appliance `API`.
    /// * `tz` is the cluster timezone.
    /// * `fields` are the fields that will be reported, in order.
    /// * `delimiter` separates the fields.
    /// * `timeout` bounds the snapshot requests.
    pub fn new(api: &'a dyn ApplianceApi, tz: Tz, fields: Vec<Field>, delimiter: &str, timeout: Duration) -> Self {
        if fields.iter().any(Field::needs_snapshot) {
            log::debug!("backup dates will be looked up");
        }
        Self {
            api,
            tz,
            snapshot_dates: SnapshotDates::new(timeout),
            fields,
            delimiter: delimiter.to_string(),
            selector: VersionSelector::default(),
        }
    }
    /// Set which file version is reported.
    pub fn with_selector(mut self, selector: VersionSelector) -> Self {
        self.selector = selector;
        self
    }
    /// Format the file, `None` is returned if the file has no versions.
    ///
    /// # Arguments
    ///
    /// * `file` is the search result that will be formatted.
    pub fn format_file(&mut self, file: &SearchFile) -> Result<Option<String>> {
        let version = match self.selector.select(&file.file_versions) {
            Some(version) => version,
            None => {
                log::debug!("{} has no versions", file.path);
                return Ok(None);
            }
        };
        let mut values = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let value = match field {
                Field::Name => file.path.clone(),
                Field::Size => version.size.to_string(),
                Field::Mtime => to_local(&version.last_modified, &self.tz)?,
                Field::Backup => self.snapshot_dates.backup_date(self.api, &version.snapshot_id, &self.tz)?.to_string(),
                Field::Type => version.file_mode.clone(),
                Field::Location => version.location().to_string(),
            };
            values.push(value);
        }
        Ok(Some(values.join(&self.delimiter)))
    }
    /// Write a line for each file in the search results.
    ///
    /// The number of lines written is returned.
    ///
    /// # Arguments
    ///
    /// * `pages` are the search results.
    /// * `writer` is where the lines are written.
    pub fn write_pages(&mut self, pages: &[SearchPage], writer: &mut dyn Write) -> Result<usize> {
        let mut lines = 0;
        for page in pages {
            for file in &page.data {
                if let Some(line) = self.format_file(file)? {
                    writeln!(writer, "{line}")?;
                    lines += 1;
                }
            }
        }
        writer.flush()?;
        log::debug!("{lines} files reported, {} snapshots looked up", self.snapshot_dates.len());
        Ok(lines)
    }
}
