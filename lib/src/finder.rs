//! Runs a file search from start to finish.

use super::*;
use crate::{
    client::{fetch, ApiRequest},
    entities::Cluster,
    fields::Field,
    prompt::Prompter,
    report::{FileReport, VersionSelector},
    resolve::{resolve_fileset, BackupTarget},
    search::search_fileset,
    timestamp::parse_timezone,
};
use chrono_tz::Tz;
use std::{io::Write, time::Duration};
use toolslib::stopwatch::StopWatch;

/// The default timeout for appliance requests, the search is not bounded.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// What to look for and how to report it.
#[derive(Debug, Clone)]
pub struct FindCriteria {
    /// The host or share that was backed up.
    pub target: BackupTarget,
    /// The fileset name, the user is asked if it is needed and not known.
    pub fileset: Option<String>,
    /// The file name pattern.
    pub pattern: String,
    /// The fields that are reported.
    pub fields: Vec<Field>,
    /// The field separator.
    pub delimiter: String,
    /// Which file version is reported.
    pub selector: VersionSelector,
    /// The timeout for appliance requests other than the search.
    pub timeout: Duration,
}

/// Get the cluster timezone.
///
/// # Arguments
///
/// * `api` is the appliance `API`.
/// * `timeout` bounds the request.
pub fn cluster_timezone(api: &dyn ApplianceApi, timeout: Duration) -> Result<Tz> {
    let cluster: Cluster = fetch(api, &ApiRequest::v1("/cluster/me").timeout(timeout))?;
    log::debug!("cluster {} timezone {}", cluster.id.as_deref().unwrap_or("?"), cluster.timezone.timezone);
    parse_timezone(&cluster.timezone.timezone)
}

/// Find files in a fileset and write a line for each one.
///
/// The writer is opened only after the search has finished, a target that cannot be found
/// leaves an existing report alone. The number of lines written is returned.
///
/// # Arguments
///
/// * `api` is the appliance `API`.
/// * `criteria` has what to look for and how to report it.
/// * `prompter` is used if the user has to pick a fileset.
/// * `open_writer` opens where the report lines are written.
pub fn find_files<W, F>(
    api: &dyn ApplianceApi,
    criteria: &FindCriteria,
    prompter: &mut dyn Prompter,
    open_writer: F,
) -> Result<usize>
where
    W: Write,
    F: FnOnce() -> Result<W>,
{
    let stopwatch = StopWatch::start_new();
    let tz = cluster_timezone(api, criteria.timeout)?;
    log::debug!("searching {} ({}) for '{}'", criteria.target, criteria.target.host(), criteria.pattern);
    let fileset_id = resolve_fileset(api, &criteria.target, criteria.fileset.as_deref(), prompter, criteria.timeout)?;
    let pages = search_fileset(api, &fileset_id, &criteria.pattern)?;
    log::info!("{} search pages for '{}' in {stopwatch}", pages.len(), criteria.pattern);
    let mut report = FileReport::new(api, tz, criteria.fields.clone(), &criteria.delimiter, criteria.timeout)
        .with_selector(criteria.selector);
    let mut writer = open_writer()?;
    let lines = report.write_pages(&pages, &mut writer)?;
    log::info!("{lines} files reported in {stopwatch}");
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockApi, ScriptedPrompter};
    use serde_json::json;

    #[test]
    fn timezone() {
        let api = MockApi::default().with("/v1/cluster/me", json!({"id": "c1", "timezone": {"timezone": "America/Chicago"}}));
        assert_eq!(cluster_timezone(&api, DEFAULT_TIMEOUT).unwrap(), Tz::America__Chicago);
        assert_eq!(api.requests()[0].timeout, Some(DEFAULT_TIMEOUT));
        let api = MockApi::default().with("/v1/cluster/me", json!({"timezone": {"timezone": "Nowhere"}}));
        assert!(cluster_timezone(&api, DEFAULT_TIMEOUT).is_err());
    }

    #[test]
    fn host_not_found() {
        let api = MockApi::default()
            .with("/v1/cluster/me", json!({"timezone": {"timezone": "UTC"}}))
            .with("/v1/host?name=web01", json!({"data": []}));
        let criteria = FindCriteria {
            target: BackupTarget::Host("web01".to_string()),
            fileset: None,
            pattern: "*".to_string(),
            fields: vec![Field::Name],
            delimiter: ",".to_string(),
            selector: VersionSelector::Latest,
            timeout: DEFAULT_TIMEOUT,
        };
        let mut opened = false;
        let open_writer = || {
            opened = true;
            Ok(Vec::<u8>::new())
        };
        let error = find_files(&api, &criteria, &mut ScriptedPrompter::default(), open_writer).unwrap_err();
        assert!(error.is_not_found());
        assert!(!opened);
    }
}
