//! Turning a host or host share into a fileset id.

use super::*;
use crate::{
    client::{fetch, ApiRequest},
    entities::{Fileset, Host, HostShare, Listing},
    prompt::Prompter,
};
use std::{str::FromStr, time::Duration};

/// What was backed up, a physical host or a network share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupTarget {
    /// A physical host.
    Host(String),
    /// A network share exported by a host.
    Share {
        /// The host exporting the share.
        host: String,
        /// The share export point.
        share: String,
    },
}
impl BackupTarget {
    /// The host name of the backup target.
    pub fn host(&self) -> &str {
        match self {
            BackupTarget::Host(host) => host,
            BackupTarget::Share { host, .. } => host,
        }
    }
}
/// Parse `host` or `host:share`.
impl FromStr for BackupTarget {
    type Err = String;
    fn from_str(target: &str) -> result::Result<Self, Self::Err> {
        match target.split_once(':') {
            None if target.is_empty() => Err("The backup target cannot be empty.".to_string()),
            None => Ok(BackupTarget::Host(target.to_string())),
            Some((host, _)) if host.is_empty() => Err(format!("{target}: the host name is missing.")),
            Some((host, share)) => Ok(BackupTarget::Share { host: host.to_string(), share: share.to_string() }),
        }
    }
}
impl fmt::Display for BackupTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupTarget::Host(host) => write!(f, "{host}"),
            BackupTarget::Share { host, share } => write!(f, "{host}:{share}"),
        }
    }
}

/// The user name and password used with the appliance.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The user name.
    pub user: String,
    /// The password.
    pub password: String,
}
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").field("user", &self.user).finish_non_exhaustive()
    }
}
/// Parse `user:password`, the password may contain colons.
impl FromStr for Credentials {
    type Err = String;
    fn from_str(creds: &str) -> result::Result<Self, Self::Err> {
        match creds.split_once(':') {
            Some((user, password)) if !user.is_empty() => {
                Ok(Credentials { user: user.to_string(), password: password.to_string() })
            }
            _ => Err("Credentials must be user:password.".to_string()),
        }
    }
}

/// Get the appliance id of the backup target.
///
/// # Arguments
///
/// * `api` is the appliance `API`.
/// * `target` is the host or share.
/// * `timeout` bounds the request.
pub fn resolve_target_id(api: &dyn ApplianceApi, target: &BackupTarget, timeout: Duration) -> Result<String> {
    let target_id = match target {
        BackupTarget::Share { host, share } => {
            let request = ApiRequest::internal("/host/share").timeout(timeout);
            let shares: Listing<HostShare> = fetch(api, &request)?;
            shares
                .data
                .into_iter()
                .find(|host_share| &host_share.hostname == host && &host_share.export_point == share)
                .map(|host_share| host_share.id)
                .ok_or_else(|| Error::not_found("Share not found"))?
        }
        BackupTarget::Host(host) => {
            let request = ApiRequest::v1("/host").query("name", host).timeout(timeout);
            let hosts: Listing<Host> = fetch(api, &request)?;
            let host = hosts.data.into_iter().next().ok_or_else(|| Error::not_found("Host not found"))?;
            log::debug!(
                "host {} OS type: {}",
                host.name.as_deref().unwrap_or("?"),
                host.operating_system_type.as_deref().unwrap_or("unknown")
            );
            host.id
        }
    };
    log::debug!("SH_ID: {target_id}");
    Ok(target_id)
}

/// Get the filesets that protect the backup target.
///
/// Shares are filtered by the fileset name on the appliance, hosts list all of their filesets.
///
/// # Arguments
///
/// * `api` is the appliance `API`.
/// * `target` is the host or share.
/// * `target_id` is the appliance id of the target.
/// * `fileset` is the fileset name if one was given.
/// * `timeout` bounds the request.
pub fn list_filesets(
    api: &dyn ApplianceApi,
    target: &BackupTarget,
    target_id: &str,
    fileset: Option<&str>,
    timeout: Duration,
) -> Result<Listing<Fileset>> {
    let request = match target {
        BackupTarget::Share { .. } => {
            ApiRequest::v1("/fileset").query("share_id", target_id).query("name", fileset.unwrap_or_default())
        }
        BackupTarget::Host(_) => ApiRequest::v1("/fileset").query("host_id", target_id),
    };
    let filesets: Listing<Fileset> = fetch(api, &request.timeout(timeout))?;
    log::debug!("{} filesets for {target}", filesets.count());
    Ok(filesets)
}

/// Pick the fileset that will be searched.
///
/// When a name is given it must match exactly. Otherwise a single fileset is used as is and the
/// user picks one when there are several. Bad selections are rejected until a valid one is
/// entered.
///
/// # Arguments
///
/// * `filesets` are the candidate filesets.
/// * `fileset` is the fileset name if one was given.
/// * `prompter` is used to ask the user which fileset to use.
pub fn choose_fileset(filesets: &Listing<Fileset>, fileset: Option<&str>, prompter: &mut dyn Prompter) -> Result<String> {
    let fileset_id = match fileset.filter(|name| !name.is_empty()) {
        Some(name) => match filesets.data.iter().find(|candidate| candidate.name == name) {
            Some(candidate) => candidate.id.clone(),
            None => return Err(Error::not_found("Fileset not found")),
        },
        None => match filesets.data.len() {
            0 => return Err(Error::not_found("Fileset not found")),
            1 => filesets.data[0].id.clone(),
            count => {
                for (index, candidate) in filesets.data.iter().enumerate() {
                    prompter.show(&format!("{index}: {}", candidate.name))?;
                }
                loop {
                    let selection = prompter.read_line("Select Fileset: ")?;
                    match selection.trim().parse::<usize>() {
                        Ok(index) if index < count => break filesets.data[index].id.clone(),
                        _ => prompter.show("Invalid Entry")?,
                    }
                }
            }
        },
    };
    log::debug!("FS_ID: {fileset_id}");
    Ok(fileset_id)
}

/// Resolve the backup target to the id of the fileset that will be searched.
///
/// # Arguments
///
/// * `api` is the appliance `API`.
/// * `target` is the host or share.
/// * `fileset` is the fileset name if one was given.
/// * `prompter` is used to ask the user which fileset to use.
/// * `timeout` bounds each request.
pub fn resolve_fileset(
    api: &dyn ApplianceApi,
    target: &BackupTarget,
    fileset: Option<&str>,
    prompter: &mut dyn Prompter,
    timeout: Duration,
) -> Result<String> {
    let target_id = resolve_target_id(api, target, timeout)?;
    let filesets = list_filesets(api, target, &target_id, fileset, timeout)?;
    choose_fileset(&filesets, fileset, prompter)
}
