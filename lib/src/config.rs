//! The optional `TOML` configuration file.
//!
//! Everything in the file is optional and the command line always wins. A typical file looks
//! like this.
//!
//! ```toml
//! [appliance]
//! host = "cluster.example.com"
//! user = "admin"
//! timeout = 60
//! verify_certs = false
//!
//! [output]
//! format = "name,size,mtime,backup"
//! delimiter = ","
//! ```

use super::*;
use serde::Deserialize;
use std::{fs, path::Path, time::Duration};

/// The configuration file contents.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The appliance settings.
    pub appliance: ApplianceConfig,
    /// The report settings.
    pub output: OutputConfig,
}

/// The appliance settings.
#[derive(Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ApplianceConfig {
    /// The appliance hostname.
    pub host: Option<String>,
    /// The user name.
    pub user: Option<String>,
    /// The user password, prompting is preferred.
    pub password: Option<String>,
    /// The request timeout in seconds.
    pub timeout: Option<u64>,
    /// Verify the appliance certificate.
    pub verify_certs: Option<bool>,
}
impl fmt::Debug for ApplianceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplianceConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("timeout", &self.timeout)
            .field("verify_certs", &self.verify_certs)
            .finish()
    }
}

/// The report settings.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// The comma separated fields.
    pub format: Option<String>,
    /// The field separator.
    pub delimiter: Option<String>,
}

impl Config {
    /// Load the configuration file.
    ///
    /// # Arguments
    ///
    /// * `path` is the configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|err| Error::Failed(format!("{}: {err}", path.display())))?;
        let config = Self::parse(&contents)?;
        log::debug!("{}: {:?}", path.display(), config);
        Ok(config)
    }
    /// Parse the configuration.
    ///
    /// # Arguments
    ///
    /// * `contents` is the `TOML` text.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
    /// The request timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.appliance.timeout.map(Duration::from_secs)
    }
    /// Verify the appliance certificate, `false` unless configured.
    pub fn verify_certs(&self) -> bool {
        self.appliance.verify_certs.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn full() {
        let config = Config::parse(
            r#"
            [appliance]
            host = "cluster.example.com"
            user = "admin"
            password = "secret"
            timeout = 90
            verify_certs = true

            [output]
            format = "name,size"
            delimiter = "|"
            "#,
        )
        .unwrap();
        assert_eq!(config.appliance.host.as_deref(), Some("cluster.example.com"));
        assert_eq!(config.appliance.user.as_deref(), Some("admin"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(90)));
        assert!(config.verify_certs());
        assert_eq!(config.output.format.as_deref(), Some("name,size"));
        assert_eq!(config.output.delimiter.as_deref(), Some("|"));
        assert!(!format!("{:?}", config).contains("secret"));
    }

    #[test]
    fn empty() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.timeout(), None);
        assert!(!config.verify_certs());
    }

    #[test]
    fn malformed() {
        assert!(Config::parse("[appliance]\nhostname = \"x\"").is_err());
        assert!(Config::parse("[appliance]\ntimeout = \"soon\"").is_err());
    }

    #[test]
    fn load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rbkfind.toml");
        fs::write(&path, "[output]\ndelimiter = \";\"\n").unwrap();
        assert_eq!(Config::load(&path).unwrap().output.delimiter.as_deref(), Some(";"));
        assert!(Config::load(&dir.path().join("missing.toml")).is_err());
    }
}
