//! The client used to talk with the appliance REST `API`.

use super::*;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

pub use rest_client::{ClientSettings, RestClient};
mod rest_client;

/// The appliance publishes both a versioned and an internal `API`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    /// The public, versioned `API`.
    V1,
    /// The internal `API` (host shares and the file search live here).
    Internal,
}
impl ApiVersion {
    /// The path segment used for the `API` version.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::Internal => "internal",
        }
    }
}
impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A `GET` request against the appliance.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// The `API` the endpoint belongs to.
    pub version: ApiVersion,
    /// The endpoint path, always starting with `/`.
    pub endpoint: String,
    /// The query parameters in the order they were added.
    pub query: Vec<(String, String)>,
    /// How long to wait for the response, `None` waits forever.
    pub timeout: Option<Duration>,
}
impl ApiRequest {
    /// Create a request.
    ///
    /// # Arguments
    ///
    /// * `version` is the `API` the endpoint belongs to.
    /// * `endpoint` is the request path.
    pub fn new(version: ApiVersion, endpoint: &str) -> Self {
        let endpoint = match endpoint.starts_with('/') {
            true => endpoint.to_string(),
            false => format!("/{endpoint}"),
        };
        Self { version, endpoint, query: vec![], timeout: None }
    }
    /// Create a request for the versioned `API`.
    pub fn v1(endpoint: &str) -> Self {
        Self::new(ApiVersion::V1, endpoint)
    }
    /// Create a request for the internal `API`.
    pub fn internal(endpoint: &str) -> Self {
        Self::new(ApiVersion::Internal, endpoint)
    }
    /// Add a query parameter.
    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }
    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// The request as it would look in the `URL` path, without encoding.
impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}{}", self.version, self.endpoint)?;
        for (index, (name, value)) in self.query.iter().enumerate() {
            let separator = if index == 0 { '?' } else { '&' };
            write!(f, "{separator}{name}={value}")?;
        }
        Ok(())
    }
}

/// The internal `API` used to get data from the appliance.
pub trait ApplianceApi {
    /// Execute the request and return the response body.
    ///
    /// # Arguments
    ///
    /// * `request` identifies the endpoint, query, and timeout.
    fn get(&self, request: &ApiRequest) -> Result<Value>;
}

/// Execute a request and deserialize the response.
///
/// # Arguments
///
/// * `api` is the appliance `API`.
/// * `request` is the request that will be executed.
pub fn fetch<T: DeserializeOwned>(api: &dyn ApplianceApi, request: &ApiRequest) -> Result<T> {
    let value = api.get(request)?;
    serde_json::from_value(value).map_err(|err| Error::Failed(format!("json: {request}: {err}")))
}
