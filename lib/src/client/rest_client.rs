//! The `reqwest` based implementation of the appliance `API`.

use super::*;
use reqwest::{
    // the tool is sequential so the blocking client is all that's needed.
    blocking::Client,
    Url,
};
use toolslib::stopwatch::StopWatch;

/// What the client needs to know about the appliance.
#[derive(Clone)]
pub struct ClientSettings {
    /// The appliance hostname (or address).
    pub host: String,
    /// The user name sent with each request.
    pub user: String,
    /// The user password sent with each request.
    pub password: String,
    /// When `false` the appliance certificate is not verified.
    pub verify_certs: bool,
}
impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("verify_certs", &self.verify_certs)
            .finish()
    }
}

/// The appliance REST client.
///
/// Credentials are sent as basic authentication with every request, there is no session.
pub struct RestClient {
    /// The HTTP client.
    client: Client,
    /// The appliance settings.
    settings: ClientSettings,
}
impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient").field("settings", &self.settings).finish()
    }
}
impl RestClient {
    /// Create the client.
    ///
    /// # Arguments
    ///
    /// * `settings` identifies the appliance and the credentials to use.
    pub fn new(settings: ClientSettings) -> Result<Self> {
        if settings.host.is_empty() {
            return Err(Error::from("The appliance hostname cannot be empty."));
        }
        // requests supply their own timeout, the search has none.
        let client = Client::builder()
            .danger_accept_invalid_certs(!settings.verify_certs)
            .timeout(None::<std::time::Duration>)
            .build()?;
        Ok(Self { client, settings })
    }
    /// Build the request `URL`.
    ///
    /// # Arguments
    ///
    /// * `request` is the request that will be sent.
    pub fn url(&self, request: &ApiRequest) -> Result<Url> {
        let base = format!("https://{}/api/{}{}", self.settings.host, request.version, request.endpoint);
        let mut url = Url::parse(&base).map_err(|err| Error::Failed(format!("url: {base}: {err}")))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }
}
impl ApplianceApi for RestClient {
    fn get(&self, request: &ApiRequest) -> Result<Value> {
        let url = self.url(request)?;
        log::debug!("URL: {url}");
        let stopwatch = StopWatch::start_new();
        let mut builder = self.client.get(url).basic_auth(&self.settings.user, Some(&self.settings.password));
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        let response = builder.send()?;
        let status = response.status();
        let body = response.text()?;
        log::debug!("{request} {status} {} bytes in {stopwatch}", body.len());
        match status.is_success() {
            true => Ok(serde_json::from_str(&body)?),
            false => Err(Error::Failed(format!("{request}: {status}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(host: &str) -> Result<RestClient> {
        RestClient::new(ClientSettings {
            host: host.to_string(),
            user: "admin".to_string(),
            password: "secret".to_string(),
            verify_certs: false,
        })
    }

    #[test]
    fn url() {
        let client = client("cluster.example.com").unwrap();
        let request = ApiRequest::internal("/search").query("managed_id", "Fileset:::42").query("query_string", "*.txt");
        let url = client.url(&request).unwrap();
        assert_eq!(url.host_str(), Some("cluster.example.com"));
        assert_eq!(url.path(), "/api/internal/search");
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(query, request.query);
        let url = client.url(&ApiRequest::v1("/cluster/me")).unwrap();
        assert_eq!(url.as_str(), "https://cluster.example.com/api/v1/cluster/me");
    }

    #[test]
    fn empty_host() {
        assert!(client("").is_err());
    }

    #[test]
    fn password_hidden() {
        let client = client("cluster.example.com").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("secret"));
    }
}
