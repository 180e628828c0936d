//! Remote external files
//!
//! A remote reference is an `http` or `https` URL. Its body is fetched with a
//! single blocking GET through [`HttpOperations`]; there is no retry.

use log::warn;
use std::time::Duration;
use url::Url;

use crate::defaults;
use crate::error::{Error, Result};

/// URL schemes accepted for remote references.
pub const ACCEPTED_SCHEMES: &[&str] = &["http", "https"];

/// Trait for HTTP operations - allows mocking in tests
pub trait HttpOperations: Send + Sync {
    /// Performs a GET request and returns the raw response body.
    ///
    /// Non-success status codes are errors.
    fn get(&self, url: &Url) -> Result<Vec<u8>>;
}

/// The default implementation of `HttpOperations`, backed by a blocking
/// `reqwest` client.
pub struct DefaultHttpOperations {
    client: reqwest::blocking::Client,
}

impl DefaultHttpOperations {
    /// Creates a client whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(defaults::user_agent())
            .build()
            .map_err(|e| Error::Network {
                url: String::new(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self::with_client(client))
    }

    /// Wraps an already configured client.
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl HttpOperations for DefaultHttpOperations {
    fn get(&self, url: &Url) -> Result<Vec<u8>> {
        self.client
            .get(url.clone())
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.bytes())
            .map(|body| body.to_vec())
            .map_err(|e| Error::Network {
                url: url.to_string(),
                message: e.to_string(),
            })
    }
}

/// A reference to a file served over the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    location: String,
    url: Url,
}

impl RemoteFile {
    /// Parses `location` as a remote reference.
    ///
    /// Returns `None` if it is not an absolute URL with an accepted scheme
    /// and a host.
    pub fn parse(location: &str) -> Option<Self> {
        let url = Url::parse(location).ok()?;

        if !ACCEPTED_SCHEMES.contains(&url.scheme()) || url.host_str().is_none() {
            return None;
        }

        Some(Self {
            location: location.to_string(),
            url,
        })
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Fetches the raw body of this file.
    ///
    /// Transport failures are reported as an `Error::File` naming this
    /// reference. The body is not decoded here.
    pub fn content(&self, http: &dyn HttpOperations) -> Result<Vec<u8>> {
        http.get(&self.url).map_err(|e| {
            warn!("{}: {}", self.location, e);
            Error::file(&self.location)
        })
    }
}
