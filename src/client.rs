use log::debug;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Connection to one controller. Cheap to clone; every [`crate::System`] and
/// [`crate::Zone`] holds its own copy.
#[derive(Debug, Clone)]
pub struct SprinklerClient {
    http: reqwest::Client,
    host: String,
    check_toggle_status: bool,
}

impl SprinklerClient {
    /// Creates a client for `host` with the default settings.
    pub fn new(host: impl Into<String>) -> Result<SprinklerClient> {
        let config = ClientConfig {
            host: host.into(),
            ..ClientConfig::default()
        };
        SprinklerClient::from_config(&config)
    }

    pub fn from_config(config: &ClientConfig) -> Result<SprinklerClient> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(SprinklerClient {
            http: builder.build()?,
            host: config.host.trim_end_matches('/').to_string(),
            check_toggle_status: config.check_toggle_status,
        })
    }

    /// The controller base URL, without a trailing slash.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn checks_toggle_status(&self) -> bool {
        self.check_toggle_status
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.host, path)
    }

    /// GETs `path` and decodes the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::operation(format!("fetch {}", path), status));
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| Error::Decode { url, source })
    }

    /// Sends `body` as JSON and hands back the status; judging it is up to the caller.
    pub(crate) async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<StatusCode> {
        let url = self.url(path);
        debug!("{} {}", method, url);
        let response = self.http.request(method, &url).json(body).send().await?;
        Ok(response.status())
    }
}
