// src/core/net.rs
// Blocking HTTP GET. One request at a time; callers pace themselves.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use tracing::debug;

use crate::config::consts::{REFERER as REFERER_VALUE, USER_AGENT};
use crate::config::ScrapeOptions;
use crate::error::{Result, ScrapeError};

/// "Fetch URL, return body or failure." Everything that talks to the network
/// goes through this, so tests can hand in canned pages.
pub trait Fetch {
    fn get(&self, url: &str) -> Result<String>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Fails with `ClientUnavailable` when the HTTP stack cannot be set up
    /// (TLS backend, system config). Callers treat that as fatal.
    pub fn new(opts: &ScrapeOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static(REFERER_VALUE));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(opts.timeout_secs))
            .build()
            .map_err(ScrapeError::ClientUnavailable)?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<String> {
        debug!("GET {url}");
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Status { status: status.as_u16(), url: url.to_string() });
        }
        Ok(resp.text()?)
    }
}
