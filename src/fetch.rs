use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::error::{Result, ScrapeError};

const USER_AGENT: &str = concat!("boxd_awards/", env!("CARGO_PKG_VERSION"));

/// Blocking page source. Every stage reads the site through this.
pub trait Fetch {
    fn get(&self, url: &str) -> Result<String>;
}

/// Plain GET over a single reused client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<String> {
        debug!(url, "GET");
        let http_err = |source: reqwest::Error| ScrapeError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().map_err(http_err)
    }
}
