// src/core/net.rs
// Blocking HTTP GET, one page fully read before the next request.

use std::time::Duration;

use tracing::info;
use url::Url;

use crate::config::consts::{REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::FetchError;

/// Raw outcome of one GET.
#[derive(Clone, Debug)]
pub struct Page {
    pub status: u16,
    pub body: String,
}

impl Page {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can retrieve a page. The pipeline only sees this trait, so
/// tests can serve canned HTML.
pub trait Fetch {
    fn get(&self, url: &Url) -> Result<Page, FetchError>;
}

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &Url) -> Result<Page, FetchError> {
        let transport = |source| FetchError::Transport { url: url.to_string(), source };

        let response = self.client.get(url.clone()).send().map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(transport)?;
        Ok(Page { status, body })
    }
}

/// GET `url` and return its body; anything but a 2xx is fatal.
pub fn get_document(fetcher: &dyn Fetch, url: &Url) -> Result<String, FetchError> {
    info!("GET {url}");
    let page = fetcher.get(url)?;
    if !page.ok() {
        return Err(FetchError::Status { url: url.to_string(), status: page.status });
    }
    Ok(page.body)
}
