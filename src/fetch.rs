use std::time::Duration;

use reqwest::Proxy;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::FailureCode;
use crate::error::ScraperError;

const PAGE_USER_AGENT: &str = "Mozilla/5.0";
const PDF_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub body: String,
    pub url: String,
}

pub trait Fetcher: Send + Sync {
    fn fetch_page(&self, url: &str) -> Result<FetchedPage, FailureCode>;
    fn fetch_binary(&self, url: &str) -> Result<Vec<u8>, FailureCode>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub proxy: Option<String>,
    pub accept_invalid_certs: bool,
    pub timeout_secs: Option<u64>,
}

#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &TransportConfig) -> Result<Self, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(PAGE_USER_AGENT));
        let mut builder = Client::builder().default_headers(headers);

        if let Some(endpoint) = config.proxy.as_deref().filter(|p| !p.trim().is_empty()) {
            let proxy = Proxy::all(endpoint).map_err(|err| ScraperError::InvalidProxy {
                endpoint: endpoint.to_string(),
                message: err.to_string(),
            })?;
            builder = builder.proxy(proxy);
        }
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if config.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|err| ScraperError::Http(err.to_string()))?;
        Ok(Self { client })
    }

    fn handle_status(response: Response) -> Result<Response, FailureCode> {
        if response.status().is_success() {
            return Ok(response);
        }
        Err(FailureCode::Status(response.status().as_u16()))
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_page(&self, url: &str) -> Result<FetchedPage, FailureCode> {
        debug!(%url, "requesting page");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| FailureCode::Message(err.to_string()))?;
        let response = Self::handle_status(response)?;
        let resolved = response.url().to_string();
        let body = response
            .text()
            .map_err(|err| FailureCode::Message(err.to_string()))?;
        Ok(FetchedPage {
            body,
            url: resolved,
        })
    }

    fn fetch_binary(&self, url: &str) -> Result<Vec<u8>, FailureCode> {
        debug!(%url, "requesting document");
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, PDF_USER_AGENT)
            .header(ACCEPT, "application/pdf")
            .send()
            .map_err(|err| FailureCode::Message(err.to_string()))?;
        let response = Self::handle_status(response)?;
        let bytes = response
            .bytes()
            .map_err(|err| FailureCode::Message(err.to_string()))?;
        Ok(bytes.to_vec())
    }
}
