//! The HTTP seam. Every status comes back as data so callers branch on it
//! instead of on errors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, redirect, Client, StatusCode};

use crate::config::Config;
use crate::error::LookupError;

#[doc(hidden)]
pub mod mock;

#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn json(status: StatusCode, body: impl Into<String>) -> Self {
        HttpResponse {
            status,
            location: None,
            body: body.into(),
        }
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        HttpResponse {
            status: StatusCode::FOUND,
            location: Some(location.into()),
            body: String::new(),
        }
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Fetches `url`, following redirects, and reads the body.
    async fn get(&self, url: &str) -> Result<HttpResponse, LookupError>;

    /// A `HEAD` request for `url` with redirect following disabled.
    async fn probe(&self, url: &str) -> Result<HttpResponse, LookupError>;
}

pub struct ReqwestTransport {
    client: Client,
    probe_client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &Config) -> Result<Self, LookupError> {
        let client = Self::builder(config)
            .build()
            .map_err(|e| LookupError::Config(e.to_string()))?;
        let probe_client = Self::builder(config)
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| LookupError::Config(e.to_string()))?;
        Ok(ReqwestTransport {
            client,
            probe_client,
        })
    }

    fn probe_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.probe_client.head(url)
    }

    fn builder(config: &Config) -> reqwest::ClientBuilder {
        let builder = Client::builder().user_agent(config.user_agent.as_str());
        match config.request_timeout_secs {
            Some(secs) => builder.timeout(Duration::from_secs(secs)),
            None => builder,
        }
    }
}

fn location(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, LookupError> {
        tracing::debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::transport(url, e))?;
        let status = response.status();
        let location = location(&response);
        let body = response
            .text()
            .await
            .map_err(|e| LookupError::transport(url, e))?;
        Ok(HttpResponse {
            status,
            location,
            body,
        })
    }

    async fn probe(&self, url: &str) -> Result<HttpResponse, LookupError> {
        tracing::debug!(url, "probe");
        let response = self
            .probe_request(url)
            .send()
            .await
            .map_err(|e| LookupError::transport(url, e))?;
        Ok(HttpResponse {
            status: response.status(),
            location: location(&response),
            body: String::new(),
        })
    }
}
