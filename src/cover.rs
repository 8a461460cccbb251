//! Cover lookup against the Open Library covers service.
//!
//! The service answers a `?default=false` request with a 302 to the concrete
//! image when a cover exists and a 404 when it does not. We probe the small
//! size and rewrite the redirect target to the medium size, which confirms
//! the cover exists without downloading any image.

use reqwest::{StatusCode, Url};

use crate::transport::{HttpResponse, HttpTransport};

const PROBE_SIZE: &str = "S";
const RESULT_SIZE: &str = "M";

#[derive(Clone, Debug, PartialEq)]
pub enum CoverProbeResult {
    Found { image_url: String },
    NotFound,
    TransportError {
        status: Option<StatusCode>,
        message: String,
    },
}

pub fn cover_endpoint(covers_url: &str, isbn: &str, size: &str) -> String {
    format!("{}/b/isbn/{}-{}.jpg?default=false", covers_url, isbn, size)
}

pub struct CoverResolver<'a, T: HttpTransport + ?Sized> {
    transport: &'a T,
    covers_url: &'a str,
}

impl<'a, T: HttpTransport + ?Sized> CoverResolver<'a, T> {
    pub fn new(transport: &'a T, covers_url: &'a str) -> Self {
        CoverResolver {
            transport,
            covers_url,
        }
    }

    /// One round trip, no retries.
    pub async fn resolve(&self, isbn13: &str) -> CoverProbeResult {
        let url = cover_endpoint(self.covers_url, isbn13, PROBE_SIZE);
        match self.transport.probe(&url).await {
            Ok(response) => classify(&url, &response),
            Err(err) => CoverProbeResult::TransportError {
                status: None,
                message: err.to_string(),
            },
        }
    }
}

/// Interprets a probe response by status alone.
pub fn classify(probe_url: &str, response: &HttpResponse) -> CoverProbeResult {
    match response.status {
        StatusCode::FOUND => match &response.location {
            Some(location) => CoverProbeResult::Found {
                image_url: upsize(&absolute(probe_url, location)),
            },
            None => CoverProbeResult::TransportError {
                status: Some(response.status),
                message: "redirect without a Location header".to_string(),
            },
        },
        StatusCode::NOT_FOUND => CoverProbeResult::NotFound,
        status if status.is_success() => CoverProbeResult::NotFound,
        status => CoverProbeResult::TransportError {
            status: Some(status),
            message: format!("unexpected response from {}", probe_url),
        },
    }
}

fn upsize(image_url: &str) -> String {
    image_url.replace(
        &format!("-{}.", PROBE_SIZE),
        &format!("-{}.", RESULT_SIZE),
    )
}

fn absolute(base: &str, location: &str) -> String {
    match Url::parse(base).and_then(|base| base.join(location)) {
        Ok(url) => url.to_string(),
        Err(_) => location.to_string(),
    }
}
