//! In-memory [`HttpTransport`] for tests.
//!
//! Responses are registered per URL. Unregistered URLs answer 404, and every
//! request is recorded so tests can assert which endpoints were hit.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{HttpResponse, HttpTransport};
use crate::error::LookupError;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Get(String),
    Probe(String),
}

#[derive(Default)]
pub struct MockTransport {
    responses: HashMap<String, Result<HttpResponse, String>>,
    calls: Mutex<Vec<Call>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, response: HttpResponse) -> Self {
        self.responses.insert(url.to_string(), Ok(response));
        self
    }

    /// Makes `url` fail below HTTP, as a refused connection would.
    pub fn fail(mut self, url: &str, message: &str) -> Self {
        self.responses
            .insert(url.to_string(), Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn probes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Probe(url) => Some(url),
                Call::Get(_) => None,
            })
            .collect()
    }

    fn answer(&self, call: Call, url: &str) -> Result<HttpResponse, LookupError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        match self.responses.get(url) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(message)) => Err(LookupError::transport(url, message)),
            None => Ok(HttpResponse::json(StatusCode::NOT_FOUND, "")),
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, LookupError> {
        self.answer(Call::Get(url.to_string()), url)
    }

    async fn probe(&self, url: &str) -> Result<HttpResponse, LookupError> {
        self.answer(Call::Probe(url.to_string()), url)
    }
}
