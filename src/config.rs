//! Endpoint configuration for the catalogs and the cover service.

use std::env;

use crate::error::LookupError;

pub const GOOGLE_BOOKS_URL_VAR: &str = "ISBN_LOOKUP_GOOGLE_BOOKS_URL";
pub const OPEN_LIBRARY_URL_VAR: &str = "ISBN_LOOKUP_OPEN_LIBRARY_URL";
pub const COVERS_URL_VAR: &str = "ISBN_LOOKUP_COVERS_URL";
pub const GOOGLE_BOOKS_KEY_VAR: &str = "ISBN_LOOKUP_GOOGLE_BOOKS_KEY";
pub const TIMEOUT_VAR: &str = "ISBN_LOOKUP_TIMEOUT_SECS";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Base host of the primary catalog; `/v1/volumes` is appended.
    pub google_books_url: String,
    /// Base host of the secondary catalog; `/isbn/{isbn}.json` is appended.
    pub open_library_url: String,
    pub covers_url: String,
    pub google_books_api_key: Option<String>,
    pub user_agent: String,
    /// Left to the transport; `None` means no timeout.
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            google_books_url: "https://www.googleapis.com/books".to_string(),
            open_library_url: "https://openlibrary.org".to_string(),
            covers_url: "https://covers.openlibrary.org".to_string(),
            google_books_api_key: None,
            user_agent: concat!("isbn_lookup/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Defaults overlaid with any `ISBN_LOOKUP_*` variables from the process
    /// environment.
    pub fn from_env() -> Result<Config, LookupError> {
        Config::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(var: F) -> Result<Config, LookupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(url) = var(GOOGLE_BOOKS_URL_VAR) {
            config.google_books_url = url;
        }
        if let Some(url) = var(OPEN_LIBRARY_URL_VAR) {
            config.open_library_url = url;
        }
        if let Some(url) = var(COVERS_URL_VAR) {
            config.covers_url = url;
        }
        config.google_books_api_key = var(GOOGLE_BOOKS_KEY_VAR).filter(|key| !key.is_empty());
        if let Some(secs) = var(TIMEOUT_VAR) {
            let secs = secs.trim().parse::<u64>().map_err(|_| {
                LookupError::Config(format!("{} must be a whole number of seconds, got {:?}", TIMEOUT_VAR, secs))
            })?;
            config.request_timeout_secs = Some(secs);
        }
        Ok(config.trimmed())
    }

    /// Strips trailing slashes so endpoint paths can be appended verbatim.
    pub fn trimmed(mut self) -> Config {
        for url in [
            &mut self.google_books_url,
            &mut self.open_library_url,
            &mut self.covers_url,
        ] {
            let len = url.trim_end_matches('/').len();
            url.truncate(len);
        }
        self
    }
}
