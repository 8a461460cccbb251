use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// The two upstream catalogs a lookup consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    GoogleBooks,
    OpenLibrary,
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Catalog::GoogleBooks => write!(f, "Google Books"),
            Catalog::OpenLibrary => write!(f, "Open Library"),
        }
    }
}

/// Errors that abort a lookup. No partial book is ever returned alongside one.
#[derive(Debug, Error)]
pub enum LookupError {
    /// A catalog answered with a non-success status. `payload` is its
    /// `error` object, untouched.
    #[error("{catalog} error ({status}): {payload}")]
    Catalog {
        catalog: Catalog,
        status: StatusCode,
        payload: Value,
    },

    /// The cover service answered with something other than 302 or 404.
    #[error("cover service failure{}: {message}", .status.map(|s| format!(" ({})", s)).unwrap_or_default())]
    CoverTransport {
        status: Option<StatusCode>,
        message: String,
    },

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("could not decode {catalog} response: {source}")]
    Json {
        catalog: Catalog,
        source: serde_json::Error,
    },

    #[error("not a valid ISBN: {0:?}")]
    InvalidIsbn(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl LookupError {
    pub fn transport(url: &str, err: impl fmt::Display) -> Self {
        LookupError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    /// Builds a catalog error from a failed response body, keeping the
    /// embedded `error` object when the body has one.
    pub fn catalog(catalog: Catalog, status: StatusCode, body: &str) -> Self {
        let payload = match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(mut map)) => match map.remove("error") {
                Some(error) => error,
                None => Value::Object(map),
            },
            Ok(other) => other,
            Err(_) => Value::String(body.to_string()),
        };
        LookupError::Catalog {
            catalog,
            status,
            payload,
        }
    }
}
