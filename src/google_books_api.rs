use reqwest::Url;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{Catalog, LookupError};
use crate::transport::HttpTransport;

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumesResponse {
    #[serde(default)]
    pub total_items: u32,
    #[serde(default)]
    pub items: Vec<Volume>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default)]
    pub volume_info: Option<VolumeInfo>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub page_count: Option<u32>,
    #[serde(default)]
    pub industry_identifiers: Vec<IndustryIdentifier>,
    #[serde(default)]
    pub authors: Vec<String>,
    pub image_links: Option<ImageLinks>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub small_thumbnail: Option<String>,
    pub thumbnail: Option<String>,
}

/// Outcome of a primary catalog query. An empty result set is a successful
/// "not found", not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimaryLookup {
    Found(VolumesResponse),
    Empty,
}

impl PrimaryLookup {
    pub fn from_response(response: VolumesResponse) -> PrimaryLookup {
        if response.total_items > 0 && !response.items.is_empty() {
            PrimaryLookup::Found(response)
        } else {
            PrimaryLookup::Empty
        }
    }
}

pub fn volumes_url(config: &Config, isbn: &str) -> Result<String, LookupError> {
    let mut params = vec![("q", format!("isbn:{}", isbn))];
    if let Some(key) = &config.google_books_api_key {
        params.push(("key", key.clone()));
    }
    let base = format!("{}/v1/volumes", config.google_books_url);
    let url = Url::parse_with_params(&base, &params)
        .map_err(|e| LookupError::Config(format!("bad Google Books URL {:?}: {}", base, e)))?;
    Ok(url.into())
}

pub async fn fetch_primary<T: HttpTransport + ?Sized>(
    transport: &T,
    config: &Config,
    isbn: &str,
) -> Result<PrimaryLookup, LookupError> {
    let url = volumes_url(config, isbn)?;
    let response = transport.get(&url).await?;
    if !response.status.is_success() {
        return Err(LookupError::catalog(
            Catalog::GoogleBooks,
            response.status,
            &response.body,
        ));
    }
    let volumes: VolumesResponse =
        serde_json::from_str(&response.body).map_err(|source| LookupError::Json {
            catalog: Catalog::GoogleBooks,
            source,
        })?;
    tracing::debug!(isbn, total_items = volumes.total_items, "Google Books answered");
    Ok(PrimaryLookup::from_response(volumes))
}
