use serde::Deserialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::{Catalog, LookupError};
use crate::transport::HttpTransport;

/// An Open Library edition as served by `/isbn/{isbn}.json`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EditionRecord {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    /// Usually `{"type": "/type/text", "value": ...}`; kept loose so an odd
    /// shape reads as no description rather than a failed record.
    pub description: Option<Value>,
    pub number_of_pages: Option<u32>,
    pub isbn_13: Option<Vec<String>>,
    pub isbn_10: Option<Vec<String>>,
}

impl EditionRecord {
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_ref()?.get("value")?.as_str()
    }

    pub fn first_isbn_13(&self) -> Option<&str> {
        self.isbn_13.as_ref()?.first().map(String::as_str)
    }

    pub fn first_isbn_10(&self) -> Option<&str> {
        self.isbn_10.as_ref()?.first().map(String::as_str)
    }
}

pub fn edition_url(config: &Config, isbn: &str) -> String {
    format!("{}/isbn/{}.json", config.open_library_url, isbn)
}

/// There is no empty result here: an unknown ISBN comes back as a non-success
/// status and is reported as a catalog error.
pub async fn fetch_secondary<T: HttpTransport + ?Sized>(
    transport: &T,
    config: &Config,
    isbn: &str,
) -> Result<EditionRecord, LookupError> {
    let url = edition_url(config, isbn);
    let response = transport.get(&url).await?;
    if !response.status.is_success() {
        return Err(LookupError::catalog(
            Catalog::OpenLibrary,
            response.status,
            &response.body,
        ));
    }
    let edition = serde_json::from_str(&response.body).map_err(|source| LookupError::Json {
        catalog: Catalog::OpenLibrary,
        source,
    })?;
    tracing::debug!(isbn, "Open Library answered");
    Ok(edition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;
    use crate::transport::HttpResponse;
    use reqwest::StatusCode;
    use serde_json::json;

    fn config() -> Config {
        Config {
            open_library_url: "http://ol.test".to_string(),
            ..Config::default()
        }
    }

    fn parse(body: serde_json::Value) -> EditionRecord {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn typed_description() {
        let edition = parse(json!({"description": {"type": "/type/text", "value": "Spice."}}));
        assert_eq!(edition.description_text(), Some("Spice."));
    }

    #[test]
    fn description_without_value() {
        let edition = parse(json!({"description": {"type": "/type/text"}}));
        assert_eq!(edition.description_text(), None);
    }

    #[test]
    fn bare_string_description_is_ignored() {
        let edition = parse(json!({"description": "Spice."}));
        assert_eq!(edition.description_text(), None);
    }

    #[test]
    fn non_text_description_value_is_ignored() {
        let edition = parse(json!({"title": "Dune", "description": {"value": 7}}));
        assert_eq!(edition.title.as_deref(), Some("Dune"));
        assert_eq!(edition.description_text(), None);
    }

    #[test]
    fn first_isbns() {
        let edition = parse(json!({"isbn_13": ["9780441013593", "9780441172719"], "isbn_10": []}));
        assert_eq!(edition.first_isbn_13(), Some("9780441013593"));
        assert_eq!(edition.first_isbn_10(), None);
    }

    #[tokio::test]
    async fn fetches_edition() {
        let config = config();
        let transport = MockTransport::new().respond(
            &edition_url(&config, "9780441013593"),
            HttpResponse::json(
                StatusCode::OK,
                json!({"title": "Dune", "number_of_pages": 412}).to_string(),
            ),
        );
        let edition = fetch_secondary(&transport, &config, "9780441013593")
            .await
            .unwrap();
        assert_eq!(edition.title.as_deref(), Some("Dune"));
        assert_eq!(edition.number_of_pages, Some(412));
    }

    #[tokio::test]
    async fn unknown_isbn_is_catalog_error() {
        let config = config();
        let transport = MockTransport::new().respond(
            &edition_url(&config, "0000000000"),
            HttpResponse::json(
                StatusCode::NOT_FOUND,
                r#"{"error": "notfound", "key": "/isbn/0000000000"}"#,
            ),
        );
        match fetch_secondary(&transport, &config, "0000000000").await {
            Err(LookupError::Catalog {
                catalog,
                status,
                payload,
            }) => {
                assert_eq!(catalog, Catalog::OpenLibrary);
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(payload, json!("notfound"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_json_error() {
        let config = config();
        let transport = MockTransport::new().respond(
            &edition_url(&config, "1"),
            HttpResponse::json(StatusCode::OK, "not json"),
        );
        assert!(matches!(
            fetch_secondary(&transport, &config, "1").await,
            Err(LookupError::Json {
                catalog: Catalog::OpenLibrary,
                ..
            })
        ));
    }
}
