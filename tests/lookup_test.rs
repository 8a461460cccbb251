use isbn_lookup::cover::cover_endpoint;
use isbn_lookup::google_books_api::volumes_url;
use isbn_lookup::open_library_api::edition_url;
use isbn_lookup::transport::mock::{Call, MockTransport};
use isbn_lookup::transport::HttpResponse;
use isbn_lookup::{db, Author, BookLookup, Config, LookupError};
use reqwest::StatusCode;
use serde_json::json;

fn config() -> Config {
    Config {
        google_books_url: "http://books.test/".to_string(),
        open_library_url: "http://ol.test".to_string(),
        covers_url: "http://covers.test".to_string(),
        ..Config::default()
    }
    .trimmed()
}

fn ok(body: serde_json::Value) -> HttpResponse {
    HttpResponse::json(StatusCode::OK, body.to_string())
}

#[tokio::test]
async fn google_books_result_is_authoritative() {
    let config = config();
    let isbn = "9780743273565";
    let transport = MockTransport::new()
        .respond(
            &volumes_url(&config, isbn).unwrap(),
            ok(json!({
                "totalItems": 1,
                "items": [{"volumeInfo": {
                    "title": "The Great Gatsby",
                    "description": "Jazz age.",
                    "pageCount": 180,
                    "authors": ["F. Scott Fitzgerald"],
                    "industryIdentifiers": [{"type": "ISBN_13", "identifier": isbn}],
                    "imageLinks": {"thumbnail": "http://x/thumb.jpg"}
                }}]
            })),
        )
        .respond(
            &edition_url(&config, isbn),
            ok(json!({
                "title": "Great Gatsby",
                "isbn_10": ["0743273567"],
                "isbn_13": ["9999999999999"]
            })),
        );
    let lookup = BookLookup::new(transport, config);

    let book = lookup.lookup("978-0-7432-7356-5").await.unwrap();
    assert_eq!(book.title, "Great Gatsby, The");
    assert_eq!(book.description.as_deref(), Some("Jazz age."));
    assert_eq!(book.page_count, Some(180));
    assert_eq!(book.isbn13.as_deref(), Some(isbn));
    assert_eq!(book.isbn10.as_deref(), Some("0743273567"));
    assert_eq!(book.thumbnail_url.as_deref(), Some("http://x/thumb.jpg"));
    assert_eq!(
        book.author,
        Some(Author {
            first_name: "F.".to_string(),
            last_name: "Scott".to_string()
        })
    );
    assert!(lookup.transport().probes().is_empty());
}

#[tokio::test]
async fn open_library_fallback_with_cover_probe() {
    let config = config();
    let isbn = "9780441013593";
    let transport = MockTransport::new()
        .respond(&volumes_url(&config, isbn).unwrap(), ok(json!({"totalItems": 0})))
        .respond(
            &edition_url(&config, isbn),
            ok(json!({"title": "Dune", "number_of_pages": 412, "isbn_13": [isbn]})),
        )
        .respond(
            &cover_endpoint("http://covers.test", isbn, "S"),
            HttpResponse::redirect("https://ia.test/covers/9780441013593-S.jpg"),
        );
    let lookup = BookLookup::new(transport, config.clone());

    let book = lookup.lookup(isbn).await.unwrap();
    assert_eq!(book.title, "Dune");
    assert_eq!(book.page_count, Some(412));
    assert_eq!(book.isbn13.as_deref(), Some(isbn));
    assert_eq!(
        book.thumbnail_url.as_deref(),
        Some("https://ia.test/covers/9780441013593-M.jpg")
    );
    assert_eq!(book.author, None);

    let calls = lookup.transport().calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.contains(&Call::Get(volumes_url(&config, isbn).unwrap())));
    assert!(calls.contains(&Call::Get(edition_url(&config, isbn))));
    assert_eq!(
        calls.last(),
        Some(&Call::Probe(cover_endpoint("http://covers.test", isbn, "S")))
    );
}

#[tokio::test]
async fn secondary_failure_aborts_lookup() {
    let config = config();
    let isbn = "9780743273565";
    let transport = MockTransport::new()
        .respond(
            &volumes_url(&config, isbn).unwrap(),
            ok(json!({"totalItems": 1, "items": [{"volumeInfo": {"title": "X"}}]})),
        )
        .respond(
            &edition_url(&config, isbn),
            HttpResponse::json(StatusCode::NOT_FOUND, r#"{"error": "notfound"}"#),
        );
    let lookup = BookLookup::new(transport, config);

    match lookup.lookup(isbn).await {
        Err(LookupError::Catalog { payload, .. }) => assert_eq!(payload, json!("notfound")),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn primary_transport_failure_aborts_lookup() {
    let config = config();
    let isbn = "9780743273565";
    let transport = MockTransport::new()
        .fail(&volumes_url(&config, isbn).unwrap(), "connection reset")
        .respond(&edition_url(&config, isbn), ok(json!({"title": "X"})));
    let lookup = BookLookup::new(transport, config);

    assert!(matches!(
        lookup.lookup(isbn).await,
        Err(LookupError::Transport { .. })
    ));
}

#[tokio::test]
async fn invalid_isbn_makes_no_requests() {
    let lookup = BookLookup::new(MockTransport::new(), config());
    assert!(matches!(
        lookup.lookup("not-an-isbn").await,
        Err(LookupError::InvalidIsbn(_))
    ));
    assert!(lookup.transport().calls().is_empty());
}

#[tokio::test]
async fn resolved_book_can_be_stored() {
    let config = config();
    let isbn = "9780441013593";
    let transport = MockTransport::new()
        .respond(&volumes_url(&config, isbn).unwrap(), ok(json!({"totalItems": 0})))
        .respond(
            &edition_url(&config, isbn),
            ok(json!({"title": "Dune", "isbn_13": [isbn]})),
        );
    let lookup = BookLookup::new(transport, config);
    let book = lookup.lookup(isbn).await.unwrap();

    let conn = rusqlite::Connection::open_in_memory().unwrap();
    db::create_schema(&conn).unwrap();
    db::insert_book(&conn, &book).unwrap();
    assert_eq!(db::get_book_by_isbn13(&conn, isbn).unwrap(), Some(book));
}
