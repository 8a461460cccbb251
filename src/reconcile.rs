//! Field-by-field merge of the two catalog answers into one [`CanonicalBook`].
//!
//! Google Books wins whenever it returned at least one volume. Open Library
//! fills the record otherwise, and always backfills ISBNs that are still
//! unset. A cover probe runs last, only when neither catalog had a thumbnail.

use crate::book::{Author, CanonicalBook};
use crate::cover::{CoverProbeResult, CoverResolver};
use crate::error::LookupError;
use crate::google_books_api::{PrimaryLookup, VolumesResponse};
use crate::open_library_api::EditionRecord;
use crate::title::normalize_title;
use crate::transport::HttpTransport;

/// The pure part of reconciliation: everything except the cover probe.
pub fn merge(primary: &PrimaryLookup, secondary: &EditionRecord) -> CanonicalBook {
    let mut book = match primary {
        PrimaryLookup::Found(volumes) => from_primary(volumes),
        PrimaryLookup::Empty => from_secondary(secondary),
    };

    if book.isbn13.is_none() {
        book.isbn13 = secondary.first_isbn_13().map(str::to_string);
    }
    if book.isbn10.is_none() {
        book.isbn10 = secondary.first_isbn_10().map(str::to_string);
    }
    book
}

fn from_primary(volumes: &VolumesResponse) -> CanonicalBook {
    let info = volumes
        .items
        .first()
        .and_then(|item| item.volume_info.clone())
        .unwrap_or_default();

    // Any volume's thumbnail will do, earliest first.
    let thumbnail_url = volumes.items.iter().find_map(|item| {
        item.volume_info
            .as_ref()?
            .image_links
            .as_ref()?
            .thumbnail
            .clone()
    });

    let mut isbn10 = None;
    let mut isbn13 = None;
    for id in &info.industry_identifiers {
        if id.kind.eq_ignore_ascii_case("isbn_10") {
            isbn10 = Some(id.identifier.clone());
        }
        if id.kind.eq_ignore_ascii_case("isbn_13") {
            isbn13 = Some(id.identifier.clone());
        }
    }

    CanonicalBook {
        title: normalize_title(info.title.as_deref()).unwrap_or_default(),
        subtitle: info.subtitle.unwrap_or_default(),
        description: info.description,
        page_count: info.page_count,
        isbn10,
        isbn13,
        thumbnail_url,
        author: info.authors.first().map(|name| Author::from_full_name(name)),
    }
}

fn from_secondary(edition: &EditionRecord) -> CanonicalBook {
    CanonicalBook {
        title: edition.title.clone().unwrap_or_default(),
        subtitle: edition.subtitle.clone().unwrap_or_default(),
        description: edition.description_text().map(str::to_string),
        page_count: edition.number_of_pages.filter(|&pages| pages > 0),
        ..CanonicalBook::default()
    }
}

/// Merges both answers and, if no thumbnail turned up, asks the cover
/// service. A cover failure other than "not found" fails the whole call.
pub async fn reconcile<T: HttpTransport + ?Sized>(
    primary: &PrimaryLookup,
    secondary: &EditionRecord,
    covers: &CoverResolver<'_, T>,
) -> Result<CanonicalBook, LookupError> {
    let mut book = merge(primary, secondary);
    if book.thumbnail_url.is_some() {
        return Ok(book);
    }

    let isbn13 = match book.isbn13.as_deref() {
        Some(isbn13) => isbn13,
        None => {
            tracing::warn!(title = %book.title, "no ISBN-13 to probe for a cover");
            return Ok(book);
        }
    };

    match covers.resolve(isbn13).await {
        CoverProbeResult::Found { image_url } => {
            tracing::debug!(isbn13, %image_url, "cover found");
            book.thumbnail_url = Some(image_url);
        }
        CoverProbeResult::NotFound => tracing::debug!(isbn13, "no cover"),
        CoverProbeResult::TransportError { status, message } => {
            return Err(LookupError::CoverTransport { status, message });
        }
    }
    Ok(book)
}
