use crate::book::CanonicalBook;
use crate::config::Config;
use crate::cover::CoverResolver;
use crate::error::LookupError;
use crate::google_books_api::{fetch_primary, PrimaryLookup};
use crate::isbn::clean_isbn;
use crate::open_library_api::fetch_secondary;
use crate::reconcile::reconcile;
use crate::transport::{HttpTransport, ReqwestTransport};

/// Resolves ISBNs against both catalogs and the cover service.
pub struct BookLookup<T: HttpTransport> {
    transport: T,
    config: Config,
}

impl BookLookup<ReqwestTransport> {
    pub fn from_config(config: Config) -> Result<Self, LookupError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(BookLookup::new(transport, config))
    }
}

impl<T: HttpTransport> BookLookup<T> {
    pub fn new(transport: T, config: Config) -> Self {
        BookLookup {
            transport,
            config: config.trimmed(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Both catalogs are queried concurrently and both must answer. The
    /// cover probe, when needed, runs after the merge.
    #[tracing::instrument(skip(self))]
    pub async fn lookup(&self, isbn: &str) -> Result<CanonicalBook, LookupError> {
        let isbn = clean_isbn(isbn).ok_or_else(|| LookupError::InvalidIsbn(isbn.to_string()))?;

        let (primary, secondary) = tokio::try_join!(
            fetch_primary(&self.transport, &self.config, &isbn),
            fetch_secondary(&self.transport, &self.config, &isbn),
        )?;

        let source = match primary {
            PrimaryLookup::Found(_) => "google_books",
            PrimaryLookup::Empty => "open_library",
        };
        let covers = CoverResolver::new(&self.transport, &self.config.covers_url);
        let book = reconcile(&primary, &secondary, &covers).await?;
        tracing::info!(
            %isbn,
            source,
            title = %book.title,
            has_cover = book.thumbnail_url.is_some(),
            "resolved book"
        );
        Ok(book)
    }
}
