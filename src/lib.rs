//! Resolves book metadata for an ISBN from Google Books and Open Library,
//! reconciled into a single [`CanonicalBook`], with a cover image recovered
//! from the Open Library covers service when neither catalog has one.

pub mod book;
pub mod config;
pub mod cover;
pub mod db;
pub mod error;
pub mod google_books_api;
pub mod isbn;
pub mod lookup;
pub mod open_library_api;
pub mod reconcile;
pub mod title;
pub mod transport;

pub use book::{Author, CanonicalBook};
pub use config::Config;
pub use error::LookupError;
pub use lookup::BookLookup;
