use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;
use csv::Writer;
use serde::Deserialize;
use serde::Serialize;

use isbn_lookup::transport::HttpTransport;
use isbn_lookup::{db, BookLookup, CanonicalBook, Config};
use rusqlite::Connection;

/// Look up book metadata for a CSV of ISBNs
#[derive(Parser, Debug)]
#[command(name = "isbn-lookup", version, about)]
struct Cli {
    /// CSV file with an `isbn` column
    input: PathBuf,

    /// Where to write the resolved books
    #[arg(short, long, default_value = "books.csv")]
    output: PathBuf,

    /// Also store the resolved books and authors in this SQLite database
    #[arg(long)]
    db: Option<PathBuf>,
}

#[derive(Deserialize, Debug)]
struct InputBook {
    isbn: String,
}

#[derive(Serialize, Debug)]
struct OutputBook {
    isbn: String,
    title: String,
    subtitle: String,
    author_first_name: String,
    author_last_name: String,
    page_count: Option<u32>,
    isbn10: Option<String>,
    isbn13: Option<String>,
    thumbnail_url: Option<String>,
    description: Option<String>,
}

impl OutputBook {
    fn new(isbn: String, book: CanonicalBook) -> Self {
        let (author_first_name, author_last_name) = match book.author {
            Some(author) => (author.first_name, author.last_name),
            None => (String::new(), String::new()),
        };
        OutputBook {
            isbn,
            title: book.title,
            subtitle: book.subtitle,
            author_first_name,
            author_last_name,
            page_count: book.page_count,
            isbn10: book.isbn10,
            isbn13: book.isbn13,
            thumbnail_url: book.thumbnail_url,
            description: book.description,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let lookup = BookLookup::from_config(Config::from_env()?)?;
    let conn = match &cli.db {
        Some(path) => Some(db::init_db(&path.to_string_lossy())?),
        None => None,
    };

    let isbns = import_file(&cli.input)?;
    let output = resolve_all(&lookup, conn.as_ref(), isbns).await;

    tracing::info!(resolved = output.len(), "writing {}", cli.output.display());
    export_file(&cli.output, output)
}

/// Failures are per ISBN: a failed lookup drops that ISBN, a failed insert
/// is logged and the book is still written to the CSV.
async fn resolve_all<T: HttpTransport>(
    lookup: &BookLookup<T>,
    conn: Option<&Connection>,
    isbns: Vec<String>,
) -> Vec<OutputBook> {
    let mut output = vec![];
    for isbn in isbns {
        match lookup.lookup(&isbn).await {
            Ok(book) => {
                if let Some(conn) = conn {
                    if let Err(err) = db::insert_book(conn, &book) {
                        tracing::error!(%isbn, error = %err, "could not store book");
                    }
                }
                output.push(OutputBook::new(isbn, book));
            }
            Err(err) => tracing::error!(%isbn, error = %err, "lookup failed, skipping"),
        }
    }
    output
}

fn import_file(filename: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    let mut contents = csv::Reader::from_path(filename)?;
    let mut output = vec![];
    for result in contents.deserialize() {
        let record: InputBook = result?;
        output.push(record.isbn);
    }
    Ok(output)
}

fn export_file(filename: &Path, records: Vec<OutputBook>) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(filename)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
