use rusqlite::{params, Connection, OptionalExtension, Result, Row};

use crate::book::{Author, CanonicalBook};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredAuthor {
    pub id: i64,
    pub author: Author,
}

pub fn init_db(db_path: &str) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    create_schema(&conn)?;
    Ok(conn)
}

pub fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "create table if not exists authors (
            author_id integer primary key,
            firstname text not null,
            lastname text not null
        )",
        [],
    )?;
    conn.execute(
        "create table if not exists books (
            id integer primary key,
            title text not null,
            subtitle text not null,
            description text,
            page_count integer,
            isbn10 text,
            isbn13 text,
            thumbnail_url text,
            author_id integer references authors(author_id)
        )",
        [],
    )?;

    conn.execute(
        "create unique index if not exists
             idx_books_isbn13 on books (isbn13)",
        [],
    )?;

    Ok(())
}

fn author_from_row(row: &Row) -> Result<StoredAuthor> {
    Ok(StoredAuthor {
        id: row.get(0)?,
        author: Author {
            first_name: row.get(1)?,
            last_name: row.get(2)?,
        },
    })
}

pub fn find_author(conn: &Connection, id: i64) -> Result<Option<StoredAuthor>> {
    conn.query_row(
        "SELECT author_id, firstname, lastname FROM authors WHERE author_id = (?1)",
        params![id],
        author_from_row,
    )
    .optional()
}

pub fn all_authors(conn: &Connection) -> Result<Vec<StoredAuthor>> {
    let mut stmt =
        conn.prepare("SELECT author_id, firstname, lastname FROM authors ORDER BY author_id")?;
    let authors = stmt
        .query_map([], author_from_row)?
        .collect::<Result<Vec<_>>>()?;
    Ok(authors)
}

fn get_author(conn: &Connection, author: &Author) -> Result<i64> {
    conn.query_row(
        "SELECT author_id FROM authors
             where firstname = (?1)
               and lastname = (?2)",
        params![author.first_name, author.last_name],
        |row| row.get(0),
    )
}

/// Returns the id of the author with these names, inserting them if needed.
pub fn store_author(conn: &Connection, author: &Author) -> Result<i64> {
    match get_author(conn, author) {
        Ok(id) => return Ok(id),
        Err(rusqlite::Error::QueryReturnedNoRows) => {}
        Err(x) => return Err(x),
    }

    conn.execute(
        "INSERT INTO authors (firstname, lastname) values (?1, ?2)",
        params![author.first_name, author.last_name],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Renames an author. Returns false when no author has that id.
pub fn update_author(conn: &Connection, stored: &StoredAuthor) -> Result<bool> {
    let tx = conn.unchecked_transaction()?;
    let changed = tx.execute(
        "UPDATE authors SET firstname = (?1), lastname = (?2) WHERE author_id = (?3)",
        params![stored.author.first_name, stored.author.last_name, stored.id],
    )?;
    tx.commit()?;
    Ok(changed > 0)
}

pub fn remove_author(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM authors WHERE author_id = (?1)", params![id])
}

fn get_book(conn: &Connection, book: &CanonicalBook) -> Result<i64> {
    match &book.isbn13 {
        Some(isbn13) => conn.query_row(
            "SELECT id FROM books where isbn13 = (?1)",
            params![isbn13],
            |row| row.get(0),
        ),
        None => conn.query_row(
            "SELECT id FROM books
                 where title = (?1)
                   and subtitle = (?2)
                   and isbn13 is null",
            params![book.title, book.subtitle],
            |row| row.get(0),
        ),
    }
}

/// Stores a resolved book and its author. A book already stored under the
/// same ISBN-13 (or, without one, the same title) is not inserted twice.
pub fn insert_book(conn: &Connection, book: &CanonicalBook) -> Result<i64> {
    match get_book(conn, book) {
        Ok(id) => return Ok(id),
        Err(rusqlite::Error::QueryReturnedNoRows) => {}
        Err(x) => return Err(x),
    }

    let tx = conn.unchecked_transaction()?;
    let author_id = match &book.author {
        Some(author) => Some(store_author(&tx, author)?),
        None => None,
    };
    tx.execute(
        "INSERT INTO books (
                title,
                subtitle,
                description,
                page_count,
                isbn10,
                isbn13,
                thumbnail_url,
                author_id
            )
            values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            book.title,
            book.subtitle,
            book.description,
            book.page_count,
            book.isbn10,
            book.isbn13,
            book.thumbnail_url,
            author_id,
        ],
    )?;
    let last_id = tx.last_insert_rowid();
    tx.commit()?;

    Ok(last_id)
}

pub fn get_book_by_isbn13(conn: &Connection, isbn13: &str) -> Result<Option<CanonicalBook>> {
    conn.query_row(
        "SELECT b.title, b.subtitle, b.description, b.page_count, b.isbn10, b.isbn13,
                b.thumbnail_url, a.firstname, a.lastname
             FROM books b LEFT JOIN authors a ON a.author_id = b.author_id
             WHERE b.isbn13 = (?1)",
        params![isbn13],
        |row| {
            let first_name: Option<String> = row.get(7)?;
            let last_name: Option<String> = row.get(8)?;
            Ok(CanonicalBook {
                title: row.get(0)?,
                subtitle: row.get(1)?,
                description: row.get(2)?,
                page_count: row.get(3)?,
                isbn10: row.get(4)?,
                isbn13: row.get(5)?,
                thumbnail_url: row.get(6)?,
                author: first_name.map(|first_name| Author {
                    first_name,
                    last_name: last_name.unwrap_or_default(),
                }),
            })
        },
    )
    .optional()
}
