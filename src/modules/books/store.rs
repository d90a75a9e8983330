//! In-memory book repository.
//!
//! [`BookStore`] exclusively owns the ordered record sequence. Every operation takes the lock
//! once for its whole read-modify-write, so ids stay unique and indexes stay valid while a
//! record is removed.

use std::sync::Arc;

use rand::Rng;
use time::{macros::format_description, OffsetDateTime, UtcOffset};
use tokio::sync::RwLock;

use super::error::{Action, BookError};
use super::models::{Book, BookFilter, BookPayload, BookSummary};

/// URL-safe alphabet used by nanoid-style identifiers.
const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Source of fresh record identifiers.
pub trait IdProvider: Send + Sync {
    fn next_id(&self) -> String;
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// Random fixed-length ids drawn from [`ID_ALPHABET`] with a CSPRNG.
#[derive(Debug, Clone)]
pub struct NanoIdProvider {
    length: usize,
}

impl NanoIdProvider {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl IdProvider for NanoIdProvider {
    fn next_id(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// `2024-05-01T08:30:00.123Z`
fn iso_timestamp(at: OffsetDateTime) -> Result<String, time::error::Format> {
    at.to_offset(UtcOffset::UTC).format(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    ))
}

pub struct BookStore {
    books: RwLock<Vec<Book>>,
    ids: Arc<dyn IdProvider>,
    clock: Arc<dyn Clock>,
}

impl BookStore {
    pub fn new(ids: Arc<dyn IdProvider>, clock: Arc<dyn Clock>) -> Self {
        Self {
            books: RwLock::new(Vec::new()),
            ids,
            clock,
        }
    }

    /// Store backed by random ids of `id_length` characters and the system clock.
    pub fn with_id_length(id_length: usize) -> Self {
        Self::new(
            Arc::new(NanoIdProvider::new(id_length)),
            Arc::new(SystemClock),
        )
    }

    /// Validate and append a new record, returning its id.
    pub async fn create(&self, payload: BookPayload) -> Result<String, BookError> {
        let name = payload.validate(Action::Create)?.to_string();

        let id = self.ids.next_id();
        let now = iso_timestamp(self.clock.now())?;
        let finished = payload.is_finished();
        let (page_count, read_page, reading) =
            (payload.page_count(), payload.read_page(), payload.reading());

        let book = Book {
            id: id.clone(),
            name,
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count,
            read_page,
            finished,
            reading,
            inserted_at: now.clone(),
            updated_at: now,
        };

        let mut books = self.books.write().await;
        books.push(book);

        let visible = books.iter().filter(|book| book.id == id).count();
        if visible != 1 {
            // Withdraw the record just pushed so the existing holder of the id stays unique.
            books.pop();
            tracing::error!(book_id = %id, visible, "inserted book is not uniquely addressable");
            return Err(BookError::InsertNotVisible);
        }

        tracing::info!(book_id = %id, total = books.len(), "book created");
        Ok(id)
    }

    /// Project every record passing `filter`, in insertion order.
    pub async fn list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        let books = self.books.read().await;
        if books.is_empty() {
            return Vec::new();
        }

        let needle = filter.name.as_ref().map(|name| name.to_lowercase());

        books
            .iter()
            .filter(|book| match &needle {
                Some(needle) => book.name.to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .filter(|book| filter.reading.map_or(true, |reading| book.reading == reading))
            .filter(|book| {
                filter
                    .finished
                    .map_or(true, |finished| book.finished == finished)
            })
            .map(BookSummary::from)
            .collect()
    }

    pub async fn get(&self, id: &str) -> Result<Book, BookError> {
        let books = self.books.read().await;
        books
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or(BookError::NotFound)
    }

    /// Replace every field except `id` and `inserted_at`.
    ///
    /// Input is validated before the id is looked up; `finished` is recomputed.
    pub async fn update(&self, id: &str, payload: BookPayload) -> Result<(), BookError> {
        let name = payload.validate(Action::Update)?.to_string();
        let now = iso_timestamp(self.clock.now())?;
        let finished = payload.is_finished();
        let (page_count, read_page, reading) =
            (payload.page_count(), payload.read_page(), payload.reading());

        let mut books = self.books.write().await;
        let book = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or(BookError::UpdateTargetMissing)?;

        book.name = name;
        book.year = payload.year;
        book.author = payload.author;
        book.summary = payload.summary;
        book.publisher = payload.publisher;
        book.page_count = page_count;
        book.read_page = read_page;
        book.finished = finished;
        book.reading = reading;
        book.updated_at = now;

        tracing::info!(book_id = %id, "book updated");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), BookError> {
        let mut books = self.books.write().await;
        let index = books
            .iter()
            .position(|book| book.id == id)
            .ok_or(BookError::DeleteTargetMissing)?;
        books.remove(index);

        tracing::info!(book_id = %id, remaining = books.len(), "book deleted");
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}
