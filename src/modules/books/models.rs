use serde::{Deserialize, Serialize};

use super::error::{Action, BookError};
use crate::utils;

/// A stored book record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier assigned at creation
    pub id: String,
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    /// `true` when `read_page == page_count`
    pub finished: bool,
    pub reading: bool,
    /// ISO-8601 creation time, never changes
    pub inserted_at: String,
    /// ISO-8601 time of the last successful write
    pub updated_at: String,
}

/// Request body accepted by create and update.
///
/// Every field is optional on the wire, and an explicit `null` reads the same as an absent
/// key, so a missing `name` reaches validation instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<u32>,
    pub read_page: Option<u32>,
    pub reading: Option<bool>,
}

impl BookPayload {
    pub fn page_count(&self) -> u32 {
        self.page_count.unwrap_or_default()
    }

    pub fn read_page(&self) -> u32 {
        self.read_page.unwrap_or_default()
    }

    pub fn reading(&self) -> bool {
        self.reading.unwrap_or_default()
    }

    /// Check the payload against the record rules and return the accepted name.
    ///
    /// The name rule is checked before the page rule.
    pub fn validate(&self, action: Action) -> Result<&str, BookError> {
        let name = match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => return Err(BookError::MissingName(action)),
        };

        if self.read_page() > self.page_count() {
            return Err(BookError::ReadPageExceedsPageCount(action));
        }

        Ok(name)
    }

    pub fn is_finished(&self) -> bool {
        self.read_page() == self.page_count()
    }
}

/// Projection returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Raw query string of `GET /books`.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub name: Option<String>,
    pub reading: Option<String>,
    pub finished: Option<String>,
}

impl ListQuery {
    /// Collect the known keys from decoded query pairs. A repeated key keeps its first value;
    /// unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "name" => &mut query.name,
                "reading" => &mut query.reading,
                "finished" => &mut query.finished,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

/// Parsed list filters. `None` leaves that dimension unfiltered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    /// Case-insensitive substring of the book name
    pub name: Option<String>,
    pub reading: Option<bool>,
    pub finished: Option<bool>,
}

impl From<ListQuery> for BookFilter {
    fn from(query: ListQuery) -> Self {
        Self {
            name: query.name,
            reading: query.reading.as_deref().map(utils::numeric_truthy),
            finished: query.finished.as_deref().map(utils::numeric_truthy),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBook {
    pub book_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookList {
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookDetail {
    pub book: Book,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: Option<&str>, page_count: u32, read_page: u32) -> BookPayload {
        BookPayload {
            name: name.map(str::to_string),
            page_count: Some(page_count),
            read_page: Some(read_page),
            ..BookPayload::default()
        }
    }

    #[test]
    fn missing_or_empty_name_is_rejected_first() {
        for name in [None, Some("")] {
            let err = payload(name, 10, 20).validate(Action::Create).unwrap_err();
            assert!(matches!(err, BookError::MissingName(Action::Create)));
        }
    }

    #[test]
    fn read_page_above_page_count_is_rejected() {
        let err = payload(Some("X"), 50, 60)
            .validate(Action::Update)
            .unwrap_err();
        assert!(matches!(
            err,
            BookError::ReadPageExceedsPageCount(Action::Update)
        ));
    }

    #[test]
    fn equal_pages_means_finished() {
        let accepted = payload(Some("Moby Dick"), 200, 200);
        assert_eq!(accepted.validate(Action::Create).unwrap(), "Moby Dick");
        assert!(accepted.is_finished());
        assert!(!payload(Some("Moby Dick"), 200, 10).is_finished());
    }

    #[test]
    fn payload_reads_camel_case_and_tolerates_missing_fields() {
        let parsed: BookPayload = serde_json::from_value(serde_json::json!({
            "name": "Dune",
            "pageCount": 412,
            "readPage": 12,
            "reading": true
        }))
        .unwrap();
        assert_eq!(parsed.name.as_deref(), Some("Dune"));
        assert_eq!(parsed.page_count(), 412);
        assert_eq!(parsed.read_page(), 12);
        assert!(parsed.reading());
        assert!(parsed.publisher.is_none());
    }

    #[test]
    fn null_scalars_read_like_missing_ones() {
        let parsed: BookPayload = serde_json::from_value(serde_json::json!({
            "name": "A",
            "year": null,
            "pageCount": null,
            "readPage": null,
            "reading": null
        }))
        .unwrap();
        assert_eq!(parsed.page_count(), 0);
        assert_eq!(parsed.read_page(), 0);
        assert!(!parsed.reading());
        assert_eq!(parsed.validate(Action::Create).unwrap(), "A");
        assert!(parsed.is_finished());
    }

    #[test]
    fn repeated_query_keys_keep_the_first_value() {
        let pairs = [
            ("name", "a"),
            ("name", "b"),
            ("reading", "1"),
            ("page", "2"),
            ("reading", "0"),
        ]
        .map(|(key, value)| (key.to_string(), value.to_string()));

        let query = ListQuery::from_pairs(pairs);
        assert_eq!(query.name.as_deref(), Some("a"));
        assert_eq!(query.reading.as_deref(), Some("1"));
        assert!(query.finished.is_none());
    }

    #[test]
    fn book_serializes_with_camel_case_keys() {
        let book = Book {
            id: "abc".to_string(),
            name: "Dune".to_string(),
            year: Some(1965),
            author: Some("Frank Herbert".to_string()),
            summary: None,
            publisher: Some("Chilton".to_string()),
            page_count: 412,
            read_page: 412,
            finished: true,
            reading: false,
            inserted_at: "2024-01-01T00:00:00.000Z".to_string(),
            updated_at: "2024-01-01T00:00:00.000Z".to_string(),
        };
        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["pageCount"], 412);
        assert_eq!(value["readPage"], 412);
        assert_eq!(value["insertedAt"], "2024-01-01T00:00:00.000Z");
        assert_eq!(
            serde_json::to_value(BookSummary::from(&book)).unwrap(),
            serde_json::json!({ "id": "abc", "name": "Dune", "publisher": "Chilton" })
        );
    }

    #[test]
    fn query_flags_use_numeric_truthiness() {
        let filter = BookFilter::from(ListQuery {
            name: Some("harry".to_string()),
            reading: Some("1".to_string()),
            finished: Some("0".to_string()),
        });
        assert_eq!(filter.name.as_deref(), Some("harry"));
        assert_eq!(filter.reading, Some(true));
        assert_eq!(filter.finished, Some(false));
        assert_eq!(BookFilter::from(ListQuery::default()), BookFilter::default());
    }
}
