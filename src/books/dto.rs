use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::books::domain::model::Book;
use crate::core::domain::ReferenceDto;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::source::WireFormat;

// BookDto is the backend's json shape for a book, with the author embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "crate::utils::id::deserialize_opt")]
    pub id: Option<String>,
    pub title: String,
    pub category: String,
    pub publishing_year: i32,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub total_copies: Option<u32>,
    #[serde(default)]
    pub available_copies: Option<u32>,
    #[serde(default)]
    pub author: Option<ReferenceDto>,
}

impl From<&Book> for BookDto {
    fn from(other: &Book) -> Self {
        Self {
            id: Some(other.id.to_string()),
            title: other.title.to_string(),
            category: other.category.to_string(),
            publishing_year: other.publishing_year,
            isbn: other.isbn.clone(),
            total_copies: Some(other.total_copies),
            available_copies: Some(other.available_copies),
            author: Some(ReferenceDto::new(other.author_id.as_str())),
        }
    }
}

impl TryFrom<BookDto> for Book {
    type Error = LibraryError;

    fn try_from(other: BookDto) -> LibraryResult<Self> {
        let id = other.id.ok_or_else(|| LibraryError::serialization(
            format!("book {:?} arrived without an id", other.title).as_str()))?;
        let total_copies = other.total_copies.unwrap_or(1);
        Ok(Self {
            id,
            title: other.title,
            category: other.category,
            publishing_year: other.publishing_year,
            isbn: other.isbn,
            total_copies,
            // the backend fills missing availability from the total on save
            available_copies: other.available_copies.unwrap_or(total_copies),
            author_id: other.author.map(|a| a.id).unwrap_or_default(),
        })
    }
}

impl WireFormat for Book {
    type Dto = BookDto;

    fn to_wire(&self, _today: NaiveDate) -> BookDto {
        BookDto::from(self)
    }

    fn from_wire(dto: BookDto) -> LibraryResult<Self> {
        Book::try_from(dto)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::books::domain::model::Book;
    use crate::books::dto::BookDto;
    use crate::gateway::source::WireFormat;

    #[tokio::test]
    async fn test_should_read_backend_book() {
        let json = r#"{"id":"b1","title":"1984","category":"Dystopian Fiction","publishingYear":1949,
            "isbn":"978-0-452-28423-4","totalCopies":4,
            "author":{"id":"a1","name":"George Orwell","nationality":"British"},"borrowedBooks":[]}"#;
        let dto: BookDto = serde_json::from_str(json).expect("should parse book");
        let book = Book::from_wire(dto).expect("should convert book");
        assert_eq!("a1", book.author_id.as_str());
        assert_eq!(4, book.available_copies);
    }

    #[tokio::test]
    async fn test_should_read_numeric_ids() {
        let json = r#"{"id":7,"title":"Emma","category":"Romance","publishingYear":1815,
            "totalCopies":2,"availableCopies":1,"author":{"id":4}}"#;
        let book = Book::from_wire(serde_json::from_str(json).expect("should parse book")).expect("should convert book");
        assert_eq!("7", book.id.as_str());
        assert_eq!("4", book.author_id.as_str());
        assert_eq!(1, book.available_copies);
    }

    #[tokio::test]
    async fn test_should_reject_book_without_id() {
        let json = r#"{"title":"1984","category":"Fiction","publishingYear":1949}"#;
        let dto: BookDto = serde_json::from_str(json).expect("should parse book");
        assert!(Book::from_wire(dto).is_err());
    }

    #[tokio::test]
    async fn test_should_write_author_reference() {
        let book = Book::new("Emma", "Romance", 1815, 2, "a4");
        let json = serde_json::to_value(book.to_wire(NaiveDate::MIN)).expect("should serialize");
        assert_eq!("a4", json["author"]["id"]);
        assert_eq!(2, json["availableCopies"]);
    }
}
