use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};

// Book abstracts a catalog title with a pool of lendable copies; copies are
// not tracked individually, only how many of them are still on the shelf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub category: String,
    pub publishing_year: i32,
    pub isbn: Option<String>,
    pub total_copies: u32,
    pub available_copies: u32,
    pub author_id: String,
}

impl Book {
    pub fn new(title: &str, category: &str, publishing_year: i32, total_copies: u32, author_id: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            category: category.to_string(),
            publishing_year,
            isbn: None,
            total_copies,
            available_copies: total_copies,
            author_id: author_id.to_string(),
        }
    }

    pub fn with_isbn(mut self, isbn: &str) -> Self {
        self.isbn = Some(isbn.to_string());
        self
    }

    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }

    pub fn validate(&self) -> LibraryResult<()> {
        if self.title.trim().is_empty() {
            return Err(LibraryError::validation("title is required", Some("title".to_string())));
        }
        if self.category.trim().is_empty() {
            return Err(LibraryError::validation("category is required", Some("category".to_string())));
        }
        if self.total_copies < 1 {
            return Err(LibraryError::validation(
                format!("book {} must have at least one copy", self.id).as_str(), Some("totalCopies".to_string())));
        }
        if self.available_copies > self.total_copies {
            return Err(LibraryError::validation(
                format!("book {} has {} available copies but only {} in total",
                        self.id, self.available_copies, self.total_copies).as_str(), Some("availableCopies".to_string())));
        }
        Ok(())
    }

    pub(crate) fn take_copy(&mut self) -> LibraryResult<()> {
        if self.available_copies == 0 {
            return Err(LibraryError::unavailable(self.id.as_str()));
        }
        self.available_copies -= 1;
        Ok(())
    }

    // capped at total copies so a stray restore cannot break the invariant
    pub(crate) fn restore_copy(&mut self) {
        if self.available_copies < self.total_copies {
            self.available_copies += 1;
        }
    }
}

impl Identifiable for Book {
    fn id(&self) -> String {
        self.id.to_string()
    }
}
