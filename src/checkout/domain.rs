use chrono::NaiveDate;
use crate::authors::domain::model::Author;
use crate::books::domain::model::Book;
use crate::catalog::store::CatalogStore;
use crate::checkout::domain::model::BorrowRecord;
use crate::core::library::{LibraryResult, Removal};
use crate::members::domain::model::Member;

pub mod model;
pub mod service;
pub mod status;

// BorrowService runs the lending lifecycle against a store passed in by the
// caller; none of its operations suspend.
pub trait BorrowService: Sync + Send {
    fn borrow(&self, store: &mut CatalogStore, book_id: &str, member_id: &str,
              borrow_date: NaiveDate, due_date: NaiveDate) -> LibraryResult<BorrowRecord>;
    fn record_borrow(&self, store: &mut CatalogStore, record: BorrowRecord) -> LibraryResult<BorrowRecord>;
    fn return_book(&self, store: &mut CatalogStore, record_id: &str) -> LibraryResult<BorrowRecord>;
    fn delete_record(&self, store: &mut CatalogStore, record_id: &str) -> LibraryResult<BorrowRecord>;
    fn delete_book(&self, store: &mut CatalogStore, book_id: &str) -> LibraryResult<Removal<Book>>;
    fn delete_author(&self, store: &mut CatalogStore, author_id: &str) -> LibraryResult<Removal<Author>>;
    fn delete_member(&self, store: &mut CatalogStore, member_id: &str) -> LibraryResult<Removal<Member>>;
}
