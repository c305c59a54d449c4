use std::sync::Arc;
use chrono::NaiveDate;
use tracing::{debug, info, warn};
use crate::authors::domain::model::Author;
use crate::books::domain::model::Book;
use crate::catalog::store::CatalogStore;
use crate::checkout::domain::BorrowService;
use crate::checkout::domain::model::BorrowRecord;
use crate::core::clock::Clock;
use crate::core::domain::Configuration;
use crate::core::library::{EntityRef, LibraryError, LibraryResult, LibraryWarning, Removal};
use crate::members::domain::model::Member;

pub struct BorrowServiceImpl {
    clock: Arc<dyn Clock>,
    restore_copy_on_delete: bool,
}

impl BorrowServiceImpl {
    pub fn new(config: &Configuration, clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            restore_copy_on_delete: config.restore_copy_on_delete,
        }
    }

    fn active_reference_warning(target: EntityRef, active: Vec<&BorrowRecord>) -> Vec<LibraryWarning> {
        if active.is_empty() {
            return vec![];
        }
        let warning = LibraryWarning::HasActiveReferences {
            target,
            active_records: active.iter().map(|r| r.id.to_string()).collect(),
        };
        warn!("{}", warning);
        vec![warning]
    }
}

impl BorrowService for BorrowServiceImpl {
    fn borrow(&self, store: &mut CatalogStore, book_id: &str, member_id: &str,
              borrow_date: NaiveDate, due_date: NaiveDate) -> LibraryResult<BorrowRecord> {
        self.record_borrow(store, BorrowRecord::new(book_id, member_id, borrow_date, due_date))
    }

    fn record_borrow(&self, store: &mut CatalogStore, record: BorrowRecord) -> LibraryResult<BorrowRecord> {
        let book = store.books().find(record.book_id.as_str())?;
        if !book.is_available() {
            return Err(LibraryError::unavailable(book.id.as_str()));
        }
        store.members().find(record.member_id.as_str())?;
        if record.borrow_date > record.due_date {
            return Err(LibraryError::invalid_range(
                format!("due date {} is before borrow date {}", record.due_date, record.borrow_date).as_str()));
        }
        if store.borrow_records().contains(record.id.as_str()) {
            return Err(LibraryError::duplicate_key(
                format!("borrow record {} already exists", record.id).as_str()));
        }
        if record.is_returned() {
            return Err(LibraryError::validation(
                format!("borrow record {} cannot start out returned", record.id).as_str(), None));
        }

        // every precondition holds, so both writes below succeed together
        store.book_mut(record.book_id.as_str())?.take_copy()?;
        store.upsert_borrow_record(record.clone())?;
        info!("book {} lent to member {} until {} as record {}",
              record.book_id, record.member_id, record.due_date, record.id);
        Ok(record)
    }

    fn return_book(&self, store: &mut CatalogStore, record_id: &str) -> LibraryResult<BorrowRecord> {
        let record = store.borrow_records().find(record_id)?;
        if record.is_returned() {
            return Err(LibraryError::already_returned(record_id));
        }
        let book_id = record.book_id.to_string();
        let today = self.clock.today();

        let record = store.borrow_record_mut(record_id)?;
        record.return_date = Some(today);
        let returned = record.clone();
        match store.book_mut(book_id.as_str()) {
            Ok(book) => book.restore_copy(),
            Err(_) => debug!("returned record {} references deleted book {}", record_id, book_id),
        }
        info!("record {} returned on {}", record_id, today);
        Ok(returned)
    }

    fn delete_record(&self, store: &mut CatalogStore, record_id: &str) -> LibraryResult<BorrowRecord> {
        let removed = store.remove_borrow_record(record_id)?;
        if removed.is_active() && self.restore_copy_on_delete {
            if let Ok(book) = store.book_mut(removed.book_id.as_str()) {
                book.restore_copy();
            }
        }
        info!("record {} deleted (active: {})", record_id, removed.is_active());
        Ok(removed)
    }

    fn delete_book(&self, store: &mut CatalogStore, book_id: &str) -> LibraryResult<Removal<Book>> {
        let book = store.remove_book(book_id)?;
        let active = store.records_by_book(book_id).into_iter().filter(|r| r.is_active()).collect();
        let warnings = Self::active_reference_warning(EntityRef::book(book_id), active);
        info!("book {} deleted", book_id);
        Ok(Removal::new(book, warnings))
    }

    fn delete_author(&self, store: &mut CatalogStore, author_id: &str) -> LibraryResult<Removal<Author>> {
        let author = store.remove_author(author_id)?;
        let active = store.active_records().into_iter()
            .filter(|r| store.book(r.book_id.as_str()).map(|b| b.author_id == author_id).unwrap_or(false))
            .collect();
        let warnings = Self::active_reference_warning(EntityRef::author(author_id), active);
        info!("author {} deleted", author_id);
        Ok(Removal::new(author, warnings))
    }

    fn delete_member(&self, store: &mut CatalogStore, member_id: &str) -> LibraryResult<Removal<Member>> {
        let member = store.remove_member(member_id)?;
        let active = store.records_by_member(member_id).into_iter().filter(|r| r.is_active()).collect();
        let warnings = Self::active_reference_warning(EntityRef::member(member_id), active);
        info!("member {} deleted", member_id);
        Ok(Removal::new(member, warnings))
    }
}
