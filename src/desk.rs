use std::sync::Arc;
use chrono::{Duration, NaiveDate};
use tracing::{debug, info, warn};
use crate::authors::domain::model::Author;
use crate::books::domain::model::Book;
use crate::catalog::projection::{borrow_views, BorrowView, CirculationSummary};
use crate::catalog::store::CatalogStore;
use crate::checkout::domain::BorrowService;
use crate::checkout::domain::model::BorrowRecord;
use crate::core::clock::Clock;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult, Removal};
use crate::desk::search::RecordSearch;
use crate::desk::sequencer::{Sequencer, Ticket};
use crate::gateway::source::RemoteSource;
use crate::members::domain::model::Member;
use crate::search::{scope, search, Tab};

pub mod factory;
pub mod pending;
pub mod search;
pub mod sequencer;

pub type SharedDesk = Arc<tokio::sync::Mutex<LendingDesk>>;

// Snapshot holds the four collections as fetched by one synchronization
pub struct Snapshot {
    ticket: Ticket,
    pub books: Vec<Book>,
    pub authors: Vec<Author>,
    pub members: Vec<Member>,
    pub records: Vec<BorrowRecord>,
}

/// LendingDesk keeps a catalog store in step with a remote source.
///
/// Every mutation is staged on a copy of the store, pushed to the remote and
/// committed only once the remote accepted it, so a failed call leaves the
/// local catalog untouched.
pub struct LendingDesk {
    config: Configuration,
    store: CatalogStore,
    service: Box<dyn BorrowService>,
    source: RemoteSource,
    clock: Arc<dyn Clock>,
    record_search: RecordSearch,
    syncs: Sequencer,
}

impl LendingDesk {
    pub fn new(config: &Configuration, service: Box<dyn BorrowService>,
               source: RemoteSource, clock: Arc<dyn Clock>) -> Self {
        let record_search = RecordSearch::new(source.records.clone());
        Self {
            config: config.clone(),
            store: CatalogStore::new(),
            service,
            source,
            clock,
            record_search,
            syncs: Sequencer::new(),
        }
    }

    pub fn shared(self) -> SharedDesk {
        Arc::new(tokio::sync::Mutex::new(self))
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn record_search(&self) -> RecordSearch {
        self.record_search.clone()
    }

    pub async fn fetch_snapshot(&self) -> LibraryResult<Snapshot> {
        let ticket = self.syncs.issue();
        let (books, authors, members, records) = tokio::try_join!(
            self.source.books.list(),
            self.source.authors.list(),
            self.source.members.list(),
            self.source.records.list(),
        )?;
        Ok(Snapshot { ticket, books, authors, members, records })
    }

    // loads a snapshot unless a newer synchronization has been issued since
    pub fn apply(&mut self, snapshot: Snapshot) -> bool {
        if !self.syncs.is_current(snapshot.ticket) {
            warn!("discarding superseded catalog snapshot");
            return false;
        }
        debug!(books = snapshot.books.len(), authors = snapshot.authors.len(),
               members = snapshot.members.len(), records = snapshot.records.len(), "loading catalog snapshot");
        self.store.load_books(snapshot.books);
        self.store.load_authors(snapshot.authors);
        self.store.load_members(snapshot.members);
        self.store.load_borrow_records(snapshot.records);
        true
    }

    pub async fn sync_all(&mut self) -> LibraryResult<bool> {
        let snapshot = self.fetch_snapshot().await?;
        Ok(self.apply(snapshot))
    }

    fn default_due_date(&self, borrow_date: NaiveDate) -> LibraryResult<NaiveDate> {
        Duration::try_days(self.config.book_loan_days)
            .and_then(|loan| borrow_date.checked_add_signed(loan))
            .ok_or_else(|| LibraryError::invalid_range(
                format!("loan of {} days from {} is out of range", self.config.book_loan_days, borrow_date).as_str()))
    }

    pub async fn borrow(&mut self, book_id: &str, member_id: &str,
                        borrow_date: Option<NaiveDate>, due_date: Option<NaiveDate>) -> LibraryResult<BorrowRecord> {
        let borrow_date = borrow_date.unwrap_or_else(|| self.today());
        let due_date = match due_date {
            Some(due_date) => due_date,
            None => self.default_due_date(borrow_date)?,
        };
        let mut staged = self.store.clone();
        let record = self.service.borrow(&mut staged, book_id, member_id, borrow_date, due_date)?;
        let saved = self.source.records.create(&record).await?;
        staged.remove_borrow_record(record.id.as_str())?;
        staged.upsert_borrow_record(saved.clone())?;
        self.store = staged;
        info!(record_id = saved.id.as_str(), book_id, member_id, "borrow committed");
        Ok(saved)
    }

    pub async fn return_book(&mut self, record_id: &str) -> LibraryResult<BorrowRecord> {
        let mut staged = self.store.clone();
        self.service.return_book(&mut staged, record_id)?;
        let saved = self.source.records.return_record(record_id).await?;
        staged.update_borrow_record(saved.clone())?;
        self.store = staged;
        info!(record_id, "return committed");
        Ok(saved)
    }

    pub async fn delete_record(&mut self, record_id: &str) -> LibraryResult<BorrowRecord> {
        let mut staged = self.store.clone();
        let removed = self.service.delete_record(&mut staged, record_id)?;
        self.source.records.delete(record_id).await?;
        self.store = staged;
        info!(record_id, "borrow record deletion committed");
        Ok(removed)
    }

    pub async fn add_book(&mut self, book: Book) -> LibraryResult<Book> {
        let mut staged = self.store.clone();
        staged.upsert_book(book.clone())?;
        let saved = self.source.books.create(&book).await?;
        staged.remove_book(book.id.as_str())?;
        staged.upsert_book(saved.clone())?;
        self.store = staged;
        info!(book_id = saved.id.as_str(), "book added");
        Ok(saved)
    }

    pub async fn update_book(&mut self, book: Book) -> LibraryResult<Book> {
        let mut staged = self.store.clone();
        staged.update_book(book.clone())?;
        let saved = self.source.books.update(&book).await?;
        staged.update_book(saved.clone())?;
        self.store = staged;
        info!(book_id = saved.id.as_str(), "book updated");
        Ok(saved)
    }

    pub async fn delete_book(&mut self, book_id: &str) -> LibraryResult<Removal<Book>> {
        let mut staged = self.store.clone();
        let removal = self.service.delete_book(&mut staged, book_id)?;
        self.source.books.delete(book_id).await?;
        self.store = staged;
        info!(book_id, "book deleted");
        Ok(removal)
    }

    pub async fn add_author(&mut self, author: Author) -> LibraryResult<Author> {
        let mut staged = self.store.clone();
        staged.upsert_author(author.clone())?;
        let saved = self.source.authors.create(&author).await?;
        staged.remove_author(author.id.as_str())?;
        staged.upsert_author(saved.clone())?;
        self.store = staged;
        info!(author_id = saved.id.as_str(), "author added");
        Ok(saved)
    }

    pub async fn update_author(&mut self, author: Author) -> LibraryResult<Author> {
        let mut staged = self.store.clone();
        staged.update_author(author.clone())?;
        let saved = self.source.authors.update(&author).await?;
        staged.update_author(saved.clone())?;
        self.store = staged;
        info!(author_id = saved.id.as_str(), "author updated");
        Ok(saved)
    }

    pub async fn delete_author(&mut self, author_id: &str) -> LibraryResult<Removal<Author>> {
        let mut staged = self.store.clone();
        let removal = self.service.delete_author(&mut staged, author_id)?;
        self.source.authors.delete(author_id).await?;
        self.store = staged;
        info!(author_id, "author deleted");
        Ok(removal)
    }

    pub async fn add_member(&mut self, member: Member) -> LibraryResult<Member> {
        let mut staged = self.store.clone();
        staged.upsert_member(member.clone())?;
        let saved = self.source.members.create(&member).await?;
        staged.remove_member(member.id.as_str())?;
        staged.upsert_member(saved.clone())?;
        self.store = staged;
        info!(member_id = saved.id.as_str(), "member added");
        Ok(saved)
    }

    pub async fn update_member(&mut self, member: Member) -> LibraryResult<Member> {
        let mut staged = self.store.clone();
        staged.update_member(member.clone())?;
        let saved = self.source.members.update(&member).await?;
        staged.update_member(saved.clone())?;
        self.store = staged;
        info!(member_id = saved.id.as_str(), "member updated");
        Ok(saved)
    }

    pub async fn delete_member(&mut self, member_id: &str) -> LibraryResult<Removal<Member>> {
        let mut staged = self.store.clone();
        let removal = self.service.delete_member(&mut staged, member_id)?;
        self.source.members.delete(member_id).await?;
        self.store = staged;
        info!(member_id, "member deleted");
        Ok(removal)
    }

    pub fn borrow_views(&self) -> Vec<BorrowView> {
        borrow_views(&self.store, self.store.borrow_records().iter(), self.today())
    }

    // text filter first, then the tab scope, as on the borrowed-books screen
    pub fn filter_records(&self, query: &str, tab: Tab) -> Vec<BorrowView> {
        let views = self.borrow_views();
        scope(search(&views, query), tab).into_iter().cloned().collect()
    }

    pub fn summary(&self) -> CirculationSummary {
        CirculationSummary::from_store(&self.store, self.today())
    }
}
