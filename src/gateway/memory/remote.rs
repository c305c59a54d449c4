use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use async_trait::async_trait;
use tracing::debug;
use crate::authors::domain::model::Author;
use crate::books::domain::model::Book;
use crate::catalog::projection::borrow_views;
use crate::catalog::store::CatalogStore;
use crate::checkout::domain::BorrowService;
use crate::checkout::domain::model::BorrowRecord;
use crate::checkout::domain::service::BorrowServiceImpl;
use crate::core::clock::Clock;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::source::{BorrowRemote, Remote, RemoteSource};
use crate::members::domain::model::Member;
use crate::search::filter;

// MemoryBackend keeps its own catalog and answers the way the REST backend does
#[derive(Clone)]
pub struct MemoryBackend {
    state: Arc<Mutex<CatalogStore>>,
    service: Arc<BorrowServiceImpl>,
    clock: Arc<dyn Clock>,
}

impl MemoryBackend {
    pub fn new(config: &Configuration, clock: Arc<dyn Clock>, store: CatalogStore) -> Self {
        Self {
            state: Arc::new(Mutex::new(store)),
            service: Arc::new(BorrowServiceImpl::new(config, clock.clone())),
            clock,
        }
    }

    pub fn into_source(self) -> RemoteSource {
        RemoteSource::new(Box::new(self.clone()), Box::new(self.clone()), Box::new(self.clone()), Arc::new(self))
    }

    // snapshot of the backend's state, used to inspect what was pushed
    pub fn snapshot(&self) -> CatalogStore {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, CatalogStore> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn reject_existing(exists: bool, id: &str) -> LibraryResult<()> {
        if exists {
            return Err(LibraryError::duplicate_key(format!("entity {} already exists", id).as_str()));
        }
        Ok(())
    }
}

#[async_trait]
impl Remote<Book> for MemoryBackend {
    async fn list(&self) -> LibraryResult<Vec<Book>> {
        Ok(self.lock().books().to_vec())
    }

    async fn create(&self, book: &Book) -> LibraryResult<Book> {
        let mut store = self.lock();
        Self::reject_existing(store.books().contains(book.id.as_str()), book.id.as_str())?;
        store.upsert_book(book.clone())?;
        Ok(book.clone())
    }

    async fn update(&self, book: &Book) -> LibraryResult<Book> {
        book.validate()?;
        self.lock().update_book(book.clone())?;
        Ok(book.clone())
    }

    async fn delete(&self, id: &str) -> LibraryResult<()> {
        self.service.delete_book(&mut self.lock(), id).map(|_| ())
    }
}

#[async_trait]
impl Remote<Author> for MemoryBackend {
    async fn list(&self) -> LibraryResult<Vec<Author>> {
        Ok(self.lock().authors().to_vec())
    }

    async fn create(&self, author: &Author) -> LibraryResult<Author> {
        let mut store = self.lock();
        Self::reject_existing(store.authors().contains(author.id.as_str()), author.id.as_str())?;
        store.upsert_author(author.clone())?;
        Ok(author.clone())
    }

    async fn update(&self, author: &Author) -> LibraryResult<Author> {
        author.validate()?;
        self.lock().update_author(author.clone())?;
        Ok(author.clone())
    }

    async fn delete(&self, id: &str) -> LibraryResult<()> {
        self.service.delete_author(&mut self.lock(), id).map(|_| ())
    }
}

#[async_trait]
impl Remote<Member> for MemoryBackend {
    async fn list(&self) -> LibraryResult<Vec<Member>> {
        Ok(self.lock().members().to_vec())
    }

    async fn create(&self, member: &Member) -> LibraryResult<Member> {
        let mut store = self.lock();
        Self::reject_existing(store.members().contains(member.id.as_str()), member.id.as_str())?;
        store.upsert_member(member.clone())?;
        Ok(member.clone())
    }

    async fn update(&self, member: &Member) -> LibraryResult<Member> {
        member.validate()?;
        self.lock().update_member(member.clone())?;
        Ok(member.clone())
    }

    async fn delete(&self, id: &str) -> LibraryResult<()> {
        self.service.delete_member(&mut self.lock(), id).map(|_| ())
    }
}

#[async_trait]
impl Remote<BorrowRecord> for MemoryBackend {
    async fn list(&self) -> LibraryResult<Vec<BorrowRecord>> {
        Ok(self.lock().borrow_records().to_vec())
    }

    async fn create(&self, record: &BorrowRecord) -> LibraryResult<BorrowRecord> {
        self.service.record_borrow(&mut self.lock(), record.clone())
    }

    async fn update(&self, record: &BorrowRecord) -> LibraryResult<BorrowRecord> {
        self.lock().update_borrow_record(record.clone())?;
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> LibraryResult<()> {
        self.service.delete_record(&mut self.lock(), id).map(|_| ())
    }
}

#[async_trait]
impl BorrowRemote for MemoryBackend {
    async fn return_record(&self, id: &str) -> LibraryResult<BorrowRecord> {
        self.service.return_book(&mut self.lock(), id)
    }

    // matches book title or member name, like the backend's search endpoint
    async fn search(&self, query: &str) -> LibraryResult<Vec<BorrowRecord>> {
        let store = self.lock();
        let views = borrow_views(&store, store.borrow_records().iter(), self.clock.today());
        let found = filter(&views, query, |v| vec![v.book_title.to_string(), v.member_name.to_string()]);
        debug!(query, matches = found.len(), "searched borrow records");
        Ok(found.into_iter().map(|v| v.record.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use chrono::NaiveDate;
    use crate::books::domain::model::Book;
    use crate::checkout::domain::model::BorrowRecord;
    use crate::core::clock::FixedClock;
    use crate::core::domain::Configuration;
    use crate::core::library::LibraryError;
    use crate::gateway::memory::remote::MemoryBackend;
    use crate::gateway::memory::seed::seed_catalog;
    use crate::gateway::source::{BorrowRemote, Remote};

    fn backend() -> MemoryBackend {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date");
        let store = seed_catalog(today).expect("should seed catalog");
        MemoryBackend::new(&Configuration::in_memory(), Arc::new(FixedClock::new(today)), store)
    }

    #[tokio::test]
    async fn test_should_search_by_title_or_member() {
        let backend = backend();
        assert_eq!(1, backend.search("gatsby").await.expect("should search").len());
        assert_eq!(1, backend.search("SMITH").await.expect("should search").len());
        assert_eq!(5, backend.search("").await.expect("should search").len());
    }

    #[tokio::test]
    async fn test_should_lend_through_backend() {
        let backend = backend();
        let store = backend.snapshot();
        let potter = store.books().iter().find(|b| b.title.starts_with("Harry")).expect("seeded book").clone();
        let member = store.members().iter().next().expect("seeded member").clone();
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date");
        let record = BorrowRecord::new(potter.id.as_str(), member.id.as_str(), today, today);
        let created = Remote::<BorrowRecord>::create(&backend, &record).await.expect("should lend");
        assert_eq!(Some(5), backend.snapshot().book(potter.id.as_str()).map(|b| b.available_copies));

        let returned = backend.return_record(created.id.as_str()).await.expect("should return");
        assert_eq!(Some(today), returned.return_date);
        let again = backend.return_record(created.id.as_str()).await;
        assert!(matches!(again, Err(LibraryError::AlreadyReturned { .. })));
    }

    #[tokio::test]
    async fn test_should_reject_unknown_update() {
        let backend = backend();
        let book = Book::new("Unknown", "None", 2000, 1, "a1");
        let res = Remote::<Book>::update(&backend, &book).await;
        assert!(matches!(res, Err(LibraryError::NotFound { .. })));
    }
}
