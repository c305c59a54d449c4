use std::sync::Arc;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::authors::domain::model::Author;
use crate::books::domain::model::Book;
use crate::checkout::domain::model::BorrowRecord;
use crate::core::library::LibraryResult;
use crate::members::domain::model::Member;

// WireFormat converts a domain model to and from the backend's json shape;
// `today` feeds any field the backend expects to be derived from the date
pub trait WireFormat: Sized + Send + Sync {
    type Dto: Serialize + DeserializeOwned + Send + Sync;

    fn to_wire(&self, today: NaiveDate) -> Self::Dto;

    fn from_wire(dto: Self::Dto) -> LibraryResult<Self>;
}

#[async_trait]
pub trait Remote<Entity>: Sync + Send {
    // fetch the full collection
    async fn list(&self) -> LibraryResult<Vec<Entity>>;

    // create an entity, returning the backend's copy
    async fn create(&self, entity: &Entity) -> LibraryResult<Entity>;

    // replace an entity, returning the backend's copy
    async fn update(&self, entity: &Entity) -> LibraryResult<Entity>;

    // delete an entity
    async fn delete(&self, id: &str) -> LibraryResult<()>;
}

// BorrowRemote adds the borrowed-books endpoints that have no generic counterpart
#[async_trait]
pub trait BorrowRemote: Remote<BorrowRecord> {
    async fn return_record(&self, id: &str) -> LibraryResult<BorrowRecord>;

    async fn search(&self, query: &str) -> LibraryResult<Vec<BorrowRecord>>;
}

// RemoteSource bundles one remote per collection
pub struct RemoteSource {
    pub books: Box<dyn Remote<Book>>,
    pub authors: Box<dyn Remote<Author>>,
    pub members: Box<dyn Remote<Member>>,
    pub records: Arc<dyn BorrowRemote>,
}

impl RemoteSource {
    pub fn new(books: Box<dyn Remote<Book>>, authors: Box<dyn Remote<Author>>,
               members: Box<dyn Remote<Member>>, records: Arc<dyn BorrowRemote>) -> Self {
        Self { books, authors, members, records }
    }
}
