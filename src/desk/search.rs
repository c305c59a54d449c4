use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};
use crate::checkout::domain::model::BorrowRecord;
use crate::core::library::LibraryResult;
use crate::desk::sequencer::Sequencer;
use crate::gateway::source::BorrowRemote;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    // a blank query empties the result list without calling the backend
    Cleared,
    Results(Vec<BorrowRecord>),
    // a later search was issued while this one was in flight
    Superseded,
}

// RecordSearch runs backend searches of borrow records; results of a search
// issued before the newest one are dropped even when they arrive last.
#[derive(Clone)]
pub struct RecordSearch {
    remote: Arc<dyn BorrowRemote>,
    sequencer: Arc<Sequencer>,
    latest: Arc<Mutex<Vec<BorrowRecord>>>,
}

impl RecordSearch {
    pub fn new(remote: Arc<dyn BorrowRemote>) -> Self {
        Self {
            remote,
            sequencer: Arc::new(Sequencer::new()),
            latest: Arc::new(Mutex::new(vec![])),
        }
    }

    pub async fn search(&self, query: &str) -> LibraryResult<SearchOutcome> {
        let ticket = self.sequencer.issue();
        if query.trim().is_empty() {
            self.lock().clear();
            return Ok(SearchOutcome::Cleared);
        }
        let res = self.remote.search(query).await;
        let mut latest = self.lock();
        if !self.sequencer.is_current(ticket) {
            warn!(query, "discarding superseded search result");
            return Ok(SearchOutcome::Superseded);
        }
        let found = res?;
        debug!(query, matches = found.len(), "search results applied");
        *latest = found.clone();
        Ok(SearchOutcome::Results(found))
    }

    pub fn latest(&self) -> Vec<BorrowRecord> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<BorrowRecord>> {
        self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
