use std::sync::Arc;
use crate::authors::domain::model::Author;
use crate::books::domain::model::Book;
use crate::checkout::domain::model::BorrowRecord;
use crate::core::clock::Clock;
use crate::core::domain::{Configuration, SourceKind};
use crate::core::library::LibraryResult;
use crate::gateway::http::remote::{build_http_client, HttpRemote, AUTHORS_PATH, BOOKS_PATH, BORROWED_BOOKS_PATH, MEMBERS_PATH};
use crate::gateway::memory::remote::MemoryBackend;
use crate::gateway::memory::seed::seed_catalog;
use crate::gateway::source::RemoteSource;
use crate::members::domain::model::Member;

pub fn create_remote_source(config: &Configuration, clock: Arc<dyn Clock>) -> LibraryResult<RemoteSource> {
    match config.source {
        SourceKind::Http => {
            let client = build_http_client(config)?;
            let base_url = config.base_url.as_str();
            Ok(RemoteSource::new(
                Box::new(HttpRemote::<Book>::new(client.clone(), base_url, BOOKS_PATH, clock.clone())),
                Box::new(HttpRemote::<Author>::new(client.clone(), base_url, AUTHORS_PATH, clock.clone())),
                Box::new(HttpRemote::<Member>::new(client.clone(), base_url, MEMBERS_PATH, clock.clone())),
                Arc::new(HttpRemote::<BorrowRecord>::new(client, base_url, BORROWED_BOOKS_PATH, clock)),
            ))
        }
        SourceKind::InMemory => {
            let store = seed_catalog(clock.today())?;
            Ok(MemoryBackend::new(config, clock, store).into_source())
        }
    }
}
