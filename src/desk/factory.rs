use std::sync::Arc;
use crate::checkout::domain::service::BorrowServiceImpl;
use crate::core::clock::{Clock, SystemClock};
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::desk::LendingDesk;
use crate::gateway::factory::create_remote_source;

pub fn create_lending_desk(config: &Configuration) -> LibraryResult<LendingDesk> {
    create_lending_desk_with_clock(config, Arc::new(SystemClock))
}

pub fn create_lending_desk_with_clock(config: &Configuration, clock: Arc<dyn Clock>) -> LibraryResult<LendingDesk> {
    config.validate()?;
    let source = create_remote_source(config, clock.clone())?;
    let service = Box::new(BorrowServiceImpl::new(config, clock.clone()));
    Ok(LendingDesk::new(config, service, source, clock))
}

// seeded in-memory desk pinned to 2024-06-10, synchronized and ready to share
#[cfg(test)]
pub(crate) async fn create_test_desk() -> crate::desk::SharedDesk {
    let today = chrono::NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date");
    let mut desk = create_lending_desk_with_clock(&Configuration::in_memory(),
                                                  Arc::new(crate::core::clock::FixedClock::new(today)))
        .expect("should create desk");
    desk.sync_all().await.expect("should sync desk");
    desk.shared()
}
