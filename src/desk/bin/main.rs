use std::error::Error;
use tracing::{error, info, warn};
use lending_desk::catalog::projection::{overdue_borrowings, recent_borrowings};
use lending_desk::core::domain::Configuration;
use lending_desk::desk::factory::create_lending_desk;
use lending_desk::utils::logging::setup_tracing;

const RECENT_BORROWINGS: usize = 5;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing();

    let config = Configuration::from_env()?;
    info!(source = %config.source, base_url = config.base_url.as_str(), "starting lending desk");
    let mut desk = create_lending_desk(&config)?;
    if let Err(err) = desk.sync_all().await {
        error!(retryable = err.retryable(), "failed to synchronize catalog: {}", err);
        return Err(err.into());
    }

    let summary = desk.summary();
    info!(books = summary.total_books, authors = summary.total_authors, members = summary.total_members,
          active = summary.active_borrowings, overdue = summary.overdue_borrowings,
          returned = summary.returned_borrowings, "circulation summary");

    let today = desk.today();
    for view in recent_borrowings(desk.store(), today, RECENT_BORROWINGS) {
        info!(book = view.book_title.as_str(), member = view.member_name.as_str(),
              due = %view.record.due_date, "recent borrowing");
    }
    for view in overdue_borrowings(desk.store(), today) {
        warn!(book = view.book_title.as_str(), member = view.member_name.as_str(),
              status = %view.status, "overdue borrowing");
    }
    Ok(())
}
