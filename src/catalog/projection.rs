use std::collections::HashMap;
use chrono::NaiveDate;
use serde::Serialize;
use crate::books::domain::model::Book;
use crate::catalog::store::CatalogStore;
use crate::checkout::domain::model::BorrowRecord;
use crate::checkout::domain::status::{derive_status, BorrowStatus};

pub const UNKNOWN_BOOK: &str = "Unknown Book";
pub const UNKNOWN_MEMBER: &str = "Unknown Member";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

// BorrowView is a borrow record joined with the names it references
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowView {
    pub record: BorrowRecord,
    pub book_title: String,
    pub member_name: String,
    pub status: BorrowStatus,
}

impl BorrowView {
    pub fn new(store: &CatalogStore, record: &BorrowRecord, today: NaiveDate) -> Self {
        Self {
            record: record.clone(),
            book_title: store.book(record.book_id.as_str())
                .map(|b| b.title.to_string())
                .unwrap_or_else(|| UNKNOWN_BOOK.to_string()),
            member_name: store.member(record.member_id.as_str())
                .map(|m| m.name.to_string())
                .unwrap_or_else(|| UNKNOWN_MEMBER.to_string()),
            status: derive_status(record, today),
        }
    }
}

pub fn borrow_views<'a, I>(store: &CatalogStore, records: I, today: NaiveDate) -> Vec<BorrowView>
where
    I: IntoIterator<Item = &'a BorrowRecord>,
{
    records.into_iter().map(|r| BorrowView::new(store, r, today)).collect()
}

// BookView is a book joined with its author's name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookView {
    pub book: Book,
    pub author_name: String,
}

impl BookView {
    pub fn new(store: &CatalogStore, book: &Book) -> Self {
        Self {
            book: book.clone(),
            author_name: store.author(book.author_id.as_str())
                .map(|a| a.name.to_string())
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        }
    }
}

pub fn book_views(store: &CatalogStore) -> Vec<BookView> {
    store.books().iter().map(|b| BookView::new(store, b)).collect()
}

// CirculationSummary holds the dashboard totals
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CirculationSummary {
    pub total_books: usize,
    pub total_authors: usize,
    pub total_members: usize,
    pub active_borrowings: usize,
    pub overdue_borrowings: usize,
    pub returned_borrowings: usize,
}

impl CirculationSummary {
    pub fn from_store(store: &CatalogStore, today: NaiveDate) -> Self {
        let mut summary = Self {
            total_books: store.books().len(),
            total_authors: store.authors().len(),
            total_members: store.members().len(),
            active_borrowings: 0,
            overdue_borrowings: 0,
            returned_borrowings: 0,
        };
        for record in store.borrow_records().iter() {
            match derive_status(record, today) {
                BorrowStatus::Returned => summary.returned_borrowings += 1,
                BorrowStatus::Overdue { .. } => {
                    summary.active_borrowings += 1;
                    summary.overdue_borrowings += 1;
                }
                BorrowStatus::Active => summary.active_borrowings += 1,
            }
        }
        summary
    }
}

pub fn active_borrowings_by_member(store: &CatalogStore) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for record in store.active_records() {
        *counts.entry(record.member_id.to_string()).or_insert(0) += 1;
    }
    counts
}

pub fn active_borrowings_by_book(store: &CatalogStore) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for record in store.active_records() {
        *counts.entry(record.book_id.to_string()).or_insert(0) += 1;
    }
    counts
}

// the first `limit` active borrowings in store order, as shown on the dashboard
pub fn recent_borrowings(store: &CatalogStore, today: NaiveDate, limit: usize) -> Vec<BorrowView> {
    borrow_views(store, store.active_records().into_iter().take(limit), today)
}

pub fn overdue_borrowings(store: &CatalogStore, today: NaiveDate) -> Vec<BorrowView> {
    borrow_views(store, store.overdue_records(today), today)
}

// AvailabilityDrift reports a book whose available copies disagree with its active records
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityDrift {
    pub book_id: String,
    pub recorded: u32,
    pub expected: u32,
}

pub fn availability_drift(store: &CatalogStore) -> Vec<AvailabilityDrift> {
    let active = active_borrowings_by_book(store);
    store.books().iter().filter_map(|book| {
        let lent = active.get(book.id.as_str()).copied().unwrap_or(0) as u32;
        let expected = book.total_copies.saturating_sub(lent);
        if expected == book.available_copies {
            None
        } else {
            Some(AvailabilityDrift { book_id: book.id.to_string(), recorded: book.available_copies, expected })
        }
    }).collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use crate::authors::domain::model::Author;
    use crate::books::domain::model::Book;
    use crate::catalog::projection::{active_borrowings_by_member, availability_drift, book_views, borrow_views,
                                     overdue_borrowings, recent_borrowings, CirculationSummary, UNKNOWN_AUTHOR, UNKNOWN_BOOK};
    use crate::catalog::store::CatalogStore;
    use crate::checkout::domain::model::BorrowRecord;
    use crate::checkout::domain::status::BorrowStatus;
    use crate::members::domain::model::Member;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date")
    }

    fn store() -> (CatalogStore, Book, Member) {
        let mut store = CatalogStore::new();
        let author = Author::new("Jane Austen");
        let mut book = Book::new("Pride and Prejudice", "Romance", 1813, 3, author.id.as_str());
        book.available_copies = 1;
        let member = Member::new("Sarah Davis", "sarah.davis@email.com", "+1-555-0104");
        store.upsert_author(author).expect("should add author");
        store.upsert_book(book.clone()).expect("should add book");
        store.upsert_member(member.clone()).expect("should add member");
        store.upsert_borrow_record(BorrowRecord::new(book.id.as_str(), member.id.as_str(),
                                                     today() - Duration::days(3), today() + Duration::days(11)))
            .expect("should add record");
        store.upsert_borrow_record(BorrowRecord::new(book.id.as_str(), member.id.as_str(),
                                                     today() - Duration::days(20), today() - Duration::days(6)))
            .expect("should add record");
        (store, book, member)
    }

    #[tokio::test]
    async fn test_should_join_names_with_unknown_fallback() {
        let (mut store, book, member) = store();
        let views = borrow_views(&store, store.borrow_records().iter(), today());
        assert_eq!("Pride and Prejudice", views[0].book_title.as_str());
        assert_eq!("Sarah Davis", views[0].member_name.as_str());
        assert_eq!(BorrowStatus::Overdue { days_late: 6 }, views[1].status);

        store.remove_book(book.id.as_str()).expect("should remove book");
        store.remove_author(book.author_id.as_str()).ok();
        let views = borrow_views(&store, store.borrow_records().iter(), today());
        assert_eq!(UNKNOWN_BOOK, views[0].book_title.as_str());
        assert_eq!(member.name, views[0].member_name);
    }

    #[tokio::test]
    async fn test_should_summarize_circulation() {
        let (mut store, _, _) = store();
        let mut returned = BorrowRecord::new("b9", "m9", today() - Duration::days(15), today() - Duration::days(1));
        returned.return_date = Some(today() - Duration::days(1));
        store.upsert_borrow_record(returned).expect("should add record");
        let summary = CirculationSummary::from_store(&store, today());
        assert_eq!(1, summary.total_books);
        assert_eq!(2, summary.active_borrowings);
        assert_eq!(1, summary.overdue_borrowings);
        assert_eq!(1, summary.returned_borrowings);
    }

    #[tokio::test]
    async fn test_should_count_active_borrowings_per_member() {
        let (store, _, member) = store();
        let counts = active_borrowings_by_member(&store);
        assert_eq!(Some(&2), counts.get(member.id.as_str()));
        assert_eq!(1, recent_borrowings(&store, today(), 1).len());
        assert_eq!(1, overdue_borrowings(&store, today()).len());
    }

    #[tokio::test]
    async fn test_should_detect_availability_drift() {
        let (mut store, book, _) = store();
        assert!(availability_drift(&store).is_empty());
        let mut changed = book.clone();
        changed.available_copies = 3;
        store.update_book(changed).expect("should update book");
        let drift = availability_drift(&store);
        assert_eq!(1, drift.len());
        assert_eq!(1, drift[0].expected);
    }

    #[tokio::test]
    async fn test_should_join_author_names() {
        let (mut store, book, _) = store();
        assert_eq!("Jane Austen", book_views(&store)[0].author_name.as_str());
        store.remove_author(book.author_id.as_str()).expect("should remove author");
        assert_eq!(UNKNOWN_AUTHOR, book_views(&store)[0].author_name.as_str());
    }
}
