use chrono::{Duration, NaiveDate};
use crate::authors::domain::model::Author;
use crate::books::domain::model::Book;
use crate::catalog::store::CatalogStore;
use crate::checkout::domain::model::BorrowRecord;
use crate::core::library::LibraryResult;
use crate::members::domain::model::Member;

/// Builds the sample catalog served by the in-memory backend.
///
/// Borrow dates are relative to `today`: four records are active (one of them
/// six days overdue) and one was returned yesterday. Availability already
/// accounts for the active records.
pub fn seed_catalog(today: NaiveDate) -> LibraryResult<CatalogStore> {
    let mut store = CatalogStore::new();

    let fitzgerald = Author::new("F. Scott Fitzgerald").with_nationality("American")
        .with_biography("Francis Scott Key Fitzgerald was an American novelist, essayist, short story writer, and screenwriter.");
    let lee = Author::new("Harper Lee").with_nationality("American")
        .with_biography("Nelle Harper Lee was an American novelist best known for her 1960 novel To Kill a Mockingbird.");
    let orwell = Author::new("George Orwell").with_nationality("British")
        .with_biography("Eric Arthur Blair, known by his pen name George Orwell, was an English novelist and essayist.");
    let austen = Author::new("Jane Austen").with_nationality("British")
        .with_biography("Jane Austen was an English novelist known primarily for her six major novels.");
    let rowling = Author::new("J.K. Rowling").with_nationality("British")
        .with_biography("Joanne Rowling, better known by her pen name J. K. Rowling, is a British author and screenwriter.");

    let gatsby = Book::new("The Great Gatsby", "Fiction", 1925, 5, fitzgerald.id.as_str())
        .with_isbn("978-0-7432-7356-5");
    let mockingbird = Book::new("To Kill a Mockingbird", "Fiction", 1960, 3, lee.id.as_str())
        .with_isbn("978-0-06-112008-4");
    let nineteen = Book::new("1984", "Dystopian Fiction", 1949, 4, orwell.id.as_str())
        .with_isbn("978-0-452-28423-4");
    let animal_farm = Book::new("Animal Farm", "Political Satire", 1945, 2, orwell.id.as_str())
        .with_isbn("978-0-452-28424-1");
    let pride = Book::new("Pride and Prejudice", "Romance", 1813, 3, austen.id.as_str())
        .with_isbn("978-0-14-143951-8");
    let potter = Book::new("Harry Potter and the Philosopher's Stone", "Fantasy", 1997, 6, rowling.id.as_str())
        .with_isbn("978-0-439-70818-8");

    let jack = Member::new("Jack Smith", "jack@email.com", "+1-555-0101")
        .with_address("123 Main St, New York, NY 10001");
    let emily = Member::new("Emily Johnson", "emily.johnson@email.com", "+1-555-0102")
        .with_address("456 Oak Ave, Los Angeles, CA 90210");
    let michael = Member::new("Michael Brown", "michael.brown@email.com", "+1-555-0103")
        .with_address("789 Pine Rd, Chicago, IL 60601");
    let sarah = Member::new("Sarah Davis", "sarah.davis@email.com", "+1-555-0104")
        .with_address("321 Elm St, Houston, TX 77001");
    let david = Member::new("David Wilson", "david.wilson@email.com", "+1-555-0105")
        .with_address("654 Maple Dr, Phoenix, AZ 85001");

    let days = Duration::days;
    let active = vec![
        BorrowRecord::new(gatsby.id.as_str(), jack.id.as_str(), today - days(10), today + days(4)),
        BorrowRecord::new(mockingbird.id.as_str(), emily.id.as_str(), today - days(5), today + days(9)),
        BorrowRecord::new(nineteen.id.as_str(), michael.id.as_str(), today - days(20), today - days(6)),
        BorrowRecord::new(pride.id.as_str(), sarah.id.as_str(), today - days(3), today + days(11)),
    ];
    let mut returned = BorrowRecord::new(animal_farm.id.as_str(), david.id.as_str(), today - days(15), today - days(1));
    returned.return_date = Some(today - days(1));

    for author in [fitzgerald, lee, orwell, austen, rowling] {
        store.upsert_author(author)?;
    }
    for book in [gatsby, mockingbird, nineteen, animal_farm, pride, potter] {
        store.upsert_book(book)?;
    }
    for member in [jack, emily, michael, sarah, david] {
        store.upsert_member(member)?;
    }
    for record in active {
        store.book_mut(record.book_id.as_str())?.take_copy()?;
        store.upsert_borrow_record(record)?;
    }
    store.upsert_borrow_record(returned)?;
    Ok(store)
}
