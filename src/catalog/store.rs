use chrono::NaiveDate;
use indexmap::IndexMap;
use crate::authors::domain::model::Author;
use crate::books::domain::model::Book;
use crate::checkout::domain::model::BorrowRecord;
use crate::core::domain::Identifiable;
use crate::core::library::{EntityKind, LibraryError, LibraryResult};
use crate::members::domain::model::Member;

// Collection keeps one kind of entity keyed by id, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    kind: EntityKind,
    items: IndexMap<String, T>,
}

impl<T: Identifiable + Clone> Collection<T> {
    pub fn new(kind: EntityKind) -> Self {
        Self { kind, items: IndexMap::new() }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    // replaces the whole collection with a freshly synchronized snapshot
    pub fn load(&mut self, snapshot: Vec<T>) {
        self.items = snapshot.into_iter().map(|item| (item.id(), item)).collect();
    }

    // inserts or replaces in place; a replaced entity keeps its position
    pub fn upsert(&mut self, item: T) -> Option<T> {
        self.items.insert(item.id(), item)
    }

    pub fn update(&mut self, item: T) -> LibraryResult<T> {
        match self.items.get_mut(item.id().as_str()) {
            Some(existing) => Ok(std::mem::replace(existing, item)),
            None => Err(self.not_found(item.id().as_str())),
        }
    }

    pub fn remove(&mut self, id: &str) -> LibraryResult<T> {
        self.items.shift_remove(id).ok_or_else(|| self.not_found(id))
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.get(id)
    }

    pub fn find(&self, id: &str) -> LibraryResult<&T> {
        self.items.get(id).ok_or_else(|| self.not_found(id))
    }

    pub(crate) fn find_mut(&mut self, id: &str) -> LibraryResult<&mut T> {
        let kind = self.kind;
        self.items.get_mut(id).ok_or_else(|| LibraryError::not_found(
            format!("{} with id {} not found", kind, id).as_str()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.items.values().cloned().collect()
    }

    fn not_found(&self, id: &str) -> LibraryError {
        LibraryError::not_found(format!("{} with id {} not found", self.kind, id).as_str())
    }
}

/// In-memory cache of the four catalog collections.
///
/// The store is the single owner of catalog state on the client side. It is
/// refreshed wholesale from the remote source with the `load_*` methods and
/// mutated one entity at a time otherwise; every method either applies its
/// whole change or fails without touching anything.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogStore {
    books: Collection<Book>,
    authors: Collection<Author>,
    members: Collection<Member>,
    records: Collection<BorrowRecord>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            books: Collection::new(EntityKind::Book),
            authors: Collection::new(EntityKind::Author),
            members: Collection::new(EntityKind::Member),
            records: Collection::new(EntityKind::BorrowRecord),
        }
    }

    pub fn load_books(&mut self, snapshot: Vec<Book>) {
        self.books.load(snapshot);
    }

    pub fn load_authors(&mut self, snapshot: Vec<Author>) {
        self.authors.load(snapshot);
    }

    pub fn load_members(&mut self, snapshot: Vec<Member>) {
        self.members.load(snapshot);
    }

    pub fn load_borrow_records(&mut self, snapshot: Vec<BorrowRecord>) {
        self.records.load(snapshot);
    }

    pub fn books(&self) -> &Collection<Book> {
        &self.books
    }

    pub fn authors(&self) -> &Collection<Author> {
        &self.authors
    }

    pub fn members(&self) -> &Collection<Member> {
        &self.members
    }

    pub fn borrow_records(&self) -> &Collection<BorrowRecord> {
        &self.records
    }

    pub fn book(&self, id: &str) -> Option<&Book> {
        self.books.get(id)
    }

    pub fn author(&self, id: &str) -> Option<&Author> {
        self.authors.get(id)
    }

    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.get(id)
    }

    pub fn borrow_record(&self, id: &str) -> Option<&BorrowRecord> {
        self.records.get(id)
    }

    pub fn upsert_book(&mut self, book: Book) -> LibraryResult<()> {
        book.validate()?;
        self.books.upsert(book);
        Ok(())
    }

    pub fn update_book(&mut self, book: Book) -> LibraryResult<Book> {
        book.validate()?;
        self.books.update(book)
    }

    pub fn remove_book(&mut self, id: &str) -> LibraryResult<Book> {
        self.books.remove(id)
    }

    pub fn upsert_author(&mut self, author: Author) -> LibraryResult<()> {
        author.validate()?;
        self.authors.upsert(author);
        Ok(())
    }

    pub fn update_author(&mut self, author: Author) -> LibraryResult<Author> {
        author.validate()?;
        self.authors.update(author)
    }

    pub fn remove_author(&mut self, id: &str) -> LibraryResult<Author> {
        self.authors.remove(id)
    }

    pub fn upsert_member(&mut self, member: Member) -> LibraryResult<()> {
        member.validate()?;
        self.members.upsert(member);
        Ok(())
    }

    pub fn update_member(&mut self, member: Member) -> LibraryResult<Member> {
        member.validate()?;
        self.members.update(member)
    }

    pub fn remove_member(&mut self, id: &str) -> LibraryResult<Member> {
        self.members.remove(id)
    }

    pub fn upsert_borrow_record(&mut self, record: BorrowRecord) -> LibraryResult<()> {
        if record.borrow_date > record.due_date {
            return Err(LibraryError::invalid_range(
                format!("record {} is due {} before it was borrowed {}",
                        record.id, record.due_date, record.borrow_date).as_str()));
        }
        self.records.upsert(record);
        Ok(())
    }

    pub fn update_borrow_record(&mut self, record: BorrowRecord) -> LibraryResult<BorrowRecord> {
        if record.borrow_date > record.due_date {
            return Err(LibraryError::invalid_range(
                format!("record {} is due {} before it was borrowed {}",
                        record.id, record.due_date, record.borrow_date).as_str()));
        }
        self.records.update(record)
    }

    pub fn remove_borrow_record(&mut self, id: &str) -> LibraryResult<BorrowRecord> {
        self.records.remove(id)
    }

    pub(crate) fn book_mut(&mut self, id: &str) -> LibraryResult<&mut Book> {
        self.books.find_mut(id)
    }

    pub(crate) fn borrow_record_mut(&mut self, id: &str) -> LibraryResult<&mut BorrowRecord> {
        self.records.find_mut(id)
    }

    pub fn available_books(&self) -> Vec<&Book> {
        self.books.iter().filter(|b| b.is_available()).collect()
    }

    pub fn books_by_author(&self, author_id: &str) -> Vec<&Book> {
        self.books.iter().filter(|b| b.author_id == author_id).collect()
    }

    pub fn records_by_member(&self, member_id: &str) -> Vec<&BorrowRecord> {
        self.records.iter().filter(|r| r.member_id == member_id).collect()
    }

    pub fn records_by_book(&self, book_id: &str) -> Vec<&BorrowRecord> {
        self.records.iter().filter(|r| r.book_id == book_id).collect()
    }

    pub fn active_records(&self) -> Vec<&BorrowRecord> {
        self.records.iter().filter(|r| r.is_active()).collect()
    }

    pub fn overdue_records(&self, today: NaiveDate) -> Vec<&BorrowRecord> {
        self.records.iter().filter(|r| r.is_active() && r.due_date < today).collect()
    }

    // inclusive on both ends
    pub fn records_borrowed_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<&BorrowRecord> {
        self.records.iter().filter(|r| r.borrow_date >= start && r.borrow_date <= end).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use crate::authors::domain::model::Author;
    use crate::books::domain::model::Book;
    use crate::catalog::store::CatalogStore;
    use crate::checkout::domain::model::BorrowRecord;
    use crate::core::library::LibraryError;
    use crate::members::domain::model::Member;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date")
    }

    #[tokio::test]
    async fn test_should_load_snapshot_in_order() {
        let mut store = CatalogStore::new();
        let first = Book::new("1984", "Dystopian Fiction", 1949, 4, "a1");
        let second = Book::new("Animal Farm", "Political Satire", 1945, 2, "a1");
        store.upsert_book(Book::new("Stale", "Fiction", 2000, 1, "a9")).expect("should add book");
        store.load_books(vec![first.clone(), second.clone()]);
        let titles: Vec<&str> = store.books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(vec!["1984", "Animal Farm"], titles);
    }

    #[tokio::test]
    async fn test_should_upsert_in_place() {
        let mut store = CatalogStore::new();
        let mut first = Member::new("Jack Smith", "jack@email.com", "+1-555-0101");
        let second = Member::new("Emily Johnson", "emily@email.com", "+1-555-0102");
        store.upsert_member(first.clone()).expect("should add member");
        store.upsert_member(second).expect("should add member");
        first.name = "Jack R. Smith".to_string();
        store.upsert_member(first.clone()).expect("should replace member");
        assert_eq!(2, store.members().len());
        assert_eq!("Jack R. Smith", store.members().iter().next().expect("first member").name.as_str());
    }

    #[tokio::test]
    async fn test_should_fail_mutating_missing_entities() {
        let mut store = CatalogStore::new();
        assert!(matches!(store.remove_book("missing"), Err(LibraryError::NotFound { .. })));
        assert!(matches!(store.update_author(Author::new("Jane Austen")), Err(LibraryError::NotFound { .. })));
        assert!(matches!(store.remove_borrow_record("missing"), Err(LibraryError::NotFound { .. })));
        assert!(matches!(store.remove_member("missing"), Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_reject_invalid_entities_without_mutation() {
        let mut store = CatalogStore::new();
        let mut book = Book::new("Emma", "Romance", 1815, 2, "a4");
        store.upsert_book(book.clone()).expect("should add book");
        book.available_copies = 5;
        assert!(store.update_book(book).is_err());
        assert_eq!(2, store.books().iter().next().expect("book").available_copies);
        let backwards = BorrowRecord::new("b1", "m1", today(), today() - Duration::days(1));
        assert!(matches!(store.upsert_borrow_record(backwards), Err(LibraryError::InvalidRange { .. })));
        assert!(store.borrow_records().is_empty());
    }

    #[tokio::test]
    async fn test_should_answer_secondary_queries() {
        let mut store = CatalogStore::new();
        let mut out = Book::new("To Kill a Mockingbird", "Fiction", 1960, 1, "a2");
        out.available_copies = 0;
        let shelf = Book::new("Go Set a Watchman", "Fiction", 2015, 1, "a2");
        store.upsert_book(out.clone()).expect("should add book");
        store.upsert_book(shelf.clone()).expect("should add book");
        let overdue = BorrowRecord::new(out.id.as_str(), "m1", today() - Duration::days(20), today() - Duration::days(6));
        let mut returned = BorrowRecord::new(shelf.id.as_str(), "m2", today() - Duration::days(15), today() - Duration::days(1));
        returned.return_date = Some(today() - Duration::days(1));
        store.upsert_borrow_record(overdue.clone()).expect("should add record");
        store.upsert_borrow_record(returned.clone()).expect("should add record");

        assert_eq!(vec![&shelf], store.available_books());
        assert_eq!(2, store.books_by_author("a2").len());
        assert_eq!(vec![&overdue], store.records_by_member("m1"));
        assert_eq!(vec![&returned], store.records_by_book(shelf.id.as_str()));
        assert_eq!(vec![&overdue], store.active_records());
        assert_eq!(vec![&overdue], store.overdue_records(today()));
        assert_eq!(vec![&returned], store.records_borrowed_between(today() - Duration::days(16), today() - Duration::days(10)));
    }
}
