pub mod borrow_book_cmd;
pub mod delete_record_cmd;
pub mod return_book_cmd;
pub mod search_records_cmd;
