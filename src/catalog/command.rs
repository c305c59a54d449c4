pub mod add_author_cmd;
pub mod add_book_cmd;
pub mod add_member_cmd;
pub mod remove_entity_cmd;
pub mod update_book_cmd;
