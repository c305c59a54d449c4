pub mod authors;
pub mod books;
pub mod catalog;
pub mod checkout;
pub mod core;
pub mod desk;
pub mod gateway;
pub mod members;
pub mod search;
pub mod utils;
