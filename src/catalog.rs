pub mod store;
pub mod projection;
pub mod command;
