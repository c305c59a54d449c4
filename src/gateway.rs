pub mod source;
pub mod http;
pub mod memory;
pub mod factory;
