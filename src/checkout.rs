pub mod domain;
pub mod command;
pub mod dto;
