pub mod remote;
pub mod seed;
