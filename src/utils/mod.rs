pub mod changelog;
pub mod config;

pub mod testing;
