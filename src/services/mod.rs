pub mod database;
pub mod statistics;
