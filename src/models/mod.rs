pub mod country;
pub mod statistics;
