pub mod controller;
pub mod display;
