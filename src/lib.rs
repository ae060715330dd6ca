//! Countrymgr - console manager for a reference table of countries
//!
//! This library provides the persistence gateway, statistics and console
//! front end used by the `countrymgr` binary.

pub mod cli;
pub mod config;
pub mod console;
pub mod initialization;
pub mod models;
pub mod services;
