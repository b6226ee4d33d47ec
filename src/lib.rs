// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod clusters;
pub mod config;
pub mod core;
pub mod error;
pub mod query;
pub mod record;
pub mod specs;

pub mod csv;
pub mod file;
pub mod log;
pub mod progress;
pub mod scrape;
pub mod store;

pub use crate::core::{Fetch, HttpFetcher};
pub use error::{Result, ScrapeError};
pub use record::{Citation, Inventor, PatentNumber, PatentRecord};
