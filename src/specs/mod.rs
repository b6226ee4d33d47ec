// src/specs/mod.rs
//! # Scraping "specs" module
//!
//! Page-specific parsers for the patent full-text site. Each spec knows where
//! the ground truth lives in one kind of page and how to pull it out.
//!
//! ## What lives here
//! - **Pure parsing** of raw pages: no networking, no files, no configuration.
//!   Every function here is a function of the page text alone.
//! - **Position rules** the pages rely on (the header is table block 2; a
//!   heading's content is the next `<HR>` section), each behind a named,
//!   bounds-checked lookup.
//! - **Tolerant extraction**: a row, label or section that does not match its
//!   expected shape is skipped and the field stays unset. Nothing returns an
//!   error.
//!
//! ## What does **not** live here
//! - Fetching, caching, paging (`scrape`, `store`).
//! - Export formatting (`file`, `csv`).
//!
//! ## Typical call chain
//! ```text
//! cli → scrape::scrape_patent → store / net → specs::patent::parse
//!                                              ├─ tables::segment + parse_header
//!                                              └─ sections::parse_sections
//! cli → scrape::crawl_search → specs::search::parse_results_page (per page)
//! ```
//!
//! ## Specs
//! - `tables` – table blocks; patent number, issue date, classification rows.
//! - `sections` – `<HR>` sections; title, abstract, narrative text, citations,
//!   inventors table.
//! - `patent` – orchestration of the two into a `PatentRecord`.
//! - `search` – result listing: patent numbers, next-page link, total count.
pub mod patent;
pub mod search;
pub mod sections;
pub mod tables;
