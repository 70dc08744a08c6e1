// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific scraping specifications for the shuttle site. Each spec owns
//! one page shape and encodes *where the ground truth lives in the HTML*.
//!
//! ## What lives here
//! - **Pure HTML reading** of the root schedule page (`periods`) and of one
//!   route page (`timetables`), into the raw “scraped” shapes in `types`.
//! - **Layout checks**: a broken pair group or a timetable page without a
//!   `<table>` is a `StructureError`, never a silent empty result.
//!
//! ## What does **not** live here
//! - **Text normalization** (fluff stripping, route codes, dates, times). Specs
//!   keep strings as they appear; `parse` turns them into typed values.
//! - **Fetch ordering** – `scrape::run` decides which pages to GET and when.
//!
//! ## Typical call chain
//! ```text
//! cli → scrape::run → specs::periods::scrape_periods(root page)
//!                   → specs::timetables::fetch_timetable(route page) × N
//!                   → parse::build → Ast
//! ```
//!
//! ## Testing notes
//! Every spec is testable offline: feed `Html::parse_document` a small fixture.
pub mod periods;
pub mod timetables;
pub mod types;
