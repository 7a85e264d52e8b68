//! listings-io - Tabular I/O for listings datasets
//!
//! This crate loads a listings dataset into an ordered in-memory table and
//! writes augmented tables back out:
//!
//! - **CSV/TSV**: delimited text with per-column type inference
//!
//! # Design
//!
//! Readers implement the `TableReader` trait. Row order always equals file
//! order, and a record that cannot be parsed is an error rather than a
//! skipped row, so columns appended later can be aligned by position.

pub mod reader;
pub mod schema;
pub mod table;

#[cfg(feature = "csv")]
pub mod csv_reader;

#[cfg(feature = "csv")]
pub mod csv_writer;

pub use reader::*;
pub use schema::*;
pub use table::*;
