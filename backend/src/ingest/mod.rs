//! Server side of the CSV ingestion workflow.
//!
//! - `table`: header listing and full reads of an uploaded CSV.
//! - `normalize`: projection of raw records through a `FieldMapping`.
//! - `validate`: per-row field rules.
//! - `storage`: SQLite persistence of committed records.

pub mod normalize;
pub mod storage;
pub mod table;
pub mod validate;
