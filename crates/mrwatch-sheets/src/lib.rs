//! Transactional table updates against the Google Sheets REST API.
//!
//! The backend offers no transactions, only unordered primitives (read a
//! range, clear a range, update a range, apply a structural batch). This
//! crate layers three things on top:
//!
//! - a **column schema registry** that stores a name→index mapping in the
//!   sheet's header row and evolves it append-only,
//! - **table operations** (insert / clear / sort) that each apply in a
//!   single backend call,
//! - a **snapshot transaction manager** that stages all mutations in a
//!   hidden duplicate of the target sheet and swaps it into place with one
//!   atomic batch on commit.
//!
//! # Example
//!
//! ```no_run
//! use mrwatch_sheets::{CellValue, InsertPlan, RestBackend, with_snapshot};
//!
//! let backend = RestBackend::new("access-token").unwrap();
//! with_snapshot(&backend, "spreadsheet-id", "Merge Requests", |snapshot| {
//!     snapshot.clear()?;
//!     let mut plan = InsertPlan::new(["Student", "Task"]);
//!     plan.push_row(vec![CellValue::text("ivanov"), CellValue::text("hw1")]);
//!     snapshot.insert(&plan)?;
//!     snapshot.sort(&["Student".to_string()])
//! })
//! .unwrap();
//! ```

pub mod api;
mod backend;
mod cell;
mod error;
mod ops;
mod rest;
mod schema;
mod snapshot;

pub use backend::SpreadsheetBackend;
pub use cell::{CellValue, RichCell, Tone, encode_cell};
pub use error::{Result, SheetsError};
pub use ops::{InsertPlan, SheetRef, clear, insert, resolve_sheet, sort};
pub use rest::{DEFAULT_BASE_URL, RestBackend};
pub use schema::{ColumnSchema, ensure_schema, resolve_schema};
pub use snapshot::{Snapshot, SnapshotState, with_snapshot};
