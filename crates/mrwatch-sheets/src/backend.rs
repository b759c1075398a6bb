//! The backend boundary: the spreadsheet primitives the engine builds on.

use crate::api::{Request, SheetProperties, ValueRange};
use crate::error::Result;

/// The five spreadsheet primitives the table engine depends on.
///
/// Everything above this trait — schema reconciliation, table operations,
/// the snapshot transaction protocol — is expressed in terms of these calls
/// and nothing else. `batch_update` must be all-or-nothing: a batch either
/// applies every request in it or none, which is what makes the snapshot
/// commit an atomic swap.
pub trait SpreadsheetBackend {
    /// Read a literal cell range.
    fn read_range(&self, spreadsheet_id: &str, range: &str) -> Result<ValueRange>;

    /// Overwrite a range with raw (unparsed) values.
    fn write_range(&self, spreadsheet_id: &str, range: &str, values: &ValueRange) -> Result<()>;

    /// Clear all values in a range.
    fn clear_range(&self, spreadsheet_id: &str, range: &str) -> Result<()>;

    /// Apply a batch of structural requests atomically.
    fn batch_update(&self, spreadsheet_id: &str, requests: Vec<Request>) -> Result<()>;

    /// List the sheets of a spreadsheet.
    fn sheets(&self, spreadsheet_id: &str) -> Result<Vec<SheetProperties>>;
}
