//! Error types for spreadsheet operations.

use thiserror::Error;

/// Errors that can occur while reading or mutating spreadsheet tables.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// No sheet with the given name exists in the spreadsheet.
    #[error("unknown sheet {name:?} in spreadsheet {spreadsheet_id}")]
    UnknownSheet {
        spreadsheet_id: String,
        name: String,
    },

    /// The header row read back from the backend is malformed.
    #[error("corrupt header row: {detail}")]
    SchemaCorrupt { detail: String },

    /// A freshly written header does not cover every requested field.
    #[error("schema mapping failed: requested {requested} fields, header has {assigned} columns")]
    SchemaMappingFailed { requested: usize, assigned: usize },

    /// A row's value count differs from the declared field count.
    #[error("row {row} has {actual} values, expected {expected}")]
    RowShapeMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A sort key has no entry in the sheet's column schema.
    #[error("sort column {column:?} is not present in the header row")]
    UnknownSortColumn { column: String },

    /// The duplicate-and-hide batch that creates a shadow sheet failed.
    #[error("failed to create sheet snapshot")]
    SnapshotCreateFailed {
        #[source]
        source: Box<SheetsError>,
    },

    /// The backend base URL cannot carry path segments.
    #[error("invalid backend base url: {url}")]
    InvalidBaseUrl { url: String },

    /// HTTP transport failure.
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the request.
    #[error("backend returned status {status}: {body}")]
    Api { status: u16, body: String },
}

/// Result type alias for spreadsheet operations.
pub type Result<T> = std::result::Result<T, SheetsError>;

impl SheetsError {
    /// Create an UnknownSheet error.
    pub fn unknown_sheet(spreadsheet_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownSheet {
            spreadsheet_id: spreadsheet_id.into(),
            name: name.into(),
        }
    }

    /// Create a SchemaCorrupt error.
    pub fn schema_corrupt(detail: impl Into<String>) -> Self {
        Self::SchemaCorrupt {
            detail: detail.into(),
        }
    }

    /// Create an UnknownSortColumn error.
    pub fn unknown_sort_column(column: impl Into<String>) -> Self {
        Self::UnknownSortColumn {
            column: column.into(),
        }
    }

    /// Wrap a backend failure from snapshot creation.
    pub fn snapshot_create_failed(source: SheetsError) -> Self {
        Self::SnapshotCreateFailed {
            source: Box::new(source),
        }
    }
}
