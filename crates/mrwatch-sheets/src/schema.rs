//! Column schema reconciliation.
//!
//! A table's schema is the literal first row of its sheet: the cell at
//! column N holds the name of column N. Index assignment is append-only —
//! once a name has an index it keeps it for the lifetime of the sheet, and
//! new names are only ever assigned the next free index. That is what keeps
//! previously written rows aligned when the column set grows.

use serde_json::Value;
use tracing::debug;

use crate::api::ValueRange;
use crate::backend::SpreadsheetBackend;
use crate::error::{Result, SheetsError};
use crate::ops::SheetRef;

/// An ordered name→index mapping for one sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: Vec<String>,
}

impl ColumnSchema {
    /// Build a schema assigning indices to `fields` in the order given.
    ///
    /// Duplicate names collapse onto their first index, so the resulting
    /// schema can be narrower than the input.
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut schema = Self::default();
        for field in fields {
            schema.add(field.as_ref());
        }
        schema
    }

    fn from_columns(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// The index assigned to a column name, if any.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Assign the next free index to `name`, or return its existing index.
    pub fn add(&mut self, name: &str) -> usize {
        match self.index_of(name) {
            Some(index) => index,
            None => {
                self.columns.push(name.to_string());
                self.columns.len() - 1
            }
        }
    }

    /// Column names in index order — the literal header row.
    pub fn header(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Read the schema of a sheet, or `None` when the first row is empty.
///
/// An empty first row means "no schema yet" and is not an error; a
/// multi-row response or a non-text header cell is `SchemaCorrupt`.
pub fn resolve_schema<B: SpreadsheetBackend>(
    backend: &B,
    target: &SheetRef,
) -> Result<Option<ColumnSchema>> {
    let range = format!("{}!1:1", target.sheet_name);
    let header = backend.read_range(&target.spreadsheet_id, &range)?;
    if header.values.is_empty() || header.values[0].is_empty() {
        return Ok(None);
    }
    if header.values.len() != 1 {
        return Err(SheetsError::schema_corrupt(format!(
            "expected a single header row, got {} rows",
            header.values.len()
        )));
    }
    let mut columns = Vec::with_capacity(header.values[0].len());
    for cell in &header.values[0] {
        match cell {
            Value::String(name) => columns.push(name.clone()),
            other => {
                return Err(SheetsError::schema_corrupt(format!(
                    "header cell is not text: {other}"
                )));
            }
        }
    }
    Ok(Some(ColumnSchema::from_columns(columns)))
}

/// Make sure every field in `fields` has a column index, widening the
/// header if needed, and return the resulting schema.
///
/// Existing index assignments are never altered; new fields append at the
/// next free index. The header row is rewritten only when it changed.
pub fn ensure_schema<B: SpreadsheetBackend>(
    backend: &B,
    target: &SheetRef,
    fields: &[String],
) -> Result<ColumnSchema> {
    match resolve_schema(backend, target)? {
        None => {
            let schema = ColumnSchema::from_fields(fields);
            write_header(backend, target, &schema)?;
            if schema.len() != fields.len() {
                return Err(SheetsError::SchemaMappingFailed {
                    requested: fields.len(),
                    assigned: schema.len(),
                });
            }
            debug!(
                sheet = %target.sheet_name,
                columns = schema.len(),
                "wrote initial header row"
            );
            Ok(schema)
        }
        Some(mut schema) => {
            let before = schema.len();
            for field in fields {
                schema.add(field);
            }
            if schema.len() != before {
                write_header(backend, target, &schema)?;
                debug!(
                    sheet = %target.sheet_name,
                    added = schema.len() - before,
                    columns = schema.len(),
                    "widened header row"
                );
            }
            Ok(schema)
        }
    }
}

fn write_header<B: SpreadsheetBackend>(
    backend: &B,
    target: &SheetRef,
    schema: &ColumnSchema,
) -> Result<()> {
    let cells = schema
        .header()
        .iter()
        .map(|name| Value::String(name.clone()))
        .collect();
    backend.write_range(
        &target.spreadsheet_id,
        &target.sheet_name,
        &ValueRange::single_row(cells),
    )
}
