//! Table operations: insert, clear and sort against one sheet.
//!
//! Operations are plain configuration structs handed to free functions; the
//! target sheet is a [`SheetRef`] resolved once. Each operation either fully
//! applies (its single backend call succeeded) or not at all — there is no
//! row-by-row partial application.

use tracing::debug;

use crate::api::{
    AppendCellsRequest, CellData, GridRange, Request, RowData, SORT_ASCENDING, SortRangeRequest,
    SortSpec,
};
use crate::backend::SpreadsheetBackend;
use crate::cell::{CellValue, encode_cell};
use crate::error::{Result, SheetsError};
use crate::schema::{ensure_schema, resolve_schema};

/// A fully resolved addressing handle for one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRef {
    pub spreadsheet_id: String,
    pub sheet_name: String,
    pub sheet_id: i64,
}

/// Resolve a sheet name to its backend identifier.
///
/// Fails with `UnknownSheet` when the spreadsheet has no sheet with that
/// name.
pub fn resolve_sheet<B: SpreadsheetBackend>(
    backend: &B,
    spreadsheet_id: &str,
    name: &str,
) -> Result<SheetRef> {
    let sheets = backend.sheets(spreadsheet_id)?;
    let properties = sheets
        .into_iter()
        .find(|sheet| sheet.title.as_deref() == Some(name))
        .ok_or_else(|| SheetsError::unknown_sheet(spreadsheet_id, name))?;
    Ok(SheetRef {
        spreadsheet_id: spreadsheet_id.to_string(),
        sheet_name: name.to_string(),
        sheet_id: properties.sheet_id,
    })
}

/// A pending bulk insert: the declared fields and the rows to append.
#[derive(Debug, Clone, Default)]
pub struct InsertPlan {
    pub fields: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl InsertPlan {
    /// Plan an insert into the named fields.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Queue one row; its length must match the declared fields.
    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Append every queued row of `plan` in a single backend call.
///
/// A plan with zero rows is a no-op and performs no backend calls at all.
/// Any row whose length differs from the field count fails with
/// `RowShapeMismatch` before the backend is touched. Rows are scattered
/// into the schema's full column width, leaving ungiven columns empty.
pub fn insert<B: SpreadsheetBackend>(
    backend: &B,
    target: &SheetRef,
    plan: &InsertPlan,
) -> Result<()> {
    if plan.rows.is_empty() {
        return Ok(());
    }
    for (index, row) in plan.rows.iter().enumerate() {
        if row.len() != plan.fields.len() {
            return Err(SheetsError::RowShapeMismatch {
                row: index,
                expected: plan.fields.len(),
                actual: row.len(),
            });
        }
    }

    let schema = ensure_schema(backend, target, &plan.fields)?;
    let mut rows = Vec::with_capacity(plan.rows.len());
    for row in &plan.rows {
        let mut cells = vec![CellData::default(); schema.len()];
        for (field, value) in plan.fields.iter().zip(row) {
            let index = schema
                .index_of(field)
                .ok_or_else(|| SheetsError::SchemaMappingFailed {
                    requested: plan.fields.len(),
                    assigned: schema.len(),
                })?;
            cells[index] = encode_cell(value);
        }
        rows.push(RowData { values: cells });
    }

    debug!(
        sheet = %target.sheet_name,
        rows = rows.len(),
        columns = schema.len(),
        "appending rows"
    );
    backend.batch_update(
        &target.spreadsheet_id,
        vec![Request::AppendCells(AppendCellsRequest {
            sheet_id: target.sheet_id,
            rows,
            fields: "*".to_string(),
        })],
    )
}

/// Clear the whole sheet, header row included.
///
/// Idempotent: clearing an already empty sheet succeeds.
pub fn clear<B: SpreadsheetBackend>(backend: &B, target: &SheetRef) -> Result<()> {
    debug!(sheet = %target.sheet_name, "clearing sheet");
    backend.clear_range(&target.spreadsheet_id, &target.sheet_name)
}

/// Sort the data rows of the sheet by the named columns, ascending.
///
/// Row 1 is the header and is excluded from the sort. Keys apply in the
/// given order (first key is primary). A key with no schema entry fails
/// with `UnknownSortColumn` and no reorder happens.
pub fn sort<B: SpreadsheetBackend>(
    backend: &B,
    target: &SheetRef,
    columns: &[String],
) -> Result<()> {
    if columns.is_empty() {
        return Ok(());
    }
    let schema = resolve_schema(backend, target)?.unwrap_or_default();
    let mut sort_specs = Vec::with_capacity(columns.len());
    for column in columns {
        let index = schema
            .index_of(column)
            .ok_or_else(|| SheetsError::unknown_sort_column(column))?;
        sort_specs.push(SortSpec {
            dimension_index: index as i64,
            sort_order: SORT_ASCENDING.to_string(),
        });
    }

    debug!(sheet = %target.sheet_name, keys = ?columns, "sorting data rows");
    backend.batch_update(
        &target.spreadsheet_id,
        vec![Request::SortRange(SortRangeRequest {
            range: GridRange {
                sheet_id: target.sheet_id,
                start_row_index: Some(1),
                ..GridRange::default()
            },
            sort_specs,
        })],
    )
}
