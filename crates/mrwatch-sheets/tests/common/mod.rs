//! In-memory spreadsheet backend for exercising the table engine.
//!
//! Mirrors the backend contract the engine relies on, including the
//! all-or-nothing batch guarantee: a batch is applied to a staged copy of
//! the spreadsheet and only swapped in when every request succeeded.

#![allow(dead_code)]

use std::cell::RefCell;

use mrwatch_sheets::api::{CellData, ExtendedValue, Request, SheetProperties, ValueRange};
use mrwatch_sheets::{Result, SheetsError, SpreadsheetBackend};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct FakeSheet {
    pub id: i64,
    pub title: String,
    pub hidden: bool,
    pub grid: Vec<Vec<CellData>>,
}

#[derive(Debug)]
pub struct FakeBackend {
    spreadsheet_id: String,
    sheets: RefCell<Vec<FakeSheet>>,
    calls: RefCell<Vec<&'static str>>,
    fail_next_batch: RefCell<Option<String>>,
}

impl FakeBackend {
    pub fn new(spreadsheet_id: &str) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.to_string(),
            sheets: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
            fail_next_batch: RefCell::new(None),
        }
    }

    pub fn add_sheet(&self, id: i64, title: &str) {
        self.sheets.borrow_mut().push(FakeSheet {
            id,
            title: title.to_string(),
            hidden: false,
            grid: Vec::new(),
        });
    }

    /// Seed a sheet with plain text rows (row 0 becomes the header row).
    pub fn seed_rows(&self, title: &str, rows: &[&[&str]]) {
        let mut sheets = self.sheets.borrow_mut();
        let sheet = sheets
            .iter_mut()
            .find(|sheet| sheet.title == title)
            .expect("seeded sheet exists");
        sheet.grid = rows
            .iter()
            .map(|row| row.iter().map(|text| text_cell(text)).collect())
            .collect();
    }

    /// Effective text of every cell in a sheet, row-major.
    pub fn grid_text(&self, title: &str) -> Vec<Vec<String>> {
        let sheets = self.sheets.borrow();
        let sheet = sheets
            .iter()
            .find(|sheet| sheet.title == title)
            .expect("sheet exists");
        sheet
            .grid
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect()
    }

    pub fn sheet_titles(&self) -> Vec<String> {
        self.sheets
            .borrow()
            .iter()
            .map(|sheet| sheet.title.clone())
            .collect()
    }

    pub fn sheet(&self, title: &str) -> Option<FakeSheet> {
        self.sheets
            .borrow()
            .iter()
            .find(|sheet| sheet.title == title)
            .cloned()
    }

    /// Titles of sheets other than the named ones (shadow sheets).
    pub fn extra_sheets(&self, known: &[&str]) -> Vec<FakeSheet> {
        self.sheets
            .borrow()
            .iter()
            .filter(|sheet| !known.contains(&sheet.title.as_str()))
            .cloned()
            .collect()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    pub fn calls_of(&self, name: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| **call == name)
            .count()
    }

    /// Make the next batch_update fail without applying anything.
    pub fn fail_next_batch(&self, message: &str) {
        *self.fail_next_batch.borrow_mut() = Some(message.to_string());
    }

    fn record(&self, call: &'static str) {
        self.calls.borrow_mut().push(call);
    }

    fn check_spreadsheet(&self, spreadsheet_id: &str) -> Result<()> {
        if spreadsheet_id == self.spreadsheet_id {
            Ok(())
        } else {
            Err(SheetsError::Api {
                status: 404,
                body: format!("unknown spreadsheet {spreadsheet_id}"),
            })
        }
    }
}

fn text_cell(text: &str) -> CellData {
    CellData {
        user_entered_value: Some(ExtendedValue {
            string_value: Some(text.to_string()),
            formula_value: None,
        }),
        user_entered_format: None,
    }
}

/// The text a literal read of this cell would produce.
pub fn cell_text(cell: &CellData) -> String {
    cell.user_entered_value
        .as_ref()
        .and_then(|value| {
            value
                .string_value
                .clone()
                .or_else(|| value.formula_value.clone())
        })
        .unwrap_or_default()
}

fn split_range(range: &str) -> (&str, Option<&str>) {
    match range.split_once('!') {
        Some((sheet, rows)) => (sheet, Some(rows)),
        None => (range, None),
    }
}

/// Parse a `start:end` row spec into a 0-based row range.
fn parse_rows(spec: &str, row_count: usize) -> (usize, usize) {
    let (start, end) = spec.split_once(':').unwrap_or((spec, spec));
    let start = start.parse::<usize>().map(|row| row - 1).unwrap_or(0);
    let end = end.parse::<usize>().unwrap_or(row_count);
    (start.min(row_count), end.min(row_count))
}

fn batch_error(message: impl Into<String>) -> SheetsError {
    SheetsError::Api {
        status: 400,
        body: message.into(),
    }
}

fn find_sheet<'a>(sheets: &'a mut [FakeSheet], sheet_id: i64) -> Result<&'a mut FakeSheet> {
    sheets
        .iter_mut()
        .find(|sheet| sheet.id == sheet_id)
        .ok_or_else(|| batch_error(format!("no sheet with id {sheet_id}")))
}

fn apply(sheets: &mut Vec<FakeSheet>, request: &Request) -> Result<()> {
    match request {
        Request::DuplicateSheet(duplicate) => {
            if sheets.iter().any(|sheet| {
                sheet.id == duplicate.new_sheet_id || sheet.title == duplicate.new_sheet_name
            }) {
                return Err(batch_error("duplicate sheet id or name"));
            }
            let source = sheets
                .iter()
                .find(|sheet| sheet.id == duplicate.source_sheet_id)
                .ok_or_else(|| batch_error("duplicate source missing"))?;
            let copy = FakeSheet {
                id: duplicate.new_sheet_id,
                title: duplicate.new_sheet_name.clone(),
                hidden: false,
                grid: source.grid.clone(),
            };
            sheets.push(copy);
            Ok(())
        }
        Request::UpdateSheetProperties(update) => {
            if update.fields != "hidden" {
                return Err(batch_error(format!(
                    "unsupported field mask {:?}",
                    update.fields
                )));
            }
            let sheet = find_sheet(sheets, update.properties.sheet_id)?;
            sheet.hidden = update.properties.hidden;
            Ok(())
        }
        Request::DeleteRange(delete) => {
            if delete.shift_dimension != "ROWS" {
                return Err(batch_error("only row shifts are supported"));
            }
            let sheet = find_sheet(sheets, delete.range.sheet_id)?;
            let start = delete.range.start_row_index.unwrap_or(0) as usize;
            let end = delete
                .range
                .end_row_index
                .map(|row| row as usize)
                .unwrap_or(sheet.grid.len());
            let end = end.min(sheet.grid.len());
            if start < end {
                sheet.grid.drain(start..end);
            }
            Ok(())
        }
        Request::CopyPaste(copy) => {
            let source = sheets
                .iter()
                .find(|sheet| sheet.id == copy.source.sheet_id)
                .ok_or_else(|| batch_error("copy source missing"))?
                .grid
                .clone();
            let destination = find_sheet(sheets, copy.destination.sheet_id)?;
            destination.grid = source;
            Ok(())
        }
        Request::DeleteSheet(delete) => {
            let position = sheets
                .iter()
                .position(|sheet| sheet.id == delete.sheet_id)
                .ok_or_else(|| batch_error(format!("no sheet with id {}", delete.sheet_id)))?;
            sheets.remove(position);
            Ok(())
        }
        Request::SortRange(sort) => {
            let sheet = find_sheet(sheets, sort.range.sheet_id)?;
            let start = sort.range.start_row_index.unwrap_or(0) as usize;
            if start >= sheet.grid.len() {
                return Ok(());
            }
            let specs = sort.sort_specs.clone();
            sheet.grid[start..].sort_by(|left, right| {
                let mut ordering = std::cmp::Ordering::Equal;
                for spec in &specs {
                    let index = spec.dimension_index as usize;
                    let left_key = left.get(index).map(cell_text).unwrap_or_default();
                    let right_key = right.get(index).map(cell_text).unwrap_or_default();
                    ordering = ordering.then(left_key.cmp(&right_key));
                }
                ordering
            });
            Ok(())
        }
        Request::AppendCells(append) => {
            if append.fields != "*" {
                return Err(batch_error("only full-cell appends are supported"));
            }
            let sheet = find_sheet(sheets, append.sheet_id)?;
            for row in &append.rows {
                sheet.grid.push(row.values.clone());
            }
            Ok(())
        }
    }
}

impl SpreadsheetBackend for FakeBackend {
    fn read_range(&self, spreadsheet_id: &str, range: &str) -> Result<ValueRange> {
        self.record("read_range");
        self.check_spreadsheet(spreadsheet_id)?;
        let (title, rows) = split_range(range);
        let sheets = self.sheets.borrow();
        let sheet = sheets
            .iter()
            .find(|sheet| sheet.title == title)
            .ok_or_else(|| batch_error(format!("unable to parse range {range}")))?;
        let (start, end) = match rows {
            Some(spec) => parse_rows(spec, sheet.grid.len()),
            None => (0, sheet.grid.len()),
        };
        let mut values: Vec<Vec<Value>> = sheet.grid[start..end]
            .iter()
            .map(|row| {
                let mut cells: Vec<Value> =
                    row.iter().map(|cell| Value::String(cell_text(cell))).collect();
                while cells.last().is_some_and(|cell| *cell == "") {
                    cells.pop();
                }
                cells
            })
            .collect();
        while values.last().is_some_and(|row| row.is_empty()) {
            values.pop();
        }
        Ok(ValueRange {
            range: Some(range.to_string()),
            values,
        })
    }

    fn write_range(&self, spreadsheet_id: &str, range: &str, values: &ValueRange) -> Result<()> {
        self.record("write_range");
        self.check_spreadsheet(spreadsheet_id)?;
        let (title, _) = split_range(range);
        let mut sheets = self.sheets.borrow_mut();
        let sheet = sheets
            .iter_mut()
            .find(|sheet| sheet.title == title)
            .ok_or_else(|| batch_error(format!("unable to parse range {range}")))?;
        for (row_index, row) in values.values.iter().enumerate() {
            if sheet.grid.len() <= row_index {
                sheet.grid.resize(row_index + 1, Vec::new());
            }
            let grid_row = &mut sheet.grid[row_index];
            for (column_index, value) in row.iter().enumerate() {
                if grid_row.len() <= column_index {
                    grid_row.resize(column_index + 1, CellData::default());
                }
                grid_row[column_index] = match value {
                    Value::Null => CellData::default(),
                    Value::String(text) => text_cell(text),
                    other => text_cell(&other.to_string()),
                };
            }
        }
        Ok(())
    }

    fn clear_range(&self, spreadsheet_id: &str, range: &str) -> Result<()> {
        self.record("clear_range");
        self.check_spreadsheet(spreadsheet_id)?;
        let (title, _) = split_range(range);
        let mut sheets = self.sheets.borrow_mut();
        let sheet = sheets
            .iter_mut()
            .find(|sheet| sheet.title == title)
            .ok_or_else(|| batch_error(format!("unable to parse range {range}")))?;
        sheet.grid.clear();
        Ok(())
    }

    fn batch_update(&self, spreadsheet_id: &str, requests: Vec<Request>) -> Result<()> {
        self.record("batch_update");
        self.check_spreadsheet(spreadsheet_id)?;
        if let Some(message) = self.fail_next_batch.borrow_mut().take() {
            return Err(batch_error(message));
        }
        // Stage the whole batch; swap in only if every request succeeded.
        let mut staged = self.sheets.borrow().clone();
        for request in &requests {
            apply(&mut staged, request)?;
        }
        *self.sheets.borrow_mut() = staged;
        Ok(())
    }

    fn sheets(&self, spreadsheet_id: &str) -> Result<Vec<SheetProperties>> {
        self.record("sheets");
        self.check_spreadsheet(spreadsheet_id)?;
        Ok(self
            .sheets
            .borrow()
            .iter()
            .map(|sheet| SheetProperties {
                sheet_id: sheet.id,
                title: Some(sheet.title.clone()),
                hidden: sheet.hidden,
            })
            .collect())
    }
}
