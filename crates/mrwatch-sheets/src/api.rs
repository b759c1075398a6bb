//! Wire types for the Google Sheets v4 REST surface.
//!
//! Only the slice of the API the watcher depends on is modelled: literal
//! value ranges, sheet metadata, and the structural batch requests used by
//! table operations and the snapshot protocol. Field names follow the JSON
//! representation (camelCase) exactly.

use serde::{Deserialize, Serialize};

/// A rectangular block of literal cell values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Vec<serde_json::Value>>,
}

impl ValueRange {
    /// A single-row range, as used for header writes.
    pub fn single_row(cells: Vec<serde_json::Value>) -> Self {
        Self {
            range: None,
            values: vec![cells],
        }
    }
}

/// Metadata of one sheet inside a spreadsheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub sheet_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

/// Spreadsheet metadata as returned by a `fields=sheets.properties` get.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Spreadsheet {
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetEntry {
    pub properties: SheetProperties,
}

/// An RGB colour with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

/// A range on a sheet; unset bounds extend to the sheet's edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    pub sheet_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_row_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_row_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_column_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column_index: Option<i64>,
}

impl GridRange {
    /// The whole of one sheet.
    pub fn whole_sheet(sheet_id: i64) -> Self {
        Self {
            sheet_id,
            ..Self::default()
        }
    }
}

/// The value of a cell as the user would have entered it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellFormat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_entered_value: Option<ExtendedValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_entered_format: Option<CellFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowData {
    pub values: Vec<CellData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub dimension_index: i64,
    pub sort_order: String,
}

/// Ascending sort order token.
pub const SORT_ASCENDING: &str = "ASCENDING";

/// Row shift token for DeleteRange.
pub const SHIFT_ROWS: &str = "ROWS";

/// One structural request inside a batch update.
///
/// The batch is applied by the backend atomically: either every request in
/// it takes effect or none does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    DuplicateSheet(DuplicateSheetRequest),
    UpdateSheetProperties(UpdateSheetPropertiesRequest),
    DeleteRange(DeleteRangeRequest),
    CopyPaste(CopyPasteRequest),
    DeleteSheet(DeleteSheetRequest),
    SortRange(SortRangeRequest),
    AppendCells(AppendCellsRequest),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateSheetRequest {
    pub source_sheet_id: i64,
    pub new_sheet_id: i64,
    pub new_sheet_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSheetPropertiesRequest {
    pub properties: SheetProperties,
    /// Field mask naming the properties the update applies to.
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRangeRequest {
    pub range: GridRange,
    pub shift_dimension: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyPasteRequest {
    pub source: GridRange,
    pub destination: GridRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSheetRequest {
    pub sheet_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortRangeRequest {
    pub range: GridRange,
    pub sort_specs: Vec<SortSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendCellsRequest {
    pub sheet_id: i64,
    pub rows: Vec<RowData>,
    /// Field mask for the cell properties to write; `*` writes everything.
    pub fields: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchUpdateSpreadsheetRequest {
    pub requests: Vec<Request>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_externally_tagged() {
        let request = Request::DeleteSheet(DeleteSheetRequest { sheet_id: 42 });
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json, serde_json::json!({"deleteSheet": {"sheetId": 42}}));
    }

    #[test]
    fn grid_range_omits_unset_bounds() {
        let range = GridRange {
            sheet_id: 7,
            start_row_index: Some(1),
            ..GridRange::default()
        };
        let json = serde_json::to_value(&range).expect("serialize");
        assert_eq!(json, serde_json::json!({"sheetId": 7, "startRowIndex": 1}));
    }

    #[test]
    fn value_range_deserializes_without_values() {
        let range: ValueRange = serde_json::from_str(r#"{"range": "Reviews!1:1"}"#)
            .expect("deserialize empty range");
        assert!(range.values.is_empty());
    }

    #[test]
    fn sheet_properties_field_mask_payload_is_minimal() {
        let request = Request::UpdateSheetProperties(UpdateSheetPropertiesRequest {
            properties: SheetProperties {
                sheet_id: 9,
                title: None,
                hidden: true,
            },
            fields: "hidden".to_string(),
        });
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "updateSheetProperties": {
                    "properties": {"sheetId": 9, "hidden": true},
                    "fields": "hidden"
                }
            })
        );
    }
}
