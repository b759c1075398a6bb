//! Snapshot transactions: atomic bulk replacement of a sheet's contents.
//!
//! The backend has no transaction primitive, so atomicity is built from
//! three capabilities it does have: a duplicate-sheet request, a hidden
//! flag, and all-or-nothing batch application. A transaction duplicates the
//! target sheet into a hidden shadow, runs every mutation against the
//! shadow where partial failures are invisible to readers, and makes the
//! cutover — delete original rows, copy the shadow over them, delete the
//! shadow — as one batch. Readers of the original sheet see either the old
//! contents or the new, never anything in between.

use rand::Rng;
use tracing::{debug, error, warn};

use crate::api::{
    CopyPasteRequest, DeleteRangeRequest, DeleteSheetRequest, DuplicateSheetRequest, GridRange,
    Request, SHIFT_ROWS, SheetProperties, UpdateSheetPropertiesRequest,
};
use crate::backend::SpreadsheetBackend;
use crate::error::{Result, SheetsError};
use crate::ops::{self, InsertPlan, SheetRef, resolve_sheet};

const SHADOW_NAME_LEN: usize = 16;
const SHADOW_NAME_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Lifecycle of a snapshot transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotState {
    Open,
    Committing,
    Committed,
    RollingBack,
    RolledBack,
}

/// An open transaction against one sheet.
///
/// All mutations issued through the snapshot target the hidden shadow
/// sheet, never the original. `commit` and `rollback` consume the snapshot,
/// so a terminal transaction cannot be reused.
#[derive(Debug)]
pub struct Snapshot<'a, B: SpreadsheetBackend> {
    backend: &'a B,
    original: SheetRef,
    shadow: SheetRef,
    state: SnapshotState,
}

impl<'a, B: SpreadsheetBackend> Snapshot<'a, B> {
    /// Open a transaction on `sheet_name`, duplicating it into a hidden
    /// shadow sheet.
    ///
    /// Fails with `UnknownSheet` when no sheet with that name exists
    /// (nothing is created), or `SnapshotCreateFailed` when the
    /// duplicate-and-hide batch is rejected — the backend refuses the whole
    /// batch on a shadow-identifier collision, so a collision can never
    /// half-apply.
    pub fn begin(backend: &'a B, spreadsheet_id: &str, sheet_name: &str) -> Result<Self> {
        let original = resolve_sheet(backend, spreadsheet_id, sheet_name)?;

        let mut rng = rand::rng();
        let shadow_name: String = (0..SHADOW_NAME_LEN)
            .map(|_| {
                let index = rng.random_range(0..SHADOW_NAME_ALPHABET.len());
                SHADOW_NAME_ALPHABET[index] as char
            })
            .collect();
        let shadow_id = i64::from(rng.random_range(1..i32::MAX));

        backend
            .batch_update(
                spreadsheet_id,
                vec![
                    Request::DuplicateSheet(DuplicateSheetRequest {
                        source_sheet_id: original.sheet_id,
                        new_sheet_id: shadow_id,
                        new_sheet_name: shadow_name.clone(),
                    }),
                    Request::UpdateSheetProperties(UpdateSheetPropertiesRequest {
                        properties: SheetProperties {
                            sheet_id: shadow_id,
                            title: None,
                            hidden: true,
                        },
                        fields: "hidden".to_string(),
                    }),
                ],
            )
            .map_err(SheetsError::snapshot_create_failed)?;

        debug!(
            sheet = %original.sheet_name,
            shadow = %shadow_name,
            shadow_id,
            "opened snapshot"
        );
        Ok(Self {
            backend,
            shadow: SheetRef {
                spreadsheet_id: spreadsheet_id.to_string(),
                sheet_name: shadow_name,
                sheet_id: shadow_id,
            },
            original,
            state: SnapshotState::Open,
        })
    }

    pub fn state(&self) -> SnapshotState {
        self.state
    }

    /// The hidden staging sheet this transaction mutates.
    pub fn shadow(&self) -> &SheetRef {
        &self.shadow
    }

    /// Append rows to the shadow sheet.
    pub fn insert(&self, plan: &InsertPlan) -> Result<()> {
        ops::insert(self.backend, &self.shadow, plan)
    }

    /// Clear the shadow sheet, header included.
    pub fn clear(&self) -> Result<()> {
        ops::clear(self.backend, &self.shadow)
    }

    /// Sort the shadow sheet's data rows.
    pub fn sort(&self, columns: &[String]) -> Result<()> {
        ops::sort(self.backend, &self.shadow, columns)
    }

    /// Swap the shadow's contents into the original sheet and drop the
    /// shadow, as one atomic batch.
    pub fn commit(mut self) -> Result<()> {
        self.state = SnapshotState::Committing;
        debug!(sheet = %self.original.sheet_name, shadow = %self.shadow.sheet_name, "committing snapshot");
        self.backend.batch_update(
            &self.original.spreadsheet_id,
            vec![
                Request::DeleteRange(DeleteRangeRequest {
                    range: GridRange::whole_sheet(self.original.sheet_id),
                    shift_dimension: SHIFT_ROWS.to_string(),
                }),
                Request::CopyPaste(CopyPasteRequest {
                    source: GridRange::whole_sheet(self.shadow.sheet_id),
                    destination: GridRange::whole_sheet(self.original.sheet_id),
                }),
                Request::DeleteSheet(DeleteSheetRequest {
                    sheet_id: self.shadow.sheet_id,
                }),
            ],
        )?;
        self.state = SnapshotState::Committed;
        Ok(())
    }

    /// Discard the shadow sheet; the original is never touched.
    pub fn rollback(mut self) -> Result<()> {
        self.state = SnapshotState::RollingBack;
        debug!(sheet = %self.original.sheet_name, shadow = %self.shadow.sheet_name, "rolling back snapshot");
        self.backend.batch_update(
            &self.original.spreadsheet_id,
            vec![Request::DeleteSheet(DeleteSheetRequest {
                sheet_id: self.shadow.sheet_id,
            })],
        )?;
        self.state = SnapshotState::RolledBack;
        Ok(())
    }
}

impl<B: SpreadsheetBackend> Drop for Snapshot<'_, B> {
    fn drop(&mut self) {
        if self.state == SnapshotState::Open {
            warn!(
                shadow = %self.shadow.sheet_name,
                "snapshot dropped while open; hidden shadow sheet left behind"
            );
        }
    }
}

/// Run `body` inside a snapshot transaction on `sheet_name`.
///
/// Success commits; failure rolls back and returns the body's error. A
/// rollback failure is logged, never swallowed into the return value — the
/// body's error is what the caller sees. A commit failure propagates as-is;
/// since the commit batch is all-or-nothing, a failed commit leaves the
/// original sheet untouched (at worst a hidden shadow sheet leaks until the
/// next cycle).
pub fn with_snapshot<B, F>(
    backend: &B,
    spreadsheet_id: &str,
    sheet_name: &str,
    body: F,
) -> Result<()>
where
    B: SpreadsheetBackend,
    F: FnOnce(&Snapshot<'_, B>) -> Result<()>,
{
    let snapshot = Snapshot::begin(backend, spreadsheet_id, sheet_name)?;
    match body(&snapshot) {
        Ok(()) => snapshot.commit(),
        Err(body_error) => {
            if let Err(rollback_error) = snapshot.rollback() {
                error!(%rollback_error, "rollback failed after transaction body error");
            }
            Err(body_error)
        }
    }
}
