//! Row assembly for the two published tables.
//!
//! "Merge Requests" is one row per merge request. "Reviews" is a matrix:
//! one row per student, one column per roster task, each populated cell a
//! toned status hyperlinking the merge request.

use std::collections::BTreeMap;

use tracing::warn;

use crate::status::classify;
use mrwatch_model::ReviewRecord;
use mrwatch_sheets::{CellValue, InsertPlan};

/// Sheet name of the merge-request table.
pub const MERGE_REQUESTS_SHEET: &str = "Merge Requests";

/// Sheet name of the review matrix.
pub const REVIEWS_SHEET: &str = "Reviews";

const STUDENT_COLUMN: &str = "Student";
const TASK_COLUMN: &str = "Task";

const MERGE_REQUEST_FIELDS: [&str; 7] = [
    STUDENT_COLUMN,
    TASK_COLUMN,
    "Merge request title",
    "Created at",
    "Merge status",
    "Pipeline status",
    "Url",
];

/// One row per merge request, in record order.
pub fn merge_requests_plan(records: &[ReviewRecord]) -> InsertPlan {
    let mut plan = InsertPlan::new(MERGE_REQUEST_FIELDS);
    for record in records {
        plan.push_row(vec![
            CellValue::text(&record.student),
            CellValue::text(&record.task),
            CellValue::text(&record.title),
            CellValue::text(record.created_at.to_rfc3339()),
            CellValue::text(&record.merge_status),
            CellValue::text(&record.pipeline_status),
            CellValue::text(&record.url),
        ]);
    }
    plan
}

/// Sort keys for the merge-request table.
pub fn merge_requests_sort_keys() -> Vec<String> {
    vec![STUDENT_COLUMN.to_string(), TASK_COLUMN.to_string()]
}

/// One row per student; a status cell under every roster task the student
/// submitted for.
///
/// Submissions for tasks absent from the roster have no column to land in;
/// they are logged and skipped rather than misfiled.
pub fn reviews_plan(records: &[ReviewRecord], tasks: &[String]) -> InsertPlan {
    let mut fields = vec![STUDENT_COLUMN.to_string()];
    fields.extend(tasks.iter().cloned());
    let mut plan = InsertPlan::new(fields);

    let task_index: BTreeMap<&str, usize> = tasks
        .iter()
        .enumerate()
        .map(|(index, task)| (task.as_str(), index))
        .collect();

    let mut by_student: BTreeMap<&str, Vec<&ReviewRecord>> = BTreeMap::new();
    for record in records {
        by_student
            .entry(record.student.as_str())
            .or_default()
            .push(record);
    }

    for (student, submissions) in by_student {
        let mut row = vec![CellValue::Empty; tasks.len() + 1];
        row[0] = CellValue::text(student);
        for record in submissions {
            let Some(&index) = task_index.get(record.task.as_str()) else {
                warn!(
                    student,
                    task = %record.task,
                    "submission for a task not in the deadlines roster"
                );
                continue;
            };
            let status = classify(record);
            row[1 + index] =
                CellValue::rich(status.text, Some(record.url.clone()), Some(status.tone));
        }
        plan.push_row(row);
    }
    plan
}

/// Sort keys for the review matrix.
pub fn reviews_sort_keys() -> Vec<String> {
    vec![STUDENT_COLUMN.to_string()]
}
