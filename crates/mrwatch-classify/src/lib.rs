//! Stateless transforms between GitLab records and the published tables:
//! title parsing, reviewer rosters, status classification and row assembly.

mod error;
mod roster;
mod status;
mod tables;
mod title;

pub use error::{ClassifyError, Result};
pub use roster::{DeadlineGroup, ReviewerRoster, TaskEntry, parse_deadlines, task_names};
pub use status::{StatusCell, classify};
pub use tables::{
    MERGE_REQUESTS_SHEET, REVIEWS_SHEET, merge_requests_plan, merge_requests_sort_keys,
    reviews_plan, reviews_sort_keys,
};
pub use title::TitleParser;
