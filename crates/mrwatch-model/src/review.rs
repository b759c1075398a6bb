//! Parsed review state derived from a merge request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reviewer eligible to approve merge requests.
///
/// Rosters are configured as a JSON array of these entries; the pseudonym is
/// what appears in the published tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviewer {
    pub username: String,
    pub pseudonym: String,
}

/// Resolvable-discussion counts for one merge request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionTally {
    pub resolvable: usize,
    pub resolved: usize,
}

impl DiscussionTally {
    pub fn has_unresolved(&self) -> bool {
        self.resolvable > self.resolved
    }

    pub fn is_empty(&self) -> bool {
        self.resolvable == 0
    }
}

/// One merge request decomposed into review-tracking fields.
///
/// Produced by the title parser in `mrwatch-classify`; the university,
/// student and task come from the structured title when it parses, or from
/// the fallback rules when it does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub university: String,
    pub student: String,
    pub task: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub url: String,
    pub pipeline_status: String,
    pub merge_status: String,
    pub discussions: DiscussionTally,
    pub approved_by: Vec<Reviewer>,
}

impl ReviewRecord {
    pub fn is_approved(&self) -> bool {
        !self.approved_by.is_empty()
    }
}
