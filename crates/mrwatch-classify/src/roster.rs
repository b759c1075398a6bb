//! Reviewer and deadline rosters.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ClassifyError, Result};
use mrwatch_model::Reviewer;

/// The set of reviewers whose approvals count.
#[derive(Debug, Clone, Default)]
pub struct ReviewerRoster {
    reviewers: BTreeMap<String, Reviewer>,
}

impl ReviewerRoster {
    /// Parse the roster from its JSON configuration form, an array of
    /// `{"username": ..., "pseudonym": ...}` entries.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<Reviewer> =
            serde_json::from_str(json).map_err(ClassifyError::InvalidRoster)?;
        let mut reviewers = BTreeMap::new();
        for reviewer in entries {
            debug!(username = %reviewer.username, "registered eligible reviewer");
            reviewers.insert(reviewer.username.clone(), reviewer);
        }
        Ok(Self { reviewers })
    }

    pub fn get(&self, username: &str) -> Option<&Reviewer> {
        self.reviewers.get(username)
    }

    pub fn len(&self) -> usize {
        self.reviewers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviewers.is_empty()
    }
}

/// One group of graded tasks in the deadlines roster.
#[derive(Debug, Clone, Deserialize)]
pub struct DeadlineGroup {
    pub group: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub tasks: Vec<TaskEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskEntry {
    pub task: String,
    #[serde(default)]
    pub score: i64,
}

/// Parse the deadlines roster from its YAML form.
pub fn parse_deadlines(yaml: &str) -> Result<Vec<DeadlineGroup>> {
    serde_yaml::from_str(yaml).map_err(ClassifyError::InvalidDeadlines)
}

/// Task names across all groups, in roster order.
pub fn task_names(groups: &[DeadlineGroup]) -> Vec<String> {
    groups
        .iter()
        .flat_map(|group| group.tasks.iter().map(|entry| entry.task.clone()))
        .collect()
}
