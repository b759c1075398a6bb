//! Merge-request title parsing.
//!
//! Structured titles look like `[hse] [ivanov-ivan] hw1/deadlock`: a
//! university tag, a surname-name pair and the task path. Anything else
//! falls back to the author's handle and the raw title, so a malformed
//! title still lands in the tables instead of disappearing.

use regex::Regex;
use tracing::warn;

use crate::roster::ReviewerRoster;
use mrwatch_model::{DiscussionTally, MergeRequest, ReviewRecord};

const TITLE_PATTERN: &str = r"^\[(\w+)\] \[(\w+)-(\w+)\] (.+/.+)$";

/// Parser turning merge requests into review records.
#[derive(Debug, Clone)]
pub struct TitleParser {
    pattern: Regex,
}

impl Default for TitleParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TitleParser {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(TITLE_PATTERN).expect("title pattern compiles"),
        }
    }

    /// Decompose one merge request into a review record.
    ///
    /// Approvers absent from the roster are logged and skipped.
    pub fn parse(&self, merge_request: &MergeRequest, roster: &ReviewerRoster) -> ReviewRecord {
        let mut approved_by = Vec::new();
        for username in merge_request.approver_usernames() {
            match roster.get(username) {
                Some(reviewer) => approved_by.push(reviewer.clone()),
                None => warn!(username, "approval from unknown reviewer ignored"),
            }
        }

        let mut discussions = DiscussionTally::default();
        for discussion in &merge_request.discussions.nodes {
            if discussion.resolvable {
                discussions.resolvable += 1;
                if discussion.resolved {
                    discussions.resolved += 1;
                }
            }
        }

        let (university, student, task) = match self.pattern.captures(&merge_request.title) {
            Some(captures) => (
                captures[1].to_string(),
                format!("{} {}", &captures[2], &captures[3]),
                captures[4].to_string(),
            ),
            None => (
                "unknown".to_string(),
                format!("@{}", merge_request.author.username),
                merge_request.title.clone(),
            ),
        };

        ReviewRecord {
            university,
            student,
            task,
            title: merge_request.title.clone(),
            created_at: merge_request.created_at,
            url: merge_request.web_url.clone(),
            pipeline_status: merge_request.pipeline_status().to_string(),
            merge_status: merge_request.merge_status.clone(),
            discussions,
            approved_by,
        }
    }
}
