//! GitLab merge-request record shapes.
//!
//! These structs mirror the GraphQL response of the group merge-request
//! query field for field; `mrwatch-gitlab` deserializes into them and the
//! rest of the system consumes them as plain records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    pub merge_requests: MergeRequestPage,
}

/// One page of the paginated merge-request connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeRequestPage {
    pub count: u64,
    pub nodes: Vec<MergeRequest>,
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeRequest {
    pub title: String,
    pub author: User,
    pub created_at: DateTime<Utc>,
    pub merge_status: String,
    #[serde(default)]
    pub approved_by: UserConnection,
    /// Absent when the merge request has never run a pipeline.
    pub head_pipeline: Option<Pipeline>,
    #[serde(default)]
    pub discussions: DiscussionConnection,
    pub web_url: String,
}

impl MergeRequest {
    /// The head-pipeline status, or the empty string when no pipeline exists.
    pub fn pipeline_status(&self) -> &str {
        self.head_pipeline
            .as_ref()
            .map(|pipeline| pipeline.status.as_str())
            .unwrap_or_default()
    }

    /// Usernames of everyone who approved this merge request.
    pub fn approver_usernames(&self) -> impl Iterator<Item = &str> {
        self.approved_by.nodes.iter().map(|user| user.username.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub name: Option<String>,
    pub username: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConnection {
    pub nodes: Vec<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscussionConnection {
    pub nodes: Vec<Discussion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discussion {
    pub resolvable: bool,
    #[serde(default)]
    pub resolved: bool,
}
