pub mod merge_request;
pub mod review;

pub use merge_request::{
    Discussion, DiscussionConnection, Group, MergeRequest, MergeRequestPage, PageInfo, Pipeline,
    User, UserConnection,
};
pub use review::{DiscussionTally, Reviewer, ReviewRecord};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_request_deserializes_from_graphql_shape() {
        let json = r#"{
            "title": "[hse] [ivanov-ivan] hw1/deadlock",
            "author": {"name": "Ivan Ivanov", "username": "ivanov"},
            "createdAt": "2024-10-02T11:22:33Z",
            "mergeStatus": "can_be_merged",
            "approvedBy": {"nodes": [{"username": "reviewer1"}]},
            "headPipeline": {"status": "SUCCESS"},
            "discussions": {"nodes": [{"resolvable": true, "resolved": false}]},
            "webUrl": "https://gitlab.com/group/repo/-/merge_requests/1"
        }"#;
        let mr: MergeRequest = serde_json::from_str(json).expect("deserialize merge request");
        assert_eq!(mr.pipeline_status(), "SUCCESS");
        assert_eq!(mr.approver_usernames().collect::<Vec<_>>(), ["reviewer1"]);
        assert_eq!(mr.created_at.to_rfc3339(), "2024-10-02T11:22:33+00:00");
    }

    #[test]
    fn missing_pipeline_and_approvals_default() {
        let json = r#"{
            "title": "fix typo",
            "author": {"username": "someone"},
            "createdAt": "2024-01-01T00:00:00Z",
            "mergeStatus": "cannot_be_merged",
            "headPipeline": null,
            "webUrl": "https://gitlab.com/x/-/merge_requests/2"
        }"#;
        let mr: MergeRequest = serde_json::from_str(json).expect("deserialize merge request");
        assert_eq!(mr.pipeline_status(), "");
        assert_eq!(mr.approver_usernames().count(), 0);
        assert!(mr.discussions.nodes.is_empty());
    }

    #[test]
    fn discussion_tally_counts() {
        let tally = DiscussionTally {
            resolvable: 3,
            resolved: 2,
        };
        assert!(tally.has_unresolved());
        assert!(!tally.is_empty());
        assert!(!DiscussionTally::default().has_unresolved());
        assert!(DiscussionTally::default().is_empty());
    }
}
