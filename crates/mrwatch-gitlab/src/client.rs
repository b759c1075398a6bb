//! GitLab GraphQL client.
//!
//! Fetches every merge request of a group through the paginated GraphQL
//! connection and hands the rest of the system a flat, fully concatenated
//! record list; cursor handling never leaks past this module.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GitLabError, Result};
use mrwatch_model::{Group, MergeRequest};

/// Public GitLab instance.
pub const DEFAULT_BASE_URL: &str = "https://gitlab.com";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Merge requests fetched per page.
const PAGE_SIZE: u32 = 100;

/// The group merge-request query document.
const GROUP_MERGE_REQUESTS_QUERY: &str = r#"query($groupPath: ID!, $labels: [String!], $first: Int!, $cursor: String!) {
  group(fullPath: $groupPath) {
    id
    name
    mergeRequests(labels: $labels, first: $first, sort: created_desc, after: $cursor) {
      count
      nodes {
        title
        author {
          name
          username
        }
        createdAt
        mergeStatus
        approvedBy {
          nodes {
            username
          }
        }
        headPipeline {
          status
        }
        discussions {
          nodes {
            resolvable
            resolved
          }
        }
        webUrl
      }
      pageInfo {
        endCursor
        hasNextPage
      }
    }
  }
}"#;

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Variables<'a> {
    group_path: &'a str,
    labels: Vec<&'a str>,
    first: u32,
    cursor: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<GroupData>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GroupData {
    group: Option<Group>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

/// Client for the GitLab GraphQL API.
pub struct GitLabClient {
    http: Client,
    endpoint: String,
    token: String,
}

impl GitLabClient {
    /// Client against the public GitLab instance.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, token)
    }

    /// Client against a self-hosted instance.
    pub fn with_base_url(base_url: &str, token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(GitLabError::Network)?;
        Ok(Self {
            http,
            endpoint: format!("{}/api/graphql", base_url.trim_end_matches('/')),
            token: token.into(),
        })
    }

    /// List every merge request of `group_path` carrying `label`.
    ///
    /// Follows the connection's cursor until the last page and returns the
    /// concatenated node list in the order the API produced it.
    pub fn list_group_merge_requests(
        &self,
        group_path: &str,
        label: &str,
    ) -> Result<Vec<MergeRequest>> {
        collect_merge_requests(group_path, |cursor| {
            self.fetch_page(group_path, label, cursor)
        })
    }

    fn fetch_page(&self, group_path: &str, label: &str, cursor: &str) -> Result<Option<Group>> {
        debug!(group_path, cursor, "fetching merge-request page");
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&GraphqlRequest {
                query: GROUP_MERGE_REQUESTS_QUERY,
                variables: Variables {
                    group_path,
                    labels: vec![label],
                    first: PAGE_SIZE,
                    cursor,
                },
            })
            .send()
            .map_err(GitLabError::Network)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().unwrap_or_default();
            return Err(GitLabError::Api { status, message });
        }

        let body: GraphqlResponse = response.json().map_err(GitLabError::Network)?;
        if let Some(errors) = body.errors {
            if !errors.is_empty() {
                return Err(GitLabError::GraphQl {
                    messages: errors.into_iter().map(|error| error.message).collect(),
                });
            }
        }
        Ok(body.data.and_then(|data| data.group))
    }
}

/// Drive the cursor loop over `fetch`, concatenating every page's nodes.
fn collect_merge_requests<F>(group_path: &str, mut fetch: F) -> Result<Vec<MergeRequest>>
where
    F: FnMut(&str) -> Result<Option<Group>>,
{
    let mut cursor = String::new();
    let mut merge_requests = Vec::new();
    loop {
        let group = fetch(&cursor)?.ok_or_else(|| GitLabError::GroupNotFound {
            group_path: group_path.to_string(),
        })?;
        let page = group.merge_requests;
        merge_requests.extend(page.nodes);
        if !page.page_info.has_next_page {
            break;
        }
        cursor = page.page_info.end_cursor.ok_or(GitLabError::MissingCursor)?;
    }
    debug!(group_path, count = merge_requests.len(), "merge requests fetched");
    Ok(merge_requests)
}
