//! Environment-driven configuration.
//!
//! The daemon is configured entirely through environment variables (with
//! `.env` loading handled in `main`), mirroring how it is deployed: a
//! container with credentials injected by the orchestrator.

use std::time::Duration;

use anyhow::{Context, Result};

/// Poll interval used when ITERATION_INTERVAL is not set.
pub const DEFAULT_ITERATION_INTERVAL: Duration = Duration::from_secs(300);

const DEFAULT_GITLAB_BASE_URL: &str = "https://gitlab.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub gitlab_base_url: String,
    pub gitlab_token: String,
    pub gitlab_group: String,
    pub gitlab_label: String,
    pub google_access_token: String,
    pub google_spreadsheet_id: String,
    pub iteration_interval: Duration,
    pub deadlines_url: String,
    /// JSON array of eligible reviewers, as configured.
    pub eligible_reviewers: String,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require =
            |key: &str| lookup(key).with_context(|| format!("{key} is not set"));

        let iteration_interval = match lookup("ITERATION_INTERVAL") {
            Some(raw) => {
                let seconds = raw.parse::<u64>().with_context(|| {
                    format!("ITERATION_INTERVAL must be whole seconds, got {raw:?}")
                })?;
                Duration::from_secs(seconds)
            }
            None => DEFAULT_ITERATION_INTERVAL,
        };

        Ok(Self {
            gitlab_base_url: lookup("GITLAB_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GITLAB_BASE_URL.to_string()),
            gitlab_token: require("GITLAB_TOKEN")?,
            gitlab_group: require("GITLAB_GROUP")?,
            gitlab_label: require("GITLAB_LABEL")?,
            google_access_token: require("GOOGLE_ACCESS_TOKEN")?,
            google_spreadsheet_id: require("GOOGLE_SPREADSHEET_ID")?,
            iteration_interval,
            deadlines_url: require("DEADLINES_URL")?,
            eligible_reviewers: require("ELIGIBLE_REVIEWERS")?,
        })
    }
}
