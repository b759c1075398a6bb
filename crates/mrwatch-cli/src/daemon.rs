//! The poll daemon: fetch, classify, publish, sleep, repeat.

use std::thread;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use mrwatch_classify::{
    MERGE_REQUESTS_SHEET, REVIEWS_SHEET, ReviewerRoster, TitleParser, merge_requests_plan,
    merge_requests_sort_keys, parse_deadlines, reviews_plan, reviews_sort_keys, task_names,
};
use mrwatch_gitlab::GitLabClient;
use mrwatch_model::ReviewRecord;
use mrwatch_sheets::{RestBackend, with_snapshot};

use crate::config::Config;
use crate::summary::{IterationSummary, TableSummary};

pub struct Daemon {
    config: Config,
    gitlab: GitLabClient,
    sheets: RestBackend,
    http: reqwest::blocking::Client,
    parser: TitleParser,
    roster: ReviewerRoster,
}

impl Daemon {
    pub fn new(config: Config) -> Result<Self> {
        let gitlab = GitLabClient::with_base_url(&config.gitlab_base_url, &config.gitlab_token)
            .context("initialize GitLab client")?;
        let sheets =
            RestBackend::new(&config.google_access_token).context("initialize Sheets client")?;
        let roster = ReviewerRoster::from_json(&config.eligible_reviewers)
            .context("parse ELIGIBLE_REVIEWERS")?;
        info!(reviewers = roster.len(), "loaded reviewer roster");
        Ok(Self {
            gitlab,
            sheets,
            http: reqwest::blocking::Client::new(),
            parser: TitleParser::new(),
            roster,
            config,
        })
    }

    /// Poll forever. A failed iteration is logged and the loop continues;
    /// the next cycle retries from scratch against the then-current tables.
    pub fn run_forever(&self) -> ! {
        info!(
            interval_secs = self.config.iteration_interval.as_secs(),
            "watcher started"
        );
        loop {
            let started = Instant::now();
            match self.iterate() {
                Ok(summary) => info!(
                    merge_requests = summary.merge_request_count,
                    duration_ms = started.elapsed().as_millis() as u64,
                    "iteration complete"
                ),
                Err(error) => {
                    let chain = format!("{error:#}");
                    warn!(error = chain.as_str(), "iteration failed");
                }
            }
            thread::sleep(self.config.iteration_interval);
        }
    }

    /// Run exactly one iteration.
    pub fn run_once(&self) -> Result<IterationSummary> {
        self.iterate()
    }

    fn fetch_tasks(&self) -> Result<Vec<String>> {
        let response = self
            .http
            .get(&self.config.deadlines_url)
            .send()
            .context("fetch deadlines roster")?;
        if !response.status().is_success() {
            bail!("deadlines endpoint returned status {}", response.status());
        }
        let body = response.text().context("read deadlines roster")?;
        let groups = parse_deadlines(&body)?;
        Ok(task_names(&groups))
    }

    fn iterate(&self) -> Result<IterationSummary> {
        let span = info_span!("iteration");
        let _guard = span.enter();

        let tasks = self.fetch_tasks()?;
        info!(task_count = tasks.len(), "loaded graded tasks");

        let merge_requests = self
            .gitlab
            .list_group_merge_requests(&self.config.gitlab_group, &self.config.gitlab_label)
            .context("list group merge requests")?;
        info!(
            merge_request_count = merge_requests.len(),
            "fetched merge requests"
        );

        let records: Vec<ReviewRecord> = merge_requests
            .iter()
            .map(|merge_request| self.parser.parse(merge_request, &self.roster))
            .collect();

        let plan = merge_requests_plan(&records);
        let merge_request_rows = plan.rows.len();
        with_snapshot(
            &self.sheets,
            &self.config.google_spreadsheet_id,
            MERGE_REQUESTS_SHEET,
            |snapshot| {
                snapshot.clear()?;
                snapshot.insert(&plan)?;
                snapshot.sort(&merge_requests_sort_keys())
            },
        )
        .with_context(|| format!("update {MERGE_REQUESTS_SHEET} table"))?;
        info!(rows = merge_request_rows, "updated merge request table");

        let reviews = reviews_plan(&records, &tasks);
        let review_rows = reviews.rows.len();
        with_snapshot(
            &self.sheets,
            &self.config.google_spreadsheet_id,
            REVIEWS_SHEET,
            |snapshot| {
                snapshot.clear()?;
                snapshot.insert(&reviews)?;
                snapshot.sort(&reviews_sort_keys())
            },
        )
        .with_context(|| format!("update {REVIEWS_SHEET} table"))?;
        info!(rows = review_rows, "updated review table");

        Ok(IterationSummary {
            task_count: tasks.len(),
            merge_request_count: merge_requests.len(),
            tables: vec![
                TableSummary {
                    name: MERGE_REQUESTS_SHEET.to_string(),
                    rows: merge_request_rows,
                },
                TableSummary {
                    name: REVIEWS_SHEET.to_string(),
                    rows: review_rows,
                },
            ],
        })
    }
}
