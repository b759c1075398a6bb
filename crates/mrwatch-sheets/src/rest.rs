//! Blocking REST implementation of the backend boundary.

use reqwest::blocking::{Client, Response};
use tracing::debug;
use url::Url;

use crate::api::{BatchUpdateSpreadsheetRequest, Request, SheetProperties, Spreadsheet, ValueRange};
use crate::backend::SpreadsheetBackend;
use crate::error::{Result, SheetsError};

/// Production endpoint of the Sheets v4 API.
pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Synchronous Sheets client authenticating with a bearer token.
#[derive(Debug)]
pub struct RestBackend {
    http: Client,
    base: Url,
    token: String,
}

impl RestBackend {
    /// Client against the production endpoint.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, token)
    }

    /// Client against a custom endpoint (local emulators, tests).
    pub fn with_base_url(base_url: &str, token: impl Into<String>) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|_| SheetsError::InvalidBaseUrl {
            url: base_url.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(SheetsError::InvalidBaseUrl {
                url: base_url.to_string(),
            });
        }
        Ok(Self {
            http: Client::new(),
            base,
            token: token.into(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| SheetsError::InvalidBaseUrl {
                    url: self.base.to_string(),
                })?;
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(SheetsError::Api {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            })
        }
    }
}

impl SpreadsheetBackend for RestBackend {
    fn read_range(&self, spreadsheet_id: &str, range: &str) -> Result<ValueRange> {
        let url = self.endpoint(&[spreadsheet_id, "values", range])?;
        debug!(spreadsheet_id, range, "get values");
        let response = self.http.get(url).bearer_auth(&self.token).send()?;
        Ok(Self::check(response)?.json()?)
    }

    fn write_range(&self, spreadsheet_id: &str, range: &str, values: &ValueRange) -> Result<()> {
        let mut url = self.endpoint(&[spreadsheet_id, "values", range])?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        debug!(spreadsheet_id, range, rows = values.values.len(), "update values");
        let response = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .json(values)
            .send()?;
        Self::check(response)?;
        Ok(())
    }

    fn clear_range(&self, spreadsheet_id: &str, range: &str) -> Result<()> {
        let clear = format!("{range}:clear");
        let url = self.endpoint(&[spreadsheet_id, "values", clear.as_str()])?;
        debug!(spreadsheet_id, range, "clear values");
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({}))
            .send()?;
        Self::check(response)?;
        Ok(())
    }

    fn batch_update(&self, spreadsheet_id: &str, requests: Vec<Request>) -> Result<()> {
        let batch = format!("{spreadsheet_id}:batchUpdate");
        let url = self.endpoint(&[batch.as_str()])?;
        debug!(spreadsheet_id, request_count = requests.len(), "batch update");
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&BatchUpdateSpreadsheetRequest { requests })
            .send()?;
        Self::check(response)?;
        Ok(())
    }

    fn sheets(&self, spreadsheet_id: &str) -> Result<Vec<SheetProperties>> {
        let mut url = self.endpoint(&[spreadsheet_id])?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties");
        debug!(spreadsheet_id, "get sheet metadata");
        let response = self.http.get(url).bearer_auth(&self.token).send()?;
        let spreadsheet: Spreadsheet = Self::check(response)?.json()?;
        Ok(spreadsheet
            .sheets
            .into_iter()
            .map(|entry| entry.properties)
            .collect())
    }
}
