//! Implements the `Sheet` trait against the Google Sheets v4 values API.
//!
//! Requests carry a bearer token read from the configured token file;
//! obtaining that token is outside this program.

use crate::api::Sheet;
use crate::{Config, Error, Result};
use anyhow::{anyhow, Context};
use serde::Deserialize;
use tracing::trace;
use url::Url;

const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Implements the `Sheet` trait using HTTP calls to the Google Sheets API.
pub(super) struct GoogleSheet {
    config: Config,
    token: String,
    client: reqwest::Client,
}

impl GoogleSheet {
    pub(super) async fn new(config: Config) -> Result<Self> {
        let token = config.access_token().await?;
        Ok(Self {
            config,
            token,
            client: reqwest::Client::new(),
        })
    }

    /// Builds a URL under `/v4/spreadsheets/{id}/values/{target}`. The
    /// `target` is a range, optionally with an API verb suffix such as
    /// `'Transações'!A:Z:clear`; percent-encoding is handled by `Url`.
    fn values_url(&self, target: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(SHEETS_API).context("Bad Sheets API base URL")?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Sheets API base URL cannot be a base"))?
            .push(self.config.spreadsheet_id())
            .push("values")
            .push(target);
        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }

    /// Builds a URL for the spreadsheet resource itself, with an optional
    /// verb suffix like `:batchUpdate`.
    fn spreadsheet_url(&self, suffix: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(SHEETS_API).context("Bad Sheets API base URL")?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Sheets API base URL cannot be a base"))?
            .push(&format!("{}{suffix}", self.config.spreadsheet_id()));
        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }

    /// Sends a request and maps transport failures and non-2xx statuses to
    /// connectivity errors.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| Error::Connectivity(e.into()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<no body>"));
            return Err(Error::Connectivity(anyhow!(
                "Sheets API returned {status}: {body}"
            )));
        }
        Ok(response)
    }
}

/// The portion of a values-API response we care about.
#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[async_trait::async_trait]
impl Sheet for GoogleSheet {
    async fn read_all(&mut self, sheet_name: &str) -> Result<Vec<Vec<String>>> {
        trace!("read_all for {sheet_name}");
        let url = self.values_url(
            &format!("'{sheet_name}'!A:Z"),
            &[("majorDimension", "ROWS")],
        )?;
        let response = self.send(self.client.get(url)).await?;
        let range: ValueRange = response
            .json()
            .await
            .map_err(|e| Error::Connectivity(e.into()))?;
        Ok(range.values)
    }

    async fn overwrite(
        &mut self,
        sheet_name: &str,
        header: &[&str],
        rows: &[Vec<String>],
    ) -> Result<()> {
        trace!("overwrite {} rows to {sheet_name}", rows.len());
        let clear_url = self.values_url(&format!("'{sheet_name}'!A:Z:clear"), &[])?;
        self.send(self.client.post(clear_url)).await?;

        let mut values: Vec<Vec<String>> = Vec::with_capacity(rows.len() + 1);
        values.push(header.iter().map(|h| h.to_string()).collect());
        values.extend_from_slice(rows);
        let update_url = self.values_url(
            &format!("'{sheet_name}'!A1"),
            &[("valueInputOption", "RAW")],
        )?;
        let body = serde_json::json!({ "majorDimension": "ROWS", "values": values });
        self.send(self.client.put(update_url).json(&body)).await?;
        Ok(())
    }

    async fn append(&mut self, sheet_name: &str, rows: &[Vec<String>]) -> Result<()> {
        trace!("append {} rows to {sheet_name}", rows.len());
        let url = self.values_url(
            &format!("'{sheet_name}'!A:Z:append"),
            &[("valueInputOption", "RAW")],
        )?;
        let body = serde_json::json!({ "majorDimension": "ROWS", "values": rows });
        self.send(self.client.post(url).json(&body)).await?;
        Ok(())
    }

    async fn ensure_sheet(&mut self, sheet_name: &str) -> Result<()> {
        let meta_url = self.spreadsheet_url("", &[("fields", "sheets.properties.title")])?;
        let response = self.send(self.client.get(meta_url)).await?;
        let meta: SpreadsheetMeta = response
            .json()
            .await
            .map_err(|e| Error::Connectivity(e.into()))?;
        if meta
            .sheets
            .iter()
            .any(|sheet| sheet.properties.title == sheet_name)
        {
            return Ok(());
        }

        trace!("creating missing sheet {sheet_name}");
        let batch_url = self.spreadsheet_url(":batchUpdate", &[])?;
        let body = serde_json::json!({
            "requests": [
                { "addSheet": { "properties": { "title": sheet_name } } }
            ]
        });
        self.send(self.client.post(batch_url).json(&body)).await?;
        Ok(())
    }
}
