//! Tab store client for the shared spreadsheet.
//!
//! The daemon treats Google Sheets as a named-destination row store: look a
//! tab up by title, create it with a header when absent, append a row. The
//! [`TabStore`] trait is the seam; [`GoogleSheetsClient`] implements it over
//! the Sheets v4 REST API, and tests substitute an in-memory store.
//!
//! Token refresh is out of scope: the access token is injected at startup
//! and faults from an expired token surface as ordinary write failures.

use async_trait::async_trait;
use serde_json::json;
use sheetsort_common::StoreError;
use std::time::Duration;
use tracing::{debug, info};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Header row written into every auto-created category tab.
pub const DATA_HEADER: [&str; 5] = ["Date", "Link", "Name", "Function", "Category"];

/// Opaque named-destination row store.
#[async_trait]
pub trait TabStore: Send + Sync {
    /// Titles of all tabs currently in the store.
    async fn tab_titles(&self) -> Result<Vec<String>, StoreError>;

    /// Create a tab and write its header row.
    async fn create_tab(&self, title: &str, header: &[&str]) -> Result<(), StoreError>;

    /// Append one row to the named tab.
    async fn append_row(&self, title: &str, row: &[String]) -> Result<(), StoreError>;
}

/// Google Sheets v4 REST client.
pub struct GoogleSheetsClient {
    client: reqwest::Client,
    spreadsheet_id: String,
    token: String,
}

impl GoogleSheetsClient {
    pub fn new(spreadsheet_id: &str, token: &str, timeout_secs: u64) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| StoreError::Http(e.to_string()))?;

        Ok(Self {
            client,
            spreadsheet_id: spreadsheet_id.to_string(),
            token: token.to_string(),
        })
    }

    /// Verify the spreadsheet is reachable with the injected token.
    ///
    /// Called once at startup; there is no lazy reconnect afterwards.
    pub async fn connect(&self) -> Result<(), StoreError> {
        let titles = self.tab_titles().await?;
        info!(
            "Connected to spreadsheet {} ({} tabs)",
            self.spreadsheet_id,
            titles.len()
        );
        Ok(())
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/{}{}", SHEETS_API_BASE, self.spreadsheet_id, suffix)
    }

    async fn check(response: reqwest::Response) -> Result<serde_json::Value, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected(format!("{}: {}", status, text)));
        }
        response
            .json()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))
    }
}

#[async_trait]
impl TabStore for GoogleSheetsClient {
    async fn tab_titles(&self) -> Result<Vec<String>, StoreError> {
        let response = self
            .client
            .get(self.url("?fields=sheets.properties.title"))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;

        let json = Self::check(response).await?;
        let titles = json
            .get("sheets")
            .and_then(|s| s.as_array())
            .map(|sheets| {
                sheets
                    .iter()
                    .filter_map(|s| s.pointer("/properties/title"))
                    .filter_map(|t| t.as_str())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(titles)
    }

    async fn create_tab(&self, title: &str, header: &[&str]) -> Result<(), StoreError> {
        debug!("Creating tab '{}'", title);

        let body = json!({
            "requests": [{ "addSheet": { "properties": { "title": title } } }]
        });
        let response = self
            .client
            .post(self.url(":batchUpdate"))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;
        Self::check(response).await?;

        let header_row: Vec<String> = header.iter().map(|s| s.to_string()).collect();
        self.append_row(title, &header_row).await
    }

    async fn append_row(&self, title: &str, row: &[String]) -> Result<(), StoreError> {
        let url = values_append_url(&self.spreadsheet_id, title)?;
        let body = json!({ "values": [row] });

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }
}

/// Build the values-append URL with the tab title as an encoded path
/// segment. Titles may carry characters (`?`, `#`, `/`) that would
/// otherwise corrupt the request.
fn values_append_url(spreadsheet_id: &str, title: &str) -> Result<reqwest::Url, StoreError> {
    let mut url = reqwest::Url::parse(SHEETS_API_BASE)
        .map_err(|e| StoreError::Http(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| StoreError::Http("invalid sheets base url".to_string()))?
        .push(spreadsheet_id)
        .push("values")
        .push(&format!("{}!A1:append", title));
    url.set_query(Some("valueInputOption=USER_ENTERED"));
    Ok(url)
}

/// Row appender with lazy tab creation.
pub struct SheetWriter;

impl SheetWriter {
    /// Append `row` to the named tab, creating it with `header` if absent.
    ///
    /// No dedup and no locking: concurrent appends race and the store's own
    /// serialization decides the order.
    pub async fn append_row(
        store: &dyn TabStore,
        title: &str,
        header: &[&str],
        row: &[String],
    ) -> Result<(), StoreError> {
        let titles = store.tab_titles().await?;
        if !titles.iter().any(|t| t == title) {
            info!("Tab '{}' not found, creating it", title);
            store.create_tab(title, header).await?;
        }

        store.append_row(title, row).await?;
        debug!("Row appended to tab '{}'", title);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_url_plain_title() {
        let url = values_append_url("SID", "Tools").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/SID/values/Tools!A1:append?valueInputOption=USER_ENTERED"
        );
    }

    #[test]
    fn test_append_url_title_with_space() {
        let url = values_append_url("SID", "Automation flow").unwrap();
        assert!(url.path().ends_with("/values/Automation%20flow!A1:append"));
    }

    #[test]
    fn test_append_url_title_with_reserved_chars() {
        let url = values_append_url("SID", "Q?&#Tab/2").unwrap();
        // The title stays one path segment: '?', '#', and '/' are encoded
        // so they cannot terminate the path or open a query/fragment.
        assert!(url.path().contains("Q%3F&%23Tab%2F2!A1:append"));
        assert_eq!(url.query(), Some("valueInputOption=USER_ENTERED"));
        assert_eq!(url.fragment(), None);
    }
}
