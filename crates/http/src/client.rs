//! Google Sheets v4 `values` reader.

use crate::error::{FetchError, Result};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sheet2json_core::{normalize, CellValue, ConfigError, Grid, ParseOptions, ParseResult};

/// Default Google Sheets API host.
pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";

/// Identifies a spreadsheet and the API key used to read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleSheetConfig {
    pub spreadsheet_id: String,
    pub api_key: String,
}

impl GoogleSheetConfig {
    pub fn new(spreadsheet_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            api_key: api_key.into(),
        }
    }
}

/// Body of a `spreadsheets.values.get` response. `values` is omitted by
/// the API when the sheet is empty.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<JsonValue>>,
}

fn json_to_cell_value(value: JsonValue) -> CellValue {
    match value {
        JsonValue::Null => CellValue::Null,
        JsonValue::Bool(b) => CellValue::String(b.to_string()),
        JsonValue::Number(n) => n
            .as_f64()
            .map_or_else(|| CellValue::String(n.to_string()), CellValue::Number),
        JsonValue::String(s) => CellValue::String(s),
        other => CellValue::String(other.to_string()),
    }
}

/// Client for reading sheet values over HTTP.
///
/// No timeout or retry is configured; pass a tuned [`reqwest::Client`] via
/// [`GoogleSheetsClient::with_client`] when that is needed.
#[derive(Debug, Clone)]
pub struct GoogleSheetsClient {
    client: Client,
    base_url: String,
}

impl GoogleSheetsClient {
    /// Constructs a client against the public Google Sheets API.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if building the underlying HTTP client fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use sheet2json_http::GoogleSheetsClient;
    /// let client = GoogleSheetsClient::new().expect("failed to create client");
    /// ```
    pub fn new() -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client))
    }

    /// Wrap an existing reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at another host (a proxy or a test server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The host requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn values_url(&self, config: &GoogleSheetConfig, sheet_name: &str) -> Result<Url> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| FetchError::InvalidUrl(format!("{}: {e}", self.base_url)))?;

        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                config.spreadsheet_id.as_str(),
                "values",
                sheet_name,
            ]);
        url.query_pairs_mut().append_pair("key", &config.api_key);

        Ok(url)
    }

    /// Fetch the value grid of one sheet.
    ///
    /// A missing or blank `sheet_name` fails before any request is made. A
    /// sheet with no values yields an empty grid.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Config` for a missing sheet name,
    /// `FetchError::Status` for a non-success response, and
    /// `FetchError::Http` if the request fails.
    pub async fn fetch_values(
        &self,
        config: &GoogleSheetConfig,
        sheet_name: Option<&str>,
    ) -> Result<Grid> {
        let sheet_name = sheet_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| ConfigError::missing("sheet_name"))?;

        let url = self.values_url(config, sheet_name)?;
        tracing::debug!(
            spreadsheet = %config.spreadsheet_id,
            sheet = %sheet_name,
            "fetching sheet values"
        );

        // The request URL carries the API key, so it is stripped from errors.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), sheet = %sheet_name, "sheet request failed");
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body: ValueRange = response
            .json()
            .await
            .map_err(|e| {
                FetchError::InvalidResponse(format!("Failed to parse JSON: {}", e.without_url()))
            })?;

        let grid: Grid = body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(json_to_cell_value).collect())
            .collect();
        tracing::debug!(rows = grid.len(), "fetched sheet values");

        Ok(grid)
    }

    /// Fetch `options.sheet_name` and normalize it.
    pub async fn parse(
        &self,
        config: &GoogleSheetConfig,
        options: &ParseOptions,
    ) -> Result<ParseResult> {
        let sheet_name = options.require_sheet_name()?;
        let grid = self.fetch_values(config, Some(sheet_name)).await?;
        Ok(normalize(&grid, options))
    }
}

/// Fetch a Google Sheet with a default client and normalize it.
///
/// `options.sheet_name` is required.
///
/// # Example
/// ```no_run
/// use sheet2json_core::{HeaderMapping, ParseOptions};
/// use sheet2json_http::{parse_google_sheet, GoogleSheetConfig};
///
/// # async fn run() -> sheet2json_http::Result<()> {
/// let config = GoogleSheetConfig::new("1AbC...", "api-key");
/// let mapping = HeaderMapping::try_from_pairs([("상품ID", "productId")]).unwrap();
/// let options = ParseOptions::new(mapping).with_sheet_name("시트1");
///
/// let result = parse_google_sheet(&config, &options).await?;
/// println!("{} records", result.body.len());
/// # Ok(())
/// # }
/// ```
pub async fn parse_google_sheet(
    config: &GoogleSheetConfig,
    options: &ParseOptions,
) -> Result<ParseResult> {
    options.require_sheet_name()?;
    GoogleSheetsClient::new()?.parse(config, options).await
}
