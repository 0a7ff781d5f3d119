use anyhow::{Result, anyhow};
use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::currency::RateTable;
use crate::rate_provider::RateProvider;

/// Fetches the flat rate table served at `{base_url}/api/currency`.
///
/// One request per call. The table is consumed wholesale by the caller, so
/// there is nothing to cache or merge here.
pub struct StatusApiProvider {
    base_url: String,
}

impl StatusApiProvider {
    pub fn new(base_url: &str) -> Self {
        StatusApiProvider {
            base_url: base_url.to_string(),
        }
    }
}

#[async_trait]
impl RateProvider for StatusApiProvider {
    #[instrument(name = "RateTableFetch", skip(self))]
    async fn fetch_rates(&self) -> Result<RateTable> {
        let url = format!("{}/api/currency", self.base_url);
        debug!("Requesting rate table from {}", url);

        let client = reqwest::Client::builder().user_agent("fxw/1.0").build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} from rate endpoint",
                response.status()
            ));
        }

        let text = response.text().await?;
        let table: RateTable = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse rate table response: {}", e))?;

        debug!(pairs = table.len(), "Fetched rate table");
        Ok(table)
    }
}
