//! Rate source abstraction for the application.

use anyhow::Result;
use async_trait::async_trait;

use crate::currency::RateTable;

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self) -> Result<RateTable>;
}
