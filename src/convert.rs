//! One-shot conversion between two supported currencies.

use anyhow::{Result, bail};
use tracing::debug;

use crate::config::AppConfig;
use crate::currency::{CurrencyCode, RateBoard};
use crate::format::NumberFormatter;
use crate::providers::status_api::StatusApiProvider;
use crate::ui;

pub async fn run(config: &AppConfig, amount: f64, from: &str, to: &str) -> Result<()> {
    let from: CurrencyCode = from.parse()?;
    let to: CurrencyCode = to.parse()?;

    let provider = StatusApiProvider::new(config.base_url());
    let mut board = RateBoard::new(from);

    let spinner = ui::new_spinner("Fetching exchange rates...");
    board.refresh(&provider).await;
    spinner.finish_and_clear();

    let Some(rate) = board.rate(from, to) else {
        bail!("No rate available for {from} to {to}");
    };
    debug!(%from, %to, rate, "Converting amount");

    let formatter = NumberFormatter::new(config.format_options());
    println!(
        "{} = {}",
        formatter.currency(amount, from.as_str()),
        formatter.currency(amount * rate, to.as_str())
    );
    println!(
        "{}",
        ui::style_text(&format!("1 {from} = {rate:.4} {to}"), ui::StyleType::Subtle)
    );
    Ok(())
}
