//! Currency model and the pairwise rate board.
//!
//! The rate endpoint serves a flat table keyed by lowercase `"base-quote"`
//! strings. [`RateBoard`] reshapes that table into per-currency pairs for
//! the fixed set of supported currencies and tracks which one is selected.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::rate_provider::RateProvider;

/// Raw response from the rate endpoint: lowercase `"base-quote"` -> rate.
///
/// Replaced wholesale on every successful fetch. Keys for pairs outside the
/// supported set are ignored.
pub type RateTable = HashMap<String, f64>;

/// The supported currencies. The set is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CurrencyCode {
    Usd,
    Eur,
    Rub,
}

impl CurrencyCode {
    /// All supported currencies, in id order.
    pub const ALL: [CurrencyCode; 3] = [CurrencyCode::Usd, CurrencyCode::Eur, CurrencyCode::Rub];

    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "USD",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Rub => "RUB",
        }
    }

    /// Lowercase form used in rate-table keys.
    pub fn key_part(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "usd",
            CurrencyCode::Eur => "eur",
            CurrencyCode::Rub => "rub",
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            CurrencyCode::Usd => 0,
            CurrencyCode::Eur => 1,
            CurrencyCode::Rub => 2,
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(CurrencyCode::Usd),
            "EUR" => Ok(CurrencyCode::Eur),
            "RUB" => Ok(CurrencyCode::Rub),
            _ => Err(anyhow!("Unsupported currency: {s}")),
        }
    }
}

/// Builds the lowercase `"base-quote"` lookup key for a currency pair.
pub fn pair_key(base: CurrencyCode, quote: CurrencyCode) -> String {
    format!("{}-{}", base.key_part(), quote.key_part())
}

/// One supported currency with its rates against the other supported ones.
///
/// A pair slot is `None` until a fetched table carries that key.
#[derive(Debug, Clone)]
pub struct Currency {
    pub code: CurrencyCode,
    pub id: u32,
    pub pairs: BTreeMap<CurrencyCode, Option<f64>>,
}

impl Currency {
    fn new(code: CurrencyCode) -> Self {
        let pairs = CurrencyCode::ALL
            .iter()
            .filter(|other| **other != code)
            .map(|other| (*other, None))
            .collect();

        Currency {
            code,
            id: code.id(),
            pairs,
        }
    }
}

/// The pairwise rate board: all supported currencies, the selected one, and
/// the last successfully fetched table.
#[derive(Debug, Clone)]
pub struct RateBoard {
    currencies: Vec<Currency>,
    selected: CurrencyCode,
    table: Option<RateTable>,
    fetched_at: Option<DateTime<Utc>>,
}

impl RateBoard {
    pub fn new(selected: CurrencyCode) -> Self {
        RateBoard {
            currencies: CurrencyCode::ALL.iter().map(|c| Currency::new(*c)).collect(),
            selected,
            table: None,
            fetched_at: None,
        }
    }

    pub fn selected(&self) -> CurrencyCode {
        self.selected
    }

    pub fn select(&mut self, code: CurrencyCode) {
        self.selected = code;
    }

    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    /// Every currency except the selected one, in id order.
    pub fn active_currencies(&self) -> Vec<&Currency> {
        self.currencies
            .iter()
            .filter(|c| c.code != self.selected)
            .collect()
    }

    /// The last successfully fetched table, if any.
    pub fn table(&self) -> Option<&RateTable> {
        self.table.as_ref()
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// Rewrites every currency's pairs from a freshly fetched table.
    ///
    /// Every pair slot is touched: keys absent from the new table become
    /// `None` even if a previous table carried them.
    pub fn apply(&mut self, table: RateTable) {
        for currency in &mut self.currencies {
            for (quote, slot) in currency.pairs.iter_mut() {
                *slot = table.get(&pair_key(currency.code, *quote)).copied();
            }
        }
        self.fetched_at = Some(Utc::now());
        self.table = Some(table);
    }

    /// Fetches a fresh table and applies it.
    ///
    /// On failure the error is logged and the board keeps its last known
    /// state. No retry is attempted.
    pub async fn refresh(&mut self, provider: &dyn RateProvider) {
        match provider.fetch_rates().await {
            Ok(table) => {
                debug!(pairs = table.len(), "Applying fresh rate table");
                self.apply(table);
            }
            Err(e) => {
                warn!(error = %e, "Rate fetch failed, keeping last known rates");
            }
        }
    }

    /// Pairwise rate from the current board state. A currency converts to
    /// itself at 1.0; anything unfetched or absent is `None`.
    pub fn rate(&self, from: CurrencyCode, to: CurrencyCode) -> Option<f64> {
        if from == to {
            return Some(1.0);
        }
        self.currencies
            .iter()
            .find(|c| c.code == from)
            .and_then(|c| c.pairs.get(&to).copied().flatten())
    }
}

impl Default for RateBoard {
    fn default() -> Self {
        RateBoard::new(CurrencyCode::Usd)
    }
}
