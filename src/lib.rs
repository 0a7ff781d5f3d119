pub mod config;
pub mod convert;
pub mod currency;
pub mod format;
pub mod log;
pub mod providers;
pub mod rate_provider;
pub mod rates;
pub mod ui;

use anyhow::Result;
use tracing::debug;

#[derive(Debug, Clone)]
pub enum AppCommand {
    Rates { currency: Option<String> },
    Convert { amount: f64, from: String, to: String },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Rates { currency } => rates::run(&config, currency.as_deref()).await,
        AppCommand::Convert { amount, from, to } => {
            convert::run(&config, amount, &from, &to).await
        }
    }
}
