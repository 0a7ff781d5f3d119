use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxw::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxw::AppCommand {
    fn from(cmd: Commands) -> fxw::AppCommand {
        match cmd {
            Commands::Rates { currency } => fxw::AppCommand::Rates { currency },
            Commands::Convert { amount, from, to } => {
                fxw::AppCommand::Convert { amount, from, to }
            }
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the exchange-rate board
    Rates {
        /// Currency to select on the board
        #[arg(long)]
        currency: Option<String>,
    },
    /// Convert an amount between two supported currencies
    Convert {
        amount: f64,
        from: String,
        to: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxw::config::setup(),
        Some(cmd) => fxw::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
