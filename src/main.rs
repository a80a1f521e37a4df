use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use finance_ledger::cli::Session;
use finance_ledger::config::{LedgerPaths, Settings};

#[derive(Parser)]
#[command(
    name = "finledger",
    version,
    about = "In-memory personal finance ledger",
    long_about = "finledger keeps bank accounts, income and expense categories and \
                  the operations between them for one session, and imports or \
                  exports each list as JSON or CSV. Type 'help' inside the \
                  session for the available commands."
)]
struct Cli {
    /// Directory holding config.json
    #[arg(long, env = "FINLEDGER_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Log filter directive, overrides RUST_LOG and the configured one
    #[arg(long)]
    log_filter: Option<String>,
}

/// Filter precedence: `--log-filter`, then `RUST_LOG`, then settings
fn init_tracing(cli_filter: Option<&str>, configured: &str) {
    let filter = match cli_filter {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.config_dir {
        Some(dir) => LedgerPaths::with_base_dir(dir),
        None => LedgerPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)
        .with_context(|| format!("loading {}", paths.settings_file().display()))?;

    init_tracing(cli.log_filter.as_deref(), &settings.log_filter);
    tracing::debug!(config_dir = %paths.base_dir().display(), "starting session");

    if !paths.is_initialized() {
        match settings.save(&paths) {
            Ok(()) => tracing::info!(path = %paths.settings_file().display(), "wrote default settings"),
            Err(e) => tracing::warn!(error = %e, "could not write default settings"),
        }
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let session = Session::new(settings).with_prompt(interactive);

    let mut stdout = io::stdout().lock();
    session.run(stdin.lock(), &mut stdout)?;
    Ok(())
}
