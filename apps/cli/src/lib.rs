//! # printcost CLI Library
//!
//! Parses the command line, loads configuration, opens the quote store and
//! runs one command.
//!
//! ## Module Organization
//! ```text
//! printcost_cli/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── AppConfig (TOML + env)
//! │   └── session.rs  ◄─── QuoteSession over the quote store
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── calc.rs     ◄─── Price a part, add it to the quote
//! │   ├── quote.rs    ◄─── list / remove / set-quantity / clear
//! │   ├── export.rs   ◄─── PDF and text documents
//! │   └── config.rs   ◄─── Show configuration
//! └── error.rs        ◄─── AppError and exit codes
//! ```
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (logging to stderr)
//! 3. Load configuration (defaults, file, environment)
//! 4. Open the quote store and restore the saved quote
//! 5. Run the command
//!
//! `config` commands stop after step 3 and never touch the store.

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::process::ExitCode;

use clap::Parser;
use printcost_db::{Database, DbConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::AppResult;
use state::{AppConfig, QuoteSession};

/// Sets up logging.
///
/// Logs go to stderr so command output on stdout stays clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=printcost=trace` - Show trace for printcost crates only
/// - Default: warnings, plus INFO from printcost
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,printcost=info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the CLI and maps the outcome to a process exit code.
pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            for line in err.lines() {
                eprintln!("error: {}", line);
            }
            err.exit_code()
        }
    }
}

async fn execute(cli: Cli) -> AppResult<()> {
    let config = AppConfig::load(cli.config)?;

    if let Commands::Config { action } = &cli.command {
        return commands::config::run(action, &config);
    }

    let db = Database::new(DbConfig::new(config.storage.database_path.clone())).await?;
    let mut session = QuoteSession::open(db.quotes()).await?;
    info!(path = ?config.storage.database_path, "Quote store ready");

    let result = match &cli.command {
        Commands::Calc(args) => commands::calc::run(args, &config, &mut session).await,
        Commands::List => commands::quote::list(&session),
        Commands::Remove { position } => commands::quote::remove(&mut session, *position).await,
        Commands::SetQuantity { position, quantity } => {
            commands::quote::set_quantity(&mut session, *position, *quantity).await
        }
        Commands::Clear => commands::quote::clear(&mut session).await,
        Commands::Export(args) => commands::export::run(args, &config.report, session.items()),
        Commands::Config { .. } => Ok(()),
    };

    db.close().await;
    debug!("Quote store closed");
    result
}
