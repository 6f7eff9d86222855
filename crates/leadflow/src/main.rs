// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Leadflow - bulk lead import from CSV exports.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod doctor;
mod import;
mod leads;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use leadflow_config::LeadflowConfig;
use leadflow_core::{LeadflowError, PluginAdapter};
use leadflow_storage::SqliteStorage;

/// Leadflow - bulk lead import from CSV exports.
#[derive(Parser, Debug)]
#[command(name = "leadflow", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Import leads from a CSV file.
    Import {
        /// Path to the CSV file.
        file: PathBuf,
        /// User id recorded as creator of the imported leads.
        #[arg(long = "as-user")]
        as_user: Option<String>,
        /// Print the import report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Export every stored lead as CSV.
    Export {
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete every stored lead.
    DeleteAll,
    /// Show the pipeline summary.
    Summary {
        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List the user directory.
    Users,
    /// Check configuration and storage health.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => leadflow_config::load_and_validate_path(path),
        None => leadflow_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            leadflow_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);

    if let Err(e) = run(cli.command, &config).await {
        eprintln!("leadflow: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &LeadflowConfig) -> Result<(), LeadflowError> {
    if let Commands::Doctor { plain } = command {
        return doctor::run_doctor(config, plain).await;
    }

    let storage = open_storage(config).await?;
    let result = match command {
        Commands::Import {
            file,
            as_user,
            json,
        } => import::run_import(config, &storage, &file, as_user, json).await,
        Commands::Export { output } => leads::run_export(&storage, output.as_deref()).await,
        Commands::DeleteAll => leads::run_delete_all(&storage).await,
        Commands::Summary { json } => leads::run_summary(&storage, json).await,
        Commands::Users => leads::run_users(&storage).await,
        Commands::Doctor { .. } => Ok(()),
    };
    let shutdown = storage.shutdown().await;
    command_outcome(result, shutdown)
}

/// The command's own error wins over a shutdown failure, which is then only logged.
fn command_outcome(
    result: Result<(), LeadflowError>,
    shutdown: Result<(), LeadflowError>,
) -> Result<(), LeadflowError> {
    match (result, shutdown) {
        (Err(e), Err(shutdown_err)) => {
            tracing::warn!(error = %shutdown_err, "storage shutdown failed");
            Err(e)
        }
        (result, shutdown) => result.and(shutdown),
    }
}

/// Open the configured SQLite database.
pub(crate) async fn open_storage(
    config: &LeadflowConfig,
) -> Result<Arc<SqliteStorage>, LeadflowError> {
    let storage = SqliteStorage::new(config.storage.clone());
    storage.initialize().await?;
    Ok(Arc::new(storage))
}

/// Initialize the tracing subscriber. `RUST_LOG` takes precedence over the config level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("leadflow={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = leadflow_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.import.generated_email_domain, "company.com");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn cli_parses_import_flags() {
        let cli = Cli::parse_from([
            "leadflow",
            "import",
            "leads.csv",
            "--as-user",
            "65f0a1b2c3d4e5f601234567",
            "--json",
        ]);
        match cli.command {
            Commands::Import {
                file,
                as_user,
                json,
            } => {
                assert_eq!(file, PathBuf::from("leads.csv"));
                assert_eq!(as_user.as_deref(), Some("65f0a1b2c3d4e5f601234567"));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_parses_global_config_after_subcommand() {
        let cli = Cli::parse_from(["leadflow", "summary", "--config", "alt.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
        assert!(matches!(cli.command, Commands::Summary { json: false }));
    }

    #[test]
    fn command_error_is_not_hidden_by_shutdown_error() {
        let outcome = command_outcome(
            Err(LeadflowError::MissingInput("no file provided".into())),
            Err(LeadflowError::Internal("checkpoint failed".into())),
        );
        assert!(matches!(outcome, Err(LeadflowError::MissingInput(_))));
    }

    #[test]
    fn shutdown_error_surfaces_after_successful_command() {
        let outcome = command_outcome(Ok(()), Err(LeadflowError::Internal("checkpoint failed".into())));
        assert!(matches!(outcome, Err(LeadflowError::Internal(_))));
        assert!(command_outcome(Ok(()), Ok(())).is_ok());
    }

    #[test]
    fn cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
