use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use pgtrail::commands::{self, CheckFormat, ExecutionMode, MigrateOutcome};
use pgtrail::config::{self, ConfigInput};
use pgtrail::constants::CONFIG_FILENAME;
use pgtrail::planner::Direction;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, default_value = CONFIG_FILENAME, global = true)]
    config_file: String,

    /// Enable verbose output (info level)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Suppress all non-essential output (error level only)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Enable debug output (debug level)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report which audit objects are installed
    Check {
        /// Only check this tracked table (schema.table or table)
        #[arg(long)]
        table: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: CheckFormat,

        #[command(flatten)]
        database_args: config::DatabaseArgs,
    },

    /// Install (up) or remove (down) audit logging
    Migrate {
        #[arg(value_enum)]
        direction: Direction,

        /// Only migrate this tracked table
        #[arg(long)]
        table: Option<String>,

        /// Show what would be run without making any changes
        #[arg(long, group = "mode")]
        dry_run: bool,

        /// Apply destructive changes without confirmation
        #[arg(long, group = "mode")]
        force: bool,

        #[command(flatten)]
        database_args: config::DatabaseArgs,
    },

    /// Print the migration as a SQL script
    Script {
        #[arg(value_enum)]
        direction: Direction,

        /// Only script this tracked table
        #[arg(long)]
        table: Option<String>,

        /// Do not connect; assume an empty database for up, a full installation for down
        #[arg(long)]
        offline: bool,

        #[command(flatten)]
        database_args: config::DatabaseArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    initialize_logging(&cli);

    tokio::select! {
        result = run_main(cli) => result,
        _ = wait_for_shutdown_signal() => {
            info!("Received shutdown signal, exiting");
            Ok(())
        }
    }
}

async fn wait_for_shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn initialize_logging(cli: &Cli) {
    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level)
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_config(file_config: ConfigInput, database_args: &config::DatabaseArgs) -> Result<config::Config> {
    let cli_config = ConfigInput {
        database: Some(database_args.clone().into()),
        audit: None,
        tables: None,
    };

    config::ConfigBuilder::new()
        .with_file(file_config)
        .with_cli_args(cli_config)
        .resolve()
}

async fn run_main(cli: Cli) -> Result<()> {
    let file_config = config::load_config(&cli.config_file)?;

    match cli.command {
        Commands::Check {
            table,
            format,
            database_args,
        } => {
            let config = resolve_config(file_config, &database_args)?;
            if !commands::cmd_check(&config, table.as_deref(), format).await? {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Migrate {
            direction,
            table,
            dry_run,
            force,
            database_args,
        } => {
            let config = resolve_config(file_config, &database_args)?;

            use std::io::IsTerminal;
            let mode = if dry_run {
                ExecutionMode::DryRun
            } else if force {
                ExecutionMode::Force
            } else if std::io::stdin().is_terminal() {
                ExecutionMode::Interactive
            } else {
                ExecutionMode::RequireApproval
            };

            info!("Running audit migration {}", direction);
            match commands::cmd_migrate(&config, direction, table.as_deref(), mode).await? {
                MigrateOutcome::DestructiveRequired => std::process::exit(2),
                _ => Ok(()),
            }
        }
        Commands::Script {
            direction,
            table,
            offline,
            database_args,
        } => {
            let config = resolve_config(file_config, &database_args)?;
            let script = commands::cmd_script(&config, direction, table.as_deref(), offline).await?;
            print!("{}", script);
            Ok(())
        }
    }
}
