//! `cpanel-requests` command line tool
//!
//! Calls cPanel API functions and cleans up the cookie and log files left
//! behind by client sessions.
//!
//! # Usage
//!
//! ```bash
//! cpanel-requests api Email list_pops regex=^info
//! cpanel-requests cleanup:cookies --lifetime 3600
//! cpanel-requests cleanup:logs
//! ```

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{
    EnvFilter, Registry, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

use cpanel_requests::{
    cli::{self, ApiArgs},
    config::{ConfigLoader, LoggingSettings},
    utils::VERSION,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "cpanel-requests")]
#[command(disable_version_flag = true)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Show version information
    #[arg(long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Call a cPanel API function and print the result
    Api {
        /// API module, e.g. Email
        module: String,
        /// Module function, e.g. list_pops
        function: String,
        /// Request parameters
        #[arg(value_name = "KEY=VALUE")]
        parameters: Vec<String>,
    },

    /// Remove expired cookie files
    #[command(name = "cleanup:cookies")]
    CleanupCookies {
        /// Age in seconds after which cookie files expire
        #[arg(short, long, value_name = "SECONDS")]
        lifetime: Option<u64>,
    },

    /// Remove all request log files
    #[command(name = "cleanup:logs")]
    CleanupLogs,
}

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Install the stderr subscriber before configuration is loaded.
///
/// `RUST_LOG` wins when set; otherwise the level starts at `info` (or
/// `debug` with `--verbose`) and is refined by [`apply_log_level`].
fn init_logging(verbose: bool) -> FilterHandle {
    let default_level = if verbose { "debug" } else { "info" };
    let (filter, handle) = reload::Layer::new(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    handle
}

/// Switch to the level from the configuration unless `RUST_LOG` or `--verbose` set one
fn apply_log_level(
    handle: &FilterHandle,
    settings: &LoggingSettings,
    verbose: bool,
) -> anyhow::Result<()> {
    if verbose || std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return Ok(());
    }

    let level = if settings.verbose {
        "debug"
    } else {
        settings.level.as_str()
    };
    handle.reload(EnvFilter::try_new(level)?)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", VERSION);
        return Ok(());
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let log_filter = init_logging(cli.verbose);
    let settings = ConfigLoader::new().load(cli.config.as_deref())?;
    apply_log_level(&log_filter, &settings.logging, cli.verbose)?;
    debug!("Loaded configuration: {:?}", settings);

    let output = match command {
        Command::Api {
            module,
            function,
            parameters,
        } => {
            cli::run_api(
                &settings,
                ApiArgs {
                    module,
                    function,
                    parameters,
                },
            )
            .await?
        }
        Command::CleanupCookies { lifetime } => {
            cli::run_cleanup_cookies(&settings.storage, lifetime, cli.verbose)?
        }
        Command::CleanupLogs => cli::run_cleanup_logs(&settings.storage, cli.verbose)?,
    };

    println!("{}", output);
    Ok(())
}
