//! bmir - Azure container mirroring CLI
//!
//! Enumerates the configured blob container, reconstructs its folder
//! hierarchy, writes the reports, and mirrors the container to disk.

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use bm_azure::AzureBlobStore;
use bm_core::Settings;

use blobmirror::exit_code::ExitCode;
use blobmirror::pipeline;

/// Mirror an Azure blob-storage container to local disk
#[derive(Parser, Debug)]
#[command(name = "bmir")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output directory for reports and downloads
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Suppress non-error output
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.quiet {
        "error"
    } else if cli.debug {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    std::process::exit(run(cli).await.as_i32());
}

async fn run(cli: Cli) -> ExitCode {
    // Pick up a .env file when present; plain environment variables
    // work the same without one.
    dotenvy::dotenv().ok();

    let mut settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            error!("{err}");
            error!("provide the Azure credentials in a .env file or in the environment");
            return ExitCode::from(&err);
        }
    };
    if let Some(dir) = cli.output_dir {
        settings.output_dir = dir;
    }

    let store = match AzureBlobStore::connect(&settings) {
        Ok(store) => store,
        Err(err) => {
            error!("{err}");
            return ExitCode::from(&err);
        }
    };
    info!(
        account = %settings.account_name,
        container = %settings.container_name,
        "connected to storage account"
    );

    match pipeline::run(&store, &settings).await {
        Ok(()) => ExitCode::Success,
        Err(err) => {
            error!("{err}");
            ExitCode::from(&err)
        }
    }
}
