//! Orddd Compat CLI - Inspection tools for the shipping-packages bridge.
//!
//! # Usage
//!
//! ```bash
//! # Print the extended shipping-methods dropdown (edit view)
//! orddd-compat methods
//!
//! # Print the read-only shape instead
//! orddd-compat methods --view view_settings
//!
//! # Print the package whose delivery settings load by default
//! orddd-compat package
//! ```
//!
//! # Commands
//!
//! - `methods` - Run the full hook chain against the host database and
//!   print every enumerated entry
//! - `package` - Print the resolved selected package

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use orddd_compat_core::ViewMode;

mod commands;

#[derive(Parser)]
#[command(name = "orddd-compat")]
#[command(author, version, about = "Delivery-date shipping-packages bridge tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the extended shipping-methods dropdown
    Methods {
        /// Output shape (`edit_settings` or `view_settings`)
        #[arg(short, long, default_value = "edit_settings")]
        view: ViewMode,
    },
    /// Print the resolved selected package
    Package,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Methods { view } => commands::methods::list(view).await?,
        Commands::Package => commands::package::show().await?,
    }
    Ok(())
}
