//! CampusBite CLI - Terminal front end for the state controller.
//!
//! # Usage
//!
//! ```bash
//! # Walk through an order from empty cart to delivery
//! cb-cli demo
//!
//! # Drive the controller interactively, one command per line
//! cb-cli repl
//!
//! # Print the loaded catalog
//! cb-cli catalog
//! ```
//!
//! # Commands
//!
//! - `demo` - Scripted order with live tracking output
//! - `repl` - Read commands from stdin, print a JSON snapshot after each
//! - `catalog` - Print restaurants, menu and courier tasks as JSON
//!
//! Logs go to stderr so stdout stays machine-readable. Set `RUST_LOG` to
//! change the level and `CAMPUSBITE_LOG_FORMAT=json` for JSON logs.

#![cfg_attr(not(test), forbid(unsafe_code))]

use campus_bite_app::CampusBite;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "cb-cli")]
#[command(author, version, about = "CampusBite terminal front end")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted order and follow its delivery
    Demo {
        /// Stop after this many tracking updates
        #[arg(short, long, default_value_t = 4)]
        updates: u32,
    },
    /// Read commands from stdin
    Repl,
    /// Print the catalog
    Catalog,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("CAMPUSBITE_LOG_FORMAT").is_ok_and(|format| format == "json");

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let app = CampusBite::from_env()?;
    match cli.command {
        Commands::Demo { updates } => commands::demo::run(&app, updates).await?,
        Commands::Repl => commands::repl::run(&app).await?,
        Commands::Catalog => commands::catalog::print(&app)?,
    }
    Ok(())
}
