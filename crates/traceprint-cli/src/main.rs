//! CLI for traceprint — measure how identifiable a device is.

mod commands;
mod probes;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "traceprint")]
#[command(about = "traceprint — measure how identifiable a device is")]
#[command(version = traceprint_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the identifiability scan and print per-attribute entropy
    Scan {
        /// Use the canned demo readings (a typical desktop browser) instead
        /// of probing this host
        #[arg(long)]
        demo: bool,

        /// Emit the terminal report as pretty JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the configured attribute catalog and its data sources
    Attributes,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scan { demo, json } => commands::scan::run(demo, json).await,
        Commands::Attributes => commands::attributes::run(),
    }
}
