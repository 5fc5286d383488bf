//! Patchkit CLI - build Max for Live devices from Rust.

mod commands;
mod devices;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "patchkit")]
#[command(author, version, about = "Max for Live device generator", long_about = None)]
struct Cli {
    /// Log graph construction and layout details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered object types
    List(commands::list::ListArgs),

    /// List the bundled example devices
    Devices(commands::devices::DevicesArgs),

    /// Build bundled devices into .maxpat files
    Build(commands::build::BuildArgs),

    /// Scaffold a new device source file
    Init(commands::init::InitArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::List(args) => commands::list::run(args),
        Commands::Devices(args) => commands::devices::run(args),
        Commands::Build(args) => commands::build::run(args),
        Commands::Init(args) => commands::init::run(args),
    }
}
