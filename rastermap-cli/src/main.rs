//! RasterMap CLI - Command-line interface
//!
//! Computes tile grids and composites map images using the rastermap library.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rastermap::logging::{default_log_dir, default_log_file, init_logging};

use commands::{common, grid, raster};
use error::CliError;

#[derive(Parser)]
#[command(name = "rastermap")]
#[command(version, long_about = None)]
#[command(about = "Composite pre-rendered map tiles for a geographic viewport")]
struct Cli {
    /// Configuration file (default: ~/.rastermap/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tile grid covering a viewport as JSON
    Grid(grid::GridArgs),

    /// Composite the tiles covering a viewport into a PNG
    Raster(raster::RasterArgs),
}

fn main() {
    let cli = Cli::parse();

    let _logging_guard = match init_logging(&default_log_dir(), default_log_file(), cli.verbose) {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e.to_string()).exit(),
    };

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = common::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Grid(args) => grid::run(args, &config),
        Commands::Raster(args) => raster::run(args, &config),
    }
}
