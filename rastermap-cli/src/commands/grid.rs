//! `rastermap grid`: print the tile grid covering a viewport.

use clap::Args;
use rastermap::config::ConfigFile;
use rastermap::raster::Rasterer;
use rastermap::response::RasterResponse;
use tracing::info;

use super::common::QueryArgs;
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct GridArgs {
    #[command(flatten)]
    pub query: QueryArgs,
}

/// Run the grid command.
pub fn run(args: GridArgs, config: &ConfigFile) -> Result<(), CliError> {
    let response = grid_response(&args, config);
    println!("{}", response.to_json_pretty()?);
    Ok(())
}

/// Raster the query without compositing. Rejected queries yield the
/// failure response rather than an error.
pub fn grid_response(args: &GridArgs, config: &ConfigFile) -> RasterResponse {
    let result = Rasterer::new(config.world).raster(&args.query.to_query());

    if let Some(grid) = &result.grid {
        info!(
            depth = result.depth,
            rows = grid.rows(),
            cols = grid.cols(),
            "Grid computed"
        );
    }

    RasterResponse::from(&result)
}
