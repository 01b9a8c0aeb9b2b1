//! `rastermap raster`: composite the tiles covering a viewport.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use rastermap::compositor::{Composite, Compositor};
use rastermap::config::ConfigFile;
use rastermap::raster::Rasterer;
use rastermap::response::RasterResponse;
use rastermap::route::{PointLookup, RouteFile};
use rastermap::tile::DirectoryTileSource;
use tracing::{info, warn};

use super::common::QueryArgs;
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct RasterArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Tile directory (overrides [tiles] directory)
    #[arg(long)]
    pub tiles: Option<PathBuf>,

    /// Route file to draw over the map
    #[arg(long)]
    pub route: Option<PathBuf>,

    /// Write the PNG here
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Print the response JSON (implied when no --output is given)
    #[arg(long)]
    pub json: bool,
}

/// Run the raster command.
pub fn run(args: RasterArgs, config: &ConfigFile) -> Result<(), CliError> {
    let (response, composite) = render(&args, config)?;

    if let Some(path) = &args.output {
        fs::write(path, &composite.png).map_err(|error| CliError::FileWrite {
            path: path.clone(),
            error,
        })?;
        info!(
            path = %path.display(),
            width = composite.width,
            height = composite.height,
            "Wrote image"
        );
    }

    if args.json || args.output.is_none() {
        println!("{}", response.to_json_pretty()?);
    }

    Ok(())
}

/// Raster and composite the query, returning the response and the image.
pub fn render(
    args: &RasterArgs,
    config: &ConfigFile,
) -> Result<(RasterResponse, Composite), CliError> {
    let result = Rasterer::new(config.world)
        .try_raster(&args.query.to_query())
        .map_err(CliError::InvalidQuery)?;

    let tiles = args
        .tiles
        .clone()
        .unwrap_or_else(|| config.tile_directory.clone());
    let compositor = Compositor::new(
        Arc::new(DirectoryTileSource::new(tiles)),
        config.world.tile_size(),
    )
    .with_route_style(config.route_style);

    let route = args
        .route
        .as_deref()
        .map(RouteFile::load)
        .transpose()
        .map_err(CliError::Route)?;

    let composite = match &route {
        Some(file) => {
            let lookup: &dyn PointLookup = &file.points;
            compositor.composite(&result, Some((&file.route, lookup)))?
        }
        None => compositor.composite(&result, None)?,
    };

    if composite.missing_tiles > 0 {
        warn!(
            missing = composite.missing_tiles,
            "Some tiles were not found and are left blank"
        );
    }

    let response = RasterResponse::from(&result).with_composite(&composite);
    Ok((response, composite))
}
