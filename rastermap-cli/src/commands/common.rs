//! Arguments and helpers shared across CLI commands.

use std::path::Path;

use clap::Args;
use rastermap::config::ConfigFile;
use rastermap::raster::QueryBox;

use crate::error::CliError;

/// Viewport arguments accepted by every command.
#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// Upper-left longitude
    #[arg(long, allow_negative_numbers = true)]
    pub ullon: f64,

    /// Upper-left latitude
    #[arg(long, allow_negative_numbers = true)]
    pub ullat: f64,

    /// Lower-right longitude
    #[arg(long, allow_negative_numbers = true)]
    pub lrlon: f64,

    /// Lower-right latitude
    #[arg(long, allow_negative_numbers = true)]
    pub lrlat: f64,

    /// Viewport width in pixels
    #[arg(long)]
    pub w: f64,

    /// Viewport height in pixels
    #[arg(long)]
    pub h: f64,
}

impl QueryArgs {
    pub fn to_query(&self) -> QueryBox {
        QueryBox::new(self.ullon, self.ullat, self.lrlon, self.lrlat, self.w, self.h)
    }
}

/// Load the config file given by `--config`, or the default one.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    let config = match path {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    Ok(config)
}
