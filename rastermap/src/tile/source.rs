//! The `TileSource` trait.

use std::path::PathBuf;

use image::RgbaImage;
use thiserror::Error;

use crate::coord::TileCoord;

/// Errors resolving a tile to pixels.
#[derive(Debug, Error)]
pub enum TileSourceError {
    /// The source holds no image for this tile.
    #[error("Tile {0} not found")]
    NotFound(TileCoord),

    /// Reading the tile file failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tile bytes are not a decodable image.
    #[error("Failed to decode tile {tile}: {source}")]
    Decode {
        tile: TileCoord,
        #[source]
        source: image::ImageError,
    },
}

/// Resolves tile coordinates to decoded RGBA images.
///
/// Implementations must be thread-safe (`Send + Sync`): the compositor
/// fetches the tiles of one request in parallel.
pub trait TileSource: Send + Sync {
    /// Fetch and decode one tile.
    ///
    /// # Errors
    ///
    /// Returns `TileSourceError` if the tile is missing or cannot be decoded.
    fn fetch(&self, tile: &TileCoord) -> Result<RgbaImage, TileSourceError>;

    /// Human-readable name for log output.
    fn name(&self) -> &str;
}
