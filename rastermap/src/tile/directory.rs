//! Tiles stored as PNG files in one directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use super::{TileSource, TileSourceError};
use crate::coord::TileCoord;

/// Reads tiles from `<root>/d{depth}_x{x}_y{y}.png`.
#[derive(Debug, Clone)]
pub struct DirectoryTileSource {
    root: PathBuf,
}

impl DirectoryTileSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The tile directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the file holding `tile`.
    pub fn tile_path(&self, tile: &TileCoord) -> PathBuf {
        self.root.join(tile.file_name())
    }
}

impl TileSource for DirectoryTileSource {
    fn fetch(&self, tile: &TileCoord) -> Result<RgbaImage, TileSourceError> {
        let path = self.tile_path(tile);
        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => TileSourceError::NotFound(*tile),
            _ => TileSourceError::Io { path, source: e },
        })?;

        let image = image::load_from_memory(&bytes).map_err(|e| TileSourceError::Decode {
            tile: *tile,
            source: e,
        })?;
        Ok(image.to_rgba8())
    }

    fn name(&self) -> &str {
        "directory"
    }
}
