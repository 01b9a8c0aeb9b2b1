//! Tiles held in memory.

use std::collections::HashMap;

use image::RgbaImage;

use super::{TileSource, TileSourceError};
use crate::coord::TileCoord;

/// A fixed set of decoded tiles.
///
/// Useful for preloaded pyramids and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryTileSource {
    tiles: HashMap<TileCoord, RgbaImage>,
}

impl MemoryTileSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a tile.
    pub fn insert(&mut self, tile: TileCoord, image: RgbaImage) {
        self.tiles.insert(tile, image);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_tile(mut self, tile: TileCoord, image: RgbaImage) -> Self {
        self.insert(tile, image);
        self
    }

    /// Number of stored tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns true if no tiles are stored.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl TileSource for MemoryTileSource {
    fn fetch(&self, tile: &TileCoord) -> Result<RgbaImage, TileSourceError> {
        self.tiles
            .get(tile)
            .cloned()
            .ok_or(TileSourceError::NotFound(*tile))
    }

    fn name(&self) -> &str {
        "memory"
    }
}
