//! Tile compositing.
//!
//! Stitches the tiles of a [`RasterResult`] into one bitmap, optionally
//! strokes a route over it, and encodes the result as PNG.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use image::{Rgba, RgbaImage};
//! use rastermap::compositor::Compositor;
//! use rastermap::coord::{TileCoord, WorldBounds, TILE_SIZE};
//! use rastermap::raster::{QueryBox, Rasterer};
//! use rastermap::tile::MemoryTileSource;
//!
//! let tiles = MemoryTileSource::new().with_tile(
//!     TileCoord::new(0, 0, 0),
//!     RgbaImage::from_pixel(TILE_SIZE, TILE_SIZE, Rgba([200, 200, 200, 255])),
//! );
//! let world = WorldBounds::BERKELEY;
//! let b = *world.bounds();
//! let query = QueryBox::new(b.ul_lon, b.ul_lat, b.lr_lon, b.lr_lat, 256.0, 256.0);
//! let result = Rasterer::new(world).raster(&query);
//!
//! let composite = Compositor::new(Arc::new(tiles), TILE_SIZE)
//!     .composite(&result, None)
//!     .unwrap();
//! assert_eq!((composite.width, composite.height), (256, 256));
//! ```

mod error;
mod overlay;

pub use error::CompositeError;
pub use overlay::{project, RouteStyle, DEFAULT_ROUTE_COLOR, DEFAULT_ROUTE_WIDTH};

use std::io::Cursor;
use std::sync::Arc;

use image::{imageops, ImageFormat, RgbaImage};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::raster::{RasterResult, TileGrid};
use crate::route::{PointLookup, RouteOverlay};
use crate::tile::{TileSource, TileSourceError};

/// A finished, PNG-encoded composite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composite {
    /// PNG bytes
    pub png: Vec<u8>,
    /// Bitmap width in pixels
    pub width: u32,
    /// Bitmap height in pixels
    pub height: u32,
    /// Tiles the source could not supply (left blank)
    pub missing_tiles: usize,
}

/// Builds composite images from tile grids.
///
/// Stateless apart from its read-only tile source, so one compositor can be
/// shared across threads.
pub struct Compositor {
    source: Arc<dyn TileSource>,
    tile_size: u32,
    route_style: RouteStyle,
}

impl Compositor {
    /// Create a compositor reading tiles of `tile_size` pixels from `source`.
    pub fn new(source: Arc<dyn TileSource>, tile_size: u32) -> Self {
        Self {
            source,
            tile_size,
            route_style: RouteStyle::default(),
        }
    }

    /// Set the stroke used for route overlays.
    pub fn with_route_style(mut self, style: RouteStyle) -> Self {
        self.route_style = style;
        self
    }

    /// The route stroke in use.
    pub fn route_style(&self) -> &RouteStyle {
        &self.route_style
    }

    /// Render `result` and encode it as PNG.
    ///
    /// # Arguments
    ///
    /// * `result` - A successful raster result
    /// * `route` - Optional route and the lookup resolving its point ids
    ///
    /// # Errors
    ///
    /// - `CompositeError::IncompleteResult` if `result` cannot be rendered
    /// - `CompositeError::Encoding` if PNG encoding fails
    pub fn composite(
        &self,
        result: &RasterResult,
        route: Option<(&RouteOverlay, &dyn PointLookup)>,
    ) -> Result<Composite, CompositeError> {
        let (image, missing_tiles) = self.render(result, route)?;
        let png = encode_png(&image)?;

        info!(
            width = image.width(),
            height = image.height(),
            depth = result.depth,
            missing_tiles,
            bytes = png.len(),
            "Composite complete"
        );

        Ok(Composite {
            png,
            width: image.width(),
            height: image.height(),
            missing_tiles,
        })
    }

    /// Render `result` to a bitmap without encoding it.
    ///
    /// Returns the bitmap and the number of tiles left blank.
    pub fn render(
        &self,
        result: &RasterResult,
        route: Option<(&RouteOverlay, &dyn PointLookup)>,
    ) -> Result<(RgbaImage, usize), CompositeError> {
        let grid = result
            .renderable_grid()
            .ok_or(CompositeError::IncompleteResult)?;

        let (mut canvas, missing) = self.stitch(grid)?;

        if let Some((overlay, points)) = route {
            if !overlay.is_empty() {
                let positions = overlay.resolve(points);
                debug!(
                    points = overlay.len(),
                    resolved = positions.len(),
                    "Drawing route overlay"
                );
                overlay::draw_route(&mut canvas, &result.bounds, &positions, &self.route_style);
            }
        }

        Ok((canvas, missing))
    }

    /// Places every tile of `grid` at its `(col, row) × tile_size` offset.
    fn stitch(&self, grid: &TileGrid) -> Result<(RgbaImage, usize), CompositeError> {
        let too_large = || CompositeError::CanvasTooLarge {
            cols: grid.cols(),
            rows: grid.rows(),
            tile_size: self.tile_size,
        };
        let width = u32::try_from(grid.cols())
            .ok()
            .and_then(|c| c.checked_mul(self.tile_size))
            .ok_or_else(too_large)?;
        let height = u32::try_from(grid.rows())
            .ok()
            .and_then(|r| r.checked_mul(self.tile_size))
            .ok_or_else(too_large)?;

        let mut canvas = RgbaImage::new(width, height);
        let mut missing = 0;

        // One row of decoded tiles is held at a time
        for (row, tiles) in grid.tile_rows().enumerate() {
            let fetched: Vec<_> = tiles
                .par_iter()
                .map(|tile| self.source.fetch(tile))
                .collect();

            for (col, (tile, image)) in tiles.iter().zip(fetched).enumerate() {
                match image {
                    Ok(image) if image.dimensions() != (self.tile_size, self.tile_size) => {
                        warn!(
                            tile = %tile,
                            width = image.width(),
                            height = image.height(),
                            expected = self.tile_size,
                            "Tile has the wrong size, leaving blank"
                        );
                        missing += 1;
                    }
                    Ok(image) => {
                        let x = i64::from(self.tile_size) * col as i64;
                        let y = i64::from(self.tile_size) * row as i64;
                        imageops::replace(&mut canvas, &image, x, y);
                    }
                    Err(TileSourceError::NotFound(_)) => {
                        warn!(
                            tile = %tile,
                            source = self.source.name(),
                            "Tile not found, leaving blank"
                        );
                        missing += 1;
                    }
                    Err(e) => {
                        warn!(tile = %tile, error = %e, "Failed to load tile, leaving blank");
                        missing += 1;
                    }
                }
            }
        }

        Ok((canvas, missing))
    }
}

/// Encodes a bitmap as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, CompositeError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::{GeoBox, TileCoord, WorldBounds, TILE_SIZE};
    use crate::raster::{QueryBox, Rasterer};
    use crate::route::PointTable;
    use crate::tile::MemoryTileSource;
    use image::Rgba;

    const GREY: Rgba<u8> = Rgba([200, 200, 200, 255]);

    fn solid(color: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_pixel(TILE_SIZE, TILE_SIZE, color)
    }

    fn whole_world_result() -> RasterResult {
        let world = WorldBounds::BERKELEY;
        let b = *world.bounds();
        let query = QueryBox::new(b.ul_lon, b.ul_lat, b.lr_lon, b.lr_lat, 256.0, 256.0);
        Rasterer::new(world).raster(&query)
    }

    #[test]
    fn test_single_tile_round_trip() {
        let source = MemoryTileSource::new().with_tile(TileCoord::new(0, 0, 0), solid(GREY));
        let compositor = Compositor::new(Arc::new(source), TILE_SIZE);

        let result = whole_world_result();
        assert_eq!(result.depth, 0);

        let composite = compositor.composite(&result, None).unwrap();
        assert_eq!(composite.width, TILE_SIZE);
        assert_eq!(composite.height, TILE_SIZE);
        assert_eq!(composite.missing_tiles, 0);

        let decoded = image::load_from_memory(&composite.png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (TILE_SIZE, TILE_SIZE));
        assert_eq!(*decoded.get_pixel(100, 100), GREY);
    }

    #[test]
    fn test_tiles_placed_row_major() {
        let colors = [
            Rgba([255, 0, 0, 255]),
            Rgba([0, 255, 0, 255]),
            Rgba([0, 0, 255, 255]),
            Rgba([255, 255, 0, 255]),
        ];
        let mut source = MemoryTileSource::new();
        for (i, color) in colors.iter().enumerate() {
            let tile = TileCoord::new(1, (i % 2) as u32, (i / 2) as u32);
            source.insert(tile, RgbaImage::from_pixel(4, 4, *color));
        }
        let grid = TileGrid::from_range(1, (0, 1), (0, 1));
        let result = RasterResult::success(grid, GeoBox::new(0.0, 1.0, 1.0, 0.0));

        let (image, missing) = Compositor::new(Arc::new(source), 4)
            .render(&result, None)
            .unwrap();

        assert_eq!(missing, 0);
        assert_eq!(image.dimensions(), (8, 8));
        assert_eq!(*image.get_pixel(1, 1), colors[0]);
        assert_eq!(*image.get_pixel(6, 1), colors[1]);
        assert_eq!(*image.get_pixel(1, 6), colors[2]);
        assert_eq!(*image.get_pixel(6, 6), colors[3]);
    }

    #[test]
    fn test_missing_tile_left_blank() {
        let source = MemoryTileSource::new().with_tile(
            TileCoord::new(1, 0, 0),
            RgbaImage::from_pixel(4, 4, GREY),
        );
        let grid = TileGrid::from_range(1, (0, 1), (0, 0));
        let result = RasterResult::success(grid, GeoBox::new(0.0, 1.0, 1.0, 0.0));

        let (image, missing) = Compositor::new(Arc::new(source), 4)
            .render(&result, None)
            .unwrap();

        assert_eq!(missing, 1);
        assert_eq!(*image.get_pixel(1, 1), GREY);
        assert_eq!(image.get_pixel(6, 1).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_wrong_size_tile_left_blank() {
        let source = MemoryTileSource::new()
            .with_tile(TileCoord::new(1, 0, 0), RgbaImage::from_pixel(8, 8, GREY))
            .with_tile(TileCoord::new(1, 1, 0), RgbaImage::from_pixel(4, 4, GREY));
        let grid = TileGrid::from_range(1, (0, 1), (0, 0));
        let result = RasterResult::success(grid, GeoBox::new(0.0, 1.0, 1.0, 0.0));

        let (image, missing) = Compositor::new(Arc::new(source), 4)
            .render(&result, None)
            .unwrap();

        assert_eq!(missing, 1);
        assert_eq!(image.get_pixel(1, 1).0, [0, 0, 0, 0]);
        assert_eq!(*image.get_pixel(6, 1), GREY);
    }

    #[test]
    fn test_failed_result_is_rejected() {
        let compositor = Compositor::new(Arc::new(MemoryTileSource::new()), TILE_SIZE);
        let result = compositor.composite(&RasterResult::failure(), None);
        assert!(matches!(result, Err(CompositeError::IncompleteResult)));
    }

    #[test]
    fn test_result_without_grid_is_rejected() {
        let mut result = whole_world_result();
        result.grid = None;

        let compositor = Compositor::new(Arc::new(MemoryTileSource::new()), TILE_SIZE);
        assert!(matches!(
            compositor.composite(&result, None),
            Err(CompositeError::IncompleteResult)
        ));
    }

    #[test]
    fn test_oversized_canvas_is_rejected() {
        let grid = TileGrid::from_range(2, (0, 3), (0, 0));
        let result = RasterResult::success(grid, GeoBox::new(0.0, 1.0, 1.0, 0.0));
        let compositor = Compositor::new(Arc::new(MemoryTileSource::new()), u32::MAX / 2);

        assert!(matches!(
            compositor.render(&result, None),
            Err(CompositeError::CanvasTooLarge { cols: 4, .. })
        ));
    }

    #[test]
    fn test_route_overlay_drawn() {
        let source = MemoryTileSource::new().with_tile(TileCoord::new(0, 0, 0), solid(GREY));
        let result = whole_world_result();
        let b = result.bounds;

        let mut points = PointTable::new();
        points.insert(1, b.ul_lon, b.ul_lat);
        points.insert(2, b.lr_lon, b.lr_lat);
        let route = RouteOverlay::new(vec![1, 2]);
        let lookup: &dyn PointLookup = &points;

        let (image, _) = Compositor::new(Arc::new(source), TILE_SIZE)
            .render(&result, Some((&route, lookup)))
            .unwrap();

        assert_ne!(*image.get_pixel(128, 128), GREY);
        assert_eq!(*image.get_pixel(250, 5), GREY);
    }

    #[test]
    fn test_zero_length_route_at_upper_left() {
        let source = MemoryTileSource::new().with_tile(TileCoord::new(0, 0, 0), solid(GREY));
        let result = whole_world_result();
        let b = result.bounds;
        assert_eq!(project(&b, TILE_SIZE, TILE_SIZE, b.ul_lon, b.ul_lat), (0.0, 0.0));

        let corner = move |_: u64| Some((b.ul_lon, b.ul_lat));
        let lookup: &dyn PointLookup = &corner;
        let route = RouteOverlay::new(vec![7, 7]);

        let composite = Compositor::new(Arc::new(source), TILE_SIZE)
            .composite(&result, Some((&route, lookup)))
            .unwrap();
        assert_eq!(composite.width, TILE_SIZE);
    }

    #[test]
    fn test_empty_route_draws_nothing() {
        let source = MemoryTileSource::new().with_tile(TileCoord::new(0, 0, 0), solid(GREY));
        let result = whole_world_result();
        let route = RouteOverlay::default();
        let points = PointTable::new();
        let lookup: &dyn PointLookup = &points;

        let (image, _) = Compositor::new(Arc::new(source), TILE_SIZE)
            .render(&result, Some((&route, lookup)))
            .unwrap();
        assert!(image.pixels().all(|p| *p == GREY));
    }

    #[test]
    fn test_compositor_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Compositor>();
    }
}
