//! Grid construction from a validated query.

use tracing::debug;

use super::{QueryBox, RasterResult, TileGrid};
use crate::coord::{locate_tile, Corner, GeoBox, WorldBounds};

/// Builds the tile grid covering `query` at `depth`.
///
/// The query must already have passed [`QueryBox::validate`]. The upper-left
/// corner fixes the first row/column and the grid's north-west edge, the
/// lower-right corner the last row/column and the south-east edge.
pub fn build_grid(world: &WorldBounds, query: &QueryBox, depth: u8) -> RasterResult {
    let ul = locate_tile(world, query.ul_lon, query.ul_lat, depth, Corner::UpperLeft);
    let lr = locate_tile(world, query.lr_lon, query.lr_lat, depth, Corner::LowerRight);

    let grid = TileGrid::from_range(depth, (ul.x, lr.x), (ul.y, lr.y));
    let bounds = GeoBox::new(ul.lon, ul.lat, lr.lon, lr.lat);

    debug!(
        depth,
        x0 = ul.x,
        y0 = ul.y,
        x1 = lr.x,
        y1 = lr.y,
        rows = grid.rows(),
        cols = grid.cols(),
        "Built tile grid"
    );

    RasterResult::success(grid, bounds)
}
