//! Zoom depth selection.
//!
//! Resolution is measured in longitude degrees per pixel (LonDPP). A query
//! needs `(lr_lon - ul_lon) / width_px`; a tile at depth `d` offers
//! `world_lon_span / (tile_size * 2^d)`. The chosen depth is the shallowest
//! one whose tiles are at least as fine as the query needs.

use crate::coord::WorldBounds;

pub use crate::coord::MAX_DEPTH;

/// LonDPP delivered by tiles at `depth`.
pub fn lon_dpp_at_depth(world: &WorldBounds, depth: u8) -> f64 {
    world.bounds().lon_span() / (f64::from(world.tile_size()) * 2.0_f64.powi(i32::from(depth)))
}

/// LonDPP a viewport needs to show `lon_span` degrees across `width_px` pixels.
pub fn query_lon_dpp(lon_span: f64, width_px: f64) -> f64 {
    lon_span / width_px
}

/// Selects the shallowest depth in `0..=MAX_DEPTH` fine enough for the query.
///
/// Queries finer than the deepest tiles get [`MAX_DEPTH`]. The caller must
/// pass a positive `width_px` and `lon_span`.
pub fn select_depth(world: &WorldBounds, lon_span: f64, width_px: f64) -> u8 {
    let required = query_lon_dpp(lon_span, width_px);
    let mut depth = 0;
    while lon_dpp_at_depth(world, depth) > required && depth < MAX_DEPTH {
        depth += 1;
    }
    depth
}
