//! Coordinate conversion module
//!
//! Maps geographic points onto the tile pyramid covering [`WorldBounds`].
//! The pyramid is a plain equirectangular quad-tree: depth `d` splits the
//! world into `2^d` equal longitude bands and `2^d` equal latitude bands.

mod types;

pub use types::{
    CoordError, Corner, CornerTile, GeoBox, TileCoord, WorldBounds, MAX_DEPTH, TILE_SIZE,
};

/// Finds the tile containing a point and reports the edge named by `corner`.
///
/// Points outside the world are first pulled onto its nearest edge, so the
/// returned indices are always valid for `depth`, whatever the input. A
/// point lying exactly on a tile boundary belongs to the tile east/south of
/// that boundary.
///
/// # Arguments
///
/// * `world` - Extent of the tile pyramid
/// * `lon` - Longitude in degrees
/// * `lat` - Latitude in degrees
/// * `depth` - Zoom level (values above [`MAX_DEPTH`] are treated as `MAX_DEPTH`)
/// * `corner` - Which edge of the containing tile to report
pub fn locate_tile(
    world: &WorldBounds,
    lon: f64,
    lat: f64,
    depth: u8,
    corner: Corner,
) -> CornerTile {
    let origin = world.bounds();
    let lon = lon.clamp(origin.ul_lon, origin.lr_lon);
    let lat = lat.clamp(origin.lr_lat, origin.ul_lat);

    let max_index = world.tiles_per_side(depth) - 1;
    let lon_span = world.tile_lon_span(depth);
    let lat_span = world.tile_lat_span(depth);

    // `as u32` saturates (and maps NaN to 0), the min() handles the far edge
    let x = (((lon - origin.ul_lon).abs() / lon_span).floor() as u32).min(max_index);
    let y = (((lat - origin.ul_lat).abs() / lat_span).floor() as u32).min(max_index);

    let (edge_x, edge_y) = match corner {
        Corner::UpperLeft => (x, y),
        Corner::LowerRight => (x + 1, y + 1),
    };

    CornerTile {
        x,
        y,
        lon: (origin.ul_lon + f64::from(edge_x) * lon_span).clamp(origin.ul_lon, origin.lr_lon),
        lat: (origin.ul_lat - f64::from(edge_y) * lat_span).clamp(origin.lr_lat, origin.ul_lat),
    }
}
