//! Coordinate types for the tile pyramid.

use std::fmt;

use thiserror::Error;

/// Pixel edge length of one tile image at every depth.
pub const TILE_SIZE: u32 = 256;

/// Deepest zoom level of the tile pyramid.
///
/// Depth `d` holds a `2^d × 2^d` grid of tiles, so depth 7 is a 128×128 grid.
pub const MAX_DEPTH: u8 = 7;

/// Errors constructing coordinate-system values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// The box is inverted, empty or contains non-finite values.
    #[error("Invalid world bounds: {0}")]
    InvalidBounds(GeoBox),

    /// Tiles must be at least one pixel wide.
    #[error("Invalid tile size: {0}")]
    InvalidTileSize(u32),
}

/// A rectangle in geographic coordinates (degrees).
///
/// A well-formed box has `lr_lon >= ul_lon` and `lr_lat <= ul_lat`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoBox {
    /// Upper-left (west) longitude
    pub ul_lon: f64,
    /// Upper-left (north) latitude
    pub ul_lat: f64,
    /// Lower-right (east) longitude
    pub lr_lon: f64,
    /// Lower-right (south) latitude
    pub lr_lat: f64,
}

impl GeoBox {
    /// Create a box from its upper-left and lower-right corners.
    pub const fn new(ul_lon: f64, ul_lat: f64, lr_lon: f64, lr_lat: f64) -> Self {
        Self {
            ul_lon,
            ul_lat,
            lr_lon,
            lr_lat,
        }
    }

    /// Longitudinal extent in degrees.
    pub fn lon_span(&self) -> f64 {
        self.lr_lon - self.ul_lon
    }

    /// Latitudinal extent in degrees.
    pub fn lat_span(&self) -> f64 {
        self.ul_lat - self.lr_lat
    }

    /// Returns true if `other` lies entirely inside this box (edges inclusive).
    pub fn contains(&self, other: &GeoBox) -> bool {
        other.ul_lon >= self.ul_lon
            && other.lr_lon <= self.lr_lon
            && other.ul_lat <= self.ul_lat
            && other.lr_lat >= self.lr_lat
    }

    /// Overlapping part of two boxes, or `None` if they do not touch.
    pub fn intersection(&self, other: &GeoBox) -> Option<GeoBox> {
        let result = GeoBox {
            ul_lon: self.ul_lon.max(other.ul_lon),
            ul_lat: self.ul_lat.min(other.ul_lat),
            lr_lon: self.lr_lon.min(other.lr_lon),
            lr_lat: self.lr_lat.max(other.lr_lat),
        };
        (result.ul_lon <= result.lr_lon && result.lr_lat <= result.ul_lat).then_some(result)
    }

    fn is_well_formed(&self) -> bool {
        [self.ul_lon, self.ul_lat, self.lr_lon, self.lr_lat]
            .iter()
            .all(|v| v.is_finite())
            && self.lr_lon > self.ul_lon
            && self.ul_lat > self.lr_lat
    }
}

impl fmt::Display for GeoBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] → [{}, {}]",
            self.ul_lon, self.ul_lat, self.lr_lon, self.lr_lat
        )
    }
}

/// The geographic rectangle covered by the whole tile pyramid.
///
/// Immutable once built; shared read-only across requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    bounds: GeoBox,
    tile_size: u32,
}

impl WorldBounds {
    /// Tile set covering the Berkeley area.
    pub const BERKELEY: WorldBounds = WorldBounds {
        bounds: GeoBox::new(
            -122.2998046875,
            37.892_400_109_5,
            -122.2119140625,
            37.831_857_611_9,
        ),
        tile_size: TILE_SIZE,
    };

    /// Create world bounds, rejecting inverted boxes and zero-sized tiles.
    pub fn new(bounds: GeoBox, tile_size: u32) -> Result<Self, CoordError> {
        if !bounds.is_well_formed() {
            return Err(CoordError::InvalidBounds(bounds));
        }
        if tile_size == 0 {
            return Err(CoordError::InvalidTileSize(tile_size));
        }
        Ok(Self { bounds, tile_size })
    }

    /// The world rectangle.
    pub fn bounds(&self) -> &GeoBox {
        &self.bounds
    }

    /// Pixel edge length of one tile.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Number of tiles along each side of the grid at `depth`.
    pub fn tiles_per_side(&self, depth: u8) -> u32 {
        1 << depth.min(MAX_DEPTH)
    }

    /// Longitudinal span of a single tile at `depth`.
    pub fn tile_lon_span(&self, depth: u8) -> f64 {
        self.bounds.lon_span() / f64::from(self.tiles_per_side(depth))
    }

    /// Latitudinal span of a single tile at `depth`.
    pub fn tile_lat_span(&self, depth: u8) -> f64 {
        self.bounds.lat_span() / f64::from(self.tiles_per_side(depth))
    }

    /// Clamp a box so that every edge lies within the world.
    pub fn clamp(&self, geo: &GeoBox) -> GeoBox {
        let w = &self.bounds;
        GeoBox {
            ul_lon: geo.ul_lon.clamp(w.ul_lon, w.lr_lon),
            ul_lat: geo.ul_lat.clamp(w.lr_lat, w.ul_lat),
            lr_lon: geo.lr_lon.clamp(w.ul_lon, w.lr_lon),
            lr_lat: geo.lr_lat.clamp(w.lr_lat, w.ul_lat),
        }
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::BERKELEY
    }
}

/// Which corner of a query box a point stands for.
///
/// The corner decides which edge of the containing tile gets reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Report the tile's north-west edge.
    UpperLeft,
    /// Report the tile's south-east edge.
    LowerRight,
}

/// One tile of the pyramid.
///
/// `x` grows eastward and `y` grows southward, both in `0..2^depth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    /// Zoom level
    pub depth: u8,
    /// Column (longitude band)
    pub x: u32,
    /// Row (latitude band)
    pub y: u32,
}

impl TileCoord {
    /// Create a tile coordinate.
    pub const fn new(depth: u8, x: u32, y: u32) -> Self {
        Self { depth, x, y }
    }

    /// Name of the image file holding this tile, e.g. `d3_x5_y2.png`.
    pub fn file_name(&self) -> String {
        format!("{}.png", self)
    }

    /// Geographic extent of this tile.
    pub fn geo_box(&self, world: &WorldBounds) -> GeoBox {
        let lon_span = world.tile_lon_span(self.depth);
        let lat_span = world.tile_lat_span(self.depth);
        let origin = world.bounds();
        world.clamp(&GeoBox {
            ul_lon: origin.ul_lon + f64::from(self.x) * lon_span,
            ul_lat: origin.ul_lat - f64::from(self.y) * lat_span,
            lr_lon: origin.ul_lon + f64::from(self.x + 1) * lon_span,
            lr_lat: origin.ul_lat - f64::from(self.y + 1) * lat_span,
        })
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}_x{}_y{}", self.depth, self.x, self.y)
    }
}

/// A tile located from one corner of a query box.
///
/// `lon`/`lat` is the tile edge on the side named by the [`Corner`] that
/// was used to locate it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerTile {
    /// Column of the containing tile
    pub x: u32,
    /// Row of the containing tile
    pub y: u32,
    /// Longitude of the reported tile edge
    pub lon: f64,
    /// Latitude of the reported tile edge
    pub lat: f64,
}
