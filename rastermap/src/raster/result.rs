//! Raster results: the tile grid answering one viewport query.

use crate::coord::{GeoBox, TileCoord};

/// A rectangular block of tiles at one depth, stored row-major.
///
/// Rows run north to south, columns west to east.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    depth: u8,
    rows: Vec<Vec<TileCoord>>,
}

impl TileGrid {
    /// Grid of every tile with `x` in `x0..=x1` and `y` in `y0..=y1`.
    ///
    /// Reversed ranges are swapped so the grid always holds at least one tile.
    pub fn from_range(depth: u8, (x0, x1): (u32, u32), (y0, y1): (u32, u32)) -> Self {
        let (x0, x1) = (x0.min(x1), x0.max(x1));
        let (y0, y1) = (y0.min(y1), y0.max(y1));

        let rows = (y0..=y1)
            .map(|y| (x0..=x1).map(|x| TileCoord::new(depth, x, y)).collect())
            .collect();

        Self { depth, rows }
    }

    /// Zoom level of every tile in the grid.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Number of rows (latitude bands).
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (longitude bands).
    pub fn cols(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Total number of tiles.
    pub fn len(&self) -> usize {
        self.rows() * self.cols()
    }

    /// Returns true if the grid holds no tiles.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tile at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<&TileCoord> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Iterates `(row, col, tile)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &TileCoord)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, tiles)| {
            tiles
                .iter()
                .enumerate()
                .map(move |(col, tile)| (row, col, tile))
        })
    }

    /// Iterates the rows, north to south.
    pub fn tile_rows(&self) -> impl Iterator<Item = &[TileCoord]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Tile file names laid out like the grid.
    pub fn file_names(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(TileCoord::file_name).collect())
            .collect()
    }
}

/// Answer to one viewport query.
///
/// Built fresh per request and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterResult {
    /// Tiles to stitch, `None` when the query failed
    pub grid: Option<TileGrid>,
    /// Union of the extents of every tile in the grid
    pub bounds: GeoBox,
    /// Zoom level of the grid
    pub depth: u8,
    /// Whether the query was answered
    pub query_success: bool,
}

impl RasterResult {
    /// Successful result for a grid and its aggregate extent.
    pub fn success(grid: TileGrid, bounds: GeoBox) -> Self {
        Self {
            depth: grid.depth(),
            grid: Some(grid),
            bounds,
            query_success: true,
        }
    }

    /// The canonical failure: no grid, zeroed box, depth 0.
    pub fn failure() -> Self {
        Self {
            grid: None,
            bounds: GeoBox::default(),
            depth: 0,
            query_success: false,
        }
    }

    /// The grid, if this result can be composited.
    pub fn renderable_grid(&self) -> Option<&TileGrid> {
        if !self.query_success {
            return None;
        }
        self.grid.as_ref().filter(|grid| !grid.is_empty())
    }
}
