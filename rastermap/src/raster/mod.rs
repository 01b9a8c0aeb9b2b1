//! Viewport rastering.
//!
//! Turns a [`QueryBox`] into the [`RasterResult`] naming which tiles to
//! stitch together and what geographic area the stitched image covers.
//!
//! ```text
//! QueryBox ──► validate ──► select_depth ──► build_grid ──► RasterResult
//!                 │                                            ▲
//!                 └──────────── rejected ── failure() ─────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use rastermap::coord::WorldBounds;
//! use rastermap::raster::{QueryBox, Rasterer};
//!
//! let rasterer = Rasterer::new(WorldBounds::BERKELEY);
//! let query = QueryBox::new(-122.24, 37.87, -122.22, 37.85, 300.0, 300.0);
//!
//! let result = rasterer.raster(&query);
//! assert!(result.query_success);
//! assert_eq!(result.depth, 3);
//! ```

mod grid;
mod query;
mod result;

pub use grid::build_grid;
pub use query::{QueryBox, QueryParamError, QueryRejection, REQUIRED_PARAMS};
pub use result::{RasterResult, TileGrid};

use tracing::debug;

use crate::coord::WorldBounds;
use crate::depth::select_depth;

/// Answers viewport queries against one tile pyramid.
///
/// Holds only read-only world constants, so one instance can serve any
/// number of concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rasterer {
    world: WorldBounds,
}

impl Rasterer {
    /// Create a rasterer for the given world.
    pub fn new(world: WorldBounds) -> Self {
        Self { world }
    }

    /// The world this rasterer covers.
    pub fn world(&self) -> &WorldBounds {
        &self.world
    }

    /// Compute the tile grid for `query`.
    ///
    /// Invalid queries are not errors: they produce [`RasterResult::failure`].
    pub fn raster(&self, query: &QueryBox) -> RasterResult {
        self.try_raster(query).unwrap_or_else(|reason| {
            debug!(?query, %reason, "Rejecting raster query");
            RasterResult::failure()
        })
    }

    /// Like [`raster`](Self::raster), but reports why a query was rejected.
    pub fn try_raster(&self, query: &QueryBox) -> Result<RasterResult, QueryRejection> {
        query.validate(&self.world)?;

        let depth = select_depth(&self.world, query.lr_lon - query.ul_lon, query.width_px);
        Ok(build_grid(&self.world, query, depth))
    }
}
