//! RasterMap - tile rastering and compositing for map front ends
//!
//! Given a geographic viewport and an output size, this library picks the
//! tile depth that matches the viewport's resolution, works out which
//! pre-rendered tiles cover it, and stitches them into a single PNG with an
//! optional route drawn on top.
//!
//! # Example
//!
//! ```
//! use rastermap::coord::WorldBounds;
//! use rastermap::raster::{QueryBox, Rasterer};
//! use rastermap::response::RasterResponse;
//!
//! let query = QueryBox::new(-122.24, 37.87, -122.22, 37.85, 300.0, 300.0);
//! let result = Rasterer::new(WorldBounds::BERKELEY).raster(&query);
//!
//! let response = RasterResponse::from(&result);
//! assert_eq!(response.depth, 3);
//! assert_eq!(response.render_grid.unwrap()[0][0], "d3_x5_y2.png");
//! ```

pub mod compositor;
pub mod config;
pub mod coord;
pub mod depth;
pub mod logging;
pub mod raster;
pub mod response;
pub mod route;
pub mod tile;
