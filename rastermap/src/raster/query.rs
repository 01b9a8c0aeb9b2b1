//! Viewport query parsing and validation.

use std::collections::HashMap;

use thiserror::Error;

use crate::coord::{GeoBox, WorldBounds};

/// Parameter keys every raster request must carry.
pub const REQUIRED_PARAMS: [&str; 6] = ["ullat", "ullon", "lrlat", "lrlon", "w", "h"];

/// Errors turning a parameter map into a [`QueryBox`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryParamError {
    /// A required key is absent.
    #[error("Missing required parameter: {0}")]
    Missing(&'static str),
}

/// Why a query was answered with a failure result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryRejection {
    /// A coordinate or dimension is NaN or infinite.
    #[error("query contains non-finite values")]
    NonFinite,

    /// Viewport width or height is zero or negative.
    #[error("viewport dimensions must be positive")]
    EmptyViewport,

    /// Lower-right lies west of or north of upper-left.
    #[error("query box is inverted")]
    Inverted,

    /// The box shares nothing with the world.
    #[error("query box lies outside the world")]
    OutsideWorld,
}

/// A raw viewport request: a geographic box and its size on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryBox {
    /// Upper-left longitude
    pub ul_lon: f64,
    /// Upper-left latitude
    pub ul_lat: f64,
    /// Lower-right longitude
    pub lr_lon: f64,
    /// Lower-right latitude
    pub lr_lat: f64,
    /// Viewport width in pixels
    pub width_px: f64,
    /// Viewport height in pixels
    pub height_px: f64,
}

impl QueryBox {
    /// Create a query from corners and viewport size.
    pub fn new(
        ul_lon: f64,
        ul_lat: f64,
        lr_lon: f64,
        lr_lat: f64,
        width_px: f64,
        height_px: f64,
    ) -> Self {
        Self {
            ul_lon,
            ul_lat,
            lr_lon,
            lr_lat,
            width_px,
            height_px,
        }
    }

    /// Build a query from a request parameter map.
    ///
    /// All of [`REQUIRED_PARAMS`] must be present; extra keys are ignored.
    pub fn from_params(params: &HashMap<String, f64>) -> Result<Self, QueryParamError> {
        let get = |key: &'static str| {
            params
                .get(key)
                .copied()
                .ok_or(QueryParamError::Missing(key))
        };

        Ok(Self {
            ul_lat: get("ullat")?,
            ul_lon: get("ullon")?,
            lr_lat: get("lrlat")?,
            lr_lon: get("lrlon")?,
            width_px: get("w")?,
            height_px: get("h")?,
        })
    }

    /// The geographic part of the query.
    pub fn geo_box(&self) -> GeoBox {
        GeoBox::new(self.ul_lon, self.ul_lat, self.lr_lon, self.lr_lat)
    }

    /// Check whether this query can be rastered against `world`.
    ///
    /// Boxes that only partly overlap the world are accepted; they get
    /// clamped while building the grid.
    pub fn validate(&self, world: &WorldBounds) -> Result<(), QueryRejection> {
        let values = [
            self.ul_lon,
            self.ul_lat,
            self.lr_lon,
            self.lr_lat,
            self.width_px,
            self.height_px,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(QueryRejection::NonFinite);
        }
        if self.width_px <= 0.0 || self.height_px <= 0.0 {
            return Err(QueryRejection::EmptyViewport);
        }
        if self.lr_lon < self.ul_lon || self.lr_lat > self.ul_lat {
            return Err(QueryRejection::Inverted);
        }

        if world.bounds().intersection(&self.geo_box()).is_none() {
            return Err(QueryRejection::OutsideWorld);
        }

        Ok(())
    }
}
