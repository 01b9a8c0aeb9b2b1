//! Route overlays.
//!
//! A route is an ordered list of point ids. Positions come from a
//! [`PointLookup`] supplied with each request, so route data is never
//! shared mutable state.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Resolves point ids to `(lon, lat)` positions.
pub trait PointLookup: Send + Sync {
    /// Position of `id`, or `None` if the id is unknown.
    fn position(&self, id: u64) -> Option<(f64, f64)>;
}

impl<F> PointLookup for F
where
    F: Fn(u64) -> Option<(f64, f64)> + Send + Sync,
{
    fn position(&self, id: u64) -> Option<(f64, f64)> {
        self(id)
    }
}

/// An ordered sequence of point ids to draw as a polyline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RouteOverlay {
    ids: Vec<u64>,
}

impl RouteOverlay {
    /// Create a route from point ids in travel order.
    pub fn new(ids: Vec<u64>) -> Self {
        Self { ids }
    }

    /// Point ids in travel order.
    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the route has no points.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Positions of every point, in order.
    ///
    /// Ids unknown to `points` are skipped with a warning.
    pub fn resolve(&self, points: &dyn PointLookup) -> Vec<(f64, f64)> {
        self.ids
            .iter()
            .filter_map(|&id| {
                let position = points.position(id);
                if position.is_none() {
                    warn!(point_id = id, "Route point has no known position, skipping");
                }
                position
            })
            .collect()
    }
}

impl From<Vec<u64>> for RouteOverlay {
    fn from(ids: Vec<u64>) -> Self {
        Self::new(ids)
    }
}

/// Point positions keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct PointTable {
    points: HashMap<u64, [f64; 2]>,
}

impl PointTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the position of a point.
    pub fn insert(&mut self, id: u64, lon: f64, lat: f64) {
        self.points.insert(id, [lon, lat]);
    }

    /// Number of known points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if no points are known.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl PointLookup for PointTable {
    fn position(&self, id: u64) -> Option<(f64, f64)> {
        self.points.get(&id).map(|&[lon, lat]| (lon, lat))
    }
}

/// Errors loading a route file.
#[derive(Debug, Error)]
pub enum RouteFileError {
    /// The file could not be read.
    #[error("Failed to read route file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid route JSON.
    #[error("Invalid route file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A route and the positions of its points, as stored on disk.
///
/// ```json
/// { "points": { "17": [-122.25, 37.86], "18": [-122.24, 37.85] },
///   "route": [17, 18] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RouteFile {
    /// Known point positions
    #[serde(default)]
    pub points: PointTable,
    /// Point ids in travel order
    #[serde(default)]
    pub route: RouteOverlay,
}

impl RouteFile {
    /// Parse a route file from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a route file from disk.
    pub fn load(path: &Path) -> Result<Self, RouteFileError> {
        let json = fs::read_to_string(path).map_err(|e| RouteFileError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&json).map_err(|e| RouteFileError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
