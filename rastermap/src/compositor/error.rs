//! Error types for compositing.

use thiserror::Error;

/// Errors that abort a composite.
///
/// Missing tiles are not errors: their area is left blank.
#[derive(Debug, Error)]
pub enum CompositeError {
    /// The result has no grid or reports a failed query.
    #[error("Raster result is incomplete or unsuccessful")]
    IncompleteResult,

    /// The output bitmap would not fit in `u32` dimensions.
    #[error("Canvas of {cols}×{rows} tiles at {tile_size}px is too large")]
    CanvasTooLarge {
        cols: usize,
        rows: usize,
        tile_size: u32,
    },

    /// PNG encoding failed.
    #[error("Encoding failed: {0}")]
    Encoding(#[from] image::ImageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_display() {
        assert_eq!(
            CompositeError::IncompleteResult.to_string(),
            "Raster result is incomplete or unsuccessful"
        );
    }

    #[test]
    fn test_canvas_too_large_display() {
        let err = CompositeError::CanvasTooLarge {
            cols: 100,
            rows: 2,
            tile_size: u32::MAX,
        };
        assert!(err.to_string().contains("100×2 tiles"));
    }
}
