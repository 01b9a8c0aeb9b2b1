//! The response object handed back to callers.
//!
//! Field names match the keys front ends expect; the image travels as
//! base64 text so the whole response can be sent as JSON.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

use crate::compositor::Composite;
use crate::raster::RasterResult;

/// Serializable answer to one raster request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RasterResponse {
    /// Tile file names, row-major; `null` on failure
    pub render_grid: Option<Vec<Vec<String>>>,
    pub raster_ul_lon: f64,
    pub raster_ul_lat: f64,
    pub raster_lr_lon: f64,
    pub raster_lr_lat: f64,
    pub depth: u8,
    pub query_success: bool,
    /// Base64 PNG, present once an image was composited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b64_encoded_image_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raster_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raster_height: Option<u32>,
}

impl RasterResponse {
    /// The canonical failure response.
    pub fn failure() -> Self {
        Self::from(&RasterResult::failure())
    }

    /// Attach a composited image.
    pub fn with_composite(mut self, composite: &Composite) -> Self {
        self.b64_encoded_image_data = Some(STANDARD.encode(&composite.png));
        self.raster_width = Some(composite.width);
        self.raster_height = Some(composite.height);
        self
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&RasterResult> for RasterResponse {
    fn from(result: &RasterResult) -> Self {
        Self {
            render_grid: result.grid.as_ref().map(|grid| grid.file_names()),
            raster_ul_lon: result.bounds.ul_lon,
            raster_ul_lat: result.bounds.ul_lat,
            raster_lr_lon: result.bounds.lr_lon,
            raster_lr_lat: result.bounds.lr_lat,
            depth: result.depth,
            query_success: result.query_success,
            b64_encoded_image_data: None,
            raster_width: None,
            raster_height: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::GeoBox;
    use crate::raster::TileGrid;
    use serde_json::Value;

    #[test]
    fn test_failure_json() {
        let text = RasterResponse::failure().to_json().unwrap();
        let json: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(json["render_grid"], Value::Null);
        assert_eq!(json["raster_ul_lon"], 0.0);
        assert_eq!(json["raster_lr_lat"], 0.0);
        assert_eq!(json["depth"], 0);
        assert_eq!(json["query_success"], false);
        assert!(json.get("b64_encoded_image_data").is_none());
        assert!(json.get("raster_width").is_none());
    }

    #[test]
    fn test_success_json() {
        let result = RasterResult::success(
            TileGrid::from_range(1, (0, 1), (1, 1)),
            GeoBox::new(-1.0, 2.0, 3.0, -4.0),
        );
        let json: Value =
            serde_json::from_str(&RasterResponse::from(&result).to_json().unwrap()).unwrap();

        assert_eq!(
            json["render_grid"],
            serde_json::json!([["d1_x0_y1.png", "d1_x1_y1.png"]])
        );
        assert_eq!(json["raster_ul_lon"], -1.0);
        assert_eq!(json["raster_ul_lat"], 2.0);
        assert_eq!(json["raster_lr_lon"], 3.0);
        assert_eq!(json["raster_lr_lat"], -4.0);
        assert_eq!(json["depth"], 1);
        assert_eq!(json["query_success"], true);
    }

    #[test]
    fn test_with_composite() {
        let composite = Composite {
            png: vec![1, 2, 3],
            width: 512,
            height: 256,
            missing_tiles: 0,
        };
        let response = RasterResponse::failure().with_composite(&composite);

        assert_eq!(response.b64_encoded_image_data.as_deref(), Some("AQID"));
        assert_eq!(response.raster_width, Some(512));
        assert_eq!(response.raster_height, Some(256));
    }
}
