//! Route polyline drawing.

use image::{Pixel, Rgba, RgbaImage};
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::coord::GeoBox;

/// Default route color (RGBA): translucent light blue.
pub const DEFAULT_ROUTE_COLOR: [u8; 4] = [108, 181, 230, 200];

/// Default route stroke width in pixels.
pub const DEFAULT_ROUTE_WIDTH: f32 = 5.0;

/// Stroke used for route overlays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteStyle {
    /// Stroke color as RGBA
    pub color: [u8; 4],
    /// Stroke width in pixels
    pub width: f32,
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_ROUTE_COLOR,
            width: DEFAULT_ROUTE_WIDTH,
        }
    }
}

/// Projects a geographic position onto a `width × height` image spanning `bounds`.
///
/// Returns pixel `(x, y)` with the origin at the upper-left corner.
pub fn project(bounds: &GeoBox, width: u32, height: u32, lon: f64, lat: f64) -> (f32, f32) {
    let width_dpp = bounds.lon_span() / f64::from(width);
    let height_dpp = bounds.lat_span() / f64::from(height);
    (
        ((lon - bounds.ul_lon) / width_dpp) as f32,
        ((bounds.ul_lat - lat) / height_dpp) as f32,
    )
}

/// Strokes the polyline through `positions` onto `canvas`.
///
/// Fewer than two positions draw nothing.
pub(crate) fn draw_route(
    canvas: &mut RgbaImage,
    bounds: &GeoBox,
    positions: &[(f64, f64)],
    style: &RouteStyle,
) {
    if positions.len() < 2 {
        return;
    }
    let (width, height) = canvas.dimensions();

    let mut builder = PathBuilder::new();
    for (i, &(lon, lat)) in positions.iter().enumerate() {
        let (x, y) = project(bounds, width, height, lon, lat);
        if i == 0 {
            builder.move_to(x, y);
        } else {
            builder.line_to(x, y);
        }
    }
    // None for degenerate or non-finite paths
    let Some(path) = builder.finish() else {
        return;
    };

    let mut paint = Paint::default();
    let [r, g, b, a] = style.color;
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: style.width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    };

    // Stroke onto its own layer so pixels off the route are never rewritten
    let Some(mut layer) = Pixmap::new(width, height) else {
        return;
    };
    layer.stroke_path(&path, &paint, &stroke, Transform::identity(), None);

    for (i, px) in layer.pixels().iter().enumerate() {
        if px.alpha() == 0 {
            continue;
        }
        let c = px.demultiply();
        let (x, y) = (i as u32 % width, i as u32 / width);
        canvas
            .get_pixel_mut(x, y)
            .blend(&Rgba([c.red(), c.green(), c.blue(), c.alpha()]));
    }
}
