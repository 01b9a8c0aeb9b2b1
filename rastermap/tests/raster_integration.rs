//! End-to-end tests: query → grid → tiles on disk → PNG → response JSON.

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use std::sync::Arc;

use image::{Rgba, RgbaImage};
use rastermap::compositor::{Compositor, RouteStyle};
use rastermap::config::ConfigFile;
use rastermap::coord::{TileCoord, WorldBounds, TILE_SIZE};
use rastermap::raster::{QueryBox, Rasterer};
use rastermap::response::RasterResponse;
use rastermap::route::{PointLookup, RouteFile};
use rastermap::tile::DirectoryTileSource;
use tempfile::TempDir;

/// Colour encoding a tile's position, so placement can be checked.
fn tile_color(x: u32, y: u32) -> Rgba<u8> {
    Rgba([(x * 30) as u8, (y * 30) as u8, 100, 255])
}

fn write_tiles(dir: &Path, depth: u8, xs: RangeInclusive<u32>, ys: RangeInclusive<u32>) {
    for x in xs {
        for y in ys.clone() {
            let tile = TileCoord::new(depth, x, y);
            RgbaImage::from_pixel(TILE_SIZE, TILE_SIZE, tile_color(x, y))
                .save(dir.join(tile.file_name()))
                .unwrap();
        }
    }
}

fn berkeley_query() -> QueryBox {
    QueryBox::new(-122.24, 37.87, -122.22, 37.85, 300.0, 300.0)
}

#[test]
fn test_full_pipeline_from_tile_directory() {
    let temp = TempDir::new().unwrap();
    write_tiles(temp.path(), 3, 5..=7, 2..=5);

    let result = Rasterer::new(WorldBounds::BERKELEY).raster(&berkeley_query());
    assert!(result.query_success);
    assert_eq!(result.depth, 3);

    let compositor = Compositor::new(Arc::new(DirectoryTileSource::new(temp.path())), TILE_SIZE);
    let (image, missing) = compositor.render(&result, None).unwrap();

    assert_eq!(missing, 0);
    assert_eq!(image.dimensions(), (3 * TILE_SIZE, 4 * TILE_SIZE));
    // Column c, row r holds tile (5 + c, 2 + r)
    for row in 0..4u32 {
        for col in 0..3u32 {
            let px = image.get_pixel(col * TILE_SIZE + 10, row * TILE_SIZE + 10);
            assert_eq!(*px, tile_color(5 + col, 2 + row), "row {row} col {col}");
        }
    }
}

#[test]
fn test_missing_tiles_degrade_to_blank() {
    let temp = TempDir::new().unwrap();
    // Leave out the bottom row
    write_tiles(temp.path(), 3, 5..=7, 2..=4);

    let result = Rasterer::new(WorldBounds::BERKELEY).raster(&berkeley_query());
    let compositor = Compositor::new(Arc::new(DirectoryTileSource::new(temp.path())), TILE_SIZE);
    let composite = compositor.composite(&result, None).unwrap();

    assert_eq!(composite.missing_tiles, 3);
    let decoded = image::load_from_memory(&composite.png).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(10, 3 * TILE_SIZE + 10)[3], 0);
    assert_eq!(decoded.get_pixel(10, 10)[3], 255);
}

#[test]
fn test_response_json_for_berkeley_query() {
    let temp = TempDir::new().unwrap();
    write_tiles(temp.path(), 3, 5..=7, 2..=5);

    let result = Rasterer::new(WorldBounds::BERKELEY).raster(&berkeley_query());
    let composite = Compositor::new(Arc::new(DirectoryTileSource::new(temp.path())), TILE_SIZE)
        .composite(&result, None)
        .unwrap();
    let response = RasterResponse::from(&result).with_composite(&composite);

    let json: serde_json::Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
    assert_eq!(json["depth"], 3);
    assert_eq!(json["query_success"], true);
    assert_eq!(json["render_grid"][0][0], "d3_x5_y2.png");
    assert_eq!(json["render_grid"][3][2], "d3_x7_y5.png");
    assert_eq!(json["raster_width"], 768);
    assert_eq!(json["raster_height"], 1024);
    assert!((json["raster_ul_lon"].as_f64().unwrap() - -122.244873046875).abs() < 1e-9);
    assert!((json["raster_lr_lat"].as_f64().unwrap() - 37.8469932363).abs() < 1e-9);
    assert!(!json["b64_encoded_image_data"].as_str().unwrap().is_empty());
}

#[test]
fn test_rejected_query_yields_failure_response() {
    let outside = QueryBox::new(0.0, 1.0, 1.0, 0.0, 256.0, 256.0);
    let result = Rasterer::new(WorldBounds::BERKELEY).raster(&outside);

    assert_eq!(RasterResponse::from(&result), RasterResponse::failure());

    let compositor = Compositor::new(
        Arc::new(DirectoryTileSource::new("/nonexistent")),
        TILE_SIZE,
    );
    assert!(compositor.composite(&result, None).is_err());
}

#[test]
fn test_route_file_drawn_over_tiles() {
    let temp = TempDir::new().unwrap();
    let world = WorldBounds::BERKELEY;
    let b = *world.bounds();
    // Depth 0: one tile covering the whole world
    write_tiles(temp.path(), 0, 0..=0, 0..=0);

    let route_path = temp.path().join("route.json");
    let mid_lat = (b.ul_lat + b.lr_lat) / 2.0;
    fs::write(
        &route_path,
        format!(
            r#"{{"points": {{"1": [{}, {mid_lat}], "2": [{}, {mid_lat}]}}, "route": [1, 2]}}"#,
            b.ul_lon, b.lr_lon
        ),
    )
    .unwrap();
    let route = RouteFile::load(&route_path).unwrap();

    let query = QueryBox::new(b.ul_lon, b.ul_lat, b.lr_lon, b.lr_lat, 256.0, 256.0);
    let result = Rasterer::new(world).raster(&query);
    let style = RouteStyle {
        color: [255, 0, 0, 255],
        width: 6.0,
    };
    let compositor = Compositor::new(Arc::new(DirectoryTileSource::new(temp.path())), TILE_SIZE)
        .with_route_style(style);

    let lookup: &dyn PointLookup = &route.points;
    let (image, _) = compositor.render(&result, Some((&route.route, lookup))).unwrap();

    assert_eq!(*image.get_pixel(128, 128), Rgba([255, 0, 0, 255]));
    assert_eq!(*image.get_pixel(128, 20), tile_color(0, 0));
}

#[test]
fn test_config_file_drives_pipeline() {
    let temp = TempDir::new().unwrap();
    let tiles = temp.path().join("tiles");
    fs::create_dir_all(&tiles).unwrap();
    write_tiles(&tiles, 0, 0..=0, 0..=0);

    let config_path = temp.path().join("config.ini");
    fs::write(
        &config_path,
        format!(
            "[world]\nul_lon = 0\nul_lat = 10\nlr_lon = 10\nlr_lat = 0\n\
             [tiles]\ndirectory = {}\n",
            tiles.display()
        ),
    )
    .unwrap();

    let config = ConfigFile::load_from(&config_path).unwrap();
    let query = QueryBox::new(0.0, 10.0, 10.0, 0.0, 256.0, 256.0);
    let result = Rasterer::new(config.world).raster(&query);
    assert_eq!(result.depth, 0);

    let composite = Compositor::new(
        Arc::new(DirectoryTileSource::new(&config.tile_directory)),
        config.world.tile_size(),
    )
    .composite(&result, None)
    .unwrap();
    assert_eq!((composite.width, composite.height), (256, 256));
    assert_eq!(composite.missing_tiles, 0);
}
