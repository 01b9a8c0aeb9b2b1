//! Configuration file support.
//!
//! Settings live in an INI file, by default `~/.rastermap/config.ini`:
//!
//! ```ini
//! [world]
//! ul_lon = -122.2998046875
//! ul_lat = 37.8924001095
//! lr_lon = -122.2119140625
//! lr_lat = 37.8318576119
//! tile_size = 256
//!
//! [tiles]
//! directory = ~/rastermap/tiles
//!
//! [route]
//! color = 108,181,230,200
//! width = 5.0
//! ```
//!
//! Missing files and missing keys fall back to defaults.

mod file;

pub use file::{config_directory, config_file_path, ConfigFile, ConfigFileError};
