//! Loading `ConfigFile` from INI.

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use crate::compositor::RouteStyle;
use crate::coord::{GeoBox, WorldBounds};

/// Errors reading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The file exists but could not be read or parsed.
    #[error("Failed to read config file {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// A key holds a value that cannot be used.
    #[error("Invalid value '{value}' for [{section}] {key}: {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

/// Settings loaded from the configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Extent and tile size of the tile pyramid
    pub world: WorldBounds,
    /// Directory holding `d{depth}_x{x}_y{y}.png` tiles
    pub tile_directory: PathBuf,
    /// Stroke used for route overlays
    pub route_style: RouteStyle,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            world: WorldBounds::BERKELEY,
            tile_directory: config_directory().join("tiles"),
            route_style: RouteStyle::default(),
        }
    }
}

impl ConfigFile {
    /// Load from the default location, or defaults if the file is absent.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`, or defaults if the file is absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let ini = Ini::load_from_file(path).map_err(|e| ConfigFileError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        parse_ini(&ini)
    }

    /// Parse INI text.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigFileError> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigFileError::Read {
            path: PathBuf::from("<string>"),
            message: e.to_string(),
        })?;
        parse_ini(&ini)
    }

    /// Set the tile directory.
    pub fn with_tile_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.tile_directory = path.into();
        self
    }

    /// Set the route stroke.
    pub fn with_route_style(mut self, style: RouteStyle) -> Self {
        self.route_style = style;
        self
    }
}

/// Directory holding the configuration file.
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rastermap")
}

/// Default configuration file path.
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [world] section
    if let Some(section) = ini.section(Some("world")) {
        let defaults = *config.world.bounds();
        let bounds = GeoBox::new(
            parse_or(section.get("ul_lon"), "world", "ul_lon", defaults.ul_lon)?,
            parse_or(section.get("ul_lat"), "world", "ul_lat", defaults.ul_lat)?,
            parse_or(section.get("lr_lon"), "world", "lr_lon", defaults.lr_lon)?,
            parse_or(section.get("lr_lat"), "world", "lr_lat", defaults.lr_lat)?,
        );
        let tile_size = parse_or(
            section.get("tile_size"),
            "world",
            "tile_size",
            config.world.tile_size(),
        )?;

        config.world = WorldBounds::new(bounds, tile_size).map_err(|e| {
            ConfigFileError::InvalidValue {
                section: "world".to_string(),
                key: "bounds".to_string(),
                value: bounds.to_string(),
                reason: e.to_string(),
            }
        })?;
    }

    // [tiles] section
    if let Some(section) = ini.section(Some("tiles")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.tile_directory = expand_tilde(v);
            }
        }
    }

    // [route] section
    if let Some(section) = ini.section(Some("route")) {
        if let Some(v) = section.get("color") {
            config.route_style.color = parse_color(v).ok_or_else(|| {
                invalid(
                    "route",
                    "color",
                    v,
                    "expected four comma-separated values 0-255 (r,g,b,a)",
                )
            })?;
        }
        let width: f32 = parse_or(
            section.get("width"),
            "route",
            "width",
            config.route_style.width,
        )?;
        if !(width.is_finite() && width > 0.0) {
            return Err(invalid("route", "width", &width.to_string(), "must be positive"));
        }
        config.route_style.width = width;
    }

    Ok(config)
}

fn parse_or<T: std::str::FromStr>(
    value: Option<&str>,
    section: &str,
    key: &str,
    default: T,
) -> Result<T, ConfigFileError> {
    match value {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| invalid(section, key, v, "not a number")),
    }
}

fn parse_color(value: &str) -> Option<[u8; 4]> {
    let parts: Vec<u8> = value
        .split(',')
        .map(|p| p.trim().parse().ok())
        .collect::<Option<_>>()?;
    parts.try_into().ok()
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}
