//! CLI error handling with user-friendly messages.

use std::fmt;
use std::path::PathBuf;
use std::process;

use rastermap::compositor::CompositeError;
use rastermap::config::ConfigFileError;
use rastermap::raster::QueryRejection;
use rastermap::route::RouteFileError;

/// CLI-specific errors.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be loaded
    Config(ConfigFileError),
    /// The query cannot be rastered
    InvalidQuery(QueryRejection),
    /// Route file could not be loaded
    Route(RouteFileError),
    /// Compositing failed
    Composite(CompositeError),
    /// Response could not be serialized
    Serialize(serde_json::Error),
    /// Failed to write output file
    FileWrite { path: PathBuf, error: std::io::Error },
}

impl CliError {
    /// Print the error and exit with status 1.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::InvalidQuery(QueryRejection::OutsideWorld) => {
                eprintln!();
                eprintln!("The map covers the area set in the [world] section of config.ini.");
                eprintln!("Check that --ullon/--lrlon and --ullat/--lrlat fall inside it.");
            }
            CliError::InvalidQuery(QueryRejection::Inverted) => {
                eprintln!();
                eprintln!("--ullon must be west of --lrlon and --ullat north of --lrlat.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::InvalidQuery(reason) => write!(f, "Invalid query: {}", reason),
            CliError::Route(e) => write!(f, "{}", e),
            CliError::Composite(e) => write!(f, "Failed to composite image: {}", e),
            CliError::Serialize(e) => write!(f, "Failed to serialize response: {}", e),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path.display(), error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::InvalidQuery(e) => Some(e),
            CliError::Route(e) => Some(e),
            CliError::Composite(e) => Some(e),
            CliError::Serialize(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            CliError::LoggingInit(_) => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<CompositeError> for CliError {
    fn from(e: CompositeError) -> Self {
        CliError::Composite(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialize(e)
    }
}
