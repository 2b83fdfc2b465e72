//! Error types for the flight path engine.

use thiserror::Error;

/// Malformed or structurally incomplete KMZ/KML input.
///
/// This is the only error a path operation can raise; index-range problems
/// on edits are silently ignored instead.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid KMZ archive: {0}")]
    InvalidArchive(#[from] zip::result::ZipError),

    #[error("I/O error while reading archive member: {0}")]
    Io(#[from] std::io::Error),

    #[error("no KML member found")]
    NoKmlMember,

    #[error("KML member is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("no coordinates found")]
    NoCoordinates,

    #[error("invalid coordinate token '{token}'")]
    InvalidCoordinate { token: String },

    #[error("flat coordinate list has odd length {0}")]
    OddCoordinateCount(usize),

    #[error("need at least two points, got {0}")]
    TooFewPoints(usize),
}

/// Failure reported by a [`crate::optimizer::WeatherProvider`].
#[derive(Debug, Clone, Error)]
pub enum WeatherError {
    #[error("weather API key not configured")]
    NotConfigured,

    #[error("weather request failed: {0}")]
    Request(String),

    #[error("malformed weather response: {0}")]
    Decode(String),
}
