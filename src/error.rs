//! Error types.
//!
//! `RouteError` covers the link-to-route pipeline, `GpxError` the file
//! codec. Each variant's message starts with the stage that failed so the
//! text can be shown to a user as-is.

use thiserror::Error;

/// Failures while turning a maps link into a route.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Error parsing URL: {0}")]
    MalformedUrl(String),

    #[error("Error handling Google redirect: {0}")]
    RedirectResolution(String),

    #[error("Directions API error: {0}")]
    DirectionsApi(String),

    #[error("No route found, Google Maps status: {status}")]
    NoRouteFound { status: String },

    /// Never aborts a conversion; carried inside a degraded elevation outcome.
    #[error("Error getting elevations: {0}")]
    ElevationApi(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Failures while reading or writing GPX files.
#[derive(Debug, Error)]
pub enum GpxError {
    #[error(
        "No track points found in gpx file. Check the file contents. \
         If this is a bug in the app, please report it!"
    )]
    NoTrackPoints,

    #[error("Track point {index} has a missing or invalid '{attribute}' coordinate")]
    MissingCoordinate {
        index: usize,
        attribute: &'static str,
    },

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("GPX output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Error saving gpx file: {0}")]
    Io(#[from] std::io::Error),
}
