//! Turn Google Maps directions links into GPX tracks with elevation.

pub mod config;
pub mod convert;
pub mod error;
pub mod fetch;
pub mod gpx;
pub mod nav;
pub mod polyline;
pub mod route_url;

pub use config::FetcherConfig;
pub use error::{GpxError, RouteError};
pub use fetch::{ConvertedRoute, ElevationOutcome, RouteFetcher};
pub use gpx::{GeoPoint, Track, TrackPoint};
pub use route_url::{ParsedRoute, TravelMode};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
