//! Settings for talking to the directions and elevation APIs.

use std::fmt;
use std::time::Duration;

use crate::error::RouteError;

pub const DEFAULT_DIRECTIONS_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/directions/json";
pub const DEFAULT_ELEVATION_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/elevation/json";

/// Locations sent per elevation request. The API accepts 512, but long
/// location lists also run into its request-size limit.
pub const DEFAULT_ELEVATION_SAMPLE_LIMIT: usize = 400;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";
pub const DIRECTIONS_ENDPOINT_VAR: &str = "GMAPS2GPX_DIRECTIONS_ENDPOINT";
pub const ELEVATION_ENDPOINT_VAR: &str = "GMAPS2GPX_ELEVATION_ENDPOINT";

#[derive(Clone)]
pub struct FetcherConfig {
    pub api_key: String,
    pub directions_endpoint: String,
    pub elevation_endpoint: String,
    pub elevation_sample_limit: usize,
    pub request_timeout: Duration,
}

impl FetcherConfig {
    /// Config with the public Google endpoints and default limits.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            directions_endpoint: DEFAULT_DIRECTIONS_ENDPOINT.to_string(),
            elevation_endpoint: DEFAULT_ELEVATION_ENDPOINT.to_string(),
            elevation_sample_limit: DEFAULT_ELEVATION_SAMPLE_LIMIT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Config from `GOOGLE_MAPS_API_KEY` and the optional endpoint overrides.
    pub fn from_env() -> Result<Self, RouteError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RouteError> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| RouteError::InvalidConfig(format!("{API_KEY_VAR} is not set")))?;

        let mut config = Self::new(api_key.trim());
        if let Some(endpoint) = lookup(DIRECTIONS_ENDPOINT_VAR) {
            config.directions_endpoint = endpoint;
        }
        if let Some(endpoint) = lookup(ELEVATION_ENDPOINT_VAR) {
            config.elevation_endpoint = endpoint;
        }
        Ok(config)
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for FetcherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetcherConfig")
            .field("api_key", &"<redacted>")
            .field("directions_endpoint", &self.directions_endpoint)
            .field("elevation_endpoint", &self.elevation_endpoint)
            .field("elevation_sample_limit", &self.elevation_sample_limit)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
