//! Link-to-track conversion against the directions and elevation APIs.
//!
//! The pipeline is strictly sequential: resolve the short link, parse it,
//! request directions, decode the step polylines, then request elevations
//! for the decoded path. Any failure aborts the conversion except the
//! elevation request, which degrades to zero altitude instead.

use log::{debug, warn};
use reqwest::header::LOCATION;
use reqwest::{redirect, Client, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::config::FetcherConfig;
use crate::convert::ResampledSet;
use crate::error::RouteError;
use crate::gpx::{GeoPoint, Track, TrackPoint};
use crate::polyline;
use crate::route_url::{consent_continuation, find_url_in_text, parse_route_url, ParsedRoute};

type Result<T> = std::result::Result<T, RouteError>;

/// Geometry and metadata of the first route the directions API returned.
#[derive(Debug, Clone)]
pub struct Directions {
    pub name: String,
    pub points: Vec<GeoPoint>,
    /// Sum of the declared step distances.
    pub distance_km: f64,
}

/// Elevations for a path, either measured or substituted after a failure.
#[derive(Debug)]
pub enum ElevationOutcome {
    Measured(Vec<f64>),
    Degraded {
        elevations: Vec<f64>,
        cause: RouteError,
    },
}

impl ElevationOutcome {
    /// Zero elevation for every point, recording why.
    pub fn degraded(point_count: usize, cause: RouteError) -> Self {
        Self::Degraded {
            elevations: vec![0.0; point_count],
            cause,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub fn elevations(&self) -> &[f64] {
        match self {
            Self::Measured(elevations) | Self::Degraded { elevations, .. } => elevations,
        }
    }

    pub fn into_elevations(self) -> Vec<f64> {
        match self {
            Self::Measured(elevations) | Self::Degraded { elevations, .. } => elevations,
        }
    }
}

/// Result of a full conversion.
#[derive(Debug, Clone)]
pub struct ConvertedRoute {
    pub track: Track,
    pub distance_km: f64,
    /// True when elevations could not be fetched and are all zero.
    pub elevation_degraded: bool,
}

/// Converts maps links into tracks. Holds no per-conversion state, so one
/// fetcher can serve concurrent conversions.
#[derive(Debug, Clone)]
pub struct RouteFetcher {
    client: Client,
    config: FetcherConfig,
}

impl RouteFetcher {
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| RouteError::InvalidConfig(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Convert the first link found in `text`.
    pub async fn convert_text(&self, text: &str) -> Result<ConvertedRoute> {
        let url = find_url_in_text(text)?;
        self.convert(&url).await
    }

    /// Convert a directions link into a track with elevations.
    pub async fn convert(&self, input: &Url) -> Result<ConvertedRoute> {
        let resolved = self.resolve_redirect(input).await?;
        debug!("converted {input} to {resolved}");

        let route = parse_route_url(&resolved)?;
        let directions = self.fetch_directions(&route).await?;

        let outcome = self.elevations_or_default(&directions.points).await;
        let elevation_degraded = outcome.is_degraded();
        if let ElevationOutcome::Degraded { cause, .. } = &outcome {
            warn!("continuing without elevation data: {cause}");
        }

        let points = directions
            .points
            .iter()
            .zip(outcome.into_elevations())
            .map(|(p, ele)| TrackPoint::new(p.lat, p.lon).with_ele(ele))
            .collect();

        Ok(ConvertedRoute {
            track: Track {
                name: directions.name,
                points,
            },
            distance_km: directions.distance_km,
            elevation_degraded,
        })
    }

    /// Follow at most one redirect and unwrap a consent interstitial.
    pub async fn resolve_redirect(&self, url: &Url) -> Result<Url> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| RouteError::RedirectResolution(e.to_string()))?;

        let status = response.status();
        let target = if status.is_redirection() {
            let location = response
                .headers()
                .get(LOCATION)
                .ok_or_else(|| {
                    RouteError::RedirectResolution(format!("{status} without a redirect target"))
                })?
                .to_str()
                .map_err(|e| RouteError::RedirectResolution(format!("unreadable redirect target: {e}")))?;
            url.join(location)
                .map_err(|e| RouteError::RedirectResolution(format!("invalid redirect target '{location}': {e}")))?
        } else if status.is_success() {
            response.url().clone()
        } else {
            return Err(RouteError::RedirectResolution(format!("{url} answered {status}")));
        };

        Ok(consent_continuation(&target)?.unwrap_or(target))
    }

    /// Request the route and concatenate its step polylines.
    pub async fn fetch_directions(&self, route: &ParsedRoute) -> Result<Directions> {
        let mode = route.mode().as_api_str();
        let mut query = vec![
            ("origin", route.origin().to_string()),
            ("destination", route.destination().to_string()),
        ];
        if !route.via().is_empty() {
            let via = route
                .via()
                .iter()
                .map(|stop| format!("via:{stop}"))
                .collect::<Vec<_>>()
                .join("|");
            query.push(("waypoints", via));
        }
        query.push(("mode", mode.to_string()));
        debug!(
            "sending directions request: origin={}, destination={}, via={}, mode={mode}",
            route.origin(),
            route.destination(),
            route.via().len()
        );
        query.push(("key", self.config.api_key.clone()));

        let (status, body) = self
            .get_text(&self.config.directions_endpoint, &query)
            .await
            .map_err(RouteError::DirectionsApi)?;
        if status != StatusCode::OK {
            return Err(RouteError::DirectionsApi(api_error_message(status, &body)));
        }

        let response: DirectionsResponse = serde_json::from_str(&body)
            .map_err(|e| RouteError::DirectionsApi(format!("invalid response: {e}")))?;
        let Some(api_route) = response.routes.into_iter().next() else {
            return Err(RouteError::NoRouteFound {
                status: response.status,
            });
        };

        let mut points = Vec::new();
        let mut distance_km = 0.0;
        for step in api_route.legs.iter().flat_map(|leg| &leg.steps) {
            let decoded = polyline::decode(&step.polyline.points).ok_or_else(|| {
                RouteError::DirectionsApi(format!("undecodable polyline '{}'", step.polyline.points))
            })?;
            points.extend(decoded);
            distance_km += step.distance.value / 1000.0;
        }
        if points.is_empty() {
            return Err(RouteError::DirectionsApi("route has no geometry".into()));
        }

        let summary = api_route
            .summary
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| format!("{} => {}", route.origin(), route.destination()));
        debug!("route '{summary}': {} points, {distance_km:.1} km", points.len());

        Ok(Directions {
            name: format!("{summary} {mode}"),
            points,
            distance_km,
        })
    }

    /// Elevation for every point of `points`.
    ///
    /// Sends at most `elevation_sample_limit` distance-spaced locations and
    /// maps the answers back onto the full path.
    pub async fn fetch_elevations(&self, points: &[GeoPoint]) -> Result<Vec<f64>> {
        if points.is_empty() {
            return Ok(Vec::new());
        }
        let samples = ResampledSet::new(points, self.config.elevation_sample_limit);
        let locations = samples
            .reduced()
            .iter()
            .map(|p| format!("{},{}", p.lat, p.lon))
            .collect::<Vec<_>>()
            .join("|");
        debug!(
            "requesting {} elevations for {} points ({} bytes of locations)",
            samples.reduced().len(),
            points.len(),
            locations.len()
        );

        let query = [("locations", locations), ("key", self.config.api_key.clone())];
        let (status, body) = self
            .get_text(&self.config.elevation_endpoint, &query)
            .await
            .map_err(RouteError::ElevationApi)?;
        if status != StatusCode::OK {
            return Err(RouteError::ElevationApi(api_error_message(status, &body)));
        }

        let response: ElevationResponse = serde_json::from_str(&body)
            .map_err(|e| RouteError::ElevationApi(format!("invalid response: {e}")))?;
        if response.results.len() != samples.reduced().len() {
            return Err(RouteError::ElevationApi(format!(
                "expected {} elevation samples but received {} (status {})",
                samples.reduced().len(),
                response.results.len(),
                response.status
            )));
        }

        let sampled: Vec<f64> = response.results.iter().map(|r| r.elevation).collect();
        let elevations = samples.expand(&sampled);
        if elevations.len() != points.len() {
            return Err(RouteError::ElevationApi(format!(
                "expected {} elevation data points but received {}",
                points.len(),
                elevations.len()
            )));
        }
        Ok(elevations)
    }

    /// Like [`fetch_elevations`](Self::fetch_elevations), but a failure
    /// yields zero elevations instead of an error.
    pub async fn elevations_or_default(&self, points: &[GeoPoint]) -> ElevationOutcome {
        match self.fetch_elevations(points).await {
            Ok(elevations) => ElevationOutcome::Measured(elevations),
            Err(cause) => ElevationOutcome::degraded(points.len(), cause),
        }
    }

    async fn get_text(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> std::result::Result<(StatusCode, String), String> {
        let response = self
            .client
            .get(endpoint)
            .query(query)
            .send()
            .await
            .map_err(|e| e.without_url().to_string())?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| e.without_url().to_string())?;
        Ok((status, body))
    }
}

/// The API's own `error_message` when it sent one, else the HTTP status.
fn api_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error_message.or(b.status))
        .unwrap_or_else(|| format!("HTTP {status}"))
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error_message: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    routes: Vec<ApiRoute>,
}

#[derive(Debug, Deserialize)]
struct ApiRoute {
    summary: Option<String>,
    #[serde(default)]
    legs: Vec<ApiLeg>,
}

#[derive(Debug, Deserialize)]
struct ApiLeg {
    #[serde(default)]
    steps: Vec<ApiStep>,
}

#[derive(Debug, Deserialize)]
struct ApiStep {
    polyline: ApiPolyline,
    distance: ApiDistance,
}

#[derive(Debug, Deserialize)]
struct ApiPolyline {
    points: String,
}

#[derive(Debug, Deserialize)]
struct ApiDistance {
    /// Meters.
    value: f64,
}

#[derive(Debug, Deserialize)]
struct ElevationResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    results: Vec<ElevationResult>,
}

#[derive(Debug, Deserialize)]
struct ElevationResult {
    elevation: f64,
}
