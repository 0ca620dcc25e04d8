//! Google Maps directions link parsing.
//!
//! Two link grammars are understood:
//!
//! - web links, `https://www.google.com/maps/dir/<stop>/<stop>/@<view>/data=…`,
//!   where stops are path segments and the travel mode sits in the
//!   protobuf-style `data=` blob as `!3e<digit>`;
//! - app links, `https://maps.google.com/?saddr=<start>&daddr=<stop>+to:<stop>&dirflg=<mode>`,
//!   which is what `maps.app.goo.gl` short links redirect to.
//!
//! Stop order is preserved exactly; it defines the route.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::RouteError;

type Result<T> = std::result::Result<T, RouteError>;

/// Links containing this are parsed with the web grammar.
pub const WEB_DIRECTIONS_PREFIX: &str = "https://www.google.com/maps/dir";

/// Host of the cookie-consent interstitial Google may redirect to.
pub const CONSENT_HOST: &str = "consent.google.com";

static URL_IN_TEXT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"https?://[^\s]+").ok());

static WEB_MODE_MARKER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"data=.*!3e(\d)").ok());

static VIA_SEPARATOR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\s*\bto:").ok());

/// How the route is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Driving,
    #[default]
    Bicycling,
    Walking,
    Transit,
}

impl TravelMode {
    /// Mode from the `!3e<digit>` marker of a web link.
    pub fn from_web_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Self::Driving),
            1 => Some(Self::Bicycling),
            2 => Some(Self::Walking),
            3 => Some(Self::Transit),
            _ => None,
        }
    }

    /// Mode from the `dirflg` parameter of an app link.
    pub fn from_dirflg(flag: &str) -> Option<Self> {
        match flag.trim() {
            "d" => Some(Self::Driving),
            "b" => Some(Self::Bicycling),
            "w" => Some(Self::Walking),
            "t" | "r" => Some(Self::Transit),
            _ => None,
        }
    }

    /// Name used by the directions API's `mode` parameter.
    pub fn as_api_str(self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Bicycling => "bicycling",
            Self::Walking => "walking",
            Self::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

/// Ordered stops of a route plus its travel mode.
///
/// Always holds at least an origin and a destination; only [`ParsedRoute::new`]
/// builds one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedRoute {
    waypoints: Vec<String>,
    mode: TravelMode,
}

impl ParsedRoute {
    pub fn new(waypoints: Vec<String>, mode: TravelMode) -> Result<Self> {
        if waypoints.len() < 2 {
            return Err(RouteError::MalformedUrl(format!(
                "expected a start and a destination, found {} stop(s)",
                waypoints.len()
            )));
        }
        Ok(Self { waypoints, mode })
    }

    /// All stops in traversal order, origin first.
    pub fn waypoints(&self) -> &[String] {
        &self.waypoints
    }

    pub fn mode(&self) -> TravelMode {
        self.mode
    }

    pub fn origin(&self) -> &str {
        &self.waypoints[0]
    }

    pub fn destination(&self) -> &str {
        &self.waypoints[self.waypoints.len() - 1]
    }

    /// Stops between origin and destination, in order.
    pub fn via(&self) -> &[String] {
        &self.waypoints[1..self.waypoints.len() - 1]
    }
}

/// Which grammar a link follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    Web,
    App,
}

/// Find the first http(s) link in free text, e.g. a share-sheet message.
pub fn find_url_in_text(text: &str) -> Result<Url> {
    let regex = URL_IN_TEXT
        .as_ref()
        .ok_or_else(|| RouteError::MalformedUrl("link pattern unavailable".into()))?;
    let found = regex
        .find(text)
        .ok_or_else(|| RouteError::MalformedUrl(format!("no link found in '{text}'")))?;
    debug!("url match result: {}", found.as_str());
    Url::parse(found.as_str()).map_err(|e| RouteError::MalformedUrl(format!("{}: {e}", found.as_str())))
}

pub fn classify(url: &Url) -> UrlKind {
    if url.as_str().contains(WEB_DIRECTIONS_PREFIX) {
        UrlKind::Web
    } else {
        UrlKind::App
    }
}

/// Parse a directions link of either grammar.
pub fn parse_route_url(url: &Url) -> Result<ParsedRoute> {
    match classify(url) {
        UrlKind::Web => parse_web_url(url),
        UrlKind::App => parse_app_url(url),
    }
}

/// Parse `…/maps/dir/<stop>/<stop>/@<view>/data=…`.
pub fn parse_web_url(url: &Url) -> Result<ParsedRoute> {
    debug!("parsing as web url: {}", url.path());

    let mode = WEB_MODE_MARKER
        .as_ref()
        .and_then(|re| re.captures(url.path()))
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .and_then(TravelMode::from_web_index)
        .unwrap_or_default();

    // Stops sit between the `maps/dir` prefix and the first view or data segment.
    let waypoints = url
        .path_segments()
        .into_iter()
        .flatten()
        .skip_while(|segment| matches!(*segment, "" | "maps" | "dir"))
        .take_while(|segment| !ends_stop_list(segment))
        .filter(|segment| !segment.trim().is_empty())
        .map(decode_component)
        .collect::<Result<Vec<_>>>()?;

    ParsedRoute::new(waypoints, mode)
}

/// Parse `?saddr=<start>&daddr=<stop>+to:<stop>&dirflg=<mode>`.
pub fn parse_app_url(url: &Url) -> Result<ParsedRoute> {
    debug!("parsing as app url");
    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();

    let start = required_param(&params, "saddr", "Start address not found")?;
    let destination = required_param(&params, "daddr", "Destination not found")?;

    let mut waypoints = vec![start.trim().to_string()];
    match VIA_SEPARATOR.as_ref() {
        Some(re) => waypoints.extend(
            re.split(destination)
                .map(str::trim)
                .filter(|stop| !stop.is_empty())
                .map(str::to_string),
        ),
        None => waypoints.push(destination.trim().to_string()),
    }

    let mode = match params.get("dirflg") {
        Some(flag) => TravelMode::from_dirflg(flag).unwrap_or_else(|| {
            warn!("unknown dirflg '{flag}', using {}", TravelMode::default());
            TravelMode::default()
        }),
        None => TravelMode::default(),
    };

    ParsedRoute::new(waypoints, mode)
}

/// Real destination behind a consent interstitial, if `url` is one.
///
/// A consent page without a `continue` parameter is returned as `None`;
/// an empty or unparseable one is an error.
pub fn consent_continuation(url: &Url) -> Result<Option<Url>> {
    let is_consent = url.host_str().is_some_and(|host| host.contains(CONSENT_HOST));
    if !is_consent {
        return Ok(None);
    }

    let Some((_, target)) = url.query_pairs().find(|(key, _)| key.eq_ignore_ascii_case("continue")) else {
        return Ok(None);
    };
    if target.trim().is_empty() {
        return Err(RouteError::RedirectResolution(
            "could not parse consent screen redirection".into(),
        ));
    }
    Url::parse(&target)
        .map(Some)
        .map_err(|e| RouteError::RedirectResolution(format!("invalid continue target '{target}': {e}")))
}

fn required_param<'p>(
    params: &'p HashMap<String, String>,
    key: &str,
    missing: &str,
) -> Result<&'p str> {
    params
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| RouteError::MalformedUrl(missing.to_string()))
}

/// `@<view>` and `data=…` segments close the list of stops.
fn ends_stop_list(segment: &str) -> bool {
    let segment = segment.trim();
    segment.starts_with('@') || segment.starts_with("data=")
}

/// Percent-decode a path segment, treating `+` as a space.
fn decode_component(segment: &str) -> Result<String> {
    let spaced = segment.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.trim().to_string())
        .map_err(|e| RouteError::MalformedUrl(format!("cannot decode '{segment}': {e}")))
}
