//! GPX 1.1 file reading and writing.
//!
//! Tracks are written as a single `<trk>/<trkseg>` with one `<trkpt>` per
//! point. The reader accepts any number of tracks and segments and
//! flattens them into one point sequence, picking up the Garmin
//! `TrackPointExtension` fields (heart rate, cadence, temperature) and
//! `<power>` along the way.

use std::borrow::Cow;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde::{Deserialize, Serialize};

use crate::error::GpxError;
use crate::nav;

type Result<T> = std::result::Result<T, GpxError>;

/// Name used when neither the file nor its path provide one.
pub const FALLBACK_NAME: &str = "Unknown Name";

const GPX_NS: &str = "http://www.topografix.com/GPX/1/1";
const GPXX_NS: &str = "http://www.garmin.com/xmlschemas/GpxExtensions/v3";
const TPX_NS: &str = "http://www.garmin.com/xmlschemas/TrackPointExtension/v1";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str = "http://www.topografix.com/GPX/1/1 \
    http://www.topografix.com/GPX/1/1/gpx.xsd \
    http://www.garmin.com/xmlschemas/GpxExtensions/v3 \
    http://www.garmin.com/xmlschemas/GpxExtensionsv3.xsd \
    http://www.garmin.com/xmlschemas/TrackPointExtension/v1 \
    http://www.garmin.com/xmlschemas/TrackPointExtensionv1.xsd";

/// A geographic coordinate (WGS84 degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One GPX track point. Optional fields are only set when the source
/// data supplied them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    /// Altitude in meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ele: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    /// Beats per minute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    /// Revolutions per minute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cadence: Option<f64>,
    /// Watts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<f64>,
    /// Degrees Celsius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl TrackPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            ele: None,
            time: None,
            heart_rate: None,
            cadence: None,
            power: None,
            temperature: None,
        }
    }

    pub fn with_ele(mut self, ele: f64) -> Self {
        self.ele = Some(ele);
        self
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    fn has_extensions(&self) -> bool {
        self.power.is_some() || self.has_tpx_extension()
    }

    fn has_tpx_extension(&self) -> bool {
        self.heart_rate.is_some() || self.cadence.is_some() || self.temperature.is_some()
    }
}

/// A named, ordered sequence of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub points: Vec<TrackPoint>,
}

impl Track {
    pub fn positions(&self) -> Vec<GeoPoint> {
        self.points.iter().map(TrackPoint::position).collect()
    }

    /// Path length in kilometers.
    pub fn length_km(&self) -> f64 {
        nav::track_length_km(&self.positions())
    }
}

/// Points of one `<trkseg>`.
type Segment = Vec<TrackPoint>;

/// Parse GPX contents into a track.
///
/// `file_path` is only used to derive a name when the document has no
/// `<metadata><name>`.
pub fn parse(file_path: &str, xml: &str) -> Result<Track> {
    let mut reader = Reader::from_str(xml);
    let mut metadata_name = None;
    let mut segments: Vec<Segment> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"metadata" => metadata_name = parse_metadata(&mut reader)?,
                b"trk" => {
                    let first_index = segments.iter().map(Vec::len).sum();
                    segments.extend(parse_track(&mut reader, first_index)?);
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    let points: Vec<TrackPoint> = segments.into_iter().flatten().collect();
    if points.is_empty() {
        return Err(GpxError::NoTrackPoints);
    }

    let name = metadata_name.unwrap_or_else(|| name_from_path(file_path));
    Ok(Track { name, points })
}

/// Read and parse a GPX file. Its file name stands in for a missing
/// `<metadata><name>`.
pub fn read_file(path: &Path) -> Result<Track> {
    let contents = std::fs::read_to_string(path)?;
    let file_name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    parse(&file_name, &contents)
}

/// Serialize a track to a GPX 1.1 document.
pub fn serialize(track: &Track) -> Result<String> {
    let mut buffer = Vec::new();
    write(track, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Write a track as a GPX 1.1 document to any writer.
pub fn write<W: Write>(track: &Track, out: W) -> Result<()> {
    let mut writer = Writer::new_with_indent(out, b' ', 4);
    let creator = format!("gmaps2gpx {}", crate::VERSION);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("gpx");
    root.push_attribute(("creator", creator.as_str()));
    root.push_attribute(("version", "1.1"));
    root.push_attribute(("xmlns", GPX_NS));
    root.push_attribute(("xmlns:xsi", XSI_NS));
    root.push_attribute(("xsi:schemaLocation", SCHEMA_LOCATION));
    root.push_attribute(("xmlns:gpxtpx", TPX_NS));
    root.push_attribute(("xmlns:gpxx", GPXX_NS));
    writer.write_event(Event::Start(root))?;

    writer.write_event(Event::Start(BytesStart::new("metadata")))?;
    write_text_element(&mut writer, "name", &track.name)?;
    writer.write_event(Event::End(BytesEnd::new("metadata")))?;

    writer.write_event(Event::Start(BytesStart::new("trk")))?;
    write_text_element(&mut writer, "name", &track.name)?;
    writer.write_event(Event::Start(BytesStart::new("trkseg")))?;
    for point in &track.points {
        write_point(&mut writer, point)?;
    }
    writer.write_event(Event::End(BytesEnd::new("trkseg")))?;
    writer.write_event(Event::End(BytesEnd::new("trk")))?;

    writer.write_event(Event::End(BytesEnd::new("gpx")))?;
    Ok(())
}

/// File name a track is saved under: the percent-encoded track name with
/// path separators replaced.
pub fn file_name_for(track: &Track) -> String {
    format!("{}.gpx", urlencoding::encode(&track.name.replace('/', "_")))
}

/// Serialize `track` into `dir` and return the written path.
pub fn write_file(dir: &Path, track: &Track) -> Result<PathBuf> {
    let path = dir.join(file_name_for(track));
    std::fs::write(&path, serialize(track)?)?;
    Ok(path)
}

fn write_point<W: Write>(writer: &mut Writer<W>, point: &TrackPoint) -> Result<()> {
    let mut trkpt = BytesStart::new("trkpt");
    trkpt.push_attribute(("lat", point.lat.to_string().as_str()));
    trkpt.push_attribute(("lon", point.lon.to_string().as_str()));
    writer.write_event(Event::Start(trkpt))?;

    if let Some(ele) = point.ele {
        write_text_element(writer, "ele", &ele.to_string())?;
    }
    if let Some(time) = point.time {
        write_text_element(writer, "time", &time.to_rfc3339_opts(SecondsFormat::AutoSi, true))?;
    }
    if point.has_extensions() {
        writer.write_event(Event::Start(BytesStart::new("extensions")))?;
        if let Some(power) = point.power {
            write_text_element(writer, "power", &power.to_string())?;
        }
        if point.has_tpx_extension() {
            writer.write_event(Event::Start(BytesStart::new("gpxtpx:TrackPointExtension")))?;
            // Field order follows the TrackPointExtension v1 schema.
            let fields = [
                ("gpxtpx:atemp", point.temperature),
                ("gpxtpx:hr", point.heart_rate),
                ("gpxtpx:cad", point.cadence),
            ];
            for (tag, value) in fields {
                if let Some(value) = value {
                    write_text_element(writer, tag, &value.to_string())?;
                }
            }
            writer.write_event(Event::End(BytesEnd::new("gpxtpx:TrackPointExtension")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("extensions")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("trkpt")))?;
    Ok(())
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Last path segment, percent-decoded, or the fallback name.
fn name_from_path(file_path: &str) -> String {
    match file_path.rsplit('/').next().filter(|s| !s.trim().is_empty()) {
        Some(segment) => urlencoding::decode(segment)
            .map(Cow::into_owned)
            .unwrap_or_else(|_| segment.to_string()),
        None => FALLBACK_NAME.to_string(),
    }
}

/// Parse a `<metadata>` element, returning its `<name>` if any.
fn parse_metadata<'a>(reader: &mut Reader<&'a [u8]>) -> Result<Option<String>> {
    let mut name = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"name" => name = Some(element_text(reader, &e)?),
                _ => {
                    reader.read_to_end(e.name())?;
                }
            },
            Event::End(e) if e.local_name().as_ref() == b"metadata" => break,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(name)
}

/// Parse a `<trk>` element into its segments.
///
/// `first_index` is the running point index, used in error reports.
fn parse_track<'a>(reader: &mut Reader<&'a [u8]>, first_index: usize) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut index = first_index;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"trkseg" => {
                    let segment = parse_segment(reader, index)?;
                    index += segment.len();
                    segments.push(segment);
                }
                _ => {
                    reader.read_to_end(e.name())?;
                }
            },
            Event::End(e) if e.local_name().as_ref() == b"trk" => break,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(segments)
}

/// Parse a `<trkseg>` element.
fn parse_segment<'a>(reader: &mut Reader<&'a [u8]>, first_index: usize) -> Result<Segment> {
    let mut points = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"trkpt" => points.push(parse_point(&e, reader, first_index + points.len())?),
                _ => {
                    reader.read_to_end(e.name())?;
                }
            },
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"trkpt" {
                    let (lat, lon) = parse_lat_lon(&e, first_index + points.len())?;
                    points.push(TrackPoint::new(lat, lon));
                }
            }
            Event::End(e) if e.local_name().as_ref() == b"trkseg" => break,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(points)
}

/// Parse lat/lon attributes from a `<trkpt>` start tag.
fn parse_lat_lon(e: &BytesStart<'_>, index: usize) -> Result<(f64, f64)> {
    let mut lat = None;
    let mut lon = None;

    for attr in e.attributes().flatten() {
        let value = std::str::from_utf8(&attr.value)
            .ok()
            .and_then(|v| v.trim().parse::<f64>().ok());
        match attr.key.local_name().as_ref() {
            b"lat" => lat = value,
            b"lon" => lon = value,
            _ => {}
        }
    }

    let lat = lat.ok_or(GpxError::MissingCoordinate { index, attribute: "lat" })?;
    let lon = lon.ok_or(GpxError::MissingCoordinate { index, attribute: "lon" })?;
    Ok((lat, lon))
}

/// Parse a `<trkpt>` element and its children.
/// Called after receiving `Event::Start` for the point.
fn parse_point<'a>(
    start: &BytesStart<'a>,
    reader: &mut Reader<&'a [u8]>,
    index: usize,
) -> Result<TrackPoint> {
    let (lat, lon) = parse_lat_lon(start, index)?;
    let mut point = TrackPoint::new(lat, lon);

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"ele" => point.ele = parse_number(&element_text(reader, &e)?),
                b"time" => {
                    let text = element_text(reader, &e)?;
                    point.time = DateTime::parse_from_rfc3339(text.trim())
                        .map(|t| t.with_timezone(&Utc))
                        .map_err(|err| log::debug!("ignoring unparseable time '{text}': {err}"))
                        .ok();
                }
                b"extensions" => parse_extensions(reader, &mut point)?,
                _ => {
                    reader.read_to_end(e.name())?;
                }
            },
            Event::End(e) if e.local_name().as_ref() == b"trkpt" => break,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(point)
}

/// Parse `<extensions>`, descending into `TrackPointExtension`.
fn parse_extensions<'a>(reader: &mut Reader<&'a [u8]>, point: &mut TrackPoint) -> Result<()> {
    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"TrackPointExtension" => {}
                b"power" => point.power = parse_number(&element_text(reader, &e)?),
                b"hr" => point.heart_rate = parse_number(&element_text(reader, &e)?),
                b"cad" => point.cadence = parse_number(&element_text(reader, &e)?),
                b"atemp" => point.temperature = parse_number(&element_text(reader, &e)?),
                _ => {
                    reader.read_to_end(e.name())?;
                }
            },
            Event::End(e) if e.local_name().as_ref() == b"extensions" => break,
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(())
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

/// Text of the element opened by `start`, with entities resolved.
fn element_text(reader: &mut Reader<&[u8]>, start: &BytesStart<'_>) -> Result<String> {
    let raw = reader.read_text(start.name())?;
    let text = quick_xml::escape::unescape(&raw).map_err(quick_xml::Error::from)?;
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const STRAVA_GPX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx creator="StravaGPX" version="1.1" xmlns="http://www.topografix.com/GPX/1/1"
     xmlns:gpxtpx="http://www.garmin.com/xmlschemas/TrackPointExtension/v1">
  <metadata>
    <name>Morning Ride</name>
    <time>2024-05-01T06:00:00Z</time>
  </metadata>
  <trk>
    <name>Ignored Track Name</name>
    <type>cycling</type>
    <trkseg>
      <trkpt lat="52.3387790" lon="4.8934655">
        <ele>-1.2</ele>
        <time>2024-05-01T06:00:00Z</time>
        <extensions>
          <power>215</power>
          <gpxtpx:TrackPointExtension>
            <gpxtpx:atemp>14</gpxtpx:atemp>
            <gpxtpx:hr>131</gpxtpx:hr>
            <gpxtpx:cad>88</gpxtpx:cad>
          </gpxtpx:TrackPointExtension>
        </extensions>
      </trkpt>
      <trkpt lat="52.3390" lon="4.8940"><ele>0.4</ele></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    fn sample_track() -> Track {
        let mut first = TrackPoint::new(52.338779, 4.8934655).with_ele(-1.25);
        first.time = Some(Utc.with_ymd_and_hms(2024, 5, 1, 6, 0, 0).unwrap());
        first.heart_rate = Some(131.0);
        first.cadence = Some(88.0);
        first.power = Some(215.0);
        first.temperature = Some(14.5);
        Track {
            name: "Ikaria Food => Breadwinner & Co bicycling".into(),
            points: vec![
                first,
                TrackPoint::new(52.33901234567891, 4.894012345678912),
                TrackPoint::new(52.3395, 4.8951).with_ele(3.0000000000000004),
            ],
        }
    }

    #[test]
    fn parse_strava_export() {
        let track = parse("/tmp/ride.gpx", STRAVA_GPX).unwrap();

        assert_eq!(track.name, "Morning Ride");
        assert_eq!(track.points.len(), 2);

        let p = &track.points[0];
        assert!((p.lat - 52.338779).abs() < 1e-9);
        assert!((p.lon - 4.8934655).abs() < 1e-9);
        assert_eq!(p.ele, Some(-1.2));
        assert_eq!(p.time, Some(Utc.with_ymd_and_hms(2024, 5, 1, 6, 0, 0).unwrap()));
        assert_eq!(p.power, Some(215.0));
        assert_eq!(p.heart_rate, Some(131.0));
        assert_eq!(p.cadence, Some(88.0));
        assert_eq!(p.temperature, Some(14.0));

        let q = &track.points[1];
        assert_eq!(q.ele, Some(0.4));
        assert_eq!(q.heart_rate, None);
        assert_eq!(q.time, None);
    }

    #[test]
    fn round_trip_preserves_track() {
        let track = sample_track();
        let xml = serialize(&track).unwrap();
        let parsed = parse("/data/whatever.gpx", &xml).unwrap();
        assert_eq!(parsed, track);
    }

    #[test]
    fn round_trip_keeps_blank_name() {
        for name in ["", "   "] {
            let track = Track {
                name: name.into(),
                points: vec![TrackPoint::new(48.0, 16.0).with_ele(170.0)],
            };
            let parsed = parse("/data/x.gpx", &serialize(&track).unwrap()).unwrap();
            assert_eq!(parsed, track, "name {name:?}");
        }
    }

    #[test]
    fn entities_in_names_are_resolved() {
        let xml = r#"<gpx><metadata><name>Caf&#233; &amp; Bar &lt;3</name></metadata>
<trk><trkseg><trkpt lat="1" lon="2"/></trkseg></trk></gpx>"#;
        assert_eq!(parse("x.gpx", xml).unwrap().name, "Café & Bar <3");
    }

    #[test]
    fn serialize_writes_name_verbatim_and_ele_only_when_set() {
        let xml = serialize(&sample_track()).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("version=\"1.1\""));
        // Name appears in both metadata and trk, XML-escaped but not percent-encoded
        assert_eq!(xml.matches("<name>Ikaria Food =&gt; Breadwinner &amp; Co bicycling</name>").count(), 2);
        assert_eq!(xml.matches("<trkpt ").count(), 3);
        assert_eq!(xml.matches("<ele>").count(), 2);
        assert!(xml.contains("lat=\"52.33901234567891\" lon=\"4.894012345678912\""));
        assert!(xml.contains("<ele>3.0000000000000004</ele>"));
    }

    #[test]
    fn multiple_segments_are_flattened_in_order() {
        let xml = r#"<?xml version="1.0"?>
<gpx version="1.1">
  <metadata><name>Split</name></metadata>
  <trk>
    <trkseg>
      <trkpt lat="48.0" lon="16.0"></trkpt>
      <trkpt lat="48.1" lon="16.1"/>
    </trkseg>
    <trkseg></trkseg>
    <trkseg>
      <trkpt lat="48.2" lon="16.2"></trkpt>
    </trkseg>
  </trk>
  <trk>
    <trkseg>
      <trkpt lat="48.3" lon="16.3"></trkpt>
    </trkseg>
  </trk>
</gpx>"#;
        let track = parse("split.gpx", xml).unwrap();
        let lats: Vec<f64> = track.points.iter().map(|p| p.lat).collect();
        assert_eq!(lats, vec![48.0, 48.1, 48.2, 48.3]);
    }

    #[test]
    fn empty_segment_is_no_track_points() {
        let xml = r#"<?xml version="1.0"?>
<gpx version="1.1" xmlns="http://www.topografix.com/GPX/1/1">
  <trk><trkseg></trkseg></trk>
</gpx>"#;
        assert!(matches!(parse("empty.gpx", xml), Err(GpxError::NoTrackPoints)));
    }

    #[test]
    fn document_without_tracks_is_no_track_points() {
        let xml = r#"<?xml version="1.0"?>
<gpx version="1.1"><wpt lat="48.0" lon="16.0"><name>Vienna</name></wpt></gpx>"#;
        assert!(matches!(parse("wpt.gpx", xml), Err(GpxError::NoTrackPoints)));
    }

    #[test]
    fn unparseable_coordinate_is_reported() {
        let xml = r#"<?xml version="1.0"?>
<gpx version="1.1">
  <trk><trkseg>
    <trkpt lat="48.0" lon="16.0"></trkpt>
    <trkpt lat="48.1" lon="east"></trkpt>
  </trkseg></trk>
</gpx>"#;
        match parse("bad.gpx", xml) {
            Err(GpxError::MissingCoordinate { index, attribute }) => {
                assert_eq!(index, 1);
                assert_eq!(attribute, "lon");
            }
            other => panic!("expected MissingCoordinate, got {other:?}"),
        }
    }

    #[test]
    fn missing_lat_attribute_is_reported() {
        let xml = r#"<gpx><trk><trkseg><trkpt lon="16.0"/></trkseg></trk></gpx>"#;
        assert!(matches!(
            parse("bad.gpx", xml),
            Err(GpxError::MissingCoordinate { index: 0, attribute: "lat" })
        ));
    }

    #[test]
    fn name_falls_back_to_decoded_file_name() {
        let xml = r#"<gpx><trk><trkseg><trkpt lat="1" lon="2"/></trkseg></trk></gpx>"#;
        let track = parse("/storage/tracks/Amsterdam%20loop.gpx", xml).unwrap();
        assert_eq!(track.name, "Amsterdam loop.gpx");
    }

    #[test]
    fn name_falls_back_to_literal() {
        let xml = r#"<gpx><trk><trkseg><trkpt lat="1" lon="2"/></trkseg></trk></gpx>"#;
        assert_eq!(parse("/storage/tracks/", xml).unwrap().name, FALLBACK_NAME);
        assert_eq!(parse("", xml).unwrap().name, FALLBACK_NAME);
    }

    #[test]
    fn invalid_xml_returns_error() {
        let xml = "<gpx><trk><trkseg><trkpt lat=\"1\" lon=\"2\"></trkseg></gpx>";
        assert!(parse("broken.gpx", xml).is_err());
    }

    #[test]
    fn file_name_is_percent_encoded() {
        let track = Track {
            name: "A/B => C bicycling".into(),
            points: vec![TrackPoint::new(0.0, 0.0)],
        };
        assert_eq!(file_name_for(&track), "A_B%20%3D%3E%20C%20bicycling.gpx");
    }

    #[test]
    fn write_then_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let track = sample_track();

        let path = write_file(dir.path(), &track).unwrap();
        assert_eq!(path.parent(), Some(dir.path()));

        let loaded = read_file(&path).unwrap();
        assert_eq!(loaded, track);
    }

    #[test]
    fn read_file_names_track_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Evening%20loop.gpx");
        std::fs::write(
            &path,
            r#"<gpx><trk><trkseg><trkpt lat="1" lon="2"/></trkseg></trk></gpx>"#,
        )
        .unwrap();

        assert_eq!(read_file(&path).unwrap().name, "Evening loop.gpx");
    }

    #[test]
    fn track_length() {
        let track = Track {
            name: "Equator".into(),
            points: vec![TrackPoint::new(0.0, 0.0), TrackPoint::new(0.0, 1.0)],
        };
        assert!((track.length_km() - 111.2).abs() < 0.1);
    }
}
