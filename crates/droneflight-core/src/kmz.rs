//! KMZ codec.
//!
//! Decoding pulls the first `<coordinates>` block out of the first `.kml`
//! member of a zip archive with a plain text search; it does not walk the
//! KML schema. Encoding writes a minimal single-Placemark KML 2.2 document
//! as the sole `doc.kml` member of a new archive.

use crate::error::FormatError;
use crate::models::{LineString, Waypoint};
use std::io::{Cursor, Read, Write};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Member name used for the KML document in exported archives.
pub const KML_MEMBER_NAME: &str = "doc.kml";

const OPEN_TAG: &str = "<coordinates>";
const CLOSE_TAG: &str = "</coordinates>";

/// Decode KMZ bytes into the path described by the first `<coordinates>` block.
pub fn decode(bytes: &[u8]) -> Result<LineString, FormatError> {
    let kml = read_kml_member(bytes)?;
    let block = coordinate_blocks(&kml)
        .next()
        .ok_or(FormatError::NoCoordinates)?;
    let coordinates = parse_coordinates(block)?;
    debug!(waypoints = coordinates.len(), "decoded KMZ path");
    Ok(LineString::new(coordinates))
}

/// Decode every `<coordinates>` block of the first KML member, in document order.
///
/// Documents with several placemarks yield one path each.
pub fn decode_all(bytes: &[u8]) -> Result<Vec<LineString>, FormatError> {
    let kml = read_kml_member(bytes)?;
    let paths = coordinate_blocks(&kml)
        .map(|block| parse_coordinates(block).map(LineString::new))
        .collect::<Result<Vec<_>, _>>()?;
    if paths.is_empty() {
        return Err(FormatError::NoCoordinates);
    }
    debug!(paths = paths.len(), "decoded KMZ paths");
    Ok(paths)
}

/// Encode waypoints into a KMZ archive.
///
/// Altitude is always written as `0`, whatever the waypoint carries.
pub fn encode(waypoints: &[Waypoint]) -> Result<Vec<u8>, FormatError> {
    let kml = render_kml(waypoints);

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    writer.start_file(KML_MEMBER_NAME, options)?;
    writer.write_all(kml.as_bytes())?;
    let archive = writer.finish()?.into_inner();

    debug!(
        waypoints = waypoints.len(),
        bytes = archive.len(),
        "encoded KMZ path"
    );
    Ok(archive)
}

/// Render the KML document written by [`encode`].
pub fn render_kml(waypoints: &[Waypoint]) -> String {
    let coords = waypoints
        .iter()
        .map(|wp| format!("{},{},0", wp.lon(), wp.lat()))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Placemark>
      <name>Flight Path</name>
      <LineString>
        <coordinates>
{coords}
        </coordinates>
      </LineString>
    </Placemark>
  </Document>
</kml>"#
    )
}

fn read_kml_member(bytes: &[u8]) -> Result<String, FormatError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    for index in 0..archive.len() {
        let mut member = archive.by_index(index)?;
        if !member.name().to_ascii_lowercase().ends_with(".kml") {
            continue;
        }
        debug!(member = member.name(), "reading KML member");
        let mut raw = Vec::new();
        member.read_to_end(&mut raw)?;
        return Ok(String::from_utf8(raw)?);
    }

    Err(FormatError::NoKmlMember)
}

fn coordinate_blocks(kml: &str) -> impl Iterator<Item = &str> + '_ {
    let mut rest = kml;
    std::iter::from_fn(move || {
        let start = rest.find(OPEN_TAG)? + OPEN_TAG.len();
        let len = rest[start..].find(CLOSE_TAG)?;
        let block = &rest[start..start + len];
        rest = &rest[start + len + CLOSE_TAG.len()..];
        Some(block)
    })
}

pub(crate) fn parse_coordinates(block: &str) -> Result<Vec<Waypoint>, FormatError> {
    block.split_whitespace().map(parse_token).collect()
}

/// Parse one `lon,lat[,alt,...]` tuple. Fields after the altitude are ignored.
fn parse_token(token: &str) -> Result<Waypoint, FormatError> {
    let invalid = || FormatError::InvalidCoordinate {
        token: token.to_string(),
    };
    let number = |field: Option<&str>| -> Result<f64, FormatError> {
        field
            .and_then(|f| f.trim().parse::<f64>().ok())
            .ok_or_else(invalid)
    };

    let mut fields = token.split(',');
    let lon = number(fields.next())?;
    let lat = number(fields.next())?;
    match fields.next() {
        Some(alt) if !alt.trim().is_empty() => {
            Ok(Waypoint::with_altitude(lon, lat, number(Some(alt))?))
        }
        _ => Ok(Waypoint::new(lon, lat)),
    }
}
