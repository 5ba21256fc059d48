//! Region-of-interest parsing: WKT `POLYGON` or GeoJSON input into a
//! `geo_types::Polygon`.

use geo_types::{LineString, Polygon};
use geojson::GeoJson;
use thiserror::Error;

/// Errors raised while parsing a region polygon
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error("Unsupported geometry: {0}")]
    UnsupportedGeometry(String),
    #[error("WKT parse error: {0}")]
    Wkt(String),
    #[error("Empty region input")]
    Empty,
}

/// Parse a region polygon from either WKT (`POLYGON ((...))`) or a GeoJSON
/// object (geometry, feature, or feature collection; the first polygon
/// feature wins).
pub fn parse_region(input: &str) -> Result<Polygon<f64>, RegionError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(RegionError::Empty);
    }
    if trimmed.starts_with('{') {
        return parse_geojson(trimmed);
    }
    if trimmed.to_ascii_uppercase().starts_with("POLYGON") {
        return parse_wkt_polygon(trimmed);
    }
    Err(RegionError::UnsupportedGeometry(
        "expected a WKT POLYGON or a GeoJSON object".to_string(),
    ))
}

fn parse_geojson(input: &str) -> Result<Polygon<f64>, RegionError> {
    let geojson: GeoJson = input.parse()?;
    let value = match geojson {
        GeoJson::Geometry(geometry) => geometry.value,
        GeoJson::Feature(feature) => {
            feature
                .geometry
                .ok_or_else(|| {
                    RegionError::UnsupportedGeometry("feature has no geometry".to_string())
                })?
                .value
        }
        GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .filter_map(|f| f.geometry)
            .map(|g| g.value)
            .find(|v| matches!(v, geojson::Value::Polygon(_)))
            .ok_or_else(|| {
                RegionError::UnsupportedGeometry(
                    "feature collection has no polygon feature".to_string(),
                )
            })?,
    };

    match value {
        geojson::Value::Polygon(_) => Ok(Polygon::<f64>::try_from(value)?),
        other => Err(RegionError::UnsupportedGeometry(other.type_name().to_string())),
    }
}

/// Minimal WKT parser for `POLYGON ((x y, ...), (x y, ...))`. The first
/// ring is the exterior, any further rings are holes. Rings are closed
/// automatically when the last point differs from the first.
fn parse_wkt_polygon(input: &str) -> Result<Polygon<f64>, RegionError> {
    let body = input.trim()["POLYGON".len()..].trim();
    let body = body
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| RegionError::Wkt("expected parenthesized ring list".to_string()))?;

    let mut rings: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    for ch in body.chars() {
        match ch {
            '(' => {
                depth += 1;
                if depth > 1 {
                    return Err(RegionError::Wkt("unexpected nested parenthesis".to_string()));
                }
            }
            ')' => {
                if depth == 0 {
                    return Err(RegionError::Wkt("unbalanced parenthesis".to_string()));
                }
                depth -= 1;
                rings.push(parse_ring(&current)?);
                current.clear();
            }
            _ => {
                if depth == 1 {
                    current.push(ch);
                }
            }
        }
    }
    if depth != 0 {
        return Err(RegionError::Wkt("unbalanced parenthesis".to_string()));
    }
    if rings.is_empty() {
        return Err(RegionError::Wkt("polygon has no rings".to_string()));
    }

    let mut rings = rings.into_iter().map(LineString::from);
    let exterior = rings.next().expect("at least one ring");
    Ok(Polygon::new(exterior, rings.collect()))
}

fn parse_ring(src: &str) -> Result<Vec<(f64, f64)>, RegionError> {
    let mut points = Vec::new();
    for pair in src.split(',') {
        let mut coords = pair.split_whitespace();
        let x = coords
            .next()
            .ok_or_else(|| RegionError::Wkt(format!("empty coordinate pair in `{}`", pair)))?;
        let y = coords
            .next()
            .ok_or_else(|| RegionError::Wkt(format!("missing y coordinate in `{}`", pair)))?;
        if coords.next().is_some() {
            return Err(RegionError::Wkt(format!(
                "expected 2D coordinates, got extra values in `{}`",
                pair
            )));
        }
        let x: f64 = x
            .parse()
            .map_err(|_| RegionError::Wkt(format!("invalid number `{}`", x)))?;
        let y: f64 = y
            .parse()
            .map_err(|_| RegionError::Wkt(format!("invalid number `{}`", y)))?;
        points.push((x, y));
    }
    if points.len() < 3 {
        return Err(RegionError::Wkt(format!(
            "ring has {} point(s), need at least 3",
            points.len()
        )));
    }
    Ok(points)
}
