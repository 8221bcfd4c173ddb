use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

use super::format::decimal;

/// `40 deg 20' 0.42857" N` as printed by exiftool without `-n`, or the
/// compact `40°20'0.42857" N` form.
static DMS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"^\s*(\d+(?:\.\d+)?)\s*(?:deg\s+|°\s*)"#,
        r#"(\d+(?:\.\d+)?)'\s*(\d+(?:\.\d+)?)"\s*([NSEWnsew])?\s*$"#,
    ))
    .expect("DMS regex should compile")
});

/// Which GPS grammar the raw coordinate values are expected in.
///
/// Exiftool prints plain decimal degrees when run with `-n` and
/// degree/minute/second strings otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateFormat {
    /// Decimal degrees, e.g. `"40.333452381"`.
    #[default]
    Numeric,
    /// Degrees, minutes and seconds, e.g. `40 deg 20' 0.42857" N`.
    Dms,
}

impl CoordinateFormat {
    pub fn from_numeric(numeric: bool) -> Self {
        if numeric { Self::Numeric } else { Self::Dms }
    }

    pub fn is_numeric(&self) -> bool {
        *self == Self::Numeric
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" => Some(Self::North),
            "s" | "south" => Some(Self::South),
            "e" | "east" => Some(Self::East),
            "w" | "west" => Some(Self::West),
            _ => None,
        }
    }

    fn sign(self) -> f64 {
        match self {
            Self::South | Self::West => -1.0,
            Self::North | Self::East => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn accepts(self, hemisphere: Hemisphere) -> bool {
        match self {
            Self::Latitude => matches!(hemisphere, Hemisphere::North | Hemisphere::South),
            Self::Longitude => matches!(hemisphere, Hemisphere::East | Hemisphere::West),
        }
    }

    fn max_degrees(self) -> f64 {
        match self {
            Self::Latitude => 90.0,
            Self::Longitude => 180.0,
        }
    }
}

/// The four raw tags that together describe one position.
#[derive(Debug, Default)]
pub(super) struct GpsTags<'a> {
    pub latitude: Option<&'a Value>,
    pub latitude_ref: Option<&'a Value>,
    pub longitude: Option<&'a Value>,
    pub longitude_ref: Option<&'a Value>,
}

/// Combine the four GPS tags into `"<lat>,<lon>"` decimal degrees.
///
/// Returns `None` when a tag is missing, a hemisphere reference is not a
/// cardinal direction for its axis, or a value does not match `format`.
pub(super) fn resolve(tags: &GpsTags<'_>, format: CoordinateFormat) -> Option<String> {
    let (Some(lat), Some(lat_ref), Some(lon), Some(lon_ref)) =
        (tags.latitude, tags.latitude_ref, tags.longitude, tags.longitude_ref)
    else {
        log::debug!("Incomplete GPS tags, omitting coordinates");
        return None;
    };

    let latitude = coordinate(Axis::Latitude, lat, lat_ref, format)?;
    let longitude = coordinate(Axis::Longitude, lon, lon_ref, format)?;

    Some(format!("{},{}", decimal(latitude), decimal(longitude)))
}

fn coordinate(
    axis: Axis,
    value: &Value,
    reference: &Value,
    format: CoordinateFormat,
) -> Option<f64> {
    let Some(hemisphere) = reference
        .as_str()
        .and_then(Hemisphere::parse)
        .filter(|h| axis.accepts(*h))
    else {
        log::debug!("Invalid {axis:?} reference {reference}, omitting coordinates");
        return None;
    };

    let parsed = match format {
        CoordinateFormat::Numeric => parse_decimal(value).map(|degrees| (degrees, None)),
        CoordinateFormat::Dms => value.as_str().and_then(parse_dms),
    };
    let Some((degrees, suffix)) = parsed else {
        log::debug!("{axis:?} {value} is not in {format:?} format, omitting coordinates");
        return None;
    };

    if suffix.is_some_and(|s| s != hemisphere) {
        log::debug!("{axis:?} {value} disagrees with reference {reference}, omitting coordinates");
        return None;
    }
    if degrees > axis.max_degrees() {
        log::debug!("{axis:?} {value} out of range, omitting coordinates");
        return None;
    }

    Some(hemisphere.sign() * degrees)
}

/// Unsigned decimal degrees from a JSON number or numeric string.
fn parse_decimal(value: &Value) -> Option<f64> {
    let degrees = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    degrees.filter(|d| d.is_finite()).map(f64::abs)
}

/// Decimal degrees plus the optional trailing compass letter.
fn parse_dms(s: &str) -> Option<(f64, Option<Hemisphere>)> {
    let caps = DMS_REGEX.captures(s)?;
    let degrees: f64 = caps[1].parse().ok()?;
    let minutes: f64 = caps[2].parse().ok()?;
    let seconds: f64 = caps[3].parse().ok()?;
    if minutes >= 60.0 || seconds >= 60.0 {
        return None;
    }

    let suffix = caps.get(4).and_then(|m| Hemisphere::parse(m.as_str()));
    Some((degrees + minutes / 60.0 + seconds / 3600.0, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tags<'a>(
        lat: &'a Value,
        lat_ref: &'a Value,
        lon: &'a Value,
        lon_ref: &'a Value,
    ) -> GpsTags<'a> {
        GpsTags {
            latitude: Some(lat),
            latitude_ref: Some(lat_ref),
            longitude: Some(lon),
            longitude_ref: Some(lon_ref),
        }
    }

    // ── parse_dms ────────────────────────────────────────────────────

    #[test]
    fn dms_to_decimal() {
        let (degrees, suffix) = parse_dms(r#"40 deg 20' 0.42857" N"#).unwrap();
        assert!((degrees - 40.333452380556).abs() < 1e-12);
        assert_eq!(suffix, Some(Hemisphere::North));
    }

    #[test]
    fn dms_without_suffix() {
        let (degrees, suffix) = parse_dms(r#"20 deg 10' 2.33333""#).unwrap();
        assert!((degrees - 20.167314813889).abs() < 1e-12);
        assert!(suffix.is_none());
    }

    #[test]
    fn dms_with_degree_sign() {
        let (degrees, suffix) = parse_dms(r#"40°20'0.42857" N"#).unwrap();
        assert!((degrees - 40.333452380556).abs() < 1e-12);
        assert_eq!(suffix, Some(Hemisphere::North));

        let (degrees, suffix) = parse_dms(r#"20° 10' 2.33333""#).unwrap();
        assert!((degrees - 20.167314813889).abs() < 1e-12);
        assert!(suffix.is_none());
    }

    #[test]
    fn resolve_dms_with_degree_sign() {
        let (lat, lat_ref) = (json!(r#"40°20'0.42857" N"#), json!("North"));
        let (lon, lon_ref) = (json!(r#"20°10'2.33333" W"#), json!("West"));
        assert_eq!(
            resolve(&tags(&lat, &lat_ref, &lon, &lon_ref), CoordinateFormat::Dms).as_deref(),
            Some("40.333452380556,-20.167314813889")
        );
    }

    #[test]
    fn dms_rejects_decimal_and_garbage() {
        assert!(parse_dms("40.333452381").is_none());
        assert!(parse_dms("forty deg").is_none());
        assert!(parse_dms(r#"40 deg 75' 0" N"#).is_none());
    }

    // ── parse_decimal ────────────────────────────────────────────────

    #[test]
    fn decimal_accepts_numbers_and_strings() {
        assert_eq!(parse_decimal(&json!("40.333452381")), Some(40.333452381));
        assert_eq!(parse_decimal(&json!(-20.5)), Some(20.5));
        assert_eq!(parse_decimal(&json!(r#"40 deg 20' 0.42857" N"#)), None);
        assert_eq!(parse_decimal(&json!("nan")), None);
    }

    // ── Hemisphere ───────────────────────────────────────────────────

    #[test]
    fn hemisphere_words_and_letters() {
        assert_eq!(Hemisphere::parse("North"), Some(Hemisphere::North));
        assert_eq!(Hemisphere::parse("s"), Some(Hemisphere::South));
        assert_eq!(Hemisphere::parse(" WEST "), Some(Hemisphere::West));
        assert_eq!(Hemisphere::parse("E"), Some(Hemisphere::East));
        assert_eq!(Hemisphere::parse("Up"), None);
    }

    // ── resolve ──────────────────────────────────────────────────────

    #[test]
    fn resolve_dms() {
        let (lat, lat_ref) = (json!(r#"40 deg 20' 0.42857" N"#), json!("North"));
        let (lon, lon_ref) = (json!(r#"20 deg 10' 2.33333" W"#), json!("West"));
        assert_eq!(
            resolve(&tags(&lat, &lat_ref, &lon, &lon_ref), CoordinateFormat::Dms).as_deref(),
            Some("40.333452380556,-20.167314813889")
        );
    }

    #[test]
    fn resolve_numeric() {
        let (lat, lat_ref) = (json!("40.333452381"), json!("N"));
        let (lon, lon_ref) = (json!(20.167314814), json!("W"));
        assert_eq!(
            resolve(&tags(&lat, &lat_ref, &lon, &lon_ref), CoordinateFormat::Numeric).as_deref(),
            Some("40.333452381,-20.167314814")
        );
    }

    #[test]
    fn resolve_south_east() {
        let (lat, lat_ref) = (json!("33.8688"), json!("South"));
        let (lon, lon_ref) = (json!("151.2093"), json!("East"));
        assert_eq!(
            resolve(&tags(&lat, &lat_ref, &lon, &lon_ref), CoordinateFormat::Numeric).as_deref(),
            Some("-33.8688,151.2093")
        );
    }

    #[test]
    fn resolve_rejects_grammar_mismatch() {
        let (lat, lat_ref) = (json!("40.333452381"), json!("North"));
        let (lon, lon_ref) = (json!("20.167314814"), json!("West"));
        assert!(resolve(&tags(&lat, &lat_ref, &lon, &lon_ref), CoordinateFormat::Dms).is_none());

        let (lat, lon) = (json!(r#"40 deg 20' 0.42857" N"#), json!(r#"20 deg 10' 2.33333" W"#));
        let gps = tags(&lat, &lat_ref, &lon, &lon_ref);
        assert!(resolve(&gps, CoordinateFormat::Numeric).is_none());
    }

    #[test]
    fn resolve_rejects_bad_references() {
        let (lat, lon) = (json!("40.5"), json!("20.5"));
        let (bad, east) = (json!("Up"), json!("East"));
        assert!(resolve(&tags(&lat, &bad, &lon, &east), CoordinateFormat::Numeric).is_none());

        // Latitude cannot be East
        let north = json!("North");
        assert!(resolve(&tags(&lat, &east, &lon, &north), CoordinateFormat::Numeric).is_none());
    }

    #[test]
    fn resolve_rejects_conflicting_suffix() {
        let (lat, lat_ref) = (json!(r#"40 deg 20' 0.42857" S"#), json!("North"));
        let (lon, lon_ref) = (json!(r#"20 deg 10' 2.33333" W"#), json!("West"));
        assert!(resolve(&tags(&lat, &lat_ref, &lon, &lon_ref), CoordinateFormat::Dms).is_none());
    }

    #[test]
    fn resolve_rejects_out_of_range() {
        let (lat, lat_ref) = (json!("91"), json!("N"));
        let (lon, lon_ref) = (json!("20"), json!("E"));
        let gps = tags(&lat, &lat_ref, &lon, &lon_ref);
        assert!(resolve(&gps, CoordinateFormat::Numeric).is_none());
    }

    #[test]
    fn resolve_requires_all_four() {
        let (lat, lat_ref) = (json!("40.333452381"), json!("North"));
        let partial = GpsTags {
            latitude: Some(&lat),
            latitude_ref: Some(&lat_ref),
            ..GpsTags::default()
        };
        assert!(resolve(&partial, CoordinateFormat::Numeric).is_none());
    }

    // ── CoordinateFormat ─────────────────────────────────────────────

    #[test]
    fn coordinate_format_defaults_to_numeric() {
        assert_eq!(CoordinateFormat::default(), CoordinateFormat::Numeric);
        assert_eq!(CoordinateFormat::from_numeric(false), CoordinateFormat::Dms);
        assert!(CoordinateFormat::from_numeric(true).is_numeric());
    }
}
