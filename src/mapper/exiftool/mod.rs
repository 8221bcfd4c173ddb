//! Mapper for exiftool's JSON output (`exiftool -j`).

mod format;
mod gps;

pub use gps::CoordinateFormat;

use format::Formatter;
use gps::GpsTags;
use serde_json::Value;

use super::{Field, MappedFields, Mapper, RawData, Result};

const GPS_LATITUDE: &str = "GPSLatitude";
const GPS_LATITUDE_REF: &str = "GPSLatitudeRef";
const GPS_LONGITUDE: &str = "GPSLongitude";
const GPS_LONGITUDE_REF: &str = "GPSLongitudeRef";

/// The tags that are combined into [`Field::Gps`].
pub const GPS_TAGS: [&str; 4] = [
    GPS_LATITUDE,
    GPS_LATITUDE_REF,
    GPS_LONGITUDE,
    GPS_LONGITUDE_REF,
];

/// Exiftool tag name to canonical field, in output order.
///
/// The coordinate pair is emitted once, at the position of `GPSLatitude`.
pub const FIELD_MAP: &[(&str, Field)] = &[
    ("Aperture", Field::Aperture),
    ("Artist", Field::Author),
    ("Model", Field::Camera),
    ("Caption-Abstract", Field::Caption),
    ("ColorSpace", Field::ColorSpace),
    ("Copyright", Field::Copyright),
    ("CreateDate", Field::CreationDate),
    ("Credit", Field::Credit),
    ("ExposureTime", Field::Exposure),
    ("FileSize", Field::FileSize),
    ("FocalLength", Field::FocalLength),
    ("ApproximateFocusDistance", Field::FocusDistance),
    ("Headline", Field::Headline),
    ("ImageHeight", Field::Height),
    ("XResolution", Field::HorizontalResolution),
    ("ISO", Field::Iso),
    ("JobTitle", Field::JobTitle),
    ("Keywords", Field::Keywords),
    ("MIMEType", Field::MimeType),
    ("Orientation", Field::Orientation),
    ("Software", Field::Software),
    ("Source", Field::Source),
    ("Title", Field::Title),
    ("YResolution", Field::VerticalResolution),
    ("ImageWidth", Field::Width),
    (GPS_LATITUDE, Field::Gps),
    (GPS_LATITUDE_REF, Field::Gps),
    (GPS_LONGITUDE, Field::Gps),
    (GPS_LONGITUDE_REF, Field::Gps),
];

/// Maps exiftool tags onto canonical fields.
///
/// Aperture, focus distance, creation date, exposure time and focal length
/// are reformatted; the four GPS tags are combined into one `"<lat>,<lon>"`
/// value; other known tags are copied as-is and unknown tags are dropped.
///
/// # Example
///
/// ```rust
/// use exiftool_mapper::mapper::{ExiftoolMapper, Field, FieldValue, Mapper};
/// use serde_json::json;
///
/// let raw = json!({
///     "SourceFile": "photo.jpg",
///     "ExposureTime": 0.0025,
///     "GPSLatitude": "40.333452381",
///     "GPSLatitudeRef": "N",
///     "GPSLongitude": "20.167314814",
///     "GPSLongitudeRef": "W"
/// });
///
/// let mapper = ExiftoolMapper::new();
/// let mapped = mapper.map_raw_data(raw.as_object().unwrap()).unwrap();
///
/// assert_eq!(mapped.get(Field::Exposure), Some(&FieldValue::Text("1/400".into())));
/// assert_eq!(
///     mapped.get(Field::Gps),
///     Some(&FieldValue::Text("40.333452381,-20.167314814".into()))
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExiftoolMapper {
    format: CoordinateFormat,
}

impl ExiftoolMapper {
    pub const NAME: &'static str = "exiftool";

    /// A mapper expecting numeric (`exiftool -n`) GPS values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(format: CoordinateFormat) -> Self {
        Self { format }
    }

    /// Select decimal-degree (`true`) or degree/minute/second (`false`) GPS input
    /// for subsequent calls.
    pub fn set_numeric(&mut self, numeric: bool) {
        self.format = CoordinateFormat::from_numeric(numeric);
    }

    pub fn is_numeric(&self) -> bool {
        self.format.is_numeric()
    }

    pub fn coordinate_format(&self) -> CoordinateFormat {
        self.format
    }

    /// The tag-to-field table this mapper applies, in output order.
    pub fn field_map(&self) -> &'static [(&'static str, Field)] {
        FIELD_MAP
    }

    /// Look up the canonical field for an exiftool tag name.
    pub fn field_for_tag(tag: &str) -> Option<Field> {
        FIELD_MAP
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, field)| *field)
    }

    /// Map with an explicit GPS grammar instead of the instance setting.
    pub fn map_with_format(
        &self,
        data: &RawData,
        format: CoordinateFormat,
    ) -> Result<MappedFields> {
        let mut mapped = MappedFields::new();

        for &(tag, field) in FIELD_MAP {
            if field == Field::Gps {
                if tag == GPS_LATITUDE {
                    if let Some(location) = gps::resolve(&gps_tags(data), format) {
                        mapped.insert(Field::Gps, location.into());
                    }
                }
                continue;
            }

            let Some(value) = present(data, tag) else {
                continue;
            };
            if let Some(formatted) = Formatter::for_field(field).apply(tag, value)? {
                mapped.insert(field, formatted);
            }
        }

        let dropped = data
            .keys()
            .filter(|tag| Self::field_for_tag(tag).is_none())
            .count();
        if dropped > 0 {
            log::debug!("Dropped {dropped} unmapped tag(s)");
        }

        Ok(mapped)
    }
}

impl Mapper for ExiftoolMapper {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn map_raw_data(&self, data: &RawData) -> Result<MappedFields> {
        self.map_with_format(data, self.format)
    }
}

fn gps_tags(data: &RawData) -> GpsTags<'_> {
    GpsTags {
        latitude: present(data, GPS_LATITUDE),
        latitude_ref: present(data, GPS_LATITUDE_REF),
        longitude: present(data, GPS_LONGITUDE),
        longitude_ref: present(data, GPS_LONGITUDE_REF),
    }
}

/// A tag's value, with `null` treated as missing.
fn present<'a>(data: &'a RawData, tag: &str) -> Option<&'a Value> {
    data.get(tag).filter(|v| !v.is_null())
}
