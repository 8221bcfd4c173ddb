//! Raw-tag to canonical-field mapping.
//!
//! A [`Mapper`] turns one flat object of tool-specific tags ([`RawData`]) into
//! an ordered set of canonical [`Field`]s ([`MappedFields`]). The crate ships
//! one implementation, [`ExiftoolMapper`], for exiftool's JSON output.

mod exiftool;
mod field;

pub use exiftool::{CoordinateFormat, ExiftoolMapper, FIELD_MAP, GPS_TAGS};
pub use field::Field;

use chrono::NaiveDateTime;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::error::MapperError;

pub type Result<T> = std::result::Result<T, MapperError>;

/// One object of raw tags as emitted by the extraction tool.
pub type RawData = serde_json::Map<String, serde_json::Value>;

/// Pattern the extraction tool uses for date-time tags.
pub const DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Trait for raw-tag mappers.
///
/// Consumers depend on this trait rather than on a concrete mapper so that
/// tag sources with different vocabularies can be swapped in.
///
/// # Example
///
/// ```rust
/// use exiftool_mapper::mapper::{ExiftoolMapper, Field, FieldValue, Mapper, RawData};
///
/// let mapper: Box<dyn Mapper> = Box::new(ExiftoolMapper::new());
/// let mut raw = RawData::new();
/// raw.insert("Model".into(), "X100V".into());
///
/// let mapped = mapper.map_raw_data(&raw).unwrap();
/// assert_eq!(mapped.get(Field::Camera), Some(&FieldValue::Text("X100V".into())));
/// ```
pub trait Mapper: Send + Sync {
    /// The display name of this mapper (e.g., "exiftool").
    fn name(&self) -> &str;
    /// Map one raw tag object into canonical fields.
    fn map_raw_data(&self, data: &RawData) -> Result<MappedFields>;
}

/// A normalized field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    DateTime(NaiveDateTime),
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Convert a raw JSON value unchanged in meaning. `null` counts as absent.
    pub fn from_raw(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Text(b.to_string())),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(Self::Integer(i)),
                None => n.as_f64().map(Self::Float),
            },
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(items) => Some(Self::List(
                items.iter().filter_map(Self::from_raw).collect(),
            )),
            Value::Object(_) => Some(Self::Text(value.to_string())),
        }
    }

    pub fn as_datetime(&self) -> Option<&NaiveDateTime> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::DateTime(dt) => serializer.collect_str(&dt.format(DATE_FORMAT)),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// Canonical fields produced by a mapper, in the mapper's declared order.
///
/// Each field appears at most once. Serializes as a JSON object keyed by
/// [`Field::as_str`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedFields {
    entries: Vec<(Field, FieldValue)>,
}

impl MappedFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field. A field already present keeps its position and takes the new value.
    pub fn insert(&mut self, field: Field, value: FieldValue) {
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    pub fn first(&self) -> Option<&FieldValue> {
        self.entries.first().map(|(_, v)| v)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.entries.iter().map(|(f, _)| *f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldValue)> {
        self.entries.iter().map(|(f, v)| (*f, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for MappedFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, value) in &self.entries {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.end()
    }
}
