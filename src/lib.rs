//! # exiftool-mapper
//!
//! Normalize the untyped tag output of [exiftool](https://exiftool.org) into a fixed set
//! of canonical, typed metadata fields: apertures as `f/2.8`, exposure times as `1/400`,
//! creation dates as structured date-times, and GPS tags folded into one
//! `"<lat>,<lon>"` decimal-degree pair.
//!
//! ## Quick Start
//!
//! ```rust
//! use exiftool_mapper::mapper::{ExiftoolMapper, Field, FieldValue, Mapper, RawData};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), exiftool_mapper::MapperError> {
//! // One object of `exiftool -j -n photo.jpg` output
//! let raw: RawData = json!({
//!     "SourceFile": "photo.jpg",
//!     "Model": "X100V",
//!     "Aperture": 2.8,
//!     "FocalLength": "23.0 mm",
//!     "CreateDate": "2015:04:01 12:11:09",
//! })
//! .as_object()
//! .cloned()
//! .unwrap_or_default();
//!
//! let mapped = ExiftoolMapper::new().map_raw_data(&raw)?;
//!
//! assert_eq!(mapped.get(Field::Aperture), Some(&FieldValue::Text("f/2.8".into())));
//! assert_eq!(mapped.get(Field::FocalLength), Some(&FieldValue::Integer(23)));
//! assert!(mapped.get(Field::CreationDate).and_then(FieldValue::as_datetime).is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## GPS input
//!
//! Exiftool prints GPS coordinates as decimal degrees when run with `-n` and as
//! `40 deg 20' 0.42857" N` otherwise. [`ExiftoolMapper`](mapper::ExiftoolMapper)
//! expects the numeric form by default; call `set_numeric(false)` or use
//! [`CoordinateFormat::Dms`](mapper::CoordinateFormat) for the other. Values in the
//! wrong form are dropped rather than reported.
//!
//! ## Modules
//!
//! - [`mapper`]: Mapper trait, canonical fields, and the exiftool mapper
//! - [`config`]: Configuration types and loading/saving
//! - [`error`]: Errors a mapper reports

pub mod config;
pub mod error;
pub mod mapper;

pub use error::MapperError;
