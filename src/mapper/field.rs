use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical metadata fields every mapper normalizes into.
///
/// The set is closed: mappers translate their own tag vocabulary into these
/// identifiers and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Aperture,
    Author,
    Camera,
    Caption,
    ColorSpace,
    Copyright,
    CreationDate,
    Credit,
    Exposure,
    FileSize,
    FocalLength,
    FocusDistance,
    Headline,
    Height,
    HorizontalResolution,
    Iso,
    JobTitle,
    Keywords,
    MimeType,
    Orientation,
    Software,
    Source,
    Title,
    VerticalResolution,
    Width,
    /// Combined `"<lat>,<lon>"` decimal-degree pair.
    Gps,
}

impl Field {
    pub const ALL: [Field; 26] = [
        Field::Aperture,
        Field::Author,
        Field::Camera,
        Field::Caption,
        Field::ColorSpace,
        Field::Copyright,
        Field::CreationDate,
        Field::Credit,
        Field::Exposure,
        Field::FileSize,
        Field::FocalLength,
        Field::FocusDistance,
        Field::Headline,
        Field::Height,
        Field::HorizontalResolution,
        Field::Iso,
        Field::JobTitle,
        Field::Keywords,
        Field::MimeType,
        Field::Orientation,
        Field::Software,
        Field::Source,
        Field::Title,
        Field::VerticalResolution,
        Field::Width,
        Field::Gps,
    ];

    /// Stable identifier, identical to the serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Aperture => "aperture",
            Field::Author => "author",
            Field::Camera => "camera",
            Field::Caption => "caption",
            Field::ColorSpace => "color_space",
            Field::Copyright => "copyright",
            Field::CreationDate => "creation_date",
            Field::Credit => "credit",
            Field::Exposure => "exposure",
            Field::FileSize => "file_size",
            Field::FocalLength => "focal_length",
            Field::FocusDistance => "focus_distance",
            Field::Headline => "headline",
            Field::Height => "height",
            Field::HorizontalResolution => "horizontal_resolution",
            Field::Iso => "iso",
            Field::JobTitle => "job_title",
            Field::Keywords => "keywords",
            Field::MimeType => "mime_type",
            Field::Orientation => "orientation",
            Field::Software => "software",
            Field::Source => "source",
            Field::Title => "title",
            Field::VerticalResolution => "vertical_resolution",
            Field::Width => "width",
            Field::Gps => "gps",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
