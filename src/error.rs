use thiserror::Error;

/// Failures a mapper reports for a whole call.
///
/// Most malformed input is tolerated: unknown tags are dropped, incomplete or
/// inconsistent GPS data is omitted, and formatters pass values through.
/// A creation date that does not match the extraction tool's date pattern is
/// the one case surfaced to the caller, since consumers rely on a valid
/// structured date whenever that field is present.
#[derive(Debug, Error)]
pub enum MapperError {
    #[error("{tag}: invalid date '{value}': {source}")]
    InvalidDate {
        tag: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("{tag}: expected a date string, got {value}")]
    NonTextDate { tag: &'static str, value: String },
}
