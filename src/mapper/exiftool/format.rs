use chrono::NaiveDateTime;
use serde_json::Value;

use crate::error::MapperError;
use crate::mapper::{DATE_FORMAT, Field, FieldValue, Result};

// Display precision exiftool-style consumers expect for derived decimals
const SIGNIFICANT_DIGITS: i32 = 14;

/// Per-field value transformation.
///
/// Every formatter except [`Formatter::CreationDate`] is lenient: input it
/// cannot interpret is passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Formatter {
    Identity,
    Aperture,
    FocusDistance,
    CreationDate,
    ExposureTime,
    FocalLength,
}

impl Formatter {
    pub(super) fn for_field(field: Field) -> Self {
        match field {
            Field::Aperture => Self::Aperture,
            Field::FocusDistance => Self::FocusDistance,
            Field::CreationDate => Self::CreationDate,
            Field::Exposure => Self::ExposureTime,
            Field::FocalLength => Self::FocalLength,
            _ => Self::Identity,
        }
    }

    /// Format one raw value. Returns `Ok(None)` when the value counts as absent.
    pub(super) fn apply(self, tag: &'static str, value: &Value) -> Result<Option<FieldValue>> {
        let formatted = match self {
            Self::Identity => None,
            Self::Aperture => number(value).map(|v| {
                // Half away from zero; `{:.1}` alone rounds ties to even.
                let v = (v * 10.0).round() / 10.0;
                FieldValue::Text(format!("f/{v:.1}"))
            }),
            Self::FocusDistance => focus_distance(value),
            Self::CreationDate => Some(creation_date(tag, value)?),
            Self::ExposureTime => exposure_time(value),
            Self::FocalLength => leading_number(value).map(numeric),
        };

        Ok(formatted.or_else(|| FieldValue::from_raw(value)))
    }
}

/// Render a decimal with up to 14 significant digits, trailing zeros trimmed.
pub(super) fn decimal(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs().log10().floor() as i32 + 1;
    let decimals = (SIGNIFICANT_DIGITS - magnitude).max(0) as usize;
    let s = format!("{value:.decimals$}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// A JSON number or a string holding only a number.
fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// The leading numeral of a number or string, e.g. `"0.80"` from `"0.80 m"` or `"15mm"`.
fn leading_token(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => numeric_prefix(s.trim_start()).map(str::to_string),
        _ => None,
    }
}

/// Optional sign, digits, and at most one decimal point.
fn numeric_prefix(s: &str) -> Option<&str> {
    let mut end = 0;
    let mut digits = false;
    let mut point = false;
    for (i, c) in s.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '0'..='9' => digits = true,
            '.' if !point => point = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    digits.then(|| &s[..end])
}

fn leading_number(value: &Value) -> Option<f64> {
    leading_token(value)?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn numeric(value: f64) -> FieldValue {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        FieldValue::Integer(value as i64)
    } else {
        FieldValue::Float(value)
    }
}

fn focus_distance(value: &Value) -> Option<FieldValue> {
    let token = leading_token(value)?;
    token.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(FieldValue::Text(format!("{token}m")))
}

fn exposure_time(value: &Value) -> Option<FieldValue> {
    let seconds = number(value).or_else(|| fraction(value.as_str()?))?;
    if seconds <= 0.0 {
        return None;
    }

    if seconds < 1.0 {
        let denominator = (1.0 / seconds).round() as i64;
        Some(FieldValue::Text(format!("1/{denominator}")))
    } else {
        Some(FieldValue::Text(decimal(seconds)))
    }
}

/// Parse `"1/400"` style strings.
fn fraction(s: &str) -> Option<f64> {
    let (numerator, denominator) = s.trim().split_once('/')?;
    let numerator: f64 = numerator.trim().parse().ok()?;
    let denominator: f64 = denominator.trim().parse().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator).filter(|v| v.is_finite())
}

fn creation_date(tag: &'static str, value: &Value) -> Result<FieldValue> {
    let Value::String(s) = value else {
        return Err(MapperError::NonTextDate {
            tag,
            value: value.to_string(),
        });
    };

    NaiveDateTime::parse_from_str(s, DATE_FORMAT)
        .map(FieldValue::DateTime)
        .map_err(|source| MapperError::InvalidDate {
            tag,
            value: s.clone(),
            source,
        })
}
