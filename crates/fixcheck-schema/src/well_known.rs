//! # Well-Known Types
//!
//! Descriptors for the `google.protobuf` types that have a special JSON form,
//! plus the string conversions for `Timestamp`, `Duration`, and `FieldMask`.
//!
//! In memory these types are ordinary [`DynamicMessage`](crate::DynamicMessage)s
//! with their declared fields (`seconds`/`nanos`, `value`, ...). Only the JSON
//! form differs, and [`WellKnown::of`] tells the decoder and encoder when to
//! switch to it.
//!
//! | Type | JSON form |
//! |---|---|
//! | `Timestamp` | `"1972-01-01T10:00:20.021Z"` |
//! | `Duration` | `"1.000340012s"` |
//! | wrappers | the bare wrapped value |
//! | `Struct` / `ListValue` / `Value` | native object / array / any value |
//! | `FieldMask` | `"user.displayName,photo"` |

use chrono::{DateTime, SecondsFormat, Utc};

use crate::descriptor::{
    EnumDescriptor, EnumValue, FieldDescriptor as F, MessageDescriptor, OneofDescriptor, ScalarKind as S,
};

pub const TIMESTAMP_NAME: &str = "google.protobuf.Timestamp";
pub const DURATION_NAME: &str = "google.protobuf.Duration";
pub const STRUCT_NAME: &str = "google.protobuf.Struct";
pub const VALUE_NAME: &str = "google.protobuf.Value";
pub const LIST_VALUE_NAME: &str = "google.protobuf.ListValue";
pub const NULL_VALUE_NAME: &str = "google.protobuf.NullValue";
pub const FIELD_MASK_NAME: &str = "google.protobuf.FieldMask";
pub const EMPTY_NAME: &str = "google.protobuf.Empty";

/// Smallest valid `Timestamp.seconds`: `0001-01-01T00:00:00Z`.
pub const MIN_TIMESTAMP_SECONDS: i64 = -62_135_596_800;
/// Largest valid `Timestamp.seconds`: `9999-12-31T23:59:59Z`.
pub const MAX_TIMESTAMP_SECONDS: i64 = 253_402_300_799;
/// Bound on `|Duration.seconds|`, roughly 10,000 years.
pub const MAX_DURATION_SECONDS: i64 = 315_576_000_000;

const NANOS_PER_SECOND: i32 = 1_000_000_000;

/// Field numbers shared by `Timestamp` and `Duration`.
pub const SECONDS_FIELD: u32 = 1;
pub const NANOS_FIELD: u32 = 2;
/// Field number of `value` in every wrapper type.
pub const WRAPPER_VALUE_FIELD: u32 = 1;

pub static TIMESTAMP: MessageDescriptor = MessageDescriptor {
    full_name: TIMESTAMP_NAME,
    fields: &[F::scalar(1, "seconds", S::Int64), F::scalar(2, "nanos", S::Int32)],
    oneofs: &[],
};

pub static DURATION: MessageDescriptor = MessageDescriptor {
    full_name: DURATION_NAME,
    fields: &[F::scalar(1, "seconds", S::Int64), F::scalar(2, "nanos", S::Int32)],
    oneofs: &[],
};

macro_rules! wrapper {
    ($ident:ident, $name:literal, $kind:expr) => {
        pub static $ident: MessageDescriptor = MessageDescriptor {
            full_name: $name,
            fields: &[F::scalar(1, "value", $kind)],
            oneofs: &[],
        };
    };
}

wrapper!(DOUBLE_VALUE, "google.protobuf.DoubleValue", S::Double);
wrapper!(FLOAT_VALUE, "google.protobuf.FloatValue", S::Float);
wrapper!(INT64_VALUE, "google.protobuf.Int64Value", S::Int64);
wrapper!(UINT64_VALUE, "google.protobuf.UInt64Value", S::Uint64);
wrapper!(INT32_VALUE, "google.protobuf.Int32Value", S::Int32);
wrapper!(UINT32_VALUE, "google.protobuf.UInt32Value", S::Uint32);
wrapper!(BOOL_VALUE, "google.protobuf.BoolValue", S::Bool);
wrapper!(STRING_VALUE, "google.protobuf.StringValue", S::String);
wrapper!(BYTES_VALUE, "google.protobuf.BytesValue", S::Bytes);

pub static STRUCT: MessageDescriptor = MessageDescriptor {
    full_name: STRUCT_NAME,
    fields: &[F::message(1, "fields", VALUE_NAME).map(S::String)],
    oneofs: &[],
};

pub static VALUE: MessageDescriptor = MessageDescriptor {
    full_name: VALUE_NAME,
    fields: &[
        F::enumeration(1, "null_value", NULL_VALUE_NAME).in_oneof(0),
        F::scalar(2, "number_value", S::Double).in_oneof(0),
        F::scalar(3, "string_value", S::String).in_oneof(0),
        F::scalar(4, "bool_value", S::Bool).in_oneof(0),
        F::message(5, "struct_value", STRUCT_NAME).in_oneof(0),
        F::message(6, "list_value", LIST_VALUE_NAME).in_oneof(0),
    ],
    oneofs: &[OneofDescriptor::optional("kind")],
};

pub static LIST_VALUE: MessageDescriptor = MessageDescriptor {
    full_name: LIST_VALUE_NAME,
    fields: &[F::message(1, "values", VALUE_NAME).repeated()],
    oneofs: &[],
};

pub static FIELD_MASK: MessageDescriptor = MessageDescriptor {
    full_name: FIELD_MASK_NAME,
    fields: &[F::scalar(1, "paths", S::String).repeated()],
    oneofs: &[],
};

pub static EMPTY: MessageDescriptor = MessageDescriptor {
    full_name: EMPTY_NAME,
    fields: &[],
    oneofs: &[],
};

pub static NULL_VALUE: EnumDescriptor = EnumDescriptor {
    full_name: NULL_VALUE_NAME,
    values: &[EnumValue::new("NULL_VALUE", 0)],
};

pub static MESSAGES: &[&MessageDescriptor] = &[
    &TIMESTAMP,
    &DURATION,
    &DOUBLE_VALUE,
    &FLOAT_VALUE,
    &INT64_VALUE,
    &UINT64_VALUE,
    &INT32_VALUE,
    &UINT32_VALUE,
    &BOOL_VALUE,
    &STRING_VALUE,
    &BYTES_VALUE,
    &STRUCT,
    &VALUE,
    &LIST_VALUE,
    &FIELD_MASK,
    &EMPTY,
];

pub static ENUMS: &[&EnumDescriptor] = &[&NULL_VALUE];

/// Message types whose JSON form is not a plain object of their fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellKnown {
    Timestamp,
    Duration,
    /// A wrapper around the given scalar.
    Wrapper(S),
    Struct,
    Value,
    ListValue,
    FieldMask,
}

impl WellKnown {
    /// Classifies a message by fully-qualified name. `Empty` is absent: its
    /// JSON form is the ordinary `{}`.
    pub fn of(full_name: &str) -> Option<Self> {
        let kind = match full_name {
            TIMESTAMP_NAME => Self::Timestamp,
            DURATION_NAME => Self::Duration,
            STRUCT_NAME => Self::Struct,
            VALUE_NAME => Self::Value,
            LIST_VALUE_NAME => Self::ListValue,
            FIELD_MASK_NAME => Self::FieldMask,
            "google.protobuf.DoubleValue" => Self::Wrapper(S::Double),
            "google.protobuf.FloatValue" => Self::Wrapper(S::Float),
            "google.protobuf.Int64Value" => Self::Wrapper(S::Int64),
            "google.protobuf.UInt64Value" => Self::Wrapper(S::Uint64),
            "google.protobuf.Int32Value" => Self::Wrapper(S::Int32),
            "google.protobuf.UInt32Value" => Self::Wrapper(S::Uint32),
            "google.protobuf.BoolValue" => Self::Wrapper(S::Bool),
            "google.protobuf.StringValue" => Self::Wrapper(S::String),
            "google.protobuf.BytesValue" => Self::Wrapper(S::Bytes),
            _ => return None,
        };
        Some(kind)
    }
}

/// Parses an RFC 3339 timestamp into `(seconds, nanos)` since the Unix epoch.
///
/// Any UTC offset is accepted. At most nine fractional digits are allowed
/// and the instant must fall within years 0001 through 9999.
pub fn parse_timestamp(text: &str) -> Result<(i64, i32), String> {
    if fraction_digits(text) > 9 {
        return Err("more than nine fractional digits".to_string());
    }
    let parsed = DateTime::parse_from_rfc3339(text).map_err(|e| e.to_string())?;
    let seconds = parsed.timestamp();
    let nanos = parsed.timestamp_subsec_nanos();
    if nanos >= NANOS_PER_SECOND as u32 {
        return Err("leap seconds are not representable".to_string());
    }
    if !(MIN_TIMESTAMP_SECONDS..=MAX_TIMESTAMP_SECONDS).contains(&seconds) {
        return Err("outside 0001-01-01T00:00:00Z..9999-12-31T23:59:59Z".to_string());
    }
    Ok((seconds, nanos as i32))
}

/// Number of digits after the seconds' decimal point, if any.
fn fraction_digits(text: &str) -> usize {
    let Some(time_start) = text.find(|c| c == 'T' || c == 't') else {
        return 0;
    };
    let time = &text[time_start..];
    match time.find('.') {
        Some(dot) => time[dot + 1..].chars().take_while(char::is_ascii_digit).count(),
        None => 0,
    }
}

/// Formats `(seconds, nanos)` in UTC with a `Z` suffix and 0, 3, 6, or 9
/// fractional digits.
pub fn format_timestamp(seconds: i64, nanos: i32) -> Result<String, String> {
    if !(MIN_TIMESTAMP_SECONDS..=MAX_TIMESTAMP_SECONDS).contains(&seconds) {
        return Err(format!("seconds {seconds} out of range"));
    }
    if !(0..NANOS_PER_SECOND).contains(&nanos) {
        return Err(format!("nanos {nanos} out of range"));
    }
    let instant = DateTime::<Utc>::from_timestamp(seconds, nanos as u32)
        .ok_or_else(|| format!("seconds {seconds} out of range"))?;
    let format = if nanos == 0 {
        SecondsFormat::Secs
    } else if nanos % 1_000_000 == 0 {
        SecondsFormat::Millis
    } else if nanos % 1_000 == 0 {
        SecondsFormat::Micros
    } else {
        SecondsFormat::Nanos
    };
    Ok(instant.to_rfc3339_opts(format, true))
}

/// Parses a duration such as `"-1.5s"` into `(seconds, nanos)`. Both parts
/// carry the same sign.
pub fn parse_duration(text: &str) -> Result<(i64, i32), String> {
    let body = text
        .strip_suffix('s')
        .ok_or_else(|| "missing 's' suffix".to_string())?;
    let (negative, body) = match body.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, body),
    };
    let (whole, fraction) = match body.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (body, ""),
    };
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err("expected decimal seconds".to_string());
    }
    if body.contains('.') && fraction.is_empty() {
        return Err("empty fraction".to_string());
    }
    if fraction.len() > 9 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err("fraction must be at most nine digits".to_string());
    }

    let seconds: i64 = whole.parse().map_err(|_| "seconds out of range".to_string())?;
    if seconds > MAX_DURATION_SECONDS {
        return Err("seconds out of range".to_string());
    }
    let nanos: i32 = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{fraction:0<9}");
        padded.parse().map_err(|_| "invalid fraction".to_string())?
    };

    if negative {
        Ok((-seconds, -nanos))
    } else {
        Ok((seconds, nanos))
    }
}

/// Formats a duration with 0, 3, 6, or 9 fractional digits.
pub fn format_duration(seconds: i64, nanos: i32) -> Result<String, String> {
    if seconds.unsigned_abs() > MAX_DURATION_SECONDS as u64 {
        return Err(format!("seconds {seconds} out of range"));
    }
    if nanos.unsigned_abs() >= NANOS_PER_SECOND as u32 {
        return Err(format!("nanos {nanos} out of range"));
    }
    if (seconds < 0 && nanos > 0) || (seconds > 0 && nanos < 0) {
        return Err("seconds and nanos have different signs".to_string());
    }

    let sign = if seconds < 0 || nanos < 0 { "-" } else { "" };
    let (seconds, nanos) = (seconds.unsigned_abs(), nanos.unsigned_abs());
    let fraction = if nanos == 0 {
        String::new()
    } else if nanos % 1_000_000 == 0 {
        format!(".{:03}", nanos / 1_000_000)
    } else if nanos % 1_000 == 0 {
        format!(".{:06}", nanos / 1_000)
    } else {
        format!(".{nanos:09}")
    };
    Ok(format!("{sign}{seconds}{fraction}s"))
}

/// Splits a JSON field mask into snake_case paths. The JSON form must use
/// lowerCamelCase, so underscores are rejected.
pub fn parse_field_mask(text: &str) -> Result<Vec<String>, String> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .map(|path| {
            if path.is_empty() || path.contains('_') {
                Err(path.to_string())
            } else {
                Ok(crate::descriptor::snake_case(path))
            }
        })
        .collect()
}

/// Joins snake_case paths into the JSON field mask form.
pub fn format_field_mask(paths: &[&str]) -> Result<String, String> {
    let mut out = Vec::with_capacity(paths.len());
    for path in paths {
        let camel: Vec<String> = path.split('.').map(crate::descriptor::lower_camel).collect();
        let camel = camel.join(".");
        // Paths that do not survive the round trip cannot be expressed.
        let back: Vec<String> = camel.split('.').map(crate::descriptor::snake_case).collect();
        if back.join(".") != *path {
            return Err((*path).to_string());
        }
        out.push(camel);
    }
    Ok(out.join(","))
}
