//! # JSON Decoding
//!
//! Maps a JSON document onto a message type from a [`Schema`] using the
//! proto3 JSON mapping, producing a [`DynamicMessage`].
//!
//! ## Mapping Rules
//!
//! - Object keys match a field's lowerCamelCase JSON name or its declared
//!   snake_case name. Giving both spellings of one field is an error.
//! - Unrecognized keys are skipped unless
//!   [`DecodeOptions::ignore_unknown_fields`] is off.
//! - `null` means "field absent", except for `google.protobuf.Value` and
//!   `google.protobuf.NullValue`, where it is a value.
//! - Enums take the symbolic name or an `i32`. Unknown names are rejected.
//! - Bytes take standard-alphabet base64, padded or not.
//! - 64-bit integers may be numbers or decimal strings; 32-bit integers too.
//!   Integral floats such as `1e3` are accepted for integer fields.
//! - Floating-point fields also take `"NaN"`, `"Infinity"`, `"-Infinity"`.
//! - At most one member of each oneof may be present. Oneofs flagged
//!   `required` must have exactly one.
//! - Well-known types use their special forms (see [`crate::well_known`]).
//!
//! Decoding is all-or-nothing: an error never comes with a partial value.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use thiserror::Error;

use crate::descriptor::{Cardinality, EnumDescriptor, FieldDescriptor, FieldKind, MessageDescriptor, ScalarKind};
use crate::registry::Schema;
use crate::value::{DynamicMessage, FieldValue, MapKey};
use crate::well_known::{self, WellKnown, NULL_VALUE_NAME, VALUE_NAME};

/// Standard alphabet, accepting input with or without padding.
const BASE64_INPUT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Default bound on message nesting.
pub const DEFAULT_RECURSION_LIMIT: usize = 100;

/// Decoder knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Skip object keys that match no field. When off, they are errors.
    pub ignore_unknown_fields: bool,
    /// Maximum message nesting depth.
    pub recursion_limit: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            ignore_unknown_fields: true,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

/// A document could not be decoded.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The input is not JSON.
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    /// The requested root type is not in the schema.
    #[error("unknown message type '{0}'")]
    UnknownType(String),

    /// The JSON does not fit the schema at `path`.
    #[error("{path}: {kind}")]
    Mapping { path: String, kind: MappingError },
}

impl DecodeError {
    /// Location of a mapping error, e.g. `tests[0].get.request.name`.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Mapping { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn kind(&self) -> Option<&MappingError> {
        match self {
            Self::Mapping { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

/// Why a JSON element does not fit its field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("unknown value {value:?} for enum {enum_name}")]
    UnknownEnumValue { enum_name: String, value: String },

    #[error("invalid base64: {0}")]
    InvalidBase64(String),

    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    #[error("{value} is out of range for {expected}")]
    OutOfRange { value: String, expected: &'static str },

    #[error("oneof '{oneof}' already has '{first}', cannot also set '{second}'")]
    OneofConflict {
        oneof: String,
        first: String,
        second: String,
    },

    #[error("oneof '{oneof}' requires one of: {members}")]
    MissingOneof { oneof: String, members: String },

    #[error("field '{0}' given more than once")]
    DuplicateField(String),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("invalid duration {value:?}: {reason}")]
    InvalidDuration { value: String, reason: String },

    #[error("invalid field mask path {0:?}")]
    InvalidFieldMask(String),

    #[error("invalid map key {key:?} for {expected} keys")]
    InvalidMapKey { key: String, expected: &'static str },

    #[error("null is not allowed here")]
    UnexpectedNull,

    #[error("nesting exceeds the limit of {0}")]
    RecursionLimit(usize),
}

#[derive(Debug, Clone)]
enum Segment {
    Field(String),
    Index(usize),
    Key(String),
}

/// Tracks where in the document the decoder is.
#[derive(Debug, Default)]
struct Walk {
    path: Vec<Segment>,
}

impl Walk {
    fn push(&mut self, segment: Segment) {
        self.path.push(segment);
    }

    fn pop(&mut self) {
        self.path.pop();
    }

    fn error(&self, kind: MappingError) -> DecodeError {
        DecodeError::Mapping {
            path: self.to_string(),
            kind,
        }
    }

    fn mismatch(&self, expected: &'static str, found: &Value) -> DecodeError {
        self.error(mismatch(expected, found))
    }
}

impl fmt::Display for Walk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.path.iter().enumerate() {
            match segment {
                Segment::Field(name) if i == 0 => f.write_str(name)?,
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
                Segment::Key(key) => write!(f, "[{key:?}]")?,
            }
        }
        Ok(())
    }
}

/// Decodes JSON into [`DynamicMessage`]s of a schema.
#[derive(Debug, Clone, Copy)]
pub struct JsonDecoder<'s> {
    schema: &'s Schema,
    options: DecodeOptions,
}

impl<'s> JsonDecoder<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self::with_options(schema, DecodeOptions::default())
    }

    pub fn with_options(schema: &'s Schema, options: DecodeOptions) -> Self {
        Self { schema, options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Parses `bytes` as JSON and decodes them as `type_name`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Syntax`] for malformed JSON, [`DecodeError::UnknownType`]
    /// if `type_name` is not registered, [`DecodeError::Mapping`] otherwise.
    pub fn decode_slice(&self, type_name: &str, bytes: &[u8]) -> Result<DynamicMessage, DecodeError> {
        let json: Value = serde_json::from_slice(bytes)?;
        self.decode_value(type_name, &json)
    }

    /// Decodes an already-parsed JSON value as `type_name`.
    pub fn decode_value(&self, type_name: &str, json: &Value) -> Result<DynamicMessage, DecodeError> {
        let descriptor = self
            .schema
            .message(type_name)
            .ok_or_else(|| DecodeError::UnknownType(type_name.to_string()))?;
        let mut walk = Walk::default();
        self.message(&mut walk, descriptor, json, 0)
    }

    fn message(
        &self,
        walk: &mut Walk,
        descriptor: &'static MessageDescriptor,
        json: &Value,
        depth: usize,
    ) -> Result<DynamicMessage, DecodeError> {
        self.check_depth(walk, depth)?;
        if let Some(kind) = WellKnown::of(descriptor.full_name) {
            return self.well_known(walk, kind, descriptor, json, depth);
        }

        let Value::Object(object) = json else {
            return Err(walk.mismatch("object", json));
        };

        let mut message = DynamicMessage::new(descriptor);
        let mut seen = HashSet::new();
        let mut chosen: Vec<Option<&str>> = vec![None; descriptor.oneofs.len()];

        for (key, value) in object {
            let Some(field) = self.schema.field(descriptor.full_name, key) else {
                if self.options.ignore_unknown_fields {
                    continue;
                }
                return Err(walk.error(MappingError::UnknownField(key.clone())));
            };
            if !seen.insert(field.number) {
                return Err(walk.error(MappingError::DuplicateField(field.name.to_string())));
            }
            if value.is_null() && !(field.cardinality == Cardinality::Singular && accepts_null(field.kind)) {
                continue;
            }

            walk.push(Segment::Field(key.clone()));
            let decoded = self.field(walk, field, value, depth)?;
            if let Some(index) = field.oneof {
                if let Some(first) = chosen[index] {
                    return Err(walk.error(MappingError::OneofConflict {
                        oneof: descriptor.oneofs[index].name.to_string(),
                        first: first.to_string(),
                        second: key.clone(),
                    }));
                }
                chosen[index] = Some(key.as_str());
            }
            walk.pop();

            message.set(field.number, decoded);
        }

        for (index, oneof) in descriptor.oneofs.iter().enumerate() {
            if oneof.required && chosen[index].is_none() {
                let members: Vec<String> = descriptor.oneof_members(index).map(|f| f.json_name()).collect();
                return Err(walk.error(MappingError::MissingOneof {
                    oneof: oneof.name.to_string(),
                    members: members.join(", "),
                }));
            }
        }

        Ok(message)
    }

    fn field(
        &self,
        walk: &mut Walk,
        field: &FieldDescriptor,
        json: &Value,
        depth: usize,
    ) -> Result<FieldValue, DecodeError> {
        match field.cardinality {
            Cardinality::Singular => self.single(walk, field.kind, json, depth),
            Cardinality::Repeated => {
                let Value::Array(items) = json else {
                    return Err(walk.mismatch("array", json));
                };
                let mut values = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    walk.push(Segment::Index(index));
                    if item.is_null() && !accepts_null(field.kind) {
                        return Err(walk.error(MappingError::UnexpectedNull));
                    }
                    values.push(self.single(walk, field.kind, item, depth)?);
                    walk.pop();
                }
                Ok(FieldValue::List(values))
            }
            Cardinality::Map(key_kind) => {
                let Value::Object(entries) = json else {
                    return Err(walk.mismatch("object", json));
                };
                let mut values = BTreeMap::new();
                for (key, item) in entries {
                    walk.push(Segment::Key(key.clone()));
                    let entry_key = map_key(key_kind, key).map_err(|kind| walk.error(kind))?;
                    if item.is_null() && !accepts_null(field.kind) {
                        return Err(walk.error(MappingError::UnexpectedNull));
                    }
                    let value = self.single(walk, field.kind, item, depth)?;
                    walk.pop();
                    values.insert(entry_key, value);
                }
                Ok(FieldValue::Map(values))
            }
        }
    }

    fn single(
        &self,
        walk: &mut Walk,
        kind: FieldKind,
        json: &Value,
        depth: usize,
    ) -> Result<FieldValue, DecodeError> {
        match kind {
            FieldKind::Scalar(scalar) => scalar_value(scalar, json).map_err(|kind| walk.error(kind)),
            FieldKind::Enum(name) => {
                let descriptor = self
                    .schema
                    .enumeration(name)
                    .ok_or_else(|| DecodeError::UnknownType(name.to_string()))?;
                enum_value(descriptor, json).map_err(|kind| walk.error(kind))
            }
            FieldKind::Message(name) => {
                let descriptor = self
                    .schema
                    .message(name)
                    .ok_or_else(|| DecodeError::UnknownType(name.to_string()))?;
                Ok(self.message(walk, descriptor, json, depth + 1)?.into())
            }
        }
    }

    fn well_known(
        &self,
        walk: &mut Walk,
        kind: WellKnown,
        descriptor: &'static MessageDescriptor,
        json: &Value,
        depth: usize,
    ) -> Result<DynamicMessage, DecodeError> {
        let mut message = DynamicMessage::new(descriptor);
        match kind {
            WellKnown::Timestamp => {
                let text = expect_str(walk, json)?;
                let (seconds, nanos) = well_known::parse_timestamp(text).map_err(|reason| {
                    walk.error(MappingError::InvalidTimestamp {
                        value: text.to_string(),
                        reason,
                    })
                })?;
                message.set(well_known::SECONDS_FIELD, FieldValue::I64(seconds));
                message.set(well_known::NANOS_FIELD, FieldValue::I32(nanos));
            }
            WellKnown::Duration => {
                let text = expect_str(walk, json)?;
                let (seconds, nanos) = well_known::parse_duration(text).map_err(|reason| {
                    walk.error(MappingError::InvalidDuration {
                        value: text.to_string(),
                        reason,
                    })
                })?;
                message.set(well_known::SECONDS_FIELD, FieldValue::I64(seconds));
                message.set(well_known::NANOS_FIELD, FieldValue::I32(nanos));
            }
            WellKnown::Wrapper(scalar) => {
                let value = scalar_value(scalar, json).map_err(|kind| walk.error(kind))?;
                message.set(well_known::WRAPPER_VALUE_FIELD, value);
            }
            WellKnown::FieldMask => {
                let text = expect_str(walk, json)?;
                let paths = well_known::parse_field_mask(text)
                    .map_err(|path| walk.error(MappingError::InvalidFieldMask(path)))?;
                message.set(1, FieldValue::List(paths.into_iter().map(FieldValue::String).collect()));
            }
            WellKnown::Struct => {
                let Value::Object(entries) = json else {
                    return Err(walk.mismatch("object", json));
                };
                let mut fields = BTreeMap::new();
                for (key, item) in entries {
                    walk.push(Segment::Key(key.clone()));
                    let value = self.protobuf_value(walk, item, depth + 1)?;
                    walk.pop();
                    fields.insert(MapKey::String(key.clone()), value.into());
                }
                message.set(1, FieldValue::Map(fields));
            }
            WellKnown::ListValue => {
                let Value::Array(items) = json else {
                    return Err(walk.mismatch("array", json));
                };
                let mut values = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    walk.push(Segment::Index(index));
                    values.push(self.protobuf_value(walk, item, depth + 1)?.into());
                    walk.pop();
                }
                message.set(1, FieldValue::List(values));
            }
            WellKnown::Value => return self.protobuf_value(walk, json, depth),
        }
        Ok(message)
    }

    /// Decodes any JSON value as a `google.protobuf.Value`.
    fn protobuf_value(&self, walk: &mut Walk, json: &Value, depth: usize) -> Result<DynamicMessage, DecodeError> {
        self.check_depth(walk, depth)?;
        let mut message = DynamicMessage::new(&well_known::VALUE);
        match json {
            Value::Null => message.set(1, FieldValue::Enum(0)),
            Value::Number(n) => {
                let number = n
                    .as_f64()
                    .ok_or_else(|| walk.error(MappingError::InvalidNumber(n.to_string())))?;
                message.set(2, FieldValue::F64(number));
            }
            Value::String(s) => message.set(3, FieldValue::String(s.clone())),
            Value::Bool(b) => message.set(4, FieldValue::Bool(*b)),
            Value::Object(_) => {
                let inner = self.well_known(walk, WellKnown::Struct, &well_known::STRUCT, json, depth + 1)?;
                message.set(5, inner.into());
            }
            Value::Array(_) => {
                let inner = self.well_known(walk, WellKnown::ListValue, &well_known::LIST_VALUE, json, depth + 1)?;
                message.set(6, inner.into());
            }
        }
        Ok(message)
    }

    fn check_depth(&self, walk: &Walk, depth: usize) -> Result<(), DecodeError> {
        if depth > self.options.recursion_limit {
            return Err(walk.error(MappingError::RecursionLimit(self.options.recursion_limit)));
        }
        Ok(())
    }
}

/// Whether `null` is a value (rather than "absent") for this kind.
fn accepts_null(kind: FieldKind) -> bool {
    match kind {
        FieldKind::Enum(name) => name == NULL_VALUE_NAME,
        FieldKind::Message(name) => name == VALUE_NAME,
        FieldKind::Scalar(_) => false,
    }
}

fn expect_str<'j>(walk: &Walk, json: &'j Value) -> Result<&'j str, DecodeError> {
    json.as_str().ok_or_else(|| walk.mismatch("string", json))
}

fn json_kind(json: &Value) -> &'static str {
    match json {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(expected: &'static str, found: &Value) -> MappingError {
    MappingError::TypeMismatch {
        expected,
        found: json_kind(found),
    }
}

fn out_of_range(value: i128, expected: &'static str) -> MappingError {
    MappingError::OutOfRange {
        value: value.to_string(),
        expected,
    }
}

fn scalar_value(kind: ScalarKind, json: &Value) -> Result<FieldValue, MappingError> {
    match kind {
        ScalarKind::Bool => match json {
            Value::Bool(b) => Ok(FieldValue::Bool(*b)),
            other => Err(mismatch("bool", other)),
        },
        ScalarKind::String => match json {
            Value::String(s) => Ok(FieldValue::String(s.clone())),
            other => Err(mismatch("string", other)),
        },
        ScalarKind::Bytes => match json {
            Value::String(s) => BASE64_INPUT
                .decode(s)
                .map(FieldValue::Bytes)
                .map_err(|e| MappingError::InvalidBase64(e.to_string())),
            other => Err(mismatch("base64 string", other)),
        },
        ScalarKind::Int32 => {
            let n = integer(json)?;
            i32::try_from(n).map(FieldValue::I32).map_err(|_| out_of_range(n, "int32"))
        }
        ScalarKind::Int64 => {
            let n = integer(json)?;
            i64::try_from(n).map(FieldValue::I64).map_err(|_| out_of_range(n, "int64"))
        }
        ScalarKind::Uint32 => {
            let n = integer(json)?;
            u32::try_from(n).map(FieldValue::U32).map_err(|_| out_of_range(n, "uint32"))
        }
        ScalarKind::Uint64 => {
            let n = integer(json)?;
            u64::try_from(n).map(FieldValue::U64).map_err(|_| out_of_range(n, "uint64"))
        }
        ScalarKind::Double => float(json).map(FieldValue::F64),
        ScalarKind::Float => {
            let value = float(json)?;
            // Rounding to nearest keeps the shortest decimal form of f32::MAX in range.
            let narrowed = value as f32;
            if value.is_finite() && narrowed.is_infinite() {
                return Err(MappingError::OutOfRange {
                    value: value.to_string(),
                    expected: "float",
                });
            }
            Ok(FieldValue::F32(narrowed))
        }
    }
}

fn enum_value(descriptor: &EnumDescriptor, json: &Value) -> Result<FieldValue, MappingError> {
    match json {
        Value::String(name) => descriptor
            .value_by_name(name)
            .map(|v| FieldValue::Enum(v.number))
            .ok_or_else(|| MappingError::UnknownEnumValue {
                enum_name: descriptor.full_name.to_string(),
                value: name.clone(),
            }),
        Value::Number(_) => {
            let n = integer(json)?;
            i32::try_from(n).map(FieldValue::Enum).map_err(|_| out_of_range(n, "enum"))
        }
        Value::Null if descriptor.full_name == NULL_VALUE_NAME => Ok(FieldValue::Enum(0)),
        other => Err(mismatch("enum name or number", other)),
    }
}

fn integer(json: &Value) -> Result<i128, MappingError> {
    match json {
        Value::Number(n) => number_to_integer(n),
        Value::String(text) => integer_text(text),
        other => Err(mismatch("integer", other)),
    }
}

fn number_to_integer(n: &Number) -> Result<i128, MappingError> {
    if let Some(i) = n.as_i64() {
        return Ok(i.into());
    }
    if let Some(u) = n.as_u64() {
        return Ok(u.into());
    }
    match n.as_f64() {
        Some(f) => float_to_integer(f, &n.to_string()),
        None => Err(MappingError::InvalidNumber(n.to_string())),
    }
}

fn integer_text(text: &str) -> Result<i128, MappingError> {
    if let Ok(n) = text.parse::<i128>() {
        return Ok(n);
    }
    if !is_numeric_text(text) {
        return Err(MappingError::InvalidNumber(text.to_string()));
    }
    let f: f64 = text
        .parse()
        .map_err(|_| MappingError::InvalidNumber(text.to_string()))?;
    float_to_integer(f, text)
}

fn float_to_integer(f: f64, text: &str) -> Result<i128, MappingError> {
    if !f.is_finite() || f.fract() != 0.0 {
        return Err(MappingError::InvalidNumber(text.to_string()));
    }
    // Anything at or past 2^64 is out of range for every integer field.
    if f.abs() >= 18_446_744_073_709_551_616.0 {
        return Err(MappingError::OutOfRange {
            value: text.to_string(),
            expected: "integer",
        });
    }
    Ok(f as i128)
}

fn float(json: &Value) -> Result<f64, MappingError> {
    match json {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| MappingError::InvalidNumber(n.to_string())),
        Value::String(text) => match text.as_str() {
            "NaN" => Ok(f64::NAN),
            "Infinity" => Ok(f64::INFINITY),
            "-Infinity" => Ok(f64::NEG_INFINITY),
            text if is_numeric_text(text) => match text.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(value),
                Ok(_) => Err(MappingError::OutOfRange {
                    value: text.to_string(),
                    expected: "double",
                }),
                Err(_) => Err(MappingError::InvalidNumber(text.to_string())),
            },
            text => Err(MappingError::InvalidNumber(text.to_string())),
        },
        other => Err(mismatch("number", other)),
    }
}

/// Rejects spellings like `inf` or `nan` that Rust's parser would accept.
fn is_numeric_text(text: &str) -> bool {
    !text.is_empty()
        && text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
}

fn map_key(kind: ScalarKind, key: &str) -> Result<MapKey, MappingError> {
    let invalid = || MappingError::InvalidMapKey {
        key: key.to_string(),
        expected: kind.label(),
    };
    match kind {
        ScalarKind::String => Ok(MapKey::String(key.to_string())),
        ScalarKind::Bool => match key {
            "true" => Ok(MapKey::Bool(true)),
            "false" => Ok(MapKey::Bool(false)),
            _ => Err(invalid()),
        },
        ScalarKind::Int32 => key
            .parse::<i32>()
            .map(|n| MapKey::Int(n.into()))
            .map_err(|_| invalid()),
        ScalarKind::Int64 => key.parse::<i64>().map(MapKey::Int).map_err(|_| invalid()),
        ScalarKind::Uint32 => key
            .parse::<u32>()
            .map(|n| MapKey::Uint(n.into()))
            .map_err(|_| invalid()),
        ScalarKind::Uint64 => key.parse::<u64>().map(MapKey::Uint).map_err(|_| invalid()),
        ScalarKind::Double | ScalarKind::Float | ScalarKind::Bytes => Err(invalid()),
    }
}
