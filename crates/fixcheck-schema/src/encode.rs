//! # JSON Encoding
//!
//! Renders a [`DynamicMessage`] back to canonical proto3 JSON: lowerCamelCase
//! keys (sorted, as `serde_json::Map` keeps them), 64-bit integers as strings, enums by name,
//! bytes as padded standard base64, and the special forms of the well-known
//! types. Output of the encoder always decodes back to an equal message.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::descriptor::{Cardinality, FieldDescriptor, FieldKind, MessageDescriptor, ScalarKind};
use crate::registry::Schema;
use crate::value::{DynamicMessage, FieldValue, MapKey};
use crate::well_known::{self, WellKnown, NULL_VALUE_NAME};

/// A message cannot be represented as JSON.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("unknown message type '{0}'")]
    UnknownType(String),

    #[error("{type_name}.{field}: {reason}")]
    Invalid {
        type_name: String,
        field: String,
        reason: String,
    },

    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Encodes [`DynamicMessage`]s of a schema as JSON.
#[derive(Debug, Clone, Copy)]
pub struct JsonEncoder<'s> {
    schema: &'s Schema,
}

impl<'s> JsonEncoder<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    /// Encodes `message` as a JSON value.
    ///
    /// # Errors
    ///
    /// Fails if the message type is unknown, a field holds a value of the
    /// wrong shape, or a well-known type holds an unrepresentable value
    /// (a timestamp outside years 1..=9999, a `Value` with no kind set).
    pub fn encode(&self, message: &DynamicMessage) -> Result<Value, EncodeError> {
        let descriptor = self
            .schema
            .message(message.type_name())
            .ok_or_else(|| EncodeError::UnknownType(message.type_name().to_string()))?;

        if let Some(kind) = WellKnown::of(descriptor.full_name) {
            return self.well_known(kind, descriptor, message);
        }

        for (number, _) in message.fields() {
            if descriptor.field_by_number(number).is_none() {
                return Err(invalid(descriptor, &number.to_string(), "field number not declared"));
            }
        }

        let mut object = Map::new();
        for field in descriptor.fields {
            let Some(value) = message.get(field.number) else {
                continue;
            };
            let json = self.field(descriptor, field, value)?;
            let key = self
                .schema
                .json_name(descriptor.full_name, field.number)
                .map_or_else(|| field.json_name(), str::to_string);
            object.insert(key, json);
        }
        Ok(Value::Object(object))
    }

    /// Encodes `message` as pretty-printed JSON text.
    pub fn encode_to_string_pretty(&self, message: &DynamicMessage) -> Result<String, EncodeError> {
        let json = self.encode(message)?;
        Ok(serde_json::to_string_pretty(&json)?)
    }

    fn field(
        &self,
        descriptor: &MessageDescriptor,
        field: &FieldDescriptor,
        value: &FieldValue,
    ) -> Result<Value, EncodeError> {
        match (field.cardinality, value) {
            (Cardinality::Singular, value) => self.single(descriptor, field, value),
            (Cardinality::Repeated, FieldValue::List(items)) => items
                .iter()
                .map(|item| self.single(descriptor, field, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            (Cardinality::Map(_), FieldValue::Map(entries)) => {
                let mut object = Map::new();
                for (key, item) in entries {
                    object.insert(map_key_text(key), self.single(descriptor, field, item)?);
                }
                Ok(Value::Object(object))
            }
            (_, other) => Err(invalid(
                descriptor,
                field.name,
                &format!("{} value in a {} field", other.label(), cardinality_label(field.cardinality)),
            )),
        }
    }

    fn single(
        &self,
        descriptor: &MessageDescriptor,
        field: &FieldDescriptor,
        value: &FieldValue,
    ) -> Result<Value, EncodeError> {
        match field.kind {
            FieldKind::Scalar(scalar) => {
                scalar_json(scalar, value).ok_or_else(|| wrong_kind(descriptor, field.name, scalar.label(), value))
            }
            FieldKind::Enum(name) => {
                let FieldValue::Enum(number) = value else {
                    return Err(wrong_kind(descriptor, field.name, "enum", value));
                };
                if name == NULL_VALUE_NAME {
                    return Ok(Value::Null);
                }
                let symbol = self.schema.enumeration(name).and_then(|e| e.value_by_number(*number));
                Ok(match symbol {
                    Some(symbol) => Value::String(symbol.name.to_string()),
                    None => Value::from(*number),
                })
            }
            FieldKind::Message(_) => match value {
                FieldValue::Message(inner) => self.encode(inner),
                other => Err(wrong_kind(descriptor, field.name, "message", other)),
            },
        }
    }

    fn well_known(
        &self,
        kind: WellKnown,
        descriptor: &MessageDescriptor,
        message: &DynamicMessage,
    ) -> Result<Value, EncodeError> {
        match kind {
            WellKnown::Timestamp => {
                let (seconds, nanos) = seconds_and_nanos(descriptor, message)?;
                well_known::format_timestamp(seconds, nanos)
                    .map(Value::String)
                    .map_err(|reason| invalid(descriptor, "seconds", &reason))
            }
            WellKnown::Duration => {
                let (seconds, nanos) = seconds_and_nanos(descriptor, message)?;
                well_known::format_duration(seconds, nanos)
                    .map(Value::String)
                    .map_err(|reason| invalid(descriptor, "seconds", &reason))
            }
            WellKnown::Wrapper(scalar) => {
                let value = message
                    .get(well_known::WRAPPER_VALUE_FIELD)
                    .cloned()
                    .unwrap_or_else(|| scalar_default(scalar));
                scalar_json(scalar, &value).ok_or_else(|| wrong_kind(descriptor, "value", scalar.label(), &value))
            }
            WellKnown::FieldMask => {
                let paths = match message.get(1) {
                    None => Vec::new(),
                    Some(FieldValue::List(items)) => items
                        .iter()
                        .map(|item| item.as_str().ok_or_else(|| wrong_kind(descriptor, "paths", "string", item)))
                        .collect::<Result<Vec<_>, _>>()?,
                    Some(other) => return Err(wrong_kind(descriptor, "paths", "list", other)),
                };
                well_known::format_field_mask(&paths)
                    .map(Value::String)
                    .map_err(|reason| invalid(descriptor, "paths", &reason))
            }
            WellKnown::Struct => {
                let mut object = Map::new();
                match message.get(1) {
                    None => {}
                    Some(FieldValue::Map(entries)) => {
                        for (key, item) in entries {
                            let MapKey::String(key) = key else {
                                return Err(invalid(descriptor, "fields", "struct keys must be strings"));
                            };
                            object.insert(key.clone(), self.nested(descriptor, "fields", item)?);
                        }
                    }
                    Some(other) => return Err(wrong_kind(descriptor, "fields", "map", other)),
                }
                Ok(Value::Object(object))
            }
            WellKnown::ListValue => match message.get(1) {
                None => Ok(Value::Array(Vec::new())),
                Some(FieldValue::List(items)) => items
                    .iter()
                    .map(|item| self.nested(descriptor, "values", item))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array),
                Some(other) => Err(wrong_kind(descriptor, "values", "list", other)),
            },
            WellKnown::Value => self.protobuf_value(descriptor, message),
        }
    }

    fn protobuf_value(&self, descriptor: &MessageDescriptor, message: &DynamicMessage) -> Result<Value, EncodeError> {
        let Some((number, value)) = message.fields().next() else {
            return Err(invalid(descriptor, "kind", "no kind set"));
        };
        if message.len() > 1 {
            return Err(invalid(descriptor, "kind", "more than one kind set"));
        }
        match (number, value) {
            (1, FieldValue::Enum(_)) => Ok(Value::Null),
            (2, FieldValue::F64(n)) => Number::from_f64(*n)
                .map(Value::Number)
                .ok_or_else(|| invalid(descriptor, "number_value", "NaN and infinities are not JSON numbers")),
            (3, FieldValue::String(s)) => Ok(Value::String(s.clone())),
            (4, FieldValue::Bool(b)) => Ok(Value::Bool(*b)),
            (5 | 6, FieldValue::Message(inner)) => self.encode(inner),
            (_, other) => Err(invalid(
                descriptor,
                &number.to_string(),
                &format!("unexpected {} value", other.label()),
            )),
        }
    }

    fn nested(&self, descriptor: &MessageDescriptor, field: &str, value: &FieldValue) -> Result<Value, EncodeError> {
        match value {
            FieldValue::Message(inner) => self.encode(inner),
            other => Err(wrong_kind(descriptor, field, "message", other)),
        }
    }
}

fn seconds_and_nanos(descriptor: &MessageDescriptor, message: &DynamicMessage) -> Result<(i64, i32), EncodeError> {
    let seconds = match message.get(well_known::SECONDS_FIELD) {
        None => 0,
        Some(FieldValue::I64(s)) => *s,
        Some(other) => return Err(wrong_kind(descriptor, "seconds", "int64", other)),
    };
    let nanos = match message.get(well_known::NANOS_FIELD) {
        None => 0,
        Some(FieldValue::I32(n)) => *n,
        Some(other) => return Err(wrong_kind(descriptor, "nanos", "int32", other)),
    };
    Ok((seconds, nanos))
}

/// JSON for a scalar, or `None` if `value` is not of kind `scalar`.
fn scalar_json(scalar: ScalarKind, value: &FieldValue) -> Option<Value> {
    let json = match (scalar, value) {
        (ScalarKind::Bool, FieldValue::Bool(b)) => Value::Bool(*b),
        (ScalarKind::String, FieldValue::String(s)) => Value::String(s.clone()),
        (ScalarKind::Bytes, FieldValue::Bytes(b)) => Value::String(STANDARD.encode(b)),
        (ScalarKind::Int32, FieldValue::I32(n)) => Value::from(*n),
        (ScalarKind::Uint32, FieldValue::U32(n)) => Value::from(*n),
        (ScalarKind::Int64, FieldValue::I64(n)) => Value::String(n.to_string()),
        (ScalarKind::Uint64, FieldValue::U64(n)) => Value::String(n.to_string()),
        (ScalarKind::Double, FieldValue::F64(n)) => float_json(*n),
        // Shortest decimal form of the f32, not of its widened f64.
        (ScalarKind::Float, FieldValue::F32(n)) => float_json(n.to_string().parse().unwrap_or(f64::from(*n))),
        _ => return None,
    };
    Some(json)
}

fn float_json(n: f64) -> Value {
    if n.is_nan() {
        Value::String("NaN".to_string())
    } else if n == f64::INFINITY {
        Value::String("Infinity".to_string())
    } else if n == f64::NEG_INFINITY {
        Value::String("-Infinity".to_string())
    } else {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

fn scalar_default(scalar: ScalarKind) -> FieldValue {
    match scalar {
        ScalarKind::Bool => FieldValue::Bool(false),
        ScalarKind::String => FieldValue::String(String::new()),
        ScalarKind::Bytes => FieldValue::Bytes(Vec::new()),
        ScalarKind::Int32 => FieldValue::I32(0),
        ScalarKind::Uint32 => FieldValue::U32(0),
        ScalarKind::Int64 => FieldValue::I64(0),
        ScalarKind::Uint64 => FieldValue::U64(0),
        ScalarKind::Double => FieldValue::F64(0.0),
        ScalarKind::Float => FieldValue::F32(0.0),
    }
}

fn map_key_text(key: &MapKey) -> String {
    match key {
        MapKey::Bool(b) => b.to_string(),
        MapKey::Int(n) => n.to_string(),
        MapKey::Uint(n) => n.to_string(),
        MapKey::String(s) => s.clone(),
    }
}

fn cardinality_label(cardinality: Cardinality) -> &'static str {
    match cardinality {
        Cardinality::Singular => "singular",
        Cardinality::Repeated => "repeated",
        Cardinality::Map(_) => "map",
    }
}

fn invalid(descriptor: &MessageDescriptor, field: &str, reason: &str) -> EncodeError {
    EncodeError::Invalid {
        type_name: descriptor.full_name.to_string(),
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn wrong_kind(descriptor: &MessageDescriptor, field: &str, expected: &str, found: &FieldValue) -> EncodeError {
    invalid(descriptor, field, &format!("expected {expected}, found {}", found.label()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conformance::{self, TEST_FILE};
    use crate::decode::JsonDecoder;
    use serde_json::json;

    fn round_trip(schema: &Schema, input: Value) -> Value {
        let decoded = JsonDecoder::new(schema).decode_value(TEST_FILE, &input).unwrap();
        let encoded = JsonEncoder::new(schema).encode(&decoded).unwrap();
        let again = JsonDecoder::new(schema).decode_value(TEST_FILE, &encoded).unwrap();
        assert_eq!(decoded, again);
        encoded
    }

    #[test]
    fn canonical_form_uses_json_names_and_symbols() {
        let schema = Schema::conformance().unwrap();
        let encoded = round_trip(
            &schema,
            json!({
                "tests": [{
                    "description": "listen: add a doc",
                    "listen": {
                        "snapshots": [{
                            "changes": [{"kind": 1, "old_index": -1, "newIndex": 0}],
                            "read_time": "2018-01-01T00:00:02.000000000Z"
                        }]
                    }
                }]
            }),
        );
        assert_eq!(
            encoded,
            json!({
                "tests": [{
                    "description": "listen: add a doc",
                    "listen": {
                        "snapshots": [{
                            "changes": [{"kind": "ADDED", "oldIndex": -1, "newIndex": 0}],
                            "readTime": "2018-01-01T00:00:02Z"
                        }]
                    }
                }]
            })
        );
    }

    #[test]
    fn int64_and_bytes_forms() {
        let schema = Schema::conformance().unwrap();
        let encoded = round_trip(
            &schema,
            json!({"tests": [{"create": {"request": {
                "transaction": "AQI",
                "writes": [{"update": {"fields": {
                    "n": {"integerValue": 7},
                    "d": {"doubleValue": "-Infinity"},
                    "z": {"nullValue": 0}
                }}}]
            }}}]}),
        );
        let request = &encoded["tests"][0]["create"]["request"];
        assert_eq!(request["transaction"], json!("AQI="));
        let fields = &request["writes"][0]["update"]["fields"];
        assert_eq!(fields["n"], json!({"integerValue": "7"}));
        assert_eq!(fields["d"], json!({"doubleValue": "-Infinity"}));
        assert_eq!(fields["z"], json!({"nullValue": null}));
    }

    #[test]
    fn undeclared_enum_number_stays_numeric() {
        let schema = Schema::conformance().unwrap();
        let encoded = round_trip(
            &schema,
            json!({"tests": [{"listen": {"snapshots": [{"changes": [{"kind": 9}]}]}}]}),
        );
        assert_eq!(encoded["tests"][0]["listen"]["snapshots"][0]["changes"][0]["kind"], json!(9));
    }

    #[test]
    fn wrapper_encodes_bare_value() {
        let schema = Schema::conformance().unwrap();
        let encoded = round_trip(&schema, json!({"tests": [{"query": {"query": {"limit": "4"}}}]}));
        assert_eq!(encoded["tests"][0]["query"]["query"]["limit"], json!(4));
    }

    #[test]
    fn protobuf_value_without_kind_is_rejected() {
        let schema = Schema::conformance().unwrap();
        let empty = DynamicMessage::new(&well_known::VALUE);
        let err = JsonEncoder::new(&schema).encode(&empty).unwrap_err();
        assert!(err.to_string().contains("no kind set"), "got {err}");
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let schema = Schema::conformance().unwrap();
        let mut file = DynamicMessage::new(&conformance::TEST_FILE_MESSAGE);
        file.set(2, FieldValue::I32(5));
        let err = JsonEncoder::new(&schema).encode(&file).unwrap_err();
        assert!(
            matches!(&err, EncodeError::Invalid { field, .. } if field == "description"),
            "got {err}"
        );
    }

    #[test]
    fn undeclared_field_number_is_rejected() {
        let schema = Schema::conformance().unwrap();
        let mut file = DynamicMessage::new(&conformance::TEST_FILE_MESSAGE);
        file.set(99, FieldValue::Bool(true));
        assert!(JsonEncoder::new(&schema).encode(&file).is_err());
    }

    #[test]
    fn float_uses_shortest_form() {
        assert_eq!(scalar_json(ScalarKind::Float, &FieldValue::F32(0.1)), Some(json!(0.1)));
        assert_eq!(
            scalar_json(ScalarKind::Float, &FieldValue::F32(f32::NEG_INFINITY)),
            Some(json!("-Infinity"))
        );
    }

    #[test]
    fn pretty_output_is_text() {
        let schema = Schema::conformance().unwrap();
        let mut file = DynamicMessage::new(&conformance::TEST_FILE_MESSAGE);
        file.set(2, FieldValue::String("d".into()));
        let text = JsonEncoder::new(&schema).encode_to_string_pretty(&file).unwrap();
        assert_eq!(text, "{\n  \"description\": \"d\"\n}");
    }
}
