//! # Schema Registry
//!
//! Indexes descriptor tables by fully-qualified name and checks that they
//! are internally consistent before any document is decoded against them.
//!
//! ## Checks
//!
//! - Message and enum names are unique.
//! - Field numbers and field names (both the snake_case and JSON spelling)
//!   are unique within a message.
//! - Every `Message`/`Enum` field kind resolves to a registered type.
//! - Oneof indices are in range and oneof members are singular.
//! - Map keys use an integral, bool, or string kind.
//!
//! The `google.protobuf` well-known types are always registered.

use std::collections::HashMap;

use thiserror::Error;

use crate::descriptor::{Cardinality, EnumDescriptor, FieldDescriptor, FieldKind, MessageDescriptor};
use crate::{conformance, well_known};

/// A descriptor table is inconsistent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("message type '{0}' registered twice")]
    DuplicateMessage(String),

    #[error("enum type '{0}' registered twice")]
    DuplicateEnum(String),

    #[error("{message}: field number {number} declared twice")]
    DuplicateFieldNumber { message: String, number: u32 },

    #[error("{message}: field name '{name}' collides with another field")]
    DuplicateFieldName { message: String, name: String },

    #[error("{message}.{field}: type '{type_name}' is not registered")]
    UnresolvedType {
        message: String,
        field: String,
        type_name: String,
    },

    #[error("{message}.{field}: {reason}")]
    InvalidField {
        message: String,
        field: String,
        reason: String,
    },
}

#[derive(Debug)]
struct MessageEntry {
    descriptor: &'static MessageDescriptor,
    /// Both spellings of every field name, mapped to the index in `fields`.
    by_name: HashMap<String, usize>,
    /// JSON names, parallel to `descriptor.fields`.
    json_names: Vec<String>,
}

/// A validated set of message and enum descriptors.
#[derive(Debug)]
pub struct Schema {
    messages: HashMap<&'static str, MessageEntry>,
    enums: HashMap<&'static str, &'static EnumDescriptor>,
}

impl Schema {
    /// Registers `messages` and `enums` alongside the well-known types.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found; see the module docs for the
    /// full list of checks.
    pub fn new(
        messages: &[&'static MessageDescriptor],
        enums: &[&'static EnumDescriptor],
    ) -> Result<Self, SchemaError> {
        let mut schema = Self {
            messages: HashMap::new(),
            enums: HashMap::new(),
        };

        for descriptor in well_known::MESSAGES.iter().chain(messages).copied() {
            schema.add_message(descriptor)?;
        }
        for descriptor in well_known::ENUMS.iter().chain(enums).copied() {
            if schema.enums.insert(descriptor.full_name, descriptor).is_some() {
                return Err(SchemaError::DuplicateEnum(descriptor.full_name.to_string()));
            }
        }

        schema.check_references()?;
        Ok(schema)
    }

    /// The Firestore cross-language conformance schema.
    ///
    /// # Errors
    ///
    /// Fails only if the built-in table is inconsistent.
    pub fn conformance() -> Result<Self, SchemaError> {
        Self::new(conformance::MESSAGES, conformance::ENUMS)
    }

    fn add_message(&mut self, descriptor: &'static MessageDescriptor) -> Result<(), SchemaError> {
        let message = descriptor.full_name;
        if self.messages.contains_key(message) {
            return Err(SchemaError::DuplicateMessage(message.to_string()));
        }

        let mut numbers = HashMap::new();
        let mut by_name = HashMap::new();
        let mut json_names = Vec::with_capacity(descriptor.fields.len());

        for (index, field) in descriptor.fields.iter().enumerate() {
            if numbers.insert(field.number, index).is_some() {
                return Err(SchemaError::DuplicateFieldNumber {
                    message: message.to_string(),
                    number: field.number,
                });
            }

            let json_name = field.json_name();
            for name in [field.name.to_string(), json_name.clone()] {
                if by_name.get(&name).is_some_and(|&existing| existing != index) {
                    return Err(SchemaError::DuplicateFieldName {
                        message: message.to_string(),
                        name,
                    });
                }
                by_name.insert(name, index);
            }
            json_names.push(json_name);

            check_field_shape(descriptor, field)?;
        }

        self.messages.insert(
            message,
            MessageEntry {
                descriptor,
                by_name,
                json_names,
            },
        );
        Ok(())
    }

    fn check_references(&self) -> Result<(), SchemaError> {
        for entry in self.messages.values() {
            for field in entry.descriptor.fields {
                let resolved = match field.kind {
                    FieldKind::Scalar(_) => true,
                    FieldKind::Enum(name) => self.enums.contains_key(name),
                    FieldKind::Message(name) => self.messages.contains_key(name),
                };
                if !resolved {
                    let type_name = match field.kind {
                        FieldKind::Enum(name) | FieldKind::Message(name) => name,
                        FieldKind::Scalar(_) => "",
                    };
                    return Err(SchemaError::UnresolvedType {
                        message: entry.descriptor.full_name.to_string(),
                        field: field.name.to_string(),
                        type_name: type_name.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn message(&self, full_name: &str) -> Option<&'static MessageDescriptor> {
        self.messages.get(full_name).map(|e| e.descriptor)
    }

    pub fn enumeration(&self, full_name: &str) -> Option<&'static EnumDescriptor> {
        self.enums.get(full_name).copied()
    }

    /// Resolves a field of `message` by its JSON name or its declared name.
    pub fn field(&self, message: &str, name: &str) -> Option<&'static FieldDescriptor> {
        let entry = self.messages.get(message)?;
        let index = *entry.by_name.get(name)?;
        entry.descriptor.fields.get(index)
    }

    /// JSON name of the field numbered `number` in `message`.
    pub fn json_name(&self, message: &str, number: u32) -> Option<&str> {
        let entry = self.messages.get(message)?;
        let index = entry.descriptor.fields.iter().position(|f| f.number == number)?;
        entry.json_names.get(index).map(String::as_str)
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }

    /// Names of all registered messages, sorted alphabetically.
    pub fn message_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.messages.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

fn check_field_shape(
    message: &MessageDescriptor,
    field: &FieldDescriptor,
) -> Result<(), SchemaError> {
    let invalid = |reason: &str| SchemaError::InvalidField {
        message: message.full_name.to_string(),
        field: field.name.to_string(),
        reason: reason.to_string(),
    };

    if let Some(index) = field.oneof {
        if index >= message.oneofs.len() {
            return Err(invalid(&format!("oneof index {index} out of range")));
        }
        if field.cardinality != Cardinality::Singular {
            return Err(invalid("oneof members must be singular"));
        }
    }
    if let Cardinality::Map(key) = field.cardinality {
        if !key.is_valid_map_key() {
            return Err(invalid(&format!("{} cannot be a map key", key.label())));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{FieldDescriptor as F, OneofDescriptor, ScalarKind};

    #[test]
    fn conformance_schema_builds() {
        let schema = Schema::conformance().unwrap();
        assert!(schema.message(conformance::TEST_FILE).is_some());
        assert!(schema.message("google.protobuf.Timestamp").is_some());
        assert!(schema.enumeration("google.protobuf.NullValue").is_some());
        assert!(schema.message_count() > 40);
    }

    #[test]
    fn field_resolves_both_spellings() {
        let schema = Schema::conformance().unwrap();
        let a = schema.field(conformance::GET_TEST, "docRefPath").unwrap();
        let b = schema.field(conformance::GET_TEST, "doc_ref_path").unwrap();
        assert_eq!(a, b);
        assert_eq!(schema.json_name(conformance::GET_TEST, a.number), Some("docRefPath"));
        assert!(schema.field(conformance::GET_TEST, "DocRefPath").is_none());
    }

    #[test]
    fn message_names_sorted() {
        let schema = Schema::conformance().unwrap();
        let names = schema.message_names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    static DUP_NUMBER: MessageDescriptor = MessageDescriptor {
        full_name: "t.DupNumber",
        fields: &[
            F::scalar(1, "a", ScalarKind::String),
            F::scalar(1, "b", ScalarKind::String),
        ],
        oneofs: &[],
    };

    #[test]
    fn rejects_duplicate_field_number() {
        let err = Schema::new(&[&DUP_NUMBER], &[]).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateFieldNumber { number: 1, .. }));
    }

    static NAME_CLASH: MessageDescriptor = MessageDescriptor {
        full_name: "t.NameClash",
        fields: &[
            F::scalar(1, "foo_bar", ScalarKind::String),
            F::scalar(2, "fooBar", ScalarKind::String),
        ],
        oneofs: &[],
    };

    #[test]
    fn rejects_json_name_collision() {
        let err = Schema::new(&[&NAME_CLASH], &[]).unwrap_err();
        assert!(
            matches!(&err, SchemaError::DuplicateFieldName { name, .. } if name == "fooBar"),
            "got {err}"
        );
    }

    static DANGLING: MessageDescriptor = MessageDescriptor {
        full_name: "t.Dangling",
        fields: &[F::message(1, "child", "t.Missing")],
        oneofs: &[],
    };

    #[test]
    fn rejects_unresolved_type() {
        let err = Schema::new(&[&DANGLING], &[]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnresolvedType {
                message: "t.Dangling".into(),
                field: "child".into(),
                type_name: "t.Missing".into(),
            }
        );
    }

    static BAD_ONEOF: MessageDescriptor = MessageDescriptor {
        full_name: "t.BadOneof",
        fields: &[F::scalar(1, "a", ScalarKind::String).repeated().in_oneof(0)],
        oneofs: &[OneofDescriptor::optional("choice")],
    };

    #[test]
    fn rejects_repeated_oneof_member() {
        let err = Schema::new(&[&BAD_ONEOF], &[]).unwrap_err();
        assert!(err.to_string().contains("singular"), "got {err}");
    }

    static FLOAT_KEY: MessageDescriptor = MessageDescriptor {
        full_name: "t.FloatKey",
        fields: &[F::scalar(1, "m", ScalarKind::String).map(ScalarKind::Double)],
        oneofs: &[],
    };

    #[test]
    fn rejects_float_map_key() {
        let err = Schema::new(&[&FLOAT_KEY], &[]).unwrap_err();
        assert!(err.to_string().contains("map key"), "got {err}");
    }

    #[test]
    fn rejects_reregistered_well_known_type() {
        let err = Schema::new(&[&well_known::TIMESTAMP], &[]).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateMessage("google.protobuf.Timestamp".into()));
    }
}
