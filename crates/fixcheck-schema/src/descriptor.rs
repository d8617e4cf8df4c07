//! # Descriptors — Declarative Schema Tables
//!
//! Plain data describing messages, fields, oneof groups, and enums. The
//! decoder and encoder are generic over these tables; a schema change is a
//! table edit, never a code change.
//!
//! Tables are built from `const fn` constructors so they can live in
//! `static` items:
//!
//! ```
//! use fixcheck_schema::descriptor::{FieldDescriptor as F, MessageDescriptor, OneofDescriptor, ScalarKind};
//!
//! static PRECONDITION: MessageDescriptor = MessageDescriptor {
//!     full_name: "example.Precondition",
//!     fields: &[
//!         F::scalar(1, "exists", ScalarKind::Bool).in_oneof(0),
//!         F::message(2, "update_time", "google.protobuf.Timestamp").in_oneof(0),
//!     ],
//!     oneofs: &[OneofDescriptor::optional("condition_type")],
//! };
//! assert_eq!(PRECONDITION.fields[1].json_name(), "updateTime");
//! ```

/// Primitive field types. `Int32` also covers `sint32`/`sfixed32`, and
/// likewise for the other integer widths, since they share a JSON form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Bool,
    String,
    Bytes,
}

impl ScalarKind {
    /// Name used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Self::Double => "double",
            Self::Float => "float",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Bytes => "bytes",
        }
    }

    /// Whether this kind may be used as a map key.
    pub fn is_valid_map_key(self) -> bool {
        !matches!(self, Self::Double | Self::Float | Self::Bytes)
    }
}

/// The element type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar(ScalarKind),
    /// Enum type, by fully-qualified name.
    Enum(&'static str),
    /// Message type, by fully-qualified name.
    Message(&'static str),
}

/// How many values a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    Singular,
    Repeated,
    /// `map<K, V>` where `K` is the given key kind and `V` is the field kind.
    Map(ScalarKind),
}

/// A single field of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field number, unique within the message.
    pub number: u32,
    /// Declared snake_case name.
    pub name: &'static str,
    pub kind: FieldKind,
    pub cardinality: Cardinality,
    /// Index into the owning message's `oneofs`, if the field is a member.
    pub oneof: Option<usize>,
}

impl FieldDescriptor {
    pub const fn scalar(number: u32, name: &'static str, kind: ScalarKind) -> Self {
        Self {
            number,
            name,
            kind: FieldKind::Scalar(kind),
            cardinality: Cardinality::Singular,
            oneof: None,
        }
    }

    pub const fn enumeration(number: u32, name: &'static str, enum_name: &'static str) -> Self {
        Self {
            number,
            name,
            kind: FieldKind::Enum(enum_name),
            cardinality: Cardinality::Singular,
            oneof: None,
        }
    }

    pub const fn message(number: u32, name: &'static str, type_name: &'static str) -> Self {
        Self {
            number,
            name,
            kind: FieldKind::Message(type_name),
            cardinality: Cardinality::Singular,
            oneof: None,
        }
    }

    /// Marks the field as `repeated`.
    pub const fn repeated(self) -> Self {
        Self {
            cardinality: Cardinality::Repeated,
            ..self
        }
    }

    /// Turns the field into a map keyed by `key`, valued by the field's kind.
    pub const fn map(self, key: ScalarKind) -> Self {
        Self {
            cardinality: Cardinality::Map(key),
            ..self
        }
    }

    /// Places the field in the oneof group at `index`.
    pub const fn in_oneof(self, index: usize) -> Self {
        Self {
            oneof: Some(index),
            ..self
        }
    }

    /// The lowerCamelCase name used in JSON output.
    pub fn json_name(&self) -> String {
        lower_camel(self.name)
    }

    pub fn is_repeated(&self) -> bool {
        matches!(self.cardinality, Cardinality::Repeated)
    }

    pub fn is_map(&self) -> bool {
        matches!(self.cardinality, Cardinality::Map(_))
    }
}

/// A oneof group. Members reference it by index from [`FieldDescriptor::oneof`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OneofDescriptor {
    pub name: &'static str,
    /// When set, decoding fails if no member is present.
    pub required: bool,
}

impl OneofDescriptor {
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }

    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }
}

/// A message type.
#[derive(Debug, PartialEq, Eq)]
pub struct MessageDescriptor {
    /// Fully-qualified name, e.g. `google.firestore.v1.Document`.
    pub full_name: &'static str,
    pub fields: &'static [FieldDescriptor],
    pub oneofs: &'static [OneofDescriptor],
}

impl MessageDescriptor {
    pub fn field_by_number(&self, number: u32) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.number == number)
    }

    /// Members of the oneof group at `index`, in declaration order.
    pub fn oneof_members(&self, index: usize) -> impl Iterator<Item = &'static FieldDescriptor> {
        self.fields.iter().filter(move |f| f.oneof == Some(index))
    }
}

/// One symbolic value of an enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumValue {
    pub name: &'static str,
    pub number: i32,
}

impl EnumValue {
    pub const fn new(name: &'static str, number: i32) -> Self {
        Self { name, number }
    }
}

/// An enum type.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub full_name: &'static str,
    pub values: &'static [EnumValue],
}

impl EnumDescriptor {
    pub fn value_by_name(&self, name: &str) -> Option<&'static EnumValue> {
        self.values.iter().find(|v| v.name == name)
    }

    /// First value declared with `number` (aliases resolve to the first name).
    pub fn value_by_number(&self, number: i32) -> Option<&'static EnumValue> {
        self.values.iter().find(|v| v.number == number)
    }
}

/// Converts a snake_case field name to its JSON name.
///
/// Matches protoc: every underscore is dropped and the character after it
/// is upper-cased.
pub fn lower_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Inverse of [`lower_camel`] for names that were produced by it.
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_camel_matches_protoc() {
        assert_eq!(lower_camel("doc_ref_path"), "docRefPath");
        assert_eq!(lower_camel("description"), "description");
        assert_eq!(lower_camel("update_paths"), "updatePaths");
        assert_eq!(lower_camel("field_1_name"), "field1Name");
    }

    #[test]
    fn snake_case_inverts_lower_camel() {
        for name in ["doc_ref_path", "read_time", "is_error", "x"] {
            assert_eq!(snake_case(&lower_camel(name)), name);
        }
    }

    #[test]
    fn builders_compose() {
        let f = FieldDescriptor::message(3, "field_paths", "x.FieldPath")
            .repeated()
            .in_oneof(1);
        assert!(f.is_repeated());
        assert_eq!(f.oneof, Some(1));
        assert_eq!(f.json_name(), "fieldPaths");

        let m = FieldDescriptor::scalar(2, "fields", ScalarKind::Bytes).map(ScalarKind::String);
        assert!(m.is_map());
        assert!(!m.is_repeated());
    }

    #[test]
    fn map_key_kinds() {
        assert!(ScalarKind::String.is_valid_map_key());
        assert!(ScalarKind::Int64.is_valid_map_key());
        assert!(ScalarKind::Bool.is_valid_map_key());
        assert!(!ScalarKind::Double.is_valid_map_key());
        assert!(!ScalarKind::Bytes.is_valid_map_key());
    }

    #[test]
    fn enum_lookup_both_ways() {
        static KIND: EnumDescriptor = EnumDescriptor {
            full_name: "x.Kind",
            values: &[
                EnumValue::new("KIND_UNSPECIFIED", 0),
                EnumValue::new("ADDED", 1),
            ],
        };
        assert_eq!(KIND.value_by_name("ADDED").map(|v| v.number), Some(1));
        assert_eq!(KIND.value_by_number(0).map(|v| v.name), Some("KIND_UNSPECIFIED"));
        assert!(KIND.value_by_name("added").is_none());
        assert!(KIND.value_by_number(7).is_none());
    }
}
