//! # Dynamic Values
//!
//! The in-memory form of a decoded document. A [`DynamicMessage`] keeps only
//! the fields that were present in the input, keyed by field number, so two
//! inputs that spell the same data differently (JSON name vs proto name,
//! enum name vs number) decode to equal values.

use std::collections::BTreeMap;

use crate::descriptor::MessageDescriptor;
use crate::registry::Schema;

/// A decoded message of some schema type.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicMessage {
    type_name: &'static str,
    fields: BTreeMap<u32, FieldValue>,
}

/// The value of a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
    /// Enum number. Proto3 enums are open, so the number may be undeclared.
    Enum(i32),
    Message(Box<DynamicMessage>),
    List(Vec<FieldValue>),
    Map(BTreeMap<MapKey, FieldValue>),
}

/// Key of a map field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapKey {
    Bool(bool),
    Int(i64),
    Uint(u64),
    String(String),
}

impl DynamicMessage {
    pub fn new(descriptor: &'static MessageDescriptor) -> Self {
        Self::with_type_name(descriptor.full_name)
    }

    pub(crate) fn with_type_name(type_name: &'static str) -> Self {
        Self {
            type_name,
            fields: BTreeMap::new(),
        }
    }

    /// Fully-qualified name of the message type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn get(&self, number: u32) -> Option<&FieldValue> {
        self.fields.get(&number)
    }

    /// Looks a field up by either of its names.
    pub fn field<'a>(&'a self, schema: &Schema, name: &str) -> Option<&'a FieldValue> {
        let field = schema.field(self.type_name, name)?;
        self.fields.get(&field.number)
    }

    pub fn set(&mut self, number: u32, value: FieldValue) {
        self.fields.insert(number, value);
    }

    pub fn has(&self, number: u32) -> bool {
        self.fields.contains_key(&number)
    }

    /// Present fields in field-number order.
    pub fn fields(&self) -> impl Iterator<Item = (u32, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (*n, v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FieldValue {
    /// Short name of the variant, for diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::I32(_) => "int32",
            Self::I64(_) => "int64",
            Self::U32(_) => "uint32",
            Self::U64(_) => "uint64",
            Self::F32(_) => "float",
            Self::F64(_) => "double",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Enum(_) => "enum",
            Self::Message(_) => "message",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&DynamicMessage> {
        match self {
            Self::Message(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<MapKey, FieldValue>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<i32> {
        match self {
            Self::Enum(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<DynamicMessage> for FieldValue {
    fn from(message: DynamicMessage) -> Self {
        Self::Message(Box::new(message))
    }
}
