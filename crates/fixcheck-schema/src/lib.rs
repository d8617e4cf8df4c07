//! # fixcheck-schema — Fixture Schema & proto3 JSON Mapping
//!
//! Describes the Firestore cross-language conformance test messages and
//! decodes JSON fixtures against them with proto3 JSON mapping semantics.
//!
//! ## Descriptors (`descriptor`, `conformance`, `well_known`)
//!
//! Message and enum types are declared as `static` tables of
//! [`MessageDescriptor`] / [`EnumDescriptor`] built with `const fn`
//! constructors. [`conformance`] holds the fixture schema rooted at
//! [`conformance::TEST_FILE`]; [`well_known`] holds the `google.protobuf`
//! types with special JSON forms.
//!
//! ## Registry (`registry`)
//!
//! [`Schema`] indexes a set of tables by full name and rejects inconsistent
//! ones (duplicate numbers or names, dangling type references) up front.
//!
//! ## Decoding and Encoding (`decode`, `encode`)
//!
//! - [`JsonDecoder::decode_slice`] parses bytes and maps them onto a type,
//!   returning a [`DynamicMessage`] or a [`DecodeError`] carrying the JSON
//!   path of the offending element.
//! - [`JsonEncoder::encode`] renders a message back to canonical JSON.
//!
//! ## Crate Policy
//!
//! - No I/O. Callers hand in bytes or parsed JSON.
//! - Decoding is all-or-nothing: no partial messages on error.
//! - `google.protobuf.Any` is not supported; messages that would embed one
//!   omit that field, so fixtures carrying it decode with the field ignored.
//!
//! ```
//! use fixcheck_schema::{conformance, JsonDecoder, Schema};
//!
//! let schema = Schema::conformance().unwrap();
//! let decoder = JsonDecoder::new(&schema);
//! let file = decoder
//!     .decode_slice(conformance::TEST_FILE, br#"{"description": "basic get"}"#)
//!     .unwrap();
//! assert_eq!(file.field(&schema, "description").and_then(|v| v.as_str()), Some("basic get"));
//! ```

pub mod conformance;
pub mod decode;
pub mod descriptor;
pub mod encode;
pub mod registry;
pub mod value;
pub mod well_known;

pub use decode::{DecodeError, DecodeOptions, JsonDecoder, MappingError, DEFAULT_RECURSION_LIMIT};
pub use descriptor::{
    Cardinality, EnumDescriptor, EnumValue, FieldDescriptor, FieldKind, MessageDescriptor, OneofDescriptor,
    ScalarKind,
};
pub use encode::{EncodeError, JsonEncoder};
pub use registry::{Schema, SchemaError};
pub use value::{DynamicMessage, FieldValue, MapKey};
