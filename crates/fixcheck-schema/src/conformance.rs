//! # Conformance Schema Table
//!
//! The Firestore cross-language conformance test schema
//! (`google.cloud.conformance.firestore.v1`) and the Firestore v1 wire
//! messages it embeds. Each fixture file is one `TestFile`.
//!
//! This module is data only. Field numbers and names follow the upstream
//! `.proto` definitions; `TestFile.description` is a local addition that
//! lets a file carry a human-readable title.
//!
//! `google.rpc.Status.details` (`repeated google.protobuf.Any`) is not
//! declared, so it is skipped like any other unrecognized field.

use crate::descriptor::{
    EnumDescriptor, EnumValue as V, FieldDescriptor as F, MessageDescriptor, OneofDescriptor,
    ScalarKind as S,
};
use crate::well_known::{NULL_VALUE_NAME, TIMESTAMP_NAME};

// ── google.cloud.conformance.firestore.v1 ───────────────────────────

pub const TEST_FILE: &str = "google.cloud.conformance.firestore.v1.TestFile";
pub const TEST: &str = "google.cloud.conformance.firestore.v1.Test";
pub const GET_TEST: &str = "google.cloud.conformance.firestore.v1.GetTest";
pub const CREATE_TEST: &str = "google.cloud.conformance.firestore.v1.CreateTest";
pub const SET_TEST: &str = "google.cloud.conformance.firestore.v1.SetTest";
pub const UPDATE_TEST: &str = "google.cloud.conformance.firestore.v1.UpdateTest";
pub const UPDATE_PATHS_TEST: &str = "google.cloud.conformance.firestore.v1.UpdatePathsTest";
pub const DELETE_TEST: &str = "google.cloud.conformance.firestore.v1.DeleteTest";
pub const SET_OPTION: &str = "google.cloud.conformance.firestore.v1.SetOption";
pub const QUERY_TEST: &str = "google.cloud.conformance.firestore.v1.QueryTest";
pub const CLAUSE: &str = "google.cloud.conformance.firestore.v1.Clause";
pub const SELECT: &str = "google.cloud.conformance.firestore.v1.Select";
pub const WHERE: &str = "google.cloud.conformance.firestore.v1.Where";
pub const ORDER_BY: &str = "google.cloud.conformance.firestore.v1.OrderBy";
pub const CURSOR: &str = "google.cloud.conformance.firestore.v1.Cursor";
pub const DOC_SNAPSHOT: &str = "google.cloud.conformance.firestore.v1.DocSnapshot";
pub const FIELD_PATH: &str = "google.cloud.conformance.firestore.v1.FieldPath";
pub const LISTEN_TEST: &str = "google.cloud.conformance.firestore.v1.ListenTest";
pub const SNAPSHOT: &str = "google.cloud.conformance.firestore.v1.Snapshot";
pub const DOC_CHANGE: &str = "google.cloud.conformance.firestore.v1.DocChange";
pub const DOC_CHANGE_KIND: &str = "google.cloud.conformance.firestore.v1.DocChange.Kind";

// ── google.firestore.v1 ─────────────────────────────────────────────

pub const GET_DOCUMENT_REQUEST: &str = "google.firestore.v1.GetDocumentRequest";
pub const COMMIT_REQUEST: &str = "google.firestore.v1.CommitRequest";
pub const WRITE: &str = "google.firestore.v1.Write";
pub const DOCUMENT_MASK: &str = "google.firestore.v1.DocumentMask";
pub const PRECONDITION: &str = "google.firestore.v1.Precondition";
pub const DOCUMENT_TRANSFORM: &str = "google.firestore.v1.DocumentTransform";
pub const FIELD_TRANSFORM: &str = "google.firestore.v1.DocumentTransform.FieldTransform";
pub const SERVER_VALUE: &str = "google.firestore.v1.DocumentTransform.FieldTransform.ServerValue";
pub const DOCUMENT: &str = "google.firestore.v1.Document";
pub const VALUE: &str = "google.firestore.v1.Value";
pub const ARRAY_VALUE: &str = "google.firestore.v1.ArrayValue";
pub const MAP_VALUE: &str = "google.firestore.v1.MapValue";
pub const STRUCTURED_QUERY: &str = "google.firestore.v1.StructuredQuery";
pub const COLLECTION_SELECTOR: &str = "google.firestore.v1.StructuredQuery.CollectionSelector";
pub const FILTER: &str = "google.firestore.v1.StructuredQuery.Filter";
pub const COMPOSITE_FILTER: &str = "google.firestore.v1.StructuredQuery.CompositeFilter";
pub const COMPOSITE_OPERATOR: &str = "google.firestore.v1.StructuredQuery.CompositeFilter.Operator";
pub const FIELD_FILTER: &str = "google.firestore.v1.StructuredQuery.FieldFilter";
pub const FIELD_OPERATOR: &str = "google.firestore.v1.StructuredQuery.FieldFilter.Operator";
pub const UNARY_FILTER: &str = "google.firestore.v1.StructuredQuery.UnaryFilter";
pub const UNARY_OPERATOR: &str = "google.firestore.v1.StructuredQuery.UnaryFilter.Operator";
pub const ORDER: &str = "google.firestore.v1.StructuredQuery.Order";
pub const DIRECTION: &str = "google.firestore.v1.StructuredQuery.Direction";
pub const FIELD_REFERENCE: &str = "google.firestore.v1.StructuredQuery.FieldReference";
pub const PROJECTION: &str = "google.firestore.v1.StructuredQuery.Projection";
pub const QUERY_CURSOR: &str = "google.firestore.v1.Cursor";
pub const LISTEN_RESPONSE: &str = "google.firestore.v1.ListenResponse";
pub const TARGET_CHANGE: &str = "google.firestore.v1.TargetChange";
pub const TARGET_CHANGE_TYPE: &str = "google.firestore.v1.TargetChange.TargetChangeType";
pub const DOCUMENT_CHANGE: &str = "google.firestore.v1.DocumentChange";
pub const DOCUMENT_DELETE: &str = "google.firestore.v1.DocumentDelete";
pub const DOCUMENT_REMOVE: &str = "google.firestore.v1.DocumentRemove";
pub const EXISTENCE_FILTER: &str = "google.firestore.v1.ExistenceFilter";

// ── google.type / google.rpc ────────────────────────────────────────

pub const LAT_LNG: &str = "google.type.LatLng";
pub const STATUS: &str = "google.rpc.Status";

// Conformance test messages.

pub static TEST_FILE_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: TEST_FILE,
    fields: &[
        F::message(1, "tests", TEST).repeated(),
        F::scalar(2, "description", S::String),
    ],
    oneofs: &[],
};

pub static TEST_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: TEST,
    fields: &[
        F::scalar(1, "description", S::String),
        F::scalar(10, "comment", S::String),
        F::message(2, "get", GET_TEST).in_oneof(0),
        F::message(3, "create", CREATE_TEST).in_oneof(0),
        F::message(4, "set", SET_TEST).in_oneof(0),
        F::message(5, "update", UPDATE_TEST).in_oneof(0),
        F::message(6, "update_paths", UPDATE_PATHS_TEST).in_oneof(0),
        F::message(7, "delete", DELETE_TEST).in_oneof(0),
        F::message(8, "query", QUERY_TEST).in_oneof(0),
        F::message(9, "listen", LISTEN_TEST).in_oneof(0),
    ],
    oneofs: &[OneofDescriptor::required("test")],
};

pub static GET_TEST_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: GET_TEST,
    fields: &[
        F::scalar(1, "doc_ref_path", S::String),
        F::message(2, "request", GET_DOCUMENT_REQUEST),
    ],
    oneofs: &[],
};

pub static CREATE_TEST_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: CREATE_TEST,
    fields: &[
        F::scalar(1, "doc_ref_path", S::String),
        F::scalar(2, "json_data", S::String),
        F::message(3, "request", COMMIT_REQUEST),
        F::scalar(4, "is_error", S::Bool),
    ],
    oneofs: &[],
};

pub static SET_TEST_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: SET_TEST,
    fields: &[
        F::scalar(1, "doc_ref_path", S::String),
        F::message(2, "option", SET_OPTION),
        F::scalar(3, "json_data", S::String),
        F::message(4, "request", COMMIT_REQUEST),
        F::scalar(5, "is_error", S::Bool),
    ],
    oneofs: &[],
};

pub static UPDATE_TEST_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: UPDATE_TEST,
    fields: &[
        F::scalar(1, "doc_ref_path", S::String),
        F::message(2, "precondition", PRECONDITION),
        F::scalar(3, "json_data", S::String),
        F::message(4, "request", COMMIT_REQUEST),
        F::scalar(5, "is_error", S::Bool),
    ],
    oneofs: &[],
};

pub static UPDATE_PATHS_TEST_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: UPDATE_PATHS_TEST,
    fields: &[
        F::scalar(1, "doc_ref_path", S::String),
        F::message(2, "precondition", PRECONDITION),
        F::message(3, "field_paths", FIELD_PATH).repeated(),
        F::scalar(4, "json_values", S::String).repeated(),
        F::message(5, "request", COMMIT_REQUEST),
        F::scalar(6, "is_error", S::Bool),
    ],
    oneofs: &[],
};

pub static DELETE_TEST_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: DELETE_TEST,
    fields: &[
        F::scalar(1, "doc_ref_path", S::String),
        F::message(2, "precondition", PRECONDITION),
        F::message(3, "request", COMMIT_REQUEST),
        F::scalar(4, "is_error", S::Bool),
    ],
    oneofs: &[],
};

pub static SET_OPTION_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: SET_OPTION,
    fields: &[
        F::scalar(1, "all", S::Bool),
        F::message(2, "fields", FIELD_PATH).repeated(),
    ],
    oneofs: &[],
};

pub static QUERY_TEST_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: QUERY_TEST,
    fields: &[
        F::scalar(1, "coll_path", S::String),
        F::message(2, "clauses", CLAUSE).repeated(),
        F::message(3, "query", STRUCTURED_QUERY),
        F::scalar(4, "is_error", S::Bool),
    ],
    oneofs: &[],
};

pub static CLAUSE_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: CLAUSE,
    fields: &[
        F::message(1, "select", SELECT).in_oneof(0),
        F::message(2, "where", WHERE).in_oneof(0),
        F::message(3, "order_by", ORDER_BY).in_oneof(0),
        F::scalar(4, "offset", S::Int32).in_oneof(0),
        F::scalar(5, "limit", S::Int32).in_oneof(0),
        F::message(6, "start_at", CURSOR).in_oneof(0),
        F::message(7, "start_after", CURSOR).in_oneof(0),
        F::message(8, "end_at", CURSOR).in_oneof(0),
        F::message(9, "end_before", CURSOR).in_oneof(0),
    ],
    oneofs: &[OneofDescriptor::optional("clause")],
};

pub static SELECT_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: SELECT,
    fields: &[F::message(1, "fields", FIELD_PATH).repeated()],
    oneofs: &[],
};

pub static WHERE_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: WHERE,
    fields: &[
        F::message(1, "path", FIELD_PATH),
        F::scalar(2, "op", S::String),
        F::scalar(3, "json_value", S::String),
    ],
    oneofs: &[],
};

pub static ORDER_BY_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: ORDER_BY,
    fields: &[
        F::message(1, "path", FIELD_PATH),
        F::scalar(2, "direction", S::String),
    ],
    oneofs: &[],
};

pub static CURSOR_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: CURSOR,
    fields: &[
        F::message(1, "doc_snapshot", DOC_SNAPSHOT),
        F::scalar(2, "json_values", S::String).repeated(),
    ],
    oneofs: &[],
};

pub static DOC_SNAPSHOT_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: DOC_SNAPSHOT,
    fields: &[
        F::scalar(1, "path", S::String),
        F::scalar(2, "json_data", S::String),
    ],
    oneofs: &[],
};

pub static FIELD_PATH_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: FIELD_PATH,
    fields: &[F::scalar(1, "field", S::String).repeated()],
    oneofs: &[],
};

pub static LISTEN_TEST_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: LISTEN_TEST,
    fields: &[
        F::message(1, "responses", LISTEN_RESPONSE).repeated(),
        F::message(2, "snapshots", SNAPSHOT).repeated(),
        F::scalar(3, "is_error", S::Bool),
    ],
    oneofs: &[],
};

pub static SNAPSHOT_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: SNAPSHOT,
    fields: &[
        F::message(1, "docs", DOCUMENT).repeated(),
        F::message(2, "changes", DOC_CHANGE).repeated(),
        F::message(3, "read_time", TIMESTAMP_NAME),
    ],
    oneofs: &[],
};

pub static DOC_CHANGE_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: DOC_CHANGE,
    fields: &[
        F::enumeration(1, "kind", DOC_CHANGE_KIND),
        F::message(2, "doc", DOCUMENT),
        F::scalar(3, "old_index", S::Int32),
        F::scalar(4, "new_index", S::Int32),
    ],
    oneofs: &[],
};

pub static DOC_CHANGE_KIND_ENUM: EnumDescriptor = EnumDescriptor {
    full_name: DOC_CHANGE_KIND,
    values: &[
        V::new("KIND_UNSPECIFIED", 0),
        V::new("ADDED", 1),
        V::new("REMOVED", 2),
        V::new("MODIFIED", 3),
    ],
};

// Firestore v1 requests and documents.

pub static GET_DOCUMENT_REQUEST_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: GET_DOCUMENT_REQUEST,
    fields: &[
        F::scalar(1, "name", S::String),
        F::message(2, "mask", DOCUMENT_MASK),
        F::scalar(3, "transaction", S::Bytes).in_oneof(0),
        F::message(5, "read_time", TIMESTAMP_NAME).in_oneof(0),
    ],
    oneofs: &[OneofDescriptor::optional("consistency_selector")],
};

pub static COMMIT_REQUEST_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: COMMIT_REQUEST,
    fields: &[
        F::scalar(1, "database", S::String),
        F::message(2, "writes", WRITE).repeated(),
        F::scalar(3, "transaction", S::Bytes),
    ],
    oneofs: &[],
};

pub static WRITE_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: WRITE,
    fields: &[
        F::message(1, "update", DOCUMENT).in_oneof(0),
        F::scalar(2, "delete", S::String).in_oneof(0),
        F::message(6, "transform", DOCUMENT_TRANSFORM).in_oneof(0),
        F::message(3, "update_mask", DOCUMENT_MASK),
        F::message(7, "update_transforms", FIELD_TRANSFORM).repeated(),
        F::message(4, "current_document", PRECONDITION),
    ],
    oneofs: &[OneofDescriptor::optional("operation")],
};

pub static DOCUMENT_MASK_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: DOCUMENT_MASK,
    fields: &[F::scalar(1, "field_paths", S::String).repeated()],
    oneofs: &[],
};

pub static PRECONDITION_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: PRECONDITION,
    fields: &[
        F::scalar(1, "exists", S::Bool).in_oneof(0),
        F::message(2, "update_time", TIMESTAMP_NAME).in_oneof(0),
    ],
    oneofs: &[OneofDescriptor::optional("condition_type")],
};

pub static DOCUMENT_TRANSFORM_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: DOCUMENT_TRANSFORM,
    fields: &[
        F::scalar(1, "document", S::String),
        F::message(2, "field_transforms", FIELD_TRANSFORM).repeated(),
    ],
    oneofs: &[],
};

pub static FIELD_TRANSFORM_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: FIELD_TRANSFORM,
    fields: &[
        F::scalar(1, "field_path", S::String),
        F::enumeration(2, "set_to_server_value", SERVER_VALUE).in_oneof(0),
        F::message(3, "increment", VALUE).in_oneof(0),
        F::message(4, "maximum", VALUE).in_oneof(0),
        F::message(5, "minimum", VALUE).in_oneof(0),
        F::message(6, "append_missing_elements", ARRAY_VALUE).in_oneof(0),
        F::message(7, "remove_all_from_array", ARRAY_VALUE).in_oneof(0),
    ],
    oneofs: &[OneofDescriptor::optional("transform_type")],
};

pub static SERVER_VALUE_ENUM: EnumDescriptor = EnumDescriptor {
    full_name: SERVER_VALUE,
    values: &[
        V::new("SERVER_VALUE_UNSPECIFIED", 0),
        V::new("REQUEST_TIME", 1),
    ],
};

pub static DOCUMENT_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: DOCUMENT,
    fields: &[
        F::scalar(1, "name", S::String),
        F::message(2, "fields", VALUE).map(S::String),
        F::message(3, "create_time", TIMESTAMP_NAME),
        F::message(4, "update_time", TIMESTAMP_NAME),
    ],
    oneofs: &[],
};

pub static VALUE_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: VALUE,
    fields: &[
        F::enumeration(11, "null_value", NULL_VALUE_NAME).in_oneof(0),
        F::scalar(1, "boolean_value", S::Bool).in_oneof(0),
        F::scalar(2, "integer_value", S::Int64).in_oneof(0),
        F::scalar(3, "double_value", S::Double).in_oneof(0),
        F::message(10, "timestamp_value", TIMESTAMP_NAME).in_oneof(0),
        F::scalar(17, "string_value", S::String).in_oneof(0),
        F::scalar(18, "bytes_value", S::Bytes).in_oneof(0),
        F::scalar(5, "reference_value", S::String).in_oneof(0),
        F::message(8, "geo_point_value", LAT_LNG).in_oneof(0),
        F::message(9, "array_value", ARRAY_VALUE).in_oneof(0),
        F::message(6, "map_value", MAP_VALUE).in_oneof(0),
    ],
    oneofs: &[OneofDescriptor::optional("value_type")],
};

pub static ARRAY_VALUE_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: ARRAY_VALUE,
    fields: &[F::message(1, "values", VALUE).repeated()],
    oneofs: &[],
};

pub static MAP_VALUE_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: MAP_VALUE,
    fields: &[F::message(1, "fields", VALUE).map(S::String)],
    oneofs: &[],
};

// Structured queries.

pub static STRUCTURED_QUERY_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: STRUCTURED_QUERY,
    fields: &[
        F::message(1, "select", PROJECTION),
        F::message(2, "from", COLLECTION_SELECTOR).repeated(),
        F::message(3, "where", FILTER),
        F::message(4, "order_by", ORDER).repeated(),
        F::message(7, "start_at", QUERY_CURSOR),
        F::message(8, "end_at", QUERY_CURSOR),
        F::scalar(6, "offset", S::Int32),
        F::message(5, "limit", "google.protobuf.Int32Value"),
    ],
    oneofs: &[],
};

pub static COLLECTION_SELECTOR_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: COLLECTION_SELECTOR,
    fields: &[
        F::scalar(2, "collection_id", S::String),
        F::scalar(3, "all_descendants", S::Bool),
    ],
    oneofs: &[],
};

pub static FILTER_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: FILTER,
    fields: &[
        F::message(1, "composite_filter", COMPOSITE_FILTER).in_oneof(0),
        F::message(2, "field_filter", FIELD_FILTER).in_oneof(0),
        F::message(3, "unary_filter", UNARY_FILTER).in_oneof(0),
    ],
    oneofs: &[OneofDescriptor::optional("filter_type")],
};

pub static COMPOSITE_FILTER_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: COMPOSITE_FILTER,
    fields: &[
        F::enumeration(1, "op", COMPOSITE_OPERATOR),
        F::message(2, "filters", FILTER).repeated(),
    ],
    oneofs: &[],
};

pub static COMPOSITE_OPERATOR_ENUM: EnumDescriptor = EnumDescriptor {
    full_name: COMPOSITE_OPERATOR,
    values: &[
        V::new("OPERATOR_UNSPECIFIED", 0),
        V::new("AND", 1),
        V::new("OR", 2),
    ],
};

pub static FIELD_FILTER_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: FIELD_FILTER,
    fields: &[
        F::message(1, "field", FIELD_REFERENCE),
        F::enumeration(2, "op", FIELD_OPERATOR),
        F::message(3, "value", VALUE),
    ],
    oneofs: &[],
};

pub static FIELD_OPERATOR_ENUM: EnumDescriptor = EnumDescriptor {
    full_name: FIELD_OPERATOR,
    values: &[
        V::new("OPERATOR_UNSPECIFIED", 0),
        V::new("LESS_THAN", 1),
        V::new("LESS_THAN_OR_EQUAL", 2),
        V::new("GREATER_THAN", 3),
        V::new("GREATER_THAN_OR_EQUAL", 4),
        V::new("EQUAL", 5),
        V::new("NOT_EQUAL", 6),
        V::new("ARRAY_CONTAINS", 7),
        V::new("IN", 8),
        V::new("ARRAY_CONTAINS_ANY", 9),
        V::new("NOT_IN", 10),
    ],
};

pub static UNARY_FILTER_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: UNARY_FILTER,
    fields: &[
        F::enumeration(1, "op", UNARY_OPERATOR),
        F::message(2, "field", FIELD_REFERENCE).in_oneof(0),
    ],
    oneofs: &[OneofDescriptor::optional("operand_type")],
};

pub static UNARY_OPERATOR_ENUM: EnumDescriptor = EnumDescriptor {
    full_name: UNARY_OPERATOR,
    values: &[
        V::new("OPERATOR_UNSPECIFIED", 0),
        V::new("IS_NAN", 2),
        V::new("IS_NULL", 3),
        V::new("IS_NOT_NAN", 4),
        V::new("IS_NOT_NULL", 5),
    ],
};

pub static ORDER_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: ORDER,
    fields: &[
        F::message(1, "field", FIELD_REFERENCE),
        F::enumeration(2, "direction", DIRECTION),
    ],
    oneofs: &[],
};

pub static DIRECTION_ENUM: EnumDescriptor = EnumDescriptor {
    full_name: DIRECTION,
    values: &[
        V::new("DIRECTION_UNSPECIFIED", 0),
        V::new("ASCENDING", 1),
        V::new("DESCENDING", 2),
    ],
};

pub static FIELD_REFERENCE_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: FIELD_REFERENCE,
    fields: &[F::scalar(2, "field_path", S::String)],
    oneofs: &[],
};

pub static PROJECTION_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: PROJECTION,
    fields: &[F::message(2, "fields", FIELD_REFERENCE).repeated()],
    oneofs: &[],
};

pub static QUERY_CURSOR_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: QUERY_CURSOR,
    fields: &[
        F::message(1, "values", VALUE).repeated(),
        F::scalar(2, "before", S::Bool),
    ],
    oneofs: &[],
};

// Listen responses.

pub static LISTEN_RESPONSE_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: LISTEN_RESPONSE,
    fields: &[
        F::message(2, "target_change", TARGET_CHANGE).in_oneof(0),
        F::message(3, "document_change", DOCUMENT_CHANGE).in_oneof(0),
        F::message(4, "document_delete", DOCUMENT_DELETE).in_oneof(0),
        F::message(6, "document_remove", DOCUMENT_REMOVE).in_oneof(0),
        F::message(5, "filter", EXISTENCE_FILTER).in_oneof(0),
    ],
    oneofs: &[OneofDescriptor::optional("response_type")],
};

pub static TARGET_CHANGE_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: TARGET_CHANGE,
    fields: &[
        F::enumeration(1, "target_change_type", TARGET_CHANGE_TYPE),
        F::scalar(2, "target_ids", S::Int32).repeated(),
        F::message(3, "cause", STATUS),
        F::scalar(4, "resume_token", S::Bytes),
        F::message(6, "read_time", TIMESTAMP_NAME),
    ],
    oneofs: &[],
};

pub static TARGET_CHANGE_TYPE_ENUM: EnumDescriptor = EnumDescriptor {
    full_name: TARGET_CHANGE_TYPE,
    values: &[
        V::new("NO_CHANGE", 0),
        V::new("ADD", 1),
        V::new("REMOVE", 2),
        V::new("CURRENT", 3),
        V::new("RESET", 4),
    ],
};

pub static DOCUMENT_CHANGE_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: DOCUMENT_CHANGE,
    fields: &[
        F::message(1, "document", DOCUMENT),
        F::scalar(5, "target_ids", S::Int32).repeated(),
        F::scalar(6, "removed_target_ids", S::Int32).repeated(),
    ],
    oneofs: &[],
};

pub static DOCUMENT_DELETE_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: DOCUMENT_DELETE,
    fields: &[
        F::scalar(1, "document", S::String),
        F::scalar(6, "removed_target_ids", S::Int32).repeated(),
        F::message(4, "read_time", TIMESTAMP_NAME),
    ],
    oneofs: &[],
};

pub static DOCUMENT_REMOVE_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: DOCUMENT_REMOVE,
    fields: &[
        F::scalar(1, "document", S::String),
        F::scalar(2, "removed_target_ids", S::Int32).repeated(),
        F::message(4, "read_time", TIMESTAMP_NAME),
    ],
    oneofs: &[],
};

pub static EXISTENCE_FILTER_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: EXISTENCE_FILTER,
    fields: &[
        F::scalar(1, "target_id", S::Int32),
        F::scalar(2, "count", S::Int32),
    ],
    oneofs: &[],
};

// Shared Google types.

pub static LAT_LNG_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: LAT_LNG,
    fields: &[
        F::scalar(1, "latitude", S::Double),
        F::scalar(2, "longitude", S::Double),
    ],
    oneofs: &[],
};

pub static STATUS_MESSAGE: MessageDescriptor = MessageDescriptor {
    full_name: STATUS,
    fields: &[
        F::scalar(1, "code", S::Int32),
        F::scalar(2, "message", S::String),
    ],
    oneofs: &[],
};

/// Every message type in the conformance schema.
pub static MESSAGES: &[&MessageDescriptor] = &[
    &TEST_FILE_MESSAGE,
    &TEST_MESSAGE,
    &GET_TEST_MESSAGE,
    &CREATE_TEST_MESSAGE,
    &SET_TEST_MESSAGE,
    &UPDATE_TEST_MESSAGE,
    &UPDATE_PATHS_TEST_MESSAGE,
    &DELETE_TEST_MESSAGE,
    &SET_OPTION_MESSAGE,
    &QUERY_TEST_MESSAGE,
    &CLAUSE_MESSAGE,
    &SELECT_MESSAGE,
    &WHERE_MESSAGE,
    &ORDER_BY_MESSAGE,
    &CURSOR_MESSAGE,
    &DOC_SNAPSHOT_MESSAGE,
    &FIELD_PATH_MESSAGE,
    &LISTEN_TEST_MESSAGE,
    &SNAPSHOT_MESSAGE,
    &DOC_CHANGE_MESSAGE,
    &GET_DOCUMENT_REQUEST_MESSAGE,
    &COMMIT_REQUEST_MESSAGE,
    &WRITE_MESSAGE,
    &DOCUMENT_MASK_MESSAGE,
    &PRECONDITION_MESSAGE,
    &DOCUMENT_TRANSFORM_MESSAGE,
    &FIELD_TRANSFORM_MESSAGE,
    &DOCUMENT_MESSAGE,
    &VALUE_MESSAGE,
    &ARRAY_VALUE_MESSAGE,
    &MAP_VALUE_MESSAGE,
    &STRUCTURED_QUERY_MESSAGE,
    &COLLECTION_SELECTOR_MESSAGE,
    &FILTER_MESSAGE,
    &COMPOSITE_FILTER_MESSAGE,
    &FIELD_FILTER_MESSAGE,
    &UNARY_FILTER_MESSAGE,
    &ORDER_MESSAGE,
    &FIELD_REFERENCE_MESSAGE,
    &PROJECTION_MESSAGE,
    &QUERY_CURSOR_MESSAGE,
    &LISTEN_RESPONSE_MESSAGE,
    &TARGET_CHANGE_MESSAGE,
    &DOCUMENT_CHANGE_MESSAGE,
    &DOCUMENT_DELETE_MESSAGE,
    &DOCUMENT_REMOVE_MESSAGE,
    &EXISTENCE_FILTER_MESSAGE,
    &LAT_LNG_MESSAGE,
    &STATUS_MESSAGE,
];

/// Every enum type in the conformance schema.
pub static ENUMS: &[&EnumDescriptor] = &[
    &DOC_CHANGE_KIND_ENUM,
    &SERVER_VALUE_ENUM,
    &COMPOSITE_OPERATOR_ENUM,
    &FIELD_OPERATOR_ENUM,
    &UNARY_OPERATOR_ENUM,
    &DIRECTION_ENUM,
    &TARGET_CHANGE_TYPE_ENUM,
];
