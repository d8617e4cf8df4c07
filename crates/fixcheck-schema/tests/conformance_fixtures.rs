//! Integration test: decode representative Firestore conformance fixtures.
//!
//! The documents below follow the shape of the published cross-language
//! test files (one `TestFile` per JSON document, one `Test` per entry).

use fixcheck_schema::{conformance, DecodeError, FieldValue, JsonDecoder, JsonEncoder, MappingError, Schema};
use proptest::prelude::*;
use serde_json::{json, Value};

fn decode(schema: &Schema, text: &str) -> Result<fixcheck_schema::DynamicMessage, DecodeError> {
    JsonDecoder::new(schema).decode_slice(conformance::TEST_FILE, text.as_bytes())
}

const GET_BASIC: &str = r#"{
  "tests": [
    {
      "description": "get: get a document",
      "comment": "A call to DocumentRef.Get",
      "get": {
        "docRefPath": "projects/projectID/databases/(default)/documents/C/d",
        "request": {
          "name": "projects/projectID/databases/(default)/documents/C/d"
        }
      }
    }
  ]
}"#;

const CREATE_WITH_TRANSFORM: &str = r#"{
  "tests": [
    {
      "description": "create: ServerTimestamp with data",
      "create": {
        "docRefPath": "projects/projectID/databases/(default)/documents/C/d",
        "jsonData": "{\"a\": 1, \"b\": \"ServerTimestamp\"}",
        "request": {
          "database": "projects/projectID/databases/(default)",
          "writes": [
            {
              "update": {
                "name": "projects/projectID/databases/(default)/documents/C/d",
                "fields": {
                  "a": { "integerValue": "1" }
                }
              },
              "updateTransforms": [
                { "fieldPath": "b", "setToServerValue": "REQUEST_TIME" }
              ],
              "currentDocument": { "exists": false }
            }
          ]
        }
      }
    }
  ]
}"#;

const SET_MERGE: &str = r#"{
  "tests": [
    {
      "description": "set-merge: Merge with a field",
      "set": {
        "docRefPath": "projects/projectID/databases/(default)/documents/C/d",
        "option": { "fields": [ { "field": ["a"] } ] },
        "jsonData": "{\"a\": 1, \"b\": 2}",
        "request": {
          "database": "projects/projectID/databases/(default)",
          "writes": [
            {
              "update": {
                "name": "projects/projectID/databases/(default)/documents/C/d",
                "fields": { "a": { "integerValue": "1" } }
              },
              "updateMask": { "fieldPaths": ["a"] }
            }
          ]
        }
      }
    }
  ]
}"#;

const UPDATE_PATHS_PRECONDITION: &str = r#"{
  "tests": [
    {
      "description": "update-paths: last-update-time precondition",
      "updatePaths": {
        "docRefPath": "projects/projectID/databases/(default)/documents/C/d",
        "precondition": { "updateTime": "1970-01-01T00:00:42Z" },
        "fieldPaths": [ { "field": ["a"] } ],
        "jsonValues": ["1"],
        "request": {
          "database": "projects/projectID/databases/(default)",
          "writes": [
            {
              "update": {
                "name": "projects/projectID/databases/(default)/documents/C/d",
                "fields": { "a": { "integerValue": "1" } }
              },
              "updateMask": { "fieldPaths": ["a"] },
              "currentDocument": { "updateTime": "1970-01-01T00:00:42Z" }
            }
          ]
        }
      }
    }
  ]
}"#;

const QUERY_FILTER_ORDER_LIMIT: &str = r#"{
  "tests": [
    {
      "description": "query: where, orderBy and limit",
      "query": {
        "collPath": "projects/projectID/databases/(default)/documents/C",
        "clauses": [
          { "where": { "path": { "field": ["a"] }, "op": ">", "jsonValue": "5" } },
          { "orderBy": { "path": { "field": ["a"] }, "direction": "asc" } },
          { "limit": 2 }
        ],
        "query": {
          "from": [ { "collectionId": "C" } ],
          "where": {
            "fieldFilter": {
              "field": { "fieldPath": "a" },
              "op": "GREATER_THAN",
              "value": { "integerValue": "5" }
            }
          },
          "orderBy": [ { "field": { "fieldPath": "a" }, "direction": "ASCENDING" } ],
          "limit": 2
        }
      }
    }
  ]
}"#;

const LISTEN_ADD: &str = r#"{
  "tests": [
    {
      "description": "listen: add a doc",
      "listen": {
        "responses": [
          {
            "documentChange": {
              "document": {
                "name": "projects/projectID/databases/(default)/documents/C/d1",
                "fields": { "a": { "integerValue": "3" } },
                "createTime": "1970-01-01T00:00:01Z",
                "updateTime": "1970-01-01T00:00:01Z"
              },
              "targetIds": [1]
            }
          },
          {
            "targetChange": { "targetChangeType": "CURRENT" }
          },
          {
            "targetChange": { "readTime": "1970-01-01T00:00:02Z" }
          }
        ],
        "snapshots": [
          {
            "docs": [
              {
                "name": "projects/projectID/databases/(default)/documents/C/d1",
                "fields": { "a": { "integerValue": "3" } },
                "createTime": "1970-01-01T00:00:01Z",
                "updateTime": "1970-01-01T00:00:01Z"
              }
            ],
            "changes": [
              {
                "kind": "ADDED",
                "doc": {
                  "name": "projects/projectID/databases/(default)/documents/C/d1",
                  "fields": { "a": { "integerValue": "3" } },
                  "createTime": "1970-01-01T00:00:01Z",
                  "updateTime": "1970-01-01T00:00:01Z"
                },
                "oldIndex": -1
              }
            ],
            "readTime": "1970-01-01T00:00:02Z"
          }
        ]
      }
    }
  ]
}"#;

#[test]
fn test_realistic_fixtures_decode() {
    let schema = Schema::conformance().unwrap();
    for (name, text) in [
        ("get", GET_BASIC),
        ("create", CREATE_WITH_TRANSFORM),
        ("set", SET_MERGE),
        ("update-paths", UPDATE_PATHS_PRECONDITION),
        ("query", QUERY_FILTER_ORDER_LIMIT),
        ("listen", LISTEN_ADD),
    ] {
        let decoded = decode(&schema, text);
        assert!(decoded.is_ok(), "{name} fixture failed: {}", decoded.unwrap_err());
    }
}

#[test]
fn test_realistic_fixtures_survive_reencoding() {
    let schema = Schema::conformance().unwrap();
    let encoder = JsonEncoder::new(&schema);
    let decoder = JsonDecoder::new(&schema);
    for text in [GET_BASIC, CREATE_WITH_TRANSFORM, SET_MERGE, UPDATE_PATHS_PRECONDITION, QUERY_FILTER_ORDER_LIMIT, LISTEN_ADD] {
        let first = decode(&schema, text).unwrap();
        let json = encoder.encode(&first).unwrap();
        let second = decoder.decode_value(conformance::TEST_FILE, &json).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_canonical_fixture_encodes_to_itself() {
    let schema = Schema::conformance().unwrap();
    let original: Value = serde_json::from_str(LISTEN_ADD).unwrap();
    let decoded = decode(&schema, LISTEN_ADD).unwrap();
    let encoded = JsonEncoder::new(&schema).encode(&decoded).unwrap();
    assert_eq!(encoded, original);
}

#[test]
fn test_decoded_values_are_reachable_by_name() {
    let schema = Schema::conformance().unwrap();
    let file = decode(&schema, CREATE_WITH_TRANSFORM).unwrap();
    let tests = file.field(&schema, "tests").and_then(FieldValue::as_list).unwrap();
    assert_eq!(tests.len(), 1);

    let create = tests[0]
        .as_message()
        .and_then(|t| t.field(&schema, "create"))
        .and_then(FieldValue::as_message)
        .unwrap();
    assert_eq!(
        create.field(&schema, "json_data").and_then(FieldValue::as_str),
        Some("{\"a\": 1, \"b\": \"ServerTimestamp\"}")
    );

    let write = create
        .field(&schema, "request")
        .and_then(FieldValue::as_message)
        .and_then(|r| r.field(&schema, "writes"))
        .and_then(FieldValue::as_list)
        .and_then(|w| w.first())
        .and_then(FieldValue::as_message)
        .unwrap();
    let transform = write
        .field(&schema, "update_transforms")
        .and_then(FieldValue::as_list)
        .and_then(|t| t.first())
        .and_then(FieldValue::as_message)
        .unwrap();
    assert_eq!(
        transform.field(&schema, "setToServerValue").and_then(FieldValue::as_enum),
        Some(1)
    );
}

#[test]
fn test_empty_file_and_description_only_file_are_valid() {
    let schema = Schema::conformance().unwrap();
    assert!(decode(&schema, "{}").unwrap().is_empty());
    decode(&schema, r#"{"description": "basic get"}"#).unwrap();
}

#[test]
fn test_wrong_description_type_is_rejected() {
    let schema = Schema::conformance().unwrap();
    let err = decode(&schema, r#"{"description": 123}"#).unwrap_err();
    assert_eq!(err.path(), Some("description"));
}

#[test]
fn test_truncated_document_is_a_syntax_error() {
    let schema = Schema::conformance().unwrap();
    let truncated = &GET_BASIC[..GET_BASIC.len() / 2];
    assert!(matches!(decode(&schema, truncated), Err(DecodeError::Syntax(_))));
}

#[test]
fn test_query_with_two_clause_kinds_is_rejected() {
    let schema = Schema::conformance().unwrap();
    let err = decode(
        &schema,
        r#"{"tests": [{"query": {"clauses": [{"limit": 1, "offset": 2}]}}]}"#,
    )
    .unwrap_err();
    assert_eq!(err.path(), Some("tests[0].query.clauses[0].offset"));
    assert!(matches!(err.kind(), Some(MappingError::OneofConflict { oneof, .. }) if oneof == "clause"));
}

#[test]
fn test_error_points_at_deep_field() {
    let schema = Schema::conformance().unwrap();
    let text = GET_BASIC.replace(
        r#""name": "projects/projectID/databases/(default)/documents/C/d""#,
        r#""name": ["not", "a", "string"]"#,
    );
    let err = decode(&schema, &text).unwrap_err();
    assert_eq!(err.path(), Some("tests[0].get.request.name"));
    assert_eq!(
        err.to_string(),
        "tests[0].get.request.name: expected string, found array"
    );
}

fn change_kind_names() -> impl Strategy<Value = (&'static str, i32)> {
    prop::sample::select(conformance::DOC_CHANGE_KIND_ENUM.values)
        .prop_map(|v| (v.name, v.number))
}

proptest! {
    /// An enum given by name and by number decodes to the same message.
    #[test]
    fn enum_name_and_number_agree((name, number) in change_kind_names()) {
        let schema = Schema::conformance().unwrap();
        let decoder = JsonDecoder::new(&schema);
        let doc = |kind: Value| json!({"tests": [{"listen": {"snapshots": [{"changes": [{"kind": kind}]}]}}]});
        let by_name = decoder.decode_value(conformance::TEST_FILE, &doc(json!(name))).unwrap();
        let by_number = decoder.decode_value(conformance::TEST_FILE, &doc(json!(number))).unwrap();
        prop_assert_eq!(by_name, by_number);
    }

    /// Any int64 decodes the same from a JSON number and a JSON string.
    #[test]
    fn int64_number_and_string_agree(n in any::<i64>()) {
        let schema = Schema::conformance().unwrap();
        let decoder = JsonDecoder::new(&schema);
        let doc = |v: Value| json!({"tests": [{"listen": {"snapshots": [{"docs": [{"fields": {"n": {"integerValue": v}}}]}]}}]});
        let from_number = decoder.decode_value(conformance::TEST_FILE, &doc(json!(n))).unwrap();
        let from_string = decoder.decode_value(conformance::TEST_FILE, &doc(json!(n.to_string()))).unwrap();
        prop_assert_eq!(from_number, from_string);
    }

    /// Arbitrary bytes survive a base64 trip through the decoder and encoder.
    #[test]
    fn bytes_reencode_identically(raw in prop::collection::vec(any::<u8>(), 0..64)) {
        use base64::Engine;
        let schema = Schema::conformance().unwrap();
        let encoded = base64::engine::general_purpose::STANDARD.encode(&raw);
        let doc = json!({"tests": [{"get": {"request": {"transaction": encoded}}}]});
        let decoded = JsonDecoder::new(&schema).decode_value(conformance::TEST_FILE, &doc).unwrap();
        let again = JsonEncoder::new(&schema).encode(&decoded).unwrap();
        prop_assert_eq!(again, doc);
    }
}
