//! Tagged value codec.
//!
//! DynamoDB speaks a tagged JSON format where every node, nested ones
//! included, is an object with a single type tag:
//!
//! ```json
//! {"M": {"isbn": {"S": "123"}, "pages": {"N": "42"}, "flag": {"BOOL": true}}}
//! ```
//!
//! [`decode`] turns such a node into a plain [`Value`] tree and [`encode`] goes
//! the other way. [`tag_item`] and [`untag_item`] bridge the tagged JSON form
//! and the SDK's [`types::AttributeValue`] items.

use crate::common;

use aws_sdk_dynamodb::types;
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// String tag.
pub const STRING: &str = "S";
/// Number tag; the payload is the number's decimal string.
pub const NUMBER: &str = "N";
/// Boolean tag.
pub const BOOLEAN: &str = "BOOL";
/// Null tag.
pub const NULL: &str = "NULL";
/// Map tag; the payload maps field names to tagged nodes.
pub const MAP: &str = "M";
/// List tag; the payload is a sequence of tagged nodes.
pub const LIST: &str = "L";

const STRING_SET: &str = "SS";
const NUMBER_SET: &str = "NS";
const BINARY: &str = "B";
const BINARY_SET: &str = "BS";
const UNKNOWN: &str = "UNKNOWN";

/// Failure to decode a tagged node.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DecodeError {
    /// The node is not an object holding exactly one tag.
    #[error("expected an object with a single type tag, found {0}")]
    NotTagged(Value),
    /// The tag is not one of `S`, `N`, `BOOL`, `NULL`, `M`, `L`.
    #[error("unrecognised type tag `{0}`")]
    UnknownTag(String),
    /// The tag is known but its payload has the wrong shape.
    #[error("type tag `{tag}` cannot carry {payload}")]
    InvalidPayload {
        /// The tag of the offending node.
        tag: String,
        /// The payload found under the tag.
        payload: Value,
    },
    /// The payload of an `N` node is not a representable number.
    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),
}

/// Codec result.
pub type Result<T, E = DecodeError> = std::result::Result<T, E>;

fn tagged(tag: &str, payload: Value) -> Value {
    Value::Object(Map::from_iter([(tag.to_string(), payload)]))
}

fn split_tag(object: &Map<String, Value>) -> Result<(&str, &Value)> {
    let mut entries = object.iter();
    match (entries.next(), entries.next()) {
        (Some((tag, payload)), None) => Ok((tag.as_str(), payload)),
        _ => Err(DecodeError::NotTagged(Value::Object(object.clone()))),
    }
}

fn invalid_payload(tag: &str, payload: &Value) -> DecodeError {
    DecodeError::InvalidPayload {
        tag: tag.to_string(),
        payload: payload.clone(),
    }
}

/// Decode a tagged node into a plain value.
///
/// ```rust
/// use dynamodb_books::codec;
/// use serde_json::json;
///
/// let node = json!({"M": {"isbn": {"S": "123"}, "pages": {"N": "42"}}});
/// assert_eq!(codec::decode(&node).unwrap(), json!({"isbn": "123", "pages": 42}));
/// ```
pub fn decode(node: &Value) -> Result<Value> {
    match node {
        Value::Object(object) => decode_object(object),
        _ => Err(DecodeError::NotTagged(node.clone())),
    }
}

/// Decode a top-level storage document, i.e. the node `{"M": document}`.
pub fn decode_document(document: &Map<String, Value>) -> Result<Value> {
    decode_map(document)
}

fn decode_object(object: &Map<String, Value>) -> Result<Value> {
    let (tag, payload) = split_tag(object)?;
    match (tag, payload) {
        (STRING, Value::String(_)) | (BOOLEAN, Value::Bool(_)) => Ok(payload.clone()),
        (NULL, _) => Ok(Value::Null),
        (NUMBER, Value::String(number)) => decode_number(number),
        (MAP, Value::Object(fields)) => decode_map(fields),
        (LIST, Value::Array(elements)) => decode_list(elements),
        (STRING | BOOLEAN | NUMBER | MAP | LIST, _) => Err(invalid_payload(tag, payload)),
        _ => Err(DecodeError::UnknownTag(tag.to_string())),
    }
}

fn decode_number(number: &str) -> Result<Value> {
    let invalid = || DecodeError::InvalidNumber(number.to_string());
    let float = || {
        number
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(invalid)
    };
    if number.contains(['.', 'e', 'E']) {
        float()
    } else if let Ok(integer) = number.parse::<i64>() {
        Ok(Value::from(integer))
    } else {
        // integers wider than 64 bits are rejected rather than rounded
        number.parse::<u64>().map(Value::from).map_err(|_| invalid())
    }
}

fn decode_map(fields: &Map<String, Value>) -> Result<Value> {
    let mut decoded = Map::new();
    for (field, sub_node) in fields {
        match sub_node {
            // a list nested one level inside a map tag stands for the whole map
            Value::Array(elements) if field.eq_ignore_ascii_case(LIST) => {
                return decode_list(elements);
            }
            Value::Object(object) => {
                decoded.insert(field.clone(), decode_object(object)?);
            }
            // flat input: the map payload is itself a single tagged node
            _ => return decode_object(fields),
        }
    }
    Ok(Value::Object(decoded))
}

fn decode_list(elements: &[Value]) -> Result<Value> {
    elements
        .iter()
        .map(decode)
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}

/// Encode a plain value into its tagged form.
///
/// ```rust
/// use dynamodb_books::codec;
/// use serde_json::json;
///
/// let node = codec::encode(&json!({"pages": 42}));
/// assert_eq!(node, json!({"M": {"pages": {"N": "42"}}}));
/// ```
pub fn encode(value: &Value) -> Value {
    match value {
        Value::String(string) => tagged(STRING, Value::String(string.clone())),
        Value::Number(number) => tagged(NUMBER, Value::String(number.to_string())),
        Value::Bool(boolean) => tagged(BOOLEAN, Value::Bool(*boolean)),
        Value::Null => tagged(NULL, Value::Bool(true)),
        Value::Array(elements) => tagged(LIST, Value::Array(elements.iter().map(encode).collect())),
        Value::Object(fields) => tagged(MAP, Value::Object(encode_document(fields))),
    }
}

/// Encode every field of a top-level document, the inverse of [`decode_document`].
pub fn encode_document(document: &Map<String, Value>) -> Map<String, Value> {
    document
        .iter()
        .map(|(field, value)| (field.clone(), encode(value)))
        .collect()
}

/// Encode a record whose persisted fields are all opaque strings.
///
/// Page counts and dates included, every field becomes an `S` node.
pub fn encode_record<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(field, value)| (field.to_string(), tagged(STRING, Value::String(value.to_string()))))
        .collect()
}

/// Render an SDK attribute value in tagged JSON form.
pub fn tag_attribute_value(value: &types::AttributeValue) -> Value {
    let bytes = |blob: &aws_sdk_dynamodb::primitives::Blob| Value::from(blob.as_ref().to_vec());
    match value {
        types::AttributeValue::S(string) => tagged(STRING, Value::String(string.clone())),
        types::AttributeValue::N(number) => tagged(NUMBER, Value::String(number.clone())),
        types::AttributeValue::Bool(boolean) => tagged(BOOLEAN, Value::Bool(*boolean)),
        types::AttributeValue::Null(null) => tagged(NULL, Value::Bool(*null)),
        types::AttributeValue::M(fields) => tagged(MAP, Value::Object(tag_item(fields))),
        types::AttributeValue::L(elements) => tagged(
            LIST,
            Value::Array(elements.iter().map(tag_attribute_value).collect()),
        ),
        types::AttributeValue::Ss(set) => tagged(STRING_SET, Value::from(set.clone())),
        types::AttributeValue::Ns(set) => tagged(NUMBER_SET, Value::from(set.clone())),
        types::AttributeValue::B(blob) => tagged(BINARY, bytes(blob)),
        types::AttributeValue::Bs(set) => {
            tagged(BINARY_SET, Value::Array(set.iter().map(bytes).collect()))
        }
        _ => tagged(UNKNOWN, Value::Null),
    }
}

/// Render a stored item as a tagged JSON document.
pub fn tag_item(item: &common::Item) -> Map<String, Value> {
    item.iter()
        .map(|(field, value)| (field.clone(), tag_attribute_value(value)))
        .collect()
}

/// Convert a tagged JSON node into an SDK attribute value.
pub fn untag_attribute_value(node: &Value) -> Result<types::AttributeValue> {
    let Value::Object(object) = node else {
        return Err(DecodeError::NotTagged(node.clone()));
    };
    let (tag, payload) = split_tag(object)?;
    match (tag, payload) {
        (STRING, Value::String(string)) => Ok(types::AttributeValue::S(string.clone())),
        (NUMBER, Value::String(number)) => Ok(types::AttributeValue::N(number.clone())),
        (BOOLEAN, Value::Bool(boolean)) => Ok(types::AttributeValue::Bool(*boolean)),
        (NULL, _) => Ok(types::AttributeValue::Null(true)),
        (MAP, Value::Object(fields)) => untag_item(fields).map(types::AttributeValue::M),
        (LIST, Value::Array(elements)) => elements
            .iter()
            .map(untag_attribute_value)
            .collect::<Result<Vec<_>>>()
            .map(types::AttributeValue::L),
        (STRING | BOOLEAN | NUMBER | MAP | LIST, _) => Err(invalid_payload(tag, payload)),
        _ => Err(DecodeError::UnknownTag(tag.to_string())),
    }
}

/// Convert a tagged JSON document into a storable item.
pub fn untag_item(document: &Map<String, Value>) -> Result<common::Item> {
    document
        .iter()
        .map(|(field, node)| Ok((field.clone(), untag_attribute_value(node)?)))
        .collect()
}
