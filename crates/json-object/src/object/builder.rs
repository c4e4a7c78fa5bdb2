//! Graph construction: normalize the input, clean keys, cast scalars, fill
//! defaults, then recurse into nested mappings and sequences.

use std::mem;
use std::sync::Arc;

use indexmap::IndexMap;
use log::{debug, trace};
use serde_json::Value as JsonValue;

use super::JsonObject;
use crate::coerce::cast;
use crate::error::{EmbeddedParseMiss, ParseError};
use crate::schema::{candidate_types, FieldType, ModelClass};
use crate::value::{json_kind, map_from_json, Key, Map, Value};

/// Construction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Coerce scalar values toward their declared types.
    pub cast_types: bool,
    /// Accepted for interface parity; insertion order is always kept.
    pub ordered: bool,
    /// Deepest nesting level accepted below the top-level object.
    pub max_depth: usize,
}

impl BuildOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 128;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn cast_types(mut self, cast_types: bool) -> Self {
        self.cast_types = cast_types;
        self
    }

    pub fn ordered(mut self, ordered: bool) -> Self {
        self.ordered = ordered;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            cast_types: false,
            ordered: false,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Construction input.
#[derive(Debug, Clone, Default)]
pub enum Data {
    #[default]
    Absent,
    /// JSON text; empty text and empty JSON values read as absent.
    Text(String),
    Map(Map),
    Json(JsonValue),
}

impl From<&str> for Data {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Data {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Map> for Data {
    fn from(value: Map) -> Self {
        Self::Map(value)
    }
}

impl From<JsonValue> for Data {
    fn from(value: JsonValue) -> Self {
        Self::Json(value)
    }
}

impl<T: Into<Data>> From<Option<T>> for Data {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

pub(crate) fn build(
    class: &Arc<ModelClass>,
    data: Data,
    options: &BuildOptions,
) -> Result<JsonObject, ParseError> {
    let raw = normalize(data)?;
    build_level(class, raw, options, 0)
}

fn normalize(data: Data) -> Result<Map, ParseError> {
    match data {
        Data::Absent => Ok(Map::new()),
        Data::Map(map) => Ok(map),
        Data::Text(text) if text.trim().is_empty() => Ok(Map::new()),
        Data::Text(text) => normalize(Data::Json(serde_json::from_str(&text)?)),
        Data::Json(JsonValue::Object(obj)) => Ok(map_from_json(obj)),
        Data::Json(other) if is_empty_json(&other) => Ok(Map::new()),
        Data::Json(other) => Err(ParseError::NotAnObject(json_kind(&other))),
    }
}

// `null`, `false`, zero, `""` and `[]` carry no attributes.
fn is_empty_json(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::Bool(b) => !b,
        JsonValue::Number(n) => n.as_f64() == Some(0.0),
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        JsonValue::Object(obj) => obj.is_empty(),
    }
}

/// Parse text holding an embedded JSON object.
pub(crate) fn parse_embedded(text: &str) -> Result<Map, EmbeddedParseMiss> {
    match serde_json::from_str::<JsonValue>(text) {
        Ok(JsonValue::Object(obj)) => Ok(map_from_json(obj)),
        Ok(other) => Err(EmbeddedParseMiss::NotAnObject(json_kind(&other))),
        Err(err) => Err(EmbeddedParseMiss::Json(err.to_string())),
    }
}

fn clean_key(key: Key) -> String {
    key.into_text().replace('-', "_")
}

fn clean_value(value: Value) -> Value {
    match value {
        Value::Bytes(bytes) => match String::from_utf8(bytes) {
            Ok(text) => Value::Str(text),
            Err(err) => Value::Bytes(err.into_bytes()),
        },
        other => other,
    }
}

fn build_level(
    class: &Arc<ModelClass>,
    raw: Map,
    options: &BuildOptions,
    depth: usize,
) -> Result<JsonObject, ParseError> {
    if depth > options.max_depth {
        return Err(ParseError::TooDeep(options.max_depth));
    }
    debug!("building {} from {} keys", class.name(), raw.len());
    let annotations = class.annotations();

    let mut record: IndexMap<String, Value> = raw
        .into_iter()
        .map(|(k, v)| (clean_key(k), clean_value(v)))
        .collect();
    // Classified before casting; defaults appended later are never nested.
    let nested: Vec<bool> = record.values().map(Value::is_nested).collect();

    if options.cast_types {
        for ((key, value), is_nested) in record.iter_mut().zip(&nested) {
            if !is_nested {
                let raw = mem::replace(value, Value::Null);
                *value = cast(annotations, key, raw);
            }
        }
    }

    for (key, default) in class.defaults() {
        if !default.is_null() && !record.contains_key(key) {
            record.insert(key.clone(), default.clone());
        }
    }

    for (index, is_nested) in nested.into_iter().enumerate() {
        if !is_nested {
            continue;
        }
        let Some((key, value)) = record.get_index_mut(index) else {
            continue;
        };
        let target = candidate_types(annotations, key, true)
            .into_iter()
            .next()
            .unwrap_or(FieldType::Generic);
        debug!(
            "{}.{key}: building nested {} as {target}",
            class.name(),
            value.kind()
        );
        let raw = mem::replace(value, Value::Null);
        *value = build_nested(&target, raw, options, depth + 1)?;
    }

    Ok(JsonObject::from_parts(Arc::clone(class), record))
}

fn build_nested(
    target: &FieldType,
    value: Value,
    options: &BuildOptions,
    depth: usize,
) -> Result<Value, ParseError> {
    match value {
        Value::Map(map) => build_mapping(target, map, options, depth),
        Value::List(items) => items
            .into_iter()
            .map(|item| build_element(target, item, options, depth))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        other => Ok(other),
    }
}

/// Mappings recurse; text recurses when it holds an embedded JSON object and
/// is kept verbatim otherwise; anything else passes through.
fn build_element(
    target: &FieldType,
    item: Value,
    options: &BuildOptions,
    depth: usize,
) -> Result<Value, ParseError> {
    match item {
        Value::Map(map) => build_mapping(target, map, options, depth),
        Value::Str(text) => match parse_embedded(&text) {
            Ok(map) => build_mapping(target, map, options, depth),
            Err(miss) => {
                trace!("keeping list text element: {miss}");
                Ok(Value::Str(text))
            }
        },
        other => Ok(other),
    }
}

fn build_mapping(
    target: &FieldType,
    map: Map,
    options: &BuildOptions,
    depth: usize,
) -> Result<Value, ParseError> {
    match target {
        FieldType::Model(class) => build_level(class, map, options, depth).map(Value::Object),
        FieldType::Map => Ok(Value::Map(map)),
        _ => build_level(&ModelClass::generic(), map, options, depth).map(Value::Object),
    }
}
