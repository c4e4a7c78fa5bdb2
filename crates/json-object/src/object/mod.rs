//! Attributed objects backed by a single ordered record.

mod builder;
mod export;

use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

pub use builder::{BuildOptions, Data};
pub(crate) use builder::parse_embedded;

use crate::error::ParseError;
use crate::schema::ModelClass;
use crate::value::{Map, Value};

static NULL: Value = Value::Null;

/// An instance of a model class.
///
/// Attributes live in one ordered record. Reads, writes and exports all go
/// through it, so there is no second view to keep in sync.
#[derive(Clone)]
pub struct JsonObject {
    class: Arc<ModelClass>,
    record: IndexMap<String, Value>,
}

impl JsonObject {
    /// Build an instance of `class` from JSON text, a raw mapping, a parsed
    /// JSON value, or nothing.
    ///
    /// Only malformed outer input fails. Values that cannot be coerced keep
    /// their raw form.
    pub fn build(
        class: &Arc<ModelClass>,
        data: impl Into<Data>,
        options: BuildOptions,
    ) -> Result<Self, ParseError> {
        builder::build(class, data.into(), &options)
    }

    pub fn from_json(
        class: &Arc<ModelClass>,
        text: &str,
        options: BuildOptions,
    ) -> Result<Self, ParseError> {
        Self::build(class, Data::from(text), options)
    }

    pub fn from_map(
        class: &Arc<ModelClass>,
        map: Map,
        options: BuildOptions,
    ) -> Result<Self, ParseError> {
        Self::build(class, Data::Map(map), options)
    }

    /// Build a generic instance with default options.
    pub fn generic(data: impl Into<Data>) -> Result<Self, ParseError> {
        Self::build(&ModelClass::generic(), data, BuildOptions::default())
    }

    /// An instance carrying only the class's non-null defaults.
    pub fn empty(class: &Arc<ModelClass>) -> Self {
        let record = class
            .defaults()
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self::from_parts(Arc::clone(class), record)
    }

    pub(crate) fn from_parts(class: Arc<ModelClass>, record: IndexMap<String, Value>) -> Self {
        Self { class, record }
    }

    pub fn class(&self) -> &Arc<ModelClass> {
        &self.class
    }

    /// `true` when this instance's class is `class` or one of its subclasses.
    pub fn is_instance_of(&self, class: &Arc<ModelClass>) -> bool {
        self.class.is_subclass_of(class)
    }

    /// Attribute value, falling back to the class default.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.record
            .get(name)
            .or_else(|| self.class.default_for(name))
    }

    /// Mutable access to an attribute present in the record.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.record.get_mut(name)
    }

    /// Assign an attribute, returning the previous value. No coercion or
    /// nesting is applied; an existing key keeps its position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.record.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.record.shift_remove(name)
    }

    /// `true` when the record holds `name`; class defaults are not consulted.
    pub fn contains(&self, name: &str) -> bool {
        self.record.contains_key(name)
    }

    pub fn record(&self) -> &IndexMap<String, Value> {
        &self.record
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.record.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.record.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.record.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }
}

impl Index<&str> for JsonObject {
    type Output = Value;

    /// Missing attributes read as [`Value::Null`].
    fn index(&self, name: &str) -> &Value {
        self.get(name).unwrap_or(&NULL)
    }
}

impl PartialEq for JsonObject {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.class, &other.class) && self.record == other.record
    }
}

impl fmt::Debug for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.class.name())?;
        f.debug_map().entries(self.record.iter()).finish()
    }
}

impl fmt::Display for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json(None))
    }
}

impl Serialize for JsonObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.record.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;
    use crate::value::Key;
    use serde_json::json;

    fn tree() -> Arc<ModelClass> {
        ModelClass::builder("Tree")
            .field("name", FieldType::Str)
            .field_with_default("species", FieldType::Str, "oak")
            .field_with_default("planted", FieldType::Date, Value::Null)
            .build()
    }

    #[test]
    fn get_falls_back_to_class_default() {
        let obj = JsonObject::build(&tree(), json!({"name": "Gus"}), BuildOptions::default())
            .unwrap();
        assert_eq!(obj.get("species"), Some(&Value::from("oak")));
        // Explicit null default: readable, but not in the record.
        assert_eq!(obj.get("planted"), Some(&Value::Null));
        assert!(!obj.contains("planted"));
        assert_eq!(obj.get("height"), None);
        assert_eq!(obj["height"], Value::Null);
    }

    #[test]
    fn set_updates_single_record() {
        let mut obj = JsonObject::generic(json!({"a": 1, "b": 2})).unwrap();
        assert_eq!(obj.set("a", "changed"), Some(Value::Int(1)));
        assert_eq!(obj.set("c", 3), None);
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(obj["a"], Value::from("changed"));
        assert_eq!(obj.to_dict()[&Key::from("a")], Value::from("changed"));

        if let Some(v) = obj.get_mut("b") {
            *v = Value::Bool(false);
        }
        assert_eq!(obj.record().get("b"), Some(&Value::Bool(false)));

        assert_eq!(obj.remove("a"), Some(Value::from("changed")));
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["b", "c"]);
        assert_eq!(obj.len(), 2);
    }

    #[test]
    fn set_does_not_coerce() {
        let class = ModelClass::builder("Typed").field("n", FieldType::Int).build();
        let mut obj = JsonObject::empty(&class);
        obj.set("n", "12");
        assert_eq!(obj["n"], Value::from("12"));
    }

    #[test]
    fn empty_applies_defaults() {
        let obj = JsonObject::empty(&tree());
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["species"]);
    }

    #[test]
    fn instance_of_follows_class_chain() {
        let base = tree();
        let oak = ModelClass::builder("Oak").extends(&base).build();
        let obj = JsonObject::empty(&oak);
        assert!(obj.is_instance_of(&base));
        assert!(obj.is_instance_of(&ModelClass::generic()));
        assert!(!JsonObject::empty(&base).is_instance_of(&oak));
    }

    #[test]
    fn display_and_debug() {
        let obj = JsonObject::generic(r#"{"a": 1, "b": [true]}"#).unwrap();
        assert_eq!(obj.to_string(), r#"{"a": 1, "b": [true]}"#);
        assert_eq!(format!("{obj:?}"), r#"JsonObject {"a": Int(1), "b": List([Bool(true)])}"#);
    }

    #[test]
    fn equality_compares_class_and_record() {
        let a = JsonObject::generic(json!({"x": 1})).unwrap();
        let b = JsonObject::generic(r#"{"x": 1}"#).unwrap();
        assert_eq!(a, b);
        let c = JsonObject::build(&tree(), json!({"x": 1}), BuildOptions::default()).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn same_named_classes_are_distinct() {
        let ints = ModelClass::builder("M").field("x", FieldType::Int).build();
        let texts = ModelClass::builder("M").field("x", FieldType::Str).build();
        let a = JsonObject::build(&ints, json!({"x": 1}), BuildOptions::default()).unwrap();
        let b = JsonObject::build(&texts, json!({"x": 1}), BuildOptions::default()).unwrap();
        assert_eq!(a.record(), b.record());
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
