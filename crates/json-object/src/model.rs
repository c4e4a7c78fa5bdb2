//! Typed wrappers over [`JsonObject`].
//!
//! A wrapper names its schema once and gains construction and export:
//!
//! ```
//! use std::sync::{Arc, OnceLock};
//! use json_object::{BuildOptions, FieldType, JsonObject, Model, ModelClass, Value};
//!
//! struct Tree(JsonObject);
//!
//! impl Model for Tree {
//!     fn class() -> Arc<ModelClass> {
//!         static CLASS: OnceLock<Arc<ModelClass>> = OnceLock::new();
//!         CLASS
//!             .get_or_init(|| {
//!                 ModelClass::builder("Tree")
//!                     .field("height", FieldType::Int)
//!                     .field_with_default("species", FieldType::Str, "oak")
//!                     .build()
//!             })
//!             .clone()
//!     }
//!
//!     fn from_object(object: JsonObject) -> Self {
//!         Tree(object)
//!     }
//!
//!     fn object(&self) -> &JsonObject {
//!         &self.0
//!     }
//!
//!     fn object_mut(&mut self) -> &mut JsonObject {
//!         &mut self.0
//!     }
//! }
//!
//! let tree = Tree::load(r#"{"height": "12"}"#, BuildOptions::new().cast_types(true)).unwrap();
//! assert_eq!(tree.get("height"), Some(&Value::Int(12)));
//! assert_eq!(tree.get("species"), Some(&Value::from("oak")));
//! ```

use std::sync::Arc;

use crate::error::ParseError;
use crate::object::{BuildOptions, Data, JsonObject};
use crate::schema::ModelClass;
use crate::value::{Map, Value};

pub trait Model: Sized {
    /// The schema instances of this type are built against.
    fn class() -> Arc<ModelClass>;

    fn from_object(object: JsonObject) -> Self;

    fn object(&self) -> &JsonObject;

    fn object_mut(&mut self) -> &mut JsonObject;

    fn load(data: impl Into<Data>, options: BuildOptions) -> Result<Self, ParseError> {
        JsonObject::build(&Self::class(), data, options).map(Self::from_object)
    }

    /// An instance holding only the class defaults.
    fn empty() -> Self {
        Self::from_object(JsonObject::empty(&Self::class()))
    }

    fn get(&self, name: &str) -> Option<&Value> {
        self.object().get(name)
    }

    fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.object_mut().set(name, value)
    }

    fn to_dict(&self) -> Map {
        self.object().to_dict()
    }

    fn to_json(&self, indent: Option<usize>) -> String {
        self.object().to_json(indent)
    }
}

impl Model for JsonObject {
    fn class() -> Arc<ModelClass> {
        ModelClass::generic()
    }

    fn from_object(object: JsonObject) -> Self {
        object
    }

    fn object(&self) -> &JsonObject {
        self
    }

    fn object_mut(&mut self) -> &mut JsonObject {
        self
    }
}
