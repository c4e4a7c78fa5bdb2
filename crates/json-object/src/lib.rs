//! Bind JSON documents and key/value mappings to attributed object graphs.
//!
//! A [`ModelClass`] declares attribute types and defaults, optionally
//! composed from ancestor classes. [`JsonObject::build`] turns JSON text or a
//! raw [`Map`] into an instance of that class: keys are normalized, scalar
//! values are optionally coerced toward their declared types, defaults fill
//! the gaps, and nested mappings and sequences become nested instances.
//! Coercion is best effort. A value no candidate type accepts is kept as it
//! came in; only a malformed outer document is an error.
//!
//! ```
//! use json_object::{BuildOptions, FieldType, JsonObject, ModelClass, Value};
//!
//! let batter = ModelClass::builder("Batter")
//!     .field("id", FieldType::Int)
//!     .field("type", FieldType::Str)
//!     .build();
//! let cake = ModelClass::builder("Cake")
//!     .field("ppu", FieldType::Float)
//!     .field("batters", FieldType::list(FieldType::model(&batter)))
//!     .build();
//!
//! let obj = JsonObject::build(
//!     &cake,
//!     r#"{"ppu": "0.55", "batters": [{"id": "1001", "type": "Regular"}]}"#,
//!     BuildOptions::new().cast_types(true),
//! )
//! .unwrap();
//!
//! assert_eq!(obj["ppu"], Value::Float(0.55));
//! let first = obj["batters"].as_list().unwrap()[0].as_object().unwrap();
//! assert_eq!(first["id"], Value::Int(1001));
//! assert_eq!(
//!     obj.to_json(None),
//!     r#"{"ppu": 0.55, "batters": [{"id": 1001, "type": "Regular"}]}"#
//! );
//! ```

pub mod coerce;
pub mod error;
pub mod model;
pub mod object;
pub mod schema;
pub mod temporal;
pub mod value;

pub use coerce::{cast, try_cast};
pub use error::{CoercionMiss, EmbeddedParseMiss, ParseError};
pub use model::Model;
pub use object::{BuildOptions, Data, JsonObject};
pub use schema::{
    candidate_types, collect_annotations, collect_defaults, Annotations, EnumBuilder, EnumDef,
    EnumMember, FieldType, ModelClass, ModelClassBuilder,
};
pub use temporal::{parse_date, parse_datetime, TemporalError, Timestamp};
pub use value::{Key, Map, Value};
