//! Model schemas: declared field types, enumerations, and class tables.

pub mod annotations;
pub mod candidates;
pub mod enum_def;
pub mod field_type;
pub mod model_class;

pub use annotations::{collect_annotations, collect_defaults, Annotations};
pub use candidates::candidate_types;
pub use enum_def::{EnumBuilder, EnumDef, EnumMember, EnumVariant};
pub use field_type::FieldType;
pub use model_class::{Field, ModelClass, ModelClassBuilder};
