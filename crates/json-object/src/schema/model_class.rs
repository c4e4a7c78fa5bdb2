//! Model classes: named field tables composed from ancestor tables.

use std::fmt;
use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;

use super::annotations::{collect_annotations, collect_defaults, Annotations};
use super::field_type::FieldType;
use crate::value::Value;

/// One declared attribute.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: FieldType,
    /// `Some(Value::Null)` declares an explicit absent default.
    pub default: Option<Value>,
}

/// A registered model schema.
///
/// Ancestors are merged once, when the class is built: ancestors depth-first
/// in declaration order, then the class's own fields, later declarations
/// replacing earlier ones. The class is immutable afterwards.
pub struct ModelClass {
    name: String,
    bases: Vec<Arc<ModelClass>>,
    fields: Vec<Field>,
    annotations: Annotations,
    defaults: IndexMap<String, Value>,
    generic: bool,
}

static GENERIC: OnceLock<Arc<ModelClass>> = OnceLock::new();

impl ModelClass {
    pub const GENERIC_NAME: &'static str = "JsonObject";

    pub fn builder(name: impl Into<String>) -> ModelClassBuilder {
        ModelClassBuilder {
            name: name.into(),
            bases: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// The generic model class: no fields, root of every other class.
    pub fn generic() -> Arc<ModelClass> {
        Arc::clone(GENERIC.get_or_init(|| {
            Arc::new(ModelClass {
                name: Self::GENERIC_NAME.to_string(),
                bases: Vec::new(),
                fields: Vec::new(),
                annotations: Annotations::new(),
                defaults: IndexMap::new(),
                generic: true,
            })
        }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bases(&self) -> &[Arc<ModelClass>] {
        &self.bases
    }

    /// Fields declared on this class itself.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Declared types merged across the ancestor chain.
    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    /// Declared defaults merged across the ancestor chain.
    pub fn defaults(&self) -> &IndexMap<String, Value> {
        &self.defaults
    }

    pub fn default_for(&self, name: &str) -> Option<&Value> {
        self.defaults.get(name)
    }

    pub fn is_generic(&self) -> bool {
        self.generic
    }

    /// `true` when `other` is this class, one of its ancestors, or the
    /// generic root.
    pub fn is_subclass_of(self: &Arc<Self>, other: &Arc<ModelClass>) -> bool {
        other.generic
            || Arc::ptr_eq(self, other)
            || self.bases.iter().any(|base| base.is_subclass_of(other))
    }
}

impl fmt::Debug for ModelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelClass")
            .field("name", &self.name)
            .field(
                "bases",
                &self.bases.iter().map(|b| b.name()).collect::<Vec<_>>(),
            )
            .field("fields", &self.annotations.keys().collect::<Vec<_>>())
            .finish()
    }
}

pub struct ModelClassBuilder {
    name: String,
    bases: Vec<Arc<ModelClass>>,
    fields: Vec<Field>,
}

impl ModelClassBuilder {
    /// Add an ancestor. Later ancestors override earlier ones.
    pub fn extends(mut self, base: &Arc<ModelClass>) -> Self {
        self.bases.push(Arc::clone(base));
        self
    }

    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.push(Field {
            name: name.into(),
            ty,
            default: None,
        });
        self
    }

    pub fn field_with_default(
        mut self,
        name: impl Into<String>,
        ty: FieldType,
        default: impl Into<Value>,
    ) -> Self {
        self.fields.push(Field {
            name: name.into(),
            ty,
            default: Some(default.into()),
        });
        self
    }

    pub fn build(self) -> Arc<ModelClass> {
        let mut class = ModelClass {
            name: self.name,
            bases: self.bases,
            fields: self.fields,
            annotations: Annotations::new(),
            defaults: IndexMap::new(),
            generic: false,
        };
        class.annotations = collect_annotations(&class);
        class.defaults = collect_defaults(&class);
        Arc::new(class)
    }
}
