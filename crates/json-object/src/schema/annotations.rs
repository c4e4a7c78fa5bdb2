//! Annotation resolution across a class's ancestors.

use indexmap::IndexMap;

use super::field_type::FieldType;
use super::model_class::{Field, ModelClass};
use crate::value::Value;

/// Attribute name to declared type, in first-declaration order.
pub type Annotations = IndexMap<String, FieldType>;

/// Merge declared types: each ancestor depth-first, then the class's own
/// fields on top. The generic root contributes nothing and is skipped.
pub fn collect_annotations(class: &ModelClass) -> Annotations {
    let mut out = Annotations::new();
    walk(class, &mut |field| {
        out.insert(field.name.clone(), field.ty.clone());
    });
    out
}

/// Merge declared defaults in the same order as [`collect_annotations`].
///
/// A redeclaration without a default keeps the inherited one.
pub fn collect_defaults(class: &ModelClass) -> IndexMap<String, Value> {
    let mut out = IndexMap::new();
    walk(class, &mut |field| {
        if let Some(default) = &field.default {
            out.insert(field.name.clone(), default.clone());
        }
    });
    out
}

fn walk<F: FnMut(&Field)>(class: &ModelClass, visit: &mut F) {
    for base in class.bases() {
        if base.is_generic() {
            continue;
        }
        walk(base, visit);
    }
    for field in class.fields() {
        visit(field);
    }
}
