//! Candidate type extraction for one attribute.

use super::annotations::Annotations;
use super::field_type::FieldType;

/// Ordered candidate types for `key`; never empty.
///
/// A `list[T]` annotation is read as `T` (one level only; `list[list[T]]`
/// yields `list[T]`). A union expands to its members in declaration order,
/// without typing placeholders and, when `ignore_builtins` is set, without
/// builtin members. Anything that leaves the list empty falls back to the
/// generic model type.
pub fn candidate_types(annotations: &Annotations, key: &str, ignore_builtins: bool) -> Vec<FieldType> {
    let mut out = Vec::new();
    if let Some(declared) = annotations.get(key) {
        let declared = match declared {
            FieldType::List(Some(inner)) => inner.as_ref(),
            other => other,
        };
        match declared {
            FieldType::Union(members) => {
                out.extend(
                    members
                        .iter()
                        .filter(|m| !m.is_abstract())
                        .filter(|m| !(ignore_builtins && m.is_builtin()))
                        .cloned(),
                );
            }
            t if t.is_abstract() => {}
            t => out.push(t.clone()),
        }
    }
    if out.is_empty() {
        out.push(FieldType::Generic);
    }
    out
}
