//! Declared attribute types.

use std::fmt;
use std::sync::Arc;

use super::enum_def::EnumDef;
use super::model_class::ModelClass;
use crate::value::Value;

/// The declared type of one model attribute.
///
/// Resolved once when the model class is registered; candidate extraction
/// and coercion match on it without any runtime type inspection.
#[derive(Debug, Clone)]
pub enum FieldType {
    /// Unconstrained marker; yields no candidates of its own.
    Any,
    /// Type-variable placeholder; never a candidate.
    Param(String),
    Null,
    Bool,
    Int,
    Float,
    Str,
    Bytes,
    /// Builtin mapping: nested mappings are kept raw.
    Map,
    Date,
    DateTime,
    Enum(Arc<EnumDef>),
    Model(Arc<ModelClass>),
    /// The generic model class.
    Generic,
    /// Sequence of `T`; unparameterized when `None`.
    List(Option<Box<FieldType>>),
    /// One of several types, in declaration order.
    Union(Vec<FieldType>),
}

impl FieldType {
    pub fn list(inner: FieldType) -> Self {
        Self::List(Some(Box::new(inner)))
    }

    /// Union of `members`; nested unions are flattened.
    pub fn union(members: impl IntoIterator<Item = FieldType>) -> Self {
        let mut flat = Vec::new();
        for member in members {
            match member {
                Self::Union(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        Self::Union(flat)
    }

    /// `inner` or absent.
    pub fn optional(inner: FieldType) -> Self {
        Self::union([inner, Self::Null])
    }

    pub fn model(class: &Arc<ModelClass>) -> Self {
        Self::Model(Arc::clone(class))
    }

    pub fn enumeration(def: &Arc<EnumDef>) -> Self {
        Self::Enum(Arc::clone(def))
    }

    /// Primitive and container builtins, dropped from union candidates when
    /// resolving a nested target.
    pub fn is_builtin(&self) -> bool {
        matches!(
            self,
            Self::Null
                | Self::Bool
                | Self::Int
                | Self::Float
                | Self::Str
                | Self::Bytes
                | Self::Map
                | Self::List(_)
        )
    }

    /// Typing constructs that carry no concrete type.
    pub fn is_abstract(&self) -> bool {
        matches!(self, Self::Any | Self::Param(_) | Self::List(None))
    }

    /// Whether the runtime type of `value` is exactly this type.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Null, Value::Null)
            | (Self::Bool, Value::Bool(_))
            | (Self::Int, Value::Int(_) | Value::UInt(_))
            | (Self::Float, Value::Float(_))
            | (Self::Str, Value::Str(_))
            | (Self::Bytes, Value::Bytes(_))
            | (Self::Map, Value::Map(_))
            | (Self::List(_), Value::List(_))
            | (Self::Date, Value::Date(_))
            | (Self::DateTime, Value::DateTime(_)) => true,
            (Self::Enum(def), Value::Enum(member)) => member.is_member_of(def),
            (Self::Model(class), Value::Object(obj)) => Arc::ptr_eq(class, obj.class()),
            (Self::Generic, Value::Object(obj)) => obj.class().is_generic(),
            _ => false,
        }
    }
}

impl PartialEq for FieldType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Param(a), Self::Param(b)) => a == b,
            (Self::Enum(a), Self::Enum(b)) => Arc::ptr_eq(a, b),
            (Self::Model(a), Self::Model(b)) => Arc::ptr_eq(a, b),
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Union(a), Self::Union(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Param(name) => f.write_str(name),
            Self::Null => f.write_str("null"),
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Str => f.write_str("str"),
            Self::Bytes => f.write_str("bytes"),
            Self::Map => f.write_str("map"),
            Self::Date => f.write_str("date"),
            Self::DateTime => f.write_str("datetime"),
            Self::Enum(def) => f.write_str(def.name()),
            Self::Model(class) => f.write_str(class.name()),
            Self::Generic => f.write_str(ModelClass::GENERIC_NAME),
            Self::List(None) => f.write_str("list"),
            Self::List(Some(inner)) => write!(f, "list[{inner}]"),
            Self::Union(members) => {
                f.write_str("union[")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{member}")?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_flattens() {
        let t = FieldType::union([
            FieldType::Str,
            FieldType::union([FieldType::Int, FieldType::Float]),
        ]);
        assert_eq!(
            t,
            FieldType::Union(vec![FieldType::Str, FieldType::Int, FieldType::Float])
        );
        assert_eq!(
            FieldType::optional(FieldType::Date),
            FieldType::Union(vec![FieldType::Date, FieldType::Null])
        );
    }

    #[test]
    fn categories() {
        assert!(FieldType::Int.is_builtin());
        assert!(FieldType::list(FieldType::Int).is_builtin());
        assert!(!FieldType::Date.is_builtin());
        assert!(!FieldType::Generic.is_builtin());
        assert!(FieldType::Any.is_abstract());
        assert!(FieldType::List(None).is_abstract());
        assert!(FieldType::Param("T".into()).is_abstract());
        assert!(!FieldType::list(FieldType::Str).is_abstract());
    }

    #[test]
    fn exact_runtime_match() {
        assert!(FieldType::Int.matches(&Value::Int(1)));
        assert!(FieldType::Int.matches(&Value::UInt(u64::MAX)));
        assert!(!FieldType::Int.matches(&Value::Bool(true)));
        assert!(!FieldType::Float.matches(&Value::Int(1)));
        assert!(FieldType::List(None).matches(&Value::List(vec![])));
        assert!(!FieldType::Any.matches(&Value::Null));
    }

    #[test]
    fn display() {
        let t = FieldType::union([FieldType::list(FieldType::Str), FieldType::Null]);
        assert_eq!(t.to_string(), "union[list[str], null]");
    }
}
