//! Enumeration descriptors and their members.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::value::Value;

/// One named member of an enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumVariant {
    pub name: String,
    pub value: Value,
}

/// An enumeration type: an ordered set of named scalar values.
///
/// A `transparent` enumeration is backed by its values (an integer or string
/// enum) and exports as the raw value instead of its `Enum.Member` text.
#[derive(Debug)]
pub struct EnumDef {
    name: String,
    variants: Vec<EnumVariant>,
    transparent: bool,
}

impl EnumDef {
    pub fn builder(name: impl Into<String>) -> EnumBuilder {
        EnumBuilder {
            name: name.into(),
            variants: Vec::new(),
            transparent: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variants(&self) -> &[EnumVariant] {
        &self.variants
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    /// Member lookup by name.
    pub fn member(self: &Arc<Self>, name: &str) -> Option<EnumMember> {
        self.find(|variant| variant.name == name)
    }

    /// Member lookup by value equality (`1` and `1.0` match).
    pub fn by_value(self: &Arc<Self>, value: &Value) -> Option<EnumMember> {
        self.find(|variant| variant.value.loosely_equals(value))
    }

    /// Member lookup by the text form of its value.
    pub fn by_text(self: &Arc<Self>, text: &str) -> Option<EnumMember> {
        self.find(|variant| variant.value.to_text() == text)
    }

    fn find(self: &Arc<Self>, pred: impl Fn(&EnumVariant) -> bool) -> Option<EnumMember> {
        self.variants
            .iter()
            .position(pred)
            .map(|index| EnumMember {
                def: Arc::clone(self),
                index,
            })
    }
}

pub struct EnumBuilder {
    name: String,
    variants: Vec<EnumVariant>,
    transparent: bool,
}

impl EnumBuilder {
    pub fn variant(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variants.push(EnumVariant {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn transparent(mut self) -> Self {
        self.transparent = true;
        self
    }

    pub fn build(self) -> Arc<EnumDef> {
        Arc::new(EnumDef {
            name: self.name,
            variants: self.variants,
            transparent: self.transparent,
        })
    }
}

/// A member of a specific enumeration.
#[derive(Clone)]
pub struct EnumMember {
    def: Arc<EnumDef>,
    index: usize,
}

impl EnumMember {
    pub fn def(&self) -> &Arc<EnumDef> {
        &self.def
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.variant().name
    }

    pub fn value(&self) -> &Value {
        &self.variant().value
    }

    pub fn is_member_of(&self, def: &Arc<EnumDef>) -> bool {
        Arc::ptr_eq(&self.def, def)
    }

    fn variant(&self) -> &EnumVariant {
        &self.def.variants[self.index]
    }
}

impl PartialEq for EnumMember {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.def, &other.def) && self.index == other.index
    }
}

impl fmt::Debug for EnumMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}({:?})", self.def.name, self.name(), self.value())
    }
}

impl fmt::Display for EnumMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.def.name, self.name())
    }
}

impl Serialize for EnumMember {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.def.transparent {
            self.value().serialize(serializer)
        } else {
            serializer.serialize_str(&self.to_string())
        }
    }
}
