//! Best-effort scalar coercion toward declared attribute types.
//!
//! Each candidate type is tried with [`try_cast`]; a [`CoercionMiss`] moves
//! on to the next candidate, and when every candidate misses the original
//! value is kept. [`cast`] never fails.

use std::sync::Arc;

use log::{debug, trace};

use crate::error::CoercionMiss;
use crate::object::{parse_embedded, BuildOptions, JsonObject};
use crate::schema::{candidate_types, Annotations, EnumDef, EnumMember, FieldType, ModelClass};
use crate::temporal::{parse_date, parse_datetime, Timestamp};
use crate::value::Value;

/// Coerce `value` toward the type declared for `key`.
///
/// Unannotated keys and null values pass through. A value whose runtime type
/// already equals one of the candidates is returned before any conversion
/// is attempted.
pub fn cast(annotations: &Annotations, key: &str, value: Value) -> Value {
    if value.is_null() || !annotations.contains_key(key) {
        return value;
    }
    let candidates = candidate_types(annotations, key, false);
    if candidates.iter().any(|t| t.matches(&value)) {
        return value;
    }
    for target in &candidates {
        match try_cast(target, &value) {
            Ok(cast) => return cast,
            Err(miss) => trace!("{key}: {target} rejected {} value: {miss}", value.kind()),
        }
    }
    debug!(
        "{key}: no candidate accepted the {} value, keeping it unchanged",
        value.kind()
    );
    value
}

/// Attempt one candidate type.
pub fn try_cast(target: &FieldType, value: &Value) -> Result<Value, CoercionMiss> {
    match target {
        FieldType::Date => to_date(value).map(Value::Date),
        FieldType::DateTime => to_datetime(value).map(Value::DateTime),
        FieldType::Enum(def) => to_enum(def, value).map(Value::Enum),
        FieldType::Bool => to_bool(value).map(Value::Bool),
        FieldType::Int => to_int(value).map(Value::Int),
        FieldType::Float => to_float(value).map(Value::Float),
        FieldType::Str => Ok(Value::Str(to_str(value))),
        FieldType::Bytes => to_bytes(value).map(Value::Bytes),
        FieldType::Map => to_map(value),
        FieldType::Model(class) => to_object(class, value).map(Value::Object),
        FieldType::Generic => to_object(&ModelClass::generic(), value).map(Value::Object),
        FieldType::List(_) => match value {
            Value::List(_) => Ok(value.clone()),
            _ => Err(incompatible("list", value)),
        },
        FieldType::Null | FieldType::Any | FieldType::Param(_) | FieldType::Union(_) => {
            Err(incompatible("a concrete type", value))
        }
    }
}

fn incompatible(target: &'static str, value: &Value) -> CoercionMiss {
    CoercionMiss::Incompatible {
        target,
        value: value.kind(),
    }
}

// Scalars that have a meaningful text form for date/time parsing.
fn temporal_text(target: &'static str, value: &Value) -> Result<String, CoercionMiss> {
    match value {
        Value::Str(s) => Ok(s.clone()),
        Value::Int(_) | Value::UInt(_) | Value::Float(_) | Value::Bytes(_) => Ok(value.to_text()),
        _ => Err(incompatible(target, value)),
    }
}

fn to_date(value: &Value) -> Result<chrono::NaiveDate, CoercionMiss> {
    match value {
        Value::Date(d) => Ok(*d),
        Value::DateTime(ts) => Ok(ts.date()),
        _ => Ok(parse_date(&temporal_text("date", value)?)?),
    }
}

fn to_datetime(value: &Value) -> Result<Timestamp, CoercionMiss> {
    match value {
        Value::DateTime(ts) => Ok(*ts),
        Value::Date(d) => Ok(Timestamp::from(*d)),
        _ => Ok(parse_datetime(&temporal_text("datetime", value)?)?),
    }
}

/// By value, then by the text form of the value, then by member name with
/// hyphens read as underscores.
fn to_enum(def: &Arc<EnumDef>, value: &Value) -> Result<EnumMember, CoercionMiss> {
    if let Some(member) = def.by_value(value) {
        return Ok(member);
    }
    let text = value.to_text();
    if let Some(member) = def.by_text(&text) {
        return Ok(member);
    }
    let name = match value {
        Value::Str(_) if text.contains('-') => text.replace('-', "_"),
        _ => text,
    };
    def.member(&name)
        .ok_or_else(|| CoercionMiss::NoEnumMember(def.name().to_string()))
}

// Value-backed enum members convert like their value.
fn enum_value<'a>(target: &'static str, value: &'a Value) -> Result<&'a Value, CoercionMiss> {
    match value {
        Value::Enum(member) if member.def().is_transparent() => Ok(member.value()),
        _ => Err(incompatible(target, value)),
    }
}

fn to_bool(value: &Value) -> Result<bool, CoercionMiss> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Int(i) => Ok(*i != 0),
        Value::UInt(u) => Ok(*u != 0),
        Value::Float(f) => Ok(*f != 0.0),
        Value::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "y" | "on" => Ok(true),
            "false" | "0" | "no" | "n" | "off" => Ok(false),
            _ => Err(CoercionMiss::InvalidText(s.clone(), "bool")),
        },
        _ => to_bool(enum_value("bool", value)?),
    }
}

fn to_int(value: &Value) -> Result<i64, CoercionMiss> {
    match value {
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Int(i) => Ok(*i),
        Value::UInt(u) => i64::try_from(*u).map_err(|_| incompatible("int", value)),
        // Truncation toward zero; the range check keeps `as` from saturating.
        Value::Float(f) if f.is_finite() && f.abs() < 9.2e18 => Ok(f.trunc() as i64),
        Value::Str(s) => {
            parse_int_text(s).ok_or_else(|| CoercionMiss::InvalidText(s.clone(), "int"))
        }
        Value::Bytes(b) => {
            let text = String::from_utf8_lossy(b);
            parse_int_text(&text).ok_or_else(|| CoercionMiss::InvalidText(text.into_owned(), "int"))
        }
        _ => to_int(enum_value("int", value)?),
    }
}

fn to_float(value: &Value) -> Result<f64, CoercionMiss> {
    match value {
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Int(i) => Ok(*i as f64),
        Value::UInt(u) => Ok(*u as f64),
        Value::Float(f) => Ok(*f),
        Value::Str(s) => {
            parse_float_text(s).ok_or_else(|| CoercionMiss::InvalidText(s.clone(), "float"))
        }
        Value::Bytes(b) => {
            let text = String::from_utf8_lossy(b);
            parse_float_text(&text)
                .ok_or_else(|| CoercionMiss::InvalidText(text.into_owned(), "float"))
        }
        _ => to_float(enum_value("float", value)?),
    }
}

// Booleans render capitalized.
fn to_str(value: &Value) -> String {
    match value {
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        _ => value.to_text(),
    }
}

fn to_bytes(value: &Value) -> Result<Vec<u8>, CoercionMiss> {
    match value {
        Value::Bytes(b) => Ok(b.clone()),
        Value::Str(s) => Ok(s.as_bytes().to_vec()),
        _ => Err(incompatible("bytes", value)),
    }
}

fn to_map(value: &Value) -> Result<Value, CoercionMiss> {
    match value {
        Value::Map(_) => Ok(value.clone()),
        Value::Str(s) => Ok(Value::Map(parse_embedded(s)?)),
        _ => Err(incompatible("map", value)),
    }
}

/// A model accepts an instance of itself or a subclass, a mapping, or text
/// holding an embedded JSON object. Construction uses default options.
fn to_object(class: &Arc<ModelClass>, value: &Value) -> Result<JsonObject, CoercionMiss> {
    let map = match value {
        Value::Object(obj) if obj.is_instance_of(class) => return Ok(obj.clone()),
        Value::Map(map) => map.clone(),
        Value::Str(s) => parse_embedded(s)?,
        _ => return Err(incompatible("model", value)),
    };
    JsonObject::from_map(class, map, BuildOptions::default())
        .map_err(|err| CoercionMiss::Construction(err.to_string()))
}

fn strip_digit_separators(text: &str) -> Option<String> {
    let t = text.trim();
    if t.starts_with('_') || t.ends_with('_') || t.contains("__") {
        return None;
    }
    Some(t.chars().filter(|c| *c != '_').collect())
}

fn parse_int_text(text: &str) -> Option<i64> {
    strip_digit_separators(text)?.parse().ok()
}

fn parse_float_text(text: &str) -> Option<f64> {
    strip_digit_separators(text)?.parse().ok()
}
