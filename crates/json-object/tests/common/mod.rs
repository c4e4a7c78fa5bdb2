//! Shared fixtures and model schemas for the integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use json_object::{EnumDef, FieldType, ModelClass};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Raw text of `tests/fixtures/<name>.json`.
pub fn fixture(name: &str) -> String {
    let path = fixtures_dir().join(format!("{name}.json"));
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {:?}: {e}", path))
}

pub fn fixture_json(name: &str) -> serde_json::Value {
    let text = fixture(name);
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("failed to parse {name}: {e}"))
}

macro_rules! schema {
    ($fn_name:ident, $build:expr) => {
        pub fn $fn_name() -> Arc<ModelClass> {
            static CLASS: OnceLock<Arc<ModelClass>> = OnceLock::new();
            Arc::clone(CLASS.get_or_init(|| $build))
        }
    };
}

// ---------------------------------------------------------------------------
// simple.json
// ---------------------------------------------------------------------------

schema!(simple_model, {
    ModelClass::builder("SimpleModel")
        .field_with_default("field_bool", FieldType::Bool, json_object::Value::Null)
        .field_with_default("field_int", FieldType::Int, json_object::Value::Null)
        .field_with_default("field_float", FieldType::Float, json_object::Value::Null)
        .field_with_default("field_str", FieldType::Str, json_object::Value::Null)
        .field_with_default("field_date", FieldType::Date, json_object::Value::Null)
        .field_with_default("field_datetime", FieldType::DateTime, json_object::Value::Null)
        .build()
});

// ---------------------------------------------------------------------------
// nested_data_1.json
// ---------------------------------------------------------------------------

schema!(topping_type_model, {
    ModelClass::builder("CakeToppingTypeModel")
        .field("id", FieldType::Int)
        .field("type", FieldType::Str)
        .build()
});

schema!(batter_type_model, {
    ModelClass::builder("CakeBatterTypeModel")
        .field("id", FieldType::Int)
        .field("type", FieldType::Str)
        .build()
});

schema!(batter_model, {
    ModelClass::builder("CakeBatterModel")
        .field("batter", FieldType::list(FieldType::model(&batter_type_model())))
        .build()
});

schema!(cake_model, {
    ModelClass::builder("CakeModel")
        .field("id", FieldType::Str)
        .field("type", FieldType::Str)
        .field("name", FieldType::Str)
        .field("ppu", FieldType::Float)
        .field("batters", FieldType::model(&batter_model()))
        .field("topping", FieldType::list(FieldType::model(&topping_type_model())))
        .build()
});

// Topping redeclared as a bare list, so its elements fall back to the
// generic model.
schema!(incomplete_cake_model, {
    ModelClass::builder("IncompleteCakeModel")
        .extends(&cake_model())
        .field("topping", FieldType::List(None))
        .build()
});

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

pub fn fruit() -> Arc<EnumDef> {
    static DEF: OnceLock<Arc<EnumDef>> = OnceLock::new();
    Arc::clone(DEF.get_or_init(|| {
        EnumDef::builder("TestEnum")
            .variant("Apple", 1)
            .variant("Peach", 2)
            .variant("Orange", 3)
            .build()
    }))
}

pub fn metal() -> Arc<EnumDef> {
    static DEF: OnceLock<Arc<EnumDef>> = OnceLock::new();
    Arc::clone(DEF.get_or_init(|| {
        EnumDef::builder("TestIntEnum")
            .variant("Lithium", 1)
            .variant("Iron", 2)
            .variant("Steel", 3)
            .transparent()
            .build()
    }))
}
