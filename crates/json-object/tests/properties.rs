//! Property tests for the build/export round trip.

use json_object::{BuildOptions, FieldType, JsonObject, Key, Map, ModelClass, Value};
use proptest::prelude::*;
use serde_json::Value as JsonValue;

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1.0e12f64..1.0e12).prop_map(Value::Float),
        "[a-zA-Z0-9 {}:\"-]{0,10}".prop_map(Value::from),
    ]
}

fn json_leaf() -> impl Strategy<Value = JsonValue> {
    prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::from),
        any::<i64>().prop_map(JsonValue::from),
        (-1.0e9f64..1.0e9).prop_map(JsonValue::from),
        "[a-z0-9 {}:\"-]{0,8}".prop_map(JsonValue::from),
    ]
}

fn json_tree() -> impl Strategy<Value = JsonValue> {
    json_leaf().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(JsonValue::Array),
            prop::collection::btree_map("[a-z-]{1,4}", inner, 0..4)
                .prop_map(|m| JsonValue::Object(m.into_iter().collect())),
        ]
    })
}

fn document() -> impl Strategy<Value = JsonValue> {
    prop::collection::btree_map("[a-z-]{1,4}", json_tree(), 0..6)
        .prop_map(|m| JsonValue::Object(m.into_iter().collect()))
}

proptest! {
    #[test]
    fn flat_mappings_round_trip(entries in prop::collection::btree_map("[a-z_][a-z0-9_]{0,6}", scalar(), 0..8)) {
        let map: Map = entries
            .into_iter()
            .map(|(k, v)| (Key::from(k), v))
            .collect();
        let obj = JsonObject::generic(map.clone()).unwrap();
        prop_assert_eq!(obj.to_dict(), map);
    }

    #[test]
    fn rebuilding_an_export_is_stable(doc in document()) {
        let first = JsonObject::generic(doc).unwrap().to_dict();
        let second = JsonObject::generic(first.clone()).unwrap().to_dict();
        prop_assert_eq!(second, first);
    }

    #[test]
    fn rebuilding_an_export_is_stable_when_casting(doc in document()) {
        let options = BuildOptions::new().cast_types(true);
        let first = JsonObject::build(&ModelClass::generic(), doc, options).unwrap().to_dict();
        let second = JsonObject::build(&ModelClass::generic(), first.clone(), options)
            .unwrap()
            .to_dict();
        prop_assert_eq!(second, first);
    }

    #[test]
    fn provided_values_beat_defaults(v in any::<i64>(), d in any::<i64>()) {
        let class = ModelClass::builder("WithDefault")
            .field_with_default("a", FieldType::Int, d)
            .build();
        let empty = JsonObject::build(&class, None::<String>, BuildOptions::default()).unwrap();
        prop_assert_eq!(&empty["a"], &Value::Int(d));

        let mut map = Map::new();
        map.insert(Key::from("a"), Value::Int(v));
        let given = JsonObject::from_map(&class, map, BuildOptions::default()).unwrap();
        prop_assert_eq!(&given["a"], &Value::Int(v));
    }

    #[test]
    fn compact_and_pretty_text_agree(doc in document()) {
        let obj = JsonObject::generic(doc).unwrap();
        let compact: JsonValue = serde_json::from_str(&obj.to_json(None)).unwrap();
        let pretty: JsonValue = serde_json::from_str(&obj.to_json(Some(4))).unwrap();
        prop_assert_eq!(compact, pretty);
    }
}
