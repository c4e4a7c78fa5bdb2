//! Export of the instance record as a plain mapping or JSON text.

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};
use serde_json::Value as JsonValue;

use super::JsonObject;
use crate::value::{Key, Map, Value};

impl JsonObject {
    /// Recursive snapshot with dates kept typed.
    pub fn to_dict(&self) -> Map {
        self.to_dict_with(true, false)
    }

    /// Snapshot of the record.
    ///
    /// With `recursive`, nested instances (also inside sequences) become
    /// mappings. With `dates_to_str`, dates and timestamps become ISO-8601
    /// text.
    pub fn to_dict_with(&self, recursive: bool, dates_to_str: bool) -> Map {
        self.record
            .iter()
            .map(|(k, v)| {
                (
                    Key::Text(k.clone()),
                    export_value(v, recursive, dates_to_str),
                )
            })
            .collect()
    }

    /// JSON text of the record. `None` gives single-line output with a space
    /// after every `,` and `:`, `Some(n)` indents by `n` spaces.
    ///
    /// Dates and timestamps render as ISO-8601 text; other values JSON has no
    /// form for render as their text.
    pub fn to_json(&self, indent: Option<usize>) -> String {
        match indent {
            None => self.write_json(SpacedFormatter),
            Some(width) => {
                let spaces = vec![b' '; width];
                self.write_json(PrettyFormatter::with_indent(&spaces))
            }
        }
    }

    fn write_json<F: Formatter>(&self, formatter: F) -> String {
        let mut out = Vec::new();
        let mut ser = Serializer::with_formatter(&mut out, formatter);
        match self.serialize(&mut ser) {
            Ok(()) => String::from_utf8_lossy(&out).into_owned(),
            Err(_) => String::new(),
        }
    }

    pub fn to_json_value(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or(JsonValue::Null)
    }
}

/// Single-line layout with `", "` and `": "` separators.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

fn export_value(value: &Value, recursive: bool, dates_to_str: bool) -> Value {
    match value {
        Value::Object(obj) if recursive => Value::Map(obj.to_dict_with(recursive, dates_to_str)),
        Value::Date(_) | Value::DateTime(_) if dates_to_str => Value::Str(value.to_text()),
        Value::List(items) => Value::List(
            items
                .iter()
                .map(|item| export_value(item, recursive, dates_to_str))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::BuildOptions;
    use crate::schema::{FieldType, ModelClass};
    use chrono::NaiveDate;
    use serde_json::json;

    fn event() -> std::sync::Arc<ModelClass> {
        ModelClass::builder("Event")
            .field("day", FieldType::Date)
            .field("at", FieldType::DateTime)
            .build()
    }

    fn sample() -> JsonObject {
        JsonObject::build(
            &event(),
            json!({
                "day": "2022-09-09",
                "at": "2022-09-19 10:11:01.123456",
                "child": {"n": 1},
                "children": [{"n": 2}, "text"]
            }),
            BuildOptions::new().cast_types(true),
        )
        .unwrap()
    }

    #[test]
    fn dict_keeps_dates_typed_by_default() {
        let dict = sample().to_dict();
        assert_eq!(
            dict[&Key::from("day")],
            Value::Date(NaiveDate::from_ymd_opt(2022, 9, 9).unwrap())
        );
        assert!(matches!(dict[&Key::from("child")], Value::Map(_)));
        let children = dict[&Key::from("children")].as_list().unwrap();
        assert!(matches!(children[0], Value::Map(_)));
        assert_eq!(children[1], Value::from("text"));
    }

    #[test]
    fn dict_with_dates_to_str() {
        let dict = sample().to_dict_with(true, true);
        assert_eq!(dict[&Key::from("day")], Value::from("2022-09-09"));
        assert_eq!(
            dict[&Key::from("at")],
            Value::from("2022-09-19T10:11:01.123456")
        );
    }

    #[test]
    fn non_recursive_dict_keeps_instances() {
        let dict = sample().to_dict_with(false, false);
        assert!(matches!(dict[&Key::from("child")], Value::Object(_)));
        let children = dict[&Key::from("children")].as_list().unwrap();
        assert!(matches!(children[0], Value::Object(_)));
    }

    #[test]
    fn json_text() {
        let obj = sample();
        assert_eq!(
            obj.to_json(None),
            r#"{"day": "2022-09-09", "at": "2022-09-19T10:11:01.123456", "child": {"n": 1}, "children": [{"n": 2}, "text"]}"#
        );
        let empty = JsonObject::generic(json!({"m": {}, "l": []})).unwrap();
        assert_eq!(empty.to_json(None), r#"{"m": {}, "l": []}"#);
        let pretty = JsonObject::generic(json!({"a": [1]})).unwrap().to_json(Some(2));
        assert_eq!(pretty, "{\n  \"a\": [\n    1\n  ]\n}");
        let wide = JsonObject::generic(json!({"a": 1})).unwrap().to_json(Some(4));
        assert_eq!(wide, "{\n    \"a\": 1\n}");
    }

    #[test]
    fn json_value_snapshot() {
        let value = sample().to_json_value();
        assert_eq!(value["child"], json!({"n": 1}));
        assert_eq!(value["day"], json!("2022-09-09"));
    }
}
