use serde_json::{Map as JsonMap, Number, Value as JsonValue};

use crate::{
    error::TypeMismatch,
    value::{as_i64, Kind, Map, Value},
    write::{escape, unescape},
};

/// Strings are re-escaped, so the result prints the same text `serde_json` would.
impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(num) => Value::Number(num.as_f64().unwrap_or(f64::NAN)),
            JsonValue::String(s) => Value::from(s),
            JsonValue::Array(old) => Value::Array(old.into_iter().map(Value::from).collect()),
            JsonValue::Object(old) => Value::Object(
                old.into_iter()
                    .map(|(k, v)| (escape(&k), Value::from(v)))
                    .collect::<Map>(),
            ),
        }
    }
}

/// Fails only for a top-level [`Value::Empty`]; nested ones are dropped.
impl TryFrom<Value> for JsonValue {
    type Error = TypeMismatch;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        convert(value).ok_or_else(|| TypeMismatch::new(Kind::Null, Kind::Empty))
    }
}

fn convert(value: Value) -> Option<JsonValue> {
    Some(match value {
        Value::Empty => return None,
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(b),
        Value::Number(num) => match as_i64(num) {
            Some(integer) => JsonValue::Number(Number::from(integer)),
            None => Number::from_f64(num).map_or(JsonValue::Null, JsonValue::Number),
        },
        Value::String(s) => JsonValue::String(unescape(&s).into_owned()),
        Value::Array(old) => JsonValue::Array(old.into_iter().filter_map(convert).collect()),
        Value::Object(old) => JsonValue::Object(
            old.into_iter()
                .filter_map(|(k, v)| Some((unescape(&k).into_owned(), convert(v)?)))
                .collect::<JsonMap<_, _>>(),
        ),
    })
}
