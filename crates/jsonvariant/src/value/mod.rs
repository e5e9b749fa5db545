//! The dynamic JSON value.
mod number;

use std::{borrow::Cow, collections::BTreeMap, fmt};

use crate::{
    error::{SyntaxError, TypeMismatch},
    write::{escape, WriteJson, Writer},
};

#[cfg(feature = "serde_json")]
pub(crate) use number::as_i64;
pub(crate) use number::is_integral;

/// Object payload. Keys iterate in ascending order, not in document order.
pub type Map = BTreeMap<String, Value>;

/// A single JSON value together with everything it owns.
///
/// `Empty` marks a value that was never constructed (or was moved out via [`Value::take`]).
/// The parser never produces it.
///
/// String payloads are kept in their JSON-escaped form: the parser keeps escape pairs such as
/// `\n` or `\u0041` verbatim instead of decoding them, and the `From` conversions escape raw
/// text on the way in. `Value::from("a\nb")` therefore holds the four characters `a\nb` and
/// equals the string parsed from `"a\nb"`. Object keys built through [`FromIterator`] or
/// [`json!`](crate::json) are escaped the same way.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Empty,
    Null,
    Number(f64),
    Bool(bool),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

/// The discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Empty,
    Null,
    Number,
    Bool,
    String,
    Array,
    Object,
}

impl Kind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Empty => "empty",
            Kind::Null => "null",
            Kind::Number => "number",
            Kind::Bool => "boolean",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static NULL: Value = Value::Null;

macro_rules! accessor {
    ($name:ident, $name_mut:ident, $into:ident, $variant:ident, $ref_ty:ty, $mut_ty:ty, $own_ty:ty) => {
        #[doc = concat!("Borrow the payload of a `", stringify!($variant), "` value.")]
        ///
        /// # Errors
        ///
        /// Returns [`TypeMismatch`] if the value holds a different kind.
        pub fn $name(&self) -> Result<$ref_ty, TypeMismatch> {
            match self {
                Value::$variant(inner) => Ok(inner),
                other => Err(TypeMismatch::new(Kind::$variant, other.kind())),
            }
        }

        #[doc = concat!("Mutably borrow the payload of a `", stringify!($variant), "` value.")]
        ///
        /// # Errors
        ///
        /// Returns [`TypeMismatch`] if the value holds a different kind.
        pub fn $name_mut(&mut self) -> Result<$mut_ty, TypeMismatch> {
            match self {
                Value::$variant(inner) => Ok(inner),
                other => Err(TypeMismatch::new(Kind::$variant, other.kind())),
            }
        }

        #[doc = concat!("Consume the value and return the payload of a `", stringify!($variant), "`.")]
        ///
        /// # Errors
        ///
        /// Returns [`TypeMismatch`] if the value holds a different kind.
        pub fn $into(self) -> Result<$own_ty, TypeMismatch> {
            match self {
                Value::$variant(inner) => Ok(inner),
                other => Err(TypeMismatch::new(Kind::$variant, other.kind())),
            }
        }
    };
}

impl Value {
    /// Parse JSON text into a value. Same as [`crate::parse`].
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError`] if `text` is not a well-formed JSON object or array.
    pub fn from_json(text: &str) -> Result<Value, SyntaxError> {
        crate::parser::parse(text)
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Value::Empty => Kind::Empty,
            Value::Null => Kind::Null,
            Value::Number(_) => Kind::Number,
            Value::Bool(_) => Kind::Bool,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Return the number held by this value.
    ///
    /// # Errors
    ///
    /// Returns [`TypeMismatch`] if the value is not a number.
    pub fn as_number(&self) -> Result<f64, TypeMismatch> {
        match self {
            Value::Number(number) => Ok(*number),
            other => Err(TypeMismatch::new(Kind::Number, other.kind())),
        }
    }

    /// Return the boolean held by this value.
    ///
    /// # Errors
    ///
    /// Returns [`TypeMismatch`] if the value is not a boolean.
    pub fn as_bool(&self) -> Result<bool, TypeMismatch> {
        match self {
            Value::Bool(value) => Ok(*value),
            other => Err(TypeMismatch::new(Kind::Bool, other.kind())),
        }
    }

    /// Borrow the string held by this value.
    ///
    /// # Errors
    ///
    /// Returns [`TypeMismatch`] if the value is not a string.
    pub fn as_str(&self) -> Result<&str, TypeMismatch> {
        match self {
            Value::String(string) => Ok(string),
            other => Err(TypeMismatch::new(Kind::String, other.kind())),
        }
    }

    accessor!(as_string, as_string_mut, into_string, String, &String, &mut String, String);
    accessor!(as_array, as_array_mut, into_array, Array, &Vec<Value>, &mut Vec<Value>, Vec<Value>);
    accessor!(as_object, as_object_mut, into_object, Object, &Map, &mut Map, Map);

    /// Look up `key` if this value is an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(object) => object.get(key),
            _ => None,
        }
    }

    /// Look up element `idx` if this value is an array.
    #[must_use]
    pub fn get_index(&self, idx: usize) -> Option<&Value> {
        match self {
            Value::Array(items) => items.get(idx),
            _ => None,
        }
    }

    /// Move the value out, leaving [`Value::Empty`] in its place.
    #[must_use]
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    /// Serialize to JSON text.
    ///
    /// The compact form contains no insignificant whitespace. The pretty form indents nested
    /// values by four spaces and separates lines with the platform newline.
    #[must_use]
    pub fn to_json(&self, pretty: bool) -> String {
        let mut writer = Writer::new(pretty);
        self.write_json(&mut writer);
        writer.finish()
    }
}

impl std::ops::Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

impl std::ops::Index<usize> for Value {
    type Output = Value;

    fn index(&self, idx: usize) -> &Value {
        self.get_index(idx).unwrap_or(&NULL)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json(false))
    }
}

impl std::str::FromStr for Value {
    type Err = SyntaxError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        crate::parser::parse(text)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(escape(&value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(escape(value))
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::String(escape(value))
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(value: Cow<'_, str>) -> Self {
        Value::String(escape(&value))
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Value>> From<&[T]> for Value {
    fn from(values: &[T]) -> Self {
        Value::Array(values.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Object(
            iter.into_iter()
                .map(|(k, v)| (escape(&k.into()), v))
                .collect(),
        )
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Value {
            #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
            fn from(value: $ty) -> Self {
                Value::Number(value as f64)
            }
        }
    )*};
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl WriteJson for Value {
    fn write_json(&self, w: &mut Writer) {
        match self {
            Value::Empty => {}
            Value::Null => w.put_null(),
            Value::Number(number) => number.write_json(w),
            Value::Bool(value) => value.write_json(w),
            Value::String(string) => string.as_str().write_json(w),
            Value::Array(items) => {
                let mut array = w.array();
                for item in items {
                    array.put(item);
                }
            }
            Value::Object(object) => {
                let mut writer = w.object();
                for (key, value) in object {
                    writer.put(key, value);
                }
            }
        }
    }

    fn should_include(&self) -> bool {
        !self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Kind, Map, Value};
    use crate::json;
    use test_case::test_case;

    #[test_case(Value::Empty, Kind::Empty)]
    #[test_case(Value::Null, Kind::Null)]
    #[test_case(Value::from(1), Kind::Number)]
    #[test_case(Value::from(true), Kind::Bool)]
    #[test_case(Value::from("a"), Kind::String)]
    #[test_case(Value::from(vec![1, 2]), Kind::Array)]
    #[test_case(Value::from(Map::new()), Kind::Object)]
    fn kinds(value: Value, expected: Kind) {
        assert_eq!(value.kind(), expected);
    }

    #[test]
    fn default_is_empty() {
        let value = Value::default();
        assert!(value.is_empty());
        assert!(!value.is_null());
    }

    #[test]
    fn numbers_compare_by_value() {
        assert_eq!(Value::from(1), Value::from(1.0));
        assert_eq!(Value::from(3_u8), Value::from(3_i64));
        assert_ne!(Value::from(1), Value::from(1.5));
        assert_ne!(Value::from(0), Value::from(false));
        assert_ne!(Value::Null, Value::Empty);
    }

    #[test]
    fn accessors_reject_other_kinds() {
        let value = Value::from("text");
        assert_eq!(value.as_str(), Ok("text"));
        let error = value.as_number().expect_err("Should fail");
        assert_eq!(error.expected(), Kind::Number);
        assert_eq!(error.actual(), Kind::String);
        assert_eq!(error.to_string(), "expected number, found string");
        assert!(Value::from(1).as_bool().is_err());
        assert!(Value::Null.as_array().is_err());
        assert!(Value::from(vec![1]).as_object().is_err());
    }

    #[test]
    fn take_leaves_empty() {
        let mut value = json!({"a": [1, 2]});
        let moved = value.take();
        assert!(value.is_empty());
        assert_eq!(moved, json!({"a": [1, 2]}));
    }

    #[test]
    fn clone_is_deep() {
        let original = json!({"a": {"b": [1, 2, 3]}});
        let mut copy = original.clone();
        copy.as_object_mut()
            .expect("Is an object")
            .insert("c".to_string(), Value::Null);
        assert_ne!(original, copy);
        assert_eq!(original["a"]["b"][2], Value::from(3));
    }

    #[test]
    fn indexing_misses_yield_null() {
        let value = json!({"a": [1]});
        assert!(value["missing"].is_null());
        assert!(value["a"][5].is_null());
        assert!(value[0].is_null());
    }

    #[test]
    fn homogeneous_sequences() {
        let value = Value::from(vec!["a", "b"]);
        assert_eq!(value, json!(["a", "b"]));
        let value = Value::from(&[1.5, 2.5][..]);
        assert_eq!(value.as_array().map(Vec::len), Ok(2));
    }

    #[test]
    fn options() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn collect_into_object() {
        let value: Value = [("b", Value::from(2)), ("a", Value::from(1))]
            .into_iter()
            .collect();
        let keys: Vec<_> = value
            .as_object()
            .expect("Is an object")
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn strings_are_stored_escaped() {
        assert_eq!(Value::from("a\nb").as_str(), Ok(r"a\nb"));
        assert_eq!(Value::from(r"a\nb").as_str(), Ok(r"a\\nb"));
        assert_ne!(Value::from("a\nb"), Value::from(r"a\nb"));
        assert_eq!(
            Value::from(String::from("say \"hi\"")),
            "[\"say \\\"hi\\\"\"]".parse::<Value>().expect("Valid JSON")[0]
        );
        let keyed: Value = [("tab\tkey", Value::Null)].into_iter().collect();
        assert!(keyed.get(r"tab\tkey").is_some());
    }
}
