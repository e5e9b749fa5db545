/// Construct a [`Value`](crate::Value) from a JSON literal.
///
/// ```
/// use jsonvariant::json;
///
/// let player = json!({
///     "name": "Sam",
///     "age": 34,
///     "positions": ["forward", null],
/// });
/// assert_eq!(player["age"].as_number(), Ok(34.0));
/// ```
///
/// Any other expression is converted with `Value::from`, so strings and keys are escaped the
/// same way as everywhere else. Elements are split on top-level commas: wrap an expression that
/// contains a bare comma, such as a closure with two arguments, in parentheses.
#[macro_export]
macro_rules! json {
    (null) => {
        $crate::Value::Null
    };
    (true) => {
        $crate::Value::Bool(true)
    };
    (false) => {
        $crate::Value::Bool(false)
    };
    ([ $($tt:tt)* ]) => {
        $crate::Value::Array({
            #[allow(unused_mut)]
            let mut array = ::std::vec::Vec::new();
            $crate::__json_elements!(array () $($tt)*);
            array
        })
    };
    ({ $($tt:tt)* }) => {
        $crate::Value::Object({
            #[allow(unused_mut)]
            let mut object = $crate::Map::new();
            $crate::__json_key!(object () $($tt)*);
            object
        })
    };
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

/// Gathers the tokens of one array element up to the next top-level comma.
#[doc(hidden)]
#[macro_export]
macro_rules! __json_elements {
    ($array:ident ()) => {};
    ($array:ident ($($element:tt)+)) => {
        $array.push($crate::json!($($element)+));
    };
    ($array:ident ($($element:tt)+) , $($rest:tt)*) => {
        $array.push($crate::json!($($element)+));
        $crate::__json_elements!($array () $($rest)*);
    };
    ($array:ident ($($element:tt)*) $next:tt $($rest:tt)*) => {
        $crate::__json_elements!($array ($($element)* $next) $($rest)*);
    };
}

/// Gathers the tokens of an object key up to its colon.
#[doc(hidden)]
#[macro_export]
macro_rules! __json_key {
    ($object:ident ()) => {};
    ($object:ident ($($key:tt)+) : $($rest:tt)*) => {
        $crate::__json_entry!($object ($($key)+) () $($rest)*);
    };
    ($object:ident ($($key:tt)*) $next:tt $($rest:tt)*) => {
        $crate::__json_key!($object ($($key)* $next) $($rest)*);
    };
}

/// Gathers the tokens of an object value up to the next top-level comma, then inserts the entry.
#[doc(hidden)]
#[macro_export]
macro_rules! __json_entry {
    ($object:ident ($($key:tt)+) ($($value:tt)+)) => {
        $object.insert($crate::__private::key($($key)+), $crate::json!($($value)+));
    };
    ($object:ident ($($key:tt)+) ($($value:tt)+) , $($rest:tt)*) => {
        $object.insert($crate::__private::key($($key)+), $crate::json!($($value)+));
        $crate::__json_key!($object () $($rest)*);
    };
    ($object:ident ($($key:tt)+) ($($value:tt)*) $next:tt $($rest:tt)*) => {
        $crate::__json_entry!($object ($($key)+) ($($value)* $next) $($rest)*);
    };
}

#[cfg(test)]
mod tests {
    use crate::{parse, Map, Value};

    #[test]
    fn literals() {
        assert_eq!(json!(null), Value::Null);
        assert_eq!(json!(-1.5), Value::Number(-1.5));
        assert_eq!(json!("x"), Value::String("x".to_string()));
        assert_eq!(json!([]), Value::Array(vec![]));
        assert_eq!(json!({}), Value::Object(Map::new()));
    }

    #[test]
    fn nested() {
        let name = "Sam";
        let value = json!({
            "name": name,
            "tags": [1, "two", [false], {"k": null}],
            "nested": {"empty": {}},
        });
        assert_eq!(value["name"], Value::from("Sam"));
        assert_eq!(value["tags"].as_array().map(Vec::len), Ok(4));
        assert!(value["tags"][3]["k"].is_null());
        assert!(value["nested"]["empty"].is_object());
    }

    #[test]
    fn expressions() {
        let scores = vec![1.5, 2.0];
        let key = String::from("total");
        let value = json!({
            key: scores.iter().sum::<f64>(),
            "count": scores.len() as u32,
            "first": -scores[0],
        });
        assert_eq!(value["total"], Value::Number(3.5));
        assert_eq!(value["count"], Value::Number(2.0));
        assert_eq!(value["first"], Value::Number(-1.5));
    }

    #[test]
    fn strings_are_escaped() {
        let value = json!({"say \"hi\"": ["a\nb", "C:\\dir"]});
        assert_eq!(
            value.to_json(false),
            r#"{"say \"hi\"":["a\nb","C:\\dir"]}"#
        );
        assert_eq!(parse(&value.to_json(false)), Ok(value));
    }
}
