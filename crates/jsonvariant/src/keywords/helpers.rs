#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::{
    error::{Error, SchemaError, ValidationErrorKind},
    paths::{LazyLocation, Location},
    validator::fail,
    value::{is_integral, Map, Value},
};

/// Read a size limit such as `minItems`.
///
/// Limits must be non-negative integers.
pub(crate) fn limit(
    node: &Map,
    keyword: &'static str,
    location: &Location,
) -> Result<Option<u64>, SchemaError> {
    match node.get(keyword) {
        None => Ok(None),
        Some(Value::Number(limit)) if *limit >= 0.0 && is_integral(*limit) => {
            // NOTE: Imprecise cast as big integers are not supported
            Ok(Some(*limit as u64))
        }
        Some(_) => Err(SchemaError::invalid_keyword(
            keyword,
            "a non-negative integer",
            location.join(keyword),
        )),
    }
}

/// Read a numeric bound such as `minimum`.
pub(crate) fn bound(
    node: &Map,
    keyword: &'static str,
    location: &Location,
) -> Result<Option<f64>, SchemaError> {
    match node.get(keyword) {
        None => Ok(None),
        Some(Value::Number(bound)) => Ok(Some(*bound)),
        Some(_) => Err(SchemaError::invalid_keyword(
            keyword,
            "a number",
            location.join(keyword),
        )),
    }
}

/// Check `actual` against the optional `min` / `max` keywords of `node`.
pub(crate) fn check_size(
    node: &Map,
    (min, max): (&'static str, &'static str),
    actual: usize,
    instance: &Value,
    location: &Location,
    path: &LazyLocation,
    kinds: (
        fn(u64) -> ValidationErrorKind,
        fn(u64) -> ValidationErrorKind,
    ),
) -> Result<(), Error> {
    let actual = actual as u64;
    if let Some(limit) = limit(node, min, location)? {
        if actual < limit {
            return Err(fail((kinds.0)(limit), instance, path, location.join(min)));
        }
    }
    if let Some(limit) = limit(node, max, location)? {
        if actual > limit {
            return Err(fail((kinds.1)(limit), instance, path, location.join(max)));
        }
    }
    Ok(())
}

pub(crate) fn type_error(
    instance: &Value,
    path: &LazyLocation,
    location: &Location,
    expected: &'static str,
) -> Error {
    fail(
        ValidationErrorKind::Type { expected },
        instance,
        path,
        location.join("type"),
    )
}

#[cfg(test)]
mod tests {
    use super::{bound, limit};
    use crate::{json, paths::Location, Value};
    use test_case::test_case;

    fn node(value: Value) -> crate::Map {
        json!({ "minItems": value }).into_object().expect("Is an object")
    }

    #[test_case(json!(0), Some(0))]
    #[test_case(json!(3), Some(3))]
    #[test_case(json!(3.0), Some(3))]
    fn valid_limits(value: Value, expected: Option<u64>) {
        assert_eq!(limit(&node(value), "minItems", &Location::new()), Ok(expected));
    }

    #[test_case(json!(-1))]
    #[test_case(json!(1.5))]
    #[test_case(json!("3"))]
    #[test_case(json!(null))]
    fn invalid_limits(value: Value) {
        let error = limit(&node(value), "minItems", &Location::new()).expect_err("Invalid limit");
        assert_eq!(error.schema_path().as_str(), "/minItems");
    }

    #[test]
    fn absent() {
        let node = crate::Map::new();
        assert_eq!(limit(&node, "minItems", &Location::new()), Ok(None));
        assert_eq!(bound(&node, "minimum", &Location::new()), Ok(None));
    }
}
