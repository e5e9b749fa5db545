#![allow(clippy::float_cmp)]

use crate::{
    error::{Error, SchemaError, ValidationErrorKind},
    keywords::helpers::{bound, type_error},
    paths::{LazyLocation, Location},
    validator::fail,
    value::{is_integral, Map, Value},
};

/// Validate a `number` node, or an `integer` one when `integer` is set.
pub(crate) fn validate(
    node: &Map,
    location: &Location,
    instance: &Value,
    path: &LazyLocation,
    integer: bool,
) -> Result<(), Error> {
    let value = match instance {
        Value::Number(value) if !integer || is_integral(*value) => *value,
        _ => {
            return Err(type_error(
                instance,
                path,
                location,
                if integer { "integer" } else { "number" },
            ))
        }
    };

    let checks: [(&'static str, fn(f64, f64) -> bool, fn(f64) -> ValidationErrorKind); 4] = [
        ("minimum", |value, limit| value >= limit, |limit| {
            ValidationErrorKind::Minimum { limit }
        }),
        ("maximum", |value, limit| value <= limit, |limit| {
            ValidationErrorKind::Maximum { limit }
        }),
        ("exclusiveMinimum", |value, limit| value > limit, |limit| {
            ValidationErrorKind::ExclusiveMinimum { limit }
        }),
        ("exclusiveMaximum", |value, limit| value < limit, |limit| {
            ValidationErrorKind::ExclusiveMaximum { limit }
        }),
    ];
    for (keyword, is_within, kind) in checks {
        if let Some(limit) = bound(node, keyword, location)? {
            if !is_within(value, limit) {
                return Err(fail(kind(limit), instance, path, location.join(keyword)));
            }
        }
    }

    match node.get("multipleOf") {
        None => Ok(()),
        Some(Value::Number(multiple_of)) if *multiple_of >= 1.0 && is_integral(*multiple_of) => {
            if is_integral(value / multiple_of) {
                Ok(())
            } else {
                Err(fail(
                    ValidationErrorKind::MultipleOf {
                        multiple_of: *multiple_of,
                    },
                    instance,
                    path,
                    location.join("multipleOf"),
                ))
            }
        }
        Some(_) => Err(SchemaError::invalid_keyword(
            "multipleOf",
            "a positive integer",
            location.join("multipleOf"),
        )
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{Error, SchemaErrorKind, ValidationErrorKind},
        json, validate, Value,
    };
    use test_case::test_case;

    fn with_type(ty: &str, extra: Value) -> Value {
        let mut schema = json!({ "type": ty });
        let extra = extra.into_object().expect("Is an object");
        schema.as_object_mut().expect("Is an object").extend(extra);
        schema
    }

    #[test_case("integer", json!({}), json!(3), true)]
    #[test_case("integer", json!({}), json!(3.0), true)]
    #[test_case("integer", json!({}), json!(3.5), false)]
    #[test_case("number", json!({}), json!(3.5), true)]
    #[test_case("number", json!({}), json!("3"), false)]
    #[test_case("number", json!({"minimum": 3}), json!(3), true)]
    #[test_case("number", json!({"minimum": 3}), json!(2.9), false)]
    #[test_case("number", json!({"maximum": 3}), json!(3), true)]
    #[test_case("number", json!({"maximum": 3}), json!(3.1), false)]
    #[test_case("number", json!({"exclusiveMinimum": 3}), json!(3), false)]
    #[test_case("number", json!({"exclusiveMinimum": 3}), json!(3.1), true)]
    #[test_case("number", json!({"exclusiveMaximum": 3}), json!(3), false)]
    #[test_case("integer", json!({"exclusiveMaximum": 3}), json!(2), true)]
    #[test_case("integer", json!({"multipleOf": 3}), json!(9), true)]
    #[test_case("integer", json!({"multipleOf": 3}), json!(10), false)]
    #[test_case("number", json!({"multipleOf": 2}), json!(4.5), false)]
    fn keywords(ty: &str, extra: Value, instance: Value, expected: bool) {
        assert_eq!(
            validate(&with_type(ty, extra), &instance).is_ok(),
            expected
        );
    }

    #[test]
    fn minimum_message() {
        let schema = with_type("integer", json!({"minimum": 18}));
        let Err(Error::Validation(error)) = validate(&schema, &json!(17)) else {
            panic!("Expected a validation error");
        };
        assert_eq!(error.kind(), &ValidationErrorKind::Minimum { limit: 18.0 });
        assert_eq!(error.to_string(), "17 is less than the minimum of 18");
    }

    #[test]
    fn integer_type_message() {
        let schema = with_type("integer", json!({}));
        let Err(Error::Validation(error)) = validate(&schema, &json!(1.5)) else {
            panic!("Expected a validation error");
        };
        assert_eq!(error.to_string(), "1.5 is not of type \"integer\"");
    }

    #[test_case(json!({"multipleOf": 0}))]
    #[test_case(json!({"multipleOf": 0.5}))]
    #[test_case(json!({"multipleOf": -2}))]
    #[test_case(json!({"minimum": "1"}))]
    fn malformed(extra: Value) {
        let Err(Error::Schema(error)) = validate(&with_type("number", extra), &json!(1)) else {
            panic!("Expected a schema error");
        };
        assert!(matches!(error.kind(), SchemaErrorKind::InvalidKeyword { .. }));
    }
}
