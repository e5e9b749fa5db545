use crate::{
    error::{Error, SchemaError, SchemaErrorKind},
    paths::{unescape_segment, LazyLocation, Location},
    validator::ValidationContext,
    Value,
};

/// Follow a `$ref` and validate `instance` against its target.
pub(crate) fn validate<'s>(
    ctx: &mut ValidationContext<'s, '_>,
    reference: &'s Value,
    location: &Location,
    instance: &Value,
    path: &LazyLocation,
) -> Result<(), Error> {
    let reference_location = location.join("$ref");
    let Value::String(reference) = reference else {
        return Err(
            SchemaError::invalid_keyword("$ref", "a string", reference_location).into(),
        );
    };
    let Some(target) = resolve(ctx.root(), reference) else {
        return Err(SchemaError::new(
            SchemaErrorKind::UnresolvedReference {
                reference: reference.clone(),
            },
            reference_location,
        )
        .into());
    };
    ctx.enter_reference(reference, &reference_location)?;
    tracing::trace!(
        reference = reference.as_str(),
        location = %reference_location,
        "Following reference"
    );
    let result = ctx.validate(target, &reference_location, instance, path);
    ctx.exit_reference();
    result
}

/// Resolve a same-document reference such as `#/definitions/veggie`.
pub(crate) fn resolve<'a>(root: &'a Value, reference: &str) -> Option<&'a Value> {
    pointer(root, reference.strip_prefix('#')?)
}

/// Resolve a JSON pointer inside `document`.
pub(crate) fn pointer<'a>(document: &'a Value, pointer: &str) -> Option<&'a Value> {
    if pointer.is_empty() {
        return Some(document);
    }
    if !pointer.starts_with('/') {
        return None;
    }
    pointer.split('/').skip(1).map(unescape_segment).try_fold(
        document,
        |target, token| match target {
            Value::Object(map) => map.get(&*token),
            Value::Array(list) => parse_index(&token).and_then(|x| list.get(x)),
            _ => None,
        },
    )
}

fn parse_index(s: &str) -> Option<usize> {
    if s.starts_with('+') || (s.starts_with('0') && s.len() != 1) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::{parse_index, resolve};
    use crate::{
        error::{Error, SchemaErrorKind},
        json, validate,
    };
    use test_case::test_case;

    #[test_case("#", Some(json!({"definitions": {"a/b": [1, {"c~d": 2}]}})))]
    #[test_case("#/definitions", Some(json!({"a/b": [1, {"c~d": 2}]})))]
    #[test_case("#/definitions/a~1b/0", Some(json!(1)))]
    #[test_case("#/definitions/a~1b/1/c~0d", Some(json!(2)))]
    #[test_case("#/definitions/a~1b/2", None)]
    #[test_case("#/definitions/a~1b/01", None)]
    #[test_case("#/missing", None)]
    #[test_case("other.json#/definitions", None)]
    #[test_case("#definitions", None)]
    fn resolution(reference: &str, expected: Option<crate::Value>) {
        let root = json!({"definitions": {"a/b": [1, {"c~d": 2}]}});
        assert_eq!(resolve(&root, reference), expected.as_ref());
    }

    #[test_case("0", Some(0))]
    #[test_case("12", Some(12))]
    #[test_case("+1", None)]
    #[test_case("007", None)]
    #[test_case("-1", None)]
    fn indices(token: &str, expected: Option<usize>) {
        assert_eq!(parse_index(token), expected);
    }

    #[test]
    fn forward_reference() {
        let schema = json!({
            "type": "object",
            "properties": {
                "vegetables": {"type": "array", "items": {"$ref": "#/definitions/veggie"}}
            },
            "definitions": {
                "veggie": {
                    "type": "object",
                    "required": ["veggieName"],
                    "properties": {"veggieName": {"type": "string"}}
                }
            }
        });
        assert!(validate(&schema, &json!({"vegetables": [{"veggieName": "potato"}]})).is_ok());
        let Err(Error::Validation(error)) =
            validate(&schema, &json!({"vegetables": [{"veggieName": 1}]}))
        else {
            panic!("Expected a validation error");
        };
        assert_eq!(
            error.schema_path().as_str(),
            "/properties/vegetables/items/$ref/properties/veggieName/type"
        );
        assert_eq!(error.instance_path().as_str(), "/vegetables/0/veggieName");
    }

    #[test]
    fn reference_chain() {
        let schema = json!({
            "type": "array",
            "items": {"$ref": "#/definitions/a"},
            "definitions": {
                "a": {"$ref": "#/definitions/b"},
                "b": {"type": "integer"}
            }
        });
        assert!(validate(&schema, &json!([1, 2])).is_ok());
        assert!(validate(&schema, &json!([1.5])).is_err());
    }

    #[test]
    fn recursive_schema() {
        let schema = json!({
            "$ref": "#/definitions/node",
            "definitions": {
                "node": {
                    "type": "object",
                    "properties": {
                        "children": {"type": "array", "items": {"$ref": "#/definitions/node"}}
                    }
                }
            }
        });
        let tree = json!({"children": [{"children": []}, {}]});
        assert!(validate(&schema, &tree).is_ok());
        let bad = json!({"children": [{"children": [1]}]});
        assert!(validate(&schema, &bad).is_err());
    }

    #[test_case(json!({"$ref": "#"}); "self")]
    #[test_case(
        json!({
            "$ref": "#/definitions/a",
            "definitions": {"a": {"$ref": "#/definitions/b"}, "b": {"$ref": "#/definitions/a"}}
        });
        "mutual"
    )]
    fn circular(schema: crate::Value) {
        let Err(Error::Schema(error)) = validate(&schema, &json!({})) else {
            panic!("Expected a schema error");
        };
        assert!(matches!(
            error.kind(),
            SchemaErrorKind::CircularReference { .. }
        ));
    }

    #[test_case(json!({"$ref": "#/nowhere"}))]
    #[test_case(json!({"$ref": "http://example.com/schema.json"}))]
    fn unresolved(schema: crate::Value) {
        let Err(Error::Schema(error)) = validate(&schema, &json!({})) else {
            panic!("Expected a schema error");
        };
        assert!(matches!(
            error.kind(),
            SchemaErrorKind::UnresolvedReference { .. }
        ));
    }

    #[test]
    fn reference_must_be_a_string() {
        let Err(Error::Schema(error)) = validate(&json!({"$ref": 1}), &json!({})) else {
            panic!("Expected a schema error");
        };
        assert_eq!(error.schema_path().as_str(), "/$ref");
    }
}
