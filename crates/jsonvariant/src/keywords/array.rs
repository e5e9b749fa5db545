use crate::{
    error::{Error, SchemaError, ValidationErrorKind},
    keywords::helpers::{check_size, type_error},
    paths::{LazyLocation, Location},
    validator::{fail, ValidationContext},
    value::{Map, Value},
};

pub(crate) fn validate<'s>(
    ctx: &mut ValidationContext<'s, '_>,
    node: &'s Map,
    location: &Location,
    instance: &Value,
    path: &LazyLocation,
) -> Result<(), Error> {
    let Value::Array(items) = instance else {
        return Err(type_error(instance, path, location, "array"));
    };
    let items_location = location.join("items");
    match node.get("items") {
        Some(schema @ Value::Object(_)) => {
            for (idx, item) in items.iter().enumerate() {
                ctx.validate(schema, &items_location, item, &path.push(idx))?;
            }
        }
        Some(Value::Array(schemas)) if !schemas.is_empty() => {
            if schemas.len() != items.len() {
                return Err(fail(
                    ValidationErrorKind::ItemsLength {
                        expected: schemas.len(),
                    },
                    instance,
                    path,
                    items_location,
                ));
            }
            for (idx, (schema, item)) in schemas.iter().zip(items).enumerate() {
                ctx.validate(schema, &items_location.join(idx), item, &path.push(idx))?;
            }
        }
        Some(_) => {
            return Err(SchemaError::invalid_keyword(
                "items",
                "an object or a non-empty array",
                items_location,
            )
            .into())
        }
        None => return Err(SchemaError::missing_keyword("items", location.clone()).into()),
    }

    check_size(
        node,
        ("minItems", "maxItems"),
        items.len(),
        instance,
        location,
        path,
        (
            |limit| ValidationErrorKind::MinItems { limit },
            |limit| ValidationErrorKind::MaxItems { limit },
        ),
    )?;
    // Without `contains`, every element counts.
    check_size(
        node,
        ("minContains", "maxContains"),
        items.len(),
        instance,
        location,
        path,
        (
            |limit| ValidationErrorKind::MinContains { limit },
            |limit| ValidationErrorKind::MaxContains { limit },
        ),
    )?;

    match node.get("uniqueItems") {
        None | Some(Value::Bool(false)) => Ok(()),
        Some(Value::Bool(true)) => {
            if is_unique(items) {
                Ok(())
            } else {
                Err(fail(
                    ValidationErrorKind::UniqueItems,
                    instance,
                    path,
                    location.join("uniqueItems"),
                ))
            }
        }
        Some(_) => Err(
            SchemaError::invalid_keyword("uniqueItems", "a boolean", location.join("uniqueItems"))
                .into(),
        ),
    }
}

/// Pairwise comparison, quadratic in the array length.
fn is_unique(items: &[Value]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(idx, item)| items[idx + 1..].iter().all(|other| item != other))
}
