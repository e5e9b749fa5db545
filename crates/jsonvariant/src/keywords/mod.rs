pub(crate) mod array;
pub(crate) mod format;
pub(crate) mod helpers;
pub(crate) mod numeric;
pub(crate) mod object;
pub(crate) mod reference;
pub(crate) mod string;

use crate::{
    error::{Error, SchemaError, SchemaErrorKind},
    paths::{LazyLocation, Location},
    validator::ValidationContext,
    value::{Map, Value},
};

/// Validate `instance` against a node whose `type` is `name`.
pub(crate) fn validate<'s>(
    ctx: &mut ValidationContext<'s, '_>,
    name: &'s str,
    node: &'s Map,
    location: &Location,
    instance: &Value,
    path: &LazyLocation,
) -> Result<(), Error> {
    match name {
        "object" => object::validate(ctx, node, location, instance, path),
        "array" => array::validate(ctx, node, location, instance, path),
        "string" => string::validate(ctx, node, location, instance, path),
        "number" => numeric::validate(node, location, instance, path, false),
        "integer" => numeric::validate(node, location, instance, path, true),
        "boolean" if instance.is_bool() => Ok(()),
        "null" if instance.is_null() => Ok(()),
        "boolean" => Err(helpers::type_error(instance, path, location, "boolean")),
        "null" => Err(helpers::type_error(instance, path, location, "null")),
        _ => Err(SchemaError::new(
            SchemaErrorKind::UnknownType {
                name: name.to_string(),
            },
            location.join("type"),
        )
        .into()),
    }
}
