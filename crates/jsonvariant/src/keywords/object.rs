use crate::{
    error::{Error, SchemaError, SchemaErrorKind, ValidationErrorKind},
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
    let Value::Object(object) = instance else {
        return Err(type_error(instance, path, location, "object"));
    };
    let properties = match node.get("properties") {
        Some(Value::Object(properties)) => properties,
        Some(_) => {
            return Err(SchemaError::invalid_keyword(
                "properties",
                "an object",
                location.join("properties"),
            )
            .into())
        }
        None => return Err(SchemaError::missing_keyword("properties", location.clone()).into()),
    };
    if node.contains_key("dependentRequired") {
        return Err(SchemaError::new(
            SchemaErrorKind::UnsupportedKeyword {
                keyword: "dependentRequired",
            },
            location.join("dependentRequired"),
        )
        .into());
    }
    if let Some(required) = node.get("required") {
        validate_required(required, object, location, instance, path)?;
    }

    let properties_location = location.join("properties");
    for (name, subschema) in properties {
        let property_location = properties_location.join(name.as_str());
        let property_path = path.push(name.as_str());
        match object.get(name) {
            Some(value) => ctx.validate(subschema, &property_location, value, &property_path)?,
            None => ctx.ignore(&property_location, &property_path),
        }
    }

    if let Some(additional) = node.get("additionalProperties") {
        validate_additional(ctx, additional, properties, object, location, instance, path)?;
    }

    check_size(
        node,
        ("minProperties", "maxProperties"),
        object.len(),
        instance,
        location,
        path,
        (
            |limit| ValidationErrorKind::MinProperties { limit },
            |limit| ValidationErrorKind::MaxProperties { limit },
        ),
    )
}

fn validate_required(
    required: &Value,
    object: &Map,
    location: &Location,
    instance: &Value,
    path: &LazyLocation,
) -> Result<(), Error> {
    let invalid =
        || SchemaError::invalid_keyword("required", "an array of strings", location.join("required"));
    let Value::Array(required) = required else {
        return Err(invalid().into());
    };
    for property in required {
        let Value::String(property) = property else {
            return Err(invalid().into());
        };
        if !object.contains_key(property) {
            return Err(fail(
                ValidationErrorKind::Required {
                    property: property.clone(),
                },
                instance,
                path,
                location.join("required"),
            ));
        }
    }
    Ok(())
}

fn validate_additional<'s>(
    ctx: &mut ValidationContext<'s, '_>,
    additional: &'s Value,
    properties: &Map,
    object: &Map,
    location: &Location,
    instance: &Value,
    path: &LazyLocation,
) -> Result<(), Error> {
    let additional_location = location.join("additionalProperties");
    let mut undeclared = object
        .iter()
        .filter(|(name, _)| !properties.contains_key(*name));
    match additional {
        Value::Bool(true) => Ok(()),
        Value::Bool(false) => match undeclared.next() {
            Some((name, _)) => Err(fail(
                ValidationErrorKind::AdditionalProperties {
                    unexpected: name.clone(),
                },
                instance,
                path,
                additional_location,
            )),
            None => Ok(()),
        },
        Value::Object(_) => {
            for (name, value) in undeclared {
                ctx.validate(
                    additional,
                    &additional_location,
                    value,
                    &path.push(name.as_str()),
                )?;
            }
            Ok(())
        }
        _ => Err(SchemaError::invalid_keyword(
            "additionalProperties",
            "a boolean or an object",
            additional_location,
        )
        .into()),
    }
}
