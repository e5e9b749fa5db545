use crate::{
    error::{Error, SchemaError, ValidationErrorKind},
    keywords::{
        format,
        helpers::{check_size, type_error},
    },
    paths::{LazyLocation, Location},
    validator::{fail, ValidationContext},
    value::{Map, Value},
    write::unescape,
};

pub(crate) fn validate<'s>(
    ctx: &mut ValidationContext<'s, '_>,
    node: &'s Map,
    location: &Location,
    instance: &Value,
    path: &LazyLocation,
) -> Result<(), Error> {
    let Value::String(item) = instance else {
        return Err(type_error(instance, path, location, "string"));
    };
    check_size(
        node,
        ("minLength", "maxLength"),
        bytecount::num_chars(item.as_bytes()),
        instance,
        location,
        path,
        (
            |limit| ValidationErrorKind::MinLength { limit },
            |limit| ValidationErrorKind::MaxLength { limit },
        ),
    )?;

    match node.get("pattern") {
        None => {}
        Some(Value::String(pattern)) => {
            let pattern_location = location.join("pattern");
            let compiled = ctx.pattern(pattern, &pattern_location)?;
            match compiled.is_match(item) {
                Ok(true) => {}
                Ok(false) => {
                    return Err(fail(
                        ValidationErrorKind::Pattern {
                            pattern: compiled.as_str().to_string(),
                        },
                        instance,
                        path,
                        pattern_location,
                    ))
                }
                Err(error) => {
                    return Err(fail(
                        ValidationErrorKind::BacktrackLimitExceeded {
                            message: error.to_string(),
                        },
                        instance,
                        path,
                        pattern_location,
                    ))
                }
            }
        }
        Some(_) => {
            return Err(
                SchemaError::invalid_keyword("pattern", "a string", location.join("pattern"))
                    .into(),
            )
        }
    }

    match node.get("format") {
        None => Ok(()),
        Some(Value::String(name)) => {
            let options = ctx.options();
            if !options.validates_formats() {
                return Ok(());
            }
            let is_valid = match options.get_format(&unescape(name)) {
                Some(custom) => custom.is_valid(item),
                None => format::is_valid(name, item),
            };
            if is_valid {
                Ok(())
            } else {
                Err(fail(
                    ValidationErrorKind::Format {
                        format: name.clone(),
                    },
                    instance,
                    path,
                    location.join("format"),
                ))
            }
        }
        Some(_) => Err(
            SchemaError::invalid_keyword("format", "a string", location.join("format")).into(),
        ),
    }
}
