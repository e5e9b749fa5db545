//! Schema evaluation.
//!
//! The schema is interpreted directly: every call walks the schema and the instance side by
//! side, so forward `$ref`s need no compilation step.
use std::collections::hash_map::Entry;

use ahash::AHashMap;

use crate::{
    error::{Error, SchemaError, SchemaErrorKind, ValidationError, ValidationErrorKind},
    keywords,
    options::ValidationOptions,
    paths::{LazyLocation, Location},
    regex::Pattern,
    trace::{Tracer, TracingCallback},
    Value,
};

/// A schema paired with the options it is evaluated under.
#[derive(Debug, Clone)]
pub struct Validator {
    schema: Value,
    options: ValidationOptions,
}

impl Validator {
    pub(crate) fn new(schema: &Value, options: ValidationOptions) -> Result<Self, SchemaError> {
        check_root(schema)?;
        Ok(Validator {
            schema: schema.clone(),
            options,
        })
    }

    /// Validate `instance`, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `instance` does not satisfy the schema, or
    /// [`Error::Schema`] if the part of the schema that was reached is unusable.
    pub fn validate(&self, instance: &Value) -> Result<(), Error> {
        ValidationContext::new(&self.schema, &self.options, None).validate_root(instance)
    }

    /// Run validation and return whether it succeeded.
    ///
    /// Schema errors count as failures.
    #[must_use]
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validate(instance).is_ok()
    }

    /// Validate `instance`, reporting every evaluated schema node to `callback`.
    ///
    /// # Errors
    ///
    /// Same as [`Validator::validate`].
    pub fn trace(&self, instance: &Value, callback: TracingCallback<'_>) -> Result<(), Error> {
        ValidationContext::new(&self.schema, &self.options, Some(callback)).validate_root(instance)
    }

    /// The schema this validator evaluates.
    #[must_use]
    pub fn schema(&self) -> &Value {
        &self.schema
    }
}

fn check_root(schema: &Value) -> Result<(), SchemaError> {
    if schema.is_object() {
        Ok(())
    } else {
        Err(SchemaError::new(
            SchemaErrorKind::NotAnObject {
                actual: schema.kind(),
            },
            Location::new(),
        ))
    }
}

/// Validate `instance` against `schema` without building a [`Validator`].
pub(crate) fn validate(
    schema: &Value,
    options: &ValidationOptions,
    instance: &Value,
) -> Result<(), Error> {
    check_root(schema)?;
    ValidationContext::new(schema, options, None).validate_root(instance)
}

/// State of a single validation call.
pub(crate) struct ValidationContext<'s, 'c> {
    root: &'s Value,
    options: &'s ValidationOptions,
    patterns: AHashMap<&'s str, Pattern>,
    /// `$ref`s followed since the last node with a `type`.
    references: Vec<&'s str>,
    /// Schema nodes currently being evaluated.
    depth: usize,
    tracer: Tracer<'c>,
}

impl<'s, 'c> ValidationContext<'s, 'c> {
    pub(crate) fn new(
        root: &'s Value,
        options: &'s ValidationOptions,
        callback: Option<TracingCallback<'c>>,
    ) -> Self {
        ValidationContext {
            root,
            options,
            patterns: AHashMap::default(),
            references: Vec::new(),
            depth: 0,
            tracer: Tracer::new(callback),
        }
    }

    fn validate_root(mut self, instance: &Value) -> Result<(), Error> {
        let root = self.root;
        self.validate(root, &Location::new(), instance, &LazyLocation::new())
    }

    pub(crate) fn root(&self) -> &'s Value {
        self.root
    }

    pub(crate) fn options(&self) -> &'s ValidationOptions {
        self.options
    }

    /// Evaluate `schema` against `instance` and report the outcome to the tracing callback.
    pub(crate) fn validate(
        &mut self,
        schema: &'s Value,
        location: &Location,
        instance: &Value,
        path: &LazyLocation,
    ) -> Result<(), Error> {
        let limit = self.options.max_depth();
        if self.depth >= limit {
            return Err(SchemaError::new(
                SchemaErrorKind::DepthLimitExceeded { limit },
                location.clone(),
            )
            .into());
        }
        self.depth += 1;
        let result = self.evaluate(schema, location, instance, path);
        self.depth -= 1;
        self.tracer.evaluated(path, location, &result);
        result
    }

    /// Report a subschema that did not apply to the instance.
    pub(crate) fn ignore(&mut self, location: &Location, path: &LazyLocation) {
        self.tracer.ignored(path, location);
    }

    fn evaluate(
        &mut self,
        schema: &'s Value,
        location: &Location,
        instance: &Value,
        path: &LazyLocation,
    ) -> Result<(), Error> {
        let Value::Object(node) = schema else {
            return Err(SchemaError::new(
                SchemaErrorKind::NotAnObject {
                    actual: schema.kind(),
                },
                location.clone(),
            )
            .into());
        };
        if let Some(ty) = node.get("type") {
            let Value::String(name) = ty else {
                return Err(
                    SchemaError::invalid_keyword("type", "a string", location.join("type")).into(),
                );
            };
            let references = std::mem::take(&mut self.references);
            let result = keywords::validate(self, name, node, location, instance, path);
            self.references = references;
            return result;
        }
        if let Some(reference) = node.get("$ref") {
            return keywords::reference::validate(self, reference, location, instance, path);
        }
        Err(SchemaError::new(SchemaErrorKind::MissingType, location.clone()).into())
    }

    /// Record that `reference` is being followed.
    ///
    /// Fails if the current chain of references already went through it.
    pub(crate) fn enter_reference(
        &mut self,
        reference: &'s str,
        location: &Location,
    ) -> Result<(), SchemaError> {
        if self.references.contains(&reference) {
            return Err(SchemaError::new(
                SchemaErrorKind::CircularReference {
                    reference: reference.to_string(),
                },
                location.clone(),
            ));
        }
        self.references.push(reference);
        Ok(())
    }

    pub(crate) fn exit_reference(&mut self) {
        self.references.pop();
    }

    /// Compile `pattern` once per validation call.
    pub(crate) fn pattern(
        &mut self,
        pattern: &'s str,
        location: &Location,
    ) -> Result<&Pattern, SchemaError> {
        let options = self.options.pattern_options();
        match self.patterns.entry(pattern) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let compiled = Pattern::compile(pattern, options).map_err(|message| {
                    SchemaError::new(
                        SchemaErrorKind::InvalidPattern {
                            pattern: pattern.to_string(),
                            message,
                        },
                        location.clone(),
                    )
                })?;
                Ok(entry.insert(compiled))
            }
        }
    }
}

/// Build a validation error for `instance` at `path`, failing the keyword at `schema_path`.
pub(crate) fn fail(
    kind: ValidationErrorKind,
    instance: &Value,
    path: &LazyLocation,
    schema_path: Location,
) -> Error {
    ValidationError::new(kind, instance, path, schema_path).into()
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{Error, SchemaErrorKind},
        json, options,
        trace::NodeEvaluationResult,
    };

    #[test]
    fn non_object_subschema() {
        let schema = json!({"type": "object", "properties": {"a": 5}});
        let validator = options().build(&schema).expect("Valid root");
        let Err(Error::Schema(error)) = validator.validate(&json!({"a": 1})) else {
            panic!("Expected a schema error");
        };
        assert!(matches!(error.kind(), SchemaErrorKind::NotAnObject { .. }));
        assert_eq!(error.schema_path().as_str(), "/properties/a");
    }

    #[test]
    fn missing_type() {
        let schema = json!({"title": "nothing"});
        let validator = options().build(&schema).expect("Valid root");
        let Err(Error::Schema(error)) = validator.validate(&json!({})) else {
            panic!("Expected a schema error");
        };
        assert_eq!(error.kind(), &SchemaErrorKind::MissingType);
    }

    #[test]
    fn type_must_be_a_string() {
        let schema = json!({"type": ["string", "null"]});
        let validator = options().build(&schema).expect("Valid root");
        let Err(Error::Schema(error)) = validator.validate(&json!([])) else {
            panic!("Expected a schema error");
        };
        assert_eq!(error.schema_path().as_str(), "/type");
    }

    #[test]
    fn pattern_cache() {
        let schema = json!({
            "type": "array",
            "items": {"type": "string", "pattern": "[a-c]+"}
        });
        let validator = options().build(&schema).expect("Valid root");
        assert!(validator.is_valid(&json!(["a", "bb", "ccc"])));
        assert!(!validator.is_valid(&json!(["a", "d"])));
    }

    #[test]
    fn trace_reports_every_node() {
        let schema = json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "age": {"type": "integer"}
            }
        });
        let validator = options().build(&schema).expect("Valid root");
        let mut events = Vec::new();
        validator
            .trace(&json!({"name": "Sam"}), &mut |ctx| {
                events.push((
                    crate::paths::Location::from(ctx.instance_location)
                        .as_str()
                        .to_string(),
                    ctx.schema_location.as_str().to_string(),
                    ctx.result,
                ));
            })
            .expect("Valid instance");
        assert_eq!(
            events,
            vec![
                (
                    "/age".to_string(),
                    "/properties/age".to_string(),
                    NodeEvaluationResult::Ignored
                ),
                (
                    "/name".to_string(),
                    "/properties/name".to_string(),
                    NodeEvaluationResult::Valid
                ),
                (String::new(), String::new(), NodeEvaluationResult::Valid),
            ]
        );
    }

    #[test]
    fn trace_marks_failures() {
        let schema = json!({"type": "array", "items": {"type": "number"}});
        let validator = options().build(&schema).expect("Valid root");
        let mut results = Vec::new();
        let outcome = validator.trace(&json!([1, "x"]), &mut |ctx| results.push(ctx.result));
        assert!(outcome.is_err());
        assert_eq!(
            results,
            vec![
                NodeEvaluationResult::Valid,
                NodeEvaluationResult::Invalid,
                NodeEvaluationResult::Invalid,
            ]
        );
    }
}
