//! # jsonvariant
//!
//! A dynamic JSON [`Value`], a small recursive-descent parser and a validator for a subset of
//! JSON Schema draft-07 with same-document `$ref` support.
//!
//! ```rust
//! use jsonvariant::{json, parse};
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": {"name": {"type": "string", "minLength": 1}},
//!     "required": ["name"]
//! });
//! let document = parse(r#"{"name": "Sam"}"#)?;
//! assert!(jsonvariant::is_valid(&schema, &document));
//! # Ok::<(), jsonvariant::SyntaxError>(())
//! ```
//!
//! Use [`parse_with_schema`] to do both steps at once, or [`options`] to configure a reusable
//! [`Validator`]:
//!
//! ```rust
//! use jsonvariant::json;
//!
//! let validator = jsonvariant::options()
//!     .with_format("even", |value: &str| value.len() % 2 == 0)
//!     .build(&json!({"type": "string", "format": "even"}))?;
//! assert!(validator.is_valid(&json!("ab")));
//! assert!(!validator.is_valid(&json!("abc")));
//! # Ok::<(), jsonvariant::Error>(())
//! ```
#[macro_use]
mod macros;
mod error;
mod impls;
mod keywords;
mod options;
pub mod paths;
mod parser;
mod regex;
mod trace;
mod validator;
mod value;
mod write;

pub use error::{
    Error, SchemaError, SchemaErrorKind, SyntaxError, SyntaxErrorKind, TypeMismatch,
    ValidationError, ValidationErrorKind,
};
pub use options::{FancyRegex, Format, ParseOptions, PatternOptions, Regex, ValidationOptions};
pub use paths::{LazyLocation, Location, LocationSegment};
pub use trace::{NodeEvaluationResult, TracingCallback, TracingContext};
pub use validator::Validator;
pub use value::{Kind, Map, Value};

/// Parse JSON text into a [`Value`].
///
/// The top-level value must be an object or an array.
///
/// # Errors
///
/// Returns [`SyntaxError`] describing the first problem in `text`.
pub fn parse(text: &str) -> Result<Value, SyntaxError> {
    parser::parse(text)
}

/// Parse `schema_text` and `text`, then validate the document against the schema.
///
/// ```rust
/// let schema = r#"{"type": "array", "items": {"type": "integer"}}"#;
/// assert!(jsonvariant::parse_with_schema("[1, 2]", schema).is_ok());
///
/// let error = jsonvariant::parse_with_schema("[1, 2.5]", schema).unwrap_err();
/// assert_eq!(error.to_string(), "2.5 is not of type \"integer\"");
/// ```
///
/// # Errors
///
/// Returns the first syntax error in either text, a [`SchemaError`] if the schema cannot be
/// used, or the [`ValidationError`] of the first failed check.
pub fn parse_with_schema(text: &str, schema_text: &str) -> Result<Value, Error> {
    let schema = parse(schema_text).map_err(|error| {
        tracing::debug!(%error, "Schema is not valid JSON");
        error
    })?;
    let document = parse(text).map_err(|error| {
        tracing::debug!(%error, "Document is not valid JSON");
        error
    })?;
    validate(&schema, &document)?;
    Ok(document)
}

/// Validate `instance` against `schema` with the default options.
///
/// # Errors
///
/// Returns [`Error::Schema`] for an unusable schema or [`Error::Validation`] for the first
/// failed check.
pub fn validate(schema: &Value, instance: &Value) -> Result<(), Error> {
    validator::validate(schema, &ValidationOptions::default(), instance).inspect_err(|error| {
        tracing::debug!(
            %error,
            schema_error = error.is_schema(),
            "Document rejected"
        );
    })
}

/// Whether `instance` satisfies `schema`. Schema errors count as failures.
#[must_use]
pub fn is_valid(schema: &Value, instance: &Value) -> bool {
    validator::validate(schema, &ValidationOptions::default(), instance).is_ok()
}

/// Create a reusable validator with the default options.
///
/// # Errors
///
/// Returns [`Error::Schema`] if `schema` is not an object.
pub fn validator_for(schema: &Value) -> Result<Validator, Error> {
    ValidationOptions::default().build(schema)
}

/// Start configuring a validator.
#[must_use]
pub fn options() -> ValidationOptions {
    ValidationOptions::default()
}

#[doc(hidden)]
pub mod __private {
    /// Object keys written in a `json!` literal.
    #[must_use]
    pub fn key<K: AsRef<str>>(key: K) -> String {
        crate::write::escape(key.as_ref())
    }
}
