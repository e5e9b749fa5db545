//! Error types.
//!
//! Every failure the crate reports is one of four kinds: malformed text ([`SyntaxError`]), a typed
//! accessor used on the wrong kind of value ([`TypeMismatch`]), an unusable schema
//! ([`SchemaError`]) or a document that does not satisfy its schema ([`ValidationError`]).
//! [`Error`] unifies them for the functions at the crate root.
use std::{error, fmt};

use crate::{
    paths::{LazyLocation, Location},
    value::{Kind, Value},
};

/// Malformed JSON text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    kind: SyntaxErrorKind,
    offset: usize,
    line: usize,
    column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// The input ended in the middle of a value.
    UnexpectedEnd,
    /// A string literal is missing its closing quote.
    UnterminatedString,
    /// A backslash is followed by something other than a recognised escape.
    InvalidEscape,
    /// A raw control character appears inside a string literal.
    ControlCharacter,
    /// A value inside an array or object is not followed by `,` or the closing bracket.
    MissingDelimiter,
    /// An object key is not followed by `:`.
    ExpectedColon,
    /// An object member does not start with a string key.
    ExpectedKey,
    /// A `true`, `false` or `null` literal is misspelled.
    InvalidLiteral,
    /// A number literal could not be converted to a finite `f64`.
    InvalidNumber,
    /// A character that cannot start a value.
    UnexpectedCharacter,
    /// The document is not an object or an array.
    InvalidTopLevel,
    /// Non-whitespace follows the top-level value.
    TrailingCharacters,
    /// Containers are nested deeper than the configured limit.
    DepthLimitExceeded,
}

impl SyntaxErrorKind {
    fn message(self) -> &'static str {
        match self {
            SyntaxErrorKind::UnexpectedEnd => "unexpected end of input",
            SyntaxErrorKind::UnterminatedString => "unterminated string",
            SyntaxErrorKind::InvalidEscape => "invalid escape sequence",
            SyntaxErrorKind::ControlCharacter => "control character in string",
            SyntaxErrorKind::MissingDelimiter => "missing delimiter",
            SyntaxErrorKind::ExpectedColon => "expected ':' after object key",
            SyntaxErrorKind::ExpectedKey => "expected string key",
            SyntaxErrorKind::InvalidLiteral => "invalid literal",
            SyntaxErrorKind::InvalidNumber => "invalid number",
            SyntaxErrorKind::UnexpectedCharacter => "unexpected character",
            SyntaxErrorKind::InvalidTopLevel => "document must be an object or an array",
            SyntaxErrorKind::TrailingCharacters => "trailing characters",
            SyntaxErrorKind::DepthLimitExceeded => "nesting depth limit exceeded",
        }
    }
}

impl SyntaxError {
    /// Build an error, computing the line and column of `offset` within `input`.
    pub(crate) fn new(kind: SyntaxErrorKind, input: &[u8], offset: usize) -> Self {
        let offset = offset.min(input.len());
        let consumed = &input[..offset];
        let line = bytecount::count(consumed, b'\n') + 1;
        let line_start = consumed
            .iter()
            .rposition(|b| *b == b'\n')
            .map_or(0, |idx| idx + 1);
        let column = bytecount::num_chars(&consumed[line_start..]) + 1;
        SyntaxError {
            kind,
            offset,
            line,
            column,
        }
    }

    #[must_use]
    pub fn kind(&self) -> SyntaxErrorKind {
        self.kind
    }
    /// Byte offset of the failure.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }
    /// 1-based line of the failure.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }
    /// 1-based column of the failure, counted in characters.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }
}

impl error::Error for SyntaxError {}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {} column {}",
            self.kind.message(),
            self.line,
            self.column
        )
    }
}

/// A typed accessor was called on a value of another kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMismatch {
    expected: Kind,
    actual: Kind,
}

impl TypeMismatch {
    pub(crate) fn new(expected: Kind, actual: Kind) -> Self {
        TypeMismatch { expected, actual }
    }
    #[must_use]
    pub fn expected(&self) -> Kind {
        self.expected
    }
    #[must_use]
    pub fn actual(&self) -> Kind {
        self.actual
    }
}

impl error::Error for TypeMismatch {}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, found {}", self.expected, self.actual)
    }
}

/// The schema itself cannot be used for validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    kind: SchemaErrorKind,
    /// Path to the offending schema location.
    schema_path: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaErrorKind {
    /// A schema or subschema is not an object.
    NotAnObject { actual: Kind },
    /// A subschema has neither `type` nor `$ref`.
    MissingType,
    /// A keyword required for this `type` is absent.
    MissingKeyword { keyword: &'static str },
    /// A keyword value has the wrong shape.
    InvalidKeyword {
        keyword: &'static str,
        expected: &'static str,
    },
    /// `type` names no known type.
    UnknownType { name: String },
    /// A `$ref` pointer does not lead anywhere inside the schema.
    UnresolvedReference { reference: String },
    /// A chain of `$ref`s returns to a reference it already followed.
    CircularReference { reference: String },
    /// The keyword is recognised but deliberately not implemented.
    UnsupportedKeyword { keyword: &'static str },
    /// A `pattern` is not a valid regular expression.
    InvalidPattern { pattern: String, message: String },
    /// Evaluation nested more schema nodes than the configured limit.
    DepthLimitExceeded { limit: usize },
}

impl SchemaError {
    pub(crate) fn new(kind: SchemaErrorKind, schema_path: Location) -> Self {
        SchemaError { kind, schema_path }
    }
    pub(crate) fn invalid_keyword(
        keyword: &'static str,
        expected: &'static str,
        schema_path: Location,
    ) -> Self {
        SchemaError::new(
            SchemaErrorKind::InvalidKeyword { keyword, expected },
            schema_path,
        )
    }
    pub(crate) fn missing_keyword(keyword: &'static str, schema_path: Location) -> Self {
        SchemaError::new(SchemaErrorKind::MissingKeyword { keyword }, schema_path)
    }
    #[must_use]
    pub fn kind(&self) -> &SchemaErrorKind {
        &self.kind
    }
    #[must_use]
    pub fn schema_path(&self) -> &Location {
        &self.schema_path
    }
}

impl error::Error for SchemaError {}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SchemaErrorKind::NotAnObject { actual } => {
                write!(f, "Schema must be an object, found {actual}")?;
            }
            SchemaErrorKind::MissingType => {
                f.write_str("Schema has neither \"type\" nor \"$ref\"")?;
            }
            SchemaErrorKind::MissingKeyword { keyword } => {
                write!(f, "Schema is missing the \"{keyword}\" keyword")?;
            }
            SchemaErrorKind::InvalidKeyword { keyword, expected } => {
                write!(f, "\"{keyword}\" must be {expected}")?;
            }
            SchemaErrorKind::UnknownType { name } => {
                write!(f, "\"{name}\" is not a known type")?;
            }
            SchemaErrorKind::UnresolvedReference { reference } => {
                write!(f, "Unresolvable reference \"{reference}\"")?;
            }
            SchemaErrorKind::CircularReference { reference } => {
                write!(f, "Circular reference \"{reference}\"")?;
            }
            SchemaErrorKind::UnsupportedKeyword { keyword } => {
                write!(f, "\"{keyword}\" is not supported")?;
            }
            SchemaErrorKind::InvalidPattern { pattern, message } => {
                write!(f, "\"{pattern}\" is not a valid regular expression: {message}")?;
            }
            SchemaErrorKind::DepthLimitExceeded { limit } => {
                write!(f, "Schema evaluation nested deeper than {limit} levels")?;
            }
        }
        if !self.schema_path.as_str().is_empty() {
            write!(f, " (at \"{}\")", self.schema_path)?;
        }
        Ok(())
    }
}

/// A document does not satisfy its schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    repr: Box<ErrorRepr>,
}

#[derive(Debug, Clone, PartialEq)]
struct ErrorRepr {
    /// Value of the property that failed validation.
    instance: Value,
    kind: ValidationErrorKind,
    /// Path to the value that failed validation.
    instance_path: Location,
    /// Path to the JSON Schema keyword that failed validation.
    schema_path: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationErrorKind {
    /// The value is of the wrong type.
    Type { expected: &'static str },
    /// A required property is missing.
    Required { property: String },
    /// The object has a property not declared in `properties`.
    AdditionalProperties { unexpected: String },
    MinProperties { limit: u64 },
    MaxProperties { limit: u64 },
    /// A positional `items` array does not match the array length.
    ItemsLength { expected: usize },
    MinItems { limit: u64 },
    MaxItems { limit: u64 },
    MinContains { limit: u64 },
    MaxContains { limit: u64 },
    /// Two array elements are equal.
    UniqueItems,
    MinLength { limit: u64 },
    MaxLength { limit: u64 },
    /// The string does not match the pattern.
    Pattern { pattern: String },
    /// The string does not conform to the format.
    Format { format: String },
    Minimum { limit: f64 },
    Maximum { limit: f64 },
    ExclusiveMinimum { limit: f64 },
    ExclusiveMaximum { limit: f64 },
    MultipleOf { multiple_of: f64 },
    /// The regex engine gave up on `pattern`.
    BacktrackLimitExceeded { message: String },
}

impl ValidationError {
    pub(crate) fn new(
        kind: ValidationErrorKind,
        instance: &Value,
        instance_path: &LazyLocation,
        schema_path: Location,
    ) -> Self {
        ValidationError {
            repr: Box::new(ErrorRepr {
                instance: instance.clone(),
                kind,
                instance_path: instance_path.into(),
                schema_path,
            }),
        }
    }
    #[must_use]
    pub fn kind(&self) -> &ValidationErrorKind {
        &self.repr.kind
    }
    /// The offending value.
    #[must_use]
    pub fn instance(&self) -> &Value {
        &self.repr.instance
    }
    #[must_use]
    pub fn instance_path(&self) -> &Location {
        &self.repr.instance_path
    }
    #[must_use]
    pub fn schema_path(&self) -> &Location {
        &self.repr.schema_path
    }
}

impl error::Error for ValidationError {}

impl fmt::Display for ValidationError {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let instance = &self.repr.instance;
        match &self.repr.kind {
            ValidationErrorKind::Type { expected } => {
                write!(f, "{instance} is not of type \"{expected}\"")
            }
            ValidationErrorKind::Required { property } => {
                write!(f, "\"{property}\" is a required property")
            }
            ValidationErrorKind::AdditionalProperties { unexpected } => write!(
                f,
                "Additional properties are not allowed (\"{unexpected}\" was unexpected)"
            ),
            ValidationErrorKind::MinProperties { limit } => write!(
                f,
                "{instance} has less than {limit} propert{}",
                if *limit == 1 { "y" } else { "ies" }
            ),
            ValidationErrorKind::MaxProperties { limit } => write!(
                f,
                "{instance} has more than {limit} propert{}",
                if *limit == 1 { "y" } else { "ies" }
            ),
            ValidationErrorKind::ItemsLength { expected } => {
                let actual = instance.as_array().map_or(0, Vec::len);
                write!(
                    f,
                    "{instance} has {actual} item{}, expected exactly {expected}",
                    if actual == 1 { "" } else { "s" }
                )
            }
            ValidationErrorKind::MinItems { limit } => write!(
                f,
                "{instance} has less than {limit} item{}",
                if *limit == 1 { "" } else { "s" }
            ),
            ValidationErrorKind::MaxItems { limit } => write!(
                f,
                "{instance} has more than {limit} item{}",
                if *limit == 1 { "" } else { "s" }
            ),
            ValidationErrorKind::MinContains { limit } => write!(
                f,
                "{instance} contains less than {limit} item{}",
                if *limit == 1 { "" } else { "s" }
            ),
            ValidationErrorKind::MaxContains { limit } => write!(
                f,
                "{instance} contains more than {limit} item{}",
                if *limit == 1 { "" } else { "s" }
            ),
            ValidationErrorKind::UniqueItems => {
                write!(f, "{instance} has non-unique elements")
            }
            ValidationErrorKind::MinLength { limit } => write!(
                f,
                "{instance} is shorter than {limit} character{}",
                if *limit == 1 { "" } else { "s" }
            ),
            ValidationErrorKind::MaxLength { limit } => write!(
                f,
                "{instance} is longer than {limit} character{}",
                if *limit == 1 { "" } else { "s" }
            ),
            ValidationErrorKind::Pattern { pattern } => {
                write!(f, "{instance} does not match \"{pattern}\"")
            }
            ValidationErrorKind::Format { format } => {
                write!(f, "{instance} is not a \"{format}\"")
            }
            ValidationErrorKind::Minimum { limit } => {
                write!(f, "{instance} is less than the minimum of {}", Value::from(*limit))
            }
            ValidationErrorKind::Maximum { limit } => write!(
                f,
                "{instance} is greater than the maximum of {}",
                Value::from(*limit)
            ),
            ValidationErrorKind::ExclusiveMinimum { limit } => write!(
                f,
                "{instance} is less than or equal to the minimum of {}",
                Value::from(*limit)
            ),
            ValidationErrorKind::ExclusiveMaximum { limit } => write!(
                f,
                "{instance} is greater than or equal to the maximum of {}",
                Value::from(*limit)
            ),
            ValidationErrorKind::MultipleOf { multiple_of } => {
                write!(f, "{instance} is not a multiple of {}", Value::from(*multiple_of))
            }
            ValidationErrorKind::BacktrackLimitExceeded { message } => f.write_str(message),
        }
    }
}

/// Any failure reported by the functions at the crate root.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Syntax(SyntaxError),
    TypeMismatch(TypeMismatch),
    Schema(SchemaError),
    Validation(ValidationError),
}

impl Error {
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax(_))
    }
    #[must_use]
    pub fn is_schema(&self) -> bool {
        matches!(self, Error::Schema(_))
    }
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Syntax(error) => Some(error),
            Error::TypeMismatch(error) => Some(error),
            Error::Schema(error) => Some(error),
            Error::Validation(error) => Some(error),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Syntax(error) => fmt::Display::fmt(error, f),
            Error::TypeMismatch(error) => fmt::Display::fmt(error, f),
            Error::Schema(error) => fmt::Display::fmt(error, f),
            Error::Validation(error) => fmt::Display::fmt(error, f),
        }
    }
}

impl From<SyntaxError> for Error {
    fn from(error: SyntaxError) -> Self {
        Error::Syntax(error)
    }
}

impl From<TypeMismatch> for Error {
    fn from(error: TypeMismatch) -> Self {
        Error::TypeMismatch(error)
    }
}

impl From<SchemaError> for Error {
    fn from(error: SchemaError) -> Self {
        Error::Schema(error)
    }
}

impl From<ValidationError> for Error {
    fn from(error: ValidationError) -> Self {
        Error::Validation(error)
    }
}
