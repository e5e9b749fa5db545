use std::{fmt, marker::PhantomData, sync::Arc};

use ahash::AHashMap;

use crate::{
    error::{Error, SyntaxError},
    parser::{Parser, DEFAULT_MAX_DEPTH},
    validator::Validator,
    Value,
};

/// A custom check for the `format` keyword.
pub trait Format: Send + Sync + 'static {
    fn is_valid(&self, value: &str) -> bool;
}

impl<F> Format for F
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    #[inline]
    fn is_valid(&self, value: &str) -> bool {
        self(value)
    }
}

/// Configuration options for schema validation.
#[derive(Clone)]
pub struct ValidationOptions {
    validate_formats: bool,
    formats: AHashMap<String, Arc<dyn Format>>,
    pattern_options: PatternEngineOptions,
    max_depth: usize,
}

/// Default limit on nested schema evaluations in one validation call.
pub(crate) const DEFAULT_MAX_EVALUATION_DEPTH: usize = 256;

impl Default for ValidationOptions {
    fn default() -> Self {
        ValidationOptions {
            validate_formats: true,
            formats: AHashMap::default(),
            pattern_options: PatternEngineOptions::default(),
            max_depth: DEFAULT_MAX_EVALUATION_DEPTH,
        }
    }
}

impl ValidationOptions {
    /// Build a validator for `schema`.
    ///
    /// The schema is cloned into the validator. Only its root is checked here; problems deeper
    /// in the schema are reported when validation reaches them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] if `schema` is not an object.
    pub fn build(&self, schema: &Value) -> Result<Validator, Error> {
        Ok(Validator::new(schema, self.clone())?)
    }

    /// Set whether to validate the `format` keyword. Enabled by default.
    #[must_use]
    pub fn should_validate_formats(mut self, validate_formats: bool) -> Self {
        self.validate_formats = validate_formats;
        self
    }

    /// Add a custom format checker.
    ///
    /// A custom format with the same name as a built-in one replaces it.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use jsonvariant::{json, options};
    /// fn my_format(s: &str) -> bool {
    ///    s.ends_with("42!")
    /// }
    /// # fn foo() {
    /// let schema = json!({"type": "string", "format": "custom"});
    /// let validator = options()
    ///     .with_format("custom", my_format)
    ///     .build(&schema)
    ///     .expect("Valid schema");
    ///
    /// assert!(validator.is_valid(&json!("foo42!")));
    /// assert!(!validator.is_valid(&json!("foo13")));
    /// # }
    /// ```
    #[must_use]
    pub fn with_format<N, F>(mut self, name: N, format: F) -> Self
    where
        N: Into<String>,
        F: Format,
    {
        self.formats.insert(name.into(), Arc::new(format));
        self
    }

    /// Configure the regular expression engine used for the `pattern` keyword.
    ///
    /// ```rust
    /// # use jsonvariant::{json, options, PatternOptions};
    /// let schema = json!({"type": "string", "pattern": "[a-z]+"});
    /// let validator = options()
    ///     .with_pattern_options(PatternOptions::regex().size_limit(1 << 20))
    ///     .build(&schema)
    ///     .expect("Valid schema");
    /// assert!(validator.is_valid(&json!("hello")));
    /// ```
    #[must_use]
    pub fn with_pattern_options<E>(mut self, options: PatternOptions<E>) -> Self {
        self.pattern_options = options.inner;
        self
    }

    /// Limit how deeply schema nodes may nest while a document is evaluated. 256 by default.
    ///
    /// Every subschema entered, including the target of a `$ref`, counts as one level.
    /// Exceeding the limit is reported as [`SchemaErrorKind::DepthLimitExceeded`].
    ///
    /// [`SchemaErrorKind::DepthLimitExceeded`]: crate::SchemaErrorKind::DepthLimitExceeded
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub(crate) fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub(crate) fn validates_formats(&self) -> bool {
        self.validate_formats
    }

    pub(crate) fn get_format(&self, name: &str) -> Option<&Arc<dyn Format>> {
        self.formats.get(name)
    }

    pub(crate) fn pattern_options(&self) -> PatternEngineOptions {
        self.pattern_options
    }
}

impl fmt::Debug for ValidationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formats: Vec<_> = self.formats.keys().collect();
        formats.sort();
        f.debug_struct("ValidationOptions")
            .field("validate_formats", &self.validate_formats)
            .field("formats", &formats)
            .field("pattern_options", &self.pattern_options)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PatternEngineOptions {
    FancyRegex {
        backtrack_limit: Option<usize>,
        size_limit: Option<usize>,
        dfa_size_limit: Option<usize>,
    },
    Regex {
        size_limit: Option<usize>,
        dfa_size_limit: Option<usize>,
    },
}

impl Default for PatternEngineOptions {
    fn default() -> Self {
        PatternEngineOptions::FancyRegex {
            backtrack_limit: None,
            size_limit: None,
            dfa_size_limit: None,
        }
    }
}

/// Marker for the backtracking `fancy-regex` engine. Supports lookaround and backreferences.
#[derive(Debug)]
pub struct FancyRegex;

/// Marker for the linear-time `regex` engine.
#[derive(Debug)]
pub struct Regex;

/// Configuration for the regular expression engine behind `pattern`.
#[derive(Debug, Clone)]
pub struct PatternOptions<E> {
    inner: PatternEngineOptions,
    _marker: PhantomData<E>,
}

impl PatternOptions<FancyRegex> {
    /// Use `fancy-regex`. This is the default.
    #[must_use]
    pub fn fancy_regex() -> Self {
        PatternOptions {
            inner: PatternEngineOptions::default(),
            _marker: PhantomData,
        }
    }

    /// Limit the number of backtracking steps for a single match.
    ///
    /// Exceeding it fails validation of the string being matched.
    #[must_use]
    pub fn backtrack_limit(mut self, limit: usize) -> Self {
        if let PatternEngineOptions::FancyRegex {
            ref mut backtrack_limit,
            ..
        } = self.inner
        {
            *backtrack_limit = Some(limit);
        }
        self
    }

    /// Limit the compiled size of the parts delegated to the `regex` crate.
    #[must_use]
    pub fn size_limit(mut self, limit: usize) -> Self {
        if let PatternEngineOptions::FancyRegex {
            ref mut size_limit, ..
        } = self.inner
        {
            *size_limit = Some(limit);
        }
        self
    }

    /// Limit the lazy DFA cache of the parts delegated to the `regex` crate.
    #[must_use]
    pub fn dfa_size_limit(mut self, limit: usize) -> Self {
        if let PatternEngineOptions::FancyRegex {
            ref mut dfa_size_limit,
            ..
        } = self.inner
        {
            *dfa_size_limit = Some(limit);
        }
        self
    }
}

impl PatternOptions<Regex> {
    /// Use the `regex` crate. Lookaround and backreferences are unavailable.
    #[must_use]
    pub fn regex() -> Self {
        PatternOptions {
            inner: PatternEngineOptions::Regex {
                size_limit: None,
                dfa_size_limit: None,
            },
            _marker: PhantomData,
        }
    }

    /// Limit the compiled program size.
    #[must_use]
    pub fn size_limit(mut self, limit: usize) -> Self {
        if let PatternEngineOptions::Regex {
            ref mut size_limit, ..
        } = self.inner
        {
            *size_limit = Some(limit);
        }
        self
    }

    /// Limit the lazy DFA cache size.
    #[must_use]
    pub fn dfa_size_limit(mut self, limit: usize) -> Self {
        if let PatternEngineOptions::Regex {
            ref mut dfa_size_limit,
            ..
        } = self.inner
        {
            *dfa_size_limit = Some(limit);
        }
        self
    }
}

/// Configuration options for parsing.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum nesting of arrays and objects. Defaults to 512.
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse `text` with these options.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError`] if `text` is not a well-formed JSON object or array.
    pub fn parse(&self, text: &str) -> Result<Value, SyntaxError> {
        Parser::new(text, self.max_depth).parse_document()
    }
}
