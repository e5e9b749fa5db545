use crate::{options::PatternEngineOptions, write::unescape};

pub(crate) trait RegexEngine: Sized + Send + Sync {
    type Error: RegexError;
    fn is_match(&self, text: &str) -> Result<bool, Self::Error>;
}

impl RegexEngine for fancy_regex::Regex {
    type Error = fancy_regex::Error;

    fn is_match(&self, text: &str) -> Result<bool, Self::Error> {
        fancy_regex::Regex::is_match(self, text)
    }
}

impl RegexEngine for regex::Regex {
    type Error = regex::Error;

    fn is_match(&self, text: &str) -> Result<bool, Self::Error> {
        Ok(regex::Regex::is_match(self, text))
    }
}

pub(crate) trait RegexError {
    fn into_backtrack_error(self) -> Option<fancy_regex::Error>;
}

impl RegexError for fancy_regex::Error {
    fn into_backtrack_error(self) -> Option<fancy_regex::Error> {
        Some(self)
    }
}

impl RegexError for regex::Error {
    fn into_backtrack_error(self) -> Option<fancy_regex::Error> {
        None
    }
}

/// A compiled `pattern` keyword.
///
/// Patterns must match the whole string, so the engines receive `^(?:pattern)$`.
pub(crate) struct Pattern {
    original: String,
    matcher: Matcher,
}

enum Matcher {
    /// The pattern is a plain literal and is compared with `==`.
    Exact(String),
    Fancy(fancy_regex::Regex),
    Standard(regex::Regex),
}

impl Pattern {
    /// Compile `pattern` with the configured engine.
    ///
    /// `pattern` is a stored string, so its escape pairs are decoded first: `\\d` becomes the
    /// regex `\d`.
    ///
    /// On failure returns the engine's error message.
    pub(crate) fn compile(pattern: &str, options: PatternEngineOptions) -> Result<Self, String> {
        let source = unescape(pattern);
        let matcher = if let Some(exact) = analyze_pattern(&source) {
            Matcher::Exact(exact)
        } else {
            compile_regex(&format!("^(?:{source})$"), options)?
        };
        Ok(Pattern {
            original: pattern.to_string(),
            matcher,
        })
    }

    /// Match `text` against the pattern.
    ///
    /// Only the backtracking engine can fail, when it exceeds its backtrack limit.
    pub(crate) fn is_match(&self, text: &str) -> Result<bool, fancy_regex::Error> {
        match &self.matcher {
            Matcher::Exact(exact) => Ok(text == exact),
            Matcher::Fancy(regex) => matches(regex, text),
            Matcher::Standard(regex) => matches(regex, text),
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.original
    }
}

fn compile_regex(anchored: &str, options: PatternEngineOptions) -> Result<Matcher, String> {
    match options {
        PatternEngineOptions::FancyRegex {
            backtrack_limit,
            size_limit,
            dfa_size_limit,
        } => {
            let mut builder = fancy_regex::RegexBuilder::new(anchored);
            if let Some(limit) = backtrack_limit {
                builder.backtrack_limit(limit);
            }
            if let Some(limit) = size_limit {
                builder.delegate_size_limit(limit);
            }
            if let Some(limit) = dfa_size_limit {
                builder.delegate_dfa_size_limit(limit);
            }
            builder
                .build()
                .map(Matcher::Fancy)
                .map_err(|error| error.to_string())
        }
        PatternEngineOptions::Regex {
            size_limit,
            dfa_size_limit,
        } => {
            let mut builder = regex::RegexBuilder::new(anchored);
            if let Some(limit) = size_limit {
                builder.size_limit(limit);
            }
            if let Some(limit) = dfa_size_limit {
                builder.dfa_size_limit(limit);
            }
            builder
                .build()
                .map(Matcher::Standard)
                .map_err(|error| error.to_string())
        }
    }
}

fn matches<R: RegexEngine>(regex: &R, text: &str) -> Result<bool, fancy_regex::Error> {
    match regex.is_match(text) {
        Ok(is_match) => Ok(is_match),
        Err(error) => match error.into_backtrack_error() {
            Some(error) => Err(error),
            None => Ok(false),
        },
    }
}

/// Return the literal a pattern stands for, if matching it needs no regex engine.
///
/// Accepts unescaped alphanumeric chars, `-`, `_`, `/`, space and the safe escape sequences
/// `\/` → `/`, `\-` → `-`, `\_` → `_`, `\$` → `$`, `\.` → `.` in the literal body.
/// Leading `^` and trailing `$` anchors are redundant for a whole-string match and are dropped.
pub(crate) fn analyze_pattern(pattern: &str) -> Option<String> {
    let body = pattern.strip_prefix('^').unwrap_or(pattern);
    let mut literal = String::new();
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next()? {
                c @ ('/' | '-' | '_' | '$' | '.') => literal.push(c),
                _ => return None,
            }
        } else if c == '$' {
            // Unescaped `$` is only valid as the very last character (end anchor).
            return chars.peek().is_none().then_some(literal);
        } else if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '/' | ' ') {
            literal.push(c);
        } else {
            return None;
        }
    }
    Some(literal)
}
