//! Facilities for working with paths within schemas or validated instances.
use std::{borrow::Cow, fmt, sync::Arc};

/// A single segment of a JSON pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSegment<'a> {
    /// Property name within a JSON object.
    Property(&'a str),
    /// Index within a JSON array.
    Index(usize),
}

impl<'a> From<&'a str> for LocationSegment<'a> {
    #[inline]
    fn from(value: &'a str) -> LocationSegment<'a> {
        LocationSegment::Property(value)
    }
}

impl From<usize> for LocationSegment<'_> {
    #[inline]
    fn from(value: usize) -> Self {
        LocationSegment::Index(value)
    }
}

/// A lazily constructed location within a JSON instance.
///
/// Nodes live on the stack of the validating function, so no allocation happens unless an error
/// or a tracing callback needs the location materialised.
#[derive(Debug, Clone, Copy)]
pub struct LazyLocation<'a, 'b> {
    pub(crate) segment: LocationSegment<'a>,
    pub(crate) parent: Option<&'b LazyLocation<'b, 'a>>,
}

impl Default for LazyLocation<'_, '_> {
    fn default() -> Self {
        LazyLocation::new()
    }
}

impl<'a> LazyLocation<'a, '_> {
    /// Create a root node of a JSON pointer.
    #[must_use]
    pub const fn new() -> Self {
        LazyLocation {
            // The value does not matter, it will never be used
            segment: LocationSegment::Index(0),
            parent: None,
        }
    }

    /// Push a new segment to the JSON pointer.
    #[inline]
    #[must_use]
    pub fn push(&'a self, segment: impl Into<LocationSegment<'a>>) -> Self {
        LazyLocation {
            segment: segment.into(),
            parent: Some(self),
        }
    }
}

impl<'a> From<&'a LazyLocation<'_, '_>> for Location {
    fn from(value: &'a LazyLocation<'_, '_>) -> Self {
        let mut segments = Vec::new();
        let mut head = value;
        while let Some(parent) = head.parent {
            segments.push(head.segment);
            head = parent;
        }
        let mut location = Location::new();
        for segment in segments.into_iter().rev() {
            location = location.join(segment);
        }
        location
    }
}

/// An absolute JSON pointer, for example `/properties/players/items/0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Location(Arc<String>);

impl Location {
    /// Create a pointer to the document root.
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(String::new()))
    }

    /// Append a segment, escaping `~` and `/` in property names.
    #[must_use]
    pub fn join<'a>(&self, segment: impl Into<LocationSegment<'a>>) -> Self {
        let mut buffer = String::with_capacity(self.0.len() + 8);
        buffer.push_str(&self.0);
        buffer.push('/');
        match segment.into() {
            LocationSegment::Property(name) => {
                for ch in name.chars() {
                    match ch {
                        '~' => buffer.push_str("~0"),
                        '/' => buffer.push_str("~1"),
                        _ => buffer.push(ch),
                    }
                }
            }
            LocationSegment::Index(idx) => buffer.push_str(&idx.to_string()),
        }
        Self(Arc::new(buffer))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Location {
    fn eq(&self, other: &str) -> bool {
        self.0.as_str() == other
    }
}

impl PartialEq<&str> for Location {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_str() == *other
    }
}

/// Undo the `~1` / `~0` escaping of a pointer token.
pub(crate) fn unescape_segment(token: &str) -> Cow<'_, str> {
    if token.contains('~') {
        Cow::Owned(token.replace("~1", "/").replace("~0", "~"))
    } else {
        Cow::Borrowed(token)
    }
}
