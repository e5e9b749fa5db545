//! JSON text output.
//!
//! Containers are written through RAII guards: [`Writer::object`] and [`Writer::array`] open the
//! bracket and the guard closes it on drop, handling separators and indentation in between.

use std::borrow::Cow;

const INDENT: usize = 4;

#[cfg(windows)]
const NEWLINE: &str = "\r\n";
#[cfg(not(windows))]
const NEWLINE: &str = "\n";

pub(crate) trait WriteJson {
    fn write_json(&self, w: &mut Writer);
    /// Entries returning `false` are skipped entirely inside containers.
    fn should_include(&self) -> bool {
        true
    }
}

impl WriteJson for str {
    fn write_json(&self, w: &mut Writer) {
        w.put_string(self);
    }
}

impl<T: ?Sized + WriteJson> WriteJson for &T {
    fn write_json(&self, w: &mut Writer) {
        T::write_json(*self, w);
    }
    fn should_include(&self) -> bool {
        T::should_include(*self)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Writer {
    out: String,
    indent: usize,
    pretty: bool,
}

impl Writer {
    pub(crate) fn new(pretty: bool) -> Self {
        Self {
            pretty,
            ..Self::default()
        }
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    pub(crate) fn buffer(&mut self) -> &mut String {
        &mut self.out
    }

    pub(crate) fn put_null(&mut self) {
        self.out.push_str("null");
    }

    /// Write `content` as a string literal.
    ///
    /// `content` is already in escaped form, so recognised escape pairs pass through untouched.
    /// Anything that would end the literal early or produce invalid JSON is escaped.
    pub(crate) fn put_string(&mut self, content: &str) {
        self.out.reserve(content.len() + 2);
        self.out.push('"');
        let bytes = content.as_bytes();
        let mut chars = content.char_indices();
        while let Some((idx, ch)) = chars.next() {
            match ch {
                '\\' => {
                    let len = escape_len(&bytes[idx..]);
                    if len == 0 {
                        self.out.push_str("\\\\");
                    } else {
                        self.out.push_str(&content[idx..idx + len]);
                        for _ in 1..len {
                            chars.next();
                        }
                    }
                }
                c => push_escaped(&mut self.out, c),
            }
        }
        self.out.push('"');
    }

    pub(crate) fn object(&mut self) -> ObjectWriter<'_> {
        ObjectWriter(SeqWriter::begin(self, b'{'))
    }

    pub(crate) fn array(&mut self) -> ArrayWriter<'_> {
        ArrayWriter(SeqWriter::begin(self, b'['))
    }

    fn newline(&mut self) {
        if self.pretty {
            self.out.push_str(NEWLINE);
            for _ in 0..self.indent {
                self.out.push(' ');
            }
        }
    }
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '"' => out.push_str("\\\""),
        '\\' => out.push_str("\\\\"),
        '\x08' => out.push_str("\\b"),
        '\x0c' => out.push_str("\\f"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c if c < ' ' => {
            const HEX: &[u8; 16] = b"0123456789abcdef";
            let code = c as usize;
            out.push_str("\\u00");
            out.push(char::from(HEX[code >> 4]));
            out.push(char::from(HEX[code & 0xf]));
        }
        c => out.push(c),
    }
}

/// Convert raw text into the escaped form that [`Value::String`](crate::Value::String) holds.
///
/// Every backslash is doubled, so the result reads back as exactly `raw`.
pub(crate) fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        push_escaped(&mut out, ch);
    }
    out
}

/// Decode the escape pairs in `escaped`.
///
/// A `\u` pair that does not name a Unicode scalar value, such as a lone surrogate, is kept as
/// written, and so is a backslash that starts no pair.
pub(crate) fn unescape(escaped: &str) -> Cow<'_, str> {
    if !escaped.contains('\\') {
        return Cow::Borrowed(escaped);
    }
    let bytes = escaped.as_bytes();
    let mut out = String::with_capacity(escaped.len());
    let mut idx = 0;
    while let Some(offset) = escaped[idx..].find('\\') {
        let start = idx + offset;
        out.push_str(&escaped[idx..start]);
        let len = escape_len(&bytes[start..]);
        let pair = &escaped[start..start + len.max(1)];
        match pair.as_bytes().get(1) {
            Some(b'b') => out.push('\x08'),
            Some(b'f') => out.push('\x0c'),
            Some(b'n') => out.push('\n'),
            Some(b'r') => out.push('\r'),
            Some(b't') => out.push('\t'),
            Some(b'u') => match u32::from_str_radix(&pair[2..], 16).ok().and_then(char::from_u32) {
                Some(ch) => out.push(ch),
                None => out.push_str(pair),
            },
            Some(&other) => out.push(char::from(other)),
            None => out.push('\\'),
        }
        idx = start + pair.len();
    }
    out.push_str(&escaped[idx..]);
    Cow::Owned(out)
}

/// Length of the escape pair at the start of `bytes`, or 0 if it is not one.
///
/// Recognised pairs are `\"`, `\\`, `\/`, `\b`, `\f`, `\n`, `\r`, `\t` and `\u` followed by four
/// hex digits.
pub(crate) fn escape_len(bytes: &[u8]) -> usize {
    match bytes.get(1) {
        Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => 2,
        Some(b'u')
            if bytes.len() >= 6 && bytes[2..6].iter().all(u8::is_ascii_hexdigit) =>
        {
            6
        }
        _ => 0,
    }
}

pub(crate) struct ArrayWriter<'a>(SeqWriter<'a>);

impl ArrayWriter<'_> {
    pub(crate) fn put<V: ?Sized + WriteJson>(&mut self, value: &V) -> &mut Self {
        self.0.put_impl(None, &value);
        self
    }
}

pub(crate) struct ObjectWriter<'a>(SeqWriter<'a>);

impl ObjectWriter<'_> {
    pub(crate) fn put<V: ?Sized + WriteJson>(&mut self, key: &str, value: &V) -> &mut Self {
        self.0.put_impl(Some(key), &value);
        self
    }
}

struct SeqWriter<'a> {
    w: &'a mut Writer,
    first: bool,
    close: char,
}

impl Drop for SeqWriter<'_> {
    fn drop(&mut self) {
        self.w.indent -= INDENT;
        if !self.first {
            self.w.newline();
        }
        self.w.out.push(self.close);
    }
}

impl<'a> SeqWriter<'a> {
    fn begin(w: &'a mut Writer, open: u8) -> Self {
        w.out.push(char::from(open));
        w.indent += INDENT;
        Self {
            w,
            first: true,
            close: if open == b'[' { ']' } else { '}' },
        }
    }

    fn put_impl(&mut self, key: Option<&str>, value: &dyn WriteJson) {
        if !value.should_include() {
            return;
        }
        if !std::mem::replace(&mut self.first, false) {
            self.w.out.push(',');
        }
        self.w.newline();
        if let Some(key) = key {
            self.w.put_string(key);
            self.w.out.push(':');
            if self.w.pretty {
                self.w.out.push(' ');
            }
        }
        value.write_json(self.w);
    }
}
