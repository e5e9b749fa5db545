//! Recursive-descent JSON reader.
use crate::{
    error::{SyntaxError, SyntaxErrorKind},
    value::{Map, Value},
    write::escape_len,
};

pub(crate) const DEFAULT_MAX_DEPTH: usize = 512;

/// Parse `text` with the default nesting limit.
pub(crate) fn parse(text: &str) -> Result<Value> {
    Parser::new(text, DEFAULT_MAX_DEPTH).parse_document()
}

pub(crate) struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

type Result<T> = std::result::Result<T, SyntaxError>;

impl<'a> Parser<'a> {
    pub(crate) fn new(input: &'a str, max_depth: usize) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    /// Parse a whole document: one object or array, optionally surrounded by whitespace.
    pub(crate) fn parse_document(mut self) -> Result<Value> {
        self.skip_ws();
        let value = match self.bpeek() {
            Some(b'{') => self.parse_object()?,
            Some(b'[') => self.parse_array()?,
            Some(_) => return Err(self.err(SyntaxErrorKind::InvalidTopLevel)),
            None => return Err(self.err(SyntaxErrorKind::UnexpectedEnd)),
        };
        self.skip_ws();
        if self.pos < self.bytes.len() {
            return Err(self.err(SyntaxErrorKind::TrailingCharacters));
        }
        Ok(value)
    }

    #[cold]
    fn err(&self, kind: SyntaxErrorKind) -> SyntaxError {
        self.err_at(kind, self.pos)
    }

    #[cold]
    fn err_at(&self, kind: SyntaxErrorKind, offset: usize) -> SyntaxError {
        SyntaxError::new(kind, self.bytes, offset)
    }

    fn bpeek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
        debug_assert!(self.pos <= self.bytes.len());
    }

    fn skip_ws(&mut self) {
        while let Some(b'\n' | b' ' | b'\t' | b'\r') = self.bpeek() {
            self.bump();
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        self.skip_ws();
        match self.bpeek() {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') => self.parse_string().map(Value::String),
            Some(b't') => self.expect_literal(b"true", Value::Bool(true)),
            Some(b'f') => self.expect_literal(b"false", Value::Bool(false)),
            Some(b'n') => self.expect_literal(b"null", Value::Null),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(_) => Err(self.err(SyntaxErrorKind::UnexpectedCharacter)),
            None => Err(self.err(SyntaxErrorKind::UnexpectedEnd)),
        }
    }

    fn expect_literal(&mut self, literal: &[u8], value: Value) -> Result<Value> {
        if self.bytes[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            Ok(value)
        } else {
            Err(self.err(SyntaxErrorKind::InvalidLiteral))
        }
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;
        while let Some(b'0'..=b'9' | b'.' | b'+' | b'-' | b'e' | b'E') = self.bpeek() {
            self.bump();
        }
        match self.input[start..self.pos].parse::<f64>() {
            Ok(number) if number.is_finite() => Ok(Value::Number(number)),
            _ => Err(self.err_at(SyntaxErrorKind::InvalidNumber, start)),
        }
    }

    /// Scan a string literal and return its content with escape pairs kept verbatim.
    fn parse_string(&mut self) -> Result<String> {
        let open = self.pos;
        self.bump();
        let start = self.pos;
        loop {
            match self.bpeek() {
                Some(b'"') => break,
                Some(b'\\') => match escape_len(&self.bytes[self.pos..]) {
                    0 if self.pos + 1 >= self.bytes.len() => {
                        return Err(self.err_at(SyntaxErrorKind::UnterminatedString, open));
                    }
                    0 => return Err(self.err(SyntaxErrorKind::InvalidEscape)),
                    len => self.pos += len,
                },
                Some(byte) if byte < 0x20 => {
                    return Err(self.err(SyntaxErrorKind::ControlCharacter));
                }
                Some(_) => self.bump(),
                None => return Err(self.err_at(SyntaxErrorKind::UnterminatedString, open)),
            }
        }
        let content = self.input[start..self.pos].to_string();
        self.bump();
        Ok(content)
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.err(SyntaxErrorKind::DepthLimitExceeded));
        }
        self.bump();
        self.skip_ws();
        Ok(())
    }

    /// Consume the separator after a container element.
    ///
    /// Returns `true` once the closing bracket has been consumed.
    fn comma_or_end(&mut self, end: u8) -> Result<bool> {
        self.skip_ws();
        match self.bpeek() {
            Some(b',') => {
                self.bump();
                Ok(false)
            }
            Some(byte) if byte == end => {
                self.bump();
                self.depth -= 1;
                Ok(true)
            }
            Some(_) => Err(self.err(SyntaxErrorKind::MissingDelimiter)),
            None => Err(self.err(SyntaxErrorKind::UnexpectedEnd)),
        }
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.enter()?;
        let mut items = Vec::new();
        if self.bpeek() == Some(b']') {
            self.bump();
            self.depth -= 1;
            return Ok(Value::Array(items));
        }
        loop {
            items.push(self.parse_value()?);
            if self.comma_or_end(b']')? {
                return Ok(Value::Array(items));
            }
        }
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.enter()?;
        let mut object = Map::new();
        if self.bpeek() == Some(b'}') {
            self.bump();
            self.depth -= 1;
            return Ok(Value::Object(object));
        }
        loop {
            self.skip_ws();
            let key = match self.bpeek() {
                Some(b'"') => self.parse_string()?,
                Some(_) => return Err(self.err(SyntaxErrorKind::ExpectedKey)),
                None => return Err(self.err(SyntaxErrorKind::UnexpectedEnd)),
            };
            self.skip_ws();
            match self.bpeek() {
                Some(b':') => self.bump(),
                Some(_) => return Err(self.err(SyntaxErrorKind::ExpectedColon)),
                None => return Err(self.err(SyntaxErrorKind::UnexpectedEnd)),
            }
            let value = self.parse_value()?;
            object.insert(key, value);
            if self.comma_or_end(b'}')? {
                return Ok(Value::Object(object));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse, Parser};
    use crate::{error::SyntaxErrorKind, json, Value};
    use test_case::test_case;

    #[test_case("{}", json!({}))]
    #[test_case("[]", json!([]))]
    #[test_case(" [ 1 , -2.5 , 3e2 ] ", json!([1, -2.5, 300]))]
    #[test_case("[true,false,null]", json!([true, false, null]))]
    #[test_case(r#"{"a" : {"b" : []}}"#, json!({"a": {"b": []}}))]
    #[test_case("{\n\t\"a\":\r\n1\n}", json!({"a": 1}))]
    #[test_case(r#"{"a":1,"a":2}"#, json!({"a": 2}); "last duplicate wins")]
    #[test_case(r#"["a b  c"]"#, json!(["a b  c"]); "whitespace inside strings")]
    fn valid(input: &str, expected: Value) {
        assert_eq!(parse(input).expect("Valid JSON"), expected);
    }

    #[test_case(r#"["line\nbreak"]"#, r"line\nbreak")]
    #[test_case(r#"["quote \" inside"]"#, r#"quote \" inside"#)]
    #[test_case(r#"["back\\slash"]"#, r"back\\slash")]
    #[test_case(r#"["\/\b\f\r\t"]"#, r"\/\b\f\r\t")]
    #[test_case(r#"["\u00e9"]"#, r"\u00e9")]
    #[test_case(r#"["ünï"]"#, "ünï")]
    fn escapes_are_kept(input: &str, expected: &str) {
        let value = parse(input).expect("Valid JSON");
        assert_eq!(value[0].as_str(), Ok(expected));
    }

    #[test_case("", SyntaxErrorKind::UnexpectedEnd)]
    #[test_case("   ", SyntaxErrorKind::UnexpectedEnd)]
    #[test_case("42", SyntaxErrorKind::InvalidTopLevel)]
    #[test_case(r#""text""#, SyntaxErrorKind::InvalidTopLevel)]
    #[test_case("null", SyntaxErrorKind::InvalidTopLevel)]
    #[test_case("[1] x", SyntaxErrorKind::TrailingCharacters)]
    #[test_case("{}{}", SyntaxErrorKind::TrailingCharacters)]
    #[test_case("[1 2]", SyntaxErrorKind::MissingDelimiter)]
    #[test_case(r#"{"a":1 "b":2}"#, SyntaxErrorKind::MissingDelimiter)]
    #[test_case("[1,]", SyntaxErrorKind::UnexpectedCharacter)]
    #[test_case("[1", SyntaxErrorKind::UnexpectedEnd)]
    #[test_case(r#"{"a" 1}"#, SyntaxErrorKind::ExpectedColon)]
    #[test_case("{a:1}", SyntaxErrorKind::ExpectedKey)]
    #[test_case("[tru]", SyntaxErrorKind::InvalidLiteral)]
    #[test_case("[nul]", SyntaxErrorKind::InvalidLiteral)]
    #[test_case("[1.2.3]", SyntaxErrorKind::InvalidNumber)]
    #[test_case("[-]", SyntaxErrorKind::InvalidNumber)]
    #[test_case("[1e999]", SyntaxErrorKind::InvalidNumber)]
    #[test_case(r#"["abc"#, SyntaxErrorKind::UnterminatedString)]
    #[test_case(r#"["abc\"#, SyntaxErrorKind::UnterminatedString)]
    #[test_case(r#"["\x"]"#, SyntaxErrorKind::InvalidEscape)]
    #[test_case(r#"["\u12"]"#, SyntaxErrorKind::InvalidEscape)]
    #[test_case("[\"a\tb\"]", SyntaxErrorKind::ControlCharacter)]
    #[test_case("[@]", SyntaxErrorKind::UnexpectedCharacter)]
    fn invalid(input: &str, expected: SyntaxErrorKind) {
        let error = parse(input).expect_err("Invalid JSON");
        assert_eq!(error.kind(), expected, "{input}");
    }

    #[test]
    fn error_position() {
        let error = parse("{\n  \"a\": 1\n  \"b\": 2\n}").expect_err("Invalid JSON");
        assert_eq!(error.kind(), SyntaxErrorKind::MissingDelimiter);
        assert_eq!((error.line(), error.column()), (3, 3));
    }

    #[test]
    fn depth_limit() {
        let nested = format!("{}{}", "[".repeat(4), "]".repeat(4));
        assert!(Parser::new(&nested, 4).parse_document().is_ok());
        let error = Parser::new(&nested, 3)
            .parse_document()
            .expect_err("Too deep");
        assert_eq!(error.kind(), SyntaxErrorKind::DepthLimitExceeded);
    }

    #[test]
    fn default_depth_limit() {
        let nested = format!("{}{}", "[".repeat(600), "]".repeat(600));
        let error = parse(&nested).expect_err("Too deep");
        assert_eq!(error.kind(), SyntaxErrorKind::DepthLimitExceeded);
        let nested = format!("{}{}", "[".repeat(512), "]".repeat(512));
        assert!(parse(&nested).is_ok());
    }
}
