use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;

use super::TypeDescriptor;
use crate::error::Error;

// -----------------------------------------------------------------------------
// Grammar
//
// type    := name ( '<' param ( ',' param )* '>' )?
// param   := type | literal
// literal := '\'' [^']* '\'' | '"' [^"]* '"'
// name    := name-byte+
//
// Whitespace between tokens is ignored.

#[inline]
const fn is_name_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'_' | b':' | b'\\' | b'.') || c >= 0x80
}

/// Returns `true` if `name` can be written without quotes.
pub(super) fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(is_name_byte)
}

/// Parses a complete type declaration.
pub(super) fn parse(input: &str) -> Result<TypeDescriptor, Error> {
    let mut parser = Parser { input, pos: 0 };

    let ty = parser.parse_type()?;
    parser.skip_whitespace();

    if parser.pos != input.len() {
        return Err(parser.error("unexpected trailing characters"));
    }

    Ok(ty)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn error(&self, reason: &'static str) -> Error {
        Error::TypeParse {
            input: self.input.to_owned(),
            reason,
        }
    }

    fn parse_type(&mut self) -> Result<TypeDescriptor, Error> {
        self.skip_whitespace();

        let start = self.pos;
        while self.peek().is_some_and(is_name_byte) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.error("expected a type name"));
        }
        // Name bytes stop at ASCII delimiters, so the slice is on a char boundary.
        let name = String::from(&self.input[start..self.pos]);

        self.skip_whitespace();
        if self.peek() != Some(b'<') {
            return Ok(TypeDescriptor::new(name));
        }
        self.pos += 1;

        let mut params = Vec::new();
        loop {
            params.push(self.parse_param()?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.error("expected `,` or `>`")),
            }
        }

        Ok(TypeDescriptor::with_params(name, params))
    }

    fn parse_param(&mut self) -> Result<TypeDescriptor, Error> {
        self.skip_whitespace();

        match self.peek() {
            Some(quote @ (b'\'' | b'"')) => {
                let start = self.pos + 1;
                let Some(len) = self.input[start..].bytes().position(|c| c == quote) else {
                    return Err(self.error("unterminated literal"));
                };
                self.pos = start + len + 1;
                Ok(TypeDescriptor::new(String::from(
                    &self.input[start..start + len],
                )))
            }
            _ => self.parse_type(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{is_plain_name, parse};
    use crate::error::Error;

    #[test]
    fn parse_nested() {
        let ty = parse(" array < string , array<integer> > ").unwrap();
        assert_eq!(ty.name(), "array");
        assert_eq!(ty.params().len(), 2);
        assert_eq!(ty.param(0).unwrap().name(), "string");
        assert_eq!(ty.param(1).unwrap().params().len(), 1);
        assert_eq!(ty.to_string(), "array<string, array<integer>>");
    }

    #[test]
    fn parse_literals() {
        let ty = parse(r#"DateTime<'Y-m-d', "UTC">"#).unwrap();
        assert_eq!(ty.param(0).unwrap().name(), "Y-m-d");
        assert_eq!(ty.param(1).unwrap().name(), "UTC");
        assert!(ty.param(0).unwrap().params().is_empty());
    }

    #[test]
    fn parse_namespaced() {
        assert_eq!(parse("app::model::Order").unwrap().name(), "app::model::Order");
        assert_eq!(parse(r"App\Model\Order").unwrap().name(), r"App\Model\Order");
    }

    #[test]
    fn parse_errors() {
        let reason = |input: &str| match parse(input) {
            Err(Error::TypeParse { reason, .. }) => reason,
            other => panic!("unexpected result {other:?}"),
        };

        assert_eq!(reason(""), "expected a type name");
        assert_eq!(reason("array<"), "expected a type name");
        assert_eq!(reason("array<string"), "expected `,` or `>`");
        assert_eq!(reason("Foo<'abc>"), "unterminated literal");
        assert_eq!(reason("Foo Bar"), "unexpected trailing characters");
    }

    #[test]
    fn plain_names() {
        assert!(is_plain_name("integer"));
        assert!(is_plain_name("app::Order"));
        assert!(!is_plain_name("Y-m-d"));
        assert!(!is_plain_name(""));
    }
}
