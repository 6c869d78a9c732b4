//! Decoding of the five predefined entities and numeric character references
//! (`&amp;`, `&lt;`, `&gt;`, `&apos;`, `&quot;`, `&#NNN;`, `&#xHHHH;`), and the
//! reverse encoding used when producing XML text.
//!
//! This crate does not expand general (DTD-declared) entities — see the
//! crate-level `Non-goals`. [`unescape`] only ever consults the fixed table
//! above plus numeric references.

use memchr::memchr2_iter;
use std::borrow::Cow;
use std::ops::Range;

/// An error while escaping or unescaping a byte string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EscapeError {
    /// A numeric character reference resolved to the null character.
    EntityWithNull(Range<usize>),
    /// `&...;` did not match any of the five predefined entities and was not
    /// a numeric character reference.
    UnrecognizedSymbol(Range<usize>, String),
    /// An `&` was not followed by a terminating `;` before the end of input.
    UnterminatedEntity(Range<usize>),
    /// A `&#x...;` reference had more hex digits than any valid codepoint needs.
    TooLongHexadecimal,
    /// A byte inside `&#x...;` was not a hex digit.
    InvalidHexadecimal(char),
    /// A `&#...;` reference had more digits than any valid codepoint needs.
    TooLongDecimal,
    /// A byte inside `&#...;` was not a decimal digit.
    InvalidDecimal(char),
    /// A numeric character reference resolved to a value that is not a valid
    /// Unicode scalar value (e.g. a surrogate half).
    InvalidCodepoint(u32),
}

impl std::fmt::Display for EscapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::EntityWithNull(r) => write!(
                f,
                "entity at byte range {:?} resolves to the null character, which is not allowed",
                r
            ),
            Self::UnrecognizedSymbol(r, s) => {
                write!(f, "unrecognized entity `&{};` at byte range {:?}", s, r)
            }
            Self::UnterminatedEntity(r) => {
                write!(f, "`&` at byte range {:?} is not terminated by `;`", r)
            }
            Self::TooLongHexadecimal => write!(f, "hexadecimal character reference is too long"),
            Self::InvalidHexadecimal(c) => write!(f, "'{}' is not a valid hexadecimal digit", c),
            Self::TooLongDecimal => write!(f, "decimal character reference is too long"),
            Self::InvalidDecimal(c) => write!(f, "'{}' is not a valid decimal digit", c),
            Self::InvalidCodepoint(c) => write!(f, "{:#x} is not a valid Unicode scalar value", c),
        }
    }
}

impl std::error::Error for EscapeError {}

/// Escapes `<`, `>`, `&`, `'`, and `"` in `raw` as their predefined-entity form.
pub fn escape(raw: &[u8]) -> Cow<[u8]> {
    fn needs_escape(b: u8) -> bool {
        matches!(b, b'<' | b'>' | b'\'' | b'&' | b'"')
    }

    let mut escaped: Option<Vec<u8>> = None;
    let mut pos = 0;
    let mut bytes = raw.iter();
    while let Some(i) = bytes.position(|&b| needs_escape(b)) {
        let buf = escaped.get_or_insert_with(|| Vec::with_capacity(raw.len()));
        let at = pos + i;
        buf.extend_from_slice(&raw[pos..at]);
        buf.extend_from_slice(match raw[at] {
            b'<' => b"&lt;",
            b'>' => b"&gt;",
            b'\'' => b"&apos;",
            b'&' => b"&amp;",
            b'"' => b"&quot;",
            _ => unreachable!(),
        });
        pos = at + 1;
    }

    match escaped {
        Some(mut buf) => {
            buf.extend_from_slice(&raw[pos..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(raw),
    }
}

/// Decodes predefined entities and numeric character references in `raw`.
///
/// Returns a borrowed slice when no entity was present, matching this
/// crate's zero-copy-by-default policy.
pub fn unescape(raw: &[u8]) -> Result<Cow<[u8]>, EscapeError> {
    let mut unescaped: Option<Vec<u8>> = None;
    let mut last_end = 0;
    let mut iter = memchr2_iter(b'&', b';', raw);
    while let Some(start) = iter.by_ref().find(|&p| raw[p] == b'&') {
        let end = match iter.next() {
            Some(end) if raw[end] == b';' => end,
            _ => return Err(EscapeError::UnterminatedEntity(start..raw.len())),
        };

        let buf = unescaped.get_or_insert_with(|| Vec::with_capacity(raw.len()));
        buf.extend_from_slice(&raw[last_end..start]);

        match &raw[start + 1..end] {
            b"lt" => buf.push(b'<'),
            b"gt" => buf.push(b'>'),
            b"amp" => buf.push(b'&'),
            b"apos" => buf.push(b'\''),
            b"quot" => buf.push(b'"'),
            body => {
                let code = if let Some(hex) = body.strip_prefix(b"#x") {
                    parse_hexadecimal(hex)?
                } else if let Some(dec) = body.strip_prefix(b"#") {
                    parse_decimal(dec)?
                } else {
                    return Err(EscapeError::UnrecognizedSymbol(
                        start + 1..end,
                        String::from_utf8_lossy(body).into_owned(),
                    ));
                };
                if code == 0 {
                    return Err(EscapeError::EntityWithNull(start..end));
                }
                let c = char::from_u32(code).ok_or(EscapeError::InvalidCodepoint(code))?;
                let mut tmp = [0u8; 4];
                buf.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
            }
        }
        last_end = end + 1;
    }

    match unescaped {
        Some(mut buf) => {
            buf.extend_from_slice(&raw[last_end..]);
            Ok(Cow::Owned(buf))
        }
        None => Ok(Cow::Borrowed(raw)),
    }
}

fn parse_hexadecimal(bytes: &[u8]) -> Result<u32, EscapeError> {
    if bytes.is_empty() || bytes.len() > 6 {
        return Err(EscapeError::TooLongHexadecimal);
    }
    let mut code = 0u32;
    for &b in bytes {
        code <<= 4;
        code += match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'a'..=b'f' => u32::from(b - b'a' + 10),
            b'A'..=b'F' => u32::from(b - b'A' + 10),
            b => return Err(EscapeError::InvalidHexadecimal(b as char)),
        };
    }
    Ok(code)
}

fn parse_decimal(bytes: &[u8]) -> Result<u32, EscapeError> {
    if bytes.is_empty() || bytes.len() > 7 {
        return Err(EscapeError::TooLongDecimal);
    }
    let mut code = 0u32;
    for &b in bytes {
        code = code * 10
            + u32::from(match b {
                b'0'..=b'9' => b - b'0',
                b => return Err(EscapeError::InvalidDecimal(b as char)),
            });
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unescape_predefined_entities() {
        assert_eq!(&*unescape(b"test").unwrap(), b"test");
        assert_eq!(&*unescape(b"&lt;test&gt;").unwrap(), b"<test>");
    }

    #[test]
    fn unescape_numeric_references() {
        assert_eq!(&*unescape(b"&#x30;").unwrap(), b"0");
        assert_eq!(&*unescape(b"&#48;").unwrap(), b"0");
    }

    #[test]
    fn unescape_rejects_null() {
        assert!(matches!(
            unescape(b"&#0;"),
            Err(EscapeError::EntityWithNull(_))
        ));
    }

    #[test]
    fn unescape_borrows_when_nothing_to_do() {
        match unescape(b"plain text") {
            Ok(Cow::Borrowed(b)) => assert_eq!(b, b"plain text"),
            other => panic!("expected borrowed, got {:?}", other),
        }
    }

    #[test]
    fn escape_special_chars() {
        assert_eq!(&*escape(b"test"), b"test");
        assert_eq!(&*escape(b"<test>"), b"&lt;test&gt;");
        assert_eq!(
            &*escape(b"prefix_\"a\"b&<>c"),
            "prefix_&quot;a&quot;b&amp;&lt;&gt;c".as_bytes()
        );
    }
}
