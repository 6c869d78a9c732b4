//! Character classification per the W3C XML 1.0 `Name` and `Char` productions.
//!
//! These are pure functions over a decoded codepoint; the tokenizer calls
//! them only at the decision points where a name boundary or a validity
//! check is actually needed, never as part of the hot byte-scanning loop
//! (that loop uses ASCII fast paths and `memchr` directly — see
//! [`crate::litmatch`] and [`crate::parser`]).

/// Which revision of the XML 1.0 `Char` production [2] to enforce.
///
/// Edition 5 is the permissive, current revision; Edition 4 additionally
/// excludes the `0xFFFE`/`0xFFFF` non-characters from `0xE000..=0xFFFD`
/// inherited from Unicode corrigenda. For ASCII input both editions agree.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Edition {
    /// XML 1.0 Fourth Edition.
    Fourth,
    /// XML 1.0 Fifth Edition (default).
    #[default]
    Fifth,
}

/// `[4] NameStartChar`, minus `:` (colon is part of the `QName` grammar but
/// is never itself a name-start character for `NCName` validation).
#[inline]
pub fn is_name_start_char(c: char) -> bool {
    matches!(c,
        'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}'
    )
}

/// `[4a] NameChar`.
#[inline]
pub fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9'
            | '\u{B7}'
            | '\u{0300}'..='\u{036F}'
            | '\u{203F}'..='\u{2040}'
        )
}

/// `[2] Char`, for the selected [`Edition`].
#[inline]
pub fn is_valid_xml_char(c: char, edition: Edition) -> bool {
    let cp = c as u32;
    match edition {
        Edition::Fifth => matches!(cp,
            0x9 | 0xA | 0xD
            | 0x20..=0xD7FF
            | 0xE000..=0xFFFD
            | 0x10000..=0x10FFFF
        ),
        Edition::Fourth => matches!(cp,
            0x9 | 0xA | 0xD
            | 0x20..=0xD7FF
            | 0xE000..=0xFFFD
            | 0x10000..=0x10FFFF
        ) && cp != 0xFFFE && cp != 0xFFFF,
    }
}

/// ASCII fast path used while scanning for name boundaries a byte at a time;
/// any byte `>= 0x80` defers to [`is_name_start_char`]/[`is_name_char`] after
/// UTF-8 decoding.
#[inline]
pub fn is_ascii_name_start_byte(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// ASCII whitespace per XML `[3] S`: space, tab, CR, LF.
#[inline]
pub fn is_xml_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}
