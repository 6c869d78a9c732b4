//! Error management module.
//!
//! Following the rest of this crate's hot-path code, errors are plain enums
//! with hand-written [`Display`]/[`std::error::Error`] impls — no derive
//! crate is pulled in just to save a few `match` arms.
#![allow(missing_docs)] // struct-variant fields are self-explanatory; see each variant's doc

use crate::escape::EscapeError;
use crate::position::Position;
use std::fmt;
use std::io;
use std::str::Utf8Error;

/// Result type used throughout this crate.
pub type Result<T> = ::std::result::Result<T, Error>;

/// Malformed byte-level XML productions detected by the core tokenizer.
///
/// Most of these do not stop the stream: the tokenizer recovers by resyncing
/// at the next `<` and reports the problem as an [`Event::Error`](crate::events::Event::Error).
/// The five `Unclosed*`/`InvalidBangMarkup` variants below additionally end
/// the stream when they occur at true end-of-input, because there is no `<`
/// left to resync to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SyntaxError {
    /// `<!` was not followed by `--`, `[CDATA[`, or `DOCTYPE`.
    InvalidBangMarkup,
    /// Input ended while inside a comment (`<!--` without a matching `-->`).
    UnclosedComment,
    /// Input ended while inside a CDATA section.
    UnclosedCData,
    /// Input ended while inside a `<!DOCTYPE`.
    UnclosedDoctype,
    /// Input ended while inside a processing instruction or the XML declaration.
    UnclosedPIOrXmlDecl,
    /// Input ended while inside a start, end, or empty tag.
    UnclosedTag,
    /// A byte sequence claims a UTF-16 encoding, which this crate does not
    /// support (see the crate-level `Non-goals`).
    Utf16NotSupported,
}

impl SyntaxError {
    /// The stable error kind name, independent of the formatted message.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidBangMarkup => "invalid_element",
            Self::UnclosedComment => "eof_in_comment",
            Self::UnclosedCData => "eof_in_cdata",
            Self::UnclosedDoctype => "eof_in_doctype",
            Self::UnclosedPIOrXmlDecl => "eof_in_pi",
            Self::UnclosedTag => "eof_in_tag",
            Self::Utf16NotSupported => "unsupported_encoding",
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidBangMarkup => write!(f, "`<!` is not followed by a valid markup declaration"),
            Self::UnclosedComment => write!(f, "unexpected end of input inside a comment"),
            Self::UnclosedCData => write!(f, "unexpected end of input inside a CDATA section"),
            Self::UnclosedDoctype => write!(f, "unexpected end of input inside a DOCTYPE declaration"),
            Self::UnclosedPIOrXmlDecl => write!(f, "unexpected end of input inside a processing instruction"),
            Self::UnclosedTag => write!(f, "unexpected end of input inside a tag"),
            Self::Utf16NotSupported => write!(f, "UTF-16 encoded input is not supported"),
        }
    }
}

impl std::error::Error for SyntaxError {}

/// Well-formedness violations detected by the [`crate::validate`] layer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IllFormedError {
    /// An end tag did not match the name of the innermost open start tag.
    MismatchedEndTag {
        expected: String,
        found: String,
    },
    /// An end tag was seen with no open start tag to match it.
    UnmatchedEndTag { found: String },
    /// Input ended with start tags still open.
    UnclosedElements { names: Vec<String> },
    /// The same attribute name occurred twice on one start tag.
    DuplicateAttribute { name: String },
    /// A `--` sequence occurred inside a comment body.
    DoubleHyphenInComment { offset: usize },
    /// A codepoint outside the Char production [2] was found in content.
    InvalidChar { codepoint: u32, offset: usize },
}

impl fmt::Display for IllFormedError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MismatchedEndTag { expected, found } => {
                write!(f, "expected `</{}>`, found `</{}>`", expected, found)
            }
            Self::UnmatchedEndTag { found } => write!(f, "unexpected closing tag `</{}>`", found),
            Self::UnclosedElements { names } => {
                write!(f, "unclosed elements at end of input: {}", names.join(", "))
            }
            Self::DuplicateAttribute { name } => write!(f, "duplicate attribute `{}`", name),
            Self::DoubleHyphenInComment { offset } => {
                write!(f, "`--` is not allowed inside a comment (at offset {})", offset)
            }
            Self::InvalidChar { codepoint, offset } => write!(
                f,
                "character U+{:04X} at offset {} is not allowed in XML content",
                codepoint, offset
            ),
        }
    }
}

impl std::error::Error for IllFormedError {}

/// Namespace constraint violations detected by [`crate::namespace`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NamespaceError {
    /// A name used a prefix that no enclosing `xmlns:prefix` declared.
    UndeclaredPrefix { prefix: String, name: String },
    /// `xmlns:prefix=""` in XML 1.0, which has no meaning (undeclaring a
    /// prefix is only legal in XML 1.1).
    EmptyPrefixBinding { prefix: String },
    /// `xml` bound to something other than its fixed URI, or `xmlns` bound
    /// to anything at all.
    ReservedPrefix { prefix: String },
    /// Some prefix bound to the reserved `xmlns` namespace URI.
    ReservedNamespace { uri: String },
    /// Two attributes expanded to the same `(uri, local)` pair.
    DuplicateExpandedAttribute { uri: Option<String>, local: String },
    /// A processing instruction target contained a colon.
    ColonInPiTarget { target: String },
}

impl fmt::Display for NamespaceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UndeclaredPrefix { prefix, name } => {
                write!(f, "undeclared namespace prefix `{}` in `{}`", prefix, name)
            }
            Self::EmptyPrefixBinding { prefix } => {
                write!(f, "prefix `{}` cannot be bound to an empty namespace name", prefix)
            }
            Self::ReservedPrefix { prefix } => write!(f, "`{}` is a reserved prefix", prefix),
            Self::ReservedNamespace { uri } => write!(f, "`{}` is a reserved namespace name", uri),
            Self::DuplicateExpandedAttribute { uri, local } => write!(
                f,
                "duplicate attribute after namespace expansion: ({:?}, {})",
                uri, local
            ),
            Self::ColonInPiTarget { target } => {
                write!(f, "processing instruction target `{}` contains a colon", target)
            }
        }
    }
}

impl std::error::Error for NamespaceError {}

/// The error type returned by this crate's fallible operations.
///
/// Most parse errors in a well-behaved pipeline never reach this type: the
/// tokenizer and validators prefer to emit an [`Event::Error`](crate::events::Event::Error)
/// and keep going (see `on_error` policies). `Error` is reserved for true
/// I/O failures, invalid UTF-8, and whichever layer's caller selected the
/// `raise` policy.
#[derive(Debug)]
pub enum Error {
    /// An error originating from reading the underlying input.
    Io(io::Error),
    /// Input was not valid UTF-8.
    Utf8(Utf8Error),
    /// A byte-level syntax error, reported at `position`.
    Syntax(SyntaxError, Position),
    /// A well-formedness violation, reported at `position`.
    IllFormed(IllFormedError, Position),
    /// A namespace constraint violation, reported at `position`.
    Namespace(NamespaceError, Position),
    /// An entity or character reference could not be decoded.
    Escape(EscapeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Utf8(e) => write!(f, "{}", e),
            Error::Syntax(e, pos) => write!(f, "{} (line {}, column {})", e, pos.line(), pos.column()),
            Error::IllFormed(e, pos) => write!(f, "{} (line {}, column {})", e, pos.line(), pos.column()),
            Error::Namespace(e, pos) => write!(f, "{} (line {}, column {})", e, pos.line(), pos.column()),
            Error::Escape(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Utf8(e) => Some(e),
            Error::Syntax(e, _) => Some(e),
            Error::IllFormed(e, _) => Some(e),
            Error::Namespace(e, _) => Some(e),
            Error::Escape(e) => Some(e),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<Utf8Error> for Error {
    fn from(err: Utf8Error) -> Error {
        Error::Utf8(err)
    }
}

impl From<EscapeError> for Error {
    fn from(err: EscapeError) -> Error {
        Error::Escape(err)
    }
}
