//! The byte-level tokenizer (C3): a single state machine that finds the
//! boundary of the next XML construct in a byte slice, independent of how
//! many [`feed`](Parser::feed) calls it takes to arrive (chunk-independence,
//! see the crate-level testable properties).
//!
//! `Parser` only locates boundaries and classifies the construct; it does
//! not itself build [`crate::events::Event`] values (no attribute parsing,
//! no name extraction) — that is [`crate::reader::Tokenizer`]'s job, once it
//! has a byte range to work with. This split mirrors the crate's
//! chunk-buffer/tokenizer layering: `Parser` is the part that must be
//! resumable across arbitrary chunk boundaries, so it is kept to the
//! smallest possible state.

use crate::errors::SyntaxError;
use crate::litmatch::{BomFeedResult, BomScanner, CDataScanner, CommentScanner, DtdScanner, PiScanner};
use crate::litmatch::QuotedScanner;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum State {
    /// Before any byte has been seen; watches for a leading BOM.
    Start,
    Bom(BomScanner),
    /// Scanning a text run, looking for `<`.
    Text,
    /// A `<` was seen, nothing else yet.
    Markup,
    /// A `<!` was seen; waiting to see `-`, `[`, or `D`/`d`.
    MaybeBang,
    /// A `<!-` was seen, waiting for the second `-`.
    MaybeComment,
    Comment(CommentScanner),
    /// `<![`, `<![C`, ..., `<![CDATA` — six fixed-literal states.
    MaybeCData(u8),
    CData(CDataScanner),
    /// `<!D`, `<!DO`, ..., `<!DOCTYPE` — six fixed-literal states
    /// (case-insensitive).
    MaybeDoctype(u8),
    Doctype(DtdScanner),
    PI(PiScanner),
    /// A `</` was seen; looking for `>`.
    EndTag,
    /// A `<` followed by a name-start byte (or `<?xml`/any other byte) was
    /// seen; looking for an unquoted `>`, tracking a trailing `/`.
    StartOrEmptyTag(QuotedScanner, bool),
}

impl Default for State {
    fn default() -> Self {
        Self::Start
    }
}

/// The outcome of feeding a slice of bytes into [`Parser::feed`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FeedResult {
    /// All fed bytes were consumed; feed more.
    NeedData,
    /// A UTF-8 BOM was recognized and should be stripped (`n` bytes).
    Utf8BomConsumed(usize),
    /// A byte sequence that can only be a UTF-16 BOM was found. This crate
    /// does not support UTF-16 input (see the crate-level `Non-goals`).
    Utf16BomDetected,
    /// A text run ending just before `<` at this offset.
    EmitText(usize),
    /// A complete `<![CDATA[ ... ]]>`, offset one past the final `>`.
    EmitCData(usize),
    /// A complete `<!-- ... -->`, offset one past the final `>`.
    EmitComment(usize),
    /// A complete `<!DOCTYPE ...>`, offset one past the final `>`.
    EmitDoctype(usize),
    /// A complete `<? ... ?>` (processing instruction or the `<?xml` prolog
    /// — the caller disambiguates by inspecting the target), offset one
    /// past the final `>`.
    EmitPI(usize),
    /// A complete `<name .../>`, offset one past the final `>`.
    EmitEmptyTag(usize),
    /// A complete `<name ...>`, offset one past the final `>`.
    EmitStartTag(usize),
    /// A complete `</name>`, offset one past the final `>`.
    EmitEndTag(usize),
}

/// A resumable state machine locating the next XML construct boundary.
///
/// Construct with [`Parser::default`] to auto-detect a leading BOM, or
/// [`Parser::without_bom_detection`] when the caller has already stripped it
/// (e.g. for a chunk that is not the start of the document).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Parser(State);

impl Parser {
    /// Skips BOM detection, starting directly in the text state.
    #[inline]
    pub fn without_bom_detection() -> Self {
        Self(State::Text)
    }

    /// Feeds another slice of bytes, returning the first boundary found, or
    /// [`FeedResult::NeedData`] if `bytes` ran out first.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<FeedResult, SyntaxError> {
        for (offset, &byte) in bytes.iter().enumerate() {
            let trail = &bytes[offset..];
            let rest = &bytes[offset + 1..];
            self.0 = match self.0 {
                State::Start => {
                    self.0 = State::Bom(BomScanner::default());
                    return self.feed(bytes);
                }
                State::Bom(mut scanner) => match scanner.feed(trail) {
                    BomFeedResult::NeedData => {
                        self.0 = State::Bom(scanner);
                        return Ok(FeedResult::NeedData);
                    }
                    BomFeedResult::NoBom => {
                        self.0 = State::Text;
                        return Ok(self.parse_text(bytes, 0)?);
                    }
                    BomFeedResult::Utf8Bom => {
                        self.0 = State::Text;
                        return Ok(FeedResult::Utf8BomConsumed(3));
                    }
                    BomFeedResult::Utf16Bom => return Err(SyntaxError::Utf16NotSupported),
                },
                State::Text => match byte {
                    b'<' => State::Markup,
                    _ => return Ok(self.parse_text(trail, offset)?),
                },
                State::Markup => match byte {
                    b'!' => State::MaybeBang,
                    b'?' => return Ok(self.parse_pi(rest, offset + 1, PiScanner::default())),
                    b'/' => return Ok(self.parse_end(rest, offset + 1)),
                    _ => {
                        return Ok(self.parse_start_or_empty(trail, offset, QuotedScanner::default(), false))
                    }
                },
                State::MaybeBang => match byte {
                    b'-' => State::MaybeComment,
                    b'[' => State::MaybeCData(0),
                    b'D' | b'd' => State::MaybeDoctype(0),
                    _ => return Err(SyntaxError::InvalidBangMarkup),
                },
                State::MaybeComment => match byte {
                    b'-' => return Ok(self.parse_comment(rest, offset + 1, CommentScanner::default())),
                    _ => return Err(SyntaxError::UnclosedComment),
                },
                State::Comment(scanner) => return Ok(self.parse_comment(trail, offset, scanner)),

                State::MaybeCData(step) => match (step, byte) {
                    (0, b'C') => State::MaybeCData(1),
                    (1, b'D') => State::MaybeCData(2),
                    (2, b'A') => State::MaybeCData(3),
                    (3, b'T') => State::MaybeCData(4),
                    (4, b'A') => State::MaybeCData(5),
                    (5, b'[') => return Ok(self.parse_cdata(rest, offset + 1, CDataScanner::default())),
                    _ => return Err(SyntaxError::UnclosedCData),
                },
                State::CData(scanner) => return Ok(self.parse_cdata(trail, offset, scanner)),

                State::MaybeDoctype(step) => match (step, byte.to_ascii_uppercase()) {
                    (0, b'O') => State::MaybeDoctype(1),
                    (1, b'C') => State::MaybeDoctype(2),
                    (2, b'T') => State::MaybeDoctype(3),
                    (3, b'Y') => State::MaybeDoctype(4),
                    (4, b'P') => State::MaybeDoctype(5),
                    (5, b'E') => return Ok(self.parse_doctype(rest, offset + 1, DtdScanner::default())),
                    _ => return Err(SyntaxError::UnclosedDoctype),
                },
                State::Doctype(scanner) => return Ok(self.parse_doctype(trail, offset, scanner)),

                State::PI(scanner) => return Ok(self.parse_pi(trail, offset, scanner)),
                State::EndTag => return Ok(self.parse_end(trail, offset)),
                State::StartOrEmptyTag(scanner, has_slash) => {
                    return Ok(self.parse_start_or_empty(trail, offset, scanner, has_slash));
                }
            };
        }
        Ok(FeedResult::NeedData)
    }

    /// Call once the input is exhausted. Returns the EOF-in-construct error
    /// matching whatever was still open, or `Ok(())` if the parser was
    /// between constructs.
    #[rustfmt::skip]
    pub fn finish(self) -> Result<(), SyntaxError> {
        match self.0 {
            State::Start | State::Text => Ok(()),
            State::Bom(_) => Ok(()),

            State::Markup
            | State::StartOrEmptyTag(..)
            | State::EndTag => Err(SyntaxError::UnclosedTag),

            State::MaybeBang => Err(SyntaxError::InvalidBangMarkup),

            State::MaybeComment | State::Comment(_) => Err(SyntaxError::UnclosedComment),

            State::MaybeCData(_) | State::CData(_) => Err(SyntaxError::UnclosedCData),

            State::MaybeDoctype(_) | State::Doctype(_) => Err(SyntaxError::UnclosedDoctype),

            State::PI(_) => Err(SyntaxError::UnclosedPIOrXmlDecl),
        }
    }

    /// Whether the parser is currently between constructs (the only state
    /// from which a chunk boundary is "safe", see [`crate::chunk`]).
    #[inline]
    pub fn is_at_safe_point(&self) -> bool {
        matches!(self.0, State::Text | State::Start)
    }

    fn parse_text(&mut self, bytes: &[u8], offset: usize) -> Result<FeedResult, SyntaxError> {
        self.0 = State::Text;
        match memchr::memchr(b'<', bytes) {
            Some(i) => Ok(FeedResult::EmitText(offset + i)),
            None => Ok(FeedResult::NeedData),
        }
    }

    fn parse_comment(&mut self, bytes: &[u8], offset: usize, mut scanner: CommentScanner) -> FeedResult {
        match scanner.feed(bytes) {
            Some(i) => {
                self.0 = State::Text;
                FeedResult::EmitComment(offset + i)
            }
            None => {
                self.0 = State::Comment(scanner);
                FeedResult::NeedData
            }
        }
    }

    fn parse_cdata(&mut self, bytes: &[u8], offset: usize, mut scanner: CDataScanner) -> FeedResult {
        match scanner.feed(bytes) {
            Some(i) => {
                self.0 = State::Text;
                FeedResult::EmitCData(offset + i)
            }
            None => {
                self.0 = State::CData(scanner);
                FeedResult::NeedData
            }
        }
    }

    fn parse_doctype(&mut self, bytes: &[u8], offset: usize, mut scanner: DtdScanner) -> FeedResult {
        match scanner.feed(bytes) {
            Some(i) => {
                self.0 = State::Text;
                FeedResult::EmitDoctype(offset + i)
            }
            None => {
                self.0 = State::Doctype(scanner);
                FeedResult::NeedData
            }
        }
    }

    fn parse_pi(&mut self, bytes: &[u8], offset: usize, mut scanner: PiScanner) -> FeedResult {
        match scanner.feed(bytes) {
            Some(i) => {
                self.0 = State::Text;
                FeedResult::EmitPI(offset + i)
            }
            None => {
                self.0 = State::PI(scanner);
                FeedResult::NeedData
            }
        }
    }

    fn parse_end(&mut self, bytes: &[u8], offset: usize) -> FeedResult {
        match bytes.iter().position(|&b| b == b'>') {
            Some(i) => {
                self.0 = State::Text;
                FeedResult::EmitEndTag(offset + i + 1)
            }
            None => {
                self.0 = State::EndTag;
                FeedResult::NeedData
            }
        }
    }

    fn parse_start_or_empty(
        &mut self,
        bytes: &[u8],
        offset: usize,
        mut scanner: QuotedScanner,
        has_slash: bool,
    ) -> FeedResult {
        match scanner.feed(bytes) {
            Some(0) if has_slash => {
                self.0 = State::Text;
                FeedResult::EmitEmptyTag(offset + 1)
            }
            Some(i) => {
                self.0 = State::Text;
                if i > 0 && bytes[i - 1] == b'/' {
                    FeedResult::EmitEmptyTag(offset + i + 1)
                } else {
                    FeedResult::EmitStartTag(offset + i + 1)
                }
            }
            None => {
                self.0 = State::StartOrEmptyTag(scanner, bytes.last().copied() == Some(b'/'));
                FeedResult::NeedData
            }
        }
    }
}
