//! The chunk-spanning driver (C2): glues a sequence of input byte chunks
//! into a continuous parse for [`crate::parser::Parser`], preserving
//! zero-copy semantics for any construct that happens to lie entirely
//! within one chunk and falling back to an owned, bounded carry-over
//! buffer only for constructs that straddle a chunk boundary.
//!
//! [`Parser::feed`](crate::parser::Parser::feed) reports a construct's end
//! as an offset relative to whatever slice was passed to the call that
//! found it; this module is what turns a sequence of those relative
//! offsets, arriving across an arbitrary number of `feed` calls, into
//! absolute document positions and byte ranges a caller can actually use.

use crate::errors::SyntaxError;
use crate::parser::{FeedResult, Parser};
use crate::position::Position;
use std::borrow::Cow;

/// Which XML construct a [`Span`] represents. Carries no further structure —
/// extracting a target, a name, or attributes out of `Span::bytes` is
/// [`crate::reader::Tokenizer`]'s job.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ConstructKind {
    /// A run of character data up to the next `<`.
    Text,
    /// `<![CDATA[ ... ]]>`.
    CData,
    /// `<!-- ... -->`.
    Comment,
    /// `<!DOCTYPE ...>`.
    Doctype,
    /// `<? ... ?>` (processing instruction or the `<?xml` prolog).
    Pi,
    /// `<name .../>`.
    EmptyTag,
    /// `<name ...>`.
    StartTag,
    /// `</name>`.
    EndTag,
}

/// One complete XML construct located by the chunk buffer, together with
/// the position of its first byte.
///
/// `bytes` spans the whole construct including delimiters (e.g. a `Comment`
/// span runs from `<!--` through the trailing `-->`), borrowed from the
/// chunk that supplied it when the construct fit in one chunk, owned when
/// it was assembled across a chunk boundary.
#[derive(Debug, Clone)]
pub struct Span<'a> {
    /// Which construct this span represents.
    pub kind: ConstructKind,
    /// The complete construct, delimiters included.
    pub bytes: Cow<'a, [u8]>,
    /// The position of the span's first byte.
    pub position: Position,
}

fn classify(result: FeedResult) -> Option<(ConstructKind, usize)> {
    use ConstructKind::*;
    match result {
        FeedResult::EmitText(n) => Some((Text, n)),
        FeedResult::EmitCData(n) => Some((CData, n)),
        FeedResult::EmitComment(n) => Some((Comment, n)),
        FeedResult::EmitDoctype(n) => Some((Doctype, n)),
        FeedResult::EmitPI(n) => Some((Pi, n)),
        FeedResult::EmitEmptyTag(n) => Some((EmptyTag, n)),
        FeedResult::EmitStartTag(n) => Some((StartTag, n)),
        FeedResult::EmitEndTag(n) => Some((EndTag, n)),
        FeedResult::NeedData | FeedResult::Utf8BomConsumed(_) | FeedResult::Utf16BomDetected => None,
    }
}

/// Joins a sequence of input chunks into one scan-friendly stream for
/// [`Parser`]. Call [`feed`](Self::feed) once per chunk; call
/// [`finish`](Self::finish) once the caller's input iterator is exhausted.
pub struct ChunkBuffer {
    parser: Parser,
    /// Bytes accumulated since the start of a construct that did not finish
    /// within the chunk that began it. Empty whenever the parser sits at a
    /// safe resume point with no work carried over.
    carry: Vec<u8>,
    /// Whether `carry` holds an in-progress text run rather than an
    /// in-progress markup construct. A text run carries no scanner of its
    /// own in [`Parser`], so unlike a straddling comment or tag it can be
    /// silently subsumed into the next construct's [`FeedResult`] — this
    /// flag is what lets [`feed_carried`](Self::feed_carried) split it back
    /// out into its own [`Span`].
    carry_is_text: bool,
    position: Position,
    /// Whether `position` is actually advanced as bytes are consumed. Off
    /// under [`crate::config::Positions::None`], which skips the per-byte
    /// line/column bookkeeping entirely; every span then carries
    /// [`Position::START`] rather than a meaningful position.
    track_positions: bool,
}

impl Default for ChunkBuffer {
    fn default() -> Self {
        Self {
            parser: Parser::default(),
            carry: Vec::new(),
            carry_is_text: false,
            position: Position::START,
            track_positions: true,
        }
    }
}

impl ChunkBuffer {
    /// A buffer that auto-detects a leading BOM (use for the first chunk of
    /// a document).
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer for input that is known not to start a document (e.g. a
    /// sub-range already past any BOM).
    pub fn without_bom_detection() -> Self {
        Self {
            parser: Parser::without_bom_detection(),
            ..Self::default()
        }
    }

    /// Disables per-byte position tracking (see [`crate::config::Positions::None`]).
    /// Every span from this point on carries [`Position::START`] instead of
    /// its true location.
    pub fn disable_position_tracking(&mut self) -> &mut Self {
        self.track_positions = false;
        self
    }

    #[inline]
    fn advance(&mut self, bytes: &[u8]) {
        if self.track_positions {
            self.position.advance(bytes);
        }
    }

    /// The absolute position of the next byte this buffer has not yet
    /// resolved into a [`Span`].
    pub fn position(&self) -> Position {
        self.position
    }

    /// Whether the buffer currently holds no carried-over bytes and the
    /// underlying parser sits between constructs — the only state from
    /// which dropping everything seen so far is safe.
    pub fn is_at_safe_point(&self) -> bool {
        self.carry.is_empty() && self.parser.is_at_safe_point()
    }

    /// Feeds one chunk, returning every complete construct found within it
    /// (zero or more). A trailing partial construct, if any, is retained
    /// internally and completed by a future call to `feed` or reported by
    /// [`finish`].
    pub fn feed<'c>(&mut self, chunk: &'c [u8]) -> Result<Vec<Span<'c>>, SyntaxError> {
        let mut out = Vec::new();
        if self.carry.is_empty() {
            self.feed_fresh(chunk, &mut out)?;
        } else {
            self.feed_carried(chunk, &mut out)?;
        }
        Ok(out)
    }

    /// Scans `chunk` with nothing carried over, borrowing directly from it.
    fn feed_fresh<'c>(&mut self, chunk: &'c [u8], out: &mut Vec<Span<'c>>) -> Result<(), SyntaxError> {
        let mut local = 0usize;
        loop {
            let slice = &chunk[local..];
            match self.parser.feed(slice)? {
                FeedResult::NeedData => {
                    self.carry_is_text = self.parser.is_at_safe_point();
                    self.carry.extend_from_slice(slice);
                    return Ok(());
                }
                FeedResult::Utf8BomConsumed(n) => {
                    self.advance(&chunk[local..local + n]);
                    local += n;
                }
                FeedResult::Utf16BomDetected => return Err(SyntaxError::Utf16NotSupported),
                result => {
                    let (kind, rel) = classify(result).expect("non-control FeedResult");
                    let end = local + rel;
                    let position = self.position;
                    self.advance(&chunk[local..end]);
                    out.push(Span { kind, bytes: Cow::Borrowed(&chunk[local..end]), position });
                    local = end;
                }
            }
        }
    }

    /// Resumes a construct that was left incomplete by a previous `feed`
    /// call, appending `chunk` to the carry buffer.
    fn feed_carried<'c>(&mut self, chunk: &'c [u8], out: &mut Vec<Span<'c>>) -> Result<(), SyntaxError> {
        let feed_start = self.carry.len();
        self.carry.extend_from_slice(chunk);
        match self.parser.feed(chunk)? {
            FeedResult::NeedData => Ok(()),
            FeedResult::Utf8BomConsumed(_) | FeedResult::Utf16BomDetected => {
                unreachable!("a BOM can only be the very first bytes of a document")
            }
            result => {
                let (kind, rel) = classify(result).expect("non-control FeedResult");
                // `rel` is relative to `chunk`, the only slice fed this call.
                let end_in_carry = feed_start + rel;
                let mut finished = std::mem::take(&mut self.carry);
                finished.truncate(end_in_carry);
                // A carried text run with nothing left to add (this chunk
                // opened straight into markup) never gets its own `EmitText`
                // from the parser — split it out here instead of folding it
                // into the following construct.
                if self.carry_is_text && kind != ConstructKind::Text && feed_start > 0 {
                    let construct = finished.split_off(feed_start);
                    let text_position = self.position;
                    self.advance(&finished);
                    out.push(Span { kind: ConstructKind::Text, bytes: Cow::Owned(finished), position: text_position });
                    let construct_position = self.position;
                    self.advance(&construct);
                    out.push(Span { kind, bytes: Cow::Owned(construct), position: construct_position });
                } else {
                    let position = self.position;
                    self.advance(&finished);
                    out.push(Span { kind, bytes: Cow::Owned(finished), position });
                }
                self.carry_is_text = false;
                // Bytes of this chunk past the construct's end are
                // unprocessed; resume scanning them as a fresh chunk, since
                // the carry is now empty.
                let remainder = &chunk[rel..];
                if !remainder.is_empty() {
                    self.feed_fresh(remainder, out)?;
                }
                Ok(())
            }
        }
    }

    /// Call once the input iterator is exhausted. Returns the EOF-in-construct
    /// error for whatever was left open, or `Ok` if the buffer was at a safe
    /// point. Use [`take_partial`](Self::take_partial) to recover whatever
    /// content had been collected for a partially-open construct.
    pub fn finish(&self) -> Result<(), SyntaxError> {
        self.parser.finish()
    }

    /// Drains and returns whatever bytes were carried over for a construct
    /// that never closed (used to build the partial event emitted alongside
    /// an EOF-in-construct error).
    pub fn take_partial(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.carry)
    }
}
