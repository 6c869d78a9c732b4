//! Detects a leading byte-order mark.
//!
//! This crate only accepts UTF-8 input (see the crate-level `Non-goals`), so
//! unlike the upstream encoding-sniffing heuristic this recognizes only the
//! UTF-8 BOM for silent stripping; a UTF-16 BOM is reported so the caller
//! gets a clear [`SyntaxError::Utf16NotSupported`](crate::errors::SyntaxError::Utf16NotSupported)
//! instead of being silently misinterpreted as UTF-8.

/// Outcome of feeding the first few bytes of a document into [`BomScanner`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FeedResult {
    /// Not enough bytes yet to decide.
    NeedData,
    /// No BOM present; nothing should be consumed.
    NoBom,
    /// A 3-byte UTF-8 BOM was found and should be consumed.
    Utf8Bom,
    /// A UTF-16 BOM (big- or little-endian) was found.
    Utf16Bom,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[allow(non_camel_case_types)]
enum State {
    Start,
    XEF,
    XEF_BB,
}

/// Scans the first bytes of a document for a byte-order mark.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BomScanner(State);

impl Default for BomScanner {
    fn default() -> Self {
        Self(State::Start)
    }
}

impl BomScanner {
    pub fn feed(&mut self, bytes: &[u8]) -> FeedResult {
        for &byte in bytes {
            self.0 = match (self.0, byte) {
                (State::Start, 0xEF) => State::XEF,
                (State::Start, 0xFE) | (State::Start, 0xFF) => return FeedResult::Utf16Bom,
                (State::Start, 0x00) => return FeedResult::Utf16Bom,
                (State::Start, _) => return FeedResult::NoBom,
                (State::XEF, 0xBB) => State::XEF_BB,
                (State::XEF, _) => return FeedResult::NoBom,
                (State::XEF_BB, 0xBF) => return FeedResult::Utf8Bom,
                (State::XEF_BB, _) => return FeedResult::NoBom,
            };
        }
        FeedResult::NeedData
    }
}

#[test]
fn test() {
    use pretty_assertions::assert_eq;

    let mut scanner = BomScanner::default();
    assert_eq!(scanner.feed(&[0xEF, 0xBB, 0xBF]), FeedResult::Utf8Bom);

    let mut scanner = BomScanner::default();
    assert_eq!(scanner.feed(b"<root/>"), FeedResult::NoBom);

    let mut scanner = BomScanner::default();
    assert_eq!(scanner.feed(&[0xFF, 0xFE]), FeedResult::Utf16Bom);
}
