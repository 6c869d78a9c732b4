//! Scans for the `-->` sequence that ends an XML comment.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    /// No trailing dashes seen yet at the end of the previous slice.
    Seen0,
    /// One trailing dash seen at the end of the previous slice.
    Seen1,
    /// Two trailing dashes seen at the end of the previous slice.
    Seen2,
}

impl Default for State {
    fn default() -> Self {
        Self::Seen0
    }
}

/// Finds the first unescapable `-->` in a sequence of byte slices fed across
/// one or more calls to [`feed`](Self::feed).
///
/// Returns `Some(offset)` — the offset one past the `>` — on the call whose
/// slice completes the terminator; `None` otherwise. The scanner must not be
/// reused after a successful match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CommentScanner(State);

impl CommentScanner {
    pub fn feed(&mut self, bytes: &[u8]) -> Option<usize> {
        for i in memchr::memchr_iter(b'>', bytes) {
            if i == 0 && self.0 == State::Seen2 {
                return Some(1);
            }
            if i == 1 && bytes[0] == b'-' && matches!(self.0, State::Seen1 | State::Seen2) {
                return Some(2);
            }
            if bytes[..i].ends_with(b"--") {
                return Some(i + 1);
            }
        }
        if bytes.ends_with(b"--") {
            self.0 = State::Seen2;
        } else {
            self.next_state(bytes.last().copied());
        }
        None
    }

    #[inline]
    fn next_state(&mut self, last: Option<u8>) {
        match (self.0, last) {
            (State::Seen0, Some(b'-')) => self.0 = State::Seen1,
            (State::Seen1, Some(b'-')) => self.0 = State::Seen2,
            (State::Seen1, Some(_)) => self.0 = State::Seen0,
            (State::Seen2, Some(b'-')) => {}
            (State::Seen2, Some(_)) => self.0 = State::Seen0,
            _ => {}
        }
    }
}

#[test]
fn test() {
    use pretty_assertions::assert_eq;
    use State::*;

    fn parse(bytes: &[u8], initial: State) -> Result<usize, State> {
        let mut scanner = CommentScanner(initial);
        match scanner.feed(bytes) {
            Some(i) => Ok(i),
            None => Err(scanner.0),
        }
    }

    assert_eq!(parse(b"", Seen0), Err(Seen0));
    assert_eq!(parse(b"-->", Seen0), Ok(3));
    assert_eq!(parse(b">", Seen2), Ok(1));
    assert_eq!(parse(b"->", Seen1), Ok(2));
    assert_eq!(parse(b"-- b -->", Seen0), Ok(8));
}
