//! Scans for the `?>` sequence that ends a processing instruction (or the
//! XML declaration, which shares the same terminator).

/// Finds the first `?>` in a sequence of byte slices fed across one or more
/// calls to [`feed`](Self::feed). Returns `Some(offset)` — the offset one
/// past the `>` — on the call whose slice completes the terminator.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PiScanner(
    /// Whether the previous slice ended on an unmatched `?`.
    bool,
);

impl PiScanner {
    pub fn feed(&mut self, bytes: &[u8]) -> Option<usize> {
        for i in memchr::memchr_iter(b'>', bytes) {
            match i {
                0 if self.0 => return Some(1),
                i if i > 0 && bytes[i - 1] == b'?' => return Some(i + 1),
                _ => {}
            }
        }
        self.0 = bytes.last().copied() == Some(b'?');
        None
    }
}

#[test]
fn test() {
    use pretty_assertions::assert_eq;

    fn parse(bytes: &[u8], had_question_mark: bool) -> Result<usize, bool> {
        let mut scanner = PiScanner(had_question_mark);
        match scanner.feed(bytes) {
            Some(i) => Ok(i),
            None => Err(scanner.0),
        }
    }

    assert_eq!(parse(b"", false), Err(false));
    assert_eq!(parse(b">", true), Ok(1));
    assert_eq!(parse(b"?>", false), Ok(2));
    assert_eq!(parse(b">?>", true), Ok(1));
}
