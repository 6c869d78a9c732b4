//! Scans for the `]]>` sequence that ends a CDATA section.

/// Finds the first `]]>` in a sequence of byte slices fed across one or more
/// calls to [`feed`](Self::feed). Returns `Some(offset)` — the offset one
/// past the `>` — on the call whose slice completes the terminator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CDataScanner {
    /// No trailing `]` seen yet at the end of the previous slice.
    Seen0,
    /// One trailing `]` seen at the end of the previous slice.
    Seen1,
    /// Two trailing `]` seen at the end of the previous slice.
    Seen2,
}

impl Default for CDataScanner {
    fn default() -> Self {
        Self::Seen0
    }
}

impl CDataScanner {
    pub fn feed(&mut self, bytes: &[u8]) -> Option<usize> {
        for i in memchr::memchr_iter(b'>', bytes) {
            if i == 0 && *self == Self::Seen2 {
                return Some(1);
            }
            if i == 1 && bytes[0] == b']' && matches!(self, Self::Seen1 | Self::Seen2) {
                return Some(2);
            }
            if bytes[..i].ends_with(b"]]") {
                return Some(i + 1);
            }
        }
        if bytes.ends_with(b"]]") {
            *self = Self::Seen2;
        } else {
            *self = self.next_state(bytes.last().copied());
        }
        None
    }

    #[inline]
    fn next_state(self, last: Option<u8>) -> Self {
        match (self, last) {
            (Self::Seen0, Some(b']')) => Self::Seen1,
            (Self::Seen1, Some(b']')) => Self::Seen2,
            (Self::Seen1, Some(_)) => Self::Seen0,
            (Self::Seen2, Some(b']')) => self,
            (Self::Seen2, Some(_)) => Self::Seen0,
            _ => self,
        }
    }
}

#[test]
fn test() {
    use pretty_assertions::assert_eq;
    use CDataScanner::*;

    fn parse(bytes: &[u8], scanner: CDataScanner) -> Result<usize, CDataScanner> {
        let mut scanner = scanner;
        match scanner.feed(bytes) {
            Some(i) => Ok(i),
            None => Err(scanner),
        }
    }

    assert_eq!(parse(b"", Seen0), Err(Seen0));
    assert_eq!(parse(b"]]>", Seen0), Ok(3));
    assert_eq!(parse(b">", Seen2), Ok(1));
    assert_eq!(
        parse(b"cdata content with ]] and ]> ]]>", Seen0),
        Ok(32)
    );
}
