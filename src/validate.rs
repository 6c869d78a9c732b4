//! Well-formedness and validity checks (C5), modeled as `Iterator -> Iterator`
//! stream transforms rather than a single monolithic pass, so a caller can
//! compose only the checks it wants (see `DESIGN.md` for why this crate
//! drops the source's lazy-sequence-of-combinators style in favor of plain
//! iterator adapters).
//!
//! Every adapter wraps an upstream `Iterator<Item = Result<Event<'a>, Error>>`
//! and yields the same shape: a `raise`-policy violation short-circuits the
//! stream with `Err`, `emit` interleaves an [`Event::Error`] ahead of the
//! triggering event, and `skip` drops the offending event or content
//! silently. An upstream `Err` is always passed straight through unexamined —
//! a later stage has nothing useful to check once an earlier one has already
//! failed.

use crate::chars::{is_valid_xml_char, Edition};
use crate::config::ErrorPolicy;
use crate::errors::{Error, IllFormedError};
use crate::events::{Attribute, Event};
use crate::position::Position;
use std::borrow::Cow;

/// Checks that every end tag matches the innermost open start tag and that
/// no start tag is left open at end of input.
pub struct WellFormed<'a, I> {
    inner: I,
    stack: Vec<Vec<u8>>,
    policy: ErrorPolicy,
    pending: Option<Event<'a>>,
    finished: bool,
}

impl<'a, I> WellFormed<'a, I> {
    /// Wraps `inner`, checking tag matching under `policy`.
    pub fn new(inner: I, policy: ErrorPolicy) -> Self {
        Self {
            inner,
            stack: Vec::new(),
            policy,
            pending: None,
            finished: false,
        }
    }
}

impl<'a, I: Iterator<Item = Result<Event<'a>, Error>>> Iterator for WellFormed<'a, I> {
    type Item = Result<Event<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.pending.take() {
            return Some(Ok(event));
        }
        if self.finished {
            return None;
        }
        match self.inner.next() {
            None => {
                self.finished = true;
                if self.stack.is_empty() {
                    None
                } else {
                    let names = std::mem::take(&mut self.stack)
                        .into_iter()
                        .map(|n| String::from_utf8_lossy(&n).into_owned())
                        .collect();
                    let err = IllFormedError::UnclosedElements { names };
                    self.report(err, Position::START, None)
                }
            }
            Some(Err(e)) => Some(Err(e)),
            Some(Ok(event)) => self.handle(event),
        }
    }
}

impl<'a, I> WellFormed<'a, I> {
    fn handle(&mut self, event: Event<'a>) -> Option<Result<Event<'a>, Error>> {
        match &event {
            Event::StartElement { name, .. } => {
                self.stack.push(name.as_bytes().to_vec());
                Some(Ok(event))
            }
            Event::EndElement { name, .. } => {
                let found = name.as_bytes().to_vec();
                let position = event.position();
                match self.stack.pop() {
                    Some(expected) if expected == found => Some(Ok(event)),
                    Some(expected) => {
                        let err = IllFormedError::MismatchedEndTag {
                            expected: String::from_utf8_lossy(&expected).into_owned(),
                            found: String::from_utf8_lossy(&found).into_owned(),
                        };
                        self.report(err, position, Some(event))
                    }
                    None => {
                        let err = IllFormedError::UnmatchedEndTag {
                            found: String::from_utf8_lossy(&found).into_owned(),
                        };
                        self.report(err, position, Some(event))
                    }
                }
            }
            _ => Some(Ok(event)),
        }
    }

    /// Applies `self.policy` to a detected violation. `original`, if given,
    /// is queued to follow the error under the `emit` policy, or returned
    /// unchanged under `skip`.
    fn report(
        &mut self,
        err: IllFormedError,
        position: Position,
        original: Option<Event<'a>>,
    ) -> Option<Result<Event<'a>, Error>> {
        match self.policy {
            ErrorPolicy::Raise => Some(Err(Error::IllFormed(err, position))),
            ErrorPolicy::Emit => {
                self.pending = original;
                Some(Ok(Event::Error {
                    kind: "ill_formed",
                    message: err.to_string(),
                    position,
                }))
            }
            ErrorPolicy::Skip => match original {
                Some(event) => Some(Ok(event)),
                None => None,
            },
        }
    }
}

/// Checks that no `start_element` repeats an attribute name.
pub struct UniqueAttributes<'a, I> {
    inner: I,
    policy: ErrorPolicy,
    pending: Option<Event<'a>>,
}

impl<'a, I> UniqueAttributes<'a, I> {
    /// Wraps `inner`, checking attribute uniqueness under `policy`.
    pub fn new(inner: I, policy: ErrorPolicy) -> Self {
        Self {
            inner,
            policy,
            pending: None,
        }
    }
}

impl<'a, I: Iterator<Item = Result<Event<'a>, Error>>> Iterator for UniqueAttributes<'a, I> {
    type Item = Result<Event<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.pending.take() {
            return Some(Ok(event));
        }
        match self.inner.next()? {
            Err(e) => Some(Err(e)),
            Ok(Event::StartElement { name, mut attributes, position }) => {
                let mut first_dup = None;
                let mut i = 1;
                while i < attributes.len() {
                    let dup = attributes[..i]
                        .iter()
                        .any(|a| a.name.as_bytes() == attributes[i].name.as_bytes());
                    if dup {
                        if first_dup.is_none() {
                            first_dup = Some(IllFormedError::DuplicateAttribute {
                                name: String::from_utf8_lossy(attributes[i].name.as_bytes()).into_owned(),
                            });
                        }
                        if self.policy == ErrorPolicy::Skip {
                            attributes.remove(i);
                            continue;
                        }
                    }
                    i += 1;
                }
                let rebuilt = Event::StartElement { name, attributes, position };
                match first_dup {
                    None => Some(Ok(rebuilt)),
                    Some(err) => match self.policy {
                        ErrorPolicy::Raise => Some(Err(Error::IllFormed(err, position))),
                        ErrorPolicy::Emit => {
                            self.pending = Some(rebuilt);
                            Some(Ok(Event::Error {
                                kind: "ill_formed",
                                message: err.to_string(),
                                position,
                            }))
                        }
                        ErrorPolicy::Skip => Some(Ok(rebuilt)),
                    },
                }
            }
            Ok(other) => Some(Ok(other)),
        }
    }
}

/// Checks every text-bearing event's content against the `Char` production,
/// under the selected [`Edition`]. Unlike the other validators, an invalid
/// codepoint can be repaired in place with [`CharacterPolicy::Replace`]
/// rather than only raised, emitted, or skipped.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CharacterPolicy {
    /// Abort the stream with a typed error on the first invalid codepoint.
    Raise,
    /// Emit an [`crate::events::Event::Error`] and keep the content unchanged.
    Emit,
    /// Drop invalid codepoints from the content and keep going.
    Skip,
    /// Replace each invalid codepoint with the given character.
    Replace(char),
}

/// Checks every text-bearing event's content against the `Char` production,
/// under the selected [`Edition`]. Unlike the other validators, an invalid
/// codepoint can be repaired in place with [`CharacterPolicy::Replace`]
/// rather than only raised, emitted, or skipped.
pub struct CharacterValidity<'a, I> {
    inner: I,
    policy: CharacterPolicy,
    edition: Edition,
    pending: Option<Event<'a>>,
}

impl<'a, I> CharacterValidity<'a, I> {
    /// Wraps `inner`, checking content against `edition`'s `Char` production
    /// under `policy`.
    pub fn new(inner: I, policy: CharacterPolicy, edition: Edition) -> Self {
        Self {
            inner,
            policy,
            edition,
            pending: None,
        }
    }

    /// Scans `content` for characters outside the `Char` production.
    /// Returns the first violation found, and — under `skip`/`replace` — the
    /// rewritten content.
    fn scan(&self, content: &[u8], position: Position) -> (Option<Vec<u8>>, Option<IllFormedError>) {
        let text = match std::str::from_utf8(content) {
            Ok(t) => t,
            Err(_) => return (None, None),
        };
        let mut offending = None;
        let mut out = String::with_capacity(text.len());
        let mut rewritten = false;
        for (i, c) in text.char_indices() {
            if is_valid_xml_char(c, self.edition) {
                out.push(c);
                continue;
            }
            if offending.is_none() {
                offending = Some(IllFormedError::InvalidChar {
                    codepoint: c as u32,
                    offset: position.absolute_offset() + i,
                });
            }
            match self.policy {
                CharacterPolicy::Replace(r) => {
                    out.push(r);
                    rewritten = true;
                }
                CharacterPolicy::Skip => rewritten = true,
                CharacterPolicy::Raise | CharacterPolicy::Emit => out.push(c),
            }
        }
        (if rewritten { Some(out.into_bytes()) } else { None }, offending)
    }
}

impl<'a, I: Iterator<Item = Result<Event<'a>, Error>>> Iterator for CharacterValidity<'a, I> {
    type Item = Result<Event<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.pending.take() {
            return Some(Ok(event));
        }
        let event = match self.inner.next()? {
            Err(e) => return Some(Err(e)),
            Ok(event) => event,
        };
        macro_rules! check {
            ($content:expr, $position:expr, $rebuild:expr) => {{
                let (replacement, offending) = self.scan(&$content, $position);
                match offending {
                    None => Some(Ok(event)),
                    Some(err) => {
                        let rebuilt = match replacement {
                            Some(bytes) => $rebuild(Cow::Owned(bytes)),
                            None => event,
                        };
                        match self.policy {
                            CharacterPolicy::Raise => Some(Err(Error::IllFormed(err, $position))),
                            CharacterPolicy::Emit => {
                                self.pending = Some(rebuilt);
                                Some(Ok(Event::Error {
                                    kind: "ill_formed",
                                    message: err.to_string(),
                                    position: $position,
                                }))
                            }
                            CharacterPolicy::Skip | CharacterPolicy::Replace(_) => Some(Ok(rebuilt)),
                        }
                    }
                }
            }};
        }
        match &event {
            Event::Characters { content, position } => {
                let (content, position) = (content.clone(), *position);
                check!(content, position, |c| Event::Characters { content: c, position })
            }
            Event::Space { content, position } => {
                let (content, position) = (content.clone(), *position);
                check!(content, position, |c| Event::Space { content: c, position })
            }
            Event::CData { content, position } => {
                let (content, position) = (content.clone(), *position);
                check!(content, position, |c| Event::CData { content: c, position })
            }
            Event::Comment { content, position } => {
                let (content, position) = (content.clone(), *position);
                check!(content, position, |c| Event::Comment { content: c, position })
            }
            Event::ProcessingInstruction { target, data, position } => {
                let (target, data, position) = (*target, data.clone(), *position);
                check!(data, position, |c| Event::ProcessingInstruction { target, data: c, position })
            }
            Event::StartElement { name, attributes, position } => {
                let (name, position) = (*name, *position);
                let mut offending = None;
                let mut rebuilt_attrs = Vec::with_capacity(attributes.len());
                for attr in attributes {
                    let (replacement, err) = self.scan(&attr.value, position);
                    if offending.is_none() {
                        offending = err;
                    }
                    let value = match replacement {
                        Some(bytes) => Cow::Owned(bytes),
                        None => attr.value.clone(),
                    };
                    rebuilt_attrs.push(Attribute { name: attr.name, value });
                }
                match offending {
                    None => Some(Ok(event)),
                    Some(err) => {
                        let rebuilt = Event::StartElement { name, attributes: rebuilt_attrs, position };
                        match self.policy {
                            CharacterPolicy::Raise => Some(Err(Error::IllFormed(err, position))),
                            CharacterPolicy::Emit => {
                                self.pending = Some(rebuilt);
                                Some(Ok(Event::Error {
                                    kind: "ill_formed",
                                    message: err.to_string(),
                                    position,
                                }))
                            }
                            CharacterPolicy::Skip | CharacterPolicy::Replace(_) => Some(Ok(rebuilt)),
                        }
                    }
                }
            }
            _ => Some(Ok(event)),
        }
    }
}

/// Re-checks that a comment's content never contains `--`, independent of
/// whatever the tokenizer already enforced while scanning for `-->` (useful
/// after an earlier pipeline stage that might have rewritten comment
/// content).
pub struct CommentIntegrity<'a, I> {
    inner: I,
    policy: ErrorPolicy,
    pending: Option<Event<'a>>,
}

impl<'a, I> CommentIntegrity<'a, I> {
    /// Wraps `inner`, re-checking comment content for `--` under `policy`.
    pub fn new(inner: I, policy: ErrorPolicy) -> Self {
        Self {
            inner,
            policy,
            pending: None,
        }
    }
}

impl<'a, I: Iterator<Item = Result<Event<'a>, Error>>> Iterator for CommentIntegrity<'a, I> {
    type Item = Result<Event<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.pending.take() {
            return Some(Ok(event));
        }
        match self.inner.next()? {
            Err(e) => Some(Err(e)),
            Ok(Event::Comment { content, position }) => match content.windows(2).position(|w| w == b"--") {
                None => Some(Ok(Event::Comment { content, position })),
                Some(i) => {
                    let err = IllFormedError::DoubleHyphenInComment {
                        offset: position.absolute_offset() + i,
                    };
                    let rebuilt = Event::Comment { content, position };
                    match self.policy {
                        ErrorPolicy::Raise => Some(Err(Error::IllFormed(err, position))),
                        ErrorPolicy::Emit => {
                            self.pending = Some(rebuilt);
                            Some(Ok(Event::Error {
                                kind: "ill_formed",
                                message: err.to_string(),
                                position,
                            }))
                        }
                        ErrorPolicy::Skip => None,
                    }
                }
            },
            Ok(other) => Some(Ok(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Attribute, Content, QName};
    use pretty_assertions::assert_eq;

    fn start(name: &'static str) -> Event<'static> {
        Event::StartElement {
            name: QName::new(name.as_bytes()),
            attributes: Vec::new(),
            position: Position::START,
        }
    }

    fn end(name: &'static str) -> Event<'static> {
        Event::EndElement {
            name: QName::new(name.as_bytes()),
            position: Position::START,
        }
    }

    #[test]
    fn well_formed_passes_balanced_tree() {
        let events = vec![Ok(start("a")), Ok(start("b")), Ok(end("b")), Ok(end("a"))];
        let out: Vec<_> = WellFormed::new(events.into_iter(), ErrorPolicy::Raise)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn well_formed_emit_reports_mismatch_then_continues() {
        let events = vec![Ok(start("a")), Ok(start("b")), Ok(end("c"))];
        let out: Vec<_> = WellFormed::new(events.into_iter(), ErrorPolicy::Emit)
            .collect::<Result<_, _>>()
            .unwrap();
        assert!(matches!(out[2], Event::Error { .. }));
        assert!(matches!(out[3], Event::EndElement { .. }));
    }

    #[test]
    fn well_formed_raise_aborts_on_unmatched_end_tag() {
        let events = vec![Ok(end("a"))];
        let mut iter = WellFormed::new(events.into_iter(), ErrorPolicy::Raise);
        assert!(matches!(iter.next(), Some(Err(Error::IllFormed(IllFormedError::UnmatchedEndTag { .. }, _)))));
    }

    #[test]
    fn well_formed_reports_unclosed_elements_at_eof() {
        let events = vec![Ok(start("a")), Ok(start("b"))];
        let out: Vec<_> = WellFormed::new(events.into_iter(), ErrorPolicy::Emit)
            .collect::<Result<_, _>>()
            .unwrap();
        assert!(matches!(out.last(), Some(Event::Error { .. })));
    }

    fn attr(name: &'static str, value: &'static str) -> Attribute<'static> {
        Attribute {
            name: QName::new(name.as_bytes()),
            value: Content::Borrowed(value.as_bytes()),
        }
    }

    #[test]
    fn unique_attributes_detects_duplicate() {
        let event = Event::StartElement {
            name: QName::new(b"a"),
            attributes: vec![attr("id", "1"), attr("id", "2")],
            position: Position::START,
        };
        let out: Vec<_> = UniqueAttributes::new(vec![Ok(event)].into_iter(), ErrorPolicy::Emit)
            .collect::<Result<_, _>>()
            .unwrap();
        assert!(matches!(out[0], Event::Error { .. }));
        match &out[1] {
            Event::StartElement { attributes, .. } => assert_eq!(attributes.len(), 2),
            other => panic!("expected StartElement, got {:?}", other),
        }
    }

    #[test]
    fn unique_attributes_skip_drops_the_repeat() {
        let event = Event::StartElement {
            name: QName::new(b"a"),
            attributes: vec![attr("id", "1"), attr("id", "2")],
            position: Position::START,
        };
        let out: Vec<_> = UniqueAttributes::new(vec![Ok(event)].into_iter(), ErrorPolicy::Skip)
            .collect::<Result<_, _>>()
            .unwrap();
        match &out[0] {
            Event::StartElement { attributes, .. } => assert_eq!(attributes.len(), 1),
            other => panic!("expected StartElement, got {:?}", other),
        }
    }

    #[test]
    fn character_validity_replaces_invalid_codepoint() {
        let event = Event::Characters {
            content: Content::Owned(vec![0x01]),
            position: Position::START,
        };
        let out: Vec<_> = CharacterValidity::new(
            vec![Ok(event)].into_iter(),
            CharacterPolicy::Replace('?'),
            Edition::Fifth,
        )
        .collect::<Result<_, _>>()
        .unwrap();
        match &out[0] {
            Event::Characters { content, .. } => assert_eq!(&**content, b"?"),
            other => panic!("expected Characters, got {:?}", other),
        }
    }

    #[test]
    fn character_validity_raise_reports_offset() {
        let event = Event::Characters {
            content: Content::Owned(vec![b'a', 0x00]),
            position: Position::START,
        };
        let mut iter = CharacterValidity::new(vec![Ok(event)].into_iter(), CharacterPolicy::Raise, Edition::Fifth);
        match iter.next() {
            Some(Err(Error::IllFormed(IllFormedError::InvalidChar { codepoint, offset }, _))) => {
                assert_eq!(codepoint, 0);
                assert_eq!(offset, 1);
            }
            other => panic!("expected InvalidChar error, got {:?}", other),
        }
    }

    #[test]
    fn character_validity_scans_comment_content() {
        let event = Event::Comment {
            content: Content::Owned(vec![b'a', 0x00]),
            position: Position::START,
        };
        let mut iter = CharacterValidity::new(vec![Ok(event)].into_iter(), CharacterPolicy::Raise, Edition::Fifth);
        assert!(matches!(iter.next(), Some(Err(Error::IllFormed(IllFormedError::InvalidChar { .. }, _)))));
    }

    #[test]
    fn character_validity_scans_start_element_attribute_values() {
        let event = Event::StartElement {
            name: QName::new(b"a"),
            attributes: vec![attr("v", "ok"), Attribute {
                name: QName::new(b"bad"),
                value: Content::Owned(vec![0x00]),
            }],
            position: Position::START,
        };
        let out: Vec<_> = CharacterValidity::new(
            vec![Ok(event)].into_iter(),
            CharacterPolicy::Replace('?'),
            Edition::Fifth,
        )
        .collect::<Result<_, _>>()
        .unwrap();
        match &out[0] {
            Event::StartElement { attributes, .. } => {
                assert_eq!(&*attributes[0].value, b"ok");
                assert_eq!(&*attributes[1].value, b"?");
            }
            other => panic!("expected StartElement, got {:?}", other),
        }
    }

    #[test]
    fn comment_integrity_detects_double_hyphen() {
        let event = Event::Comment {
            content: Content::Borrowed(b"a--b"),
            position: Position::START,
        };
        let out: Vec<_> = CommentIntegrity::new(vec![Ok(event)].into_iter(), ErrorPolicy::Emit)
            .collect::<Result<_, _>>()
            .unwrap();
        assert!(matches!(out[0], Event::Error { .. }));
        assert!(matches!(out[1], Event::Comment { .. }));
    }

    #[test]
    fn comment_integrity_skip_drops_the_comment() {
        let event = Event::Comment {
            content: Content::Borrowed(b"a--b"),
            position: Position::START,
        };
        let out: Vec<_> = CommentIntegrity::new(vec![Ok(event)].into_iter(), ErrorPolicy::Skip)
            .collect::<Result<_, _>>()
            .unwrap();
        assert!(out.is_empty());
    }
}
