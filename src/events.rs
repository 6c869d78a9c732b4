//! The event types produced by the tokenizer (see [`crate::parser`]) and
//! passed, unchanged in shape, through the namespace and validation layers.

use crate::position::Position;
use std::borrow::Cow;

/// A name as it appeared in the source: `local` or `prefix:local`.
///
/// Namespace expansion (see [`crate::namespace`]) is a separate step that
/// consumes a `QName` and a scope; this type carries no namespace
/// information of its own.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct QName<'a>(&'a [u8]);

impl<'a> std::fmt::Debug for QName<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "QName(")?;
        crate::utils::write_byte_string(f, self.0)?;
        write!(f, ")")
    }
}

impl<'a> QName<'a> {
    /// Wraps a raw byte slice as a qualified name, as read from the input.
    #[inline]
    pub fn new(bytes: &'a [u8]) -> Self {
        QName(bytes)
    }

    /// The full `local` or `prefix:local` form, exactly as it appeared.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// The part before the colon, if any.
    #[inline]
    pub fn prefix(&self) -> Option<&'a [u8]> {
        self.0.iter().position(|&b| b == b':').map(|i| &self.0[..i])
    }

    /// The part after the colon, or the whole name if unprefixed.
    #[inline]
    pub fn local_name(&self) -> &'a [u8] {
        match self.0.iter().position(|&b| b == b':') {
            Some(i) => &self.0[i + 1..],
            None => self.0,
        }
    }
}

/// Text content of an event: borrowed when the run lay entirely within one
/// chunk, owned when it straddled a chunk boundary or was produced by entity
/// decoding.
pub type Content<'a> = Cow<'a, [u8]>;

/// A single `name="value"` pair within a [`Event::StartElement`]'s attribute
/// list. Order is preserved as it appeared in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute<'a> {
    /// The attribute's name, exactly as written (`local` or `prefix:local`).
    pub name: QName<'a>,
    /// The attribute's value, after whitespace normalization and (per
    /// [`crate::config::Config::decode_attr_entities`]) entity decoding.
    pub value: Content<'a>,
}

/// One item of the lazy event stream produced by the tokenizer.
///
/// Every variant carries a [`Position`] marking the start of the
/// construct that produced it; positions are monotonically non-decreasing
/// across a stream (see the crate-level well-formedness invariants).
#[allow(missing_docs)] // field names are self-explanatory; see each variant's doc
#[derive(Debug, Clone, PartialEq)]
pub enum Event<'a> {
    /// Emitted once, before anything else, if the caller opted in.
    StartDocument { position: Position },
    /// Emitted once, after the final event, if the caller opted in.
    EndDocument { position: Position },
    /// The `<?xml ...?>` declaration. `target` is always the literal `"xml"`
    /// (see `DESIGN.md` for why this crate does not model it as a
    /// distinguished tag).
    Prolog {
        target: &'static str,
        attributes: Vec<Attribute<'a>>,
        position: Position,
    },
    /// A `<!DOCTYPE ...>` declaration, content not interpreted.
    Dtd { content: Content<'a>, position: Position },
    /// `<name attr="value" ...>`, or the open half of a self-closing
    /// `<name .../>` (which is always expanded into a start/end pair; see
    /// `DESIGN.md`).
    StartElement {
        name: QName<'a>,
        attributes: Vec<Attribute<'a>>,
        position: Position,
    },
    /// `</name>`, or the close half of an expanded self-closing element.
    EndElement { name: QName<'a>, position: Position },
    /// A run of character data that is not entirely whitespace, or any
    /// character data at all when `space` events are not distinguished.
    Characters { content: Content<'a>, position: Position },
    /// A run of character data that is entirely XML whitespace. Only
    /// produced when [`crate::config::Config`] enables it.
    Space { content: Content<'a>, position: Position },
    /// `<![CDATA[ ... ]]>` content.
    CData { content: Content<'a>, position: Position },
    /// `<!-- ... -->` content, never containing `--`.
    Comment { content: Content<'a>, position: Position },
    /// `<?target data?>`, excluding the reserved `xml` target (which is
    /// always reported as [`Event::Prolog`] instead).
    ProcessingInstruction {
        target: QName<'a>,
        data: Content<'a>,
        position: Position,
    },
    /// A recoverable problem. The stream continues after this event except
    /// for the EOF-in-construct kinds (see [`crate::errors::SyntaxError`]),
    /// which also end the stream.
    Error {
        kind: &'static str,
        message: String,
        position: Position,
    },
}

impl<'a> Event<'a> {
    /// The position every variant carries.
    pub fn position(&self) -> Position {
        match self {
            Event::StartDocument { position }
            | Event::EndDocument { position }
            | Event::Prolog { position, .. }
            | Event::Dtd { position, .. }
            | Event::StartElement { position, .. }
            | Event::EndElement { position, .. }
            | Event::Characters { position, .. }
            | Event::Space { position, .. }
            | Event::CData { position, .. }
            | Event::Comment { position, .. }
            | Event::ProcessingInstruction { position, .. }
            | Event::Error { position, .. } => *position,
        }
    }

    /// Whether this event's content is required to contain only whitespace,
    /// per [`Event::Space`]'s contract.
    pub fn is_whitespace_only(&self) -> bool {
        match self {
            Event::Space { content, .. } => {
                content.iter().all(|&b| crate::chars::is_xml_whitespace(b))
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn qname_splits_prefix_and_local() {
        let q = QName::new(b"ns:local");
        assert_eq!(q.prefix(), Some(&b"ns"[..]));
        assert_eq!(q.local_name(), &b"local"[..]);
    }

    #[test]
    fn qname_without_prefix() {
        let q = QName::new(b"local");
        assert_eq!(q.prefix(), None);
        assert_eq!(q.local_name(), &b"local"[..]);
    }

    #[test]
    fn event_position_accessor_covers_all_variants() {
        let pos = Position::START;
        let e = Event::Characters {
            content: Cow::Borrowed(&b"hi"[..]),
            position: pos,
        };
        assert_eq!(e.position(), pos);
    }
}
