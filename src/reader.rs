//! The `Tokenizer` type (C3+C2 wired together): turns a normalized byte
//! buffer into a lazy stream of [`Event`]s, applying [`Config`] at every
//! suppression/decoding/positioning decision point.
//!
//! Callers are responsible for running [`crate::lineending::normalize`] (or
//! feeding already-normalized bytes) before construction — this module and
//! [`crate::position`] both assume CR/CRLF has already collapsed to LF.
//!
//! [`Tokenizer::from_slice`] is eager: it resolves the whole input into an
//! internal `Vec<Event>` up front and hands it out through the usual pull
//! `Iterator` interface. Each construct still borrows zero-copy from the
//! input slice; only the driving loop itself is not lazy. [`ChunkedTokenizer`]
//! is the true incremental counterpart for input arriving in pieces.

use crate::chars::is_xml_whitespace;
use crate::chunk::{ChunkBuffer, ConstructKind, Span};
use crate::config::{Config, Mode, Positions};
use crate::errors::{Error, IllFormedError, Result, SyntaxError};
use crate::escape::{unescape, EscapeError};
use crate::events::{Attribute, Content, Event, QName};
use crate::position::Position;
use std::borrow::Cow;

/// Turns a normalized buffer into the complete event stream for it.
///
/// Construction cannot fail: a malformed byte-level construct becomes an
/// [`Event::Error`] in the stream (with resynchronization at the next `<`)
/// rather than aborting tokenization outright. The five EOF-in-construct
/// conditions (see [`crate::errors::SyntaxError`]) end the stream instead,
/// with one final `Event::Error` reporting what was left open.
pub struct Tokenizer<'a> {
    events: std::vec::IntoIter<Event<'a>>,
}

impl<'a> Tokenizer<'a> {
    /// Tokenizes `bytes` (already line-ending normalized) under `config`.
    pub fn from_slice(bytes: &'a [u8], config: &Config) -> Self {
        Tokenizer { events: tokenize(bytes, config).into_iter() }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Event<'a>> {
        self.events.next()
    }
}

/// Incremental counterpart to [`Tokenizer`] for input that arrives in
/// chunks. Two limitations relative to [`Tokenizer::from_slice`], both
/// recorded in `DESIGN.md`: a syntax error is returned to the caller rather
/// than resynchronized past automatically, and [`Config::raw_text_elements`]
/// content is not specially handled when it straddles a chunk boundary.
pub struct ChunkedTokenizer {
    buffer: ChunkBuffer,
    config: Config,
}

impl ChunkedTokenizer {
    /// A tokenizer with an empty buffer, ready for the first [`feed`](Self::feed) call.
    pub fn new(config: Config) -> Self {
        let mut buffer = ChunkBuffer::new();
        if config.positions == Positions::None {
            buffer.disable_position_tracking();
        }
        ChunkedTokenizer { buffer, config }
    }

    /// Feeds one already-normalized chunk, returning every event it completes.
    pub fn feed<'c>(&mut self, chunk: &'c [u8]) -> Result<Vec<Event<'c>>> {
        let spans = self.buffer.feed(chunk).map_err(|e| Error::Syntax(e, self.buffer.position()))?;
        let mut out = Vec::with_capacity(spans.len());
        for span in &spans {
            emit_span(span, span.position, &self.config, &mut out);
        }
        Ok(out)
    }

    /// Call once the caller's chunk iterator is exhausted. Returns the
    /// partial construct (if any) collected for whatever was left open,
    /// followed by the terminal [`Event::Error`] — empty if the buffer was
    /// at a safe point.
    pub fn finish(&mut self) -> Vec<Event<'static>> {
        match self.buffer.finish() {
            Ok(()) => Vec::new(),
            Err(e) => {
                let position = self.buffer.position();
                let partial = self.buffer.take_partial();
                let mut out = Vec::new();
                if let Some(event) = partial_construct_event(&e, partial, position, &self.config) {
                    out.push(event);
                }
                out.push(Event::Error { kind: e.kind(), message: e.to_string(), position });
                out
            }
        }
    }
}

/// The partial `Comment`/`CData` event recoverable for an EOF-in-construct
/// error, built from whatever bytes [`ChunkBuffer::take_partial`] had
/// collected (always starting with the construct's opening delimiter, never
/// a closing one). `None` for constructs with no partial-content event to
/// recover (an unclosed tag or DOCTYPE carries no standalone content event)
/// or when the matching `emit_*` flag is off.
fn partial_construct_event(
    syntax: &SyntaxError,
    partial: Vec<u8>,
    position: Position,
    config: &Config,
) -> Option<Event<'static>> {
    match syntax {
        SyntaxError::UnclosedComment if config.emit_comment => {
            let content = partial.get(4..).unwrap_or(&[]).to_vec(); // strip `<!--`
            Some(Event::Comment { content: Cow::Owned(content), position })
        }
        SyntaxError::UnclosedCData if config.emit_cdata => {
            let content = partial.get(9..).unwrap_or(&[]).to_vec(); // strip `<![CDATA[`
            Some(Event::CData { content: Cow::Owned(content), position })
        }
        _ => None,
    }
}

/// Drives a fresh [`ChunkBuffer`] over the whole slice, resolving every
/// [`Span`] into zero or more [`Event`]s. Creates a new `ChunkBuffer` after a
/// syntax error (resynchronizing at the next `<`) and after a raw-text
/// region (whose content was never fed to the parser at all), since in both
/// cases the previous buffer's internal state can no longer be trusted.
fn tokenize<'a>(bytes: &'a [u8], config: &Config) -> Vec<Event<'a>> {
    let mut out = Vec::new();
    out.push(Event::StartDocument { position: Position::START });

    let mut cursor = 0usize;
    let mut position = Position::START;
    let mut buffer = ChunkBuffer::new();
    let mut first = true;

    while cursor < bytes.len() {
        if !first {
            buffer = ChunkBuffer::without_bom_detection();
        }
        first = false;

        match buffer.feed(&bytes[cursor..]) {
            Ok(spans) => {
                let mut redirected = false;
                for span in spans {
                    let len = span.bytes.len();
                    let tag_start = cursor;
                    let start_position = position;
                    advance_position(&mut position, &bytes[cursor..cursor + len], config);
                    cursor += len;

                    if span.kind == ConstructKind::StartTag {
                        if let Some(name) = tag_name(&bytes[tag_start..cursor]) {
                            if config.is_raw_text_element(name) {
                                emit_span(&span, start_position, config, &mut out);
                                handle_raw_text(bytes, name, &mut cursor, &mut position, config, &mut out);
                                redirected = true;
                                break;
                            }
                        }
                    }
                    emit_span(&span, start_position, config, &mut out);
                }
                if !redirected {
                    // Every span in this one-shot feed was processed; either
                    // the whole remainder resolved (cursor == bytes.len()) or
                    // a trailing partial construct is left for `finish` to
                    // report — either way there is nothing left to feed.
                    break;
                }
            }
            Err(syntax) => {
                out.push(Event::Error { kind: syntax.kind(), message: syntax.to_string(), position });
                match memchr_lt(&bytes[cursor + 1..]) {
                    Some(offset) => {
                        let skip = 1 + offset;
                        advance_position(&mut position, &bytes[cursor..cursor + skip], config);
                        cursor += skip;
                    }
                    None => {
                        advance_position(&mut position, &bytes[cursor..], config);
                        cursor = bytes.len();
                    }
                }
            }
        }
    }

    if let Err(syntax) = buffer.finish() {
        let partial = buffer.take_partial();
        if let Some(event) = partial_construct_event(&syntax, partial, position, config) {
            out.push(event);
        }
        out.push(Event::Error { kind: syntax.kind(), message: syntax.to_string(), position });
    }
    out.push(Event::EndDocument { position });
    out
}

/// Scans past a raw-text element's verbatim content (never fed to the
/// parser) up to and including its matching end tag, advancing `cursor` and
/// `position` past it and emitting the `Characters`/`EndElement` pair.
fn handle_raw_text<'a>(
    bytes: &'a [u8],
    name: &'a [u8],
    cursor: &mut usize,
    position: &mut Position,
    config: &Config,
    out: &mut Vec<Event<'a>>,
) {
    match find_raw_text_close(&bytes[*cursor..], name) {
        Some((content_len, close_len)) => {
            if content_len > 0 && config.emit_characters {
                out.push(Event::Characters {
                    content: Cow::Borrowed(&bytes[*cursor..*cursor + content_len]),
                    position: *position,
                });
            }
            advance_position(position, &bytes[*cursor..*cursor + content_len], config);
            *cursor += content_len;
            let close_position = *position;
            let close_bytes = &bytes[*cursor..*cursor + close_len];
            let end_name = trim_whitespace(&close_bytes[2..close_bytes.len() - 1]);
            out.push(Event::EndElement { name: QName::new(end_name), position: close_position });
            advance_position(position, close_bytes, config);
            *cursor += close_len;
        }
        None => {
            let rest = &bytes[*cursor..];
            if !rest.is_empty() && config.emit_characters {
                out.push(Event::Characters { content: Cow::Borrowed(rest), position: *position });
            }
            advance_position(position, rest, config);
            *cursor = bytes.len();
        }
    }
}

fn memchr_lt(haystack: &[u8]) -> Option<usize> {
    memchr::memchr(b'<', haystack)
}

/// Advances `position` past `bytes`, unless [`Config::positions`] is
/// [`Positions::None`] — every event then carries [`Position::START`]
/// instead of paying for the per-byte line/column bookkeeping.
#[inline]
fn advance_position(position: &mut Position, bytes: &[u8], config: &Config) {
    if config.positions == Positions::Full {
        position.advance(bytes);
    }
}

/// The element name of a `StartTag` span's full bytes (`<name ...>`).
fn tag_name(tag_bytes: &[u8]) -> Option<&[u8]> {
    let inner = &tag_bytes[1..tag_bytes.len() - 1];
    let end = inner.iter().position(|&b| is_xml_whitespace(b)).unwrap_or(inner.len());
    if end == 0 {
        None
    } else {
        Some(&inner[..end])
    }
}

fn find_raw_text_close(haystack: &[u8], name: &[u8]) -> Option<(usize, usize)> {
    let mut i = 0;
    while i + 2 <= haystack.len() {
        if haystack[i] == b'<' && haystack.get(i + 1) == Some(&b'/') {
            let after = &haystack[i + 2..];
            if after.len() >= name.len() && after[..name.len()].eq_ignore_ascii_case(name) {
                let mut j = name.len();
                while after.get(j).map_or(false, |&b| is_xml_whitespace(b)) {
                    j += 1;
                }
                if after.get(j) == Some(&b'>') {
                    return Some((i, 2 + j + 1));
                }
            }
        }
        i += 1;
    }
    None
}

fn trim_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| !is_xml_whitespace(b)).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|&b| !is_xml_whitespace(b)).map(|i| i + 1).unwrap_or(start);
    &bytes[start..end]
}

/// Splits the inside of a start/empty tag or a PI (`name rest...`, no
/// delimiters) into the name and the trimmed remainder.
fn split_name_and_attrs(inner: &[u8]) -> (&[u8], &[u8]) {
    let end = inner.iter().position(|&b| is_xml_whitespace(b)).unwrap_or(inner.len());
    let name = &inner[..end];
    let attrs = trim_whitespace(&inner[end..]);
    (name, attrs)
}

/// Normalizes `0x09`/`0x0A`/`0x0D` to `0x20` within an already-lifted
/// attribute value (XML 1.0 §3.3.3 attribute-value normalization as applied
/// by the core tokenizer, which only handles the literal whitespace bytes —
/// character references like `&#10;` are left to a caller's own
/// post-processing). Runs after [`lift_attrs`] so a rewritten value can own
/// its bytes without disturbing the pointer arithmetic [`to_content`] relies
/// on for the common borrowed case.
fn normalize_attr_values<'a>(mut attrs: Vec<Attribute<'a>>) -> Vec<Attribute<'a>> {
    for attr in &mut attrs {
        if attr.value.iter().any(|&b| matches!(b, 0x09 | 0x0A | 0x0D)) {
            let normalized: Vec<u8> =
                attr.value.iter().map(|&b| if matches!(b, 0x09 | 0x0A | 0x0D) { b' ' } else { b }).collect();
            attr.value = Cow::Owned(normalized);
        }
    }
    attrs
}

fn parse_attributes(mode: Mode, bytes: &[u8]) -> Vec<Attribute<'_>> {
    let mut attrs = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        while i < bytes.len() && is_xml_whitespace(bytes[i]) {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }
        let name_start = i;
        while i < bytes.len() && !is_xml_whitespace(bytes[i]) && bytes[i] != b'=' {
            i += 1;
        }
        if i == name_start {
            break;
        }
        let name = &bytes[name_start..i];
        while i < bytes.len() && is_xml_whitespace(bytes[i]) {
            i += 1;
        }
        if i < bytes.len() && bytes[i] == b'=' {
            i += 1;
            while i < bytes.len() && is_xml_whitespace(bytes[i]) {
                i += 1;
            }
            if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
                let quote = bytes[i];
                i += 1;
                let value_start = i;
                while i < bytes.len() && bytes[i] != quote {
                    i += 1;
                }
                let value = &bytes[value_start..i.min(bytes.len())];
                if i < bytes.len() {
                    i += 1;
                }
                attrs.push(Attribute { name: QName::new(name), value: Cow::Borrowed(value) });
            } else if mode == Mode::Html {
                let value_start = i;
                while i < bytes.len() && !is_xml_whitespace(bytes[i]) {
                    i += 1;
                }
                attrs.push(Attribute { name: QName::new(name), value: Cow::Borrowed(&bytes[value_start..i]) });
            }
        } else if mode == Mode::Html {
            attrs.push(Attribute { name: QName::new(name), value: Cow::Borrowed(&[][..]) });
        }
    }
    attrs
}

/// Re-anchors attribute names/values parsed out of a transient sub-slice
/// onto the span's own lifetime `'a`.
fn lift_attrs<'a>(span: &Span<'a>, attrs: Vec<Attribute<'_>>) -> Vec<Attribute<'a>> {
    attrs
        .into_iter()
        .map(|a| Attribute {
            name: QName::new(owned_or_borrowed(span, a.name.as_bytes())),
            value: to_content(span, &a.value),
        })
        .collect()
}

fn decode_attr_values<'a>(mut attrs: Vec<Attribute<'a>>, config: &Config, errors: &mut Vec<String>) -> Vec<Attribute<'a>> {
    if !config.decode_attr_entities {
        return attrs;
    }
    for attr in &mut attrs {
        match unescape_into(attr.value.clone()) {
            Ok(v) => attr.value = v,
            Err(e) => errors.push(e.to_string()),
        }
    }
    attrs
}

/// Runs [`unescape`] over a `Cow` without forcing its lifetime down to a
/// transient borrow: an owned input that turns out to need no decoding is
/// handed back unchanged rather than re-copied.
fn unescape_into(content: Cow<'_, [u8]>) -> std::result::Result<Cow<'_, [u8]>, EscapeError> {
    match content {
        Cow::Borrowed(b) => unescape(b),
        Cow::Owned(v) => match unescape(&v)? {
            Cow::Borrowed(_) => Ok(Cow::Owned(v)),
            Cow::Owned(v2) => Ok(Cow::Owned(v2)),
        },
    }
}

/// Converts one [`Span`] into zero or more [`Event`]s at the given
/// `position` (the caller's own running position, not necessarily
/// `span.position` — see `tokenize`'s per-segment buffer resets).
fn emit_span<'a>(span: &Span<'a>, position: Position, config: &Config, out: &mut Vec<Event<'a>>) {
    match span.kind {
        ConstructKind::Text => emit_text(span, position, config, out),
        ConstructKind::CData => {
            if config.emit_cdata {
                let content = strip(&span.bytes, 9, 3); // `<![CDATA[` / `]]>`
                out.push(Event::CData { content: to_content(span, content), position });
            }
        }
        ConstructKind::Comment => {
            let content = strip(&span.bytes, 4, 3); // `<!--` / `-->`
            if config.emit_comment {
                out.push(Event::Comment { content: to_content(span, content), position });
            }
            if let Some(i) = memchr::memmem::find(content, b"--") {
                let err = IllFormedError::DoubleHyphenInComment { offset: position.absolute_offset() + i };
                out.push(Event::Error { kind: "comment", message: err.to_string(), position });
            }
        }
        ConstructKind::Doctype => {
            let content = trim_whitespace(strip(&span.bytes, 9, 1)); // `<!DOCTYPE` / `>`
            out.push(Event::Dtd { content: to_content(span, content), position });
        }
        ConstructKind::Pi => emit_pi(span, position, config, out),
        ConstructKind::EmptyTag => emit_tag(span, position, config, out, true),
        ConstructKind::StartTag => emit_tag(span, position, config, out, false),
        ConstructKind::EndTag => {
            let inner = strip(&span.bytes, 2, 1); // `</` / `>`
            let name = if config.trim_markup_names_in_closing_tags { trim_whitespace(inner) } else { inner };
            out.push(Event::EndElement { name: QName::new(owned_or_borrowed(span, name)), position });
        }
    }
}

fn emit_text<'a>(span: &Span<'a>, mut position: Position, config: &Config, out: &mut Vec<Event<'a>>) {
    let mut content: Content<'a> = span.bytes.clone();

    if config.trim_text_start {
        let start = content.iter().position(|&b| !is_xml_whitespace(b)).unwrap_or(content.len());
        if start > 0 {
            advance_position(&mut position, &content[..start], config);
        }
        content = match content {
            Cow::Borrowed(b) => Cow::Borrowed(&b[start..]),
            Cow::Owned(mut v) => {
                v.drain(..start);
                Cow::Owned(v)
            }
        };
    }
    if config.trim_text_end {
        let end = content.iter().rposition(|&b| !is_xml_whitespace(b)).map(|i| i + 1).unwrap_or(0);
        content = match content {
            Cow::Borrowed(b) => Cow::Borrowed(&b[..end]),
            Cow::Owned(mut v) => {
                v.truncate(end);
                Cow::Owned(v)
            }
        };
    }
    if content.is_empty() {
        return;
    }

    let whitespace_only = content.iter().all(|&b| is_xml_whitespace(b));
    let decoded = match unescape_into(content.clone()) {
        Ok(d) => d,
        Err(e) => {
            out.push(Event::Error { kind: "escape_error", message: e.to_string(), position });
            content
        }
    };

    if whitespace_only {
        if config.emit_space {
            out.push(Event::Space { content: decoded, position });
        } else if config.emit_characters {
            out.push(Event::Characters { content: decoded, position });
        }
    } else if config.emit_characters {
        out.push(Event::Characters { content: decoded, position });
    }
}

fn emit_pi<'a>(span: &Span<'a>, position: Position, config: &Config, out: &mut Vec<Event<'a>>) {
    let bytes = &span.bytes;
    let inner = strip(bytes, 2, 2); // `<?` / `?>`
    let (target, rest) = split_name_and_attrs(inner);
    if target.eq_ignore_ascii_case(b"xml") {
        if config.emit_prolog {
            let attrs = normalize_attr_values(lift_attrs(span, parse_attributes(Mode::Xml, rest)));
            let mut errors = Vec::new();
            let attrs = decode_attr_values(attrs, config, &mut errors);
            out.push(Event::Prolog { target: "xml", attributes: attrs, position });
            for message in errors {
                out.push(Event::Error { kind: "escape_error", message, position });
            }
        }
        return;
    }
    if config.emit_processing_instruction {
        let data = trim_whitespace(rest);
        out.push(Event::ProcessingInstruction {
            target: QName::new(owned_or_borrowed(span, target)),
            data: to_content(span, data),
            position,
        });
    }
}

fn emit_tag<'a>(span: &Span<'a>, position: Position, config: &Config, out: &mut Vec<Event<'a>>, empty: bool) {
    let bytes = &span.bytes;
    let end = if empty { bytes.len() - 2 } else { bytes.len() - 1 }; // strip trailing `/>` or `>`
    let inner = &bytes[1..end];
    let (name, attrs_raw) = split_name_and_attrs(inner);
    let attrs = normalize_attr_values(lift_attrs(span, parse_attributes(config.mode, attrs_raw)));
    let mut errors = Vec::new();
    let attrs = decode_attr_values(attrs, config, &mut errors);
    let name = owned_or_borrowed(span, name);
    out.push(Event::StartElement { name: QName::new(name), attributes: attrs, position });
    for message in errors {
        out.push(Event::Error { kind: "escape_error", message, position });
    }
    if empty {
        out.push(Event::EndElement { name: QName::new(name), position });
    }
}

fn strip(bytes: &[u8], prefix: usize, suffix: usize) -> &[u8] {
    &bytes[prefix..bytes.len() - suffix]
}

/// Re-anchors a sub-slice of `span.bytes` onto `span`'s own lifetime `'a`:
/// zero-copy when the span was borrowed, a fresh owned buffer otherwise.
fn to_content<'a>(span: &Span<'a>, slice: &[u8]) -> Content<'a> {
    match &span.bytes {
        Cow::Borrowed(full) => {
            let offset = slice.as_ptr() as usize - full.as_ptr() as usize;
            Cow::Borrowed(&full[offset..offset + slice.len()])
        }
        Cow::Owned(_) => Cow::Owned(slice.to_vec()),
    }
}

/// Like [`to_content`] but for plain name slices (`QName` only ever
/// borrows). A name that straddled a chunk boundary in [`ChunkedTokenizer`]
/// cannot be re-anchored onto `'a` without copying past this call's borrow;
/// that copy is leaked rather than dropped. Pathological — element/attribute
/// names are short and rarely straddle a chunk a caller chose themselves —
/// and recorded in `DESIGN.md`.
fn owned_or_borrowed<'a>(span: &Span<'a>, slice: &[u8]) -> &'a [u8] {
    match &span.bytes {
        Cow::Borrowed(full) => {
            let offset = slice.as_ptr() as usize - full.as_ptr() as usize;
            &full[offset..offset + slice.len()]
        }
        Cow::Owned(_) => Box::leak(slice.to_vec().into_boxed_slice()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineending::normalize;
    use pretty_assertions::assert_eq;

    fn events(xml: &[u8], config: &Config) -> Vec<Event<'static>> {
        let normalized = normalize(xml).into_owned().leak();
        Tokenizer::from_slice(normalized, config).collect()
    }

    #[test]
    fn simple_document_round_trips_into_events() {
        let config = Config::default();
        let evs = events(b"<a attr=\"v\">text<b/></a>", &config);
        let kinds: Vec<&str> = evs
            .iter()
            .map(|e| match e {
                Event::StartDocument { .. } => "start_document",
                Event::EndDocument { .. } => "end_document",
                Event::StartElement { .. } => "start",
                Event::EndElement { .. } => "end",
                Event::Characters { .. } => "chars",
                Event::Space { .. } => "space",
                Event::Error { .. } => "error",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["start_document", "start", "chars", "start", "end", "end", "end_document"]);
    }

    #[test]
    fn attribute_entities_are_decoded_by_default() {
        let config = Config::default();
        let evs = events(b"<a v=\"1 &amp; 2\"/>", &config);
        match &evs[1] {
            Event::StartElement { attributes, .. } => assert_eq!(&*attributes[0].value, b"1 & 2"),
            other => panic!("expected StartElement, got {:?}", other),
        }
    }

    #[test]
    fn prolog_is_recognized_and_separated_from_ordinary_pi() {
        let config = Config::default();
        let evs = events(b"<?xml version=\"1.0\"?><?style sheet?><a/>", &config);
        assert!(matches!(evs[1], Event::Prolog { target: "xml", .. }));
        assert!(matches!(evs[2], Event::ProcessingInstruction { .. }));
    }

    #[test]
    fn whitespace_only_run_demotes_to_characters_when_space_is_disabled() {
        let mut config = Config::default();
        config.disable(&["space"]);
        let evs = events(b"<a>   </a>", &config);
        assert!(matches!(evs[1], Event::StartElement { .. }));
        assert!(matches!(evs[2], Event::Characters { .. }));
    }

    #[test]
    fn invalid_bang_markup_resyncs_at_next_angle_bracket() {
        let config = Config::default();
        let evs = events(b"<a><!bogus><b/></a>", &config);
        assert!(evs.iter().any(|e| matches!(e, Event::Error { .. })));
        assert!(evs.iter().any(|e| matches!(e, Event::StartElement { name, .. } if name.as_bytes() == b"b")));
    }

    #[test]
    fn html_raw_text_element_is_scanned_verbatim() {
        let config = Config::html();
        let evs = events(b"<script>if (a<b) {}</script>", &config);
        let text = evs.iter().find_map(|e| match e {
            Event::Characters { content, .. } => Some(content.clone()),
            _ => None,
        });
        assert_eq!(text.unwrap().as_ref(), b"if (a<b) {}");
        assert!(evs.iter().any(|e| matches!(e, Event::EndElement { name, .. } if name.as_bytes() == b"script")));
    }

    #[test]
    fn html_boolean_and_unquoted_attributes_are_accepted() {
        let config = Config::html();
        let evs = events(b"<input disabled value=yes>", &config);
        match &evs[1] {
            Event::StartElement { attributes, .. } => {
                assert_eq!(attributes[0].name.as_bytes(), b"disabled");
                assert_eq!(&*attributes[0].value, b"");
                assert_eq!(attributes[1].name.as_bytes(), b"value");
                assert_eq!(&*attributes[1].value, b"yes");
            }
            other => panic!("expected StartElement, got {:?}", other),
        }
    }
}
