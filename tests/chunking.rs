//! Chunk-boundary behavior: the same document fed through
//! [`xml_tokenize::reader::ChunkedTokenizer`] one byte at a time, split at
//! every possible boundary, or all at once through
//! [`xml_tokenize::reader::Tokenizer`] must agree on the structural event
//! sequence it produces.

use pretty_assertions::assert_eq;
use xml_tokenize::chunk::{ChunkBuffer, ConstructKind};
use xml_tokenize::config::Config;
use xml_tokenize::events::Event;
use xml_tokenize::reader::{ChunkedTokenizer, Tokenizer};

fn structural_kinds(events: &[Event]) -> Vec<&'static str> {
    events
        .iter()
        .map(|e| match e {
            Event::StartElement { .. } => "start",
            Event::EndElement { .. } => "end",
            Event::Characters { .. } | Event::Space { .. } => "text",
            Event::Comment { .. } => "comment",
            Event::CData { .. } => "cdata",
            Event::Prolog { .. } => "prolog",
            Event::Dtd { .. } => "dtd",
            Event::ProcessingInstruction { .. } => "pi",
            Event::Error { .. } => "error",
            Event::StartDocument { .. } | Event::EndDocument { .. } => "doc",
        })
        .collect()
}

fn chunked_events(xml: &[u8], config: &Config, chunk_at: usize) -> Vec<Event<'static>> {
    let mut tokenizer = ChunkedTokenizer::new(config.clone());
    let mut out = Vec::new();
    let (first, second) = xml.split_at(chunk_at.min(xml.len()));
    for chunk in [first, second] {
        if chunk.is_empty() {
            continue;
        }
        let events = tokenizer.feed(chunk).expect("well-formed input should not error");
        out.extend(events.into_iter().map(|e| owned(e)));
    }
    out.extend(tokenizer.finish());
    out
}

fn owned(event: Event<'_>) -> Event<'static> {
    // Force every borrowed span onto 'static by copying, purely so this
    // test file can collect results from chunks of differing lifetimes
    // into one Vec for comparison.
    match event {
        Event::StartElement { name, attributes, position } => Event::StartElement {
            name: xml_tokenize::events::QName::new(name.as_bytes().to_vec().leak()),
            attributes: attributes
                .into_iter()
                .map(|a| xml_tokenize::events::Attribute {
                    name: xml_tokenize::events::QName::new(a.name.as_bytes().to_vec().leak()),
                    value: std::borrow::Cow::Owned(a.value.to_vec()),
                })
                .collect(),
            position,
        },
        Event::EndElement { name, position } => Event::EndElement {
            name: xml_tokenize::events::QName::new(name.as_bytes().to_vec().leak()),
            position,
        },
        Event::Characters { content, position } => Event::Characters { content: std::borrow::Cow::Owned(content.to_vec()), position },
        Event::Space { content, position } => Event::Space { content: std::borrow::Cow::Owned(content.to_vec()), position },
        Event::CData { content, position } => Event::CData { content: std::borrow::Cow::Owned(content.to_vec()), position },
        Event::Comment { content, position } => Event::Comment { content: std::borrow::Cow::Owned(content.to_vec()), position },
        Event::Dtd { content, position } => Event::Dtd { content: std::borrow::Cow::Owned(content.to_vec()), position },
        Event::Prolog { target, attributes, position } => Event::Prolog {
            target,
            attributes: attributes
                .into_iter()
                .map(|a| xml_tokenize::events::Attribute {
                    name: xml_tokenize::events::QName::new(a.name.as_bytes().to_vec().leak()),
                    value: std::borrow::Cow::Owned(a.value.to_vec()),
                })
                .collect(),
            position,
        },
        Event::ProcessingInstruction { target, data, position } => Event::ProcessingInstruction {
            target: xml_tokenize::events::QName::new(target.as_bytes().to_vec().leak()),
            data: std::borrow::Cow::Owned(data.to_vec()),
            position,
        },
        Event::Error { kind, message, position } => Event::Error { kind, message, position },
        Event::StartDocument { position } => Event::StartDocument { position },
        Event::EndDocument { position } => Event::EndDocument { position },
    }
}

#[test]
fn document_split_at_every_byte_position_yields_the_same_structural_events() {
    let config = Config::default();
    let xml = b"<root attr=\"value\"><child>some text</child><!-- note --></root>";
    let whole: Vec<Event<'static>> = {
        let leaked: &'static [u8] = xml.to_vec().leak();
        Tokenizer::from_slice(leaked, &config).collect()
    };
    let expected = structural_kinds(&whole);

    for split in 0..=xml.len() {
        let got = chunked_events(xml, &config, split);
        assert_eq!(structural_kinds(&got), expected, "mismatch splitting at byte {}", split);
    }
}

#[test]
fn tag_straddling_a_chunk_boundary_is_reassembled_before_emission() {
    let mut buf = ChunkBuffer::without_bom_detection();
    let first = buf.feed(b"<config name=\"ti").unwrap();
    assert!(first.is_empty());
    let second = buf.feed(b"meout\" value=\"30\"/>").unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].kind, ConstructKind::EmptyTag);
    assert_eq!(&*second[0].bytes, &b"<config name=\"timeout\" value=\"30\"/>"[..]);
}

#[test]
fn chunked_tokenizer_reports_unclosed_construct_through_finish() {
    let config = Config::default();
    let mut tokenizer = ChunkedTokenizer::new(config);
    tokenizer.feed(b"<a><!-- never").unwrap();
    let final_events = tokenizer.finish();
    assert!(matches!(final_events.last(), Some(Event::Error { .. })));
    assert!(matches!(final_events.first(), Some(Event::Comment { content, .. }) if &**content == b" never"));
}
