//! End-to-end tokenization scenarios driving [`xml_tokenize::reader::Tokenizer`]
//! directly over whole documents.

use pretty_assertions::assert_eq;
use xml_tokenize::config::Config;
use xml_tokenize::events::Event;
use xml_tokenize::lineending::normalize;
use xml_tokenize::reader::Tokenizer;

fn tokenize(xml: &[u8], config: &Config) -> Vec<Event<'static>> {
    let normalized: &'static [u8] = normalize(xml).into_owned().leak();
    Tokenizer::from_slice(normalized, config).collect()
}

fn kinds(events: &[Event]) -> Vec<&'static str> {
    events
        .iter()
        .map(|e| match e {
            Event::StartDocument { .. } => "start_document",
            Event::EndDocument { .. } => "end_document",
            Event::Prolog { .. } => "prolog",
            Event::Dtd { .. } => "dtd",
            Event::StartElement { .. } => "start",
            Event::EndElement { .. } => "end",
            Event::Characters { .. } => "chars",
            Event::Space { .. } => "space",
            Event::CData { .. } => "cdata",
            Event::Comment { .. } => "comment",
            Event::ProcessingInstruction { .. } => "pi",
            Event::Error { .. } => "error",
        })
        .collect()
}

#[test]
fn simple_nesting_produces_balanced_start_end_pairs() {
    let config = Config::default();
    let events = tokenize(b"<root><child>hello</child></root>", &config);
    assert_eq!(
        kinds(&events),
        vec!["start_document", "start", "start", "chars", "end", "end", "end_document"]
    );
}

#[test]
fn self_closing_element_with_attributes_expands_to_start_end_pair() {
    let config = Config::default();
    let events = tokenize(b"<root><leaf id=\"1\" name=\"x\"/></root>", &config);
    match &events[2] {
        Event::StartElement { name, attributes, .. } => {
            assert_eq!(name.as_bytes(), b"leaf");
            assert_eq!(attributes.len(), 2);
            assert_eq!(attributes[0].name.as_bytes(), b"id");
            assert_eq!(&*attributes[0].value, b"1");
            assert_eq!(attributes[1].name.as_bytes(), b"name");
            assert_eq!(&*attributes[1].value, b"x");
        }
        other => panic!("expected StartElement, got {:?}", other),
    }
    assert!(matches!(events[3], Event::EndElement { .. }));
}

#[test]
fn comment_with_leading_and_trailing_text_preserves_content() {
    let config = Config::default();
    let events = tokenize(b"<a><!-- a note --></a>", &config);
    match &events[2] {
        Event::Comment { content, .. } => assert_eq!(&**content, b" a note "),
        other => panic!("expected Comment, got {:?}", other),
    }
}

#[test]
fn prolog_is_separated_from_the_element_tree() {
    let config = Config::default();
    let events = tokenize(b"<?xml version=\"1.0\" encoding=\"UTF-8\"?><root/>", &config);
    match &events[1] {
        Event::Prolog { target, attributes, .. } => {
            assert_eq!(*target, "xml");
            assert_eq!(attributes[0].name.as_bytes(), b"version");
            assert_eq!(attributes[1].name.as_bytes(), b"encoding");
        }
        other => panic!("expected Prolog, got {:?}", other),
    }
    assert!(matches!(events[2], Event::StartElement { .. }));
}

#[test]
fn doctype_is_passed_through_without_interpretation() {
    let config = Config::default();
    let events = tokenize(b"<!DOCTYPE root SYSTEM \"root.dtd\"><root/>", &config);
    match &events[1] {
        Event::Dtd { content, .. } => assert_eq!(&**content, &b"root SYSTEM \"root.dtd\""[..]),
        other => panic!("expected Dtd, got {:?}", other),
    }
}

#[test]
fn cdata_content_is_not_entity_decoded() {
    let config = Config::default();
    let events = tokenize(b"<a><![CDATA[1 &amp; 2 < 3]]></a>", &config);
    match &events[2] {
        Event::CData { content, .. } => assert_eq!(&**content, &b"1 &amp; 2 < 3"[..]),
        other => panic!("expected CData, got {:?}", other),
    }
}

#[test]
fn an_xml_character_the_char_production_excludes_surfaces_as_an_error() {
    // 0x01 is a control character outside the `Char` production in both
    // editions; the tokenizer itself does not reject it (that is the
    // `validate::CharacterValidity` layer's job), but it must still pass
    // the byte through rather than panic.
    let config = Config::default();
    let events = tokenize(b"<a>bad\x01char</a>", &config);
    match &events[2] {
        Event::Characters { content, .. } => assert_eq!(&**content, &b"bad\x01char"[..]),
        other => panic!("expected Characters, got {:?}", other),
    }
}

#[test]
fn positions_are_monotonically_non_decreasing_across_the_stream() {
    let config = Config::default();
    let events = tokenize(b"<a>\n<b>\n<c/>\n</b>\n</a>", &config);
    let mut last = 0;
    for event in &events {
        let offset = event.position().absolute_offset();
        assert!(offset >= last, "position went backwards: {} < {}", offset, last);
        last = offset;
    }
}

#[test]
fn mismatched_end_tag_is_reported_as_a_syntax_level_passthrough() {
    // The tokenizer itself does not enforce tag matching (that is
    // `validate::WellFormed`'s job); it must still emit both tags verbatim
    // so a downstream validator has something to check.
    let config = Config::default();
    let events = tokenize(b"<a><b></c></a>", &config);
    assert!(events.iter().any(|e| matches!(e, Event::StartElement { name, .. } if name.as_bytes() == b"b")));
    assert!(events.iter().any(|e| matches!(e, Event::EndElement { name, .. } if name.as_bytes() == b"c")));
}

#[test]
fn unclosed_comment_at_eof_ends_the_stream_with_an_error() {
    let config = Config::default();
    let events = tokenize(b"<a><!-- never closed", &config);
    assert!(matches!(events.last(), Some(Event::Error { .. })));
}
