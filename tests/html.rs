//! [`xml_tokenize::config::Mode::Html`] scenarios: raw-text elements,
//! unquoted/boolean attributes, and the permissive rules that only apply in
//! HTML mode.

use pretty_assertions::assert_eq;
use xml_tokenize::config::Config;
use xml_tokenize::events::Event;
use xml_tokenize::lineending::normalize;
use xml_tokenize::reader::Tokenizer;

fn tokenize_html(xml: &[u8]) -> Vec<Event<'static>> {
    let normalized: &'static [u8] = normalize(xml).into_owned().leak();
    Tokenizer::from_slice(normalized, &Config::html()).collect()
}

#[test]
fn script_content_is_scanned_verbatim_despite_embedded_angle_brackets() {
    let events = tokenize_html(b"<script>var x = a < b && b > c;</script>");
    let text = events.iter().find_map(|e| match e {
        Event::Characters { content, .. } => Some(content.clone()),
        _ => None,
    });
    assert_eq!(text.unwrap().as_ref(), &b"var x = a < b && b > c;"[..]);
    assert!(events.iter().any(|e| matches!(e, Event::EndElement { name, .. } if name.as_bytes() == b"script")));
}

#[test]
fn style_content_is_also_treated_as_raw_text() {
    let events = tokenize_html(b"<style>a::before { content: \"<\"; }</style>");
    let text = events.iter().find_map(|e| match e {
        Event::Characters { content, .. } => Some(content.clone()),
        _ => None,
    });
    assert_eq!(text.unwrap().as_ref(), &b"a::before { content: \"<\"; }"[..]);
}

#[test]
fn unquoted_attribute_value_is_accepted() {
    let events = tokenize_html(b"<input type=text value=30>");
    match &events[1] {
        Event::StartElement { attributes, .. } => {
            assert_eq!(attributes[0].name.as_bytes(), b"type");
            assert_eq!(&*attributes[0].value, b"text");
            assert_eq!(attributes[1].name.as_bytes(), b"value");
            assert_eq!(&*attributes[1].value, b"30");
        }
        other => panic!("expected StartElement, got {:?}", other),
    }
}

#[test]
fn boolean_attribute_with_no_value_is_accepted_as_an_empty_string() {
    let events = tokenize_html(b"<input disabled readonly>");
    match &events[1] {
        Event::StartElement { attributes, .. } => {
            assert_eq!(attributes[0].name.as_bytes(), b"disabled");
            assert_eq!(&*attributes[0].value, b"");
            assert_eq!(attributes[1].name.as_bytes(), b"readonly");
            assert_eq!(&*attributes[1].value, b"");
        }
        other => panic!("expected StartElement, got {:?}", other),
    }
}

#[test]
fn non_raw_text_elements_are_still_tokenized_normally_in_html_mode() {
    let events = tokenize_html(b"<div><p>hello</p></div>");
    let kinds: Vec<&str> = events
        .iter()
        .map(|e| match e {
            Event::StartElement { .. } => "start",
            Event::EndElement { .. } => "end",
            Event::Characters { .. } => "chars",
            _ => "other",
        })
        .filter(|k| *k != "other")
        .collect();
    assert_eq!(kinds, vec!["start", "start", "chars", "end", "end"]);
}

#[test]
fn raw_text_element_match_is_case_insensitive() {
    let events = tokenize_html(b"<SCRIPT>a<b</SCRIPT>");
    assert!(events.iter().any(|e| matches!(e, Event::EndElement { name, .. } if name.as_bytes().eq_ignore_ascii_case(b"script"))));
}
