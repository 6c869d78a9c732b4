//! Tokenizer and validator configuration.
//!
//! The source this crate is modeled on generates parser variants for the
//! `{disable, edition, mode}` cartesian product via macros; here a single
//! [`Config`] value is consulted at the tokenizer's hot-loop boundaries
//! instead; see `DESIGN.md` for the rationale.

use crate::chars::Edition;
use std::collections::HashSet;

/// Strict XML vs. permissive HTML tokenization.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    /// Attribute values must be quoted; no raw-text elements.
    Xml,
    /// Unquoted and boolean attributes are accepted; [`Config::raw_text_elements`]
    /// switches the tokenizer into verbatim content mode.
    Html,
}

/// Whether every event carries a [`crate::position::Position`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Positions {
    /// Track and attach a position to every event (the default).
    Full,
    /// Skip position tracking entirely. Saves the per-byte line/column
    /// bookkeeping when a caller has no use for it.
    None,
}

/// The complete set of tokenizer-construction options from the external
/// interface: edition, mode, per-kind event suppression, position tracking,
/// and attribute entity decoding.
#[derive(Debug, Clone)]
pub struct Config {
    /// Which XML edition's `Char`/`NameStartChar`/`NameChar` productions to
    /// enforce (see [`crate::chars::Edition`]).
    pub edition: Edition,
    /// Strict XML or permissive HTML tokenization.
    pub mode: Mode,
    /// In [`Mode::Html`], element names whose content is consumed verbatim
    /// until a matching end tag (case-insensitively).
    pub raw_text_elements: HashSet<Vec<u8>>,
    /// Emit whitespace-only text runs as [`crate::events::Event::Space`]
    /// rather than downgrading them to [`crate::events::Event::Characters`].
    pub emit_space: bool,
    /// Emit [`crate::events::Event::Comment`] for `<!-- ... -->`.
    pub emit_comment: bool,
    /// Emit [`crate::events::Event::CData`] for `<![CDATA[ ... ]]>`.
    pub emit_cdata: bool,
    /// Emit [`crate::events::Event::Prolog`] for `<?xml ...?>`.
    pub emit_prolog: bool,
    /// Emit [`crate::events::Event::Characters`]/[`crate::events::Event::Space`]
    /// for text runs at all. Disabling this is what reaches structural-only
    /// mode together with the other `emit_*` flags.
    pub emit_characters: bool,
    /// Emit [`crate::events::Event::ProcessingInstruction`] for non-`xml` PIs.
    pub emit_processing_instruction: bool,
    /// Whether every event carries a populated [`crate::position::Position`].
    pub positions: Positions,
    /// Whether the tokenizer itself decodes the five predefined entities and
    /// numeric character references inside attribute values (as opposed to
    /// leaving that to a post-pass over the raw attribute value).
    pub decode_attr_entities: bool,
    /// Strip leading XML whitespace from a text run; a run left empty after
    /// trimming is not emitted at all.
    pub trim_text_start: bool,
    /// Strip trailing XML whitespace from a text run; a run left empty after
    /// trimming is not emitted at all.
    pub trim_text_end: bool,
    /// Skip leading/trailing whitespace around a closing tag's name (`</a >`).
    /// XML itself requires this; kept as a knob because the teacher exposes
    /// the equivalent as a reader setting rather than baking it in.
    pub trim_markup_names_in_closing_tags: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            edition: Edition::Fifth,
            mode: Mode::Xml,
            raw_text_elements: HashSet::new(),
            emit_space: true,
            emit_comment: true,
            emit_cdata: true,
            emit_prolog: true,
            emit_characters: true,
            emit_processing_instruction: true,
            positions: Positions::Full,
            decode_attr_entities: true,
            trim_text_start: false,
            trim_text_end: false,
            trim_markup_names_in_closing_tags: true,
        }
    }
}

impl Config {
    /// An HTML-mode config with the conventional `script`/`style` raw-text
    /// elements pre-registered.
    pub fn html() -> Self {
        let mut raw_text_elements = HashSet::new();
        raw_text_elements.insert(b"script".to_vec());
        raw_text_elements.insert(b"style".to_vec());
        Config {
            mode: Mode::Html,
            raw_text_elements,
            ..Config::default()
        }
    }

    /// Suppresses emission of the named event kinds. Recognizes `space`,
    /// `comment`, `cdata`, `prolog`, `characters`, `processing_instruction`;
    /// unknown names are ignored.
    ///
    /// Structural-only mode (`start_element`/`end_element` only) is reached
    /// by disabling all six.
    pub fn disable(&mut self, kinds: &[&str]) -> &mut Self {
        for &kind in kinds {
            match kind {
                "space" => self.emit_space = false,
                "comment" => self.emit_comment = false,
                "cdata" => self.emit_cdata = false,
                "prolog" => self.emit_prolog = false,
                "characters" => self.emit_characters = false,
                "processing_instruction" => self.emit_processing_instruction = false,
                _ => {}
            }
        }
        self
    }

    /// Whether `name` should be treated as a raw-text element in HTML mode.
    pub fn is_raw_text_element(&self, name: &[u8]) -> bool {
        self.mode == Mode::Html
            && self
                .raw_text_elements
                .iter()
                .any(|n| n.eq_ignore_ascii_case(name))
    }
}

/// Shared error-handling policy for the [`crate::validate`] and
/// [`crate::namespace`] layers.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorPolicy {
    /// Abort the stream with a typed error on the first violation.
    Raise,
    /// Emit an [`crate::events::Event::Error`] and keep going.
    Emit,
    /// Drop the offending event (or its content) and keep going.
    Skip,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn disable_maps_structural_only() {
        let mut c = Config::default();
        c.disable(&[
            "space",
            "comment",
            "cdata",
            "prolog",
            "characters",
            "processing_instruction",
        ]);
        assert!(!c.emit_space);
        assert!(!c.emit_comment);
        assert!(!c.emit_cdata);
        assert!(!c.emit_prolog);
        assert!(!c.emit_characters);
        assert!(!c.emit_processing_instruction);
    }

    #[test]
    fn html_preset_registers_script_and_style() {
        let c = Config::html();
        assert!(c.is_raw_text_element(b"SCRIPT"));
        assert!(c.is_raw_text_element(b"style"));
        assert!(!c.is_raw_text_element(b"div"));
    }
}
