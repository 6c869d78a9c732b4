//! A streaming XML 1.0 tokenizer.
//!
//! ## Description
//!
//! - [`reader::Tokenizer`]: turns a whole buffer into a lazy sequence of
//!   [`events::Event`]s — element opens/closes, text, CDATA, comments,
//!   processing instructions, the prolog, and DTD passthrough — copying as
//!   little of the input as possible.
//! - [`reader::ChunkedTokenizer`]: the same tokenizer for input arriving as
//!   an iterator of byte chunks, with bounded buffering across chunk
//!   boundaries.
//! - [`namespace`]: resolves `prefix:local` names against an `xmlns` scope
//!   stack into `(uri, local)` pairs, independent of the tokenizer itself.
//! - [`validate`]: well-formedness (tag matching), attribute uniqueness,
//!   character-range, and comment-content checks as composable `Iterator`
//!   adapters over the event stream.
//!
//! ## Example
//!
//! ```rust
//! use xml_tokenize::config::Config;
//! use xml_tokenize::events::Event;
//! use xml_tokenize::lineending::normalize;
//! use xml_tokenize::reader::Tokenizer;
//!
//! let xml = b"<root><child>hello</child></root>";
//! let normalized = normalize(xml);
//! let config = Config::default();
//!
//! let mut depth = 0;
//! for event in Tokenizer::from_slice(&normalized, &config) {
//!     match event {
//!         Event::StartElement { .. } => depth += 1,
//!         Event::EndElement { .. } => depth -= 1,
//!         _ => {}
//!     }
//! }
//! assert_eq!(depth, 0);
//! ```
//!
//! ## Scope
//!
//! This crate does not build a DOM, expand DTD-declared entities, load an
//! external DTD subset, interpret XML Schema types, or accept UTF-16 input.
//! Those are explicitly external collaborators; this crate's job is the
//! event-producing tokenizer and the validation/namespace layers that
//! consume its event stream.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod chars;
pub mod chunk;
pub mod config;
pub mod errors;
pub mod escape;
pub mod events;
pub mod lineending;
mod litmatch;
pub mod namespace;
mod parser;
pub mod position;
pub mod reader;
mod utils;
pub mod validate;

// reexports
pub use errors::{Error, Result};
pub use events::Event;
pub use reader::{ChunkedTokenizer, Tokenizer};
