//! Resumable scanners for the hot XML literal terminators (`-->`, `]]>`,
//! `?>`, a balanced `<!DOCTYPE ... >`, and a quote-aware `>`).
//!
//! Each scanner is a tiny state machine that can be fed successive byte
//! slices (chunks) and, once it finds its terminator, returns the offset one
//! past it. A small handwritten state per literal is faster and far easier
//! to resume mid-chunk than a generic substring search — see the source
//! note on hot-literal recognition this crate follows throughout.

mod bom;
mod cdata;
mod comment;
mod dtd;
mod pi;
mod quoted;

pub use bom::{BomScanner, FeedResult as BomFeedResult};
pub use cdata::CDataScanner;
pub use comment::CommentScanner;
pub use dtd::DtdScanner;
pub use pi::PiScanner;
pub use quoted::{Boundary, QuotedScanner};
