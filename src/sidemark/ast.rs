//! AST definitions for the sidemark format
//!
//! The parser produces a tree of typed nodes rather than markup text, so any
//! rendering surface can consume it. The HTML projection in
//! [`crate::sidemark::formats::html`] is one possible serializer, not part
//! of the core contract.

pub mod block;
pub mod document;
pub mod inline;

pub use block::{Aside, Block, List, ListItem, ListKind, Paragraph};
pub use document::{Document, Segment};
pub use inline::{plain_text, EmphasisStyle, Inline};
