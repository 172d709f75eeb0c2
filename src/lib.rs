//! # sidemark
//!
//! A parser for the sidemark format: a lightweight, line-oriented markup
//! language with headers, emphasis, lists, blockquotes, code spans and
//! blocks, asides, hyperlinks, and cross-document references.
//!
//! Parsing is total: any finite input string produces a document tree.
//! Malformed markup degrades to literal text instead of failing.
//!
//! The primary entry point is [`parse_document`], which returns the document
//! tree together with the reference table. Cross-references are resolved
//! afterwards with [`resolve_references`], once the whole document has been
//! seen.

pub mod sidemark;

pub use sidemark::ast::{Block, Document, Inline, Segment};
pub use sidemark::parser::{parse_document, parse_document_with, ParseOptions, ParseOutput};
pub use sidemark::reference::{resolve_references, ReferenceTable};
