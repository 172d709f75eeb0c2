//! Parser entry points and options

use serde::{Deserialize, Serialize};

use crate::sidemark::ast::Document;
use crate::sidemark::reference::ReferenceTable;

use super::cursor::TokenCursor;

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Maximum nesting depth for recursive constructs (emphasis, bracketed
    /// spans, list levels). Past the limit the delimiter is treated as
    /// literal text; deep input degrades instead of exhausting the stack.
    pub max_nesting_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: 32,
        }
    }
}

/// The result of a parse: the document tree plus the sealed reference
/// table. Cross-references are not yet resolved; run
/// [`crate::sidemark::reference::resolve_references`] over the pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseOutput {
    pub document: Document,
    pub references: ReferenceTable,
}

/// Parser state: the token cursor, the reference table being built, and
/// nesting counters. One instance per parse; not reusable.
pub(crate) struct Parser<'a> {
    pub(crate) cursor: TokenCursor<'a>,
    pub(crate) references: ReferenceTable,
    pub(crate) options: ParseOptions,
    pub(crate) bracket_depth: usize,
    pub(crate) list_depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(source: &'a str, options: ParseOptions) -> Self {
        Self {
            cursor: TokenCursor::new(source),
            references: ReferenceTable::new(),
            options,
            bracket_depth: 0,
            list_depth: 0,
        }
    }
}

/// Parse a sidemark document with default options.
///
/// Total: every input string yields a tree. Malformed markup degrades to
/// literal text, never an error.
pub fn parse_document(source: &str) -> ParseOutput {
    parse_document_with(source, ParseOptions::default())
}

/// Parse a sidemark document with explicit options.
pub fn parse_document_with(source: &str, options: ParseOptions) -> ParseOutput {
    Parser::new(source, options).document()
}
