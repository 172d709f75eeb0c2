//! Parser module for the sidemark format
//!
//! The parser is a recursive-descent grammar over the scanner's token
//! stream. The block grammar drives; per line or segment of a block it
//! delegates to the inline formatter cascade. One parse owns one parser
//! instance; the instance holds all mutable state (token cursor, reference
//! table, nesting counters) and is discarded when [`api::parse_document`]
//! returns.
//!
//! Parsing is total. Unterminated delimiters are handled by speculative
//! lookahead on the [`cursor::TokenCursor`]: scan ahead for the closing
//! delimiter and, on failure, replay the consumed tokens and fall back to a
//! literal-text production.

pub mod api;
pub mod blocks;
pub mod cursor;
pub mod inline;
#[cfg(test)]
mod tests;

pub use api::{parse_document, parse_document_with, ParseOptions, ParseOutput};
pub use cursor::{Mark, TokenCursor};
