//! Lexer module for the sidemark format
//!
//! The scanner is a one-shot, forward-only cursor over the source text. It
//! has no backtracking of its own; speculative parsing is handled one layer
//! up by the parser's token cursor, which replays tokens the scanner has
//! already produced rather than re-invoking it.
//!
//! Several token kinds are disambiguated by a short character lookahead at
//! scan time: a `=` run is only a header marker when followed by a space,
//! `+`/`#` runs are only list markers when followed by a space, and `$<key>`
//! / `>$key` forms fall back to plain word spans when the key is not
//! alphanumeric. The parser never has to revisit these decisions.

pub mod scanner;
pub mod tokens;

pub use scanner::Scanner;
pub use tokens::{Token, TokenKind};

/// Scan an entire source string into tokens, excluding the terminal
/// end-of-input token. Mostly useful for tests and diagnostics; the parser
/// pulls tokens lazily from [`Scanner`] instead.
pub fn scan_all(source: &str) -> Vec<Token<'_>> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();

    loop {
        let token = scanner.scan();
        if token.kind == TokenKind::Eof {
            return tokens;
        }
        tokens.push(token);
    }
}
