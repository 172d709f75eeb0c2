//! Scanner implementation for the sidemark format

use super::tokens::{Token, TokenKind};

fn char_is_alnum(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Characters that may appear inside a word span. Everything else either
/// delimits inline syntax or is whitespace.
fn char_is_safe(c: char) -> bool {
    !matches!(c, ' ' | '\n' | '*' | '~' | '`' | '\\' | '[' | ']')
}

/// A forward-only cursor over the source that produces one token per call
/// to [`Scanner::scan`]. Returns the `Eof` token at end of input and keeps
/// returning it on repeated calls.
#[derive(Debug)]
pub struct Scanner<'a> {
    source: &'a str,
    /// Byte offset where the current token started.
    start: usize,
    /// Byte offset of the read position.
    current: usize,
    line: u32,
    column: u32,
    /// Position captured at the start of the current token.
    token_line: u32,
    token_column: u32,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line: 1,
            column: 0,
            token_line: 1,
            token_column: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.current..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn make_token(&self, kind: TokenKind) -> Token<'a> {
        Token {
            kind,
            line: self.token_line,
            column: self.token_column,
            text: &self.source[self.start..self.current],
        }
    }

    fn word_span(&mut self) -> Token<'a> {
        while matches!(self.peek(), Some(c) if char_is_safe(c)) {
            self.advance();
        }
        self.make_token(TokenKind::WordSpan)
    }

    /// `$` was consumed; recognize `$<key>` with an alphanumeric key, or
    /// fall back to a word span.
    fn check_select(&mut self) -> Token<'a> {
        if self.peek() == Some('<') {
            if !matches!(self.peek_next(), Some(c) if char_is_alnum(c)) {
                return self.word_span();
            }

            self.advance();
            self.advance();

            while matches!(self.peek(), Some(c) if char_is_alnum(c)) {
                self.advance();
            }

            if self.peek() == Some('>') {
                self.advance();
                return self.make_token(TokenKind::Select);
            }
        }

        self.word_span()
    }

    /// `>` was consumed; recognize `>$key` with an alphanumeric key, or
    /// fall back to a word span.
    fn check_reference(&mut self) -> Token<'a> {
        if self.peek() == Some('$') {
            if !matches!(self.peek_next(), Some(c) if char_is_alnum(c)) {
                return self.word_span();
            }

            self.advance();
            self.advance();

            while matches!(self.peek(), Some(c) if char_is_alnum(c)) {
                self.advance();
            }
            return self.make_token(TokenKind::Reference);
        }

        self.word_span()
    }

    /// Produce the next token starting at the current read position.
    pub fn scan(&mut self) -> Token<'a> {
        self.start = self.current;
        self.token_line = self.line;
        self.token_column = self.column;

        let c = match self.advance() {
            Some(c) => c,
            None => return self.make_token(TokenKind::Eof),
        };

        match c {
            '\n' => {
                if self.peek() == Some('\n') {
                    self.advance();
                    self.make_token(TokenKind::ParagraphBreak)
                } else {
                    self.make_token(TokenKind::LineBreak)
                }
            }

            '~' => self.make_token(TokenKind::Tilde),
            '*' => self.make_token(TokenKind::Emphasis),
            '[' => self.make_token(TokenKind::LeftBracket),
            ']' => self.make_token(TokenKind::RightBracket),
            '$' => self.check_select(),
            '>' => self.check_reference(),

            '`' => {
                if self.peek() == Some('`') && self.peek_next() == Some('`') {
                    self.advance();
                    self.advance();
                    self.make_token(TokenKind::CodeBlock)
                } else {
                    self.make_token(TokenKind::InlineCode)
                }
            }

            '.' => {
                if self.peek() == Some('.') && self.peek_next() == Some('.') {
                    self.advance();
                    self.advance();
                    self.make_token(TokenKind::NewlineEscape)
                } else {
                    self.make_token(TokenKind::WordSpan)
                }
            }

            ' ' => {
                while self.peek() == Some(' ') {
                    self.advance();
                }
                self.make_token(TokenKind::Space)
            }

            '+' => {
                while self.peek() == Some('+') {
                    self.advance();
                }
                if self.peek() == Some(' ') {
                    self.advance();
                    self.make_token(TokenKind::UnorderedList)
                } else {
                    self.make_token(TokenKind::WordSpan)
                }
            }

            ':' => {
                if self.peek() == Some(':') && self.peek_next() == Some(' ') {
                    self.advance();
                    self.make_token(TokenKind::AsideMarker)
                } else {
                    self.make_token(TokenKind::WordSpan)
                }
            }

            '#' => {
                while self.peek() == Some('#') {
                    self.advance();
                }
                if self.peek() == Some(' ') {
                    self.advance();
                    self.make_token(TokenKind::OrderedList)
                } else {
                    self.make_token(TokenKind::WordSpan)
                }
            }

            '-' => {
                while self.peek() == Some('-') {
                    self.advance();
                }
                self.make_token(TokenKind::Hyphen)
            }

            // Header markers are at most four `=` and must be followed by a
            // space, which stays unconsumed. Anything else is literal text.
            '=' => {
                for _ in 0..4 {
                    match self.peek() {
                        Some(' ') => return self.make_token(TokenKind::HeaderMarker),
                        Some('=') => {
                            self.advance();
                        }
                        _ => return self.make_token(TokenKind::WordSpan),
                    }
                }
                self.make_token(TokenKind::WordSpan)
            }

            // Escapes: a backslash cancels any following non-space
            // character. Both characters land in one word span; rendering
            // strips the backslash.
            '\\' => {
                if matches!(self.peek(), Some(c) if !c.is_whitespace()) {
                    self.advance();
                }
                self.make_token(TokenKind::WordSpan)
            }

            _ => self.word_span(),
        }
    }
}
