//! Lookahead token cursor with mark/rewind
//!
//! The parser keeps one token of lookahead (`previous`, `next`) over the
//! scanner. Delimiter-terminated constructs (inline code, code blocks,
//! link labels) are parsed speculatively: take a [`Mark`], consume tokens
//! until the terminator or end of input, then either commit or rewind.
//! Rewinding pushes the consumed tokens back onto a FIFO replay queue, so
//! the logical token stream is always the replay queue followed by the
//! scanner's remaining output.
//!
//! Invariant: after a rewind, the replay queue plus unconsumed scanner
//! output is token-for-token identical to never having speculated. The
//! scanner is never re-invoked for a token it has already produced.

use std::collections::VecDeque;

use crate::sidemark::lexer::{Scanner, Token, TokenKind};

/// A snapshot the cursor can rewind to. Marks nest; an inner speculative
/// parse may fail and rewind while an outer one is still undecided.
#[derive(Debug)]
pub struct Mark<'a> {
    log_pos: usize,
    previous: Option<Token<'a>>,
}

#[derive(Debug)]
pub struct TokenCursor<'a> {
    scanner: Scanner<'a>,
    previous: Option<Token<'a>>,
    next: Token<'a>,
    replay: VecDeque<Token<'a>>,
    /// Tokens consumed while at least one mark is outstanding, in order.
    log: Vec<Token<'a>>,
    active_marks: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut scanner = Scanner::new(source);
        let next = scanner.scan();
        Self {
            scanner,
            previous: None,
            next,
            replay: VecDeque::new(),
            log: Vec::new(),
            active_marks: 0,
        }
    }

    /// The next logical token, without consuming it.
    pub fn peek(&self) -> Token<'a> {
        self.next
    }

    /// Peek the kind of the next logical token.
    pub fn check(&self, kind: TokenKind) -> bool {
        self.next.kind == kind
    }

    /// Kind of the most recently consumed token, if any.
    pub fn previous_kind(&self) -> Option<TokenKind> {
        self.previous.map(|t| t.kind)
    }

    /// Consume and return the current next token, promoting it to previous.
    pub fn consume(&mut self) -> Token<'a> {
        let consumed = self.next;
        self.previous = Some(consumed);
        self.next = match self.replay.pop_front() {
            Some(token) => token,
            None => self.scanner.scan(),
        };
        if self.active_marks > 0 {
            self.log.push(consumed);
        }
        consumed
    }

    /// Begin a speculative parse. Must be balanced by exactly one of
    /// [`commit`](Self::commit) or [`rewind`](Self::rewind).
    pub fn mark(&mut self) -> Mark<'a> {
        self.active_marks += 1;
        Mark {
            log_pos: self.log.len(),
            previous: self.previous,
        }
    }

    /// The tokens consumed since `mark` was taken.
    pub fn recorded(&self, mark: &Mark<'a>) -> &[Token<'a>] {
        &self.log[mark.log_pos..]
    }

    /// The raw source text consumed since `mark` was taken.
    pub fn recorded_text(&self, mark: &Mark<'a>) -> String {
        self.recorded(mark).iter().map(|t| t.text).collect()
    }

    /// Accept the speculative parse, discarding its recording.
    pub fn commit(&mut self, _mark: Mark<'a>) {
        self.active_marks -= 1;
        if self.active_marks == 0 {
            self.log.clear();
        }
    }

    /// Abandon the speculative parse, restoring the exact token sequence
    /// seen since the mark. The lookahead token is requeued behind the
    /// recorded tokens, preserving order.
    pub fn rewind(&mut self, mark: Mark<'a>) {
        let tokens = self.log.split_off(mark.log_pos);
        self.replay.push_front(self.next);
        for token in tokens.into_iter().rev() {
            self.replay.push_front(token);
        }

        // Non-empty: the old lookahead token was just requeued.
        if let Some(front) = self.replay.pop_front() {
            self.next = front;
        }
        self.previous = mark.previous;
        self.active_marks -= 1;
        if self.active_marks == 0 {
            self.log.clear();
        }
    }
}
