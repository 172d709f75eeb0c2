//! Token definitions for the sidemark format

/// All possible tokens in the sidemark format
///
/// Markers whose meaning depends on run length (header level, list nesting,
/// blockquote depth) carry that count in their text slice; see the helper
/// methods on [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input. Terminal: the scanner keeps returning it.
    Eof,
    /// A maximal run of space characters.
    Space,
    /// A maximal run of ordinary text characters.
    WordSpan,
    /// A single newline.
    LineBreak,
    /// Two consecutive newlines.
    ParagraphBreak,
    /// `*`
    Emphasis,
    /// A single backtick.
    InlineCode,
    /// Three backticks.
    CodeBlock,
    /// `::` followed by a space (the space is not consumed).
    AsideMarker,
    /// `...`, a context-dependent break escape / literal ellipsis.
    NewlineEscape,
    /// `~`
    Tilde,
    /// A `+` run followed by a space; run length encodes nesting.
    UnorderedList,
    /// A `#` run followed by a space; run length encodes nesting.
    OrderedList,
    /// A maximal run of `-` characters.
    Hyphen,
    /// A `=` run (at most 4) followed by a space; run length is the level.
    HeaderMarker,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `>$key`, a reference anchor declaration.
    Reference,
    /// `$<key>`, a reference selector.
    Select,
}

/// A single token: kind, position, and the raw source slice it covers.
///
/// Tokens are immutable once produced. Line numbers are 1-based; columns are
/// 0-based and reset on every newline. Positions are diagnostic only, the
/// parser never makes decisions from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub line: u32,
    pub column: u32,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    /// Header level for a `HeaderMarker` token (1-4), or list nesting level
    /// for a list marker token. List marker text includes the trailing
    /// space, so the run length is one less than the slice length.
    pub fn marker_level(&self) -> usize {
        match self.kind {
            TokenKind::HeaderMarker => self.text.len(),
            TokenKind::UnorderedList | TokenKind::OrderedList => self.text.len() - 1,
            _ => 0,
        }
    }

    /// Blockquote nesting depth for a `Hyphen` token whose run length is a
    /// multiple of 3. Returns `None` otherwise; such runs are plain text.
    pub fn quote_depth(&self) -> Option<usize> {
        if self.kind == TokenKind::Hyphen && self.text.len() % 3 == 0 {
            Some(self.text.len() / 3)
        } else {
            None
        }
    }

    /// The alphanumeric key of a `Reference` (`>$key`) or `Select`
    /// (`$<key>`) token.
    pub fn reference_key(&self) -> &'a str {
        match self.kind {
            TokenKind::Reference => &self.text[2..],
            TokenKind::Select => &self.text[2..self.text.len() - 1],
            _ => "",
        }
    }
}
