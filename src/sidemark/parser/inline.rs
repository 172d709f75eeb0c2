//! Inline formatter: a layered precedence cascade
//!
//! Each layer handles one precedence class and delegates inward for
//! higher-precedence constructs, in the manner of precedence climbing over
//! an expression grammar:
//!
//! 1. literal text (words, spaces, em-dash styling, URL auto-links,
//!    degraded block markers, selectors)
//! 2. inline code spans (speculative, replay on failure)
//! 3. emphasis (recursive, depth mod 4 selects the style)
//! 4. bracketed / function spans (citation rule inside blockquotes)
//!
//! The reference layer (paragraph anchors) sits in the block grammar, since
//! anchors bind to paragraphs.
//!
//! Unterminated delimiters never fail the parse: the opening delimiter is
//! rendered literally and the consumed tokens are replayed.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::sidemark::ast::{EmphasisStyle, Inline};
use crate::sidemark::lexer::TokenKind;

use super::api::Parser;

/// Strict URL shape for auto-linking: scheme or `www.` prefix, a dotted
/// hostname with at least two segments, optional path.
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://|www\.)[A-Za-z0-9]+(?:\.[A-Za-z0-9]+)+(?:/.*)?$")
        .expect("URL pattern is valid")
});

/// Two or more hyphens render as repeated em-dashes, one fewer than the
/// run length. A single hyphen stays literal.
static DASH_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"--+").expect("dash pattern is valid"));

/// A backslash cancels the syntactic role of the following character; the
/// backslash itself is dropped from output.
static ESCAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\(.)").expect("escape pattern is valid"));

fn is_punctuation(c: char) -> bool {
    matches!(c, '!' | '?' | '.' | ',' | ';' | ':')
}

fn style_dashes(text: &str) -> String {
    DASH_RUN_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            "\u{2014}".repeat(caps[0].len() - 1)
        })
        .into_owned()
}

/// Literal-layer treatment of a word span: strip escapes, style dash runs.
fn styled_word(text: &str) -> String {
    let unescaped = ESCAPE_RE.replace_all(text, "$1");
    style_dashes(&unescaped)
}

/// Append text to the output, merging with a trailing text node so the
/// tree stays free of adjacent text fragments.
pub(crate) fn push_text(out: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text(last)) = out.last_mut() {
        last.push_str(text);
    } else {
        out.push(Inline::text(text));
    }
}

/// Append a run of inline nodes, merging boundary text nodes.
pub(crate) fn append_inlines(out: &mut Vec<Inline>, inner: Vec<Inline>) {
    let mut rest = inner.into_iter();
    if let Some(first) = rest.next() {
        match first {
            Inline::Text(text) => push_text(out, &text),
            other => out.push(other),
        }
        out.extend(rest);
    }
}

/// Token kinds the literal layer consumes.
fn is_literal(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::WordSpan
            | TokenKind::Space
            | TokenKind::Tilde
            | TokenKind::Hyphen
            | TokenKind::HeaderMarker
            | TokenKind::UnorderedList
            | TokenKind::OrderedList
            | TokenKind::AsideMarker
            | TokenKind::NewlineEscape
            | TokenKind::Reference
            | TokenKind::Select
    )
}

/// Token kinds the code layer consumes: everything literal plus code
/// delimiters.
fn is_textual(kind: TokenKind) -> bool {
    is_literal(kind) || matches!(kind, TokenKind::InlineCode | TokenKind::CodeBlock)
}

/// Per-call context for the inline cascade.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InlineCtx {
    pub takes_emphasis: bool,
    pub takes_urls: bool,
    /// Set while parsing blockquote body text; enables the trailing
    /// citation form of bracketed spans.
    pub in_quote: bool,
}

impl Default for InlineCtx {
    fn default() -> Self {
        Self {
            takes_emphasis: true,
            takes_urls: true,
            in_quote: false,
        }
    }
}

impl InlineCtx {
    pub fn without_emphasis(self) -> Self {
        Self {
            takes_emphasis: false,
            ..self
        }
    }

    pub fn without_urls(self) -> Self {
        Self {
            takes_urls: false,
            ..self
        }
    }

    pub fn inside_quote(self) -> Self {
        Self {
            in_quote: true,
            ..self
        }
    }
}

/// Close an emphasis span of `level` nested asterisks. The cycle repeats
/// every four levels, the fourth rendering plain.
fn wrap_emphasis(level: usize, content: Vec<Inline>, out: &mut Vec<Inline>) {
    let style = match level % 4 {
        1 => EmphasisStyle::Italic,
        2 => EmphasisStyle::Bold,
        3 => EmphasisStyle::BoldItalic,
        _ => {
            append_inlines(out, content);
            return;
        }
    };
    out.push(Inline::Emphasis { style, content });
}

/// Outcome of a bracketed span parse.
pub(crate) enum BracketResult {
    /// Balanced: a function span node.
    Span(Inline),
    /// Balanced, terminal, and inside a blockquote: a citation line.
    Citation(Vec<Inline>),
    /// Unbalanced: the opening bracket degrades to literal text, the
    /// already-parsed content is kept.
    Literal(Vec<Inline>),
}

impl<'a> Parser<'a> {
    /// Literal layer: words (with URL auto-linking), spaces, tildes,
    /// dash runs, degraded block markers, newline escapes, selectors.
    fn literal_run(&mut self, ctx: InlineCtx, out: &mut Vec<Inline>) {
        loop {
            match self.cursor.peek().kind {
                TokenKind::WordSpan => {
                    let token = self.cursor.consume();
                    if ctx.takes_urls {
                        self.word_or_link(token.text, ctx, out);
                    } else {
                        push_text(out, &styled_word(token.text));
                    }
                }

                TokenKind::Space | TokenKind::Tilde => {
                    let token = self.cursor.consume();
                    push_text(out, token.text);
                }

                TokenKind::Hyphen => {
                    let token = self.cursor.consume();
                    push_text(out, &style_dashes(token.text));
                }

                // Block markers with no block role at this position are
                // plain text.
                TokenKind::HeaderMarker
                | TokenKind::UnorderedList
                | TokenKind::OrderedList
                | TokenKind::AsideMarker
                | TokenKind::Reference => {
                    let token = self.cursor.consume();
                    push_text(out, token.text);
                }

                TokenKind::Select => {
                    let token = self.cursor.consume();
                    let key = token.reference_key();
                    let index = self.references.record_selector(key);
                    out.push(Inline::Selector {
                        key: key.to_string(),
                        index,
                        target: None,
                    });
                }

                // `...` before a line break escapes it (joining the
                // lines); anywhere else it is a literal ellipsis.
                TokenKind::NewlineEscape => {
                    self.cursor.consume();
                    if self.cursor.check(TokenKind::LineBreak) {
                        self.cursor.consume();
                    } else {
                        push_text(out, "...");
                    }
                }

                _ => return,
            }
        }
    }

    /// A word span just consumed under URL auto-linking rules. A single
    /// trailing punctuation character is excluded from the match and
    /// re-appended after the link.
    fn word_or_link(&mut self, text: &str, ctx: InlineCtx, out: &mut Vec<Inline>) {
        let (prefix, suffix) = match text.chars().last() {
            Some(c) if is_punctuation(c) => text.split_at(text.len() - c.len_utf8()),
            _ => (text, ""),
        };

        if !URL_RE.is_match(prefix) {
            push_text(out, &styled_word(text));
            return;
        }

        // An immediately following bracketed span becomes the display
        // label. If the bracket never closes, replay and let the bracket
        // layer handle it literally. The label attempt runs the cascade,
        // so reference recordings made during it must be rolled back on
        // rewind; the replayed tokens record them again.
        let mut label = None;
        if self.cursor.check(TokenKind::LeftBracket) {
            let mark = self.cursor.mark();
            let recorded_refs = self.references.clone();
            self.cursor.consume();
            let mut inner = Vec::new();
            self.emphasis_run(ctx.without_urls(), &mut inner);
            if self.cursor.check(TokenKind::RightBracket) {
                self.cursor.consume();
                self.cursor.commit(mark);
                label = Some(inner);
            } else {
                self.cursor.rewind(mark);
                self.references = recorded_refs;
            }
        }

        let href = if prefix.starts_with("http://") || prefix.starts_with("https://") {
            prefix.to_string()
        } else {
            format!("https://{}", prefix)
        };
        let label = label.unwrap_or_else(|| vec![Inline::text(styled_word(prefix))]);

        out.push(Inline::Link { href, label });
        push_text(out, suffix);
    }

    /// Code layer: literal runs plus inline code spans.
    fn code_run(&mut self, ctx: InlineCtx, out: &mut Vec<Inline>) {
        loop {
            match self.cursor.peek().kind {
                TokenKind::InlineCode | TokenKind::CodeBlock => self.code_span(out),
                kind if is_literal(kind) => self.literal_run(ctx, out),
                _ => return,
            }
        }
    }

    /// Everything between code delimiters is raw text, never re-parsed.
    /// Without a closing delimiter before end of line/input, the opening
    /// delimiter renders literally and the scanned tokens are replayed.
    fn code_span(&mut self, out: &mut Vec<Inline>) {
        let open = self.cursor.consume();
        let mark = self.cursor.mark();

        while !self.cursor.check(TokenKind::Eof)
            && !self.cursor.check(TokenKind::InlineCode)
            && !self.cursor.check(TokenKind::CodeBlock)
            && !self.cursor.check(TokenKind::LineBreak)
            && !self.cursor.check(TokenKind::ParagraphBreak)
        {
            self.cursor.consume();
        }

        if self.cursor.check(TokenKind::InlineCode) || self.cursor.check(TokenKind::CodeBlock) {
            let raw = self.cursor.recorded_text(&mark);
            self.cursor.commit(mark);
            self.cursor.consume();
            out.push(Inline::Code(raw));
        } else {
            self.cursor.rewind(mark);
            push_text(out, open.text);
        }
    }

    /// Emphasis layer: code runs plus asterisk-delimited emphasis.
    pub(crate) fn emphasis_run(&mut self, ctx: InlineCtx, out: &mut Vec<Inline>) {
        loop {
            match self.cursor.peek().kind {
                TokenKind::Emphasis => {
                    self.cursor.consume();
                    if ctx.takes_emphasis {
                        self.emphasis(ctx, 1, out);
                    } else {
                        push_text(out, "*");
                    }
                }
                kind if is_textual(kind) => self.code_run(ctx, out),
                _ => return,
            }
        }
    }

    /// Parse emphasis content after an opening asterisk has been consumed.
    /// `level` counts open asterisks; level mod 4 selects the rendering
    /// (italic, bold, bold-italic, plain). An unmatched opener degrades to
    /// a literal asterisk preserved in the output stream.
    fn emphasis(&mut self, ctx: InlineCtx, level: usize, out: &mut Vec<Inline>) {
        if level > self.options.max_nesting_depth {
            push_text(out, "*");
            return;
        }

        let kind = self.cursor.peek().kind;
        if is_textual(kind) {
            let mut inner = Vec::new();
            self.code_run(ctx, &mut inner);
            if self.cursor.check(TokenKind::Emphasis) {
                self.cursor.consume();
                wrap_emphasis(level, inner, out);
            } else {
                push_text(out, "*");
                append_inlines(out, inner);
            }
        } else if kind == TokenKind::Emphasis {
            self.cursor.consume();
            self.emphasis(ctx, level + 1, out);
            match self.cursor.peek().kind {
                // Text continuing after the nested emphasis closed stays
                // at this level.
                TokenKind::InlineCode
                | TokenKind::CodeBlock
                | TokenKind::Space
                | TokenKind::WordSpan => {
                    self.emphasis(ctx, level, out);
                }
                TokenKind::Emphasis => {
                    self.cursor.consume();
                }
                _ => {}
            }
        } else {
            push_text(out, "*");
        }
    }

    /// Bracket layer: emphasis runs plus bracketed spans. A stray closing
    /// bracket is literal text.
    pub(crate) fn bracket_run(&mut self, ctx: InlineCtx, out: &mut Vec<Inline>) {
        loop {
            match self.cursor.peek().kind {
                TokenKind::LeftBracket => {
                    self.cursor.consume();
                    match self.bracketed(ctx) {
                        BracketResult::Span(node) => out.push(node),
                        BracketResult::Citation(nodes) | BracketResult::Literal(nodes) => {
                            append_inlines(out, nodes)
                        }
                    }
                }
                TokenKind::RightBracket => {
                    self.cursor.consume();
                    push_text(out, "]");
                }
                TokenKind::Emphasis => {
                    self.cursor.consume();
                    if ctx.takes_emphasis {
                        self.emphasis(ctx, 1, out);
                    } else {
                        push_text(out, "*");
                    }
                }
                kind if is_textual(kind) => self.code_run(ctx, out),
                _ => return,
            }
        }
    }

    /// Bracketed span content: like the bracket layer, but a closing
    /// bracket terminates instead of degrading to text.
    fn bracket_body(&mut self, ctx: InlineCtx, out: &mut Vec<Inline>) {
        loop {
            match self.cursor.peek().kind {
                TokenKind::LeftBracket => {
                    self.cursor.consume();
                    match self.bracketed(ctx) {
                        BracketResult::Span(node) => out.push(node),
                        BracketResult::Citation(nodes) | BracketResult::Literal(nodes) => {
                            append_inlines(out, nodes)
                        }
                    }
                }
                TokenKind::Emphasis => {
                    self.cursor.consume();
                    if ctx.takes_emphasis {
                        self.emphasis(ctx, 1, out);
                    } else {
                        push_text(out, "*");
                    }
                }
                kind if is_textual(kind) => self.code_run(ctx, out),
                _ => return,
            }
        }
    }

    /// An opening bracket has been consumed. Parse the span content; on a
    /// balanced close this is a function span (or, inside a blockquote and
    /// immediately terminal, a citation). Unbalanced brackets degrade to a
    /// literal `[` followed by whatever was parsed.
    pub(crate) fn bracketed(&mut self, ctx: InlineCtx) -> BracketResult {
        if self.bracket_depth >= self.options.max_nesting_depth {
            return BracketResult::Literal(vec![Inline::text("[")]);
        }
        self.bracket_depth += 1;

        let mark = self.cursor.mark();
        let mut inner = Vec::new();
        // Citations only apply to the span the blockquote loop opens, not
        // to spans nested inside it.
        self.bracket_body(
            InlineCtx {
                in_quote: false,
                ..ctx
            },
            &mut inner,
        );

        let result = if self.cursor.check(TokenKind::RightBracket) {
            let raw = self.cursor.recorded_text(&mark);
            self.cursor.commit(mark);
            self.cursor.consume();

            if ctx.in_quote
                && (self.cursor.check(TokenKind::Eof)
                    || self.cursor.check(TokenKind::ParagraphBreak))
            {
                BracketResult::Citation(inner)
            } else {
                let mut parts = raw.split('|');
                let name = parts.next().unwrap_or("").trim().to_string();
                let args = parts.map(|part| part.trim().to_string()).collect();
                BracketResult::Span(Inline::FuncSpan {
                    name,
                    args,
                    content: inner,
                })
            }
        } else {
            self.cursor.commit(mark);
            let mut nodes = vec![Inline::text("[")];
            append_inlines(&mut nodes, inner);
            BracketResult::Literal(nodes)
        };

        self.bracket_depth -= 1;
        result
    }

    /// One line of inline content: everything up to a line break, paragraph
    /// break, or end of input. An aside marker heading a fresh line also
    /// terminates: it opens an aside paragraph of its own. Only a mid-line
    /// marker is literal text.
    pub(crate) fn line(&mut self, ctx: InlineCtx) -> Vec<Inline> {
        let mut out = Vec::new();
        while !self.cursor.check(TokenKind::Eof)
            && !self.cursor.check(TokenKind::LineBreak)
            && !self.cursor.check(TokenKind::ParagraphBreak)
        {
            if self.cursor.check(TokenKind::AsideMarker)
                && self.cursor.previous_kind() == Some(TokenKind::LineBreak)
            {
                break;
            }
            self.bracket_run(ctx, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_dashes() {
        assert_eq!(style_dashes("-"), "-");
        assert_eq!(style_dashes("--"), "\u{2014}");
        assert_eq!(style_dashes("---"), "\u{2014}\u{2014}");
        assert_eq!(style_dashes("a--b--c"), "a\u{2014}b\u{2014}c");
    }

    #[test]
    fn test_styled_word_strips_escapes() {
        assert_eq!(styled_word(r"\*"), "*");
        assert_eq!(styled_word(r"\["), "[");
        assert_eq!(styled_word("plain"), "plain");
    }

    #[test]
    fn test_url_pattern() {
        assert!(URL_RE.is_match("www.example.com"));
        assert!(URL_RE.is_match("http://styles.net"));
        assert!(URL_RE.is_match("https://en.m.wikipedia.org/wiki/Rust_(programming_language)"));
        assert!(!URL_RE.is_match("www.example"));
        assert!(!URL_RE.is_match("styles.net"));
        assert!(!URL_RE.is_match("example.com"));
    }

    #[test]
    fn test_push_text_merges_adjacent_text() {
        let mut out = vec![Inline::text("a")];
        push_text(&mut out, "b");
        assert_eq!(out, vec![Inline::text("ab")]);
    }

    #[test]
    fn test_append_inlines_merges_boundary() {
        let mut out = vec![Inline::text("*")];
        append_inlines(
            &mut out,
            vec![Inline::text("x"), Inline::Code("y".to_string())],
        );
        assert_eq!(out, vec![Inline::text("*x"), Inline::Code("y".to_string())]);
    }
}
