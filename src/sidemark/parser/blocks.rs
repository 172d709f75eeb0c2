//! Block grammar: headers, code blocks, blockquotes, lists, asides,
//! paragraphs
//!
//! A state machine over block starts, dispatched on the lookahead token.
//! Nesting is driven by delimiter run length: header level by the `=` run,
//! blockquote depth by the hyphen run divided by 3, list level by the
//! marker run. Each top-level block becomes a segment; aside-marked
//! paragraphs merge into the preceding segment's aside.

use crate::sidemark::ast::{
    Aside, Block, Document, Inline, List, ListItem, ListKind, Paragraph, Segment,
};
use crate::sidemark::lexer::TokenKind;

use super::api::{ParseOutput, Parser};
use super::inline::{append_inlines, push_text, BracketResult, InlineCtx};

impl<'a> Parser<'a> {
    /// Parse the whole document, consuming the parser.
    pub(crate) fn document(mut self) -> ParseOutput {
        let mut segments: Vec<Segment> = Vec::new();

        while !self.cursor.check(TokenKind::Eof) {
            if self.cursor.check(TokenKind::AsideMarker) {
                let aside = self.aside();
                if aside.paragraphs.is_empty() {
                    continue;
                }
                match segments.last_mut() {
                    Some(segment) => match &mut segment.aside {
                        Some(existing) => existing.paragraphs.extend(aside.paragraphs),
                        None => segment.aside = Some(aside),
                    },
                    // An aside with no preceding block to attach to
                    // degrades to plain paragraphs.
                    None => {
                        for paragraph in aside.paragraphs {
                            segments.push(Segment::new(Block::Paragraph(paragraph)));
                        }
                    }
                }
                continue;
            }

            if let Some(block) = self.block() {
                segments.push(Segment::new(block));
            }
        }

        ParseOutput {
            document: Document { segments },
            references: self.references,
        }
    }

    fn block(&mut self) -> Option<Block> {
        match self.cursor.peek().kind {
            TokenKind::HeaderMarker => Some(self.header()),

            TokenKind::CodeBlock => self.code_block(),

            TokenKind::Hyphen => match self.cursor.peek().quote_depth() {
                Some(depth) => {
                    self.cursor.consume();
                    Some(self.blockquote(depth))
                }
                // A run that is not a multiple of 3 is paragraph text.
                None => self.paragraph().map(Block::Paragraph),
            },

            TokenKind::UnorderedList | TokenKind::OrderedList => {
                let level = self.cursor.peek().marker_level();
                let list = self.list(level);
                if self.cursor.check(TokenKind::ParagraphBreak) {
                    self.cursor.consume();
                }
                list.map(Block::List)
            }

            _ => self.paragraph().map(Block::Paragraph),
        }
    }

    fn header(&mut self) -> Block {
        let marker = self.cursor.consume();
        let level = marker.marker_level() as u8;
        if self.cursor.check(TokenKind::Space) {
            self.cursor.consume();
        }
        let content = self.line(InlineCtx::default().without_emphasis());
        if self.cursor.check(TokenKind::LineBreak) {
            self.cursor.consume();
        }
        Block::Header { level, content }
    }

    /// Speculatively scan for the closing fence. On success the raw text
    /// between the fences becomes a code block, with one leading line
    /// break stripped. Without a closing fence, everything including the
    /// opening fence is replayed and reparsed as an ordinary paragraph.
    fn code_block(&mut self) -> Option<Block> {
        let mark = self.cursor.mark();
        self.cursor.consume();

        while !self.cursor.check(TokenKind::Eof) && !self.cursor.check(TokenKind::CodeBlock) {
            self.cursor.consume();
        }

        if self.cursor.check(TokenKind::CodeBlock) {
            let raw: String = self.cursor.recorded(&mark)[1..]
                .iter()
                .map(|t| t.text)
                .collect();
            self.cursor.commit(mark);
            self.cursor.consume();
            if self.cursor.check(TokenKind::LineBreak) {
                self.cursor.consume();
            }
            let text = raw.strip_prefix('\n').unwrap_or(&raw).to_string();
            Some(Block::CodeBlock { text })
        } else {
            self.cursor.rewind(mark);
            self.paragraph().map(Block::Paragraph)
        }
    }

    /// Blockquote body at the emphasis level, line breaks becoming hard
    /// breaks. A bracketed span closing right before the end of the quote
    /// becomes a citation child instead of flowing text.
    fn blockquote(&mut self, depth: usize) -> Block {
        if self.cursor.check(TokenKind::Space) {
            self.cursor.consume();
        }

        let ctx = InlineCtx::default().inside_quote();
        let mut content: Vec<Inline> = Vec::new();
        let mut citation = None;

        loop {
            self.emphasis_run(ctx, &mut content);
            match self.cursor.peek().kind {
                TokenKind::Eof => break,

                TokenKind::ParagraphBreak => {
                    self.cursor.consume();
                    break;
                }

                TokenKind::LineBreak => {
                    self.cursor.consume();
                    content.push(Inline::HardBreak);
                }

                TokenKind::LeftBracket => {
                    self.cursor.consume();
                    match self.bracketed(ctx) {
                        BracketResult::Citation(nodes) => {
                            citation = Some(nodes);
                            if self.cursor.check(TokenKind::ParagraphBreak) {
                                self.cursor.consume();
                            }
                            break;
                        }
                        BracketResult::Span(node) => content.push(node),
                        BracketResult::Literal(nodes) => append_inlines(&mut content, nodes),
                    }
                }

                TokenKind::RightBracket => {
                    self.cursor.consume();
                    push_text(&mut content, "]");
                }

                _ => {}
            }
        }

        Block::Blockquote {
            depth,
            content,
            citation,
        }
    }

    /// Recursive-descent list builder. A marker deeper than the current
    /// level opens a nested list under the last item; a shallower marker
    /// terminates this level. Nesting is capped by the configured depth
    /// limit, past which deeper markers are treated as items of the
    /// current level.
    fn list(&mut self, level: usize) -> Option<List> {
        let mut kind: Option<ListKind> = None;
        let mut items: Vec<ListItem> = Vec::new();

        loop {
            let token = self.cursor.peek();
            let marker_kind = match token.kind {
                TokenKind::UnorderedList => ListKind::Unordered,
                TokenKind::OrderedList => ListKind::Ordered,
                _ => break,
            };
            kind.get_or_insert(marker_kind);

            let marker_level = token.marker_level();
            if marker_level < level {
                break;
            }

            if marker_level > level && self.list_depth < self.options.max_nesting_depth {
                self.list_depth += 1;
                let nested = self.list(level + 1);
                self.list_depth -= 1;
                if let Some(nested) = nested {
                    match items.last_mut() {
                        Some(item) if item.nested.is_none() => item.nested = Some(nested),
                        _ => items.push(ListItem {
                            content: Vec::new(),
                            nested: Some(nested),
                        }),
                    }
                }
                continue;
            }

            self.cursor.consume();
            let content = self.list_item_body();
            items.push(ListItem {
                content,
                nested: None,
            });
        }

        // An empty list renders nothing.
        match kind {
            Some(kind) if !items.is_empty() => Some(List { kind, items }),
            _ => None,
        }
    }

    /// One list item body: inline content up to the next marker, paragraph
    /// break, or end of input. Continuation lines join with hard breaks;
    /// a `...` escape before the break joins them seamlessly (consumed by
    /// the literal layer).
    fn list_item_body(&mut self) -> Vec<Inline> {
        let ctx = InlineCtx::default();
        let mut out = Vec::new();

        loop {
            self.bracket_run(ctx, &mut out);
            match self.cursor.peek().kind {
                TokenKind::LineBreak => {
                    self.cursor.consume();
                    match self.cursor.peek().kind {
                        TokenKind::UnorderedList
                        | TokenKind::OrderedList
                        | TokenKind::ParagraphBreak
                        | TokenKind::Eof => break,
                        _ => out.push(Inline::HardBreak),
                    }
                }
                _ => break,
            }
        }

        out
    }

    /// One or more consecutive aside-marked paragraphs, merged.
    fn aside(&mut self) -> Aside {
        let mut paragraphs = Vec::new();
        while self.cursor.check(TokenKind::AsideMarker) {
            self.cursor.consume();
            if self.cursor.check(TokenKind::Space) {
                self.cursor.consume();
            }
            if let Some(paragraph) = self.paragraph() {
                paragraphs.push(paragraph);
            }
        }
        Aside { paragraphs }
    }

    /// Default block: one or more inline lines up to a paragraph break. A
    /// leading reference token binds an anchor to this paragraph. A fully
    /// empty line terminates the line loop early.
    fn paragraph(&mut self) -> Option<Paragraph> {
        let mut anchor = None;
        if self.cursor.check(TokenKind::Reference) {
            let token = self.cursor.consume();
            let key = token.reference_key();
            let id = self.references.record_anchor(key);
            anchor = Some(Inline::Anchor {
                key: key.to_string(),
                id,
            });
            if self.cursor.check(TokenKind::Space) {
                self.cursor.consume();
            }
        }

        let mut lines = Vec::new();
        loop {
            let mut line = self.line(InlineCtx::default());
            if let Some(anchor) = anchor.take() {
                line.insert(0, anchor);
            }
            let empty = line.is_empty();
            if !empty {
                lines.push(line);
            }

            match self.cursor.peek().kind {
                TokenKind::LineBreak => {
                    self.cursor.consume();
                    if empty {
                        break;
                    }
                }
                TokenKind::ParagraphBreak => {
                    self.cursor.consume();
                    break;
                }
                _ => break,
            }
        }

        if lines.is_empty() {
            None
        } else {
            Some(Paragraph::new(lines))
        }
    }
}
