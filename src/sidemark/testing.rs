//! Testing utilities for AST assertions
//!
//! A fluent API for asserting on parsed document structure, keeping parser
//! tests readable:
//!
//! ```text
//! assert_doc(&output.document)
//!     .segment_count(2)
//!     .segment(0, |seg| {
//!         seg.assert_header(1).text(" title");
//!     });
//! ```

use crate::sidemark::ast::{
    plain_text, Aside, Block, Document, Inline, List, ListKind, Paragraph, Segment,
};

pub fn assert_doc(document: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion { document }
}

pub struct DocumentAssertion<'a> {
    document: &'a Document,
}

impl<'a> DocumentAssertion<'a> {
    pub fn segment_count(self, expected: usize) -> Self {
        assert_eq!(
            self.document.segments.len(),
            expected,
            "expected {} segments, got {}: {:?}",
            expected,
            self.document.segments.len(),
            self.document
        );
        self
    }

    pub fn segment(self, index: usize, f: impl FnOnce(SegmentAssertion<'a>)) -> Self {
        let segment = self
            .document
            .segments
            .get(index)
            .unwrap_or_else(|| panic!("no segment at index {}: {:?}", index, self.document));
        f(SegmentAssertion { segment });
        self
    }
}

pub struct SegmentAssertion<'a> {
    segment: &'a Segment,
}

impl<'a> SegmentAssertion<'a> {
    pub fn assert_paragraph(&self) -> ParagraphAssertion<'a> {
        match &self.segment.block {
            Block::Paragraph(paragraph) => ParagraphAssertion { paragraph },
            other => panic!("expected paragraph, got {:?}", other),
        }
    }

    pub fn assert_header(&self, level: u8) -> InlineAssertion<'a> {
        match &self.segment.block {
            Block::Header {
                level: actual,
                content,
            } => {
                assert_eq!(*actual, level, "header level mismatch");
                InlineAssertion { inlines: content }
            }
            other => panic!("expected header, got {:?}", other),
        }
    }

    pub fn assert_blockquote(&self, depth: usize) -> BlockquoteAssertion<'a> {
        match &self.segment.block {
            Block::Blockquote {
                depth: actual,
                content,
                citation,
            } => {
                assert_eq!(*actual, depth, "blockquote depth mismatch");
                BlockquoteAssertion { content, citation }
            }
            other => panic!("expected blockquote, got {:?}", other),
        }
    }

    pub fn assert_list(&self, kind: ListKind) -> ListAssertion<'a> {
        match &self.segment.block {
            Block::List(list) => {
                assert_eq!(list.kind, kind, "list kind mismatch");
                ListAssertion { list }
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    pub fn assert_code_block(&self, expected: &str) {
        match &self.segment.block {
            Block::CodeBlock { text } => assert_eq!(text, expected),
            other => panic!("expected code block, got {:?}", other),
        }
    }

    pub fn assert_aside(&self) -> AsideAssertion<'a> {
        match &self.segment.aside {
            Some(aside) => AsideAssertion { aside },
            None => panic!("expected an aside on segment: {:?}", self.segment),
        }
    }

    pub fn assert_no_aside(&self) {
        assert!(
            self.segment.aside.is_none(),
            "unexpected aside: {:?}",
            self.segment.aside
        );
    }
}

pub struct ParagraphAssertion<'a> {
    paragraph: &'a Paragraph,
}

impl<'a> ParagraphAssertion<'a> {
    pub fn line_count(self, expected: usize) -> Self {
        assert_eq!(
            self.paragraph.lines.len(),
            expected,
            "line count mismatch: {:?}",
            self.paragraph
        );
        self
    }

    pub fn text(self, expected: &str) -> Self {
        assert_eq!(self.paragraph.text(), expected);
        self
    }

    pub fn text_contains(self, needle: &str) -> Self {
        let text = self.paragraph.text();
        assert!(
            text.contains(needle),
            "expected {:?} in {:?}",
            needle,
            text
        );
        self
    }

    pub fn line(self, index: usize, f: impl FnOnce(InlineAssertion<'a>)) -> Self {
        let line = self
            .paragraph
            .lines
            .get(index)
            .unwrap_or_else(|| panic!("no line at index {}: {:?}", index, self.paragraph));
        f(InlineAssertion { inlines: line });
        self
    }
}

pub struct InlineAssertion<'a> {
    pub inlines: &'a [Inline],
}

impl<'a> InlineAssertion<'a> {
    pub fn text(self, expected: &str) -> Self {
        assert_eq!(plain_text(self.inlines), expected);
        self
    }

    pub fn text_contains(self, needle: &str) -> Self {
        let text = plain_text(self.inlines);
        assert!(
            text.contains(needle),
            "expected {:?} in {:?}",
            needle,
            text
        );
        self
    }

    pub fn node(self, index: usize, f: impl FnOnce(&Inline)) -> Self {
        let node = self
            .inlines
            .get(index)
            .unwrap_or_else(|| panic!("no inline at index {}: {:?}", index, self.inlines));
        f(node);
        self
    }
}

pub struct BlockquoteAssertion<'a> {
    content: &'a [Inline],
    citation: &'a Option<Vec<Inline>>,
}

impl<'a> BlockquoteAssertion<'a> {
    pub fn text_contains(self, needle: &str) -> Self {
        let text = plain_text(self.content);
        assert!(
            text.contains(needle),
            "expected {:?} in {:?}",
            needle,
            text
        );
        self
    }

    pub fn citation_text(self, expected: &str) -> Self {
        match self.citation {
            Some(citation) => assert_eq!(plain_text(citation), expected),
            None => panic!("expected a citation"),
        }
        self
    }

    pub fn no_citation(self) -> Self {
        assert!(self.citation.is_none(), "unexpected citation");
        self
    }
}

pub struct ListAssertion<'a> {
    list: &'a List,
}

impl<'a> ListAssertion<'a> {
    pub fn item_count(self, expected: usize) -> Self {
        assert_eq!(
            self.list.items.len(),
            expected,
            "item count mismatch: {:?}",
            self.list
        );
        self
    }

    pub fn item_text(self, index: usize, expected: &str) -> Self {
        let item = self
            .list
            .items
            .get(index)
            .unwrap_or_else(|| panic!("no item at index {}: {:?}", index, self.list));
        assert_eq!(plain_text(&item.content), expected);
        self
    }

    pub fn item_nested(self, index: usize, f: impl FnOnce(ListAssertion<'a>)) -> Self {
        let item = self
            .list
            .items
            .get(index)
            .unwrap_or_else(|| panic!("no item at index {}: {:?}", index, self.list));
        match &item.nested {
            Some(nested) => f(ListAssertion { list: nested }),
            None => panic!("expected nested list under item {}: {:?}", index, item),
        }
        self
    }

    pub fn item_not_nested(self, index: usize) -> Self {
        let item = &self.list.items[index];
        assert!(item.nested.is_none(), "unexpected nested list: {:?}", item);
        self
    }
}

pub struct AsideAssertion<'a> {
    aside: &'a Aside,
}

impl<'a> AsideAssertion<'a> {
    pub fn paragraph_count(self, expected: usize) -> Self {
        assert_eq!(
            self.aside.paragraphs.len(),
            expected,
            "aside paragraph count mismatch: {:?}",
            self.aside
        );
        self
    }

    pub fn text_contains(self, needle: &str) -> Self {
        let text = self
            .aside
            .paragraphs
            .iter()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(
            text.contains(needle),
            "expected {:?} in {:?}",
            needle,
            text
        );
        self
    }
}
