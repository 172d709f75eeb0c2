//! Block node definitions

use serde::Serialize;

use super::inline::{plain_text, Inline};

/// A paragraph: one or more lines of inline content. Lines are kept
/// separate so renderers can lay them out individually.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Paragraph {
    pub lines: Vec<Vec<Inline>>,
}

impl Paragraph {
    pub fn new(lines: Vec<Vec<Inline>>) -> Self {
        Self { lines }
    }

    /// Plain-text content of all lines, newline-joined.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| plain_text(line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ListKind {
    Unordered,
    Ordered,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    /// Item body; continuation lines are joined with `Inline::HardBreak`.
    pub content: Vec<Inline>,
    /// A deeper list nested under this item, if any.
    pub nested: Option<List>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct List {
    pub kind: ListKind,
    pub items: Vec<ListItem>,
}

/// Secondary note content attached to the preceding primary block.
/// Consecutive aside-marked paragraphs are merged into one aside.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Aside {
    pub paragraphs: Vec<Paragraph>,
}

/// A primary block node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Block {
    Header {
        /// 1 through 4, the length of the `=` run.
        level: u8,
        content: Vec<Inline>,
    },
    Paragraph(Paragraph),
    Blockquote {
        /// Nesting depth, the hyphen run length divided by 3.
        depth: usize,
        content: Vec<Inline>,
        /// A trailing bracketed span immediately before the end of the
        /// quote, rendered as a citation line.
        citation: Option<Vec<Inline>>,
    },
    List(List),
    CodeBlock {
        /// Raw text between the fences, never re-parsed.
        text: String,
    },
}
