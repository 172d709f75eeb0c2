//! Reference table and post-parse resolution
//!
//! Cross-references are a two-phase design: a selector may reference a key
//! whose anchor appears later in the document, or never appears at all.
//! During the parse, every anchor declaration and selector use is recorded
//! here with no validation. Once the whole document has been scanned, the
//! table is sealed (the parser hands it back by value) and
//! [`resolve_references`] points each selector at the first anchor
//! registered for its key. Selectors of anchor-less keys stay unresolved and
//! render as plain, non-linking text.

use std::collections::HashMap;

use serde::Serialize;

use super::ast::{Aside, Block, Document, Inline, Paragraph};

/// Per-key reference bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceEntry {
    /// Display index, 1-based, assigned at the key's first mention (anchor
    /// or selector, whichever the parser sees first in document order).
    pub index: usize,
    /// Anchor IDs declared under this key, in document order.
    pub anchors: Vec<String>,
    /// How many selectors reference this key.
    pub selector_count: usize,
}

/// The reference table: key to entry, with keys iterable in first-mention
/// order for deterministic output.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ReferenceTable {
    entries: HashMap<String, ReferenceEntry>,
    order: Vec<String>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ReferenceEntry> {
        self.entries.get(key)
    }

    /// Keys and entries in first-mention order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReferenceEntry)> {
        self.order
            .iter()
            .map(move |key| (key.as_str(), &self.entries[key]))
    }

    fn entry_mut(&mut self, key: &str) -> &mut ReferenceEntry {
        let order = &mut self.order;
        self.entries.entry(key.to_string()).or_insert_with(|| {
            let index = order.len() + 1;
            order.push(key.to_string());
            ReferenceEntry {
                index,
                anchors: Vec::new(),
                selector_count: 0,
            }
        })
    }

    /// Record an anchor declaration for `key`, generating its unique ID.
    /// Returns the new anchor's ID.
    pub(crate) fn record_anchor(&mut self, key: &str) -> String {
        let entry = self.entry_mut(key);
        let id = format!("ref-{}-{}", key, entry.anchors.len());
        entry.anchors.push(id.clone());
        id
    }

    /// Record a selector use of `key`. Returns the key's display index.
    pub(crate) fn record_selector(&mut self, key: &str) -> usize {
        let entry = self.entry_mut(key);
        entry.selector_count += 1;
        entry.index
    }
}

/// Post-parse resolution pass: point every selector in the tree at the
/// first anchor registered for its key. Selectors of unknown or anchor-less
/// keys are left untouched (rendered as plain text downstream).
pub fn resolve_references(document: &mut Document, table: &ReferenceTable) {
    for segment in &mut document.segments {
        resolve_block(&mut segment.block, table);
        if let Some(aside) = &mut segment.aside {
            resolve_aside(aside, table);
        }
    }
}

fn resolve_aside(aside: &mut Aside, table: &ReferenceTable) {
    for paragraph in &mut aside.paragraphs {
        resolve_paragraph(paragraph, table);
    }
}

fn resolve_paragraph(paragraph: &mut Paragraph, table: &ReferenceTable) {
    for line in &mut paragraph.lines {
        resolve_inlines(line, table);
    }
}

fn resolve_block(block: &mut Block, table: &ReferenceTable) {
    match block {
        Block::Header { content, .. } => resolve_inlines(content, table),
        Block::Paragraph(paragraph) => resolve_paragraph(paragraph, table),
        Block::Blockquote {
            content, citation, ..
        } => {
            resolve_inlines(content, table);
            if let Some(citation) = citation {
                resolve_inlines(citation, table);
            }
        }
        Block::List(list) => resolve_list(list, table),
        Block::CodeBlock { .. } => {}
    }
}

fn resolve_list(list: &mut super::ast::List, table: &ReferenceTable) {
    for item in &mut list.items {
        resolve_inlines(&mut item.content, table);
        if let Some(nested) = &mut item.nested {
            resolve_list(nested, table);
        }
    }
}

fn resolve_inlines(inlines: &mut [Inline], table: &ReferenceTable) {
    for inline in inlines {
        match inline {
            Inline::Selector { key, target, .. } => {
                *target = table
                    .get(key)
                    .and_then(|entry| entry.anchors.first().cloned());
            }
            Inline::Emphasis { content, .. } | Inline::FuncSpan { content, .. } => {
                resolve_inlines(content, table)
            }
            Inline::Link { label, .. } => resolve_inlines(label, table),
            Inline::Text(_) | Inline::Code(_) | Inline::Anchor { .. } | Inline::HardBreak => {}
        }
    }
}
