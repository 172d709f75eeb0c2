//! Inline node definitions

use serde::Serialize;

/// Rendering style of an emphasis node. Nesting depth modulo 4 selects the
/// style; depth 0 (four nested levels) wraps back to plain content and
/// produces no node at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmphasisStyle {
    Italic,
    Bold,
    BoldItalic,
}

/// An inline node, produced bottom-up by the inline formatter cascade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Inline {
    /// Plain text. Em-dash styling and backslash-escape stripping have
    /// already been applied; entity escaping is a serializer concern.
    Text(String),
    /// An inline code span; the content is raw and never re-parsed.
    Code(String),
    Emphasis {
        style: EmphasisStyle,
        content: Vec<Inline>,
    },
    Link {
        href: String,
        label: Vec<Inline>,
    },
    /// A bracketed span, carried as `{name, args}` for future dispatch.
    /// Rendering currently always falls through to the parsed content.
    FuncSpan {
        name: String,
        args: Vec<String>,
        content: Vec<Inline>,
    },
    /// An empty, linkable anchor bound to the enclosing paragraph.
    Anchor {
        key: String,
        id: String,
    },
    /// An indexed marker referencing a key. `target` is filled by the
    /// post-parse resolution pass; unresolved selectors render as plain
    /// text.
    Selector {
        key: String,
        index: usize,
        target: Option<String>,
    },
    /// An explicit line break inside a blockquote or list item body.
    HardBreak,
}

impl Inline {
    pub fn text(s: impl Into<String>) -> Self {
        Inline::Text(s.into())
    }
}

/// Collect the plain-text content of a run of inline nodes, descending into
/// styled containers. Hard breaks become newlines, selectors their `[n]`
/// display form. Used by assertions and diagnostics.
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    collect_plain_text(inlines, &mut out);
    out
}

fn collect_plain_text(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(s) | Inline::Code(s) => out.push_str(s),
            Inline::Emphasis { content, .. } | Inline::FuncSpan { content, .. } => {
                collect_plain_text(content, out)
            }
            Inline::Link { label, .. } => collect_plain_text(label, out),
            Inline::Anchor { .. } => {}
            Inline::Selector { index, .. } => {
                out.push_str(&format!("[{}]", index));
            }
            Inline::HardBreak => out.push('\n'),
        }
    }
}
