//! HTML projection of the document tree
//!
//! Produces an HTML fragment for direct injection. Entity escaping happens
//! here and only here; the tree carries raw text. The emitted class names
//! (`segment`, `main-content`, `aside-segment`, `aside-content`,
//! `aside-btn`, `select`, `func`, `quote-cit`) and anchor IDs are the hooks
//! a host page uses to wire up collapsible asides and reference links.

use crate::sidemark::ast::{Aside, Block, Document, Inline, List, Paragraph, Segment};
use crate::sidemark::ast::EmphasisStyle;
use crate::sidemark::parser::{parse_document, ParseOutput};
use crate::sidemark::reference::resolve_references;

/// Entity-escape `&`, `<`, `>`, `"`, `'`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Parse, resolve references, and render in one step.
pub fn to_html(source: &str) -> String {
    let ParseOutput {
        mut document,
        references,
    } = parse_document(source);
    resolve_references(&mut document, &references);
    render_document(&document)
}

/// Render an already-parsed (and ideally resolved) document.
pub fn render_document(document: &Document) -> String {
    let mut out = String::new();
    for segment in &document.segments {
        render_segment(&mut out, segment);
    }
    out
}

fn render_segment(out: &mut String, segment: &Segment) {
    out.push_str("<section class=\"segment\"><div class=\"main-content\">");
    render_block(out, &segment.block);
    out.push_str("</div>");
    if let Some(aside) = &segment.aside {
        render_aside(out, aside);
    }
    out.push_str("</section>");
}

fn render_aside(out: &mut String, aside: &Aside) {
    out.push_str("<div class=\"aside-segment\"><div class=\"aside-content\">");
    let mut first = true;
    for paragraph in &aside.paragraphs {
        if !first {
            out.push_str("<br>");
        }
        first = false;
        render_paragraph(out, paragraph);
    }
    out.push_str("</div><button class=\"aside-btn\">more...</button></div>");
}

fn render_block(out: &mut String, block: &Block) {
    match block {
        Block::Header { level, content } => {
            out.push_str(&format!("<h{}>", level));
            render_inlines(out, content);
            out.push_str(&format!("</h{}>", level));
        }
        Block::Paragraph(paragraph) => render_paragraph(out, paragraph),
        Block::Blockquote {
            depth,
            content,
            citation,
        } => {
            for _ in 0..*depth {
                out.push_str("<blockquote>");
            }
            render_inlines(out, content);
            if let Some(citation) = citation {
                out.push_str("<p class=\"quote-cit\">");
                render_inlines(out, citation);
                out.push_str("</p>");
            }
            for _ in 0..*depth {
                out.push_str("</blockquote>");
            }
        }
        Block::List(list) => render_list(out, list),
        Block::CodeBlock { text } => {
            out.push_str("<pre><code>");
            out.push_str(&escape_html(text));
            out.push_str("</code></pre>");
        }
    }
}

fn render_paragraph(out: &mut String, paragraph: &Paragraph) {
    for line in &paragraph.lines {
        out.push_str("<div>");
        render_inlines(out, line);
        out.push_str("</div>");
    }
}

fn render_list(out: &mut String, list: &List) {
    if list.items.is_empty() {
        return;
    }
    let tag = match list.kind {
        crate::sidemark::ast::ListKind::Unordered => "ul",
        crate::sidemark::ast::ListKind::Ordered => "ol",
    };
    out.push_str(&format!("<{}>", tag));
    for item in &list.items {
        out.push_str("<li>");
        render_inlines(out, &item.content);
        if let Some(nested) = &item.nested {
            render_list(out, nested);
        }
        out.push_str("</li>");
    }
    out.push_str(&format!("</{}>", tag));
}

fn render_inlines(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        render_inline(out, inline);
    }
}

fn render_inline(out: &mut String, inline: &Inline) {
    match inline {
        Inline::Text(text) => out.push_str(&escape_html(text)),
        Inline::Code(code) => {
            out.push_str("<code>");
            out.push_str(&escape_html(code));
            out.push_str("</code>");
        }
        Inline::Emphasis { style, content } => {
            let (open, close) = match style {
                EmphasisStyle::Italic => ("<i>", "</i>"),
                EmphasisStyle::Bold => ("<b>", "</b>"),
                EmphasisStyle::BoldItalic => ("<b><i>", "</i></b>"),
            };
            out.push_str(open);
            render_inlines(out, content);
            out.push_str(close);
        }
        Inline::Link { href, label } => {
            out.push_str(&format!("<a href=\"{}\">", escape_html(href)));
            render_inlines(out, label);
            out.push_str("</a>");
        }
        Inline::FuncSpan { content, .. } => {
            out.push_str("<span class=\"func\">");
            render_inlines(out, content);
            out.push_str("</span>");
        }
        Inline::Anchor { id, .. } => {
            out.push_str(&format!(
                "<span class=\"ref-anchor\" id=\"{}\"></span>",
                escape_html(id)
            ));
        }
        Inline::Selector { index, target, .. } => match target {
            Some(id) => out.push_str(&format!(
                "<sup class=\"select\"><a href=\"#{}\">[{}]</a></sup>",
                escape_html(id),
                index
            )),
            None => out.push_str(&format!("<sup class=\"select\">[{}]</sup>", index)),
        },
        Inline::HardBreak => out.push_str("<br>"),
    }
}
