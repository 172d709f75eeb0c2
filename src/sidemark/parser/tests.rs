use crate::sidemark::ast::{EmphasisStyle, Inline, ListKind};
use crate::sidemark::parser::{parse_document, parse_document_with, ParseOptions};
use crate::sidemark::reference::resolve_references;
use crate::sidemark::testing::assert_doc;

#[test]
fn test_simple_paragraph() {
    let output = parse_document("hello world");
    assert_doc(&output.document).segment_count(1).segment(0, |seg| {
        seg.assert_paragraph().line_count(1).text("hello world");
    });
}

#[test]
fn test_paragraph_break_splits_segments() {
    let output = parse_document("one\n\ntwo");
    assert_doc(&output.document)
        .segment_count(2)
        .segment(0, |seg| {
            seg.assert_paragraph().text("one");
        })
        .segment(1, |seg| {
            seg.assert_paragraph().text("two");
        });
}

#[test]
fn test_multi_line_paragraph() {
    let output = parse_document("one\ntwo");
    assert_doc(&output.document).segment_count(1).segment(0, |seg| {
        seg.assert_paragraph()
            .line_count(2)
            .line(0, |line| {
                line.text("one");
            })
            .line(1, |line| {
                line.text("two");
            });
    });
}

#[test]
fn test_header_levels() {
    let output = parse_document("= title\ncontent\n\n==== deep");
    assert_doc(&output.document)
        .segment_count(3)
        .segment(0, |seg| {
            seg.assert_header(1).text("title");
        })
        .segment(1, |seg| {
            seg.assert_paragraph().text("content");
        })
        .segment(2, |seg| {
            seg.assert_header(4).text("deep");
        });
}

#[test]
fn test_header_suppresses_emphasis() {
    let output = parse_document("= a *b*");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_header(1).text("a *b*");
    });
}

#[test]
fn test_five_equals_is_plain_text() {
    let output = parse_document("===== x");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph().text("===== x");
    });
}

#[test]
fn test_emphasis_cycle() {
    let output = parse_document("*a* **b** ***c*** ****d****");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph()
            .text("a b c d")
            .line(0, |line| {
                line.node(0, |node| match node {
                    Inline::Emphasis { style, .. } => {
                        assert_eq!(*style, EmphasisStyle::Italic)
                    }
                    other => panic!("expected italic, got {:?}", other),
                })
                .node(2, |node| match node {
                    Inline::Emphasis { style, .. } => assert_eq!(*style, EmphasisStyle::Bold),
                    other => panic!("expected bold, got {:?}", other),
                })
                .node(4, |node| match node {
                    Inline::Emphasis { style, .. } => {
                        assert_eq!(*style, EmphasisStyle::BoldItalic)
                    }
                    other => panic!("expected bold-italic, got {:?}", other),
                })
                // The fourth level of the cycle renders plain, merging
                // into the surrounding text.
                .node(5, |node| assert_eq!(node, &Inline::text(" d")));
        });
    });
}

#[test]
fn test_unmatched_emphasis_is_literal() {
    let output = parse_document("*a");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph().text("*a");
    });
}

#[test]
fn test_emphasis_continuation_after_nested_close() {
    let output = parse_document("**a* b*");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph().line(0, |line| {
            line.node(0, |node| match node {
                Inline::Emphasis { style, content } => {
                    assert_eq!(*style, EmphasisStyle::Bold);
                    assert_eq!(content, &vec![Inline::text("a")]);
                }
                other => panic!("expected bold, got {:?}", other),
            })
            .node(1, |node| match node {
                Inline::Emphasis { style, content } => {
                    assert_eq!(*style, EmphasisStyle::Italic);
                    assert_eq!(content, &vec![Inline::text(" b")]);
                }
                other => panic!("expected italic, got {:?}", other),
            });
        });
    });
}

#[test]
fn test_inline_code_is_raw() {
    let output = parse_document("a `b *c*` d");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph().line(0, |line| {
            line.node(0, |node| assert_eq!(node, &Inline::text("a ")))
                .node(1, |node| {
                    assert_eq!(node, &Inline::Code("b *c*".to_string()))
                })
                .node(2, |node| assert_eq!(node, &Inline::text(" d")));
        });
    });
}

#[test]
fn test_unterminated_code_is_literal() {
    let output = parse_document("a `b c");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph().text("a `b c");
    });
}

#[test]
fn test_code_span_never_crosses_a_line_break() {
    let output = parse_document("a `b\nc` d");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph()
            .line_count(2)
            .line(0, |line| {
                line.text("a `b");
            })
            .line(1, |line| {
                line.text("c` d");
            });
    });
}

#[test]
fn test_code_block() {
    let output = parse_document("```\nlet x = 1;\n```\nafter");
    assert_doc(&output.document)
        .segment_count(2)
        .segment(0, |seg| {
            seg.assert_code_block("let x = 1;\n");
        })
        .segment(1, |seg| {
            seg.assert_paragraph().text("after");
        });
}

#[test]
fn test_unclosed_code_block_is_paragraph() {
    let output = parse_document("```\nabc");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph().text("```\nabc");
    });
}

#[test]
fn test_blockquote_with_citation() {
    let output = parse_document("--- quote text [Author Name]");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_blockquote(1)
            .text_contains("quote text")
            .citation_text("Author Name");
    });
}

#[test]
fn test_blockquote_depth_from_marker_run() {
    let output = parse_document("------ deep quote");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_blockquote(2).text_contains("deep quote").no_citation();
    });
}

#[test]
fn test_blockquote_line_breaks_are_hard_breaks() {
    let output = parse_document("--- line one\nline two");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_blockquote(1).text_contains("line one\nline two");
    });
}

#[test]
fn test_bracket_midquote_is_a_func_span_not_citation() {
    let output = parse_document("--- a [b] c");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_blockquote(1).text_contains("c").no_citation();
    });
}

#[test]
fn test_hyphen_run_not_multiple_of_three_is_paragraph() {
    let output = parse_document("---- a");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph().text("\u{2014}\u{2014}\u{2014} a");
    });
}

#[test]
fn test_nested_list() {
    let output = parse_document("+ a\n++ b\n+ c");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_list(ListKind::Unordered)
            .item_count(2)
            .item_text(0, "a")
            .item_nested(0, |nested| {
                nested.item_count(1).item_text(0, "b").item_not_nested(0);
            })
            .item_text(1, "c")
            .item_not_nested(1);
    });
}

#[test]
fn test_ordered_list() {
    let output = parse_document("# one\n# two");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_list(ListKind::Ordered)
            .item_count(2)
            .item_text(0, "one")
            .item_text(1, "two");
    });
}

#[test]
fn test_list_item_continuation_line() {
    let output = parse_document("+ a\nb");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_list(ListKind::Unordered).item_count(1).item_text(0, "a\nb");
    });
}

#[test]
fn test_list_ends_at_paragraph_break() {
    let output = parse_document("+ a\n\nnext");
    assert_doc(&output.document)
        .segment_count(2)
        .segment(0, |seg| {
            seg.assert_list(ListKind::Unordered).item_count(1);
        })
        .segment(1, |seg| {
            seg.assert_paragraph().text("next");
        });
}

#[test]
fn test_aside_attaches_to_previous_segment() {
    let output = parse_document("para\n\n:: note text");
    assert_doc(&output.document).segment_count(1).segment(0, |seg| {
        seg.assert_paragraph().text("para");
        seg.assert_aside().paragraph_count(1).text_contains("note text");
    });
}

#[test]
fn test_aside_without_block_degrades_to_paragraph() {
    let output = parse_document(":: only");
    assert_doc(&output.document).segment_count(1).segment(0, |seg| {
        seg.assert_paragraph().text("only");
        seg.assert_no_aside();
    });
}

#[test]
fn test_marked_lines_split_into_aside_paragraphs() {
    let output = parse_document("main\n\n:: one\n:: two");
    assert_doc(&output.document).segment_count(1).segment(0, |seg| {
        seg.assert_paragraph().text("main");
        seg.assert_aside()
            .paragraph_count(2)
            .text_contains("one")
            .text_contains("two");
    });
}

#[test]
fn test_single_newline_before_aside_marker_starts_aside() {
    let output = parse_document("main\n:: note");
    assert_doc(&output.document).segment_count(1).segment(0, |seg| {
        seg.assert_paragraph().line_count(1).text("main");
        seg.assert_aside().paragraph_count(1).text_contains("note");
    });
}

#[test]
fn test_mid_line_aside_marker_is_literal() {
    let output = parse_document("a :: b");
    assert_doc(&output.document).segment_count(1).segment(0, |seg| {
        seg.assert_paragraph().text("a :: b");
        seg.assert_no_aside();
    });
}

#[test]
fn test_consecutive_asides_merge() {
    let output = parse_document("p\n\n:: one\n\n:: two");
    assert_doc(&output.document).segment_count(1).segment(0, |seg| {
        seg.assert_aside()
            .paragraph_count(2)
            .text_contains("one")
            .text_contains("two");
    });
}

#[test]
fn test_selector_resolves_to_later_anchor() {
    let mut output = parse_document("See $<kx> now.\n\n>$kx The anchored paragraph.");

    let entry = output.references.get("kx").expect("key recorded");
    assert_eq!(entry.index, 1);
    assert_eq!(entry.selector_count, 1);
    assert_eq!(entry.anchors, vec!["ref-kx-0"]);

    resolve_references(&mut output.document, &output.references);
    assert_doc(&output.document)
        .segment_count(2)
        .segment(0, |seg| {
            seg.assert_paragraph().line(0, |line| {
                line.node(1, |node| match node {
                    Inline::Selector { key, index, target } => {
                        assert_eq!(key, "kx");
                        assert_eq!(*index, 1);
                        assert_eq!(target.as_deref(), Some("ref-kx-0"));
                    }
                    other => panic!("expected selector, got {:?}", other),
                });
            });
        })
        .segment(1, |seg| {
            seg.assert_paragraph()
                .text("The anchored paragraph.")
                .line(0, |line| {
                    line.node(0, |node| match node {
                        Inline::Anchor { key, id } => {
                            assert_eq!(key, "kx");
                            assert_eq!(id, "ref-kx-0");
                        }
                        other => panic!("expected anchor, got {:?}", other),
                    });
                });
        });
}

#[test]
fn test_selector_of_unknown_key_stays_unresolved() {
    let mut output = parse_document("missing $<nope> link");
    resolve_references(&mut output.document, &output.references);

    let entry = output.references.get("nope").expect("key recorded");
    assert_eq!(entry.selector_count, 1);
    assert!(entry.anchors.is_empty());

    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph().line(0, |line| {
            line.node(1, |node| match node {
                Inline::Selector { target, .. } => assert_eq!(target, &None),
                other => panic!("expected selector, got {:?}", other),
            });
        });
    });
}

#[test]
fn test_url_autolink() {
    let output = parse_document("visit www.example.com today");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph().line(0, |line| {
            line.node(1, |node| match node {
                Inline::Link { href, label } => {
                    assert_eq!(href, "https://www.example.com");
                    assert_eq!(label, &vec![Inline::text("www.example.com")]);
                }
                other => panic!("expected link, got {:?}", other),
            });
        });
    });
}

#[test]
fn test_url_excludes_trailing_punctuation() {
    let output = parse_document("see http://styles.net.");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph().line(0, |line| {
            line.node(1, |node| match node {
                Inline::Link { href, .. } => assert_eq!(href, "http://styles.net"),
                other => panic!("expected link, got {:?}", other),
            })
            .node(2, |node| assert_eq!(node, &Inline::text(".")));
        });
    });
}

#[test]
fn test_url_with_bracketed_label() {
    let output = parse_document("www.example.com[here]");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph().line(0, |line| {
            line.node(0, |node| match node {
                Inline::Link { href, label } => {
                    assert_eq!(href, "https://www.example.com");
                    assert_eq!(label, &vec![Inline::text("here")]);
                }
                other => panic!("expected link, got {:?}", other),
            });
        });
    });
}

#[test]
fn test_unclosed_link_label_records_selector_once() {
    let output = parse_document("www.example.com[$<k> oops");

    // The failed label attempt rolls back its recording; only the
    // replayed parse counts.
    let entry = output.references.get("k").expect("key recorded");
    assert_eq!(entry.selector_count, 1);
    assert_eq!(entry.index, 1);
    assert!(entry.anchors.is_empty());

    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph().line(0, |line| {
            line.node(0, |node| match node {
                Inline::Link { href, .. } => assert_eq!(href, "https://www.example.com"),
                other => panic!("expected link, got {:?}", other),
            })
            .node(2, |node| match node {
                Inline::Selector { key, index, .. } => {
                    assert_eq!(key, "k");
                    assert_eq!(*index, 1);
                }
                other => panic!("expected selector, got {:?}", other),
            });
        });
    });
}

#[test]
fn test_url_with_unclosed_label_falls_back() {
    let output = parse_document("www.example.com[oops");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph().line(0, |line| {
            line.node(0, |node| match node {
                Inline::Link { label, .. } => {
                    assert_eq!(label, &vec![Inline::text("www.example.com")]);
                }
                other => panic!("expected link, got {:?}", other),
            })
            .node(1, |node| assert_eq!(node, &Inline::text("[oops")));
        });
    });
}

#[test]
fn test_dotted_word_is_not_a_link() {
    let output = parse_document("styles.net is plain");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph().text("styles.net is plain");
    });
}

#[test]
fn test_escaped_delimiters_render_literally() {
    let output = parse_document(r"\*not emph\* and \[no span\]");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph().text("*not emph* and [no span]");
    });
}

#[test]
fn test_newline_escape_joins_lines() {
    let output = parse_document("one ...\ntwo");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph().line_count(1).text("one two");
    });
}

#[test]
fn test_freestanding_ellipsis_is_literal() {
    let output = parse_document("a ... b");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph().text("a ... b");
    });
}

#[test]
fn test_trailing_ellipsis_is_literal() {
    let output = parse_document("to be continued ...");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph().text("to be continued ...");
    });
}

#[test]
fn test_ellipsis_before_paragraph_break_is_literal() {
    let output = parse_document("a ...\n\nb");
    assert_doc(&output.document)
        .segment_count(2)
        .segment(0, |seg| {
            seg.assert_paragraph().text("a ...");
        })
        .segment(1, |seg| {
            seg.assert_paragraph().text("b");
        });
}

#[test]
fn test_func_span_name_and_args() {
    let output = parse_document("[name|arg1|arg2]");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph().line(0, |line| {
            line.node(0, |node| match node {
                Inline::FuncSpan { name, args, .. } => {
                    assert_eq!(name, "name");
                    assert_eq!(args, &vec!["arg1".to_string(), "arg2".to_string()]);
                }
                other => panic!("expected func span, got {:?}", other),
            });
        });
    });
}

#[test]
fn test_unbalanced_brackets_are_literal() {
    let output = parse_document("[oops");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph().text("[oops");
    });

    let output = parse_document("a ] b");
    assert_doc(&output.document).segment(0, |seg| {
        seg.assert_paragraph().text("a ] b");
    });
}

#[test]
fn test_nesting_depth_limit_degrades_to_text() {
    let options = ParseOptions {
        max_nesting_depth: 2,
    };
    let output = parse_document_with("[[[[x]]]]", options);
    assert_doc(&output.document).segment_count(1);

    let output = parse_document_with("*****x*****", options);
    assert_doc(&output.document).segment_count(1);
}

#[test]
fn test_empty_input_yields_empty_document() {
    let output = parse_document("");
    assert_doc(&output.document).segment_count(0);
    assert!(output.references.is_empty());
}

#[test]
fn test_whitespace_only_input() {
    let output = parse_document("   \n\n  \n");
    assert!(output.references.is_empty());
}
