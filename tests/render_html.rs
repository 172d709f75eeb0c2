//! End-to-end HTML rendering tests
//!
//! Each case runs the full pipeline (scan, parse, resolve, render) and
//! checks the emitted fragment for the markup a host page hooks into.

use rstest::rstest;
use sidemark::sidemark::formats::html::to_html;

#[test]
fn test_segment_shell() {
    assert_eq!(
        to_html("x"),
        "<section class=\"segment\"><div class=\"main-content\"><div>x</div></div></section>"
    );
}

#[rstest]
#[case("*italic*", "<i>italic</i>")]
#[case("**bold**", "<b>bold</b>")]
#[case("***both***", "<b><i>both</i></b>")]
#[case("****plain****", "<div>plain</div>")]
fn test_emphasis_markup(#[case] input: &str, #[case] expected: &str) {
    assert!(
        to_html(input).contains(expected),
        "{:?} missing in {:?}",
        expected,
        to_html(input)
    );
}

#[rstest]
#[case("= one", "<h1>one</h1>")]
#[case("== two", "<h2>two</h2>")]
#[case("=== three", "<h3>three</h3>")]
#[case("==== four", "<h4>four</h4>")]
fn test_header_markup(#[case] input: &str, #[case] expected: &str) {
    assert!(to_html(input).contains(expected));
}

#[test]
fn test_blockquote_with_citation_markup() {
    let html = to_html("--- words to live by [Someone Wise]");
    assert!(html.contains("<blockquote>"));
    assert!(html.contains("<p class=\"quote-cit\">Someone Wise</p>"));
}

#[test]
fn test_nested_blockquote_markup() {
    let html = to_html("------ inner voice");
    assert!(html.contains("<blockquote><blockquote>inner voice</blockquote></blockquote>"));
}

#[test]
fn test_nested_list_markup() {
    let html = to_html("+ a\n++ b");
    assert!(html.contains("<ul><li>a<ul><li>b</li></ul></li></ul>"));
}

#[test]
fn test_ordered_list_markup() {
    let html = to_html("# one\n# two");
    assert!(html.contains("<ol><li>one</li><li>two</li></ol>"));
}

#[test]
fn test_link_markup() {
    let html = to_html("visit www.example.org now");
    assert!(html.contains("<a href=\"https://www.example.org\">www.example.org</a>"));
}

#[test]
fn test_inline_code_is_escaped() {
    let html = to_html("`x<y`");
    assert!(html.contains("<code>x&lt;y</code>"));
}

#[test]
fn test_reference_anchor_and_selector_markup() {
    let html = to_html("see $<k> here\n\n>$k the target paragraph");
    assert!(html.contains("<sup class=\"select\"><a href=\"#ref-k-0\">[1]</a></sup>"));
    assert!(html.contains("<span class=\"ref-anchor\" id=\"ref-k-0\"></span>"));
}

#[test]
fn test_unresolved_selector_has_no_link() {
    let html = to_html("see $<nowhere>");
    assert!(html.contains("<sup class=\"select\">[1]</sup>"));
    assert!(!html.contains("<a href"));
}

#[test]
fn test_aside_markup() {
    let html = to_html("main text\n\n:: side note");
    assert!(html.contains(
        "<div class=\"aside-segment\"><div class=\"aside-content\"><div>side note</div></div>\
         <button class=\"aside-btn\">more...</button></div>"
    ));
    // The aside lives inside the segment it annotates.
    assert_eq!(html.matches("<section").count(), 1);
}

#[test]
fn test_func_span_markup() {
    let html = to_html("[note|x] after");
    assert!(html.contains("<span class=\"func\">note|x</span>"));
}

#[test]
fn test_code_block_markup() {
    let html = to_html("```\nif (a < b) { b(); }\n```");
    assert!(html.contains("<pre><code>if (a &lt; b) { b(); }\n</code></pre>"));
}
