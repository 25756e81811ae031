use super::*;
use pretty_assertions::assert_eq;
use ntest::test_case;

#[test]
fn paragraphs() {
    let mut doc = Document::new();
    let p1 = para(&mut doc);
    leaf(&mut doc, p1, NodeValue::Text, "One.");
    let p2 = para(&mut doc);
    leaf(&mut doc, p2, NodeValue::Text, "Two.");

    compare(&doc, "<body><p>One.</p><p>Two.</p></body>");
}

#[test]
fn block_quote_nests() {
    let mut doc = Document::new();
    let root = doc.root();
    let outer = block(&mut doc, root, NodeValue::BlockQuote);
    let inner = block(&mut doc, outer, NodeValue::BlockQuote);
    let p = block(&mut doc, inner, NodeValue::Paragraph);
    leaf(&mut doc, p, NodeValue::Text, "Deep.");
    let p = block(&mut doc, outer, NodeValue::Paragraph);
    leaf(&mut doc, p, NodeValue::Text, "Shallow.");

    compare(
        &doc,
        concat!(
            "<body><blockquote>",
            "<blockquote><p>Deep.</p></blockquote>",
            "<p>Shallow.</p>",
            "</blockquote></body>"
        ),
    );
}

#[test]
fn lists() {
    let mut doc = Document::new();
    let root = doc.root();
    let ol = block(&mut doc, root, NodeValue::OrderedList);
    for text in &["First", "Second"] {
        let li = block(&mut doc, ol, NodeValue::ListItem);
        leaf(&mut doc, li, NodeValue::Text, text);
    }
    let ul = block(&mut doc, root, NodeValue::UnorderedList);
    let li = block(&mut doc, ul, NodeValue::ListItem);
    let p = block(&mut doc, li, NodeValue::Paragraph);
    leaf(&mut doc, p, NodeValue::Text, "Loose");
    let nested = block(&mut doc, li, NodeValue::UnorderedList);
    let li = block(&mut doc, nested, NodeValue::ListItem);
    leaf(&mut doc, li, NodeValue::Text, "Nested");

    compare(
        &doc,
        concat!(
            "<body>",
            "<ol><li>First</li><li>Second</li></ol>",
            "<ul><li><p>Loose</p><ul><li>Nested</li></ul></li></ul>",
            "</body>"
        ),
    );
}

#[test_case(1, "h1")]
#[test_case(2, "h2")]
#[test_case(3, "h3")]
#[test_case(4, "h4")]
#[test_case(5, "h5")]
#[test_case(6, "h6")]
fn heading_levels(level: u8, tag: &str) {
    let mut doc = Document::new();
    let root = doc.root();
    let h = block(&mut doc, root, NodeValue::heading(level));
    leaf(&mut doc, h, NodeValue::Text, "Title");

    compare(
        &doc,
        &format!("<body><{0}><a id=\"title\">Title</a></{0}></body>", tag),
    );
}

#[test]
fn heading_level_is_clamped() {
    assert_eq!(NodeValue::heading(0), NodeValue::Heading(1));
    assert_eq!(NodeValue::heading(9), NodeValue::Heading(6));
    assert_eq!(Markup::heading(0), Markup::H1);
    assert_eq!(Markup::heading(200), Markup::H6);
}

#[test]
fn heading_anchor_wraps_content() {
    let mut doc = Document::new();
    let root = doc.root();
    let h = block(&mut doc, root, NodeValue::heading(2));
    leaf(&mut doc, h, NodeValue::Text, "Hello World");

    let conversion = convert(&doc);
    let tree = &conversion.tree;
    let h2 = children(tree, body(&conversion))[0];
    assert_eq!(tree.markup(h2), Markup::H2);

    let a = match children(tree, h2).as_slice() {
        &[a] => a,
        other => panic!("expected one anchor, got {:?}", other),
    };
    assert_eq!(tree.markup(a), Markup::A);
    assert_eq!(tree.attributes(a), &[("id".to_string(), "hello-world".to_string())]);
    assert_eq!(tree.text_content(a), "Hello World");
    assert_eq!(
        html::tree_to_string(tree, h2),
        "<h2><a id=\"hello-world\">Hello World</a></h2>"
    );
}

#[test]
fn heading_with_styled_runs() {
    let mut doc = Document::new();
    let root = doc.root();
    let h = block(&mut doc, root, NodeValue::heading(1));
    leaf(&mut doc, h, NodeValue::Text, "Using");
    spaced(&mut doc, h, NodeValue::Code, "cargo");
    spaced(&mut doc, h, NodeValue::Emph, "Today");

    compare(
        &doc,
        concat!(
            "<body><h1><a id=\"using-cargo-today\">",
            "Using<code> cargo</code><em> Today</em>",
            "</a></h1></body>"
        ),
    );
}

#[test]
fn empty_heading_still_gets_anchor() {
    let mut doc = Document::new();
    let root = doc.root();
    block(&mut doc, root, NodeValue::heading(3));

    compare(&doc, "<body><h3><a id=\"\"></a></h3></body>");
}

#[test]
fn code_block_keeps_lines_verbatim() {
    let mut doc = Document::new();
    let root = doc.root();
    let code = block(&mut doc, root, NodeValue::CodeBlock);
    leaf(&mut doc, code, NodeValue::Text, "line1");
    leaf(&mut doc, code, NodeValue::Text, "line2");

    let conversion = convert(&doc);
    let tree = &conversion.tree;
    let pre = match children(tree, body(&conversion)).as_slice() {
        &[pre] => pre,
        other => panic!("expected one pre, got {:?}", other),
    };
    assert_eq!(tree.markup(pre), Markup::Pre);

    let lines = children(tree, pre);
    assert_eq!(markups(tree, pre), vec![Markup::None, Markup::None]);
    assert_eq!(tree.text(lines[0]), Some("line1"));
    assert_eq!(tree.text(lines[1]), Some("line2"));
}

#[test]
fn code_block_ignores_inline_semantics() {
    let mut doc = Document::new();
    let root = doc.root();
    let code = block(&mut doc, root, NodeValue::CodeBlock);
    leaf(&mut doc, code, NodeValue::Strong, "fn main() {\n");
    spaced(&mut doc, code, NodeValue::Link, "    x < y && z\n");
    block(&mut doc, code, NodeValue::Text);
    let nested = block(&mut doc, code, NodeValue::Paragraph);
    leaf(&mut doc, nested, NodeValue::Text, "never rendered");
    leaf(&mut doc, code, NodeValue::Text, "}\n");

    compare(
        &doc,
        "<body><pre>fn main() {\n    x &lt; y &amp;&amp; z\n}\n</pre></body>",
    );
}

#[test]
fn code_block_keeps_empty_lines() {
    let mut doc = Document::new();
    let root = doc.root();
    let code = block(&mut doc, root, NodeValue::CodeBlock);
    leaf(&mut doc, code, NodeValue::Text, "l1");
    block(&mut doc, code, NodeValue::Text);
    leaf(&mut doc, code, NodeValue::Text, "l2");

    let conversion = convert(&doc);
    let tree = &conversion.tree;
    let pre = children(tree, body(&conversion))[0];
    let lines: Vec<_> = tree.children(pre).map(|ch| tree.text(ch)).collect();
    assert_eq!(lines, vec![Some("l1"), Some(""), Some("l2")]);
}

#[test]
fn empty_code_block() {
    let mut doc = Document::new();
    let root = doc.root();
    block(&mut doc, root, NodeValue::CodeBlock);

    compare(&doc, "<body><pre></pre></body>");
}

#[test]
fn thematic_break_is_void() {
    let mut doc = Document::new();
    let root = doc.root();
    let p = para(&mut doc);
    leaf(&mut doc, p, NodeValue::Text, "Above");
    let hr = block(&mut doc, root, NodeValue::ThematicBreak);
    leaf(&mut doc, hr, NodeValue::Text, "ignored");
    let p = para(&mut doc);
    leaf(&mut doc, p, NodeValue::Text, "Below");

    let conversion = convert(&doc);
    let tree = &conversion.tree;
    let nodes = children(tree, body(&conversion));
    assert_eq!(
        markups(tree, body(&conversion)),
        vec![Markup::P, Markup::Hr, Markup::P]
    );
    assert!(children(tree, nodes[1]).is_empty());
}

#[test]
fn unmapped_blocks_splice_into_parent() {
    let mut doc = Document::new();
    let root = doc.root();
    let table = block(&mut doc, root, NodeValue::Table);
    let row = block(&mut doc, table, NodeValue::TableRow);
    let cell = block(&mut doc, row, NodeValue::TableCell);
    leaf(&mut doc, cell, NodeValue::Text, "a");
    let cell = block(&mut doc, row, NodeValue::TableCell);
    spaced(&mut doc, cell, NodeValue::Strong, "b");

    compare(&doc, "<body>a<strong> b</strong></body>");
}

#[test]
fn nested_document_node_splices() {
    let mut doc = Document::new();
    let root = doc.root();
    let inner = block(&mut doc, root, NodeValue::Document);
    let p = block(&mut doc, inner, NodeValue::Paragraph);
    leaf(&mut doc, p, NodeValue::Text, "inner");

    compare(&doc, "<body><p>inner</p></body>");
}

#[test]
fn source_order_is_preserved() {
    let mut doc = Document::new();
    let root = doc.root();
    let h = block(&mut doc, root, NodeValue::heading(1));
    leaf(&mut doc, h, NodeValue::Text, "A");
    let quote = block(&mut doc, root, NodeValue::BlockQuote);
    let p = block(&mut doc, quote, NodeValue::Paragraph);
    leaf(&mut doc, p, NodeValue::Text, "B");
    let code = block(&mut doc, quote, NodeValue::CodeBlock);
    leaf(&mut doc, code, NodeValue::Text, "C");
    let p = para(&mut doc);
    leaf(&mut doc, p, NodeValue::Text, "D");

    let conversion = convert(&doc);
    assert_eq!(conversion.tree.text_content(body(&conversion)), "ABCD");
    assert_eq!(
        html::tree_to_string(&conversion.tree, body(&conversion)),
        concat!(
            "<body><h1><a id=\"a\">A</a></h1>",
            "<blockquote><p>B</p><pre>C</pre></blockquote>",
            "<p>D</p></body>"
        )
    );
}

#[test]
fn deep_nesting_does_not_recurse() {
    let mut doc = Document::new();
    let mut parent = doc.root();
    for _ in 0..100_000 {
        parent = block(&mut doc, parent, NodeValue::BlockQuote);
    }
    leaf(&mut doc, parent, NodeValue::Text, "bottom");

    let conversion = convert(&doc);
    let tree = &conversion.tree;
    assert_eq!(tree.text_content(body(&conversion)), "bottom");
    // html, head, body, the quotes, and the text.
    assert_eq!(tree.len(), 3 + 100_000 + 1);
}
