//! Conversion of a Markdown [`Document`] into an HTML document tree.
//!
//! Blocks map onto wrapping elements and inlines onto text-level elements.
//! Adjacent inlines of the same style share one element, headings wrap their
//! content in an anchor, and code blocks keep their lines verbatim.

use std::borrow::Cow;

use tracing::{debug, debug_span, trace};

use crate::html::{Anchorizer, HtmlId, HtmlTree, Markup};
use crate::nodes::{AstId, Document, NodeValue};
use crate::options::Options;
use crate::strings;

/// Metadata keys rendered as `<meta name=… content=…>`, in output order.
const META_KEYS: [&str; 3] = ["author", "copyright", "version"];

/// The result of [`markdown_to_tree`].
#[derive(Debug)]
pub struct Conversion {
    /// The output tree.
    pub tree: HtmlTree,

    /// The `html` element at the root of `tree`.
    pub html: HtmlId,

    /// Silent degradations that happened along the way.
    pub diagnostics: Diagnostics,
}

/// Where the converter had to cut content short.
///
/// Truncation never fails a conversion; callers that care can inspect this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub truncations: Vec<Truncation>,
}

impl Diagnostics {
    /// Whether nothing was truncated.
    pub fn is_clean(&self) -> bool {
        self.truncations.is_empty()
    }
}

/// One truncated anchor or text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncation {
    /// The Markdown node whose output was cut.
    pub node: AstId,
    pub kind: TruncationKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruncationKind {
    /// The `id` anchor of a heading.
    HeadingAnchor,
    /// The `href` of a link targeting `"@"`.
    LinkAnchor,
    /// Whitespace-prefixed inline text.
    Text,
}

/// Convert `doc` into a new tree rooted at an `html` element.
///
/// `base` is the path or URL the document was read from.  The converter
/// itself resolves nothing against it.
pub fn markdown_to_tree(doc: &Document, base: &str, options: &Options) -> Conversion {
    let mut tree = HtmlTree::new();
    let html = tree.create_root(Markup::Html);
    let diagnostics = fill_document(&mut tree, html, doc, base, options);
    Conversion {
        tree,
        html,
        diagnostics,
    }
}

/// Convert `doc` into an `html` element appended to `parent` in an existing
/// tree.
pub fn append_document(
    tree: &mut HtmlTree,
    parent: HtmlId,
    doc: &Document,
    base: &str,
    options: &Options,
) -> (HtmlId, Diagnostics) {
    let html = tree.create_child(parent, Markup::Html, None);
    let diagnostics = fill_document(tree, html, doc, base, options);
    (html, diagnostics)
}

fn fill_document(
    tree: &mut HtmlTree,
    html: HtmlId,
    doc: &Document,
    base: &str,
    options: &Options,
) -> Diagnostics {
    let _span = debug_span!("markdown_to_tree", base).entered();

    let head = tree.create_child(html, Markup::Head, None);
    if let Some(title) = doc.metadata("title") {
        let temp = tree.create_child(head, Markup::Title, None);
        tree.append_text(temp, title);
    }
    for &key in META_KEYS.iter() {
        if let Some(content) = doc.metadata(key) {
            let temp = tree.create_child(head, Markup::Meta, None);
            tree.set_attribute(temp, "name", key);
            tree.set_attribute(temp, "content", content);
        }
    }

    let body = tree.create_child(html, Markup::Body, None);
    let mut converter = Converter {
        doc,
        tree,
        anchorizer: Anchorizer::with_capacity(options.anchor_capacity),
        text_capacity: options.text_capacity,
        diagnostics: Diagnostics::default(),
    };
    converter.add_block(body, doc.root());

    debug!(
        nodes = doc.len(),
        truncations = converter.diagnostics.truncations.len(),
        "converted document"
    );
    converter.diagnostics
}

/// The element wrapping a block, or [`Markup::None`] to splice its content
/// into the parent.
pub fn block_markup(value: NodeValue) -> Markup {
    match value {
        NodeValue::BlockQuote => Markup::Blockquote,
        NodeValue::OrderedList => Markup::Ol,
        NodeValue::UnorderedList => Markup::Ul,
        NodeValue::ListItem => Markup::Li,
        NodeValue::Heading(level) => Markup::heading(level),
        NodeValue::Paragraph => Markup::P,
        _ => Markup::None,
    }
}

/// The element styling an inline, or [`Markup::None`] for plain text.
pub fn leaf_markup(value: NodeValue) -> Markup {
    match value {
        NodeValue::Emph => Markup::Em,
        NodeValue::Strong => Markup::Strong,
        NodeValue::Strikethrough => Markup::Del,
        NodeValue::Link => Markup::A,
        NodeValue::Code => Markup::Code,
        _ => Markup::None,
    }
}

/// What opening a block left behind.
enum Opened {
    /// The block was fully rendered; its children must not be visited.
    Closed,
    /// Children of the block attach under this node.
    Into(HtmlId),
}

struct Converter<'d, 't> {
    doc: &'d Document,
    tree: &'t mut HtmlTree,
    anchorizer: Anchorizer,
    text_capacity: usize,
    diagnostics: Diagnostics,
}

impl<'d, 't> Converter<'d, 't> {
    /// Append the HTML for the block `node` and all its descendants under
    /// `parent`.
    fn add_block(&mut self, parent: HtmlId, node: AstId) {
        // Pre-order walk with an explicit stack.  Children are pushed in
        // reverse so they are popped, and therefore appended, in source
        // order; the run-merging lookup depends on that order.
        let doc = self.doc;
        let mut stack = vec![(parent, node)];

        while let Some((parent, node)) = stack.pop() {
            if !doc.value(node).block() {
                self.add_leaf(parent, node);
                continue;
            }

            if let Opened::Into(insertion) = self.open_block(parent, node) {
                for child in doc.reverse_children(node) {
                    stack.push((insertion, child));
                }
            }
        }
    }

    fn open_block(&mut self, parent: HtmlId, node: AstId) -> Opened {
        let doc = self.doc;
        let value = doc.value(node);
        trace!(kind = value.name(), "block");

        match value {
            NodeValue::CodeBlock => {
                let pre = self.tree.create_child(parent, Markup::Pre, None);
                for line in doc.children(node) {
                    self.tree.append_text(pre, doc.text(line).unwrap_or(""));
                }
                return Opened::Closed;
            }
            NodeValue::ThematicBreak => {
                self.tree.create_child(parent, Markup::Hr, None);
                return Opened::Closed;
            }
            _ => {}
        }

        let block = match block_markup(value) {
            Markup::None => parent,
            element => self.tree.create_child(parent, element, None),
        };

        if let NodeValue::Heading(..) = value {
            let anchor = self.anchorizer.anchorize_block(doc, node);
            if anchor.truncated {
                self.truncated(node, TruncationKind::HeadingAnchor);
            }
            let a = self.tree.create_child(block, Markup::A, None);
            self.tree.set_attribute(a, "id", &anchor.id);
            return Opened::Into(a);
        }

        Opened::Into(block)
    }

    /// Append the HTML for the inline `node` under `parent`.
    fn add_leaf(&mut self, parent: HtmlId, node: AstId) {
        let doc = self.doc;
        let ast = doc.ast(node);

        let element = match ast.value {
            NodeValue::Image => {
                if ast.whitespace {
                    self.tree.append_text(parent, " ");
                }
                let img = self.tree.create_child(parent, Markup::Img, None);
                if let Some(ref url) = ast.url {
                    self.tree.set_attribute(img, "src", url);
                }
                if let Some(ref text) = ast.text {
                    self.tree.set_attribute(img, "alt", text);
                }
                return;
            }
            NodeValue::LineBreak => {
                self.tree.create_child(parent, Markup::Br, None);
                return;
            }
            NodeValue::SoftBreak => {
                self.tree.create_child(parent, Markup::Wbr, None);
                return;
            }
            NodeValue::MetadataText => return,
            value => leaf_markup(value),
        };

        let destination = match element {
            Markup::None => parent,
            _ => match self.tree.last_child(parent) {
                Some(last) if self.tree.markup(last) == element => last,
                _ => self.open_inline(parent, node, element),
            },
        };

        // Every leaf leaves a text run, possibly empty, which becomes the
        // parent's last child and ends any run of the same style.
        let text = ast.text.as_deref().unwrap_or("");
        let text: Cow<'_, str> = if ast.whitespace {
            let (prefixed, truncated) = strings::prefix_space(text, self.text_capacity);
            if truncated {
                self.truncated(node, TruncationKind::Text);
            }
            Cow::Owned(prefixed)
        } else {
            Cow::Borrowed(text)
        };

        self.tree.append_text(destination, &text);
    }

    /// Start a new inline element; links get their `href` here and only
    /// here, so a merged run keeps the target of its first link.
    fn open_inline(&mut self, parent: HtmlId, node: AstId, element: Markup) -> HtmlId {
        let doc = self.doc;
        let inline = self.tree.create_child(parent, element, None);

        if element == Markup::A {
            if let Some(url) = doc.url(node) {
                if url == "@" {
                    let anchor = self.anchorizer.anchorize(doc.text(node).unwrap_or(""));
                    if anchor.truncated {
                        self.truncated(node, TruncationKind::LinkAnchor);
                    }
                    self.tree.set_attribute(inline, "href", &anchor.id);
                } else {
                    self.tree.set_attribute(inline, "href", url);
                }
            }
        }

        inline
    }

    fn truncated(&mut self, node: AstId, kind: TruncationKind) {
        debug!(node = node.index(), ?kind, "truncated output");
        self.diagnostics.truncations.push(Truncation { node, kind });
    }
}
