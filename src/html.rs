//! The HTML document tree produced by the converter, and a compact
//! serializer for inspecting it.

mod anchorizer;

use std::fmt::{self, Write};

use smallvec::SmallVec;

use crate::arena_tree::{self, Arena, Children, Id};
use crate::character_set::character_set;

pub use anchorizer::{Anchor, Anchorizer};

/// The element of an [`HtmlNode`], or [`Markup::None`] for a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Markup {
    /// No element: the node is plain text.
    None,
    Html,
    Head,
    Title,
    Meta,
    Body,
    Blockquote,
    Ol,
    Ul,
    Li,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    P,
    Pre,
    Hr,
    A,
    Em,
    Strong,
    Del,
    Code,
    Img,
    Br,
    Wbr,
}

impl Markup {
    /// The heading element for `level`, clamped to `1..=6`.
    pub fn heading(level: u8) -> Markup {
        match level {
            0 | 1 => Markup::H1,
            2 => Markup::H2,
            3 => Markup::H3,
            4 => Markup::H4,
            5 => Markup::H5,
            _ => Markup::H6,
        }
    }

    /// The tag name, or `None` for plain text.
    pub fn tag_name(self) -> Option<&'static str> {
        Some(match self {
            Markup::None => return None,
            Markup::Html => "html",
            Markup::Head => "head",
            Markup::Title => "title",
            Markup::Meta => "meta",
            Markup::Body => "body",
            Markup::Blockquote => "blockquote",
            Markup::Ol => "ol",
            Markup::Ul => "ul",
            Markup::Li => "li",
            Markup::H1 => "h1",
            Markup::H2 => "h2",
            Markup::H3 => "h3",
            Markup::H4 => "h4",
            Markup::H5 => "h5",
            Markup::H6 => "h6",
            Markup::P => "p",
            Markup::Pre => "pre",
            Markup::Hr => "hr",
            Markup::A => "a",
            Markup::Em => "em",
            Markup::Strong => "strong",
            Markup::Del => "del",
            Markup::Code => "code",
            Markup::Img => "img",
            Markup::Br => "br",
            Markup::Wbr => "wbr",
        })
    }

    /// Whether the element never has content.
    pub fn is_void(self) -> bool {
        matches!(
            self,
            Markup::Meta | Markup::Hr | Markup::Img | Markup::Br | Markup::Wbr
        )
    }
}

/// Attribute name/value pairs, in the order they were first set.
pub type Attributes = SmallVec<[(String, String); 2]>;

/// A single node of the HTML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlNode {
    pub markup: Markup,

    /// The text of a [`Markup::None`] node.
    pub text: Option<String>,

    pub attributes: Attributes,
}

/// A handle to a node of an [`HtmlTree`].
pub type HtmlId = Id<HtmlNode>;

/// An HTML document tree under construction.
///
/// Nodes are only ever added; the tree supports appending children,
/// setting attributes, and reading everything back.
#[derive(Debug)]
pub struct HtmlTree {
    arena: Arena<HtmlNode>,
}

impl Default for HtmlTree {
    fn default() -> Self {
        HtmlTree::new()
    }
}

impl HtmlTree {
    pub fn new() -> Self {
        HtmlTree {
            arena: Arena::new(),
        }
    }

    /// Create a node with no parent.
    pub fn create_root(&mut self, markup: Markup) -> HtmlId {
        arena_tree::alloc(
            &mut self.arena,
            HtmlNode {
                markup,
                text: None,
                attributes: Attributes::new(),
            },
        )
    }

    /// Create a node as the last child of `parent`.
    pub fn create_child(&mut self, parent: HtmlId, markup: Markup, text: Option<&str>) -> HtmlId {
        let id = arena_tree::alloc(
            &mut self.arena,
            HtmlNode {
                markup,
                text: text.map(str::to_owned),
                attributes: Attributes::new(),
            },
        );
        parent.append(&self.arena, id);
        id
    }

    /// Append a plain-text run as the last child of `parent`.
    pub fn append_text(&mut self, parent: HtmlId, text: &str) -> HtmlId {
        self.create_child(parent, Markup::None, Some(text))
    }

    /// Set an attribute, replacing any existing value for `name`.
    pub fn set_attribute(&mut self, id: HtmlId, name: &str, value: &str) {
        let attributes = &mut id.data_mut(&mut self.arena).attributes;
        match attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => {
                v.clear();
                v.push_str(value);
            }
            None => attributes.push((name.to_owned(), value.to_owned())),
        }
    }

    pub fn node(&self, id: HtmlId) -> &HtmlNode {
        id.data(&self.arena)
    }

    pub fn markup(&self, id: HtmlId) -> Markup {
        self.node(id).markup
    }

    pub fn text(&self, id: HtmlId) -> Option<&str> {
        self.node(id).text.as_deref()
    }

    pub fn attribute(&self, id: HtmlId, name: &str) -> Option<&str> {
        self.node(id)
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self, id: HtmlId) -> &[(String, String)] {
        &self.node(id).attributes
    }

    pub fn parent(&self, id: HtmlId) -> Option<HtmlId> {
        id.parent(&self.arena)
    }

    pub fn first_child(&self, id: HtmlId) -> Option<HtmlId> {
        id.first_child(&self.arena)
    }

    pub fn last_child(&self, id: HtmlId) -> Option<HtmlId> {
        id.last_child(&self.arena)
    }

    pub fn next_sibling(&self, id: HtmlId) -> Option<HtmlId> {
        id.next_sibling(&self.arena)
    }

    pub fn children(&self, id: HtmlId) -> Children<'_, HtmlNode> {
        id.children(&self.arena)
    }

    /// The number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// Concatenate the text of `id` and all its descendants, in tree order.
    pub fn text_content(&self, id: HtmlId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            if let Some(text) = self.text(id) {
                out.push_str(text);
            }
            stack.extend(id.reverse_children(&self.arena));
        }
        out
    }
}

/// Formats the subtree rooted at `root` as compact HTML.
///
/// Attributes appear in the order they were set; no whitespace is added
/// between elements, and void elements have no end tag.
pub fn format_tree(tree: &HtmlTree, root: HtmlId, output: &mut dyn Write) -> fmt::Result {
    // Work stack with a pre phase that writes the start tag and queues the
    // children, and a post phase that writes the end tag.
    enum Phase {
        Pre,
        Post(&'static str),
    }
    let mut stack = vec![(root, Phase::Pre)];

    while let Some((id, phase)) = stack.pop() {
        let node = tree.node(id);
        match phase {
            Phase::Pre => {
                match node.markup.tag_name() {
                    None => {
                        if let Some(ref text) = node.text {
                            escape(output, text, &TEXT_UNSAFE)?;
                        }
                    }
                    Some(tag) => {
                        output.write_char('<')?;
                        output.write_str(tag)?;
                        for (name, value) in &node.attributes {
                            write!(output, " {}=\"", name)?;
                            escape(output, value, &ATTRIBUTE_UNSAFE)?;
                            output.write_char('"')?;
                        }
                        output.write_char('>')?;
                        if node.markup.is_void() {
                            continue;
                        }
                        stack.push((id, Phase::Post(tag)));
                    }
                }

                for ch in id.reverse_children(&tree.arena) {
                    stack.push((ch, Phase::Pre));
                }
            }
            Phase::Post(tag) => {
                write!(output, "</{}>", tag)?;
            }
        }
    }

    Ok(())
}

/// Formats the subtree rooted at `root` into a new `String`.
pub fn tree_to_string(tree: &HtmlTree, root: HtmlId) -> String {
    let mut s = String::new();
    // Writing into a String cannot fail.
    let _ = format_tree(tree, root, &mut s);
    s
}

const TEXT_UNSAFE: [bool; 256] = character_set!(b"&<>");
const ATTRIBUTE_UNSAFE: [bool; 256] = character_set!(b"&<>\"");

fn escape(output: &mut dyn Write, buffer: &str, unsafe_set: &[bool; 256]) -> fmt::Result {
    let bytes = buffer.as_bytes();
    let mut offset = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        if unsafe_set[byte as usize] {
            let esc: &str = match byte {
                b'"' => "&quot;",
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                _ => unreachable!(),
            };
            output.write_str(&buffer[offset..i])?;
            output.write_str(esc)?;
            offset = i + 1;
        }
    }
    output.write_str(&buffer[offset..])
}
