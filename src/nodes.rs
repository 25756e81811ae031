//! The parsed Markdown tree consumed by the converter.
//!
//! A parser populates a [`Document`] through [`Document::append`] and
//! [`Document::set_metadata`]; the converter only ever reads it.

use crate::arena_tree::{self, Arena, Children, Id, ReverseChildren};
use rustc_hash::FxHashMap;

/// The kind of a Markdown node.
///
/// Text, URLs and the whitespace flag live on [`Ast`] rather than in the
/// variants: inline nodes carry their own text instead of owning a separate
/// text child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    test,
    derive(strum::EnumDiscriminants),
    strum_discriminants(derive(strum::VariantArray))
)]
pub enum NodeValue {
    /// **Block**. The root of every document.
    Document,

    /// **Block**. The metadata header.  Contains [`NodeValue::MetadataText`]
    /// leaves.
    Metadata,

    /// **Block**. A block quote.  Contains other blocks.
    BlockQuote,

    /// **Block**. A numbered list.  Contains list items.
    OrderedList,

    /// **Block**. A bulleted list.  Contains list items.
    UnorderedList,

    /// **Block**. A list item.  Contains blocks or inlines.
    ListItem,

    /// **Block**. A table.  Contains table rows.
    Table,

    /// **Block**. A table row.  Contains table cells.
    TableRow,

    /// **Block**. A table cell.  Contains inlines.
    TableCell,

    /// **Block**. A heading of level 1 to 6.  Contains inlines.
    Heading(u8),

    /// **Block**. A paragraph.  Contains inlines.
    Paragraph,

    /// **Block**. A code block.  Each child is one raw line of code.
    CodeBlock,

    /// **Block**. A thematic break.  Has no children.
    ThematicBreak,

    /// **Inline**. Plain text.
    Text,

    /// **Inline**. Emphasized text.
    Emph,

    /// **Inline**. Strong text.
    Strong,

    /// **Inline**. Struck-through text.
    Strikethrough,

    /// **Inline**. Linked text; the URL `"@"` targets the anchor derived from
    /// the text itself.
    Link,

    /// **Inline**. A code span.
    Code,

    /// **Inline**. An image; the text is its alternate text.
    Image,

    /// **Inline**. A hard line break.
    LineBreak,

    /// **Inline**. A soft line break.
    SoftBreak,

    /// **Inline**. One line of the metadata header.
    MetadataText,

    /// **Inline**. A task list checkbox.
    Checkbox,
}

impl NodeValue {
    /// A heading of the given level, clamped to `1..=6`.
    pub fn heading(level: u8) -> NodeValue {
        NodeValue::Heading(level.clamp(1, 6))
    }

    /// Indicates whether this node is a block node or inline node.
    pub fn block(&self) -> bool {
        matches!(
            *self,
            NodeValue::Document
                | NodeValue::Metadata
                | NodeValue::BlockQuote
                | NodeValue::OrderedList
                | NodeValue::UnorderedList
                | NodeValue::ListItem
                | NodeValue::Table
                | NodeValue::TableRow
                | NodeValue::TableCell
                | NodeValue::Heading(..)
                | NodeValue::Paragraph
                | NodeValue::CodeBlock
                | NodeValue::ThematicBreak
        )
    }

    /// A short lowercase name for the node kind, used in logs.
    pub fn name(&self) -> &'static str {
        match *self {
            NodeValue::Document => "document",
            NodeValue::Metadata => "metadata",
            NodeValue::BlockQuote => "block_quote",
            NodeValue::OrderedList => "ordered_list",
            NodeValue::UnorderedList => "unordered_list",
            NodeValue::ListItem => "list_item",
            NodeValue::Table => "table",
            NodeValue::TableRow => "table_row",
            NodeValue::TableCell => "table_cell",
            NodeValue::Heading(..) => "heading",
            NodeValue::Paragraph => "paragraph",
            NodeValue::CodeBlock => "code_block",
            NodeValue::ThematicBreak => "thematic_break",
            NodeValue::Text => "text",
            NodeValue::Emph => "emph",
            NodeValue::Strong => "strong",
            NodeValue::Strikethrough => "strikethrough",
            NodeValue::Link => "link",
            NodeValue::Code => "code",
            NodeValue::Image => "image",
            NodeValue::LineBreak => "linebreak",
            NodeValue::SoftBreak => "softbreak",
            NodeValue::MetadataText => "metadata_text",
            NodeValue::Checkbox => "checkbox",
        }
    }
}

/// A single node of the Markdown tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    /// The node kind.
    pub value: NodeValue,

    /// Text content, for leaves and code lines.
    pub text: Option<String>,

    /// Link destination or image source.
    pub url: Option<String>,

    /// Whether the node was preceded by whitespace in the source.
    pub whitespace: bool,
}

impl Ast {
    /// Create a node of the given kind with no text, URL or leading
    /// whitespace.
    pub fn new(value: NodeValue) -> Self {
        Ast {
            value,
            text: None,
            url: None,
            whitespace: false,
        }
    }

    /// Set the node's text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the node's URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set whether the node was preceded by whitespace.
    pub fn with_whitespace(mut self, whitespace: bool) -> Self {
        self.whitespace = whitespace;
        self
    }
}

/// A handle to a node of a [`Document`].
pub type AstId = Id<Ast>;

/// A parsed Markdown document: the node tree and its metadata.
#[derive(Debug)]
pub struct Document {
    arena: Arena<Ast>,
    root: AstId,
    metadata: FxHashMap<String, String>,
}

impl Default for Document {
    fn default() -> Self {
        Document::new()
    }
}

impl Document {
    /// Create an empty document holding only its [`NodeValue::Document`]
    /// root.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena_tree::alloc(&mut arena, Ast::new(NodeValue::Document));
        Document {
            arena,
            root,
            metadata: FxHashMap::default(),
        }
    }

    /// The root node.
    pub fn root(&self) -> AstId {
        self.root
    }

    /// Append `ast` as the last child of `parent`, returning the new node.
    pub fn append(&mut self, parent: AstId, ast: Ast) -> AstId {
        let id = arena_tree::alloc(&mut self.arena, ast);
        parent.append(&self.arena, id);
        id
    }

    /// Set a metadata value, returning the previous one for `key`.
    pub fn set_metadata(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.metadata.insert(key.into(), value.into())
    }

    /// Look up a metadata value.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// The number of nodes in the document, root included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether the document holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.root.first_child(&self.arena).is_none()
    }

    pub fn ast(&self, id: AstId) -> &Ast {
        id.data(&self.arena)
    }

    pub fn value(&self, id: AstId) -> NodeValue {
        self.ast(id).value
    }

    pub fn text(&self, id: AstId) -> Option<&str> {
        self.ast(id).text.as_deref()
    }

    pub fn url(&self, id: AstId) -> Option<&str> {
        self.ast(id).url.as_deref()
    }

    pub fn whitespace(&self, id: AstId) -> bool {
        self.ast(id).whitespace
    }

    pub fn parent(&self, id: AstId) -> Option<AstId> {
        id.parent(&self.arena)
    }

    pub fn first_child(&self, id: AstId) -> Option<AstId> {
        id.first_child(&self.arena)
    }

    pub fn next_sibling(&self, id: AstId) -> Option<AstId> {
        id.next_sibling(&self.arena)
    }

    /// Iterate over the children of `id` in source order.
    pub fn children(&self, id: AstId) -> Children<'_, Ast> {
        id.children(&self.arena)
    }

    pub(crate) fn reverse_children(&self, id: AstId) -> ReverseChildren<'_, Ast> {
        id.reverse_children(&self.arena)
    }
}
