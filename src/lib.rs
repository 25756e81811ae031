//! A converter from parsed Markdown trees to HTML document trees.
//!
//! The input is a [`Document`]: a tree of typed Markdown nodes carrying
//! text, URLs and a leading-whitespace flag, plus document metadata.  The
//! output is an [`HtmlTree`](html::HtmlTree) rooted at an `html` element with
//! a `head` built from the metadata and a `body` built from the content.
//!
//! ```
//! use marktree::{html, markdown_to_tree, Ast, Document, NodeValue, Options};
//!
//! let mut doc = Document::new();
//! doc.set_metadata("title", "Intro");
//! let heading = doc.append(doc.root(), Ast::new(NodeValue::heading(2)));
//! doc.append(heading, Ast::new(NodeValue::Text).with_text("Hello World"));
//!
//! let conversion = markdown_to_tree(&doc, "intro.md", &Options::default());
//! assert_eq!(
//!     html::tree_to_string(&conversion.tree, conversion.html),
//!     "<html><head><title>Intro</title></head>\
//!      <body><h2><a id=\"hello-world\">Hello World</a></h2></body></html>"
//! );
//! assert!(conversion.diagnostics.is_clean());
//! ```
//!
//! The converter never fails.  Node kinds without an element mapping splice
//! their content into the parent, missing metadata or URLs simply omit the
//! corresponding output, and over-long anchors and prefixed texts are cut at
//! their buffer capacity (see [`Options`]) and reported in [`Diagnostics`].

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod arena_tree;
mod character_set;
pub mod convert;
pub mod html;
pub mod nodes;
mod options;
mod strings;

pub use crate::convert::{
    append_document, markdown_to_tree, Conversion, Diagnostics, Truncation, TruncationKind,
};
pub use crate::html::{Anchor, Anchorizer, HtmlId, HtmlNode, HtmlTree, Markup};
pub use crate::nodes::{Ast, AstId, Document, NodeValue};
pub use crate::options::{Options, DEFAULT_CAPACITY};
