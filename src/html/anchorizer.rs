use crate::nodes::{AstId, Document};
use crate::options::DEFAULT_CAPACITY;

/// Converts heading and link text to anchor identifiers.
///
/// ASCII letters and digits are lowercased and kept, `.` and `-` are kept,
/// spaces become `-`, and everything else is dropped.  The result is bounded
/// by a fixed capacity that, like a C string buffer, reserves one byte for a
/// terminator: an anchorizer of capacity 1024 yields at most 1023 bytes.
/// Writing stops silently once the anchor is full.
///
/// ## Example
///
/// ```
/// # use marktree::html::Anchorizer;
/// let anchorizer = Anchorizer::new();
/// assert_eq!("ticks-arent-in", anchorizer.anchorize("Ticks aren't in").id);
/// assert_eq!("v1.2-notes", anchorizer.anchorize("v1.2 Notes!").id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchorizer {
    capacity: usize,
}

/// An anchor produced by an [`Anchorizer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Anchor {
    /// The anchor identifier.
    pub id: String,

    /// Whether characters were dropped because the anchor was full.
    pub truncated: bool,
}

impl Default for Anchorizer {
    fn default() -> Self {
        Anchorizer::new()
    }
}

impl Anchorizer {
    /// Construct an anchorizer with the default capacity of 1024 bytes.
    pub fn new() -> Self {
        Anchorizer::with_capacity(DEFAULT_CAPACITY)
    }

    /// Construct an anchorizer whose anchors fit in `capacity` bytes,
    /// terminator included.
    pub fn with_capacity(capacity: usize) -> Self {
        Anchorizer { capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Anchorize a plain string.
    pub fn anchorize(&self, text: &str) -> Anchor {
        let mut buffer = AnchorBuffer::new(self.capacity);
        buffer.transliterate(text);
        buffer.finish()
    }

    /// Anchorize a block from the text of its direct children.
    ///
    /// A child preceded by whitespace contributes a `-` before its own text.
    /// Grandchildren are not visited.
    ///
    /// ```
    /// # use marktree::html::Anchorizer;
    /// # use marktree::{Ast, Document, NodeValue};
    /// let mut doc = Document::new();
    /// let heading = doc.append(doc.root(), Ast::new(NodeValue::heading(1)));
    /// doc.append(heading, Ast::new(NodeValue::Text).with_text("Getting"));
    /// doc.append(
    ///     heading,
    ///     Ast::new(NodeValue::Emph).with_text("Started").with_whitespace(true),
    /// );
    /// assert_eq!("getting-started", Anchorizer::new().anchorize_block(&doc, heading).id);
    /// ```
    pub fn anchorize_block(&self, doc: &Document, block: AstId) -> Anchor {
        let mut buffer = AnchorBuffer::new(self.capacity);
        for child in doc.children(block) {
            if doc.whitespace(child) {
                buffer.push(b'-');
            }
            if let Some(text) = doc.text(child) {
                buffer.transliterate(text);
            }
        }
        buffer.finish()
    }
}

struct AnchorBuffer {
    id: String,
    limit: usize,
    truncated: bool,
}

impl AnchorBuffer {
    fn new(capacity: usize) -> Self {
        let limit = capacity.saturating_sub(1);
        AnchorBuffer {
            id: String::with_capacity(limit.min(64)),
            limit,
            truncated: false,
        }
    }

    fn push(&mut self, byte: u8) -> bool {
        if self.id.len() >= self.limit {
            self.truncated = true;
            return false;
        }
        self.id.push(byte as char);
        true
    }

    fn transliterate(&mut self, text: &str) {
        for &byte in text.as_bytes() {
            let out = match byte {
                b'0'..=b'9' | b'a'..=b'z' | b'.' | b'-' => byte,
                b'A'..=b'Z' => byte.to_ascii_lowercase(),
                b' ' => b'-',
                _ => continue,
            };
            if !self.push(out) {
                break;
            }
        }
    }

    fn finish(self) -> Anchor {
        Anchor {
            id: self.id,
            truncated: self.truncated,
        }
    }
}
