//! DOM Node
//!
//! Sibling-linked node records stored in the arena. Shadow roots are nodes
//! too: they parent to their host element but sit outside its child list, so
//! ordinary child traversal never crosses a shadow boundary.

use crate::attributes::NamedNodeMap;
use crate::shadow::{ShadowRootData, ShadowRootMode};
use crate::NodeId;

/// DOM Node - core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn detached(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::detached(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::detached(NodeData::Text(content.into()))
    }

    /// Create a comment node
    pub fn comment(content: impl Into<String>) -> Self {
        Self::detached(NodeData::Comment(content.into()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::detached(NodeData::Document)
    }

    /// Create a shadow root node for `host`
    pub fn shadow_root(host: NodeId, mode: ShadowRootMode) -> Self {
        Self::detached(NodeData::ShadowRoot(ShadowRootData { host, mode }))
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
    /// Shadow root attached to a host element
    ShadowRoot(ShadowRootData),
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Tag name (lowercase for HTML elements)
    pub tag_name: String,
    /// Attribute collection
    pub attributes: NamedNodeMap,
    /// Attached shadow root, NONE if never attached
    pub shadow_root: NodeId,
    /// Whether the registry constructor already ran for this element.
    /// Parsed elements start false and upgrade when they connect.
    pub custom_constructed: bool,
}

impl ElementData {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag_name: tag.into(),
            attributes: NamedNodeMap::new(),
            shadow_root: NodeId::NONE,
            custom_constructed: false,
        }
    }

    /// Value of the `id` attribute, if any
    pub fn id(&self) -> Option<&str> {
        self.attributes.get("id")
    }
}
