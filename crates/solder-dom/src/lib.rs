//! solder DOM - the host platform side of the binding engine
//!
//! A small arena DOM with element attributes, shadow roots, a per-document
//! custom element registry, and a drainable lifecycle event queue. The
//! binding engine in the `solder` crate never touches nodes directly except
//! through this crate; lifecycle callbacks are delivered as queued
//! [`LifecycleEvent`] records that the embedder drains after each mutation.

mod attributes;
mod document;
mod lifecycle;
mod node;
mod registry;
mod shadow;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use document::Document;
pub use lifecycle::LifecycleEvent;
pub use node::{ElementData, Node, NodeData};
pub use registry::{CustomElementRegistry, ElementDefinition, RegistryError};
pub use shadow::{ShadowRootData, ShadowRootMode};
pub use tree::{Children, DomTree};

/// Node identifier (index into the arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root document node
    pub const ROOT: NodeId = NodeId(0);
    /// Absent node (no parent, no sibling, unlinked)
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }
}
