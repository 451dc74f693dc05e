//! Lifecycle callback records
//!
//! The host does not call into the embedder directly; every mutation that
//! concerns a defined custom element enqueues one of these records on the
//! owning document, and the embedder drains them in order.

use crate::NodeId;

/// One queued lifecycle callback for a custom element instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The element's synthesized constructor must run
    Constructed { node: NodeId },
    /// The element became part of the document tree
    Connected { node: NodeId },
    /// The element left the document tree
    Disconnected { node: NodeId },
    /// An observed attribute changed (including its initial application);
    /// `new_value` is `None` on removal
    AttributeChanged {
        node: NodeId,
        name: String,
        old_value: Option<String>,
        new_value: Option<String>,
        namespace: Option<String>,
    },
    /// The element moved between documents; both references are opaque
    Adopted {
        node: NodeId,
        old_document: String,
        new_document: String,
    },
}
