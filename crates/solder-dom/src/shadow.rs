//! Shadow DOM
//!
//! Shadow roots live in the same arena as everything else. A shadow root
//! node parents to its host element but is never part of the host's child
//! list, so it is reachable for connectivity checks without showing up in
//! ordinary traversal.

use crate::{DomTree, Node, NodeId};

/// Shadow root mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowRootMode {
    #[default]
    Open,
    Closed,
}

/// Shadow-root-specific data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowRootData {
    pub host: NodeId,
    pub mode: ShadowRootMode,
}

impl DomTree {
    /// Attach a shadow root to `host`, or reuse the existing one with its
    /// content cleared. Reuse keeps re-connection well defined: the host may
    /// deliver a connect callback more than once for the same element.
    pub fn attach_shadow(&mut self, host: NodeId, mode: ShadowRootMode) -> NodeId {
        if let Some(existing) = self.shadow_root(host) {
            self.clear_children(existing);
            return existing;
        }
        let shadow = self.alloc(Node::shadow_root(host, mode));
        if let Some(n) = self.get_mut(shadow) {
            n.parent = host;
        }
        if let Some(e) = self.get_mut(host).and_then(|n| n.as_element_mut()) {
            e.shadow_root = shadow;
        }
        shadow
    }

    /// Shadow root attached to `host`, if any
    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.get(host)
            .and_then(|n| n.as_element())
            .map(|e| e.shadow_root)
            .filter(|id| id.is_valid())
    }
}
