//! DOM Tree (arena-based allocation)

use crate::{Node, NodeId};

/// Arena-based DOM tree. Slot 0 is always the document node; detached nodes
/// stay in the arena until the tree is dropped.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree containing only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element node
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(Node::text(content))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.alloc(Node::comment(content))
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append `child` as the last child of `parent`, detaching it from its
    /// previous parent first. Appends that would make a node its own
    /// ancestor are refused and leave the tree untouched; the parent chain
    /// must stay acyclic for connectivity walks to terminate.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        if self.is_ancestor(child, parent) {
            tracing::debug!(?parent, ?child, "refused append of a node under its own descendant");
            return;
        }
        self.detach(child);
        let last = self.get(parent).map(|n| n.last_child).unwrap_or(NodeId::NONE);
        if last.is_valid() {
            if let Some(l) = self.get_mut(last) {
                l.next_sibling = child;
            }
            if let Some(c) = self.get_mut(child) {
                c.prev_sibling = last;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = child;
        }
        if let Some(p) = self.get_mut(parent) {
            p.last_child = child;
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = parent;
        }
    }

    /// Unlink `node` from its parent and siblings; its own subtree is kept
    pub fn detach(&mut self, node: NodeId) {
        let (parent, prev, next) = match self.get(node) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };
        if let Some(p) = self.get_mut(prev) {
            p.next_sibling = next;
        }
        if let Some(n) = self.get_mut(next) {
            n.prev_sibling = prev;
        }
        if parent.is_valid() {
            if let Some(p) = self.get_mut(parent) {
                if p.first_child == node {
                    p.first_child = next;
                }
                if p.last_child == node {
                    p.last_child = prev;
                }
            }
        }
        if let Some(n) = self.get_mut(node) {
            n.parent = NodeId::NONE;
            n.prev_sibling = NodeId::NONE;
            n.next_sibling = NodeId::NONE;
        }
    }

    /// Detach every child of `parent`
    pub fn clear_children(&mut self, parent: NodeId) {
        loop {
            let first = match self.get(parent) {
                Some(n) if n.first_child.is_valid() => n.first_child,
                _ => return,
            };
            self.detach(first);
        }
    }

    /// Iterate over the direct children of `parent`
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        let first = self.get(parent).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Children { tree: self, next: first }
    }

    /// Whether `node` appears in the inclusive ancestor chain of `other`.
    /// Shadow content parents through its host, so a shadow host counts as
    /// an ancestor of its shadow subtree.
    fn is_ancestor(&self, node: NodeId, other: NodeId) -> bool {
        let mut current = other;
        while current.is_valid() {
            if current == node {
                return true;
            }
            current = match self.get(current) {
                Some(n) => n.parent,
                None => return false,
            };
        }
        false
    }

    /// Whether the chain of parents from `node` reaches the document node.
    /// Shadow subtrees parent through their host element, so shadow content
    /// is connected exactly when its host is.
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut current = node;
        while current.is_valid() {
            if current == NodeId::ROOT {
                return true;
            }
            current = match self.get(current) {
                Some(n) => n.parent,
                None => return false,
            };
        }
        false
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let id = self.next;
        self.next = self
            .tree
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(NodeId::NONE);
        Some(id)
    }
}
