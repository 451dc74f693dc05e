//! Shadow tree scanning
//!
//! Collects the addressable named descendants of a rendered shadow subtree
//! into the component's children index.

use std::collections::HashMap;

use solder_dom::{DomTree, NodeId};

/// Visit `root` and every descendant exactly once, pre-order, indexing each
/// element that carries an `id` attribute. Nodes without attributes are
/// still recursed into. Duplicate ids overwrite earlier entries.
pub fn scan_into(tree: &DomTree, root: NodeId, children: &mut HashMap<String, NodeId>) {
    let Some(node) = tree.get(root) else { return };
    if let Some(elem) = node.as_element() {
        if let Some(id) = elem.id() {
            let previous = children.insert(id.to_string(), root);
            if previous.is_some_and(|p| p != root) {
                tracing::debug!(id, "duplicate id in shadow tree, keeping the later node");
            }
        }
    }
    for child in tree.children(root) {
        scan_into(tree, child, children);
    }
}
