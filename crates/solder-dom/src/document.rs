//! Document - high-level document API
//!
//! Owns the tree, the custom element registry, and the lifecycle event
//! queue. Mutations that touch defined custom elements enqueue callback
//! records; the embedder drains them with [`Document::take_event`].

use std::collections::VecDeque;

use crate::{CustomElementRegistry, DomTree, LifecycleEvent, NodeId, RegistryError};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    url: String,
    registry: CustomElementRegistry,
    events: VecDeque<LifecycleEvent>,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
}

impl Document {
    /// Create a new document with the basic html/head/body scaffolding
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");
        tree.append_child(NodeId::ROOT, html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            registry: CustomElementRegistry::new(),
            events: VecDeque::new(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get `<html>` element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get `<head>` element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get `<body>` element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably. Direct tree mutation bypasses lifecycle
    /// bookkeeping; callers that care about callbacks should go through the
    /// document methods instead.
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// The custom element registry
    pub fn registry(&self) -> &CustomElementRegistry {
        &self.registry
    }

    /// Commit a custom element definition to the registry
    pub fn define_element(
        &mut self,
        name: &str,
        observed_attributes: Vec<String>,
    ) -> Result<(), RegistryError> {
        self.registry.define(name, observed_attributes)
    }

    /// Pop the oldest pending lifecycle callback
    pub fn take_event(&mut self) -> Option<LifecycleEvent> {
        self.events.pop_front()
    }

    /// Create an element. Elements with a defined custom tag are constructed
    /// immediately, like `document.createElement` on the web platform.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let tag = tag.to_ascii_lowercase();
        let node = self.tree.create_element(&tag);
        if self.registry.is_defined(&tag) {
            if let Some(elem) = self.tree.get_mut(node).and_then(|n| n.as_element_mut()) {
                elem.custom_constructed = true;
            }
            self.events.push_back(LifecycleEvent::Constructed { node });
        }
        node
    }

    /// Append `child` under `parent`. Connecting a subtree delivers
    /// callbacks for every defined custom element in it, parents first;
    /// elements that were never constructed (parsed markup) are upgraded:
    /// construct, replay present observed attributes, then connect.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.tree.append_child(parent, child);
        // the tree refuses invalid appends (cycles, self-append); a child
        // that did not land under `parent` delivers no callbacks
        if self.tree.get(child).map(|n| n.parent) != Some(parent) {
            return;
        }
        if !self.tree.is_connected(child) {
            return;
        }
        for node in self.collect_defined(child) {
            let constructed = self
                .tree
                .get(node)
                .and_then(|n| n.as_element())
                .map(|e| e.custom_constructed)
                .unwrap_or(true);
            if !constructed {
                self.upgrade(node);
            }
            self.events.push_back(LifecycleEvent::Connected { node });
        }
    }

    /// Remove `child` from `parent`, delivering disconnect callbacks for
    /// every defined custom element in the subtree, parents first
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.tree.get(child).map(|n| n.parent) != Some(parent) {
            return;
        }
        let was_connected = self.tree.is_connected(child);
        let customs = if was_connected {
            self.collect_defined(child)
        } else {
            Vec::new()
        };
        self.tree.detach(child);
        for node in customs {
            self.events.push_back(LifecycleEvent::Disconnected { node });
        }
    }

    /// Get an attribute value
    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.tree
            .get(node)
            .and_then(|n| n.as_element())
            .and_then(|e| e.attributes.get(name))
    }

    /// Set an attribute. Observed attributes of constructed custom elements
    /// deliver a change callback whether or not the element is connected.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let (old, tag, constructed) = {
            let Some(elem) = self.tree.get_mut(node).and_then(|n| n.as_element_mut()) else {
                return;
            };
            let old = elem.attributes.set(name, value);
            (old, elem.tag_name.clone(), elem.custom_constructed)
        };
        if constructed && self.is_observed(&tag, name) {
            self.events.push_back(LifecycleEvent::AttributeChanged {
                node,
                name: name.to_string(),
                old_value: old,
                new_value: Some(value.to_string()),
                namespace: None,
            });
        }
    }

    /// Remove an attribute, delivering a change callback with no new value
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        let (old, tag, constructed) = {
            let Some(elem) = self.tree.get_mut(node).and_then(|n| n.as_element_mut()) else {
                return;
            };
            let old = elem.attributes.remove(name);
            (old, elem.tag_name.clone(), elem.custom_constructed)
        };
        let Some(old) = old else { return };
        if constructed && self.is_observed(&tag, name) {
            self.events.push_back(LifecycleEvent::AttributeChanged {
                node,
                name: name.to_string(),
                old_value: Some(old),
                new_value: None,
                namespace: None,
            });
        }
    }

    /// Notify a custom element that it moved documents. The transplant
    /// itself is the embedder's business; this only delivers the callback
    /// with the two opaque document references.
    pub fn adopt_node(&mut self, node: NodeId, old_document: &str) {
        if self.tree.get(node).is_none() {
            return;
        }
        self.events.push_back(LifecycleEvent::Adopted {
            node,
            old_document: old_document.to_string(),
            new_document: self.url.clone(),
        });
    }

    fn is_observed(&self, tag: &str, attribute: &str) -> bool {
        self.registry
            .get(tag)
            .is_some_and(|d| d.observed_attributes.iter().any(|a| a == attribute))
    }

    /// Defined custom elements in the subtree rooted at `root`, pre-order
    fn collect_defined(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_defined_into(root, &mut out);
        out
    }

    fn collect_defined_into(&self, node: NodeId, out: &mut Vec<NodeId>) {
        if let Some(elem) = self.tree.get(node).and_then(|n| n.as_element()) {
            if self.registry.is_defined(&elem.tag_name) {
                out.push(node);
            }
        }
        for child in self.tree.children(node) {
            self.collect_defined_into(child, out);
        }
    }

    /// Upgrade a parsed element: construct it, then replay every observed
    /// attribute already present in the markup
    fn upgrade(&mut self, node: NodeId) {
        if let Some(elem) = self.tree.get_mut(node).and_then(|n| n.as_element_mut()) {
            elem.custom_constructed = true;
        }
        self.events.push_back(LifecycleEvent::Constructed { node });

        let mut replays = Vec::new();
        if let Some(elem) = self.tree.get(node).and_then(|n| n.as_element()) {
            if let Some(def) = self.registry.get(&elem.tag_name) {
                for attr in &def.observed_attributes {
                    if let Some(value) = elem.attributes.get(attr) {
                        replays.push((attr.clone(), value.to_string()));
                    }
                }
            }
        }
        tracing::trace!(?node, replayed = replays.len(), "upgraded parsed custom element");
        for (name, value) in replays {
            self.events.push_back(LifecycleEvent::AttributeChanged {
                node,
                name,
                old_value: None,
                new_value: Some(value),
                namespace: None,
            });
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
