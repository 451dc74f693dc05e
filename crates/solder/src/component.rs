//! Component base state and capability trait

use std::any::Any;
use std::collections::HashMap;

use solder_dom::NodeId;

/// State every component instance carries: the shadow template, the
/// id-indexed child nodes collected from it, and the host element the
/// instance is linked to once constructed.
#[derive(Debug)]
pub struct ElementBase {
    /// Markup injected into the shadow root on connection
    pub template: String,
    /// Named descendants of the shadow tree, keyed by `id` attribute
    pub children: HashMap<String, NodeId>,
    /// Host element handle; NONE until the runtime links the instance
    pub node: NodeId,
}

impl ElementBase {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            children: HashMap::new(),
            node: NodeId::NONE,
        }
    }

    /// Look up a shadow child collected by id
    pub fn child(&self, id: &str) -> Option<NodeId> {
        self.children.get(id).copied()
    }

    /// Whether the instance is linked to a host element yet
    pub fn is_linked(&self) -> bool {
        self.node.is_valid()
    }
}

impl Default for ElementBase {
    fn default() -> Self {
        Self::new("")
    }
}

/// Capability marker a component type must expose: access to its
/// [`ElementBase`] slot, downcasting for accessor dispatch, and the four
/// lifecycle hooks with pass-through defaults. The runtime performs the
/// platform work (shadow attach, template injection, scanning, attribute
/// writes) before invoking the hook of the same name.
pub trait Component: Any {
    fn base(&self) -> &ElementBase;
    fn base_mut(&mut self) -> &mut ElementBase;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// The element became part of the document; shadow content is already
    /// injected and scanned when this runs
    fn connected(&mut self) {}

    /// The element left the document; no teardown is performed by default
    fn disconnected(&mut self) {}

    /// An observed attribute changed; the raw string has already been
    /// written through the field's setter
    fn attribute_changed(
        &mut self,
        _name: &str,
        _old: Option<&str>,
        _new: Option<&str>,
        _namespace: &str,
    ) {
    }

    /// The element moved documents; both references are opaque
    fn adopted(&mut self, _old_document: &str, _new_document: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_starts_unlinked() {
        let base = ElementBase::new("<span></span>");
        assert!(!base.is_linked());
        assert_eq!(base.template, "<span></span>");
        assert!(base.children.is_empty());
        assert_eq!(base.child("x"), None);
    }
}
