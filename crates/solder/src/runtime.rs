//! Registration engine and lifecycle bridge
//!
//! [`Runtime::define`] turns a component factory into a registered custom
//! element: validator, tag derivation, class synthesis, registry commit.
//! After registration the runtime drives per-instance lifecycle by draining
//! the host document's callback queue: construction links element and
//! instance both ways, connection injects and scans the shadow template,
//! attribute changes push raw strings through field setters, and
//! disconnect/adopt pass through.

use std::collections::HashMap;

use solder_dom::{Document, LifecycleEvent, NodeId, RegistryError, ShadowRootMode};
use thiserror::Error;

use crate::component::Component;
use crate::descriptor::{ComponentDescriptor, FieldBinding, Introspect, Value};
use crate::naming::kebab_to_camel;
use crate::scan::scan_into;
use crate::validate::{self, ShapeError};

/// What happens to per-instance state when the host disconnects an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisconnectPolicy {
    /// Keep the children index; reconnection rebuilds it anyway
    #[default]
    Retain,
    /// Clear the children index on disconnect
    Clear,
}

/// Registration failures
#[derive(Debug, Error)]
pub enum DefineError {
    /// The factory or its component type is shaped wrong
    #[error(transparent)]
    Shape(#[from] ShapeError),
    /// The host registry rejected the tag (duplicate, reserved, malformed)
    #[error(transparent)]
    Platform(#[from] RegistryError),
}

/// Property access failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("node {0:?} is not an element in this document")]
    NoSuchElement(NodeId),

    #[error("<{0}> is not a defined custom element")]
    NotCustomElement(String),

    #[error("element has no component instance linked yet")]
    NotUpgraded,

    #[error("component {0} has no property {1:?}")]
    NoSuchProperty(String, String),

    #[error("accessor dispatched against a foreign instance type")]
    InstanceTypeMismatch,
}

/// Synthesized element class: the per-type vtable handed to the host.
/// Boxed factory, accessor table, derived descriptor.
struct ElementClass {
    descriptor: ComponentDescriptor,
    bindings: Vec<FieldBinding>,
    by_name: HashMap<String, usize>,
    factory: Box<dyn Fn() -> Box<dyn Component>>,
}

impl ElementClass {
    fn binding(&self, name: &str) -> Option<&FieldBinding> {
        self.by_name.get(name).map(|&i| &self.bindings[i])
    }

    /// Observed attribute names map back to exported property names by
    /// casing alone
    fn binding_for_attribute(&self, attribute: &str) -> Option<&FieldBinding> {
        self.binding(&kebab_to_camel(attribute))
    }
}

/// Drives registration and per-instance lifecycle against one host document
pub struct Runtime {
    document: Document,
    classes: HashMap<String, ElementClass>,
    /// Side table linking host elements back to their component instances
    instances: HashMap<NodeId, Box<dyn Component>>,
    disconnect_policy: DisconnectPolicy,
}

impl Runtime {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            classes: HashMap::new(),
            instances: HashMap::new(),
            disconnect_policy: DisconnectPolicy::default(),
        }
    }

    pub fn set_disconnect_policy(&mut self, policy: DisconnectPolicy) {
        self.disconnect_policy = policy;
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Direct document access; callers mutating through this must
    /// [`Runtime::pump`] afterwards to deliver pending callbacks
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// The derived descriptor for a registered tag
    pub fn descriptor(&self, tag: &str) -> Option<&ComponentDescriptor> {
        self.classes.get(tag).map(|c| &c.descriptor)
    }

    /// Borrow the component instance linked to `node`, downcast to its
    /// concrete type
    pub fn instance<C: Component>(&self, node: NodeId) -> Option<&C> {
        self.instances
            .get(&node)
            .and_then(|i| i.as_any().downcast_ref::<C>())
    }

    pub fn instance_mut<C: Component>(&mut self, node: NodeId) -> Option<&mut C> {
        self.instances
            .get_mut(&node)
            .and_then(|i| i.as_any_mut().downcast_mut::<C>())
    }

    /// Register a component type. The tag name derives from the type name
    /// (`TaskCard` registers `<task-card>`); exported fields become observed
    /// attributes. Nothing is visible to the host until the registry commit
    /// succeeds, so a failure leaves no partial registration behind.
    pub fn define<C, F>(&mut self, factory: F) -> Result<(), DefineError>
    where
        C: Introspect,
        F: Fn() -> C + 'static,
    {
        let bindings = C::bindings();
        let descriptor = validate::validate(&factory, &bindings)?;
        let by_name = descriptor
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), i))
            .collect();

        self.document.define_element(
            &descriptor.tag_name,
            descriptor.observed_attributes().to_vec(),
        )?;
        tracing::debug!(
            tag = %descriptor.tag_name,
            component = descriptor.type_name,
            observed = descriptor.observed_attributes().len(),
            "component registered"
        );

        self.classes.insert(
            descriptor.tag_name.clone(),
            ElementClass {
                descriptor,
                bindings,
                by_name,
                factory: Box::new(move || Box::new(factory())),
            },
        );
        Ok(())
    }

    /// Create an element, running the component constructor if the tag is
    /// registered
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let node = self.document.create_element(tag);
        self.pump();
        node
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.document.append_child(parent, child);
        self.pump();
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        self.document.remove_child(parent, child);
        self.pump();
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.document.set_attribute(node, name, value);
        self.pump();
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        self.document.remove_attribute(node, name);
        self.pump();
    }

    pub fn adopt_node(&mut self, node: NodeId, old_document: &str) {
        self.document.adopt_node(node, old_document);
        self.pump();
    }

    /// Read a property through the accessor table
    pub fn get_property(&self, node: NodeId, name: &str) -> Result<Value, PropertyError> {
        let tag = self.tag_of(node)?;
        let class = self
            .classes
            .get(&tag)
            .ok_or(PropertyError::NotCustomElement(tag.clone()))?;
        let binding = class.binding(name).ok_or_else(|| {
            PropertyError::NoSuchProperty(class.descriptor.type_name.clone(), name.to_string())
        })?;
        let instance = self
            .instances
            .get(&node)
            .ok_or(PropertyError::NotUpgraded)?;
        binding
            .get(instance.as_ref())
            .ok_or(PropertyError::InstanceTypeMismatch)
    }

    /// Write a property through the accessor table. Exported fields mirror
    /// onto the DOM attribute first, which routes the raw string back
    /// through the observed-attribute callback as the platform does, and
    /// the typed write lands last.
    pub fn set_property(
        &mut self,
        node: NodeId,
        name: &str,
        value: Value,
    ) -> Result<(), PropertyError> {
        let tag = self.tag_of(node)?;
        let (index, attribute) = {
            let class = self
                .classes
                .get(&tag)
                .ok_or(PropertyError::NotCustomElement(tag.clone()))?;
            let index = *class.by_name.get(name).ok_or_else(|| {
                PropertyError::NoSuchProperty(class.descriptor.type_name.clone(), name.to_string())
            })?;
            (index, class.descriptor.fields[index].attribute.clone())
        };
        // nothing to write into without a linked instance; bail before the
        // attribute mirror so the error path mutates no DOM state
        if !self.instances.contains_key(&node) {
            return Err(PropertyError::NotUpgraded);
        }

        if let Some(attribute) = attribute {
            self.document
                .set_attribute(node, &attribute, &value.to_attribute());
            self.pump();
        }

        let mut instance = self
            .instances
            .remove(&node)
            .ok_or(PropertyError::NotUpgraded)?;
        let ok = self
            .classes
            .get(&tag)
            .map(|c| c.bindings[index].set(instance.as_mut(), value))
            .unwrap_or(false);
        self.instances.insert(node, instance);
        if ok {
            Ok(())
        } else {
            Err(PropertyError::InstanceTypeMismatch)
        }
    }

    /// Drain host-delivered callbacks and dispatch them to the bridge
    pub fn pump(&mut self) {
        while let Some(event) = self.document.take_event() {
            match event {
                LifecycleEvent::Constructed { node } => self.construct(node),
                LifecycleEvent::Connected { node } => self.connect(node),
                LifecycleEvent::Disconnected { node } => self.disconnect(node),
                LifecycleEvent::AttributeChanged {
                    node,
                    name,
                    old_value,
                    new_value,
                    namespace,
                } => self.attribute_changed(
                    node,
                    &name,
                    old_value.as_deref(),
                    new_value.as_deref(),
                    namespace.as_deref().unwrap_or(""),
                ),
                LifecycleEvent::Adopted {
                    node,
                    old_document,
                    new_document,
                } => self.adopt(node, &old_document, &new_document),
            }
        }
    }

    /// Run the synthesized constructor: fresh instance from the factory,
    /// linked to the host element in both directions
    fn construct(&mut self, node: NodeId) {
        let Ok(tag) = self.tag_of(node) else { return };
        let Some(class) = self.classes.get(&tag) else {
            return;
        };
        let mut instance = (class.factory)();
        instance.base_mut().node = node;
        tracing::trace!(?node, tag = %tag, "constructed component instance");
        self.instances.insert(node, instance);
    }

    /// Open a shadow root, inject the template, scan for named children,
    /// then hand control to the component's own hook
    fn connect(&mut self, node: NodeId) {
        let Some(mut instance) = self.instances.remove(&node) else {
            return;
        };
        let shadow = self
            .document
            .tree_mut()
            .attach_shadow(node, ShadowRootMode::Open);
        solder_html::set_inner_html(self.document.tree_mut(), shadow, &instance.base().template);
        scan_into(
            self.document.tree(),
            shadow,
            &mut instance.base_mut().children,
        );
        tracing::trace!(?node, children = instance.base().children.len(), "component connected");
        instance.connected();
        self.instances.insert(node, instance);
    }

    fn disconnect(&mut self, node: NodeId) {
        let Some(instance) = self.instances.get_mut(&node) else {
            return;
        };
        tracing::debug!(?node, "component disconnected");
        if self.disconnect_policy == DisconnectPolicy::Clear {
            instance.base_mut().children.clear();
        }
        instance.disconnected();
    }

    /// Raw pass-through: the attribute string is written into the field via
    /// its setter, unmodified; typed fields parse it themselves. Removal
    /// arrives as the empty string.
    fn attribute_changed(
        &mut self,
        node: NodeId,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
        namespace: &str,
    ) {
        let Ok(tag) = self.tag_of(node) else { return };
        let Some(mut instance) = self.instances.remove(&node) else {
            return;
        };
        if let Some(class) = self.classes.get(&tag) {
            if let Some(binding) = class.binding_for_attribute(name) {
                let raw = Value::Str(new.unwrap_or_default().to_string());
                if !binding.set(instance.as_mut(), raw) {
                    tracing::debug!(attribute = name, "setter rejected a foreign instance type");
                }
            }
        }
        instance.attribute_changed(name, old, new, namespace);
        self.instances.insert(node, instance);
    }

    fn adopt(&mut self, node: NodeId, old_document: &str, new_document: &str) {
        let Some(instance) = self.instances.get_mut(&node) else {
            return;
        };
        tracing::debug!(?node, old_document, new_document, "component adopted");
        instance.adopted(old_document, new_document);
    }

    fn tag_of(&self, node: NodeId) -> Result<String, PropertyError> {
        self.document
            .tree()
            .get(node)
            .and_then(|n| n.as_element())
            .map(|e| e.tag_name.clone())
            .ok_or(PropertyError::NoSuchElement(node))
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(Document::default())
    }
}
