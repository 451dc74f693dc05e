//! End-to-end component lifecycle tests
//!
//! Full flows through the public API: register a component type, let the
//! host construct and connect instances, and drive attribute/property
//! traffic both directions.

use std::any::Any;

use solder::dom::RegistryError;
use solder::{
    Component, DefineError, DisconnectPolicy, ElementBase, FieldBinding, FieldType, Introspect,
    PropertyError, Runtime, ShapeError, Value,
};

const TEMPLATE: &str = r#"<span id="x"></span>"#;

struct TaskCard {
    base: ElementBase,
    label: String,
    count: i64,
    connects: u32,
    attribute_calls: Vec<(String, Option<String>, Option<String>)>,
    adopted_to: Option<(String, String)>,
}

impl TaskCard {
    fn new() -> Self {
        Self {
            base: ElementBase::new(TEMPLATE),
            label: String::new(),
            count: 0,
            connects: 0,
            attribute_calls: Vec::new(),
            adopted_to: None,
        }
    }
}

impl Component for TaskCard {
    fn base(&self) -> &ElementBase {
        &self.base
    }
    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
    fn connected(&mut self) {
        self.connects += 1;
    }
    fn attribute_changed(&mut self, name: &str, old: Option<&str>, new: Option<&str>, _ns: &str) {
        self.attribute_calls.push((
            name.to_string(),
            old.map(str::to_string),
            new.map(str::to_string),
        ));
    }
    fn adopted(&mut self, old_document: &str, new_document: &str) {
        self.adopted_to = Some((old_document.to_string(), new_document.to_string()));
    }
}

impl Introspect for TaskCard {
    fn type_name() -> &'static str {
        "TaskCard"
    }
    fn bindings() -> Vec<FieldBinding> {
        vec![
            FieldBinding::new(
                "Label",
                FieldType::Str,
                |c: &TaskCard| Value::Str(c.label.clone()),
                |c: &mut TaskCard, v| {
                    if let Value::Str(s) = v {
                        c.label = s;
                    }
                },
            ),
            FieldBinding::new(
                "count",
                FieldType::Int,
                |c: &TaskCard| Value::Int(c.count),
                |c: &mut TaskCard, v| {
                    if let Some(i) = v.as_int() {
                        c.count = i;
                    }
                },
            ),
        ]
    }
}

fn runtime_with_card() -> Runtime {
    let mut runtime = Runtime::default();
    runtime.define(TaskCard::new).unwrap();
    runtime
}

#[test]
fn test_define_registers_kebab_tag_with_observed_attributes() {
    let runtime = runtime_with_card();
    assert!(runtime.document().registry().is_defined("task-card"));

    let descriptor = runtime.descriptor("task-card").unwrap();
    assert_eq!(descriptor.type_name, "TaskCard");
    assert_eq!(descriptor.tag_name, "task-card");
    // exported fields only
    assert_eq!(descriptor.observed_attributes(), ["label".to_string()]);
}

#[test]
fn test_connect_builds_children_index_from_template() {
    let mut runtime = runtime_with_card();
    let body = runtime.document().body();
    let card = runtime.create_element("task-card");
    runtime.append_child(body, card);

    let instance: &TaskCard = runtime.instance(card).unwrap();
    assert_eq!(instance.connects, 1);
    assert_eq!(instance.base.node, card);

    let span = instance.base.child("x").expect("template span indexed by id");
    let tree = runtime.document().tree();
    assert_eq!(tree.get(span).unwrap().as_element().unwrap().tag_name, "span");
    // the span lives in the shadow subtree of the card
    assert!(tree.is_connected(span));
}

#[test]
fn test_property_set_mirrors_exported_attribute() {
    let mut runtime = runtime_with_card();
    let body = runtime.document().body();
    let card = runtime.create_element("task-card");
    runtime.append_child(body, card);

    runtime
        .set_property(card, "Label", Value::from("hello"))
        .unwrap();
    assert_eq!(runtime.document().get_attribute(card, "label"), Some("hello"));
    assert_eq!(
        runtime.get_property(card, "Label").unwrap(),
        Value::Str("hello".to_string())
    );
}

#[test]
fn test_unexported_property_touches_no_attribute() {
    let mut runtime = runtime_with_card();
    let card = runtime.create_element("task-card");

    runtime.set_property(card, "count", Value::Int(3)).unwrap();
    assert_eq!(runtime.document().get_attribute(card, "count"), None);
    assert_eq!(runtime.instance::<TaskCard>(card).unwrap().count, 3);
}

#[test]
fn test_attribute_change_writes_raw_string_into_field() {
    let mut runtime = runtime_with_card();
    let card = runtime.create_element("task-card");

    runtime.set_attribute(card, "label", "a");
    runtime.set_attribute(card, "label", "b");

    let instance: &TaskCard = runtime.instance(card).unwrap();
    assert_eq!(instance.label, "b");
    assert_eq!(
        instance.attribute_calls.last().unwrap(),
        &(
            "label".to_string(),
            Some("a".to_string()),
            Some("b".to_string())
        )
    );
}

#[test]
fn test_attribute_removal_delivers_empty_string() {
    let mut runtime = runtime_with_card();
    let card = runtime.create_element("task-card");

    runtime.set_attribute(card, "label", "a");
    runtime.remove_attribute(card, "label");

    let instance: &TaskCard = runtime.instance(card).unwrap();
    assert_eq!(instance.label, "");
    assert_eq!(
        instance.attribute_calls.last().unwrap(),
        &("label".to_string(), Some("a".to_string()), None)
    );
}

#[test]
fn test_unobserved_attribute_is_ignored() {
    let mut runtime = runtime_with_card();
    let card = runtime.create_element("task-card");
    runtime.set_attribute(card, "title", "noise");
    assert!(runtime.instance::<TaskCard>(card).unwrap().attribute_calls.is_empty());
}

#[test]
fn test_parsed_markup_upgrades_on_connection() {
    let mut runtime = runtime_with_card();
    let body = runtime.document().body();

    // simulate parser output: the element lands on the tree unconstructed,
    // attribute already present in the markup
    let card = runtime.document_mut().tree_mut().create_element("task-card");
    if let Some(elem) = runtime
        .document_mut()
        .tree_mut()
        .get_mut(card)
        .and_then(|n| n.as_element_mut())
    {
        elem.attributes.set("label", "from-markup");
    }
    runtime.append_child(body, card);

    let instance: &TaskCard = runtime.instance(card).unwrap();
    assert_eq!(instance.label, "from-markup");
    assert_eq!(instance.connects, 1);
    // initial application fires the callback like any other mutation
    assert_eq!(
        instance.attribute_calls.last().unwrap(),
        &("label".to_string(), None, Some("from-markup".to_string()))
    );
}

#[test]
fn test_reconnection_rescans_children() {
    let mut runtime = runtime_with_card();
    let body = runtime.document().body();
    let card = runtime.create_element("task-card");
    runtime.append_child(body, card);
    runtime.remove_child(body, card);

    // default policy retains the index across disconnect
    assert!(runtime.instance::<TaskCard>(card).unwrap().base.child("x").is_some());

    runtime.append_child(body, card);
    let instance: &TaskCard = runtime.instance(card).unwrap();
    assert_eq!(instance.connects, 2);
    assert!(instance.base.child("x").is_some());
}

#[test]
fn test_clear_policy_empties_children_on_disconnect() {
    let mut runtime = runtime_with_card();
    runtime.set_disconnect_policy(DisconnectPolicy::Clear);
    let body = runtime.document().body();
    let card = runtime.create_element("task-card");
    runtime.append_child(body, card);
    runtime.remove_child(body, card);

    assert!(runtime.instance::<TaskCard>(card).unwrap().base.children.is_empty());
}

#[test]
fn test_adopt_passes_opaque_document_references() {
    let mut runtime = runtime_with_card();
    let card = runtime.create_element("task-card");
    runtime.adopt_node(card, "about:old");

    assert_eq!(
        runtime.instance::<TaskCard>(card).unwrap().adopted_to,
        Some(("about:old".to_string(), "about:blank".to_string()))
    );
}

#[test]
fn test_duplicate_define_surfaces_platform_error() {
    let mut runtime = runtime_with_card();
    let err = runtime.define(TaskCard::new).unwrap_err();
    assert!(matches!(
        err,
        DefineError::Platform(RegistryError::AlreadyDefined(_))
    ));
}

struct Foo {
    base: ElementBase,
}

impl Component for Foo {
    fn base(&self) -> &ElementBase {
        &self.base
    }
    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Introspect for Foo {
    fn type_name() -> &'static str {
        "Foo"
    }
    fn bindings() -> Vec<FieldBinding> {
        Vec::new()
    }
}

#[test]
fn test_single_word_type_name_is_rejected() {
    let mut runtime = Runtime::default();
    let err = runtime
        .define(|| Foo {
            base: ElementBase::default(),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        DefineError::Shape(ShapeError::SingleWordTypeName(_))
    ));
    assert!(!runtime.document().registry().is_defined("foo"));
}

struct StatBadge {
    base: ElementBase,
    count: i64,
}

impl Component for StatBadge {
    fn base(&self) -> &ElementBase {
        &self.base
    }
    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Introspect for StatBadge {
    fn type_name() -> &'static str {
        "StatBadge"
    }
    fn bindings() -> Vec<FieldBinding> {
        vec![FieldBinding::new(
            "Count",
            FieldType::Int,
            |c: &StatBadge| Value::Int(c.count),
            |c: &mut StatBadge, v| {
                if let Some(i) = v.as_int() {
                    c.count = i;
                }
            },
        )]
    }
}

#[test]
fn test_typed_field_parses_attribute_strings() {
    let mut runtime = Runtime::default();
    runtime
        .define(|| StatBadge {
            base: ElementBase::default(),
            count: 0,
        })
        .unwrap();

    let badge = runtime.create_element("stat-badge");
    runtime.set_attribute(badge, "count", "5");
    assert_eq!(runtime.instance::<StatBadge>(badge).unwrap().count, 5);

    // the engine guarantees only that the string arrives; this field's own
    // parsing contract drops garbage
    runtime.set_attribute(badge, "count", "zebra");
    assert_eq!(runtime.instance::<StatBadge>(badge).unwrap().count, 5);
}

#[test]
fn test_property_set_before_upgrade_leaves_attributes_alone() {
    let mut runtime = runtime_with_card();
    // parsed element that never connected: no instance linked yet
    let card = runtime.document_mut().tree_mut().create_element("task-card");

    let err = runtime
        .set_property(card, "Label", Value::from("hello"))
        .unwrap_err();
    assert_eq!(err, PropertyError::NotUpgraded);
    assert_eq!(runtime.document().get_attribute(card, "label"), None);
}

#[test]
fn test_property_errors() {
    let mut runtime = runtime_with_card();
    let div = runtime.create_element("div");
    assert!(runtime.get_property(div, "Label").is_err());

    let card = runtime.create_element("task-card");
    assert!(runtime.get_property(card, "Missing").is_err());
    assert!(runtime.get_property(card, "Label").is_ok());
}
