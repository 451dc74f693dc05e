//! Field introspection: binding tables and derived descriptors
//!
//! A component type declares its shape through [`Introspect`]: a type name
//! and a table of [`FieldBinding`] accessor triples. The engine derives
//! everything else from that table once at registration time: visibility
//! from the declared name's casing, the attribute name for exported fields,
//! and the cached observed-attributes list.

use std::any::Any;
use std::fmt;

use crate::component::Component;
use crate::naming::camel_to_kebab;

/// Declared type of a component field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Str,
    Int,
    Float,
    Bool,
}

/// A typed property value crossing the accessor table
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    /// String form used when mirroring a property onto a DOM attribute
    pub fn to_attribute(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Bool(b) => b.to_string(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view; attribute strings parse per the usual integer syntax
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            Value::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Str(s) => match s.trim() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

type Getter = Box<dyn Fn(&dyn Any) -> Option<Value>>;
type Setter = Box<dyn Fn(&mut dyn Any, Value) -> bool>;

/// One `(name, getter, setter)` entry of a component's accessor table.
/// The closures are typed against the concrete component when built and
/// type-erased here; dispatch against a foreign instance type is reported
/// rather than panicking.
pub struct FieldBinding {
    name: &'static str,
    ty: FieldType,
    getter: Getter,
    setter: Setter,
}

impl FieldBinding {
    pub fn new<C, G, S>(name: &'static str, ty: FieldType, get: G, set: S) -> Self
    where
        C: Component,
        G: Fn(&C) -> Value + 'static,
        S: Fn(&mut C, Value) + 'static,
    {
        Self {
            name,
            ty,
            getter: Box::new(move |any| any.downcast_ref::<C>().map(&get)),
            setter: Box::new(move |any, value| match any.downcast_mut::<C>() {
                Some(c) => {
                    set(c, value);
                    true
                }
                None => false,
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.ty
    }

    pub(crate) fn get(&self, instance: &dyn Component) -> Option<Value> {
        (self.getter)(instance.as_any())
    }

    pub(crate) fn set(&self, instance: &mut dyn Component, value: Value) -> bool {
        (self.setter)(instance.as_any_mut(), value)
    }
}

impl fmt::Debug for FieldBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}

/// Declared-shape capability for component types. Implemented explicitly:
/// the engine never reflects over the struct itself.
pub trait Introspect: Component + Sized {
    /// CamelCase type name the tag name derives from
    fn type_name() -> &'static str;

    /// Accessor table in field declaration order
    fn bindings() -> Vec<FieldBinding>;
}

/// One declared field, as derived from its binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Declared name; leading uppercase marks the field exported
    pub name: String,
    /// Exported fields reflect to a DOM attribute and are observed
    pub exported: bool,
    /// Declared value type
    pub ty: FieldType,
    /// kebab-case attribute name, present only for exported fields
    pub attribute: Option<String>,
}

/// Everything the engine derives from a component type, built once at
/// registration time and immutable afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDescriptor {
    pub type_name: String,
    pub tag_name: String,
    pub fields: Vec<FieldDescriptor>,
    observed: Vec<String>,
}

impl ComponentDescriptor {
    pub(crate) fn new(type_name: &str, fields: Vec<FieldDescriptor>) -> Self {
        let observed = fields.iter().filter_map(|f| f.attribute.clone()).collect();
        Self {
            type_name: type_name.to_string(),
            tag_name: camel_to_kebab(type_name),
            fields,
            observed,
        }
    }

    /// kebab-case names of the exported fields, cached at construction
    pub fn observed_attributes(&self) -> &[String] {
        &self.observed
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Enumerate a binding table as field descriptors, declaration order
/// preserved. Visibility is decided here, once, from the declared name's
/// leading-uppercase convention; everything downstream reads the flag.
pub fn describe_fields(bindings: &[FieldBinding]) -> Vec<FieldDescriptor> {
    bindings
        .iter()
        .map(|b| {
            let exported = b
                .name()
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_uppercase());
            FieldDescriptor {
                name: b.name().to_string(),
                exported,
                ty: b.field_type(),
                attribute: exported.then(|| camel_to_kebab(b.name())),
            }
        })
        .collect()
}
