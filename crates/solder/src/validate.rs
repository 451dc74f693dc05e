//! Constructor validation
//!
//! The callable/arity/return-shape checks of a dynamic platform live in the
//! type system here: [`crate::Runtime::define`] only admits zero-argument
//! factories returning a type that carries the [`crate::Component`] base
//! capability. What remains to check at registration time is checked in a
//! fixed order, failing fast with a distinct error per stage, and nothing
//! is registered on failure.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::descriptor::{describe_fields, ComponentDescriptor, FieldBinding, Introspect};
use crate::naming::camel_to_kebab;

const FACTORY_SHAPE: &str = "the factory must be a zero-argument function returning a fresh component, e.g. fn() -> MyElement";

/// Structural validation failures, one variant per stage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("factory produced an instance already linked to a host element; {FACTORY_SHAPE}")]
    StaleInstance,

    #[error("component type name {0:?} is not an exported CamelCase ASCII identifier; {FACTORY_SHAPE}")]
    InvalidTypeName(String),

    #[error("component type name {0:?} must have at least two camel-case words so the tag name gets a hyphen (MyElement -> <my-element>); {FACTORY_SHAPE}")]
    SingleWordTypeName(String),

    #[error("field name {0:?} is not a valid ASCII identifier")]
    InvalidFieldName(String),

    #[error("field {0:?} is declared twice in the binding table")]
    DuplicateField(String),

    #[error("fields {0:?} and {1:?} both reflect to attribute {2:?}")]
    DuplicateAttribute(String, String, String),
}

/// Validate a component factory and derive its descriptor
pub fn validate<C, F>(factory: &F, bindings: &[FieldBinding]) -> Result<ComponentDescriptor, ShapeError>
where
    C: Introspect,
    F: Fn() -> C,
{
    let probe = factory();
    if probe.base().is_linked() {
        return Err(ShapeError::StaleInstance);
    }

    let type_name = C::type_name();
    if !is_exported_camel_case(type_name) {
        return Err(ShapeError::InvalidTypeName(type_name.to_string()));
    }
    if !camel_to_kebab(type_name).contains('-') {
        return Err(ShapeError::SingleWordTypeName(type_name.to_string()));
    }

    let fields = describe_fields(bindings);
    let mut names = HashSet::new();
    let mut attributes: HashMap<String, String> = HashMap::new();
    for field in &fields {
        if !is_identifier(&field.name) {
            return Err(ShapeError::InvalidFieldName(field.name.clone()));
        }
        if !names.insert(field.name.clone()) {
            return Err(ShapeError::DuplicateField(field.name.clone()));
        }
        if let Some(attr) = &field.attribute {
            if let Some(previous) = attributes.insert(attr.clone(), field.name.clone()) {
                return Err(ShapeError::DuplicateAttribute(
                    previous,
                    field.name.clone(),
                    attr.clone(),
                ));
            }
        }
    }

    Ok(ComponentDescriptor::new(type_name, fields))
}

fn is_exported_camel_case(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Component, ElementBase};
    use crate::descriptor::{FieldType, Value};
    use solder_dom::NodeId;
    use std::any::Any;

    struct Sample {
        base: ElementBase,
        label: String,
    }

    impl Component for Sample {
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

    impl Introspect for Sample {
        fn type_name() -> &'static str {
            "SampleCard"
        }
        fn bindings() -> Vec<FieldBinding> {
            vec![FieldBinding::new(
                "Label",
                FieldType::Str,
                |c: &Sample| Value::Str(c.label.clone()),
                |c: &mut Sample, v| {
                    if let Value::Str(s) = v {
                        c.label = s;
                    }
                },
            )]
        }
    }

    fn fresh() -> Sample {
        Sample {
            base: ElementBase::default(),
            label: String::new(),
        }
    }

    #[test]
    fn test_accepts_well_shaped_factory() {
        let descriptor = validate(&fresh, &Sample::bindings()).unwrap();
        assert_eq!(descriptor.tag_name, "sample-card");
        assert_eq!(descriptor.observed_attributes(), ["label".to_string()]);
    }

    #[test]
    fn test_rejects_linked_probe() {
        let factory = || {
            let mut s = fresh();
            s.base.node = NodeId::ROOT;
            s
        };
        assert_eq!(
            validate(&factory, &Sample::bindings()),
            Err(ShapeError::StaleInstance)
        );
    }

    #[test]
    fn test_identifier_checks() {
        assert!(is_exported_camel_case("MyElement"));
        assert!(is_exported_camel_case("A1"));
        assert!(!is_exported_camel_case("myElement"));
        assert!(!is_exported_camel_case(""));
        assert!(!is_exported_camel_case("My-Element"));

        assert!(is_identifier("count"));
        assert!(is_identifier("_private"));
        assert!(!is_identifier("1count"));
        assert!(!is_identifier(""));
    }
}
