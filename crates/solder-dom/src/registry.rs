//! Custom Elements Registry
//!
//! Per-document tag definitions. Name validation and duplicate rejection
//! happen here; the binding engine propagates these errors unchanged.

use std::collections::HashMap;

use thiserror::Error;

/// Names the platform reserves and refuses to define
const RESERVED_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Custom element definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDefinition {
    pub name: String,
    /// Attribute names whose mutations trigger change callbacks. Read once
    /// at definition time and never recomputed.
    pub observed_attributes: Vec<String>,
}

/// Registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("invalid custom element name {0:?}: it must contain a hyphen and start with a lowercase ASCII letter")]
    InvalidName(String),

    #[error("{0:?} is a reserved element name")]
    Reserved(String),

    #[error("custom element {0:?} is already defined")]
    AlreadyDefined(String),
}

/// Custom elements registry
#[derive(Debug, Default)]
pub struct CustomElementRegistry {
    definitions: HashMap<String, ElementDefinition>,
}

impl CustomElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a custom element under `name`
    pub fn define(
        &mut self,
        name: &str,
        observed_attributes: Vec<String>,
    ) -> Result<(), RegistryError> {
        Self::validate_name(name)?;
        if self.definitions.contains_key(name) {
            return Err(RegistryError::AlreadyDefined(name.to_string()));
        }
        tracing::debug!(name, "custom element defined");
        self.definitions.insert(
            name.to_string(),
            ElementDefinition {
                name: name.to_string(),
                observed_attributes,
            },
        );
        Ok(())
    }

    /// Get element definition
    pub fn get(&self, name: &str) -> Option<&ElementDefinition> {
        self.definitions.get(name)
    }

    /// Check if element is defined
    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    fn validate_name(name: &str) -> Result<(), RegistryError> {
        let starts_lower = name
            .chars()
            .next()
            .map(|c| c.is_ascii_lowercase())
            .unwrap_or(false);
        if !starts_lower || !name.contains('-') {
            return Err(RegistryError::InvalidName(name.to_string()));
        }
        if RESERVED_NAMES.contains(&name) {
            return Err(RegistryError::Reserved(name.to_string()));
        }
        Ok(())
    }
}
