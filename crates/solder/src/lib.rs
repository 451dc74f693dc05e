//! solder - plain structs as custom elements
//!
//! Declare a UI component as an ordinary struct carrying an [`ElementBase`]
//! slot, describe its fields once through [`Introspect`], and register it
//! with [`Runtime::define`]. The type name becomes the tag name
//! (`TaskCard` -> `<task-card>`), exported fields (leading-uppercase
//! declared names) become string attributes and observed attributes, every
//! field becomes a typed property, and the four lifecycle callbacks are
//! bridged onto the instance. On connection the component's template is
//! injected into an open shadow root and its id-carrying descendants are
//! collected into `base().children`.
//!
//! # Example
//! ```rust,ignore
//! struct TaskCard {
//!     base: ElementBase,
//!     label: String,
//! }
//!
//! let mut runtime = Runtime::default();
//! runtime.define(TaskCard::new)?;          // registers <task-card>
//! let card = runtime.create_element("task-card");
//! runtime.append_child(runtime.document().body(), card);
//! ```

mod component;
mod descriptor;
mod naming;
mod runtime;
mod scan;
mod validate;

pub use component::{Component, ElementBase};
pub use descriptor::{
    describe_fields, ComponentDescriptor, FieldBinding, FieldDescriptor, FieldType, Introspect,
    Value,
};
pub use naming::{camel_to_kebab, kebab_to_camel};
pub use runtime::{DefineError, DisconnectPolicy, PropertyError, Runtime};
pub use scan::scan_into;
pub use validate::{validate, ShapeError};

// Re-export the host-platform crates for embedders
pub use solder_dom as dom;
pub use solder_html as html;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
