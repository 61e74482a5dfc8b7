//! # Fieldset Model
//!
//! Entity model for the fieldset content module.
//!
//! This crate defines:
//! - Id newtypes for items, revisions and hosts
//! - Bundle definitions (a named, reusable group of sub-fields)
//! - Bundle items (one stored value-set of a bundle, revisioned)
//! - Host entities and their reference-field values
//! - Reference-field configuration (cardinality per host type)

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod bundle;
mod host;
mod ids;
mod item;

pub use bundle::{Cardinality, FieldBundle, FieldDefinition, HostFieldConfig};
pub use host::{HostEntity, ItemRef};
pub use ids::{HostId, ItemId, RevisionId};
pub use item::{BundleItem, HostKey};

/// A single field value, schemaless from the module's point of view.
pub type FieldValue = serde_json::Value;
