//! Bundle definitions and reference-field configuration.

use serde::{Deserialize, Serialize};

/// Definition of one inner field of a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Machine name of the field.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// Whether a value is required when the bundle is edited.
    pub required: bool,
}

impl FieldDefinition {
    /// Creates an optional field definition.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            required: false,
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A bundle definition: a named, reusable group of sub-fields.
///
/// Bundles are identified by machine name. The machine name doubles as the
/// name of the reference field on host types that carry the bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBundle {
    /// Machine name, e.g. `contact_point`.
    pub name: String,
    /// Human-readable label, e.g. `Contact point`.
    pub label: String,
    /// Inner field definitions.
    pub fields: Vec<FieldDefinition>,
}

impl FieldBundle {
    /// Creates a bundle definition with no fields.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            fields: Vec::new(),
        }
    }

    /// Adds an inner field definition.
    #[must_use]
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Looks up an inner field definition by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// How many items a reference field may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinality {
    /// No limit on the number of referenced items.
    Unlimited,
    /// At most this many referenced items.
    Limited(u32),
}

impl Cardinality {
    /// Returns true if a field currently holding `len` entries can take
    /// another one.
    #[must_use]
    pub fn has_room(self, len: usize) -> bool {
        match self {
            Self::Unlimited => true,
            Self::Limited(max) => len < max as usize,
        }
    }
}

/// A bundle reference field attached to a host type.
///
/// The field on the host is keyed by the bundle's machine name, so one host
/// type carries at most one reference field per bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostFieldConfig {
    /// The host entity type carrying the field.
    pub host_type: String,
    /// The bundle the field references.
    pub bundle: String,
    /// Cardinality limit of the field.
    pub cardinality: Cardinality,
}

impl HostFieldConfig {
    /// Creates a reference-field configuration.
    pub fn new(
        host_type: impl Into<String>,
        bundle: impl Into<String>,
        cardinality: Cardinality,
    ) -> Self {
        Self {
            host_type: host_type.into(),
            bundle: bundle.into(),
            cardinality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinality_room() {
        assert!(Cardinality::Unlimited.has_room(usize::MAX - 1));
        assert!(Cardinality::Limited(2).has_room(1));
        assert!(!Cardinality::Limited(2).has_room(2));
        assert!(!Cardinality::Limited(0).has_room(0));
    }

    #[test]
    fn bundle_field_lookup() {
        let bundle = FieldBundle::new("contact_point", "Contact point")
            .with_field(FieldDefinition::new("phone", "Phone").required())
            .with_field(FieldDefinition::new("city", "City"));

        assert!(bundle.field("phone").unwrap().required);
        assert!(!bundle.field("city").unwrap().required);
        assert!(bundle.field("fax").is_none());
    }
}
