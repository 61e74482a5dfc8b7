//! Bundle items: stored value-sets of a bundle.

use crate::ids::{HostId, ItemId, RevisionId};
use crate::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Back-reference from an item to the host it is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostKey {
    /// The host entity type.
    pub host_type: String,
    /// The host entity id.
    pub host_id: HostId,
}

impl HostKey {
    /// Creates a host back-reference.
    pub fn new(host_type: impl Into<String>, host_id: HostId) -> Self {
        Self {
            host_type: host_type.into(),
            host_id,
        }
    }
}

/// One concrete value-set of a bundle.
///
/// An item is created unattached (`id == None`, revision marker zero) and is
/// valid only once attached to exactly one host through a reference-field
/// entry storing its id and current revision id. An item with no host
/// reference is transient and is expected to be attached or deleted before
/// the request completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleItem {
    /// Assigned on first save; `None` while unsaved.
    pub id: Option<ItemId>,
    /// Latest saved revision; [`RevisionId::NONE`] while unsaved.
    pub revision_id: RevisionId,
    /// Machine name of the bundle this item belongs to.
    pub bundle: String,
    /// The host holding the back-reference, once attached.
    pub host: Option<HostKey>,
    /// Inner field values, keyed by field name.
    pub values: BTreeMap<String, FieldValue>,
}

impl BundleItem {
    /// Creates an unattached item of a bundle.
    pub fn new(bundle: impl Into<String>) -> Self {
        Self {
            id: None,
            revision_id: RevisionId::NONE,
            bundle: bundle.into(),
            host: None,
            values: BTreeMap::new(),
        }
    }

    /// Returns true if the item has never been saved.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Sets one inner field value.
    pub fn set_value(&mut self, field: impl Into<String>, value: FieldValue) {
        self.values.insert(field.into(), value);
    }

    /// Reads one inner field value.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Human-readable label for the item.
    ///
    /// Saved items are labeled `{bundle} {id}`; unsaved items fall back to
    /// the bundle machine name.
    #[must_use]
    pub fn label(&self) -> String {
        match self.id {
            Some(id) => format!("{} {}", self.bundle, id),
            None => self.bundle.clone(),
        }
    }
}
