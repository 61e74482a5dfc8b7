//! Host entities and their reference-field values.

use crate::ids::{HostId, ItemId, RevisionId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry in a host's reference field.
///
/// Stores the referenced item's id together with the item's current
/// revision id. The revision id is kept in lockstep with the item: every
/// save of the item updates the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    /// The referenced item.
    pub item_id: ItemId,
    /// The item's revision at the time of the last save.
    pub revision_id: RevisionId,
}

impl ItemRef {
    /// Creates a reference entry.
    #[must_use]
    pub const fn new(item_id: ItemId, revision_id: RevisionId) -> Self {
        Self {
            item_id,
            revision_id,
        }
    }
}

/// A host entity: the content record items are attached to.
///
/// The host's reference fields are keyed by bundle machine name; each field
/// holds an ordered list of [`ItemRef`] entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostEntity {
    /// The host entity type, e.g. `article`.
    pub host_type: String,
    /// Assigned on first save; `None` while unsaved.
    pub id: Option<HostId>,
    /// Human-readable title of the record.
    pub title: String,
    /// Reference-field values, keyed by bundle name.
    pub refs: BTreeMap<String, Vec<ItemRef>>,
}

impl HostEntity {
    /// Creates an unsaved host entity.
    pub fn new(host_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            host_type: host_type.into(),
            id: None,
            title: title.into(),
            refs: BTreeMap::new(),
        }
    }

    /// Returns true if the host has never been saved.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Returns the reference entries of one field, empty if unset.
    #[must_use]
    pub fn field_refs(&self, bundle: &str) -> &[ItemRef] {
        self.refs.get(bundle).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of entries currently held by one reference field.
    #[must_use]
    pub fn field_len(&self, bundle: &str) -> usize {
        self.field_refs(bundle).len()
    }

    /// Inserts or updates the entry for an item in one reference field.
    ///
    /// If the field already references the item, only the stored revision id
    /// is updated; otherwise the entry is appended.
    pub fn upsert_ref(&mut self, bundle: &str, entry: ItemRef) {
        let list = self.refs.entry(bundle.to_string()).or_default();
        match list.iter_mut().find(|r| r.item_id == entry.item_id) {
            Some(existing) => existing.revision_id = entry.revision_id,
            None => list.push(entry),
        }
    }

    /// Removes every occurrence of an item id from all reference fields.
    ///
    /// Returns the number of entries removed. Empty fields are dropped from
    /// the map so `refs` never carries empty lists.
    pub fn remove_refs_for(&mut self, item_id: ItemId) -> usize {
        let mut removed = 0;
        for list in self.refs.values_mut() {
            let before = list.len();
            list.retain(|r| r.item_id != item_id);
            removed += before - list.len();
        }
        self.refs.retain(|_, list| !list.is_empty());
        removed
    }

    /// All item ids referenced by this host, across all fields.
    #[must_use]
    pub fn referenced_items(&self) -> Vec<ItemId> {
        self.refs
            .values()
            .flat_map(|list| list.iter().map(|r| r.item_id))
            .collect()
    }

    /// Canonical location of the host record, `/{host_type}/{id}`.
    ///
    /// Unsaved hosts have no canonical location yet and yield the host-type
    /// listing path instead.
    #[must_use]
    pub fn canonical_path(&self) -> String {
        match self.id {
            Some(id) => format!("/{}/{}", self.host_type, id),
            None => format!("/{}", self.host_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_with_refs() -> HostEntity {
        let mut host = HostEntity::new("article", "Hello");
        host.id = Some(HostId::new(1));
        host.upsert_ref("contact_point", ItemRef::new(ItemId::new(5), RevisionId::new(9)));
        host.upsert_ref("contact_point", ItemRef::new(ItemId::new(6), RevisionId::new(10)));
        host
    }

    #[test]
    fn upsert_updates_revision_in_place() {
        let mut host = host_with_refs();
        host.upsert_ref("contact_point", ItemRef::new(ItemId::new(5), RevisionId::new(20)));

        let refs = host.field_refs("contact_point");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].revision_id, RevisionId::new(20));
    }

    #[test]
    fn remove_refs_drops_every_occurrence() {
        let mut host = host_with_refs();
        // Duplicate entry for the same item (possible through direct field
        // manipulation).
        host.refs
            .get_mut("contact_point")
            .unwrap()
            .push(ItemRef::new(ItemId::new(5), RevisionId::new(9)));

        assert_eq!(host.remove_refs_for(ItemId::new(5)), 2);
        assert_eq!(host.field_len("contact_point"), 1);
        assert_eq!(host.field_refs("contact_point")[0].item_id, ItemId::new(6));
    }

    #[test]
    fn remove_refs_drops_empty_fields() {
        let mut host = host_with_refs();
        host.remove_refs_for(ItemId::new(5));
        host.remove_refs_for(ItemId::new(6));
        assert!(host.refs.is_empty());
    }

    #[test]
    fn canonical_path() {
        let host = host_with_refs();
        assert_eq!(host.canonical_path(), "/article/1");
        assert_eq!(HostEntity::new("article", "x").canonical_path(), "/article");
    }
}
