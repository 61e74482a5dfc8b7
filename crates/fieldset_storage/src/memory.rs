//! In-memory content store.

use crate::error::{StorageError, StoreResult};
use crate::store::ContentStore;
use fieldset_model::{
    BundleItem, FieldBundle, HostEntity, HostFieldConfig, HostId, HostKey, ItemId, ItemRef,
    RevisionId,
};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

/// An in-memory content store.
///
/// Holds bundle definitions, reference-field configuration, hosts, items
/// and revision snapshots behind a single lock. Suitable for tests and for
/// embedding the module without an external entity framework.
///
/// # Thread Safety
///
/// The store is thread-safe and can be shared across request handlers.
///
/// # Example
///
/// ```rust
/// use fieldset_model::{FieldBundle, FieldDefinition};
/// use fieldset_storage::{ContentStore, MemoryStore};
///
/// let store = MemoryStore::new();
/// store.define_bundle(
///     FieldBundle::new("contact_point", "Contact point")
///         .with_field(FieldDefinition::new("phone", "Phone")),
/// );
/// assert!(store.load_bundle("contact_point").is_some());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    bundles: BTreeMap<String, FieldBundle>,
    fields: Vec<HostFieldConfig>,
    hosts: BTreeMap<(String, HostId), HostEntity>,
    items: BTreeMap<ItemId, BundleItem>,
    revisions: BTreeMap<RevisionId, BundleItem>,
    item_cache: HashMap<ItemId, BundleItem>,
    next_item_id: u64,
    next_revision_id: u64,
    next_host_id: u64,
}

impl State {
    fn persist_host(&mut self, host: &mut HostEntity) {
        let id = match host.id {
            Some(id) => id,
            None => {
                self.next_host_id += 1;
                let id = HostId::new(self.next_host_id);
                host.id = Some(id);
                id
            }
        };
        self.hosts
            .insert((host.host_type.clone(), id), host.clone());
    }

    /// Archives a new revision of the item and persists it, assigning an id
    /// on first save. Returns the new reference entry for the host.
    fn persist_item(&mut self, item: &mut BundleItem) -> ItemRef {
        let id = match item.id {
            Some(id) => id,
            None => {
                self.next_item_id += 1;
                let id = ItemId::new(self.next_item_id);
                item.id = Some(id);
                id
            }
        };
        self.next_revision_id += 1;
        item.revision_id = RevisionId::new(self.next_revision_id);

        self.items.insert(id, item.clone());
        self.revisions.insert(item.revision_id, item.clone());
        self.item_cache.remove(&id);

        ItemRef::new(id, item.revision_id)
    }

    /// Removes an item, its revisions and its cache entry. The host's
    /// reference field is purged first when the item is attached.
    fn purge_item(&mut self, id: ItemId) -> StoreResult<()> {
        let item = self
            .items
            .remove(&id)
            .ok_or_else(|| StorageError::item_not_found(id))?;

        if let Some(key) = &item.host {
            if let Some(host) = self.hosts.get_mut(&(key.host_type.clone(), key.host_id)) {
                host.remove_refs_for(id);
            }
        }

        self.revisions
            .retain(|_, snapshot| snapshot.id != Some(id));
        self.item_cache.remove(&id);

        info!(item = %id, bundle = %item.bundle, "item deleted");
        Ok(())
    }
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items currently held in the read cache.
    #[must_use]
    pub fn cached_items(&self) -> usize {
        self.state.read().item_cache.len()
    }
}

impl ContentStore for MemoryStore {
    fn define_bundle(&self, bundle: FieldBundle) {
        debug!(bundle = %bundle.name, "bundle defined");
        self.state.write().bundles.insert(bundle.name.clone(), bundle);
    }

    fn load_bundle(&self, name: &str) -> Option<FieldBundle> {
        self.state.read().bundles.get(name).cloned()
    }

    fn bundle_names(&self) -> Vec<String> {
        self.state.read().bundles.keys().cloned().collect()
    }

    fn attach_field(&self, config: HostFieldConfig) -> StoreResult<()> {
        let mut state = self.state.write();
        if !state.bundles.contains_key(&config.bundle) {
            return Err(StorageError::bundle_not_found(&config.bundle));
        }
        state
            .fields
            .retain(|f| !(f.host_type == config.host_type && f.bundle == config.bundle));
        debug!(host_type = %config.host_type, bundle = %config.bundle, "field attached");
        state.fields.push(config);
        Ok(())
    }

    fn field_config(&self, host_type: &str, bundle: &str) -> Option<HostFieldConfig> {
        self.state
            .read()
            .fields
            .iter()
            .find(|f| f.host_type == host_type && f.bundle == bundle)
            .cloned()
    }

    fn detach_field(&self, host_type: &str, bundle: &str) -> StoreResult<()> {
        let mut state = self.state.write();
        let before = state.fields.len();
        state
            .fields
            .retain(|f| !(f.host_type == host_type && f.bundle == bundle));
        if state.fields.len() == before {
            return Err(StorageError::host_field_missing(host_type, bundle));
        }

        // Delete every item of the bundle referenced through this field.
        let doomed: Vec<ItemId> = state
            .hosts
            .iter()
            .filter(|((htype, _), _)| htype == host_type)
            .flat_map(|(_, host)| host.field_refs(bundle).iter().map(|r| r.item_id))
            .collect();
        for id in &doomed {
            // Duplicate or dangling references are skipped.
            if state.items.contains_key(id) {
                state.purge_item(*id)?;
            }
        }
        for host in state.hosts.values_mut() {
            if host.host_type == host_type {
                host.refs.remove(bundle);
            }
        }

        // The bundle definition goes with its last field.
        if !state.fields.iter().any(|f| f.bundle == bundle) {
            state.bundles.remove(bundle);
            info!(bundle = %bundle, "bundle removed with its last field");
        }

        info!(
            host_type = %host_type,
            bundle = %bundle,
            items = doomed.len(),
            "field detached"
        );
        Ok(())
    }

    fn save_host(&self, host: &mut HostEntity) -> StoreResult<()> {
        self.state.write().persist_host(host);
        debug!(host_type = %host.host_type, host = ?host.id, "host saved");
        Ok(())
    }

    fn load_host(&self, host_type: &str, id: HostId) -> Option<HostEntity> {
        self.state
            .read()
            .hosts
            .get(&(host_type.to_string(), id))
            .cloned()
    }

    fn delete_host(&self, host_type: &str, id: HostId) -> StoreResult<()> {
        let mut state = self.state.write();
        let host = state
            .hosts
            .remove(&(host_type.to_string(), id))
            .ok_or_else(|| StorageError::host_not_found(host_type, id))?;

        let referenced = host.referenced_items();
        for item_id in &referenced {
            // The host is already gone, so the back-reference walk inside
            // purge finds nothing to update. Duplicates are skipped.
            if state.items.contains_key(item_id) {
                state.purge_item(*item_id)?;
            }
        }

        info!(
            host_type = %host_type,
            host = %id,
            items = referenced.len(),
            "host deleted"
        );
        Ok(())
    }

    fn create_item(&self, bundle: &str) -> StoreResult<BundleItem> {
        if self.load_bundle(bundle).is_none() {
            return Err(StorageError::bundle_not_found(bundle));
        }
        Ok(BundleItem::new(bundle))
    }

    fn save_item(&self, item: &mut BundleItem, host: &mut HostEntity) -> StoreResult<()> {
        let mut state = self.state.write();

        if !state
            .fields
            .iter()
            .any(|f| f.host_type == host.host_type && f.bundle == item.bundle)
        {
            return Err(StorageError::host_field_missing(
                host.host_type.as_str(),
                item.bundle.as_str(),
            ));
        }

        // An unsaved host is persisted first so the back-reference has an
        // id to point at.
        if host.is_new() {
            state.persist_host(host);
        }
        let host_id = host
            .id
            .ok_or_else(|| StorageError::invalid_operation("host save did not assign an id"))?;

        item.host = Some(HostKey::new(host.host_type.as_str(), host_id));
        let entry = state.persist_item(item);

        host.upsert_ref(&item.bundle, entry);
        state.persist_host(host);

        debug!(
            item = %entry.item_id,
            revision = %entry.revision_id,
            bundle = %item.bundle,
            host = %host_id,
            "item saved"
        );
        Ok(())
    }

    fn save_existing_item(&self, item: &mut BundleItem) -> StoreResult<()> {
        let id = item
            .id
            .ok_or_else(|| StorageError::invalid_operation("item has never been saved"))?;
        let key = item
            .host
            .clone()
            .ok_or_else(|| StorageError::invalid_operation(format!("item {id} is unattached")))?;

        let mut state = self.state.write();
        let entry = state.persist_item(item);

        let host = state
            .hosts
            .get_mut(&(key.host_type.clone(), key.host_id))
            .ok_or_else(|| StorageError::host_not_found(key.host_type.as_str(), key.host_id))?;
        host.upsert_ref(&item.bundle, entry);

        debug!(item = %entry.item_id, revision = %entry.revision_id, "item re-saved");
        Ok(())
    }

    fn load_item(&self, id: ItemId) -> Option<BundleItem> {
        {
            let state = self.state.read();
            if let Some(cached) = state.item_cache.get(&id) {
                return Some(cached.clone());
            }
        }
        let mut state = self.state.write();
        let item = state.items.get(&id).cloned()?;
        state.item_cache.insert(id, item.clone());
        Some(item)
    }

    fn load_item_revision(&self, revision_id: RevisionId) -> Option<BundleItem> {
        self.state.read().revisions.get(&revision_id).cloned()
    }

    fn load_items(&self, ids: &[ItemId]) -> Vec<BundleItem> {
        let state = self.state.read();
        ids.iter()
            .filter_map(|id| state.items.get(id).cloned())
            .collect()
    }

    fn all_items(&self) -> Vec<BundleItem> {
        self.state.read().items.values().cloned().collect()
    }

    fn delete_item(&self, id: ItemId) -> StoreResult<()> {
        self.state.write().purge_item(id)
    }

    fn reset_cache(&self, ids: &[ItemId]) {
        let mut state = self.state.write();
        if ids.is_empty() {
            state.item_cache.clear();
        } else {
            for id in ids {
                state.item_cache.remove(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldset_model::{Cardinality, FieldDefinition};
    use serde_json::json;

    const BUNDLE: &str = "contact_point";
    const HOST_TYPE: &str = "article";

    fn store_with_bundle() -> MemoryStore {
        let store = MemoryStore::new();
        store.define_bundle(
            FieldBundle::new(BUNDLE, "Contact point")
                .with_field(FieldDefinition::new("phone", "Phone").required())
                .with_field(FieldDefinition::new("city", "City")),
        );
        store
            .attach_field(HostFieldConfig::new(HOST_TYPE, BUNDLE, Cardinality::Unlimited))
            .unwrap();
        store
    }

    fn saved_host(store: &MemoryStore) -> HostEntity {
        let mut host = HostEntity::new(HOST_TYPE, "A host");
        store.save_host(&mut host).unwrap();
        host
    }

    fn attached_item(store: &MemoryStore, host: &mut HostEntity, phone: &str) -> BundleItem {
        let mut item = store.create_item(BUNDLE).unwrap();
        item.set_value("phone", json!(phone));
        store.save_item(&mut item, host).unwrap();
        item
    }

    #[test]
    fn create_item_requires_bundle() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.create_item("missing"),
            Err(StorageError::BundleNotFound { .. })
        ));
    }

    #[test]
    fn attach_field_requires_bundle() {
        let store = MemoryStore::new();
        let result =
            store.attach_field(HostFieldConfig::new(HOST_TYPE, "missing", Cardinality::Unlimited));
        assert!(matches!(result, Err(StorageError::BundleNotFound { .. })));
    }

    #[test]
    fn save_assigns_id_and_revision_and_reference() {
        let store = store_with_bundle();
        let mut host = saved_host(&store);
        let item = attached_item(&store, &mut host, "555-0100");

        let id = item.id.unwrap();
        assert!(!item.revision_id.is_none());

        let refs = host.field_refs(BUNDLE);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].item_id, id);
        assert_eq!(refs[0].revision_id, item.revision_id);

        // The persisted host carries the same reference.
        let stored = store.load_host(HOST_TYPE, host.id.unwrap()).unwrap();
        assert_eq!(stored.field_refs(BUNDLE), refs);
    }

    #[test]
    fn save_with_unsaved_host_persists_both() {
        let store = store_with_bundle();
        let mut host = HostEntity::new(HOST_TYPE, "Draft");
        let mut item = store.create_item(BUNDLE).unwrap();
        item.set_value("phone", json!("555-0101"));

        store.save_item(&mut item, &mut host).unwrap();

        assert!(host.id.is_some());
        assert!(item.id.is_some());
        let stored = store.load_host(HOST_TYPE, host.id.unwrap()).unwrap();
        assert_eq!(stored.field_refs(BUNDLE)[0].item_id, item.id.unwrap());
        assert_eq!(stored.field_refs(BUNDLE)[0].revision_id, item.revision_id);
    }

    #[test]
    fn save_without_field_config_fails() {
        let store = store_with_bundle();
        let mut host = HostEntity::new("page", "Wrong type");
        store.save_host(&mut host).unwrap();
        let mut item = store.create_item(BUNDLE).unwrap();

        let result = store.save_item(&mut item, &mut host);
        assert!(matches!(result, Err(StorageError::HostFieldMissing { .. })));
    }

    #[test]
    fn resave_allocates_new_revision_and_updates_reference() {
        let store = store_with_bundle();
        let mut host = saved_host(&store);
        let mut item = attached_item(&store, &mut host, "555-0100");
        let first_revision = item.revision_id;

        item.set_value("phone", json!("555-0199"));
        store.save_existing_item(&mut item).unwrap();

        assert_ne!(item.revision_id, first_revision);

        let stored = store.load_host(HOST_TYPE, host.id.unwrap()).unwrap();
        assert_eq!(stored.field_refs(BUNDLE)[0].revision_id, item.revision_id);

        // The old snapshot stays loadable.
        let old = store.load_item_revision(first_revision).unwrap();
        assert_eq!(old.value("phone"), Some(&json!("555-0100")));
        let new = store.load_item_revision(item.revision_id).unwrap();
        assert_eq!(new.value("phone"), Some(&json!("555-0199")));
    }

    #[test]
    fn second_item_keeps_existing_reference() {
        let store = store_with_bundle();
        let mut host = saved_host(&store);
        let first = attached_item(&store, &mut host, "555-0100");
        let second = attached_item(&store, &mut host, "555-0101");

        let stored = store.load_host(HOST_TYPE, host.id.unwrap()).unwrap();
        let refs = stored.field_refs(BUNDLE);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].item_id, first.id.unwrap());
        assert_eq!(refs[0].revision_id, first.revision_id);
        assert_eq!(refs[1].item_id, second.id.unwrap());
        assert_eq!(refs[1].revision_id, second.revision_id);
    }

    #[test]
    fn delete_item_removes_host_reference() {
        let store = store_with_bundle();
        let mut host = saved_host(&store);
        let first = attached_item(&store, &mut host, "555-0100");
        let second = attached_item(&store, &mut host, "555-0101");

        store.delete_item(second.id.unwrap()).unwrap();

        let stored = store.load_host(HOST_TYPE, host.id.unwrap()).unwrap();
        let refs = stored.field_refs(BUNDLE);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].item_id, first.id.unwrap());
        assert!(store.load_item(second.id.unwrap()).is_none());
        assert!(store.load_item_revision(second.revision_id).is_none());
    }

    #[test]
    fn delete_missing_item_fails() {
        let store = store_with_bundle();
        assert!(matches!(
            store.delete_item(ItemId::new(99)),
            Err(StorageError::ItemNotFound { .. })
        ));
    }

    #[test]
    fn delete_host_cascades_to_items() {
        let store = store_with_bundle();
        let mut host = saved_host(&store);
        let first = attached_item(&store, &mut host, "555-0100");
        let second = attached_item(&store, &mut host, "555-0101");

        store.delete_host(HOST_TYPE, host.id.unwrap()).unwrap();

        assert!(store.load_item(first.id.unwrap()).is_none());
        assert!(store.load_item(second.id.unwrap()).is_none());
        assert!(store.all_items().is_empty());
    }

    #[test]
    fn detach_field_cascades_and_spares_other_bundles() {
        let store = store_with_bundle();
        store.define_bundle(
            FieldBundle::new("postal_address", "Postal address")
                .with_field(FieldDefinition::new("street", "Street")),
        );
        store
            .attach_field(HostFieldConfig::new(
                HOST_TYPE,
                "postal_address",
                Cardinality::Unlimited,
            ))
            .unwrap();

        let mut host = saved_host(&store);
        let contact = attached_item(&store, &mut host, "555-0100");
        let mut address = store.create_item("postal_address").unwrap();
        address.set_value("street", json!("1 Main St"));
        let mut host = store.load_host(HOST_TYPE, host.id.unwrap()).unwrap();
        store.save_item(&mut address, &mut host).unwrap();

        store.detach_field(HOST_TYPE, BUNDLE).unwrap();

        assert!(store.load_item(contact.id.unwrap()).is_none());
        assert!(store.load_item(address.id.unwrap()).is_some());
        // Last field referencing the bundle: the definition goes with it.
        assert!(store.load_bundle(BUNDLE).is_none());
        assert!(store.load_bundle("postal_address").is_some());
        assert_eq!(store.bundle_names(), vec!["postal_address".to_string()]);
    }

    #[test]
    fn detach_keeps_bundle_while_other_fields_remain() {
        let store = store_with_bundle();
        store
            .attach_field(HostFieldConfig::new("page", BUNDLE, Cardinality::Unlimited))
            .unwrap();

        store.detach_field(HOST_TYPE, BUNDLE).unwrap();

        assert!(store.load_bundle(BUNDLE).is_some());

        store.detach_field("page", BUNDLE).unwrap();
        assert!(store.load_bundle(BUNDLE).is_none());
    }

    #[test]
    fn load_items_skips_missing() {
        let store = store_with_bundle();
        let mut host = saved_host(&store);
        let item = attached_item(&store, &mut host, "555-0100");

        let loaded = store.load_items(&[item.id.unwrap(), ItemId::new(99)]);
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn read_cache_fills_and_resets() {
        let store = store_with_bundle();
        let mut host = saved_host(&store);
        let item = attached_item(&store, &mut host, "555-0100");
        let id = item.id.unwrap();

        assert_eq!(store.cached_items(), 0);
        store.load_item(id).unwrap();
        assert_eq!(store.cached_items(), 1);

        store.reset_cache(&[id]);
        assert_eq!(store.cached_items(), 0);

        store.load_item(id).unwrap();
        store.reset_cache(&[]);
        assert_eq!(store.cached_items(), 0);
    }

    #[test]
    fn cache_invalidated_on_save() {
        let store = store_with_bundle();
        let mut host = saved_host(&store);
        let mut item = attached_item(&store, &mut host, "555-0100");
        let id = item.id.unwrap();

        store.load_item(id).unwrap();
        item.set_value("phone", json!("555-0123"));
        store.save_existing_item(&mut item).unwrap();

        // A fresh load must observe the new value, not the cached one.
        let loaded = store.load_item(id).unwrap();
        assert_eq!(loaded.value("phone"), Some(&json!("555-0123")));
    }
}
