//! The storage-service contract consumed by handlers and forms.

use crate::error::StoreResult;
use fieldset_model::{
    BundleItem, FieldBundle, HostEntity, HostFieldConfig, HostId, ItemId, RevisionId,
};

/// The entity storage service the fieldset module delegates to.
///
/// Every operation is a single synchronous call; implementations own all
/// durability concerns. Methods take `&self` so a store handle can be shared
/// across request handlers.
///
/// # Attachment invariant
///
/// [`save_item`](ContentStore::save_item) keeps the host's reference field
/// in lockstep with the item: the entry always stores the item's id and its
/// latest revision id. An item saved through any other path is not valid.
pub trait ContentStore: Send + Sync {
    // --- bundle definitions ---

    /// Defines (or redefines) a bundle.
    fn define_bundle(&self, bundle: FieldBundle);

    /// Loads a bundle definition by machine name.
    fn load_bundle(&self, name: &str) -> Option<FieldBundle>;

    /// Machine names of all defined bundles.
    fn bundle_names(&self) -> Vec<String>;

    // --- reference fields ---

    /// Attaches a bundle reference field to a host type.
    ///
    /// Fails with `BundleNotFound` if the bundle is undefined.
    fn attach_field(&self, config: HostFieldConfig) -> StoreResult<()>;

    /// Looks up the reference-field configuration for a host type / bundle
    /// pair.
    fn field_config(&self, host_type: &str, bundle: &str) -> Option<HostFieldConfig>;

    /// Detaches a reference field from a host type.
    ///
    /// Cascades: every item of the bundle referenced through this field is
    /// deleted. When the last field referencing the bundle is detached, the
    /// bundle definition itself is removed. Items of other bundles are left
    /// untouched.
    fn detach_field(&self, host_type: &str, bundle: &str) -> StoreResult<()>;

    // --- hosts ---

    /// Saves a host entity, assigning an id on first save.
    fn save_host(&self, host: &mut HostEntity) -> StoreResult<()>;

    /// Loads a host entity.
    fn load_host(&self, host_type: &str, id: HostId) -> Option<HostEntity>;

    /// Deletes a host entity.
    ///
    /// Cascades: every item referenced by the host is deleted with it.
    fn delete_host(&self, host_type: &str, id: HostId) -> StoreResult<()>;

    // --- items ---

    /// Creates an unattached item of a bundle, with the zero-valued revision
    /// marker.
    fn create_item(&self, bundle: &str) -> StoreResult<BundleItem>;

    /// Saves an item attached to the given host.
    ///
    /// An unsaved host is saved first so the back-reference has an id to
    /// point at. Every save allocates a fresh revision and archives the
    /// snapshot, then the host's reference entry is inserted or updated and
    /// the host is saved so the reference is durable.
    fn save_item(&self, item: &mut BundleItem, host: &mut HostEntity) -> StoreResult<()>;

    /// Re-saves an already attached item.
    ///
    /// The host is resolved from the item's back-reference; its reference
    /// entry follows the new revision.
    fn save_existing_item(&self, item: &mut BundleItem) -> StoreResult<()>;

    /// Loads an item by id.
    fn load_item(&self, id: ItemId) -> Option<BundleItem>;

    /// Loads a historical item snapshot by revision id.
    fn load_item_revision(&self, revision_id: RevisionId) -> Option<BundleItem>;

    /// Loads several items at once; missing ids are skipped.
    fn load_items(&self, ids: &[ItemId]) -> Vec<BundleItem>;

    /// All stored items, in id order.
    fn all_items(&self) -> Vec<BundleItem>;

    /// Deletes an item.
    ///
    /// The host's reference field is purged of every occurrence of the id
    /// and saved before the item and its revisions disappear.
    fn delete_item(&self, id: ItemId) -> StoreResult<()>;

    // --- cache ---

    /// Invalidates the item read cache for the given ids; an empty slice
    /// clears the whole cache.
    fn reset_cache(&self, ids: &[ItemId]);
}
