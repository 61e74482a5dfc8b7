//! The delete-confirmation flow.

use crate::audit::AuditEntry;
use crate::controller::HandlerContext;
use crate::error::{WebError, WebResult};
use fieldset_model::{BundleItem, HostEntity, ItemId};
use std::sync::Arc;
use tracing::debug;

/// Confirmation form for deleting one item.
///
/// Deletion walks the host's reference field first, removing every entry
/// holding the item's id, saves the host, and only then deletes the item
/// itself. The confirmation notice names the bundle's human label, never
/// its machine name. Cancelling returns the editor to the host's canonical
/// location.
pub struct ItemDeleteForm {
    context: Arc<HandlerContext>,
    item: BundleItem,
}

impl ItemDeleteForm {
    /// Binds the form to an item, failing if the item does not exist.
    pub fn load(context: Arc<HandlerContext>, id: ItemId) -> WebResult<Self> {
        let item = context
            .store
            .load_item(id)
            .ok_or_else(|| WebError::not_found("item", id))?;
        Ok(Self { context, item })
    }

    /// The item under confirmation.
    #[must_use]
    pub fn item(&self) -> &BundleItem {
        &self.item
    }

    /// The confirmation question.
    #[must_use]
    pub fn question(&self) -> String {
        format!("Are you sure you want to delete this {}?", self.item.label())
    }

    /// Where cancelling takes the editor: the host's canonical location.
    pub fn cancel_path(&self) -> WebResult<String> {
        Ok(self.host()?.canonical_path())
    }

    /// Confirms the deletion. Returns the redirect path.
    pub fn submit(self) -> WebResult<String> {
        let id = self
            .item
            .id
            .ok_or_else(|| WebError::not_found("item", "unsaved item"))?;
        let mut host = self.host()?;

        // Drop every occurrence of the item from the host's field value
        // list and persist the host before the item record disappears.
        let removed = host.remove_refs_for(id);
        self.context.store.save_host(&mut host)?;
        self.context.store.delete_item(id)?;

        debug!(item = %id, removed, "host references removed");
        self.context
            .audit
            .notice(AuditEntry::new(self.item.bundle.clone(), id, "deleted"));

        let label = self
            .context
            .store
            .load_bundle(&self.item.bundle)
            .map(|b| b.label)
            .unwrap_or_else(|| self.item.bundle.clone());
        self.context
            .messenger
            .add_status(format!("{label} {id} has been deleted."));

        Ok(host.canonical_path())
    }

    fn host(&self) -> WebResult<HostEntity> {
        let key = self
            .item
            .host
            .as_ref()
            .ok_or_else(|| WebError::not_found("host", "unattached item"))?;
        self.context
            .store
            .load_host(&key.host_type, key.host_id)
            .ok_or_else(|| {
                WebError::not_found("host", format!("{}/{}", key.host_type, key.host_id))
            })
    }
}
