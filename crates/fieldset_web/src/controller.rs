//! Item endpoints: add, view, revision view and their title callbacks.

use crate::audit::AuditLog;
use crate::delete_form::ItemDeleteForm;
use crate::error::{WebError, WebResult};
use crate::form::ItemForm;
use crate::messenger::Messenger;
use crate::request::RouteParams;
use fieldset_model::{BundleItem, FieldBundle};
use fieldset_render::{Element, ItemViewBuilder};
use fieldset_storage::{ContentStore, StorageError};
use std::sync::Arc;

/// Shared context for one request.
///
/// Every collaborator is handed in explicitly: the store contract, the
/// per-request messenger and the audit log. Handlers and forms clone the
/// `Arc`, never reach for process-wide services.
pub struct HandlerContext {
    /// Entity storage service.
    pub store: Arc<dyn ContentStore>,
    /// Per-request message queue.
    pub messenger: Arc<Messenger>,
    /// Deletion-audit log.
    pub audit: Arc<dyn AuditLog>,
}

impl HandlerContext {
    /// Creates a request context.
    pub fn new(
        store: Arc<dyn ContentStore>,
        messenger: Arc<Messenger>,
        audit: Arc<dyn AuditLog>,
    ) -> Self {
        Self {
            store,
            messenger,
            audit,
        }
    }
}

/// Handles the item routes.
///
/// One controller serves one request; the messenger inside the context is
/// scoped accordingly.
pub struct ItemController {
    context: Arc<HandlerContext>,
    views: ItemViewBuilder,
}

impl ItemController {
    /// Creates a controller over a request context.
    pub fn new(context: Arc<HandlerContext>) -> Self {
        Self {
            context,
            views: ItemViewBuilder::new(),
        }
    }

    /// The request context.
    #[must_use]
    pub fn context(&self) -> &Arc<HandlerContext> {
        &self.context
    }

    /// Provides the item submission form for the add route.
    ///
    /// The target reference field on the host is checked first: if its
    /// cardinality limit is reached the operation is refused with an error
    /// notice, no form is rendered and no item is created.
    pub fn add(&self, params: &RouteParams) -> WebResult<Element> {
        let bundle_name = params.bundle()?;
        let host_type = params.host_type()?;
        let host_id = params.host_id()?;

        let host = self
            .context
            .store
            .load_host(host_type, host_id)
            .ok_or_else(|| WebError::not_found("host", format!("{host_type}/{host_id}")))?;
        let bundle = self.bind_bundle(bundle_name)?;
        let config = self
            .context
            .store
            .field_config(host_type, bundle_name)
            .ok_or_else(|| StorageError::host_field_missing(host_type, bundle_name))?;

        if !config.cardinality.has_room(host.field_len(bundle_name)) {
            self.context.messenger.add_error("This field is already full.");
            return Ok(Element::markup("Cannot add to an already full field."));
        }

        let item = self.context.store.create_item(bundle_name)?;
        Ok(ItemForm::new(Arc::clone(&self.context)).build(&bundle, &item))
    }

    /// Displays an item.
    pub fn page(&self, params: &RouteParams) -> WebResult<Element> {
        let item = self.bind_item(params)?;
        let bundle = self.bind_bundle(&item.bundle)?;
        Ok(self.views.view(&bundle, &item))
    }

    /// Title callback for the item view route.
    pub fn page_title(&self, params: &RouteParams) -> WebResult<String> {
        Ok(self.bind_item(params)?.label())
    }

    /// Title callback for the add route.
    pub fn add_page_title(&self, params: &RouteParams) -> WebResult<String> {
        let bundle = self.bind_bundle(params.bundle()?)?;
        Ok(format!("Create {}", bundle.label))
    }

    /// Displays a historical item revision.
    ///
    /// Revision pages are not cacheable by their id alone, so every cache
    /// directive is stripped from the rendered fragment.
    pub fn revision_show(&self, params: &RouteParams) -> WebResult<Element> {
        let item = self.bind_revision(params)?;
        let bundle = self.bind_bundle(&item.bundle)?;

        let mut page = self.views.view(&bundle, &item);
        page.strip_cache();
        Ok(page)
    }

    /// Title callback for the revision view route.
    pub fn revision_page_title(&self, params: &RouteParams) -> WebResult<String> {
        let revision_id = params.revision_id()?;
        let item = self.bind_revision(params)?;
        Ok(format!("Revision {} of {}", revision_id, item.label()))
    }

    /// Builds the delete-confirmation form for an item.
    pub fn delete_form(&self, params: &RouteParams) -> WebResult<ItemDeleteForm> {
        ItemDeleteForm::load(Arc::clone(&self.context), params.item_id()?)
    }

    fn bind_item(&self, params: &RouteParams) -> WebResult<BundleItem> {
        let id = params.item_id()?;
        self.context
            .store
            .load_item(id)
            .ok_or_else(|| WebError::not_found("item", id))
    }

    fn bind_revision(&self, params: &RouteParams) -> WebResult<BundleItem> {
        let id = params.revision_id()?;
        self.context
            .store
            .load_item_revision(id)
            .ok_or_else(|| WebError::not_found("revision", id))
    }

    fn bind_bundle(&self, name: &str) -> WebResult<FieldBundle> {
        self.context
            .store
            .load_bundle(name)
            .ok_or_else(|| WebError::not_found("bundle", name))
    }
}
