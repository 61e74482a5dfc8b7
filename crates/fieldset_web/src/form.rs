//! The item create/edit form.

use crate::controller::HandlerContext;
use crate::error::{WebError, WebResult};
use crate::request::RouteParams;
use fieldset_model::{BundleItem, FieldBundle, HostEntity, ItemId};
use fieldset_render::{Element, EmbedWidgetBuilder};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of a form save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    /// The form must be redisplayed instead of redirecting.
    pub rebuilt: bool,
    /// Where to send the editor on success.
    pub redirect: Option<String>,
    /// Id of the saved item, once it has one.
    pub saved_id: Option<ItemId>,
}

/// Wires item creation and editing to the host's reference field.
pub struct ItemForm {
    context: Arc<HandlerContext>,
    widgets: EmbedWidgetBuilder,
}

impl ItemForm {
    /// Creates the form over a request context.
    pub fn new(context: Arc<HandlerContext>) -> Self {
        Self {
            context,
            widgets: EmbedWidgetBuilder::new(),
        }
    }

    /// Builds the form render tree for an item.
    #[must_use]
    pub fn build(&self, bundle: &FieldBundle, item: &BundleItem) -> Element {
        let title = if item.is_new() {
            format!("Create {}", bundle.label)
        } else {
            format!("Edit {}", item.label())
        };

        let mut widget = self.widgets.prepare(bundle, item);
        // Post-processing step, applied after normal preparation: the
        // embedded widget is required no matter what the field says.
        EmbedWidgetBuilder::force_required(&mut widget);

        Element::container()
            .with_title(title)
            .with_child(bundle.name.clone(), widget)
            .with_child("actions", Element::markup("Save"))
    }

    /// Saves the submitted item.
    ///
    /// A new item is bound to the host named by the request's
    /// host-type/host-id parameters, then saved, then the host is saved so
    /// its reference field picks up the new id and revision. An existing
    /// item is re-saved on its own.
    ///
    /// The messenger is consulted *before* any success notice goes out: a
    /// warning or error already accumulated in this request suppresses the
    /// notice even when the save itself succeeded. If the item ends up with
    /// no id the save failed; a failure notice is emitted and the form state
    /// asks for a redisplay instead of a redirect.
    pub fn save(&self, item: &mut BundleItem, params: &RouteParams) -> WebResult<FormState> {
        let mut host_for_redirect: Option<HostEntity> = None;

        if item.is_new() {
            let host_type = params.host_type()?;
            let host_id = params.host_id()?;
            let mut host = self
                .context
                .store
                .load_host(host_type, host_id)
                .ok_or_else(|| WebError::not_found("host", format!("{host_type}/{host_id}")))?;

            self.context.store.save_item(item, &mut host)?;

            if !self.context.messenger.has_warnings_or_errors() {
                self.context
                    .messenger
                    .add_status(format!("Successfully added a {}.", item.bundle));
            }
            host_for_redirect = Some(host);
        } else if !self.context.messenger.has_warnings_or_errors() {
            self.context.store.save_existing_item(item)?;
            self.context
                .messenger
                .add_status(format!("Successfully edited {}.", item.label()));
        }

        match item.id {
            Some(id) => {
                let host = match host_for_redirect {
                    Some(host) => host,
                    None => self.host_of(item)?,
                };
                debug!(item = %id, revision = %item.revision_id, "form save complete");
                Ok(FormState {
                    rebuilt: false,
                    redirect: Some(host.canonical_path()),
                    saved_id: Some(id),
                })
            }
            None => {
                // Something went wrong on save; redisplay the form.
                warn!(bundle = %item.bundle, "item save left no id");
                self.context
                    .messenger
                    .add_error("The item could not be saved.");
                Ok(FormState {
                    rebuilt: true,
                    redirect: None,
                    saved_id: None,
                })
            }
        }
    }

    fn host_of(&self, item: &BundleItem) -> WebResult<HostEntity> {
        let key = item
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
