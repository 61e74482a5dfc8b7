//! Item view building.

use crate::element::{CacheMeta, Element};
use fieldset_model::{BundleItem, FieldBundle, FieldValue};

/// Builds display render trees for bundle items.
///
/// The view carries one child per inner field of the bundle, labeled and
/// formatted, plus cache metadata tagged with the item id so saves
/// invalidate the rendered fragment.
#[derive(Debug, Default)]
pub struct ItemViewBuilder;

impl ItemViewBuilder {
    /// Creates a view builder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Renders one item.
    #[must_use]
    pub fn view(&self, bundle: &FieldBundle, item: &BundleItem) -> Element {
        let mut view = Element::container().with_title(item.label());

        if let Some(id) = item.id {
            view = view.with_cache(CacheMeta::tagged(format!("fieldset_item:{id}")));
        }

        for field in &bundle.fields {
            let text = item.value(&field.name).map(format_value).unwrap_or_default();
            view = view.with_child(
                field.name.clone(),
                Element::markup(format!("{}: {}", field.label, text)),
            );
        }

        view
    }
}

/// Formats a field value for display. Strings render without quotes,
/// everything else falls back to its JSON form.
fn format_value(value: &FieldValue) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldset_model::{FieldDefinition, ItemId, RevisionId};
    use serde_json::json;

    fn bundle() -> FieldBundle {
        FieldBundle::new("contact_point", "Contact point")
            .with_field(FieldDefinition::new("phone", "Phone"))
            .with_field(FieldDefinition::new("city", "City"))
    }

    fn saved_item() -> BundleItem {
        let mut item = BundleItem::new("contact_point");
        item.id = Some(ItemId::new(7));
        item.revision_id = RevisionId::new(3);
        item.set_value("phone", json!("555-0100"));
        item
    }

    #[test]
    fn view_renders_all_fields() {
        let view = ItemViewBuilder::new().view(&bundle(), &saved_item());

        assert_eq!(view.title.as_deref(), Some("contact_point 7"));
        assert_eq!(
            view.child("phone").unwrap().markup.as_deref(),
            Some("Phone: 555-0100")
        );
        // Unset fields still render their label.
        assert_eq!(view.child("city").unwrap().markup.as_deref(), Some("City: "));
    }

    #[test]
    fn view_is_tagged_with_the_item_id() {
        let view = ItemViewBuilder::new().view(&bundle(), &saved_item());
        let cache = view.cache.unwrap();
        assert_eq!(cache.tags, vec!["fieldset_item:7".to_string()]);
    }

    #[test]
    fn unsaved_item_view_is_untagged() {
        let view = ItemViewBuilder::new().view(&bundle(), &BundleItem::new("contact_point"));
        assert!(view.cache.is_none());
    }

    #[test]
    fn non_string_values_render_as_json() {
        let mut item = saved_item();
        item.set_value("city", json!(42));
        let view = ItemViewBuilder::new().view(&bundle(), &item);
        assert_eq!(view.child("city").unwrap().markup.as_deref(), Some("City: 42"));
    }
}
