//! The embedded collection widget for host forms.

use crate::element::Element;
use fieldset_model::{BundleItem, FieldBundle};

/// Builds the widget embedding a bundle's inputs into a host form.
///
/// Preparation produces one input child per inner field, each carrying the
/// field's own requiredness. [`force_required`](Self::force_required) is a
/// separate post-processing pass applied after preparation: it marks the
/// widget root required regardless of the field configuration, so an
/// embedded collection can never be submitted empty.
#[derive(Debug, Default)]
pub struct EmbedWidgetBuilder;

impl EmbedWidgetBuilder {
    /// Creates a widget builder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Prepares the widget for a bundle, pre-filled from an item.
    #[must_use]
    pub fn prepare(&self, bundle: &FieldBundle, item: &BundleItem) -> Element {
        let mut widget = Element::container().with_title(bundle.label.clone());

        for field in &bundle.fields {
            let mut input = Element::container().with_title(field.label.clone());
            input.required = field.required;
            if let Some(value) = item.value(&field.name) {
                input.markup = value.as_str().map(ToString::to_string);
            }
            widget = widget.with_child(field.name.clone(), input);
        }

        widget
    }

    /// Post-render pass: marks the prepared widget required.
    pub fn force_required(widget: &mut Element) {
        widget.required = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldset_model::FieldDefinition;
    use serde_json::json;

    fn bundle() -> FieldBundle {
        FieldBundle::new("contact_point", "Contact point")
            .with_field(FieldDefinition::new("phone", "Phone").required())
            .with_field(FieldDefinition::new("city", "City"))
    }

    #[test]
    fn prepare_carries_field_requiredness() {
        let widget = EmbedWidgetBuilder::new().prepare(&bundle(), &BundleItem::new("contact_point"));
        assert!(widget.child("phone").unwrap().required);
        assert!(!widget.child("city").unwrap().required);
        // The root is not required until the post-render pass runs.
        assert!(!widget.required);
    }

    #[test]
    fn force_required_overrides_configuration() {
        let optional_bundle = FieldBundle::new("notes", "Notes")
            .with_field(FieldDefinition::new("body", "Body"));
        let mut widget =
            EmbedWidgetBuilder::new().prepare(&optional_bundle, &BundleItem::new("notes"));

        EmbedWidgetBuilder::force_required(&mut widget);
        assert!(widget.required);
    }

    #[test]
    fn prepare_prefills_values() {
        let mut item = BundleItem::new("contact_point");
        item.set_value("phone", json!("555-0100"));
        let widget = EmbedWidgetBuilder::new().prepare(&bundle(), &item);
        assert_eq!(
            widget.child("phone").unwrap().markup.as_deref(),
            Some("555-0100")
        );
    }
}
