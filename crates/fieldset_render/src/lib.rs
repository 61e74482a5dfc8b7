//! # Fieldset Render
//!
//! Render trees and view building for the fieldset content module.
//!
//! This crate provides:
//! - [`Element`] - a render-tree node with optional cache metadata
//! - [`CacheMeta`] - cache directives attached to rendered fragments
//! - [`ItemViewBuilder`] - renders a bundle item from its definition
//! - [`EmbedWidgetBuilder`] - the embedded collection widget for host
//!   forms, with the late required-marking pass

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod element;
mod view;
mod widget;

pub use element::{CacheMeta, Element};
pub use view::ItemViewBuilder;
pub use widget::EmbedWidgetBuilder;
