//! # Fieldset Web
//!
//! Controllers and forms for the fieldset content module.
//!
//! This crate supplies the request-facing layer:
//! - [`ItemController`] - add / view / revision endpoints and their title
//!   callbacks
//! - [`ItemForm`] - item creation and editing, including host attachment
//! - [`ItemDeleteForm`] - the delete-confirmation flow
//! - [`Messenger`] - the per-request status/warning/error queue
//! - [`AuditLog`] - the deletion-audit collaborator
//! - [`RouteParams`] - route-parameter binding with a defined not-found
//!   failure path
//!
//! All collaborators are handed in explicitly at construction; there is no
//! process-wide service access. One controller serves one request.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod audit;
mod controller;
mod delete_form;
mod error;
mod form;
mod messenger;
mod request;

pub use audit::{AuditEntry, AuditLog, MemoryAuditLog};
pub use controller::{HandlerContext, ItemController};
pub use delete_form::ItemDeleteForm;
pub use error::{WebError, WebResult};
pub use form::{FormState, ItemForm};
pub use messenger::{Message, Messenger, Severity};
pub use request::RouteParams;
