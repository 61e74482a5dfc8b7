//! # Fieldset Storage
//!
//! Entity storage seam for the fieldset content module.
//!
//! This crate provides the storage-service contract the module depends on
//! and an in-memory implementation of it:
//!
//! - [`ContentStore`] - create / load / load-revision / load-multiple /
//!   save / delete operations plus cache invalidation
//! - [`MemoryStore`] - in-memory store with a revision archive, an item
//!   read cache, and cascade deletes (host -> items, field -> items ->
//!   bundle)
//!
//! Handlers and forms depend only on the [`ContentStore`] contract, never
//! on a concrete implementation.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod memory;
mod store;

pub use error::{StorageError, StoreResult};
pub use memory::MemoryStore;
pub use store::ContentStore;
