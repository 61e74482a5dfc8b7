//! # Fieldset Testkit
//!
//! Test fixtures for the fieldset content module.
//!
//! This crate provides:
//! - [`TestBed`] - a pre-populated store with a bundle and a host type
//! - Per-request controller construction helpers
//! - Tracing initialization for tests
//!
//! ## Usage
//!
//! ```rust
//! use fieldset_testkit::prelude::*;
//!
//! let bed = TestBed::new();
//! let (host, item) = bed.create_host_with_item();
//! assert_eq!(host.field_refs(BUNDLE)[0].item_id, item.id.unwrap());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::fixtures::*;
}

pub use fixtures::*;
