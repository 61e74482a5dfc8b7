//! Route-parameter binding.

use crate::error::{WebError, WebResult};
use fieldset_model::{HostId, ItemId, RevisionId};
use std::collections::BTreeMap;

/// Parameters extracted from the matched route.
///
/// Handlers never touch the raw request: parameters are bound here first,
/// and every typed accessor has a defined failure path
/// ([`WebError::BadParameter`]) for a missing or unparsable value.
#[derive(Debug, Clone, Default)]
pub struct RouteParams {
    params: BTreeMap<String, String>,
}

impl RouteParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one parameter.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Raw string value of a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    fn required(&self, name: &'static str) -> WebResult<&str> {
        self.get(name).ok_or(WebError::bad_parameter(name))
    }

    fn required_u64(&self, name: &'static str) -> WebResult<u64> {
        self.required(name)?
            .parse()
            .map_err(|_| WebError::bad_parameter(name))
    }

    /// The `item` parameter.
    pub fn item_id(&self) -> WebResult<ItemId> {
        self.required_u64("item").map(ItemId::new)
    }

    /// The `revision` parameter.
    pub fn revision_id(&self) -> WebResult<RevisionId> {
        self.required_u64("revision").map(RevisionId::new)
    }

    /// The `host_type` parameter.
    pub fn host_type(&self) -> WebResult<&str> {
        self.required("host_type")
    }

    /// The `host_id` parameter.
    pub fn host_id(&self) -> WebResult<HostId> {
        self.required_u64("host_id").map(HostId::new)
    }

    /// The `bundle` parameter.
    pub fn bundle(&self) -> WebResult<&str> {
        self.required("bundle")
    }
}
