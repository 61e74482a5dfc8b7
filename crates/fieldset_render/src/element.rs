//! Render-tree nodes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cache directives attached to a rendered fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheMeta {
    /// Invalidation tags.
    pub tags: Vec<String>,
    /// Maximum age in seconds; `None` means cacheable forever.
    pub max_age: Option<u64>,
}

impl CacheMeta {
    /// Creates cache metadata carrying a single tag.
    pub fn tagged(tag: impl Into<String>) -> Self {
        Self {
            tags: vec![tag.into()],
            max_age: None,
        }
    }
}

/// One node of a render tree.
///
/// Render trees are plain data handed back by handlers; an external render
/// pipeline turns them into a response. Children are named, mirroring the
/// keyed render structures of the host framework.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Literal markup carried by this node, if any.
    pub markup: Option<String>,
    /// Title of the fragment, if any.
    pub title: Option<String>,
    /// Whether an input rendered from this node must be filled in.
    pub required: bool,
    /// Cache directives for this fragment.
    pub cache: Option<CacheMeta>,
    /// Named child nodes.
    pub children: BTreeMap<String, Element>,
}

impl Element {
    /// Creates an empty container node.
    #[must_use]
    pub fn container() -> Self {
        Self::default()
    }

    /// Creates a markup leaf node.
    pub fn markup(text: impl Into<String>) -> Self {
        Self {
            markup: Some(text.into()),
            ..Self::default()
        }
    }

    /// Sets the fragment title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attaches cache metadata.
    #[must_use]
    pub fn with_cache(mut self, cache: CacheMeta) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Adds a named child node.
    #[must_use]
    pub fn with_child(mut self, name: impl Into<String>, child: Element) -> Self {
        self.children.insert(name.into(), child);
        self
    }

    /// Looks up a child node by name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.get(name)
    }

    /// Removes cache metadata from this node and its entire subtree.
    ///
    /// Revision pages are not cacheable by id alone, so their fragments
    /// must carry no cache directives at all.
    pub fn strip_cache(&mut self) {
        self.cache = None;
        for child in self.children.values_mut() {
            child.strip_cache();
        }
    }

    /// Returns true if any node in the subtree carries cache metadata.
    #[must_use]
    pub fn has_cache_metadata(&self) -> bool {
        self.cache.is_some() || self.children.values().any(Element::has_cache_metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cached_tree() -> Element {
        Element::container()
            .with_cache(CacheMeta::tagged("outer"))
            .with_child(
                "inner",
                Element::markup("hello").with_cache(CacheMeta::tagged("inner")),
            )
            .with_child("plain", Element::markup("world"))
    }

    #[test]
    fn strip_cache_reaches_the_whole_subtree() {
        let mut tree = cached_tree();
        assert!(tree.has_cache_metadata());

        tree.strip_cache();
        assert!(!tree.has_cache_metadata());
        assert!(tree.child("inner").unwrap().cache.is_none());
    }

    #[test]
    fn child_lookup() {
        let tree = cached_tree();
        assert_eq!(
            tree.child("plain").unwrap().markup.as_deref(),
            Some("world")
        );
        assert!(tree.child("missing").is_none());
    }
}
