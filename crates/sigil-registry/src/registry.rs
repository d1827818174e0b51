// SPDX-FileCopyrightText: 2026 Sigil Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The immutable name-to-instance registry produced by a build.
//!
//! A `Registry` is only ever created by [`RegistryBuilder`](crate::RegistryBuilder)
//! (or [`Registry::empty`]) and exposes no way to add, remove, or replace an
//! entry afterwards. Entries keep discovery order.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use sigil_core::RegistryError;
use tracing::warn;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion on a miss.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A validated, instantiated, named plugin.
pub struct RegistryEntry<C: ?Sized> {
    name: String,
    type_name: Cow<'static, str>,
    instance: Arc<C>,
}

impl<C: ?Sized> RegistryEntry<C> {
    pub(crate) fn new(name: String, type_name: Cow<'static, str>, instance: Arc<C>) -> Self {
        Self {
            name,
            type_name,
            instance,
        }
    }

    /// Logical name from the plugin's marker.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully-qualified name of the plugin type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn instance(&self) -> &Arc<C> {
        &self.instance
    }
}

impl<C: ?Sized> fmt::Debug for RegistryEntry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Registry of plugin instances satisfying the contract `C`, keyed by name.
pub struct Registry<C: ?Sized> {
    entries: IndexMap<String, RegistryEntry<C>>,
    suggest_on_miss: bool,
}

impl<C: ?Sized> Registry<C> {
    pub(crate) fn from_entries(
        entries: IndexMap<String, RegistryEntry<C>>,
        suggest_on_miss: bool,
    ) -> Self {
        Self {
            entries,
            suggest_on_miss,
        }
    }

    /// A registry with no entries.
    pub fn empty() -> Self {
        Self::from_entries(IndexMap::new(), true)
    }

    /// Look up a plugin by exact, case-sensitive name.
    ///
    /// A miss is an ordinary outcome: it returns `None` and logs a warning.
    pub fn lookup(&self, name: &str) -> Option<Arc<C>> {
        match self.entries.get(name) {
            Some(entry) => Some(Arc::clone(&entry.instance)),
            None => {
                let suggestion = self.suggest(name);
                warn!(
                    name = %name,
                    suggestion = suggestion.as_deref().unwrap_or(""),
                    "plugin not registered"
                );
                None
            }
        }
    }

    /// Like [`lookup`](Self::lookup), but reports a miss as
    /// [`RegistryError::NotFound`] for callers that propagate with `?`.
    pub fn require(&self, name: &str) -> Result<Arc<C>, RegistryError> {
        self.entries
            .get(name)
            .map(|entry| Arc::clone(&entry.instance))
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_string(),
                suggestion: self.suggest(name),
            })
    }

    /// Get the full entry for a plugin without logging on a miss.
    pub fn entry(&self, name: &str) -> Option<&RegistryEntry<C>> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All registered names, in discovery order.
    pub fn list_names(&self) -> Vec<&str> {
        self.names().collect()
    }

    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// All entries, in discovery order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &RegistryEntry<C>> + '_ {
        self.entries.values()
    }

    /// Returns the number of registered plugins.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn suggest(&self, unknown: &str) -> Option<String> {
        if !self.suggest_on_miss {
            return None;
        }
        suggest_name(unknown, self.names())
    }
}

impl<C: ?Sized> Default for Registry<C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<C: ?Sized> fmt::Debug for Registry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.values()).finish()
    }
}

/// Suggest the closest registered name using Jaro-Winkler similarity.
///
/// Returns the best match above the similarity threshold, or `None` if no
/// name is close enough.
pub fn suggest_name<'a>(unknown: &str, names: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best_match = None;

    for name in names {
        let score = strsim::jaro_winkler(unknown, name);
        if score > best_score {
            best_score = score;
            best_match = Some(name.to_string());
        }
    }

    best_match
}
